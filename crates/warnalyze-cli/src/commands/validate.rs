//! The `warnalyze validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use warnalyze_core::bank::{validate_bank, QuestionBank};
use warnalyze_store::load_config_from;

pub fn execute(bank_path: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let bank = match bank_path {
        Some(path) => QuestionBank::load(&path)?,
        None => load_config_from(config_path)?.load_bank()?,
    };

    println!("Plate bank: {} ({} plates)", bank.name, bank.len());

    let warnings = validate_bank(&bank);
    for w in &warnings {
        let prefix = w
            .plate_id
            .map(|id| format!("  [plate {id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Plate bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
