//! The `warnalyze questions` command.

use std::path::Path;

use anyhow::Result;

use warnalyze_core::provider::{plan_session, ClientQuestion};
use warnalyze_store::load_config_from;

use super::check_format;

pub fn execute(
    seed: Option<u64>,
    limit: Option<usize>,
    format: String,
    config_path: Option<&Path>,
) -> Result<()> {
    check_format(&format, &["text", "json"])?;

    let config = load_config_from(config_path)?;
    let bank = config.load_bank()?;
    let mut plan = config.engine_config().session_plan(seed);
    if limit.is_some() {
        plan.limit = limit;
    }

    let questions: Vec<ClientQuestion> = plan_session(&bank, &plan)
        .iter()
        .map(ClientQuestion::from)
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&questions)?);
        return Ok(());
    }

    println!("{} ({} plates)", bank.name, questions.len());
    for (i, q) in questions.iter().enumerate() {
        println!(
            "{:>3}. plate {:<3} [{}]  {}",
            i + 1,
            q.id,
            q.options.join(" | "),
            q.image_url
        );
    }

    Ok(())
}
