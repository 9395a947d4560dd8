pub mod init;
pub mod questions;
pub mod report;
pub mod results;
pub mod stats;
pub mod student;
pub mod submit;
pub mod teacher;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use warnalyze_core::engine::ScreeningEngine;
use warnalyze_core::traits::ResultRepository;
use warnalyze_store::{load_config_from, WarnalyzeConfig};

/// Build an engine over the configured bank and `repo`.
pub fn engine_with(config: &WarnalyzeConfig, repo: Arc<dyn ResultRepository>) -> Result<ScreeningEngine> {
    let bank = Arc::new(config.load_bank()?);
    Ok(ScreeningEngine::new(bank, repo, config.engine_config()))
}

/// Load the config and open an engine backed by the configured JSON store.
pub async fn open_engine(config_path: Option<&Path>) -> Result<(WarnalyzeConfig, ScreeningEngine)> {
    let config = load_config_from(config_path)?;
    let repo = Arc::new(config.open_store().await?);
    let engine = engine_with(&config, repo)?;
    Ok((config, engine))
}

/// Reject an unsupported `--format` value.
pub fn check_format(format: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&format) {
        Ok(())
    } else {
        anyhow::bail!(
            "unknown format: {format} (expected one of: {})",
            allowed.join(", ")
        )
    }
}
