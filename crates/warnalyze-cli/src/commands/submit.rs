//! The `warnalyze submit` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use warnalyze_core::error::ScreeningError;
use warnalyze_core::model::{ResultDetail, TestSession};
use warnalyze_core::traits::ResultRepository;
use warnalyze_store::load_config_from;

use super::{check_format, engine_with};

pub async fn execute(
    session_path: PathBuf,
    dry_run: bool,
    format: String,
    config_path: Option<&Path>,
) -> Result<()> {
    check_format(&format, &["text", "json"])?;

    let content = std::fs::read_to_string(&session_path)
        .with_context(|| format!("failed to read session: {}", session_path.display()))?;
    let session: TestSession = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse session: {}", session_path.display()))?;

    let config = load_config_from(config_path)?;
    let store = config.open_store().await?;
    let repo: Arc<dyn ResultRepository> = if dry_run {
        Arc::new(store.snapshot().await)
    } else {
        Arc::new(store)
    };
    let engine = engine_with(&config, repo)?;

    let detail = match engine.submit(session).await {
        Ok(detail) => detail,
        Err(e) => {
            if e.downcast_ref::<ScreeningError>()
                .is_some_and(ScreeningError::is_rejection)
            {
                tracing::warn!("submission rejected, nothing stored");
            }
            return Err(e);
        }
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print_detail(&detail, dry_run);
    }

    Ok(())
}

fn print_detail(detail: &ResultDetail, dry_run: bool) {
    let r = &detail.result;
    if dry_run {
        println!("Dry run: result not stored.");
    } else {
        println!("Stored result #{}", r.id);
    }
    println!("  Student:    {}", detail.student.name);
    println!("  Examiner:   {}", detail.teacher.name);
    println!(
        "  Score:      {}/{} ({}%)",
        r.score, r.total_questions, r.percentage
    );
    println!("  Diagnosis:  {}", r.diagnosis);
    println!("  Duration:   {}s", r.duration_secs);
}
