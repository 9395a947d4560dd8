//! The `warnalyze report` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use warnalyze_report::{
    generate_html, generate_text, write_html_report, write_text_report, ReportOptions,
};
use warnalyze_store::ReportSettings;

use super::{check_format, open_engine};

fn report_options(settings: &ReportSettings) -> ReportOptions {
    ReportOptions {
        institution: settings.institution.clone(),
        title: settings.title.clone(),
        city: settings.city.clone(),
    }
}

pub async fn execute(
    id: u64,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<&Path>,
) -> Result<()> {
    check_format(&format, &["html", "text", "json"])?;

    let (config, engine) = open_engine(config_path).await?;
    let detail = engine.result(id).await?;
    let options = report_options(&config.report);

    match (format.as_str(), output) {
        ("html", Some(path)) => {
            write_html_report(&detail, &options, &path)?;
            println!("HTML report written to {}", path.display());
        }
        ("text", Some(path)) => {
            write_text_report(&detail, &options, &path)?;
            println!("Text report written to {}", path.display());
        }
        ("json", Some(path)) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, serde_json::to_string_pretty(&detail)?)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            println!("JSON report written to {}", path.display());
        }
        ("html", None) => println!("{}", generate_html(&detail, &options)),
        ("text", None) => print!("{}", generate_text(&detail, &options)),
        (_, None) => println!("{}", serde_json::to_string_pretty(&detail)?),
        (other, Some(_)) => anyhow::bail!("unknown format: {other}"),
    }

    Ok(())
}
