//! The `warnalyze results` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use warnalyze_core::model::ResultDetail;
use warnalyze_core::traits::ResultRepository;

use super::{check_format, open_engine};

pub async fn execute(teacher: Option<u64>, format: String, config_path: Option<&Path>) -> Result<()> {
    check_format(&format, &["table", "json"])?;

    let (_, engine) = open_engine(config_path).await?;
    let repo = engine.repository();
    let results = match teacher {
        Some(id) => repo.results_by_teacher(id).await?,
        None => repo.all_results().await?,
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results recorded.");
        return Ok(());
    }

    println!("{}", results_table(&results));
    Ok(())
}

fn results_table(results: &[ResultDetail]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Date",
        "Student",
        "Examiner",
        "Score",
        "%",
        "Diagnosis",
    ]);

    for d in results {
        table.add_row(vec![
            Cell::new(d.result.id),
            Cell::new(d.result.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&d.student.name),
            Cell::new(&d.teacher.name),
            Cell::new(format!("{}/{}", d.result.score, d.result.total_questions)),
            Cell::new(d.result.percentage),
            Cell::new(&d.result.diagnosis),
        ]);
    }

    table
}
