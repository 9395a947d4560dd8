//! The `warnalyze stats` command.

use std::path::Path;

use anyhow::Result;

use warnalyze_core::error::ScreeningError;
use warnalyze_core::traits::ResultRepository;

use super::{check_format, open_engine};

pub async fn execute(teacher: Option<u64>, format: String, config_path: Option<&Path>) -> Result<()> {
    check_format(&format, &["text", "json"])?;

    let (_, engine) = open_engine(config_path).await?;

    match teacher {
        Some(id) => {
            let account = engine
                .repository()
                .get_teacher(id)
                .await?
                .ok_or(ScreeningError::TeacherNotFound(id))?;
            let stats = engine.teacher_stats(id).await?;
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Teacher: {}", account.name);
                println!("  Students tested:     {}", stats.total_students);
                println!("  Tests last 7 days:   {}", stats.weekly_tests);
                println!("  Average score:       {}%", stats.accuracy);
            }
        }
        None => {
            let stats = engine.admin_stats().await?;
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Active teachers:       {}", stats.teachers);
                println!("Students tested:       {}", stats.students);
                println!("Tests last 30 days:    {}", stats.monthly_tests);
                println!("Colour-deficient:      {}", stats.color_blind);
            }
        }
    }

    Ok(())
}
