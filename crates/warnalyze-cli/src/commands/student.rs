//! The `warnalyze student` commands.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use warnalyze_core::model::{Gender, NewStudent};
use warnalyze_core::traits::ResultRepository;

use super::open_engine;

pub async fn add(
    name: String,
    birth_date: NaiveDate,
    gender: Gender,
    major: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let (_, engine) = open_engine(config_path).await?;
    let student = engine
        .register_student(NewStudent {
            name,
            birth_date,
            gender,
            major,
        })
        .await?;
    println!("Created student #{}: {}", student.id, student.name);
    Ok(())
}

pub async fn delete(id: u64, config_path: Option<&Path>) -> Result<()> {
    let (_, engine) = open_engine(config_path).await?;
    engine.repository().delete_student(id).await?;
    tracing::info!(student_id = id, "deleted student and their results");
    println!("Deleted student #{id}");
    Ok(())
}
