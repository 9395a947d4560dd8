//! The `warnalyze teacher` commands.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use warnalyze_core::error::ScreeningError;
use warnalyze_core::model::{NewTeacher, TeacherUpdate};
use warnalyze_core::traits::ResultRepository;

use super::{check_format, open_engine};

pub async fn add(
    name: String,
    email: String,
    nip: Option<String>,
    subject: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let (_, engine) = open_engine(config_path).await?;
    let teacher = engine
        .register_teacher(NewTeacher {
            name,
            email,
            nip,
            subject,
        })
        .await?;
    println!("Created teacher #{}: {}", teacher.id, teacher.name);
    Ok(())
}

pub async fn list(format: String, config_path: Option<&Path>) -> Result<()> {
    check_format(&format, &["table", "json"])?;

    let (_, engine) = open_engine(config_path).await?;
    let teachers = engine.repository().list_teachers().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&teachers)?);
        return Ok(());
    }

    if teachers.is_empty() {
        println!("No teachers registered.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "E-mail", "NIP", "Subject", "Active", "Tests"]);
    for s in &teachers {
        let t = &s.teacher;
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.name),
            Cell::new(&t.email),
            Cell::new(t.nip.as_deref().unwrap_or("-")),
            Cell::new(t.subject.as_deref().unwrap_or("-")),
            Cell::new(if t.is_active { "yes" } else { "no" }),
            Cell::new(s.tests_count),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn find(nip: String, config_path: Option<&Path>) -> Result<()> {
    let (_, engine) = open_engine(config_path).await?;
    let Some(t) = engine.repository().find_teacher_by_nip(&nip).await? else {
        anyhow::bail!("no teacher with NIP {}", nip.trim());
    };
    println!("Teacher #{}: {}", t.id, t.name);
    println!("  E-mail:   {}", t.email);
    println!("  Subject:  {}", t.subject.as_deref().unwrap_or("-"));
    println!("  Active:   {}", if t.is_active { "yes" } else { "no" });
    Ok(())
}

pub async fn update(
    id: u64,
    name: Option<String>,
    email: Option<String>,
    nip: Option<String>,
    subject: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let update = TeacherUpdate {
        name,
        email,
        nip,
        subject,
    };
    if update.is_empty() {
        anyhow::bail!("nothing to update: pass at least one of --name, --email, --nip, --subject");
    }
    update.validate().map_err(ScreeningError::from)?;

    let (_, engine) = open_engine(config_path).await?;
    let teacher = engine.repository().update_teacher(id, update).await?;
    println!("Updated teacher #{}: {}", teacher.id, teacher.name);
    Ok(())
}

pub async fn deactivate(id: u64, config_path: Option<&Path>) -> Result<()> {
    let (_, engine) = open_engine(config_path).await?;
    engine.repository().deactivate_teacher(id).await?;
    println!("Deactivated teacher #{id}");
    Ok(())
}
