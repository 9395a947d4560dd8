//! The `warnalyze init` command.

use anyhow::Result;

use warnalyze_core::bank::QuestionBank;

pub fn execute() -> Result<()> {
    if std::path::Path::new("warnalyze.toml").exists() {
        println!("warnalyze.toml already exists, skipping.");
    } else {
        std::fs::write("warnalyze.toml", SAMPLE_CONFIG)?;
        println!("Created warnalyze.toml");
    }

    std::fs::create_dir_all("plates")?;
    let bank_path = std::path::Path::new("plates/ishihara-24.toml");
    if bank_path.exists() {
        println!("plates/ishihara-24.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, QuestionBank::builtin_toml())?;
        println!("Created plates/ishihara-24.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit warnalyze.toml with your school's details");
    println!("  2. Run: warnalyze teacher add --name <name> --email <email>");
    println!("  3. Run: warnalyze student add --name <name> --birth-date <YYYY-MM-DD> --gender <male|female>");
    println!("  4. Run: warnalyze questions");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# warnalyze configuration

store_path = "./warnalyze-data/store.json"
question_bank = "plates/ishihara-24.toml"

# What to do with answers for plates that are not in the bank: "drop" or "reject"
unknown_question_policy = "drop"

# Draw a subset of the bank per session (whole bank when commented out)
# questions_per_session = 24
shuffle_options = false

[report]
institution = "Digital Health Screening Platform"
title = "Color Vision Screening Report"
# city = "Bandung"
"#;
