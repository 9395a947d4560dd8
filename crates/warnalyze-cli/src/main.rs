//! warnalyze CLI: colour-vision screening from the command line.

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use warnalyze_core::model::Gender;

mod commands;

#[derive(Parser)]
#[command(name = "warnalyze", version, about = "Ishihara colour-vision screening")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and a copy of the built-in plate bank
    Init,

    /// Validate a plate bank TOML file
    Validate {
        /// Plate bank file (defaults to the configured bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Draw the plates for a new test session
    Questions {
        /// Seed for a reproducible order
        #[arg(long)]
        seed: Option<u64>,

        /// Number of plates to draw
        #[arg(long)]
        limit: Option<usize>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Score a finished test session and store the result
    Submit {
        /// Session JSON file ({"student_id", "teacher_id", "answers", "duration_secs"})
        #[arg(long)]
        session: PathBuf,

        /// Score without writing to the store
        #[arg(long)]
        dry_run: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List stored results, newest first
    Results {
        /// Only results recorded by this teacher
        #[arg(long)]
        teacher: Option<u64>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Dashboard statistics (school-wide, or for one teacher)
    Stats {
        #[arg(long)]
        teacher: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Render the report for a stored result
    Report {
        /// Result id
        #[arg(long)]
        id: u64,

        /// Output file (stdout when absent)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: html, text, json
        #[arg(long, default_value = "html")]
        format: String,
    },

    /// Manage students
    #[command(subcommand)]
    Student(StudentCommand),

    /// Manage teacher accounts
    #[command(subcommand)]
    Teacher(TeacherCommand),
}

#[derive(Subcommand)]
enum StudentCommand {
    /// Register a student
    Add {
        #[arg(long)]
        name: String,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: NaiveDate,

        /// male or female
        #[arg(long)]
        gender: Gender,

        #[arg(long)]
        major: Option<String>,
    },

    /// Delete a student and all of their results
    Delete {
        #[arg(long)]
        id: u64,
    },
}

#[derive(Subcommand)]
enum TeacherCommand {
    /// Create a teacher account
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Staff registration number
        #[arg(long)]
        nip: Option<String>,

        #[arg(long)]
        subject: Option<String>,
    },

    /// List teacher accounts with their test counts
    List {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Look up a teacher account by staff registration number
    Find {
        #[arg(long)]
        nip: String,
    },

    /// Update fields of a teacher account
    Update {
        #[arg(long)]
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        nip: Option<String>,

        #[arg(long)]
        subject: Option<String>,
    },

    /// Deactivate a teacher account
    Deactivate {
        #[arg(long)]
        id: u64,
    },
}

#[tokio::main]
async fn main() {
    let filter = match "warnalyze=info".parse() {
        Ok(directive) => tracing_subscriber::EnvFilter::from_default_env().add_directive(directive),
        Err(_) => tracing_subscriber::EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { bank } => commands::validate::execute(bank, config),
        Commands::Questions {
            seed,
            limit,
            format,
        } => commands::questions::execute(seed, limit, format, config),
        Commands::Submit {
            session,
            dry_run,
            format,
        } => commands::submit::execute(session, dry_run, format, config).await,
        Commands::Results { teacher, format } => {
            commands::results::execute(teacher, format, config).await
        }
        Commands::Stats { teacher, format } => {
            commands::stats::execute(teacher, format, config).await
        }
        Commands::Report { id, output, format } => {
            commands::report::execute(id, output, format, config).await
        }
        Commands::Student(cmd) => match cmd {
            StudentCommand::Add {
                name,
                birth_date,
                gender,
                major,
            } => commands::student::add(name, birth_date, gender, major, config).await,
            StudentCommand::Delete { id } => commands::student::delete(id, config).await,
        },
        Commands::Teacher(cmd) => match cmd {
            TeacherCommand::Add {
                name,
                email,
                nip,
                subject,
            } => commands::teacher::add(name, email, nip, subject, config).await,
            TeacherCommand::List { format } => commands::teacher::list(format, config).await,
            TeacherCommand::Find { nip } => commands::teacher::find(nip, config).await,
            TeacherCommand::Update {
                id,
                name,
                email,
                nip,
                subject,
            } => commands::teacher::update(id, name, email, nip, subject, config).await,
            TeacherCommand::Deactivate { id } => {
                commands::teacher::deactivate(id, config).await
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
