//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use warnalyze_core::bank::QuestionBank;
use warnalyze_core::model::{SubmittedAnswer, TestSession};

/// A `warnalyze` command isolated in `dir`: no user config, store inside `dir`.
fn warnalyze(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("warnalyze").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("WARNALYZE_STORE", dir.join("data").join("store.json"))
        .env_remove("RUST_LOG");
    cmd
}

/// Write a session answering every built-in plate, `correct` of them right.
fn write_session(dir: &Path, student_id: u64, teacher_id: u64, correct: usize) -> String {
    let bank = QuestionBank::builtin().unwrap();
    let answers = bank
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = if i < correct {
                q.correct_answer.clone()
            } else {
                "wrong".to_string()
            };
            SubmittedAnswer::new(q.id, answer)
        })
        .collect();
    let session = TestSession {
        student_id,
        teacher_id,
        answers,
        duration_secs: 185,
    };
    let name = format!("session-{student_id}-{teacher_id}-{correct}.json");
    std::fs::write(dir.join(&name), serde_json::to_string(&session).unwrap()).unwrap();
    name
}

fn add_teacher(dir: &Path, email: &str) {
    warnalyze(dir)
        .args(["teacher", "add", "--name", "Budi Santoso", "--email", email])
        .args(["--nip", "198501012010011001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created teacher #1"));
}

fn add_student(dir: &Path, name: &str) {
    warnalyze(dir)
        .args(["student", "add", "--name", name])
        .args(["--birth-date", "2008-09-02", "--gender", "female"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created student"));
}

#[test]
fn validate_builtin_bank() {
    let dir = TempDir::new().unwrap();
    warnalyze(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("24 plates"))
        .stdout(predicate::str::contains("Plate bank valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bank.toml"),
        r#"
[bank]
id = "tiny"
name = "Tiny"

[[plates]]
id = 1
image_url = ""
correct_answer = "12"
options = ["17", "21", "x"]
"#,
    )
    .unwrap();

    warnalyze(dir.path())
        .args(["validate", "--bank", "bank.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[plate 1] WARNING: image_url is empty"))
        .stdout(predicate::str::contains("not among the options"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    warnalyze(dir.path())
        .args(["validate", "--bank", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    warnalyze(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created warnalyze.toml"))
        .stdout(predicate::str::contains("Created plates/ishihara-24.toml"));

    assert!(dir.path().join("warnalyze.toml").exists());
    assert!(dir.path().join("plates/ishihara-24.toml").exists());

    warnalyze(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));

    // The generated config points at the copied bank.
    warnalyze(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plate bank valid"));
}

#[test]
fn seeded_questions_are_reproducible_and_hide_answers() {
    let dir = TempDir::new().unwrap();
    let run = || {
        warnalyze(dir.path())
            .args(["questions", "--seed", "42", "--format", "json"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let questions: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(questions.as_array().unwrap().len(), 24);
    assert!(!String::from_utf8_lossy(&first.stdout).contains("correct_answer"));
}

#[test]
fn questions_limit_draws_subset() {
    let dir = TempDir::new().unwrap();
    warnalyze(dir.path())
        .args(["questions", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(5 plates)"));
}

#[test]
fn unknown_format_is_an_error() {
    let dir = TempDir::new().unwrap();
    warnalyze(dir.path())
        .args(["questions", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: xml"));
}

#[test]
fn submit_then_report() {
    let dir = TempDir::new().unwrap();
    add_teacher(dir.path(), "guru@smk.sch.id");
    add_student(dir.path(), "Siti Aminah");
    let session = write_session(dir.path(), 1, 1, 20);

    warnalyze(dir.path())
        .args(["submit", "--session", &session])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored result #1"))
        .stdout(predicate::str::contains("20/24 (83%)"))
        .stdout(predicate::str::contains("Mild deuteranomaly"));

    warnalyze(dir.path())
        .arg("results")
        .assert()
        .success()
        .stdout(predicate::str::contains("Siti Aminah"))
        .stdout(predicate::str::contains("20/24"));

    warnalyze(dir.path())
        .args(["report", "--id", "1", "--output", "out/1.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML report written"));
    let html = std::fs::read_to_string(dir.path().join("out/1.html")).unwrap();
    assert!(html.contains("SITI AMINAH"));
    assert!(html.contains("MILD DEUTERANOMALY"));
    assert!(html.contains("3 min 5 sec"));

    warnalyze(dir.path())
        .args(["report", "--id", "1", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20 of 24 (83%)"));

    warnalyze(dir.path())
        .args(["stats", "--teacher", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Students tested:     1"))
        .stdout(predicate::str::contains("Average score:       83%"));

    warnalyze(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Colour-deficient:      1"));

    warnalyze(dir.path())
        .args(["teacher", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("guru@smk.sch.id"));
}

#[test]
fn report_for_missing_result_fails() {
    let dir = TempDir::new().unwrap();
    warnalyze(dir.path())
        .args(["report", "--id", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("test result not found: 9"));
}

#[test]
fn dry_run_does_not_store() {
    let dir = TempDir::new().unwrap();
    add_teacher(dir.path(), "guru@smk.sch.id");
    add_student(dir.path(), "Rina");
    let session = write_session(dir.path(), 1, 1, 24);

    warnalyze(dir.path())
        .args(["submit", "--session", &session, "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("Normal color vision"));

    warnalyze(dir.path())
        .arg("results")
        .assert()
        .success()
        .stdout(predicate::str::contains("No results recorded"));
}

#[test]
fn submit_for_unknown_student_fails() {
    let dir = TempDir::new().unwrap();
    add_teacher(dir.path(), "guru@smk.sch.id");
    let session = write_session(dir.path(), 5, 1, 24);

    warnalyze(dir.path())
        .args(["submit", "--session", &session])
        .assert()
        .failure()
        .stderr(predicate::str::contains("student not found: 5"));
}

#[test]
fn deactivated_teacher_cannot_submit() {
    let dir = TempDir::new().unwrap();
    add_teacher(dir.path(), "guru@smk.sch.id");
    add_student(dir.path(), "Rina");
    let session = write_session(dir.path(), 1, 1, 24);

    warnalyze(dir.path())
        .args(["teacher", "deactivate", "--id", "1"])
        .assert()
        .success();

    warnalyze(dir.path())
        .args(["submit", "--session", &session])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deactivated"));
}

#[test]
fn teacher_validation_and_uniqueness() {
    let dir = TempDir::new().unwrap();

    warnalyze(dir.path())
        .args(["teacher", "add", "--name", "Budi", "--email", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid email"));

    add_teacher(dir.path(), "guru@smk.sch.id");

    warnalyze(dir.path())
        .args(["teacher", "add", "--name", "Other", "--email", "GURU@smk.sch.id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    warnalyze(dir.path())
        .args(["teacher", "update", "--id", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));

    warnalyze(dir.path())
        .args(["teacher", "update", "--id", "1", "--subject", "Physics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated teacher #1"));
}

#[test]
fn deleting_student_removes_results() {
    let dir = TempDir::new().unwrap();
    add_teacher(dir.path(), "guru@smk.sch.id");
    add_student(dir.path(), "Rina");
    let session = write_session(dir.path(), 1, 1, 10);

    warnalyze(dir.path())
        .args(["submit", "--session", &session])
        .assert()
        .success()
        .stdout(predicate::str::contains("Red-green color blindness"));

    warnalyze(dir.path())
        .args(["student", "delete", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted student #1"));

    warnalyze(dir.path())
        .arg("results")
        .assert()
        .success()
        .stdout(predicate::str::contains("No results recorded"));

    warnalyze(dir.path())
        .args(["student", "delete", "--id", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("student not found: 1"));
}

#[test]
fn future_birth_date_is_rejected() {
    let dir = TempDir::new().unwrap();
    warnalyze(dir.path())
        .args(["student", "add", "--name", "Rina"])
        .args(["--birth-date", "2999-01-01", "--gender", "f"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid birth_date"));
}

#[test]
fn teacher_find_by_nip() {
    let dir = TempDir::new().unwrap();
    add_teacher(dir.path(), "guru@smk.sch.id");

    warnalyze(dir.path())
        .args(["teacher", "find", "--nip", " 198501012010011001 "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Teacher #1: Budi Santoso"))
        .stdout(predicate::str::contains("guru@smk.sch.id"));

    warnalyze(dir.path())
        .args(["teacher", "find", "--nip", "000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no teacher with NIP 000"));
}
