//! Core data model types for warnalyze.
//!
//! These are the records shared by the scoring engine, the stores, the
//! report renderer and the CLI.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::diagnosis::DiagnosisBand;
use crate::error::ValidationError;

/// Token meaning "no number visible on this plate".
///
/// Stored in the bank as the literal `x`; matched case-insensitively like
/// every other answer, so `X` scores the same.
pub const NO_DIGIT_SENTINEL: &str = "x";

/// Every plate offers exactly this many candidate answers.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single Ishihara plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable plate identifier within the bank.
    pub id: u32,
    /// Where the plate image is served from.
    pub image_url: String,
    /// What a viewer with normal colour vision reads. May be [`NO_DIGIT_SENTINEL`].
    pub correct_answer: String,
    /// Candidate answers offered to the test-taker.
    pub options: Vec<String>,
    /// Free-text note about the plate.
    #[serde(default)]
    pub description: String,
}

/// An answer as it arrives from the test client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: u32,
    pub answer: String,
}

impl SubmittedAnswer {
    pub fn new(question_id: u32, answer: impl Into<String>) -> Self {
        Self {
            question_id,
            answer: answer.into(),
        }
    }
}

/// A scored answer. Created at submission time and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub answer: String,
    pub correct: bool,
}

/// A finished test as submitted by the client.
///
/// Exists only until it is scored; the persisted form is [`TestResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSession {
    pub student_id: u64,
    pub teacher_id: u64,
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
    /// Elapsed time in seconds.
    pub duration_secs: u32,
}

/// Student gender as recorded on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "laki-laki" => Ok(Gender::Male),
            "female" | "f" | "perempuan" => Ok(Gender::Female),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// A student who takes the screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub major: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Intake form for a new student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub major: Option<String>,
}

impl NewStudent {
    /// Check the form against `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "full name is required"));
        }
        if self.birth_date > today {
            return Err(ValidationError::new(
                "birth_date",
                format!("{} is in the future", self.birth_date),
            ));
        }
        Ok(())
    }
}

/// A teacher (examiner) account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Staff registration number.
    #[serde(default)]
    pub nip: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Form for creating a teacher account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub nip: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

impl NewTeacher {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "name is required"));
        }
        validate_email(&self.email)
    }
}

/// Partial teacher update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nip: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

impl TeacherUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.nip.is_none() && self.subject.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::new("name", "name must not be blank"));
            }
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Apply the present fields to `teacher`.
    pub fn apply(&self, teacher: &mut Teacher) {
        if let Some(name) = &self.name {
            teacher.name = name.trim().to_string();
        }
        if let Some(email) = &self.email {
            teacher.email = email.trim().to_string();
        }
        if let Some(nip) = &self.nip {
            teacher.nip = Some(nip.clone());
        }
        if let Some(subject) = &self.subject {
            teacher.subject = Some(subject.clone());
        }
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::new(
            "email",
            format!("'{email}' is not a valid address"),
        )),
    }
}

/// A teacher together with how many tests they have administered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherSummary {
    pub teacher: Teacher,
    pub tests_count: usize,
}

/// A scored test ready to be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTestResult {
    pub student_id: u64,
    pub teacher_id: u64,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u8,
    pub band: DiagnosisBand,
    pub diagnosis: String,
    pub recommendations: String,
    pub answers: Vec<Answer>,
    pub duration_secs: u32,
}

/// A persisted test result. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub id: u64,
    pub student_id: u64,
    pub teacher_id: u64,
    /// Number of correct answers.
    pub score: u32,
    /// Number of answers that were scored.
    pub total_questions: u32,
    /// `round(100 * score / total_questions)`, 0 for an empty test.
    pub percentage: u8,
    pub band: DiagnosisBand,
    pub diagnosis: String,
    pub recommendations: String,
    pub answers: Vec<Answer>,
    pub duration_secs: u32,
    pub created_at: DateTime<Utc>,
}

impl TestResult {
    /// Stamp a [`NewTestResult`] with its storage identity.
    pub fn from_new(id: u64, created_at: DateTime<Utc>, new: NewTestResult) -> Self {
        Self {
            id,
            student_id: new.student_id,
            teacher_id: new.teacher_id,
            score: new.score,
            total_questions: new.total_questions,
            percentage: new.percentage,
            band: new.band,
            diagnosis: new.diagnosis,
            recommendations: new.recommendations,
            answers: new.answers,
            duration_secs: new.duration_secs,
            created_at,
        }
    }
}

/// A result joined with the student and the examiner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultDetail {
    pub result: TestResult,
    pub student: Student,
    pub teacher: Teacher,
}
