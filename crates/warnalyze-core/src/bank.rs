//! Ishihara plate bank.
//!
//! Loads plate banks from TOML, validates them, and exposes the built-in
//! 24-plate bank. A bank is immutable once loaded and is shared with the
//! scoring engine as an injected value.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, NO_DIGIT_SENTINEL, OPTIONS_PER_QUESTION};

const BUILTIN_BANK: &str = include_str!("../plates/ishihara-24.toml");

/// An immutable, id-indexed set of plates.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    pub description: String,
    questions: Vec<Question>,
    index: HashMap<u32, usize>,
}

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    plates: Vec<TomlPlate>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlPlate {
    id: u32,
    image_url: String,
    correct_answer: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    description: String,
}

impl QuestionBank {
    /// Build a bank from already-parsed plates.
    ///
    /// Fails if two plates share an id, since answers are looked up by id.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self> {
        let id = id.into();
        let mut index = HashMap::with_capacity(questions.len());
        for (pos, q) in questions.iter().enumerate() {
            if index.insert(q.id, pos).is_some() {
                anyhow::bail!("bank '{}' has duplicate plate id {}", id, q.id);
            }
        }
        Ok(Self {
            id,
            name: name.into(),
            description: String::new(),
            questions,
            index,
        })
    }

    /// The 24-plate bank shipped with warnalyze.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_BANK, Path::new("<builtin>/ishihara-24.toml"))
    }

    /// Raw TOML of the built-in bank (used by `warnalyze init`).
    pub fn builtin_toml() -> &'static str {
        BUILTIN_BANK
    }

    /// Parse a single TOML file into a bank.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read question bank: {}", path.display()))?;
        Self::from_toml_str(&content, path)
    }

    /// Parse a TOML string into a bank (useful for testing).
    pub fn from_toml_str(content: &str, source_path: &Path) -> Result<Self> {
        let parsed: TomlBankFile = toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

        let questions = parsed
            .plates
            .into_iter()
            .map(|p| Question {
                id: p.id,
                image_url: p.image_url,
                correct_answer: p.correct_answer,
                options: p.options,
                description: p.description,
            })
            .collect();

        let mut bank = Self::new(parsed.bank.id, parsed.bank.name, questions)
            .with_context(|| format!("invalid question bank: {}", source_path.display()))?;
        bank.description = parsed.bank.description;
        Ok(bank)
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.index.get(&id).map(|&pos| &self.questions[pos])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct BankWarning {
    /// The plate ID (if applicable).
    pub plate_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for common authoring mistakes.
pub fn validate_bank(bank: &QuestionBank) -> Vec<BankWarning> {
    let mut warnings = Vec::new();

    if bank.is_empty() {
        warnings.push(BankWarning {
            plate_id: None,
            message: "bank has no plates".into(),
        });
    }

    for q in bank.questions() {
        let mut warn = |message: String| {
            warnings.push(BankWarning {
                plate_id: Some(q.id),
                message,
            })
        };

        if q.image_url.trim().is_empty() {
            warn("image_url is empty".into());
        }

        if q.correct_answer.trim().is_empty() {
            warn(format!(
                "correct_answer is empty (use \"{NO_DIGIT_SENTINEL}\" for no visible number)"
            ));
        }

        if q.options.len() != OPTIONS_PER_QUESTION {
            warn(format!(
                "expected {OPTIONS_PER_QUESTION} options, found {}",
                q.options.len()
            ));
        }

        let mut seen = HashSet::new();
        for opt in &q.options {
            if !seen.insert(opt.trim().to_lowercase()) {
                warn(format!("duplicate option: {opt}"));
            }
        }

        let expected = q.correct_answer.trim().to_lowercase();
        if !seen.contains(&expected) {
            warn(format!(
                "correct_answer '{}' is not among the options",
                q.correct_answer
            ));
        }
    }

    warnings
}
