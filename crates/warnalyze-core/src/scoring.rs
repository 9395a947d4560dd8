//! Scoring engine.
//!
//! Turns a submitted answer list into per-plate correctness and an
//! aggregate score. Pure: no I/O, no shared state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::error::ScoringError;
use crate::model::{Answer, SubmittedAnswer};

/// What to do with an answer whose plate id is not in the bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownQuestionPolicy {
    /// Leave the answer out of both score and total.
    #[default]
    Drop,
    /// Fail the whole submission.
    Reject,
}

/// Aggregate score of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Number of correct answers.
    pub score: u32,
    /// Number of answers scored (not the bank size).
    pub total_questions: u32,
    /// Rounded percentage in `0..=100`.
    pub percentage: u8,
    /// Scored answers, in submission order.
    pub answers: Vec<Answer>,
}

/// Case-insensitive comparison of trimmed answers.
pub fn is_correct(submitted: &str, expected: &str) -> bool {
    submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// `round(100 * score / total)`, half rounded up; 0 when `total` is 0.
pub fn percentage(score: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score.min(total));
    let total = u64::from(total);
    // (200s + t) / 2t == floor(100s/t + 1/2)
    ((200 * score + total) / (2 * total)) as u8
}

/// Score `submitted` against the bank.
pub fn score_answers(
    bank: &QuestionBank,
    submitted: &[SubmittedAnswer],
    policy: UnknownQuestionPolicy,
) -> Result<ScoreSummary, ScoringError> {
    let mut seen = HashSet::with_capacity(submitted.len());
    let mut answers = Vec::with_capacity(submitted.len());

    for item in submitted {
        let Some(question) = bank.get(item.question_id) else {
            match policy {
                UnknownQuestionPolicy::Reject => {
                    return Err(ScoringError::UnknownQuestion(item.question_id));
                }
                UnknownQuestionPolicy::Drop => {
                    tracing::warn!(
                        bank = %bank.id,
                        "dropping answer for unknown question id {}",
                        item.question_id
                    );
                    continue;
                }
            }
        };

        if !seen.insert(item.question_id) {
            return Err(ScoringError::DuplicateAnswer(item.question_id));
        }

        answers.push(Answer {
            question_id: item.question_id,
            answer: item.answer.clone(),
            correct: is_correct(&item.answer, &question.correct_answer),
        });
    }

    let score = answers.iter().filter(|a| a.correct).count() as u32;
    let total_questions = answers.len() as u32;

    Ok(ScoreSummary {
        score,
        total_questions,
        percentage: percentage(score, total_questions),
        answers,
    })
}
