//! Diagnosis classifier.
//!
//! Maps a rounded percentage to one of four ordered bands. The band table is
//! scanned from the highest threshold down and the first match wins, so the
//! bands are closed at their lower bound and never overlap.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::error::ScoringError;
use crate::model::{Answer, NewTestResult, SubmittedAnswer, TestSession};
use crate::scoring::{score_answers, UnknownQuestionPolicy};

/// Diagnostic category, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisBand {
    Normal,
    MildDeuteranomaly,
    ModerateRedGreen,
    RedGreenBlindness,
}

/// Bands in evaluation order, highest threshold first.
pub const BANDS: [DiagnosisBand; 4] = [
    DiagnosisBand::Normal,
    DiagnosisBand::MildDeuteranomaly,
    DiagnosisBand::ModerateRedGreen,
    DiagnosisBand::RedGreenBlindness,
];

impl DiagnosisBand {
    /// Lowest percentage (inclusive) that falls in this band.
    pub const fn threshold(self) -> u8 {
        match self {
            DiagnosisBand::Normal => 90,
            DiagnosisBand::MildDeuteranomaly => 75,
            DiagnosisBand::ModerateRedGreen => 60,
            DiagnosisBand::RedGreenBlindness => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DiagnosisBand::Normal => "Normal color vision",
            DiagnosisBand::MildDeuteranomaly => "Mild deuteranomaly",
            DiagnosisBand::ModerateRedGreen => "Moderate protanomaly/deuteranomaly",
            DiagnosisBand::RedGreenBlindness => {
                "Red-green color blindness (protanopia/deuteranopia)"
            }
        }
    }

    pub const fn recommendations(self) -> &'static str {
        match self {
            DiagnosisBand::Normal => NORMAL_RECOMMENDATIONS,
            DiagnosisBand::MildDeuteranomaly => MILD_RECOMMENDATIONS,
            DiagnosisBand::ModerateRedGreen => MODERATE_RECOMMENDATIONS,
            DiagnosisBand::RedGreenBlindness => RED_GREEN_RECOMMENDATIONS,
        }
    }

    /// Everything below the normal band counts as a colour-vision deficiency.
    pub fn is_color_deficient(self) -> bool {
        self != DiagnosisBand::Normal
    }
}

impl fmt::Display for DiagnosisBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const NORMAL_RECOMMENDATIONS: &str = "The result shows normal color vision with no sign of a color perception deficiency. No follow-up examination or treatment is needed. Colors can be told apart reliably under different lighting, so there is no restriction on daily activities or on study tracks and occupations that depend on accurate color recognition, such as driving, laboratory work, map reading or detailed visual work. The student is fully eligible for all tracks.";

const MILD_RECOMMENDATIONS: &str = "The result shows a mild difficulty in telling green from red. Color vision is close to normal, but some colors may be confused under certain lighting or on faint color maps. No therapy is needed; a periodic re-check is advised. Where helpful, use extra symbols or text labels on color-coded tools and equipment. Most study tracks remain viable; take minor care in tracks where color coding is safety-relevant.";

const MODERATE_RECOMMENDATIONS: &str = "The result shows a moderate difficulty in telling red from green, as is common with protanomaly (red) or deuteranomaly (green). The condition is usually inherited. A confirmatory examination by an eye specialist is recommended to establish the type and degree of the deficiency, using tests such as the Farnsworth D-15 or an anomaloscope. Avoid study tracks where color is critical (for example electrical wiring, chemical analysis or signal operation), and avoid relying on color alone in daily life; use symbols or shapes where possible.";

const RED_GREEN_RECOMMENDATIONS: &str = "The result indicates a high likelihood of protanopia (red not perceived) or deuteranopia (green not perceived). The condition is congenital and usually inherited through the X chromosome. A complete examination at an eye clinic is strongly recommended for a definitive diagnosis. Study tracks where color is critical should be avoided. The condition is not harmful but affects tasks such as reading maps, recognising traffic lights or working with colored signals. Corrective aids such as color filter lenses, or replacing color cues with symbols and text labels, can help at school and at work.";

/// Map a percentage to its band. Values above 100 are a caller bug and
/// land in the top band.
pub fn classify(percentage: u8) -> DiagnosisBand {
    debug_assert!(percentage <= 100, "percentage out of range: {percentage}");
    BANDS
        .iter()
        .copied()
        .find(|band| percentage >= band.threshold())
        .unwrap_or(DiagnosisBand::RedGreenBlindness)
}

/// A scored and classified submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u8,
    pub band: DiagnosisBand,
    pub diagnosis: String,
    pub recommendations: String,
    pub answers: Vec<Answer>,
}

impl Assessment {
    /// Score `answers` against `bank` and classify the result.
    pub fn evaluate(
        bank: &QuestionBank,
        answers: &[SubmittedAnswer],
        policy: UnknownQuestionPolicy,
    ) -> Result<Self, ScoringError> {
        let summary = score_answers(bank, answers, policy)?;
        let band = classify(summary.percentage);
        Ok(Self {
            score: summary.score,
            total_questions: summary.total_questions,
            percentage: summary.percentage,
            band,
            diagnosis: band.label().to_string(),
            recommendations: band.recommendations().to_string(),
            answers: summary.answers,
        })
    }

    /// Attach session metadata, producing the record to persist.
    pub fn into_new_result(self, session: &TestSession) -> NewTestResult {
        NewTestResult {
            student_id: session.student_id,
            teacher_id: session.teacher_id,
            score: self.score,
            total_questions: self.total_questions,
            percentage: self.percentage,
            band: self.band,
            diagnosis: self.diagnosis,
            recommendations: self.recommendations,
            answers: self.answers,
            duration_secs: session.duration_secs,
        }
    }
}
