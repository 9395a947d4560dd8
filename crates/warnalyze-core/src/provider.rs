//! Question provider: per-session plate ordering.
//!
//! Shuffling is kept apart from scoring. A plan with a seed always yields
//! the same order, so tests can pin the sequence.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::model::Question;

/// How to draw plates for one test session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionPlan {
    /// Fixed RNG seed; `None` draws from the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Keep only the first `limit` plates of the shuffled order.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Also shuffle the answer options of each plate.
    #[serde(default)]
    pub shuffle_options: bool,
}

impl SessionPlan {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }
}

/// A plate as shown to the test-taker: no correct answer attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientQuestion {
    pub id: u32,
    pub image_url: String,
    pub options: Vec<String>,
}

impl From<&Question> for ClientQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            image_url: q.image_url.clone(),
            options: q.options.clone(),
        }
    }
}

/// Draw a new ordered sequence of plates from `bank`.
///
/// The bank itself is left untouched.
pub fn plan_session(bank: &QuestionBank, plan: &SessionPlan) -> Vec<Question> {
    let questions = match plan.seed {
        Some(seed) => shuffle_with(bank, plan, &mut StdRng::seed_from_u64(seed)),
        None => shuffle_with(bank, plan, &mut rand::thread_rng()),
    };
    tracing::debug!(
        bank = %bank.id,
        drawn = questions.len(),
        seeded = plan.seed.is_some(),
        "planned test session"
    );
    questions
}

fn shuffle_with<R: Rng + ?Sized>(
    bank: &QuestionBank,
    plan: &SessionPlan,
    rng: &mut R,
) -> Vec<Question> {
    let mut questions = bank.questions().to_vec();
    questions.shuffle(rng);

    if let Some(limit) = plan.limit {
        questions.truncate(limit);
    }

    if plan.shuffle_options {
        for q in &mut questions {
            q.options.shuffle(rng);
        }
    }

    questions
}
