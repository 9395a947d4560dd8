//! Screening engine.
//!
//! Ties the question bank, the scoring engine, the diagnosis classifier and
//! a repository together: hand out a session, take a submission back,
//! score it, persist it exactly once.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use crate::bank::QuestionBank;
use crate::diagnosis::Assessment;
use crate::error::ScreeningError;
use crate::model::{NewStudent, NewTeacher, ResultDetail, Student, Teacher, TestSession};
use crate::provider::{plan_session, ClientQuestion, SessionPlan};
use crate::scoring::UnknownQuestionPolicy;
use crate::statistics::{admin_stats, teacher_stats, AdminStats, TeacherStats};
use crate::traits::ResultRepository;

/// Configuration for the screening engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// How to treat answers for plates that are not in the bank.
    pub unknown_question_policy: UnknownQuestionPolicy,
    /// Draw at most this many plates per session (`None` = whole bank).
    pub questions_per_session: Option<usize>,
    /// Shuffle the answer options of every plate.
    pub shuffle_options: bool,
}

impl EngineConfig {
    /// The session plan implied by this config.
    pub fn session_plan(&self, seed: Option<u64>) -> SessionPlan {
        SessionPlan {
            seed,
            limit: self.questions_per_session,
            shuffle_options: self.shuffle_options,
        }
    }
}

/// The central screening engine.
pub struct ScreeningEngine {
    bank: Arc<QuestionBank>,
    repo: Arc<dyn ResultRepository>,
    config: EngineConfig,
}

impl ScreeningEngine {
    pub fn new(
        bank: Arc<QuestionBank>,
        repo: Arc<dyn ResultRepository>,
        config: EngineConfig,
    ) -> Self {
        Self { bank, repo, config }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn repository(&self) -> &Arc<dyn ResultRepository> {
        &self.repo
    }

    /// Draw the plates for a new test, without their answers.
    pub fn start_session(&self, seed: Option<u64>) -> Vec<ClientQuestion> {
        plan_session(&self.bank, &self.config.session_plan(seed))
            .iter()
            .map(ClientQuestion::from)
            .collect()
    }

    /// Score a finished test and persist the result.
    pub async fn submit(&self, session: TestSession) -> Result<ResultDetail> {
        let (student, teacher) = futures::try_join!(
            self.repo.get_student(session.student_id),
            self.repo.get_teacher(session.teacher_id),
        )?;
        let student = student.ok_or(ScreeningError::StudentNotFound(session.student_id))?;
        let teacher = teacher.ok_or(ScreeningError::TeacherNotFound(session.teacher_id))?;
        if !teacher.is_active {
            return Err(ScreeningError::TeacherInactive(teacher.id).into());
        }

        let assessment = Assessment::evaluate(
            &self.bank,
            &session.answers,
            self.config.unknown_question_policy,
        )
        .map_err(ScreeningError::from)?;

        let result = self
            .repo
            .insert_result(assessment.into_new_result(&session))
            .await?;

        tracing::info!(
            result_id = result.id,
            student_id = student.id,
            teacher_id = teacher.id,
            score = result.score,
            total = result.total_questions,
            percentage = result.percentage,
            "recorded test result: {}",
            result.diagnosis
        );

        Ok(ResultDetail {
            result,
            student,
            teacher,
        })
    }

    /// Validate and register a student.
    pub async fn register_student(&self, form: NewStudent) -> Result<Student> {
        form.validate(Utc::now().date_naive())
            .map_err(ScreeningError::from)?;
        self.repo.create_student(form).await
    }

    /// Validate and register a teacher account.
    pub async fn register_teacher(&self, form: NewTeacher) -> Result<Teacher> {
        form.validate().map_err(ScreeningError::from)?;
        self.repo.create_teacher(form).await
    }

    /// Load a single result, or fail with [`ScreeningError::ResultNotFound`].
    pub async fn result(&self, id: u64) -> Result<ResultDetail> {
        Ok(self
            .repo
            .get_result(id)
            .await?
            .ok_or(ScreeningError::ResultNotFound(id))?)
    }

    pub async fn teacher_stats(&self, teacher_id: u64) -> Result<TeacherStats> {
        let results = self.repo.results_by_teacher(teacher_id).await?;
        Ok(teacher_stats(&results, teacher_id, Utc::now()))
    }

    pub async fn admin_stats(&self) -> Result<AdminStats> {
        let (teachers, results) =
            futures::try_join!(self.repo.list_teachers(), self.repo.all_results())?;
        let teachers: Vec<Teacher> = teachers.into_iter().map(|s| s.teacher).collect();
        Ok(admin_stats(&teachers, &results, Utc::now()))
    }
}
