//! In-memory repository.
//!
//! Nothing is persisted. Used by tests and by `warnalyze submit --dry-run`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use warnalyze_core::model::{
    NewStudent, NewTeacher, NewTestResult, ResultDetail, Student, Teacher, TeacherSummary,
    TeacherUpdate, TestResult,
};
use warnalyze_core::traits::ResultRepository;

use crate::state::StoreState;

#[derive(Default)]
pub struct MemoryRepository {
    state: RwLock<StoreState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_state(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl ResultRepository for MemoryRepository {
    async fn create_student(&self, student: NewStudent) -> anyhow::Result<Student> {
        Ok(self.state.write().await.create_student(student, Utc::now()))
    }

    async fn get_student(&self, id: u64) -> anyhow::Result<Option<Student>> {
        Ok(self.state.read().await.student(id))
    }

    async fn delete_student(&self, id: u64) -> anyhow::Result<()> {
        self.state.write().await.delete_student(id)
    }

    async fn create_teacher(&self, teacher: NewTeacher) -> anyhow::Result<Teacher> {
        self.state.write().await.create_teacher(teacher, Utc::now())
    }

    async fn get_teacher(&self, id: u64) -> anyhow::Result<Option<Teacher>> {
        Ok(self.state.read().await.teacher(id))
    }

    async fn find_teacher_by_nip(&self, nip: &str) -> anyhow::Result<Option<Teacher>> {
        Ok(self.state.read().await.teacher_by_nip(nip))
    }

    async fn list_teachers(&self) -> anyhow::Result<Vec<TeacherSummary>> {
        Ok(self.state.read().await.teachers())
    }

    async fn update_teacher(&self, id: u64, update: TeacherUpdate) -> anyhow::Result<Teacher> {
        self.state.write().await.update_teacher(id, update)
    }

    async fn deactivate_teacher(&self, id: u64) -> anyhow::Result<()> {
        self.state.write().await.deactivate_teacher(id)
    }

    async fn insert_result(&self, result: NewTestResult) -> anyhow::Result<TestResult> {
        self.state.write().await.insert_result(result, Utc::now())
    }

    async fn get_result(&self, id: u64) -> anyhow::Result<Option<ResultDetail>> {
        Ok(self.state.read().await.result(id))
    }

    async fn results_by_teacher(&self, teacher_id: u64) -> anyhow::Result<Vec<ResultDetail>> {
        Ok(self
            .state
            .read()
            .await
            .results_where(|r| r.teacher_id == teacher_id))
    }

    async fn all_results(&self) -> anyhow::Result<Vec<ResultDetail>> {
        Ok(self.state.read().await.results_where(|_| true))
    }
}
