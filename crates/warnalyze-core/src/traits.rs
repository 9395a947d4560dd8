//! Repository trait for students, teachers and test results.
//!
//! Implemented by the `warnalyze-store` crate. Errors that callers may want
//! to tell apart are returned as [`ScreeningError`](crate::error::ScreeningError)
//! inside the `anyhow::Error`.

use async_trait::async_trait;

use crate::model::{
    NewStudent, NewTeacher, NewTestResult, ResultDetail, Student, Teacher, TeacherSummary,
    TeacherUpdate, TestResult,
};

#[async_trait]
pub trait ResultRepository: Send + Sync {
    // -----------------------------------------------------------------------
    // Students
    // -----------------------------------------------------------------------

    async fn create_student(&self, student: NewStudent) -> anyhow::Result<Student>;

    async fn get_student(&self, id: u64) -> anyhow::Result<Option<Student>>;

    /// Delete a student and every result recorded for them.
    async fn delete_student(&self, id: u64) -> anyhow::Result<()>;

    // -----------------------------------------------------------------------
    // Teachers
    // -----------------------------------------------------------------------

    /// Create an active teacher. E-mail and NIP must be unique.
    async fn create_teacher(&self, teacher: NewTeacher) -> anyhow::Result<Teacher>;

    async fn get_teacher(&self, id: u64) -> anyhow::Result<Option<Teacher>>;

    async fn find_teacher_by_nip(&self, nip: &str) -> anyhow::Result<Option<Teacher>>;

    /// All teachers with their test counts, newest account first.
    async fn list_teachers(&self) -> anyhow::Result<Vec<TeacherSummary>>;

    async fn update_teacher(&self, id: u64, update: TeacherUpdate) -> anyhow::Result<Teacher>;

    /// Soft-delete: the account stays for historical results.
    async fn deactivate_teacher(&self, id: u64) -> anyhow::Result<()>;

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    /// Persist a scored test. Assigns the id and creation time.
    async fn insert_result(&self, result: NewTestResult) -> anyhow::Result<TestResult>;

    async fn get_result(&self, id: u64) -> anyhow::Result<Option<ResultDetail>>;

    /// Results administered by `teacher_id`, newest first.
    async fn results_by_teacher(&self, teacher_id: u64) -> anyhow::Result<Vec<ResultDetail>>;

    /// Every result, newest first.
    async fn all_results(&self) -> anyhow::Result<Vec<ResultDetail>>;
}
