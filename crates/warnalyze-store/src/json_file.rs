//! JSON-file repository.
//!
//! The whole store lives in one pretty-printed JSON document. Every mutation
//! is applied to a copy of the state, written to a temporary sibling file and
//! renamed over the original; the in-memory state is only replaced once the
//! write has succeeded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use warnalyze_core::model::{
    NewStudent, NewTeacher, NewTestResult, ResultDetail, Student, Teacher, TeacherSummary,
    TeacherUpdate, TestResult,
};
use warnalyze_core::traits::ResultRepository;

use crate::memory::MemoryRepository;
use crate::state::StoreState;

pub struct JsonFileRepository {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl JsonFileRepository {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("failed to parse store: {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("store {} does not exist yet, starting empty", path.display());
                StoreState::default()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read store: {}", path.display()))
            }
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy the current contents into a throwaway in-memory repository.
    pub async fn snapshot(&self) -> MemoryRepository {
        MemoryRepository::from_state(self.state.lock().await.clone())
    }

    async fn mutate<T>(&self, f: impl FnOnce(&mut StoreState) -> Result<T>) -> Result<T> {
        let mut guard = self.state.lock().await;
        let mut next = guard.clone();
        let value = f(&mut next)?;
        write_state(&self.path, &next).await?;
        *guard = next;
        Ok(value)
    }
}

async fn write_state(path: &Path, state: &StoreState) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("failed to serialize store")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json)
        .await
        .with_context(|| format!("failed to write store to {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to replace store at {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl ResultRepository for JsonFileRepository {
    async fn create_student(&self, student: NewStudent) -> anyhow::Result<Student> {
        let now = Utc::now();
        self.mutate(|s| Ok(s.create_student(student, now))).await
    }

    async fn get_student(&self, id: u64) -> anyhow::Result<Option<Student>> {
        Ok(self.state.lock().await.student(id))
    }

    async fn delete_student(&self, id: u64) -> anyhow::Result<()> {
        self.mutate(|s| s.delete_student(id)).await
    }

    async fn create_teacher(&self, teacher: NewTeacher) -> anyhow::Result<Teacher> {
        let now = Utc::now();
        self.mutate(|s| s.create_teacher(teacher, now)).await
    }

    async fn get_teacher(&self, id: u64) -> anyhow::Result<Option<Teacher>> {
        Ok(self.state.lock().await.teacher(id))
    }

    async fn find_teacher_by_nip(&self, nip: &str) -> anyhow::Result<Option<Teacher>> {
        Ok(self.state.lock().await.teacher_by_nip(nip))
    }

    async fn list_teachers(&self) -> anyhow::Result<Vec<TeacherSummary>> {
        Ok(self.state.lock().await.teachers())
    }

    async fn update_teacher(&self, id: u64, update: TeacherUpdate) -> anyhow::Result<Teacher> {
        self.mutate(|s| s.update_teacher(id, update)).await
    }

    async fn deactivate_teacher(&self, id: u64) -> anyhow::Result<()> {
        self.mutate(|s| s.deactivate_teacher(id)).await
    }

    async fn insert_result(&self, result: NewTestResult) -> anyhow::Result<TestResult> {
        let now = Utc::now();
        self.mutate(|s| s.insert_result(result, now)).await
    }

    async fn get_result(&self, id: u64) -> anyhow::Result<Option<ResultDetail>> {
        Ok(self.state.lock().await.result(id))
    }

    async fn results_by_teacher(&self, teacher_id: u64) -> anyhow::Result<Vec<ResultDetail>> {
        Ok(self
            .state
            .lock()
            .await
            .results_where(|r| r.teacher_id == teacher_id))
    }

    async fn all_results(&self) -> anyhow::Result<Vec<ResultDetail>> {
        Ok(self.state.lock().await.results_where(|_| true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use warnalyze_core::model::Gender;

    fn form() -> NewStudent {
        NewStudent {
            name: "Dewi".into(),
            birth_date: NaiveDate::from_ymd_opt(2008, 9, 30).unwrap(),
            gender: Gender::Female,
            major: None,
        }
    }

    #[tokio::test]
    async fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("store.json"))
            .await
            .unwrap();
        assert!(repo.all_results().await.unwrap().is_empty());
        assert!(!repo.path().exists());
    }

    #[tokio::test]
    async fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let repo = JsonFileRepository::open(&path).await.unwrap();
        let student = repo.create_student(form()).await.unwrap();
        assert!(path.exists());
        drop(repo);

        let reopened = JsonFileRepository::open(&path).await.unwrap();
        let fetched = reopened.get_student(student.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Dewi");
        assert_eq!(reopened.create_student(form()).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn failed_mutation_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let repo = JsonFileRepository::open(&path).await.unwrap();

        assert!(repo.delete_student(7).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileRepository::open(&path).await.is_err());
    }

    #[tokio::test]
    async fn snapshot_is_detached() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("store.json"))
            .await
            .unwrap();
        repo.create_student(form()).await.unwrap();

        let snapshot = repo.snapshot().await;
        snapshot.create_student(form()).await.unwrap();
        assert!(repo.get_student(2).await.unwrap().is_none());
        assert!(snapshot.get_student(2).await.unwrap().is_some());
    }
}
