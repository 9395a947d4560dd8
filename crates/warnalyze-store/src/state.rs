//! Store contents shared by the in-memory and JSON-file repositories.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warnalyze_core::error::ScreeningError;
use warnalyze_core::model::{
    NewStudent, NewTeacher, NewTestResult, ResultDetail, Student, Teacher, TeacherSummary,
    TeacherUpdate, TestResult,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoreState {
    #[serde(default)]
    last_student_id: u64,
    #[serde(default)]
    last_teacher_id: u64,
    #[serde(default)]
    last_result_id: u64,
    #[serde(default)]
    students: BTreeMap<u64, Student>,
    #[serde(default)]
    teachers: BTreeMap<u64, Teacher>,
    #[serde(default)]
    results: BTreeMap<u64, TestResult>,
}

fn next_id(last: &mut u64) -> u64 {
    *last += 1;
    *last
}

fn same_nip(a: &Option<String>, b: &str) -> bool {
    a.as_deref().is_some_and(|nip| nip.trim() == b.trim())
}

impl StoreState {
    pub(crate) fn create_student(&mut self, form: NewStudent, now: DateTime<Utc>) -> Student {
        let student = Student {
            id: next_id(&mut self.last_student_id),
            name: form.name.trim().to_string(),
            birth_date: form.birth_date,
            gender: form.gender,
            major: form.major.filter(|m| !m.trim().is_empty()),
            created_at: now,
        };
        self.students.insert(student.id, student.clone());
        student
    }

    pub(crate) fn student(&self, id: u64) -> Option<Student> {
        self.students.get(&id).cloned()
    }

    pub(crate) fn delete_student(&mut self, id: u64) -> Result<()> {
        if self.students.remove(&id).is_none() {
            return Err(ScreeningError::StudentNotFound(id).into());
        }
        self.results.retain(|_, r| r.student_id != id);
        Ok(())
    }

    fn check_unique(&self, email: Option<&str>, nip: Option<&str>, except: Option<u64>) -> Result<()> {
        for t in self.teachers.values().filter(|t| Some(t.id) != except) {
            if let Some(email) = email {
                if t.email.eq_ignore_ascii_case(email.trim()) {
                    return Err(ScreeningError::DuplicateEmail(email.to_string()).into());
                }
            }
            if let Some(nip) = nip {
                if same_nip(&t.nip, nip) {
                    return Err(ScreeningError::DuplicateNip(nip.to_string()).into());
                }
            }
        }
        Ok(())
    }

    pub(crate) fn create_teacher(&mut self, form: NewTeacher, now: DateTime<Utc>) -> Result<Teacher> {
        self.check_unique(Some(&form.email), form.nip.as_deref(), None)?;
        let teacher = Teacher {
            id: next_id(&mut self.last_teacher_id),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            nip: form.nip,
            subject: form.subject,
            is_active: true,
            created_at: now,
        };
        self.teachers.insert(teacher.id, teacher.clone());
        Ok(teacher)
    }

    pub(crate) fn teacher(&self, id: u64) -> Option<Teacher> {
        self.teachers.get(&id).cloned()
    }

    pub(crate) fn teacher_by_nip(&self, nip: &str) -> Option<Teacher> {
        self.teachers.values().find(|t| same_nip(&t.nip, nip)).cloned()
    }

    pub(crate) fn teachers(&self) -> Vec<TeacherSummary> {
        let mut summaries: Vec<TeacherSummary> = self
            .teachers
            .values()
            .map(|t| TeacherSummary {
                teacher: t.clone(),
                tests_count: self.results.values().filter(|r| r.teacher_id == t.id).count(),
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.teacher
                .created_at
                .cmp(&a.teacher.created_at)
                .then(b.teacher.id.cmp(&a.teacher.id))
        });
        summaries
    }

    pub(crate) fn update_teacher(&mut self, id: u64, update: TeacherUpdate) -> Result<Teacher> {
        if !self.teachers.contains_key(&id) {
            return Err(ScreeningError::TeacherNotFound(id).into());
        }
        self.check_unique(update.email.as_deref(), update.nip.as_deref(), Some(id))?;
        let teacher = self
            .teachers
            .get_mut(&id)
            .ok_or(ScreeningError::TeacherNotFound(id))?;
        update.apply(teacher);
        Ok(teacher.clone())
    }

    pub(crate) fn deactivate_teacher(&mut self, id: u64) -> Result<()> {
        let teacher = self
            .teachers
            .get_mut(&id)
            .ok_or(ScreeningError::TeacherNotFound(id))?;
        teacher.is_active = false;
        Ok(())
    }

    pub(crate) fn insert_result(&mut self, new: NewTestResult, now: DateTime<Utc>) -> Result<TestResult> {
        if !self.students.contains_key(&new.student_id) {
            return Err(ScreeningError::StudentNotFound(new.student_id).into());
        }
        if !self.teachers.contains_key(&new.teacher_id) {
            return Err(ScreeningError::TeacherNotFound(new.teacher_id).into());
        }
        let result = TestResult::from_new(next_id(&mut self.last_result_id), now, new);
        self.results.insert(result.id, result.clone());
        Ok(result)
    }

    fn detail(&self, result: &TestResult) -> Option<ResultDetail> {
        Some(ResultDetail {
            result: result.clone(),
            student: self.students.get(&result.student_id)?.clone(),
            teacher: self.teachers.get(&result.teacher_id)?.clone(),
        })
    }

    pub(crate) fn result(&self, id: u64) -> Option<ResultDetail> {
        self.results.get(&id).and_then(|r| self.detail(r))
    }

    /// Joined results matching `filter`, newest first.
    pub(crate) fn results_where(&self, filter: impl Fn(&TestResult) -> bool) -> Vec<ResultDetail> {
        let mut details: Vec<ResultDetail> = self
            .results
            .values()
            .filter(|r| filter(r))
            .filter_map(|r| self.detail(r))
            .collect();
        details.sort_by(|a, b| {
            b.result
                .created_at
                .cmp(&a.result.created_at)
                .then(b.result.id.cmp(&a.result.id))
        });
        details
    }
}
