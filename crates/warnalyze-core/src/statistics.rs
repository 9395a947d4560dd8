//! Dashboard statistics for teachers and administrators.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ResultDetail, Teacher};

/// Window for a teacher's "tests this week" counter.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Window for the admin "tests this month" counter.
pub const MONTHLY_WINDOW_DAYS: i64 = 30;

/// Statistics for a single teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherStats {
    /// Distinct students tested (names compared case-insensitively).
    pub total_students: usize,
    /// Tests administered in the last 7 days.
    pub weekly_tests: usize,
    /// Mean percentage over all the teacher's tests, rounded.
    pub accuracy: u8,
}

/// School-wide statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    /// Active teacher accounts.
    pub teachers: usize,
    /// Distinct students tested (names compared case-insensitively).
    pub students: usize,
    /// Tests administered in the last 30 days.
    pub monthly_tests: usize,
    /// Results outside the normal band.
    pub color_blind: usize,
}

fn distinct_students<'a>(results: impl Iterator<Item = &'a ResultDetail>) -> usize {
    results
        .map(|r| r.student.name.trim().to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}

fn within(created_at: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    created_at >= now - Duration::days(days)
}

/// Compute dashboard statistics for `teacher_id` as of `now`.
pub fn teacher_stats(results: &[ResultDetail], teacher_id: u64, now: DateTime<Utc>) -> TeacherStats {
    let own: Vec<&ResultDetail> = results
        .iter()
        .filter(|r| r.result.teacher_id == teacher_id)
        .collect();

    let weekly_tests = own
        .iter()
        .filter(|r| within(r.result.created_at, now, WEEKLY_WINDOW_DAYS))
        .count();

    let accuracy = if own.is_empty() {
        0
    } else {
        let sum: u64 = own.iter().map(|r| u64::from(r.result.percentage)).sum();
        let n = own.len() as u64;
        ((2 * sum + n) / (2 * n)) as u8
    };

    TeacherStats {
        total_students: distinct_students(own.iter().copied()),
        weekly_tests,
        accuracy,
    }
}

/// Compute school-wide statistics as of `now`.
pub fn admin_stats(teachers: &[Teacher], results: &[ResultDetail], now: DateTime<Utc>) -> AdminStats {
    AdminStats {
        teachers: teachers.iter().filter(|t| t.is_active).count(),
        students: distinct_students(results.iter()),
        monthly_tests: results
            .iter()
            .filter(|r| within(r.result.created_at, now, MONTHLY_WINDOW_DAYS))
            .count(),
        color_blind: results
            .iter()
            .filter(|r| r.result.band.is_color_deficient())
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::classify;
    use crate::model::{Gender, Student, TestResult};
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 20, 9, 0, 0).unwrap()
    }

    fn teacher(id: u64, active: bool) -> Teacher {
        Teacher {
            id,
            name: format!("Teacher {id}"),
            email: format!("t{id}@smk.sch.id"),
            nip: None,
            subject: None,
            is_active: active,
            created_at: now(),
        }
    }

    fn detail(id: u64, teacher_id: u64, student: &str, percentage: u8, days_ago: i64) -> ResultDetail {
        let band = classify(percentage);
        ResultDetail {
            result: TestResult {
                id,
                student_id: id,
                teacher_id,
                score: 0,
                total_questions: 24,
                percentage,
                band,
                diagnosis: band.label().into(),
                recommendations: band.recommendations().into(),
                answers: vec![],
                duration_secs: 120,
                created_at: now() - Duration::days(days_ago),
            },
            student: Student {
                id,
                name: student.into(),
                birth_date: NaiveDate::from_ymd_opt(2008, 1, 1).unwrap(),
                gender: Gender::Male,
                major: None,
                created_at: now(),
            },
            teacher: teacher(teacher_id, true),
        }
    }

    #[test]
    fn teacher_stats_basic() {
        let results = vec![
            detail(1, 1, "Andi", 92, 1),
            detail(2, 1, "ANDI", 75, 3),
            detail(3, 1, "Budi", 42, 10),
            detail(4, 2, "Citra", 100, 0),
        ];
        let stats = teacher_stats(&results, 1, now());
        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.weekly_tests, 2);
        // (92 + 75 + 42) / 3 = 69.67
        assert_eq!(stats.accuracy, 70);
    }

    #[test]
    fn teacher_without_results() {
        let stats = teacher_stats(&[], 5, now());
        assert_eq!(
            stats,
            TeacherStats {
                total_students: 0,
                weekly_tests: 0,
                accuracy: 0
            }
        );
    }

    #[test]
    fn weekly_window_is_inclusive() {
        let results = vec![detail(1, 1, "Andi", 90, 7), detail(2, 1, "Budi", 90, 8)];
        assert_eq!(teacher_stats(&results, 1, now()).weekly_tests, 1);
    }

    #[test]
    fn admin_stats_basic() {
        let teachers = vec![teacher(1, true), teacher(2, true), teacher(3, false)];
        let results = vec![
            detail(1, 1, "Andi", 92, 1),
            detail(2, 1, "andi ", 75, 40),
            detail(3, 2, "Budi", 42, 10),
        ];
        let stats = admin_stats(&teachers, &results, now());
        assert_eq!(stats.teachers, 2);
        assert_eq!(stats.students, 2);
        assert_eq!(stats.monthly_tests, 2);
        assert_eq!(stats.color_blind, 2);
    }
}
