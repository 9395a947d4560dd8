//! Fields shared by every report format.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use warnalyze_core::model::{Gender, ResultDetail};

/// Institution details printed on a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    pub institution: String,
    pub title: String,
    /// Place name printed next to the signature date.
    pub city: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            institution: "Digital Health Screening Platform".to_string(),
            title: "Color Vision Screening Report".to_string(),
            city: None,
        }
    }
}

pub const METHOD: &str = "Ishihara Color Vision Test";

const ROMAN_MONTHS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

/// Roman numeral for a 1-based month.
pub fn roman_month(month: u32) -> &'static str {
    ROMAN_MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

/// `SKD/007/VIII/2025` for result 7 taken in August 2025.
pub fn document_number(detail: &ResultDetail) -> String {
    let taken = detail.result.created_at;
    format!(
        "SKD/{:03}/{}/{}",
        detail.result.id,
        roman_month(taken.month()),
        taken.year()
    )
}

/// Whole years between `birth` and `on`; 0 if `on` precedes `birth`.
pub fn age_at(birth: NaiveDate, on: NaiveDate) -> u32 {
    let mut years = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// `185` -> `3 min 5 sec`.
pub fn format_duration(secs: u32) -> String {
    format!("{} min {} sec", secs / 60, secs % 60)
}

pub fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// `20 of 24 (83%)`.
pub fn score_line(detail: &ResultDetail) -> String {
    format!(
        "{} of {} ({}%)",
        detail.result.score, detail.result.total_questions, detail.result.percentage
    )
}

/// Recommendations, or `None` when there is nothing to print.
pub fn recommendations(detail: &ResultDetail) -> Option<&str> {
    let text = detail.result.recommendations.trim();
    (!text.is_empty()).then_some(text)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn document_number_uses_roman_month() {
        assert_eq!(document_number(&fixtures::detail()), "SKD/007/VIII/2025");
        assert_eq!(roman_month(1), "I");
        assert_eq!(roman_month(12), "XII");
        assert_eq!(roman_month(13), "?");
    }

    #[test]
    fn age_counts_completed_years() {
        assert_eq!(age_at(date(2008, 9, 2), date(2025, 8, 14)), 16);
        assert_eq!(age_at(date(2008, 9, 2), date(2025, 9, 2)), 17);
        assert_eq!(age_at(date(2030, 1, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn duration_is_minutes_and_seconds() {
        assert_eq!(format_duration(185), "3 min 5 sec");
        assert_eq!(format_duration(59), "0 min 59 sec");
        assert_eq!(format_duration(0), "0 min 0 sec");
    }

    #[test]
    fn blank_recommendations_are_omitted() {
        let mut detail = fixtures::detail();
        assert!(recommendations(&detail).is_some());
        detail.result.recommendations = "  ".into();
        assert!(recommendations(&detail).is_none());
    }
}
