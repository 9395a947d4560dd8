//! Plain-text report, for terminals and e-mail bodies.

use anyhow::{Context, Result};
use std::path::Path;

use warnalyze_core::model::ResultDetail;

use crate::certificate::{
    age_at, document_number, format_date, format_duration, gender_label, recommendations,
    score_line, ReportOptions, METHOD,
};

const WIDTH: usize = 64;

/// Generate a plain-text rendition of the certificate.
pub fn generate_text(detail: &ResultDetail, options: &ReportOptions) -> String {
    let result = &detail.result;
    let student = &detail.student;
    let exam_date = result.created_at.date_naive();
    let rule = "=".repeat(WIDTH);

    let mut out = String::new();

    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("{}\n", options.institution.to_uppercase()));
    out.push_str(&format!("{}\n", options.title));
    out.push_str(&format!("No. {}\n", document_number(detail)));
    out.push_str(&format!("{rule}\n\n"));

    out.push_str(&format!("  Name:          {}\n", student.name.to_uppercase()));
    out.push_str(&format!(
        "  Date of birth: {}\n",
        format_date(student.birth_date)
    ));
    out.push_str(&format!("  Gender:        {}\n", gender_label(student.gender)));
    out.push_str(&format!(
        "  Age:           {} years\n",
        age_at(student.birth_date, exam_date)
    ));
    out.push_str(&format!(
        "  Major:         {}\n\n",
        student.major.as_deref().unwrap_or("-")
    ));

    out.push_str(&format!(
        "  Diagnosis:     {}\n",
        result.diagnosis.to_uppercase()
    ));
    out.push_str(&format!("  Method:        {METHOD}\n"));
    out.push_str(&format!("  Score:         {}\n", score_line(detail)));
    out.push_str(&format!(
        "  Duration:      {}\n",
        format_duration(result.duration_secs)
    ));
    out.push_str(&format!("  Date:          {}\n", format_date(exam_date)));
    out.push_str(&format!("  Examiner:      {}\n", detail.teacher.name));

    if let Some(text) = recommendations(detail) {
        out.push_str("\nRecommendations\n");
        for line in wrap(text, WIDTH - 2) {
            out.push_str(&format!("  {line}\n"));
        }
    }

    if !result.answers.is_empty() {
        out.push_str("\nAnswers\n");
        for a in &result.answers {
            out.push_str(&format!(
                "  {:>3}  {:<8} {}\n",
                a.question_id,
                a.answer,
                if a.correct { "correct" } else { "wrong" }
            ));
        }
    }

    out
}

/// Greedy word wrap.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Write the text report to a file.
pub fn write_text_report(detail: &ResultDetail, options: &ReportOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_text(detail, options))
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::fixtures;

    #[test]
    fn text_report_has_all_sections() {
        let text = generate_text(&fixtures::detail(), &ReportOptions::default());
        assert!(text.contains("DIGITAL HEALTH SCREENING PLATFORM"));
        assert!(text.contains("No. SKD/007/VIII/2025"));
        assert!(text.contains("SITI & AMINAH"));
        assert!(text.contains("MILD DEUTERANOMALY"));
        assert!(text.contains("20 of 24 (83%)"));
        assert!(text.contains("Recommendations"));
        assert!(text.contains("<3>"));
    }

    #[test]
    fn text_report_lines_and_omitted_recommendations() {
        let mut detail = fixtures::detail();
        detail.result.recommendations = " ".into();
        let text = generate_text(&detail, &ReportOptions::default());
        assert!(text.starts_with(&"=".repeat(WIDTH)));
        assert!(text.contains("  Duration:      3 min 5 sec\n"));
        assert!(text.contains("    2  <3>      wrong\n"));
        assert!(!text.contains("Recommendations"));
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("aaa bbb ccc ddd", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn text_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("7.txt");
        write_text_report(&fixtures::detail(), &ReportOptions::default(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Examiner:      Budi Santoso"));
    }
}
