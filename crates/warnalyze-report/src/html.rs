//! HTML screening certificate.
//!
//! Produces a self-contained, print-ready HTML file with the CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use warnalyze_core::model::ResultDetail;

use crate::certificate::{
    age_at, document_number, format_date, format_duration, gender_label, recommendations,
    score_line, ReportOptions, METHOD,
};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn row(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<tr><th>{}</th><td>{}</td></tr>\n",
        label,
        html_escape(value)
    ));
}

/// Generate the certificate for one result.
pub fn generate_html(detail: &ResultDetail, options: &ReportOptions) -> String {
    let result = &detail.result;
    let student = &detail.student;
    let exam_date = result.created_at.date_naive();
    let band_class = if result.band.is_color_deficient() {
        "deficient"
    } else {
        "normal"
    };

    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} {}</title>\n",
        html_escape(&options.title),
        html_escape(&document_number(detail))
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!(
        "<p class=\"institution\">{}</p>\n",
        html_escape(&options.institution)
    ));
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&options.title)));
    html.push_str(&format!(
        "<p class=\"meta\">No. {}</p>\n",
        html_escape(&document_number(detail))
    ));
    html.push_str("</header>\n");

    // Student
    html.push_str("<section class=\"student\">\n");
    html.push_str("<h2>Student</h2>\n<table>\n");
    row(&mut html, "Name", &student.name.to_uppercase());
    row(&mut html, "Date of birth", &format_date(student.birth_date));
    row(&mut html, "Gender", gender_label(student.gender));
    row(
        &mut html,
        "Age",
        &format!("{} years", age_at(student.birth_date, exam_date)),
    );
    row(&mut html, "Major", student.major.as_deref().unwrap_or("-"));
    html.push_str("</table>\n</section>\n");

    // Result
    html.push_str("<section class=\"result\">\n");
    html.push_str("<h2>Result</h2>\n");
    html.push_str(&format!(
        "<p class=\"diagnosis {}\">{}</p>\n",
        band_class,
        html_escape(&result.diagnosis.to_uppercase())
    ));
    html.push_str("<table>\n");
    row(&mut html, "Method", METHOD);
    row(&mut html, "Score", &score_line(detail));
    row(&mut html, "Duration", &format_duration(result.duration_secs));
    row(&mut html, "Date", &format_date(exam_date));
    row(&mut html, "Examiner", &detail.teacher.name);
    html.push_str("</table>\n</section>\n");

    if let Some(text) = recommendations(detail) {
        html.push_str("<section class=\"recommendations\">\n");
        html.push_str("<h2>Recommendations</h2>\n");
        html.push_str(&format!("<p>{}</p>\n", html_escape(text)));
        html.push_str("</section>\n");
    }

    // Per-plate answers
    if !result.answers.is_empty() {
        html.push_str("<section class=\"answers\">\n");
        html.push_str("<h2>Answers</h2>\n");
        html.push_str("<table class=\"answers\">\n");
        html.push_str("<thead><tr><th>Plate</th><th>Answer</th><th>Result</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for a in &result.answers {
            let (class, text) = if a.correct {
                ("pass", "correct")
            } else {
                ("fail", "wrong")
            };
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                class,
                a.question_id,
                html_escape(&a.answer),
                text
            ));
        }
        html.push_str("</tbody></table>\n</section>\n");
    }

    // Signature
    let place = match &options.city {
        Some(city) if !city.trim().is_empty() => format!("{}, ", city.trim()),
        _ => String::new(),
    };
    html.push_str("<footer>\n");
    html.push_str(&format!(
        "<p>{}{}</p>\n",
        html_escape(&place),
        html_escape(&format_date(exam_date))
    ));
    html.push_str("<p>Examiner</p>\n<div class=\"signature\"></div>\n");
    html.push_str(&format!(
        "<p class=\"examiner\">{}</p>\n",
        html_escape(&detail.teacher.name)
    ));
    if let Some(nip) = &detail.teacher.nip {
        html.push_str(&format!("<p>NIP {}</p>\n", html_escape(nip)));
    }
    html.push_str("</footer>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write the certificate to a file.
pub fn write_html_report(detail: &ResultDetail, options: &ReportOptions, path: &Path) -> Result<()> {
    let html = generate_html(detail, options);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: 'Times New Roman', serif; margin: 0 auto; max-width: 48rem; padding: 2rem; color: #1a1a1a; }
header { text-align: center; border-bottom: 3px double #1a1a1a; margin-bottom: 1.5rem; }
.institution { font-weight: bold; letter-spacing: 0.05em; text-transform: uppercase; }
.meta { color: #4b5563; }
h1 { font-size: 1.4rem; margin: 0.5rem 0; }
h2 { font-size: 1.1rem; border-bottom: 1px solid #d1d5db; }
table { border-collapse: collapse; width: 100%; margin: 0.5rem 0 1rem; }
th, td { padding: 0.3rem 0.6rem; text-align: left; vertical-align: top; }
section > table th { width: 12rem; font-weight: normal; color: #4b5563; }
table.answers th, table.answers td { border: 1px solid #e5e7eb; }
.diagnosis { font-size: 1.2rem; font-weight: bold; text-align: center; padding: 0.6rem; border-radius: 6px; }
.diagnosis.normal { background: #dcfce7; }
.diagnosis.deficient { background: #fef3c7; }
.pass { background: #f0fdf4; }
.fail { background: #fef2f2; }
footer { margin-top: 2rem; margin-left: auto; width: 16rem; text-align: center; }
.signature { height: 4rem; }
.examiner { font-weight: bold; text-decoration: underline; }
@media print { body { padding: 0; } }
"#;
