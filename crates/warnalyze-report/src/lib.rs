//! Report generation for warnalyze screening results.

pub mod certificate;
pub mod html;
pub mod text;

pub use certificate::ReportOptions;
pub use html::{generate_html, write_html_report};
pub use text::{generate_text, write_text_report};
