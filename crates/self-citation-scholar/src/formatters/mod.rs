//! Report formatters for Markdown and JSON.

mod json;
mod markdown;

pub use self::json::*;
pub use markdown::*;

use crate::models::{PublicationOrder, ResponseFormat};
use crate::pipeline::AnalysisReport;

/// Render `report` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_report(
    report: &AnalysisReport,
    format: ResponseFormat,
    order: PublicationOrder,
) -> serde_json::Result<String> {
    match format {
        ResponseFormat::Markdown => Ok(format_report_markdown(report, order)),
        ResponseFormat::Json => format_report_json(report, order),
    }
}
