//! Output formatter trait

use super::report::ReplayReport;

/// Trait for formatting replay reports
pub trait OutputFormatter {
    /// Format the complete report
    fn format(&self, report: &ReplayReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &ReplayReport) -> String;

    /// One line per issue
    fn format_summary_only(&self, report: &ReplayReport) -> String;
}
