//! Rich terminal output using oxc_diagnostics.

use super::source_for;
use crate::linter::LintResult;
use oxc_diagnostics::{GraphicalReportHandler, GraphicalTheme, NamedSource};
use std::sync::Arc;

/// Format lint results as rich terminal output
pub fn format_text(results: &[LintResult], sources: &[(String, String)]) -> String {
    let mut output = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode());

    for result in results.iter().filter(|r| r.has_diagnostics()) {
        let source = source_for(sources, &result.filename);
        let named_source = Arc::new(NamedSource::new(&result.filename, source.to_string()));

        for diagnostic in &result.diagnostics {
            let report = diagnostic
                .clone()
                .into_oxc_diagnostic()
                .with_source_code(Arc::clone(&named_source));

            let mut buf = String::new();
            if handler.render_report(&mut buf, report.as_ref()).is_ok() {
                output.push_str(&buf);
                output.push('\n');
            }
        }
    }

    output
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Format a summary line
pub fn format_summary(error_count: usize, warning_count: usize, file_count: usize) -> String {
    let mut parts = Vec::new();
    if error_count > 0 {
        parts.push(plural(error_count, "error"));
    }
    if warning_count > 0 {
        parts.push(plural(warning_count, "warning"));
    }

    if parts.is_empty() {
        format!("No problems found in {}", plural(file_count, "file"))
    } else {
        format!("{} in {}", parts.join(", "), plural(file_count, "file"))
    }
}
