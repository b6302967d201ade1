//! Output formatters for lint diagnostics.

mod json;
mod text;

pub use json::*;
pub use text::*;

use crate::linter::LintResult;

/// Output format for lint results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rich terminal output with colors and code snippets
    #[default]
    Text,
    /// eslint-like JSON for tooling integration
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format `{other}`")),
        }
    }
}

/// Format lint results according to the specified format.
///
/// `sources` pairs each filename with its text; it is needed for code
/// frames and for line/column computation.
pub fn format_results(
    results: &[LintResult],
    sources: &[(String, String)],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_text(results, sources),
        OutputFormat::Json => format_json(results, sources),
    }
}

fn source_for<'s>(sources: &'s [(String, String)], filename: &str) -> &'s str {
    sources
        .iter()
        .find(|(name, _)| name == filename)
        .map(|(_, source)| source.as_str())
        .unwrap_or_default()
}
