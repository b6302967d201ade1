//! eslint-like JSON output.

use super::source_for;
use crate::diagnostic::{LintDiagnostic, Severity, TextEdit};
use crate::linter::LintResult;
use crate::message::MessageId;
use serde::Serialize;
use vkcn_carton::LineIndex;

/// JSON output structure for a single file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFileResult {
    pub file: String,
    pub messages: Vec<JsonMessage>,
    pub error_count: usize,
    pub warning_count: usize,
}

/// JSON output structure for a single message
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMessage {
    pub rule_id: &'static str,
    /// `2` for errors, `1` for warnings
    pub severity: u8,
    pub message_id: MessageId,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<JsonFix>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<JsonSuggestion>,
}

/// A byte range replacement
#[derive(Debug, Serialize)]
pub struct JsonFix {
    pub range: [u32; 2],
    pub text: String,
}

impl From<&TextEdit> for JsonFix {
    fn from(edit: &TextEdit) -> Self {
        Self {
            range: [edit.start, edit.end],
            text: edit.new_text.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSuggestion {
    pub message_id: MessageId,
    pub desc: String,
    pub fix: JsonFix,
}

impl JsonMessage {
    fn new(diagnostic: &LintDiagnostic, source: &str, lines: &LineIndex) -> Self {
        let (line, column) = lines.line_col(source, diagnostic.start);
        let (end_line, end_column) = lines.line_col(source, diagnostic.end);
        Self {
            rule_id: diagnostic.rule_name,
            severity: match diagnostic.severity {
                Severity::Error => 2,
                Severity::Warning => 1,
            },
            message_id: diagnostic.message_id,
            message: diagnostic.message.to_string(),
            line,
            column,
            end_line,
            end_column,
            fix: diagnostic.fix.as_ref().map(|fix| JsonFix::from(&fix.edit)),
            suggestions: diagnostic
                .suggestions
                .iter()
                .map(|s| JsonSuggestion {
                    message_id: s.message_id,
                    desc: s.message.to_string(),
                    fix: JsonFix::from(&s.edit),
                })
                .collect(),
        }
    }
}

/// Format results as JSON
pub fn format_json(results: &[LintResult], sources: &[(String, String)]) -> String {
    let json_results: Vec<JsonFileResult> = results
        .iter()
        .map(|r| {
            let source = source_for(sources, &r.filename);
            let lines = LineIndex::new(source);
            JsonFileResult {
                file: r.filename.clone(),
                messages: r
                    .diagnostics
                    .iter()
                    .map(|d| JsonMessage::new(d, source, &lines))
                    .collect(),
                error_count: r.error_count,
                warning_count: r.warning_count,
            }
        })
        .collect();

    serde_json::to_string_pretty(&json_results).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Linter;

    fn lint_json(source: &str, filename: &str) -> String {
        let result = Linter::new().lint_sfc(source, filename).unwrap();
        format_json(&[result], &[(filename.to_string(), source.to_string())])
    }

    #[test]
    fn test_json_dynamic() {
        let output = lint_json("<template><div :class=\"x\"></div></template>", "Foo.vue");
        insta::assert_snapshot!(output, @r#"
        [
          {
            "file": "Foo.vue",
            "messages": [
              {
                "ruleId": "vkcn/no-dynamic-class-names",
                "severity": 2,
                "messageId": "dynamic",
                "message": "No dynamic class.",
                "line": 1,
                "column": 24,
                "endLine": 1,
                "endColumn": 25
              }
            ],
            "errorCount": 1,
            "warningCount": 0
          }
        ]
        "#);
    }

    #[test]
    fn test_json_suggestion_range() {
        let source = "<style>\n.bar {}\n</style>";
        let output = lint_json(source, "Foo.vue");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let message = &value[0]["messages"][0];

        let start = source.find(".bar").unwrap() as u64;
        assert_eq!(message["messageId"], "class-top-naming");
        assert_eq!(message["line"], 2);
        assert_eq!(message["column"], 1);
        assert!(message.get("fix").is_none());
        let suggestion = &message["suggestions"][0];
        assert_eq!(suggestion["messageId"], "class-top-naming-suggestion");
        assert_eq!(suggestion["desc"], "Use '.foo--bar' class name.");
        assert_eq!(suggestion["fix"]["range"], serde_json::json!([start, start + 4]));
        assert_eq!(suggestion["fix"]["text"], ".foo--bar");
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(format_json(&[], &[]), "[]");
    }
}
