//! Diagnostic types for vkcn_patina.
//!
//! Uses `CompactString` for message storage.

use crate::message::{MessageData, MessageId};
use oxc_diagnostics::OxcDiagnostic;
use oxc_span::Span;
use serde::Serialize;
use vkcn_carton::CompactString;

/// Lint diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single contiguous text replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Start byte offset
    pub start: u32,
    /// End byte offset
    pub end: u32,
    /// Replacement text
    pub new_text: String,
}

impl TextEdit {
    #[inline]
    pub fn replace(start: u32, end: u32, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: text.into(),
        }
    }

    #[inline]
    pub fn delete(start: u32, end: u32) -> Self {
        Self::replace(start, end, "")
    }

    /// Apply this edit alone to a source string.
    pub fn apply(&self, source: &str) -> String {
        let mut result = source.to_string();
        let (start, end) = (self.start as usize, self.end as usize);
        if start <= end && end <= result.len() {
            result.replace_range(start..end, &self.new_text);
        }
        result
    }
}

/// An automatic fix, applied by `--fix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub message: CompactString,
    pub edit: TextEdit,
}

impl Fix {
    #[inline]
    pub fn new(message: impl Into<CompactString>, edit: TextEdit) -> Self {
        Self {
            message: message.into(),
            edit,
        }
    }
}

/// An alternative edit offered to the user but never applied automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub message_id: MessageId,
    pub message: CompactString,
    pub data: MessageData,
    pub edit: TextEdit,
}

impl Suggestion {
    pub fn new(message_id: MessageId, data: MessageData, edit: TextEdit) -> Self {
        Self {
            message_id,
            message: message_id.render(&data),
            data,
            edit,
        }
    }
}

/// A lint diagnostic with rich information for display.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// Rule that triggered this diagnostic
    pub rule_name: &'static str,
    pub severity: Severity,
    pub message_id: MessageId,
    /// Rendered message
    pub message: CompactString,
    pub data: MessageData,
    /// Start byte offset in source
    pub start: u32,
    /// End byte offset in source
    pub end: u32,
    pub fix: Option<Fix>,
    /// Ordered alternatives
    pub suggestions: Vec<Suggestion>,
}

impl LintDiagnostic {
    /// Create a diagnostic, rendering its message from the data.
    pub fn new(
        rule_name: &'static str,
        severity: Severity,
        message_id: MessageId,
        data: MessageData,
        start: u32,
        end: u32,
    ) -> Self {
        Self {
            rule_name,
            severity,
            message_id,
            message: message_id.render(&data),
            data,
            start,
            end,
            fix: None,
            suggestions: Vec::new(),
        }
    }

    #[inline]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    #[inline]
    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    #[inline]
    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Convert to OxcDiagnostic for rich rendering
    pub fn into_oxc_diagnostic(self) -> OxcDiagnostic {
        let message = self.message.to_string();
        let mut diag = match self.severity {
            Severity::Error => OxcDiagnostic::error(message),
            Severity::Warning => OxcDiagnostic::warn(message),
        };

        diag = diag
            .with_error_code("vkcn", self.message_id.as_str().to_string())
            .with_label(Span::new(self.start, self.end));

        let mut help = Vec::new();
        if let Some(fix) = &self.fix {
            help.push(format!("fix: {}", fix.message));
        }
        help.extend(self.suggestions.iter().map(|s| s.message.to_string()));
        if !help.is_empty() {
            diag = diag.with_help(help.join("\n"));
        }

        diag
    }
}

/// Summary of lint results
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub file_count: usize,
    pub fixable_count: usize,
}

impl LintSummary {
    #[inline]
    pub fn add(&mut self, diagnostic: &LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        if diagnostic.has_fix() {
            self.fixable_count += 1;
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
