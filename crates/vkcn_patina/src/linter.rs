//! Main linter entry point.

use crate::component::Component;
use crate::config::{ConfigError, LintConfig};
use crate::context::LintContext;
use crate::diagnostic::{LintDiagnostic, LintSummary};
use crate::disable::DisabledRules;
use crate::error::InvariantError;
use crate::rule::RuleRegistry;
use crate::visitor::LintVisitor;
use vkcn_armature::parse_sfc;
use vkcn_carton::{LineIndex, NamePattern};

/// Lint result for a single file
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Filename that was linted
    pub filename: String,
    /// Collected diagnostics, ordered by start offset
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
}

impl LintResult {
    fn new(filename: &str, diagnostics: Vec<LintDiagnostic>) -> Self {
        let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
        Self {
            filename: filename.to_string(),
            warning_count: diagnostics.len() - error_count,
            error_count,
            diagnostics,
        }
    }

    /// Check if there are any errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any diagnostics
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of diagnostics carrying an automatic fix
    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.has_fix()).count()
    }
}

/// Main linter struct.
pub struct Linter {
    registry: RuleRegistry,
    /// Which attributes hold class names
    class_attr: NamePattern,
}

impl Linter {
    /// Create a new linter with recommended rules
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_recommended())
    }

    /// Create a linter with a custom rule registry
    #[inline]
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            class_attr: NamePattern::default(),
        }
    }

    /// Create a linter from a parsed config
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_registry(RuleRegistry::from_config(config)?)
            .with_class_attr(config.settings.class_attr_pattern()?))
    }

    /// Set the class attribute pattern
    #[inline]
    pub fn with_class_attr(mut self, pattern: NamePattern) -> Self {
        self.class_attr = pattern;
        self
    }

    /// Get the rule registry
    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Lint a full Vue SFC file.
    ///
    /// A file whose blocks can not be split yields no diagnostics. An
    /// [`InvariantError`] means the analysis of this file was aborted.
    pub fn lint_sfc(&self, source: &str, filename: &str) -> Result<LintResult, InvariantError> {
        let descriptor = match parse_sfc(source, filename) {
            Ok(descriptor) => descriptor,
            Err(error) => {
                tracing::warn!(filename, %error, "failed to parse SFC");
                return Ok(LintResult::new(filename, Vec::new()));
            }
        };

        let component = Component::build(source, filename, &descriptor, &self.class_attr)?;
        let mut ctx = LintContext::new(source, filename);
        LintVisitor::new(&mut ctx, self.registry.rules()).visit_component(&component)?;
        let mut diagnostics = ctx.into_diagnostics();

        let lines = LineIndex::new(source);
        let style_comments = component
            .styles
            .iter()
            .flat_map(|style| &style.sheet.comments)
            .map(|comment| (comment.text.as_str(), comment.span));
        let template_comments = component
            .template_comments
            .iter()
            .map(|comment| (comment.text.as_str(), comment.span));
        let disabled = DisabledRules::from_comments(&lines, style_comments.chain(template_comments));
        if !disabled.is_empty() {
            let before = diagnostics.len();
            diagnostics.retain(|d| !disabled.is_disabled(d.rule_name, lines.line(d.start)));
            tracing::debug!(
                filename,
                suppressed = before - diagnostics.len(),
                "applied suppression comments"
            );
        }

        diagnostics.sort_by_key(|d| d.start);
        Ok(LintResult::new(filename, diagnostics))
    }

    /// Lint multiple files and aggregate results.
    ///
    /// Files whose analysis aborted are logged and reported without
    /// diagnostics.
    pub fn lint_files(&self, files: &[(String, String)]) -> (Vec<LintResult>, LintSummary) {
        let mut results = Vec::with_capacity(files.len());
        let mut summary = LintSummary::default();

        for (filename, source) in files {
            let result = match self.lint_sfc(source, filename) {
                Ok(result) => result,
                Err(error) => {
                    tracing::error!(filename = filename.as_str(), %error, "analysis aborted");
                    LintResult::new(filename, Vec::new())
                }
            };
            for diagnostic in &result.diagnostics {
                summary.add(diagnostic);
            }
            results.push(result);
        }

        summary.file_count = files.len();
        (results, summary)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
