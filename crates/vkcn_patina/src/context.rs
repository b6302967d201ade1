//! Lint context for rule execution.
//!
//! One context lives for one file. Besides collecting diagnostics it keeps
//! the set of `(message, node)` pairs already reported, so a component that
//! appears in several resolved paths is reported once per message.

use crate::diagnostic::{LintDiagnostic, Severity};
use crate::message::{MessageData, MessageId};
use crate::selector::Origin;
use vkcn_carton::FxHashSet;
use vkcn_relief::Span;

/// Identity of the node a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// Selector component of the style block with the given index
    Selector { block: usize, origin: Origin },
    /// Template range (attribute, class token, expression)
    Markup(Span),
}

/// Lint context provides utilities for rules during execution.
pub struct LintContext<'a> {
    /// Source code being linted
    pub source: &'a str,
    /// Filename for diagnostics
    pub filename: &'a str,
    /// Current rule name (set by the visitor before calling rule hooks)
    pub current_rule: &'static str,
    /// Severity the current rule is enabled at
    pub current_severity: Severity,
    diagnostics: Vec<LintDiagnostic>,
    reported: FxHashSet<(&'static str, MessageId, NodeRef)>,
}

impl<'a> LintContext<'a> {
    const INITIAL_DIAGNOSTICS_CAPACITY: usize = 16;

    #[inline]
    pub fn new(source: &'a str, filename: &'a str) -> Self {
        Self {
            source,
            filename,
            current_rule: "",
            current_severity: Severity::Error,
            diagnostics: Vec::with_capacity(Self::INITIAL_DIAGNOSTICS_CAPACITY),
            reported: FxHashSet::default(),
        }
    }

    /// Build a diagnostic for the current rule.
    #[inline]
    pub fn diagnostic(&self, message_id: MessageId, data: MessageData, span: Span) -> LintDiagnostic {
        LintDiagnostic::new(
            self.current_rule,
            self.current_severity,
            message_id,
            data,
            span.start,
            span.end,
        )
    }

    /// Report a diagnostic about `node` unless that node was already
    /// reported with the same message. Returns whether it was recorded.
    pub fn report(&mut self, node: NodeRef, diagnostic: LintDiagnostic) -> bool {
        if !self
            .reported
            .insert((diagnostic.rule_name, diagnostic.message_id, node))
        {
            return false;
        }
        self.diagnostics.push(diagnostic);
        true
    }

    /// Report a message without data, fix or suggestions.
    #[inline]
    pub fn report_message(&mut self, node: NodeRef, message_id: MessageId, span: Span) -> bool {
        let diagnostic = self.diagnostic(message_id, MessageData::new(), span);
        self.report(node, diagnostic)
    }

    #[inline]
    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }

    #[inline]
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_node_and_message_is_reported_once() {
        let mut ctx = LintContext::new("<template/>", "a.vue");
        ctx.current_rule = "vkcn/no-dynamic-class-names";
        let node = NodeRef::Markup(Span::new(1, 4));

        assert!(ctx.report_message(node, MessageId::Dynamic, Span::new(1, 4)));
        assert!(!ctx.report_message(node, MessageId::Dynamic, Span::new(1, 4)));
        assert!(ctx.report_message(node, MessageId::Undefined, Span::new(1, 4)));
        assert!(ctx.report_message(
            NodeRef::Markup(Span::new(5, 6)),
            MessageId::Dynamic,
            Span::new(5, 6)
        ));

        assert_eq!(ctx.diagnostics().len(), 3);
    }

    #[test]
    fn test_severity_follows_current_rule() {
        let mut ctx = LintContext::new("", "a.vue");
        ctx.current_rule = "r";
        ctx.current_severity = Severity::Warning;
        ctx.report_message(
            NodeRef::Markup(Span::new(0, 0)),
            MessageId::Dynamic,
            Span::new(0, 0),
        );
        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].rule_name, "r");
    }
}
