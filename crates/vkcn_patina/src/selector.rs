//! Resolved selector paths.
//!
//! A [`ResolvedSelector`] is the flat component list a nested rule stands
//! for once every `&` and implicit descendant has been expanded. Components
//! keep a link to the source token they came from, which is what
//! diagnostics deduplicate on and what fix ranges are computed from.

use vkcn_relief::{ComplexId, NodeId, RuleId, SelectorKind, Span};

/// Source token a resolved component stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Copied from, or concatenated onto, an arena node
    Node(NodeId),
    /// Descendant combinator inserted in front of a nested selector that
    /// starts without `&`; the id is the first node of that selector
    Implicit(NodeId),
}

/// One component of a resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNode {
    pub kind: SelectorKind,
    pub origin: Origin,
    pub span: Span,
    /// Complex selector of the source token
    pub parent: ComplexId,
    /// Whether `kind` is exactly what the source token spells
    pub literal: bool,
}

impl ResolvedNode {
    #[inline]
    pub fn class_value(&self) -> Option<&str> {
        match &self.kind {
            SelectorKind::Class { value } => Some(value.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        matches!(self.kind, SelectorKind::Class { .. })
    }
}

/// A fully resolved selector of one rule.
#[derive(Debug, Clone)]
pub struct ResolvedSelector {
    pub rule: RuleId,
    pub nodes: Vec<ResolvedNode>,
}

impl ResolvedSelector {
    /// Class values along the path, outermost first.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(ResolvedNode::class_value)
    }

    /// Render the path back to selector text.
    pub fn to_selector_string(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match &node.kind {
                SelectorKind::Class { value } => {
                    out.push('.');
                    out.push_str(value);
                }
                SelectorKind::Type { tag } => out.push_str(tag),
                SelectorKind::Universal => out.push('*'),
                SelectorKind::Combinator(c) => match c.as_str() {
                    " " => out.push(' '),
                    op => {
                        out.push(' ');
                        out.push_str(op);
                        out.push(' ');
                    }
                },
                SelectorKind::Pseudo { name, argument } => {
                    out.push_str(name);
                    if let Some(argument) = argument {
                        out.push('(');
                        out.push_str(argument);
                        out.push(')');
                    }
                }
                SelectorKind::Attribute { raw } => {
                    out.push('[');
                    out.push_str(raw);
                    out.push(']');
                }
                SelectorKind::Id { value } => {
                    out.push('#');
                    out.push_str(value);
                }
                SelectorKind::Nesting { suffix } => {
                    out.push('&');
                    out.push_str(suffix);
                }
            }
        }
        out
    }
}
