//! Style sheet rule tree.
//!
//! Rules are stored in an arena in source order. Nesting is expressed with
//! parent/children ids rather than owned subtrees, which keeps ancestor walks
//! (needed for `&` resolution) a simple index chase.

use crate::selector::{ComplexId, SelectorArena};
use crate::sfc::StyleLang;
use crate::span::Span;
use vkcn_carton::CompactString;

/// Index of a rule in [`StyleSheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A comment inside a style block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleComment {
    /// Text without the comment markers, trimmed
    pub text: CompactString,
    /// Span of the whole comment including markers
    pub span: Span,
}

/// What a rule is.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// `selector { ... }`
    Style {
        /// Span of the selector prelude
        prelude: Span,
        /// Parsed selector list; `None` when the prelude failed to parse
        selectors: Option<Vec<ComplexId>>,
    },
    /// `@name params { ... }`
    AtRule {
        name: CompactString,
        params: CompactString,
    },
}

/// A rule with a block.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub kind: RuleKind,
    pub parent: Option<RuleId>,
    pub children: Vec<RuleId>,
    /// Comments between the previous sibling (or block start) and this rule
    pub leading_comments: Vec<StyleComment>,
    pub span: Span,
}

impl StyleRule {
    /// Name of an at-rule.
    #[inline]
    pub fn at_rule_name(&self) -> Option<&str> {
        match &self.kind {
            RuleKind::AtRule { name, .. } => Some(name.as_str()),
            RuleKind::Style { .. } => None,
        }
    }
}

/// A parsed style block.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    pub lang: StyleLang,
    /// Content span of the block in the file
    pub span: Span,
    pub rules: Vec<StyleRule>,
    /// Top-level rules in source order
    pub roots: Vec<RuleId>,
    pub selectors: SelectorArena,
    /// Every comment of the block in source order
    pub comments: Vec<StyleComment>,
}

impl StyleSheet {
    pub fn new(lang: StyleLang, span: Span) -> Self {
        Self {
            lang,
            span,
            rules: Vec::new(),
            roots: Vec::new(),
            selectors: SelectorArena::new(),
            comments: Vec::new(),
        }
    }

    /// Add a rule under an optional parent.
    pub fn push_rule(
        &mut self,
        kind: RuleKind,
        parent: Option<RuleId>,
        leading_comments: Vec<StyleComment>,
        span: Span,
    ) -> RuleId {
        let id = RuleId::from_index(self.rules.len());
        self.rules.push(StyleRule {
            kind,
            parent,
            children: Vec::new(),
            leading_comments,
            span,
        });
        match parent {
            Some(parent) => self.rules[parent.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    #[inline]
    pub fn rule(&self, id: RuleId) -> &StyleRule {
        &self.rules[id.index()]
    }

    #[inline]
    pub fn rule_mut(&mut self, id: RuleId) -> &mut StyleRule {
        &mut self.rules[id.index()]
    }

    /// Iterate `(id, rule)` in source order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &StyleRule)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (RuleId::from_index(i), rule))
    }

    /// Ancestors of a rule, innermost first.
    pub fn ancestors(&self, id: RuleId) -> impl Iterator<Item = RuleId> + '_ {
        std::iter::successors(self.rule(id).parent, move |&p| self.rule(p).parent)
    }
}
