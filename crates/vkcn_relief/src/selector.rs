//! Selector arena.
//!
//! Every selector list of a style sheet is parsed into complex selectors
//! (one per comma-separated entry), each a flat run of components. The
//! components live in one arena; the complex selector a component belongs to
//! is kept in a side index so callers can ask "who is my parent" without the
//! nodes owning each other.

use crate::span::Span;
use crate::style::RuleId;
use vkcn_carton::CompactString;

/// Index of a component in [`SelectorArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a complex selector in [`SelectorArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComplexId(u32);

impl ComplexId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Combinator between two compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace
    Descendant,
    /// `>`
    Child,
    /// `+`
    NextSibling,
    /// `~`
    SubsequentSibling,
}

impl Combinator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => ">",
            Self::NextSibling => "+",
            Self::SubsequentSibling => "~",
        }
    }
}

/// Selector component kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorKind {
    /// `.value`
    Class { value: CompactString },
    /// `div`
    Type { tag: CompactString },
    /// `*`
    Universal,
    Combinator(Combinator),
    /// `:name` / `::name`, with the parenthesised argument kept opaque
    Pseudo {
        name: CompactString,
        argument: Option<CompactString>,
    },
    /// `[...]`
    Attribute { raw: CompactString },
    /// `#value`
    Id { value: CompactString },
    /// `&` with an optional suffix glued to it (`&__el`, `&-x`)
    Nesting { suffix: CompactString },
}

impl SelectorKind {
    #[inline]
    pub fn is_combinator(&self) -> bool {
        matches!(self, Self::Combinator(_))
    }

    #[inline]
    pub fn is_nesting(&self) -> bool {
        matches!(self, Self::Nesting { .. })
    }
}

/// One component with its absolute span.
#[derive(Debug, Clone)]
pub struct SelectorNode {
    pub kind: SelectorKind,
    pub span: Span,
}

/// One entry of a selector list.
#[derive(Debug, Clone)]
pub struct ComplexSelector {
    /// Rule whose prelude this selector was parsed from
    pub rule: RuleId,
    pub span: Span,
    pub nodes: Vec<NodeId>,
}

/// Arena owning all selector components of one style sheet.
#[derive(Debug, Clone, Default)]
pub struct SelectorArena {
    nodes: Vec<SelectorNode>,
    parents: Vec<ComplexId>,
    complexes: Vec<ComplexSelector>,
}

impl SelectorArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty complex selector.
    pub fn push_complex(&mut self, rule: RuleId, span: Span) -> ComplexId {
        let id = ComplexId(self.complexes.len() as u32);
        self.complexes.push(ComplexSelector {
            rule,
            span,
            nodes: Vec::new(),
        });
        id
    }

    /// Append a component to a complex selector.
    pub fn push_node(&mut self, complex: ComplexId, kind: SelectorKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SelectorNode { kind, span });
        self.parents.push(complex);
        self.complexes[complex.index()].nodes.push(id);
        id
    }

    /// Set the span of a complex selector once its end is known.
    pub fn set_complex_span(&mut self, complex: ComplexId, span: Span) {
        self.complexes[complex.index()].span = span;
    }

    #[inline]
    pub fn is_complex_empty(&self, complex: ComplexId) -> bool {
        self.complexes[complex.index()].nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SelectorNode {
        &self.nodes[id.index()]
    }

    /// Complex selector a component belongs to.
    #[inline]
    pub fn parent(&self, id: NodeId) -> ComplexId {
        self.parents[id.index()]
    }

    #[inline]
    pub fn complex(&self, id: ComplexId) -> &ComplexSelector {
        &self.complexes[id.index()]
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn complex_count(&self) -> usize {
        self.complexes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_index() {
        let mut arena = SelectorArena::new();
        let rule = RuleId::from_index(0);
        let a = arena.push_complex(rule, Span::new(0, 4));
        let b = arena.push_complex(rule, Span::new(6, 8));
        let x = arena.push_node(
            a,
            SelectorKind::Class {
                value: "x".into(),
            },
            Span::new(0, 2),
        );
        let y = arena.push_node(b, SelectorKind::Universal, Span::new(6, 7));

        assert_eq!(arena.parent(x), a);
        assert_eq!(arena.parent(y), b);
        assert_eq!(arena.complex(a).nodes, vec![x]);
        assert_eq!(arena.node_count(), 2);
        assert_eq!(arena.complex_count(), 2);
    }
}
