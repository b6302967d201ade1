//! Bound class expressions.
//!
//! A closed union over the expression shapes that matter for class analysis.
//! Anything else collapses into [`ClassExpr::Other`], which keeps its span so
//! it can still be reported.

use crate::span::Span;
use vkcn_carton::CompactString;

/// Expression bound to a class attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassExpr {
    /// `'a b'`
    StringLit { value: String, span: Span },
    /// `name`
    Identifier { name: CompactString, span: Span },
    /// `object.property` with an identifier object and a static property
    Member {
        object: CompactString,
        property: CompactString,
        span: Span,
    },
    /// `{ a: x, 'b': y, ...z }`
    Object {
        members: Vec<ObjectMember>,
        span: Span,
    },
    /// `[a, b, ...c]`; holes are dropped
    Array { elements: Vec<ClassExpr>, span: Span },
    /// `test ? consequent : alternate`
    Conditional {
        test: Box<ClassExpr>,
        consequent: Box<ClassExpr>,
        alternate: Box<ClassExpr>,
        span: Span,
    },
    /// `...argument` inside an array
    Spread { argument: Box<ClassExpr>, span: Span },
    /// `` `a ${x} b` ``; only the static parts are kept
    Template { quasis: Vec<TemplateQuasi>, span: Span },
    /// Anything else
    Other { span: Span },
}

impl ClassExpr {
    pub fn span(&self) -> Span {
        match self {
            Self::StringLit { span, .. }
            | Self::Identifier { span, .. }
            | Self::Member { span, .. }
            | Self::Object { span, .. }
            | Self::Array { span, .. }
            | Self::Conditional { span, .. }
            | Self::Spread { span, .. }
            | Self::Template { span, .. }
            | Self::Other { span } => *span,
        }
    }
}

/// Object literal member.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    Property {
        key: PropertyKey,
        value: ClassExpr,
        shorthand: bool,
        computed: bool,
        method: bool,
        span: Span,
    },
    Spread { argument: ClassExpr, span: Span },
}

impl ObjectMember {
    pub fn span(&self) -> Span {
        match self {
            Self::Property { span, .. } | Self::Spread { span, .. } => *span,
        }
    }
}

/// Object property key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey {
    Identifier { name: CompactString, span: Span },
    StringLit { value: String, span: Span },
    /// Computed, numeric or private keys
    Other { span: Span },
}

impl PropertyKey {
    pub fn span(&self) -> Span {
        match self {
            Self::Identifier { span, .. } | Self::StringLit { span, .. } | Self::Other { span } => {
                *span
            }
        }
    }
}

/// Static part of a template literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateQuasi {
    pub raw: String,
    /// Span of `raw` itself, without delimiters
    pub span: Span,
}
