//! Template markup model.
//!
//! Only what class analysis consumes is kept: start tags with their
//! attributes, and comments for suppression directives. Children and text
//! are not represented.

use crate::span::Span;
use vkcn_carton::CompactString;

/// Attribute key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKey {
    /// `name="..."`
    Static(CompactString),
    /// `:name="..."` / `v-bind:name="..."`; `argument` is `None` for a
    /// dynamic argument (`:[expr]`) or an object bind (`v-bind="..."`)
    Bind { argument: Option<CompactString> },
    /// Any other directive (`v-if`, `@click`, `#slot`, ...)
    Directive {
        name: CompactString,
        argument: Option<CompactString>,
    },
}

/// Attribute value, unquoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    pub text: String,
    /// Span of the text (inside the quotes, if any)
    pub span: Span,
}

/// An attribute of a start tag.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub key: AttributeKey,
    /// Span of the raw key text
    pub key_span: Span,
    pub value: Option<AttributeValue>,
    /// Span of the whole attribute
    pub span: Span,
}

impl Attribute {
    /// Name a class-attribute pattern is tested against: the static name or
    /// the static bind argument.
    pub fn target_name(&self) -> Option<&str> {
        match &self.key {
            AttributeKey::Static(name) => Some(name.as_str()),
            AttributeKey::Bind { argument } => argument.as_deref(),
            AttributeKey::Directive { .. } => None,
        }
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        matches!(self.key, AttributeKey::Bind { .. })
    }
}

/// A start tag.
#[derive(Debug, Clone)]
pub struct Tag {
    pub name: CompactString,
    /// Span of the start tag
    pub span: Span,
    pub attributes: Vec<Attribute>,
}

/// `<!-- ... -->` inside the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateComment {
    /// Text without the markers, trimmed
    pub text: CompactString,
    pub span: Span,
}

/// Scanned template block.
#[derive(Debug, Clone, Default)]
pub struct Template {
    pub tags: Vec<Tag>,
    pub comments: Vec<TemplateComment>,
}
