//! Class names used by template attributes.
//!
//! Two walks over the same lowered values:
//!
//! - [`attribute_classes`] collects every statically known class token with
//!   its exact span and the way a replacement must be written back.
//! - [`DynamicScan`] finds the fragments whose class names can not be known
//!   without running the template.

use crate::component::ClassValue;
use vkcn_carton::CompactString;
use vkcn_relief::{ClassExpr, ObjectMember, PropertyKey, Span};

/// How a replacement for a class token must be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    /// Raw text: a static attribute, a multi-class literal, a template part
    Plain,
    /// The whole string literal, quotes included
    Quoted,
    /// An identifier object key; quoted only when the name needs it
    Quotable { shorthand: bool },
}

/// One class token found in a class attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassUsage {
    pub name: CompactString,
    pub span: Span,
    pub kind: UsageKind,
}

/// Class tokens of one attribute.
#[derive(Debug, Clone, Default)]
pub struct AttributeClasses {
    pub usages: Vec<ClassUsage>,
    /// Whether the value had any static part at all (a literal, a template
    /// or an identifier key), even if it holds no tokens
    pub has_fragments: bool,
}

/// Split a class list on whitespace, with byte offsets.
pub fn class_tokens(text: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push((s, &text[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push((s, &text[s..]));
    }
    tokens
}

/// Collect the class tokens of an attribute value.
pub fn attribute_classes(source: &str, value: &ClassValue) -> AttributeClasses {
    let mut out = AttributeClasses::default();
    match value {
        ClassValue::Static { text, span } => {
            out.has_fragments = true;
            push_plain(&mut out.usages, text, span.start);
        }
        ClassValue::Bound(expr) => collect_expr(source, expr, &mut out),
        ClassValue::Unparsable | ClassValue::Empty => {}
    }
    out
}

fn push_plain(usages: &mut Vec<ClassUsage>, text: &str, base: u32) {
    usages.extend(class_tokens(text).into_iter().map(|(offset, token)| {
        let start = base + offset as u32;
        ClassUsage {
            name: CompactString::new(token),
            span: Span::new(start, start + token.len() as u32),
            kind: UsageKind::Plain,
        }
    }));
}

fn push_literal(source: &str, value: &str, span: Span, out: &mut AttributeClasses) {
    out.has_fragments = true;
    if span.len() < 2 {
        return;
    }
    let inner = Span::new(span.start + 1, span.end - 1);
    let tokens = class_tokens(value);
    if tokens.len() > 1 {
        push_plain(&mut out.usages, inner.text(source), inner.start);
        return;
    }
    out.usages.extend(tokens.into_iter().map(|(_, token)| ClassUsage {
        name: CompactString::new(token),
        span,
        kind: UsageKind::Quoted,
    }));
}

fn collect_expr(source: &str, expr: &ClassExpr, out: &mut AttributeClasses) {
    match expr {
        ClassExpr::StringLit { value, span } => push_literal(source, value, *span, out),
        ClassExpr::Template { quasis, .. } => {
            out.has_fragments = true;
            for quasi in quasis {
                push_plain(&mut out.usages, &quasi.raw, quasi.span.start);
            }
        }
        ClassExpr::Object { members, .. } => {
            for member in members {
                match member {
                    ObjectMember::Property { key, shorthand, .. } => match key {
                        PropertyKey::Identifier { name, span } => {
                            out.has_fragments = true;
                            out.usages.push(ClassUsage {
                                name: name.clone(),
                                span: *span,
                                kind: UsageKind::Quotable {
                                    shorthand: *shorthand,
                                },
                            });
                        }
                        PropertyKey::StringLit { value, span } => {
                            push_literal(source, value, *span, out)
                        }
                        PropertyKey::Other { .. } => {}
                    },
                    ObjectMember::Spread { argument, .. } => collect_expr(source, argument, out),
                }
            }
        }
        ClassExpr::Array { elements, .. } => {
            for element in elements {
                collect_expr(source, element, out);
            }
        }
        ClassExpr::Spread { argument, .. } => collect_expr(source, argument, out),
        ClassExpr::Conditional {
            consequent,
            alternate,
            ..
        } => {
            collect_expr(source, consequent, out);
            collect_expr(source, alternate, out);
        }
        ClassExpr::Identifier { .. } | ClassExpr::Member { .. } | ClassExpr::Other { .. } => {}
    }
}

/// Finds dynamic fragments of a bound class value.
#[derive(Debug, Clone, Copy)]
pub struct DynamicScan<'p> {
    /// Check both branches of a conditional instead of reporting it
    pub allow_conditional: bool,
    /// Names allowed as bare identifiers or as `$props.x` / `$attrs.x`
    pub allowed_props: &'p [&'p str],
}

impl DynamicScan<'_> {
    /// Spans of every fragment that is not statically known, in source order
    /// of discovery.
    pub fn fragments(&self, expr: &ClassExpr) -> Vec<Span> {
        let mut out = Vec::new();
        self.check(expr, &mut out);
        out
    }

    fn is_allowed(&self, name: &str) -> bool {
        self.allowed_props.contains(&name)
    }

    fn check(&self, expr: &ClassExpr, out: &mut Vec<Span>) {
        match expr {
            ClassExpr::StringLit { .. } | ClassExpr::Template { .. } => {}
            ClassExpr::Identifier { name, .. } if self.is_allowed(name) => {}
            ClassExpr::Member {
                object, property, ..
            } if matches!(object.as_str(), "$props" | "$attrs") && self.is_allowed(property) => {}
            ClassExpr::Object { members, .. } => {
                for member in members {
                    self.check_member(member, out);
                }
            }
            ClassExpr::Array { elements, .. } => {
                for element in elements {
                    match element {
                        ClassExpr::Spread { argument, .. } => self.check_spread(argument, out),
                        other => self.check(other, out),
                    }
                }
            }
            ClassExpr::Spread { argument, .. } => self.check_spread(argument, out),
            ClassExpr::Conditional {
                consequent,
                alternate,
                ..
            } if self.allow_conditional => {
                self.check(alternate, out);
                self.check(consequent, out);
            }
            other => out.push(other.span()),
        }
    }

    fn check_member(&self, member: &ObjectMember, out: &mut Vec<Span>) {
        match member {
            ObjectMember::Spread { argument, .. } => self.check_spread(argument, out),
            ObjectMember::Property { shorthand: true, .. } => {}
            ObjectMember::Property {
                computed, method, span, ..
            } if *computed || *method => out.push(*span),
            ObjectMember::Property {
                key: PropertyKey::Identifier { .. } | PropertyKey::StringLit { .. },
                ..
            } => {}
            ObjectMember::Property {
                value: ClassExpr::Identifier { .. },
                ..
            } => {}
            ObjectMember::Property { value, .. } => self.check(value, out),
        }
    }

    fn check_spread(&self, argument: &ClassExpr, out: &mut Vec<Span>) {
        match argument {
            ClassExpr::Array { .. } | ClassExpr::Object { .. } => self.check(argument, out),
            other => out.push(other.span()),
        }
    }
}
