//! Bound attribute value lowering.
//!
//! The value of `:class="..."` is parsed with OXC and lowered into
//! [`ClassExpr`], dropping the OXC arena. Spans are shifted to whole-file
//! offsets so later stages never need the attribute value again.

use oxc_allocator::Allocator;
use oxc_ast::ast::{ArrayExpressionElement, Expression, ObjectPropertyKind, TemplateLiteral};
use oxc_parser::Parser;
use oxc_span::SourceType;
use vkcn_carton::CompactString;
use vkcn_relief::{AttributeValue, ClassExpr, ObjectMember, PropertyKey, Span, TemplateQuasi};

/// Parse and lower a bound attribute value.
///
/// Returns `None` when the value is not a valid expression.
pub fn parse_class_expression(value: &AttributeValue) -> Option<ClassExpr> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path("expr.ts").unwrap_or_default();

    let expr = match Parser::new(&allocator, &value.text, source_type).parse_expression() {
        Ok(expr) => expr,
        Err(errors) => {
            tracing::debug!(
                errors = errors.len(),
                value = value.text.as_str(),
                "unparsable bound expression"
            );
            return None;
        }
    };

    let lowering = Lowering {
        text: &value.text,
        base: value.span.start,
    };
    Some(lowering.lower(&expr))
}

struct Lowering<'t> {
    text: &'t str,
    base: u32,
}

impl Lowering<'_> {
    #[inline]
    fn span(&self, span: oxc_span::Span) -> Span {
        Span::new(span.start, span.end).shift(self.base)
    }

    fn lower(&self, expr: &Expression<'_>) -> ClassExpr {
        match expr {
            Expression::StringLiteral(lit) => ClassExpr::StringLit {
                value: lit.value.to_string(),
                span: self.span(lit.span),
            },
            Expression::Identifier(id) => ClassExpr::Identifier {
                name: CompactString::new(id.name.as_str()),
                span: self.span(id.span),
            },
            Expression::StaticMemberExpression(member) => match &member.object {
                Expression::Identifier(object) => ClassExpr::Member {
                    object: CompactString::new(object.name.as_str()),
                    property: CompactString::new(member.property.name.as_str()),
                    span: self.span(member.span),
                },
                _ => ClassExpr::Other {
                    span: self.span(member.span),
                },
            },
            Expression::ObjectExpression(obj) => ClassExpr::Object {
                members: obj
                    .properties
                    .iter()
                    .map(|prop| self.lower_member(prop))
                    .collect(),
                span: self.span(obj.span),
            },
            Expression::ArrayExpression(arr) => ClassExpr::Array {
                elements: arr
                    .elements
                    .iter()
                    .filter_map(|element| self.lower_element(element))
                    .collect(),
                span: self.span(arr.span),
            },
            Expression::ConditionalExpression(cond) => ClassExpr::Conditional {
                test: Box::new(self.lower(&cond.test)),
                consequent: Box::new(self.lower(&cond.consequent)),
                alternate: Box::new(self.lower(&cond.alternate)),
                span: self.span(cond.span),
            },
            Expression::TemplateLiteral(template) => self.lower_template(template),
            Expression::ParenthesizedExpression(paren) => self.lower(&paren.expression),
            other => ClassExpr::Other {
                span: self.span(oxc_span::GetSpan::span(other)),
            },
        }
    }

    fn lower_element(&self, element: &ArrayExpressionElement<'_>) -> Option<ClassExpr> {
        match element {
            ArrayExpressionElement::Elision(_) => None,
            ArrayExpressionElement::SpreadElement(spread) => Some(ClassExpr::Spread {
                argument: Box::new(self.lower(&spread.argument)),
                span: self.span(spread.span),
            }),
            _ => element.as_expression().map(|expr| self.lower(expr)),
        }
    }

    fn lower_member(&self, prop: &ObjectPropertyKind<'_>) -> ObjectMember {
        match prop {
            ObjectPropertyKind::ObjectProperty(p) => {
                let key = match &p.key {
                    oxc_ast::ast::PropertyKey::StaticIdentifier(id) if !p.computed => {
                        PropertyKey::Identifier {
                            name: CompactString::new(id.name.as_str()),
                            span: self.span(id.span),
                        }
                    }
                    oxc_ast::ast::PropertyKey::StringLiteral(lit) if !p.computed => {
                        PropertyKey::StringLit {
                            value: lit.value.to_string(),
                            span: self.span(lit.span),
                        }
                    }
                    other => PropertyKey::Other {
                        span: self.span(oxc_span::GetSpan::span(other)),
                    },
                };
                ObjectMember::Property {
                    key,
                    value: self.lower(&p.value),
                    shorthand: p.shorthand,
                    computed: p.computed,
                    method: p.method,
                    span: self.span(p.span),
                }
            }
            ObjectPropertyKind::SpreadProperty(spread) => ObjectMember::Spread {
                argument: self.lower(&spread.argument),
                span: self.span(spread.span),
            },
        }
    }

    fn lower_template(&self, template: &TemplateLiteral<'_>) -> ClassExpr {
        let quasis = template
            .quasis
            .iter()
            .map(|quasi| {
                let raw = quasi.value.raw.as_str();
                let mut start = quasi.span.start as usize;
                // Element spans may or may not include the opening delimiter
                if !self.text.get(start..).is_some_and(|t| t.starts_with(raw)) {
                    start += 1;
                }
                TemplateQuasi {
                    raw: raw.to_string(),
                    span: Span::from_range(start, start + raw.len()).shift(self.base),
                }
            })
            .collect();
        ClassExpr::Template {
            quasis,
            span: self.span(template.span),
        }
    }
}
