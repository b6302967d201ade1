//! Per-file analysis inputs.
//!
//! Everything the rules read is built here once: parsed style blocks with
//! their resolved selectors, the class registry over all of them, and the
//! template tags that carry class attributes with their values lowered.

use crate::error::InvariantError;
use crate::registry::ClassRegistry;
use crate::resolver::{resolve_sheet, SheetSelectors};
use std::cell::OnceCell;
use vkcn_armature::{collect_props, parse_class_expression, parse_style, scan_template};
use vkcn_carton::{CompactString, NamePattern};
use vkcn_relief::{
    Attribute, AttributeKey, ClassExpr, SfcDescriptor, Span, StyleSheet, TemplateComment,
};

/// A style block that parsed.
#[derive(Debug)]
pub struct StyleAnalysis {
    /// Index of the block among the component's `<style>` blocks
    pub index: usize,
    pub sheet: StyleSheet,
    pub selectors: SheetSelectors,
}

/// Value of a class attribute.
#[derive(Debug, Clone)]
pub enum ClassValue {
    /// `class="a b"`
    Static { text: String, span: Span },
    /// `:class="expr"`
    Bound(ClassExpr),
    /// `:class="..."` that did not parse
    Unparsable,
    /// Attribute without a value
    Empty,
}

/// A class attribute of a tag.
#[derive(Debug, Clone)]
pub struct ClassAttribute {
    pub name: CompactString,
    pub span: Span,
    pub value: ClassValue,
}

/// A template tag with at least one class attribute.
#[derive(Debug, Clone)]
pub struct ClassTag {
    pub name: CompactString,
    pub span: Span,
    pub attributes: Vec<ClassAttribute>,
}

/// Everything known about one component file.
pub struct Component<'a> {
    pub source: &'a str,
    pub filename: &'a str,
    pub descriptor: &'a SfcDescriptor,
    pub styles: Vec<StyleAnalysis>,
    pub registry: ClassRegistry,
    pub tags: Vec<ClassTag>,
    pub template_comments: Vec<TemplateComment>,
    props: OnceCell<Vec<CompactString>>,
}

impl<'a> Component<'a> {
    /// Parse the style and template blocks of a component.
    ///
    /// Style blocks that are not valid contexts or that fail to parse are
    /// skipped with a log line.
    pub fn build(
        source: &'a str,
        filename: &'a str,
        descriptor: &'a SfcDescriptor,
        class_attr: &NamePattern,
    ) -> Result<Self, InvariantError> {
        let mut styles = Vec::with_capacity(descriptor.styles.len());
        for (index, style) in descriptor.styles.iter().enumerate() {
            if !style.is_valid_context() {
                tracing::debug!(filename, index, lang = ?style.lang, "style block skipped");
                continue;
            }
            let sheet = match parse_style(source, style.block.content, style.lang.clone()) {
                Ok(sheet) => sheet,
                Err(error) => {
                    tracing::warn!(filename, index, %error, "style block did not parse");
                    continue;
                }
            };
            let selectors = resolve_sheet(&sheet)?;
            tracing::debug!(filename, index, selectors = selectors.len(), "style block resolved");
            styles.push(StyleAnalysis {
                index,
                sheet,
                selectors,
            });
        }

        let registry = ClassRegistry::from_selectors(styles.iter().flat_map(|s| s.selectors.iter()));

        let (tags, template_comments) = match &descriptor.template {
            Some(block) => {
                let template = scan_template(source, block.content);
                let tags = template
                    .tags
                    .iter()
                    .filter_map(|tag| {
                        let attributes: Vec<_> = tag
                            .attributes
                            .iter()
                            .filter(|attr| is_class_attribute(attr, class_attr))
                            .map(lower_attribute)
                            .collect();
                        (!attributes.is_empty()).then(|| ClassTag {
                            name: tag.name.clone(),
                            span: tag.span,
                            attributes,
                        })
                    })
                    .collect();
                (tags, template.comments)
            }
            None => (Vec::new(), Vec::new()),
        };

        Ok(Self {
            source,
            filename,
            descriptor,
            styles,
            registry,
            tags,
            template_comments,
            props: OnceCell::new(),
        })
    }

    #[inline]
    pub fn has_template(&self) -> bool {
        self.descriptor.template.is_some()
    }

    /// Prop names declared by the component, collected on first use.
    pub fn props(&self) -> &[CompactString] {
        self.props
            .get_or_init(|| collect_props(self.source, self.descriptor))
    }
}

/// Whether an attribute names a class attribute: a static name or a static
/// bind argument matching the pattern.
pub fn is_class_attribute(attr: &Attribute, pattern: &NamePattern) -> bool {
    attr.target_name().is_some_and(|name| pattern.matches(name))
}

fn lower_attribute(attr: &Attribute) -> ClassAttribute {
    let value = match (&attr.key, &attr.value) {
        (_, None) => ClassValue::Empty,
        (AttributeKey::Static(_), Some(value)) => ClassValue::Static {
            text: value.text.clone(),
            span: value.span,
        },
        (_, Some(value)) => match parse_class_expression(value) {
            Some(expr) => ClassValue::Bound(expr),
            None => ClassValue::Unparsable,
        },
    };
    ClassAttribute {
        name: CompactString::new(attr.target_name().unwrap_or_default()),
        span: attr.span,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vkcn_armature::parse_sfc;

    #[test]
    fn test_build_collects_class_tags() {
        let source = r#"<template><div class="a" :class="'b'" id="x"><span /><i :other="c" /></div></template>
<style>.a {}</style>
<style lang="stylus">.b
  color red</style>"#;
        let descriptor = parse_sfc(source, "a.vue").unwrap();
        let component =
            Component::build(source, "a.vue", &descriptor, &NamePattern::default()).unwrap();

        assert_eq!(component.styles.len(), 1);
        assert!(component.registry.contains("a"));
        assert_eq!(component.tags.len(), 1);
        let attributes = &component.tags[0].attributes;
        assert_eq!(attributes.len(), 2);
        assert!(matches!(attributes[0].value, ClassValue::Static { .. }));
        assert!(matches!(
            attributes[1].value,
            ClassValue::Bound(ClassExpr::StringLit { .. })
        ));
    }

    #[test]
    fn test_class_attribute_pattern() {
        let source = r#"<template><div bar="a" :baz="b" :[x]="c" v-bind="d" /></template>"#;
        let descriptor = parse_sfc(source, "a.vue").unwrap();
        let pattern = NamePattern::parse("/^(-?bar|baz|class)$/").unwrap();
        let component = Component::build(source, "a.vue", &descriptor, &pattern).unwrap();
        let names: Vec<_> = component.tags[0]
            .attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["bar", "baz"]);
    }
}
