//! vkcn/no-undefined-class-names
//!
//! Disallow class names in `<template>` that no `<style>` block declares.
//!
//! In `element` mode (the default) every tag carries exactly one element
//! class (a name containing `--`) and any number of modifiers declared
//! under that element. In `flat` mode every used class only has to be
//! declared somewhere.
//!
//! Each report comes with suggestions: removing the class, or replacing it
//! with one of the closest declared names.
//!
//! ## Examples
//!
//! ### Invalid
//! ```vue
//! <template>
//!   <div class="foo--bar active" />
//!   <div class="plain" />
//! </template>
//! <style>
//! .foo--bar { &.selected {} }
//! </style>
//! ```
//!
//! ### Valid
//! ```vue
//! <template>
//!   <div class="foo--bar" :class="{ selected }" />
//! </template>
//! <style>
//! .foo--bar { &.selected {} }
//! </style>
//! ```

use crate::component::{ClassTag, Component};
use crate::config::ConfigError;
use crate::context::{LintContext, NodeRef};
use crate::convention::DIVIDER;
use crate::diagnostic::Severity;
use crate::extract::{attribute_classes, AttributeClasses, ClassUsage};
use crate::message::{MessageData, MessageId};
use crate::rule::{Rule, RuleMeta};
use crate::usage::usage_suggestions;
use serde::Deserialize;
use vkcn_carton::NameList;

/// How used classes are matched against declared ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageMode {
    /// One element class per tag, other classes are its modifiers
    #[default]
    Element,
    /// Any declared class is fine anywhere
    Flat,
}

/// Options of `vkcn/no-undefined-class-names`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct UndefinedClassOptions {
    /// Names never reported; `/pattern/flags` entries are regexes
    pub ignore_class_names: Vec<String>,
    pub mode: UsageMode,
}

/// Undefined class rule
#[derive(Debug, Clone, Default)]
pub struct NoUndefinedClassNames {
    pub mode: UsageMode,
    ignore: NameList,
}

impl NoUndefinedClassNames {
    pub const META: &'static RuleMeta = &RuleMeta {
        name: "vkcn/no-undefined-class-names",
        description: "Disallow class names used in templates that styles do not declare",
        fixable: false,
        has_suggestions: true,
        default_severity: Severity::Error,
    };

    pub fn new(options: UndefinedClassOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            mode: options.mode,
            ignore: NameList::new(&options.ignore_class_names)?,
        })
    }

    fn report_usage<'c>(
        &self,
        ctx: &mut LintContext<'_>,
        usage: &ClassUsage,
        message_id: MessageId,
        candidates: impl IntoIterator<Item = &'c str>,
    ) {
        let diagnostic = ctx
            .diagnostic(
                message_id,
                MessageData::new().with("className", usage.name.clone()),
                usage.span,
            )
            .with_suggestions(usage_suggestions(usage, candidates));
        ctx.report(NodeRef::Markup(usage.span), diagnostic);
    }

    fn check_flat(
        &self,
        ctx: &mut LintContext<'_>,
        component: &Component<'_>,
        attributes: &[AttributeClasses],
    ) {
        let registry = &component.registry;
        for usage in attributes.iter().flat_map(|a| &a.usages) {
            if self.ignore.contains(&usage.name) || registry.contains(&usage.name) {
                continue;
            }
            self.report_usage(
                ctx,
                usage,
                MessageId::Undefined,
                registry.classes().iter().map(|c| c.as_str()),
            );
        }
    }

    fn check_element(
        &self,
        ctx: &mut LintContext<'_>,
        component: &Component<'_>,
        tag: &ClassTag,
        attributes: &[AttributeClasses],
    ) {
        let mut elements = attributes
            .iter()
            .flat_map(|a| &a.usages)
            .filter(|usage| usage.name.contains(DIVIDER));
        let element = match (elements.next(), elements.next()) {
            (Some(element), None) => element.name.clone(),
            (first, _) => {
                let message_id = if first.is_none() {
                    MessageId::UndefinedElement
                } else {
                    MessageId::ExcessElement
                };
                for (attr, classes) in tag.attributes.iter().zip(attributes) {
                    if classes.has_fragments {
                        ctx.report_message(NodeRef::Markup(attr.span), message_id, attr.span);
                    }
                }
                return;
            }
        };

        let registry = &component.registry;
        for usage in attributes.iter().flat_map(|a| &a.usages) {
            if self.ignore.contains(&usage.name) {
                continue;
            }
            let message_id = if usage.name == element {
                if registry.has_element(&element) {
                    continue;
                }
                MessageId::UndefinedElement
            } else {
                if registry.has_modifier(&element, &usage.name) {
                    continue;
                }
                MessageId::UndefinedModifier
            };

            if usage.name.contains(DIVIDER) {
                self.report_usage(ctx, usage, message_id, registry.elements());
            } else {
                let modifiers = registry.modifiers(&element).unwrap_or_default();
                self.report_usage(
                    ctx,
                    usage,
                    message_id,
                    modifiers.iter().map(|m| m.as_str()),
                );
            }
        }
    }
}

impl Rule for NoUndefinedClassNames {
    fn meta(&self) -> &'static RuleMeta {
        Self::META
    }

    fn check_tag<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>, tag: &ClassTag) {
        let attributes: Vec<AttributeClasses> = tag
            .attributes
            .iter()
            .map(|attr| attribute_classes(component.source, &attr.value))
            .collect();

        match self.mode {
            UsageMode::Flat => self.check_flat(ctx, component, &attributes),
            UsageMode::Element => self.check_element(ctx, component, tag, &attributes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::LintDiagnostic;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;
    use vkcn_carton::NamePattern;

    fn lint_with(source: &str, options: UndefinedClassOptions) -> Vec<LintDiagnostic> {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoUndefinedClassNames::new(options).unwrap()));
        Linter::with_registry(registry)
            .with_class_attr(NamePattern::parse("/^(-?bar|baz|class)$/").unwrap())
            .lint_sfc(source, "test.vue")
            .unwrap()
            .diagnostics
    }

    fn flat(source: &str) -> Vec<LintDiagnostic> {
        lint_with(
            source,
            UndefinedClassOptions {
                mode: UsageMode::Flat,
                ..Default::default()
            },
        )
    }

    fn outputs(source: &str, diagnostic: &LintDiagnostic) -> Vec<String> {
        diagnostic
            .suggestions
            .iter()
            .map(|s| s.edit.apply(source))
            .collect()
    }

    fn text<'s>(source: &'s str, diagnostic: &LintDiagnostic) -> &'s str {
        &source[diagnostic.start as usize..diagnostic.end as usize]
    }

    #[test]
    fn test_flat_valid() {
        for source in [
            r#"<template><div class="foo"></div></template><style>.foo {}</style>"#,
            r#"<template><div :class="'foo'"></div></template><style>.foo {}</style>"#,
            r#"<template><div :class="bar === '/' ? 'foo' : ''"></div><div :class="['bam'].includes('baz') ? 'foo' : 'bar'"></div></template><style>.foo {} .bar {}</style>"#,
            r#"<template><div bar="foo" :baz="'foo'"></div></template><style>.foo {}</style>"#,
            r#"<template><div :class="{foo: true, bar}"></div></template><style>.foo {} .bar {}</style>"#,
            "<template><div :class=\"`\n  foo bar ${any} baz\n  ${any} foobar\n`\"></div></template><style>.foo, .bar, .baz, .foobar {}</style>",
        ] {
            assert!(flat(source).is_empty(), "{source}");
        }
    }

    #[test]
    fn test_flat_static_class() {
        let source = r#"<template><div class="bar"></div></template><style>.foo {}</style>"#;
        let diagnostics = flat(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message_id, MessageId::Undefined);
        assert_eq!(diagnostics[0].message, "The class name `bar` is undefined.");
        assert_eq!(
            outputs(source, &diagnostics[0]),
            vec![
                r#"<template><div class=""></div></template><style>.foo {}</style>"#,
                r#"<template><div class="foo"></div></template><style>.foo {}</style>"#,
            ]
        );
    }

    #[test]
    fn test_flat_quoted_literal() {
        let source = r#"<template><div :class="'bar'"></div></template><style>.foo {}</style>"#;
        let diagnostics = flat(source);
        assert_eq!(text(source, &diagnostics[0]), "'bar'");
        assert_eq!(
            outputs(source, &diagnostics[0]),
            vec![
                r#"<template><div :class=""></div></template><style>.foo {}</style>"#,
                r#"<template><div :class="'foo'"></div></template><style>.foo {}</style>"#,
            ]
        );
    }

    #[test]
    fn test_flat_custom_attributes() {
        let source =
            r#"<template><div bar="foobar" :baz="'foobaz'"></div></template><style>.foo {}</style>"#;
        let diagnostics = flat(source);
        let found: Vec<_> = diagnostics.iter().map(|d| text(source, d)).collect();
        assert_eq!(found, vec!["foobar", "'foobaz'"]);
        assert_eq!(
            outputs(source, &diagnostics[1])[1],
            r#"<template><div bar="foobar" :baz="'foo'"></div></template><style>.foo {}</style>"#
        );
    }

    #[test]
    fn test_flat_object_keys() {
        let source =
            r#"<template><div :class="{bar: true, baz}"></div></template><style>.foo {}</style>"#;
        let diagnostics = flat(source);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            outputs(source, &diagnostics[0]),
            vec![
                r#"<template><div :class="{: true, baz}"></div></template><style>.foo {}</style>"#,
                r#"<template><div :class="{foo: true, baz}"></div></template><style>.foo {}</style>"#,
            ]
        );
        assert_eq!(
            outputs(source, &diagnostics[1])[1],
            r#"<template><div :class="{bar: true, foo: baz}"></div></template><style>.foo {}</style>"#
        );
    }

    #[test]
    fn test_flat_template_literal() {
        let source = "<template><div :class=\"`\n  foo bar ${any} baz\n  ${any} foobar\n`\"></div></template><style>.foo {}</style>";
        let diagnostics = flat(source);
        let found: Vec<_> = diagnostics.iter().map(|d| text(source, d)).collect();
        assert_eq!(found, vec!["bar", "baz", "foobar"]);
        assert!(outputs(source, &diagnostics[0])[1].contains("foo foo ${any} baz"));
    }

    #[test]
    fn test_flat_ranking() {
        let source =
            r#"<template><div class="foobar barbaz"></div></template><style>.foo {} .baz {}</style>"#;
        let diagnostics = flat(source);
        let names = |d: &LintDiagnostic| -> Vec<String> {
            d.suggestions
                .iter()
                .filter_map(|s| s.data.get("className").map(str::to_string))
                .collect()
        };
        assert_eq!(names(&diagnostics[0]), vec!["foobar", "foo", "baz"]);
        assert_eq!(names(&diagnostics[1]), vec!["barbaz", "baz", "foo"]);
    }

    #[test]
    fn test_ignore_class_names() {
        let source =
            r#"<template><div class="foobar barbaz"></div></template><style>.foo {}</style>"#;
        let diagnostics = lint_with(
            source,
            UndefinedClassOptions {
                ignore_class_names: vec!["/^foo/".to_string()],
                mode: UsageMode::Flat,
            },
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(text(source, &diagnostics[0]), "barbaz");
    }

    #[test]
    fn test_element_mode() {
        let style = "<style lang=\"scss\">.foo--bar { &.active {} &.big {} } .foo--baz {}</style>";
        let valid = format!(
            r#"<template><div class="foo--bar" :class="{{active, 'big': x}}"></div></template>{style}"#
        );
        assert!(lint_with(&valid, UndefinedClassOptions::default()).is_empty());

        let source = format!(
            r#"<template><div class="foo--bar actve"></div><i class="foo--bax"></i></template>{style}"#
        );
        let diagnostics = lint_with(&source, UndefinedClassOptions::default());
        let found: Vec<_> = diagnostics
            .iter()
            .map(|d| (d.message_id, text(&source, d)))
            .collect();
        assert_eq!(
            found,
            vec![
                (MessageId::UndefinedModifier, "actve"),
                (MessageId::UndefinedElement, "foo--bax"),
            ]
        );
        assert_eq!(
            diagnostics[0].message,
            "The modifier class name `actve` is undefined."
        );
        assert_eq!(
            diagnostics[1].suggestions[1].data.get("className"),
            Some("foo--bar")
        );
    }

    #[test]
    fn test_element_count() {
        let style = "<style>.foo--bar {}</style>";
        let source = format!(
            r#"<template><div class="active" :class="x"></div><p class="foo--bar" :class="'foo--bar'"></p></template>{style}"#
        );
        let diagnostics = lint_with(&source, UndefinedClassOptions::default());
        let found: Vec<_> = diagnostics
            .iter()
            .map(|d| (d.message_id, text(&source, d)))
            .collect();
        assert_eq!(
            found,
            vec![
                (MessageId::UndefinedElement, r#"class="active""#),
                (MessageId::ExcessElement, r#"class="foo--bar""#),
                (MessageId::ExcessElement, r#":class="'foo--bar'""#),
            ]
        );
    }
}
