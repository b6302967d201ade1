//! vkcn/no-dynamic-class-names
//!
//! Disallow class bindings whose class names can only be known at runtime.
//!
//! String literals, object keys, array elements and the static parts of
//! template literals are fine. Identifiers are fine only when they name the
//! `class` prop (or any component prop with `allowProps`), directly or as
//! `$props.x` / `$attrs.x`.
//!
//! ## Examples
//!
//! ### Invalid
//! ```vue
//! <div :class="some" />
//! <div :class="[some]" />
//! <div :class="{ [some]: true }" />
//! <div :class="cond ? 'a' : 'b'" />
//! ```
//!
//! ### Valid
//! ```vue
//! <div :class="'some'" />
//! <div :class="{ some: isActive }" />
//! <div :class="[{ some: true }, $props.class]" />
//! ```

use crate::component::{ClassTag, ClassValue, Component};
use crate::context::{LintContext, NodeRef};
use crate::diagnostic::Severity;
use crate::extract::DynamicScan;
use crate::message::MessageId;
use crate::rule::{Rule, RuleMeta};
use serde::Deserialize;

/// Prop name that is always allowed.
const CLASS_PROP: &str = "class";

/// Options of `vkcn/no-dynamic-class-names`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct DynamicClassOptions {
    /// Check both branches of a conditional instead of reporting it
    pub allow_conditional: bool,
    /// Allow identifiers naming props of the component
    pub allow_props: bool,
}

/// Dynamic class rule
#[derive(Debug, Clone, Default)]
pub struct NoDynamicClassNames {
    pub options: DynamicClassOptions,
}

impl NoDynamicClassNames {
    pub const META: &'static RuleMeta = &RuleMeta {
        name: "vkcn/no-dynamic-class-names",
        description: "Disallow class names that can only be known at runtime",
        fixable: false,
        has_suggestions: false,
        default_severity: Severity::Error,
    };

    pub fn new(options: DynamicClassOptions) -> Self {
        Self { options }
    }
}

impl Rule for NoDynamicClassNames {
    fn meta(&self) -> &'static RuleMeta {
        Self::META
    }

    fn check_tag<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>, tag: &ClassTag) {
        let mut allowed_props = vec![CLASS_PROP];
        if self.options.allow_props {
            allowed_props.extend(component.props().iter().map(|prop| prop.as_str()));
        }
        let scan = DynamicScan {
            allow_conditional: self.options.allow_conditional,
            allowed_props: &allowed_props,
        };

        for attr in &tag.attributes {
            let ClassValue::Bound(expr) = &attr.value else {
                continue;
            };
            for span in scan.fragments(expr) {
                ctx.report_message(NodeRef::Markup(span), MessageId::Dynamic, span);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;
    use vkcn_carton::NamePattern;

    fn lint(template: &str, options: DynamicClassOptions) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoDynamicClassNames::new(options)));
        let source = format!("<template>{template}</template>");
        Linter::with_registry(registry)
            .lint_sfc(&source, "test.vue")
            .unwrap()
    }

    #[test]
    fn test_valid_static_shapes() {
        for template in [
            r#"<div :class="'some'" />"#,
            r#"<div :class="{some: true}" />"#,
            r#"<div :class="{'some1 some2': true}" />"#,
            r#"<div :class="{some}" />"#,
            r#"<div :class="{some: some2}" />"#,
            r#"<div :class="{...{some: true}}" />"#,
            r#"<div :class="[{some: true}]" />"#,
            r#"<div :class="$props.class" />"#,
            r#"<div :class="$attrs.class" />"#,
            r#"<div :class="`foo ${bar}`" />"#,
            r#"<div class="some" />"#,
        ] {
            let result = lint(template, DynamicClassOptions::default());
            assert!(!result.has_diagnostics(), "{template}");
        }
    }

    #[test]
    fn test_invalid_fragments() {
        for (template, fragment) in [
            (r#"<div :class="1" />"#, "1"),
            (r#"<div :class="true" />"#, "true"),
            (r#"<div :class="some" />"#, "some"),
            (r#"<div :class="{[some]: true}" />"#, "[some]: true"),
            (r#"<div :class="[some]" />"#, "some"),
            (r#"<div :class="[{some: true}, some]" />"#, "some"),
            (r#"<div :class="$props.someProp" />"#, "$props.someProp"),
            (r#"<div :class="isActive ? 'a' : 'b'" />"#, "isActive ? 'a' : 'b'"),
        ] {
            let source = format!("<template>{template}</template>");
            let result = lint(template, DynamicClassOptions::default());
            assert_eq!(result.diagnostics.len(), 1, "{template}");
            let d = &result.diagnostics[0];
            assert_eq!(&source[d.start as usize..d.end as usize], fragment);
            assert_eq!(d.message, "No dynamic class.");
        }
    }

    #[test]
    fn test_allow_conditional() {
        let options = DynamicClassOptions {
            allow_conditional: true,
            ..Default::default()
        };
        assert!(!lint(r#"<div :class="a ? 'b' : 'c'" />"#, options).has_diagnostics());
        assert_eq!(
            lint(r#"<div :class="a ? b : c" />"#, options).diagnostics.len(),
            2
        );
    }

    #[test]
    fn test_allow_props() {
        let source = r#"<script setup>
defineProps(['someProp'])
</script>
<template><div :class="[$props.someProp, someProp]" /></template>"#;
        let lint = |allow_props| {
            let mut registry = RuleRegistry::new();
            registry.register(Box::new(NoDynamicClassNames::new(DynamicClassOptions {
                allow_props,
                ..Default::default()
            })));
            Linter::with_registry(registry)
                .lint_sfc(source, "test.vue")
                .unwrap()
        };
        assert_eq!(lint(false).diagnostics.len(), 2);
        assert!(!lint(true).has_diagnostics());
    }

    #[test]
    fn test_custom_class_attribute() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoDynamicClassNames::default()));
        let linter = Linter::with_registry(registry)
            .with_class_attr(NamePattern::parse("/(.+-)?class$/").unwrap());
        let result = linter
            .lint_sfc(
                r#"<template><div :some-class="some" :style="some" /></template>"#,
                "test.vue",
            )
            .unwrap();
        assert_eq!(result.diagnostics.len(), 1);
    }
}
