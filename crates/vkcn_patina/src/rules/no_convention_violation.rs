//! vkcn/no-convention-violation
//!
//! Enforce the class naming convention in `<style>` blocks.
//!
//! Top-level classes are elements named `<prefix>--<element>`, where the
//! prefix is the kebab-cased file name (or the name declared by a
//! `vkcn-prefix` comment). Nested classes are modifiers. A single `>`
//! combinator may follow an element, and only a type or `*` may follow it.
//!
//! ## Examples
//!
//! ### Invalid
//! ```vue
//! <!-- FooComponent.vue -->
//! <style lang="scss">
//! .foo-component--bar__baz {}
//! .foo-component--bar * {}
//! .foo-component--bar { & > div { &.baz {} } }
//! </style>
//! ```
//!
//! ### Valid
//! ```vue
//! <!-- FooComponent.vue -->
//! <style lang="scss">
//! .foo-component--bar { &.baz {} &:hover {} & > div {} }
//! </style>
//! ```

use crate::component::{Component, StyleAnalysis};
use crate::context::LintContext;
use crate::convention::{derive_prefix, ConventionChecker, ConventionOptions};
use crate::diagnostic::Severity;
use crate::error::InvariantError;
use crate::rule::{Rule, RuleMeta};

/// Convention rule
#[derive(Debug, Clone, Default)]
pub struct NoConventionViolation {
    pub options: ConventionOptions,
}

impl NoConventionViolation {
    pub const META: &'static RuleMeta = &RuleMeta {
        name: "vkcn/no-convention-violation",
        description: "Enforce the `<prefix>--<element>` class naming convention in styles",
        fixable: true,
        has_suggestions: true,
        default_severity: Severity::Error,
    };

    pub fn new(options: ConventionOptions) -> Self {
        Self { options }
    }
}

impl Rule for NoConventionViolation {
    fn meta(&self) -> &'static RuleMeta {
        Self::META
    }

    fn check_style<'a>(
        &self,
        ctx: &mut LintContext<'a>,
        component: &Component<'a>,
        style: &StyleAnalysis,
    ) -> Result<(), InvariantError> {
        let prefix = derive_prefix(&style.sheet, component.filename);
        tracing::trace!(block = style.index, prefix = prefix.as_str(), "checking convention");

        let checker = ConventionChecker {
            options: self.options,
            prefix: &prefix,
            block: style.index,
        };
        for selector in style.selectors.iter() {
            checker.check(ctx, selector)?;
        }
        Ok(())
    }
}
