//! # vkcn_patina
//!
//! Patina - The class naming checker for vkcn.
//! Lints how Vue Single File Components name and use their CSS classes.
//!
//! ## Name Origin
//!
//! **Patina** (/ˈpætɪnə/) is the layer that forms on bronze over time. A
//! consistent patina is how a restorer tells an authentic surface from a
//! patched one; `vkcn_patina` does the same for class names, checking that
//! every selector and every template class follows one naming discipline.
//!
//! ## The convention
//!
//! A component `FooBar.vue` owns the prefix `foo-bar`. Its style blocks may
//! only declare top-level classes `foo-bar--<element>`, refine them with
//! kebab-case modifiers (`.foo-bar--title.large`), and reach into child
//! elements through a single `>` combinator with a type selector. Every
//! element in the template carries exactly one element class plus modifiers
//! declared for it, and class names are never computed at runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vkcn_patina::{format_results, Linter, OutputFormat};
//!
//! let source = r#"<template><div class="foo--title"></div></template>
//! <style>.foo--title {}</style>"#;
//! let result = Linter::new().lint_sfc(source, "Foo.vue")?;
//!
//! if result.has_diagnostics() {
//!     let sources = [("Foo.vue".to_string(), source.to_string())];
//!     println!("{}", format_results(&[result], &sources, OutputFormat::Text));
//! }
//! ```
//!
//! ## Rules
//!
//! - `vkcn/no-convention-violation` - Selectors follow the prefix/element/modifier convention
//! - `vkcn/no-dynamic-class-names` - Class bindings are statically known
//! - `vkcn/no-undefined-class-names` - Template classes are declared in the component's styles

mod component;
mod config;
mod context;
mod convention;
mod diagnostic;
mod disable;
mod error;
mod extract;
mod fix;
mod linter;
mod message;
pub mod output;
mod registry;
mod resolver;
mod rule;
pub mod rules;
mod selector;
mod usage;
mod visitor;

pub use component::{ClassAttribute, ClassTag, ClassValue, Component, StyleAnalysis};
pub use config::{ConfigError, LintConfig, RuleLevel, RuleSetting, Settings};
pub use context::{LintContext, NodeRef};
pub use convention::ConventionOptions;
pub use diagnostic::{Fix, LintDiagnostic, LintSummary, Severity, Suggestion, TextEdit};
pub use error::InvariantError;
pub use fix::apply_fixes;
pub use linter::{LintResult, Linter};
pub use message::{MessageData, MessageId};
pub use output::{format_results, format_summary, OutputFormat};
pub use registry::ClassRegistry;
pub use rule::{Rule, RuleEntry, RuleMeta, RuleRegistry, BUILTIN_RULES};
pub use selector::{ResolvedNode, ResolvedSelector};
pub use vkcn_carton::NamePattern;

/// Lint a Vue SFC source with the recommended rules
///
/// This is a convenience function for simple use cases.
/// For more control, use `Linter::new()` directly.
pub fn lint(source: &str, filename: &str) -> Result<LintResult, InvariantError> {
    Linter::new().lint_sfc(source, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_function() {
        let result = lint("<template><div :class=\"dynamic\"></div></template>", "Foo.vue").unwrap();
        assert!(result.has_errors());
    }

    #[test]
    fn test_lint_valid_component() {
        let source = r#"<template>
  <div class="foo--root large">
    <span class="foo--label"></span>
  </div>
</template>

<style>
.foo--root {}
.foo--root.large {}
.foo--root > span {}
.foo--label {}
</style>"#;
        let result = lint(source, "Foo.vue").unwrap();
        assert!(!result.has_diagnostics(), "{:?}", result.diagnostics);
    }
}
