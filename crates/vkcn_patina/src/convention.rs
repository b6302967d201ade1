//! Naming convention checks over resolved selector paths.
//!
//! Each component of a path is checked by kind and by its position (level)
//! in the path:
//!
//! | Kind        | Level 0                         | Level > 0                                  |
//! |-------------|---------------------------------|--------------------------------------------|
//! | class       | `<prefix>--<element>`           | after classes only, not nested, kebab case |
//! | combinator  | only with the allowance         | `>` only, once, followed by type or `*`    |
//! | type        | only with the allowance         | exactly at level 2, literal tag            |
//! | universal   | only with the allowance         | right after `>`                            |
//! | pseudo      | only with the allowance         | nothing but pseudos after it               |

use crate::context::{LintContext, NodeRef};
use crate::diagnostic::{Fix, Suggestion, TextEdit};
use crate::error::InvariantError;
use crate::message::{MessageData, MessageId};
use crate::selector::{ResolvedNode, ResolvedSelector};
use serde::Deserialize;
use std::path::Path;
use vkcn_carton::case::{is_kebab_case, kebab_case, starts_with_lowercase};
use vkcn_relief::{Combinator, SelectorKind, StyleSheet};

/// Separator between prefix and element name.
pub const DIVIDER: &str = "--";
/// Comment marker declaring the prefix of a style block.
pub const PREFIX_MARKER: &str = "vkcn-prefix";

/// Prefix of the element classes of a style block.
///
/// The first comment of the block starting with `vkcn-prefix` may name it;
/// otherwise, or when the name is not kebab case, it is the kebab-cased file
/// name, or directory name for `index` files.
pub fn derive_prefix(sheet: &StyleSheet, filename: &str) -> String {
    let declared = sheet
        .comments
        .iter()
        .find(|comment| comment.text.starts_with(PREFIX_MARKER))
        .and_then(|comment| comment.text.split_whitespace().nth(1))
        .filter(|name| is_kebab_case(name));

    match declared {
        Some(name) => name.to_string(),
        None => default_prefix(filename),
    }
}

fn default_prefix(filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    if stem == "index" {
        let dir = path
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|dir| dir.to_str())
            .unwrap_or_default();
        kebab_case(dir)
    } else {
        kebab_case(stem)
    }
}

/// Checker options, also the options of `vkcn/no-convention-violation`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ConventionOptions {
    pub allow_top_level_non_class_selector: bool,
    pub enable_fix: bool,
}

/// Checks the paths of one style block.
pub struct ConventionChecker<'p> {
    pub options: ConventionOptions,
    pub prefix: &'p str,
    /// Index of the style block, part of node identity
    pub block: usize,
}

impl ConventionChecker<'_> {
    /// Check every component of a resolved path.
    pub fn check(
        &self,
        ctx: &mut LintContext<'_>,
        selector: &ResolvedSelector,
    ) -> Result<(), InvariantError> {
        let nodes = selector.nodes.as_slice();
        for (level, node) in nodes.iter().enumerate() {
            self.check_node(ctx, nodes, level, node)?;
        }
        Ok(())
    }

    fn node_ref(&self, node: &ResolvedNode) -> NodeRef {
        NodeRef::Selector {
            block: self.block,
            origin: node.origin,
        }
    }

    fn report(&self, ctx: &mut LintContext<'_>, node: &ResolvedNode, message_id: MessageId) {
        ctx.report_message(self.node_ref(node), message_id, node.span);
    }

    fn check_node(
        &self,
        ctx: &mut LintContext<'_>,
        nodes: &[ResolvedNode],
        level: usize,
        node: &ResolvedNode,
    ) -> Result<(), InvariantError> {
        if let SelectorKind::Class { value } = &node.kind {
            if level == 0 {
                self.check_top_level_class(ctx, node, value);
            } else {
                self.check_nested_class(ctx, nodes, level, node, value);
            }
            return Ok(());
        }

        if level == 0 && !self.options.allow_top_level_non_class_selector {
            self.report(ctx, node, MessageId::NoViolation);
            return Ok(());
        }

        match &node.kind {
            SelectorKind::Combinator(combinator) => {
                self.check_combinator(ctx, nodes, level, node, *combinator)?
            }
            SelectorKind::Type { .. } => self.check_type(ctx, level, node),
            SelectorKind::Universal => {
                if let Some(previous) = level.checked_sub(1).map(|i| &nodes[i]) {
                    if previous.kind != SelectorKind::Combinator(Combinator::Child) {
                        self.report(ctx, node, MessageId::UniversalInvalidParent);
                    }
                }
            }
            SelectorKind::Pseudo { .. } => {
                let has_non_pseudo_after = nodes[level + 1..]
                    .iter()
                    .any(|next| !matches!(next.kind, SelectorKind::Pseudo { .. }));
                if has_non_pseudo_after {
                    self.report(ctx, node, MessageId::PseudoChild);
                }
            }
            // Attribute and id selectors are unconstrained past level 0
            _ => {}
        }
        Ok(())
    }

    fn check_top_level_class(&self, ctx: &mut LintContext<'_>, node: &ResolvedNode, class: &str) {
        let element = class
            .split(DIVIDER)
            .nth(1)
            .filter(|element| !element.is_empty())
            .unwrap_or(class);
        let kebab_element = kebab_case(element);

        let valid_prefix = class
            .strip_prefix(self.prefix)
            .is_some_and(|rest| rest.starts_with(DIVIDER));
        let valid_element = element == kebab_element;
        let fixable = node.literal && starts_with_lowercase(class);

        if valid_prefix && valid_element && fixable {
            return;
        }

        let replacement = format!(".{}{}{}", self.prefix, DIVIDER, kebab_element);
        let edit = TextEdit::replace(node.span.start, node.span.end, replacement.clone());
        let mut diagnostic = ctx.diagnostic(MessageId::ClassTopNaming, MessageData::new(), node.span);

        if fixable {
            if self.options.enable_fix {
                diagnostic = diagnostic.with_fix(Fix::new(format!("Rename to '{replacement}'"), edit));
            } else {
                diagnostic = diagnostic.with_suggestions(vec![Suggestion::new(
                    MessageId::ClassTopNamingSuggestion,
                    MessageData::new().with("selector", replacement),
                    edit,
                )]);
            }
        }

        ctx.report(self.node_ref(node), diagnostic);
    }

    fn check_nested_class(
        &self,
        ctx: &mut LintContext<'_>,
        nodes: &[ResolvedNode],
        level: usize,
        node: &ResolvedNode,
        class: &str,
    ) {
        if nodes[..level].iter().any(|previous| !previous.is_class()) {
            self.report(ctx, node, MessageId::ClassNestedPreviousNonClass);
            return;
        }

        // Modifiers must all come from the same compound as the first one
        if level > 1 && node.parent != nodes[1].parent {
            self.report(ctx, node, MessageId::ClassNestedModifiers);
            return;
        }

        let kebab = kebab_case(class);
        if kebab == class {
            return;
        }

        let mut diagnostic =
            ctx.diagnostic(MessageId::ClassNestedNaming, MessageData::new(), node.span);
        // `&`-suffix names are not rewritable as a class token
        if self.options.enable_fix && node.literal {
            let replacement = format!(".{kebab}");
            diagnostic = diagnostic.with_fix(Fix::new(
                format!("Rename to '{replacement}'"),
                TextEdit::replace(node.span.start, node.span.end, replacement),
            ));
        }
        ctx.report(self.node_ref(node), diagnostic);
    }

    fn check_combinator(
        &self,
        ctx: &mut LintContext<'_>,
        nodes: &[ResolvedNode],
        level: usize,
        node: &ResolvedNode,
        combinator: Combinator,
    ) -> Result<(), InvariantError> {
        if combinator != Combinator::Child {
            self.report(ctx, node, MessageId::CombinatorTypeAllowed);
            return Ok(());
        }

        if nodes[..level].iter().any(|previous| previous.kind.is_combinator()) {
            self.report(ctx, node, MessageId::CombinatorOnlyAllowed);
            return Ok(());
        }

        let child = nodes
            .get(level + 1)
            .ok_or(InvariantError::MissingCombinatorChild {
                offset: node.span.start,
            })?;
        if !matches!(child.kind, SelectorKind::Type { .. } | SelectorKind::Universal) {
            self.report(ctx, child, MessageId::CombinatorChildAllowed);
        }
        Ok(())
    }

    fn check_type(&self, ctx: &mut LintContext<'_>, level: usize, node: &ResolvedNode) {
        if level == 0 && self.options.allow_top_level_non_class_selector {
            return;
        }
        if level != 2 {
            self.report(ctx, node, MessageId::TypeOnlyInside);
            return;
        }
        if !node.literal {
            self.report(ctx, node, MessageId::TypeNested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve_sheet;
    use vkcn_armature::parse_style;
    use vkcn_relief::{Span, StyleLang};

    fn check(source: &str, prefix: &str, options: ConventionOptions) -> Vec<(MessageId, String)> {
        let sheet = parse_style(source, Span::from_range(0, source.len()), StyleLang::Scss).unwrap();
        let selectors = resolve_sheet(&sheet).unwrap();
        let mut ctx = LintContext::new(source, "test.vue");
        let checker = ConventionChecker {
            options,
            prefix,
            block: 0,
        };
        for selector in selectors.iter() {
            checker.check(&mut ctx, selector).unwrap();
        }
        ctx.into_diagnostics()
            .into_iter()
            .map(|d| {
                let span = Span::new(d.start, d.end);
                (d.message_id, span.text(source).to_string())
            })
            .collect()
    }

    fn ids(source: &str) -> Vec<MessageId> {
        check(source, "foo", ConventionOptions::default())
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn test_prefix_from_comment_and_filename() {
        let prefix = |source: &str, filename: &str| {
            let sheet =
                parse_style(source, Span::from_range(0, source.len()), StyleLang::Scss).unwrap();
            derive_prefix(&sheet, filename)
        };
        assert_eq!(prefix("/* vkcn-prefix foo-baz */", "FooComponent.vue"), "foo-baz");
        assert_eq!(prefix("// vkcn-prefix foo--baz", "FooComponent.vue"), "foo-component");
        assert_eq!(prefix("/* vkcn-prefix */", "FooComponent.vue"), "foo-component");
        assert_eq!(prefix("", "./bar/FooComponent/index.vue"), "foo-component");
        assert_eq!(prefix("", "src/my_widget.vue"), "my-widget");
    }

    #[test]
    fn test_valid_paths() {
        assert!(ids(".foo--bar {} .foo--bar > div {} .foo--bar > * {}").is_empty());
        assert!(ids(".foo--bar { &:hover {} &:disabled:not(.baz) {} }").is_empty());
        assert!(ids(".foo--bar { &.baz {} &.baz.bam.bal {} &[src] {} }").is_empty());
        assert!(ids(".foo--bar { &.bar:first-child:hover {} }").is_empty());
    }

    #[test]
    fn test_top_level_naming_suggestion() {
        let source = ".foo--bar__baz {}";
        let sheet = parse_style(source, Span::from_range(0, source.len()), StyleLang::Css).unwrap();
        let selectors = resolve_sheet(&sheet).unwrap();
        let mut ctx = LintContext::new(source, "Foo.vue");
        let checker = ConventionChecker {
            options: ConventionOptions::default(),
            prefix: "foo",
            block: 0,
        };
        for selector in selectors.iter() {
            checker.check(&mut ctx, selector).unwrap();
        }
        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
        let suggestion = &diagnostics[0].suggestions[0];
        assert_eq!(suggestion.message, "Use '.foo--bar-baz' class name.");
        assert_eq!(suggestion.edit.apply(source), ".foo--bar-baz {}");
    }

    #[test]
    fn test_top_level_naming_fix() {
        let options = ConventionOptions {
            enable_fix: true,
            ..Default::default()
        };
        let source = ".bar {}";
        let sheet = parse_style(source, Span::from_range(0, source.len()), StyleLang::Css).unwrap();
        let selectors = resolve_sheet(&sheet).unwrap();
        let mut ctx = LintContext::new(source, "Foo.vue");
        let checker = ConventionChecker {
            options,
            prefix: "foo",
            block: 0,
        };
        for selector in selectors.iter() {
            checker.check(&mut ctx, selector).unwrap();
        }
        let diagnostics = ctx.into_diagnostics();
        assert!(diagnostics[0].suggestions.is_empty());
        let fix = diagnostics[0].fix.as_ref().unwrap();
        assert_eq!(fix.edit.apply(source), ".foo--bar {}");
    }

    #[test]
    fn test_suffix_nesting_is_not_fixable() {
        let source = ".foo--bar { &__baz {} }";
        let found = check(source, "foo", ConventionOptions::default());
        assert_eq!(found, vec![(MessageId::ClassTopNaming, "&__baz".to_string())]);
    }

    #[test]
    fn test_nested_suffix_is_not_fixable() {
        let source = ".foo--bar { &.baz { &Qux {} } }";
        let sheet = parse_style(source, Span::from_range(0, source.len()), StyleLang::Scss).unwrap();
        let selectors = resolve_sheet(&sheet).unwrap();
        let mut ctx = LintContext::new(source, "Foo.vue");
        let checker = ConventionChecker {
            options: ConventionOptions {
                enable_fix: true,
                ..Default::default()
            },
            prefix: "foo",
            block: 0,
        };
        for selector in selectors.iter() {
            checker.check(&mut ctx, selector).unwrap();
        }
        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message_id, MessageId::ClassNestedNaming);
        assert_eq!(&source[diagnostics[0].start as usize..diagnostics[0].end as usize], "&Qux");
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn test_nested_class_fix() {
        let source = ".foo--bar { &.bigRed {} }";
        let sheet = parse_style(source, Span::from_range(0, source.len()), StyleLang::Scss).unwrap();
        let selectors = resolve_sheet(&sheet).unwrap();
        let mut ctx = LintContext::new(source, "Foo.vue");
        let checker = ConventionChecker {
            options: ConventionOptions {
                enable_fix: true,
                ..Default::default()
            },
            prefix: "foo",
            block: 0,
        };
        for selector in selectors.iter() {
            checker.check(&mut ctx, selector).unwrap();
        }
        let diagnostics = ctx.into_diagnostics();
        let fix = diagnostics[0].fix.as_ref().unwrap();
        assert_eq!(fix.edit.apply(source), ".foo--bar { &.big-red {} }");
    }

    #[test]
    fn test_uppercase_start_is_not_fixable() {
        let source = ".Foo--bar {}";
        let sheet = parse_style(source, Span::from_range(0, source.len()), StyleLang::Css).unwrap();
        let selectors = resolve_sheet(&sheet).unwrap();
        let mut ctx = LintContext::new(source, "Foo.vue");
        let checker = ConventionChecker {
            options: ConventionOptions {
                enable_fix: true,
                ..Default::default()
            },
            prefix: "foo",
            block: 0,
        };
        for selector in selectors.iter() {
            checker.check(&mut ctx, selector).unwrap();
        }
        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
        assert!(diagnostics[0].suggestions.is_empty());
    }

    #[test]
    fn test_combinators() {
        assert_eq!(
            check(".foo--bar * {}", "foo", ConventionOptions::default()),
            vec![
                (MessageId::CombinatorTypeAllowed, " ".to_string()),
                (MessageId::UniversalInvalidParent, "*".to_string()),
            ]
        );
        assert_eq!(
            ids(".foo--bar > div > a {}"),
            vec![MessageId::CombinatorOnlyAllowed, MessageId::TypeOnlyInside]
        );
        assert_eq!(
            check(".foo--bar > .baz {}", "foo", ConventionOptions::default()),
            vec![
                (MessageId::CombinatorChildAllowed, ".baz".to_string()),
                (MessageId::ClassNestedPreviousNonClass, ".baz".to_string()),
            ]
        );
    }

    #[test]
    fn test_implicit_descendant_is_reported_at_nested_selector() {
        assert_eq!(
            check(".foo--bar { .baz {} }", "foo", ConventionOptions::default()),
            vec![
                (MessageId::CombinatorTypeAllowed, ".baz".to_string()),
                (MessageId::ClassNestedPreviousNonClass, ".baz".to_string()),
            ]
        );
    }

    #[test]
    fn test_type_nested() {
        assert_eq!(
            check(
                ".foo--bar { & > div { &__baz {} } }",
                "foo",
                ConventionOptions::default()
            ),
            vec![(MessageId::TypeNested, "&__baz".to_string())]
        );
    }

    #[test]
    fn test_nested_modifiers() {
        assert_eq!(
            check(".foo--bar { &.baz { &.bam {} } }", "foo", ConventionOptions::default()),
            vec![(MessageId::ClassNestedModifiers, ".bam".to_string())]
        );
    }

    #[test]
    fn test_nested_naming() {
        let found = check(".foo--bar.isActive {}", "foo", ConventionOptions::default());
        assert_eq!(found, vec![(MessageId::ClassNestedNaming, ".isActive".to_string())]);
    }

    #[test]
    fn test_pseudo_child() {
        assert_eq!(
            ids(".foo--bar:hover.baz {}"),
            vec![MessageId::PseudoChild, MessageId::ClassNestedPreviousNonClass]
        );
    }

    #[test]
    fn test_top_level_non_class() {
        assert_eq!(
            ids("div {} :hover {} [data-x] {} #id {} * {}"),
            vec![MessageId::NoViolation; 5]
        );
        let allowed = ConventionOptions {
            allow_top_level_non_class_selector: true,
            ..Default::default()
        };
        assert!(check(
            ":hover {} ::selection {} * {} [data-foo] {} div {} #foo {}",
            "foo",
            allowed
        )
        .is_empty());
    }

    #[test]
    fn test_same_node_reported_once_across_variants() {
        // `.x` is part of both resolved paths of the nested rule
        let found = check(".foo--a, .foo--b { .x {} }", "foo", ConventionOptions::default());
        let combinators = found
            .iter()
            .filter(|(id, _)| *id == MessageId::CombinatorTypeAllowed)
            .count();
        assert_eq!(combinators, 1);
    }
}
