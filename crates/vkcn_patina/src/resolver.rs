//! Nested selector resolution.
//!
//! Rules are resolved in arena order, which is source order, so every
//! ancestor is resolved before its descendants and its paths can be reused.
//!
//! - A nested selector containing `&` gets each parent path substituted at
//!   the `&` position. `&suffix` glues the suffix onto the last component of
//!   the parent path instead.
//! - A nested selector without `&` is appended to each parent path. When it
//!   does not start with an explicit combinator, a descendant combinator is
//!   inserted in front of it.
//! - Selector lists expand combinatorially: parent variants × local entries.
//!
//! A rule whose own prelude did not parse, or that sits inside a
//! non-selector at-rule (`@keyframes`, `@font-face`, ...), has no resolution.
//! The same holds for all of its descendants.

use crate::error::InvariantError;
use crate::selector::{Origin, ResolvedNode, ResolvedSelector};
use vkcn_relief::{
    Combinator, ComplexId, NodeId, RuleId, RuleKind, SelectorArena, SelectorKind, StyleSheet,
};

/// At-rules whose blocks hold something other than selector rules.
const NON_SELECTOR_AT_RULES: &[&str] = &[
    "keyframes",
    "-webkit-keyframes",
    "-moz-keyframes",
    "-o-keyframes",
    "font-face",
    "page",
    "counter-style",
    "font-feature-values",
    "property",
];

/// Resolved selectors of every rule of a sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetSelectors {
    rules: Vec<Option<Vec<ResolvedSelector>>>,
}

impl SheetSelectors {
    /// Resolution of a single rule; `None` for at-rules and undefined rules.
    #[inline]
    pub fn rule(&self, id: RuleId) -> Option<&[ResolvedSelector]> {
        self.rules.get(id.index())?.as_deref()
    }

    /// Every defined resolved selector in source order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedSelector> {
        self.rules.iter().flatten().flatten()
    }

    /// Number of defined resolved selectors.
    pub fn len(&self) -> usize {
        self.rules.iter().flatten().map(Vec::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum ParentPaths<'r> {
    /// No enclosing style rule
    Root,
    Paths(&'r [ResolvedSelector]),
    Undefined,
}

/// Resolve every style rule of a sheet.
pub fn resolve_sheet(sheet: &StyleSheet) -> Result<SheetSelectors, InvariantError> {
    let mut rules: Vec<Option<Vec<ResolvedSelector>>> = Vec::with_capacity(sheet.rules.len());

    for (id, rule) in sheet.iter() {
        let resolved = match &rule.kind {
            RuleKind::AtRule { .. } | RuleKind::Style {
                selectors: None, ..
            } => None,
            RuleKind::Style {
                selectors: Some(complexes),
                ..
            } => match parent_paths(sheet, id, &rules) {
                ParentPaths::Undefined => None,
                ParentPaths::Root => Some(resolve_root(&sheet.selectors, id, complexes)?),
                ParentPaths::Paths(parents) => {
                    Some(resolve_nested(&sheet.selectors, id, complexes, parents)?)
                }
            },
        };
        rules.push(resolved);
    }

    let selectors = SheetSelectors { rules };
    tracing::trace!(selectors = selectors.len(), "resolved style sheet");
    Ok(selectors)
}

fn parent_paths<'r>(
    sheet: &StyleSheet,
    id: RuleId,
    resolved: &'r [Option<Vec<ResolvedSelector>>],
) -> ParentPaths<'r> {
    for ancestor in sheet.ancestors(id) {
        match &sheet.rule(ancestor).kind {
            RuleKind::AtRule { name, .. } => {
                if NON_SELECTOR_AT_RULES.contains(&name.as_str()) {
                    return ParentPaths::Undefined;
                }
            }
            RuleKind::Style { .. } => {
                return match resolved.get(ancestor.index()) {
                    Some(Some(paths)) => ParentPaths::Paths(paths),
                    _ => ParentPaths::Undefined,
                };
            }
        }
    }
    ParentPaths::Root
}

/// Copy an arena node verbatim.
fn copy_node(arena: &SelectorArena, id: NodeId) -> ResolvedNode {
    let node = arena.node(id);
    ResolvedNode {
        kind: node.kind.clone(),
        origin: Origin::Node(id),
        span: node.span,
        parent: arena.parent(id),
        literal: true,
    }
}

fn complex_nodes(arena: &SelectorArena, complex: ComplexId) -> Result<&[NodeId], InvariantError> {
    let selector = arena.complex(complex);
    if selector.nodes.is_empty() {
        return Err(InvariantError::EmptySelector {
            offset: selector.span.start,
        });
    }
    Ok(&selector.nodes)
}

fn resolve_root(
    arena: &SelectorArena,
    rule: RuleId,
    complexes: &[ComplexId],
) -> Result<Vec<ResolvedSelector>, InvariantError> {
    let mut out = Vec::with_capacity(complexes.len());
    for &complex in complexes {
        let nodes = complex_nodes(arena, complex)?
            .iter()
            .map(|&id| match &arena.node(id).kind {
                // Nothing to stand in for; keep the raw text as a class
                SelectorKind::Nesting { suffix } => {
                    let node = arena.node(id);
                    let mut value = vkcn_carton::CompactString::new("&");
                    value.push_str(suffix);
                    ResolvedNode {
                        kind: SelectorKind::Class { value },
                        origin: Origin::Node(id),
                        span: node.span,
                        parent: complex,
                        literal: false,
                    }
                }
                _ => copy_node(arena, id),
            })
            .collect();
        out.push(ResolvedSelector { rule, nodes });
    }
    Ok(out)
}

fn resolve_nested(
    arena: &SelectorArena,
    rule: RuleId,
    complexes: &[ComplexId],
    parents: &[ResolvedSelector],
) -> Result<Vec<ResolvedSelector>, InvariantError> {
    let mut out = Vec::with_capacity(parents.len() * complexes.len());
    for parent in parents {
        for &complex in complexes {
            if let Some(nodes) = nest(arena, complex, &parent.nodes)? {
                out.push(ResolvedSelector { rule, nodes });
            }
        }
    }
    Ok(out)
}

fn nest(
    arena: &SelectorArena,
    complex: ComplexId,
    parent: &[ResolvedNode],
) -> Result<Option<Vec<ResolvedNode>>, InvariantError> {
    let ids = complex_nodes(arena, complex)?;
    let mut nodes = Vec::with_capacity(parent.len() + ids.len() + 1);

    if !ids.iter().any(|&id| arena.node(id).kind.is_nesting()) {
        nodes.extend_from_slice(parent);
        let first = ids[0];
        let first_node = arena.node(first);
        if !first_node.kind.is_combinator() {
            nodes.push(ResolvedNode {
                kind: SelectorKind::Combinator(Combinator::Descendant),
                origin: Origin::Implicit(first),
                span: first_node.span,
                parent: complex,
                literal: false,
            });
        }
        nodes.extend(ids.iter().map(|&id| copy_node(arena, id)));
        return Ok(Some(nodes));
    }

    for &id in ids {
        let node = arena.node(id);
        match &node.kind {
            SelectorKind::Nesting { suffix } if suffix.is_empty() => {
                nodes.extend_from_slice(parent);
            }
            SelectorKind::Nesting { suffix } => {
                let Some((last, init)) = parent.split_last() else {
                    return Ok(None);
                };
                let kind = match &last.kind {
                    SelectorKind::Class { value } => {
                        let mut value = value.clone();
                        value.push_str(suffix);
                        SelectorKind::Class { value }
                    }
                    SelectorKind::Type { tag } => {
                        let mut tag = tag.clone();
                        tag.push_str(suffix);
                        SelectorKind::Type { tag }
                    }
                    other => {
                        tracing::debug!(
                            parent = ?other,
                            suffix = suffix.as_str(),
                            "suffix nesting on a component without a name"
                        );
                        return Ok(None);
                    }
                };
                nodes.extend_from_slice(init);
                nodes.push(ResolvedNode {
                    kind,
                    origin: Origin::Node(id),
                    span: node.span,
                    parent: complex,
                    literal: false,
                });
            }
            _ => nodes.push(copy_node(arena, id)),
        }
    }
    Ok(Some(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vkcn_armature::parse_style;
    use vkcn_relief::{Span, StyleLang};

    fn resolve(source: &str) -> (StyleSheet, SheetSelectors) {
        let sheet = parse_style(source, Span::from_range(0, source.len()), StyleLang::Scss).unwrap();
        let selectors = resolve_sheet(&sheet).unwrap();
        (sheet, selectors)
    }

    fn paths(source: &str) -> Vec<String> {
        let (_, selectors) = resolve(source);
        selectors.iter().map(|s| s.to_selector_string()).collect()
    }

    #[test]
    fn test_nesting_forms() {
        assert_eq!(
            paths(".a { &__b {} &.c {} .d {} > e {} }"),
            vec![".a", ".a__b", ".a.c", ".a .d", ".a > e"]
        );
    }

    #[test]
    fn test_selector_lists_expand() {
        assert_eq!(
            paths(".a, .b { &-x, & .y {} }"),
            vec![".a", ".b", ".a-x", ".a .y", ".b-x", ".b .y"]
        );
    }

    #[test]
    fn test_nesting_in_the_middle() {
        assert_eq!(paths(".a { .b & {} }"), vec![".a", ".b .a"]);
    }

    #[test]
    fn test_at_rules() {
        assert_eq!(
            paths(".a { @media (min-width: 1px) { &.b {} } }"),
            vec![".a", ".a.b"]
        );
        assert_eq!(paths("@keyframes spin { from {} to {} }"), Vec::<String>::new());
        assert_eq!(paths("@font-face { .x {} }"), Vec::<String>::new());
    }

    #[test]
    fn test_undefined_parent_propagates() {
        let (sheet, selectors) = resolve(".a:not( { .b {} }");
        assert!(selectors.is_empty());
        assert_eq!(sheet.rules.len(), 2);
        assert!(selectors.rule(RuleId::from_index(1)).is_none());
    }

    #[test]
    fn test_implicit_descendant_points_at_nested_selector() {
        let source = ".a { .d {} }";
        let (_, selectors) = resolve(source);
        let nested = &selectors.rule(RuleId::from_index(1)).unwrap()[0];
        let combinator = &nested.nodes[1];
        assert!(matches!(combinator.origin, Origin::Implicit(_)));
        assert_eq!(combinator.span.text(source), ".d");
        assert_eq!(combinator.parent, nested.nodes[2].parent);
    }

    #[test]
    fn test_suffix_concatenation_origin() {
        let source = ".a { &__b {} }";
        let (_, selectors) = resolve(source);
        let nested = &selectors.rule(RuleId::from_index(1)).unwrap()[0];
        assert_eq!(nested.nodes.len(), 1);
        assert_eq!(nested.nodes[0].class_value(), Some("a__b"));
        assert_eq!(nested.nodes[0].span.text(source), "&__b");
        assert!(!nested.nodes[0].literal);
    }

    #[test]
    fn test_unresolvable_suffix_is_dropped() {
        assert_eq!(paths(".a:hover { &-x {} }"), vec![".a:hover"]);
    }

    #[test]
    fn test_root_nesting() {
        let (_, selectors) = resolve("&-x {}");
        let root = selectors.iter().next().unwrap();
        assert_eq!(root.nodes[0].class_value(), Some("&-x"));
        assert!(!root.nodes[0].literal);
    }
}
