//! Whole-component scenarios through `Linter::lint_sfc`.

use vkcn_patina::{LintConfig, LintDiagnostic, Linter, MessageId};

fn lint(source: &str, filename: &str) -> Vec<LintDiagnostic> {
    Linter::new().lint_sfc(source, filename).unwrap().diagnostics
}

fn lint_config(source: &str, filename: &str, config: &str) -> Vec<LintDiagnostic> {
    let config = LintConfig::from_json(config).unwrap();
    Linter::from_config(&config)
        .unwrap()
        .lint_sfc(source, filename)
        .unwrap()
        .diagnostics
}

fn of_rule<'d>(diagnostics: &'d [LintDiagnostic], rule: &str) -> Vec<&'d LintDiagnostic> {
    diagnostics.iter().filter(|d| d.rule_name == rule).collect()
}

fn text<'s>(source: &'s str, diagnostic: &LintDiagnostic) -> &'s str {
    &source[diagnostic.start as usize..diagnostic.end as usize]
}

const FLAT: &str = r#"{ "rules": { "vkcn/no-undefined-class-names": ["error", { "mode": "flat" }] } }"#;

#[test]
fn prefix_comment_overrides_filename() {
    let source = "<style>\n/* vkcn-prefix foo-baz */\n.foo-baz--bar {}\n</style>";
    assert!(lint(source, "FooComponent.vue").is_empty());

    let without = "<style>\n.foo-baz--bar {}\n</style>";
    let diagnostics = lint(without, "FooComponent.vue");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message_id, MessageId::ClassTopNaming);
    assert_eq!(
        diagnostics[0].suggestions[0].data.get("selector"),
        Some(".foo-component--bar")
    );
}

#[test]
fn undefined_static_class_suggests_declared() {
    let source = r#"<template><div class="bar"></div></template><style>.foo {}</style>"#;
    let diagnostics = lint_config(source, "Foo.vue", FLAT);
    let undefined = of_rule(&diagnostics, "vkcn/no-undefined-class-names");

    assert_eq!(undefined.len(), 1);
    assert_eq!(undefined[0].message_id, MessageId::Undefined);
    assert_eq!(text(source, undefined[0]), "bar");
    let replacements: Vec<_> = undefined[0]
        .suggestions
        .iter()
        .map(|s| (s.message_id, s.edit.new_text.as_str()))
        .collect();
    assert_eq!(
        replacements,
        vec![
            (MessageId::RemoveUndefined, ""),
            (MessageId::UseDefined, "foo"),
        ]
    );
}

#[test]
fn whitespace_separated_literal_reports_each_class() {
    let source = "<template><div :class=\"'a\tb'\"></div></template><style>.foo {}</style>";
    let diagnostics = lint_config(source, "Foo.vue", FLAT);
    let undefined: Vec<_> = of_rule(&diagnostics, "vkcn/no-undefined-class-names")
        .into_iter()
        .map(|d| (d.message_id, text(source, d)))
        .collect();

    assert_eq!(
        undefined,
        vec![(MessageId::Undefined, "a"), (MessageId::Undefined, "b")]
    );
}

#[test]
fn bare_identifier_is_dynamic_unless_prop() {
    let source = r#"<template><div :class="some"></div></template>"#;
    let diagnostics = lint(source, "Foo.vue");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message_id, MessageId::Dynamic);
    assert_eq!(text(source, &diagnostics[0]), "some");

    let with_props = r#"<script setup>
defineProps(['some'])
</script>
<template><div :class="some"></div></template>"#;
    let config = r#"{ "rules": { "vkcn/no-dynamic-class-names": ["error", { "allowProps": true }] } }"#;
    assert!(lint_config(with_props, "Foo.vue", config).is_empty());

    // The prop has to exist
    let other_prop = with_props.replace("'some'", "'other'");
    assert_eq!(lint_config(&other_prop, "Foo.vue", config).len(), 1);
}

#[test]
fn descendant_universal_selector() {
    let source = "<style>\n.foo-component--bar * {}\n</style>";
    let diagnostics = lint(source, "FooComponent.vue");
    let ids: Vec<_> = diagnostics.iter().map(|d| d.message_id).collect();
    assert_eq!(
        ids,
        vec![MessageId::CombinatorTypeAllowed, MessageId::UniversalInvalidParent]
    );
    assert_eq!(text(source, &diagnostics[1]), "*");
}

#[test]
fn template_literal_static_segments() {
    let source =
        "<template><div :class=\"`foo bar ${any} baz`\"></div></template><style>.foo {}</style>";
    let diagnostics = lint_config(source, "Foo.vue", FLAT);

    assert!(of_rule(&diagnostics, "vkcn/no-dynamic-class-names").is_empty());
    let undefined: Vec<_> = of_rule(&diagnostics, "vkcn/no-undefined-class-names")
        .into_iter()
        .map(|d| (d.message_id, text(source, d)))
        .collect();
    assert_eq!(
        undefined,
        vec![(MessageId::Undefined, "bar"), (MessageId::Undefined, "baz")]
    );
}

#[test]
fn element_vocabulary() {
    let style = "<style lang=\"scss\">\n.foo--bar {\n  &.a {}\n  &.b {}\n  > span {}\n}\n</style>";
    let valid = format!(
        "<template>\n<div class=\"foo--bar a b\"><span></span></div>\n</template>\n{style}"
    );
    assert!(lint(&valid, "Foo.vue").is_empty());

    let invalid = format!("<template>\n<div class=\"foo--bar c\"></div>\n</template>\n{style}");
    let diagnostics = lint(&invalid, "Foo.vue");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message_id, MessageId::UndefinedModifier);
    let names: Vec<_> = diagnostics[0]
        .suggestions
        .iter()
        .filter_map(|s| s.data.get("className"))
        .collect();
    // Removal first, then declared modifiers of `foo--bar` in declaration order
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn suggestions_are_stable() {
    let source = r#"<template><div class="ab"></div></template>
<style>.abc {} .xab {} .b {} .a {} .zz {}</style>"#;
    let first = lint_config(source, "Foo.vue", FLAT);
    let second = lint_config(source, "Foo.vue", FLAT);
    let names = |diagnostics: &[LintDiagnostic]| -> Vec<String> {
        of_rule(diagnostics, "vkcn/no-undefined-class-names")[0]
            .suggestions
            .iter()
            .skip(1)
            .filter_map(|s| s.data.get("className").map(str::to_string))
            .collect()
    };
    assert_eq!(names(&first), vec!["abc", "xab", "b", "a", "zz"]);
    assert_eq!(names(&first), names(&second));
}

#[test]
fn multiple_style_blocks_share_registry() {
    let source = r#"<template><div class="foo--a on"></div></template>
<style>.foo--a {}</style>
<style lang="scss">.foo--a { &.on {} }</style>"#;
    assert!(lint(source, "Foo.vue").is_empty());
}

#[test]
fn unsupported_style_blocks_are_skipped() {
    let source = r#"<style lang="stylus">
.Whatever
  color red
</style>
<style src="./external.css"></style>"#;
    assert!(lint(source, "Foo.vue").is_empty());
}

#[test]
fn keyframes_are_not_selectors() {
    let source = "<style>\n@keyframes spin { from {} to {} }\n@media (min-width: 1px) { .foo--a {} }\n</style>";
    assert!(lint(source, "Foo.vue").is_empty());
}
