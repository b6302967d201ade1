//! Suppression comments.
//!
//! ```vue
//! <!-- vkcn-disable-next-line vkcn/no-dynamic-class-names -->
//! <div :class="some" />
//! <style>
//! /* vkcn-disable vkcn/no-convention-violation */
//! .legacy {}
//! /* vkcn-enable vkcn/no-convention-violation */
//! </style>
//! ```
//!
//! A directive without rule names applies to every rule. Suppression is
//! decided by line, over the whole file, after all rules ran.

use memchr::memmem;
use vkcn_carton::{CompactString, LineIndex, SmallVec};
use vkcn_relief::Span;

const MARKER: &[u8] = b"vkcn-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveKind {
    Disable,
    Enable,
    DisableLine,
    DisableNextLine,
}

impl DirectiveKind {
    /// Longest keywords first so `disable` does not shadow the others.
    const KEYWORDS: [(&'static str, Self); 4] = [
        ("disable-next-line", Self::DisableNextLine),
        ("disable-line", Self::DisableLine),
        ("disable", Self::Disable),
        ("enable", Self::Enable),
    ];
}

/// Rule names of a directive; empty means every rule.
type RuleNames = SmallVec<[CompactString; 1]>;

fn names_match(names: &RuleNames, rule_name: &str) -> bool {
    names.is_empty() || names.iter().any(|name| name == rule_name)
}

/// Rules disabled by comments, per line.
#[derive(Debug, Default)]
pub struct DisabledRules {
    /// `(line, rules, disabled)` in line order
    block: Vec<(u32, RuleNames, bool)>,
    /// Rules disabled for a single line
    lines: Vec<(u32, RuleNames)>,
}

impl DisabledRules {
    /// Collect directives from comment texts and their spans.
    pub fn from_comments<'c>(
        lines: &LineIndex,
        comments: impl IntoIterator<Item = (&'c str, Span)>,
    ) -> Self {
        let finder = memmem::Finder::new(MARKER);
        let mut result = Self::default();

        for (text, span) in comments {
            let Some(pos) = finder.find(text.as_bytes()) else {
                continue;
            };
            let Some((kind, names)) = parse_directive(&text[pos + MARKER.len()..]) else {
                continue;
            };
            let line = lines.line(span.start);
            match kind {
                DirectiveKind::Disable => result.block.push((line, names, true)),
                DirectiveKind::Enable => result.block.push((line, names, false)),
                DirectiveKind::DisableLine => result.lines.push((line, names)),
                DirectiveKind::DisableNextLine => {
                    result.lines.push((lines.line(span.end) + 1, names))
                }
            }
        }

        result.block.sort_by_key(|(line, _, _)| *line);
        result
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.block.is_empty() && self.lines.is_empty()
    }

    /// Check if a rule is disabled at a given 1-based line
    pub fn is_disabled(&self, rule_name: &str, line: u32) -> bool {
        if self
            .lines
            .iter()
            .any(|(l, names)| *l == line && names_match(names, rule_name))
        {
            return true;
        }

        let mut disabled = false;
        for (block_line, names, is_disable) in &self.block {
            if *block_line > line {
                break;
            }
            if names_match(names, rule_name) {
                disabled = *is_disable;
            }
        }
        disabled
    }
}

/// Parse `disable a, b -- reason` (text after the marker).
fn parse_directive(text: &str) -> Option<(DirectiveKind, RuleNames)> {
    let (kind, rest) = DirectiveKind::KEYWORDS.iter().find_map(|(keyword, kind)| {
        let rest = text.strip_prefix(keyword)?;
        (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some((*kind, rest))
    })?;

    let rules = rest.split("--").next().unwrap_or_default();
    let names = rules
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(CompactString::new)
        .collect();
    Some((kind, names))
}
