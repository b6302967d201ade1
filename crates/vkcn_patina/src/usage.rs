//! Replacement suggestions for undefined class names.

use crate::diagnostic::{Suggestion, TextEdit};
use crate::extract::{ClassUsage, UsageKind};
use crate::message::{MessageData, MessageId};
use vkcn_carton::distance::levenshtein;

/// Maximum number of `useDefined` suggestions.
pub const MAX_SUGGESTIONS: usize = 7;

/// Order declared names by how close they are to `query`.
///
/// Names containing `query`, or contained in it, come first; the rest follow
/// by ascending edit distance. Ties keep declaration order. Duplicates are
/// dropped and the result is cut to [`MAX_SUGGESTIONS`].
pub fn rank_candidates<'c, I>(query: &str, candidates: I) -> Vec<&'c str>
where
    I: IntoIterator<Item = &'c str>,
{
    let mut ranked: Vec<(usize, &'c str)> = Vec::new();
    for candidate in candidates {
        if ranked.iter().any(|(_, c)| *c == candidate) {
            continue;
        }
        let score = if candidate.contains(query) || query.contains(candidate) {
            0
        } else {
            // Shifted so that containment always ranks first
            levenshtein(query, candidate) + 1
        };
        ranked.push((score, candidate));
    }
    ranked.sort_by_key(|(score, _)| *score);
    ranked
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate)
        .collect()
}

/// Text that replaces `usage` with `candidate`.
pub fn replacement_text(usage: &ClassUsage, candidate: &str) -> String {
    match usage.kind {
        UsageKind::Plain => candidate.to_string(),
        UsageKind::Quoted => format!("'{candidate}'"),
        UsageKind::Quotable { shorthand } => {
            let key = if candidate.contains('-') {
                format!("'{candidate}'")
            } else {
                candidate.to_string()
            };
            if shorthand {
                format!("{key}: {}", usage.name)
            } else {
                key
            }
        }
    }
}

/// Suggestions for an undefined usage: removal first, then the ranked
/// candidates.
pub fn usage_suggestions<'c, I>(usage: &ClassUsage, candidates: I) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'c str>,
{
    let data = MessageData::new().with("className", usage.name.clone());
    let mut suggestions = Vec::with_capacity(MAX_SUGGESTIONS + 1);
    suggestions.push(Suggestion::new(
        MessageId::RemoveUndefined,
        data,
        TextEdit::delete(usage.span.start, usage.span.end),
    ));
    suggestions.extend(
        rank_candidates(&usage.name, candidates)
            .into_iter()
            .map(|candidate| {
                Suggestion::new(
                    MessageId::UseDefined,
                    MessageData::new().with("className", candidate),
                    TextEdit::replace(
                        usage.span.start,
                        usage.span.end,
                        replacement_text(usage, candidate),
                    ),
                )
            }),
    );
    suggestions
}
