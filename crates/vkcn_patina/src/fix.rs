//! Applying automatic fixes.

use crate::diagnostic::{LintDiagnostic, TextEdit};

/// Apply every automatic fix of `diagnostics` to `source`.
///
/// Suggestions are never applied. Edits are applied in ascending offset
/// order; an edit overlapping one already taken is skipped, so a second run
/// picks it up.
pub fn apply_fixes(source: &str, diagnostics: &[LintDiagnostic]) -> String {
    let mut edits: Vec<&TextEdit> = diagnostics
        .iter()
        .filter_map(|d| d.fix.as_ref().map(|fix| &fix.edit))
        .filter(|edit| edit.start <= edit.end && edit.end as usize <= source.len())
        .collect();
    edits.sort_by_key(|edit| (edit.start, edit.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0usize;
    let mut applied = 0usize;
    for edit in edits {
        let (start, end) = (edit.start as usize, edit.end as usize);
        if start < cursor || !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            tracing::debug!(start, end, "skipping overlapping fix");
            continue;
        }
        output.push_str(&source[cursor..start]);
        output.push_str(&edit.new_text);
        cursor = end;
        applied += 1;
    }
    output.push_str(&source[cursor..]);

    tracing::trace!(applied, "applied fixes");
    output
}
