//! Style block rule parser.
//!
//! A tolerant block scanner for CSS, SCSS and Less. It tracks braces,
//! strings, comments and `#{}` interpolation; declarations are skipped. Each
//! `{` opens a rule whose prelude is the text since the previous statement
//! boundary. Selector preludes are parsed immediately; a prelude that does not
//! parse keeps `selectors: None` so its subtree resolves to nothing.

use crate::error::StyleParseError;
use crate::selector::parse_selector_list;
use memchr::memmem;
use vkcn_carton::CompactString;
use vkcn_relief::{RuleId, RuleKind, Span, StyleComment, StyleLang, StyleSheet};

/// Parse the style block spanning `content` in `source`.
pub fn parse_style(
    source: &str,
    content: Span,
    lang: StyleLang,
) -> Result<StyleSheet, StyleParseError> {
    let line_comments = lang.has_line_comments();
    let mut sheet = StyleSheet::new(lang, content);

    let end = (content.end as usize).min(source.len());
    let bytes = source.as_bytes();
    let mut pos = content.start as usize;

    let mut stack: Vec<(RuleId, usize)> = Vec::new();
    let mut prelude_start: Option<usize> = None;
    let mut pending_comments: Vec<StyleComment> = Vec::new();
    let mut paren_depth = 0usize;

    while pos < end {
        let b = bytes[pos];
        match b {
            b'/' if bytes.get(pos + 1) == Some(&b'*') && pos + 1 < end => {
                let body_start = pos + 2;
                let Some(close) = memmem::find(&bytes[body_start..end], b"*/") else {
                    return Err(StyleParseError::UnclosedComment { offset: pos as u32 });
                };
                let comment = StyleComment {
                    text: CompactString::new(source[body_start..body_start + close].trim()),
                    span: Span::from_range(pos, body_start + close + 2),
                };
                pos = body_start + close + 2;
                if prelude_start.is_none() {
                    pending_comments.push(comment.clone());
                }
                sheet.comments.push(comment);
                continue;
            }
            b'/' if line_comments
                && paren_depth == 0
                && bytes.get(pos + 1) == Some(&b'/')
                && pos + 1 < end =>
            {
                let body_start = pos + 2;
                let line_end = memchr::memchr(b'\n', &bytes[body_start..end])
                    .map_or(end, |nl| body_start + nl);
                let comment = StyleComment {
                    text: CompactString::new(source[body_start..line_end].trim()),
                    span: Span::from_range(pos, line_end),
                };
                pos = line_end;
                if prelude_start.is_none() {
                    pending_comments.push(comment.clone());
                }
                sheet.comments.push(comment);
                continue;
            }
            b'"' | b'\'' => {
                prelude_start.get_or_insert(pos);
                pos = skip_string(bytes, pos, end);
                continue;
            }
            b'#' if bytes.get(pos + 1) == Some(&b'{') && pos + 1 < end => {
                prelude_start.get_or_insert(pos);
                pos = memchr::memchr(b'}', &bytes[pos..end]).map_or(end, |close| pos + close + 1);
                continue;
            }
            b'(' => {
                prelude_start.get_or_insert(pos);
                paren_depth += 1;
            }
            b')' => {
                paren_depth = paren_depth.saturating_sub(1);
            }
            b'{' => {
                let start = prelude_start.take().unwrap_or(pos);
                let prelude = trim_span(source, start, pos);
                let parent = stack.last().map(|&(id, _)| id);
                let leading = std::mem::take(&mut pending_comments);
                let id = open_rule(source, &mut sheet, prelude, parent, leading);
                stack.push((id, start));
                paren_depth = 0;
            }
            b'}' => {
                let Some((id, _)) = stack.pop() else {
                    return Err(StyleParseError::UnexpectedCloseBrace { offset: pos as u32 });
                };
                sheet.rule_mut(id).span.end = pos as u32 + 1;
                prelude_start = None;
                pending_comments.clear();
                paren_depth = 0;
            }
            b';' if paren_depth == 0 => {
                prelude_start = None;
                pending_comments.clear();
            }
            b if b.is_ascii_whitespace() => {}
            _ => {
                prelude_start.get_or_insert(pos);
            }
        }
        pos += 1;
    }

    if let Some(&(_, start)) = stack.last() {
        return Err(StyleParseError::UnclosedBlock {
            offset: start as u32,
        });
    }

    tracing::debug!(
        rules = sheet.rules.len(),
        comments = sheet.comments.len(),
        "parsed style block"
    );
    Ok(sheet)
}

fn skip_string(bytes: &[u8], start: usize, end: usize) -> usize {
    let quote = bytes[start];
    let mut pos = start + 1;
    while pos < end {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'\n' => return pos,
            b if b == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    end
}

fn trim_span(source: &str, start: usize, end: usize) -> Span {
    let text = &source[start..end];
    let trimmed_start = start + (text.len() - text.trim_start().len());
    let trimmed_end = end - (text.len() - text.trim_end().len());
    Span::from_range(trimmed_start, trimmed_end.max(trimmed_start))
}

fn open_rule(
    source: &str,
    sheet: &mut StyleSheet,
    prelude: Span,
    parent: Option<RuleId>,
    leading_comments: Vec<StyleComment>,
) -> RuleId {
    let text = prelude.text(source);
    let span = Span::new(prelude.start, prelude.end);

    if let Some(at_rule) = text.strip_prefix('@') {
        let name_len = at_rule
            .find(|c: char| c.is_whitespace() || c == '(')
            .unwrap_or(at_rule.len());
        let kind = RuleKind::AtRule {
            name: CompactString::new(at_rule[..name_len].to_ascii_lowercase()),
            params: CompactString::new(at_rule[name_len..].trim()),
        };
        return sheet.push_rule(kind, parent, leading_comments, span);
    }

    let id = sheet.push_rule(
        RuleKind::Style {
            prelude,
            selectors: None,
        },
        parent,
        leading_comments,
        span,
    );
    match parse_selector_list(source, prelude, id, &mut sheet.selectors) {
        Ok(complexes) => {
            if let RuleKind::Style { selectors, .. } = &mut sheet.rule_mut(id).kind {
                *selectors = Some(complexes);
            }
        }
        Err(error) => {
            tracing::debug!(%error, selector = text, "selector skipped");
        }
    }
    id
}
