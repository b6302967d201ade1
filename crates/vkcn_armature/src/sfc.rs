//! SFC block splitting.
//!
//! Byte-level scan with `memchr`: only top-level blocks are recognised, block
//! contents are never copied, and nested `<template>` tags are depth-tracked.

use crate::error::SfcParseError;
use memchr::{memchr, memmem};
use vkcn_carton::{CompactString, FxHashMap};
use vkcn_relief::{SfcBlock, SfcDescriptor, SfcStyleBlock, Span, StyleLang};

const CLOSING_TEMPLATE: &[u8] = b"</template>";
const CLOSING_SCRIPT: &[u8] = b"</script>";
const CLOSING_STYLE: &[u8] = b"</style>";

const TAG_TEMPLATE: &[u8] = b"template";
const TAG_SCRIPT: &[u8] = b"script";
const TAG_STYLE: &[u8] = b"style";

/// A scanned top-level block.
struct RawBlock<'a> {
    tag_name: &'a [u8],
    tag_start: usize,
    attrs: FxHashMap<CompactString, CompactString>,
    content: Span,
    end: usize,
}

/// Split a component into its blocks.
pub fn parse_sfc(source: &str, filename: &str) -> Result<SfcDescriptor, SfcParseError> {
    let mut descriptor = SfcDescriptor {
        filename: filename.to_string(),
        ..Default::default()
    };

    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    while pos < len {
        let Some(next_lt) = memchr(b'<', &bytes[pos..]) else {
            break;
        };
        pos += next_lt;

        if bytes[pos..].starts_with(b"<!--") {
            pos = match memmem::find(&bytes[pos + 4..], b"-->") {
                Some(end) => pos + 4 + end + 3,
                None => len,
            };
            continue;
        }

        let Some(block) = parse_block(bytes, source, pos) else {
            pos += 1;
            continue;
        };
        let offset = block.tag_start as u32;
        pos = block.end;

        if tag_name_eq(block.tag_name, TAG_TEMPLATE) {
            if descriptor.template.is_some() {
                return Err(SfcParseError::DuplicateTemplate { offset });
            }
            descriptor.template = Some(SfcBlock {
                content: block.content,
                attrs: block.attrs,
            });
        } else if tag_name_eq(block.tag_name, TAG_SCRIPT) {
            let sfc_block = SfcBlock {
                content: block.content,
                attrs: block.attrs,
            };
            if sfc_block.has_attr("setup") {
                if descriptor.script_setup.is_some() {
                    return Err(SfcParseError::DuplicateScriptSetup { offset });
                }
                descriptor.script_setup = Some(sfc_block);
            } else {
                if descriptor.script.is_some() {
                    return Err(SfcParseError::DuplicateScript { offset });
                }
                descriptor.script = Some(sfc_block);
            }
        } else if tag_name_eq(block.tag_name, TAG_STYLE) {
            let sfc_block = SfcBlock {
                content: block.content,
                attrs: block.attrs,
            };
            descriptor.styles.push(SfcStyleBlock {
                lang: StyleLang::from_attr(sfc_block.attr("lang")),
                scoped: sfc_block.has_attr("scoped"),
                block: sfc_block,
            });
        }
        // Custom blocks are skipped
    }

    Ok(descriptor)
}

#[inline(always)]
fn tag_name_eq(name: &[u8], expected: &[u8]) -> bool {
    name.eq_ignore_ascii_case(expected)
}

#[inline(always)]
fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

#[inline(always)]
fn is_tag_name_char(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_')
}

#[inline(always)]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Parse a block starting at `<`.
fn parse_block<'a>(bytes: &'a [u8], source: &str, start: usize) -> Option<RawBlock<'a>> {
    let len = bytes.len();
    let mut pos = start + 1;

    let tag_start = pos;
    while pos < len && is_tag_name_char(bytes[pos]) {
        pos += 1;
    }
    if pos == tag_start {
        return None;
    }
    let tag_name = &bytes[tag_start..pos];

    let mut attrs = FxHashMap::default();
    while pos < len && bytes[pos] != b'>' {
        while pos < len && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= len || bytes[pos] == b'>' {
            break;
        }
        if bytes[pos] == b'/' {
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < len && !matches!(bytes[pos], b'=' | b'>' | b'/') && !is_whitespace(bytes[pos])
        {
            pos += 1;
        }
        let name = &source[name_start..pos];

        while pos < len && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        let value = if pos < len && bytes[pos] == b'=' {
            pos += 1;
            while pos < len && is_whitespace(bytes[pos]) {
                pos += 1;
            }
            if pos < len && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
                let quote = bytes[pos];
                pos += 1;
                let value_start = pos;
                pos = memchr(quote, &bytes[pos..]).map_or(len, |q| pos + q);
                let value = &source[value_start..pos];
                pos = (pos + 1).min(len);
                value
            } else {
                let value_start = pos;
                while pos < len && bytes[pos] != b'>' && !is_whitespace(bytes[pos]) {
                    pos += 1;
                }
                &source[value_start..pos]
            }
        } else {
            ""
        };

        if !name.is_empty() {
            attrs.insert(CompactString::new(name), CompactString::new(value));
        }
    }

    if pos >= len {
        return None;
    }

    let is_self_closing = bytes[pos - 1] == b'/';
    pos += 1;
    if is_self_closing {
        return Some(RawBlock {
            tag_name,
            tag_start: start,
            attrs,
            content: Span::from_range(pos, pos),
            end: pos,
        });
    }

    let content_start = pos;

    if tag_name_eq(tag_name, TAG_TEMPLATE) {
        let mut depth = 1;
        while pos < len {
            let lt = memchr(b'<', &bytes[pos..])?;
            pos += lt;

            if starts_with_ignore_case(&bytes[pos..], CLOSING_TEMPLATE) {
                depth -= 1;
                if depth == 0 {
                    return Some(RawBlock {
                        tag_name,
                        tag_start: start,
                        attrs,
                        content: Span::from_range(content_start, pos),
                        end: pos + CLOSING_TEMPLATE.len(),
                    });
                }
                pos += CLOSING_TEMPLATE.len();
                continue;
            }

            if starts_with_ignore_case(&bytes[pos + 1..], TAG_TEMPLATE) {
                let after = pos + 1 + TAG_TEMPLATE.len();
                if after < len && (is_whitespace(bytes[after]) || bytes[after] == b'>') {
                    let close = memchr(b'>', &bytes[after..]).map_or(len, |c| after + c);
                    if bytes[close - 1] != b'/' {
                        depth += 1;
                    }
                    pos = close;
                    continue;
                }
            }
            pos += 1;
        }
        return None;
    }

    let closing: Vec<u8> = if tag_name_eq(tag_name, TAG_SCRIPT) {
        CLOSING_SCRIPT.to_vec()
    } else if tag_name_eq(tag_name, TAG_STYLE) {
        CLOSING_STYLE.to_vec()
    } else {
        let mut closing = Vec::with_capacity(tag_name.len() + 3);
        closing.extend_from_slice(b"</");
        closing.extend_from_slice(tag_name);
        closing.push(b'>');
        closing
    };

    while pos < len {
        let lt = memchr(b'<', &bytes[pos..])?;
        pos += lt;
        if starts_with_ignore_case(&bytes[pos..], &closing) {
            return Some(RawBlock {
                tag_name,
                tag_start: start,
                attrs,
                content: Span::from_range(content_start, pos),
                end: pos + closing.len(),
            });
        }
        pos += 1;
    }

    None
}
