//! Template start-tag scanner.
//!
//! Class analysis needs start tags and their attributes only, so this is a
//! flat scan rather than a tree builder: text is skipped (including `{{ }}`
//! interpolations, which may contain `<`), comments are collected, closing
//! tags are ignored.

use memchr::{memchr, memchr2, memmem};
use vkcn_carton::CompactString;
use vkcn_relief::{
    Attribute, AttributeKey, AttributeValue, Span, Tag, Template, TemplateComment,
};

/// Scan the template block spanning `content` in `source`.
///
/// Offsets in the result are absolute positions in `source`.
pub fn scan_template(source: &str, content: Span) -> Template {
    let end = (content.end as usize).min(source.len());
    let bytes = &source.as_bytes()[..end];
    let mut pos = content.start as usize;
    let mut template = Template::default();

    while pos < end {
        let Some(next) = memchr2(b'<', b'{', &bytes[pos..]) else {
            break;
        };
        pos += next;

        if bytes[pos] == b'{' {
            pos = if bytes[pos..].starts_with(b"{{") {
                memmem::find(&bytes[pos + 2..], b"}}").map_or(end, |close| pos + 2 + close + 2)
            } else {
                pos + 1
            };
            continue;
        }

        let rest = &bytes[pos..];
        if rest.starts_with(b"<!--") {
            let body_start = pos + 4;
            let (body_end, comment_end) = match memmem::find(&bytes[body_start..], b"-->") {
                Some(close) => (body_start + close, body_start + close + 3),
                None => (end, end),
            };
            template.comments.push(TemplateComment {
                text: CompactString::new(source[body_start..body_end].trim()),
                span: Span::from_range(pos, comment_end),
            });
            pos = comment_end;
        } else if rest.starts_with(b"</") || rest.starts_with(b"<!") || rest.starts_with(b"<?") {
            pos = memchr(b'>', &bytes[pos..]).map_or(end, |close| pos + close + 1);
        } else if rest.len() > 1 && rest[1].is_ascii_alphabetic() {
            let (tag, tag_end) = scan_start_tag(source, bytes, pos);
            template.tags.push(tag);
            pos = tag_end;
        } else {
            pos += 1;
        }
    }

    tracing::trace!(
        tags = template.tags.len(),
        comments = template.comments.len(),
        "scanned template"
    );
    template
}

#[inline(always)]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

/// Scan a start tag at `start` (pointing to `<`). Returns the tag and the
/// offset just past it.
fn scan_start_tag(source: &str, bytes: &[u8], start: usize) -> (Tag, usize) {
    let len = bytes.len();
    let mut pos = start + 1;

    let name_start = pos;
    while pos < len && !is_whitespace(bytes[pos]) && !matches!(bytes[pos], b'>' | b'/') {
        pos += 1;
    }
    let name = CompactString::new(&source[name_start..pos]);

    let mut attributes = Vec::new();
    loop {
        while pos < len && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= len {
            break;
        }
        match bytes[pos] {
            b'>' => {
                pos += 1;
                break;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'>') => {
                pos += 2;
                break;
            }
            b'/' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        let (attribute, attr_end) = scan_attribute(source, bytes, pos);
        attributes.push(attribute);
        pos = attr_end;
    }

    let tag = Tag {
        name,
        span: Span::from_range(start, pos),
        attributes,
    };
    (tag, pos)
}

fn scan_attribute(source: &str, bytes: &[u8], start: usize) -> (Attribute, usize) {
    let len = bytes.len();
    let mut pos = start;

    // `[` opens a dynamic argument which may contain anything but `]`
    while pos < len {
        match bytes[pos] {
            b'[' => pos = memchr(b']', &bytes[pos..]).map_or(len, |close| pos + close + 1),
            b'=' | b'>' => break,
            b'/' if bytes.get(pos + 1) == Some(&b'>') => break,
            b if is_whitespace(b) => break,
            _ => pos += 1,
        }
    }
    let key_span = Span::from_range(start, pos);
    let key = classify_key(&source[start..pos]);

    let mut lookahead = pos;
    while lookahead < len && is_whitespace(bytes[lookahead]) {
        lookahead += 1;
    }

    let mut value = None;
    if lookahead < len && bytes[lookahead] == b'=' {
        pos = lookahead + 1;
        while pos < len && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos < len && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
            let quote = bytes[pos];
            let value_start = pos + 1;
            let value_end = memchr(quote, &bytes[value_start..]).map_or(len, |q| value_start + q);
            value = Some(AttributeValue {
                text: source[value_start..value_end].to_string(),
                span: Span::from_range(value_start, value_end),
            });
            pos = (value_end + 1).min(len);
        } else {
            let value_start = pos;
            while pos < len && !is_whitespace(bytes[pos]) && bytes[pos] != b'>' {
                pos += 1;
            }
            value = Some(AttributeValue {
                text: source[value_start..pos].to_string(),
                span: Span::from_range(value_start, pos),
            });
        }
    }

    let attribute = Attribute {
        key,
        key_span,
        value,
        span: Span::from_range(start, pos),
    };
    (attribute, pos)
}

/// Strip `.modifier` suffixes from a directive argument.
fn strip_modifiers(argument: &str) -> &str {
    argument.split('.').next().unwrap_or(argument)
}

fn static_argument(argument: &str) -> Option<CompactString> {
    if argument.starts_with('[') || argument.is_empty() {
        None
    } else {
        Some(CompactString::new(strip_modifiers(argument)))
    }
}

fn classify_key(raw: &str) -> AttributeKey {
    if let Some(argument) = raw.strip_prefix(':') {
        return AttributeKey::Bind {
            argument: static_argument(argument),
        };
    }
    if let Some(argument) = raw.strip_prefix('.') {
        return AttributeKey::Bind {
            argument: static_argument(argument),
        };
    }
    if let Some(argument) = raw.strip_prefix('@') {
        return AttributeKey::Directive {
            name: CompactString::new("on"),
            argument: static_argument(argument),
        };
    }
    if let Some(argument) = raw.strip_prefix('#') {
        return AttributeKey::Directive {
            name: CompactString::new("slot"),
            argument: static_argument(argument),
        };
    }
    if let Some(directive) = raw.strip_prefix("v-") {
        let (name, argument) = match directive.split_once(':') {
            Some((name, argument)) => (name, static_argument(argument)),
            None => (strip_modifiers(directive), None),
        };
        if name == "bind" {
            return AttributeKey::Bind { argument };
        }
        return AttributeKey::Directive {
            name: CompactString::new(name),
            argument,
        };
    }
    AttributeKey::Static(CompactString::new(raw))
}
