//! Selector list parser.
//!
//! Splits a rule prelude into complex selectors on top-level commas and
//! records each component in the sheet's [`SelectorArena`]. Whitespace
//! between two compounds becomes an explicit descendant combinator whose span
//! is the whitespace run, so it can be reported like any other component.

use crate::error::SelectorParseError;
use vkcn_carton::CompactString;
use vkcn_relief::{Combinator, ComplexId, RuleId, SelectorArena, SelectorKind, Span};

/// Parse the selector list spanning `prelude` in `source`.
pub fn parse_selector_list(
    source: &str,
    prelude: Span,
    rule: RuleId,
    arena: &mut SelectorArena,
) -> Result<Vec<ComplexId>, SelectorParseError> {
    let mut parser = SelectorParser {
        source,
        bytes: source.as_bytes(),
        pos: prelude.start as usize,
        end: (prelude.end as usize).min(source.len()),
        rule,
        arena,
    };

    let mut complexes = Vec::new();
    loop {
        complexes.push(parser.parse_complex()?);
        if parser.pos >= parser.end {
            break;
        }
        // parse_complex stops on `,` only
        parser.pos += 1;
    }
    Ok(complexes)
}

#[inline(always)]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

#[inline(always)]
fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80
}

#[inline(always)]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'-' || b == b'_' || b == b'\\' || b >= 0x80
}

struct SelectorParser<'s, 'a> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    end: usize,
    rule: RuleId,
    arena: &'a mut SelectorArena,
}

impl<'s> SelectorParser<'s, '_> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        (self.pos < self.end).then(|| self.bytes[self.pos])
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        let at = self.pos + offset;
        (at < self.end).then(|| self.bytes[at])
    }

    /// Skip whitespace and comments; returns the skipped span, if any.
    fn skip_trivia(&mut self) -> Option<Span> {
        let start = self.pos;
        loop {
            match self.peek() {
                Some(b) if is_whitespace(b) => self.pos += 1,
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    let body = &self.bytes[self.pos + 2..self.end];
                    self.pos = memchr::memmem::find(body, b"*/")
                        .map_or(self.end, |close| self.pos + 2 + close + 2);
                }
                _ => break,
            }
        }
        (self.pos > start).then(|| Span::from_range(start, self.pos))
    }

    /// Consume an identifier, including escapes and `#{...}` interpolation.
    fn consume_ident(&mut self) -> &'s str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'\\' {
                self.pos = (self.pos + 2).min(self.end);
            } else if b == b'#' && self.peek_at(1) == Some(b'{') {
                self.pos = memchr::memchr(b'}', &self.bytes[self.pos..self.end])
                    .map_or(self.end, |close| self.pos + close + 1);
            } else if is_ident_char(b) {
                self.pos += 1;
            } else {
                break;
            }
        }
        &self.source[start..self.pos]
    }

    /// Consume a balanced `open ... close` group, honouring strings.
    fn consume_group(&mut self, open: u8, close: u8) -> Result<Span, SelectorParseError> {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(b) = self.peek() {
            match b {
                b'"' | b'\'' => {
                    let body = &self.bytes[self.pos + 1..self.end];
                    match memchr::memchr(b, body) {
                        Some(q) => self.pos += q + 2,
                        None => {
                            return Err(SelectorParseError::Unclosed {
                                delimiter: b as char,
                                offset: self.pos as u32,
                            })
                        }
                    }
                    continue;
                }
                _ if b == open => depth += 1,
                _ if b == close => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(Span::from_range(start, self.pos));
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(SelectorParseError::Unclosed {
            delimiter: open as char,
            offset: start as u32,
        })
    }

    fn push(&mut self, complex: ComplexId, kind: SelectorKind, start: usize) {
        self.arena
            .push_node(complex, kind, Span::from_range(start, self.pos));
    }

    fn parse_complex(&mut self) -> Result<ComplexId, SelectorParseError> {
        self.skip_trivia();
        let start = self.pos;
        let complex = self.arena.push_complex(self.rule, Span::from_range(start, start));

        // Whether the last pushed node was a combinator (or nothing yet)
        let mut after_combinator = true;
        let mut has_nodes = false;
        let mut last_end = start;

        loop {
            let trivia = self.skip_trivia();
            let Some(b) = self.peek() else {
                break;
            };
            if b == b',' {
                break;
            }

            if matches!(b, b'>' | b'+' | b'~') {
                if has_nodes && after_combinator {
                    return Err(SelectorParseError::Unexpected {
                        found: b as char,
                        offset: self.pos as u32,
                    });
                }
                let combinator = match b {
                    b'>' => Combinator::Child,
                    b'+' => Combinator::NextSibling,
                    _ => Combinator::SubsequentSibling,
                };
                let at = self.pos;
                self.pos += 1;
                self.push(complex, SelectorKind::Combinator(combinator), at);
                after_combinator = true;
                has_nodes = true;
                last_end = self.pos;
                continue;
            }

            if let Some(ws) = trivia {
                if has_nodes && !after_combinator {
                    self.arena.push_node(
                        complex,
                        SelectorKind::Combinator(Combinator::Descendant),
                        ws,
                    );
                }
            }

            let at = self.pos;
            let kind = match b {
                b'.' => {
                    self.pos += 1;
                    let value = self.consume_ident();
                    if value.is_empty() {
                        return Err(SelectorParseError::Unexpected {
                            found: '.',
                            offset: at as u32,
                        });
                    }
                    SelectorKind::Class {
                        value: CompactString::new(value),
                    }
                }
                b'#' if self.peek_at(1) != Some(b'{') => {
                    self.pos += 1;
                    let value = self.consume_ident();
                    if value.is_empty() {
                        return Err(SelectorParseError::Unexpected {
                            found: '#',
                            offset: at as u32,
                        });
                    }
                    SelectorKind::Id {
                        value: CompactString::new(value),
                    }
                }
                b'*' => {
                    self.pos += 1;
                    SelectorKind::Universal
                }
                b'&' => {
                    self.pos += 1;
                    let suffix = self.consume_ident();
                    SelectorKind::Nesting {
                        suffix: CompactString::new(suffix),
                    }
                }
                b'[' => {
                    let group = self.consume_group(b'[', b']')?;
                    SelectorKind::Attribute {
                        raw: CompactString::new(
                            &self.source[group.start as usize + 1..group.end as usize - 1],
                        ),
                    }
                }
                b':' => {
                    self.pos += 1;
                    if self.peek() == Some(b':') {
                        self.pos += 1;
                    }
                    let name_start = self.pos;
                    self.consume_ident();
                    if self.pos == name_start {
                        return Err(SelectorParseError::Unexpected {
                            found: ':',
                            offset: at as u32,
                        });
                    }
                    let name = CompactString::new(&self.source[at..self.pos]);
                    let argument = if self.peek() == Some(b'(') {
                        let group = self.consume_group(b'(', b')')?;
                        Some(CompactString::new(
                            &self.source[group.start as usize + 1..group.end as usize - 1],
                        ))
                    } else {
                        None
                    };
                    SelectorKind::Pseudo { name, argument }
                }
                b if is_ident_start(b) || b == b'#' => {
                    let tag = self.consume_ident();
                    SelectorKind::Type {
                        tag: CompactString::new(tag),
                    }
                }
                other => {
                    return Err(SelectorParseError::Unexpected {
                        found: other as char,
                        offset: at as u32,
                    })
                }
            };
            self.push(complex, kind, at);
            after_combinator = false;
            has_nodes = true;
            last_end = self.pos;
        }

        if !has_nodes {
            return Err(SelectorParseError::Empty {
                offset: start as u32,
            });
        }
        if after_combinator {
            return Err(SelectorParseError::DanglingCombinator {
                offset: last_end as u32,
            });
        }
        self.arena
            .set_complex_span(complex, Span::from_range(start, last_end));
        Ok(complex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (SelectorArena, Result<Vec<ComplexId>, SelectorParseError>) {
        let mut arena = SelectorArena::new();
        let result = parse_selector_list(
            source,
            Span::from_range(0, source.len()),
            RuleId::from_index(0),
            &mut arena,
        );
        (arena, result)
    }

    fn kinds(arena: &SelectorArena, complex: ComplexId) -> Vec<SelectorKind> {
        arena
            .complex(complex)
            .nodes
            .iter()
            .map(|&id| arena.node(id).kind.clone())
            .collect()
    }

    #[test]
    fn test_descendant_whitespace_becomes_combinator() {
        let source = ".foo-component--bar * ";
        let (arena, result) = parse(source);
        let complexes = result.unwrap();
        assert_eq!(
            kinds(&arena, complexes[0]),
            vec![
                SelectorKind::Class {
                    value: "foo-component--bar".into()
                },
                SelectorKind::Combinator(Combinator::Descendant),
                SelectorKind::Universal,
            ]
        );
        let nodes = &arena.complex(complexes[0]).nodes;
        assert_eq!(arena.node(nodes[0]).span, Span::new(0, 19));
        assert_eq!(arena.node(nodes[1]).span, Span::new(19, 20));
        assert_eq!(arena.node(nodes[2]).span, Span::new(20, 21));
    }

    #[test]
    fn test_explicit_combinator_swallows_whitespace() {
        let (arena, result) = parse(".a > div");
        let complexes = result.unwrap();
        assert_eq!(
            kinds(&arena, complexes[0]),
            vec![
                SelectorKind::Class { value: "a".into() },
                SelectorKind::Combinator(Combinator::Child),
                SelectorKind::Type { tag: "div".into() },
            ]
        );
    }

    #[test]
    fn test_list_and_nesting() {
        let (arena, result) = parse("&__baz, &.bam:not(.x, .y)");
        let complexes = result.unwrap();
        assert_eq!(complexes.len(), 2);
        assert_eq!(
            kinds(&arena, complexes[0]),
            vec![SelectorKind::Nesting {
                suffix: "__baz".into()
            }]
        );
        assert_eq!(
            kinds(&arena, complexes[1]),
            vec![
                SelectorKind::Nesting { suffix: "".into() },
                SelectorKind::Class { value: "bam".into() },
                SelectorKind::Pseudo {
                    name: ":not".into(),
                    argument: Some(".x, .y".into()),
                },
            ]
        );
    }

    #[test]
    fn test_attribute_and_pseudo_element() {
        let (arena, result) = parse(r#".a[src="b]"]::before"#);
        let complexes = result.unwrap();
        assert_eq!(
            kinds(&arena, complexes[0]),
            vec![
                SelectorKind::Class { value: "a".into() },
                SelectorKind::Attribute {
                    raw: r#"src="b]""#.into()
                },
                SelectorKind::Pseudo {
                    name: "::before".into(),
                    argument: None,
                },
            ]
        );
    }

    #[test]
    fn test_leading_combinator() {
        let (arena, result) = parse("> div");
        let complexes = result.unwrap();
        assert_eq!(
            kinds(&arena, complexes[0]),
            vec![
                SelectorKind::Combinator(Combinator::Child),
                SelectorKind::Type { tag: "div".into() },
            ]
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse(".a >").1,
            Err(SelectorParseError::DanglingCombinator { .. })
        ));
        assert!(matches!(parse(".a, ").1, Err(SelectorParseError::Empty { .. })));
        assert!(matches!(
            parse("50%").1,
            Err(SelectorParseError::Unexpected { found: '5', .. })
        ));
        assert!(matches!(
            parse(".a:not(.b").1,
            Err(SelectorParseError::Unclosed { delimiter: '(', .. })
        ));
    }
}
