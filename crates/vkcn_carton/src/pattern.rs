//! Literal-or-regex name matching.
//!
//! Options and settings accept plain strings, matched exactly, and strings
//! written as `/pattern/flags`, compiled into regular expressions.

use regex::{Regex, RegexBuilder};

/// Error produced when a `/pattern/flags` string does not compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub source: String,
    pub message: String,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid pattern `{}`: {}", self.source, self.message)
    }
}

impl std::error::Error for PatternError {}

/// Split `/pattern/flags` into its parts, if the string has that shape.
fn split_regex_str(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (pattern, flags) = (&rest[..close], &rest[close + 1..]);
    if pattern.is_empty() {
        return None;
    }
    Some((pattern, flags))
}

/// Check whether a string is written as `/pattern/flags`.
#[inline]
pub fn is_regex_str(source: &str) -> bool {
    split_regex_str(source).is_some()
}

/// A single name pattern.
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// Matches one name exactly
    Exact(String),
    /// Matches names accepted by a regular expression
    Regex(Regex),
}

impl NamePattern {
    /// Parse a pattern string.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let Some((pattern, flags)) = split_regex_str(source) else {
            return Ok(Self::Exact(source.to_string()));
        };

        let mut builder = RegexBuilder::new(pattern);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                // `g`, `u`, `y` have no meaning for a single match
                _ => {}
            }
        }

        builder
            .build()
            .map(Self::Regex)
            .map_err(|e| PatternError {
                source: source.to_string(),
                message: e.to_string(),
            })
    }

    /// Check whether a name matches this pattern.
    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == name,
            Self::Regex(re) => re.is_match(name),
        }
    }
}

impl Default for NamePattern {
    fn default() -> Self {
        Self::Exact("class".to_string())
    }
}

/// A list of names where regex-shaped entries also act as patterns.
///
/// An entry always matches itself literally; entries written as
/// `/pattern/flags` additionally match everything the regex accepts.
#[derive(Debug, Clone, Default)]
pub struct NameList {
    literals: Vec<String>,
    patterns: Vec<Regex>,
}

impl NameList {
    /// Build a list from raw option strings.
    pub fn new<I, S>(entries: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for entry in entries {
            let entry = entry.as_ref();
            if is_regex_str(entry) {
                if let NamePattern::Regex(re) = NamePattern::parse(entry)? {
                    list.patterns.push(re);
                }
            }
            list.literals.push(entry.to_string());
        }
        Ok(list)
    }

    /// Check whether the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check whether a name is satisfied by the list.
    pub fn contains(&self, name: &str) -> bool {
        self.literals.iter().any(|l| l == name) || self.patterns.iter().any(|re| re.is_match(name))
    }
}
