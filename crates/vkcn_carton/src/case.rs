//! Kebab-case conversion.
//!
//! Words are found the way most JS casing helpers find them: runs of
//! uppercase letters (acronyms), an optional capital followed by lowercase
//! letters and trailing digits, a lone capital, or a run of digits. Anything
//! else separates words and is dropped.

/// Split a string into casing words.
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.trim().chars().collect();
    let len = chars.len();
    let mut words = Vec::new();
    let mut i = 0;

    while i < len {
        let c = chars[i];

        if c.is_uppercase() {
            let mut run = i;
            while run < len && chars[run].is_uppercase() {
                run += 1;
            }
            let run_len = run - i;

            if run_len >= 2 {
                // `HTMLParser` -> `HTML`, `Parser`
                let followed_by_lower = run < len && chars[run].is_lowercase();
                let end = if followed_by_lower { run - 1 } else { run };
                words.push(chars[i..end].iter().collect());
                i = end;
                continue;
            }

            let mut end = i + 1;
            while end < len && chars[end].is_lowercase() {
                end += 1;
            }
            if end > i + 1 {
                while end < len && chars[end].is_ascii_digit() {
                    end += 1;
                }
            }
            words.push(chars[i..end].iter().collect());
            i = end;
            continue;
        }

        if c.is_lowercase() {
            let mut end = i;
            while end < len && chars[end].is_lowercase() {
                end += 1;
            }
            while end < len && chars[end].is_ascii_digit() {
                end += 1;
            }
            words.push(chars[i..end].iter().collect());
            i = end;
            continue;
        }

        if c.is_ascii_digit() {
            let mut end = i;
            while end < len && chars[end].is_ascii_digit() {
                end += 1;
            }
            words.push(chars[i..end].iter().collect());
            i = end;
            continue;
        }

        i += 1;
    }

    words
}

/// Convert a string to kebab-case.
///
/// ```
/// use vkcn_carton::case::kebab_case;
///
/// assert_eq!(kebab_case("bar__baz"), "bar-baz");
/// assert_eq!(kebab_case("__baz"), "baz");
/// assert_eq!(kebab_case("XMLHttpRequest"), "xml-http-request");
/// ```
pub fn kebab_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Check whether a string is already in kebab-case.
#[inline]
pub fn is_kebab_case(input: &str) -> bool {
    !input.is_empty() && kebab_case(input) == input
}

/// Check whether the first character is an ASCII lowercase letter.
#[inline]
pub fn starts_with_lowercase(input: &str) -> bool {
    input.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_from_pascal() {
        assert_eq!(kebab_case("FooComponent"), "foo-component");
        assert_eq!(kebab_case("fooBar"), "foo-bar");
    }

    #[test]
    fn test_kebab_from_separators() {
        assert_eq!(kebab_case("foo_bar"), "foo-bar");
        assert_eq!(kebab_case("foo--bar"), "foo-bar");
        assert_eq!(kebab_case("  foo bar  "), "foo-bar");
    }

    #[test]
    fn test_kebab_digits() {
        assert_eq!(kebab_case("item2"), "item2");
        assert_eq!(kebab_case("h1Title"), "h1-title");
        assert_eq!(kebab_case("2col"), "2-col");
    }

    #[test]
    fn test_is_kebab_case() {
        assert!(is_kebab_case("foo-baz"));
        assert!(is_kebab_case("bar"));
        assert!(!is_kebab_case("foo--baz"));
        assert!(!is_kebab_case("fooBaz"));
        assert!(!is_kebab_case(""));
    }

    #[test]
    fn test_starts_with_lowercase() {
        assert!(starts_with_lowercase("foo"));
        assert!(!starts_with_lowercase("Foo"));
        assert!(!starts_with_lowercase("&__baz"));
        assert!(!starts_with_lowercase(""));
    }
}
