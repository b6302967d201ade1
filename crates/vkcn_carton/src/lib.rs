//! Carton - The toolbox shared by every vkcn crate.
//!
//! Like the carton an artist carries between studio and site, this crate holds
//! the small, sharp tools the rest of the workspace reaches for: string
//! casing, edit distance, name patterns and source positions.
//!
//! # Modules
//!
//! - **case**: kebab-case conversion and validation
//! - **distance**: Levenshtein edit distance for suggestion ranking
//! - **pattern**: literal-or-`/regex/flags` name matching used by settings and options
//! - **line_index**: byte offset to line/column conversion for output
//!
//! # Example
//!
//! ```
//! use vkcn_carton::case::{is_kebab_case, kebab_case};
//!
//! assert_eq!(kebab_case("FooComponent"), "foo-component");
//! assert!(is_kebab_case("foo-component"));
//! ```

pub mod case;
pub mod distance;
pub mod line_index;
pub mod pattern;

pub use line_index::LineIndex;
pub use pattern::{NameList, NamePattern, PatternError};

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};
