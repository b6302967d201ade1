//! # vkcn_armature
//!
//! Armature - The parsers that give vkcn its trees.
//!
//! ## Name Origin
//!
//! An **armature** is the wire frame a sculptor builds first, so the clay has
//! something to hold on to. These parsers play that part: they turn a raw
//! `.vue` file into the `vkcn_relief` trees the linter works on.
//!
//! ## Parsers
//!
//! - [`sfc`]: splits the file into template, script and style blocks
//! - [`template`]: start tags, attributes and comments of the template
//! - [`style`] and [`selector`]: CSS/SCSS/Less rules and their selector lists
//! - [`expression`]: bound attribute values, via OXC
//! - [`props`]: prop names declared by the component, via OXC
//!
//! ## Example
//!
//! ```
//! use vkcn_armature::{parse_sfc, parse_style};
//!
//! let source = "<style lang=\"scss\">.foo--bar { &.baz {} }</style>";
//! let descriptor = parse_sfc(source, "Foo.vue").unwrap();
//! let block = &descriptor.styles[0];
//! let sheet = parse_style(source, block.block.content, block.lang.clone()).unwrap();
//! assert_eq!(sheet.rules.len(), 2);
//! ```

pub mod error;
pub mod expression;
pub mod props;
pub mod selector;
pub mod sfc;
pub mod style;
pub mod template;

pub use error::{SelectorParseError, SfcParseError, StyleParseError};
pub use expression::parse_class_expression;
pub use props::collect_props;
pub use selector::parse_selector_list;
pub use sfc::parse_sfc;
pub use style::parse_style;
pub use template::scan_template;
