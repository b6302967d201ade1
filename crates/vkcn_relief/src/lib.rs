//! # vkcn_relief
//!
//! Relief - The sculptured tree surfaces vkcn analyses.
//!
//! ## Name Origin
//!
//! A **relief** is a sculpture raised from a flat background: the structure is
//! visible, but it never leaves the surface it was carved from. The trees in
//! this crate are the same: every node is a typed view onto a span of the
//! original `.vue` file, with byte offsets pointing back into it.
//!
//! ## Trees
//!
//! - [`sfc`]: the block layout of a single file component
//! - [`style`]: style rules as an arena with parent links and leading comments
//! - [`selector`]: selector components as an arena with a child → parent index
//! - [`markup`]: template tags and their attributes
//! - [`expression`]: the closed union of bound class expressions
//!
//! All trees are plain data. They are built once per file by `vkcn_armature`
//! and only read afterwards.

pub mod expression;
pub mod markup;
pub mod selector;
pub mod sfc;
pub mod span;
pub mod style;

pub use expression::{ClassExpr, ObjectMember, PropertyKey, TemplateQuasi};
pub use markup::{Attribute, AttributeKey, AttributeValue, Tag, Template, TemplateComment};
pub use selector::{
    Combinator, ComplexId, ComplexSelector, NodeId, SelectorArena, SelectorKind, SelectorNode,
};
pub use sfc::{SfcBlock, SfcDescriptor, SfcStyleBlock, StyleLang};
pub use span::Span;
pub use style::{RuleId, RuleKind, StyleComment, StyleRule, StyleSheet};
