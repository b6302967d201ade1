//! Lint rules for class names in Vue.js SFC files.
//!
//! - `vkcn/no-convention-violation` - Enforce the `<prefix>--<element>` naming convention in styles
//! - `vkcn/no-dynamic-class-names` - Disallow class names that can only be known at runtime
//! - `vkcn/no-undefined-class-names` - Disallow class names the styles do not declare

mod no_convention_violation;
mod no_dynamic_class_names;
mod no_undefined_class_names;

pub use no_convention_violation::NoConventionViolation;
pub use no_dynamic_class_names::{DynamicClassOptions, NoDynamicClassNames};
pub use no_undefined_class_names::{NoUndefinedClassNames, UndefinedClassOptions, UsageMode};
