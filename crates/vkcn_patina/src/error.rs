//! Fatal analysis errors.
//!
//! These mean the input trees broke a guarantee the parsers give. They abort
//! the analysis of one file and are never shown as lint diagnostics.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("selector at byte {offset} has no components")]
    EmptySelector { offset: u32 },
    #[error("combinator at byte {offset} is not followed by a selector")]
    MissingCombinatorChild { offset: u32 },
}
