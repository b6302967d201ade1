//! Parse errors.
//!
//! A failed block is skipped by the linter, so these never surface as lint
//! diagnostics; they are logged.

use thiserror::Error;

/// Errors splitting a component into blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfcParseError {
    #[error("SFC can only contain one <template> block (second one at byte {offset})")]
    DuplicateTemplate { offset: u32 },
    #[error("SFC can only contain one <script> block (second one at byte {offset})")]
    DuplicateScript { offset: u32 },
    #[error("SFC can only contain one <script setup> block (second one at byte {offset})")]
    DuplicateScriptSetup { offset: u32 },
}

/// Errors parsing a style block into rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleParseError {
    #[error("unclosed comment starting at byte {offset}")]
    UnclosedComment { offset: u32 },
    #[error("unclosed block starting at byte {offset}")]
    UnclosedBlock { offset: u32 },
    #[error("unexpected `}}` at byte {offset}")]
    UnexpectedCloseBrace { offset: u32 },
}

/// Errors parsing a selector list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorParseError {
    #[error("empty selector at byte {offset}")]
    Empty { offset: u32 },
    #[error("unclosed `{delimiter}` at byte {offset}")]
    Unclosed { delimiter: char, offset: u32 },
    #[error("selector ends with a combinator at byte {offset}")]
    DanglingCombinator { offset: u32 },
    #[error("unexpected `{found}` at byte {offset}")]
    Unexpected { found: char, offset: u32 },
}
