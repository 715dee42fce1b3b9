//! Error taxonomy for the svgmotion core.
//!
//! `ParseError` is fatal to the call that produced it: no partial document or
//! layer tree is ever returned alongside one. `ValidationError` marks a
//! rejected operation; the tree the caller holds is unchanged. Operations on
//! unknown layer/keyframe ids are no-ops, not errors: batch edits must stay
//! tolerant of stale ids.

use thiserror::Error;

/// Malformed input markup, or a document that could not be serialized back
/// into a markup string.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid svg markup: {0}")]
    Markup(#[from] xmltree::ParseError),

    #[error("failed to serialize svg document: {0}")]
    Serialize(String),

    #[error("no document loaded")]
    EmptyDocument,
}

/// A rejected tree or timeline operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("grouping requires at least two layers, got {0}")]
    GroupTooSmall(usize),

    #[error("timeline duration must be positive, got {0}")]
    NonPositiveDuration(f64),
}
