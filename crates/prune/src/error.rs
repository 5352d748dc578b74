// ABOUTME: Error types for loading trees and options into the transform passes.
// ABOUTME: Provides TransformError with Json, InvalidTree, and InvalidOptions variants.

use std::fmt;
use thiserror::Error;

/// Errors raised while building the inputs of a pass.
///
/// The passes themselves never fail; these only cover decoding trees and
/// configuration handed in by the host.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input was not valid JSON.
    #[error("failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON was well-formed but is not a document tree.
    #[error("invalid tree: {0}")]
    InvalidTree(String),

    /// The options could not be applied.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl TransformError {
    /// Creates an InvalidTree error with a custom message.
    pub fn invalid_tree(msg: impl Into<String>) -> Self {
        TransformError::InvalidTree(msg.into())
    }

    /// Creates an InvalidOptions error from any displayable cause.
    pub fn invalid_options(err: impl fmt::Display) -> Self {
        TransformError::InvalidOptions(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TransformError>;
