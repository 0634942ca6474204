//! Error types for the binding engine

use thiserror::Error;

/// Errors surfaced by the parsing APIs.
///
/// Traversal (`pull`/`push`) never propagates these: per-node failures
/// degrade to a skipped binding and the pass continues.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl BindError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
