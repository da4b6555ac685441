//! Crate error type.
//!
//! The matching core contains per-configuration failures itself (a failing
//! configuration is logged and skipped), so these errors surface either from
//! collaborator trait implementations or from the settings repository.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A configuration references a model the provider cannot map to an
    /// actual source.
    #[error("model '{model}' could not be resolved")]
    UnresolvedModel { model: String },

    /// The snapshot provider failed while collecting elements or solids.
    #[error("snapshot provider failed: {0}")]
    Provider(String),

    /// A solid-intersection attempt failed inside the geometry oracle.
    #[error("geometry oracle failed: {0}")]
    Oracle(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
