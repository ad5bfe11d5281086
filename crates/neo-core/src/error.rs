//! Failure taxonomy for the render pipeline. A malformed record is
//! handled inside validation and never reaches this level; nothing
//! here is fatal to the hosting process.

use thiserror::Error;

/// A render pass that could not produce a dataset. The previous render
/// stays visible; no partial re-render is attempted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PassError {
    #[error("feed request failed: {0}")]
    Fetch(String),
}
