use thiserror::Error;

use crate::layout::PackError;

/// Unified result type for the crate.
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Errors surfaced by the packing pipeline.
#[derive(Debug, Error)]
pub enum MosaicError {
    #[error("pack error: {0}")]
    Pack(#[from] PackError),
    #[error("tile feed decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
