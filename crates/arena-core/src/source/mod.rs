//! Batch data collaborators.

pub mod fixture;

use core::fmt;

use crate::batch::{Batch, BatchError, BatchId};

/// Why a batch could not be fetched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchError {
    /// The source has no batch with that id.
    NotFound,
    /// Network or backend failure.
    Transport,
    /// The payload could not be represented.
    Malformed,
    /// The payload describes a different batch than the one requested.
    Mismatch,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "batch not found",
            Self::Transport => "transport error",
            Self::Malformed => "malformed batch payload",
            Self::Mismatch => "batch id mismatch",
        };
        f.write_str(label)
    }
}

impl From<BatchError> for FetchError {
    fn from(_: BatchError) -> Self {
        Self::Malformed
    }
}

/// Read side of the batch backend. Each call returns a whole batch or fails.
pub trait BatchSource {
    fn fetch_batch(&self, batch_id: BatchId) -> Result<Batch, FetchError>;
}
