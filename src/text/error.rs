//! Error types for text block reconstruction
//!
//! Consistency and exhaustion errors abort the current block only. The caller
//! decides whether to carry on with other blocks (see
//! [`Engine::reconstruct_all`](crate::text::pipeline::Engine::reconstruct_all)).
//! Structural problems are reported as warnings alongside a degraded result.

use thiserror::Error;

/// Errors raised while pairing fragments with rendered lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructError {
    /// The fragment stream and the render output disagree about run lengths.
    #[error(
        "line {line}: fragment at offset {location} has {remaining} characters left \
         but {requested} were requested"
    )]
    Consistency {
        location: usize,
        remaining: usize,
        requested: usize,
        line: usize,
    },

    /// A fragment's declared length disagrees with its text.
    #[error(
        "fragment at offset {location} declares {length} characters but its text has {characters}"
    )]
    LengthMismatch {
        location: usize,
        length: usize,
        characters: usize,
    },

    /// A rendered line needs text but no fragments are left.
    #[error(
        "line {line}: render output needs more text than the fragments provide \
         (stream ended at offset {location})"
    )]
    FragmentsExhausted { line: usize, location: usize },

    /// Content fragments remain after the last rendered line.
    #[error(
        "line {line}: {remaining} fragment(s) left over after the last rendered line, \
         starting at offset {location}"
    )]
    FragmentsLeftOver {
        line: usize,
        location: usize,
        remaining: usize,
    },

    /// The render output holds no text runs although the block has text.
    #[error("render output holds no text runs for a block of {characters} characters")]
    Structural { characters: usize },
}

impl ReconstructError {
    /// Whether this error aborts the block.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ReconstructError::Structural { .. })
    }

    /// Block offset of the offending fragment, when one is known.
    pub fn location(&self) -> Option<usize> {
        match self {
            ReconstructError::Consistency { location, .. }
            | ReconstructError::FragmentsExhausted { location, .. }
            | ReconstructError::FragmentsLeftOver { location, .. }
            | ReconstructError::LengthMismatch { location, .. } => Some(*location),
            ReconstructError::Structural { .. } => None,
        }
    }

    /// Index of the rendered line being processed when the error surfaced.
    pub fn line(&self) -> Option<usize> {
        match self {
            ReconstructError::Consistency { line, .. }
            | ReconstructError::FragmentsExhausted { line, .. }
            | ReconstructError::FragmentsLeftOver { line, .. } => Some(*line),
            ReconstructError::LengthMismatch { .. } | ReconstructError::Structural { .. } => {
                None
            }
        }
    }
}

/// Result alias for reconstruction steps.
pub type Result<T> = std::result::Result<T, ReconstructError>;

/// A reconstruction failure tagged with the block it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("block {block_index}: {source}")]
pub struct BlockError {
    pub block_index: usize,
    #[source]
    pub source: ReconstructError,
}
