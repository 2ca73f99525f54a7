//! Error types for the engine core.
//!
//! Search interrupts (timeout, cancellation) are not errors and never leave
//! the search module; everything here is reportable to a caller or onto the
//! instrumentation stream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error kind, carried by `error` stream records.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidFen,
    IllegalMove,
    InternalError,
}

/// Errors surfaced by the engine core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed FEN input. No state is changed.
    #[error("invalid FEN: {message}")]
    InvalidFen { message: String },

    /// Move not in the current legal move set. No state is changed.
    #[error("illegal move: {mv}")]
    IllegalMove { mv: String },

    /// A position invariant was violated. Fatal for the current request.
    #[error("internal error: {message}")]
    InternalError { message: String },
}

impl EngineError {
    pub fn invalid_fen(message: impl Into<String>) -> Self {
        EngineError::InvalidFen {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidFen { .. } => ErrorKind::InvalidFen,
            EngineError::IllegalMove { .. } => ErrorKind::IllegalMove,
            EngineError::InternalError { .. } => ErrorKind::InternalError,
        }
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
