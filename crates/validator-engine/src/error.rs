//! Engine error type.

use crate::san::SanError;
use crate::BoardPiece;
use thiserror::Error;
use validator_core::{RecordError, Square};

/// Errors surfaced by engine operations.
///
/// Every operation is a pure function of its inputs, so none of these are
/// retried internally: the same inputs always produce the same error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The board grid does not decode to 64 squares or has a bad character.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A non-grid field of the record failed to parse.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The destination is not among the piece's legal destinations.
    #[error("illegal move requested: {piece} to {destination}")]
    IllegalMoveRequested {
        piece: BoardPiece,
        destination: Square,
    },

    #[error(transparent)]
    San(#[from] SanError),

    /// Random selection was asked to choose from nothing.
    #[error("no legal moves available")]
    NoMovesAvailable,
}
