//! Game outcome classification.

use crate::{attacks, legality, Board, EngineError};
use std::fmt;
use tracing::debug;
use validator_core::{Color, PositionRecord};

/// Halfmove clock value that draws the game.
///
/// Only this exact value counts; a clock that has run past it does not.
pub const FIFTY_MOVE_PLIES: u32 = 50;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White delivered checkmate.
    WhiteWins,
    /// Black delivered checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// The halfmove clock reads exactly [`FIFTY_MOVE_PLIES`].
    FiftyMoveRule,
    /// Fewer than four pieces and none of them a queen, rook, or pawn.
    InsufficientMaterial,
}

impl GameResult {
    /// Score notation: `1-0`, `0-1`, or `1/2-1/2`.
    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw(_) => "1/2-1/2",
        }
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }

    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(self, GameResult::Draw(_))
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the position described by `record`.
///
/// Returns `None` while the game continues.
pub fn outcome(record: &PositionRecord) -> Result<Option<GameResult>, EngineError> {
    let board = crate::build_board(record)?;
    Ok(outcome_on(&board, record))
}

/// Like [`outcome`] for an already built board.
pub fn outcome_on(board: &Board, record: &PositionRecord) -> Option<GameResult> {
    let result = if !legality::has_legal_move(board, record) {
        if attacks::king_in_check(board, record.active) {
            Some(match record.active {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            })
        } else {
            Some(GameResult::Draw(DrawReason::Stalemate))
        }
    } else if record.halfmove_clock == FIFTY_MOVE_PLIES {
        Some(GameResult::Draw(DrawReason::FiftyMoveRule))
    } else if is_insufficient_material(board) {
        Some(GameResult::Draw(DrawReason::InsufficientMaterial))
    } else {
        None
    };

    if let Some(result) = result {
        debug!(%result, detail = ?result, "game over");
    }
    result
}

/// Fewer than four pieces remain and none is a queen, rook, or pawn.
///
/// Positions with four or more pieces are never considered insufficient,
/// even when no side can force mate.
pub fn is_insufficient_material(board: &Board) -> bool {
    board.len() < 4 && board.pieces().all(|p| !p.piece.is_major_or_pawn())
}
