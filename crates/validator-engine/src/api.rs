//! Record-string entry points.
//!
//! Each function parses its record, builds a fresh board, and delegates to
//! the engine modules. Nothing is cached between calls.

use crate::legality::{self, MoveSet};
use crate::outcome::{self, GameResult};
use crate::{apply, san, BoardPiece, EngineError};
use rand::seq::SliceRandom;
use rand::Rng;
use validator_core::{PositionRecord, Square};

/// Pieces of the side to move that have at least one legal destination.
pub fn find_next_moves(record: &str) -> Result<Vec<MoveSet>, EngineError> {
    let record = PositionRecord::parse(record)?;
    next_moves(&record)
}

/// Replays SAN moves from the initial position, then finds the next moves.
pub fn find_next_moves_from_moves<S: AsRef<str>>(
    moves: &[S],
) -> Result<Vec<MoveSet>, EngineError> {
    let record = san::replay(moves)?;
    next_moves(&record)
}

fn next_moves(record: &PositionRecord) -> Result<Vec<MoveSet>, EngineError> {
    let mut sets = legality::legal_moves(record)?;
    sets.retain(|set| !set.is_empty());
    Ok(sets)
}

/// Every piece on the board, a8 first.
pub fn pieces(record: &str) -> Result<Vec<BoardPiece>, EngineError> {
    let record = PositionRecord::parse(record)?;
    let board = crate::build_board(&record)?;
    Ok(board.pieces().collect())
}

/// Moves `piece` to `destination` and returns the next record.
pub fn make_move(
    record: &str,
    piece: BoardPiece,
    destination: Square,
) -> Result<String, EngineError> {
    let record = PositionRecord::parse(record)?;
    let board = crate::build_board(&record)?;
    apply::apply_move(&board, &record, piece, destination)
}

/// Plays a uniformly chosen destination of a uniformly chosen move set.
///
/// # Errors
///
/// [`EngineError::NoMovesAvailable`] if every move set is empty.
pub fn make_random_move<R: Rng + ?Sized>(
    record: &str,
    movesets: &[MoveSet],
    rng: &mut R,
) -> Result<String, EngineError> {
    let playable: Vec<&MoveSet> = movesets.iter().filter(|set| !set.is_empty()).collect();
    let set = playable.choose(rng).ok_or(EngineError::NoMovesAvailable)?;
    let dest = set.moves.choose(rng).ok_or(EngineError::NoMovesAvailable)?;
    make_move(record, set.piece, *dest)
}

/// The game result, or `None` while play continues.
pub fn result(record: &str) -> Result<Option<GameResult>, EngineError> {
    let record = PositionRecord::parse(record)?;
    outcome::outcome(&record)
}
