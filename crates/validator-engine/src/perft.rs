//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth. The
//! counts match the published values for positions where no promotion is
//! reachable within the searched depth, since only queen promotions are
//! generated here.

use crate::{apply, legality, Board, EngineError};
use validator_core::PositionRecord;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(record: &PositionRecord, depth: u32) -> Result<u64, EngineError> {
    let board = crate::build_board(record)?;
    perft_on(&board, record, depth)
}

fn perft_on(board: &Board, record: &PositionRecord, depth: u32) -> Result<u64, EngineError> {
    if depth == 0 {
        return Ok(1);
    }

    let sets = legality::legal_moves_on(board, record);

    if depth == 1 {
        return Ok(sets.iter().map(|set| set.len() as u64).sum());
    }

    let mut nodes = 0u64;
    for set in &sets {
        for &dest in &set.moves {
            let (next_board, next_record) = apply::advance(board, record, set.piece, dest)?;
            nodes += perft_on(&next_board, &next_record, depth - 1)?;
        }
    }
    Ok(nodes)
}

/// Perft with divide: node count below each root move, sorted by UCI text.
///
/// Depth 0 has no root moves to divide, so the result is empty.
pub fn perft_divide(
    record: &PositionRecord,
    depth: u32,
) -> Result<Vec<(String, u64)>, EngineError> {
    let board = crate::build_board(record)?;
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut results = Vec::new();
    for set in legality::legal_moves_on(&board, record) {
        for mv in set.to_moves() {
            let (next_board, next_record) = apply::advance(&board, record, set.piece, mv.to)?;
            let nodes = perft_on(&next_board, &next_record, depth - 1)?;
            results.push((mv.to_uci(), nodes));
        }
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}
