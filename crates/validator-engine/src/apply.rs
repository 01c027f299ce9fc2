//! Move applier.
//!
//! [`next_board`] is the single board transition, shared by real moves and by
//! the king-safety probe in the legality filter. [`apply_move`] wraps it with
//! the record bookkeeping.

use crate::legality;
use crate::{geometry, Board, BoardPiece, EngineError};
use tracing::debug;
use validator_core::{CastlingRights, Color, File, Flank, Piece, PositionRecord, Square};

/// The kind placed on `dest`: pawns reaching the last rank become queens.
#[inline]
fn landing_kind(piece: BoardPiece, dest: Square) -> Piece {
    let rank = dest.rank().number();
    if piece.piece == Piece::Pawn && (rank == 1 || rank == 8) {
        Piece::Queen
    } else {
        piece.piece
    }
}

/// Returns the board after `piece` moves to `dest`.
///
/// Handles capture, promotion, the castling rook, and en passant removal.
/// Legality is not checked; the input board is left untouched.
pub fn next_board(board: &Board, piece: BoardPiece, dest: Square) -> Board {
    let mut next = board.clone();

    if legality::is_en_passant(board, piece, dest) {
        if let Some(behind) = dest.offset(0, -piece.color.pawn_direction()) {
            next.clear(behind);
        }
    }

    next.clear(piece.square);
    next.set(landing_kind(piece, dest), piece.color, dest);

    if geometry::is_castle(piece.piece, piece.square, dest) {
        let kingside = dest.file().index() > piece.square.file().index();
        let (corner_file, landing) = if kingside {
            (File::H, dest.offset(-1, 0))
        } else {
            (File::A, dest.offset(1, 0))
        };
        let corner = Square::new(corner_file, dest.rank());
        if let (Some(landing), Some(rook)) = (landing, next.clear(corner)) {
            next.set(rook.piece, rook.color, landing);
        }
    }

    next
}

/// Drops every right whose king or rook has left its home square.
fn remaining_rights(prior: CastlingRights, board: &Board) -> CastlingRights {
    let mut rights = prior;
    for color in [Color::White, Color::Black] {
        let king_home = Flank::king_home(color);
        let king_in_place = board.piece_at(king_home)
            == Some(BoardPiece::new(Piece::King, color, king_home));

        for flank in [Flank::Kingside, Flank::Queenside] {
            let rook_home = flank.rook_home(color);
            let rook_in_place = board.piece_at(rook_home)
                == Some(BoardPiece::new(Piece::Rook, color, rook_home));
            if !(king_in_place && rook_in_place) {
                rights.remove(color, flank);
            }
        }
    }
    rights
}

/// Applies a move and returns the next record as a string.
///
/// # Errors
///
/// [`EngineError::IllegalMoveRequested`] if `piece` is not on the board, is
/// not on move, or cannot reach `dest`. The caller's record is unaffected.
pub fn apply_move(
    board: &Board,
    record: &PositionRecord,
    piece: BoardPiece,
    dest: Square,
) -> Result<String, EngineError> {
    apply_move_record(board, record, piece, dest).map(|next| next.to_string())
}

/// Like [`apply_move`] but returns the structured record.
pub fn apply_move_record(
    board: &Board,
    record: &PositionRecord,
    piece: BoardPiece,
    dest: Square,
) -> Result<PositionRecord, EngineError> {
    let on_board = board.piece_at(piece.square) == Some(piece);
    if !on_board
        || piece.color != record.active
        || !legality::is_legal(board, record, piece, dest)
    {
        return Err(EngineError::IllegalMoveRequested {
            piece,
            destination: dest,
        });
    }

    let (_, next) = advance(board, record, piece, dest)?;
    debug!(%piece, %dest, record = %next, "move applied");
    Ok(next)
}

/// Record and board bookkeeping for a move already known to be legal.
///
/// Fails only when a counter of `record` is already at `u32::MAX`.
pub(crate) fn advance(
    board: &Board,
    record: &PositionRecord,
    piece: BoardPiece,
    dest: Square,
) -> Result<(Board, PositionRecord), EngineError> {
    let captured = legality::capture_target(board, piece, dest);
    let next = next_board(board, piece, dest);

    let double_step = piece.piece == Piece::Pawn && piece.square.delta(dest).1.abs() == 2;
    let en_passant = if double_step {
        piece.square.offset(0, piece.color.pawn_direction())
    } else {
        None
    };

    let halfmove_clock = if piece.piece == Piece::Pawn || captured.is_some() {
        0
    } else {
        record
            .halfmove_clock
            .checked_add(1)
            .ok_or_else(|| counter_overflow("halfmove clock", record))?
    };

    let fullmove_number = match piece.color {
        Color::White => record.fullmove_number,
        Color::Black => record
            .fullmove_number
            .checked_add(1)
            .ok_or_else(|| counter_overflow("fullmove number", record))?,
    };

    let result = PositionRecord {
        placement: next.to_placement(),
        active: record.active.opposite(),
        castling: remaining_rights(record.castling, &next),
        en_passant,
        halfmove_clock,
        fullmove_number,
    };

    Ok((next, result))
}

fn counter_overflow(field: &str, record: &PositionRecord) -> EngineError {
    EngineError::MalformedRecord(format!("{} cannot advance past {}", field, record))
}
