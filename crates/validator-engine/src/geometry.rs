//! Geometric move candidates.
//!
//! Board-independent: each function returns the squares a piece could reach
//! from a square by its movement pattern alone, bounded by the board edge.
//! Occupancy, check, and the pawn push/capture distinction are resolved by
//! the legality filter.

use validator_core::{Color, Piece, Square};

/// Rook directions as (file step, rank step).
const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Bishop directions as (file step, rank step).
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, 1),
    (-2, -1),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (1, 2),
    (1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Squares from `from` (exclusive) stepping by `step` until the edge.
fn ray(from: Square, (files, ranks): (i8, i8)) -> impl Iterator<Item = Square> {
    std::iter::successors(from.offset(files, ranks), move |sq| sq.offset(files, ranks))
}

fn rays(from: Square, directions: &[(i8, i8)]) -> Vec<Square> {
    directions.iter().flat_map(|&dir| ray(from, dir)).collect()
}

fn jumps(from: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(files, ranks)| from.offset(files, ranks))
        .collect()
}

/// Every square sharing a rank or file with `from`.
pub fn rook_moves(from: Square) -> Vec<Square> {
    rays(from, &ORTHOGONAL)
}

/// Every square on the diagonals through `from`.
pub fn bishop_moves(from: Square) -> Vec<Square> {
    rays(from, &DIAGONAL)
}

/// Rook and bishop lines combined.
pub fn queen_moves(from: Square) -> Vec<Square> {
    let mut moves = rook_moves(from);
    moves.extend(bishop_moves(from));
    moves
}

pub fn knight_moves(from: Square) -> Vec<Square> {
    jumps(from, &KNIGHT_OFFSETS)
}

/// The adjacent squares plus the two castling landings two files away.
///
/// The castling squares are included unconditionally here.
pub fn king_moves(from: Square) -> Vec<Square> {
    let mut moves = jumps(from, &KING_OFFSETS);
    moves.extend(jumps(from, &[(-2, 0), (2, 0)]));
    moves
}

/// The two forward-diagonal squares a pawn captures on.
pub fn pawn_captures(from: Square, color: Color) -> Vec<Square> {
    let forward = color.pawn_direction();
    jumps(from, &[(-1, forward), (1, forward)])
}

/// Diagonals, the square straight ahead, and the double step from the start rank.
pub fn pawn_moves(from: Square, color: Color) -> Vec<Square> {
    let forward = color.pawn_direction();
    let mut moves = pawn_captures(from, color);
    moves.extend(from.offset(0, forward));
    if from.rank().number() == color.pawn_start_rank() {
        moves.extend(from.offset(0, 2 * forward));
    }
    moves
}

/// Geometric candidates for any piece.
pub fn candidates(piece: Piece, color: Color, from: Square) -> Vec<Square> {
    match piece {
        Piece::Rook => rook_moves(from),
        Piece::Bishop => bishop_moves(from),
        Piece::Queen => queen_moves(from),
        Piece::Knight => knight_moves(from),
        Piece::King => king_moves(from),
        Piece::Pawn => pawn_moves(from, color),
    }
}

/// Returns true if `to` is among the candidates of `piece` on `from`.
///
/// Answers from the file/rank delta without building the candidate list.
pub fn reaches(piece: Piece, color: Color, from: Square, to: Square) -> bool {
    let (files, ranks) = from.delta(to);
    if files == 0 && ranks == 0 {
        return false;
    }
    match piece {
        Piece::Rook => files == 0 || ranks == 0,
        Piece::Bishop => files.abs() == ranks.abs(),
        Piece::Queen => files == 0 || ranks == 0 || files.abs() == ranks.abs(),
        Piece::Knight => matches!((files.abs(), ranks.abs()), (1, 2) | (2, 1)),
        Piece::King => (files.abs() <= 1 && ranks.abs() <= 1) || is_castle(piece, from, to),
        Piece::Pawn => {
            let forward = color.pawn_direction();
            (ranks == forward && files.abs() <= 1)
                || (files == 0
                    && ranks == 2 * forward
                    && from.rank().number() == color.pawn_start_rank())
        }
    }
}

/// Returns true for a king moving two files along its rank.
#[inline]
pub fn is_castle(piece: Piece, from: Square, to: Square) -> bool {
    let (files, ranks) = from.delta(to);
    piece == Piece::King && files.abs() == 2 && ranks == 0
}
