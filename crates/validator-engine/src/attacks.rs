//! Path obstruction and square-attack queries.

use crate::geometry;
use crate::{Board, BoardPiece};
use validator_core::{Color, Piece, Square};

/// Squares strictly between `from` and `to` along a shared rank, file, or diagonal.
///
/// Returns an empty list when the squares are adjacent or not aligned.
pub fn squares_between(from: Square, to: Square) -> Vec<Square> {
    let (files, ranks) = from.delta(to);
    let aligned = files == 0 || ranks == 0 || files.abs() == ranks.abs();
    if !aligned || (files == 0 && ranks == 0) {
        return Vec::new();
    }

    let step = (files.signum(), ranks.signum());
    std::iter::successors(from.offset(step.0, step.1), |sq| sq.offset(step.0, step.1))
        .take_while(|&sq| sq != to)
        .collect()
}

/// Returns true if nothing stands strictly between `from` and `to`.
///
/// Only meaningful for straight or diagonal lines; knights and kings never
/// consult it.
pub fn path_clear(from: Square, to: Square, board: &Board) -> bool {
    squares_between(from, to)
        .into_iter()
        .all(|sq| !board.is_occupied(sq))
}

/// Returns true if `attacker` bears on `target` in the given position.
///
/// Pawns only attack their two forward diagonals and kings only the
/// adjacent squares, never the castling landings.
pub fn attacks_square(attacker: BoardPiece, target: Square, board: &Board) -> bool {
    let BoardPiece {
        piece,
        color,
        square,
    } = attacker;

    match piece {
        Piece::Pawn => geometry::pawn_captures(square, color).contains(&target),
        Piece::Knight => geometry::reaches(piece, color, square, target),
        Piece::King => {
            geometry::reaches(piece, color, square, target)
                && !geometry::is_castle(piece, square, target)
        }
        Piece::Bishop | Piece::Rook | Piece::Queen => {
            geometry::reaches(piece, color, square, target) && path_clear(square, target, board)
        }
    }
}

/// Returns true if any piece of `by_color` attacks `sq`.
pub fn square_attacked(sq: Square, by_color: Color, board: &Board) -> bool {
    board
        .pieces_of(by_color)
        .any(|attacker| attacks_square(attacker, sq, board))
}

/// Returns true if the king of `color` is attacked.
///
/// A board without that king is never in check.
pub fn king_in_check(board: &Board, color: Color) -> bool {
    match board.king(color) {
        Some(king) => square_attacked(king.square, color.opposite(), board),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(grid: &str) -> Board {
        Board::from_placement(grid).unwrap()
    }

    /// Board with a single black pawn on each named square.
    fn blockers(squares: &[&str]) -> Board {
        let mut board = Board::empty();
        for s in squares {
            board.set(Piece::Pawn, Color::Black, sq(s));
        }
        board
    }

    #[test]
    fn between_on_file_and_rank() {
        assert_eq!(
            squares_between(sq("a2"), sq("a5")),
            vec![sq("a3"), sq("a4")]
        );
        assert_eq!(
            squares_between(sq("e1"), sq("a1")),
            vec![sq("d1"), sq("c1"), sq("b1")]
        );
    }

    #[test]
    fn between_on_diagonal() {
        assert_eq!(
            squares_between(sq("e3"), sq("a7")),
            vec![sq("d4"), sq("c5"), sq("b6")]
        );
        assert_eq!(squares_between(sq("e3"), sq("g1")), vec![sq("f2")]);
    }

    #[test]
    fn between_unaligned_or_adjacent_is_empty() {
        assert!(squares_between(sq("e3"), sq("f5")).is_empty());
        assert!(squares_between(sq("e3"), sq("e4")).is_empty());
        assert!(squares_between(sq("e3"), sq("e3")).is_empty());
    }

    #[test]
    fn vertical_collisions() {
        assert!(!path_clear(sq("a2"), sq("a7"), &blockers(&["a8", "a5"])));
        assert!(!path_clear(sq("a7"), sq("a3"), &blockers(&["a2", "a5"])));
        assert!(path_clear(sq("a2"), sq("a7"), &blockers(&["a8", "a1"])));
    }

    #[test]
    fn horizontal_collisions() {
        assert!(!path_clear(sq("a1"), sq("e1"), &blockers(&["c1"])));
        assert!(!path_clear(sq("e1"), sq("a1"), &blockers(&["c1"])));
        assert!(path_clear(sq("f1"), sq("e1"), &blockers(&["c1"])));
    }

    #[test]
    fn diagonal_collisions() {
        assert!(!path_clear(sq("e3"), sq("a7"), &blockers(&["b6"])));
        assert!(!path_clear(sq("e3"), sq("h6"), &blockers(&["g5"])));
        assert!(!path_clear(sq("e3"), sq("c1"), &blockers(&["d2"])));
        assert!(!path_clear(sq("e3"), sq("g1"), &blockers(&["f2"])));
        assert!(path_clear(sq("e3"), sq("a7"), &blockers(&[])));
        assert!(path_clear(sq("e3"), sq("h6"), &blockers(&["e6"])));
        // The destination itself is not "between".
        assert!(path_clear(sq("e3"), sq("b6"), &blockers(&["b6"])));
    }

    #[test]
    fn pawn_attacks_only_diagonally() {
        let b = board("8/8/8/8/8/8/4P3/8");
        assert!(square_attacked(sq("d3"), Color::White, &b));
        assert!(square_attacked(sq("f3"), Color::White, &b));
        assert!(!square_attacked(sq("e3"), Color::White, &b));
        assert!(!square_attacked(sq("e4"), Color::White, &b));
    }

    #[test]
    fn black_pawn_attacks_downward() {
        let b = board("8/8/1p6/8/8/8/8/8");
        assert!(square_attacked(sq("c5"), Color::Black, &b));
        assert!(square_attacked(sq("a5"), Color::Black, &b));
        assert!(!square_attacked(sq("c7"), Color::Black, &b));
    }

    #[test]
    fn slider_attacks_are_blocked() {
        let b = board("8/8/8/8/r2P3K/8/8/8");
        assert!(square_attacked(sq("c4"), Color::Black, &b));
        assert!(square_attacked(sq("d4"), Color::Black, &b));
        assert!(!square_attacked(sq("h4"), Color::Black, &b));
    }

    #[test]
    fn king_does_not_attack_castle_squares() {
        let b = board("8/8/8/8/8/8/8/4K3");
        assert!(square_attacked(sq("f1"), Color::White, &b));
        assert!(!square_attacked(sq("g1"), Color::White, &b));
        assert!(!square_attacked(sq("c1"), Color::White, &b));
    }

    #[test]
    fn knight_attacks_jump_over_pieces() {
        let b = board("8/8/8/8/8/8/PPPPPPPP/RN6");
        assert!(square_attacked(sq("c3"), Color::White, &b));
        assert!(square_attacked(sq("a3"), Color::White, &b));
    }

    #[test]
    fn check_detection() {
        let b = board("4k3/8/8/8/8/8/8/4R1K1");
        assert!(king_in_check(&b, Color::Black));
        assert!(!king_in_check(&b, Color::White));

        let shielded = board("4k3/4p3/8/8/8/8/8/4R1K1");
        assert!(!king_in_check(&shielded, Color::Black));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let b = board("8/8/8/8/8/8/8/4R3");
        assert!(!king_in_check(&b, Color::Black));
    }
}
