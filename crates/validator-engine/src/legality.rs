//! Legality filter.
//!
//! Each geometric candidate of a piece is sorted into legal or rejected by
//! its piece-specific rule followed by a king-safety probe. The probe builds
//! the next board with [`apply::next_board`], the same transition used for
//! real moves, so the two cannot disagree.

use crate::attacks;
use crate::{apply, geometry, Board, BoardPiece, EngineError};
use tracing::trace;
use validator_core::{CastlingRights, Flank, Move, Piece, PositionRecord, Square};

/// Legal destinations of one piece, with its captures and rejected candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSet {
    pub piece: BoardPiece,
    /// Legal destinations in geometric candidate order.
    pub moves: Vec<Square>,
    /// Pieces captured by some legal destination.
    ///
    /// For en passant this is the pawn behind the target square.
    pub targets: Vec<BoardPiece>,
    /// Geometric candidates that failed a rule.
    pub rejected: Vec<Square>,
}

impl MoveSet {
    fn new(piece: BoardPiece) -> Self {
        MoveSet {
            piece,
            moves: Vec::new(),
            targets: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Returns true if the piece has no legal destination.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn contains(&self, dest: Square) -> bool {
        self.moves.contains(&dest)
    }

    /// The legal destinations as from/to pairs.
    pub fn to_moves(&self) -> Vec<Move> {
        self.moves
            .iter()
            .map(|&to| Move::new(self.piece.square, to))
            .collect()
    }
}

/// Builds the board from `record` and filters moves for the side to move.
///
/// One [`MoveSet`] per piece of the active color, in board order, including
/// pieces with nothing to play.
pub fn legal_moves(record: &PositionRecord) -> Result<Vec<MoveSet>, EngineError> {
    let board = crate::build_board(record)?;
    Ok(legal_moves_on(&board, record))
}

/// Like [`legal_moves`] for an already built board.
pub fn legal_moves_on(board: &Board, record: &PositionRecord) -> Vec<MoveSet> {
    board
        .pieces_of(record.active)
        .map(|piece| moves_for_piece(board, record, piece))
        .collect()
}

/// Returns true if the side to move has at least one legal move.
pub fn has_legal_move(board: &Board, record: &PositionRecord) -> bool {
    board.pieces_of(record.active).any(|piece| {
        geometry::candidates(piece.piece, piece.color, piece.square)
            .into_iter()
            .any(|dest| is_legal(board, record, piece, dest))
    })
}

/// Sorts every geometric candidate of `piece` into legal or rejected.
pub fn moves_for_piece(board: &Board, record: &PositionRecord, piece: BoardPiece) -> MoveSet {
    let mut set = MoveSet::new(piece);

    for dest in geometry::candidates(piece.piece, piece.color, piece.square) {
        if is_legal(board, record, piece, dest) {
            set.moves.push(dest);
            if let Some(target) = capture_target(board, piece, dest) {
                set.targets.push(target);
            }
        } else {
            trace!(%piece, %dest, "candidate rejected");
            set.rejected.push(dest);
        }
    }

    set
}

/// Returns true if `piece` may legally move to `dest`.
pub fn is_legal(board: &Board, record: &PositionRecord, piece: BoardPiece, dest: Square) -> bool {
    if !geometry::reaches(piece.piece, piece.color, piece.square, dest) {
        return false;
    }
    if board.is_color(dest, piece.color) {
        return false;
    }

    let shape_ok = match piece.piece {
        Piece::Bishop | Piece::Rook | Piece::Queen => {
            attacks::path_clear(piece.square, dest, board)
        }
        Piece::Knight => true,
        Piece::Pawn => pawn_step_legal(board, record, piece, dest),
        Piece::King if geometry::is_castle(piece.piece, piece.square, dest) => {
            castle_legal(board, record.castling, piece, dest)
        }
        Piece::King => !attacks::square_attacked(dest, piece.color.opposite(), board),
    };

    shape_ok && king_will_be_safe(board, piece, dest)
}

/// The piece a move to `dest` would capture, if any.
///
/// A pawn changing file onto an empty square captures en passant: the victim
/// stands one rank behind `dest` from the mover's side.
pub fn capture_target(board: &Board, piece: BoardPiece, dest: Square) -> Option<BoardPiece> {
    let enemy = piece.color.opposite();
    if board.is_color(dest, enemy) {
        return board.piece_at(dest);
    }
    if is_en_passant(board, piece, dest) {
        return dest
            .offset(0, -piece.color.pawn_direction())
            .and_then(|behind| board.piece_at(behind))
            .filter(|victim| victim.color == enemy);
    }
    None
}

/// Returns true for a pawn moving diagonally onto an empty square.
#[inline]
pub(crate) fn is_en_passant(board: &Board, piece: BoardPiece, dest: Square) -> bool {
    piece.piece == Piece::Pawn && piece.square.file() != dest.file() && !board.is_occupied(dest)
}

/// Plays the move on a copy of the board and checks the mover's king.
pub fn king_will_be_safe(board: &Board, piece: BoardPiece, dest: Square) -> bool {
    let next = apply::next_board(board, piece, dest);
    !attacks::king_in_check(&next, piece.color)
}

fn pawn_step_legal(
    board: &Board,
    record: &PositionRecord,
    piece: BoardPiece,
    dest: Square,
) -> bool {
    if piece.square.file() == dest.file() {
        // Pushes never capture; a double step also needs the skipped square.
        let skipped = piece.square.offset(0, piece.color.pawn_direction());
        return skipped.is_some_and(|sq| !board.is_occupied(sq)) && !board.is_occupied(dest);
    }
    board.is_color(dest, piece.color.opposite()) || record.en_passant == Some(dest)
}

/// Castling clauses for a king moving two files.
fn castle_legal(board: &Board, rights: CastlingRights, king: BoardPiece, dest: Square) -> bool {
    let color = king.color;
    let enemy = color.opposite();
    let (files, _) = king.square.delta(dest);
    let (flank, step) = if files > 0 {
        (Flank::Kingside, 1)
    } else {
        (Flank::Queenside, -1)
    };

    if king.square != Flank::king_home(color) || !rights.allows(color, flank) {
        return false;
    }

    let Some(crossed) = king.square.offset(step, 0) else {
        return false;
    };

    if board.is_occupied(crossed) || board.is_occupied(dest) {
        return false;
    }
    if flank == Flank::Queenside {
        let knight_square = dest.offset(-1, 0);
        if knight_square.map_or(true, |sq| board.is_occupied(sq)) {
            return false;
        }
    }

    [king.square, crossed, dest]
        .into_iter()
        .all(|sq| !attacks::square_attacked(sq, enemy, board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator_core::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn parse(s: &str) -> PositionRecord {
        PositionRecord::parse(s).unwrap()
    }

    fn moves_of(record_str: &str, from: &str) -> Vec<String> {
        let record = parse(record_str);
        let board = crate::build_board(&record).unwrap();
        let piece = board.piece_at(sq(from)).unwrap();
        let mut moves: Vec<String> = moves_for_piece(&board, &record, piece)
            .moves
            .into_iter()
            .map(|s| s.to_algebraic())
            .collect();
        moves.sort();
        moves
    }

    fn sorted(squares: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = squares.iter().map(|s| s.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let sets = legal_moves(&PositionRecord::default()).unwrap();
        assert_eq!(sets.len(), 16);
        let total: usize = sets.iter().map(MoveSet::len).sum();
        assert_eq!(total, 20);
        for set in &sets {
            match set.piece.piece {
                Piece::Pawn => assert_eq!(set.len(), 2),
                Piece::Knight => assert_eq!(set.len(), 2),
                _ => assert!(set.is_empty(), "{} should be stuck", set.piece),
            }
        }
    }

    #[test]
    fn only_active_side_is_enumerated() {
        let record = parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        let sets = legal_moves(&record).unwrap();
        assert!(sets.iter().all(|s| s.piece.color == Color::Black));
    }

    #[test]
    fn pawn_push_blocked() {
        assert_eq!(moves_of("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2"), Vec::<String>::new());
        assert_eq!(moves_of("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2"), sorted(&["e3"]));
    }

    #[test]
    fn pawn_double_step_only_from_start_rank() {
        assert_eq!(moves_of("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1", "e3"), sorted(&["e4"]));
        assert_eq!(moves_of("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1", "e7"), sorted(&["e6", "e5"]));
    }

    #[test]
    fn pawn_captures_need_enemy() {
        assert_eq!(
            moves_of("4k3/8/8/8/8/3p1N2/4P3/4K3 w - - 0 1", "e2"),
            sorted(&["d3", "e3", "e4"])
        );
    }

    #[test]
    fn en_passant_capture_targets_pawn_behind() {
        let record = parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let board = crate::build_board(&record).unwrap();
        let pawn = board.piece_at(sq("e5")).unwrap();
        let set = moves_for_piece(&board, &record, pawn);
        let mut moves = set.moves.clone();
        moves.sort_by_key(|s| s.index());
        assert_eq!(moves, vec![sq("d6"), sq("e6")]);
        assert_eq!(
            set.targets,
            vec![BoardPiece::new(Piece::Pawn, Color::Black, sq("d5"))]
        );
    }

    #[test]
    fn pinned_piece_cannot_leave_line() {
        // Knight on e2 shields the king from the rook on e8.
        assert!(moves_of("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1", "e2").is_empty());
        // A pinned rook may slide along the pin.
        assert_eq!(
            moves_of("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1", "e2"),
            sorted(&["e3", "e4", "e5", "e6", "e7", "e8"])
        );
    }

    #[test]
    fn king_cannot_step_into_attack() {
        assert_eq!(
            moves_of("3r2k1/8/8/8/8/8/8/4K3 w - - 0 1", "e1"),
            sorted(&["e2", "f1", "f2"])
        );
    }

    #[test]
    fn king_cannot_retreat_along_checking_line() {
        // f1 looks safe on the current board because the king shields it.
        assert_eq!(
            moves_of("6k1/8/8/8/8/8/8/r3K3 w - - 0 1", "e1"),
            sorted(&["d2", "e2", "f2"])
        );
    }

    #[test]
    fn check_must_be_answered() {
        let record = parse("4k3/8/8/8/8/8/3P4/r3K2R w K - 0 1");
        let sets = legal_moves(&record).unwrap();
        let pawn = sets.iter().find(|s| s.piece.piece == Piece::Pawn).unwrap();
        assert!(pawn.is_empty());
        let rook = sets.iter().find(|s| s.piece.piece == Piece::Rook).unwrap();
        assert!(rook.is_empty());
    }

    #[test]
    fn captures_are_reported_as_targets() {
        let record = parse("4k3/8/8/8/8/2p5/8/R3K3 w - - 0 1");
        let board = crate::build_board(&record).unwrap();
        let rook = BoardPiece::new(Piece::Rook, Color::White, sq("a1"));
        let set = moves_for_piece(&board, &record, rook);
        assert!(set.targets.is_empty());
        assert!(set.rejected.contains(&sq("e1")));

        let record = parse("4k3/8/8/8/8/p7/8/R3K3 w - - 0 1");
        let board = crate::build_board(&record).unwrap();
        let set = moves_for_piece(&board, &record, rook);
        assert_eq!(
            set.targets,
            vec![BoardPiece::new(Piece::Pawn, Color::Black, sq("a3"))]
        );
        assert!(set.contains(sq("a3")));
        assert!(!set.contains(sq("a4")));
    }

    #[test]
    fn legal_and_rejected_partition_candidates() {
        let record = parse("r1b2r2/4ppbk/p2p1npp/q1pP4/n3P3/2N1BN1P/PP1QBPP1/R4RK1 w - - 2 15");
        for set in legal_moves(&record).unwrap() {
            let mut all: Vec<Square> = set.moves.iter().chain(&set.rejected).copied().collect();
            all.sort_by_key(|s| s.index());
            let mut expected =
                geometry::candidates(set.piece.piece, set.piece.color, set.piece.square);
            expected.sort_by_key(|s| s.index());
            assert_eq!(all, expected);
        }
    }

    #[test]
    fn has_legal_move_matches_enumeration() {
        for s in [
            PositionRecord::STARTPOS,
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 5 4",
            "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
        ] {
            let record = parse(s);
            let board = crate::build_board(&record).unwrap();
            let any = legal_moves_on(&board, &record).iter().any(|m| !m.is_empty());
            assert_eq!(has_legal_move(&board, &record), any, "{s}");
        }
    }
}
