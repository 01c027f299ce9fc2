//! Board builder.
//!
//! A [`Board`] is a dense table of 64 optional slots, one per [`Square`].
//! It is rebuilt from the record's board grid for every position and is only
//! ever edited while the move applier synthesizes the next board.

use crate::EngineError;
use std::fmt;
use validator_core::{Color, Piece, PositionRecord, Square};

/// A piece standing on a square.
///
/// Created once per occupied square when a board is built; a move produces a
/// new `BoardPiece` at the destination rather than moving this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardPiece {
    pub piece: Piece,
    pub color: Color,
    pub square: Square,
}

impl BoardPiece {
    #[inline]
    pub const fn new(piece: Piece, color: Color, square: Square) -> Self {
        BoardPiece {
            piece,
            color,
            square,
        }
    }

    /// Returns the record letter for this piece (uppercase for White).
    #[inline]
    pub const fn to_record_char(self) -> char {
        self.piece.to_record_char(self.color)
    }
}

impl fmt::Display for BoardPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.to_record_char(), self.square)
    }
}

/// Square-to-piece mapping for one position.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<(Piece, Color)>; 64],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Decodes a board grid such as `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    ///
    /// Digits skip that many empty squares, letters place a piece, and `/`
    /// must fall exactly on a rank boundary. The grid must cover all 64
    /// squares and hold at most one king per color.
    pub fn from_placement(grid: &str) -> Result<Self, EngineError> {
        let mut board = Board::empty();
        let mut cursor: u8 = 1;

        for c in grid.chars() {
            match c {
                '1'..='8' => {
                    cursor += c as u8 - b'0';
                    if cursor > 65 {
                        return Err(EngineError::MalformedRecord(format!(
                            "board grid '{}' runs past 64 squares",
                            grid
                        )));
                    }
                }
                '/' => {
                    if cursor == 1 || cursor > 64 || (cursor - 1) % 8 != 0 {
                        return Err(EngineError::MalformedRecord(format!(
                            "rank separator before square {} in '{}'",
                            cursor, grid
                        )));
                    }
                }
                _ => {
                    let (piece, color) = Piece::from_record_char(c).ok_or_else(|| {
                        EngineError::MalformedRecord(format!(
                            "invalid character '{}' in board grid '{}'",
                            c, grid
                        ))
                    })?;
                    let square = Square::from_index(cursor).ok_or_else(|| {
                        EngineError::MalformedRecord(format!(
                            "board grid '{}' runs past 64 squares",
                            grid
                        ))
                    })?;
                    if piece == Piece::King && board.king(color).is_some() {
                        return Err(EngineError::MalformedRecord(format!(
                            "more than one {} king in '{}'",
                            color, grid
                        )));
                    }
                    board.set(piece, color, square);
                    cursor += 1;
                }
            }
        }

        if cursor != 65 {
            return Err(EngineError::MalformedRecord(format!(
                "board grid '{}' covers {} squares, expected 64",
                grid,
                cursor - 1
            )));
        }

        Ok(board)
    }

    /// Encodes the board back into grid notation.
    pub fn to_placement(&self) -> String {
        let mut grid = String::with_capacity(71);
        let mut empty_run = 0u8;

        for sq in Square::all() {
            match self.squares[sq.slot()] {
                Some((piece, color)) => {
                    if empty_run > 0 {
                        grid.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    grid.push(piece.to_record_char(color));
                }
                None => empty_run += 1,
            }

            if sq.index() % 8 == 0 {
                if empty_run > 0 {
                    grid.push((b'0' + empty_run) as char);
                    empty_run = 0;
                }
                if sq.index() < 64 {
                    grid.push('/');
                }
            }
        }

        grid
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<BoardPiece> {
        self.squares[sq.slot()].map(|(piece, color)| BoardPiece::new(piece, color, sq))
    }

    /// Returns true if any piece stands on `sq`.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.slot()].is_some()
    }

    /// Returns true if a piece of `color` stands on `sq`.
    #[inline]
    pub fn is_color(&self, sq: Square, color: Color) -> bool {
        matches!(self.squares[sq.slot()], Some((_, c)) if c == color)
    }

    /// Places a piece, replacing anything already on the square.
    #[inline]
    pub fn set(&mut self, piece: Piece, color: Color, sq: Square) {
        self.squares[sq.slot()] = Some((piece, color));
    }

    /// Empties a square, returning what stood there.
    #[inline]
    pub fn clear(&mut self, sq: Square) -> Option<BoardPiece> {
        let previous = self.piece_at(sq);
        self.squares[sq.slot()] = None;
        previous
    }

    /// Iterates every piece in board order (a8 first).
    pub fn pieces(&self) -> impl Iterator<Item = BoardPiece> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq))
    }

    /// Iterates the pieces of one color in board order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = BoardPiece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    /// Returns the king of `color`, if present.
    pub fn king(&self, color: Color) -> Option<BoardPiece> {
        self.pieces_of(color).find(|p| p.piece == Piece::King)
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        self.squares.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns true if the board holds no pieces.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board({})", self.to_placement())?;
        for (row, chunk) in self.squares.chunks(8).enumerate() {
            write!(f, "{} ", 8 - row)?;
            for slot in chunk {
                match slot {
                    Some((piece, color)) => write!(f, "{} ", piece.to_record_char(*color))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Builds the board described by a record.
pub fn build_board(record: &PositionRecord) -> Result<Board, EngineError> {
    Board::from_placement(&record.placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const START_GRID: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn builds_start_position() {
        let board = Board::from_placement(START_GRID).unwrap();
        assert_eq!(board.len(), 32);
        assert_eq!(
            board.piece_at(Square::A8),
            Some(BoardPiece::new(Piece::Rook, Color::Black, Square::A8))
        );
        assert_eq!(
            board.piece_at(Square::E1),
            Some(BoardPiece::new(Piece::King, Color::White, Square::E1))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn digits_advance_the_cursor() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board.king(Color::Black).unwrap().square, Square::E8);
        assert_eq!(board.king(Color::White).unwrap().square, Square::E1);
    }

    #[test]
    fn pieces_are_in_board_order() {
        let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let squares: Vec<String> = board.pieces().map(|p| p.square.to_algebraic()).collect();
        assert_eq!(squares, ["a8", "e8", "h8", "a1", "e1", "h1"]);
    }

    #[test]
    fn rejects_short_grid() {
        assert!(matches!(
            Board::from_placement("8/8/8/8/8/8/8"),
            Err(EngineError::MalformedRecord(_))
        ));
    }

    #[test]
    fn rejects_long_grid() {
        assert!(matches!(
            Board::from_placement("8/8/8/8/8/8/8/8/8"),
            Err(EngineError::MalformedRecord(_))
        ));
        assert!(matches!(
            Board::from_placement("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(EngineError::MalformedRecord(_))
        ));
    }

    #[test]
    fn rejects_invalid_characters() {
        for grid in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR",
            "rnbqkbnr/pppppppp/0/8/8/8/PPPPPPPP/RNBQKBNR",
        ] {
            assert!(matches!(
                Board::from_placement(grid),
                Err(EngineError::MalformedRecord(_))
            ));
        }
    }

    #[test]
    fn rejects_misplaced_separator() {
        assert!(matches!(
            Board::from_placement("7/9/8/8/8/8/8/8"),
            Err(EngineError::MalformedRecord(_))
        ));
        assert!(matches!(
            Board::from_placement("/8/8/8/8/8/8/8/8"),
            Err(EngineError::MalformedRecord(_))
        ));
        assert!(matches!(
            Board::from_placement("8/8/8/8/8/8/8/8/"),
            Err(EngineError::MalformedRecord(_))
        ));
    }

    #[test]
    fn rejects_two_kings_of_one_color() {
        assert!(matches!(
            Board::from_placement("4k3/8/8/8/8/8/8/K3K3"),
            Err(EngineError::MalformedRecord(_))
        ));
    }

    #[test]
    fn serializes_trailing_empty_rank() {
        let board = Board::from_placement("4k3/8/8/8/8/8/4K3/8").unwrap();
        assert_eq!(board.to_placement(), "4k3/8/8/8/8/8/4K3/8");
    }

    #[test]
    fn serializes_empty_board() {
        assert_eq!(Board::empty().to_placement(), "8/8/8/8/8/8/8/8");
        assert!(Board::empty().is_empty());
    }

    #[test]
    fn set_and_clear() {
        let mut board = Board::empty();
        board.set(Piece::Queen, Color::White, sq("d4"));
        assert!(board.is_occupied(sq("d4")));
        assert!(board.is_color(sq("d4"), Color::White));
        assert!(!board.is_color(sq("d4"), Color::Black));
        let removed = board.clear(sq("d4")).unwrap();
        assert_eq!(removed.piece, Piece::Queen);
        assert!(!board.is_occupied(sq("d4")));
    }

    #[test]
    fn board_piece_display() {
        let knight = BoardPiece::new(Piece::Knight, Color::White, Square::G1);
        assert_eq!(knight.to_string(), "Ng1");
    }

    #[test]
    fn build_board_from_record() {
        let record = PositionRecord::parse(PositionRecord::STARTPOS).unwrap();
        let board = build_board(&record).unwrap();
        assert_eq!(board.to_placement(), START_GRID);
    }

    fn grid_strategy() -> impl Strategy<Value = String> {
        let slot = prop_oneof![
            6 => Just(None::<char>),
            1 => prop::sample::select(vec!['p', 'n', 'b', 'r', 'q', 'P', 'N', 'B', 'R', 'Q']).prop_map(Some),
        ];
        prop::collection::vec(slot, 64).prop_map(|slots| {
            let mut board = Board::empty();
            for (i, slot) in slots.into_iter().enumerate() {
                if let Some(c) = slot {
                    let (piece, color) = Piece::from_record_char(c).unwrap();
                    board.set(piece, color, Square::from_index(i as u8 + 1).unwrap());
                }
            }
            board.to_placement()
        })
    }

    proptest! {
        #[test]
        fn placement_roundtrips(grid in grid_strategy()) {
            let board = Board::from_placement(&grid).unwrap();
            prop_assert_eq!(board.to_placement(), grid);
        }
    }
}
