//! Chess piece kinds.
//!
//! A record letter encodes both kind and color; it is decoded once into a
//! `(Piece, Color)` pair and everything downstream matches on those.

use crate::Color;
use std::fmt;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All piece kinds in order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Lowercase record letters, indexed by discriminant.
    const LETTERS: [char; 6] = ['p', 'n', 'b', 'r', 'q', 'k'];

    /// Returns the record letter for this piece with the given color.
    pub const fn to_record_char(self, color: Color) -> char {
        let c = Self::LETTERS[self as usize];
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Decodes a record letter into a piece and color.
    ///
    /// Case carries the color; this is the only place it is inspected.
    pub const fn from_record_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let lower = c.to_ascii_lowercase();
        let mut i = 0;
        while i < Self::ALL.len() {
            if Self::LETTERS[i] == lower {
                return Some((Self::ALL[i], color));
            }
            i += 1;
        }
        None
    }

    /// Returns true for bishops, rooks, and queens.
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    /// Returns true if this piece alone can still force mate (queen, rook, or pawn).
    #[inline]
    pub const fn is_major_or_pawn(self) -> bool {
        matches!(self, Piece::Queen | Piece::Rook | Piece::Pawn)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_to_record_char() {
        assert_eq!(Piece::Pawn.to_record_char(Color::White), 'P');
        assert_eq!(Piece::Pawn.to_record_char(Color::Black), 'p');
        assert_eq!(Piece::King.to_record_char(Color::White), 'K');
        assert_eq!(Piece::Knight.to_record_char(Color::Black), 'n');
    }

    #[test]
    fn piece_from_record_char() {
        assert_eq!(
            Piece::from_record_char('P'),
            Some((Piece::Pawn, Color::White))
        );
        assert_eq!(
            Piece::from_record_char('q'),
            Some((Piece::Queen, Color::Black))
        );
        assert_eq!(Piece::from_record_char('x'), None);
        assert_eq!(Piece::from_record_char('3'), None);
    }

    #[test]
    fn record_char_roundtrip() {
        for piece in Piece::ALL {
            for color in [Color::White, Color::Black] {
                let c = piece.to_record_char(color);
                assert_eq!(Piece::from_record_char(c), Some((piece, color)));
            }
        }
    }

    #[test]
    fn is_slider() {
        assert!(!Piece::Pawn.is_slider());
        assert!(!Piece::Knight.is_slider());
        assert!(Piece::Bishop.is_slider());
        assert!(Piece::Rook.is_slider());
        assert!(Piece::Queen.is_slider());
        assert!(!Piece::King.is_slider());
    }

    #[test]
    fn major_or_pawn() {
        assert!(Piece::Queen.is_major_or_pawn());
        assert!(Piece::Rook.is_major_or_pawn());
        assert!(Piece::Pawn.is_major_or_pawn());
        assert!(!Piece::Bishop.is_major_or_pawn());
        assert!(!Piece::Knight.is_major_or_pawn());
        assert!(!Piece::King.is_major_or_pawn());
    }
}
