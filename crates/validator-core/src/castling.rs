//! Castling rights.

use crate::{Color, Square};
use std::fmt;

/// The two flanks a king can castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flank {
    /// Toward the h-file (O-O).
    Kingside,
    /// Toward the a-file (O-O-O).
    Queenside,
}

impl Flank {
    /// Square the king must start on for this color to castle.
    pub const fn king_home(color: Color) -> Square {
        match color {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    /// Corner square the castling rook starts on.
    pub const fn rook_home(self, color: Color) -> Square {
        match (self, color) {
            (Flank::Kingside, Color::White) => Square::H1,
            (Flank::Queenside, Color::White) => Square::A1,
            (Flank::Kingside, Color::Black) => Square::H8,
            (Flank::Queenside, Color::Black) => Square::A8,
        }
    }
}

/// Castling rights flags, one bit per `KQkq` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, flank: Flank) -> u8 {
        match (color, flank) {
            (Color::White, Flank::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, Flank::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, Flank::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, Flank::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if the given side may still castle toward `flank`.
    #[inline]
    pub const fn allows(self, color: Color, flank: Flank) -> bool {
        (self.0 & Self::flag(color, flank)) != 0
    }

    /// Drops the right for one side and flank.
    #[inline]
    pub fn remove(&mut self, color: Color, flank: Flank) {
        self.0 &= !Self::flag(color, flank);
    }

    /// Returns true if no rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses the record field (`KQkq` subset or `-`).
    pub fn parse(field: &str) -> Option<Self> {
        if field == "-" {
            return Some(Self::NONE);
        }
        if field.is_empty() {
            return None;
        }
        let mut flags = 0u8;
        for c in field.chars() {
            flags |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => return None,
            };
        }
        Some(Self::new(flags))
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (color, flank, code) in [
            (Color::White, Flank::Kingside, 'K'),
            (Color::White, Flank::Queenside, 'Q'),
            (Color::Black, Flank::Kingside, 'k'),
            (Color::Black, Flank::Queenside, 'q'),
        ] {
            if self.allows(color, flank) {
                write!(f, "{}", code)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.allows(Color::White, Flank::Kingside));
        assert!(rights.allows(Color::Black, Flank::Queenside));

        rights.remove(Color::White, Flank::Kingside);
        assert!(!rights.allows(Color::White, Flank::Kingside));
        assert!(rights.allows(Color::White, Flank::Queenside));
    }

    #[test]
    fn castling_rights_none() {
        let rights = CastlingRights::NONE;
        assert!(!rights.allows(Color::White, Flank::Kingside));
        assert!(!rights.allows(Color::Black, Flank::Queenside));
        assert!(rights.is_empty());
        assert_eq!(rights.to_string(), "-");
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(CastlingRights::parse("KQkq"), Some(CastlingRights::ALL));
        assert_eq!(CastlingRights::parse("-"), Some(CastlingRights::NONE));
        assert_eq!(CastlingRights::parse("qK").unwrap().to_string(), "Kq");
        assert_eq!(CastlingRights::parse("KX"), None);
        assert_eq!(CastlingRights::parse(""), None);
    }

    #[test]
    fn removing_every_right_prints_dash() {
        let mut rights = CastlingRights::parse("Kk").unwrap();
        rights.remove(Color::White, Flank::Kingside);
        rights.remove(Color::Black, Flank::Kingside);
        assert_eq!(rights.to_string(), "-");
    }

    #[test]
    fn home_squares() {
        assert_eq!(Flank::king_home(Color::White), Square::E1);
        assert_eq!(Flank::Queenside.rook_home(Color::Black), Square::A8);
        assert_eq!(Flank::Kingside.rook_home(Color::White), Square::H1);
    }
}
