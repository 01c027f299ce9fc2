//! Position records: the six-field textual snapshot of a game.
//!
//! `<board-grid> <active-color> <castling-rights> <en-passant> <halfmove> <fullmove>`
//!
//! The board grid is kept verbatim here. Decoding it into squares (and
//! rejecting malformed grids) is the board builder's job in the engine.

use crate::{CastlingRights, Color, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a position record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid record: expected 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A parsed position record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    /// Board grid (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").
    pub placement: String,
    /// The side to move.
    pub active: Color,
    /// Remaining castling rights.
    pub castling: CastlingRights,
    /// Square a pawn skipped over on the previous ply, if any.
    pub en_passant: Option<Square>,
    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Starts at 1 and increments after each Black move.
    pub fullmove_number: u32,
}

impl PositionRecord {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a record string.
    pub fn parse(record: &str) -> Result<Self, RecordError> {
        let parts: Vec<&str> = record.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(RecordError::InvalidPartCount(parts.len()));
        }

        let active = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(RecordError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingRights::parse(parts[2])
            .ok_or_else(|| RecordError::InvalidCastlingRights(parts[2].to_string()))?;

        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| RecordError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| RecordError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(PositionRecord {
            placement: parts[0].to_string(),
            active,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, RecordError> {
        if field == "-" {
            return Ok(None);
        }

        match Square::from_algebraic(field) {
            Some(sq) if matches!(sq.rank().number(), 3 | 6) => Ok(Some(sq)),
            _ => Err(RecordError::InvalidEnPassantSquare(field.to_string())),
        }
    }
}

impl fmt::Display for PositionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.placement,
            self.active.to_char(),
            self.castling
        )?;
        match self.en_passant {
            Some(sq) => write!(f, "{}", sq)?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

impl FromStr for PositionRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Default for PositionRecord {
    fn default() -> Self {
        PositionRecord {
            placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".to_string(),
            active: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}
