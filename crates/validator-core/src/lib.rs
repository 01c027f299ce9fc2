//! Core value types for the chess validator.
//!
//! This crate provides the fundamental types shared by the engine:
//! - [`Piece`] and [`Color`] for piece identity
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`CastlingRights`] and [`Flank`]
//! - [`Move`] for from/to pairs
//! - [`PositionRecord`] parsing and serialization

mod castling;
mod color;
mod mov;
mod piece;
mod record;
mod square;

pub use castling::{CastlingRights, Flank};
pub use color::Color;
pub use mov::Move;
pub use piece::Piece;
pub use record::{PositionRecord, RecordError};
pub use square::{File, Rank, Square};
