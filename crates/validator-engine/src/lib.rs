//! Chess legality engine over position records.
//!
//! This crate provides:
//! - [`Board`] - a square-to-piece table rebuilt from each record
//! - Geometric move candidates and the path/attack oracle
//! - [`legal_moves`] - per-piece legal destinations for the side to move
//! - [`apply_move`] - the next record after a move
//! - [`outcome`] - checkmate, stalemate, fifty-move, and material draws
//! - SAN replay and a record-string facade in [`api`]
//!
//! Every operation is a pure function of its inputs. Boards are owned by the
//! call that built them and king-safety probes run on a copy.
//!
//! # Example
//!
//! ```
//! use validator_engine::{api, GameResult};
//! use validator_core::PositionRecord;
//!
//! let moves = api::find_next_moves(PositionRecord::STARTPOS).unwrap();
//! let total: usize = moves.iter().map(|set| set.len()).sum();
//! assert_eq!(total, 20);
//!
//! let knight = moves.iter().find(|set| set.piece.to_string() == "Ng1").unwrap();
//! let next = api::make_move(PositionRecord::STARTPOS, knight.piece, knight.moves[0]).unwrap();
//! assert!(next.ends_with(" b KQkq - 1 1"));
//!
//! let mate = "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 5 4";
//! assert_eq!(api::result(mate).unwrap(), Some(GameResult::WhiteWins));
//! ```

pub mod api;
mod apply;
mod attacks;
mod board;
mod error;
pub mod geometry;
mod legality;
mod outcome;
pub mod perft;
pub mod san;

pub use apply::{apply_move, apply_move_record, next_board};
pub use attacks::{attacks_square, king_in_check, path_clear, square_attacked, squares_between};
pub use board::{build_board, Board, BoardPiece};
pub use error::EngineError;
pub use legality::{
    capture_target, has_legal_move, is_legal, king_will_be_safe, legal_moves, legal_moves_on,
    moves_for_piece, MoveSet,
};
pub use outcome::{
    is_insufficient_material, outcome, outcome_on, DrawReason, GameResult, FIFTY_MOVE_PLIES,
};
pub use san::{move_to_san, replay, replay_from, san_to_move, SanError};
