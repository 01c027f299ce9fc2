//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1".
//! Promotions are always to a queen, so `=Q` is optional and any other
//! promotion piece is rejected.

use crate::legality::{self, MoveSet};
use crate::{apply, attacks, geometry, Board, BoardPiece, EngineError};
use thiserror::Error;
use validator_core::{Color, File, Piece, PositionRecord, Rank, Square};

/// Error type for SAN parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("empty SAN string")]
    Empty,

    #[error("invalid SAN format: {0}")]
    InvalidFormat(String),

    /// No legal move matches the SAN.
    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),

    /// Multiple legal moves match the SAN.
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),

    #[error("only queen promotion is supported: {0}")]
    UnsupportedPromotion(String),
}

/// Parsed components of a SAN string.
#[derive(Debug)]
struct ParsedSan {
    piece: Piece,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to_square: Square,
    promotion: bool,
}

/// Resolves a SAN string to the moving piece and its destination.
pub fn san_to_move(
    board: &Board,
    record: &PositionRecord,
    san: &str,
) -> Result<(BoardPiece, Square), SanError> {
    let san = san.trim();
    if san.is_empty() {
        return Err(SanError::Empty);
    }

    let stripped = san.trim_end_matches(['+', '#', '!', '?']);

    match stripped {
        "O-O" | "0-0" => return find_castle(board, record, 2, san),
        "O-O-O" | "0-0-0" => return find_castle(board, record, -2, san),
        _ => {}
    }

    let parsed = parse_san_components(stripped)?;
    find_matching_move(board, record, &parsed, san)
}

fn parse_san_components(san: &str) -> Result<ParsedSan, SanError> {
    let mut rest = san;

    let piece = match rest.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let (piece, _) = Piece::from_record_char(c)
                .ok_or_else(|| SanError::InvalidFormat(format!("invalid piece character: {c}")))?;
            rest = &rest[1..];
            piece
        }
        Some(_) => Piece::Pawn,
        None => return Err(SanError::Empty),
    };

    let promotion = match rest.split_once('=') {
        Some((head, promo)) => {
            match promo {
                "Q" => {}
                "N" | "B" | "R" => return Err(SanError::UnsupportedPromotion(san.to_string())),
                _ => return Err(SanError::InvalidFormat(format!("invalid promotion: {san}"))),
            }
            rest = head;
            true
        }
        None => false,
    };

    let chars: Vec<char> = rest.chars().filter(|&c| c != 'x').collect();
    if chars.len() < 2 {
        return Err(SanError::InvalidFormat(format!("too short: {san}")));
    }

    let (disambig, dest) = chars.split_at(chars.len() - 2);
    let to_file = File::from_char(dest[0])
        .ok_or_else(|| SanError::InvalidFormat(format!("invalid file: {san}")))?;
    let to_rank = Rank::from_char(dest[1])
        .ok_or_else(|| SanError::InvalidFormat(format!("invalid rank: {san}")))?;

    let (from_file, from_rank) = parse_disambiguation(disambig, san)?;

    Ok(ParsedSan {
        piece,
        from_file,
        from_rank,
        to_square: Square::new(to_file, to_rank),
        promotion,
    })
}

fn parse_disambiguation(
    chars: &[char],
    san: &str,
) -> Result<(Option<File>, Option<Rank>), SanError> {
    let invalid = || SanError::InvalidFormat(format!("invalid disambiguation: {san}"));
    match *chars {
        [] => Ok((None, None)),
        [c] => match (File::from_char(c), Rank::from_char(c)) {
            (Some(f), _) => Ok((Some(f), None)),
            (None, Some(r)) => Ok((None, Some(r))),
            (None, None) => Err(invalid()),
        },
        [f, r] => {
            let file = File::from_char(f).ok_or_else(invalid)?;
            let rank = Rank::from_char(r).ok_or_else(invalid)?;
            Ok((Some(file), Some(rank)))
        }
        _ => Err(invalid()),
    }
}

fn find_castle(
    board: &Board,
    record: &PositionRecord,
    files: i8,
    san: &str,
) -> Result<(BoardPiece, Square), SanError> {
    board
        .king(record.active)
        .and_then(|king| {
            let dest = king.square.offset(files, 0)?;
            legality::is_legal(board, record, king, dest).then_some((king, dest))
        })
        .ok_or_else(|| SanError::NoMatchingMove(san.to_string()))
}

fn find_matching_move(
    board: &Board,
    record: &PositionRecord,
    parsed: &ParsedSan,
    san: &str,
) -> Result<(BoardPiece, Square), SanError> {
    let promotes = |piece: BoardPiece| {
        let rank = parsed.to_square.rank().number();
        piece.piece == Piece::Pawn && (rank == 1 || rank == 8)
    };

    let matching: Vec<BoardPiece> = board
        .pieces_of(record.active)
        .filter(|p| p.piece == parsed.piece)
        .filter(|p| parsed.from_file.map_or(true, |f| p.square.file() == f))
        .filter(|p| parsed.from_rank.map_or(true, |r| p.square.rank() == r))
        .filter(|p| !parsed.promotion || promotes(*p))
        .filter(|p| !geometry::is_castle(p.piece, p.square, parsed.to_square))
        .filter(|p| legality::is_legal(board, record, *p, parsed.to_square))
        .collect();

    match matching.as_slice() {
        [] => Err(SanError::NoMatchingMove(san.to_string())),
        [piece] => Ok((*piece, parsed.to_square)),
        _ => Err(SanError::AmbiguousMove(san.to_string())),
    }
}

/// Writes the SAN for a legal move, including the check or mate suffix.
pub fn move_to_san(
    board: &Board,
    record: &PositionRecord,
    piece: BoardPiece,
    dest: Square,
) -> String {
    let mut san = String::new();

    if geometry::is_castle(piece.piece, piece.square, dest) {
        let kingside = dest.file().index() > piece.square.file().index();
        san.push_str(if kingside { "O-O" } else { "O-O-O" });
        return add_check_suffix(board, record, piece, dest, san);
    }

    if piece.piece != Piece::Pawn {
        san.push(piece.piece.to_record_char(Color::White));
        san.push_str(&disambiguation(board, record, piece, dest));
    }

    if legality::capture_target(board, piece, dest).is_some() {
        if piece.piece == Piece::Pawn {
            san.push(piece.square.file().to_char());
        }
        san.push('x');
    }

    san.push_str(&dest.to_algebraic());

    let rank = dest.rank().number();
    if piece.piece == Piece::Pawn && (rank == 1 || rank == 8) {
        san.push_str("=Q");
    }

    add_check_suffix(board, record, piece, dest, san)
}

fn disambiguation(
    board: &Board,
    record: &PositionRecord,
    piece: BoardPiece,
    dest: Square,
) -> String {
    let rivals: Vec<BoardPiece> = board
        .pieces_of(piece.color)
        .filter(|p| p.piece == piece.piece && p.square != piece.square)
        .filter(|p| legality::is_legal(board, record, *p, dest))
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let file = piece.square.file();
    let rank = piece.square.rank();
    if rivals.iter().all(|p| p.square.file() != file) {
        return file.to_char().to_string();
    }
    if rivals.iter().all(|p| p.square.rank() != rank) {
        return rank.to_char().to_string();
    }
    piece.square.to_algebraic()
}

fn add_check_suffix(
    board: &Board,
    record: &PositionRecord,
    piece: BoardPiece,
    dest: Square,
    mut san: String,
) -> String {
    let next = apply::next_board(board, piece, dest);
    let defender = piece.color.opposite();
    if attacks::king_in_check(&next, defender) {
        let reply = PositionRecord {
            active: defender,
            en_passant: None,
            ..record.clone()
        };
        if legality::has_legal_move(&next, &reply) {
            san.push('+');
        } else {
            san.push('#');
        }
    }
    san
}

/// Plays `moves` from the standard initial position.
pub fn replay<S: AsRef<str>>(moves: &[S]) -> Result<PositionRecord, EngineError> {
    replay_from(&PositionRecord::default(), moves)
}

/// Plays `moves` starting from `record`.
pub fn replay_from<S: AsRef<str>>(
    record: &PositionRecord,
    moves: &[S],
) -> Result<PositionRecord, EngineError> {
    let mut current = record.clone();
    for san in moves {
        let board = crate::build_board(&current)?;
        let (piece, dest) = san_to_move(&board, &current, san.as_ref())?;
        current = apply::apply_move_record(&board, &current, piece, dest)?;
    }
    Ok(current)
}

/// The SAN for every legal move in a move set, in destination order.
pub fn move_set_to_san(board: &Board, record: &PositionRecord, set: &MoveSet) -> Vec<String> {
    set.moves
        .iter()
        .map(|&dest| move_to_san(board, record, set.piece, dest))
        .collect()
}
