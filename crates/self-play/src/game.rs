//! The self-play loop.

use rand::Rng;
use serde::Serialize;
use tracing::info;
use validator_core::PositionRecord;
use validator_engine::{api, EngineError};

/// Outcome of one self-play run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GameSummary {
    /// The record play started from.
    pub start: String,
    /// Every record reached, one per ply.
    pub records: Vec<String>,
    /// `1-0`, `0-1`, `1/2-1/2`, or null if the ply cap was hit first.
    pub result: Option<String>,
    pub plies: u32,
}

impl GameSummary {
    /// The last record reached, or the start if no move was played.
    pub fn final_record(&self) -> &str {
        self.records.last().unwrap_or(&self.start)
    }
}

/// Plays random legal moves from `start` until the game ends or `max_plies`.
pub fn play<R: Rng + ?Sized>(
    start: &str,
    max_plies: u32,
    rng: &mut R,
) -> Result<GameSummary, EngineError> {
    let mut summary = GameSummary {
        start: start.to_string(),
        records: Vec::new(),
        result: None,
        plies: 0,
    };

    loop {
        let current = summary.final_record().to_string();

        if let Some(result) = api::result(&current)? {
            info!(%result, plies = summary.plies, "game over");
            summary.result = Some(result.to_string());
            break;
        }
        if summary.plies >= max_plies {
            info!(plies = summary.plies, "ply limit reached");
            break;
        }

        let mover = PositionRecord::parse(&current)?.active;
        let movesets = api::find_next_moves(&current)?;
        let next = api::make_random_move(&current, &movesets, rng)?;

        summary.plies += 1;
        info!(ply = summary.plies, %mover, record = %next, "move played");
        summary.records.push(next);
    }

    Ok(summary)
}
