//! Player-facing views: where a player is right now, and their record so far.

use crate::models::game::CourtNumber;
use serde::{Deserialize, Serialize};

/// Where a rostered player currently is.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "at", rename_all = "snake_case")]
pub enum PlayerLocation {
    /// Waiting; position 0 is next up.
    Queue { position: usize },
    Court { number: CourtNumber, streak: u32 },
}

/// Statistics view of a player derived from the game history (for API / display).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerStats {
    pub fn record_win(&mut self) {
        self.games += 1;
        self.wins += 1;
    }

    pub fn record_loss(&mut self) {
        self.games += 1;
        self.losses += 1;
    }
}
