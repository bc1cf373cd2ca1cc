//! Play format, Team, and the immutable GameRecord written for each finished game.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 1-based court number as shown to players ("Court 1", "Court 2", ...).
pub type CourtNumber = usize;

/// Singles (1v1, 2 seats) or doubles (2v2, 4 seats).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayFormat {
    Singles,
    #[default]
    Doubles,
}

impl PlayFormat {
    /// Number of seats on a court played in this format.
    pub fn seats(self) -> usize {
        match self {
            PlayFormat::Singles => 2,
            PlayFormat::Doubles => 4,
        }
    }

    /// Players per side.
    pub fn team_size(self) -> usize {
        self.seats() / 2
    }
}

impl std::fmt::Display for PlayFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayFormat::Singles => write!(f, "singles"),
            PlayFormat::Doubles => write!(f, "doubles"),
        }
    }
}

/// Which side of a full court won. Team One is the first half of the seats.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    One,
    Two,
}

/// One completed game. Never modified after it is appended to the history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// 1-based position in the session's history.
    pub sequence: u64,
    pub played_at: DateTime<Utc>,
    pub court: CourtNumber,
    pub format: PlayFormat,
    pub winners: Vec<String>,
    pub losers: Vec<String>,
}

impl GameRecord {
    pub fn new(
        sequence: u64,
        court: CourtNumber,
        format: PlayFormat,
        winners: Vec<String>,
        losers: Vec<String>,
    ) -> Self {
        Self {
            sequence,
            played_at: Utc::now(),
            court,
            format,
            winners,
            losers,
        }
    }
}
