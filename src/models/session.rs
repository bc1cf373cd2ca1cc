//! OpenPlaySession: the owned state of one open play session, plus its config and errors.

use crate::models::court::{Court, CourtStatus};
use crate::models::game::{CourtNumber, GameRecord, PlayFormat};
use crate::models::history::HistoryLog;
use crate::models::player::{PlayerLocation, PlayerStats};
use crate::models::queue::WaitQueue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Why a submitted result was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResultError {
    /// The court has no full game on it.
    CourtNotInProgress,
    /// Each side must hold exactly half the seats.
    UnevenSides { expected: usize, winners: usize, losers: usize },
    /// A named player is not seated on this court.
    NotOnCourt(String),
    /// A player appears more than once across winners and losers.
    ListedTwice(String),
    /// The same court appears twice in one batch.
    DuplicateCourt,
}

impl std::fmt::Display for ResultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultError::CourtNotInProgress => write!(f, "no game in progress"),
            ResultError::UnevenSides { expected, winners, losers } => write!(
                f,
                "expected {} winners and {} losers, got {} and {}",
                expected, expected, winners, losers
            ),
            ResultError::NotOnCourt(name) => write!(f, "{} is not on this court", name),
            ResultError::ListedTwice(name) => write!(f, "{} is listed more than once", name),
            ResultError::DuplicateCourt => write!(f, "court submitted more than once"),
        }
    }
}

/// Errors that can occur during open play operations. None are fatal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OpenPlayError {
    /// Not enough players queued to fill the open seats.
    InsufficientPlayers { needed: usize, available: usize },
    /// A result does not exactly split the court's occupants into winners and losers.
    Validation { court: CourtNumber, reason: ResultError },
    /// Adding the players would exceed the roster limit.
    RosterFull { capacity: usize },
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player name is empty after trimming.
    EmptyPlayerName,
    PlayerNotFound(String),
    /// Seated players cannot be removed; reset their court first.
    PlayerOnCourt { name: String, court: CourtNumber },
    CourtNotFound(CourtNumber),
    /// Court format can only change while nobody is seated.
    CourtNotEmpty(CourtNumber),
}

impl std::fmt::Display for OpenPlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenPlayError::InsufficientPlayers { needed, available } => write!(
                f,
                "Need {} queued players to fill the court, only {} waiting",
                needed, available
            ),
            OpenPlayError::Validation { court, reason } => {
                write!(f, "Invalid result for court {}: {}", court, reason)
            }
            OpenPlayError::RosterFull { capacity } => {
                write!(f, "Roster is full (max {} players)", capacity)
            }
            OpenPlayError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            OpenPlayError::EmptyPlayerName => write!(f, "Player name cannot be empty"),
            OpenPlayError::PlayerNotFound(name) => write!(f, "Player not found: {}", name),
            OpenPlayError::PlayerOnCourt { name, court } => {
                write!(f, "{} is playing on court {}; reset the court first", name, court)
            }
            OpenPlayError::CourtNotFound(n) => write!(f, "No court {}", n),
            OpenPlayError::CourtNotEmpty(n) => write!(f, "Court {} is not empty", n),
        }
    }
}

impl std::error::Error for OpenPlayError {}

/// Session limits. Defaults match a typical club evening: 3 courts, 20 players, winners stay 2 games.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OpenPlayConfig {
    pub courts: usize,
    pub max_players: usize,
    /// Consecutive wins after which a winner rotates off anyway.
    pub max_streak: u32,
    pub default_format: PlayFormat,
}

impl Default for OpenPlayConfig {
    fn default() -> Self {
        Self {
            courts: 3,
            max_players: 20,
            max_streak: 2,
            default_format: PlayFormat::Doubles,
        }
    }
}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// Full state of one open play session: roster, queue, courts, and history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpenPlaySession {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub config: OpenPlayConfig,
    /// Everyone who has joined, in join order.
    pub roster: Vec<String>,
    pub queue: WaitQueue,
    pub courts: Vec<Court>,
    pub history: HistoryLog,
    /// Refill vacated seats immediately after each result.
    pub auto_fill: bool,
}

impl OpenPlaySession {
    /// Create an empty session with `config.courts` empty courts.
    pub fn new(config: OpenPlayConfig) -> Self {
        let courts = (1..=config.courts)
            .map(|n| Court::new(n, config.default_format))
            .collect();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            config,
            roster: Vec::new(),
            queue: WaitQueue::new(),
            courts,
            history: HistoryLog::new(),
            auto_fill: false,
        }
    }

    pub fn court(&self, number: CourtNumber) -> Result<&Court, OpenPlayError> {
        self.courts
            .iter()
            .find(|c| c.number == number)
            .ok_or(OpenPlayError::CourtNotFound(number))
    }

    pub fn court_mut(&mut self, number: CourtNumber) -> Result<&mut Court, OpenPlayError> {
        self.courts
            .iter_mut()
            .find(|c| c.number == number)
            .ok_or(OpenPlayError::CourtNotFound(number))
    }

    /// Exact roster name matching `name` case-insensitively.
    pub fn find_player(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.roster
            .iter()
            .find(|p| p.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Where a rostered player currently is.
    pub fn locate(&self, name: &str) -> Result<PlayerLocation, OpenPlayError> {
        let name = self
            .find_player(name)
            .ok_or_else(|| OpenPlayError::PlayerNotFound(name.to_string()))?;
        if let Some(position) = self.queue.position(name) {
            return Ok(PlayerLocation::Queue { position });
        }
        self.courts
            .iter()
            .find_map(|c| {
                c.streak_of(name).map(|streak| PlayerLocation::Court {
                    number: c.number,
                    streak,
                })
            })
            .ok_or_else(|| OpenPlayError::PlayerNotFound(name.to_string()))
    }

    /// Remove a waiting player from the roster and queue.
    ///
    /// Refused with `InsufficientPlayers` if the players left in the queue could no longer
    /// backfill the partial courts.
    pub fn remove_player(&mut self, name: &str) -> Result<(), OpenPlayError> {
        let name = self
            .find_player(name)
            .ok_or_else(|| OpenPlayError::PlayerNotFound(name.to_string()))?
            .to_string();
        if let Some(court) = self.courts.iter().find(|c| c.contains(&name)) {
            return Err(OpenPlayError::PlayerOnCourt {
                name,
                court: court.number,
            });
        }
        let backfill: usize = self
            .courts
            .iter()
            .filter(|c| c.status() == CourtStatus::Partial)
            .map(|c| c.open_seats())
            .sum();
        let remaining = self.queue.len().saturating_sub(1);
        if remaining < backfill {
            return Err(OpenPlayError::InsufficientPlayers {
                needed: backfill,
                available: remaining,
            });
        }
        self.queue.remove(&name);
        self.roster.retain(|p| *p != name);
        log::info!("Session {}: removed player {}", self.id, name);
        Ok(())
    }

    /// Change a court between singles and doubles. Only while the court is empty.
    pub fn set_court_format(
        &mut self,
        number: CourtNumber,
        format: PlayFormat,
    ) -> Result<(), OpenPlayError> {
        let court = self.court_mut(number)?;
        if !court.is_empty() {
            return Err(OpenPlayError::CourtNotEmpty(number));
        }
        court.format = format;
        log::info!("Session {}: court {} set to {}", self.id, number, format);
        Ok(())
    }

    /// Start over: no players, no games. Keeps config, court formats, and the auto-fill setting.
    /// Game numbering carries on from before the reset.
    pub fn reset_everything(&mut self) {
        self.roster.clear();
        self.queue.clear();
        for court in &mut self.courts {
            court.vacate();
        }
        self.history.clear();
        log::info!("Session {}: reset everything", self.id);
    }

    pub fn get_queue(&self) -> Vec<String> {
        self.queue.to_vec()
    }

    pub fn get_courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn get_history(&self) -> impl Iterator<Item = &GameRecord> + Clone + '_ {
        self.history.list()
    }

    pub fn player_stats(&self) -> BTreeMap<String, PlayerStats> {
        self.history.player_stats()
    }
}
