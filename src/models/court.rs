//! Court, Seat, and CourtStatus.

use crate::models::game::{CourtNumber, PlayFormat, Team};
use crate::models::queue::WaitQueue;
use crate::models::session::OpenPlayError;
use serde::{Deserialize, Serialize};

/// A seated player and their consecutive wins on this court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub player: String,
    pub streak: u32,
}

impl Seat {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            streak: 0,
        }
    }
}

/// Where a court is in its cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtStatus {
    /// Nobody seated.
    Empty,
    /// Winners stayed on after a game; waiting for backfill from the queue.
    Partial,
    /// All seats taken; a game is being played and awaits its result.
    InProgress,
}

/// One court. Seat order defines the teams: first half is Team One, second half Team Two.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub number: CourtNumber,
    pub format: PlayFormat,
    pub seats: Vec<Seat>,
}

impl Court {
    pub fn new(number: CourtNumber, format: PlayFormat) -> Self {
        Self {
            number,
            format,
            seats: Vec::with_capacity(format.seats()),
        }
    }

    pub fn status(&self) -> CourtStatus {
        if self.seats.is_empty() {
            CourtStatus::Empty
        } else if self.seats.len() < self.format.seats() {
            CourtStatus::Partial
        } else {
            CourtStatus::InProgress
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn open_seats(&self) -> usize {
        self.format.seats().saturating_sub(self.seats.len())
    }

    /// Occupant names in seat order.
    pub fn occupants(&self) -> Vec<String> {
        self.seats.iter().map(|s| s.player.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seats.iter().any(|s| s.player == name)
    }

    pub fn streak_of(&self, name: &str) -> Option<u32> {
        self.seats.iter().find(|s| s.player == name).map(|s| s.streak)
    }

    /// Team One and Team Two player names. None unless the court is full.
    pub fn teams(&self) -> Option<(Vec<String>, Vec<String>)> {
        if self.status() != CourtStatus::InProgress {
            return None;
        }
        let half = self.format.team_size();
        let names = self.occupants();
        let (one, two) = names.split_at(half);
        Some((one.to_vec(), two.to_vec()))
    }

    /// Winners and losers for a team selection. None unless the court is full.
    pub fn split_by_winner(&self, team: Team) -> Option<(Vec<String>, Vec<String>)> {
        let (one, two) = self.teams()?;
        Some(match team {
            Team::One => (one, two),
            Team::Two => (two, one),
        })
    }

    /// Fill every open seat from the front of the queue.
    ///
    /// All or nothing: if the queue cannot cover every open seat, nobody is seated and
    /// `InsufficientPlayers` is returned. Returns the newly seated players.
    pub fn assign(&mut self, queue: &mut WaitQueue) -> Result<Vec<String>, OpenPlayError> {
        let needed = self.open_seats();
        if needed == 0 {
            return Ok(Vec::new());
        }
        let arriving = queue.dequeue(needed)?;
        self.seats.extend(arriving.iter().cloned().map(Seat::new));
        Ok(arriving)
    }

    /// Take a player off the court. Their streak goes with the seat.
    pub(crate) fn unseat(&mut self, name: &str) -> Option<Seat> {
        let idx = self.seats.iter().position(|s| s.player == name)?;
        Some(self.seats.remove(idx))
    }

    /// Clear the court, returning the former occupants in seat order.
    pub(crate) fn vacate(&mut self) -> Vec<String> {
        self.seats.drain(..).map(|s| s.player).collect()
    }
}
