//! Data structures for open play: courts, queue, history, and session state.

mod court;
mod game;
mod history;
mod player;
mod queue;
mod session;

pub use court::{Court, CourtStatus, Seat};
pub use game::{CourtNumber, GameRecord, PlayFormat, Team};
pub use history::HistoryLog;
pub use player::{PlayerLocation, PlayerStats};
pub use queue::WaitQueue;
pub use session::{OpenPlayConfig, OpenPlayError, OpenPlaySession, ResultError, SessionId};
