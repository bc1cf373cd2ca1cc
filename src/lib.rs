//! Pickleball open play scheduler: library with models and court rotation logic.

pub mod logic;
pub mod models;

pub use logic::{
    add_player, add_players, assign_court, assign_courts, batch_submit, reset_court,
    submit_all_winners, submit_result, submit_team_result, toggle_auto_fill, AddPlayersSummary,
    AssignSummary, CourtAssignment, CourtNotice, GameResult, RotationOutcome,
};
pub use models::{
    Court, CourtNumber, CourtStatus, GameRecord, HistoryLog, OpenPlayConfig, OpenPlayError,
    OpenPlaySession, PlayFormat, PlayerLocation, PlayerStats, ResultError, Seat, SessionId, Team,
    WaitQueue,
};
