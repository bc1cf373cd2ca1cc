//! Open play business logic: roster, court assignment, and result rotation.

mod assignment;
mod roster;
mod rotation;

pub use assignment::{
    assign_court, assign_courts, toggle_auto_fill, AssignSummary, CourtAssignment, CourtNotice,
};
pub use roster::{add_player, add_players, AddPlayersSummary};
pub use rotation::{
    batch_submit, reset_court, submit_all_winners, submit_result, submit_team_result, GameResult,
    RotationOutcome,
};
