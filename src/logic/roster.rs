//! Adding players to the roster (new players join the back of the queue).

use crate::logic::assignment::{assign_courts, AssignSummary};
use crate::models::{OpenPlayError, OpenPlaySession};
use serde::Serialize;

/// Outcome of a bulk add.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AddPlayersSummary {
    pub added: Vec<String>,
    /// Names already on the roster or repeated in the input.
    pub skipped: Vec<String>,
    /// Seats filled afterwards when auto-fill is on.
    pub assigned: AssignSummary,
}

/// Add a single player. Unlike `add_players`, a duplicate name is an error.
pub fn add_player(session: &mut OpenPlaySession, name: &str) -> Result<AddPlayersSummary, OpenPlayError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(OpenPlayError::EmptyPlayerName);
    }
    if session.find_player(trimmed).is_some() {
        return Err(OpenPlayError::DuplicatePlayerName);
    }
    add_players(session, &[trimmed])
}

/// Add players in input order (one name per entry, e.g. one per line of a text box).
///
/// Names are trimmed and blanks dropped. Names already on the roster, compared
/// case-insensitively, or repeated in the input are skipped. If the remaining names would
/// take the roster past `max_players`, nobody is added and `RosterFull` is returned.
pub fn add_players<S: AsRef<str>>(
    session: &mut OpenPlaySession,
    names: &[S],
) -> Result<AddPlayersSummary, OpenPlayError> {
    let mut summary = AddPlayersSummary::default();
    for name in names.iter().map(|n| n.as_ref().trim()).filter(|n| !n.is_empty()) {
        let seen = session.find_player(name).is_some()
            || summary.added.iter().any(|a| a.eq_ignore_ascii_case(name));
        if seen {
            summary.skipped.push(name.to_string());
        } else {
            summary.added.push(name.to_string());
        }
    }

    let capacity = session.config.max_players;
    if session.roster.len() + summary.added.len() > capacity {
        return Err(OpenPlayError::RosterFull { capacity });
    }

    for name in &summary.added {
        session.roster.push(name.clone());
        session.queue.enqueue(name.clone());
    }
    log::info!(
        "Session {}: added {} player(s), skipped {}",
        session.id,
        summary.added.len(),
        summary.skipped.len()
    );

    if session.auto_fill && !summary.added.is_empty() {
        summary.assigned = assign_courts(session);
    }
    Ok(summary)
}
