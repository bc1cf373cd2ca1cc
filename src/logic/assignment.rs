//! Seating queued players on courts, and the auto-fill switch.

use crate::models::{CourtNumber, CourtStatus, OpenPlayError, OpenPlaySession};
use serde::Serialize;

/// Players seated on one court by an assignment pass.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CourtAssignment {
    pub court: CourtNumber,
    pub players: Vec<String>,
}

/// A court left unfilled because the queue was too short. Shown to the user, not an error.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CourtNotice {
    pub court: CourtNumber,
    pub needed: usize,
    pub available: usize,
}

impl std::fmt::Display for CourtNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Court {} needs {} more players, {} waiting",
            self.court, self.needed, self.available
        )
    }
}

/// Result of filling courts from the queue.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AssignSummary {
    pub seated: Vec<CourtAssignment>,
    pub notices: Vec<CourtNotice>,
}

impl AssignSummary {
    pub fn seated_count(&self) -> usize {
        self.seated.iter().map(|a| a.players.len()).sum()
    }
}

/// Fill the open seats of one court from the front of the queue.
///
/// Returns the players seated (empty if the court was already full). If the queue cannot
/// cover every open seat, nothing changes and `InsufficientPlayers` is returned.
pub fn assign_court(
    session: &mut OpenPlaySession,
    number: CourtNumber,
) -> Result<Vec<String>, OpenPlayError> {
    let idx = session
        .courts
        .iter()
        .position(|c| c.number == number)
        .ok_or(OpenPlayError::CourtNotFound(number))?;
    let seated = session.courts[idx].assign(&mut session.queue)?;
    if !seated.is_empty() {
        log::debug!("Court {}: seated {}", number, seated.join(", "));
    }
    Ok(seated)
}

/// Fill every court with open seats.
///
/// Partial courts (winners waiting for opponents) are backfilled first, then empty courts,
/// each group lowest court number first. Courts the queue cannot fill are skipped and
/// reported in `notices`; a later court needing fewer players may still be filled.
pub fn assign_courts(session: &mut OpenPlaySession) -> AssignSummary {
    let mut summary = AssignSummary::default();
    let mut order: Vec<(bool, CourtNumber)> = session
        .courts
        .iter()
        .map(|c| (c.status() != CourtStatus::Partial, c.number))
        .collect();
    order.sort_unstable();
    for (_, number) in order {
        match assign_court(session, number) {
            Ok(players) if players.is_empty() => {}
            Ok(players) => summary.seated.push(CourtAssignment { court: number, players }),
            Err(OpenPlayError::InsufficientPlayers { needed, available }) => {
                let notice = CourtNotice {
                    court: number,
                    needed,
                    available,
                };
                log::debug!("{}", notice);
                summary.notices.push(notice);
            }
            Err(e) => log::warn!("Court {}: {}", number, e),
        }
    }
    if !summary.seated.is_empty() {
        log::info!(
            "Session {}: seated {} players on {} court(s)",
            session.id,
            summary.seated_count(),
            summary.seated.len()
        );
    }
    summary
}

/// Turn auto-fill on or off. Turning it on fills open courts straight away.
pub fn toggle_auto_fill(session: &mut OpenPlaySession, enabled: bool) -> AssignSummary {
    session.auto_fill = enabled;
    log::info!("Session {}: auto-fill {}", session.id, if enabled { "on" } else { "off" });
    if enabled {
        assign_courts(session)
    } else {
        AssignSummary::default()
    }
}
