//! Result processing: record the game, rotate losers and capped winners to the queue, backfill.

use crate::logic::assignment::assign_court;
use crate::models::{
    Court, CourtNumber, CourtStatus, GameRecord, OpenPlayError, OpenPlaySession, ResultError, Team,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Winners and losers of one game, as submitted by the caller.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub court: CourtNumber,
    pub winners: Vec<String>,
    pub losers: Vec<String>,
}

/// What a submitted result did to its court and the queue.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RotationOutcome {
    pub record: GameRecord,
    /// Players sent to the back of the queue, in the order they joined it.
    pub rotated_off: Vec<String>,
    /// Players seated by auto-fill afterwards.
    pub seated: Vec<String>,
}

/// Check that `winners` and `losers` split the court's occupants exactly in half.
///
/// Names match occupants case-insensitively. Returns both sides as occupant names in seat order.
fn validate_result(
    court: &Court,
    winners: &[String],
    losers: &[String],
) -> Result<(Vec<String>, Vec<String>), ResultError> {
    if court.status() != CourtStatus::InProgress {
        return Err(ResultError::CourtNotInProgress);
    }
    let expected = court.format.team_size();
    if winners.len() != expected || losers.len() != expected {
        return Err(ResultError::UnevenSides {
            expected,
            winners: winners.len(),
            losers: losers.len(),
        });
    }

    let occupants = court.occupants();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut winner_set: HashSet<&str> = HashSet::new();
    for (name, is_winner) in winners
        .iter()
        .map(|n| (n, true))
        .chain(losers.iter().map(|n| (n, false)))
    {
        let occupant = occupants
            .iter()
            .find(|o| o.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ResultError::NotOnCourt(name.clone()))?;
        if !seen.insert(occupant.as_str()) {
            return Err(ResultError::ListedTwice(occupant.clone()));
        }
        if is_winner {
            winner_set.insert(occupant.as_str());
        }
    }

    let (w, l): (Vec<String>, Vec<String>) = occupants
        .iter()
        .cloned()
        .partition(|o| winner_set.contains(o.as_str()));
    Ok((w, l))
}

/// Record a finished game on one court and rotate its players.
///
/// Each winner's streak goes up by one; a winner reaching `max_streak` leaves the court.
/// Capped winners, then losers, join the back of the queue in seat order with their streaks
/// reset. Nothing changes if the result does not exactly split the occupants. With auto-fill
/// on, the vacated seats are refilled from the queue front.
pub fn submit_result(
    session: &mut OpenPlaySession,
    result: GameResult,
) -> Result<RotationOutcome, OpenPlayError> {
    let number = result.court;
    let max_streak = session.config.max_streak;
    let court = session.court(number)?;
    let (winners, losers) = validate_result(court, &result.winners, &result.losers)
        .map_err(|reason| OpenPlayError::Validation { court: number, reason })?;
    let record = GameRecord::new(
        session.history.next_sequence(),
        number,
        court.format,
        winners.clone(),
        losers.clone(),
    );

    let court = session.court_mut(number)?;
    let mut rotated_off = Vec::new();
    for seat in court.seats.iter_mut().filter(|s| winners.contains(&s.player)) {
        seat.streak += 1;
        if seat.streak >= max_streak {
            rotated_off.push(seat.player.clone());
        }
    }
    rotated_off.extend(losers.iter().cloned());
    for name in &rotated_off {
        court.unseat(name);
    }
    for name in &rotated_off {
        session.queue.enqueue(name.clone());
    }

    log::info!(
        "Session {}: game {} on court {}: {} beat {}",
        session.id,
        record.sequence,
        number,
        record.winners.join(" & "),
        record.losers.join(" & ")
    );
    session.history.append(record.clone());

    // Rotated players are queued before the refill, so the queue always covers the open seats.
    let seated = if session.auto_fill {
        assign_court(session, number).unwrap_or_else(|e| {
            log::warn!("Court {}: refill skipped: {}", number, e);
            Vec::new()
        })
    } else {
        Vec::new()
    };
    Ok(RotationOutcome {
        record,
        rotated_off,
        seated,
    })
}

/// Submit a result by naming the winning side (Team One = first half of the seats).
pub fn submit_team_result(
    session: &mut OpenPlaySession,
    number: CourtNumber,
    team: Team,
) -> Result<RotationOutcome, OpenPlayError> {
    let result = team_result(session, number, team)?;
    submit_result(session, result)
}

fn team_result(
    session: &OpenPlaySession,
    number: CourtNumber,
    team: Team,
) -> Result<GameResult, OpenPlayError> {
    let (winners, losers) = session
        .court(number)?
        .split_by_winner(team)
        .ok_or(OpenPlayError::Validation {
            court: number,
            reason: ResultError::CourtNotInProgress,
        })?;
    Ok(GameResult {
        court: number,
        winners,
        losers,
    })
}

/// Apply results for several courts as one step.
///
/// Results are applied in ascending court order whatever order they arrive in, so the queue
/// comes out the same for the same input. If any result is rejected, the session is left
/// exactly as it was.
pub fn batch_submit(
    session: &mut OpenPlaySession,
    mut results: Vec<GameResult>,
) -> Result<Vec<RotationOutcome>, OpenPlayError> {
    results.sort_by_key(|r| r.court);
    if let Some(dup) = results.windows(2).find(|w| w[0].court == w[1].court) {
        return Err(OpenPlayError::Validation {
            court: dup[0].court,
            reason: ResultError::DuplicateCourt,
        });
    }

    let mut staged = session.clone();
    let outcomes = results
        .into_iter()
        .map(|r| submit_result(&mut staged, r))
        .collect::<Result<Vec<_>, _>>()?;
    *session = staged;
    log::info!("Session {}: applied {} result(s)", session.id, outcomes.len());
    Ok(outcomes)
}

/// Apply a winning-team selection for each listed court as one step (see `batch_submit`).
pub fn submit_all_winners(
    session: &mut OpenPlaySession,
    selections: &[(CourtNumber, Team)],
) -> Result<Vec<RotationOutcome>, OpenPlayError> {
    let results = selections
        .iter()
        .map(|&(number, team)| team_result(session, number, team))
        .collect::<Result<Vec<_>, _>>()?;
    batch_submit(session, results)
}

/// Send everyone on a court back to the queue (seat order) without recording a game.
///
/// Streaks are reset. With auto-fill on, the court is refilled straight away.
pub fn reset_court(
    session: &mut OpenPlaySession,
    number: CourtNumber,
) -> Result<Vec<String>, OpenPlayError> {
    let returned = session.court_mut(number)?.vacate();
    for name in &returned {
        session.queue.enqueue(name.clone());
    }
    log::info!("Session {}: reset court {}", session.id, number);
    if session.auto_fill {
        if let Err(e) = assign_court(session, number) {
            log::info!("Court {}: {}", number, e);
        }
    }
    Ok(returned)
}
