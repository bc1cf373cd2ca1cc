//! Append-only game history.

use crate::models::game::{CourtNumber, GameRecord, PlayFormat};
use crate::models::player::PlayerStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Finished games in the order they were recorded.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    records: Vec<GameRecord>,
    /// Games ever appended, including ones dropped by `clear`.
    games_recorded: u64,
}

/// One CSV row per game.
#[derive(Serialize)]
struct HistoryRow {
    game: u64,
    played_at: String,
    court: CourtNumber,
    format: PlayFormat,
    winners: String,
    losers: String,
}

impl From<&GameRecord> for HistoryRow {
    fn from(r: &GameRecord) -> Self {
        Self {
            game: r.sequence,
            played_at: r.played_at.to_rfc3339(),
            court: r.court,
            format: r.format,
            winners: r.winners.join(" & "),
            losers: r.losers.join(" & "),
        }
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: GameRecord) {
        self.games_recorded = self.games_recorded.max(record.sequence);
        self.records.push(record);
    }

    /// Records oldest first. Cloning the iterator, or calling again, replays from the start.
    pub fn list(&self) -> impl Iterator<Item = &GameRecord> + Clone + '_ {
        self.records.iter()
    }

    /// Sequence number the next appended record should carry.
    pub fn next_sequence(&self) -> u64 {
        self.games_recorded + 1
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records. Numbering continues where it left off.
    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Games, wins and losses per player, keyed by name.
    pub fn player_stats(&self) -> BTreeMap<String, PlayerStats> {
        let mut stats: BTreeMap<String, PlayerStats> = BTreeMap::new();
        for r in &self.records {
            for w in &r.winners {
                stats.entry(w.clone()).or_default().record_win();
            }
            for l in &r.losers {
                stats.entry(l.clone()).or_default().record_loss();
            }
        }
        stats
    }

    /// Export as CSV with a header row.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for r in &self.records {
            writer.serialize(HistoryRow::from(r))?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: u64, winners: &[&str], losers: &[&str]) -> GameRecord {
        GameRecord::new(
            seq,
            1,
            PlayFormat::Singles,
            winners.iter().map(|s| s.to_string()).collect(),
            losers.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn list_is_restartable() {
        let mut log = HistoryLog::new();
        log.append(record(1, &["A"], &["B"]));
        log.append(record(2, &["A"], &["C"]));

        let iter = log.list();
        let first: Vec<u64> = iter.clone().map(|r| r.sequence).collect();
        let second: Vec<u64> = iter.map(|r| r.sequence).collect();
        assert_eq!(first, vec![1, 2]);
        assert_eq!(first, second);
        assert_eq!(log.list().count(), 2);
        assert_eq!(log.next_sequence(), 3);
    }

    #[test]
    fn numbering_continues_after_clear() {
        let mut log = HistoryLog::new();
        log.append(record(1, &["A"], &["B"]));
        log.append(record(2, &["A"], &["C"]));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.next_sequence(), 3);
    }

    #[test]
    fn csv_has_header_and_one_row_per_game() {
        let mut log = HistoryLog::new();
        log.append(record(1, &["A"], &["B"]));
        let csv = log.to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("game,played_at,court,format,winners,losers"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("1,"));
        assert!(row.ends_with(",1,singles,A,B"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn stats_count_wins_and_losses() {
        let mut log = HistoryLog::new();
        log.append(record(1, &["A"], &["B"]));
        log.append(record(2, &["B"], &["A"]));
        log.append(record(3, &["A"], &["C"]));
        let stats = log.player_stats();
        assert_eq!(stats["A"].games, 3);
        assert_eq!(stats["A"].wins, 2);
        assert_eq!(stats["A"].losses, 1);
        assert_eq!(stats["C"].wins, 0);
    }
}
