//! Integration tests for the roster: adding, removing, locating, and resetting.

use pickleball_open_play::{
    add_player, add_players, assign_courts, submit_team_result, OpenPlayConfig, OpenPlayError,
    OpenPlaySession, PlayFormat, PlayerLocation, Team,
};

fn session() -> OpenPlaySession {
    OpenPlaySession::new(OpenPlayConfig::default())
}

#[test]
fn added_players_join_queue_in_order() {
    let mut s = session();
    let summary = add_players(&mut s, &["  Ann ", "", "Bob", "   ", "Cal"]).unwrap();
    assert_eq!(summary.added, vec!["Ann", "Bob", "Cal"]);
    assert!(summary.skipped.is_empty());
    assert_eq!(s.roster, vec!["Ann", "Bob", "Cal"]);
    assert_eq!(s.get_queue(), vec!["Ann", "Bob", "Cal"]);
}

#[test]
fn duplicates_are_skipped_case_insensitively() {
    let mut s = session();
    add_players(&mut s, &["Ann"]).unwrap();
    let summary = add_players(&mut s, &["ann", "Bob", "BOB"]).unwrap();
    assert_eq!(summary.added, vec!["Bob"]);
    assert_eq!(summary.skipped, vec!["ann", "BOB"]);
    assert_eq!(s.roster.len(), 2);
}

#[test]
fn single_add_rejects_duplicates_and_blanks() {
    let mut s = session();
    add_player(&mut s, "Ann").unwrap();
    assert_eq!(add_player(&mut s, "ANN"), Err(OpenPlayError::DuplicatePlayerName));
    assert_eq!(add_player(&mut s, "  "), Err(OpenPlayError::EmptyPlayerName));
}

#[test]
fn roster_full_rejects_whole_batch() {
    let mut s = session();
    let first: Vec<String> = (0..18).map(|i| format!("P{i}")).collect();
    add_players(&mut s, &first).unwrap();

    let err = add_players(&mut s, &["X", "Y", "Z"]).unwrap_err();
    assert_eq!(err, OpenPlayError::RosterFull { capacity: 20 });
    assert_eq!(s.roster.len(), 18);
    assert_eq!(s.queue.len(), 18);

    add_players(&mut s, &["X", "Y"]).unwrap();
    assert_eq!(s.roster.len(), 20);
    assert_eq!(
        add_player(&mut s, "Z"),
        Err(OpenPlayError::RosterFull { capacity: 20 })
    );
}

#[test]
fn duplicates_do_not_count_towards_capacity() {
    let mut s = session();
    let all: Vec<String> = (0..20).map(|i| format!("P{i}")).collect();
    add_players(&mut s, &all).unwrap();
    let summary = add_players(&mut s, &["P0", "P1"]).unwrap();
    assert!(summary.added.is_empty());
    assert_eq!(summary.skipped.len(), 2);
}

#[test]
fn remove_waiting_player() {
    let mut s = session();
    add_players(&mut s, &["A", "B", "C"]).unwrap();
    s.remove_player("b").unwrap();
    assert_eq!(s.roster, vec!["A", "C"]);
    assert_eq!(s.get_queue(), vec!["A", "C"]);
    assert_eq!(
        s.remove_player("B"),
        Err(OpenPlayError::PlayerNotFound("B".to_string()))
    );
}

#[test]
fn seated_player_cannot_be_removed() {
    let mut s = session();
    add_players(&mut s, &["A", "B", "C", "D"]).unwrap();
    assign_courts(&mut s);
    assert_eq!(
        s.remove_player("C"),
        Err(OpenPlayError::PlayerOnCourt {
            name: "C".to_string(),
            court: 1
        })
    );
    assert!(s.roster.contains(&"C".to_string()));
}

#[test]
fn locate_reports_queue_position_and_court() {
    let mut s = session();
    add_players(&mut s, &["A", "B", "C", "D", "E", "F"]).unwrap();
    assign_courts(&mut s);
    assert_eq!(
        s.locate("A").unwrap(),
        PlayerLocation::Court { number: 1, streak: 0 }
    );
    assert_eq!(s.locate("f").unwrap(), PlayerLocation::Queue { position: 1 });
    assert!(matches!(s.locate("Zed"), Err(OpenPlayError::PlayerNotFound(_))));

    submit_team_result(&mut s, 1, Team::One).unwrap();
    assert_eq!(
        s.locate("B").unwrap(),
        PlayerLocation::Court { number: 1, streak: 1 }
    );
}

#[test]
fn reset_everything_keeps_settings() {
    let mut s = session();
    s.auto_fill = true;
    add_players(&mut s, &["A", "B", "C", "D", "E"]).unwrap();
    submit_team_result(&mut s, 1, Team::Two).unwrap();
    assert_eq!(s.history.len(), 1);

    s.reset_everything();
    assert!(s.roster.is_empty());
    assert!(s.queue.is_empty());
    assert!(s.courts.iter().all(|c| c.is_empty()));
    assert!(s.history.is_empty());
    assert!(s.auto_fill);
    assert_eq!(s.courts.len(), 3);

    // Game numbers carry on rather than restarting.
    add_players(&mut s, &["A", "B", "C", "D"]).unwrap();
    let outcome = submit_team_result(&mut s, 1, Team::One).unwrap();
    assert_eq!(outcome.record.sequence, 2);
    assert_eq!(s.history.len(), 1);
}

#[test]
fn queued_player_needed_for_backfill_cannot_be_removed() {
    let config = OpenPlayConfig {
        default_format: PlayFormat::Singles,
        ..OpenPlayConfig::default()
    };
    let mut s = OpenPlaySession::new(config);
    add_players(&mut s, &["A", "B"]).unwrap();
    assign_courts(&mut s);
    submit_team_result(&mut s, 1, Team::One).unwrap();
    assert_eq!(s.get_queue(), vec!["B"]);

    assert_eq!(
        s.remove_player("B"),
        Err(OpenPlayError::InsufficientPlayers { needed: 1, available: 0 })
    );
    assert_eq!(s.get_queue(), vec!["B"]);
    assert!(s.roster.contains(&"B".to_string()));

    add_players(&mut s, &["C"]).unwrap();
    s.remove_player("B").unwrap();
    assign_courts(&mut s);
    assert_eq!(s.court(1).unwrap().occupants(), vec!["A", "C"]);
}
