// Integration tests for the scorekeeping core.
//
// These drive a whole season through the public API: setup, draft, several
// episodes of scoring with undo, persistence to SQLite, and restoring into a
// fresh session.

use beastgames_core::config::{load_config_from, seed_config_file};
use beastgames_core::db::Database;
use beastgames_core::persist::{SessionRecord, SessionStore, DEFAULT_SESSION_KEY};
use beastgames_core::scoring::{money_label, reference_table, ScoringRule};
use beastgames_core::{ContestantId, Phase, Session, SessionDefaults, SessionError, Team};

// ===========================================================================
// Test helpers
// ===========================================================================

fn defaults() -> SessionDefaults {
    SessionDefaults {
        team1_name: "Jesse".to_string(),
        team2_name: "Isabell".to_string(),
    }
}

/// Draft six contestants alternately, picking in pool order.
fn drafted_session() -> Session {
    let mut s = Session::new(defaults());
    let added = s
        .add_to_pool("Mia\nNoah\n\n  Liam  \nAva\nEli\nZoe\n")
        .unwrap();
    assert_eq!(added, 6);
    s.start_draft().unwrap();

    while let Some(entry) = s.available().first().cloned() {
        let team = s.draft_turn();
        s.draft_pick(entry.id, team).unwrap();
    }
    assert!(s.draft_complete());
    s.start_scoring().unwrap();
    s
}

fn id_of(s: &Session, name: &str) -> ContestantId {
    s.roster()
        .contestants()
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("{name} not on roster"))
}

// ===========================================================================
// Full season
// ===========================================================================

#[test]
fn draft_alternates_teams_in_pick_order() {
    let s = drafted_session();
    let team_one: Vec<&str> = s.roster().team(Team::One).map(|c| c.name.as_str()).collect();
    let team_two: Vec<&str> = s.roster().team(Team::Two).map(|c| c.name.as_str()).collect();
    assert_eq!(team_one, vec!["Mia", "Liam", "Eli"]);
    assert_eq!(team_two, vec!["Noah", "Ava", "Zoe"]);
    assert_eq!(s.draft_turn(), Team::One);
}

#[test]
fn season_totals_match_ledger() {
    let mut s = drafted_session();
    let mia = id_of(&s, "Mia");
    let noah = id_of(&s, "Noah");
    let liam = id_of(&s, "Liam");

    // Episode 1
    s.record_score(mia, ScoringRule::Survived).unwrap();
    s.record_score(mia, ScoringRule::IndividualWin).unwrap();
    s.record_score(noah, ScoringRule::TeamWin).unwrap();
    s.record_money(noah, "$12,500").unwrap();
    s.toggle_active(liam).unwrap();

    // Episode 2
    s.next_episode().unwrap();
    s.record_score(mia, ScoringRule::Survived).unwrap();
    s.record_score(noah, ScoringRule::ViralMoment).unwrap();

    assert_eq!(s.total(mia).unwrap(), 25);
    assert_eq!(s.total(noah).unwrap(), 10 + 2 + 5);
    assert_eq!(s.total(liam).unwrap(), -10);
    assert_eq!(s.team_total(Team::One), 25 - 10);
    assert_eq!(s.team_total(Team::Two), 17);

    let noah_c = s.contestant(noah).unwrap();
    assert_eq!(noah_c.bucket(1).unwrap().items[1].kind, money_label(12_500));
    assert_eq!(noah_c.scores.len(), 2);
}

#[test]
fn undo_walks_back_across_episodes() {
    let mut s = drafted_session();
    let mia = id_of(&s, "Mia");
    let start = s.roster().clone();

    s.record_score(mia, ScoringRule::Survived).unwrap();
    s.set_episode(3).unwrap();
    s.record_score(mia, ScoringRule::Survived).unwrap();
    s.toggle_active(mia).unwrap();
    assert_eq!(s.total(mia).unwrap(), 0);

    // Undo does not touch the episode cursor.
    s.undo().unwrap();
    assert_eq!(s.current_episode(), 3);
    assert!(s.contestant(mia).unwrap().active);

    s.undo().unwrap();
    s.undo().unwrap();
    assert_eq!(s.roster(), &start);
    assert_eq!(s.undo(), Err(SessionError::EmptyHistory));
}

#[test]
fn rejected_operations_leave_state_untouched() {
    let mut s = drafted_session();
    let mia = id_of(&s, "Mia");
    s.record_score(mia, ScoringRule::RiskyDeal).unwrap();
    let before = s.roster().clone();
    let depth = s.undo_depth();

    assert!(s.record_score(mia, ScoringRule::RiskyDeal).is_err());
    assert!(s.record_score(ContestantId(999), ScoringRule::Survived).is_err());
    assert!(s.toggle_active(ContestantId(999)).is_err());
    assert!(!s.record_money(mia, "-5000").unwrap());

    assert_eq!(s.roster(), &before);
    assert_eq!(s.undo_depth(), depth);
}

// ===========================================================================
// Persistence
// ===========================================================================

#[test]
fn sqlite_round_trip_restores_everything_but_history() {
    let path = std::env::temp_dir().join("beastgames_session_flow.db");
    let _ = std::fs::remove_file(&path);
    let path_str = path.to_str().unwrap();

    let mut s = drafted_session();
    let ava = id_of(&s, "Ava");
    s.set_episode(2).unwrap();
    s.record_score(ava, ScoringRule::HighestCash).unwrap();
    s.toggle_active(ava).unwrap();
    {
        let store = SessionStore::new(Database::open(path_str).unwrap(), DEFAULT_SESSION_KEY);
        store.save(&s).unwrap();
    }

    let store = SessionStore::new(Database::open(path_str).unwrap(), DEFAULT_SESSION_KEY);
    let mut restored = store.load(&defaults());
    assert_eq!(restored.phase(), Phase::Scoring);
    assert_eq!(restored.current_episode(), 2);
    assert_eq!(restored.roster(), s.roster());
    assert_eq!(restored.team_name(Team::Two), "Isabell");
    assert_eq!(restored.undo_depth(), 0);
    assert_eq!(restored.undo(), Err(SessionError::EmptyHistory));

    // New contestants continue after the largest stored id.
    let fresh = restored.add_contestant("Late Entry", Team::One).unwrap();
    assert_eq!(fresh, ContestantId(7));

    drop(store);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}

#[test]
fn record_json_is_stable() {
    let s = drafted_session();
    let record = SessionRecord::from_session(&s);
    let text = serde_json::to_string(&record).unwrap();
    let back: SessionRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(back, record);
    assert!(text.contains("\"team1Name\":\"Jesse\""));
}

#[test]
fn reset_then_save_stores_fresh_session() {
    let store = SessionStore::new(Database::open(":memory:").unwrap(), "k");
    let mut s = drafted_session();
    store.save(&s).unwrap();
    s.reset();
    store.save(&s).unwrap();

    let restored = store.load(&defaults());
    assert_eq!(restored.phase(), Phase::Setup);
    assert!(restored.roster().is_empty());
}

// ===========================================================================
// Config and reference
// ===========================================================================

#[test]
fn shipped_defaults_parse() {
    // Integration tests run from the crate directory; the defaults ship with
    // the terminal front end.
    let base = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../beastgames-tui");
    let config = load_config_from_defaults(&base);
    assert_eq!(config.session_defaults, defaults());
    assert_eq!(config.session_key, DEFAULT_SESSION_KEY);
}

/// Copy the shipped `defaults/` into a scratch dir, seed `config/` and load it.
fn load_config_from_defaults(base: &std::path::Path) -> beastgames_core::config::Config {
    let tmp = std::env::temp_dir().join("beastgames_shipped_defaults");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(tmp.join("defaults")).unwrap();
    std::fs::copy(
        base.join("defaults/tracker.toml"),
        tmp.join("defaults/tracker.toml"),
    )
    .unwrap();
    assert!(seed_config_file(&tmp).unwrap().is_some());
    let config = load_config_from(&tmp).unwrap();
    let _ = std::fs::remove_dir_all(&tmp);
    config
}

#[test]
fn reference_table_has_endgame_section() {
    let table = reference_table();
    let titles: Vec<&str> = table.iter().map(|s| s.title).collect();
    assert_eq!(titles, vec!["Core Performance", "Money & Bonuses", "Endgame"]);
    assert_eq!(table[2].lines[0].points, 50);
}
