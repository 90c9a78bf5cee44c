// Session aggregate: phase controller plus every named mutation.
//
// All state changes go through methods on `Session`. Each method checks the
// phase gate and its own preconditions before touching anything, so an `Err`
// always means the session is unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::draft::{self, Pool, PoolEntry};
use crate::error::SessionError;
use crate::roster::{Contestant, ContestantId, IdAllocator, Roster, ScoreEntry, Team};
use crate::scoring::{self, ScoringRule, ELIMINATED_LABEL, ELIMINATED_POINTS};
use crate::undo::UndoLog;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Which stage the session is in. Advances strictly forward; only a reset
/// goes back to `Setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Draft,
    Scoring,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Setup => "setup",
            Phase::Draft => "draft",
            Phase::Scoring => "scoring",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Values a fresh (or reset) session starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub team1_name: String,
    pub team2_name: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        SessionDefaults {
            team1_name: "Team 1".to_string(),
            team2_name: "Team 2".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The complete scorekeeping session.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    team1_name: String,
    team2_name: String,
    current_episode: u32,
    draft_turn: Team,
    roster: Roster,
    pool: Pool,
    ids: IdAllocator,
    history: UndoLog<Roster>,
    defaults: SessionDefaults,
}

/// Raw parts used to rebuild a session from storage. Validation happens in
/// the persistence layer before this is constructed.
#[derive(Debug, Clone)]
pub struct SessionParts {
    pub phase: Phase,
    pub team1_name: String,
    pub team2_name: String,
    pub current_episode: u32,
    pub draft_turn: Team,
    pub roster: Roster,
    pub pool: Pool,
}

impl Session {
    pub fn new(defaults: SessionDefaults) -> Self {
        Session {
            phase: Phase::Setup,
            team1_name: defaults.team1_name.clone(),
            team2_name: defaults.team2_name.clone(),
            current_episode: 1,
            draft_turn: Team::One,
            roster: Roster::new(),
            pool: Pool::new(),
            ids: IdAllocator::new(),
            history: UndoLog::new(),
            defaults,
        }
    }

    /// Rebuild a session from stored parts. The undo history starts empty and
    /// fresh ids continue after the largest stored id.
    pub fn from_parts(parts: SessionParts, defaults: SessionDefaults) -> Self {
        let max_id = parts.roster.max_id().max(parts.pool.max_id());
        Session {
            phase: parts.phase,
            team1_name: parts.team1_name,
            team2_name: parts.team2_name,
            current_episode: parts.current_episode,
            draft_turn: parts.draft_turn,
            roster: parts.roster,
            pool: parts.pool,
            ids: IdAllocator::after(max_id),
            history: UndoLog::new(),
            defaults,
        }
    }

    pub fn to_parts(&self) -> SessionParts {
        SessionParts {
            phase: self.phase,
            team1_name: self.team1_name.clone(),
            team2_name: self.team2_name.clone(),
            current_episode: self.current_episode,
            draft_turn: self.draft_turn,
            roster: self.roster.clone(),
            pool: self.pool.clone(),
        }
    }

    // --- Read access ---

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn team_name(&self, team: Team) -> &str {
        match team {
            Team::One => &self.team1_name,
            Team::Two => &self.team2_name,
        }
    }

    pub fn current_episode(&self) -> u32 {
        self.current_episode
    }

    pub fn draft_turn(&self) -> Team {
        self.draft_turn
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn contestant(&self, id: ContestantId) -> Option<&Contestant> {
        self.roster.get(id)
    }

    pub fn available(&self) -> &[PoolEntry] {
        self.pool.entries()
    }

    /// The draft is complete once every pool entry has been picked.
    pub fn draft_complete(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    /// Running total for one contestant.
    pub fn total(&self, id: ContestantId) -> Result<i64, SessionError> {
        self.roster
            .get(id)
            .map(Contestant::total)
            .ok_or(SessionError::NoSuchContestant(id))
    }

    pub fn team_total(&self, team: Team) -> i64 {
        self.roster.team_total(team)
    }

    fn require_phase(&self, operation: &'static str, allowed: &[Phase]) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    // --- Setup ---

    /// Rename a team. Emptiness is checked when the draft starts.
    pub fn set_team_name(&mut self, team: Team, name: &str) -> Result<(), SessionError> {
        self.require_phase("renaming a team", &[Phase::Setup])?;
        match team {
            Team::One => self.team1_name = name.to_string(),
            Team::Two => self.team2_name = name.to_string(),
        }
        Ok(())
    }

    /// Add one pool entry per non-blank line. Returns how many were added.
    pub fn add_to_pool(&mut self, text: &str) -> Result<usize, SessionError> {
        self.require_phase("adding to the pool", &[Phase::Setup, Phase::Draft])?;
        let added = self.pool.add_lines(text, &mut self.ids);
        if !added.is_empty() {
            info!("Added {} entries to the pool ({} total)", added.len(), self.pool.len());
        }
        Ok(added.len())
    }

    pub fn remove_from_pool(&mut self, id: ContestantId) -> Result<PoolEntry, SessionError> {
        self.require_phase("removing from the pool", &[Phase::Setup, Phase::Draft])?;
        let entry = self.pool.remove(id)?;
        info!("Removed {} (id={}) from the pool", entry.name, entry.id);
        Ok(entry)
    }

    /// `setup -> draft`. Both team names and the pool must be non-empty.
    pub fn start_draft(&mut self) -> Result<(), SessionError> {
        self.require_phase("starting the draft", &[Phase::Setup])?;
        for team in Team::BOTH {
            if self.team_name(team).trim().is_empty() {
                return Err(SessionError::EmptyTeamName(team));
            }
        }
        if self.pool.is_empty() {
            return Err(SessionError::EmptyPool);
        }
        self.team1_name = self.team1_name.trim().to_string();
        self.team2_name = self.team2_name.trim().to_string();
        self.phase = Phase::Draft;
        info!(
            "Draft started: {} vs {}, {} in pool",
            self.team1_name,
            self.team2_name,
            self.pool.len()
        );
        Ok(())
    }

    // --- Draft ---

    pub fn draft_pick(&mut self, entry_id: ContestantId, team: Team) -> Result<(), SessionError> {
        self.require_phase("drafting", &[Phase::Draft])?;
        draft::draft_pick(
            &mut self.pool,
            &mut self.roster,
            &mut self.draft_turn,
            entry_id,
            team,
        )?;
        Ok(())
    }

    /// `draft -> scoring`. At least one contestant must have been drafted.
    pub fn start_scoring(&mut self) -> Result<(), SessionError> {
        self.require_phase("starting scoring", &[Phase::Draft])?;
        if self.roster.is_empty() {
            return Err(SessionError::EmptyRoster);
        }
        self.phase = Phase::Scoring;
        info!(
            "Scoring started with {} contestants ({} left undrafted)",
            self.roster.len(),
            self.pool.len()
        );
        Ok(())
    }

    /// Put a contestant straight onto a team without going through the pool.
    ///
    /// Does not affect the draft turn. During scoring the addition is
    /// committed through the undo log like any other roster change.
    pub fn add_contestant(&mut self, name: &str, team: Team) -> Result<ContestantId, SessionError> {
        self.require_phase("adding a contestant", &[Phase::Draft, Phase::Scoring])?;
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let id = self.ids.next_id();
        let contestant = Contestant::new(id, name, team);
        if self.phase == Phase::Scoring {
            self.history.commit(&mut self.roster, |roster| {
                roster.push(contestant);
                Ok::<_, SessionError>(())
            })?;
        } else {
            self.roster.push(contestant);
        }
        info!("Added {} (id={}) directly to team {}", name, id, team);
        Ok(id)
    }

    // --- Scoring ---

    pub fn set_episode(&mut self, episode: u32) -> Result<(), SessionError> {
        self.require_phase("changing the episode", &[Phase::Scoring])?;
        if episode == 0 {
            return Err(SessionError::InvalidEpisode);
        }
        self.current_episode = episode;
        debug!("Current episode set to {}", episode);
        Ok(())
    }

    pub fn next_episode(&mut self) -> Result<(), SessionError> {
        self.set_episode(self.current_episode.saturating_add(1))
    }

    /// Step back one episode, stopping at 1.
    pub fn previous_episode(&mut self) -> Result<(), SessionError> {
        self.set_episode(self.current_episode.saturating_sub(1).max(1))
    }

    /// Apply a quick-score rule to a contestant for the current episode.
    ///
    /// Rejected with `DuplicateForEpisode` if the rule's label is already in
    /// that episode's bucket.
    pub fn record_score(&mut self, id: ContestantId, rule: ScoringRule) -> Result<(), SessionError> {
        self.record_rule(id, rule, None)
    }

    /// Like `record_score`, but with a caller-supplied point value.
    pub fn record_rule(
        &mut self,
        id: ContestantId,
        rule: ScoringRule,
        override_value: Option<i64>,
    ) -> Result<(), SessionError> {
        self.require_phase("scoring", &[Phase::Scoring])?;
        let episode = self.current_episode;
        let entry = ScoreEntry::new(rule.label(), override_value.unwrap_or_else(|| rule.points()));
        let value = entry.value;
        self.history
            .commit(&mut self.roster, |roster| roster.record(id, episode, entry, true))?;
        info!("Scored {} ({:+}) for id={} in episode {}", rule.label(), value, id, episode);
        Ok(())
    }

    /// Record prize money typed by the user. One point per full $5,000.
    ///
    /// Empty, negative or non-numeric input records nothing and returns
    /// `Ok(false)`. Money entries may repeat within an episode.
    pub fn record_money(&mut self, id: ContestantId, input: &str) -> Result<bool, SessionError> {
        self.require_phase("scoring", &[Phase::Scoring])?;
        let Some(dollars) = scoring::parse_money(input) else {
            debug!("Ignoring prize money input {:?}", input);
            return Ok(false);
        };
        let episode = self.current_episode;
        let entry = ScoreEntry::new(scoring::money_label(dollars), scoring::money_points(dollars));
        let value = entry.value;
        self.history
            .commit(&mut self.roster, |roster| roster.record(id, episode, entry, false))?;
        info!("Recorded ${} ({:+}) for id={} in episode {}", dollars, value, id, episode);
        Ok(true)
    }

    /// Eliminate an active contestant or restore an eliminated one. Returns
    /// the new active flag.
    ///
    /// Elimination appends `Eliminated (-10)` to the current episode without
    /// the duplicate guard. Restoring leaves earlier penalties in place.
    pub fn toggle_active(&mut self, id: ContestantId) -> Result<bool, SessionError> {
        self.require_phase("eliminating", &[Phase::Scoring])?;
        let episode = self.current_episode;
        let now_active = self.history.commit(&mut self.roster, |roster| {
            let was_active = roster
                .get(id)
                .map(|c| c.active)
                .ok_or(SessionError::NoSuchContestant(id))?;
            if was_active {
                roster.record(
                    id,
                    episode,
                    ScoreEntry::new(ELIMINATED_LABEL, ELIMINATED_POINTS),
                    false,
                )?;
            }
            roster.set_active(id, !was_active)?;
            Ok::<_, SessionError>(!was_active)
        })?;
        if now_active {
            info!("Restored id={}", id);
        } else {
            info!("Eliminated id={} in episode {}", id, episode);
        }
        Ok(now_active)
    }

    /// Roll the roster back to before the most recent roster mutation.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        self.require_phase("undo", &[Phase::Scoring])?;
        self.history.undo(&mut self.roster)?;
        info!("Undo applied ({} steps left)", self.history.depth());
        Ok(())
    }

    // --- Reset ---

    /// Return to a fresh setup session, dropping all state and undo history.
    pub fn reset(&mut self) {
        info!("Session reset");
        *self = Session::new(self.defaults.clone());
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(SessionDefaults::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn named_session(team1: &str, team2: &str) -> Session {
        Session::new(SessionDefaults {
            team1_name: team1.to_string(),
            team2_name: team2.to_string(),
        })
    }

    /// Session in the scoring phase with Alice (team 1, id 1) and Bob (team 2, id 2).
    fn scoring_session() -> Session {
        let mut s = named_session("Red", "Blue");
        s.add_to_pool("Alice\nBob").unwrap();
        s.start_draft().unwrap();
        s.draft_pick(ContestantId(1), Team::One).unwrap();
        s.draft_pick(ContestantId(2), Team::Two).unwrap();
        s.start_scoring().unwrap();
        s
    }

    const ALICE: ContestantId = ContestantId(1);
    const BOB: ContestantId = ContestantId(2);

    #[test]
    fn new_session_has_defaults() {
        let s = Session::default();
        assert_eq!(s.phase(), Phase::Setup);
        assert_eq!(s.team_name(Team::One), "Team 1");
        assert_eq!(s.team_name(Team::Two), "Team 2");
        assert_eq!(s.current_episode(), 1);
        assert_eq!(s.draft_turn(), Team::One);
        assert!(s.roster().is_empty());
        assert!(s.available().is_empty());
        assert_eq!(s.undo_depth(), 0);
    }

    #[test]
    fn start_draft_with_empty_pool_is_rejected() {
        let mut s = named_session("Red", "Blue");
        assert_eq!(s.start_draft(), Err(SessionError::EmptyPool));
        assert_eq!(s.phase(), Phase::Setup);
    }

    #[test]
    fn start_draft_with_blank_team_name_is_rejected() {
        let mut s = named_session("Red", "Blue");
        s.add_to_pool("Alice").unwrap();
        s.set_team_name(Team::Two, "   ").unwrap();
        assert_eq!(s.start_draft(), Err(SessionError::EmptyTeamName(Team::Two)));
        assert_eq!(s.phase(), Phase::Setup);
    }

    #[test]
    fn start_draft_trims_team_names() {
        let mut s = named_session("Red", "Blue");
        s.set_team_name(Team::One, "  Jesse ").unwrap();
        s.add_to_pool("Alice").unwrap();
        s.start_draft().unwrap();
        assert_eq!(s.team_name(Team::One), "Jesse");
    }

    #[test]
    fn team_names_locked_after_setup() {
        let mut s = named_session("Red", "Blue");
        s.add_to_pool("Alice").unwrap();
        s.start_draft().unwrap();
        let err = s.set_team_name(Team::One, "Green").unwrap_err();
        assert!(matches!(err, SessionError::WrongPhase { phase: Phase::Draft, .. }));
        assert_eq!(s.team_name(Team::One), "Red");
    }

    #[test]
    fn start_scoring_requires_roster() {
        let mut s = named_session("Red", "Blue");
        s.add_to_pool("Alice").unwrap();
        s.start_draft().unwrap();
        assert_eq!(s.start_scoring(), Err(SessionError::EmptyRoster));
        assert_eq!(s.phase(), Phase::Draft);
    }

    #[test]
    fn phases_only_move_forward() {
        let mut s = scoring_session();
        assert!(matches!(s.start_draft(), Err(SessionError::WrongPhase { .. })));
        assert!(matches!(s.start_scoring(), Err(SessionError::WrongPhase { .. })));
        assert_eq!(s.phase(), Phase::Scoring);
    }

    #[test]
    fn scoring_ops_rejected_outside_scoring() {
        let mut s = named_session("Red", "Blue");
        assert!(matches!(
            s.record_score(ALICE, ScoringRule::Survived),
            Err(SessionError::WrongPhase { phase: Phase::Setup, .. })
        ));
        assert!(matches!(s.toggle_active(ALICE), Err(SessionError::WrongPhase { .. })));
        assert!(matches!(s.undo(), Err(SessionError::WrongPhase { .. })));
        assert!(matches!(s.set_episode(2), Err(SessionError::WrongPhase { .. })));
    }

    #[test]
    fn draft_turn_alternates_and_pool_drains() {
        let mut s = named_session("Red", "Blue");
        s.add_to_pool("Alice\nBob").unwrap();
        s.start_draft().unwrap();

        s.draft_pick(ALICE, Team::One).unwrap();
        assert_eq!(s.draft_turn(), Team::Two);
        assert!(!s.draft_complete());

        s.draft_pick(BOB, Team::Two).unwrap();
        assert_eq!(s.draft_turn(), Team::One);
        assert!(s.draft_complete());
        assert!(s.available().is_empty());
    }

    #[test]
    fn redrafting_same_id_is_rejected() {
        let mut s = named_session("Red", "Blue");
        s.add_to_pool("Alice\nBob").unwrap();
        s.start_draft().unwrap();
        s.draft_pick(ALICE, Team::One).unwrap();

        assert_eq!(s.draft_pick(ALICE, Team::Two), Err(SessionError::NoSuchPoolEntry(ALICE)));
        assert_eq!(s.draft_turn(), Team::Two);
        assert_eq!(s.roster().len(), 1);
    }

    #[test]
    fn reference_scenario() {
        let mut s = scoring_session();
        s.record_score(ALICE, ScoringRule::Survived).unwrap();
        assert_eq!(s.total(ALICE).unwrap(), 5);

        let active = s.toggle_active(ALICE).unwrap();
        assert!(!active);
        assert_eq!(s.total(ALICE).unwrap(), -5);
        assert!(!s.contestant(ALICE).unwrap().active);
        assert_eq!(s.team_total(Team::One), -5);
        assert_eq!(s.team_total(Team::Two), 0);
    }

    #[test]
    fn duplicate_rule_same_episode_rejected_other_episode_ok() {
        let mut s = scoring_session();
        s.record_score(ALICE, ScoringRule::TeamWin).unwrap();
        let err = s.record_score(ALICE, ScoringRule::TeamWin).unwrap_err();
        assert!(matches!(err, SessionError::DuplicateForEpisode { episode: 1, .. }));
        assert_eq!(s.undo_depth(), 1);

        s.set_episode(2).unwrap();
        s.record_score(ALICE, ScoringRule::TeamWin).unwrap();
        assert_eq!(s.total(ALICE).unwrap(), 20);
    }

    #[test]
    fn same_rule_for_different_contestants_is_fine() {
        let mut s = scoring_session();
        s.record_score(ALICE, ScoringRule::Survived).unwrap();
        s.record_score(BOB, ScoringRule::Survived).unwrap();
        assert_eq!(s.team_total(Team::One), 5);
        assert_eq!(s.team_total(Team::Two), 5);
    }

    #[test]
    fn record_rule_override_value() {
        let mut s = scoring_session();
        s.record_rule(ALICE, ScoringRule::HighestCash, Some(3)).unwrap();
        let bucket = s.contestant(ALICE).unwrap().bucket(1).unwrap().clone();
        assert_eq!(bucket.items, vec![ScoreEntry::new("Highest Cash", 3)]);
    }

    #[test]
    fn money_entry_converts_and_labels() {
        let mut s = scoring_session();
        assert!(s.record_money(ALICE, "12000").unwrap());
        let entry = &s.contestant(ALICE).unwrap().bucket(1).unwrap().items[0];
        assert_eq!(entry.value, 2);
        assert!(entry.kind.contains("12,000"));
    }

    #[test]
    fn money_entries_may_repeat() {
        let mut s = scoring_session();
        assert!(s.record_money(ALICE, "5000").unwrap());
        assert!(s.record_money(ALICE, "5000").unwrap());
        assert_eq!(s.total(ALICE).unwrap(), 2);
    }

    #[test]
    fn bad_money_input_is_a_silent_no_op() {
        let mut s = scoring_session();
        assert!(!s.record_money(ALICE, "").unwrap());
        assert!(!s.record_money(ALICE, "lots").unwrap());
        assert!(s.contestant(ALICE).unwrap().scores.is_empty());
        assert_eq!(s.undo_depth(), 0);
    }

    #[test]
    fn money_for_unknown_contestant_fails() {
        let mut s = scoring_session();
        assert_eq!(
            s.record_money(ContestantId(99), "5000"),
            Err(SessionError::NoSuchContestant(ContestantId(99)))
        );
    }

    #[test]
    fn eliminate_restore_eliminate_stacks_penalties() {
        let mut s = scoring_session();
        assert!(!s.toggle_active(ALICE).unwrap());
        assert!(s.toggle_active(ALICE).unwrap());
        assert!(!s.toggle_active(ALICE).unwrap());
        assert_eq!(s.total(ALICE).unwrap(), -20);
        assert_eq!(s.contestant(ALICE).unwrap().bucket(1).unwrap().items.len(), 2);
    }

    #[test]
    fn restore_keeps_penalty() {
        let mut s = scoring_session();
        s.toggle_active(ALICE).unwrap();
        s.toggle_active(ALICE).unwrap();
        assert!(s.contestant(ALICE).unwrap().active);
        assert_eq!(s.total(ALICE).unwrap(), -10);
    }

    #[test]
    fn elimination_lands_in_current_episode() {
        let mut s = scoring_session();
        s.set_episode(4).unwrap();
        s.toggle_active(BOB).unwrap();
        let bob = s.contestant(BOB).unwrap();
        assert_eq!(bob.scores.len(), 1);
        assert_eq!(bob.scores[0].episode, 4);
        assert_eq!(bob.scores[0].items[0], ScoreEntry::new("Eliminated", -10));
    }

    #[test]
    fn toggle_unknown_contestant_fails_without_history() {
        let mut s = scoring_session();
        assert_eq!(
            s.toggle_active(ContestantId(42)),
            Err(SessionError::NoSuchContestant(ContestantId(42)))
        );
        assert_eq!(s.undo_depth(), 0);
    }

    #[test]
    fn undo_reverts_scores_and_elimination() {
        let mut s = scoring_session();
        let before = s.roster().clone();
        s.record_score(ALICE, ScoringRule::Survived).unwrap();
        s.record_money(BOB, "25000").unwrap();
        s.toggle_active(ALICE).unwrap();
        assert_eq!(s.undo_depth(), 3);

        s.undo().unwrap();
        assert!(s.contestant(ALICE).unwrap().active);
        assert_eq!(s.total(ALICE).unwrap(), 5);

        s.undo().unwrap();
        s.undo().unwrap();
        assert_eq!(s.roster(), &before);
        assert_eq!(s.undo(), Err(SessionError::EmptyHistory));
        assert_eq!(s.roster(), &before);
    }

    #[test]
    fn episode_navigation() {
        let mut s = scoring_session();
        assert_eq!(s.set_episode(0), Err(SessionError::InvalidEpisode));
        s.next_episode().unwrap();
        s.next_episode().unwrap();
        assert_eq!(s.current_episode(), 3);
        s.set_episode(1).unwrap();
        s.previous_episode().unwrap();
        assert_eq!(s.current_episode(), 1);
    }

    #[test]
    fn add_contestant_during_draft_keeps_turn() {
        let mut s = named_session("Red", "Blue");
        s.add_to_pool("Alice").unwrap();
        s.start_draft().unwrap();
        let id = s.add_contestant("  Zed ", Team::Two).unwrap();
        assert_eq!(s.draft_turn(), Team::One);
        assert_eq!(s.contestant(id).unwrap().name, "Zed");
        assert_ne!(id, ALICE);
    }

    #[test]
    fn add_contestant_during_scoring_is_undoable() {
        let mut s = scoring_session();
        let id = s.add_contestant("Zed", Team::One).unwrap();
        assert_eq!(id, ContestantId(3));
        assert_eq!(s.undo_depth(), 1);
        s.undo().unwrap();
        assert!(s.contestant(id).is_none());

        // Ids are never reused after undo.
        let next = s.add_contestant("Yul", Team::One).unwrap();
        assert_eq!(next, ContestantId(4));
    }

    #[test]
    fn add_contestant_rejects_blank_name() {
        let mut s = scoring_session();
        assert_eq!(s.add_contestant("  ", Team::One), Err(SessionError::EmptyName));
        assert_eq!(s.undo_depth(), 0);
    }

    #[test]
    fn remove_from_pool_in_setup() {
        let mut s = named_session("Red", "Blue");
        s.add_to_pool("Alice\nBob").unwrap();
        let removed = s.remove_from_pool(ALICE).unwrap();
        assert_eq!(removed.name, "Alice");
        assert_eq!(s.available().len(), 1);
        assert_eq!(s.remove_from_pool(ALICE), Err(SessionError::NoSuchPoolEntry(ALICE)));
    }

    #[test]
    fn pool_ids_never_collide_with_roster_ids() {
        let mut s = named_session("Red", "Blue");
        s.add_to_pool("Alice").unwrap();
        s.start_draft().unwrap();
        s.draft_pick(ALICE, Team::One).unwrap();
        s.add_to_pool("Bob").unwrap();
        assert_eq!(s.available()[0].id, ContestantId(2));
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = scoring_session();
        s.record_score(ALICE, ScoringRule::Survived).unwrap();
        s.set_episode(5).unwrap();
        s.reset();

        assert_eq!(s.phase(), Phase::Setup);
        assert_eq!(s.team_name(Team::One), "Red");
        assert_eq!(s.current_episode(), 1);
        assert_eq!(s.draft_turn(), Team::One);
        assert!(s.roster().is_empty());
        assert!(s.available().is_empty());
        assert_eq!(s.undo_depth(), 0);
    }

    #[test]
    fn from_parts_resumes_id_allocation() {
        let s = scoring_session();
        let mut restored = Session::from_parts(s.to_parts(), SessionDefaults::default());
        assert_eq!(restored.undo_depth(), 0);
        let id = restored.add_contestant("Zed", Team::Two).unwrap();
        assert_eq!(id, ContestantId(3));
    }

    #[test]
    fn phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Scoring).unwrap(), "\"scoring\"");
        assert_eq!(Phase::Draft.to_string(), "draft");
    }
}
