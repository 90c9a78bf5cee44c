// Messages exchanged between the app loop and the TUI.
//
// The TUI sends `UserCommand`s; the app loop owns the `Session`, applies the
// command, and answers with `UiUpdate`s. The TUI never mutates the session.

use beastgames_core::draft::PoolEntry;
use beastgames_core::roster::Contestant;
use beastgames_core::scoring::ScoringRule;
use beastgames_core::{ContestantId, Phase, Session, Team};
use chrono::{DateTime, Local};

// ---------------------------------------------------------------------------
// TUI -> app
// ---------------------------------------------------------------------------

/// A request from the user, one per session operation.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SetTeamName { team: Team, name: String },
    /// Free text; one pool entry per non-blank line.
    AddToPool(String),
    RemoveFromPool(ContestantId),
    StartDraft,
    DraftPick { id: ContestantId, team: Team },
    StartScoring,
    AddContestant { name: String, team: Team },
    SetEpisode(u32),
    NextEpisode,
    PreviousEpisode,
    RecordScore { id: ContestantId, rule: ScoringRule },
    RecordMoney { id: ContestantId, input: String },
    ToggleActive(ContestantId),
    Undo,
    Reset,
    Quit,
}

// ---------------------------------------------------------------------------
// app -> TUI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full replacement of everything the TUI renders.
    StateSnapshot(Box<AppSnapshot>),
    /// One-line message for the notice bar (validation failures and the like).
    Notice(String),
}

/// One team as the TUI shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSnapshot {
    pub team: Team,
    pub name: String,
    pub total: i64,
    /// Contestants in draft order.
    pub contestants: Vec<Contestant>,
}

/// Read-only copy of the session for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub phase: Phase,
    pub current_episode: u32,
    pub draft_turn: Team,
    pub pool: Vec<PoolEntry>,
    pub teams: [TeamSnapshot; 2],
    pub undo_depth: usize,
    pub last_saved: Option<DateTime<Local>>,
}

impl AppSnapshot {
    pub fn from_session(session: &Session, last_saved: Option<DateTime<Local>>) -> Self {
        let team = |team: Team| TeamSnapshot {
            team,
            name: session.team_name(team).to_string(),
            total: session.team_total(team),
            contestants: session.roster().team(team).cloned().collect(),
        };
        AppSnapshot {
            phase: session.phase(),
            current_episode: session.current_episode(),
            draft_turn: session.draft_turn(),
            pool: session.available().to_vec(),
            teams: [team(Team::One), team(Team::Two)],
            undo_depth: session.undo_depth(),
            last_saved,
        }
    }

    pub fn team(&self, team: Team) -> &TeamSnapshot {
        match team {
            Team::One => &self.teams[0],
            Team::Two => &self.teams[1],
        }
    }
}

impl Default for AppSnapshot {
    fn default() -> Self {
        AppSnapshot::from_session(&Session::default(), None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
