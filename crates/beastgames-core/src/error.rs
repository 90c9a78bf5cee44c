// Failures reported by session operations. None of them are fatal; every
// variant leaves the session exactly as it was before the call.

use thiserror::Error;

use crate::roster::{ContestantId, Team};
use crate::session::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no contestant with id {0}")]
    NoSuchContestant(ContestantId),

    #[error("no pool entry with id {0}")]
    NoSuchPoolEntry(ContestantId),

    #[error("{label} already recorded for {name} in episode {episode}")]
    DuplicateForEpisode {
        name: String,
        label: String,
        episode: u32,
    },

    #[error("nothing to undo")]
    EmptyHistory,

    #[error("team {0} needs a name")]
    EmptyTeamName(Team),

    #[error("add at least one contestant to the pool first")]
    EmptyPool,

    #[error("draft at least one contestant before scoring")]
    EmptyRoster,

    #[error("contestant name cannot be empty")]
    EmptyName,

    #[error("episode must be 1 or greater")]
    InvalidEpisode,

    #[error("{operation} is not available during {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: Phase,
    },
}
