// Draft pool and pick sequencing.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SessionError;
use crate::roster::{Contestant, ContestantId, IdAllocator, Roster, Team};

/// An undrafted contestant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub id: ContestantId,
    pub name: String,
}

/// The undrafted pool, in the order entries were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pool {
    entries: Vec<PoolEntry>,
}

impl Pool {
    pub fn new() -> Self {
        Pool::default()
    }

    pub fn from_entries(entries: Vec<PoolEntry>) -> Self {
        Pool { entries }
    }

    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: ContestantId) -> Option<&PoolEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Add one entry per non-blank line of `text`. Returns the new entries.
    pub fn add_lines(&mut self, text: &str, ids: &mut IdAllocator) -> Vec<PoolEntry> {
        let added: Vec<PoolEntry> = split_names(text)
            .into_iter()
            .map(|name| PoolEntry {
                id: ids.next_id(),
                name,
            })
            .collect();
        self.entries.extend(added.iter().cloned());
        added
    }

    /// Remove an entry by id.
    pub fn remove(&mut self, id: ContestantId) -> Result<PoolEntry, SessionError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(SessionError::NoSuchPoolEntry(id))?;
        Ok(self.entries.remove(idx))
    }

    pub fn max_id(&self) -> Option<ContestantId> {
        self.entries.iter().map(|e| e.id).max()
    }
}

/// Split free text into trimmed, non-empty names, one per line.
pub fn split_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Move a pool entry onto `team` and pass the turn to the other team.
///
/// `team` is not checked against `turn`: either team may pick at any time,
/// and the turn flips after every successful pick regardless of who picked.
pub fn draft_pick(
    pool: &mut Pool,
    roster: &mut Roster,
    turn: &mut Team,
    entry_id: ContestantId,
    team: Team,
) -> Result<ContestantId, SessionError> {
    let entry = pool.remove(entry_id)?;
    info!(
        "Drafted {} (id={}) to team {} ({} left in pool)",
        entry.name,
        entry.id,
        team,
        pool.len()
    );
    roster.push(Contestant::new(entry.id, entry.name, team));
    *turn = turn.other();
    Ok(entry_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
