// Drafted contestants and their per-episode score ledgers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Identifier shared by a pool entry and the contestant it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContestantId(pub u64);

impl fmt::Display for ContestantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out fresh contestant ids. Never reuses a value, even after undo or
/// pool removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    /// Start allocating after the largest id already in use.
    pub fn after(max_in_use: Option<ContestantId>) -> Self {
        IdAllocator {
            next: max_in_use.map_or(1, |id| id.0.saturating_add(1)),
        }
    }

    pub fn next_id(&mut self) -> ContestantId {
        let id = ContestantId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// One of the two competing fantasy teams. Serialized as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::One, Team::Two];

    /// The opposing team.
    pub fn other(&self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }
}

impl TryFrom<u8> for Team {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Team::One),
            2 => Ok(Team::Two),
            other => Err(format!("team must be 1 or 2, got {other}")),
        }
    }
}

impl From<Team> for u8 {
    fn from(team: Team) -> u8 {
        team.number()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// A single scored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: i64,
}

impl ScoreEntry {
    pub fn new(kind: impl Into<String>, value: i64) -> Self {
        ScoreEntry {
            kind: kind.into(),
            value,
        }
    }
}

/// All entries recorded against one episode for one contestant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeBucket {
    pub episode: u32,
    pub items: Vec<ScoreEntry>,
}

impl EpisodeBucket {
    pub fn total(&self) -> i64 {
        self.items.iter().map(|item| item.value).sum()
    }
}

/// A drafted contestant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contestant {
    pub id: ContestantId,
    pub name: String,
    pub team: Team,
    pub active: bool,
    /// Buckets in first-touched order; at most one per episode.
    pub scores: Vec<EpisodeBucket>,
}

impl Contestant {
    pub fn new(id: ContestantId, name: impl Into<String>, team: Team) -> Self {
        Contestant {
            id,
            name: name.into(),
            team,
            active: true,
            scores: Vec::new(),
        }
    }

    /// Sum of every entry across every episode.
    pub fn total(&self) -> i64 {
        self.scores.iter().map(EpisodeBucket::total).sum()
    }

    pub fn bucket(&self, episode: u32) -> Option<&EpisodeBucket> {
        self.scores.iter().find(|b| b.episode == episode)
    }

    /// Whether an entry with `label` already exists for `episode`.
    pub fn has_entry(&self, episode: u32, label: &str) -> bool {
        self.bucket(episode)
            .is_some_and(|b| b.items.iter().any(|item| item.kind == label))
    }

    /// Append to the episode's bucket, creating it at the end if absent.
    pub fn append(&mut self, episode: u32, entry: ScoreEntry) {
        match self.scores.iter_mut().find(|b| b.episode == episode) {
            Some(bucket) => bucket.items.push(entry),
            None => self.scores.push(EpisodeBucket {
                episode,
                items: vec![entry],
            }),
        }
    }

    /// Flattened `(episode, entry)` pairs in ledger order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &ScoreEntry)> {
        self.scores
            .iter()
            .flat_map(|b| b.items.iter().map(move |item| (b.episode, item)))
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Every drafted contestant, both teams, in draft order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    contestants: Vec<Contestant>,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    pub fn from_contestants(contestants: Vec<Contestant>) -> Self {
        Roster { contestants }
    }

    pub fn contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    pub fn len(&self) -> usize {
        self.contestants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contestants.is_empty()
    }

    pub fn get(&self, id: ContestantId) -> Option<&Contestant> {
        self.contestants.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: ContestantId) -> Result<&mut Contestant, SessionError> {
        self.contestants
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(SessionError::NoSuchContestant(id))
    }

    pub fn contains(&self, id: ContestantId) -> bool {
        self.get(id).is_some()
    }

    pub fn push(&mut self, contestant: Contestant) {
        self.contestants.push(contestant);
    }

    /// Contestants on `team`, in draft order.
    pub fn team(&self, team: Team) -> impl Iterator<Item = &Contestant> {
        self.contestants.iter().filter(move |c| c.team == team)
    }

    /// Sum of contestant totals for `team`, eliminated contestants included.
    pub fn team_total(&self, team: Team) -> i64 {
        self.team(team).map(Contestant::total).sum()
    }

    /// Record an entry for a contestant in `episode`.
    ///
    /// With `guard_duplicates`, an entry whose label already appears in that
    /// episode's bucket is rejected and nothing changes.
    pub fn record(
        &mut self,
        id: ContestantId,
        episode: u32,
        entry: ScoreEntry,
        guard_duplicates: bool,
    ) -> Result<(), SessionError> {
        let contestant = self.get_mut(id)?;
        if guard_duplicates && contestant.has_entry(episode, &entry.kind) {
            return Err(SessionError::DuplicateForEpisode {
                name: contestant.name.clone(),
                label: entry.kind,
                episode,
            });
        }
        contestant.append(episode, entry);
        Ok(())
    }

    pub fn set_active(&mut self, id: ContestantId, active: bool) -> Result<(), SessionError> {
        self.get_mut(id)?.active = active;
        Ok(())
    }

    pub fn max_id(&self) -> Option<ContestantId> {
        self.contestants.iter().map(|c| c.id).max()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
