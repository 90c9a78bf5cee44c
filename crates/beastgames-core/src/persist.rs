// Session record format and the store that reads/writes it.
//
// The whole session is kept as one JSON record under a single key. Anything
// missing or unreadable falls back to a fresh session; loading never fails.

use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::db::Database;
use crate::draft::{Pool, PoolEntry};
use crate::roster::{Contestant, Roster, Team};
use crate::session::{Phase, Session, SessionDefaults, SessionParts};

/// Key the session record is stored under unless configured otherwise.
pub const DEFAULT_SESSION_KEY: &str = "beastgames_session";

/// On-disk shape of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub phase: Phase,
    pub contestants: Vec<Contestant>,
    pub available: Vec<PoolEntry>,
    pub team1_name: String,
    pub team2_name: String,
    pub current_episode: u32,
    pub draft_turn: Team,
}

/// Why a stored record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("id {0} appears more than once")]
    DuplicateId(u64),

    #[error("contestant {contestant} has episode {episode} more than once")]
    DuplicateEpisode { contestant: u64, episode: u32 },

    #[error("episode numbers must be 1 or greater")]
    ZeroEpisode,

    #[error("contestant or pool entry {0} has an empty name")]
    EmptyName(u64),
}

impl SessionRecord {
    pub fn from_session(session: &Session) -> Self {
        let parts = session.to_parts();
        SessionRecord {
            phase: parts.phase,
            contestants: parts.roster.contestants().to_vec(),
            available: parts.pool.entries().to_vec(),
            team1_name: parts.team1_name,
            team2_name: parts.team2_name,
            current_episode: parts.current_episode,
            draft_turn: parts.draft_turn,
        }
    }

    /// Check the invariants a well-formed session always satisfies.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.current_episode == 0 {
            return Err(RecordError::ZeroEpisode);
        }

        let mut seen_ids = HashSet::new();
        for c in &self.contestants {
            if !seen_ids.insert(c.id) {
                return Err(RecordError::DuplicateId(c.id.0));
            }
            if c.name.trim().is_empty() {
                return Err(RecordError::EmptyName(c.id.0));
            }
            let mut seen_episodes = HashSet::new();
            for bucket in &c.scores {
                if bucket.episode == 0 {
                    return Err(RecordError::ZeroEpisode);
                }
                if !seen_episodes.insert(bucket.episode) {
                    return Err(RecordError::DuplicateEpisode {
                        contestant: c.id.0,
                        episode: bucket.episode,
                    });
                }
            }
        }
        for entry in &self.available {
            if !seen_ids.insert(entry.id) {
                return Err(RecordError::DuplicateId(entry.id.0));
            }
            if entry.name.trim().is_empty() {
                return Err(RecordError::EmptyName(entry.id.0));
            }
        }
        Ok(())
    }

    pub fn into_session(self, defaults: SessionDefaults) -> Result<Session, RecordError> {
        self.validate()?;
        let parts = SessionParts {
            phase: self.phase,
            team1_name: self.team1_name,
            team2_name: self.team2_name,
            current_episode: self.current_episode,
            draft_turn: self.draft_turn,
            roster: Roster::from_contestants(self.contestants),
            pool: Pool::from_entries(self.available),
        };
        Ok(Session::from_parts(parts, defaults))
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Reads and writes the session record in a `Database`.
pub struct SessionStore {
    db: Database,
    key: String,
}

impl SessionStore {
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        SessionStore {
            db,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored session, or a fresh one if nothing usable is stored.
    pub fn load(&self, defaults: &SessionDefaults) -> Session {
        let value = match self.db.load_state(&self.key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                info!("No saved session under '{}', starting fresh", self.key);
                return Session::new(defaults.clone());
            }
            Err(e) => {
                warn!("Saved session unreadable, starting fresh: {:#}", e);
                return Session::new(defaults.clone());
            }
        };

        let record: SessionRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                warn!("Saved session has unexpected shape, starting fresh: {}", e);
                return Session::new(defaults.clone());
            }
        };

        match record.into_session(defaults.clone()) {
            Ok(session) => {
                info!(
                    "Restored session: phase={}, {} contestants, {} in pool, episode {}",
                    session.phase(),
                    session.roster().len(),
                    session.available().len(),
                    session.current_episode()
                );
                session
            }
            Err(e) => {
                warn!("Saved session is inconsistent, starting fresh: {}", e);
                Session::new(defaults.clone())
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let value = serde_json::to_value(SessionRecord::from_session(session))
            .context("failed to encode session record")?;
        self.db.save_state(&self.key, &value)
    }

    /// Remove the stored record.
    pub fn clear(&self) -> Result<()> {
        self.db.delete_state(&self.key)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn database(&self) -> &Database {
        &self.db
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
