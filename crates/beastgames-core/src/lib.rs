// Library root: the scorekeeping domain, its persistence and configuration.
// The terminal front end lives in beastgames-tui.

pub mod config;
pub mod db;
pub mod draft;
pub mod error;
pub mod persist;
pub mod roster;
pub mod scoring;
pub mod session;
pub mod undo;

pub use error::SessionError;
pub use roster::{Contestant, ContestantId, Team};
pub use scoring::ScoringRule;
pub use session::{Phase, Session, SessionDefaults};
