// Application state and orchestration logic.
//
// The app loop owns the `Session` and its store. It receives `UserCommand`s
// from the TUI, applies each to the session, saves after every successful
// mutation, and pushes a fresh snapshot (or a notice) back to the TUI.

use beastgames_core::config::Config;
use beastgames_core::persist::SessionStore;
use beastgames_core::{Session, SessionError};
use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::protocol::{AppSnapshot, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub session: Session,
    pub store: SessionStore,
    /// When the session was last written successfully.
    pub last_saved: Option<DateTime<Local>>,
}

impl AppState {
    pub fn new(session: Session, store: SessionStore) -> Self {
        AppState {
            session,
            store,
            last_saved: None,
        }
    }

    /// Load the stored session (or a fresh one) and wrap it in an `AppState`.
    pub fn restore(config: &Config, store: SessionStore) -> Self {
        let session = store.load(&config.session_defaults);
        AppState::new(session, store)
    }

    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot::from_session(&self.session, self.last_saved)
    }

    /// Write the session to the store. Failures are logged and otherwise
    /// ignored; the in-memory session stays authoritative.
    pub fn persist(&mut self) {
        match self.store.save(&self.session) {
            Ok(()) => {
                self.last_saved = Some(Local::now());
                debug!("Session saved under '{}'", self.store.key());
            }
            Err(e) => warn!("Failed to save session: {:#}", e),
        }
    }

    /// Apply one command to the session.
    ///
    /// Returns an optional informational notice on success. On `Err` the
    /// session is unchanged.
    pub fn apply_command(&mut self, cmd: UserCommand) -> Result<Option<String>, SessionError> {
        let s = &mut self.session;
        let notice = match cmd {
            UserCommand::SetTeamName { team, name } => {
                s.set_team_name(team, &name)?;
                None
            }
            UserCommand::AddToPool(text) => match s.add_to_pool(&text)? {
                0 => Some("Nothing to add".to_string()),
                1 => None,
                n => Some(format!("Added {n} contestants to the pool")),
            },
            UserCommand::RemoveFromPool(id) => {
                let entry = s.remove_from_pool(id)?;
                Some(format!("Removed {} from the pool", entry.name))
            }
            UserCommand::StartDraft => {
                s.start_draft()?;
                None
            }
            UserCommand::DraftPick { id, team } => {
                s.draft_pick(id, team)?;
                None
            }
            UserCommand::StartScoring => {
                s.start_scoring()?;
                None
            }
            UserCommand::AddContestant { name, team } => {
                s.add_contestant(&name, team)?;
                None
            }
            UserCommand::SetEpisode(n) => {
                s.set_episode(n)?;
                None
            }
            UserCommand::NextEpisode => {
                s.next_episode()?;
                None
            }
            UserCommand::PreviousEpisode => {
                s.previous_episode()?;
                None
            }
            UserCommand::RecordScore { id, rule } => {
                s.record_score(id, rule)?;
                None
            }
            UserCommand::RecordMoney { id, input } => {
                // Unparseable amounts are dropped without a notice.
                if !s.record_money(id, &input)? {
                    debug!("Ignored money input {:?}", input);
                }
                None
            }
            UserCommand::ToggleActive(id) => {
                s.toggle_active(id)?;
                None
            }
            UserCommand::Undo => {
                s.undo()?;
                None
            }
            UserCommand::Reset => {
                s.reset();
                if let Err(e) = self.store.clear() {
                    warn!("Failed to delete saved session: {:#}", e);
                }
                self.last_saved = None;
                Some("Session reset".to_string())
            }
            UserCommand::Quit => None,
        };
        Ok(notice)
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Sends an initial snapshot, then handles commands until `Quit` arrives or
/// the command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(state.build_snapshot())))
        .await;

    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == UserCommand::Quit {
            info!("Quit command received, shutting down");
            break;
        }
        handle_user_command(&mut state, cmd, &ui_tx).await;
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    debug!("Handling {:?}", cmd);
    // Reset deletes the stored record instead of writing a fresh one.
    let save = cmd != UserCommand::Reset;
    match state.apply_command(cmd) {
        Ok(notice) => {
            if save {
                state.persist();
            }
            let snapshot = state.build_snapshot();
            let _ = ui_tx
                .send(UiUpdate::StateSnapshot(Box::new(snapshot)))
                .await;
            if let Some(text) = notice {
                let _ = ui_tx.send(UiUpdate::Notice(text)).await;
            }
        }
        Err(e) => {
            info!("Rejected: {}", e);
            let _ = ui_tx.send(UiUpdate::Notice(e.to_string())).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
