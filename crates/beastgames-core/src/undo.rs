// Snapshot history for roster mutations.

use crate::error::SessionError;

/// Stack of whole-value snapshots taken before each committed mutation.
///
/// Snapshots are owned clones, so later in-place edits to the live value
/// never reach a snapshot already on the stack. The stack is unbounded.
#[derive(Debug, Clone)]
pub struct UndoLog<T: Clone> {
    history: Vec<T>,
}

impl<T: Clone> UndoLog<T> {
    pub fn new() -> Self {
        UndoLog {
            history: Vec::new(),
        }
    }

    /// Apply `mutation` to `live`, recording the prior value first.
    ///
    /// The snapshot is only kept when the mutation succeeds. A mutation that
    /// fails must leave `live` untouched.
    pub fn commit<R, E>(
        &mut self,
        live: &mut T,
        mutation: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Result<R, E> {
        let snapshot = live.clone();
        let result = mutation(live)?;
        self.history.push(snapshot);
        Ok(result)
    }

    /// Replace `live` with the most recent snapshot.
    pub fn undo(&mut self, live: &mut T) -> Result<(), SessionError> {
        let snapshot = self.history.pop().ok_or(SessionError::EmptyHistory)?;
        *live = snapshot;
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

impl<T: Clone> Default for UndoLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
