use crate::canvas::Canvas;
use crate::snapshot::Snapshot;

/// Undo/redo stacks of full-canvas snapshots.
///
/// Both stacks keep the most recent entry last and are bounded only by
/// memory. Pushing a new snapshot leaves the redo stack alone.
#[derive(Debug, Default)]
pub struct History {
    /// Snapshots that can be restored by undo
    undo_stack: Vec<Snapshot>,
    /// Snapshots that can be restored by redo
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the canvas state from before a gesture or a clear
    pub fn push(&mut self, snapshot: Snapshot) {
        log::debug!(
            "History push {} (undo depth {})",
            snapshot.id(),
            self.undo_stack.len() + 1
        );
        self.undo_stack.push(snapshot);
    }

    /// Restores the most recent undo snapshot, saving the current state for redo.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self, canvas: &mut Canvas) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(canvas.snapshot());
        canvas.restore(&snapshot);
        log::debug!("Undo to {}", snapshot.id());
        true
    }

    /// Restores the most recent redo snapshot, saving the current state for undo.
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self, canvas: &mut Canvas) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(canvas.snapshot());
        canvas.restore(&snapshot);
        log::debug!("Redo to {}", snapshot.id());
        true
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }
}
