use egui::Pos2;

use crate::snapshot::Snapshot;

/// Per-gesture drawing state, from pointer down to pointer up.
///
/// Values go stale when a gesture ends and are overwritten by the next one.
#[derive(Debug, Clone, Default)]
pub struct DrawSession {
    anchor: Pos2,
    last: Pos2,
    /// Canvas as it was when the gesture began; previews restore it before redrawing
    reference: Option<Snapshot>,
    active: bool,
}

impl DrawSession {
    pub fn begin(&mut self, position: Pos2, reference: Snapshot) {
        self.anchor = position;
        self.last = position;
        self.reference = Some(reference);
        self.active = true;
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn last(&self) -> Pos2 {
        self.last
    }

    pub fn set_last(&mut self, position: Pos2) {
        self.last = position;
    }

    pub fn reference(&self) -> Option<&Snapshot> {
        self.reference.as_ref()
    }
}
