// --- File: crates/inkslot_slots/src/reconcile.rs ---
//! Edit-mode labelling: how the in-progress selection differs from the span
//! the appointment had when editing started.

use crate::selection::SelectionSet;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotMark {
    /// In the stored span and still selected.
    Retained,
    /// In the stored span, deselected in this session.
    ToBeRemoved,
    /// Selected in this session, not in the stored span.
    NewlyAdded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub retained: Vec<DateTime<Utc>>,
    pub removed: Vec<DateTime<Utc>>,
    pub added: Vec<DateTime<Utc>>,
}

impl Reconciliation {
    pub fn is_unchanged(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    pub fn mark(&self, slot: DateTime<Utc>) -> Option<SlotMark> {
        if self.retained.contains(&slot) {
            Some(SlotMark::Retained)
        } else if self.removed.contains(&slot) {
            Some(SlotMark::ToBeRemoved)
        } else if self.added.contains(&slot) {
            Some(SlotMark::NewlyAdded)
        } else {
            None
        }
    }
}

pub fn reconcile(initial: &SelectionSet, current: &SelectionSet) -> Reconciliation {
    let initial = initial.as_set();
    let current = current.as_set();
    Reconciliation {
        retained: initial.intersection(current).copied().collect(),
        removed: initial.difference(current).copied().collect(),
        added: current.difference(initial).copied().collect(),
    }
}

/// Mark of a single slot without building the whole reconciliation.
pub fn mark_slot(slot: DateTime<Utc>, initial: &SelectionSet, current: &SelectionSet) -> Option<SlotMark> {
    match (initial.contains(slot), current.contains(slot)) {
        (true, true) => Some(SlotMark::Retained),
        (true, false) => Some(SlotMark::ToBeRemoved),
        (false, true) => Some(SlotMark::NewlyAdded),
        (false, false) => None,
    }
}
