// --- File: crates/inkslot_slots/src/selection.rs ---
use crate::models::{slot_width, AppointmentId, BlockedInterval, OccupiedInterval, StaffId, SLOT_MINUTES};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};
use thiserror::Error;
use tracing::debug;

// --- Error Handling ---
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("slots must be consecutive: gap between {0} and {1}")]
    NotContiguous(DateTime<Utc>, DateTime<Utc>),
    #[error("span {0} - {1} is not a whole number of slots")]
    InvalidSpan(DateTime<Utc>, DateTime<Utc>),
}

/// Why a toggle was refused. The selection is left untouched in every case.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("this slot is blocked")]
    Blocked,
    #[error("this slot is already taken")]
    Occupied,
    #[error("slots must be consecutive")]
    NotConsecutive,
    #[error("availability is still loading")]
    NotLoaded,
}

/// Slot starts chosen in the current editing session.
///
/// Always one contiguous run: sorted, adjacent starts exactly one slot width
/// apart. Every constructor and [`toggle_slot`] preserve this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSet {
    slots: BTreeSet<DateTime<Utc>>,
}

impl SelectionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a selection from arbitrary slot starts; duplicates collapse.
    pub fn from_slots<I>(slots: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        let slots: BTreeSet<_> = slots.into_iter().collect();
        if let Some((a, b)) = first_gap(&slots) {
            return Err(SelectionError::NotContiguous(a, b));
        }
        Ok(Self { slots })
    }

    /// The slots covering a stored `[start, end)` span, e.g. the appointment
    /// being edited.
    pub fn covering(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SelectionError> {
        let minutes = (end - start).num_minutes();
        if end <= start || minutes % SLOT_MINUTES != 0 || (end - start).num_seconds() % 60 != 0 {
            return Err(SelectionError::InvalidSpan(start, end));
        }
        let slots = (0..minutes / SLOT_MINUTES)
            .map(|i| start + slot_width() * i as i32)
            .collect();
        Ok(Self { slots })
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, slot: DateTime<Utc>) -> bool {
        self.slots.contains(&slot)
    }

    pub fn first(&self) -> Option<DateTime<Utc>> {
        self.slots.first().copied()
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.slots.last().copied()
    }

    /// Slot starts in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.slots.iter().copied()
    }

    pub(crate) fn as_set(&self) -> &BTreeSet<DateTime<Utc>> {
        &self.slots
    }
}

fn first_gap(slots: &BTreeSet<DateTime<Utc>>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    slots
        .iter()
        .zip(slots.iter().skip(1))
        .find(|(a, b)| **b - **a != slot_width())
        .map(|(a, b)| (*a, *b))
}

/// Whether a slot can be booked at all, independent of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotAvailability {
    Free,
    Blocked,
    Occupied,
}

/// What a toggle is checked against: the active staff member's blocks and
/// appointments for the displayed day.
#[derive(Debug, Clone, Copy)]
pub struct SlotContext<'a> {
    pub staff: &'a StaffId,
    pub blocked: &'a [BlockedInterval],
    pub occupied: &'a [OccupiedInterval],
    /// The appointment being edited; its own span never counts as occupied.
    pub editing: Option<&'a AppointmentId>,
}

impl SlotContext<'_> {
    /// Blocks win over appointments when a slot is both.
    pub fn classify(&self, slot_start: DateTime<Utc>) -> SlotAvailability {
        let blocked = self
            .blocked
            .iter()
            .any(|block| block.applies_to(self.staff) && block.overlaps_slot(slot_start));
        if blocked {
            return SlotAvailability::Blocked;
        }

        let occupied = self.occupied.iter().any(|interval| {
            let is_edited = self.editing.is_some_and(|id| interval.belongs_to(id));
            !is_edited && interval.overlaps_slot(slot_start)
        });
        if occupied {
            return SlotAvailability::Occupied;
        }

        SlotAvailability::Free
    }
}

/// Shorthand for [`SlotContext::classify`].
pub fn classify_slot(slot_start: DateTime<Utc>, context: &SlotContext<'_>) -> SlotAvailability {
    context.classify(slot_start)
}

/// How the selection changed after an accepted toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    /// An interior slot was removed; the shorter side of the split was
    /// dropped along with it.
    Split { discarded: Vec<DateTime<Utc>> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub selection: SelectionSet,
    pub change: SelectionChange,
}

/// Toggles `candidate` in or out of `current`.
///
/// Blocked and occupied slots are refused first, whether the toggle would add
/// or remove. Removing an interior slot keeps the longer remaining run, the
/// earlier one on a tie. Adding a slot that does not touch either end of the
/// run is refused with [`Rejection::NotConsecutive`].
pub fn toggle_slot(
    candidate: DateTime<Utc>,
    current: &SelectionSet,
    context: &SlotContext<'_>,
) -> Result<ToggleOutcome, Rejection> {
    match context.classify(candidate) {
        SlotAvailability::Blocked => {
            debug!("toggle of {} refused: blocked for {}", candidate, context.staff);
            return Err(Rejection::Blocked);
        }
        SlotAvailability::Occupied => {
            debug!("toggle of {} refused: occupied for {}", candidate, context.staff);
            return Err(Rejection::Occupied);
        }
        SlotAvailability::Free => {}
    }

    if current.contains(candidate) {
        Ok(remove_slot(candidate, current))
    } else {
        add_slot(candidate, current)
    }
}

fn remove_slot(candidate: DateTime<Utc>, current: &SelectionSet) -> ToggleOutcome {
    let set = current.as_set();
    let left: BTreeSet<_> = set.range(..candidate).copied().collect();
    let right: BTreeSet<_> = set.range((Excluded(candidate), Unbounded)).copied().collect();

    if left.is_empty() || right.is_empty() {
        let slots = left.into_iter().chain(right).collect();
        return ToggleOutcome {
            selection: SelectionSet { slots },
            change: SelectionChange::Removed,
        };
    }

    let (kept, dropped) = if right.len() > left.len() {
        (right, left)
    } else {
        (left, right)
    };
    debug!(
        "removing {} split the selection, keeping {} slot(s) and dropping {}",
        candidate,
        kept.len(),
        dropped.len()
    );
    ToggleOutcome {
        selection: SelectionSet { slots: kept },
        change: SelectionChange::Split {
            discarded: dropped.into_iter().collect(),
        },
    }
}

fn add_slot(candidate: DateTime<Utc>, current: &SelectionSet) -> Result<ToggleOutcome, Rejection> {
    let adjacent = match (current.first(), current.last()) {
        (Some(first), Some(last)) => candidate + slot_width() == first || last + slot_width() == candidate,
        _ => true,
    };
    if !adjacent {
        debug!("toggle of {} refused: not adjacent to the selection", candidate);
        return Err(Rejection::NotConsecutive);
    }

    let mut slots = current.as_set().clone();
    slots.insert(candidate);
    Ok(ToggleOutcome {
        selection: SelectionSet { slots },
        change: SelectionChange::Added,
    })
}

/// Re-checks `current` against fresh availability.
///
/// Slots that are no longer free cut the run; the longest free piece is kept,
/// the earliest one on a tie. Every other slot is returned as discarded.
pub fn retain_available(
    current: &SelectionSet,
    context: &SlotContext<'_>,
) -> (SelectionSet, Vec<DateTime<Utc>>) {
    let mut best: Vec<DateTime<Utc>> = Vec::new();
    let mut run: Vec<DateTime<Utc>> = Vec::new();
    for slot in current.iter() {
        if context.classify(slot) == SlotAvailability::Free {
            run.push(slot);
        } else {
            if run.len() > best.len() {
                best = std::mem::take(&mut run);
            }
            run.clear();
        }
    }
    if run.len() > best.len() {
        best = run;
    }

    let discarded: Vec<_> = current.iter().filter(|slot| !best.contains(slot)).collect();
    if !discarded.is_empty() {
        debug!(
            "{} selected slot(s) no longer free for {}, keeping {}",
            discarded.len(),
            context.staff,
            best.len()
        );
    }
    let selection = SelectionSet {
        slots: best.into_iter().collect(),
    };
    (selection, discarded)
}
