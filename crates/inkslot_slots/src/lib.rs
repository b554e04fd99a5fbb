// --- File: crates/inkslot_slots/src/lib.rs ---
//! Contiguous 30-minute slot selection for appointment forms.
//!
//! Everything here is pure: selections are values, toggles return a new
//! selection or a rejection, and nothing talks to the network.
pub mod models;
pub mod reconcile;
pub mod selection;
#[cfg(test)]
mod selection_proptest;
pub mod span;
pub mod status;

pub use models::{
    slot_width, AppointmentId, BlockedInterval, OccupiedInterval, StaffId, TimeSlot, UserId,
    SLOT_MINUTES,
};
pub use reconcile::{mark_slot, reconcile, Reconciliation, SlotMark};
pub use selection::{
    classify_slot, retain_available, toggle_slot, Rejection, SelectionChange, SelectionError, SelectionSet,
    SlotAvailability, SlotContext, ToggleOutcome,
};
pub use span::{derive_span, AppointmentSpan, SpanError};
pub use status::{AppointmentAction, AppointmentStatus};
