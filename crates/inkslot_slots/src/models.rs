// --- File: crates/inkslot_slots/src/models.rs ---
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of one bookable slot, in minutes. Fixed for the whole studio.
pub const SLOT_MINUTES: i64 = 30;

/// Width of one bookable slot.
pub fn slot_width() -> Duration {
    Duration::minutes(SLOT_MINUTES)
}

/// Half-open overlap test: `[start, end)` against `[other_start, other_end)`.
pub fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    other_start: DateTime<Utc>,
    other_end: DateTime<Utc>,
) -> bool {
    start < other_end && end > other_start
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// A staff member (tatoueur) appointments are assigned to.
    StaffId
);
string_id!(
    /// A stored appointment.
    AppointmentId
);
string_id!(
    /// A studio account; reschedule proposals are addressed per account.
    UserId
);

/// A bookable 30-minute slot as offered by the backend for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    /// Slot starting at `start`, one slot width long.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: start + slot_width(),
        }
    }
}

/// The span of an existing appointment of the active staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// The appointment occupying the span, when the backend reports it.
    pub appointment_id: Option<AppointmentId>,
}

impl OccupiedInterval {
    pub fn overlaps_slot(&self, slot_start: DateTime<Utc>) -> bool {
        overlaps(slot_start, slot_start + slot_width(), self.start, self.end)
    }

    pub fn belongs_to(&self, appointment: &AppointmentId) -> bool {
        self.appointment_id.as_ref() == Some(appointment)
    }
}

/// A period during which no appointment may be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `None` blocks every staff member.
    pub staff: Option<StaffId>,
    pub reason: Option<String>,
}

impl BlockedInterval {
    /// Whether the block concerns `staff`: its own blocks and studio-wide ones.
    pub fn applies_to(&self, staff: &StaffId) -> bool {
        self.staff.as_ref().map_or(true, |id| id == staff)
    }

    pub fn overlaps_slot(&self, slot_start: DateTime<Utc>) -> bool {
        overlaps(slot_start, slot_start + slot_width(), self.start, self.end)
    }
}
