// --- File: crates/inkslot_slots/src/status.rs ---
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appointment status as reported by the backend.
///
/// The client only reads it to decide which actions to offer; transitions
/// are performed and validated by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Canceled,
    Rescheduling,
    Completed,
    NoShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentAction {
    Confirm,
    Edit,
    ProposeReschedule,
    Cancel,
}

impl AppointmentStatus {
    pub fn available_actions(self) -> &'static [AppointmentAction] {
        use AppointmentAction::*;
        match self {
            AppointmentStatus::Pending => &[Confirm, Edit, ProposeReschedule, Cancel],
            AppointmentStatus::Confirmed => &[Edit, ProposeReschedule, Cancel],
            AppointmentStatus::Rescheduling => &[Cancel],
            AppointmentStatus::Canceled | AppointmentStatus::Completed | AppointmentStatus::NoShow => &[],
        }
    }

    pub fn allows(self, action: AppointmentAction) -> bool {
        self.available_actions().contains(&action)
    }

    /// Nothing more happens to the appointment once it is here.
    pub fn is_final(self) -> bool {
        self.available_actions().is_empty()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Canceled => "CANCELED",
            AppointmentStatus::Rescheduling => "RESCHEDULING",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::NoShow => "NO_SHOW",
        };
        f.write_str(label)
    }
}
