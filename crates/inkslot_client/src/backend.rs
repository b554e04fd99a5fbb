// --- File: crates/inkslot_client/src/backend.rs ---
//! The seam between the session logic and the studio backend.
//!
//! [`crate::rest::RestBackend`] is the production implementation; tests use
//! the generated `MockBookingBackend`.

use crate::dto::{AppointmentReceipt, AppointmentRequest, RescheduleProposal};
use crate::error::ClientError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use inkslot_slots::{AppointmentId, BlockedInterval, OccupiedInterval, StaffId, TimeSlot, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Bookable slots of `staff` on `date`.
    async fn time_slots(&self, date: NaiveDate, staff: &StaffId) -> Result<Vec<TimeSlot>, ClientError>;

    /// Appointments of `staff` overlapping `[start, end)`.
    async fn occupied(
        &self,
        staff: &StaffId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OccupiedInterval>, ClientError>;

    /// Blocked periods of `staff`, studio-wide ones included.
    async fn blocked(&self, staff: &StaffId) -> Result<Vec<BlockedInterval>, ClientError>;

    async fn create_appointment(&self, request: &AppointmentRequest) -> Result<AppointmentReceipt, ClientError>;

    async fn update_appointment(
        &self,
        id: &AppointmentId,
        request: &AppointmentRequest,
    ) -> Result<AppointmentReceipt, ClientError>;

    async fn confirm_appointment(&self, id: &AppointmentId) -> Result<AppointmentReceipt, ClientError>;

    async fn cancel_appointment(
        &self,
        id: &AppointmentId,
        reason: Option<String>,
    ) -> Result<AppointmentReceipt, ClientError>;

    /// Notifies the client behind `user` that a new slot should be picked.
    async fn propose_reschedule(
        &self,
        user: &UserId,
        proposal: &RescheduleProposal,
    ) -> Result<AppointmentReceipt, ClientError>;
}
