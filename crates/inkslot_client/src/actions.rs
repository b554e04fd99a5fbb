// --- File: crates/inkslot_client/src/actions.rs ---
use crate::backend::BookingBackend;
use crate::dto::{AppointmentReceipt, RescheduleProposal};
use crate::error::ClientError;
use inkslot_common::log_result;
use inkslot_slots::{AppointmentAction, AppointmentId, AppointmentStatus, StaffId, UserId};
use std::sync::Arc;
use tracing::warn;

/// Status changes requested from the appointment detail view.
///
/// The backend owns the transitions. `status` is only used to log when a
/// caller asks for an action the client would not have offered.
pub struct AppointmentActions<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: BookingBackend + ?Sized> AppointmentActions<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    fn note_unexpected(status: Option<AppointmentStatus>, action: AppointmentAction, id: &AppointmentId) {
        if let Some(status) = status {
            if !status.allows(action) {
                warn!("{:?} requested on {} while {}; sending anyway", action, id, status);
            }
        }
    }

    pub async fn confirm(
        &self,
        id: &AppointmentId,
        status: Option<AppointmentStatus>,
    ) -> Result<AppointmentReceipt, ClientError> {
        Self::note_unexpected(status, AppointmentAction::Confirm, id);
        log_result(
            self.backend.confirm_appointment(id).await,
            "appointment confirmed",
            "appointment confirmation failed",
        )
    }

    pub async fn cancel(
        &self,
        id: &AppointmentId,
        status: Option<AppointmentStatus>,
        reason: Option<String>,
    ) -> Result<AppointmentReceipt, ClientError> {
        Self::note_unexpected(status, AppointmentAction::Cancel, id);
        let reason = reason.filter(|text| !text.trim().is_empty());
        log_result(
            self.backend.cancel_appointment(id, reason).await,
            "appointment cancelled",
            "appointment cancellation failed",
        )
    }

    /// Asks the client (`user`) of appointment `id` to pick a new slot,
    /// optionally with another artist.
    pub async fn propose_reschedule(
        &self,
        user: &UserId,
        id: &AppointmentId,
        status: Option<AppointmentStatus>,
        new_staff: Option<StaffId>,
        reason: Option<String>,
    ) -> Result<AppointmentReceipt, ClientError> {
        Self::note_unexpected(status, AppointmentAction::ProposeReschedule, id);
        let proposal = RescheduleProposal {
            appointment_id: id.clone(),
            new_staff,
            reason: reason.filter(|text| !text.trim().is_empty()),
        };
        log_result(
            self.backend.propose_reschedule(user, &proposal).await,
            "reschedule proposed",
            "reschedule proposal failed",
        )
    }
}
