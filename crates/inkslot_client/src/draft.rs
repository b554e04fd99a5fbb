// --- File: crates/inkslot_client/src/draft.rs ---
use crate::backend::BookingBackend;
use crate::dto::{AppointmentForm, AppointmentReceipt, AppointmentRequest};
use crate::error::ClientError;
use crate::session::SlotPicker;
use inkslot_common::log_result;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns a picker's selection plus the form fields into an appointment.
///
/// The span is derived before anything is sent, so an empty selection never
/// reaches the backend. On success the picker is closed.
pub struct DraftSubmitter<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: BookingBackend + ?Sized> DraftSubmitter<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// The request [`Self::create`] or [`Self::update`] would send.
    pub fn prepare(picker: &SlotPicker, form: &AppointmentForm) -> Result<AppointmentRequest, ClientError> {
        let span = picker.span()?;
        Ok(AppointmentRequest::new(span, picker.staff().clone(), form))
    }

    pub async fn create(
        &self,
        picker: &mut SlotPicker,
        form: &AppointmentForm,
    ) -> Result<AppointmentReceipt, ClientError> {
        let request = Self::prepare(picker, form)?;
        debug!(
            "creating appointment for {} from {} to {}",
            request.tatoueur_id, request.start, request.end
        );
        let receipt = log_result(
            self.backend.create_appointment(&request).await,
            "appointment created",
            "appointment creation failed",
        )?;
        picker.close();
        Ok(receipt)
    }

    /// Saves the picker's selection over the appointment it was opened on.
    pub async fn update(
        &self,
        picker: &mut SlotPicker,
        form: &AppointmentForm,
    ) -> Result<AppointmentReceipt, ClientError> {
        let id = picker.editing().cloned().ok_or(ClientError::NotEditing)?;
        let request = Self::prepare(picker, form)?;
        if let Some(diff) = picker.reconciliation() {
            info!(
                "updating {}: {} slot(s) kept, {} removed, {} added",
                id,
                diff.retained.len(),
                diff.removed.len(),
                diff.added.len()
            );
        }
        let receipt = log_result(
            self.backend.update_appointment(&id, &request).await,
            "appointment updated",
            "appointment update failed",
        )?;
        picker.close();
        Ok(receipt)
    }
}
