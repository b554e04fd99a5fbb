// --- File: crates/inkslot_client/src/dto.rs ---
//! Wire shapes of the studio backend.
//!
//! Responses are decoded into these structs first and only then converted
//! into the slot core types, so a malformed or inconsistent payload fails
//! here instead of leaking into the selection logic.

use crate::error::ClientError;
use chrono::{DateTime, Utc};
use inkslot_slots::{
    slot_width, AppointmentId, AppointmentSpan, AppointmentStatus, BlockedInterval,
    OccupiedInterval, StaffId, TimeSlot,
};
use serde::{Deserialize, Serialize};

// --- List envelopes ---

/// A list either sent bare or wrapped in an object.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped(WrappedList<T>),
}

#[derive(Deserialize, Debug)]
pub(crate) struct WrappedList<T> {
    #[serde(alias = "slots", alias = "appointments", alias = "blockedSlots")]
    data: Vec<T>,
}

impl<T> ListPayload<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Bare(items) => items,
            ListPayload::Wrapped(wrapped) => wrapped.data,
        }
    }
}

/// Decodes a list body and converts every element, failing on the first bad one.
pub(crate) fn parse_list<D, T>(body: &str) -> Result<Vec<T>, ClientError>
where
    D: for<'de> Deserialize<'de> + TryInto<T, Error = ClientError>,
{
    let payload: ListPayload<D> = serde_json::from_str(body)?;
    payload
        .into_vec()
        .into_iter()
        .map(|item| -> Result<T, ClientError> { item.try_into() })
        .collect()
}

fn ensure_ordered(start: DateTime<Utc>, end: DateTime<Utc>, what: &str) -> Result<(), ClientError> {
    if end <= start {
        return Err(ClientError::InvalidPayload(format!(
            "{} ends before it starts: {} - {}",
            what, start, end
        )));
    }
    Ok(())
}

// --- Availability ---

#[derive(Deserialize, Debug)]
pub struct TimeSlotDto {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TryFrom<TimeSlotDto> for TimeSlot {
    type Error = ClientError;

    fn try_from(dto: TimeSlotDto) -> Result<Self, Self::Error> {
        if dto.end - dto.start != slot_width() {
            return Err(ClientError::InvalidPayload(format!(
                "time slot {} - {} is not {} minutes wide",
                dto.start,
                dto.end,
                slot_width().num_minutes()
            )));
        }
        Ok(TimeSlot {
            start: dto.start,
            end: dto.end,
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct OccupiedDto {
    #[serde(default)]
    pub id: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TryFrom<OccupiedDto> for OccupiedInterval {
    type Error = ClientError;

    fn try_from(dto: OccupiedDto) -> Result<Self, Self::Error> {
        ensure_ordered(dto.start, dto.end, "appointment")?;
        Ok(OccupiedInterval {
            start: dto.start,
            end: dto.end,
            appointment_id: dto.id.map(AppointmentId),
        })
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BlockedSlotDto {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub tatoueur_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl TryFrom<BlockedSlotDto> for BlockedInterval {
    type Error = ClientError;

    fn try_from(dto: BlockedSlotDto) -> Result<Self, Self::Error> {
        ensure_ordered(dto.start_date, dto.end_date, "blocked period")?;
        Ok(BlockedInterval {
            start: dto.start_date,
            end: dto.end_date,
            staff: dto.tatoueur_id.map(StaffId),
            reason: dto.reason,
        })
    }
}

// --- Appointments ---

/// Client details typed into the appointment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Everything the appointment form collects besides the slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub title: String,
    /// Kind of service: tattoo, piercing, retouche, project...
    pub prestation: String,
    pub client: ClientContact,
    pub details: Option<String>,
}

/// Body of `POST /appointments` and `PATCH /appointments/update/{id}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub tatoueur_id: StaffId,
    pub title: String,
    pub prestation: String,
    pub client_firstname: String,
    pub client_lastname: String,
    pub client_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppointmentRequest {
    pub fn new(span: AppointmentSpan, staff: StaffId, form: &AppointmentForm) -> Self {
        Self {
            start: span.start,
            end: span.end,
            tatoueur_id: staff,
            title: form.title.clone(),
            prestation: form.prestation.clone(),
            client_firstname: form.client.first_name.clone(),
            client_lastname: form.client.last_name.clone(),
            client_email: form.client.email.clone(),
            client_phone: form.client.phone.clone(),
            details: form.details.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of `POST /appointments/propose-reschedule/{userId}`: asks the client
/// of an appointment to pick a new slot, optionally with another artist.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleProposal {
    pub appointment_id: AppointmentId,
    #[serde(rename = "newTatoueurId", skip_serializing_if = "Option::is_none")]
    pub new_staff: Option<StaffId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// An appointment as the backend reports it after a mutation.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub id: AppointmentId,
    pub status: AppointmentStatus,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub tatoueur_id: Option<StaffId>,
    #[serde(default)]
    pub title: Option<String>,
}

impl AppointmentRecord {
    pub fn span(&self) -> AppointmentSpan {
        AppointmentSpan {
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum MutationPayload {
    Wrapped {
        #[serde(default)]
        message: Option<String>,
        appointment: AppointmentRecord,
    },
    Bare(AppointmentRecord),
    MessageOnly {
        message: String,
    },
}

/// What a mutation returned: a confirmation message, the updated
/// appointment, or both. An empty body yields neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentReceipt {
    pub message: Option<String>,
    pub appointment: Option<AppointmentRecord>,
}

impl AppointmentReceipt {
    pub(crate) fn parse(body: &str) -> Result<Self, ClientError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        let receipt = match serde_json::from_str::<MutationPayload>(body)? {
            MutationPayload::Wrapped {
                message,
                appointment,
            } => Self {
                message,
                appointment: Some(appointment),
            },
            MutationPayload::Bare(appointment) => Self {
                message: None,
                appointment: Some(appointment),
            },
            MutationPayload::MessageOnly { message } => Self {
                message: Some(message),
                appointment: None,
            },
        };
        Ok(receipt)
    }
}

// --- Errors ---

/// Error body conventions of the backend; every field is optional.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Code the backend attaches to plan-limit refusals.
pub const SAAS_LIMIT_CODE: &str = "SAAS_LIMIT_REACHED";

const SAAS_LIMIT_MESSAGES: [&str; 2] = ["limite de rendez-vous atteinte", "limite de clients atteinte"];

pub(crate) fn is_saas_limit(code: Option<&str>, message: &str) -> bool {
    if code == Some(SAAS_LIMIT_CODE) {
        return true;
    }
    let message = message.to_lowercase();
    SAAS_LIMIT_MESSAGES.iter().any(|known| message.contains(known))
}

/// Turns a non-2xx answer into a [`ClientError`].
pub(crate) fn api_error(status_code: u16, canonical_reason: Option<&str>, body: &str) -> ClientError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .unwrap_or_else(|| {
            let raw = body.trim();
            if raw.is_empty() {
                canonical_reason.unwrap_or("unknown error").to_string()
            } else {
                raw.to_string()
            }
        });

    if is_saas_limit(parsed.code.as_deref(), &message) {
        ClientError::SaasLimit(message)
    } else {
        ClientError::ApiError {
            status_code,
            message,
        }
    }
}
