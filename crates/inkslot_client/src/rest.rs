// --- File: crates/inkslot_client/src/rest.rs ---
use crate::backend::BookingBackend;
use crate::dto::{
    api_error, parse_list, AppointmentReceipt, AppointmentRequest, BlockedSlotDto, CancelRequest,
    OccupiedDto, RescheduleProposal, TimeSlotDto,
};
use crate::error::ClientError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use inkslot_common::create_backend_client;
use inkslot_config::BackendConfig;
use inkslot_slots::{AppointmentId, BlockedInterval, OccupiedInterval, StaffId, TimeSlot, UserId};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, error, warn};

/// [`BookingBackend`] over the studio's REST API.
#[derive(Clone, Debug)]
pub struct RestBackend {
    client: Client,
    base_url: String,
}

impl RestBackend {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Builds the HTTP client (timeout, bearer token) from the `[backend]` section.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ClientError> {
        let client = create_backend_client(config)?;
        Ok(Self::new(client, config.base_url.as_str()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and returns the body of a 2xx answer.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<String, ClientError> {
        let response = request.send().await.map_err(|e| {
            error!("{} failed to reach the backend: {}", what, e);
            ClientError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = api_error(status.as_u16(), status.canonical_reason(), &body);
            if err.is_saas_limit() {
                warn!("{} refused by plan limit: {}", what, err);
            } else {
                error!("{} failed: {}", what, err);
            }
            return Err(err);
        }
        debug!("{} succeeded with status {}", what, status);
        Ok(body)
    }
}

fn rfc3339(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl BookingBackend for RestBackend {
    async fn time_slots(&self, date: NaiveDate, staff: &StaffId) -> Result<Vec<TimeSlot>, ClientError> {
        let request = self.client.get(self.url("/timeslots/tatoueur")).query(&[
            ("date", date.format("%Y-%m-%d").to_string()),
            ("tatoueurId", staff.to_string()),
        ]);
        let body = self.send(request, "time slot fetch").await?;
        parse_list::<TimeSlotDto, TimeSlot>(&body)
    }

    async fn occupied(
        &self,
        staff: &StaffId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OccupiedInterval>, ClientError> {
        let request = self
            .client
            .get(self.url("/appointments/tatoueur-range"))
            .query(&[
                ("tatoueurId", staff.to_string()),
                ("start", rfc3339(start)),
                ("end", rfc3339(end)),
            ]);
        let body = self.send(request, "occupied range fetch").await?;
        parse_list::<OccupiedDto, OccupiedInterval>(&body)
    }

    async fn blocked(&self, staff: &StaffId) -> Result<Vec<BlockedInterval>, ClientError> {
        let request = self
            .client
            .get(self.url(&format!("/blocked-slots/tatoueur/{}", staff)));
        let body = self.send(request, "blocked slot fetch").await?;
        parse_list::<BlockedSlotDto, BlockedInterval>(&body)
    }

    async fn create_appointment(&self, request: &AppointmentRequest) -> Result<AppointmentReceipt, ClientError> {
        let builder = self.client.post(self.url("/appointments")).json(request);
        let body = self.send(builder, "appointment creation").await?;
        AppointmentReceipt::parse(&body)
    }

    async fn update_appointment(
        &self,
        id: &AppointmentId,
        request: &AppointmentRequest,
    ) -> Result<AppointmentReceipt, ClientError> {
        let builder = self
            .client
            .patch(self.url(&format!("/appointments/update/{}", id)))
            .json(request);
        let body = self.send(builder, "appointment update").await?;
        AppointmentReceipt::parse(&body)
    }

    async fn confirm_appointment(&self, id: &AppointmentId) -> Result<AppointmentReceipt, ClientError> {
        let builder = self
            .client
            .patch(self.url(&format!("/appointments/confirm/{}", id)));
        let body = self.send(builder, "appointment confirmation").await?;
        AppointmentReceipt::parse(&body)
    }

    async fn cancel_appointment(
        &self,
        id: &AppointmentId,
        reason: Option<String>,
    ) -> Result<AppointmentReceipt, ClientError> {
        let builder = self
            .client
            .patch(self.url(&format!("/appointments/cancel/{}", id)))
            .json(&CancelRequest { reason });
        let body = self.send(builder, "appointment cancellation").await?;
        AppointmentReceipt::parse(&body)
    }

    async fn propose_reschedule(
        &self,
        user: &UserId,
        proposal: &RescheduleProposal,
    ) -> Result<AppointmentReceipt, ClientError> {
        let builder = self
            .client
            .post(self.url(&format!("/appointments/propose-reschedule/{}", user)))
            .json(proposal);
        let body = self.send(builder, "reschedule proposal").await?;
        AppointmentReceipt::parse(&body)
    }
}
