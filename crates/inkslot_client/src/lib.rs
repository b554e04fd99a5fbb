// --- File: crates/inkslot_client/src/lib.rs ---
pub mod actions;
pub mod availability;
pub mod backend;
pub mod draft;
pub mod dto;
pub mod error;
pub mod rest;
pub mod session;
#[cfg(test)]
mod session_test;

pub use actions::AppointmentActions;
pub use availability::{day_bounds, parse_timezone, Availability, AvailabilityFetcher};
pub use backend::BookingBackend;
pub use draft::DraftSubmitter;
pub use dto::{
    AppointmentForm, AppointmentReceipt, AppointmentRecord, AppointmentRequest, ClientContact,
    RescheduleProposal,
};
pub use error::ClientError;
pub use rest::RestBackend;
pub use session::{Applied, RequestGeneration, SlotPicker, SlotRow};
