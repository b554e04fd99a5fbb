// --- File: crates/inkslot_slots/src/span.rs ---
use crate::models::slot_width;
use crate::selection::{SelectionError, SelectionSet};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanError {
    #[error("select at least one slot")]
    EmptySelection,
}

/// Start and end of the appointment a selection describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppointmentSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AppointmentSpan {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The slots this span covers. Fails unless the span is a whole,
    /// positive number of slots.
    pub fn to_selection(&self) -> Result<SelectionSet, SelectionError> {
        SelectionSet::covering(self.start, self.end)
    }
}

/// `start` is the earliest slot, `end` the latest slot plus one slot width.
///
/// Only emptiness is checked; the backend decides whether the span is legal.
pub fn derive_span(selection: &SelectionSet) -> Result<AppointmentSpan, SpanError> {
    match (selection.first(), selection.last()) {
        (Some(first), Some(last)) => Ok(AppointmentSpan {
            start: first,
            end: last + slot_width(),
        }),
        _ => Err(SpanError::EmptySelection),
    }
}
