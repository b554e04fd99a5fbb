// --- File: crates/inkslot_client/src/session.rs ---
//! The slot picker behind the appointment forms.
//!
//! A thin stateful adapter around [`inkslot_slots`]: it remembers what is on
//! screen, forwards every toggle to the pure core and keeps the last warning
//! for display. Availability answers carry a [`RequestGeneration`]; only the
//! most recently issued one is ever applied.

use crate::availability::{Availability, AvailabilityFetcher};
use crate::backend::BookingBackend;
use crate::error::ClientError;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use inkslot_slots::{
    derive_span, mark_slot, reconcile, retain_available, toggle_slot, AppointmentId,
    AppointmentSpan, Rejection, Reconciliation, SelectionChange, SelectionSet, SlotAvailability,
    SlotMark, StaffId, TimeSlot,
};
use tracing::{debug, info, warn};

const SELECTION_TRIMMED: &str = "some selected slots are no longer available";

/// Token handed out when an availability request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestGeneration(u64);

/// Whether an availability answer was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    /// A newer request was issued in the meantime; the answer was dropped.
    Stale,
}

#[derive(Debug, Clone)]
struct EditTarget {
    id: AppointmentId,
    initial: SelectionSet,
}

/// One line of the slot grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub slot: TimeSlot,
    pub availability: SlotAvailability,
    pub selected: bool,
    /// Only set when editing an existing appointment.
    pub mark: Option<SlotMark>,
}

#[derive(Debug, Clone)]
pub struct SlotPicker {
    staff: StaffId,
    date: NaiveDate,
    editing: Option<EditTarget>,
    availability: Option<Availability>,
    selection: SelectionSet,
    warning: Option<String>,
    load_error: Option<String>,
    latest_generation: u64,
}

impl SlotPicker {
    /// Picker for a new appointment; starts with nothing selected.
    pub fn open_new(staff: StaffId, date: NaiveDate) -> Self {
        Self {
            staff,
            date,
            editing: None,
            availability: None,
            selection: SelectionSet::empty(),
            warning: None,
            load_error: None,
            latest_generation: 0,
        }
    }

    /// Picker for an existing appointment, seeded with its stored span.
    /// The displayed day is the span's start date in the studio time zone.
    pub fn open_edit(
        staff: StaffId,
        appointment: AppointmentId,
        stored: AppointmentSpan,
        timezone: Tz,
    ) -> Result<Self, ClientError> {
        let initial = stored.to_selection()?;
        let date = stored.start.with_timezone(&timezone).date_naive();
        let mut picker = Self::open_new(staff, date);
        picker.selection = initial.clone();
        picker.editing = Some(EditTarget {
            id: appointment,
            initial,
        });
        Ok(picker)
    }

    pub fn staff(&self) -> &StaffId {
        &self.staff
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn editing(&self) -> Option<&AppointmentId> {
        self.editing.as_ref().map(|target| &target.id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn availability(&self) -> Option<&Availability> {
        self.availability.as_ref()
    }

    /// Last refused toggle or dropped selection, cleared by the next
    /// accepted toggle.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Set when the last availability load failed; a retry clears it.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Switches day. The selection is dropped and in-flight loads go stale.
    pub fn change_date(&mut self, date: NaiveDate) {
        if date != self.date {
            self.date = date;
            self.reset_view();
        }
    }

    /// Switches staff member, with the same effects as [`Self::change_date`].
    pub fn change_staff(&mut self, staff: StaffId) {
        if staff != self.staff {
            self.staff = staff;
            self.reset_view();
        }
    }

    fn reset_view(&mut self) {
        self.availability = None;
        self.selection = SelectionSet::empty();
        self.warning = None;
        self.load_error = None;
        self.latest_generation += 1;
    }

    /// Marks the start of an availability load.
    pub fn begin_refresh(&mut self) -> RequestGeneration {
        self.latest_generation += 1;
        RequestGeneration(self.latest_generation)
    }

    /// Applies the outcome of the load started with `generation`, unless a
    /// newer load has started since.
    ///
    /// Selected slots the new lists mark as blocked or occupied are dropped,
    /// keeping the longest free piece of the run.
    pub fn apply(
        &mut self,
        generation: RequestGeneration,
        result: Result<Availability, ClientError>,
    ) -> Applied {
        if generation.0 != self.latest_generation {
            debug!(
                "dropping availability answer {} (latest is {})",
                generation.0, self.latest_generation
            );
            return Applied::Stale;
        }

        match result {
            Ok(availability) => {
                let editing = self.editing.as_ref().map(|target| &target.id);
                let (kept, discarded) = retain_available(&self.selection, &availability.context(editing));
                if !discarded.is_empty() {
                    warn!(
                        "{} selected slot(s) of {} on {} are no longer available",
                        discarded.len(),
                        self.staff,
                        self.date
                    );
                    self.selection = kept;
                    self.warning = Some(SELECTION_TRIMMED.to_string());
                }
                self.availability = Some(availability);
                self.load_error = None;
            }
            Err(err) => {
                warn!("availability load failed for {} on {}: {}", self.staff, self.date, err);
                self.availability = None;
                self.load_error = Some(err.user_message());
            }
        }
        Applied::Current
    }

    /// Loads the current day through `fetcher`. Also serves as the manual
    /// retry after a failed load.
    pub async fn refresh<B>(&mut self, fetcher: &AvailabilityFetcher<B>) -> Applied
    where
        B: BookingBackend + ?Sized,
    {
        let generation = self.begin_refresh();
        let result = fetcher.fetch(self.date, &self.staff).await;
        self.apply(generation, result)
    }

    /// Toggles one slot. A refusal leaves the selection as it was and
    /// becomes the current warning. Nothing can be toggled until the day's
    /// availability has been applied.
    pub fn toggle(&mut self, candidate: DateTime<Utc>) -> Result<SelectionChange, Rejection> {
        let result = match &self.availability {
            Some(availability) => toggle_slot(candidate, &self.selection, &availability.context(self.editing())),
            None => {
                debug!("toggle of {} refused: availability not loaded", candidate);
                Err(Rejection::NotLoaded)
            }
        };
        match result {
            Ok(outcome) => {
                if let SelectionChange::Split { discarded } = &outcome.change {
                    info!("selection split at {}, dropped {} slot(s)", candidate, discarded.len());
                }
                self.selection = outcome.selection;
                self.warning = None;
                Ok(outcome.change)
            }
            Err(rejection) => {
                self.warning = Some(rejection.to_string());
                Err(rejection)
            }
        }
    }

    pub fn span(&self) -> Result<AppointmentSpan, ClientError> {
        Ok(derive_span(&self.selection)?)
    }

    /// Difference from the stored span; `None` for a new appointment.
    pub fn reconciliation(&self) -> Option<Reconciliation> {
        self.editing
            .as_ref()
            .map(|target| reconcile(&target.initial, &self.selection))
    }

    /// The slot grid: offered slots plus, when editing, the stored slots the
    /// backend does not offer because the appointment itself holds them.
    pub fn rows(&self) -> Vec<SlotRow> {
        let mut slots: Vec<TimeSlot> = self
            .availability
            .as_ref()
            .map(|availability| availability.slots.clone())
            .unwrap_or_default();
        if let Some(target) = &self.editing {
            for start in target.initial.iter() {
                if !slots.iter().any(|slot| slot.start == start) {
                    slots.push(TimeSlot::starting_at(start));
                }
            }
        }
        slots.sort_by_key(|slot| slot.start);

        let editing = self.editing();
        slots
            .into_iter()
            .map(|slot| SlotRow {
                availability: self
                    .availability
                    .as_ref()
                    .map_or(SlotAvailability::Free, |availability| {
                        availability.context(editing).classify(slot.start)
                    }),
                selected: self.selection.contains(slot.start),
                mark: self
                    .editing
                    .as_ref()
                    .and_then(|target| mark_slot(slot.start, &target.initial, &self.selection)),
                slot,
            })
            .collect()
    }

    /// Discards the session state, as when the form is closed or submitted.
    /// An edit session ends here too.
    pub fn close(&mut self) {
        self.reset_view();
        if let Some(target) = self.editing.take() {
            debug!("closing edit session of {}", target.id);
        }
    }
}
