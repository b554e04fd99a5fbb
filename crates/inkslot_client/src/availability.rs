// --- File: crates/inkslot_client/src/availability.rs ---
use crate::backend::BookingBackend;
use crate::error::ClientError;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use inkslot_slots::{AppointmentId, BlockedInterval, OccupiedInterval, SlotContext, StaffId, TimeSlot};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything needed to validate toggles for one staff member on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub date: NaiveDate,
    pub staff: StaffId,
    /// Offered slots, in ascending order.
    pub slots: Vec<TimeSlot>,
    pub occupied: Vec<OccupiedInterval>,
    pub blocked: Vec<BlockedInterval>,
}

impl Availability {
    /// Validation context for the selection core. `editing` is the
    /// appointment whose own span must not count as occupied.
    pub fn context<'a>(&'a self, editing: Option<&'a AppointmentId>) -> SlotContext<'a> {
        SlotContext {
            staff: &self.staff,
            blocked: &self.blocked,
            occupied: &self.occupied,
            editing,
        }
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, ClientError> {
    name.parse::<Tz>()
        .map_err(|_| ClientError::UnknownTimezone(name.to_string()))
}

/// Midnight to midnight of `date` in `timezone`, as UTC instants.
pub fn day_bounds(date: NaiveDate, timezone: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>), ClientError> {
    let local_midnight = |day: NaiveDate| {
        day.and_hms_opt(0, 0, 0)
            .and_then(|midnight| timezone.from_local_datetime(&midnight).earliest())
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| ClientError::InvalidDate(format!("{} has no midnight in {}", day, timezone)))
    };
    let next_day = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| ClientError::InvalidDate(format!("{} is out of range", date)))?;
    Ok((local_midnight(date)?, local_midnight(next_day)?))
}

/// Loads the three availability lists for a day.
pub struct AvailabilityFetcher<B: ?Sized> {
    backend: Arc<B>,
    timezone: Tz,
}

impl<B: BookingBackend + ?Sized> AvailabilityFetcher<B> {
    pub fn new(backend: Arc<B>, timezone: Tz) -> Self {
        Self { backend, timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Issues the three independent requests concurrently; the first
    /// failure fails the whole fetch.
    pub async fn fetch(&self, date: NaiveDate, staff: &StaffId) -> Result<Availability, ClientError> {
        let (day_start, day_end) = day_bounds(date, self.timezone)?;
        debug!("fetching availability of {} on {} ({} - {})", staff, date, day_start, day_end);

        let (mut slots, occupied, blocked) = tokio::try_join!(
            self.backend.time_slots(date, staff),
            self.backend.occupied(staff, day_start, day_end),
            self.backend.blocked(staff),
        )?;
        slots.sort_by_key(|slot| slot.start);

        info!(
            "availability of {} on {}: {} slot(s), {} appointment(s), {} block(s)",
            staff,
            date,
            slots.len(),
            occupied.len(),
            blocked.len()
        );
        Ok(Availability {
            date,
            staff: staff.clone(),
            slots,
            occupied,
            blocked,
        })
    }
}
