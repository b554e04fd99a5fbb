#[cfg(test)]
mod tests {
    use crate::availability::{Availability, AvailabilityFetcher};
    use crate::backend::MockBookingBackend;
    use crate::error::ClientError;
    use crate::session::{Applied, SlotPicker};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use chrono_tz::Europe::Paris;
    use inkslot_slots::{
        AppointmentId, AppointmentSpan, BlockedInterval, OccupiedInterval, Rejection, SelectionChange,
        SlotAvailability, SlotMark, StaffId, TimeSlot,
    };
    use std::sync::Arc;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, minute, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn staff() -> StaffId {
        StaffId::from("tat-1")
    }

    fn availability(occupied: Vec<OccupiedInterval>, blocked: Vec<BlockedInterval>) -> Availability {
        Availability {
            date: day(),
            staff: staff(),
            slots: (0..8).map(|i| TimeSlot::starting_at(at(10, 0) + chrono::Duration::minutes(30 * i))).collect(),
            occupied,
            blocked,
        }
    }

    fn loaded(availability: Availability) -> SlotPicker {
        let mut picker = SlotPicker::open_new(staff(), day());
        let generation = picker.begin_refresh();
        assert_eq!(picker.apply(generation, Ok(availability)), Applied::Current);
        picker
    }

    #[test]
    fn test_stale_answer_is_dropped() {
        let mut picker = SlotPicker::open_new(staff(), day());
        let first = picker.begin_refresh();
        let second = picker.begin_refresh();

        let newer = availability(vec![], vec![]);
        let mut older = newer.clone();
        older.slots.truncate(1);

        assert_eq!(picker.apply(second, Ok(newer.clone())), Applied::Current);
        assert_eq!(picker.apply(first, Ok(older)), Applied::Stale);
        assert_eq!(picker.availability(), Some(&newer));
    }

    #[test]
    fn test_changing_day_discards_selection_and_in_flight_loads() {
        let mut picker = loaded(availability(vec![], vec![]));
        picker.toggle(at(10, 0)).unwrap();
        let in_flight = picker.begin_refresh();

        picker.change_date(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());

        assert!(picker.selection().is_empty());
        assert!(picker.availability().is_none());
        assert_eq!(picker.apply(in_flight, Ok(availability(vec![], vec![]))), Applied::Stale);
    }

    #[test]
    fn test_changing_staff_discards_selection() {
        let mut picker = loaded(availability(vec![], vec![]));
        picker.toggle(at(10, 0)).unwrap();
        picker.change_staff(StaffId::from("tat-2"));
        assert!(picker.selection().is_empty());
        assert_eq!(picker.staff(), &StaffId::from("tat-2"));
    }

    #[test]
    fn test_failed_load_is_reported() {
        let mut picker = SlotPicker::open_new(staff(), day());
        let generation = picker.begin_refresh();
        let failure = ClientError::ApiError {
            status_code: 503,
            message: "service unavailable".to_string(),
        };

        assert_eq!(picker.apply(generation, Err(failure)), Applied::Current);
        assert_eq!(picker.load_error(), Some("service unavailable"));
        assert!(picker.availability().is_none());
    }

    #[tokio::test]
    async fn test_retry_clears_load_error() {
        let mut picker = SlotPicker::open_new(staff(), day());
        let generation = picker.begin_refresh();
        picker.apply(
            generation,
            Err(ClientError::ApiError {
                status_code: 503,
                message: "service unavailable".to_string(),
            }),
        );

        let mut backend = MockBookingBackend::new();
        backend
            .expect_time_slots()
            .returning(|_, _| Ok(vec![TimeSlot::starting_at(at(10, 0))]));
        backend.expect_occupied().returning(|_, _, _| Ok(vec![]));
        backend.expect_blocked().returning(|_| Ok(vec![]));
        let fetcher = AvailabilityFetcher::new(Arc::new(backend), Paris);

        assert_eq!(picker.refresh(&fetcher).await, Applied::Current);
        assert!(picker.load_error().is_none());
        assert_eq!(picker.rows().len(), 1);
    }

    #[test]
    fn test_blocked_period_scenario() {
        // Salon closed 13:30 - 14:30 for everyone.
        let block = BlockedInterval {
            start: at(13, 30),
            end: at(14, 30),
            staff: None,
            reason: Some("Salon fermé".to_string()),
        };
        let mut picker = loaded(availability(vec![], vec![block]));

        assert_eq!(picker.toggle(at(13, 0)), Ok(SelectionChange::Added));
        assert_eq!(picker.toggle(at(13, 30)), Err(Rejection::Blocked));
        assert_eq!(picker.warning(), Some("this slot is blocked"));
        assert_eq!(picker.toggle(at(14, 0)), Err(Rejection::Blocked));
        assert_eq!(picker.selection().len(), 1);

        assert_eq!(picker.toggle(at(12, 30)), Ok(SelectionChange::Added));
        assert!(picker.warning().is_none());
        assert_eq!(
            picker.span().unwrap(),
            AppointmentSpan {
                start: at(12, 30),
                end: at(13, 30)
            }
        );
    }

    #[test]
    fn test_non_adjacent_toggle_warns() {
        let mut picker = loaded(availability(vec![], vec![]));
        picker.toggle(at(10, 0)).unwrap();
        assert_eq!(picker.toggle(at(11, 0)), Err(Rejection::NotConsecutive));
        assert_eq!(picker.warning(), Some("slots must be consecutive"));
    }

    #[test]
    fn test_empty_selection_has_no_span() {
        let picker = SlotPicker::open_new(staff(), day());
        assert!(matches!(picker.span(), Err(ClientError::EmptySelection)));
        assert!(picker.reconciliation().is_none());
    }

    #[test]
    fn test_edit_session_ignores_its_own_appointment() {
        let id = AppointmentId::from("a1");
        let stored = AppointmentSpan {
            start: at(11, 0),
            end: at(12, 0),
        };
        let own = OccupiedInterval {
            start: at(11, 0),
            end: at(12, 0),
            appointment_id: Some(id.clone()),
        };
        let other = OccupiedInterval {
            start: at(12, 30),
            end: at(13, 0),
            appointment_id: Some(AppointmentId::from("a2")),
        };

        let mut picker = SlotPicker::open_edit(staff(), id.clone(), stored, Paris).unwrap();
        assert_eq!(picker.date(), day());
        assert_eq!(picker.editing(), Some(&id));

        // The backend does not offer slots held by the edited appointment.
        let mut offered = availability(vec![own, other], vec![]);
        offered.slots.retain(|slot| slot.start != at(11, 0) && slot.start != at(11, 30));
        let generation = picker.begin_refresh();
        picker.apply(generation, Ok(offered));

        assert_eq!(picker.toggle(at(12, 0)), Ok(SelectionChange::Added));
        assert_eq!(picker.toggle(at(12, 30)), Err(Rejection::Occupied));
        assert_eq!(picker.toggle(at(11, 0)), Ok(SelectionChange::Removed));

        let reconciliation = picker.reconciliation().unwrap();
        assert_eq!(reconciliation.removed, vec![at(11, 0)]);
        assert_eq!(reconciliation.added, vec![at(12, 0)]);

        let rows = picker.rows();
        let row = |start| rows.iter().find(|row| row.slot.start == start).unwrap();
        assert_eq!(row(at(11, 0)).mark, Some(SlotMark::ToBeRemoved));
        assert!(!row(at(11, 0)).selected);
        assert_eq!(row(at(11, 30)).mark, Some(SlotMark::Retained));
        assert_eq!(row(at(11, 30)).availability, SlotAvailability::Free);
        assert_eq!(row(at(12, 0)).mark, Some(SlotMark::NewlyAdded));
        assert_eq!(row(at(12, 30)).availability, SlotAvailability::Occupied);
        assert!(rows.windows(2).all(|pair| pair[0].slot.start < pair[1].slot.start));
    }

    #[test]
    fn test_open_edit_rejects_ragged_span() {
        let stored = AppointmentSpan {
            start: at(11, 0),
            end: at(11, 45),
        };
        assert!(matches!(
            SlotPicker::open_edit(staff(), AppointmentId::from("a1"), stored, Paris),
            Err(ClientError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_toggle_refused_until_availability_is_applied() {
        let mut picker = SlotPicker::open_new(staff(), day());
        let generation = picker.begin_refresh();

        assert_eq!(picker.toggle(at(14, 0)), Err(Rejection::NotLoaded));
        assert_eq!(picker.warning(), Some("availability is still loading"));
        assert!(picker.selection().is_empty());

        // A blocked slot stays out once the lists arrive.
        let block = BlockedInterval {
            start: at(14, 0),
            end: at(14, 30),
            staff: None,
            reason: None,
        };
        picker.apply(generation, Ok(availability(vec![], vec![block])));
        assert_eq!(picker.toggle(at(14, 0)), Err(Rejection::Blocked));
        assert!(picker.span().is_err());
    }

    #[test]
    fn test_toggle_refused_after_failed_load() {
        let mut picker = SlotPicker::open_new(staff(), day());
        let generation = picker.begin_refresh();
        picker.apply(
            generation,
            Err(ClientError::ApiError {
                status_code: 500,
                message: "boom".to_string(),
            }),
        );
        assert_eq!(picker.toggle(at(10, 0)), Err(Rejection::NotLoaded));
    }

    #[test]
    fn test_refresh_drops_slots_that_became_unavailable() {
        let mut picker = loaded(availability(vec![], vec![]));
        picker.toggle(at(13, 0)).unwrap();
        picker.toggle(at(13, 30)).unwrap();
        picker.toggle(at(14, 0)).unwrap();

        // Another booking took 14:00 and the salon closed 13:00 meanwhile.
        let taken = OccupiedInterval {
            start: at(14, 0),
            end: at(14, 30),
            appointment_id: Some(AppointmentId::from("a7")),
        };
        let closed = BlockedInterval {
            start: at(13, 0),
            end: at(13, 30),
            staff: Some(staff()),
            reason: None,
        };
        let generation = picker.begin_refresh();
        picker.apply(generation, Ok(availability(vec![taken], vec![closed])));

        assert_eq!(picker.selection().iter().collect::<Vec<_>>(), vec![at(13, 30)]);
        assert_eq!(picker.warning(), Some("some selected slots are no longer available"));
        assert_eq!(
            picker.span().unwrap(),
            AppointmentSpan {
                start: at(13, 30),
                end: at(14, 0)
            }
        );
        let rows = picker.rows();
        assert!(rows
            .iter()
            .filter(|row| row.selected)
            .all(|row| row.availability == SlotAvailability::Free));
    }

    #[test]
    fn test_refresh_keeps_free_selection_untouched() {
        let mut picker = loaded(availability(vec![], vec![]));
        picker.toggle(at(10, 0)).unwrap();
        let generation = picker.begin_refresh();
        picker.apply(generation, Ok(availability(vec![], vec![])));
        assert_eq!(picker.selection().len(), 1);
        assert!(picker.warning().is_none());
    }

    #[test]
    fn test_close_ends_edit_session() {
        let stored = AppointmentSpan {
            start: at(11, 0),
            end: at(12, 0),
        };
        let mut picker = SlotPicker::open_edit(staff(), AppointmentId::from("a1"), stored, Paris).unwrap();
        picker.close();

        assert!(picker.editing().is_none());
        assert!(picker.reconciliation().is_none());
        assert!(picker.rows().is_empty());
    }
}
