#[cfg(test)]
mod tests {
    use crate::models::{slot_width, AppointmentId, BlockedInterval, OccupiedInterval, StaffId};
    use crate::selection::{
        retain_available, toggle_slot, Rejection, SelectionSet, SlotAvailability, SlotContext,
    };
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn day_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    // Slot index within the day, 30 minutes apart.
    fn slot(index: i64) -> DateTime<Utc> {
        day_start() + Duration::minutes(30 * index)
    }

    fn assert_contiguous(selection: &SelectionSet) -> Result<(), TestCaseError> {
        let slots: Vec<_> = selection.iter().collect();
        for pair in slots.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], slot_width());
        }
        Ok(())
    }

    // Intervals given as (start minute, length in minutes) from the day start,
    // so they can straddle slot boundaries.
    fn intervals() -> impl Strategy<Value = Vec<(i64, i64)>> {
        proptest::collection::vec((0..720i64, 1..120i64), 0..6)
    }

    fn blocks(raw: &[(i64, i64)], staff: &[bool]) -> Vec<BlockedInterval> {
        raw.iter()
            .zip(staff.iter().cycle())
            .map(|((start, len), own)| BlockedInterval {
                start: day_start() + Duration::minutes(*start),
                end: day_start() + Duration::minutes(start + len),
                staff: if *own { Some(StaffId::from("x")) } else { Some(StaffId::from("y")) },
                reason: None,
            })
            .collect()
    }

    fn appointments(raw: &[(i64, i64)]) -> Vec<OccupiedInterval> {
        raw.iter()
            .enumerate()
            .map(|(i, (start, len))| OccupiedInterval {
                start: day_start() + Duration::minutes(*start),
                end: day_start() + Duration::minutes(start + len),
                appointment_id: Some(AppointmentId::new(format!("a{}", i))),
            })
            .collect()
    }

    proptest! {
        // Blocked and occupied slots never end up selected, whatever is clicked.
        #[test]
        fn test_guarded_slots_never_enter(
            blocked_raw in intervals(),
            own_block in proptest::collection::vec(any::<bool>(), 1..4),
            occupied_raw in intervals(),
            clicks in proptest::collection::vec(0..24i64, 0..60),
        ) {
            let staff = StaffId::from("x");
            let blocked = blocks(&blocked_raw, &own_block);
            let occupied = appointments(&occupied_raw);
            let context = SlotContext { staff: &staff, blocked: &blocked, occupied: &occupied, editing: None };
            let mut selection = SelectionSet::empty();

            for index in clicks {
                if let Ok(outcome) = toggle_slot(slot(index), &selection, &context) {
                    selection = outcome.selection;
                }
                for selected in selection.iter() {
                    prop_assert_eq!(context.classify(selected), SlotAvailability::Free);
                }
                assert_contiguous(&selection)?;
            }
        }

        // Re-checking against new lists leaves only free slots, still contiguous.
        #[test]
        fn test_recheck_leaves_only_free_slots(
            start in 0..10i64,
            len in 1..12i64,
            blocked_raw in intervals(),
            occupied_raw in intervals(),
        ) {
            let staff = StaffId::from("x");
            let blocked = blocks(&blocked_raw, &[true]);
            let occupied = appointments(&occupied_raw);
            let context = SlotContext { staff: &staff, blocked: &blocked, occupied: &occupied, editing: None };
            let current = SelectionSet::from_slots((start..start + len).map(slot)).unwrap();

            let (kept, discarded) = retain_available(&current, &context);

            prop_assert_eq!(kept.len() + discarded.len(), current.len());
            for selected in kept.iter() {
                prop_assert_eq!(context.classify(selected), SlotAvailability::Free);
            }
            assert_contiguous(&kept)?;
        }

        // Whatever the user clicks, the selection stays one contiguous run.
        #[test]
        fn test_selection_stays_contiguous(clicks in proptest::collection::vec(0..24i64, 0..60)) {
            let staff = StaffId::from("x");
            let context = SlotContext { staff: &staff, blocked: &[], occupied: &[], editing: None };
            let mut selection = SelectionSet::empty();

            for index in clicks {
                if let Ok(outcome) = toggle_slot(slot(index), &selection, &context) {
                    selection = outcome.selection;
                }
                assert_contiguous(&selection)?;
            }
        }

        // Removing an interior slot leaves the longer side, the left one on ties.
        #[test]
        fn test_interior_removal_keeps_longer_side(
            start in 0..10i64,
            len in 3..12i64,
            offset in 1..11i64,
        ) {
            prop_assume!(offset < len - 1);
            let staff = StaffId::from("x");
            let context = SlotContext { staff: &staff, blocked: &[], occupied: &[], editing: None };
            let current = SelectionSet::from_slots((start..start + len).map(slot)).unwrap();
            let removed = slot(start + offset);

            let outcome = toggle_slot(removed, &current, &context).unwrap();

            let left = offset;
            let right = len - offset - 1;
            let expected: Vec<_> = if right > left {
                (start + offset + 1..start + len).map(slot).collect()
            } else {
                (start..start + offset).map(slot).collect()
            };
            prop_assert_eq!(outcome.selection.iter().collect::<Vec<_>>(), expected);
        }

        // A slot that does not touch the run never changes it.
        #[test]
        fn test_far_slot_is_rejected(start in 0..10i64, len in 1..6i64, distance in 2..8i64) {
            let staff = StaffId::from("x");
            let context = SlotContext { staff: &staff, blocked: &[], occupied: &[], editing: None };
            let current = SelectionSet::from_slots((start..start + len).map(slot)).unwrap();

            let after = slot(start + len - 1 + distance);
            prop_assert_eq!(toggle_slot(after, &current, &context), Err(Rejection::NotConsecutive));
        }
    }
}
