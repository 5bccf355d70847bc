//! Property-based tests for the overlap rule and the merge engine using proptest.
//!
//! These check invariants that hold for any well-formed appointment sequence,
//! not just the fixtures in `merge_tests.rs`.

use chrono::{NaiveTime, Timelike};
use proptest::prelude::*;
use slot_engine::time::{format_time, intervals_overlap, parse_timestamp, TimeRange, DATE_FORMAT};
use slot_engine::{convert_to_datepicker, convert_with_mode, Appointment, MergeMode};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_time() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn arb_range() -> impl Strategy<Value = TimeRange> {
    (arb_time(), arb_time()).prop_map(|(a, b)| TimeRange::new(a.min(b), a.max(b)))
}

/// Appointment in February 2020 with `start <= end` on the same day.
fn arb_appointment() -> impl Strategy<Value = Appointment> {
    (1i64..10_000, 1u32..=5, arb_range(), 0u32..60).prop_map(|(id, day, range, sec)| {
        Appointment::new(
            id,
            format!(
                "2020-02-{:02}T{:02}:{:02}:{:02}",
                day,
                range.start.hour(),
                range.start.minute(),
                sec
            ),
            format!(
                "2020-02-{:02}T{:02}:{:02}:00",
                day,
                range.end.hour(),
                range.end.minute()
            ),
        )
    })
}

fn arb_appointments() -> impl Strategy<Value = Vec<Appointment>> {
    prop::collection::vec(arb_appointment(), 0..40)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_range(), b in arb_range()) {
        prop_assert_eq!(intervals_overlap(&a, &b), intervals_overlap(&b, &a));
    }

    #[test]
    fn touching_ranges_never_overlap(a in arb_time(), b in arb_time(), c in arb_time()) {
        let mut points = [a, b, c];
        points.sort();
        let left = TimeRange::new(points[0], points[1]);
        let right = TimeRange::new(points[1], points[2]);
        prop_assert!(!intervals_overlap(&left, &right));
    }

    #[test]
    fn bucket_dates_match_appointment_starts(appointments in arb_appointments()) {
        let picker = convert_to_datepicker(&appointments).unwrap();
        let view_dates: Vec<String> = picker
            .items
            .iter()
            .map(|b| format_time(b.date, DATE_FORMAT).unwrap())
            .collect();

        for appointment in &appointments {
            let key = format_time(appointment.start.as_str(), DATE_FORMAT).unwrap();
            prop_assert!(view_dates.contains(&key), "missing bucket {}", key);
        }

        // One bucket per distinct date, in first-seen order.
        let mut first_seen: Vec<String> = Vec::new();
        for appointment in &appointments {
            let key = format_time(appointment.start.as_str(), DATE_FORMAT).unwrap();
            if !first_seen.contains(&key) {
                first_seen.push(key);
            }
        }
        prop_assert_eq!(view_dates, first_seen);
    }

    #[test]
    fn every_appointment_is_covered_by_a_slot(appointments in arb_appointments()) {
        let picker = convert_to_datepicker(&appointments).unwrap();
        for appointment in &appointments {
            let start = parse_timestamp(&appointment.start).unwrap();
            let end = parse_timestamp(&appointment.end).unwrap();
            let bucket = picker.bucket(start.date()).unwrap();
            let start_minute = NaiveTime::from_hms_opt(start.hour(), start.minute(), 0).unwrap();
            let covered = bucket
                .slots
                .iter()
                .any(|s| s.start_time <= start_minute && s.end_time >= end.time());
            prop_assert!(covered, "appointment {} not covered", appointment.id);
        }
    }

    #[test]
    fn slot_ids_come_from_appointments(appointments in arb_appointments()) {
        let picker = convert_to_datepicker(&appointments).unwrap();
        for bucket in &picker.items {
            for slot in &bucket.slots {
                prop_assert!(appointments.iter().any(|a| a.id == slot.id));
                prop_assert!(slot.start_time <= slot.end_time);
            }
        }
        prop_assert!(picker.slot_count() <= appointments.len());
    }

    #[test]
    fn conversion_is_deterministic(appointments in arb_appointments()) {
        prop_assert_eq!(
            convert_to_datepicker(&appointments).unwrap(),
            convert_to_datepicker(&appointments).unwrap()
        );
    }

    #[test]
    fn coalesce_leaves_no_overlaps(appointments in arb_appointments()) {
        let picker = convert_with_mode(&appointments, MergeMode::Coalesce).unwrap();
        for bucket in &picker.items {
            for (i, a) in bucket.slots.iter().enumerate() {
                for b in &bucket.slots[i + 1..] {
                    prop_assert!(!intervals_overlap(&a.range(), &b.range()));
                }
            }
        }
    }
}
