//! One-pass interval merge: appointments → day buckets of overlap-merged slots.
//!
//! Appointments are folded left to right, each immediately. An appointment is
//! bucketed by the calendar date of its start, then merged into the *first* slot
//! of that bucket it overlaps (strict overlap, see [`intervals_overlap`]) or
//! appended as a new slot. Slots that already exist are never re-checked against
//! each other, so a bucket can end up holding two slots that overlap if the
//! appointments that created them were never compared. [`MergeMode::Coalesce`]
//! adds a reconciliation pass for callers that need disjoint output.
//!
//! Inputs with `start >= end` are accepted as-is; they contribute a zero-length
//! or inverted range through the same min/max rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::model::{Appointment, DatePicker, DayBucket, TimeSlot};
use crate::time::{intervals_overlap, parse_timestamp, truncate_to_minute, TimeRange};

/// How slots are reconciled within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeMode {
    /// Merge each appointment against existing slots only.
    #[default]
    OnePass,
    /// One-pass merge, then merge slots pairwise until none overlap.
    Coalesce,
}

/// Where a single [`DatePickerBuilder::fold`] put its appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldOutcome {
    /// Index of the day bucket in the result.
    pub bucket: usize,
    /// Index of the slot within that bucket.
    pub slot: usize,
    /// The bucket did not exist before this fold.
    pub bucket_created: bool,
    /// The appointment widened an existing slot instead of adding one.
    pub merged: bool,
}

/// Accumulates the date-picker structure one appointment at a time.
#[derive(Debug, Clone, Default)]
pub struct DatePickerBuilder {
    items: Vec<DayBucket>,
}

impl DatePickerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one appointment into the result.
    ///
    /// # Errors
    /// Returns `SlotError::Appointment` wrapping a parse error if either timestamp
    /// is malformed. The builder is left unchanged in that case.
    pub fn fold(&mut self, appointment: &Appointment) -> Result<FoldOutcome> {
        let (date, range) = project(appointment)?;
        let (bucket_index, bucket_created) = find_or_create_bucket(&mut self.items, date);
        let bucket = &mut self.items[bucket_index];

        let overlapping = bucket
            .slots
            .iter()
            .position(|slot| intervals_overlap(&slot.range(), &range));

        let (slot_index, merged) = match overlapping {
            Some(index) => {
                bucket.slots[index].absorb(&range);
                (index, true)
            }
            None => {
                bucket
                    .slots
                    .push(TimeSlot::new(appointment.id, range.start, range.end));
                (bucket.slots.len() - 1, false)
            }
        };

        tracing::trace!(
            id = appointment.id,
            %date,
            bucket = bucket_index,
            slot = slot_index,
            bucket_created,
            merged,
            "folded appointment"
        );

        Ok(FoldOutcome {
            bucket: bucket_index,
            slot: slot_index,
            bucket_created,
            merged,
        })
    }

    /// Buckets built so far.
    pub fn items(&self) -> &[DayBucket] {
        &self.items
    }

    pub fn finish(self) -> DatePicker {
        DatePicker { items: self.items }
    }
}

/// Find the bucket for `date` by linear scan, appending an empty one if missing.
///
/// Returns the bucket index and whether it was created.
pub fn find_or_create_bucket(buckets: &mut Vec<DayBucket>, date: NaiveDate) -> (usize, bool) {
    match buckets.iter().position(|bucket| bucket.date == date) {
        Some(index) => (index, false),
        None => {
            buckets.push(DayBucket::new(date));
            (buckets.len() - 1, true)
        }
    }
}

/// Build the date-picker structure from appointments in input order.
///
/// Empty input yields an empty result. Calls share no state.
///
/// # Errors
/// Fails on the first appointment with a malformed timestamp; the pass is aborted.
pub fn convert_to_datepicker(appointments: &[Appointment]) -> Result<DatePicker> {
    let mut builder = DatePickerBuilder::new();
    for appointment in appointments {
        builder.fold(appointment)?;
    }
    Ok(builder.finish())
}

/// [`convert_to_datepicker`] with an explicit [`MergeMode`].
pub fn convert_with_mode(appointments: &[Appointment], mode: MergeMode) -> Result<DatePicker> {
    let mut picker = convert_to_datepicker(appointments)?;
    if mode == MergeMode::Coalesce {
        for bucket in &mut picker.items {
            coalesce_bucket(bucket);
        }
    }
    Ok(picker)
}

/// Merge overlapping slots within a bucket until no two overlap.
///
/// The earlier slot in list order survives, keeping its position and id.
pub fn coalesce_bucket(bucket: &mut DayBucket) {
    while let Some((keep, absorbed)) = first_overlapping_pair(&bucket.slots) {
        let removed = bucket.slots.remove(absorbed);
        bucket.slots[keep].absorb(&removed.range());
    }
}

fn first_overlapping_pair(slots: &[TimeSlot]) -> Option<(usize, usize)> {
    (0..slots.len()).find_map(|i| {
        (i + 1..slots.len())
            .find(|&j| intervals_overlap(&slots[i].range(), &slots[j].range()))
            .map(|j| (i, j))
    })
}

/// Date key and minute-precision time-of-day range of an appointment.
fn project(appointment: &Appointment) -> Result<(NaiveDate, TimeRange)> {
    let start = parse_timestamp(&appointment.start)
        .map_err(|e| SlotError::for_appointment(appointment.id, e))?;
    let end = parse_timestamp(&appointment.end)
        .map_err(|e| SlotError::for_appointment(appointment.id, e))?;

    Ok((
        start.date(),
        TimeRange::new(truncate_to_minute(start.time()), truncate_to_minute(end.time())),
    ))
}
