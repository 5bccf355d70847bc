//! Appointment input records and the date-picker output structure.
//!
//! The typed structure ([`DatePicker`] → [`DayBucket`] → [`TimeSlot`]) is what the
//! merge engine builds. [`DatePicker::render`] turns it into the string wire form
//! consumed by date-picker front ends.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::{self, TimeRange};

/// One calendar booking as supplied by an appointment source.
///
/// Timestamps stay raw until the merge pass parses them, so a malformed record
/// fails the pass with a parse error naming its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    /// `YYYY-MM-DDTHH:mm:ss`
    pub start: String,
    /// `YYYY-MM-DDTHH:mm:ss`
    pub end: String,
}

impl Appointment {
    pub fn new(id: i64, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id,
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A merged time-of-day interval within one day.
///
/// `id` is the id of the appointment that created the slot; later merges never
/// change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TimeSlot {
    pub fn new(id: i64, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id,
            start_time,
            end_time,
        }
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Widen this slot to cover `other` (pointwise min/max). The id is kept.
    pub fn absorb(&mut self, other: &TimeRange) {
        self.start_time = self.start_time.min(other.start);
        self.end_time = self.end_time.max(other.end);
    }
}

/// All slots for one calendar date, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

impl DayBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slots: Vec::new(),
        }
    }
}

/// Day buckets in order of first appearance of each date in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatePicker {
    pub items: Vec<DayBucket>,
}

impl DatePicker {
    /// Look up the bucket for `date`.
    pub fn bucket(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.items.iter().find(|bucket| bucket.date == date)
    }

    /// Total number of slots across all buckets.
    pub fn slot_count(&self) -> usize {
        self.items.iter().map(|bucket| bucket.slots.len()).sum()
    }

    /// Render into the string wire form using `format`.
    ///
    /// # Errors
    /// Returns `SlotError::Format` if either format string cannot render its value.
    pub fn render(&self, format: &DisplayFormat) -> Result<DatePickerView> {
        let items = self
            .items
            .iter()
            .map(|bucket| -> Result<DayBucketView> {
                let slots = bucket
                    .slots
                    .iter()
                    .map(|slot| -> Result<TimeSlotView> {
                        Ok(TimeSlotView {
                            id: slot.id,
                            start_time: time::format_time(slot.start_time, &format.time)?,
                            end_time: time::format_time(slot.end_time, &format.time)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(DayBucketView {
                    date: time::format_time(bucket.date, &format.date)?,
                    slots,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DatePickerView { items })
    }
}

/// Output format strings (strftime syntax).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    pub date: String,
    pub time: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            date: time::DATE_FORMAT.to_string(),
            time: time::TIME_FORMAT.to_string(),
        }
    }
}

/// Wire form of [`TimeSlot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotView {
    pub id: i64,
    pub start_time: String,
    pub end_time: String,
}

/// Wire form of [`DayBucket`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucketView {
    pub date: String,
    pub slots: Vec<TimeSlotView>,
}

/// Wire form of [`DatePicker`]: `{ "items": [{ "date", "slots": [...] }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePickerView {
    pub items: Vec<DayBucketView>,
}
