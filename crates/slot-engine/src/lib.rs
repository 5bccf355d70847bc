//! # slot-engine
//!
//! Turns a flat list of appointments into a day-bucketed, overlap-merged slot
//! structure for driving a date-picker UI.
//!
//! Appointments are grouped by the calendar date of their start and, within a
//! day, any time ranges that overlap are collapsed into a single slot. Day and
//! slot ordering follow first appearance in the input.
//!
//! ```rust
//! use slot_engine::{convert_to_datepicker, Appointment, DisplayFormat};
//!
//! let appointments = vec![
//!     Appointment::new(1, "2020-02-02T07:30:00", "2020-02-02T11:30:00"),
//!     Appointment::new(2, "2020-02-02T10:00:00", "2020-02-02T12:00:00"),
//! ];
//! let picker = convert_to_datepicker(&appointments).unwrap();
//! let view = picker.render(&DisplayFormat::default()).unwrap();
//!
//! assert_eq!(view.items[0].date, "02-02-2020");
//! assert_eq!(view.items[0].slots[0].start_time, "07:30");
//! assert_eq!(view.items[0].slots[0].end_time, "12:00");
//! ```
//!
//! ## Modules
//!
//! - [`time`] — time-of-day/timestamp parsing and formatting, overlap test
//! - [`model`] — appointments, slots, day buckets and their wire form
//! - [`merge`] — the one-pass merge engine
//! - [`source`] — appointment sources and load-time logging
//! - [`error`] — Error types

pub mod error;
pub mod merge;
pub mod model;
pub mod source;
pub mod time;

pub use error::SlotError;
pub use merge::{convert_to_datepicker, convert_with_mode, DatePickerBuilder, MergeMode};
pub use model::{Appointment, DatePicker, DatePickerView, DayBucket, DisplayFormat, TimeSlot};
pub use source::{load_appointments, AppointmentSource, JsonAppointments, MockAppointments};
pub use time::{intervals_overlap, TimeRange};
