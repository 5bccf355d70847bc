//! Appointment sources feeding the merge engine.
//!
//! A source is an opaque provider of appointment records. The engine performs no
//! validation of ordering or completeness beyond per-record timestamp parsing.

use crate::error::Result;
use crate::model::Appointment;

/// Supplies the raw appointment sequence.
pub trait AppointmentSource {
    fn appointments(&self) -> Result<Vec<Appointment>>;
}

/// Fixed demo bookings across 2020-02-02, 2020-02-03 and 2020-02-04.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAppointments;

impl AppointmentSource for MockAppointments {
    fn appointments(&self) -> Result<Vec<Appointment>> {
        Ok(vec![
            Appointment::new(1, "2020-02-02T07:30:00", "2020-02-02T11:30:00"),
            Appointment::new(2, "2020-02-02T14:30:00", "2020-02-02T18:30:00"),
            Appointment::new(3, "2020-02-03T08:00:00", "2020-02-03T16:00:00"),
            Appointment::new(4, "2020-02-04T08:00:00", "2020-02-04T16:00:00"),
            Appointment::new(5, "2020-02-04T08:00:00", "2020-02-04T12:00:00"),
        ])
    }
}

/// Appointments decoded from a JSON array of `{id, start, end}` objects.
#[derive(Debug, Clone)]
pub struct JsonAppointments {
    json: String,
}

impl JsonAppointments {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl AppointmentSource for JsonAppointments {
    fn appointments(&self) -> Result<Vec<Appointment>> {
        Ok(serde_json::from_str(&self.json)?)
    }
}

impl AppointmentSource for Vec<Appointment> {
    fn appointments(&self) -> Result<Vec<Appointment>> {
        Ok(self.clone())
    }
}

/// Pull appointments from `source`, emitting a `debug` event for each one.
pub fn load_appointments(source: &dyn AppointmentSource) -> Result<Vec<Appointment>> {
    let appointments = source.appointments()?;
    tracing::debug!(count = appointments.len(), "appointments loaded");
    for appointment in &appointments {
        tracing::debug!(
            id = appointment.id,
            start = %appointment.start,
            end = %appointment.end,
            "appointment"
        );
    }
    Ok(appointments)
}
