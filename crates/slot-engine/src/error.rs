//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A timestamp or time-of-day string did not match its expected format.
    #[error("Invalid time '{input}' for format '{format}'")]
    Parse { input: String, format: String },

    /// A value could not be rendered with the requested format string.
    #[error("Format error: {0}")]
    Format(String),

    /// A parse failure attributed to the appointment that carried the bad value.
    #[error("Appointment {id}: {source}")]
    Appointment {
        id: i64,
        #[source]
        source: Box<SlotError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SlotError {
    pub(crate) fn parse(input: &str, format: &str) -> Self {
        SlotError::Parse {
            input: input.to_string(),
            format: format.to_string(),
        }
    }

    pub(crate) fn for_appointment(id: i64, source: SlotError) -> Self {
        SlotError::Appointment {
            id,
            source: Box::new(source),
        }
    }

    /// True for [`SlotError::Parse`], including one wrapped in [`SlotError::Appointment`].
    pub fn is_parse_error(&self) -> bool {
        match self {
            SlotError::Parse { .. } => true,
            SlotError::Appointment { source, .. } => source.is_parse_error(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
