use thiserror::Error;

/// Failures raised by the date conversion helpers.
///
/// All of them are local to a single conversion; none leave calendar state
/// behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("'{input}' is not a valid ISO-8601 date-time: {reason}")]
    Parse {
        input: String,
        reason: String
    },

    #[error("expected a UTC-tagged timestamp, found {found}")]
    TypeMismatch {
        found: &'static str
    },

    #[error("invalid date components {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micros:06}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        micros: u32
    },

    #[error("{what} {value} is outside the representable date range")]
    OutOfRange {
        what: &'static str,
        value: i64
    }
}

impl DateTimeError {
    pub fn parse(input: &str, reason: impl ToString) -> DateTimeError {
        DateTimeError::Parse {
            input: input.to_owned(),
            reason: reason.to_string()
        }
    }
}
