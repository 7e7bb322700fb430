use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

const UTC_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const UTC_STAMP_LEN: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Timestamp '{0}' is not a fourteen digit YYYYMMDDHHMMSS value")]
    InvalidFormat(String),

    #[error("Timestamp '{0}' does not describe a valid date and time")]
    OutOfRange(String, #[source] chrono::ParseError),
}

pub trait IntoUtcDateTime {
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

/// Parses the `YYYYMMDDHHMMSS` stamps used throughout the AQHI documents.
///
/// The stamps carry no offset and are always UTC. Only exactly fourteen ASCII digits
/// are accepted; chrono alone would let through signs and wider years.
pub fn parse_utc_stamp(stamp: &str) -> Result<DateTime<Utc>, TimestampError> {
    if stamp.len() != UTC_STAMP_LEN || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::InvalidFormat(stamp.to_string()));
    }
    NaiveDateTime::parse_from_str(stamp, UTC_STAMP_FORMAT)
        .map(IntoUtcDateTime::into_utc)
        .map_err(|e| TimestampError::OutOfRange(stamp.to_string(), e))
}
