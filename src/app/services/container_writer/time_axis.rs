//! Integer minutes since the container reference instant

use crate::constants::TIME_REFERENCE_YMD;
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// `2010-01-01 00:00:00`
pub fn reference_instant() -> NaiveDateTime {
    let (year, month, day) = TIME_REFERENCE_YMD;
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_default()
        .and_time(chrono::NaiveTime::MIN)
}

/// Minutes since the reference instant, rounded to the nearest minute
///
/// Instants before the reference encode as negative minutes. Instants too
/// far away to fit an `i32` are an error.
pub fn encode_time(timestamp: NaiveDateTime) -> Result<i32> {
    let delta = timestamp - reference_instant();
    let millis = delta.num_milliseconds();
    let minutes = (millis as f64 / 60_000.0).round();

    if minutes < i32::MIN as f64 || minutes > i32::MAX as f64 {
        return Err(Error::data_validation(format!(
            "Timestamp {} is outside the representable time axis",
            timestamp
        )));
    }
    Ok(minutes as i32)
}

/// Encode a whole time axis
pub fn encode_time_axis(timestamps: &[NaiveDateTime]) -> Result<Vec<i32>> {
    timestamps.iter().map(|t| encode_time(*t)).collect()
}

/// Instant for a number of minutes since the reference
pub fn decode_time(minutes: i32) -> NaiveDateTime {
    reference_instant() + TimeDelta::minutes(minutes as i64)
}
