//! Provider-specific row rules
//!
//! Timestamp derivation, column vocabulary and the documented per-variable
//! scaling rules. Everything else about a row is provider-neutral.

use crate::app::models::{FieldValue, RawRow};
use crate::config::Provider;
use crate::constants::{FILL_VALUE_F64, METADATA_DATE_FORMAT, dwd, knmi};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

impl Provider {
    /// Canonical variable name for a header column
    pub fn canonical_column(&self, column: &str) -> String {
        match self {
            Provider::Dwd => dwd::COLUMN_RENAMES
                .iter()
                .find(|(from, _)| *from == column)
                .map(|(_, to)| to.to_string())
                .unwrap_or_else(|| column.to_string()),
            Provider::Knmi => column.to_string(),
        }
    }

    /// Derive the observation instant from a row's raw (trimmed) fields
    ///
    /// `field` looks up a raw value by its canonical column name.
    pub fn row_timestamp<'a, F>(&self, field: F) -> Result<NaiveDateTime, String>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        match self {
            Provider::Knmi => {
                let date_raw = field(knmi::DATE_COLUMN)
                    .ok_or_else(|| format!("missing {}", knmi::DATE_COLUMN))?;
                let hour_raw = field(knmi::HOUR_COLUMN)
                    .ok_or_else(|| format!("missing {}", knmi::HOUR_COLUMN))?;

                let date = parse_compact_date(date_raw)
                    .ok_or_else(|| format!("bad date '{}'", date_raw))?;
                let hour: i64 = hour_raw
                    .parse()
                    .map_err(|_| format!("bad hour '{}'", hour_raw))?;

                // HH counts hours ending 1..=24; 24 is midnight of the next day
                if !(0..=24).contains(&hour) {
                    return Err(format!("hour {} out of range", hour));
                }
                Ok(date.and_time(chrono::NaiveTime::MIN) + TimeDelta::hours(hour))
            }
            Provider::Dwd => {
                let raw = field(dwd::TIMESTAMP_COLUMN)
                    .ok_or_else(|| format!("missing {}", dwd::TIMESTAMP_COLUMN))?;
                parse_compact_datetime(raw).ok_or_else(|| format!("bad timestamp '{}'", raw))
            }
        }
    }

    /// Apply the provider's unit scaling to a parsed row
    ///
    /// The `-999` sentinel is never scaled.
    pub fn apply_scaling(&self, row: &mut RawRow) {
        match self {
            Provider::Knmi => {
                if let Some(FieldValue::Number(value)) = row.get_mut(knmi::PRECIPITATION_COLUMN) {
                    if *value == -1.0 {
                        *value = 0.0;
                    }
                }

                for column in knmi::TENTHS_COLUMNS {
                    scale_number(row, column, |v| round_to(0.1 * v, 1));
                }

                // J/cm2 per hour to W/m2
                scale_number(row, knmi::RADIATION_COLUMN, |v| {
                    round_to(10_000.0 * v / 3_600.0, 5)
                });
            }
            Provider::Dwd => {
                // hPa to Pa
                scale_number(row, "pressure_station", |v| 100.0 * v);
            }
        }
    }
}

fn scale_number(row: &mut RawRow, column: &str, scale: impl Fn(f64) -> f64) {
    if let Some(FieldValue::Number(value)) = row.get_mut(column) {
        if *value != FILL_VALUE_F64 {
            *value = scale(*value);
        }
    }
}

/// Round to a number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Parse `YYYYMMDD`
pub fn parse_compact_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::parse_from_str(raw, METADATA_DATE_FORMAT).ok()
}

/// Parse `YYYYMMDD`, `YYYYMMDDHH` or `YYYYMMDDHHMM`
pub fn parse_compact_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let date = parse_compact_date(raw.get(0..8)?)?;
    let (hour, minute) = match raw.len() {
        8 => (0, 0),
        10 => (raw[8..10].parse().ok()?, 0),
        12 => (raw[8..10].parse().ok()?, raw[10..12].parse().ok()?),
        _ => return None,
    };
    date.and_hms_opt(hour, minute, 0)
}
