//! Data models for station archive normalization
//!
//! This module contains the structures passed between pipeline stages: raw
//! observation rows, the merged per-station series, station validity epochs
//! and the per-epoch subsets handed to the encoder.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

// =============================================================================
// Observation Values
// =============================================================================

/// One field of an observation row
///
/// Archive fields are parsed best-effort: anything that reads as a finite
/// number becomes [`FieldValue::Number`] (including the provider sentinel
/// `-999`), everything else keeps its trimmed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Best-effort parse of a raw field
    ///
    /// Returns `None` when the field has no textual content, so callers can
    /// omit it instead of storing an empty string.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(match parse_number(trimmed) {
            Some(value) => FieldValue::Number(value),
            None => FieldValue::Text(trimmed.to_string()),
        })
    }

    /// Numeric reading of the value, re-parsing text the same way as archives
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) if value.is_finite() => Some(*value),
            FieldValue::Number(_) => None,
            FieldValue::Text(text) => parse_number(text),
        }
    }

    /// Text reading of the value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Number(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(value) => write!(f, "{}", value),
            FieldValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Parse a trimmed string as a finite number
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// One observation instant: variable name to value
pub type RawRow = BTreeMap<String, FieldValue>;

/// A row together with the timestamp that identifies it
#[derive(Debug, Clone, PartialEq)]
pub struct TimedRow {
    pub timestamp: NaiveDateTime,
    pub row: RawRow,
}

impl TimedRow {
    pub fn new(timestamp: NaiveDateTime, row: RawRow) -> Self {
        Self { timestamp, row }
    }
}

// =============================================================================
// Merged Series
// =============================================================================

/// Timestamp-keyed rows of one station across all of its archives
///
/// Holds at most one row per timestamp; rows are kept in time order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSeries {
    rows: BTreeMap<NaiveDateTime, RawRow>,
}

impl MergedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, timestamp: &NaiveDateTime) -> Option<&RawRow> {
        self.rows.get(timestamp)
    }

    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        self.rows.contains_key(timestamp)
    }

    /// Rows in ascending time order
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDateTime, &RawRow)> {
        self.rows.iter()
    }

    /// Timestamps in ascending order
    pub fn timestamps(&self) -> impl Iterator<Item = &NaiveDateTime> {
        self.rows.keys()
    }

    /// Rows whose timestamp lies in a closed interval
    pub fn range(
        &self,
        interval: RangeInclusive<NaiveDateTime>,
    ) -> impl Iterator<Item = (&NaiveDateTime, &RawRow)> {
        self.rows.range(interval)
    }

    /// First and last timestamp, if any
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.rows.keys().next()?;
        let last = self.rows.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn into_inner(self) -> BTreeMap<NaiveDateTime, RawRow> {
        self.rows
    }
}

impl From<BTreeMap<NaiveDateTime, RawRow>> for MergedSeries {
    fn from(rows: BTreeMap<NaiveDateTime, RawRow>) -> Self {
        Self { rows }
    }
}

// =============================================================================
// Station Metadata
// =============================================================================

/// A validity bound read from station metadata
///
/// Unparsable or absent dates are not guessed at: they fall back to the
/// processing time and stay tagged so callers can decide whether to accept
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateBound {
    Resolved(NaiveDateTime),
    DefaultedToNow(NaiveDateTime),
}

impl DateBound {
    /// Instant used for comparisons
    pub fn value(&self) -> NaiveDateTime {
        match self {
            DateBound::Resolved(t) | DateBound::DefaultedToNow(t) => *t,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, DateBound::DefaultedToNow(_))
    }
}

/// Station position during one epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Degrees east
    pub longitude: f64,
    /// Degrees north
    pub latitude: f64,
    /// Meters above sea level
    pub elevation: f64,
}

impl Location {
    pub fn new(longitude: f64, latitude: f64, elevation: f64) -> Self {
        Self {
            longitude,
            latitude,
            elevation,
        }
    }

    /// Validate coordinate ranges
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::data_validation(format!(
                "Invalid latitude {}: must be between -90 and 90 degrees",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::data_validation(format!(
                "Invalid longitude {}: must be between -180 and 180 degrees",
                self.longitude
            )));
        }

        if !self.elevation.is_finite() {
            return Err(Error::data_validation(format!(
                "Invalid elevation {}",
                self.elevation
            )));
        }

        Ok(())
    }
}

/// One metadata row as read from a catalog, before deduplication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMetadataRecord {
    pub station_id: String,
    pub valid_from: DateBound,
    pub valid_to: DateBound,
    pub location: Location,
}

/// A period of positional stability for one station
///
/// Both bounds are inclusive. The `valid_from` instant identifies the epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationEpoch {
    pub station_id: String,
    pub valid_from: DateBound,
    pub valid_to: DateBound,
    pub location: Location,
}

impl StationEpoch {
    /// Deduplication key
    pub fn key(&self) -> NaiveDateTime {
        self.valid_from.value()
    }

    /// Closed interval covered by the epoch
    pub fn interval(&self) -> RangeInclusive<NaiveDateTime> {
        self.valid_from.value()..=self.valid_to.value()
    }

    /// Whether a timestamp falls inside the closed interval
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        self.interval().contains(timestamp)
    }

    /// Whether either bound fell back to processing time
    pub fn has_defaulted_bound(&self) -> bool {
        self.valid_from.is_defaulted() || self.valid_to.is_defaulted()
    }

    /// Whether the interval is empty (`valid_from` after `valid_to`)
    pub fn is_inverted(&self) -> bool {
        self.valid_from.value() > self.valid_to.value()
    }
}

impl From<RawMetadataRecord> for StationEpoch {
    fn from(record: RawMetadataRecord) -> Self {
        Self {
            station_id: record.station_id,
            valid_from: record.valid_from,
            valid_to: record.valid_to,
            location: record.location,
        }
    }
}

// =============================================================================
// Epoch Series
// =============================================================================

/// The rows of one station that fall inside one epoch
#[derive(Debug, Clone, PartialEq)]
pub struct EpochSeries {
    pub epoch: StationEpoch,
    pub rows: BTreeMap<NaiveDateTime, RawRow>,
}

impl EpochSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn location(&self) -> Location {
        self.epoch.location
    }

    /// Time axis in ascending order
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.rows.keys().copied().collect()
    }
}
