//! Test utilities for the series merger

use crate::app::models::{FieldValue, MergedSeries, RawRow, TimedRow};
use chrono::{NaiveDate, NaiveDateTime};


pub fn hour(h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2010, 1, 1)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

/// Build a row from `(name, value)` pairs; values that parse as numbers become numbers
pub fn row(fields: &[(&str, &str)]) -> RawRow {
    fields
        .iter()
        .filter_map(|(name, raw)| FieldValue::parse(raw).map(|v| (name.to_string(), v)))
        .collect()
}

pub fn timed(h: u32, fields: &[(&str, &str)]) -> TimedRow {
    TimedRow::new(hour(h), row(fields))
}

pub fn series(rows: Vec<(u32, RawRow)>) -> MergedSeries {
    MergedSeries::from(
        rows.into_iter()
            .map(|(h, r)| (hour(h), r))
            .collect::<std::collections::BTreeMap<_, _>>(),
    )
}
