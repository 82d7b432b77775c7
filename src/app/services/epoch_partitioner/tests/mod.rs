//! Test utilities for epoch deduplication and partitioning

use crate::app::models::{DateBound, FieldValue, Location, MergedSeries, RawMetadataRecord, RawRow};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

mod deduplication_tests;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn record(from: NaiveDateTime, to: DateBound, elevation: f64) -> RawMetadataRecord {
    RawMetadataRecord {
        station_id: "00044".to_string(),
        valid_from: DateBound::Resolved(from),
        valid_to: to,
        location: Location::new(8.237, 52.9336, elevation),
    }
}

/// One row per timestamp carrying its index as `T`
pub fn series_at(timestamps: &[NaiveDateTime]) -> MergedSeries {
    let rows: BTreeMap<NaiveDateTime, RawRow> = timestamps
        .iter()
        .enumerate()
        .map(|(index, timestamp)| {
            let mut row = RawRow::new();
            row.insert("T".to_string(), FieldValue::Number(index as f64));
            (*timestamp, row)
        })
        .collect();
    MergedSeries::from(rows)
}
