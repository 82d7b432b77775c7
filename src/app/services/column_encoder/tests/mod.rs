//! Test utilities for the column encoder

use crate::app::models::{DateBound, EpochSeries, FieldValue, Location, RawRow, StationEpoch};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

mod encoder_tests;

pub fn hour(h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2012, 3, 1)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

/// Parse raw strings the way the archive reader does
pub fn column(raw: &[&str]) -> Vec<Option<FieldValue>> {
    raw.iter().map(|value| FieldValue::parse(value)).collect()
}

pub fn epoch_series(rows: Vec<(u32, Vec<(&str, &str)>)>) -> EpochSeries {
    let rows: BTreeMap<NaiveDateTime, RawRow> = rows
        .into_iter()
        .map(|(h, fields)| {
            let row: RawRow = fields
                .into_iter()
                .filter_map(|(name, raw)| FieldValue::parse(raw).map(|v| (name.to_string(), v)))
                .collect();
            (hour(h), row)
        })
        .collect();

    EpochSeries {
        epoch: StationEpoch {
            station_id: "260".to_string(),
            valid_from: DateBound::Resolved(NaiveDateTime::MIN),
            valid_to: DateBound::Resolved(hour(23)),
            location: Location::new(5.18, 52.1, 1.9),
        },
        rows,
    }
}
