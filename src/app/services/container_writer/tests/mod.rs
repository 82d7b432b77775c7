//! Test utilities for the container writer

use crate::app::models::{DateBound, EpochSeries, FieldValue, Location, RawRow, StationEpoch};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

mod inspector_tests;
mod time_axis_tests;
mod writer_tests;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Three hourly rows with a numeric, an integer and a text variable
pub fn sample_series() -> EpochSeries {
    let mut rows: BTreeMap<NaiveDateTime, RawRow> = BTreeMap::new();
    for (hour, t, dd, ww) in [(1, "1.5", "250", "fog"), (2, "", "260", ""), (3, "-0.5", "x", "rain")] {
        let row: RawRow = [("T", t), ("DD", dd), ("WW", ww)]
            .into_iter()
            .filter_map(|(name, raw)| FieldValue::parse(raw).map(|v| (name.to_string(), v)))
            .collect();
        rows.insert(at(2012, 3, 1, hour, 0), row);
    }

    EpochSeries {
        epoch: StationEpoch {
            station_id: "260".to_string(),
            valid_from: DateBound::Resolved(at(2000, 1, 1, 0, 0)),
            valid_to: DateBound::DefaultedToNow(at(2024, 6, 1, 12, 0)),
            location: Location::new(5.18, 52.1, 1.9),
        },
        rows,
    }
}
