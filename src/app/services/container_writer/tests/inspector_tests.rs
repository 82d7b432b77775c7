//! Tests for reading containers back

use super::*;
use crate::app::services::column_encoder::encode_epoch;
use crate::app::services::container_writer::{ContainerWriter, read_container};
use crate::config::Provider;
use arrow::datatypes::DataType;
use tempfile::TempDir;

fn written() -> (TempDir, crate::app::services::container_writer::ContainerContents) {
    let dir = TempDir::new().unwrap();
    let series = sample_series();
    let variables = encode_epoch(&series, Provider::Knmi);
    let outcome = ContainerWriter::new(dir.path(), Provider::Knmi)
        .write("260", 1, &series, &variables, "Created test")
        .unwrap();
    let contents = read_container(outcome.path()).unwrap();
    (dir, contents)
}

#[test]
fn test_time_axis_decodes() {
    let (_dir, contents) = written();

    assert_eq!(
        contents.time,
        vec![at(2012, 3, 1, 1, 0), at(2012, 3, 1, 2, 0), at(2012, 3, 1, 3, 0)]
    );
    assert_eq!(contents.int32_values("time").unwrap()[0], 790 * 1440 + 60);
}

#[test]
fn test_variables_and_types() {
    let (_dir, contents) = written();

    assert_eq!(
        contents.variables,
        vec![
            ("DD".to_string(), DataType::Float64),
            ("T".to_string(), DataType::Float64),
            ("WW".to_string(), DataType::Utf8),
        ]
    );
    assert_eq!(contents.float64_values("DD").unwrap(), vec![250.0, 260.0, -999.0]);
    assert_eq!(
        contents.text_values("WW").unwrap(),
        vec![Some("fog".to_string()), None, Some("rain".to_string())]
    );
    assert!(contents.int32_values("DD").is_none());
}

#[test]
fn test_attributes() {
    let (_dir, contents) = written();

    assert_eq!(contents.attribute("Conventions"), Some("CF-1.6"));
    assert_eq!(contents.attribute("description"), Some("KNMI 260"));
    assert_eq!(contents.attribute("station_id"), Some("260"));
    assert_eq!(contents.attribute("epoch_index"), Some("1"));
    assert_eq!(contents.attribute("epoch_valid_from"), Some("2000-01-01T00:00:00"));
    assert_eq!(contents.attribute("epoch_valid_to"), Some("open"));
    assert_eq!(contents.attribute("history"), Some("Created test"));

    assert_eq!(
        contents.attribute("time:units"),
        Some("minutes since 2010-01-01 00:00:00")
    );
    assert_eq!(contents.attribute("time:calendar"), Some("gregorian"));

    assert_eq!(contents.attribute("longitude"), Some("5.18"));
    assert_eq!(contents.attribute("latitude"), Some("52.1"));
    assert_eq!(contents.attribute("elevation"), Some("1.9"));
    assert_eq!(contents.attribute("longitude:units"), Some("degrees_east"));
    assert_eq!(contents.attribute("elevation:axis"), Some("Z"));

    assert_eq!(contents.attribute("T:_FillValue"), Some("-999"));
    assert_eq!(contents.attribute("T:units"), Some("degC"));
    assert_eq!(contents.attribute("DD:_FillValue"), Some("-999"));
    assert_eq!(contents.attribute("WW:_FillValue"), None);
    assert_eq!(contents.attribute("WW:element_type"), Some("text"));
}

#[test]
fn test_global_attributes_come_first() {
    let (_dir, contents) = written();
    let keys: Vec<&str> = contents
        .attributes
        .entries()
        .iter()
        .map(|(key, _)| key.as_str())
        .collect();

    assert_eq!(keys[0], "Conventions");
    assert_eq!(keys[7], "history");
    assert_eq!(keys[8], "time:units");
}

#[test]
fn test_reading_a_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    assert!(read_container(&dir.path().join("absent.parquet")).is_err());
}
