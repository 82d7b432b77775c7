//! Tests for column encoding

use super::*;
use crate::app::services::column_encoder::{
    ElementType, EncodedValues, encode_column, encode_epoch,
};
use crate::config::Provider;

#[test]
fn test_numeric_column_gets_fill_value() {
    let encoded = encode_column("T", &column(&["3.2", "", "missing"]));

    assert_eq!(encoded.element_type, ElementType::Float64);
    assert_eq!(encoded.fill_value, Some(-999.0));
    assert_eq!(
        encoded.values,
        EncodedValues::Float64(vec![3.2, -999.0, -999.0])
    );
    assert_eq!(encoded.attributes.unwrap().units, "degC");
}

#[test]
fn test_text_column_has_no_fill_value() {
    let encoded = encode_column("WIND", &column(&["north", "south", "", "east"]));

    assert_eq!(encoded.element_type, ElementType::Text);
    assert_eq!(encoded.fill_value, None);
    assert_eq!(
        encoded.values,
        EncodedValues::Text(vec![
            Some("north".to_string()),
            Some("south".to_string()),
            None,
            Some("east".to_string()),
        ])
    );
    assert!(encoded.attributes.is_none());
}

#[test]
fn test_integral_column_is_float64() {
    let encoded = encode_column("DD", &column(&["250", "x", "-999"]));

    assert_eq!(encoded.element_type, ElementType::Float64);
    assert_eq!(encoded.values, EncodedValues::Float64(vec![250.0, -999.0, -999.0]));
    assert_eq!(encoded.values.len(), 3);
}

#[test]
fn test_same_variable_same_type_across_epochs() {
    let whole = encode_column("RH", &column(&["0", "1"]));
    let fractional = encode_column("RH", &column(&["0", "0.3"]));

    assert_eq!(whole.element_type, fractional.element_type);
    assert_eq!(whole.values, EncodedValues::Float64(vec![0.0, 1.0]));
}

#[test]
fn test_encode_epoch_aligns_and_excludes_reserved() {
    let series = epoch_series(vec![
        (1, vec![("# STN", "260"), ("YYYYMMDD", "20120301"), ("HH", "1"), ("T", "1.5")]),
        (2, vec![("# STN", "260"), ("YYYYMMDD", "20120301"), ("HH", "2"), ("RH", "0.2")]),
        (3, vec![("# STN", "260"), ("T", "2.5"), ("latitude", "99")]),
    ]);

    let variables = encode_epoch(&series, Provider::Knmi);
    let names: Vec<_> = variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["RH", "T"]);

    // Every column spans the whole time axis
    assert!(variables.iter().all(|v| v.values.len() == 3));
    assert_eq!(
        variables[0].values,
        EncodedValues::Float64(vec![-999.0, 0.2, -999.0])
    );
    assert_eq!(
        variables[1].values,
        EncodedValues::Float64(vec![1.5, -999.0, 2.5])
    );
}

#[test]
fn test_encode_epoch_dwd_reserved_columns() {
    let series = epoch_series(vec![(
        1,
        vec![
            ("STATIONS_ID", "44"),
            ("MESS_DATUM", "2012030101"),
            ("temperature", "5.1"),
            ("eor", "eor"),
        ],
    )]);

    let variables = encode_epoch(&series, Provider::Dwd);
    assert_eq!(variables.len(), 1);
    assert_eq!(variables[0].name, "temperature");
}
