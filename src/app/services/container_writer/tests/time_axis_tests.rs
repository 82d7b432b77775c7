//! Tests for the minutes-since-reference time axis

use super::*;
use crate::app::services::container_writer::{
    decode_time, encode_time, encode_time_axis, reference_instant,
};

#[test]
fn test_reference_instant() {
    assert_eq!(reference_instant(), at(2010, 1, 1, 0, 0));
    assert_eq!(encode_time(reference_instant()).unwrap(), 0);
}

#[test]
fn test_round_trip_known_instant() {
    // 2010 has 365 days, 2011 has 365, plus January and February 2012 (leap)
    let days = 365 + 365 + 31 + 29;
    let minutes = encode_time(at(2012, 3, 1, 6, 0)).unwrap();

    assert_eq!(minutes, days * 1440 + 360);
    assert_eq!(decode_time(minutes), at(2012, 3, 1, 6, 0));
}

#[test]
fn test_instants_before_reference_are_negative() {
    assert_eq!(encode_time(at(2009, 12, 31, 23, 0)).unwrap(), -60);
    assert_eq!(decode_time(-60), at(2009, 12, 31, 23, 0));
}

#[test]
fn test_rounding_to_nearest_minute() {
    let base = at(2010, 1, 1, 0, 0);
    assert_eq!(encode_time(base + chrono::TimeDelta::seconds(29)).unwrap(), 0);
    assert_eq!(encode_time(base + chrono::TimeDelta::seconds(31)).unwrap(), 1);
    assert_eq!(encode_time(base + chrono::TimeDelta::seconds(90)).unwrap(), 2);
}

#[test]
fn test_out_of_range_is_an_error() {
    assert!(encode_time(NaiveDateTime::MIN).is_err());
    assert_eq!(
        encode_time_axis(&[at(2010, 1, 1, 1, 0), at(2010, 1, 1, 2, 0)]).unwrap(),
        vec![60, 120]
    );
}
