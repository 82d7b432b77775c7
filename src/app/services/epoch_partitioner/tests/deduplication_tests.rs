//! Tests for metadata deduplication and epoch validation

use super::*;
use crate::Error;
use crate::app::services::epoch_partitioner::{
    EpochPolicy, deduplicate_epochs, find_overlaps, validate_epochs,
};

#[test]
fn test_duplicate_valid_from_keeps_first_row() {
    let records = vec![
        record(day(2000, 1, 1), DateBound::Resolved(day(2005, 5, 31)), 10.0),
        record(day(2000, 1, 1), DateBound::Resolved(day(2004, 1, 1)), 99.0),
        record(day(2005, 6, 1), DateBound::Resolved(day(2010, 1, 1)), 12.0),
    ];

    let epochs = deduplicate_epochs(records);

    assert_eq!(epochs.len(), 2);
    assert_eq!(epochs[0].location.elevation, 10.0);
    assert_eq!(epochs[0].valid_to, DateBound::Resolved(day(2005, 5, 31)));
    assert_eq!(epochs[1].valid_from, DateBound::Resolved(day(2005, 6, 1)));
}

#[test]
fn test_epochs_are_sorted_by_valid_from() {
    let records = vec![
        record(day(2005, 6, 1), DateBound::Resolved(day(2010, 1, 1)), 12.0),
        record(day(1990, 1, 1), DateBound::Resolved(day(2005, 5, 31)), 10.0),
    ];

    let epochs = deduplicate_epochs(records);
    assert_eq!(epochs[0].key(), day(1990, 1, 1));
    assert_eq!(epochs[1].key(), day(2005, 6, 1));
}

#[test]
fn test_find_overlaps() {
    let epochs = deduplicate_epochs(vec![
        record(day(2000, 1, 1), DateBound::Resolved(day(2005, 6, 1)), 1.0),
        record(day(2005, 6, 1), DateBound::Resolved(day(2006, 1, 1)), 2.0),
        record(day(2006, 1, 2), DateBound::Resolved(day(2007, 1, 1)), 3.0),
    ]);

    // A shared boundary instant overlaps in closed intervals
    assert_eq!(find_overlaps(&epochs), vec![(0, 1)]);
}

#[test]
fn test_overlap_is_a_warning_by_default() {
    let epochs = deduplicate_epochs(vec![
        record(day(2000, 1, 1), DateBound::Resolved(day(2006, 1, 1)), 1.0),
        record(day(2005, 6, 1), DateBound::Resolved(day(2010, 1, 1)), 2.0),
    ]);

    let warnings = validate_epochs("00044", &epochs, EpochPolicy::default()).unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("overlapping"));

    let strict = EpochPolicy {
        reject_overlapping: true,
        ..EpochPolicy::default()
    };
    assert!(matches!(
        validate_epochs("00044", &epochs, strict),
        Err(Error::OverlappingEpochs { .. })
    ));
}

#[test]
fn test_defaulted_bounds_follow_policy() {
    let now = day(2024, 6, 1);
    let epochs = deduplicate_epochs(vec![record(
        day(2000, 1, 1),
        DateBound::DefaultedToNow(now),
        1.0,
    )]);

    assert!(validate_epochs("00044", &epochs, EpochPolicy::default())
        .unwrap()
        .is_empty());

    let strict = EpochPolicy {
        reject_defaulted: true,
        ..EpochPolicy::default()
    };
    match validate_epochs("00044", &epochs, strict) {
        Err(Error::DefaultedEpoch { station, .. }) => assert_eq!(station, "00044"),
        other => panic!("expected defaulted epoch error, got {:?}", other),
    }
}

#[test]
fn test_inverted_epoch_is_reported() {
    let epochs = deduplicate_epochs(vec![record(
        day(2010, 1, 1),
        DateBound::Resolved(day(2000, 1, 1)),
        1.0,
    )]);

    let warnings = validate_epochs("00044", &epochs, EpochPolicy::default()).unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("ends before it starts"));
}
