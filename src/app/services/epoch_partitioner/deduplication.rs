//! Collapsing metadata rows into distinct epochs

use crate::app::models::{RawMetadataRecord, StationEpoch};
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, warn};

/// Which epoch irregularities abort a station
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpochPolicy {
    /// Reject epochs with a bound that fell back to processing time
    pub reject_defaulted: bool,

    /// Reject consecutive epochs whose intervals overlap
    pub reject_overlapping: bool,
}

/// Collapse metadata rows into epochs ordered by `valid_from`
///
/// Rows sharing a `valid_from` collapse to the first one seen; later rows
/// with that key are dropped whole, even when their other fields differ.
pub fn deduplicate_epochs(records: Vec<RawMetadataRecord>) -> Vec<StationEpoch> {
    let total = records.len();
    let mut epochs: BTreeMap<_, StationEpoch> = BTreeMap::new();

    for record in records {
        let epoch = StationEpoch::from(record);
        match epochs.entry(epoch.key()) {
            Entry::Vacant(slot) => {
                slot.insert(epoch);
            }
            Entry::Occupied(slot) => {
                if slot.get() != &epoch {
                    debug!(
                        "Dropping metadata row starting {} that differs from the first one",
                        epoch.key()
                    );
                }
            }
        }
    }

    debug!(
        "Deduplicated {} metadata rows into {} epochs",
        total,
        epochs.len()
    );
    epochs.into_values().collect()
}

/// Pairs of consecutive epochs whose intervals overlap
///
/// Epochs must be ordered by `valid_from`.
pub fn find_overlaps(epochs: &[StationEpoch]) -> Vec<(usize, usize)> {
    epochs
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].valid_to.value() >= pair[1].valid_from.value())
        .map(|(index, _)| (index, index + 1))
        .collect()
}

/// Apply an [`EpochPolicy`] to deduplicated epochs
///
/// Returns the warnings to report for irregularities the policy tolerates.
pub fn validate_epochs(
    station: &str,
    epochs: &[StationEpoch],
    policy: EpochPolicy,
) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    for epoch in epochs.iter().filter(|epoch| epoch.has_defaulted_bound()) {
        if policy.reject_defaulted {
            return Err(Error::DefaultedEpoch {
                station: station.to_string(),
                valid_from: epoch.valid_from.value().to_string(),
            });
        }
        warn!(
            "Station {}: epoch starting {} has a bound defaulted to processing time",
            station,
            epoch.valid_from.value()
        );
    }

    for epoch in epochs.iter().filter(|epoch| epoch.is_inverted()) {
        let message = format!(
            "epoch starting {} ends before it starts ({})",
            epoch.valid_from.value(),
            epoch.valid_to.value()
        );
        warn!("Station {}: {}", station, message);
        warnings.push(message);
    }

    for (first, second) in find_overlaps(epochs) {
        let (a, b) = (&epochs[first], &epochs[second]);
        if policy.reject_overlapping {
            return Err(Error::OverlappingEpochs {
                station: station.to_string(),
                first: a.valid_from.value().to_string(),
                second: b.valid_from.value().to_string(),
            });
        }

        let message = format!(
            "epoch starting {} ends {} after the next epoch starts {}",
            a.valid_from.value(),
            a.valid_to.value(),
            b.valid_from.value()
        );
        warn!("Station {}: overlapping {}", station, message);
        warnings.push(format!("overlapping {}", message));
    }

    Ok(warnings)
}
