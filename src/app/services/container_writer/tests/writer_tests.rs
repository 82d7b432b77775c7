//! Tests for container writing

use super::*;
use crate::app::services::column_encoder::encode_epoch;
use crate::app::services::container_writer::{
    ContainerWriter, WriteOutcome, container_file_name, read_container,
};
use crate::config::{CompressionAlgorithm, Provider};
use tempfile::TempDir;

#[test]
fn test_container_file_names() {
    assert_eq!(container_file_name("260", 1), "260.parquet");
    assert_eq!(container_file_name("260", 2), "260_2.parquet");
    assert_eq!(container_file_name("00044", 3), "00044_3.parquet");
}

#[test]
fn test_write_creates_single_container() {
    let dir = TempDir::new().unwrap();
    let series = sample_series();
    let variables = encode_epoch(&series, Provider::Knmi);

    let writer = ContainerWriter::new(dir.path(), Provider::Knmi);
    let outcome = writer
        .write("260", 1, &series, &variables, "Created test")
        .unwrap();

    assert_eq!(outcome, WriteOutcome::Written(dir.path().join("260.parquet")));
    assert!(outcome.path().exists());

    // No temporary files are left behind
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_skip_existing() {
    let dir = TempDir::new().unwrap();
    let series = sample_series();
    let variables = encode_epoch(&series, Provider::Knmi);
    std::fs::write(dir.path().join("260_2.parquet"), b"placeholder").unwrap();

    let writer = ContainerWriter::new(dir.path(), Provider::Knmi).with_skip_existing(true);
    let outcome = writer
        .write("260", 2, &series, &variables, "Created test")
        .unwrap();

    assert!(matches!(outcome, WriteOutcome::SkippedExisting(_)));
    assert_eq!(
        std::fs::read(dir.path().join("260_2.parquet")).unwrap(),
        b"placeholder"
    );
}

#[test]
fn test_existing_container_is_replaced_by_default() {
    let dir = TempDir::new().unwrap();
    let series = sample_series();
    let variables = encode_epoch(&series, Provider::Knmi);
    std::fs::write(dir.path().join("260.parquet"), b"stale").unwrap();

    let writer = ContainerWriter::new(dir.path(), Provider::Knmi);
    writer
        .write("260", 1, &series, &variables, "Created test")
        .unwrap();

    let contents = read_container(&dir.path().join("260.parquet")).unwrap();
    assert_eq!(contents.len(), 3);
}

#[test]
fn test_metadata_is_deterministic_apart_from_history() {
    let dir = TempDir::new().unwrap();
    let series = sample_series();
    let variables = encode_epoch(&series, Provider::Knmi);

    let first_dir = dir.path().join("a");
    let second_dir = dir.path().join("b");
    ContainerWriter::new(&first_dir, Provider::Knmi)
        .write("260", 1, &series, &variables, "Created first run")
        .unwrap();
    ContainerWriter::new(&second_dir, Provider::Knmi)
        .write("260", 1, &series, &variables, "Created second run")
        .unwrap();

    let first = read_container(&first_dir.join("260.parquet")).unwrap();
    let second = read_container(&second_dir.join("260.parquet")).unwrap();

    let without_history = |contents: &crate::app::services::container_writer::ContainerContents| {
        contents
            .attributes
            .entries()
            .iter()
            .filter(|(key, _)| key != "history")
            .cloned()
            .collect::<Vec<_>>()
    };
    assert_eq!(without_history(&first), without_history(&second));
    assert_ne!(first.attribute("history"), second.attribute("history"));
}

#[test]
fn test_every_compression_algorithm_round_trips() {
    let dir = TempDir::new().unwrap();
    let series = sample_series();
    let variables = encode_epoch(&series, Provider::Knmi);

    for (index, compression) in [
        CompressionAlgorithm::Zstd,
        CompressionAlgorithm::Snappy,
        CompressionAlgorithm::Gzip,
        CompressionAlgorithm::Lz4,
        CompressionAlgorithm::Uncompressed,
    ]
    .into_iter()
    .enumerate()
    {
        let writer = ContainerWriter::new(dir.path(), Provider::Knmi).with_compression(compression);
        let outcome = writer
            .write("260", index + 1, &series, &variables, "Created test")
            .unwrap();
        let contents = read_container(outcome.path()).unwrap();
        assert_eq!(contents.float64_values("T").unwrap(), vec![1.5, -999.0, -0.5]);
    }
}
