//! Tests for zip bundle handling

use super::*;
use crate::Error;
use crate::app::services::archive_reader::{OpenArchive, scan_archive};
use crate::config::Provider;
use tempfile::TempDir;

#[test]
fn test_scan_knmi_bundle() {
    let dir = TempDir::new().unwrap();
    let path = write_zip(
        &dir.path().join("uurgeg_260_2001-2010.zip"),
        &[("uurgeg_260_2001-2010.txt", knmi_sample())],
    );

    let mut rows = Vec::new();
    let scan = scan_archive(&path, Provider::Knmi, |row| rows.push(row)).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(scan.stats.rows_parsed, 3);
    assert_eq!(scan.stats.rows_skipped, 0);
    assert!(scan.metadata.is_empty());
}

#[test]
fn test_scan_dwd_bundle_with_metadata() {
    let dir = TempDir::new().unwrap();
    let path = write_zip(
        &dir.path().join("stundenwerte_TU_00044_20070209_20221231_hist.zip"),
        &[
            ("Metadaten_Geographie_00044.txt", dwd_metadata_sample()),
            ("produkt_tu_stunde_20070209_20221231_00044.txt", dwd_sample()),
            ("Metadaten_Parameter_tu_stunde_00044.txt", "ignored"),
        ],
    );

    let mut rows = Vec::new();
    let scan = scan_archive(&path, Provider::Dwd, |row| rows.push(row)).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(scan.metadata.len(), 1);
    assert_eq!(scan.metadata[0].name, "Metadaten_Geographie_00044.txt");
    assert_eq!(scan.metadata[0].bytes, dwd_metadata_sample().as_bytes());
}

#[test]
fn test_missing_header_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_zip(
        &dir.path().join("uurgeg_260_2001-2010.zip"),
        &[("uurgeg_260_2001-2010.txt", "just a comment\n1,2,3\n")],
    );

    let mut rows = Vec::new();
    let result = scan_archive(&path, Provider::Knmi, |row| rows.push(row));

    assert!(matches!(result, Err(Error::MissingHeader { .. })));
    assert!(rows.is_empty());
}

#[test]
fn test_corrupted_entry_fails_bundle() {
    let dir = TempDir::new().unwrap();
    let path = write_corrupted_zip(
        &dir.path().join("uurgeg_260_2001-2010.zip"),
        "uurgeg_260_2001-2010.txt",
        knmi_sample(),
        "   15,   -1",
        "   95,   -1",
    );

    let result = scan_archive(&path, Provider::Knmi, |_| {});

    match result {
        Err(Error::Io { message, .. }) => assert!(message.contains("uurgeg_260_2001-2010.zip")),
        other => panic!("expected a read failure, got {other:?}"),
    }
}

#[test]
fn test_entry_named_after_bundle_is_preferred() {
    let dir = TempDir::new().unwrap();
    let path = write_zip(
        &dir.path().join("uurgeg_260_2001-2010.zip"),
        &[
            ("readme.txt", "not data"),
            ("uurgeg_260_2001-2010.txt", knmi_sample()),
        ],
    );

    let archive = OpenArchive::open(&path, Provider::Knmi).unwrap();
    assert_eq!(archive.data_entry(), "uurgeg_260_2001-2010.txt");
}

#[test]
fn test_ambiguous_or_missing_data_entry() {
    let dir = TempDir::new().unwrap();
    let ambiguous = write_zip(
        &dir.path().join("uurgeg_260_2001-2010.zip"),
        &[("a.txt", knmi_sample()), ("b.txt", knmi_sample())],
    );
    let empty = write_zip(
        &dir.path().join("stundenwerte_TU_00044_hist.zip"),
        &[("Metadaten_Geographie_00044.txt", dwd_metadata_sample())],
    );

    assert!(matches!(
        OpenArchive::open(&ambiguous, Provider::Knmi),
        Err(Error::ArchiveLayout { .. })
    ));
    assert!(matches!(
        OpenArchive::open(&empty, Provider::Dwd),
        Err(Error::ArchiveLayout { .. })
    ));
}

#[test]
fn test_unreadable_bundle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("uurgeg_260_broken.zip");
    std::fs::write(&path, b"not a zip").unwrap();

    assert!(matches!(
        OpenArchive::open(&path, Provider::Knmi),
        Err(Error::Zip { .. })
    ));
    assert!(matches!(
        OpenArchive::open(&dir.path().join("absent.zip"), Provider::Knmi),
        Err(Error::Io { .. })
    ));
}
