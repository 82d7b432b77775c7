//! Test utilities for the archive reader
//!
//! Provides sample KNMI and DWD data entries and a helper that packs entries
//! into a zip bundle on disk.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

mod archive_tests;

/// KNMI hourly text with its usual comment preamble
pub fn knmi_sample() -> &'static str {
    "BRON: KONINKLIJK NEDERLANDS METEOROLOGISCH INSTITUUT (KNMI)\n\
     Opmerking: door stationsverplaatsingen en veranderingen in waarneemmethodieken zijn deze tijdreeksen\n\
     \n\
     STN         LON(east)   LAT(north)     ALT(m)  NAME\n\
     260:         5.180       52.100      1.90  De Bilt\n\
     \n\
     # T        : Temperatuur (in 0.1 graden Celsius) op 1.50 m hoogte tijdens de waarneming\n\
     # RH       : Uursom van de neerslag (in 0.1 mm) (-1 voor <0.05 mm)\n\
     \n\
     # STN,YYYYMMDD,   HH,    T,   RH,    Q\n\
     \n\
     \x20 260,20100101,    1,   15,   -1,   36\n\
     \x20 260,20100101,    2,     ,    5,    0\n\
     \x20 260,20100101,   24,  -12, -999,   18\n"
}

/// DWD hourly product text
pub fn dwd_sample() -> &'static str {
    "STATIONS_ID;MESS_DATUM;  QN_8;LUFTTEMPERATUR;LUFTDRUCK_STATIONSHOEHE;eor\n\
     \x20       44;2010010100;    3;  -2.5;  1013.2;eor\n\
     \x20       44;2010010101;    3;  -2.7;  -999;eor\n"
}

/// DWD station metadata text
pub fn dwd_metadata_sample() -> &'static str {
    "Stations_id;Stationshoehe;Geogr.Breite;Geogr.Laenge;von_datum;bis_datum;Stationsname\n\
     44;44.00;52.9336;8.2370;20070209;20100101;Grossenkneten\n\
     44;44.00;52.9336;8.2370;20100102;;Grossenkneten\n"
}

/// Write a zip bundle holding the given entries
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) -> PathBuf {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path.to_path_buf()
}

/// Write a bundle with one uncompressed entry, then swap `from` for `to` in
/// the raw bytes so the entry no longer matches its stored checksum
pub fn write_corrupted_zip(path: &Path, name: &str, content: &str, from: &str, to: &str) -> PathBuf {
    assert_eq!(from.len(), to.len());
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    zip.start_file(name, options).unwrap();
    zip.write_all(content.as_bytes()).unwrap();
    zip.finish().unwrap();

    let mut bytes = std::fs::read(path).unwrap();
    let at = bytes
        .windows(from.len())
        .position(|window| window == from.as_bytes())
        .unwrap();
    bytes[at..at + to.len()].copy_from_slice(to.as_bytes());
    std::fs::write(path, bytes).unwrap();
    path.to_path_buf()
}
