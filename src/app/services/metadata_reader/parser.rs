//! DWD station metadata catalog parsing

use crate::app::models::{DateBound, Location, RawMetadataRecord, parse_number};
use crate::app::services::archive_reader::MetadataEntry;
use crate::app::services::discovery::same_station;
use crate::constants::{METADATA_DATE_FORMAT, dwd};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ByteRecord;
use tracing::{debug, warn};

/// Parse a fixed-format `YYYYMMDD` validity date
///
/// Anything else (including an empty field) falls back to `now`.
pub fn parse_metadata_date(raw: &str, now: NaiveDateTime) -> DateBound {
    match NaiveDate::parse_from_str(raw.trim(), METADATA_DATE_FORMAT) {
        Ok(date) => DateBound::Resolved(date.and_time(chrono::NaiveTime::MIN)),
        Err(_) => DateBound::DefaultedToNow(now),
    }
}

/// Column positions of the fields we need
struct Columns {
    station: Option<usize>,
    elevation: usize,
    latitude: usize,
    longitude: usize,
    valid_from: usize,
    valid_to: usize,
    width: usize,
}

impl Columns {
    fn locate(header: &[String], source: &str) -> Result<Self> {
        let find = |name: &str| header.iter().position(|column| column == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                Error::csv_parsing(source, format!("missing metadata column '{}'", name), None)
            })
        };

        Ok(Self {
            station: find(dwd::META_STATION),
            elevation: require(dwd::META_ELEVATION)?,
            latitude: require(dwd::META_LATITUDE)?,
            longitude: require(dwd::META_LONGITUDE)?,
            valid_from: require(dwd::META_VALID_FROM)?,
            valid_to: require(dwd::META_VALID_TO)?,
            width: header.len(),
        })
    }
}

fn decode(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).trim().to_string())
        .collect()
}

/// Parse a DWD `Metadaten_Geographie` / `Stationsmetadaten` catalog
///
/// The first non-empty line is the header; column names are matched
/// case-insensitively. Rows shorter than the header (legends, the
/// `generiert:` footer) are skipped, as are rows listing another station.
/// Records carry `station` as their identity.
pub fn parse_dwd_metadata(
    bytes: &[u8],
    source: &str,
    station: &str,
    now: NaiveDateTime,
) -> Result<Vec<RawMetadataRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(dwd::DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(bytes);

    let mut columns: Option<Columns> = None;
    let mut records = Vec::new();

    for record in reader.byte_records() {
        let record = record
            .map_err(|e| Error::csv_parsing(source, "Failed to read metadata line", Some(e)))?;
        let fields = decode(&record);
        if fields.iter().all(|field| field.is_empty()) {
            continue;
        }

        let Some(cols) = &columns else {
            let header: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();
            columns = Some(Columns::locate(&header, source)?);
            continue;
        };

        if fields.len() < cols.width {
            debug!("{}: skipping short metadata line {:?}", source, fields);
            continue;
        }

        if let Some(listed) = cols.station.map(|index| fields[index].as_str()) {
            if !listed.is_empty() && !same_station(listed, station) {
                debug!("{}: skipping row of station {}", source, listed);
                continue;
            }
        }

        let location_field = |index: usize, name: &str| {
            parse_number(&fields[index])
                .ok_or_else(|| Error::metadata_location(station, name, fields[index].as_str()))
        };

        let location = Location::new(
            location_field(cols.longitude, "longitude")?,
            location_field(cols.latitude, "latitude")?,
            location_field(cols.elevation, "elevation")?,
        );
        location.validate()?;

        let valid_from = parse_metadata_date(&fields[cols.valid_from], now);
        let valid_to = parse_metadata_date(&fields[cols.valid_to], now);
        if valid_from.is_defaulted() || valid_to.is_defaulted() {
            debug!(
                "{}: validity bound defaulted to processing time ({} .. {})",
                source, fields[cols.valid_from], fields[cols.valid_to]
            );
        }

        records.push(RawMetadataRecord {
            station_id: station.to_string(),
            valid_from,
            valid_to,
            location,
        });
    }

    if columns.is_none() {
        warn!("{}: metadata catalog has no header line", source);
    }

    Ok(records)
}

/// Parse every metadata entry collected from a station's bundles
///
/// Records keep the order of the entries, then the order of their lines.
pub fn read_metadata_entries(
    entries: &[MetadataEntry],
    station: &str,
    now: NaiveDateTime,
) -> Result<Vec<RawMetadataRecord>> {
    let mut records = Vec::new();
    for entry in entries {
        let parsed = parse_dwd_metadata(&entry.bytes, &entry.name, station, now)?;
        debug!("{}: {} metadata rows", entry.name, parsed.len());
        records.extend(parsed);
    }
    Ok(records)
}
