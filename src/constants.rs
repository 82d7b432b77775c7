//! Application constants for obsnorm
//!
//! This module contains the fixed values shared by the readers, the encoder
//! and the container writer: the time reference, the fill value, provider
//! sentinels and reserved column names.

// =============================================================================
// Time Axis
// =============================================================================

/// Reference instant of the container time axis (year, month, day)
pub const TIME_REFERENCE_YMD: (i32, u32, u32) = (2010, 1, 1);

/// Units attribute written on the `time` variable
pub const TIME_UNITS: &str = "minutes since 2010-01-01 00:00:00";

/// Calendar attribute written on the `time` variable
pub const TIME_CALENDAR: &str = "gregorian";

// =============================================================================
// Missing Values
// =============================================================================

/// Fill value stored for missing numeric observations
pub const FILL_VALUE: i32 = -999;

/// Fill value as a float for `Float64` columns
pub const FILL_VALUE_F64: f64 = -999.0;

// =============================================================================
// Reserved Variable Names
// =============================================================================

/// Name of the time dimension and variable
pub const TIME_VARIABLE: &str = "time";

/// Scalar coordinate variables written from the epoch location
pub const LONGITUDE_VARIABLE: &str = "longitude";
pub const LATITUDE_VARIABLE: &str = "latitude";
pub const ELEVATION_VARIABLE: &str = "elevation";

/// Names never encoded as observed variables, whatever the provider
pub const RESERVED_VARIABLES: &[&str] = &[
    TIME_VARIABLE,
    LONGITUDE_VARIABLE,
    LATITUDE_VARIABLE,
    ELEVATION_VARIABLE,
];

// =============================================================================
// KNMI Hourly Archives
// =============================================================================

pub mod knmi {
    /// Token on the header line of an `uurgeg` text file
    pub const HEADER_SENTINEL: &str = "# STN";

    /// Field delimiter
    pub const DELIMITER: u8 = b',';

    /// Date column (`YYYYMMDD`)
    pub const DATE_COLUMN: &str = "YYYYMMDD";

    /// Hour column (`1..=24`, hour ending)
    pub const HOUR_COLUMN: &str = "HH";

    /// Station column
    pub const STATION_COLUMN: &str = "# STN";

    /// Columns that identify the row rather than observe anything
    pub const RESERVED_COLUMNS: &[&str] = &[STATION_COLUMN, DATE_COLUMN, HOUR_COLUMN];

    /// Archive file name pattern, capturing the station id
    pub const ARCHIVE_PATTERN: &str = r"^uurgeg_(\d+)_.*\.zip$";

    /// Columns stored in tenths of their unit
    pub const TENTHS_COLUMNS: &[&str] = &["T10", "T", "RH", "FF", "TD"];

    /// Precipitation column, `-1` meaning less than 0.05 mm
    pub const PRECIPITATION_COLUMN: &str = "RH";

    /// Global radiation column in J/cm2 per hour
    pub const RADIATION_COLUMN: &str = "Q";
}

// =============================================================================
// DWD Hourly Archives
// =============================================================================

pub mod dwd {
    /// Token on the header line of a `produkt_*` text file
    pub const HEADER_SENTINEL: &str = "MESS_DATUM";

    /// Field delimiter
    pub const DELIMITER: u8 = b';';

    /// Timestamp column (`YYYYMMDDHH`)
    pub const TIMESTAMP_COLUMN: &str = "MESS_DATUM";

    /// Columns that identify the row rather than observe anything
    pub const RESERVED_COLUMNS: &[&str] = &["STATIONS_ID", "MESS_DATUM", "eor"];

    /// Archive file name pattern, capturing the five digit station id
    pub const ARCHIVE_PATTERN: &str = r"^[^_]+_[^_]+_(\d{5})_.*\.zip$";

    /// Entry name fragment of the observation file
    pub const DATA_ENTRY_MARKER: &str = "produkt";

    /// Entry name fragments of the station metadata file
    pub const METADATA_ENTRY_MARKERS: &[&str] = &["Stationsmetadaten", "Metadaten_Geographie"];

    /// Provider column vocabulary mapped onto canonical variable names
    pub const COLUMN_RENAMES: &[(&str, &str)] = &[
        ("LUFTDRUCK_REDUZIERT", "pressure_reduced"),
        ("LUFTDRUCK_STATIONSHOEHE", "pressure_station"),
        ("REL_FEUCHTE", "rltvh"),
        ("WINDRICHTUNG", "winddir"),
        ("WINDGESCHWINDIGKEIT", "windspeed"),
        ("GESAMT_BEDECKUNGSGRAD", "clouds"),
        ("NIEDERSCHLAGSHOEHE", "precipitation"),
        ("LUFTTEMPERATUR", "temperature"),
    ];

    /// Metadata catalog columns (matched case-insensitively)
    pub const META_STATION: &str = "stations_id";
    pub const META_ELEVATION: &str = "stationshoehe";
    pub const META_LATITUDE: &str = "geogr.breite";
    pub const META_LONGITUDE: &str = "geogr.laenge";
    pub const META_VALID_FROM: &str = "von_datum";
    pub const META_VALID_TO: &str = "bis_datum";
}

// =============================================================================
// Metadata
// =============================================================================

/// Fixed date format of metadata validity bounds
pub const METADATA_DATE_FORMAT: &str = "%Y%m%d";

// =============================================================================
// Output
// =============================================================================

/// Extension of written containers
pub const CONTAINER_EXTENSION: &str = "parquet";

/// Default manifest file name written into the output directory
pub const DEFAULT_MANIFEST_NAME: &str = "filelist";

/// Conventions attribute written on every container
pub const CONVENTIONS: &str = "CF-1.6";

/// Default number of rows per Parquet row group
pub const ROW_GROUP_SIZE: usize = 100_000;
