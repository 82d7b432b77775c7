//! Tests for the conversion engine
//!
//! Fixtures build real zip bundles in a scratch directory so the whole
//! station pipeline runs against the same bytes a provider would ship.

pub use crate::app::services::archive_reader::tests::{dwd_sample, knmi_sample};
use crate::app::services::archive_reader::tests::write_zip;
use crate::app::services::discovery::StationArchives;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};
use tempfile::TempDir;


pub const DWD_STATION: &str = "00044";

/// Two DWD epochs: a relocation on 2010-01-02 and an open end
pub fn dwd_relocation_metadata() -> &'static str {
    "Stations_id;Stationshoehe;Geogr.Breite;Geogr.Laenge;von_datum;bis_datum;Stationsname\n\
     44;44.00;52.9336;8.2370;20070209;20100101;Grossenkneten\n\
     44;46.00;52.9350;8.2400;20100102;;Grossenkneten\n"
}

/// Fixed processing instant
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Scratch input and output directories for one test
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("input")).unwrap();
        Self { dir }
    }

    pub fn input(&self) -> PathBuf {
        self.dir.path().join("input")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    /// DWD bundle with a product file and a geography catalog
    pub fn dwd_bundle(&self, data: &str, metadata: &str) -> PathBuf {
        let bundle = format!("stundenwerte_TU_{}_20070209_20221231_hist.zip", DWD_STATION);
        let product = format!("produkt_tu_stunde_20070209_20221231_{}.txt", DWD_STATION);
        let geography = format!("Metadaten_Geographie_{}.txt", DWD_STATION);
        write_zip(
            &self.input().join(bundle),
            &[(product.as_str(), data), (geography.as_str(), metadata)],
        )
    }

    /// KNMI bundle named after the station
    pub fn knmi_bundle(&self, station: &str, data: &str) -> PathBuf {
        let name = format!("uurgeg_{}_2001-2010", station);
        let entry = format!("{}.txt", name);
        write_zip(
            &self.input().join(format!("{}.zip", name)),
            &[(entry.as_str(), data)],
        )
    }

    /// KNMI station catalog listing De Bilt only
    pub fn catalog(&self) -> PathBuf {
        let path = self.dir.path().join("stations.csv");
        std::fs::write(
            &path,
            "station_id,station_name,latitude,longitude,elevation\n\
             260,De Bilt,52.1,5.18,1.9\n",
        )
        .unwrap();
        path
    }
}

pub fn station<P: AsRef<Path>>(id: &str, archives: &[P]) -> StationArchives {
    StationArchives {
        station: id.to_string(),
        archives: archives.iter().map(|p| p.as_ref().to_path_buf()).collect(),
    }
}
