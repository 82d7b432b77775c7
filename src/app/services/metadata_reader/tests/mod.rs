//! Test utilities for the metadata reader

use chrono::{NaiveDate, NaiveDateTime};


/// Fixed processing instant
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// DWD geography catalog with a relocation, a legend line and a footer
pub fn dwd_geography() -> &'static str {
    "Stations_id;Stationshoehe;Geogr.Breite;Geogr.Laenge;von_datum;bis_datum;Stationsname\n\
     \x20       44;   44.00;  52.9336;   8.2370;19690101;20070208;Grossenkneten\n\
     \x20       44;   44.00;  52.9336;   8.2370;20070209;        ;Grossenkneten\n\
     Legende: Stationshoehe in m\n\
     generiert: 12.03.2023 --  Deutscher Wetterdienst  --\n"
}

/// KNMI-style station catalog
pub fn station_catalog() -> &'static str {
    "station_id,station_name,latitude,longitude,elevation,url\n\
     260,De Bilt,52.1,5.18,1.9,http://example.invalid/260\n\
     0270,Leeuwarden,53.224,5.752,1.2,\n"
}
