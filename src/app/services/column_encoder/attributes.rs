//! Descriptive attributes of known variables

/// `units`, `standard_name` and `long_name` of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableAttributes {
    pub units: &'static str,
    pub standard_name: &'static str,
    pub long_name: &'static str,
}

const fn attrs(
    units: &'static str,
    standard_name: &'static str,
    long_name: &'static str,
) -> VariableAttributes {
    VariableAttributes {
        units,
        standard_name,
        long_name,
    }
}

/// Units hold after provider scaling has been applied
const KNOWN: &[(&str, VariableAttributes)] = &[
    // KNMI hourly
    (
        "DD",
        attrs(
            "degrees",
            "wind_from_direction",
            "mean wind direction during the 10-minute period preceding the time of observation (990=variable)",
        ),
    ),
    ("FF", attrs("m s-1", "wind_speed", "mean wind speed during the 10-minute period preceding the time of observation")),
    ("T", attrs("degC", "air_temperature", "air temperature at 1.50 m")),
    ("T10", attrs("degC", "air_temperature", "minimum air temperature at 10 cm in the preceding 6 hours")),
    ("TD", attrs("degC", "dew_point_temperature", "dew point temperature at 1.50 m")),
    ("RH", attrs("mm", "precipitation_amount", "hourly precipitation amount")),
    ("Q", attrs("W m-2", "surface_downwelling_shortwave_flux_in_air", "global radiation")),
    // DWD hourly, canonical names
    ("temperature", attrs("degC", "air_temperature", "air temperature at 2 m")),
    ("rltvh", attrs("%", "relative_humidity", "relative humidity at 2 m")),
    ("pressure_station", attrs("Pa", "surface_air_pressure", "air pressure at station height")),
    ("pressure_reduced", attrs("hPa", "air_pressure_at_mean_sea_level", "air pressure reduced to mean sea level")),
    ("winddir", attrs("degrees", "wind_from_direction", "mean wind direction")),
    ("windspeed", attrs("m s-1", "wind_speed", "mean wind speed")),
    ("clouds", attrs("1/8", "cloud_area_fraction", "total cloud cover in eighths")),
    ("precipitation", attrs("mm", "precipitation_amount", "hourly precipitation amount")),
];

/// Attributes for a variable name, if it is a known one
pub fn known_attributes(name: &str) -> Option<VariableAttributes> {
    KNOWN
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, attributes)| *attributes)
}
