//! Arrow schema, record batch and attribute layout of a container

use crate::app::models::{DateBound, Location, StationEpoch};
use crate::app::services::column_encoder::{ElementType, EncodedValues, EncodedVariable};
use crate::config::Provider;
use crate::constants::{
    CONVENTIONS, ELEVATION_VARIABLE, FILL_VALUE, LATITUDE_VARIABLE, LONGITUDE_VARIABLE,
    TIME_CALENDAR, TIME_UNITS, TIME_VARIABLE,
};
use crate::{Error, Result};
use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDateTime;
use parquet::format::KeyValue;
use std::sync::Arc;

const BOUND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Arrow schema: `time` first, then one field per variable
pub fn build_schema(variables: &[EncodedVariable]) -> SchemaRef {
    let mut fields = Vec::with_capacity(variables.len() + 1);
    fields.push(Field::new(TIME_VARIABLE, DataType::Int32, false));

    for variable in variables {
        let field = match variable.element_type {
            ElementType::Float64 => Field::new(&variable.name, DataType::Float64, false),
            ElementType::Text => Field::new(&variable.name, DataType::Utf8, true),
        };
        fields.push(field);
    }

    Arc::new(Schema::new(fields))
}

/// One record batch holding the time axis and every variable
pub fn build_record_batch(
    schema: SchemaRef,
    time: Vec<i32>,
    variables: &[EncodedVariable],
) -> Result<RecordBatch> {
    let length = time.len();
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(variables.len() + 1);
    arrays.push(Arc::new(Int32Array::from(time)));

    for variable in variables {
        if variable.values.len() != length {
            return Err(Error::data_validation(format!(
                "Variable '{}' has {} values for {} time steps",
                variable.name,
                variable.values.len(),
                length
            )));
        }

        let array: ArrayRef = match &variable.values {
            EncodedValues::Float64(values) => Arc::new(Float64Array::from(values.clone())),
            EncodedValues::Text(values) => Arc::new(StringArray::from(values.clone())),
        };
        arrays.push(array);
    }

    RecordBatch::try_new(schema, arrays).map_err(|e| {
        Error::container_writing(format!("Failed to create record batch: {}", e), Box::new(e))
    })
}

fn format_bound(bound: &DateBound) -> String {
    match bound {
        DateBound::DefaultedToNow(_) => "open".to_string(),
        DateBound::Resolved(t) if *t == NaiveDateTime::MIN => "open".to_string(),
        DateBound::Resolved(t) => t.format(BOUND_FORMAT).to_string(),
    }
}

/// Ordered key-value attributes of one container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerAttributes {
    entries: Vec<(String, String)>,
}

impl ContainerAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a global attribute
    pub fn global(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.entries.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a variable attribute, keyed `variable:name`
    pub fn variable(&mut self, variable: &str, name: &str, value: impl ToString) -> &mut Self {
        self.entries
            .push((format!("{}:{}", variable, name), value.to_string()));
        self
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full attribute layout of a container
    ///
    /// `epoch_index` is 1-based among the station's surviving epochs.
    pub fn for_container(
        provider: Provider,
        station: &str,
        epoch_index: usize,
        epoch: &StationEpoch,
        variables: &[EncodedVariable],
        history: &str,
    ) -> Self {
        let mut attributes = Self::new();
        attributes
            .global("Conventions", CONVENTIONS)
            .global("description", format!("{} {}", provider.label(), station))
            .global("station_id", station)
            .global("epoch_index", epoch_index)
            .global("epoch_valid_from", format_bound(&epoch.valid_from))
            .global("epoch_valid_to", format_bound(&epoch.valid_to))
            .global(
                "dimensions",
                format!(
                    "{}(unlimited) {}(1) {}(1) {}(1)",
                    TIME_VARIABLE, LONGITUDE_VARIABLE, LATITUDE_VARIABLE, ELEVATION_VARIABLE
                ),
            )
            .global("history", history);

        attributes
            .variable(TIME_VARIABLE, "units", TIME_UNITS)
            .variable(TIME_VARIABLE, "calendar", TIME_CALENDAR)
            .variable(TIME_VARIABLE, "standard_name", "time")
            .variable(TIME_VARIABLE, "long_name", "time in UTC");

        attributes.location(&epoch.location);

        for variable in variables {
            attributes.variable(&variable.name, "element_type", variable.element_type);
            if variable.fill_value.is_some() {
                attributes.variable(&variable.name, "_FillValue", FILL_VALUE);
            }
            if let Some(known) = &variable.attributes {
                attributes
                    .variable(&variable.name, "units", known.units)
                    .variable(&variable.name, "standard_name", known.standard_name)
                    .variable(&variable.name, "long_name", known.long_name);
            }
        }

        attributes
    }

    fn location(&mut self, location: &Location) -> &mut Self {
        let scalars = [
            (LONGITUDE_VARIABLE, location.longitude, "degrees_east", "X", "longitude"),
            (LATITUDE_VARIABLE, location.latitude, "degrees_north", "Y", "latitude"),
            (ELEVATION_VARIABLE, location.elevation, "meters", "Z", "height"),
        ];

        for (name, value, units, axis, standard_name) in scalars {
            self.global(name, value)
                .variable(name, "units", units)
                .variable(name, "axis", axis)
                .variable(name, "standard_name", standard_name);
        }
        self
    }

    /// Parquet file key-value metadata
    pub fn to_key_values(&self) -> Vec<KeyValue> {
        self.entries
            .iter()
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect()
    }

    /// Rebuild from Parquet file key-value metadata
    pub fn from_key_values(key_values: &[KeyValue]) -> Self {
        Self {
            entries: key_values
                .iter()
                .map(|kv| (kv.key.clone(), kv.value.clone().unwrap_or_default()))
                .collect(),
        }
    }
}
