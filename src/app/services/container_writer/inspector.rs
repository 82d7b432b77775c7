//! Reading containers back

use super::schema::ContainerAttributes;
use super::time_axis::decode_time;
use crate::constants::TIME_VARIABLE;
use crate::{Error, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float64Type, Int32Type};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDateTime;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Decoded contents of one container
#[derive(Debug, Clone)]
pub struct ContainerContents {
    pub path: PathBuf,
    pub attributes: ContainerAttributes,
    pub time: Vec<NaiveDateTime>,
    /// Variable names and their physical types, in column order
    pub variables: Vec<(String, DataType)>,
    pub batches: Vec<RecordBatch>,
}

impl ContainerContents {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    fn column_arrays(&self, name: &str) -> Vec<&dyn Array> {
        self.batches
            .iter()
            .filter_map(|batch| batch.column_by_name(name))
            .map(|array| array.as_ref())
            .collect()
    }

    /// Values of an `Int32` variable
    pub fn int32_values(&self, name: &str) -> Option<Vec<i32>> {
        let mut values = Vec::new();
        for array in self.column_arrays(name) {
            values.extend(array.as_primitive_opt::<Int32Type>()?.values().iter().copied());
        }
        Some(values)
    }

    /// Values of a `Float64` variable
    pub fn float64_values(&self, name: &str) -> Option<Vec<f64>> {
        let mut values = Vec::new();
        for array in self.column_arrays(name) {
            values.extend(array.as_primitive_opt::<Float64Type>()?.values().iter().copied());
        }
        Some(values)
    }

    /// Values of a text variable, `None` where null
    pub fn text_values(&self, name: &str) -> Option<Vec<Option<String>>> {
        let mut values = Vec::new();
        for array in self.column_arrays(name) {
            let strings = array.as_string_opt::<i32>()?;
            values.extend(strings.iter().map(|value| value.map(str::to_string)));
        }
        Some(values)
    }
}

/// Read a container: attributes, decoded time axis and all columns
pub fn read_container(path: &Path) -> Result<ContainerContents> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("Failed to open container {}", path.display()), e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let attributes = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .map(|kv| ContainerAttributes::from_key_values(kv))
        .unwrap_or_default();

    let variables: Vec<(String, DataType)> = builder
        .schema()
        .fields()
        .iter()
        .filter(|field| field.name() != TIME_VARIABLE)
        .map(|field| (field.name().clone(), field.data_type().clone()))
        .collect();

    let batches = builder
        .build()?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut time = Vec::new();
    for batch in &batches {
        let column = batch.column_by_name(TIME_VARIABLE).ok_or_else(|| {
            Error::data_validation(format!("Container {} has no time column", path.display()))
        })?;
        let minutes = column.as_primitive_opt::<Int32Type>().ok_or_else(|| {
            Error::data_validation(format!(
                "Time column of {} is not integer minutes",
                path.display()
            ))
        })?;
        time.extend(minutes.values().iter().map(|m| decode_time(*m)));
    }

    Ok(ContainerContents {
        path: path.to_path_buf(),
        attributes,
        time,
        variables,
        batches,
    })
}
