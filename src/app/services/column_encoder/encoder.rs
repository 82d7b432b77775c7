//! Encoding columns into typed, fill-resolved variables

use super::attributes::{VariableAttributes, known_attributes};
use super::inference::{ElementType, infer_element_type};
use super::table::ColumnTable;
use crate::app::models::{EpochSeries, FieldValue};
use crate::config::Provider;
use crate::constants::{FILL_VALUE_F64, RESERVED_VARIABLES};
use tracing::debug;

/// Values of an encoded column
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedValues {
    Float64(Vec<f64>),
    Text(Vec<Option<String>>),
}

impl EncodedValues {
    pub fn len(&self) -> usize {
        match self {
            EncodedValues::Float64(values) => values.len(),
            EncodedValues::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One output column, aligned to its epoch's time axis
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedVariable {
    pub name: String,
    pub element_type: ElementType,
    /// Fill value of numeric columns; text columns have none
    pub fill_value: Option<f64>,
    pub values: EncodedValues,
    pub attributes: Option<VariableAttributes>,
}

/// Encode one column from all of its values
pub fn encode_column(name: &str, values: &[Option<FieldValue>]) -> EncodedVariable {
    let element_type = infer_element_type(values);
    let number = |value: &Option<FieldValue>| value.as_ref().and_then(FieldValue::as_number);

    let (fill_value, encoded) = match element_type {
        ElementType::Float64 => (
            Some(FILL_VALUE_F64),
            EncodedValues::Float64(
                values
                    .iter()
                    .map(|value| number(value).unwrap_or(FILL_VALUE_F64))
                    .collect(),
            ),
        ),
        ElementType::Text => (
            None,
            EncodedValues::Text(
                values
                    .iter()
                    .map(|value| value.as_ref().map(FieldValue::to_string))
                    .collect(),
            ),
        ),
    };

    EncodedVariable {
        name: name.to_string(),
        element_type,
        fill_value,
        values: encoded,
        attributes: known_attributes(name),
    }
}

/// Encode every variable of an epoch series
///
/// Time, the location scalars and the provider's identity and timestamp
/// columns are never encoded. Variables come out sorted by name.
pub fn encode_epoch(series: &EpochSeries, provider: Provider) -> Vec<EncodedVariable> {
    let excluded: Vec<&str> = RESERVED_VARIABLES
        .iter()
        .chain(provider.reserved_columns())
        .copied()
        .collect();

    let table = ColumnTable::from_epoch_series(series, &excluded);
    let variables: Vec<EncodedVariable> = table
        .columns
        .iter()
        .map(|(name, values)| encode_column(name, values))
        .collect();

    debug!(
        "Encoded {} variables over {} time steps",
        variables.len(),
        table.len()
    );
    variables
}
