//! Full-column element type inference

use crate::app::models::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type of an output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementType {
    Float64,
    Text,
}

impl ElementType {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ElementType::Text)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Float64 => "float64",
            ElementType::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// Choose the element type of a column from all of its values
///
/// Numeric columns are always `Float64`, whatever the values of a given
/// epoch, so a variable keeps one type across every container.
pub fn infer_element_type(values: &[Option<FieldValue>]) -> ElementType {
    if values.iter().flatten().any(|value| value.as_number().is_some()) {
        ElementType::Float64
    } else {
        ElementType::Text
    }
}
