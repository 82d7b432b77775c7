//! Column encoder
//!
//! Turns the rows of one [`EpochSeries`](crate::app::models::EpochSeries)
//! into typed output columns. Every column is scanned in full before its
//! type is chosen:
//!
//! - any numeric value makes the column numeric; entries that are not
//!   numbers (text, absent) become the fill value `-999`
//! - a column with only text stays text, absent entries stay null and no
//!   fill value is recorded
//!
//! Numeric columns are always `Float64`, so a variable has the same type in
//! every container of every station.

pub mod attributes;
pub mod encoder;
pub mod inference;
pub mod table;

#[cfg(test)]
pub mod tests;

pub use attributes::{VariableAttributes, known_attributes};
pub use encoder::{EncodedValues, EncodedVariable, encode_column, encode_epoch};
pub use inference::{ElementType, infer_element_type};
pub use table::ColumnTable;
