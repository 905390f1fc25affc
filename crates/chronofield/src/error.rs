//! Error types for chronofield operations.

use thiserror::Error;

use crate::field::FieldKind;
use crate::unit::UnitKind;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Value {value} for {field} must be in the range [{min},{max}]")]
    ValueOutOfRange {
        field: FieldKind,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Field {0} is not supported")]
    UnsupportedField(FieldKind),

    #[error("Duration unit {0} is not supported")]
    UnsupportedUnit(UnitKind),
}

pub type Result<T> = std::result::Result<T, FieldError>;
