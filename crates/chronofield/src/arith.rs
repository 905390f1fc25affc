//! Overflow-checked arithmetic and value-range helpers.
//!
//! Every arithmetic step in the engine that could leave the `i64` (or `i32`)
//! domain goes through these functions, so overflow surfaces as a
//! [`FieldError::Overflow`] at the failing operation instead of wrapping
//! silently. [`wrapped_value`] is the canonical "wrap into [min,max]"
//! formula used by `add_wrapped` everywhere.

use crate::error::{FieldError, Result};
use crate::field::FieldKind;

/// Add two instants/durations, failing on `i64` overflow.
pub fn safe_add(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b)
        .ok_or_else(|| FieldError::Overflow(format!("{a} + {b} exceeds the i64 range")))
}

/// Subtract `b` from `a`, failing on `i64` overflow.
pub fn safe_subtract(a: i64, b: i64) -> Result<i64> {
    a.checked_sub(b)
        .ok_or_else(|| FieldError::Overflow(format!("{a} - {b} exceeds the i64 range")))
}

/// Multiply two counts, failing on `i64` overflow.
pub fn safe_multiply(a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b)
        .ok_or_else(|| FieldError::Overflow(format!("{a} * {b} exceeds the i64 range")))
}

/// Narrow an `i64` to `i32`, failing if the value does not fit.
pub fn safe_to_i32(value: i64) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| FieldError::Overflow(format!("{value} exceeds the i32 range")))
}

/// Verify that `value` lies in `[min, max]` for the given field.
///
/// # Errors
///
/// Returns [`FieldError::ValueOutOfRange`] when the value is outside the
/// range.
pub fn verify_value_bounds(field: FieldKind, value: i32, min: i32, max: i32) -> Result<()> {
    if value < min || value > max {
        return Err(FieldError::ValueOutOfRange {
            field,
            value: value as i64,
            min: min as i64,
            max: max as i64,
        });
    }
    Ok(())
}

/// Wrap `value` into the inclusive range `[min, max]`.
///
/// The result is periodic with period `max - min + 1` and equals `value`
/// whenever `value` is already in range.
///
/// # Errors
///
/// Returns [`FieldError::InvalidArgument`] when `min >= max`, since a
/// single-value range has no meaningful wrap, and [`FieldError::Overflow`]
/// when shifting `value` against `min` leaves the `i64` domain.
pub fn wrapped_value(value: i64, min: i32, max: i32) -> Result<i32> {
    if min >= max {
        return Err(FieldError::InvalidArgument(format!(
            "cannot wrap into [{min},{max}]: min must be less than max"
        )));
    }
    let range = (max as i64) - (min as i64) + 1;
    let shifted = safe_subtract(value, min as i64)?;
    let wrapped = shifted.rem_euclid(range) + min as i64;
    // In-range by construction: [min, max] fits i32.
    Ok(wrapped as i32)
}
