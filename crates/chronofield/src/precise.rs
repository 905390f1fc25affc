//! Precise fields: calendar fields whose step unit has a fixed length.
//!
//! When both the step and the range unit are precise, every operation
//! reduces to integer division and modulo of the instant, so `get`, `set`,
//! `add` and the roundings are all closed-form.

use std::sync::Arc;

use crate::arith::{safe_add, safe_multiply, safe_subtract, verify_value_bounds};
use crate::error::{FieldError, Result};
use crate::field::{CalendarField, FieldKind};
use crate::unit::DurationUnit;

/// A field stepped in a fixed-length unit and ranging over a larger
/// fixed-length unit, e.g. hour-of-day (stepped in hours, ranging over
/// days).
#[derive(Debug)]
pub struct PreciseField {
    kind: FieldKind,
    step: Arc<dyn DurationUnit>,
    range: Arc<dyn DurationUnit>,
    unit_millis: i64,
    range_count: i64,
}

impl PreciseField {
    /// Create a precise field from a step unit and a range unit.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidArgument`] when either unit is
    /// imprecise, the step is shorter than one millisecond, or the range
    /// holds fewer than two step units (a field with fewer than two
    /// representable values is degenerate).
    pub fn new(
        kind: FieldKind,
        step: Arc<dyn DurationUnit>,
        range: Arc<dyn DurationUnit>,
    ) -> Result<Arc<Self>> {
        if !step.is_precise() || !range.is_precise() {
            return Err(FieldError::InvalidArgument(format!(
                "{kind} requires precise step and range units"
            )));
        }
        let unit_millis = step.unit_millis();
        if unit_millis < 1 {
            return Err(FieldError::InvalidArgument(format!(
                "step unit for {kind} must be at least 1 millisecond"
            )));
        }
        let range_count = range.unit_millis() / unit_millis;
        if range_count < 2 {
            return Err(FieldError::InvalidArgument(format!(
                "range of {kind} must span at least 2 step units, got {range_count}"
            )));
        }
        if range_count - 1 > i32::MAX as i64 {
            return Err(FieldError::InvalidArgument(format!(
                "maximum value of {kind} does not fit a field value"
            )));
        }
        Ok(Arc::new(Self { kind, step, range, unit_millis, range_count }))
    }
}

impl CalendarField for PreciseField {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn step_unit(&self) -> Arc<dyn DurationUnit> {
        self.step.clone()
    }

    fn range_unit(&self) -> Option<Arc<dyn DurationUnit>> {
        Some(self.range.clone())
    }

    fn get(&self, instant: i64) -> Result<i32> {
        let value = if instant >= 0 {
            (instant / self.unit_millis) % self.range_count
        } else {
            self.range_count - 1 + (((instant + 1) / self.unit_millis) % self.range_count)
        };
        Ok(value as i32)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(self.kind, value, 0, (self.range_count - 1) as i32)?;
        let current = self.get(instant)? as i64;
        safe_add(instant, safe_multiply(value as i64 - current, self.unit_millis)?)
    }

    fn add(&self, instant: i64, delta: i64) -> Result<i64> {
        safe_add(instant, safe_multiply(delta, self.unit_millis)?)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        if instant >= 0 {
            Ok(instant - instant % self.unit_millis)
        } else {
            let shifted = instant + 1;
            safe_subtract(shifted - shifted % self.unit_millis, self.unit_millis)
        }
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        if instant > 0 {
            let shifted = instant - 1;
            safe_add(shifted - shifted % self.unit_millis, self.unit_millis)
        } else {
            Ok(instant - instant % self.unit_millis)
        }
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        if instant >= 0 {
            Ok(instant % self.unit_millis)
        } else {
            Ok((instant + 1) % self.unit_millis + self.unit_millis - 1)
        }
    }

    fn minimum(&self) -> Result<i32> {
        Ok(0)
    }

    fn maximum(&self) -> Result<i32> {
        Ok((self.range_count - 1) as i32)
    }
}
