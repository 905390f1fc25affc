//! Imprecise fields: calendar fields whose step length varies with position
//! (months, years).
//!
//! A calendar-system builder supplies the positional arithmetic through
//! [`ImpreciseOps`]; [`ImpreciseField`] wraps it into the full
//! [`CalendarField`] contract and exposes a synthetic [`ImpreciseUnit`]
//! that routes length and difference queries back through the supplied
//! `add`, so callers can still treat "a month" as a duration unit.

use std::fmt;
use std::sync::Arc;

use crate::arith::{safe_add, safe_multiply, safe_subtract, verify_value_bounds};
use crate::error::{FieldError, Result};
use crate::field::{CalendarField, FieldKind};
use crate::partial::Partial;
use crate::unit::{DurationUnit, UnitKind};

// ── Builder-supplied operations ─────────────────────────────────────────────

/// The positional arithmetic a calendar-system builder supplies for a field
/// whose unit length is irregular.
///
/// Bounds and leap hooks default to context-free behavior; override them
/// when the field's range depends on the instant or on sibling values.
pub trait ImpreciseOps: fmt::Debug + Send + Sync {
    /// The field value at `instant`.
    fn get(&self, instant: i64) -> i32;

    /// A new instant with the field set to `value`; the value has already
    /// been bounds-checked against the per-instant range.
    fn set(&self, instant: i64, value: i32) -> Result<i64>;

    /// A new instant advanced by `delta` steps, carrying into larger
    /// fields.
    fn add(&self, instant: i64, delta: i64) -> Result<i64>;

    /// The largest instant at or before `instant` on a step boundary.
    fn round_floor(&self, instant: i64) -> Result<i64>;

    /// Context-free minimum value.
    fn minimum(&self) -> i32;

    /// Context-free maximum value.
    fn maximum(&self) -> i32;

    /// Per-instant minimum, defaults to the context-free minimum.
    fn minimum_at(&self, _instant: i64) -> i32 {
        self.minimum()
    }

    /// Per-instant maximum, defaults to the context-free maximum.
    fn maximum_at(&self, _instant: i64) -> i32 {
        self.maximum()
    }

    /// Minimum given sibling values of a partial.
    fn minimum_in(&self, _partial: &Partial, _values: &[i32]) -> i32 {
        self.minimum()
    }

    /// Maximum given sibling values of a partial.
    fn maximum_in(&self, _partial: &Partial, _values: &[i32]) -> i32 {
        self.maximum()
    }

    /// The range unit of the field, absent for the largest field.
    fn range_unit(&self) -> Option<Arc<dyn DurationUnit>>;

    /// Whether the step containing `instant` is irregularly lengthened.
    fn is_leap(&self, _instant: i64) -> bool {
        false
    }

    /// The size of the leap adjustment at `instant`.
    fn leap_amount(&self, _instant: i64) -> i32 {
        0
    }

    /// The unit the leap adjustment is expressed in.
    fn leap_unit(&self) -> Option<Arc<dyn DurationUnit>> {
        None
    }
}

// ── Imprecise field ─────────────────────────────────────────────────────────

/// A field whose step unit has no fixed length, built from
/// builder-supplied [`ImpreciseOps`].
#[derive(Debug)]
pub struct ImpreciseField {
    kind: FieldKind,
    unit: Arc<ImpreciseUnit>,
    ops: Arc<dyn ImpreciseOps>,
}

impl ImpreciseField {
    /// Create an imprecise field.
    ///
    /// `nominal_unit_millis` is the average length of one step, used for
    /// difference guesses and unit ordering.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidArgument`] when the nominal length is
    /// less than one millisecond.
    pub fn new(
        kind: FieldKind,
        unit_kind: UnitKind,
        nominal_unit_millis: i64,
        ops: Arc<dyn ImpreciseOps>,
    ) -> Result<Arc<Self>> {
        if nominal_unit_millis < 1 {
            return Err(FieldError::InvalidArgument(format!(
                "nominal unit length for {kind} must be at least 1 millisecond"
            )));
        }
        let unit = Arc::new(ImpreciseUnit {
            kind: unit_kind,
            nominal_unit_millis,
            ops: ops.clone(),
        });
        Ok(Arc::new(Self { kind, unit, ops }))
    }
}

impl CalendarField for ImpreciseField {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn step_unit(&self) -> Arc<dyn DurationUnit> {
        self.unit.clone()
    }

    fn range_unit(&self) -> Option<Arc<dyn DurationUnit>> {
        self.ops.range_unit()
    }

    fn get(&self, instant: i64) -> Result<i32> {
        Ok(self.ops.get(instant))
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(
            self.kind,
            value,
            self.ops.minimum_at(instant),
            self.ops.maximum_at(instant),
        )?;
        self.ops.set(instant, value)
    }

    fn add(&self, instant: i64, delta: i64) -> Result<i64> {
        self.ops.add(instant, delta)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.ops.round_floor(instant)
    }

    fn is_leap(&self, instant: i64) -> Result<bool> {
        Ok(self.ops.is_leap(instant))
    }

    fn leap_amount(&self, instant: i64) -> Result<i32> {
        Ok(self.ops.leap_amount(instant))
    }

    fn leap_unit(&self) -> Option<Arc<dyn DurationUnit>> {
        self.ops.leap_unit()
    }

    fn minimum(&self) -> Result<i32> {
        Ok(self.ops.minimum())
    }

    fn maximum(&self) -> Result<i32> {
        Ok(self.ops.maximum())
    }

    fn minimum_at(&self, instant: i64) -> Result<i32> {
        Ok(self.ops.minimum_at(instant))
    }

    fn maximum_at(&self, instant: i64) -> Result<i32> {
        Ok(self.ops.maximum_at(instant))
    }

    fn minimum_in(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
        Ok(self.ops.minimum_in(partial, values))
    }

    fn maximum_in(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
        Ok(self.ops.maximum_in(partial, values))
    }
}

// ── Synthetic duration unit ─────────────────────────────────────────────────

/// The step unit of an [`ImpreciseField`]: reports a nominal length and
/// answers exact queries by delegating to the field's own arithmetic.
pub struct ImpreciseUnit {
    kind: UnitKind,
    nominal_unit_millis: i64,
    ops: Arc<dyn ImpreciseOps>,
}

impl fmt::Debug for ImpreciseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImpreciseUnit")
            .field("kind", &self.kind)
            .field("nominal_unit_millis", &self.nominal_unit_millis)
            .finish()
    }
}

impl DurationUnit for ImpreciseUnit {
    fn kind(&self) -> UnitKind {
        self.kind
    }

    fn is_precise(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        self.nominal_unit_millis
    }

    fn unit_millis_at(&self, instant: i64) -> Result<i64> {
        safe_subtract(self.ops.add(instant, 1)?, instant)
    }

    fn to_units(&self, millis: i64) -> Result<i64> {
        // Nominal estimate; use `to_units_at` for an exact count.
        Ok(millis / self.nominal_unit_millis)
    }

    fn to_units_at(&self, millis: i64, instant: i64) -> Result<i64> {
        self.difference(safe_add(instant, millis)?, instant)
    }

    fn from_units(&self, count: i64) -> Result<i64> {
        safe_multiply(count, self.nominal_unit_millis)
    }

    fn from_units_at(&self, count: i64, instant: i64) -> Result<i64> {
        safe_subtract(self.ops.add(instant, count)?, instant)
    }

    fn add_to(&self, instant: i64, count: i64) -> Result<i64> {
        self.ops.add(instant, count)
    }

    /// Guess from the nominal length, then nudge until `add` brackets the
    /// minuend. Each step moves the guess strictly closer, so the loop
    /// terminates even for irregular unit lengths.
    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        if minuend < subtrahend {
            return Ok(-self.difference(subtrahend, minuend)?);
        }
        let mut difference = safe_subtract(minuend, subtrahend)? / self.nominal_unit_millis;
        if self.ops.add(subtrahend, difference)? < minuend {
            loop {
                difference += 1;
                if self.ops.add(subtrahend, difference)? > minuend {
                    break;
                }
            }
            difference -= 1;
        } else if self.ops.add(subtrahend, difference)? > minuend {
            loop {
                difference -= 1;
                if self.ops.add(subtrahend, difference)? <= minuend {
                    break;
                }
            }
        }
        Ok(difference)
    }
}
