//! Composable field wrappers.
//!
//! Each decorator wraps exactly one underlying field, overrides a minimal
//! subset of the [`CalendarField`] contract, and delegates the rest
//! unchanged. Composition nests `Arc`-held wrappers; the set of decorators
//! is closed:
//!
//! - [`OffsetField`] — shift every value by a fixed non-zero amount
//! - [`SkipField`] — remove one forbidden value (e.g. no year zero)
//! - [`ZeroIsMaxField`] — display a raw 0 as the maximum-plus-one
//! - [`LenientField`] / [`StrictField`] — toggle bounds checking on `set`

use std::sync::Arc;

use crate::arith::{safe_to_i32, verify_value_bounds};
use crate::error::{FieldError, Result};
use crate::field::{CalendarField, FieldKind};
use crate::partial::Partial;
use crate::unit::DurationUnit;

/// Generates delegation methods for the operations a decorator leaves
/// untouched.
macro_rules! forward_field {
    ($inner:ident: $($method:ident),+ $(,)?) => {
        $(forward_field!(@ $inner $method);)+
    };
    (@ $inner:ident kind) => {
        fn kind(&self) -> FieldKind { self.$inner.kind() }
    };
    (@ $inner:ident get) => {
        fn get(&self, instant: i64) -> Result<i32> { self.$inner.get(instant) }
    };
    (@ $inner:ident set) => {
        fn set(&self, instant: i64, value: i32) -> Result<i64> { self.$inner.set(instant, value) }
    };
    (@ $inner:ident add) => {
        fn add(&self, instant: i64, delta: i64) -> Result<i64> { self.$inner.add(instant, delta) }
    };
    (@ $inner:ident add_wrapped) => {
        fn add_wrapped(&self, instant: i64, delta: i64) -> Result<i64> {
            self.$inner.add_wrapped(instant, delta)
        }
    };
    (@ $inner:ident difference) => {
        fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
            self.$inner.difference(minuend, subtrahend)
        }
    };
    (@ $inner:ident round_floor) => {
        fn round_floor(&self, instant: i64) -> Result<i64> { self.$inner.round_floor(instant) }
    };
    (@ $inner:ident round_ceiling) => {
        fn round_ceiling(&self, instant: i64) -> Result<i64> { self.$inner.round_ceiling(instant) }
    };
    (@ $inner:ident round_half_floor) => {
        fn round_half_floor(&self, instant: i64) -> Result<i64> {
            self.$inner.round_half_floor(instant)
        }
    };
    (@ $inner:ident round_half_ceiling) => {
        fn round_half_ceiling(&self, instant: i64) -> Result<i64> {
            self.$inner.round_half_ceiling(instant)
        }
    };
    (@ $inner:ident round_half_even) => {
        fn round_half_even(&self, instant: i64) -> Result<i64> {
            self.$inner.round_half_even(instant)
        }
    };
    (@ $inner:ident remainder) => {
        fn remainder(&self, instant: i64) -> Result<i64> { self.$inner.remainder(instant) }
    };
    (@ $inner:ident is_leap) => {
        fn is_leap(&self, instant: i64) -> Result<bool> { self.$inner.is_leap(instant) }
    };
    (@ $inner:ident leap_amount) => {
        fn leap_amount(&self, instant: i64) -> Result<i32> { self.$inner.leap_amount(instant) }
    };
    (@ $inner:ident leap_unit) => {
        fn leap_unit(&self) -> Option<Arc<dyn DurationUnit>> { self.$inner.leap_unit() }
    };
    (@ $inner:ident step_unit) => {
        fn step_unit(&self) -> Arc<dyn DurationUnit> { self.$inner.step_unit() }
    };
    (@ $inner:ident range_unit) => {
        fn range_unit(&self) -> Option<Arc<dyn DurationUnit>> { self.$inner.range_unit() }
    };
    (@ $inner:ident minimum) => {
        fn minimum(&self) -> Result<i32> { self.$inner.minimum() }
    };
    (@ $inner:ident maximum) => {
        fn maximum(&self) -> Result<i32> { self.$inner.maximum() }
    };
    (@ $inner:ident minimum_at) => {
        fn minimum_at(&self, instant: i64) -> Result<i32> { self.$inner.minimum_at(instant) }
    };
    (@ $inner:ident maximum_at) => {
        fn maximum_at(&self, instant: i64) -> Result<i32> { self.$inner.maximum_at(instant) }
    };
    (@ $inner:ident minimum_in) => {
        fn minimum_in(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
            self.$inner.minimum_in(partial, values)
        }
    };
    (@ $inner:ident maximum_in) => {
        fn maximum_in(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
            self.$inner.maximum_in(partial, values)
        }
    };
}

// ── Offset ──────────────────────────────────────────────────────────────────

/// Adds a fixed integer to every value of the wrapped field.
#[derive(Debug)]
pub struct OffsetField {
    field: Arc<dyn CalendarField>,
    kind: FieldKind,
    offset: i32,
    min: i32,
    max: i32,
}

impl OffsetField {
    /// Wrap `field` so every value is shifted by `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidArgument`] when the offset is zero.
    pub fn new(field: Arc<dyn CalendarField>, kind: FieldKind, offset: i32) -> Result<Arc<Self>> {
        Self::with_bounds(field, kind, offset, i32::MIN, i32::MAX)
    }

    /// Like [`new`](OffsetField::new), but the usable range is the
    /// intersection of the shifted wrapped range and `[min_bound,
    /// max_bound]`.
    pub fn with_bounds(
        field: Arc<dyn CalendarField>,
        kind: FieldKind,
        offset: i32,
        min_bound: i32,
        max_bound: i32,
    ) -> Result<Arc<Self>> {
        if offset == 0 {
            return Err(FieldError::InvalidArgument(format!(
                "offset for {kind} must not be zero"
            )));
        }
        let shifted_min = safe_to_i32(field.minimum()? as i64 + offset as i64)?;
        let shifted_max = safe_to_i32(field.maximum()? as i64 + offset as i64)?;
        Ok(Arc::new(Self {
            field,
            kind,
            offset,
            min: shifted_min.max(min_bound),
            max: shifted_max.min(max_bound),
        }))
    }
}

impl CalendarField for OffsetField {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn inner(&self) -> Option<Arc<dyn CalendarField>> {
        Some(self.field.clone())
    }

    fn get(&self, instant: i64) -> Result<i32> {
        safe_to_i32(self.field.get(instant)? as i64 + self.offset as i64)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(self.kind, value, self.min, self.max)?;
        self.field
            .set(instant, safe_to_i32(value as i64 - self.offset as i64)?)
    }

    fn add(&self, instant: i64, delta: i64) -> Result<i64> {
        let instant = self.field.add(instant, delta)?;
        verify_value_bounds(self.kind, self.get(instant)?, self.min, self.max)?;
        Ok(instant)
    }

    fn minimum(&self) -> Result<i32> {
        Ok(self.min)
    }

    fn maximum(&self) -> Result<i32> {
        Ok(self.max)
    }

    forward_field!(field: step_unit, range_unit, difference, round_floor, round_ceiling,
        round_half_floor, round_half_ceiling, round_half_even, remainder, is_leap,
        leap_amount, leap_unit);
}

// ── Skip ────────────────────────────────────────────────────────────────────

/// Removes one forbidden value from the wrapped field's sequence, e.g. a
/// chronology with no year zero.
#[derive(Debug)]
pub struct SkipField {
    field: Arc<dyn CalendarField>,
    skip: i32,
    min: i32,
}

impl SkipField {
    /// Wrap `field` so that `skip` never appears as a value.
    ///
    /// Values below the skipped one shift down by one; the minimum is
    /// adjusted for the removed value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidArgument`] when `skip` lies outside the
    /// wrapped field's range.
    pub fn new(field: Arc<dyn CalendarField>, skip: i32) -> Result<Arc<Self>> {
        let wrapped_min = field.minimum()?;
        let wrapped_max = field.maximum()?;
        if skip < wrapped_min || skip > wrapped_max {
            return Err(FieldError::InvalidArgument(format!(
                "skipped value {skip} is outside the range of {} [{wrapped_min},{wrapped_max}]",
                field.kind()
            )));
        }
        let min = if wrapped_min <= skip { wrapped_min - 1 } else { wrapped_min };
        Ok(Arc::new(Self { field, skip, min }))
    }
}

impl CalendarField for SkipField {
    fn inner(&self) -> Option<Arc<dyn CalendarField>> {
        Some(self.field.clone())
    }

    fn get(&self, instant: i64) -> Result<i32> {
        let value = self.field.get(instant)?;
        Ok(if value <= self.skip { value - 1 } else { value })
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(self.field.kind(), value, self.min, self.field.maximum()?)?;
        let raw = if value <= self.skip {
            if value == self.skip {
                return Err(FieldError::InvalidArgument(format!(
                    "value {value} is skipped for {}",
                    self.field.kind()
                )));
            }
            value + 1
        } else {
            value
        };
        self.field.set(instant, raw)
    }

    fn minimum(&self) -> Result<i32> {
        Ok(self.min)
    }

    forward_field!(field: kind, add, add_wrapped, difference, round_floor, round_ceiling,
        round_half_floor, round_half_ceiling, round_half_even, remainder, is_leap,
        leap_amount, leap_unit, step_unit, range_unit, maximum);
}

// ── Zero is max ─────────────────────────────────────────────────────────────

/// Remaps a raw value of 0 to the wrapped maximum plus one, e.g. midnight
/// displayed as hour 24 of a clockhour field.
#[derive(Debug)]
pub struct ZeroIsMaxField {
    field: Arc<dyn CalendarField>,
    kind: FieldKind,
}

impl ZeroIsMaxField {
    /// Wrap `field`, whose minimum must be 0.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidArgument`] when the wrapped minimum is
    /// not zero.
    pub fn new(field: Arc<dyn CalendarField>, kind: FieldKind) -> Result<Arc<Self>> {
        if field.minimum()? != 0 {
            return Err(FieldError::InvalidArgument(format!(
                "wrapped field of {kind} must have a minimum of zero"
            )));
        }
        Ok(Arc::new(Self { field, kind }))
    }
}

impl CalendarField for ZeroIsMaxField {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn inner(&self) -> Option<Arc<dyn CalendarField>> {
        Some(self.field.clone())
    }

    fn get(&self, instant: i64) -> Result<i32> {
        let value = self.field.get(instant)?;
        if value == 0 {
            self.maximum()
        } else {
            Ok(value)
        }
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let max = self.maximum()?;
        verify_value_bounds(self.kind, value, 1, max)?;
        let raw = if value == max { 0 } else { value };
        self.field.set(instant, raw)
    }

    fn minimum(&self) -> Result<i32> {
        Ok(1)
    }

    fn maximum(&self) -> Result<i32> {
        safe_to_i32(self.field.maximum()? as i64 + 1)
    }

    fn maximum_at(&self, instant: i64) -> Result<i32> {
        safe_to_i32(self.field.maximum_at(instant)? as i64 + 1)
    }

    fn maximum_in(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
        safe_to_i32(self.field.maximum_in(partial, values)? as i64 + 1)
    }

    forward_field!(field: add, difference, round_floor, round_ceiling, round_half_floor,
        round_half_ceiling, round_half_even, remainder, is_leap, leap_amount, leap_unit,
        step_unit, range_unit);
}

// ── Lenient / strict ────────────────────────────────────────────────────────

/// Makes `set` lenient: an out-of-range value is applied as the minimum
/// plus a carried `add` of the residual instead of failing.
#[derive(Debug)]
pub struct LenientField {
    field: Arc<dyn CalendarField>,
}

impl LenientField {
    /// Wrap `field` with lenient `set`. Wrapping an already-lenient field
    /// returns the same instance.
    pub fn wrap(field: Arc<dyn CalendarField>) -> Arc<dyn CalendarField> {
        if field.is_lenient() {
            return field;
        }
        Arc::new(Self { field })
    }
}

impl CalendarField for LenientField {
    fn is_lenient(&self) -> bool {
        true
    }

    fn inner(&self) -> Option<Arc<dyn CalendarField>> {
        Some(self.field.clone())
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let min = self.field.minimum_at(instant)?;
        let base = self.field.set(instant, min)?;
        self.field.add(base, value as i64 - min as i64)
    }

    forward_field!(field: kind, get, add, add_wrapped, difference, round_floor,
        round_ceiling, round_half_floor, round_half_ceiling, round_half_even, remainder,
        is_leap, leap_amount, leap_unit, step_unit, range_unit, minimum, maximum,
        minimum_at, maximum_at, minimum_in, maximum_in);
}

/// Restores strict bounds checking on `set` for a lenient field.
#[derive(Debug)]
pub struct StrictField {
    field: Arc<dyn CalendarField>,
}

impl StrictField {
    /// Return a field whose `set` is strict. A field that is already
    /// strict is returned unchanged; a [`LenientField`] wrapper is peeled
    /// off to expose the strict field underneath.
    pub fn wrap(field: Arc<dyn CalendarField>) -> Arc<dyn CalendarField> {
        if !field.is_lenient() {
            return field;
        }
        match field.inner() {
            Some(inner) => inner,
            None => Arc::new(Self { field }),
        }
    }
}

impl CalendarField for StrictField {
    fn inner(&self) -> Option<Arc<dyn CalendarField>> {
        Some(self.field.clone())
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(
            self.kind(),
            value,
            self.minimum_at(instant)?,
            self.maximum_at(instant)?,
        )?;
        self.field.set(instant, value)
    }

    forward_field!(field: kind, get, add, add_wrapped, difference, round_floor,
        round_ceiling, round_half_floor, round_half_ceiling, round_half_even, remainder,
        is_leap, leap_amount, leap_unit, step_unit, range_unit, minimum, maximum,
        minimum_at, maximum_at, minimum_in, maximum_in);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precise::PreciseField;
    use crate::testcal::year_field;
    use crate::unit::{PreciseUnit, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE};

    fn hour_of_day() -> Arc<dyn CalendarField> {
        PreciseField::new(FieldKind::HourOfDay, PreciseUnit::hours(), PreciseUnit::days()).unwrap()
    }

    fn minute_of_hour() -> Arc<dyn CalendarField> {
        PreciseField::new(
            FieldKind::MinuteOfHour,
            PreciseUnit::minutes(),
            PreciseUnit::hours(),
        )
        .unwrap()
    }

    // ── Offset ──────────────────────────────────────────────────────────

    #[test]
    fn test_offset_shifts_get_and_set() {
        let field =
            OffsetField::new(minute_of_hour(), FieldKind::MinuteOfHour, 1).unwrap();
        assert_eq!(field.get(0).unwrap(), 1);
        assert_eq!(field.minimum().unwrap(), 1);
        assert_eq!(field.maximum().unwrap(), 60);
        let set = field.set(0, 60).unwrap();
        assert_eq!(field.get(set).unwrap(), 60);
        assert_eq!(set, 59 * MILLIS_PER_MINUTE);
    }

    #[test]
    fn test_offset_rejects_zero() {
        let result = OffsetField::new(minute_of_hour(), FieldKind::MinuteOfHour, 0);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("must not be zero"), "got: {err}");
    }

    #[test]
    fn test_offset_caller_bounds_intersect() {
        let field = OffsetField::with_bounds(
            minute_of_hour(),
            FieldKind::MinuteOfHour,
            1,
            5,
            100,
        )
        .unwrap();
        // [1,60] shifted range intersected with [5,100].
        assert_eq!(field.minimum().unwrap(), 5);
        assert_eq!(field.maximum().unwrap(), 60);
        assert!(field.set(0, 3).is_err());
    }

    #[test]
    fn test_offset_set_out_of_range() {
        let field =
            OffsetField::new(minute_of_hour(), FieldKind::MinuteOfHour, 1).unwrap();
        assert!(field.set(0, 0).is_err());
        assert!(field.set(0, 61).is_err());
    }

    // ── Skip ────────────────────────────────────────────────────────────

    #[test]
    fn test_skip_shifts_values_below_skip() {
        let field = SkipField::new(year_field(), 0).unwrap();
        // Wrapped year 0 is visible as -1; year 1 is unchanged.
        let year1 = 365 * MILLIS_PER_DAY;
        assert_eq!(field.get(0).unwrap(), -1);
        assert_eq!(field.get(year1).unwrap(), 1);
        // Setting -1 reaches wrapped year 0.
        let set = field.set(year1, -1).unwrap();
        assert_eq!(set, 0);
    }

    #[test]
    fn test_skip_rejects_the_skipped_value() {
        let field = SkipField::new(year_field(), 0).unwrap();
        let result = field.set(0, 0);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("skipped"), "got: {err}");
    }

    #[test]
    fn test_skip_adjusts_minimum() {
        let field = SkipField::new(year_field(), 0).unwrap();
        assert_eq!(field.minimum().unwrap(), -10000);
        assert_eq!(field.maximum().unwrap(), 9999);
    }

    #[test]
    fn test_skip_outside_range_rejected() {
        assert!(SkipField::new(hour_of_day(), 99).is_err());
    }

    // ── Zero is max ─────────────────────────────────────────────────────

    #[test]
    fn test_zero_is_max_get() {
        let field = ZeroIsMaxField::new(hour_of_day(), FieldKind::ClockhourOfDay).unwrap();
        assert_eq!(field.get(0).unwrap(), 24);
        assert_eq!(field.get(5 * MILLIS_PER_HOUR).unwrap(), 5);
        assert_eq!(field.minimum().unwrap(), 1);
        assert_eq!(field.maximum().unwrap(), 24);
    }

    #[test]
    fn test_zero_is_max_set_converts_max_back_to_zero() {
        let field = ZeroIsMaxField::new(hour_of_day(), FieldKind::ClockhourOfDay).unwrap();
        let noon = 12 * MILLIS_PER_HOUR;
        let set = field.set(noon, 24).unwrap();
        assert_eq!(set, 0);
        assert!(field.set(noon, 0).is_err());
        assert!(field.set(noon, 25).is_err());
    }

    #[test]
    fn test_zero_is_max_add_wrapped_uses_visible_range() {
        let field = ZeroIsMaxField::new(hour_of_day(), FieldKind::ClockhourOfDay).unwrap();
        // 23 + 2 wraps within [1,24]: 23 -> 24 -> 1.
        let at_23 = 23 * MILLIS_PER_HOUR;
        let wrapped = field.add_wrapped(at_23, 2).unwrap();
        assert_eq!(field.get(wrapped).unwrap(), 1);
    }

    #[test]
    fn test_zero_is_max_requires_zero_minimum() {
        let clockhour =
            ZeroIsMaxField::new(hour_of_day(), FieldKind::ClockhourOfDay).unwrap();
        let result = ZeroIsMaxField::new(clockhour, FieldKind::ClockhourOfDay);
        assert!(result.is_err());
    }

    // ── Lenient / strict ────────────────────────────────────────────────

    #[test]
    fn test_lenient_set_carries_out_of_range() {
        let field = LenientField::wrap(hour_of_day());
        // Hour 26 carries into the next day as hour 2.
        let set = field.set(0, 26).unwrap();
        assert_eq!(set, MILLIS_PER_DAY + 2 * MILLIS_PER_HOUR);
        // Hour -1 borrows from the previous day.
        let set = field.set(0, -1).unwrap();
        assert_eq!(set, -MILLIS_PER_HOUR);
    }

    #[test]
    fn test_lenient_set_in_range_matches_strict() {
        let plain = hour_of_day();
        let lenient = LenientField::wrap(plain.clone());
        let instant = 3 * MILLIS_PER_DAY + 9 * MILLIS_PER_HOUR + 17;
        for value in [0, 5, 23] {
            assert_eq!(
                lenient.set(instant, value).unwrap(),
                plain.set(instant, value).unwrap()
            );
        }
    }

    #[test]
    fn test_lenient_of_lenient_is_noop() {
        let lenient = LenientField::wrap(hour_of_day());
        let again = LenientField::wrap(lenient.clone());
        assert!(Arc::ptr_eq(&lenient, &again));
    }

    #[test]
    fn test_strict_of_strict_is_noop() {
        let plain = hour_of_day();
        let strict = StrictField::wrap(plain.clone());
        assert!(Arc::ptr_eq(&plain, &strict));
    }

    #[test]
    fn test_strict_peels_lenient_wrapper() {
        let plain = hour_of_day();
        let lenient = LenientField::wrap(plain.clone());
        let strict = StrictField::wrap(lenient);
        assert!(Arc::ptr_eq(&plain, &strict));
        assert!(strict.set(0, 26).is_err());
    }
}
