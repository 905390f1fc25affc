//! Calendar fields: named calendar quantities bound to a step duration unit
//! and an optional range duration unit.
//!
//! [`CalendarField`] is the engine's central abstraction. A field reads a
//! value out of an instant (`get`), writes one back (`set`), performs
//! carrying arithmetic (`add`), wrapping arithmetic (`add_wrapped`), rounds
//! instants to unit boundaries, and measures whole-step differences. Most
//! of the operation set has default implementations expressed in terms of a
//! small required core, so concrete fields and decorators override only
//! what they must.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::arith::{safe_add, safe_subtract, wrapped_value};
use crate::error::Result;
use crate::partial::Partial;
use crate::unit::DurationUnit;

// ── Field type tags ─────────────────────────────────────────────────────────

/// Identifies a kind of calendar field, independent of any concrete
/// implementation or calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    Era,
    YearOfEra,
    CenturyOfEra,
    YearOfCentury,
    Year,
    DayOfYear,
    MonthOfYear,
    DayOfMonth,
    Weekyear,
    WeekOfWeekyear,
    DayOfWeek,
    HalfdayOfDay,
    HourOfHalfday,
    ClockhourOfHalfday,
    ClockhourOfDay,
    HourOfDay,
    MinuteOfDay,
    MinuteOfHour,
    SecondOfDay,
    SecondOfMinute,
    MillisOfDay,
    MillisOfSecond,
}

impl FieldKind {
    /// The conventional camel-case name of this field kind.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Era => "era",
            FieldKind::YearOfEra => "yearOfEra",
            FieldKind::CenturyOfEra => "centuryOfEra",
            FieldKind::YearOfCentury => "yearOfCentury",
            FieldKind::Year => "year",
            FieldKind::DayOfYear => "dayOfYear",
            FieldKind::MonthOfYear => "monthOfYear",
            FieldKind::DayOfMonth => "dayOfMonth",
            FieldKind::Weekyear => "weekyear",
            FieldKind::WeekOfWeekyear => "weekOfWeekyear",
            FieldKind::DayOfWeek => "dayOfWeek",
            FieldKind::HalfdayOfDay => "halfdayOfDay",
            FieldKind::HourOfHalfday => "hourOfHalfday",
            FieldKind::ClockhourOfHalfday => "clockhourOfHalfday",
            FieldKind::ClockhourOfDay => "clockhourOfDay",
            FieldKind::HourOfDay => "hourOfDay",
            FieldKind::MinuteOfDay => "minuteOfDay",
            FieldKind::MinuteOfHour => "minuteOfHour",
            FieldKind::SecondOfDay => "secondOfDay",
            FieldKind::SecondOfMinute => "secondOfMinute",
            FieldKind::MillisOfDay => "millisOfDay",
            FieldKind::MillisOfSecond => "millisOfSecond",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── CalendarField trait ─────────────────────────────────────────────────────

/// A calendar quantity readable from and writable to an instant.
///
/// Implementations are immutable and shared via `Arc`. Field values are
/// `i32`; instants are `i64` milliseconds. All operations are pure and
/// report failures synchronously through [`crate::error::FieldError`].
pub trait CalendarField: fmt::Debug + Send + Sync {
    /// The type tag of this field.
    fn kind(&self) -> FieldKind;

    /// Whether this field supports computation at all. Placeholder fields
    /// answer `false` and fail every operation.
    fn is_supported(&self) -> bool {
        true
    }

    /// Whether `set` is lenient: out-of-range values carry into larger
    /// fields instead of failing.
    fn is_lenient(&self) -> bool {
        false
    }

    /// The directly wrapped field, for decorators.
    fn inner(&self) -> Option<Arc<dyn CalendarField>> {
        None
    }

    /// The duration unit this field is stepped in.
    fn step_unit(&self) -> Arc<dyn DurationUnit>;

    /// The duration unit this field ranges over, absent for the largest
    /// field of a calendar system.
    fn range_unit(&self) -> Option<Arc<dyn DurationUnit>>;

    /// The value of this field at `instant`.
    fn get(&self, instant: i64) -> Result<i32>;

    /// A new instant with this field set to `value`. Larger fields are
    /// unchanged; smaller fields are clamped into range where the new
    /// setting invalidates them.
    fn set(&self, instant: i64, value: i32) -> Result<i64>;

    /// A new instant advanced by `delta` steps of this field, carrying into
    /// larger fields on overflow.
    fn add(&self, instant: i64, delta: i64) -> Result<i64>;

    /// Like [`add`](CalendarField::add), but the delta wraps within this
    /// field's own range; larger fields never change.
    fn add_wrapped(&self, instant: i64, delta: i64) -> Result<i64> {
        let current = self.get(instant)?;
        let wrapped = wrapped_value(
            safe_add(current as i64, delta)?,
            self.minimum_at(instant)?,
            self.maximum_at(instant)?,
        )?;
        self.set(instant, wrapped)
    }

    /// The count of whole steps between two instants; exactly inverts
    /// [`add`](CalendarField::add).
    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        self.step_unit().difference(minuend, subtrahend)
    }

    /// The largest instant at or before `instant` that lies exactly on a
    /// step boundary of this field.
    fn round_floor(&self, instant: i64) -> Result<i64>;

    /// The smallest instant at or after `instant` that lies exactly on a
    /// step boundary of this field.
    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            Ok(instant)
        } else {
            self.add(floor, 1)
        }
    }

    /// Round to the nearest boundary, ties toward the floor.
    fn round_half_floor(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        if safe_subtract(instant, floor)? <= safe_subtract(ceiling, instant)? {
            Ok(floor)
        } else {
            Ok(ceiling)
        }
    }

    /// Round to the nearest boundary, ties toward the ceiling.
    fn round_half_ceiling(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        if safe_subtract(ceiling, instant)? <= safe_subtract(instant, floor)? {
            Ok(ceiling)
        } else {
            Ok(floor)
        }
    }

    /// Round to the nearest boundary, ties toward the boundary whose field
    /// value is even (the ceiling when its value is even).
    fn round_half_even(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        let from_floor = safe_subtract(instant, floor)?;
        let to_ceiling = safe_subtract(ceiling, instant)?;
        if from_floor < to_ceiling {
            Ok(floor)
        } else if to_ceiling < from_floor {
            Ok(ceiling)
        } else if self.get(ceiling)? % 2 == 0 {
            Ok(ceiling)
        } else {
            Ok(floor)
        }
    }

    /// The millisecond remainder below the current step boundary.
    fn remainder(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        safe_subtract(instant, floor)
    }

    /// Whether the step containing `instant` is irregularly lengthened.
    fn is_leap(&self, _instant: i64) -> Result<bool> {
        Ok(false)
    }

    /// The size of the leap adjustment at `instant`, zero when not leap.
    fn leap_amount(&self, _instant: i64) -> Result<i32> {
        Ok(0)
    }

    /// The unit the leap adjustment is expressed in, if any.
    fn leap_unit(&self) -> Option<Arc<dyn DurationUnit>> {
        None
    }

    /// The smallest value this field can take, over all instants.
    fn minimum(&self) -> Result<i32>;

    /// The largest value this field can take, over all instants.
    fn maximum(&self) -> Result<i32>;

    /// The smallest value this field can take at `instant`.
    fn minimum_at(&self, _instant: i64) -> Result<i32> {
        self.minimum()
    }

    /// The largest value this field can take at `instant`.
    fn maximum_at(&self, _instant: i64) -> Result<i32> {
        self.maximum()
    }

    /// The smallest value this field can take given the sibling values of a
    /// partial.
    fn minimum_in(&self, _partial: &Partial, _values: &[i32]) -> Result<i32> {
        self.minimum()
    }

    /// The largest value this field can take given the sibling values of a
    /// partial (e.g. day-of-month bounded by the year and month chosen).
    fn maximum_in(&self, _partial: &Partial, _values: &[i32]) -> Result<i32> {
        self.maximum()
    }
}
