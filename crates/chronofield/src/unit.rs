//! Duration units: named units of elapsed time with a (possibly
//! context-dependent) millisecond length.
//!
//! A [`DurationUnit`] converts between raw millisecond spans and counts of
//! itself, advances instants, and measures the whole-unit difference between
//! two instants. Precise units (seconds, hours, ...) have a fixed length;
//! imprecise units (months, years) report a nominal length here and compute
//! exact lengths through their owning field (see [`crate::imprecise`]).

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::arith::{safe_add, safe_multiply};
use crate::error::{FieldError, Result};

// ── Millisecond constants ───────────────────────────────────────────────────

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_HALFDAY: i64 = 12 * MILLIS_PER_HOUR;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

// ── Unit type tags ──────────────────────────────────────────────────────────

/// Identifies a kind of duration unit, independent of any concrete
/// implementation or calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitKind {
    Eras,
    Centuries,
    Weekyears,
    Years,
    Months,
    Weeks,
    Days,
    Halfdays,
    Hours,
    Minutes,
    Seconds,
    Millis,
}

impl UnitKind {
    /// The conventional lowercase name of this unit kind.
    pub fn name(self) -> &'static str {
        match self {
            UnitKind::Eras => "eras",
            UnitKind::Centuries => "centuries",
            UnitKind::Weekyears => "weekyears",
            UnitKind::Years => "years",
            UnitKind::Months => "months",
            UnitKind::Weeks => "weeks",
            UnitKind::Days => "days",
            UnitKind::Halfdays => "halfdays",
            UnitKind::Hours => "hours",
            UnitKind::Minutes => "minutes",
            UnitKind::Seconds => "seconds",
            UnitKind::Millis => "millis",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── DurationUnit trait ──────────────────────────────────────────────────────

/// A unit of elapsed time.
///
/// Implementations are immutable and shared via `Arc`; every method is a
/// pure function of its inputs. Conversions truncate toward zero and fail
/// with [`FieldError::Overflow`] rather than wrapping.
pub trait DurationUnit: fmt::Debug + Send + Sync {
    /// The type tag of this unit.
    fn kind(&self) -> UnitKind;

    /// Whether one unit always spans the same number of milliseconds.
    fn is_precise(&self) -> bool;

    /// Whether this unit supports computation at all. Placeholder units
    /// answer `false` and fail every conversion.
    fn is_supported(&self) -> bool {
        true
    }

    /// The fixed length of one unit in milliseconds, or a nominal average
    /// for imprecise units.
    fn unit_millis(&self) -> i64;

    /// The exact length in milliseconds of one unit starting at `instant`.
    ///
    /// Precise units ignore the argument.
    fn unit_millis_at(&self, _instant: i64) -> Result<i64> {
        Ok(self.unit_millis())
    }

    /// Convert a raw millisecond span into a count of this unit, truncating
    /// toward zero, without positional context.
    fn to_units(&self, millis: i64) -> Result<i64>;

    /// Convert a raw millisecond span starting at `instant` into a count of
    /// this unit, truncating toward zero.
    fn to_units_at(&self, millis: i64, _instant: i64) -> Result<i64> {
        self.to_units(millis)
    }

    /// Convert a count of this unit into a millisecond span, without
    /// positional context.
    fn from_units(&self, count: i64) -> Result<i64>;

    /// Convert a count of this unit starting at `instant` into a
    /// millisecond span.
    fn from_units_at(&self, count: i64, _instant: i64) -> Result<i64> {
        self.from_units(count)
    }

    /// Advance `instant` by `count` units.
    fn add_to(&self, instant: i64, count: i64) -> Result<i64>;

    /// The largest integer `n` such that `add_to(subtrahend, n)` does not
    /// pass `minuend`; the sign matches `minuend - subtrahend`.
    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64>;

    /// Order units by magnitude. Imprecise units compare by their nominal
    /// length; ties compare as equal.
    fn compare(&self, other: &dyn DurationUnit) -> Ordering {
        self.unit_millis().cmp(&other.unit_millis())
    }
}

// ── Precise unit ────────────────────────────────────────────────────────────

/// A duration unit with a fixed, context-independent millisecond length.
#[derive(Debug)]
pub struct PreciseUnit {
    kind: UnitKind,
    unit_millis: i64,
}

impl PreciseUnit {
    /// Create a precise unit of the given length.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidArgument`] when the length is less than
    /// one millisecond.
    pub fn new(kind: UnitKind, unit_millis: i64) -> Result<Arc<Self>> {
        if unit_millis < 1 {
            return Err(FieldError::InvalidArgument(format!(
                "unit length for {kind} must be at least 1 millisecond, got {unit_millis}"
            )));
        }
        Ok(Arc::new(Self { kind, unit_millis }))
    }

    pub fn millis() -> Arc<Self> {
        Arc::new(Self { kind: UnitKind::Millis, unit_millis: 1 })
    }

    pub fn seconds() -> Arc<Self> {
        Arc::new(Self { kind: UnitKind::Seconds, unit_millis: MILLIS_PER_SECOND })
    }

    pub fn minutes() -> Arc<Self> {
        Arc::new(Self { kind: UnitKind::Minutes, unit_millis: MILLIS_PER_MINUTE })
    }

    pub fn hours() -> Arc<Self> {
        Arc::new(Self { kind: UnitKind::Hours, unit_millis: MILLIS_PER_HOUR })
    }

    pub fn halfdays() -> Arc<Self> {
        Arc::new(Self { kind: UnitKind::Halfdays, unit_millis: MILLIS_PER_HALFDAY })
    }

    pub fn days() -> Arc<Self> {
        Arc::new(Self { kind: UnitKind::Days, unit_millis: MILLIS_PER_DAY })
    }

    pub fn weeks() -> Arc<Self> {
        Arc::new(Self { kind: UnitKind::Weeks, unit_millis: MILLIS_PER_WEEK })
    }
}

impl DurationUnit for PreciseUnit {
    fn kind(&self) -> UnitKind {
        self.kind
    }

    fn is_precise(&self) -> bool {
        true
    }

    fn unit_millis(&self) -> i64 {
        self.unit_millis
    }

    fn to_units(&self, millis: i64) -> Result<i64> {
        Ok(millis / self.unit_millis)
    }

    fn from_units(&self, count: i64) -> Result<i64> {
        safe_multiply(count, self.unit_millis)
    }

    fn add_to(&self, instant: i64, count: i64) -> Result<i64> {
        safe_add(instant, safe_multiply(count, self.unit_millis)?)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        // Truncation toward zero is exact here: the unit length never varies.
        Ok(crate::arith::safe_subtract(minuend, subtrahend)? / self.unit_millis)
    }
}

// ── Scaled unit ─────────────────────────────────────────────────────────────

/// A duration unit that is an integer multiple of a wrapped unit, e.g.
/// "weeks" as seven of a "days" unit.
#[derive(Debug)]
pub struct ScaledUnit {
    wrapped: Arc<dyn DurationUnit>,
    kind: UnitKind,
    scalar: i64,
    unit_millis: i64,
}

impl ScaledUnit {
    /// Create a unit `scalar` times the length of `wrapped`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidArgument`] for scalars 0, 1 and -1
    /// (which would be degenerate or an identity wrap), and
    /// [`FieldError::Overflow`] when the combined unit length does not fit.
    pub fn new(wrapped: Arc<dyn DurationUnit>, kind: UnitKind, scalar: i64) -> Result<Arc<Self>> {
        if scalar == 0 || scalar == 1 || scalar == -1 {
            return Err(FieldError::InvalidArgument(format!(
                "scalar for {kind} must not be 0, 1 or -1, got {scalar}"
            )));
        }
        let unit_millis = safe_multiply(wrapped.unit_millis(), scalar)?;
        Ok(Arc::new(Self { wrapped, kind, scalar, unit_millis }))
    }

    /// The multiplier applied to the wrapped unit.
    pub fn scalar(&self) -> i64 {
        self.scalar
    }
}

impl DurationUnit for ScaledUnit {
    fn kind(&self) -> UnitKind {
        self.kind
    }

    fn is_precise(&self) -> bool {
        self.wrapped.is_precise()
    }

    fn unit_millis(&self) -> i64 {
        self.unit_millis
    }

    fn unit_millis_at(&self, instant: i64) -> Result<i64> {
        safe_multiply(self.wrapped.unit_millis_at(instant)?, self.scalar)
    }

    fn to_units(&self, millis: i64) -> Result<i64> {
        Ok(self.wrapped.to_units(millis)? / self.scalar)
    }

    fn to_units_at(&self, millis: i64, instant: i64) -> Result<i64> {
        Ok(self.wrapped.to_units_at(millis, instant)? / self.scalar)
    }

    fn from_units(&self, count: i64) -> Result<i64> {
        self.wrapped.from_units(safe_multiply(count, self.scalar)?)
    }

    fn from_units_at(&self, count: i64, instant: i64) -> Result<i64> {
        self.wrapped.from_units_at(safe_multiply(count, self.scalar)?, instant)
    }

    fn add_to(&self, instant: i64, count: i64) -> Result<i64> {
        self.wrapped.add_to(instant, safe_multiply(count, self.scalar)?)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        Ok(self.wrapped.difference(minuend, subtrahend)? / self.scalar)
    }
}
