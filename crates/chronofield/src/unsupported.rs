//! Placeholder units and fields.
//!
//! A calendar system must answer for every [`UnitKind`] and [`FieldKind`]
//! even when it cannot compute one. Placeholders fill those slots: they
//! carry the type tag, answer `is_supported() == false`, and fail every
//! computation with the matching error. Instances are cached per kind, so
//! repeated lookups hand back the same `Arc`.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::{FieldError, Result};
use crate::field::{CalendarField, FieldKind};
use crate::unit::{DurationUnit, UnitKind};

// ── Unsupported unit ────────────────────────────────────────────────────────

/// A duration unit that exists in name only.
///
/// It reports a zero length and fails every conversion and arithmetic
/// operation with [`FieldError::UnsupportedUnit`].
#[derive(Debug)]
pub struct UnsupportedUnit {
    kind: UnitKind,
}

impl UnsupportedUnit {
    /// The shared placeholder unit for `kind`.
    pub fn instance(kind: UnitKind) -> Arc<Self> {
        static CACHE: OnceLock<Mutex<HashMap<UnitKind, Arc<UnsupportedUnit>>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut cache = match cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.entry(kind).or_insert_with(|| Arc::new(Self { kind })).clone()
    }

    fn unsupported(&self) -> FieldError {
        FieldError::UnsupportedUnit(self.kind)
    }
}

impl DurationUnit for UnsupportedUnit {
    fn kind(&self) -> UnitKind {
        self.kind
    }

    // Vacuously precise: zero milliseconds, every time.
    fn is_precise(&self) -> bool {
        true
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        0
    }

    fn unit_millis_at(&self, _instant: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn to_units(&self, _millis: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn from_units(&self, _count: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn add_to(&self, _instant: i64, _count: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn difference(&self, _minuend: i64, _subtrahend: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn compare(&self, other: &dyn DurationUnit) -> Ordering {
        if other.is_supported() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

// ── Unsupported field ───────────────────────────────────────────────────────

/// A calendar field that exists in name only.
///
/// It keeps a step unit for unit queries but fails every value operation
/// with [`FieldError::UnsupportedField`].
#[derive(Debug)]
pub struct UnsupportedField {
    kind: FieldKind,
    step: Arc<dyn DurationUnit>,
}

impl UnsupportedField {
    /// The shared placeholder field for `kind`, carrying `step` as its
    /// step unit.
    ///
    /// The cache keys on the kind alone: the first step unit registered
    /// for a kind wins, later calls get the cached instance back.
    pub fn instance(kind: FieldKind, step: Arc<dyn DurationUnit>) -> Arc<Self> {
        static CACHE: OnceLock<Mutex<HashMap<FieldKind, Arc<UnsupportedField>>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut cache = match cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.entry(kind).or_insert_with(|| Arc::new(Self { kind, step })).clone()
    }

    fn unsupported(&self) -> FieldError {
        FieldError::UnsupportedField(self.kind)
    }
}

impl CalendarField for UnsupportedField {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn step_unit(&self) -> Arc<dyn DurationUnit> {
        self.step.clone()
    }

    fn range_unit(&self) -> Option<Arc<dyn DurationUnit>> {
        None
    }

    fn get(&self, _instant: i64) -> Result<i32> {
        Err(self.unsupported())
    }

    fn set(&self, _instant: i64, _value: i32) -> Result<i64> {
        Err(self.unsupported())
    }

    fn add(&self, _instant: i64, _delta: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn add_wrapped(&self, _instant: i64, _delta: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn difference(&self, _minuend: i64, _subtrahend: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn round_floor(&self, _instant: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn round_ceiling(&self, _instant: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn round_half_floor(&self, _instant: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn round_half_ceiling(&self, _instant: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn round_half_even(&self, _instant: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn remainder(&self, _instant: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn is_leap(&self, _instant: i64) -> Result<bool> {
        Err(self.unsupported())
    }

    fn leap_amount(&self, _instant: i64) -> Result<i32> {
        Err(self.unsupported())
    }

    fn minimum(&self) -> Result<i32> {
        Err(self.unsupported())
    }

    fn maximum(&self) -> Result<i32> {
        Err(self.unsupported())
    }
}
