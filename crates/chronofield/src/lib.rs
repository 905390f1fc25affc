//! # chronofield
//!
//! Calendrical field arithmetic over millisecond instants.
//!
//! Chronofield is the arithmetic core a calendar system is built on: duration
//! units (hours, months, ...) and calendar fields (hour-of-day,
//! day-of-month, ...) that convert between plain `i64` millisecond instants
//! and calendar quantities. Fields read, write, carry, wrap, round, and
//! difference; decorators adjust a wrapped field's value space; partials
//! apply the same arithmetic to multi-field value arrays with cascading
//! carry and clamping. Every operation is a pure function over integers and
//! every failure is reported synchronously as a [`FieldError`].
//!
//! ## Modules
//!
//! - [`unit`] — Duration units: precise, scaled, and the [`DurationUnit`] trait
//! - [`field`] — The [`CalendarField`] trait and field type tags
//! - [`precise`] — Closed-form fields over fixed-length units
//! - [`imprecise`] — Calendar-supplied fields over variable-length units
//! - [`decorators`] — Offset, skip, zero-is-max, lenient, and strict wrappers
//! - [`unsupported`] — Cached placeholders for absent calendar concepts
//! - [`partial`] — Multi-field value arrays with cascading add/set
//! - [`arith`] — Overflow-checked helpers and the wrapped-value formula
//! - [`error`] — Error types

pub mod arith;
pub mod decorators;
pub mod error;
pub mod field;
pub mod imprecise;
pub mod partial;
pub mod precise;
pub mod unit;
pub mod unsupported;

#[cfg(test)]
mod testcal;

pub use arith::{safe_add, safe_multiply, safe_subtract, safe_to_i32, wrapped_value};
pub use decorators::{LenientField, OffsetField, SkipField, StrictField, ZeroIsMaxField};
pub use error::{FieldError, Result};
pub use field::{CalendarField, FieldKind};
pub use imprecise::{ImpreciseField, ImpreciseOps, ImpreciseUnit};
pub use partial::Partial;
pub use precise::PreciseField;
pub use unit::{
    DurationUnit, PreciseUnit, ScaledUnit, UnitKind, MILLIS_PER_DAY, MILLIS_PER_HALFDAY,
    MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MILLIS_PER_WEEK,
};
pub use unsupported::{UnsupportedField, UnsupportedUnit};
