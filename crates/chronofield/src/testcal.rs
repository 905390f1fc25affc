//! A toy fixed calendar for tests: every year is 365 days with the
//! standard month lengths and no leap years, over an epoch of January 1 of
//! year 0. Small enough to reason about by hand, irregular enough to
//! exercise the imprecise-field and partial-value paths.

use std::sync::Arc;

use crate::arith::{safe_add, safe_multiply};
use crate::error::Result;
use crate::field::{CalendarField, FieldKind};
use crate::imprecise::{ImpreciseField, ImpreciseOps};
use crate::partial::Partial;
use crate::unit::{DurationUnit, PreciseUnit, UnitKind, MILLIS_PER_DAY};

pub(crate) const MONTH_LENGTHS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
pub(crate) const MILLIS_PER_YEAR: i64 = 365 * MILLIS_PER_DAY;
pub(crate) const NOMINAL_MONTH_MILLIS: i64 = MILLIS_PER_YEAR / 12;

const MIN_YEAR: i32 = -9999;
const MAX_YEAR: i32 = 9999;

struct CivilDate {
    year: i64,
    month0: usize,
    day0: i64,
    time_millis: i64,
}

fn split(instant: i64) -> CivilDate {
    let day = instant.div_euclid(MILLIS_PER_DAY);
    let time_millis = instant.rem_euclid(MILLIS_PER_DAY);
    let year = day.div_euclid(365);
    let mut day_of_year = day.rem_euclid(365);
    let mut month0 = 0;
    while day_of_year >= MONTH_LENGTHS[month0] {
        day_of_year -= MONTH_LENGTHS[month0];
        month0 += 1;
    }
    CivilDate { year, month0, day0: day_of_year, time_millis }
}

fn join(year: i64, month0: usize, day0: i64, time_millis: i64) -> Result<i64> {
    let day_of_year: i64 = MONTH_LENGTHS[..month0].iter().sum::<i64>() + day0;
    let days = safe_add(safe_multiply(year, 365)?, day_of_year)?;
    safe_add(safe_multiply(days, MILLIS_PER_DAY)?, time_millis)
}

fn years_unit() -> Arc<dyn DurationUnit> {
    PreciseUnit::new(UnitKind::Years, MILLIS_PER_YEAR).unwrap()
}

// ── Year ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct YearOps;

impl ImpreciseOps for YearOps {
    fn get(&self, instant: i64) -> i32 {
        split(instant).year as i32
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let d = split(instant);
        join(value as i64, d.month0, d.day0, d.time_millis)
    }

    fn add(&self, instant: i64, delta: i64) -> Result<i64> {
        let d = split(instant);
        join(safe_add(d.year, delta)?, d.month0, d.day0, d.time_millis)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        join(split(instant).year, 0, 0, 0)
    }

    fn minimum(&self) -> i32 {
        MIN_YEAR
    }

    fn maximum(&self) -> i32 {
        MAX_YEAR
    }

    fn range_unit(&self) -> Option<Arc<dyn DurationUnit>> {
        None
    }
}

pub(crate) fn year_field() -> Arc<dyn CalendarField> {
    ImpreciseField::new(
        FieldKind::Year,
        UnitKind::Years,
        MILLIS_PER_YEAR,
        Arc::new(YearOps),
    )
    .unwrap()
}

// ── Month of year ───────────────────────────────────────────────────────────

#[derive(Debug)]
struct MonthOps;

impl ImpreciseOps for MonthOps {
    fn get(&self, instant: i64) -> i32 {
        split(instant).month0 as i32 + 1
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let d = split(instant);
        let month0 = (value - 1) as usize;
        let day0 = d.day0.min(MONTH_LENGTHS[month0] - 1);
        join(d.year, month0, day0, d.time_millis)
    }

    fn add(&self, instant: i64, delta: i64) -> Result<i64> {
        let d = split(instant);
        let total = safe_add(safe_add(safe_multiply(d.year, 12)?, d.month0 as i64)?, delta)?;
        let month0 = total.rem_euclid(12) as usize;
        let day0 = d.day0.min(MONTH_LENGTHS[month0] - 1);
        join(total.div_euclid(12), month0, day0, d.time_millis)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        let d = split(instant);
        join(d.year, d.month0, 0, 0)
    }

    fn minimum(&self) -> i32 {
        1
    }

    fn maximum(&self) -> i32 {
        12
    }

    fn range_unit(&self) -> Option<Arc<dyn DurationUnit>> {
        Some(years_unit())
    }
}

pub(crate) fn month_field() -> Arc<dyn CalendarField> {
    ImpreciseField::new(
        FieldKind::MonthOfYear,
        UnitKind::Months,
        NOMINAL_MONTH_MILLIS,
        Arc::new(MonthOps),
    )
    .unwrap()
}

// ── Day of month ────────────────────────────────────────────────────────────

#[derive(Debug)]
struct DayOfMonthOps {
    months: Arc<dyn DurationUnit>,
}

impl ImpreciseOps for DayOfMonthOps {
    fn get(&self, instant: i64) -> i32 {
        split(instant).day0 as i32 + 1
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let d = split(instant);
        join(d.year, d.month0, value as i64 - 1, d.time_millis)
    }

    fn add(&self, instant: i64, delta: i64) -> Result<i64> {
        safe_add(instant, safe_multiply(delta, MILLIS_PER_DAY)?)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        let d = split(instant);
        join(d.year, d.month0, d.day0, 0)
    }

    fn minimum(&self) -> i32 {
        1
    }

    fn maximum(&self) -> i32 {
        31
    }

    fn maximum_at(&self, instant: i64) -> i32 {
        MONTH_LENGTHS[split(instant).month0] as i32
    }

    fn maximum_in(&self, partial: &Partial, values: &[i32]) -> i32 {
        match partial.index_of(FieldKind::MonthOfYear) {
            Some(index) => MONTH_LENGTHS[values[index] as usize - 1] as i32,
            None => self.maximum(),
        }
    }

    fn range_unit(&self) -> Option<Arc<dyn DurationUnit>> {
        Some(self.months.clone())
    }
}

pub(crate) fn day_of_month_field() -> Arc<dyn CalendarField> {
    ImpreciseField::new(
        FieldKind::DayOfMonth,
        UnitKind::Days,
        MILLIS_PER_DAY,
        Arc::new(DayOfMonthOps { months: month_field().step_unit() }),
    )
    .unwrap()
}

/// A year/month/day partial over the toy calendar.
pub(crate) fn ymd_partial() -> Partial {
    Partial::new(vec![year_field(), month_field(), day_of_month_field()]).unwrap()
}
