//! Partial values: an ordered subset of calendar fields without a full
//! instant, plus the cascading arithmetic that lets a `set` or `add` on one
//! field ripple into its neighbors.
//!
//! A [`Partial`] owns only the field sequence; the values travel as plain
//! slices supplied per call and come back as new `Vec<i32>`s, so one field
//! sequence serves any number of value arrays.

use std::sync::Arc;

use crate::arith::verify_value_bounds;
use crate::error::{FieldError, Result};
use crate::field::{CalendarField, FieldKind};

/// An ordered sequence of calendar fields, largest range first.
#[derive(Debug, Clone)]
pub struct Partial {
    fields: Vec<Arc<dyn CalendarField>>,
}

impl Partial {
    /// Create a partial from fields ordered by strictly decreasing range.
    ///
    /// A field without a range unit (the largest field of a calendar
    /// system) may only appear first.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidArgument`] when the sequence is empty
    /// or the fields are misordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use chronofield::{CalendarField, FieldKind, Partial, PreciseField, PreciseUnit};
    ///
    /// let hour: Arc<dyn CalendarField> = PreciseField::new(
    ///     FieldKind::HourOfDay,
    ///     PreciseUnit::hours(),
    ///     PreciseUnit::days(),
    /// )?;
    /// let minute: Arc<dyn CalendarField> = PreciseField::new(
    ///     FieldKind::MinuteOfHour,
    ///     PreciseUnit::minutes(),
    ///     PreciseUnit::hours(),
    /// )?;
    /// let partial = Partial::new(vec![hour, minute])?;
    /// assert_eq!(partial.len(), 2);
    /// # Ok::<(), chronofield::FieldError>(())
    /// ```
    pub fn new(fields: Vec<Arc<dyn CalendarField>>) -> Result<Self> {
        if fields.is_empty() {
            return Err(FieldError::InvalidArgument(
                "a partial must contain at least one field".to_owned(),
            ));
        }
        for pair in fields.windows(2) {
            let larger = &pair[0];
            let smaller = &pair[1];
            match (larger.range_unit(), smaller.range_unit()) {
                (_, None) => {
                    return Err(FieldError::InvalidArgument(format!(
                        "field {} has no range unit and may only appear first",
                        smaller.kind()
                    )));
                }
                (None, Some(_)) => {}
                (Some(larger_range), Some(smaller_range)) => {
                    if larger_range.compare(smaller_range.as_ref()) != std::cmp::Ordering::Greater
                    {
                        return Err(FieldError::InvalidArgument(format!(
                            "fields must be in strictly decreasing range order, \
                             but {} does not range over more than {}",
                            larger.kind(),
                            smaller.kind()
                        )));
                    }
                }
            }
        }
        Ok(Self { fields })
    }

    /// The number of fields in this partial.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field at `index`, or `None` when the index is out of bounds.
    pub fn field(&self, index: usize) -> Option<&Arc<dyn CalendarField>> {
        self.fields.get(index)
    }

    /// All fields, largest range first.
    pub fn fields(&self) -> &[Arc<dyn CalendarField>] {
        &self.fields
    }

    /// The index of the field of the given kind, if present. Per-partial
    /// bounds hooks use this to locate sibling values.
    pub fn index_of(&self, kind: FieldKind) -> Option<usize> {
        self.fields.iter().position(|field| field.kind() == kind)
    }

    fn verify_shape(&self, index: usize, values: &[i32]) -> Result<()> {
        if values.len() != self.fields.len() {
            return Err(FieldError::InvalidArgument(format!(
                "value array holds {} values but the partial has {} fields",
                values.len(),
                self.fields.len()
            )));
        }
        if index >= self.fields.len() {
            return Err(FieldError::InvalidArgument(format!(
                "field index {index} is out of bounds for a partial of {} fields",
                self.fields.len()
            )));
        }
        Ok(())
    }

    /// Set the field at `index` to `value`, verifying it against the
    /// per-partial bounds, then clamp every strictly-smaller field into its
    /// own per-partial range (e.g. setting month to February clamps day
    /// 31 to 28).
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ValueOutOfRange`] when `value` is outside the
    /// bounds given the current sibling values.
    pub fn set(&self, index: usize, values: &[i32], value: i32) -> Result<Vec<i32>> {
        self.verify_shape(index, values)?;
        let field = &self.fields[index];
        verify_value_bounds(
            field.kind(),
            value,
            field.minimum_in(self, values)?,
            field.maximum_in(self, values)?,
        )?;
        let mut values = values.to_vec();
        values[index] = value;
        for i in index + 1..self.fields.len() {
            let smaller = &self.fields[i];
            let max = smaller.maximum_in(self, &values)?;
            if values[i] > max {
                values[i] = max;
            }
            let min = smaller.minimum_in(self, &values)?;
            if values[i] < min {
                values[i] = min;
            }
        }
        Ok(values)
    }

    /// Add `delta` steps to the field at `index`, carrying overflow into
    /// the next-larger field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidArgument`] when the carry escalates
    /// past the largest field, or when adjacent fields belong to
    /// incompatible calendar systems (the larger field's step-unit kind
    /// must equal the smaller field's range-unit kind).
    pub fn add(&self, index: usize, values: &[i32], delta: i64) -> Result<Vec<i32>> {
        self.cascade(index, values, delta, false)
    }

    /// Like [`add`](Partial::add), but when the carry reaches the largest
    /// field that field wraps between its minimum and maximum instead of
    /// failing, so the whole partial cycles.
    pub fn add_wrapped(&self, index: usize, values: &[i32], delta: i64) -> Result<Vec<i32>> {
        self.cascade(index, values, delta, true)
    }

    fn check_escalation(&self, index: usize) -> Result<()> {
        let smaller = &self.fields[index];
        let larger = &self.fields[index - 1];
        let range_kind = match smaller.range_unit() {
            Some(range) => range.kind(),
            None => {
                return Err(FieldError::InvalidArgument(format!(
                    "field {} has no range unit to escalate through",
                    smaller.kind()
                )));
            }
        };
        if larger.step_unit().kind() != range_kind {
            return Err(FieldError::InvalidArgument(format!(
                "cannot carry from {} into {}: step unit {} does not match range unit {}",
                smaller.kind(),
                larger.kind(),
                larger.step_unit().kind(),
                range_kind
            )));
        }
        Ok(())
    }

    fn cascade(&self, index: usize, values: &[i32], delta: i64, wrap: bool) -> Result<Vec<i32>> {
        self.verify_shape(index, values)?;
        if delta == 0 {
            return Ok(values.to_vec());
        }
        let field = self.fields[index].clone();
        let mut values = values.to_vec();
        let mut delta = delta;
        while delta > 0 {
            let max = field.maximum_in(self, &values)?;
            if let Some(proposed) = (values[index] as i64).checked_add(delta) {
                if proposed <= max as i64 {
                    values[index] = proposed as i32;
                    break;
                }
            }
            if index == 0 {
                if !wrap {
                    return Err(FieldError::InvalidArgument(format!(
                        "adding past the maximum of {}",
                        field.kind()
                    )));
                }
                let min = field.minimum_in(self, &values)?;
                delta -= (max as i64 + 1) - values[index] as i64;
                values[index] = min;
                // Further full cycles are periodic; skip them in one step.
                delta %= max as i64 - min as i64 + 1;
                continue;
            }
            self.check_escalation(index)?;
            delta -= (max as i64 + 1) - values[index] as i64;
            values = self.cascade(index - 1, &values, 1, wrap)?;
            values[index] = field.minimum_in(self, &values)?;
        }
        while delta < 0 {
            let min = field.minimum_in(self, &values)?;
            if let Some(proposed) = (values[index] as i64).checked_add(delta) {
                if proposed >= min as i64 {
                    values[index] = proposed as i32;
                    break;
                }
            }
            if index == 0 {
                if !wrap {
                    return Err(FieldError::InvalidArgument(format!(
                        "subtracting past the minimum of {}",
                        field.kind()
                    )));
                }
                let max = field.maximum_in(self, &values)?;
                delta -= (min as i64 - 1) - values[index] as i64;
                values[index] = max;
                delta %= max as i64 - min as i64 + 1;
                continue;
            }
            self.check_escalation(index)?;
            delta -= (min as i64 - 1) - values[index] as i64;
            values = self.cascade(index - 1, &values, -1, wrap)?;
            values[index] = field.maximum_in(self, &values)?;
        }
        // The bounded set revalidates and clamps the smaller fields.
        self.set(index, &values, values[index])
    }
}
