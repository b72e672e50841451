//! Structural equality over [`Value`] trees.
//!
//! [`deep_equal_with`] asks a caller supplied comparator about every pair it
//! visits, containers included, before applying the default rules. The
//! comparator answers with a [`Verdict`]:
//!
//! * `Equal` / `NotEqual` decide the pair; the walk does not descend into it.
//! * `Indeterminate` leaves the pair to the default rules below. Children of a
//!   container pair are visited with the same comparator again.
//!
//! A comparator must return `Indeterminate` for pairs it has no opinion on.
//! Answering `NotEqual` for two lists it does not understand would hide a
//! structural match the default rules would have found.
//!
//! Default rules: the variants must match; scalars compare by value (`NaN`
//! equals `NaN`); lists and tuples compare element-wise with equal lengths;
//! records need the same key set and equal values per key.
use std::convert::Infallible;
use std::sync::Arc;

use super::core::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Equal,
    NotEqual,
    Indeterminate,
}

impl From<bool> for Verdict {
    fn from(equal: bool) -> Self {
        if equal {
            Verdict::Equal
        } else {
            Verdict::NotEqual
        }
    }
}

pub fn deep_equal(left: &Value, right: &Value) -> bool {
    let mut abstain = |_: &Value, _: &Value| Ok::<_, Infallible>(Verdict::Indeterminate);
    match deep_equal_with(left, right, &mut abstain) {
        Ok(equal) => equal,
        Err(never) => match never {},
    }
}

pub fn deep_equal_with<F, E>(left: &Value, right: &Value, comparator: &mut F) -> Result<bool, E>
where
    F: FnMut(&Value, &Value) -> Result<Verdict, E>,
{
    match comparator(left, right)? {
        Verdict::Equal => return Ok(true),
        Verdict::NotEqual => return Ok(false),
        Verdict::Indeterminate => {}
    }

    let equal = match (left, right) {
        (Value::Unit, Value::Unit) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::BigInt(a), Value::BigInt(b)) => a == b,
        (Value::List(a), Value::List(b)) => sequence_equal(a, b, comparator)?,
        (Value::Tuple(a), Value::Tuple(b)) => sequence_equal(a, b, comparator)?,
        (Value::Record(a), Value::Record(b)) => {
            if a.len() != b.len() {
                return Ok(false);
            }
            // Sorted so a failing comparator reports the same pair every run.
            let mut keys: Vec<&String> = a.keys().collect();
            keys.sort();
            for key in keys {
                let Some(other) = b.get(key) else {
                    return Ok(false);
                };
                if !deep_equal_with(&a[key], other, comparator)? {
                    return Ok(false);
                }
            }
            true
        }
        _ => false,
    };
    Ok(equal)
}

fn sequence_equal<F, E>(left: &[Value], right: &[Value], comparator: &mut F) -> Result<bool, E>
where
    F: FnMut(&Value, &Value) -> Result<Verdict, E>,
{
    if left.len() != right.len() {
        return Ok(false);
    }
    for (left, right) in left.iter().zip(right.iter()) {
        if !deep_equal_with(left, right, comparator)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Identity-style equality: scalars by value, shared containers by pointer.
pub fn strict_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Unit, Value::Unit) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::BigInt(a), Value::BigInt(b)) => Arc::ptr_eq(a, b),
        (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
        (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
        (Value::Tuple(a), Value::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| strict_equal(x, y))
        }
        _ => false,
    }
}
