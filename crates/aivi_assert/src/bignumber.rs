//! Big-number verbs.
//!
//! `expect(x).bignumber()` marks a chain; every comparison verb on a marked
//! chain converts its operands to [`BigInt`] and compares those. Unmarked
//! chains go to whatever implementation was installed before this one.
//!
//! Operands must be `Value::BigInt` or `Value::Text` holding a base-10
//! integer. Native `Int`/`Float` are rejected on purpose so a caller never
//! gets a comparison against a silently rounded value.
use std::str::FromStr;
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::assertion::{Assertion, AssertionContext};
use crate::comparisons::Comparisons;
use crate::error::{AssertResult, AssertionError};
use crate::values::{deep_equal_with, format_value, Value, Verdict};

impl Assertion {
    /// Routes the remaining verbs of this chain to big-number comparisons.
    pub fn bignumber(mut self) -> Self {
        self.flags_mut().bignumber = true;
        self
    }
}

/// Turns an operand into a canonical [`BigInt`].
pub fn convert(value: &Value) -> AssertResult<BigInt> {
    match value {
        Value::BigInt(value) => Ok(value.as_ref().clone()),
        Value::Text(text) => BigInt::from_str(text).map_err(|_| {
            AssertionError::conversion(format!(
                "expected {} to be a valid integer string",
                format_value(value)
            ))
        }),
        other => Err(AssertionError::conversion(format!(
            "expected {} to be an instance of BigInt or string",
            format_value(other)
        ))),
    }
}

fn is_bignumber_like(value: &Value) -> bool {
    matches!(value, Value::BigInt(_) | Value::Text(_))
}

/// Per-pair comparator for deep equality: abstains unless both sides look
/// numeric.
pub fn compare_leaves(left: &Value, right: &Value) -> AssertResult<Verdict> {
    if !is_bignumber_like(left) || !is_bignumber_like(right) {
        return Ok(Verdict::Indeterminate);
    }
    Ok(Verdict::from(convert(left)? == convert(right)?))
}

/// Wraps the installation via [`Expectations::install`](crate::Expectations::install).
/// Installing on top of an implementation that already handles marked
/// chains returns it unchanged.
pub fn install(previous: Arc<dyn Comparisons>) -> Arc<dyn Comparisons> {
    if previous.handles_bignumber() {
        return previous;
    }
    Arc::new(BigNumberComparisons { previous })
}

pub struct BigNumberComparisons {
    previous: Arc<dyn Comparisons>,
}

impl BigNumberComparisons {
    pub fn new(previous: Arc<dyn Comparisons>) -> Self {
        Self { previous }
    }
}

fn text(value: &BigInt) -> Value {
    Value::Text(value.to_string())
}

/// Converts subject and argument, then asserts `holds(actual, expected)`.
fn relation(
    ctx: &AssertionContext,
    expected: &Value,
    holds: fn(&BigInt, &BigInt) -> bool,
    positive: &str,
    negative: &str,
) -> AssertResult<()> {
    let actual = convert(&ctx.subject)?;
    let expected = convert(expected)?;
    ctx.assert(
        holds(&actual, &expected),
        positive,
        negative,
        Some(&text(&expected)),
        &text(&actual),
    )
}

impl Comparisons for BigNumberComparisons {
    fn equal(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        if !ctx.flags.bignumber {
            return self.previous.equal(ctx, expected);
        }
        if ctx.flags.deep {
            let equal = deep_equal_with(&ctx.subject, expected, &mut compare_leaves)?;
            return ctx.assert(
                equal,
                "expected #{act} to deeply equal #{exp}",
                "expected #{act} to not deeply equal #{exp}",
                Some(expected),
                &ctx.subject,
            );
        }
        relation(
            ctx,
            expected,
            |a, b| a == b,
            "expected #{act} to equal #{exp}",
            "expected #{act} to be different from #{exp}",
        )
    }

    fn above(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        if !ctx.flags.bignumber {
            return self.previous.above(ctx, expected);
        }
        relation(
            ctx,
            expected,
            |a, b| a > b,
            "expected #{act} to be greater than #{exp}",
            "expected #{act} to be less than or equal to #{exp}",
        )
    }

    fn least(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        if !ctx.flags.bignumber {
            return self.previous.least(ctx, expected);
        }
        relation(
            ctx,
            expected,
            |a, b| a >= b,
            "expected #{act} to be greater than or equal to #{exp}",
            "expected #{act} to be less than #{exp}",
        )
    }

    fn below(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        if !ctx.flags.bignumber {
            return self.previous.below(ctx, expected);
        }
        relation(
            ctx,
            expected,
            |a, b| a < b,
            "expected #{act} to be less than #{exp}",
            "expected #{act} to be greater than or equal to #{exp}",
        )
    }

    fn most(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        if !ctx.flags.bignumber {
            return self.previous.most(ctx, expected);
        }
        relation(
            ctx,
            expected,
            |a, b| a <= b,
            "expected #{act} to be less than or equal to #{exp}",
            "expected #{act} to be greater than #{exp}",
        )
    }

    fn close_to(
        &self,
        ctx: &AssertionContext,
        expected: &Value,
        delta: &Value,
    ) -> AssertResult<()> {
        if !ctx.flags.bignumber {
            return self.previous.close_to(ctx, expected, delta);
        }
        let actual = convert(&ctx.subject)?;
        let expected = convert(expected)?;
        let delta = convert(delta)?;
        let within = actual >= &expected - &delta && actual <= &expected + &delta;
        ctx.assert(
            within,
            &format!("expected #{{act}} to be within '{delta}' of #{{exp}}"),
            &format!("expected #{{act}} to be further than '{delta}' from #{{exp}}"),
            Some(&text(&expected)),
            &text(&actual),
        )
    }

    fn negative(&self, ctx: &AssertionContext) -> AssertResult<()> {
        if !ctx.flags.bignumber {
            return self.previous.negative(ctx);
        }
        let actual = convert(&ctx.subject)?;
        ctx.assert(
            actual.is_negative(),
            "expected #{this} to be negative",
            "expected #{this} to not be negative",
            None,
            &text(&actual),
        )
    }

    fn zero(&self, ctx: &AssertionContext) -> AssertResult<()> {
        if !ctx.flags.bignumber {
            return self.previous.zero(ctx);
        }
        let actual = convert(&ctx.subject)?;
        ctx.assert(
            actual.is_zero(),
            "expected #{this} to be zero",
            "expected #{this} to not be zero",
            None,
            &text(&actual),
        )
    }

    fn handles_bignumber(&self) -> bool {
        true
    }
}
