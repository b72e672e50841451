use std::cmp::Ordering;

use crate::assertion::AssertionContext;
use crate::error::{AssertResult, AssertionError};
use crate::values::{deep_equal, format_value, strict_equal, Value};

/// One method per verb group. Implementations receive the chain's context and
/// the already collected arguments.
pub trait Comparisons: Send + Sync {
    fn equal(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()>;
    fn above(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()>;
    fn least(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()>;
    fn below(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()>;
    fn most(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()>;
    fn close_to(&self, ctx: &AssertionContext, expected: &Value, delta: &Value)
        -> AssertResult<()>;
    fn negative(&self, ctx: &AssertionContext) -> AssertResult<()>;
    fn zero(&self, ctx: &AssertionContext) -> AssertResult<()>;

    /// Whether chains marked with `bignumber()` are handled by this
    /// implementation or something it wraps.
    fn handles_bignumber(&self) -> bool {
        false
    }
}

/// The stock verbs: native numbers only for ordering, strict or structural
/// equality for `equal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostComparisons;

impl Comparisons for HostComparisons {
    fn equal(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        if ctx.flags.deep {
            ctx.assert(
                deep_equal(&ctx.subject, expected),
                "expected #{act} to deeply equal #{exp}",
                "expected #{act} to not deeply equal #{exp}",
                Some(expected),
                &ctx.subject,
            )
        } else {
            ctx.assert(
                strict_equal(&ctx.subject, expected),
                "expected #{act} to equal #{exp}",
                "expected #{act} to not equal #{exp}",
                Some(expected),
                &ctx.subject,
            )
        }
    }

    fn above(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        let ordering = native_ordering(ctx, expected, "above")?;
        ctx.assert(
            ordering == Some(Ordering::Greater),
            "expected #{act} to be above #{exp}",
            "expected #{act} to be at most #{exp}",
            Some(expected),
            &ctx.subject,
        )
    }

    fn least(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        let ordering = native_ordering(ctx, expected, "least")?;
        ctx.assert(
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            "expected #{act} to be at least #{exp}",
            "expected #{act} to be below #{exp}",
            Some(expected),
            &ctx.subject,
        )
    }

    fn below(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        let ordering = native_ordering(ctx, expected, "below")?;
        ctx.assert(
            ordering == Some(Ordering::Less),
            "expected #{act} to be below #{exp}",
            "expected #{act} to be at least #{exp}",
            Some(expected),
            &ctx.subject,
        )
    }

    fn most(&self, ctx: &AssertionContext, expected: &Value) -> AssertResult<()> {
        let ordering = native_ordering(ctx, expected, "most")?;
        ctx.assert(
            matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            "expected #{act} to be at most #{exp}",
            "expected #{act} to be above #{exp}",
            Some(expected),
            &ctx.subject,
        )
    }

    fn close_to(
        &self,
        ctx: &AssertionContext,
        expected: &Value,
        delta: &Value,
    ) -> AssertResult<()> {
        expect_number(&ctx.subject)?;
        expect_argument(expected, "closeTo")?;
        expect_argument(delta, "closeTo")?;
        let within = match (&ctx.subject, expected, delta) {
            (Value::Int(actual), Value::Int(expected), Value::Int(delta)) => {
                (*actual as i128 - *expected as i128).abs() <= *delta as i128
            }
            (actual, expected, delta) => match (actual.as_f64(), expected.as_f64(), delta.as_f64())
            {
                (Some(actual), Some(expected), Some(delta)) => (actual - expected).abs() <= delta,
                _ => false,
            },
        };
        let delta = format_value(delta);
        ctx.assert(
            within,
            &format!("expected #{{act}} to be close to #{{exp}} +/- {delta}"),
            &format!("expected #{{act}} not to be close to #{{exp}} +/- {delta}"),
            Some(expected),
            &ctx.subject,
        )
    }

    fn negative(&self, ctx: &AssertionContext) -> AssertResult<()> {
        expect_number(&ctx.subject)?;
        let negative = ctx.subject.as_f64().is_some_and(|v| v < 0.0);
        ctx.assert(
            negative,
            "expected #{this} to be negative",
            "expected #{this} to not be negative",
            None,
            &ctx.subject,
        )
    }

    fn zero(&self, ctx: &AssertionContext) -> AssertResult<()> {
        let zero = match &ctx.subject {
            Value::Int(v) => *v == 0,
            Value::Float(v) => *v == 0.0,
            other => match other.len() {
                Some(len) => len == 0,
                None => {
                    return Err(AssertionError::conversion(format!(
                        "expected {} to be a number or have a length",
                        format_value(other)
                    )))
                }
            },
        };
        ctx.assert(
            zero,
            "expected #{this} to be zero",
            "expected #{this} to not be zero",
            None,
            &ctx.subject,
        )
    }
}

fn expect_number(value: &Value) -> AssertResult<()> {
    match value {
        Value::Int(_) | Value::Float(_) => Ok(()),
        other => Err(AssertionError::conversion(format!(
            "expected {} to be a number",
            format_value(other)
        ))),
    }
}

fn expect_argument(value: &Value, verb: &str) -> AssertResult<()> {
    match value {
        Value::Int(_) | Value::Float(_) => Ok(()),
        _ => Err(AssertionError::conversion(format!(
            "the argument to {verb} must be a number"
        ))),
    }
}

/// `None` when either side is NaN; no ordering verb holds then.
fn native_ordering(
    ctx: &AssertionContext,
    expected: &Value,
    verb: &str,
) -> AssertResult<Option<Ordering>> {
    expect_number(&ctx.subject)?;
    expect_argument(expected, verb)?;
    let ordering = match (&ctx.subject, expected) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (a, b) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        },
    };
    Ok(ordering)
}

#[cfg(test)]
mod tests {
    use crate::assertion::Expectations;
    use crate::error::FailureKind;
    use crate::values::Value;

    fn host() -> Expectations {
        Expectations::host()
    }

    #[test]
    fn host_ordering_accepts_native_numbers() {
        assert!(host().that(3).to().be().above(2).is_ok());
        assert!(host().that(2.5).to().be().below(3).is_ok());
        assert!(host().that(3).to().be().least(3).is_ok());
        assert!(host().that(3).to().be().most(3).is_ok());
        assert!(host().that(3).not().above(3).is_ok());
    }

    #[test]
    fn host_ordering_rejects_text_even_when_negated() {
        let err = host().that("3").not().above(2).unwrap_err();
        assert_eq!(err.kind, FailureKind::Conversion);
        assert_eq!(err.message, "expected '3' to be a number");

        let err = host().that(3).above("2").unwrap_err();
        assert_eq!(err.message, "the argument to above must be a number");
    }

    #[test]
    fn host_equal_is_strict_without_deep() {
        let list = Value::list([Value::Int(1)]);
        assert!(host().that(list.clone()).to().equal(list.clone()).is_ok());
        let err = host()
            .that(list.clone())
            .to()
            .equal(Value::list([Value::Int(1)]))
            .unwrap_err();
        assert_eq!(err.message, "expected [1] to equal [1]");
        assert!(host()
            .that(list)
            .to()
            .deep()
            .equal(Value::list([Value::Int(1)]))
            .is_ok());
    }

    #[test]
    fn host_close_to_uses_absolute_difference() {
        assert!(host().that(10).close_to(12, 2).is_ok());
        let err = host().that(10).close_to(13, 2).unwrap_err();
        assert_eq!(err.message, "expected 10 to be close to 13 +/- 2");
        assert!(host().that(1.5).close_to(1.0, 0.5).is_ok());
    }

    #[test]
    fn host_zero_checks_numbers_and_lengths() {
        assert!(host().that(0).zero().is_ok());
        assert!(host().that(Value::from(Vec::<Value>::new())).zero().is_ok());
        assert!(host().that("").zero().is_ok());
        assert!(host().that("abc").not().zero().is_ok());
        let err = host().that(true).zero().unwrap_err();
        assert_eq!(err.kind, FailureKind::Conversion);
    }

    #[test]
    fn host_negative_needs_a_number() {
        assert!(host().that(-1).negative().is_ok());
        let err = host().that(1).negative().unwrap_err();
        assert_eq!(err.message, "expected 1 to be negative");
        assert!(host().that("-1").negative().is_err());
    }
}
