use std::sync::Arc;

use crate::bignumber;
use crate::comparisons::{Comparisons, HostComparisons};
use crate::error::{AssertResult, AssertionError};
use crate::trace::{trace_verb, Mode};
use crate::values::{format_value, Value};

/// Qualifiers collected while an assertion chain is being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub negate: bool,
    pub deep: bool,
    pub bignumber: bool,
}

#[derive(Debug, Clone)]
pub struct AssertionContext {
    pub subject: Value,
    pub flags: Flags,
    pub message: Option<String>,
}

impl AssertionContext {
    pub fn new(subject: Value) -> Self {
        Self {
            subject,
            flags: Flags::default(),
            message: None,
        }
    }

    /// Passes when `passed` differs from the negation flag.
    ///
    /// Templates understand `#{this}` (the subject), `#{act}` and `#{exp}`.
    /// `negative` is the message used when the chain was negated.
    pub fn assert(
        &self,
        passed: bool,
        positive: &str,
        negative: &str,
        expected: Option<&Value>,
        actual: &Value,
    ) -> AssertResult<()> {
        if passed != self.flags.negate {
            return Ok(());
        }
        let template = if self.flags.negate { negative } else { positive };
        Err(AssertionError::comparison(
            self.render(template, expected, actual),
            expected.map(operand_text),
            Some(operand_text(actual)),
        ))
    }

    fn render(&self, template: &str, expected: Option<&Value>, actual: &Value) -> String {
        let mut out = template
            .replace("#{this}", &format_value(&self.subject))
            .replace("#{act}", &format_value(actual));
        if let Some(expected) = expected {
            out = out.replace("#{exp}", &format_value(expected));
        }
        out
    }
}

fn operand_text(value: &Value) -> String {
    match value {
        Value::Text(text) => text.clone(),
        other => format_value(other),
    }
}

/// A configured assertion library: the host verbs plus whatever extensions
/// were installed on top of them.
#[derive(Clone)]
pub struct Expectations {
    comparisons: Arc<dyn Comparisons>,
}

impl Expectations {
    pub fn host() -> Self {
        Self {
            comparisons: Arc::new(HostComparisons),
        }
    }

    /// Wraps the current verbs. The extension receives what was installed so
    /// far and returns the implementation to use from now on.
    pub fn install<F>(self, extension: F) -> Self
    where
        F: FnOnce(Arc<dyn Comparisons>) -> Arc<dyn Comparisons>,
    {
        Self {
            comparisons: extension(self.comparisons),
        }
    }

    pub fn comparisons(&self) -> &Arc<dyn Comparisons> {
        &self.comparisons
    }

    pub fn that(&self, subject: impl Into<Value>) -> Assertion {
        Assertion {
            ctx: AssertionContext::new(subject.into()),
            comparisons: self.comparisons.clone(),
        }
    }
}

impl Default for Expectations {
    fn default() -> Self {
        Self::host().install(bignumber::install)
    }
}

/// Starts a chain against the default library, big-number verbs included.
pub fn expect(subject: impl Into<Value>) -> Assertion {
    Expectations::default().that(subject)
}

#[derive(Clone)]
pub struct Assertion {
    ctx: AssertionContext,
    comparisons: Arc<dyn Comparisons>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion").field("ctx", &self.ctx).finish()
    }
}

impl Assertion {
    pub fn context(&self) -> &AssertionContext {
        &self.ctx
    }

    pub fn subject(&self) -> &Value {
        &self.ctx.subject
    }

    pub fn flags(&self) -> Flags {
        self.ctx.flags
    }

    pub(crate) fn flags_mut(&mut self) -> &mut Flags {
        &mut self.ctx.flags
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.ctx.message = Some(message.into());
        self
    }

    pub fn not(mut self) -> Self {
        self.ctx.flags.negate = !self.ctx.flags.negate;
        self
    }

    pub fn deep(mut self) -> Self {
        self.ctx.flags.deep = true;
        self
    }

    pub fn to(self) -> Self {
        self
    }

    pub fn be(self) -> Self {
        self
    }

    pub fn is(self) -> Self {
        self
    }

    pub fn that(self) -> Self {
        self
    }

    pub fn and(self) -> Self {
        self
    }

    pub fn has(self) -> Self {
        self
    }

    pub fn have(self) -> Self {
        self
    }

    pub fn which(self) -> Self {
        self
    }

    pub fn equal(self, expected: impl Into<Value>) -> AssertResult {
        let expected = expected.into();
        self.dispatch("equal", |c, ctx| c.equal(ctx, &expected))
    }

    pub fn equals(self, expected: impl Into<Value>) -> AssertResult {
        self.equal(expected)
    }

    pub fn eq(self, expected: impl Into<Value>) -> AssertResult {
        self.equal(expected)
    }

    pub fn above(self, expected: impl Into<Value>) -> AssertResult {
        let expected = expected.into();
        self.dispatch("above", |c, ctx| c.above(ctx, &expected))
    }

    pub fn gt(self, expected: impl Into<Value>) -> AssertResult {
        self.above(expected)
    }

    pub fn greater_than(self, expected: impl Into<Value>) -> AssertResult {
        self.above(expected)
    }

    pub fn least(self, expected: impl Into<Value>) -> AssertResult {
        let expected = expected.into();
        self.dispatch("least", |c, ctx| c.least(ctx, &expected))
    }

    pub fn gte(self, expected: impl Into<Value>) -> AssertResult {
        self.least(expected)
    }

    pub fn below(self, expected: impl Into<Value>) -> AssertResult {
        let expected = expected.into();
        self.dispatch("below", |c, ctx| c.below(ctx, &expected))
    }

    pub fn lt(self, expected: impl Into<Value>) -> AssertResult {
        self.below(expected)
    }

    pub fn less_than(self, expected: impl Into<Value>) -> AssertResult {
        self.below(expected)
    }

    pub fn most(self, expected: impl Into<Value>) -> AssertResult {
        let expected = expected.into();
        self.dispatch("most", |c, ctx| c.most(ctx, &expected))
    }

    pub fn lte(self, expected: impl Into<Value>) -> AssertResult {
        self.most(expected)
    }

    pub fn close_to(self, expected: impl Into<Value>, delta: impl Into<Value>) -> AssertResult {
        let expected = expected.into();
        let delta = delta.into();
        self.dispatch("closeTo", |c, ctx| c.close_to(ctx, &expected, &delta))
    }

    pub fn negative(self) -> AssertResult {
        self.dispatch("negative", |c, ctx| c.negative(ctx))
    }

    pub fn zero(self) -> AssertResult {
        self.dispatch("zero", |c, ctx| c.zero(ctx))
    }

    fn dispatch<F>(self, verb: &str, run: F) -> AssertResult
    where
        F: FnOnce(&dyn Comparisons, &AssertionContext) -> AssertResult<()>,
    {
        let mode = if self.ctx.flags.bignumber && self.comparisons.handles_bignumber() {
            Mode::Bignumber
        } else {
            Mode::Host
        };
        let outcome = run(self.comparisons.as_ref(), &self.ctx);
        trace_verb(verb, mode, self.ctx.flags.negate, &outcome);
        match outcome {
            Ok(()) => Ok(self),
            Err(err) => Err(err.prefixed(self.ctx.message.as_deref())),
        }
    }
}
