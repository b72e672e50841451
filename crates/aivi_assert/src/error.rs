use crate::assertion::Assertion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An operand could not be turned into a big integer.
    Conversion,
    /// The operands were fine but the asserted relation did not hold.
    Comparison,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AssertionError {
    pub kind: FailureKind,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl AssertionError {
    pub fn conversion(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Conversion,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    pub fn comparison(
        message: impl Into<String>,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Self {
        Self {
            kind: FailureKind::Comparison,
            message: message.into(),
            expected,
            actual,
        }
    }

    pub(crate) fn prefixed(mut self, prefix: Option<&str>) -> Self {
        if let Some(prefix) = prefix {
            self.message = format!("{prefix}: {}", self.message);
        }
        self
    }
}

pub type AssertResult<T = Assertion> = Result<T, AssertionError>;
