//! BDD-style assertions over aivi values with big-integer aware verbs.
//!
//! ```
//! use aivi_assert::expect;
//!
//! # fn main() -> Result<(), aivi_assert::AssertionError> {
//! expect("123456789012345678901234567890")
//!     .bignumber()
//!     .to()
//!     .be()
//!     .above("123456789012345678901234567889")?
//!     .and()
//!     .below("123456789012345678901234567891")?;
//! # Ok(())
//! # }
//! ```
mod assertion;
pub mod bignumber;
mod comparisons;
mod error;
pub mod trace;
mod values;

pub use assertion::{expect, Assertion, AssertionContext, Expectations, Flags};
pub use comparisons::{Comparisons, HostComparisons};
pub use error::{AssertResult, AssertionError, FailureKind};
pub use values::{deep_equal, deep_equal_with, format_value, strict_equal, Value, Verdict};

pub use num_bigint::BigInt;
