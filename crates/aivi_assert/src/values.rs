mod core;
mod equality;

pub use self::core::{format_value, Value};
pub use self::equality::{deep_equal, deep_equal_with, strict_equal, Verdict};
