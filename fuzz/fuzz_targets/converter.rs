#![no_main]

use aivi_assert::{bignumber, expect, Value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4 * 1024 {
        return;
    }
    let text = String::from_utf8_lossy(data).into_owned();
    let Ok(value) = bignumber::convert(&Value::from(text.as_str())) else {
        return;
    };

    // Whatever parses must compare equal to its canonical spelling.
    let canonical = value.to_string();
    assert!(expect(text.as_str()).bignumber().equal(canonical.as_str()).is_ok());
    assert!(expect(Value::from(value)).bignumber().equal(text).is_ok());
});
