use std::cell::{Cell, RefCell};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::error::AssertionError;

const DEBUG_MAX_CHARS: usize = 200;

thread_local! {
    static TRACE_OVERRIDE: Cell<Option<bool>> = const { Cell::new(None) };
    static TRACE_SINK: RefCell<Option<Vec<serde_json::Value>>> = const { RefCell::new(None) };
}

/// Forces tracing on or off for the current thread; `None` defers to
/// `AIVI_TRACE_ASSERT` again.
pub fn set_trace_override(enabled: Option<bool>) {
    TRACE_OVERRIDE.with(|cell| cell.set(enabled));
}

pub fn trace_enabled() -> bool {
    TRACE_OVERRIDE.with(|cell| {
        cell.get()
            .unwrap_or_else(|| std::env::var("AIVI_TRACE_ASSERT").is_ok_and(|v| v == "1"))
    })
}

/// Diverts events emitted on this thread into memory until
/// [`take_captured_events`] is called.
pub fn capture_events() {
    TRACE_SINK.with(|sink| *sink.borrow_mut() = Some(Vec::new()));
}

pub fn take_captured_events() -> Vec<serde_json::Value> {
    TRACE_SINK.with(|sink| sink.borrow_mut().take().unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Host,
    Bignumber,
}

#[derive(Serialize)]
struct AssertEvent<'a> {
    kind: &'static str,
    verb: &'a str,
    mode: Mode,
    negate: bool,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    ts: u64,
}

pub(crate) fn trace_verb(
    verb: &str,
    mode: Mode,
    negate: bool,
    outcome: &Result<(), AssertionError>,
) {
    if !trace_enabled() {
        return;
    }
    let failure = outcome.as_ref().err();
    let event = AssertEvent {
        kind: "assert",
        verb,
        mode,
        negate,
        passed: failure.is_none(),
        actual: failure.and_then(|e| e.actual.as_deref()).map(truncate_debug_text),
        expected: failure.and_then(|e| e.expected.as_deref()).map(truncate_debug_text),
        message: failure.map(|e| e.message.as_str()),
        ts: now_unix_ms(),
    };
    if let Ok(event) = serde_json::to_value(&event) {
        emit_debug_event(event);
    }
}

fn emit_debug_event(event: serde_json::Value) {
    let captured = TRACE_SINK.with(|sink| match sink.borrow_mut().as_mut() {
        Some(events) => {
            events.push(event.clone());
            true
        }
        None => false,
    });
    if captured {
        return;
    }
    // JSONL on stderr, one event per line.
    if let Ok(line) = serde_json::to_string(&event) {
        eprintln!("{line}");
    }
}

fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis() as u64)
        .unwrap_or(0)
}

fn truncate_debug_text(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars().take(DEBUG_MAX_CHARS) {
        out.push(ch);
    }
    if text.chars().count() > DEBUG_MAX_CHARS {
        out.push_str("...");
    }
    out
}
