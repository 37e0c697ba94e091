#![forbid(unsafe_code)]

//! JSONL step logging for harness runs.
//!
//! Disabled unless `CFORM_HARNESS_LOG` is set to `1` or `true`. Each line
//! is one JSON object with keys in sorted order:
//!
//! ```json
//! {"processed":"5","remaining":"0","step":"flush","ts":"T000003"}
//! ```
//!
//! `ts` is a per-process sequence number rather than wall time so logs from
//! identical runs diff cleanly.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

/// Environment variable enabling step logs on stderr.
pub const HARNESS_LOG_ENV: &str = "CFORM_HARNESS_LOG";

/// Whether step logging is enabled.
#[must_use]
pub fn enabled() -> bool {
    std::env::var(HARNESS_LOG_ENV).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn next_ts() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("T{n:06}")
}

/// Format one JSONL record.
#[must_use]
pub fn format_step(ts: &str, step: &str, fields: &[(&str, &str)]) -> String {
    let mut record = Map::new();
    record.insert("ts".to_string(), Value::from(ts));
    record.insert("step".to_string(), Value::from(step));
    for (key, value) in fields {
        record.insert((*key).to_string(), Value::from(*value));
    }
    Value::Object(record).to_string()
}

/// Write a step record to stderr when logging is enabled.
pub fn log_step(step: &str, fields: &[(&str, &str)]) {
    if enabled() {
        eprintln!("{}", format_step(&next_ts(), step, fields));
    }
}
