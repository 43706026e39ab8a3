//! Fuzz target for the full gateway pipeline.
//!
//! Goal: `evaluate` should **never panic** on any input, and an accepted
//! verdict must never carry violations.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evaluate
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlgate_domain::{PolicyConfig, evaluate};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    let policy = PolicyConfig::analytics_default();
    let verdict = evaluate(text, &policy);
    assert_eq!(verdict.accepted, verdict.violations.is_empty());
});
