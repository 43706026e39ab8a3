//! Fuzz target for row-limit enforcement.
//!
//! Goal: enforcement should **never panic**, and applying it to its own
//! output must be a no-op.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_limit
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sqlgate_domain::structure::check_structure;
use sqlgate_domain::{PolicyConfig, normalize, with_row_limit};

/// Structured input so libFuzzer explores both the text and the page size.
#[derive(Arbitrary, Debug)]
struct LimitInput {
    sql: String,
    requested: u64,
}

fuzz_target!(|input: LimitInput| {
    if input.sql.len() > 2048 {
        return;
    }

    let policy = PolicyConfig::analytics_default();
    let normalized = normalize(&input.sql);
    let once = with_row_limit(&normalized, input.requested, &policy);

    // Only text that passes the structural gate is guaranteed a stable rewrite.
    if check_structure(&normalized, &policy).is_none() {
        let twice = with_row_limit(&once.sql, input.requested, &policy);
        assert_eq!(twice.sql, once.sql);
    }
});
