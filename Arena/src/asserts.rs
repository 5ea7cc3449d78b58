//! Process-wide assertion toggles for internal invariants.
//!
//! Mirrors the `ShouldAssert`/`ShouldAssertAbort` pair from the allocator's
//! original C counterpart: invariant violations are fatal by default, but
//! tests can disable the abort (or the assertion entirely) to exercise a
//! violating code path and observe its sentinel result instead of crashing
//! the test process.

use std::sync::atomic::{AtomicBool, Ordering};

static SHOULD_ASSERT: AtomicBool = AtomicBool::new(true);
static SHOULD_ABORT: AtomicBool = AtomicBool::new(true);

/// Checks an internal invariant. No-op if `cond` holds or assertions are
/// disabled; otherwise logs and, unless aborting is disabled, panics.
pub fn invariant(cond: bool, message: impl AsRef<str>) {
    if cond || !SHOULD_ASSERT.load(Ordering::SeqCst) {
        return;
    }
    tracing::error!("assertion failed: {}", message.as_ref());
    if SHOULD_ABORT.load(Ordering::SeqCst) {
        panic!("assertion failed: {}", message.as_ref());
    }
}

/// Test-only hook, left compiled in (not `cfg(test)`-gated) so downstream
/// crates' own tests can reach it across the crate boundary.
pub fn set_should_assert(enabled: bool) {
    SHOULD_ASSERT.store(enabled, Ordering::SeqCst);
}

/// Test-only hook, left compiled in for the same reason as
/// [`set_should_assert`].
pub fn set_should_abort(enabled: bool) {
    SHOULD_ABORT.store(enabled, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabling_assert_suppresses_panic() {
        set_should_assert(false);
        invariant(false, "should not panic");
        set_should_assert(true);
    }
}
