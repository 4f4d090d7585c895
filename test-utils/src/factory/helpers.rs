//! Shared helper utilities for factory methods.

/// Counter for generating unique snowflake-like IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Values are offset into the snowflake range so they never collide with the small
/// hand-picked ids tests use directly.
///
/// # Returns
/// - `u64` - Next unique id
pub fn next_id() -> u64 {
    100_000_000_000_000_000 + COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}
