//! Shared helper utilities for factory methods.

/// Counter for generating unique Discord-like ids in tests.
///
/// Starts well above zero since snowflake ids are non-zero.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(100_000);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}
