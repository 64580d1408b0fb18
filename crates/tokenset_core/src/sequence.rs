//! Process-wide counters for bound tokens and container bindings.
//!
//! Every container binding draws token indexes from the same counter, so
//! indexes are unique across the process and increase in bind order. Each
//! `ContainerBuilder::build` also draws a binding id, which tells apart two
//! containers defined under the same path. Neither counter is ever reset.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT: AtomicU64 = AtomicU64::new(1);
static BINDINGS: AtomicU64 = AtomicU64::new(1);

/// Draws the next sequence index.
pub fn next() -> u64 {
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Draws the id of a new container binding.
pub fn next_binding() -> u64 {
    BINDINGS.fetch_add(1, Ordering::Relaxed)
}

/// Returns the index the next bound token will receive.
#[must_use]
pub fn peek() -> u64 {
    NEXT.load(Ordering::Relaxed)
}
