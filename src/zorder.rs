//! Stacking-priority allocation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Stacking baseline for non-interactive content. Allocated values are always
/// strictly above this.
pub const Z_ORDER_BASELINE: u64 = 1000;

/// Hands out unique, strictly increasing stacking priorities.
///
/// The engine runs on a single event thread, but the counter is atomic so the
/// allocator stays correct if surfaces are ever raised from more than one
/// context.
#[derive(Debug)]
pub struct ZOrderAllocator {
    next: AtomicU64,
}

impl Default for ZOrderAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ZOrderAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(Z_ORDER_BASELINE),
        }
    }

    /// Returns a value greater than every previously returned value and
    /// greater than [`Z_ORDER_BASELINE`]. Never fails.
    pub fn allocate(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Highest value handed out so far, or the baseline if none.
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocations_are_strictly_increasing() {
        let alloc = ZOrderAllocator::new();
        let mut prev = Z_ORDER_BASELINE;
        for _ in 0..64 {
            let z = alloc.allocate();
            assert!(z > prev);
            prev = z;
        }
    }

    #[test]
    fn first_allocation_clears_the_baseline() {
        let alloc = ZOrderAllocator::new();
        assert!(alloc.allocate() > Z_ORDER_BASELINE);
    }

    #[test]
    fn current_tracks_last_allocation() {
        let alloc = ZOrderAllocator::new();
        assert_eq!(alloc.current(), Z_ORDER_BASELINE);
        let z = alloc.allocate();
        assert_eq!(alloc.current(), z);
    }
}
