//! Allocation tracking for tests.
//!
//! Provides a global allocator that counts allocations and live bytes. Tests
//! use it to check that cursor walks and reverse adapters never touch the
//! heap, and that dropping a spilled container returns everything it took.
//!
//! # Usage
//!
//! In a test binary that wants to track allocations:
//!
//! ```ignore
//! use bicursor::alloc::TrackingAllocator;
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator;
//!
//! #[test]
//! fn walk_does_not_allocate() {
//!     let array: bicursor::Array<u32> = (0..1000).collect();
//!     let (sum, allocs) = bicursor::alloc::count_allocations(|| array.range().sum::<u32>());
//!     assert_eq!(allocs, 0);
//! }
//! ```
//!
//! # Caveats
//!
//! Counters are global. Tests that assert on them must not run concurrently
//! with other allocating tests in the same binary.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

/// Total number of allocations since the last reset.
pub static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Total number of deallocations since the last reset.
pub static DEALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Bytes currently allocated relative to the last reset.
pub static BYTES_ALLOCATED: AtomicIsize = AtomicIsize::new(0);

/// A system allocator wrapper that updates the counters above.
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
		BYTES_ALLOCATED.fetch_add(layout.size() as isize, Ordering::Relaxed);
		System.alloc(layout)
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		DEALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
		BYTES_ALLOCATED.fetch_sub(layout.size() as isize, Ordering::Relaxed);
		System.dealloc(ptr, layout)
	}

	unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
		ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
		BYTES_ALLOCATED.fetch_add(layout.size() as isize, Ordering::Relaxed);
		System.alloc_zeroed(layout)
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		// A realloc counts as one allocation; the byte delta may be negative.
		ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
		DEALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
		BYTES_ALLOCATED.fetch_add(new_size as isize - layout.size() as isize, Ordering::Relaxed);
		System.realloc(ptr, layout, new_size)
	}
}

/// Allocation statistics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationStats {
	pub alloc_count: usize,
	pub dealloc_count: usize,
	pub bytes_allocated: isize,
}

/// Resets all counters to zero.
pub fn reset_counters() {
	ALLOC_COUNT.store(0, Ordering::SeqCst);
	DEALLOC_COUNT.store(0, Ordering::SeqCst);
	BYTES_ALLOCATED.store(0, Ordering::SeqCst);
}

/// Returns the current counters.
pub fn get_stats() -> AllocationStats {
	AllocationStats {
		alloc_count: ALLOC_COUNT.load(Ordering::SeqCst),
		dealloc_count: DEALLOC_COUNT.load(Ordering::SeqCst),
		bytes_allocated: BYTES_ALLOCATED.load(Ordering::SeqCst),
	}
}

/// Runs `f` and returns its result with the number of allocations it made.
pub fn count_allocations<R, F: FnOnce() -> R>(f: F) -> (R, usize) {
	let before = ALLOC_COUNT.load(Ordering::SeqCst);
	let result = f();
	let after = ALLOC_COUNT.load(Ordering::SeqCst);
	(result, after - before)
}

/// Asserts that every byte allocated since the last reset has been freed.
///
/// # Panics
///
/// Panics with the counters if bytes are still allocated.
pub fn check_no_leaks() {
	let stats = get_stats();
	if stats.bytes_allocated != 0 {
		panic!(
			"Memory leak detected!\n\
             Allocations: {}\n\
             Deallocations: {}\n\
             Bytes still allocated: {}",
			stats.alloc_count, stats.dealloc_count, stats.bytes_allocated
		);
	}
}
