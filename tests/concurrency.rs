//! # Concurrency Tests for Bicursor
//!
//! Containers do no locking of their own; these tests exercise the `Shared`
//! wrapper with real threads: many readers walking cursors while writers
//! mutate between read sections.

use bicursor::error::Error;
use bicursor::{Array, Container, Cursor, Map, Shared};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_readers_see_consistent_walks() {
	let shared = Arc::new(Shared::new((0..10_000u64).collect::<Array<u64>>()));

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let shared = Arc::clone(&shared);
			thread::spawn(move || {
				let guard = shared.read();
				let forward: u64 = guard.range().sum();
				let backward: u64 = guard.rev_range().sum();
				(forward, backward)
			})
		})
		.collect();

	for handle in handles {
		let (forward, backward) = handle.join().unwrap();
		assert_eq!(forward, 49_995_000);
		assert_eq!(forward, backward);
	}
}

#[test]
fn readers_and_writer_interleave() {
	let shared = Arc::new(Shared::new(Map::<u32, u32>::new()));
	let done = Arc::new(AtomicBool::new(false));

	let writer = {
		let shared = Arc::clone(&shared);
		let done = Arc::clone(&done);
		thread::spawn(move || {
			for i in 0..2_000 {
				shared.write().insert(i, i * 2);
			}
			done.store(true, Ordering::Release);
		})
	};

	let readers: Vec<_> = (0..4)
		.map(|_| {
			let shared = Arc::clone(&shared);
			let done = Arc::clone(&done);
			thread::spawn(move || {
				let mut walks = 0usize;
				loop {
					let finished = done.load(Ordering::Acquire);
					{
						let guard = shared.read();
						let mut previous = None;
						for entry in guard.range() {
							assert_eq!(*entry.value(), *entry.key() * 2);
							if let Some(prev) = previous {
								assert!(prev < *entry.key());
							}
							previous = Some(*entry.key());
						}
						walks += 1;
					}
					if finished {
						break;
					}
				}
				walks
			})
		})
		.collect();

	writer.join().unwrap();
	for reader in readers {
		assert!(reader.join().unwrap() > 0);
	}

	let map = Arc::try_unwrap(shared).unwrap().into_inner();
	map.assert_invariants();
	assert_eq!(map.len(), 2_000);
}

#[test]
fn anchors_cross_threads_and_revalidate() {
	let shared = Arc::new(Shared::new((0..100).collect::<Array<i32>>()));
	let anchor = shared.read().cursor_at(42).unwrap().anchor();

	let reader = {
		let shared = Arc::clone(&shared);
		thread::spawn(move || {
			let guard = shared.read();
			let cursor = guard.restore(&anchor)?;
			cursor.value().copied()
		})
	};
	assert_eq!(reader.join().unwrap(), Ok(42));

	shared.write().push(100);

	let reader = {
		let shared = Arc::clone(&shared);
		thread::spawn(move || {
			let guard = shared.read();
			guard.restore(&anchor).map(|c| c.index())
		})
	};
	assert_eq!(reader.join().unwrap(), Err(Error::InvalidIterator));
}
