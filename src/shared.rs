//! External synchronization for containers shared between threads.
//!
//! Containers and cursors perform no locking of their own. `Shared` wraps any
//! container in a `parking_lot::RwLock` so that many readers can walk it with
//! cursors while writers are excluded.
//!
//! Cursors taken from a read guard borrow the guard, so they cannot outlive
//! it and no writer can mutate the container while they are in use. Positions
//! that must survive across a write are carried as [`Anchor`](crate::Anchor)s
//! and revalidated with [`Container::restore`](crate::Container::restore) under
//! the next guard.
//!
//! ```
//! use bicursor::{Array, Container, Shared};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let shared = Arc::new(Shared::new((0..100).collect::<Array<u64>>()));
//!
//! let readers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let shared = Arc::clone(&shared);
//!         thread::spawn(move || shared.read().range().sum::<u64>())
//!     })
//!     .collect();
//!
//! for reader in readers {
//!     assert_eq!(reader.join().unwrap(), 4950);
//! }
//! ```

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A container behind a reader-writer lock.
#[derive(Debug, Default)]
pub struct Shared<C> {
	inner: RwLock<C>,
}

impl<C> Shared<C> {
	/// Wraps a container.
	pub fn new(container: C) -> Shared<C> {
		Shared {
			inner: RwLock::new(container),
		}
	}

	/// Locks for shared access, blocking while a writer holds the lock.
	#[inline]
	pub fn read(&self) -> RwLockReadGuard<'_, C> {
		self.inner.read()
	}

	/// Locks for exclusive access, blocking until all readers are gone.
	#[inline]
	pub fn write(&self) -> RwLockWriteGuard<'_, C> {
		self.inner.write()
	}

	/// Locks for shared access without blocking.
	#[inline]
	pub fn try_read(&self) -> Option<RwLockReadGuard<'_, C>> {
		self.inner.try_read()
	}

	/// Locks for exclusive access without blocking.
	#[inline]
	pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, C>> {
		self.inner.try_write()
	}

	/// Returns the container without locking; the `&mut` proves exclusivity.
	#[inline]
	pub fn get_mut(&mut self) -> &mut C {
		self.inner.get_mut()
	}

	/// Unwraps the container.
	pub fn into_inner(self) -> C {
		self.inner.into_inner()
	}
}

impl<C> From<C> for Shared<C> {
	fn from(container: C) -> Self {
		Shared::new(container)
	}
}
