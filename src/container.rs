//! The `Container` capability shared by array-like and map-like containers.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::cursor::{Anchor, Cursor};
use crate::error;
use crate::range::Range;
use crate::reverse::ReverseCursor;

/// Source of container identities. Zero is never handed out.
static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a container instance.
///
/// Cursor equality compares source addresses, but anchors outlive the borrow
/// of their container and may even outlive the container itself, so they need
/// an identity that is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
	pub(crate) fn next() -> ContainerId {
		ContainerId(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
	}

	/// Returns the raw identity value.
	pub fn get(self) -> u64 {
		self.0
	}
}

/// Identity and structural generation of a container.
///
/// Every structural mutation (one that can shift positions) bumps the
/// generation. Anchors record the generation they were taken at and are only
/// restorable while it is unchanged.
#[derive(Debug)]
pub(crate) struct Stamp {
	id: ContainerId,
	generation: u64,
}

impl Stamp {
	pub(crate) fn new() -> Stamp {
		Stamp {
			id: ContainerId::next(),
			generation: 0,
		}
	}

	#[inline]
	pub(crate) fn id(&self) -> ContainerId {
		self.id
	}

	#[inline]
	pub(crate) fn generation(&self) -> u64 {
		self.generation
	}

	/// Records a structural mutation.
	#[inline]
	pub(crate) fn bump(&mut self) {
		self.generation = self.generation.wrapping_add(1);
		#[cfg(feature = "tracing")]
		tracing::trace!(container = self.id.0, generation = self.generation, "structural mutation");
	}

	#[inline]
	pub(crate) fn anchor(&self, position: usize) -> Anchor {
		Anchor::new(self.id, self.generation, position)
	}

	/// Checks that `anchor` was taken from this container at the current
	/// generation and returns its position.
	pub(crate) fn check(&self, anchor: &Anchor) -> error::Result<usize> {
		if anchor.source() != self.id || anchor.generation() != self.generation {
			#[cfg(feature = "tracing")]
			tracing::debug!(
				container = self.id.0,
				generation = self.generation,
				anchor_source = anchor.source().0,
				anchor_generation = anchor.generation(),
				"rejected stale anchor"
			);
			return Err(error::Error::InvalidIterator);
		}
		Ok(anchor.position())
	}
}

impl Clone for Stamp {
	/// A clone is a different container instance and gets a fresh identity.
	fn clone(&self) -> Self {
		Stamp::new()
	}
}

/// A container that hands out bidirectional cursors over its elements.
///
/// Implementors provide the forward endpoints; the reverse endpoints and the
/// std iterator bridges are derived from them.
///
/// # Example
///
/// ```
/// use bicursor::{Array, Container, Cursor};
///
/// let array: Array<i32> = [10, 20, 30].into_iter().collect();
///
/// assert_eq!(*array.begin().value()?, 10);
/// assert_eq!(*array.rbegin().value()?, 30);
/// assert!(array.end().value().is_err());
/// # Ok::<(), bicursor::error::Error>(())
/// ```
pub trait Container {
	/// The cursor type borrowing this container.
	type Cursor<'c>: Cursor
	where
		Self: 'c;

	/// Returns the number of elements.
	fn len(&self) -> usize;

	/// Returns `true` if the container holds no elements.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns a cursor at the first element, or the end sentinel if empty.
	fn begin(&self) -> Self::Cursor<'_>;

	/// Returns the end sentinel, one past the last element.
	fn end(&self) -> Self::Cursor<'_>;

	/// Re-attaches a detached position to this container.
	///
	/// Fails with [`Error::InvalidIterator`](error::Error::InvalidIterator) if
	/// the anchor comes from another container or if a structural mutation
	/// happened since it was taken.
	fn restore(&self, anchor: &Anchor) -> error::Result<Self::Cursor<'_>>;

	/// Returns a reverse cursor at the last element (wraps `end()`).
	fn rbegin(&self) -> ReverseCursor<Self::Cursor<'_>> {
		ReverseCursor::new(self.end())
	}

	/// Returns the reverse end sentinel (wraps `begin()`).
	fn rend(&self) -> ReverseCursor<Self::Cursor<'_>> {
		ReverseCursor::new(self.begin())
	}

	/// Returns a std iterator over `[begin, end)`.
	fn range(&self) -> Range<Self::Cursor<'_>> {
		Range::between(self.begin(), self.end())
	}

	/// Returns a std iterator over `[rbegin, rend)`.
	fn rev_range(&self) -> Range<ReverseCursor<Self::Cursor<'_>>> {
		Range::between(self.rbegin(), self.rend())
	}
}
