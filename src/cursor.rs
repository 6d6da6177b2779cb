//! Cursors: copyable, non-owning traversal positions.
//!
//! A cursor borrows its container and points either at an element or at the
//! end sentinel one past the last element. Cursors move one step at a time in
//! both directions and never mutate the container they walk.
//!
//! ```text
//!  begin                 end
//!    │                    │
//!    ▼                    ▼
//!  ┌────┬────┬────┐ ┌ ─ ─ ┐
//!  │ 10 │ 20 │ 30 │   end
//!  └────┴────┴────┘ └ ─ ─ ┘
//!  ▲                ▲
//!  │                │
//! rend             rbegin       (reverse cursors dereference base - 1)
//! ```
//!
//! Because a cursor holds a shared borrow, the container cannot be mutated
//! while the cursor is alive. A position that has to survive a mutation is
//! detached into an [`Anchor`] and re-attached with
//! [`Container::restore`](crate::Container::restore), which is where stale
//! positions are detected.

use std::fmt;

use crate::container::ContainerId;
use crate::error;

/// A bidirectional cursor over the elements of one container.
///
/// Equality (`PartialEq` and [`Cursor::equals`]) holds iff both cursors refer
/// to the same position of the same container instance.
pub trait Cursor: Clone + PartialEq {
	/// What dereferencing yields: `&T` for arrays, [`Entry`](crate::Entry) for maps.
	type Item;

	/// Returns the element at the current position.
	///
	/// Fails with [`Error::OutOfRange`](error::Error::OutOfRange) at the end sentinel.
	fn value(&self) -> error::Result<Self::Item>;

	/// Moves one position forward.
	///
	/// Fails with [`Error::OutOfRange`](error::Error::OutOfRange) at the end
	/// sentinel, leaving the cursor unchanged.
	fn next(&mut self) -> error::Result<()>;

	/// Moves one position backward.
	///
	/// Fails with [`Error::OutOfRange`](error::Error::OutOfRange) at the first
	/// position, leaving the cursor unchanged.
	fn prev(&mut self) -> error::Result<()>;

	/// Detaches the current position from the container borrow.
	fn anchor(&self) -> Anchor;

	/// Returns `true` iff both cursors refer to the same position of the same
	/// container instance.
	#[inline]
	fn equals(&self, other: &Self) -> bool {
		self == other
	}

	/// Returns the number of `next()` steps needed to reach `last`.
	///
	/// Fails with [`Error::InvalidIterator`](error::Error::InvalidIterator) if
	/// the cursors belong to different containers, and with
	/// [`Error::OutOfRange`](error::Error::OutOfRange) if `last` lies before
	/// `self`.
	fn distance_to(&self, last: &Self) -> error::Result<usize> {
		if self.anchor().source() != last.anchor().source() {
			return Err(error::Error::InvalidIterator);
		}

		let mut cursor = self.clone();
		let mut steps = 0;
		while cursor != *last {
			cursor.next()?;
			steps += 1;
		}
		Ok(steps)
	}

	/// Moves `n` positions forward. On failure the cursor is left unchanged.
	fn advance_by(&mut self, n: usize) -> error::Result<()> {
		let mut cursor = self.clone();
		for _ in 0..n {
			cursor.next()?;
		}
		*self = cursor;
		Ok(())
	}

	/// Moves `n` positions backward. On failure the cursor is left unchanged.
	fn retreat_by(&mut self, n: usize) -> error::Result<()> {
		let mut cursor = self.clone();
		for _ in 0..n {
			cursor.prev()?;
		}
		*self = cursor;
		Ok(())
	}

	/// Consumes the cursor and returns its successor.
	fn advanced(mut self) -> error::Result<Self> {
		self.next()?;
		Ok(self)
	}

	/// Consumes the cursor and returns its predecessor.
	fn retreated(mut self) -> error::Result<Self> {
		self.prev()?;
		Ok(self)
	}
}

/// Returns the number of `next()` steps from `first` to `last`.
///
/// # Example
///
/// ```
/// use bicursor::{cursor, Array, Container};
///
/// let array: Array<u8> = (0..5).collect();
/// assert_eq!(cursor::distance(&array.begin(), &array.end())?, array.len());
/// assert_eq!(cursor::distance(&array.rbegin(), &array.rend())?, array.len());
/// # Ok::<(), bicursor::error::Error>(())
/// ```
#[inline]
pub fn distance<C: Cursor>(first: &C, last: &C) -> error::Result<usize> {
	first.distance_to(last)
}

/// A cursor position detached from the borrow of its container.
///
/// An anchor records which container it came from, the structural generation
/// of that container at the time, and the position. It can be stored, sent to
/// another thread, or kept across mutations, and later handed back to
/// [`Container::restore`](crate::Container::restore) or a container's `erase`.
/// Restoring succeeds only against the same container and only while no
/// structural mutation has happened since the anchor was taken.
///
/// Anchors of reverse cursors record the wrapped forward position; wrap the
/// restored cursor in a [`ReverseCursor`](crate::ReverseCursor) again.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
	source: ContainerId,
	generation: u64,
	position: usize,
}

impl Anchor {
	#[inline]
	pub(crate) fn new(source: ContainerId, generation: u64, position: usize) -> Anchor {
		Anchor {
			source,
			generation,
			position,
		}
	}

	/// The identity of the container this anchor was taken from.
	#[inline]
	pub fn source(&self) -> ContainerId {
		self.source
	}

	/// The structural generation of the source at the time the anchor was taken.
	#[inline]
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// The forward position (`0..=len`) recorded by this anchor.
	#[inline]
	pub fn position(&self) -> usize {
		self.position
	}
}

impl fmt::Debug for Anchor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Anchor")
			.field("source", &self.source.get())
			.field("generation", &self.generation)
			.field("position", &self.position)
			.finish()
	}
}
