//! Bridge from cursor pairs to std iterators.

use std::iter::FusedIterator;

use crate::cursor::Cursor;
use crate::error;

/// A std iterator over the half-open cursor range `[front, back)`.
///
/// Both ends move towards each other; iteration stops once they meet, so
/// mixing `next` and `next_back` never yields an element twice.
///
/// # Example
///
/// ```
/// use bicursor::{Array, Container};
///
/// let array: Array<i32> = [1, 2, 3, 4].into_iter().collect();
///
/// let forward: Vec<i32> = array.range().copied().collect();
/// let backward: Vec<i32> = array.rev_range().copied().collect();
///
/// assert_eq!(forward, vec![1, 2, 3, 4]);
/// assert_eq!(backward, vec![4, 3, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Range<C> {
	front: C,
	back: C,
}

impl<C: Cursor> Range<C> {
	/// Creates a range from `front` (inclusive) to `back` (exclusive).
	///
	/// Fails with [`Error::OutOfRange`](error::Error::OutOfRange) if `back`
	/// is not reachable from `front` by `next()`, and with
	/// [`Error::InvalidIterator`](error::Error::InvalidIterator) if the two
	/// cursors walk different containers.
	pub fn new(front: C, back: C) -> error::Result<Range<C>> {
		front.distance_to(&back)?;
		Ok(Range::between(front, back))
	}

	/// Creates a range from a pair already known to be ordered.
	pub(crate) fn between(front: C, back: C) -> Range<C> {
		Range {
			front,
			back,
		}
	}

	/// Returns the cursor at the front of the remaining range.
	pub fn front(&self) -> &C {
		&self.front
	}

	/// Returns the cursor one past the back of the remaining range.
	pub fn back(&self) -> &C {
		&self.back
	}

	/// Splits the range back into its cursors.
	pub fn into_cursors(self) -> (C, C) {
		(self.front, self.back)
	}
}

impl<C: Cursor> Iterator for Range<C> {
	type Item = C::Item;

	fn next(&mut self) -> Option<Self::Item> {
		if self.front == self.back {
			return None;
		}
		let item = self.front.value().ok()?;
		self.front.next().ok()?;
		Some(item)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		// Both ends only move towards each other, so the pair stays ordered.
		let n = self.front.distance_to(&self.back).unwrap_or(0);
		(n, Some(n))
	}
}

impl<C: Cursor> DoubleEndedIterator for Range<C> {
	fn next_back(&mut self) -> Option<Self::Item> {
		if self.front == self.back {
			return None;
		}
		let mut last = self.back.clone();
		last.prev().ok()?;
		let item = last.value().ok()?;
		self.back = last;
		Some(item)
	}
}

impl<C: Cursor> ExactSizeIterator for Range<C> {}

impl<C: Cursor> FusedIterator for Range<C> {}
