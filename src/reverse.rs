//! Reverse adapter over any bidirectional cursor.

use crate::cursor::{Anchor, Cursor};
use crate::error;

/// Presents the sequence of a wrapped cursor in reverse order.
///
/// The wrapped (base) cursor sits one past the element the reverse cursor
/// refers to, so `rbegin()` wraps `end()` and `rend()` wraps `begin()`:
///
/// ```text
/// forward:   begin=0    1    2    end=3
/// reverse:   rend       2    1    rbegin       (value = base - 1)
/// ```
///
/// Moving the reverse cursor forward moves the base backward and vice versa.
/// Wrapping a `ReverseCursor` in another one restores forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReverseCursor<C> {
	base: C,
}

impl<C: Cursor> ReverseCursor<C> {
	/// Wraps `base`. The new cursor refers to the element before `base`.
	#[inline]
	pub fn new(base: C) -> ReverseCursor<C> {
		ReverseCursor {
			base,
		}
	}

	/// Returns the wrapped forward cursor.
	#[inline]
	pub fn base(&self) -> &C {
		&self.base
	}

	/// Unwraps the forward cursor.
	#[inline]
	pub fn into_base(self) -> C {
		self.base
	}
}

impl<C: Cursor> From<C> for ReverseCursor<C> {
	fn from(base: C) -> Self {
		ReverseCursor::new(base)
	}
}

impl<C: Cursor> Cursor for ReverseCursor<C> {
	type Item = C::Item;

	fn value(&self) -> error::Result<Self::Item> {
		let mut target = self.base.clone();
		target.prev()?;
		target.value()
	}

	#[inline]
	fn next(&mut self) -> error::Result<()> {
		self.base.prev()
	}

	#[inline]
	fn prev(&mut self) -> error::Result<()> {
		self.base.next()
	}

	#[inline]
	fn anchor(&self) -> Anchor {
		self.base.anchor()
	}

	// Reverse distance is the forward distance between the bases, swapped.
	fn distance_to(&self, last: &Self) -> error::Result<usize> {
		last.base.distance_to(&self.base)
	}
}
