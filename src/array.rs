//! Array-like container with index-based cursors.

use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use crate::container::{Container, ContainerId, Stamp};
use crate::cursor::{Anchor, Cursor};
use crate::error;
use crate::range::Range;

/// An ordered, index-addressable, growable sequence.
///
/// Elements live inline for up to `N` items and spill to the heap beyond
/// that. Iteration order is index order.
///
/// # Cursor Validity
///
/// Cursors borrow the array, so the compiler rejects any mutation while one
/// is alive. Positions that must outlive a mutation are detached with
/// [`Cursor::anchor`] and re-attached with [`Container::restore`]:
///
/// - **Structural** mutations (`push`, `pop`, `insert`, `remove`, `truncate`,
///   `clear`, `erase`) invalidate every outstanding anchor.
/// - **Non-structural** mutations (`get_mut`, `set`, `as_mut_slice`) leave
///   anchors valid, since no element changes position.
pub struct GenericArray<T, const N: usize> {
	items: SmallVec<[T; N]>,
	stamp: Stamp,
}

impl<T, const N: usize> Default for GenericArray<T, N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, const N: usize> GenericArray<T, N> {
	/// Creates an empty array.
	pub fn new() -> Self {
		GenericArray {
			items: SmallVec::new(),
			stamp: Stamp::new(),
		}
	}

	/// Creates an empty array with room for at least `capacity` elements.
	pub fn with_capacity(capacity: usize) -> Self {
		GenericArray {
			items: SmallVec::with_capacity(capacity),
			stamp: Stamp::new(),
		}
	}

	/// Returns the identity of this array instance.
	pub fn id(&self) -> ContainerId {
		self.stamp.id()
	}

	/// Returns the number of structural mutations performed so far.
	pub fn generation(&self) -> u64 {
		self.stamp.generation()
	}

	/// Returns the number of elements.
	#[inline]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns `true` if the array holds no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Returns `true` if the elements have spilled from inline storage to the heap.
	#[inline]
	pub fn spilled(&self) -> bool {
		self.items.spilled()
	}

	/// Returns the element at `index`.
	#[inline]
	pub fn get(&self, index: usize) -> Option<&T> {
		self.items.get(index)
	}

	/// Returns the first element.
	#[inline]
	pub fn first(&self) -> Option<&T> {
		self.items.first()
	}

	/// Returns the last element.
	#[inline]
	pub fn last(&self) -> Option<&T> {
		self.items.last()
	}

	/// Returns the elements as a slice.
	#[inline]
	pub fn as_slice(&self) -> &[T] {
		&self.items
	}

	/// Returns a mutable reference to an element. Not a structural mutation.
	#[inline]
	pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
		self.items.get_mut(index)
	}

	/// Returns the elements as a mutable slice. Not a structural mutation.
	#[inline]
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		&mut self.items
	}

	/// Replaces the element at `index`, returning the old one.
	///
	/// Not a structural mutation. Fails with
	/// [`Error::OutOfRange`](error::Error::OutOfRange) if `index >= len`.
	pub fn set(&mut self, index: usize, value: T) -> error::Result<T> {
		let slot = self.items.get_mut(index).ok_or(error::Error::OutOfRange)?;
		Ok(std::mem::replace(slot, value))
	}

	/// Appends an element.
	pub fn push(&mut self, value: T) {
		self.items.push(value);
		self.stamp.bump();
	}

	/// Removes and returns the last element.
	pub fn pop(&mut self) -> Option<T> {
		let value = self.items.pop()?;
		self.stamp.bump();
		Some(value)
	}

	/// Inserts an element at `index`, shifting later elements right.
	///
	/// Fails with [`Error::OutOfRange`](error::Error::OutOfRange) if `index > len`.
	pub fn insert(&mut self, index: usize, value: T) -> error::Result<()> {
		if index > self.items.len() {
			return Err(error::Error::OutOfRange);
		}
		self.items.insert(index, value);
		self.stamp.bump();
		Ok(())
	}

	/// Removes the element at `index`, shifting later elements left.
	///
	/// Fails with [`Error::OutOfRange`](error::Error::OutOfRange) if `index >= len`.
	pub fn remove(&mut self, index: usize) -> error::Result<T> {
		if index >= self.items.len() {
			return Err(error::Error::OutOfRange);
		}
		let value = self.items.remove(index);
		self.stamp.bump();
		Ok(value)
	}

	/// Removes the element an anchor points at.
	///
	/// Fails with [`Error::InvalidIterator`](error::Error::InvalidIterator) if
	/// the anchor is stale or foreign, and with
	/// [`Error::OutOfRange`](error::Error::OutOfRange) if it is the end sentinel.
	/// All outstanding anchors, including `anchor`, are stale afterwards.
	pub fn erase(&mut self, anchor: &Anchor) -> error::Result<T> {
		let pos = self.stamp.check(anchor)?;
		self.remove(pos)
	}

	/// Shortens the array to `len` elements. No-op if already shorter.
	pub fn truncate(&mut self, len: usize) {
		if len < self.items.len() {
			self.items.truncate(len);
			self.stamp.bump();
		}
	}

	/// Removes all elements. No-op if already empty.
	pub fn clear(&mut self) {
		if !self.items.is_empty() {
			self.items.clear();
			self.stamp.bump();
		}
	}

	/// Returns a cursor at `index`; `index == len` gives the end sentinel.
	///
	/// Fails with [`Error::OutOfRange`](error::Error::OutOfRange) if `index > len`.
	pub fn cursor_at(&self, index: usize) -> error::Result<ArrayCursor<'_, T, N>> {
		if index > self.items.len() {
			return Err(error::Error::OutOfRange);
		}
		Ok(ArrayCursor {
			source: self,
			pos: index,
		})
	}
}

impl<T, const N: usize> Container for GenericArray<T, N> {
	type Cursor<'c>
		= ArrayCursor<'c, T, N>
	where
		Self: 'c;

	#[inline]
	fn len(&self) -> usize {
		self.items.len()
	}

	#[inline]
	fn begin(&self) -> ArrayCursor<'_, T, N> {
		ArrayCursor {
			source: self,
			pos: 0,
		}
	}

	#[inline]
	fn end(&self) -> ArrayCursor<'_, T, N> {
		ArrayCursor {
			source: self,
			pos: self.items.len(),
		}
	}

	fn restore(&self, anchor: &Anchor) -> error::Result<ArrayCursor<'_, T, N>> {
		let pos = self.stamp.check(anchor)?;
		// Same generation means no structural change, so the position is in range.
		debug_assert!(pos <= self.items.len());
		Ok(ArrayCursor {
			source: self,
			pos,
		})
	}
}

impl<T: Clone, const N: usize> Clone for GenericArray<T, N> {
	fn clone(&self) -> Self {
		GenericArray {
			items: self.items.clone(),
			stamp: self.stamp.clone(),
		}
	}
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for GenericArray<T, N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.items.iter()).finish()
	}
}

impl<T: PartialEq, const N: usize> PartialEq for GenericArray<T, N> {
	fn eq(&self, other: &Self) -> bool {
		self.items == other.items
	}
}

impl<T: Eq, const N: usize> Eq for GenericArray<T, N> {}

impl<T, const N: usize> Index<usize> for GenericArray<T, N> {
	type Output = T;

	fn index(&self, index: usize) -> &T {
		&self.items[index]
	}
}

impl<T, const N: usize> FromIterator<T> for GenericArray<T, N> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		GenericArray {
			items: iter.into_iter().collect(),
			stamp: Stamp::new(),
		}
	}
}

impl<T, const N: usize> Extend<T> for GenericArray<T, N> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		let before = self.items.len();
		self.items.extend(iter);
		if self.items.len() != before {
			self.stamp.bump();
		}
	}
}

impl<T, const N: usize> From<Vec<T>> for GenericArray<T, N> {
	fn from(vec: Vec<T>) -> Self {
		GenericArray {
			items: SmallVec::from_vec(vec),
			stamp: Stamp::new(),
		}
	}
}

impl<'c, T, const N: usize> IntoIterator for &'c GenericArray<T, N> {
	type Item = &'c T;
	type IntoIter = Range<ArrayCursor<'c, T, N>>;

	fn into_iter(self) -> Self::IntoIter {
		self.range()
	}
}

/// A cursor into a [`GenericArray`].
pub struct ArrayCursor<'c, T, const N: usize> {
	source: &'c GenericArray<T, N>,
	pos: usize,
}

impl<'c, T, const N: usize> ArrayCursor<'c, T, N> {
	/// Returns the array this cursor walks.
	#[inline]
	pub fn source(&self) -> &'c GenericArray<T, N> {
		self.source
	}

	/// Returns the index of the cursor; equals `len` at the end sentinel.
	#[inline]
	pub fn index(&self) -> usize {
		self.pos
	}

	/// Returns `true` at the end sentinel.
	#[inline]
	pub fn is_end(&self) -> bool {
		self.pos >= self.source.items.len()
	}
}

impl<T, const N: usize> Clone for ArrayCursor<'_, T, N> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T, const N: usize> Copy for ArrayCursor<'_, T, N> {}

impl<T, const N: usize> PartialEq for ArrayCursor<'_, T, N> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.source, other.source) && self.pos == other.pos
	}
}

impl<T, const N: usize> Eq for ArrayCursor<'_, T, N> {}

impl<T, const N: usize> Hash for ArrayCursor<'_, T, N> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(self.source, state);
		self.pos.hash(state);
	}
}

impl<T, const N: usize> fmt::Debug for ArrayCursor<'_, T, N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ArrayCursor")
			.field("source", &self.source.id().get())
			.field("pos", &self.pos)
			.field("len", &self.source.len())
			.finish()
	}
}

impl<'c, T, const N: usize> Cursor for ArrayCursor<'c, T, N> {
	type Item = &'c T;

	#[inline]
	fn value(&self) -> error::Result<&'c T> {
		self.source.items.get(self.pos).ok_or(error::Error::OutOfRange)
	}

	#[inline]
	fn next(&mut self) -> error::Result<()> {
		if self.pos >= self.source.items.len() {
			return Err(error::Error::OutOfRange);
		}
		self.pos += 1;
		Ok(())
	}

	#[inline]
	fn prev(&mut self) -> error::Result<()> {
		if self.pos == 0 {
			return Err(error::Error::OutOfRange);
		}
		self.pos -= 1;
		Ok(())
	}

	#[inline]
	fn anchor(&self) -> Anchor {
		self.source.stamp.anchor(self.pos)
	}

	fn distance_to(&self, last: &Self) -> error::Result<usize> {
		if !std::ptr::eq(self.source, last.source) {
			return Err(error::Error::InvalidIterator);
		}
		last.pos.checked_sub(self.pos).ok_or(error::Error::OutOfRange)
	}

	fn advance_by(&mut self, n: usize) -> error::Result<()> {
		let target = self.pos.checked_add(n).ok_or(error::Error::OutOfRange)?;
		if target > self.source.items.len() {
			return Err(error::Error::OutOfRange);
		}
		self.pos = target;
		Ok(())
	}

	fn retreat_by(&mut self, n: usize) -> error::Result<()> {
		self.pos = self.pos.checked_sub(n).ok_or(error::Error::OutOfRange)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cursor::distance;
	use crate::error::Error;
	use crate::Array;

	fn sample() -> Array<i32> {
		[10, 20, 30].into_iter().collect()
	}

	#[test]
	fn forward_walk() {
		let array = sample();

		let mut c = array.begin();
		assert_eq!(*c.value().unwrap(), 10);
		c.next().unwrap();
		assert_eq!(*c.value().unwrap(), 20);
		c.next().unwrap();
		c.next().unwrap();
		assert_eq!(c, array.end());
		assert!(c.is_end());
	}

	#[test]
	fn sentinels() {
		let array = sample();
		assert_eq!(array.end().value(), Err(Error::OutOfRange));
		assert_eq!(array.end().next(), Err(Error::OutOfRange));
		assert_eq!(array.begin().prev(), Err(Error::OutOfRange));

		let empty: Array<i32> = Array::new();
		assert_eq!(empty.begin(), empty.end());
		assert_eq!(empty.begin().value(), Err(Error::OutOfRange));
	}

	#[test]
	fn failed_moves_leave_cursor_in_place() {
		let array = sample();
		let mut c = array.end();
		assert!(c.next().is_err());
		assert_eq!(c.index(), 3);

		let mut c = array.begin();
		assert!(c.advance_by(4).is_err());
		assert_eq!(c.index(), 0);
		assert!(c.retreat_by(1).is_err());
		assert_eq!(c.index(), 0);
	}

	#[test]
	fn cursors_from_clones_differ() {
		let array = sample();
		let copy = array.clone();
		assert_eq!(array, copy);
		assert_ne!(array.begin(), copy.begin());
		assert_ne!(array.id(), copy.id());
		assert_eq!(distance(&array.begin(), &copy.end()), Err(Error::InvalidIterator));
	}

	#[test]
	fn cursor_at_bounds() {
		let array = sample();
		assert_eq!(*array.cursor_at(1).unwrap().value().unwrap(), 20);
		assert_eq!(array.cursor_at(3).unwrap(), array.end());
		assert_eq!(array.cursor_at(4).unwrap_err(), Error::OutOfRange);
	}

	#[test]
	fn structural_mutations_bump_generation() {
		let mut array = sample();
		let g = array.generation();

		array.set(0, 11).unwrap();
		*array.get_mut(1).unwrap() = 21;
		assert_eq!(array.generation(), g);

		array.push(40);
		assert_eq!(array.generation(), g + 1);
		array.insert(0, 5).unwrap();
		array.remove(0).unwrap();
		array.pop();
		assert_eq!(array.generation(), g + 4);

		array.truncate(10);
		assert_eq!(array.generation(), g + 4);
		array.truncate(1);
		assert_eq!(array.generation(), g + 5);
		assert_eq!(array.as_slice(), &[11]);
	}

	#[test]
	fn clear_on_empty_keeps_anchors() {
		let mut array: Array<i32> = Array::new();
		let g = array.generation();
		let anchor = array.end().anchor();

		array.clear();
		assert_eq!(array.generation(), g);
		assert_eq!(array.restore(&anchor).map(|c| c.index()), Ok(0));

		array.push(1);
		array.clear();
		assert_eq!(array.generation(), g + 2);
	}

	#[test]
	fn erase_through_anchor() {
		let mut array = sample();
		let anchor = array.begin().advanced().unwrap().anchor();

		assert_eq!(array.erase(&anchor), Ok(20));
		assert_eq!(array.as_slice(), &[10, 30]);
		assert_eq!(array.erase(&anchor), Err(Error::InvalidIterator));

		let end = array.end().anchor();
		assert_eq!(array.erase(&end), Err(Error::OutOfRange));
	}

	#[test]
	fn spill_past_inline_capacity() {
		let mut array: GenericArray<u8, 2> = GenericArray::new();
		array.push(1);
		array.push(2);
		assert!(!array.spilled());
		array.push(3);
		assert!(array.spilled());
		assert_eq!(array.range().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
	}
}
