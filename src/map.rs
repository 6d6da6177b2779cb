//! Map-like container with sorted, unique keys.

use smallvec::SmallVec;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::container::{Container, ContainerId, Stamp};
use crate::cursor::{Anchor, Cursor};
use crate::error;
use crate::range::Range;

/// An associative container mapping unique keys to values, ordered by key.
///
/// Keys and values are stored in two parallel sorted arrays (inline for up to
/// `N` entries). Lookups use binary search; cursors yield [`Entry`] views in
/// ascending key order.
///
/// # Duplicate Keys
///
/// The map never holds two entries with the same key:
///
/// - [`insert`](GenericMap::insert) overwrites the value of an existing key and
///   returns the old value.
/// - [`try_insert`](GenericMap::try_insert) rejects an existing key with
///   [`Error::Duplicated`](error::Error::Duplicated) and leaves the map as is.
///
/// # Cursor Validity
///
/// Inserting a new key, removing, erasing and clearing are structural and
/// invalidate every outstanding [`Anchor`]. Overwriting the value of an
/// existing key and `get_mut` are not structural.
///
/// # Example
///
/// ```
/// use bicursor::{Container, Cursor, Map};
///
/// let mut map: Map<&str, u32> = Map::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
/// assert_eq!(map.insert("a", 10), Some(1));
///
/// let first = map.begin().value()?;
/// assert_eq!((*first.key(), *first.value()), ("a", 10));
/// assert_eq!(*map.rbegin().value()?.key(), "b");
/// # Ok::<(), bicursor::error::Error>(())
/// ```
pub struct GenericMap<K, V, const N: usize> {
	/// Sorted, unique keys.
	keys: SmallVec<[K; N]>,
	/// Values corresponding to keys (same index).
	values: SmallVec<[V; N]>,
	stamp: Stamp,
}

impl<K, V, const N: usize> Default for GenericMap<K, V, N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V, const N: usize> GenericMap<K, V, N> {
	/// Creates an empty map.
	pub fn new() -> Self {
		GenericMap {
			keys: SmallVec::new(),
			values: SmallVec::new(),
			stamp: Stamp::new(),
		}
	}

	/// Creates an empty map with room for at least `capacity` entries.
	pub fn with_capacity(capacity: usize) -> Self {
		GenericMap {
			keys: SmallVec::with_capacity(capacity),
			values: SmallVec::with_capacity(capacity),
			stamp: Stamp::new(),
		}
	}

	/// Returns the identity of this map instance.
	pub fn id(&self) -> ContainerId {
		self.stamp.id()
	}

	/// Returns the number of structural mutations performed so far.
	pub fn generation(&self) -> u64 {
		self.stamp.generation()
	}

	/// Returns the number of entries.
	#[inline]
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Returns `true` if the map holds no entries.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Returns the entry with the smallest key.
	pub fn first_key_value(&self) -> Option<Entry<'_, K, V>> {
		self.entry_at(0)
	}

	/// Returns the entry with the largest key.
	pub fn last_key_value(&self) -> Option<Entry<'_, K, V>> {
		self.keys.len().checked_sub(1).and_then(|pos| self.entry_at(pos))
	}

	/// Removes all entries. No-op if already empty.
	pub fn clear(&mut self) {
		if !self.keys.is_empty() {
			self.keys.clear();
			self.values.clear();
			self.stamp.bump();
		}
	}

	/// Removes the entry an anchor points at and returns it.
	///
	/// Fails with [`Error::InvalidIterator`](error::Error::InvalidIterator) if
	/// the anchor is stale or foreign, and with
	/// [`Error::OutOfRange`](error::Error::OutOfRange) if it is the end sentinel.
	pub fn erase(&mut self, anchor: &Anchor) -> error::Result<(K, V)> {
		let pos = self.stamp.check(anchor)?;
		if pos >= self.keys.len() {
			return Err(error::Error::OutOfRange);
		}
		Ok(self.remove_at(pos))
	}

	#[inline]
	fn entry_at(&self, pos: usize) -> Option<Entry<'_, K, V>> {
		Some(Entry {
			key: self.keys.get(pos)?,
			value: self.values.get(pos)?,
		})
	}

	fn remove_at(&mut self, pos: usize) -> (K, V) {
		let key = self.keys.remove(pos);
		let value = self.values.remove(pos);
		self.stamp.bump();
		(key, value)
	}

	#[inline]
	fn cursor(&self, pos: usize) -> MapCursor<'_, K, V, N> {
		MapCursor {
			source: self,
			pos,
		}
	}
}

impl<K: Ord, V, const N: usize> GenericMap<K, V, N> {
	/// Binary search for a key, returning position and whether it's an exact match.
	///
	/// `position` is where the key is, or where it would be inserted.
	fn search<Q>(&self, key: &Q) -> (usize, bool)
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		let mut lower = 0;
		let mut upper = self.keys.len();

		while lower < upper {
			let mid = lower + (upper - lower) / 2;
			let mid_key: &Q = self.keys[mid].borrow();

			if key < mid_key {
				upper = mid;
			} else if key > mid_key {
				lower = mid + 1;
			} else {
				return (mid, true);
			}
		}

		(lower, false)
	}

	/// Returns a reference to the value for `key`.
	pub fn get<Q>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		match self.search(key) {
			(pos, true) => self.values.get(pos),
			_ => None,
		}
	}

	/// Returns the stored key and value for `key`.
	pub fn get_key_value<Q>(&self, key: &Q) -> Option<Entry<'_, K, V>>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		match self.search(key) {
			(pos, true) => self.entry_at(pos),
			_ => None,
		}
	}

	/// Returns a mutable reference to the value for `key`. Not a structural mutation.
	pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		match self.search(key) {
			(pos, true) => self.values.get_mut(pos),
			_ => None,
		}
	}

	/// Returns `true` if the map contains `key`.
	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		self.search(key).1
	}

	/// Inserts a key-value pair, overwriting the value of an existing key.
	///
	/// Returns the previous value if the key was present. Overwriting keeps
	/// the stored key and does not count as a structural mutation.
	///
	/// # Example
	///
	/// ```
	/// use bicursor::Map;
	///
	/// let mut map: Map<i32, &str> = Map::new();
	///
	/// assert_eq!(map.insert(1, "one"), None);       // New key
	/// assert_eq!(map.insert(1, "uno"), Some("one")); // Update existing
	/// assert_eq!(map.len(), 1);
	/// ```
	pub fn insert(&mut self, key: K, value: V) -> Option<V> {
		match self.search(&key) {
			(pos, true) => Some(std::mem::replace(&mut self.values[pos], value)),
			(pos, false) => {
				self.keys.insert(pos, key);
				self.values.insert(pos, value);
				self.stamp.bump();
				None
			}
		}
	}

	/// Inserts a key-value pair only if the key is absent.
	///
	/// On success returns the new entry. If the key is already present the map
	/// is left untouched and [`Error::Duplicated`](error::Error::Duplicated) is
	/// returned; use [`get_or_insert`](GenericMap::get_or_insert) to get the
	/// existing entry back instead.
	pub fn try_insert(&mut self, key: K, value: V) -> error::Result<Entry<'_, K, V>> {
		let pos = match self.search(&key) {
			(_, true) => return Err(error::Error::Duplicated),
			(pos, false) => pos,
		};
		self.keys.insert(pos, key);
		self.values.insert(pos, value);
		self.stamp.bump();
		self.entry_at(pos).ok_or(error::Error::OutOfRange)
	}

	/// Inserts a key-value pair unless the key is present.
	///
	/// Returns the entry stored under `key` and whether it was inserted. An
	/// existing key leaves the map untouched and `value` is dropped.
	///
	/// # Example
	///
	/// ```
	/// use bicursor::Map;
	///
	/// let mut map: Map<i32, &str> = Map::new();
	///
	/// let (entry, inserted) = map.get_or_insert(1, "one");
	/// assert_eq!((*entry.value(), inserted), ("one", true));
	///
	/// let (entry, inserted) = map.get_or_insert(1, "uno");
	/// assert_eq!((*entry.value(), inserted), ("one", false));
	/// ```
	pub fn get_or_insert(&mut self, key: K, value: V) -> (Entry<'_, K, V>, bool) {
		let (pos, fresh) = match self.search(&key) {
			(pos, true) => (pos, false),
			(pos, false) => {
				self.keys.insert(pos, key);
				self.values.insert(pos, value);
				self.stamp.bump();
				(pos, true)
			}
		};
		let entry = Entry {
			key: &self.keys[pos],
			value: &self.values[pos],
		};
		(entry, fresh)
	}

	/// Removes a key, returning its value.
	pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		self.remove_entry(key).map(|(_, v)| v)
	}

	/// Removes a key, returning the stored key and value.
	pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		match self.search(key) {
			(pos, true) => Some(self.remove_at(pos)),
			_ => None,
		}
	}

	/// Returns a cursor at `key`, or the end sentinel if the key is absent.
	pub fn find<Q>(&self, key: &Q) -> MapCursor<'_, K, V, N>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		match self.search(key) {
			(pos, true) => self.cursor(pos),
			_ => self.end(),
		}
	}

	/// Returns a cursor at the first entry whose key is not less than `key`.
	pub fn lower_bound<Q>(&self, key: &Q) -> MapCursor<'_, K, V, N>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		self.cursor(self.search(key).0)
	}

	/// Returns a cursor at the first entry whose key is greater than `key`.
	pub fn upper_bound<Q>(&self, key: &Q) -> MapCursor<'_, K, V, N>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		match self.search(key) {
			(pos, true) => self.cursor(pos + 1),
			(pos, false) => self.cursor(pos),
		}
	}
}

impl<K, V, const N: usize> Container for GenericMap<K, V, N> {
	type Cursor<'c>
		= MapCursor<'c, K, V, N>
	where
		Self: 'c;

	#[inline]
	fn len(&self) -> usize {
		self.keys.len()
	}

	#[inline]
	fn begin(&self) -> MapCursor<'_, K, V, N> {
		self.cursor(0)
	}

	#[inline]
	fn end(&self) -> MapCursor<'_, K, V, N> {
		self.cursor(self.keys.len())
	}

	fn restore(&self, anchor: &Anchor) -> error::Result<MapCursor<'_, K, V, N>> {
		let pos = self.stamp.check(anchor)?;
		debug_assert!(pos <= self.keys.len());
		Ok(self.cursor(pos))
	}
}

impl<K: Clone, V: Clone, const N: usize> Clone for GenericMap<K, V, N> {
	fn clone(&self) -> Self {
		GenericMap {
			keys: self.keys.clone(),
			values: self.values.clone(),
			stamp: self.stamp.clone(),
		}
	}
}

impl<K: fmt::Debug, V: fmt::Debug, const N: usize> fmt::Debug for GenericMap<K, V, N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.keys.iter().zip(self.values.iter())).finish()
	}
}

impl<K: PartialEq, V: PartialEq, const N: usize> PartialEq for GenericMap<K, V, N> {
	fn eq(&self, other: &Self) -> bool {
		self.keys == other.keys && self.values == other.values
	}
}

impl<K: Eq, V: Eq, const N: usize> Eq for GenericMap<K, V, N> {}

impl<K: Ord, V, const N: usize> FromIterator<(K, V)> for GenericMap<K, V, N> {
	/// Later pairs overwrite earlier ones with the same key.
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = GenericMap::new();
		map.extend(iter);
		map
	}
}

impl<K: Ord, V, const N: usize> Extend<(K, V)> for GenericMap<K, V, N> {
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl<'c, K, V, const N: usize> IntoIterator for &'c GenericMap<K, V, N> {
	type Item = Entry<'c, K, V>;
	type IntoIter = Range<MapCursor<'c, K, V, N>>;

	fn into_iter(self) -> Self::IntoIter {
		self.range()
	}
}

/// A key/value view yielded by map cursors.
pub struct Entry<'c, K, V> {
	key: &'c K,
	value: &'c V,
}

impl<'c, K, V> Entry<'c, K, V> {
	/// Returns the key.
	#[inline]
	pub fn key(&self) -> &'c K {
		self.key
	}

	/// Returns the value.
	#[inline]
	pub fn value(&self) -> &'c V {
		self.value
	}

	/// Splits the entry into its key and value.
	#[inline]
	pub fn into_pair(self) -> (&'c K, &'c V) {
		(self.key, self.value)
	}
}

impl<K, V> Clone for Entry<'_, K, V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<K, V> Copy for Entry<'_, K, V> {}

impl<K: PartialEq, V: PartialEq> PartialEq for Entry<'_, K, V> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key && self.value == other.value
	}
}

impl<K: Eq, V: Eq> Eq for Entry<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<'_, K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Entry").field(self.key).field(self.value).finish()
	}
}

/// A cursor into a [`GenericMap`].
pub struct MapCursor<'c, K, V, const N: usize> {
	source: &'c GenericMap<K, V, N>,
	pos: usize,
}

impl<'c, K, V, const N: usize> MapCursor<'c, K, V, N> {
	/// Returns the map this cursor walks.
	#[inline]
	pub fn source(&self) -> &'c GenericMap<K, V, N> {
		self.source
	}

	/// Returns the key at the current position.
	#[inline]
	pub fn key(&self) -> error::Result<&'c K> {
		self.source.keys.get(self.pos).ok_or(error::Error::OutOfRange)
	}

	#[inline]
	pub fn is_end(&self) -> bool {
		self.pos >= self.source.keys.len()
	}
}

impl<K, V, const N: usize> Clone for MapCursor<'_, K, V, N> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<K, V, const N: usize> Copy for MapCursor<'_, K, V, N> {}

impl<K, V, const N: usize> PartialEq for MapCursor<'_, K, V, N> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.source, other.source) && self.pos == other.pos
	}
}

impl<K, V, const N: usize> Eq for MapCursor<'_, K, V, N> {}

impl<K, V, const N: usize> Hash for MapCursor<'_, K, V, N> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(self.source, state);
		self.pos.hash(state);
	}
}

impl<K, V, const N: usize> fmt::Debug for MapCursor<'_, K, V, N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MapCursor")
			.field("source", &self.source.id().get())
			.field("pos", &self.pos)
			.field("len", &self.source.len())
			.finish()
	}
}

impl<'c, K, V, const N: usize> Cursor for MapCursor<'c, K, V, N> {
	type Item = Entry<'c, K, V>;

	#[inline]
	fn value(&self) -> error::Result<Entry<'c, K, V>> {
		self.source.entry_at(self.pos).ok_or(error::Error::OutOfRange)
	}

	#[inline]
	fn next(&mut self) -> error::Result<()> {
		if self.pos >= self.source.keys.len() {
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
}

// ===========================================================================
// Test-Only Validation
// ===========================================================================

#[cfg(any(test, feature = "test-utils"))]
impl<K: Ord + fmt::Debug, V, const N: usize> GenericMap<K, V, N> {
	/// Validates the map invariants. Panics with diagnostic info if one is violated.
	///
	/// # Invariants Checked
	///
	/// 1. Length consistency: one value per key
	/// 2. Key ordering: keys strictly ascending, hence unique
	pub fn assert_invariants(&self) {
		assert_eq!(
			self.keys.len(),
			self.values.len(),
			"key count {} does not match value count {}",
			self.keys.len(),
			self.values.len()
		);

		for pair in self.keys.windows(2) {
			assert!(pair[0] < pair[1], "keys out of order or duplicated: {:?} >= {:?}", pair[0], pair[1]);
		}
	}
}
