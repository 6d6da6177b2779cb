//! # Bicursor: Containers with Bidirectional Cursors
//!
//! This crate provides array-like and map-like containers that hand out
//! **cursors**: small, copyable values that point at a position inside a
//! container and move one step at a time in either direction. A generic
//! **reverse adapter** turns any cursor into one that walks backwards, so
//! traversal logic is written once and reused for both directions.
//!
//! ## Design Overview
//!
//! The model follows the classic begin/end iterator-pair design of generic
//! container libraries, expressed with Rust traits and borrows:
//!
//! - [`Cursor`] is the capability trait: `value`, `next`, `prev`, `equals`.
//! - [`Container`] produces cursors: `begin`, `end`, `rbegin`, `rend`.
//! - [`ReverseCursor`] wraps any cursor and swaps its directions.
//! - [`GenericArray`] is ordered by index and yields `&T`.
//! - [`GenericMap`] keeps unique keys in ascending order and yields [`Entry`].
//!
//! ### Positions and Sentinels
//!
//! ```text
//!            begin()                      end()
//!               │                           │
//!               ▼                           ▼
//!            ┌──────┬──────┬──────┐   ┌ ─ ─ ─ ─ ┐
//!  elements  │  10  │  20  │  30  │     sentinel
//!            └──────┴──────┴──────┘   └ ─ ─ ─ ─ ┘
//!               ▲                     ▲
//!               │                     │
//!      rend() wraps begin()   rbegin() wraps end()
//! ```
//!
//! Dereferencing a sentinel, calling `next()` on `end()`, or `prev()` on
//! `begin()` returns [`Error::OutOfRange`](error::Error::OutOfRange).
//!
//! ### Validity
//!
//! Cursors borrow their container, so the borrow checker rules out structural
//! mutation while a cursor is alive. Positions that must survive a mutation are
//! detached into an [`Anchor`] and re-attached with [`Container::restore`],
//! which fails with [`Error::InvalidIterator`](error::Error::InvalidIterator)
//! once the container has changed shape or if the anchor came from another
//! container.
//!
//! ## Basic Usage
//!
//! ```
//! use bicursor::{Array, Container, Cursor, Map};
//!
//! let array: Array<i32> = [10, 20, 30].into_iter().collect();
//!
//! assert_eq!(*array.begin().value()?, 10);
//! assert_eq!(*array.begin().advanced()?.value()?, 20);
//! assert_eq!(*array.rbegin().value()?, 30);
//! assert_eq!(*array.rbegin().advanced()?.value()?, 20);
//!
//! let mut map: Map<&str, u32> = Map::new();
//! map.insert("b", 2);
//! map.insert("a", 1);
//!
//! let keys: Vec<&str> = map.range().map(|entry| *entry.key()).collect();
//! assert_eq!(keys, vec!["a", "b"]);
//! # Ok::<(), bicursor::error::Error>(())
//! ```
//!
//! ## Thread Safety
//!
//! Containers do no locking. Wrap one in [`Shared`] to read it from many
//! threads and write it from one at a time.

pub mod array;
pub mod container;
pub mod cursor;
pub mod error;
pub mod map;
pub mod range;
pub mod reverse;
pub mod shared;

#[cfg(feature = "test-utils")]
pub mod alloc;

pub use array::{ArrayCursor, GenericArray};
pub use container::{Container, ContainerId};
pub use cursor::{Anchor, Cursor};
pub use map::{Entry, GenericMap, MapCursor};
pub use range::Range;
pub use reverse::ReverseCursor;
pub use shared::Shared;

// ---------------------------------------------------------------------------
// Configuration Constants
// ---------------------------------------------------------------------------

/// Default inline capacity of arrays.
/// Up to this many elements are stored without a heap allocation.
pub const ARRAY_INLINE_CAPACITY: usize = 8;

/// Default inline capacity of maps (entries stored without a heap allocation).
pub const MAP_INLINE_CAPACITY: usize = 8;

// ---------------------------------------------------------------------------
// Public Type Aliases
// ---------------------------------------------------------------------------

/// An array with the default inline capacity.
///
/// Use [`GenericArray`] directly to pick another inline capacity.
pub type Array<T> = GenericArray<T, ARRAY_INLINE_CAPACITY>;

/// A map with the default inline capacity.
///
/// Use [`GenericMap`] directly to pick another inline capacity.
pub type Map<K, V> = GenericMap<K, V, MAP_INLINE_CAPACITY>;

/// Reverse cursor over an [`Array`].
pub type ArrayReverseCursor<'c, T, const N: usize> = ReverseCursor<ArrayCursor<'c, T, N>>;

/// Reverse cursor over a [`Map`].
pub type MapReverseCursor<'c, K, V, const N: usize> = ReverseCursor<MapCursor<'c, K, V, N>>;

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;

	// -----------------------------------------------------------------------
	// Cross-Container Behavior
	// -----------------------------------------------------------------------

	fn walk_both_ways<C: Container>(container: &C) -> (usize, usize) {
		let mut forward = 0;
		let mut c = container.begin();
		while c != container.end() {
			c.next().unwrap();
			forward += 1;
		}

		let mut backward = 0;
		let mut r = container.rbegin();
		while r != container.rend() {
			r.next().unwrap();
			backward += 1;
		}

		(forward, backward)
	}

	#[test]
	fn generic_walk_matches_len() {
		let array: Array<u8> = (0..20).collect();
		let map: Map<u8, u8> = (0..20).map(|i| (i, i)).collect();

		assert_eq!(walk_both_ways(&array), (20, 20));
		assert_eq!(walk_both_ways(&map), (20, 20));
		assert_eq!(walk_both_ways(&Array::<u8>::new()), (0, 0));
	}

	#[test]
	fn anchors_do_not_cross_containers() {
		let array: Array<i32> = [1, 2, 3].into_iter().collect();
		let other: Array<i32> = [1, 2, 3].into_iter().collect();

		let anchor = array.begin().anchor();
		assert!(array.restore(&anchor).is_ok());
		assert_eq!(other.restore(&anchor).unwrap_err(), Error::InvalidIterator);
	}

	#[test]
	fn reverse_aliases() {
		let array: Array<i32> = [1, 2].into_iter().collect();
		let rc: ArrayReverseCursor<'_, i32, ARRAY_INLINE_CAPACITY> = array.rbegin();
		assert_eq!(*rc.value().unwrap(), 2);

		let map: Map<i32, i32> = [(1, 1)].into_iter().collect();
		let rc: MapReverseCursor<'_, i32, i32, MAP_INLINE_CAPACITY> = map.rbegin();
		assert_eq!(*rc.value().unwrap().key(), 1);
	}
}
