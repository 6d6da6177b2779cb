//! # Error Types for Containers and Cursors
//!
//! This module defines the single error type shared by every container and
//! cursor in the crate.
//!
//! ## Error Handling Strategy
//!
//! Cursor operations never panic. Moving past a sentinel or dereferencing the
//! end position returns an error and leaves the cursor where it was, so the
//! caller can decide whether the failure ends the walk or is a bug.
//!
//! ## Error Flow
//!
//! ```text
//! cursor.value() / next() / prev()
//!      │
//!      ├──── position outside [begin, end] ───► Err(OutOfRange)
//!      │
//!      ▼
//! Ok(..)
//!
//! container.restore(&anchor) / erase(&anchor)
//!      │
//!      ├──── other container or stale generation ───► Err(InvalidIterator)
//!      │
//!      ▼
//! Ok(cursor)
//! ```
//!
//! ## Common Patterns
//!
//! A bounds-respecting walk never sees an error:
//!
//! ```
//! use bicursor::{Array, Container, Cursor};
//!
//! let array: Array<i32> = [1, 2, 3].into_iter().collect();
//! let mut cursor = array.begin();
//! let end = array.end();
//! let mut sum = 0;
//! while cursor != end {
//!     sum += *cursor.value()?;
//!     cursor.next()?;
//! }
//! assert_eq!(sum, 6);
//! # Ok::<(), bicursor::error::Error>(())
//! ```

use thiserror::Error;

/// Errors that can occur during container and cursor operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
	/// A cursor was dereferenced at a sentinel, or moved past one.
	///
	/// This error occurs when:
	/// - `value()` is called on an `end()` cursor (or a reverse cursor at `rend()`)
	/// - `next()` is called on an `end()` cursor
	/// - `prev()` is called on a `begin()` cursor
	/// - a position or distance lies outside `[begin, end]`
	#[error("cursor moved or dereferenced past the range of its container")]
	OutOfRange,

	/// A cursor position no longer refers to the container it is used with.
	///
	/// This error occurs when:
	/// - an [`Anchor`](crate::Anchor) is restored after a structural mutation
	/// - an anchor is restored against a different container instance
	/// - two cursors from different containers are measured against each other
	#[error("cursor does not refer to a live position of this container")]
	InvalidIterator,

	/// The key is already present and the insertion policy rejects duplicates.
	///
	/// Returned by [`GenericMap::try_insert`](crate::GenericMap::try_insert).
	/// The map is left unchanged.
	#[error("key already exists in the map")]
	Duplicated,
}

/// A Result type alias using our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;
