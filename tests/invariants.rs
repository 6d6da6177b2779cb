//! # Invariant Testing for Bicursor
//!
//! Tests that focus on the structural invariants of the containers and on the
//! validity rules of detached cursor positions:
//!
//! - Map keys stay sorted and unique under randomized mutation
//! - Generations move exactly on structural mutations
//! - Anchors are rejected once the container changed shape
//! - Boundary conditions around inline capacity

use bicursor::error::Error;
use bicursor::{Anchor, Array, Container, Cursor, GenericArray, GenericMap, Map};
use rand::prelude::*;

// ===========================================================================
// Randomized Map Mutation
// ===========================================================================

#[test]
fn randomized_operations_preserve_invariants() {
	let mut map: Map<u16, u32> = Map::new();
	let mut rng = rand::rng();

	for round in 0..5_000 {
		let key: u16 = rng.random_range(0..512);
		match rng.random_range(0..4u8) {
			0 => {
				map.insert(key, round);
			}
			1 => {
				let _ = map.try_insert(key, round);
			}
			2 => {
				map.remove(&key);
			}
			3 => {
				if let Some(v) = map.get_mut(&key) {
					*v = v.wrapping_add(1);
				}
			}
			_ => unreachable!(),
		}

		if round % 100 == 0 {
			map.assert_invariants();
		}
	}

	map.assert_invariants();
}

#[test]
fn descending_inserts_stay_sorted() {
	let mut map: Map<i32, i32> = Map::new();
	for i in (0..2_000).rev() {
		map.insert(i, i);
	}
	map.assert_invariants();
	assert_eq!(map.first_key_value().map(|e| *e.key()), Some(0));
	assert_eq!(map.last_key_value().map(|e| *e.key()), Some(1_999));
}

// ===========================================================================
// Generation Accounting
// ===========================================================================

#[test]
fn map_generation_moves_only_on_structural_change() {
	let mut map: Map<i32, i32> = Map::new();
	let g0 = map.generation();

	map.insert(1, 1);
	assert_eq!(map.generation(), g0 + 1);

	map.insert(1, 2);
	*map.get_mut(&1).unwrap() = 3;
	assert_eq!(map.try_insert(1, 4).unwrap_err(), Error::Duplicated);
	assert_eq!(map.remove(&99), None);
	assert_eq!(map.generation(), g0 + 1);

	map.remove(&1);
	assert_eq!(map.generation(), g0 + 2);

	map.clear();
	assert_eq!(map.generation(), g0 + 2);

	map.insert(2, 2);
	map.clear();
	assert_eq!(map.generation(), g0 + 4);
}

#[test]
fn array_generation_ignores_failed_mutations() {
	let mut array: Array<i32> = (0..3).collect();
	let g0 = array.generation();

	assert_eq!(array.insert(10, 0), Err(Error::OutOfRange));
	assert_eq!(array.remove(3), Err(Error::OutOfRange));
	assert_eq!(array.set(3, 0), Err(Error::OutOfRange));
	array.extend(std::iter::empty());
	assert_eq!(array.generation(), g0);

	let mut empty: Array<i32> = Array::new();
	let g0 = empty.generation();
	assert_eq!(empty.pop(), None);
	assert_eq!(empty.generation(), g0);
}

// ===========================================================================
// Anchor Validity
// ===========================================================================

fn anchors_of<C: Container>(container: &C) -> Vec<Anchor> {
	let mut anchors = Vec::new();
	let mut c = container.begin();
	loop {
		anchors.push(c.anchor());
		if c.next().is_err() {
			break;
		}
	}
	anchors
}

#[test]
fn every_position_restores_until_mutation() {
	let mut array: Array<i32> = (0..50).collect();
	let anchors = anchors_of(&array);
	assert_eq!(anchors.len(), 51);

	for (i, anchor) in anchors.iter().enumerate() {
		let cursor = array.restore(anchor).unwrap();
		assert_eq!(cursor.index(), i);
		assert_eq!(anchor.position(), i);
	}

	array.pop();
	for anchor in &anchors {
		assert_eq!(array.restore(anchor).unwrap_err(), Error::InvalidIterator);
	}
}

#[test]
fn restored_reverse_cursor_reads_same_element() {
	let map: Map<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();

	let mut r = map.rbegin();
	r.next().unwrap();
	let anchor = r.anchor();

	let restored = bicursor::ReverseCursor::new(map.restore(&anchor).unwrap());
	assert_eq!(restored, r);
	assert_eq!(*restored.value().unwrap().value(), 'b');
}

#[test]
fn anchors_stay_distinct_across_instances() {
	let a: Array<u8> = Array::new();
	let b: Array<u8> = Array::new();
	assert_ne!(a.id(), b.id());
	assert_ne!(a.begin().anchor(), b.begin().anchor());
	assert_eq!(b.restore(&a.end().anchor()).unwrap_err(), Error::InvalidIterator);
}

// ===========================================================================
// Inline Capacity Boundaries
// ===========================================================================

#[test]
fn spill_boundary_keeps_cursor_contract() {
	let mut array: GenericArray<u32, 4> = GenericArray::new();
	for i in 0..4 {
		array.push(i);
	}
	assert!(!array.spilled());
	assert_eq!(array.begin().distance_to(&array.end()), Ok(4));

	array.push(4);
	assert!(array.spilled());
	assert_eq!(array.begin().distance_to(&array.end()), Ok(5));
	assert_eq!(array.rbegin().value().copied(), Ok(4));
}

#[test]
fn zero_inline_capacity_map() {
	let mut map: GenericMap<i32, i32, 0> = GenericMap::new();
	map.extend((0..10).map(|i| (i, -i)));
	map.assert_invariants();
	assert_eq!(map.range().len(), 10);
	assert_eq!(map.rbegin().value().map(|e| *e.value()), Ok(-9));
}
