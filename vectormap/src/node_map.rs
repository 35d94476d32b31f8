//! Interning store for map vertices.

use std::cell::Cell;
use vectormap_types::{Coordinate, SharedCoordinate};

/// Number of slots added to the store when an append finds it full.
pub const GROWTH_INCREMENT: usize = 500;

/// Sorted store of coordinates by integer key.
///
/// Keys and values are kept in two index-aligned vectors with keys in ascending order, so lookups are binary
/// searches and appending a key larger than every stored key is amortized O(1). Slot `0` holds a sentinel entry with
/// key `0` and an unknown coordinate; stored keys are always `>= 1`.
///
/// Putting a coordinate under a key that is already present never creates a second instance: the stored coordinate
/// is either kept as is (equal value) or updated in place, so every shape holding its handle sees the new value.
#[derive(Debug)]
pub struct NodeMap {
    keys: Vec<i64>,
    values: Vec<SharedCoordinate>,
    pull_count: Cell<u64>,
}

impl NodeMap {
    /// Creates an empty store.
    pub fn new() -> Self {
        let mut keys = Vec::with_capacity(GROWTH_INCREMENT);
        let mut values = Vec::with_capacity(GROWTH_INCREMENT);
        keys.push(0);
        values.push(SharedCoordinate::new(Coordinate::unknown()));

        Self {
            keys,
            values,
            pull_count: Cell::new(0),
        }
    }

    /// Number of stored coordinates.
    pub fn len(&self) -> usize {
        self.keys.len() - 1
    }

    /// Returns true if there are no stored coordinates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest stored key, or `0` if the store is empty.
    pub fn last_key(&self) -> i64 {
        self.keys.last().copied().unwrap_or_default()
    }

    /// Number of successful [`NodeMap::get`] calls.
    pub fn pull_count(&self) -> u64 {
        self.pull_count.get()
    }

    /// Returns true if a coordinate is stored under the key.
    pub fn contains_key(&self, key: i64) -> bool {
        self.position(key).is_ok()
    }

    /// Coordinate stored under the key.
    pub fn get(&self, key: i64) -> Option<SharedCoordinate> {
        let index = self.position(key).ok()?;
        self.pull_count.set(self.pull_count.get() + 1);
        Some(self.values[index].clone())
    }

    /// Stores the coordinate under its own id, or under a new key if the id is not positive.
    ///
    /// Returns the handle that is stored in the map after the call. It is not necessarily the given one.
    pub fn put(&mut self, coordinate: SharedCoordinate) -> SharedCoordinate {
        let id = coordinate.borrow().id();
        if id > 0 {
            self.put_with_key(id, coordinate)
        } else {
            let key = self.last_key() + 1;
            self.put_with_key(key, coordinate)
        }
    }

    /// Stores the coordinate under the given key and sets its id to the key.
    ///
    /// If the key is already present, the stored instance is kept: when its value differs from the new one it is
    /// updated in place. The returned handle is the one stored in the map. Keys that are not positive are replaced
    /// with a new key larger than all stored ones.
    pub fn put_with_key(&mut self, key: i64, coordinate: SharedCoordinate) -> SharedCoordinate {
        let key = if key > 0 { key } else { self.last_key() + 1 };
        coordinate.borrow_mut().set_id(key);

        if key > self.last_key() {
            if self.keys.len() == self.keys.capacity() {
                log::debug!(
                    "Growing node map from {} to {} slots",
                    self.keys.capacity(),
                    self.keys.capacity() + GROWTH_INCREMENT
                );
                self.keys.reserve_exact(GROWTH_INCREMENT);
                self.values.reserve_exact(GROWTH_INCREMENT);
            }

            self.keys.push(key);
            self.values.push(coordinate.clone());
            return coordinate;
        }

        match self.position(key) {
            Ok(index) => {
                let existing = self.values[index].clone();
                if existing != coordinate {
                    log::trace!("Updating coordinate {key} in place");
                    existing.borrow_mut().update(&coordinate.borrow());
                }
                existing
            }
            Err(index) => {
                if self.keys.len() == self.keys.capacity() {
                    self.keys.reserve_exact(1);
                    self.values.reserve_exact(1);
                }

                self.keys.insert(index, key);
                self.values.insert(index, coordinate.clone());
                coordinate
            }
        }
    }

    /// Key of the first stored coordinate equal in value to the given one.
    pub fn find_key(&self, coordinate: &Coordinate) -> Option<i64> {
        self.keys
            .iter()
            .zip(&self.values)
            .skip(1)
            .find(|(_, value)| *value == coordinate)
            .map(|(key, _)| *key)
    }

    /// Removes the coordinate stored under the key.
    pub fn remove(&mut self, key: i64) -> Option<SharedCoordinate> {
        let index = self.position(key).ok()?;
        self.keys.remove(index);
        Some(self.values.remove(index))
    }

    /// Removes the entry stored under the coordinate's id if it holds this very instance.
    ///
    /// Returns true if the entry was removed.
    pub fn release(&mut self, coordinate: &SharedCoordinate) -> bool {
        let key = coordinate.borrow().id();
        let Ok(index) = self.position(key) else {
            return false;
        };

        if !self.values[index].ptr_eq(coordinate) {
            return false;
        }

        log::trace!("Releasing coordinate {key}");
        self.keys.remove(index);
        self.values.remove(index);
        true
    }

    /// Iterates over stored keys and coordinates in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &SharedCoordinate)> + '_ {
        self.keys.iter().copied().zip(&self.values).skip(1)
    }

    /// Removes all the stored coordinates.
    pub fn clear(&mut self) {
        self.keys.truncate(1);
        self.values.truncate(1);
    }

    /// Position of the key in the backing vectors, or the position it should be inserted at.
    fn position(&self, key: i64) -> Result<usize, usize> {
        if key <= 0 {
            return Err(1);
        }

        self.keys[1..]
            .binary_search(&key)
            .map(|index| index + 1)
            .map_err(|index| index + 1)
    }
}

impl Default for NodeMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(lat: f32, lon: f32) -> SharedCoordinate {
        SharedCoordinate::new(Coordinate::latlon(lat, lon).unwrap())
    }

    fn keys(map: &NodeMap) -> Vec<i64> {
        map.iter().map(|(key, _)| key).collect()
    }

    #[test]
    fn put_and_get() {
        let mut map = NodeMap::new();
        let c = shared(1.0, 2.0);
        map.put_with_key(7, c.clone());

        let stored = map.get(7).unwrap();
        assert!(stored.ptr_eq(&c));
        assert_eq!(stored.borrow().id(), 7);
        assert_eq!(map.pull_count(), 1);

        assert!(map.get(8).is_none());
        assert!(map.get(0).is_none());
        assert_eq!(map.pull_count(), 1);
    }

    #[test]
    fn keys_stay_sorted() {
        let mut map = NodeMap::new();
        for key in [5, 2, 9, 1, 7, 3] {
            map.put_with_key(key, shared(key as f32, 0.0));
        }

        assert_eq!(keys(&map), vec![1, 2, 3, 5, 7, 9]);
        for key in [1, 2, 3, 5, 7, 9] {
            assert_eq!(map.get(key).unwrap().borrow().latitude(), key as f32);
        }
    }

    #[test]
    fn put_synthesizes_keys() {
        let mut map = NodeMap::new();
        let first = map.put(shared(0.0, 0.0));
        assert_eq!(first.borrow().id(), 1);

        map.put_with_key(10, shared(1.0, 0.0));
        let next = map.put(shared(2.0, 0.0));
        assert_eq!(next.borrow().id(), 11);

        let explicit = map.put_with_key(-4, shared(3.0, 0.0));
        assert_eq!(explicit.borrow().id(), 12);
        assert_eq!(map.last_key(), 12);
    }

    #[test]
    fn put_uses_coordinate_id() {
        let mut map = NodeMap::new();
        let c = shared(0.0, 0.0);
        c.borrow_mut().set_id(42);
        map.put(c);
        assert!(map.contains_key(42));
    }

    #[test]
    fn equal_value_keeps_stored_instance() {
        let mut map = NodeMap::new();
        let original = shared(1.0, 1.0);
        original.borrow_mut().set_timestamp(100);
        map.put_with_key(3, original.clone());
        map.put_with_key(5, shared(9.0, 9.0));

        let duplicate = SharedCoordinate::new(Coordinate::latlon(1.0, 1.0).unwrap().with_timestamp(200));
        let canonical = map.put_with_key(3, duplicate.clone());

        assert!(canonical.ptr_eq(&original));
        assert!(!canonical.ptr_eq(&duplicate));
        assert_eq!(original.borrow().timestamp(), 100);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn different_value_updates_in_place() {
        let mut map = NodeMap::new();
        let original = shared(1.0, 1.0);
        map.put_with_key(3, original.clone());
        map.put_with_key(5, shared(9.0, 9.0));

        let other_owner = original.clone();
        let canonical = map.put_with_key(3, shared(2.0, 3.0));

        assert!(canonical.ptr_eq(&original));
        assert_eq!(other_owner.borrow().latitude(), 2.0);
        assert_eq!(other_owner.borrow().longitude(), 3.0);
        assert_eq!(other_owner.borrow().id(), 3);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn find_key_by_value() {
        let mut map = NodeMap::new();
        map.put(shared(1.0, 1.0));
        map.put(shared(2.0, 2.0));

        assert_eq!(map.find_key(&Coordinate::latlon(2.0, 2.0).unwrap()), Some(2));
        assert_eq!(map.find_key(&Coordinate::latlon(3.0, 3.0).unwrap()), None);
        assert_eq!(map.find_key(&Coordinate::unknown()), None);
    }

    #[test]
    fn append_growth() {
        let mut map = NodeMap::new();
        for i in 0..GROWTH_INCREMENT + 10 {
            map.put(shared(0.0, i as f32 * 0.1));
        }

        assert_eq!(map.len(), GROWTH_INCREMENT + 10);
        assert_eq!(map.last_key(), (GROWTH_INCREMENT + 10) as i64);
    }

    #[test]
    fn release_checks_identity() {
        let mut map = NodeMap::new();
        let stored = map.put(shared(1.0, 1.0));

        let impostor = shared(1.0, 1.0);
        impostor.borrow_mut().set_id(stored.borrow().id());
        assert!(!map.release(&impostor));
        assert!(map.release(&stored));
        assert!(!map.release(&stored));
        assert!(map.is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut map = NodeMap::new();
        map.put(shared(1.0, 1.0));
        map.put(shared(2.0, 2.0));
        map.put(shared(3.0, 3.0));

        let removed = map.remove(2).unwrap();
        assert_eq!(removed.borrow().latitude(), 2.0);
        assert!(map.remove(2).is_none());
        assert_eq!(keys(&map), vec![1, 3]);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.last_key(), 0);
        assert_eq!(map.put(shared(0.0, 0.0)).borrow().id(), 1);
    }
}
