// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use core::slice;
use std::{mem, vec};

/// An associative container backed by a sorted [`Vec`]. Insertions and lookups use binary search.
///
/// Keys are kept sorted at all times, so iteration order follows the natural
/// ordering of keys regardless of the order in which entries were inserted.
/// Insertion is O(N), lookup is O(log(N)).
#[derive(Clone, Debug, PartialEq)]
pub struct VecMap<K, V>(Vec<(K, V)>);

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self {
        VecMap(Vec::new())
    }
}

impl<K, V> VecMap<K, V> {
    pub fn new() -> VecMap<K, V> {
        VecMap(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> VecMap<K, V> {
        VecMap(Vec::with_capacity(capacity))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    /// Insert the given value. Returns the old value for the same key.
    pub fn insert(&mut self, k: K, mut v: V) -> Option<V>
    where
        K: Ord,
    {
        match self.position(&k) {
            Ok(idx) => {
                mem::swap(&mut self.0[idx].1, &mut v);
                Some(v)
            }
            Err(idx) => {
                self.0.insert(idx, (k, v));
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        self.position(key).ok().map(|idx| &self.0[idx].1)
    }

    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.position(key).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, key: &K) -> Result<usize, usize>
    where
        K: Ord,
    {
        self.0.binary_search_by(|(probe, _)| probe.cmp(key))
    }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type Item = (K, V);
    type IntoIter = vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type Item = &'a (K, V);
    type IntoIter = slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut result = VecMap::new();
        for (k, v) in iter {
            result.insert(k, v);
        }
        result
    }
}

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize> serde::Serialize for VecMap<K, V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundedVecMapError {
    #[error("Key {0} is already present")]
    Duplicate(String),
    #[error("Cannot hold more than {0} entries")]
    CapacityExceeded(usize),
}

/// A [`VecMap`] with a fixed maximum number of entries that refuses to
/// overwrite existing keys.
///
/// Entries can only be added, never replaced or removed.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedVecMap<K, V> {
    inner: VecMap<K, V>,
    capacity: usize,
}

impl<K, V> BoundedVecMap<K, V> {
    pub fn new(capacity: usize) -> Self {
        BoundedVecMap {
            inner: VecMap::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds a new entry.
    ///
    /// Fails if `key` is already present or the map is full. The map is left
    /// unchanged on failure.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), BoundedVecMapError>
    where
        K: Ord + std::fmt::Display,
    {
        if self.inner.contains_key(&key) {
            return Err(BoundedVecMapError::Duplicate(key.to_string()));
        }
        if self.inner.len() >= self.capacity {
            return Err(BoundedVecMapError::CapacityExceeded(self.capacity));
        }
        self.inner.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        self.inner.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.inner.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[macro_export]
macro_rules! vecmap {
    ($($x:expr),* $(,)?) => {
        $crate::vec_map::VecMap::from_iter([$($x),*])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_keys_sorted() {
        let mut map = VecMap::new();
        map.insert(7, "seven");
        map.insert(1, "one");
        map.insert(4, "four");
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![1, 4, 7]);
        let values: Vec<_> = map.values().copied().collect();
        assert_eq!(values, vec!["one", "four", "seven"]);
    }

    #[test]
    fn test_insert_duplicate_key() {
        let mut map = VecMap::new();
        map.insert("key1", "value1");
        let result = map.insert("key1", "value2");
        assert_eq!(result, Some("value1"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"key1"), Some(&"value2"));
    }

    #[test]
    fn test_get_nonexistent_key() {
        let mut map = VecMap::new();
        map.insert(42, "answer");
        assert_eq!(map.get(&43), None);
        assert!(map.contains_key(&42));
        assert!(!map.contains_key(&43));
    }

    #[test]
    fn test_into_iter_ref() {
        let map = vecmap![(2, "two"), (1, "one")];
        let items: Vec<_> = (&map).into_iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(items, vec![(1, "one"), (2, "two")]);
        assert_eq!(map.get(&1), Some(&"one"));
    }

    #[test]
    fn test_empty_map_operations() {
        let map: VecMap<i32, i32> = VecMap::default();
        assert!(map.is_empty());
        assert_eq!(map.keys().count(), 0);
        assert_eq!(map.iter().count(), 0);
        assert_eq!(map.get(&1), None);
    }

    #[test]
    fn test_bounded_rejects_duplicate() {
        let mut map = BoundedVecMap::new(4);
        map.try_insert(3u32, 'a').unwrap();
        assert_eq!(
            map.try_insert(3, 'b'),
            Err(BoundedVecMapError::Duplicate("3".to_string()))
        );
        assert_eq!(map.get(&3), Some(&'a'));
    }

    #[test]
    fn test_bounded_rejects_overflow() {
        let mut map = BoundedVecMap::new(2);
        map.try_insert(5u32, ()).unwrap();
        map.try_insert(1, ()).unwrap();
        assert_eq!(
            map.try_insert(0, ()),
            Err(BoundedVecMapError::CapacityExceeded(2))
        );
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 5]);
    }
}
