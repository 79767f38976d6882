//! Dense entity-keyed containers.
//!
//! `PrimaryMap` owns the data for each entity; `EntitySet` records membership
//! with one bit per entity index.

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::entity::EntityRef;

/// Dense map from entity to data
///
/// This is essentially a Vec with entity-based indexing. Keys are handed out
/// by `push` and are never invalidated.
#[derive(Debug, Clone)]
pub struct PrimaryMap<K: EntityRef, V> {
    data: Vec<V>,
    _phantom: PhantomData<K>,
}

impl<K: EntityRef, V> PrimaryMap<K, V> {
    /// Create a new empty PrimaryMap
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Push a value and return its entity key
    ///
    /// The entity key will have an index equal to the current length
    /// of the map before the push.
    pub fn push(&mut self, value: V) -> K {
        let index = self.data.len();
        self.data.push(value);
        K::from_index(index)
    }

    /// Get a value by entity key
    pub fn get(&self, key: K) -> Option<&V> {
        self.data.get(key.index())
    }

    /// Get a mutable value by entity key
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.data.get_mut(key.index())
    }

    /// Check whether `key` was handed out by this map
    pub fn is_valid(&self, key: K) -> bool {
        key.index() < self.data.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all keys in creation order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        (0..self.data.len()).map(K::from_index)
    }

    /// Iterate over entries as (entity, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (K::from_index(i), v))
    }

    /// Iterate over mutable values
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.data.iter_mut()
    }
}

impl<K: EntityRef, V> Default for PrimaryMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntityRef, V> core::ops::Index<K> for PrimaryMap<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        &self.data[key.index()]
    }
}

impl<K: EntityRef, V> core::ops::IndexMut<K> for PrimaryMap<K, V> {
    fn index_mut(&mut self, key: K) -> &mut V {
        &mut self.data[key.index()]
    }
}

/// Dense set of entities.
///
/// Grows on demand, so it can be created empty and filled with any key.
#[derive(Debug, Clone)]
pub struct EntitySet<K: EntityRef> {
    words: Vec<u64>,
    len: usize,
    _phantom: PhantomData<K>,
}

impl<K: EntityRef> EntitySet<K> {
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Create a set with room for `capacity` entities without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: Vec::with_capacity(capacity.div_ceil(64)),
            len: 0,
            _phantom: PhantomData,
        }
    }

    pub fn contains(&self, key: K) -> bool {
        let index = key.index();
        self.words
            .get(index / 64)
            .is_some_and(|word| word & (1 << (index % 64)) != 0)
    }

    /// Insert `key`, returning `true` if it was not already present
    pub fn insert(&mut self, key: K) -> bool {
        let index = key.index();
        let word = index / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let bit = 1 << (index % 64);
        if self.words[word] & bit != 0 {
            return false;
        }
        self.words[word] |= bit;
        self.len += 1;
        true
    }

    /// Number of entities in the set
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K: EntityRef> Default for EntitySet<K> {
    fn default() -> Self {
        Self::new()
    }
}
