//! Storage keys, values, and the backing-store trait.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, RwLock};

use borsh::BorshSerialize;

use crate::Prefix;

// `Key` type for the `Storage`
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct StorageKey {
    key: Arc<Vec<u8>>,
}

impl StorageKey {
    pub fn key(&self) -> Arc<Vec<u8>> {
        self.key.clone()
    }

    /// Creates a new StorageKey that combines a prefix and a key.
    pub fn new<K: BorshSerialize>(prefix: &Prefix, key: &K) -> Self {
        // Serializing a well-formed key into a `Vec` never fails.
        let encoded_key = key.try_to_vec().expect("Failed to serialize key");

        let mut full_key = Vec::with_capacity(prefix.len() + encoded_key.len());
        full_key.extend(prefix.as_bytes());
        full_key.extend(encoded_key);

        Self {
            key: Arc::new(full_key),
        }
    }

    /// Creates a new StorageKey consisting of the prefix alone, for singleton values.
    pub fn singleton(prefix: &Prefix) -> Self {
        Self {
            key: Arc::new(prefix.as_bytes().to_vec()),
        }
    }
}

impl AsRef<Vec<u8>> for StorageKey {
    fn as_ref(&self) -> &Vec<u8> {
        &self.key
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.key.as_ref()))
    }
}

/// A serialized value suitable for storing. Internally uses an [`Arc<Vec<u8>>`] for cheap cloning.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StorageValue {
    value: Arc<Vec<u8>>,
}

impl StorageValue {
    pub fn new<V: BorshSerialize>(value: &V) -> Self {
        let encoded_value = value.try_to_vec().expect("Failed to serialize value");
        Self {
            value: Arc::new(encoded_value),
        }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl From<Vec<u8>> for StorageValue {
    fn from(value: Vec<u8>) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
}

/// A write buffered by a [`WorkingSet`](crate::WorkingSet); `None` deletes the key.
pub type StorageWrite = (StorageKey, Option<StorageValue>);

/// A frozen view of a [`Storage`] at a single point in its commit order.
/// Every read through one snapshot observes the same state, no matter what
/// commits land concurrently.
pub trait StorageSnapshot {
    /// Returns the value corresponding to the key or None if the key is absent.
    fn get(&self, key: &StorageKey) -> Option<StorageValue>;
}

/// The seam between the module system and whatever store the host provides.
///
/// `commit` must apply a whole batch of writes as one indivisible unit, and
/// readers go through a [`StorageSnapshot`] taken at some point in the commit
/// order: a reader spanning multiple keys never observes a state that lies
/// between two commits.
pub trait Storage: Clone {
    /// The frozen-view type handed out to readers.
    type Snapshot: StorageSnapshot;

    /// Captures a consistent snapshot of the current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Atomically applies a batch of writes.
    fn commit(&self, writes: Vec<StorageWrite>);
}

/// An in-memory key-value store.
///
/// The live map is held as an `Arc` behind the lock: `commit` builds the next
/// map and swaps it in under the write lock, while snapshots clone the `Arc`
/// and keep reading the map that was current when they were taken.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    cells: Arc<RwLock<Arc<HashMap<StorageKey, StorageValue>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A [`StorageSnapshot`] of a [`MemoryStorage`]: a handle on one frozen map.
#[derive(Clone)]
pub struct MemorySnapshot {
    cells: Arc<HashMap<StorageKey, StorageValue>>,
}

impl StorageSnapshot for MemorySnapshot {
    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        self.cells.get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    type Snapshot = MemorySnapshot;

    fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            cells: self.cells.read().expect("Storage lock is poisoned").clone(),
        }
    }

    fn commit(&self, writes: Vec<StorageWrite>) {
        let mut cells = self.cells.write().expect("Storage lock is poisoned");
        let mut next = HashMap::clone(cells.as_ref());
        for (key, value) in writes {
            match value {
                Some(value) => {
                    next.insert(key, value);
                }
                None => {
                    next.remove(&key);
                }
            }
        }
        *cells = Arc::new(next);
    }
}
