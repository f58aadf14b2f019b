use std::collections::HashMap;
use std::fmt::Debug;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::storage::{StorageKey, StorageSnapshot, StorageValue};
use crate::{Event, Prefix, Storage};

/// A scratchpad for a single call: all reads go through it and all writes and
/// events land in it. Reads not shadowed by a buffered write come from a
/// [`StorageSnapshot`] captured when the working set was created, so a call
/// spanning multiple keys observes one consistent state regardless of
/// concurrent commits. Nothing reaches the backing [`Storage`] until
/// [`WorkingSet::commit`]; dropping the working set instead discards every
/// buffered change, so a failed call leaves the store exactly as it found it.
pub struct WorkingSet<S: Storage> {
    inner: S,
    snapshot: S::Snapshot,
    writes: HashMap<StorageKey, Option<StorageValue>>,
    events: Vec<Event>,
}

impl<S: Storage> Debug for WorkingSet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingSet")
            .field("events", &self.events.len())
            .finish()
    }
}

impl<S: Storage> WorkingSet<S> {
    /// Creates a new [`WorkingSet`] instance backed by the given [`Storage`].
    pub fn new(inner: S) -> Self {
        let snapshot = inner.snapshot();
        Self {
            inner,
            snapshot,
            writes: HashMap::new(),
            events: Vec::new(),
        }
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        if let Some(value) = self.writes.get(key) {
            value.clone()
        } else {
            self.snapshot.get(key)
        }
    }

    fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.writes.insert(key, Some(value));
    }

    fn delete(&mut self, key: StorageKey) {
        self.writes.insert(key, None);
    }

    pub(crate) fn set_value<K, V>(&mut self, prefix: &Prefix, key: &K, value: &V)
    where
        K: BorshSerialize,
        V: BorshSerialize,
    {
        let storage_key = StorageKey::new(prefix, key);
        self.set(storage_key, StorageValue::new(value));
    }

    pub(crate) fn get_value<K, V>(&mut self, prefix: &Prefix, key: &K) -> Option<V>
    where
        K: BorshSerialize,
        V: BorshDeserialize,
    {
        let storage_key = StorageKey::new(prefix, key);
        self.get(&storage_key).map(decode)
    }

    pub(crate) fn delete_value<K: BorshSerialize>(&mut self, prefix: &Prefix, key: &K) {
        let storage_key = StorageKey::new(prefix, key);
        self.delete(storage_key);
    }

    pub(crate) fn set_singleton<V: BorshSerialize>(&mut self, prefix: &Prefix, value: &V) {
        let storage_key = StorageKey::singleton(prefix);
        self.set(storage_key, StorageValue::new(value));
    }

    pub(crate) fn get_singleton<V: BorshDeserialize>(&mut self, prefix: &Prefix) -> Option<V> {
        let storage_key = StorageKey::singleton(prefix);
        self.get(&storage_key).map(decode)
    }

    /// Adds an event to the working set.
    pub fn add_event(&mut self, key: &str, value: &str) {
        self.events.push(Event::new(key, value));
    }

    /// Extracts all events from this working set.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Returns an immutable slice of all events that have been previously
    /// written to this working set.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns an immutable reference to the [`Storage`] instance backing this
    /// working set.
    pub fn backing(&self) -> &S {
        &self.inner
    }

    /// Applies all buffered writes to the backing [`Storage`] as one atomic
    /// batch, consuming the working set.
    pub fn commit(self) {
        let writes = self.writes.into_iter().collect();
        self.inner.commit(writes);
    }

    /// Discards all buffered writes and events, returning the untouched
    /// backing [`Storage`].
    pub fn revert(self) -> S {
        self.inner
    }
}

fn decode<V: BorshDeserialize>(storage_value: StorageValue) -> V {
    V::try_from_slice(storage_value.value()).unwrap_or_else(|err| {
        // A decoding failure here means the stored bytes were written with a
        // different type, which is a bug in the container prefixes.
        panic!(
            "Failed to decode value 0x{}, error: {:?}",
            hex::encode(storage_value.value()),
            err
        )
    })
}
