#![doc = include_str!("../README.md")]

mod event;
mod map;
mod scratchpad;
pub mod storage;
mod value;


pub use event::{Event, EventKey, EventValue};
pub use map::{StateMap, StateMapError};
pub use scratchpad::WorkingSet;
pub use storage::{MemorySnapshot, MemoryStorage, Storage, StorageSnapshot};
pub use value::{StateValue, StateValueError};

// A prefix prepended to each key before insertion and retrieval from the storage.
// All the collection types in this crate are backed by the same storage instance, this means that
// insertions of the same key to two different `StateMaps` would collide with each other. We solve
// it by instantiating every collection type with a unique prefix that is prepended to each key.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Prefix {
    prefix: Vec<u8>,
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.prefix))
    }
}

impl Prefix {
    pub fn new(prefix: Vec<u8>) -> Self {
        Self { prefix }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
