use ballot_state::MemoryStorage;
use serde::{Deserialize, Serialize};

use crate::{Address, Context, Spec};

/// The [`Context`] used for native execution and in tests: a plain sender
/// identity over the in-memory storage backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultContext {
    /// Sender of the transaction.
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = MemoryStorage;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn new(sender: Self::Address) -> Self {
        Self { sender }
    }
}
