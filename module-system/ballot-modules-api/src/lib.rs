#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod address;
mod default_context;
mod error;
mod prefix;
pub mod utils;

use core::fmt::{Debug, Display};
use std::str::FromStr;

pub use address::Address;
pub use ballot_state::{
    Event, EventKey, EventValue, MemoryStorage, StateMap, StateValue, Storage, WorkingSet,
};
use borsh::{BorshDeserialize, BorshSerialize};
pub use default_context::DefaultContext;
pub use error::Error;
pub use prefix::ModulePrefix;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The `Spec` trait configures the key primitives used by a particular
/// instance of the module system. `Spec` is almost always implemented on a
/// Context object; since all modules are generic over a Context, a host can
/// swap out the address or storage types without touching module code.
pub trait Spec {
    /// The identity type of callers. Typically a hash of a public key, but any
    /// unique 32-byte identifier works.
    type Address: BorshSerialize
        + BorshDeserialize
        + Serialize
        + DeserializeOwned
        + Eq
        + core::hash::Hash
        + Clone
        + Debug
        + Display
        + Send
        + Sync
        + From<[u8; 32]>
        + FromStr<Err = anyhow::Error>
        + 'static;

    /// The state store used by the host environment.
    type Storage: Storage + Send + Sync;
}

/// A context contains information which is passed to modules during call
/// execution. Currently, context includes the sender of the transaction.
pub trait Context: Spec + Clone + Debug + PartialEq + 'static {
    /// Sender of the transaction.
    fn sender(&self) -> &Self::Address;

    /// Constructor for the Context.
    fn new(sender: Self::Address) -> Self;
}

/// Response type for the `Module::call` method.
#[derive(Default, Debug)]
pub struct CallResponse {}

/// The core trait implemented by all modules. This trait defines how a module
/// is initialized at genesis, and how it handles user transactions.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis is called when the system is deployed and can be used to set
    /// initial state values in the module.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined type and a context as parameters.
    fn call(
        &self,
        _message: Self::CallMessage,
        _context: &Self::Context,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}
