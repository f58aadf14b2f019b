#![deny(missing_docs)]
#![doc = include_str!("../README.md")]
mod call;
mod genesis;
mod query;


use ballot_modules_api::{
    CallResponse, Context, Error, ModulePrefix, StateMap, StateValue, WorkingSet,
};
pub use call::{CallMessage, ElectionError};
pub use query::*;

/// A candidate registered in the election.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
)]
pub struct Candidate {
    /// Sequential id assigned at registration, starting at 1.
    pub id: u64,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Number of votes cast for this candidate.
    pub vote_count: u64,
}

/// Per-identity ballot record. Voters are not pre-registered: a missing entry
/// reads as the default record, i.e. an identity that has not voted yet.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Default,
)]
pub struct Voter {
    /// Whether this identity has cast its vote. Once true, never reset.
    pub voted: bool,
    /// Id of the chosen candidate. Meaningful only when `voted` is true.
    pub candidate_id: u64,
}

/// Initial configuration for the ballot-election module.
#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C::Address: serde::Serialize + serde::de::DeserializeOwned")]
pub struct ElectionConfig<C: Context> {
    /// The one identity permitted to register candidates. Fixed for the
    /// lifetime of the election.
    pub admin: C::Address,
}

/// The election module.
pub struct Election<C: Context> {
    /// Holds the address of the admin user who is allowed to register candidates.
    pub(crate) admin: StateValue<C::Address>,

    /// Number of candidates registered so far. Candidate ids are exactly
    /// `1..=candidate_count`, with no gaps.
    pub(crate) candidate_count: StateValue<u64>,

    /// The candidate registry, keyed by id.
    pub(crate) candidates: StateMap<u64, Candidate>,

    /// The ballot ledger, keyed by voter identity.
    pub(crate) voters: StateMap<C::Address, Voter>,
}

impl<C: Context> Default for Election<C> {
    fn default() -> Self {
        Self {
            admin: StateValue::new(
                ModulePrefix::new_storage(module_path!(), "Election", "admin").into(),
            ),
            candidate_count: StateValue::new(
                ModulePrefix::new_storage(module_path!(), "Election", "candidate_count").into(),
            ),
            candidates: StateMap::new(
                ModulePrefix::new_storage(module_path!(), "Election", "candidates").into(),
            ),
            voters: StateMap::new(
                ModulePrefix::new_storage(module_path!(), "Election", "voters").into(),
            ),
        }
    }
}

impl<C: Context> ballot_modules_api::Module for Election<C> {
    type Context = C;

    type Config = ElectionConfig<C>;

    type CallMessage = call::CallMessage;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        match msg {
            call::CallMessage::AddCandidate { name } => {
                self.register_candidate(name, context, working_set)?;
                Ok(CallResponse::default())
            }
            call::CallMessage::Vote { candidate_id } => {
                Ok(self.cast_vote(candidate_id, context, working_set)?)
            }
        }
    }
}
