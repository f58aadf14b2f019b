use anyhow::{anyhow, Result};
use ballot_modules_api::{CallResponse, Context, WorkingSet};
use thiserror::Error;

use crate::{Candidate, Election, Voter};

/// This enumeration represents the available call messages for interacting
/// with the `ballot-election` module.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Clone,
)]
pub enum CallMessage {
    /// Register a new candidate under the next sequential id. Administrator only.
    AddCandidate {
        /// Display name of the new candidate.
        name: String,
    },
    /// Cast the sender's one and only vote.
    Vote {
        /// Id of the chosen candidate.
        candidate_id: u64,
    },
}

/// Errors raised by the election call methods. None of them leaves any state
/// behind: a failed call's working set is never committed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ElectionError {
    /// The sender is not the administrator. Not retryable.
    #[error("Sender {sender} is not authorized to register candidates")]
    PermissionDenied {
        /// The offending sender.
        sender: String,
    },
    /// The sender has already cast its vote. Terminal for that identity.
    #[error("Voter {voter} has already voted")]
    AlreadyVoted {
        /// The voter identity.
        voter: String,
    },
    /// The candidate id is outside `1..=candidate_count`. Retryable with a
    /// corrected id.
    #[error("Candidate id {candidate_id} is invalid, {candidate_count} candidates are registered")]
    InvalidCandidate {
        /// The rejected id.
        candidate_id: u64,
        /// Number of registered candidates at the time of the vote.
        candidate_count: u64,
    },
}

impl<C: Context> Election<C> {
    /// Registers a new candidate and returns its id. Only the admin is
    /// authorized to call this method; ids are assigned densely in call order.
    pub(crate) fn register_candidate(
        &self,
        name: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<u64> {
        let admin = self.admin.get_or_err(working_set)?;
        if &admin != context.sender() {
            Err(ElectionError::PermissionDenied {
                sender: context.sender().to_string(),
            })?;
        }

        let id = self
            .candidate_count
            .get_or_err(working_set)?
            .checked_add(1)
            .ok_or(anyhow!("Candidate count overflow"))?;
        let candidate = Candidate {
            id,
            name,
            vote_count: 0,
        };
        self.candidates.set(&id, &candidate, working_set);
        self.candidate_count.set(&id, working_set);
        working_set.add_event(
            "candidate_added",
            &format!("id={}, name={}", id, candidate.name),
        );

        Ok(id)
    }

    /// Casts the sender's vote for `candidate_id`. The voter record and the
    /// candidate tally are written to the same working set, so the two updates
    /// commit as one unit or not at all.
    pub(crate) fn cast_vote(
        &self,
        candidate_id: u64,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let voter_address = context.sender();
        let voter = self
            .voters
            .get(voter_address, working_set)
            .unwrap_or_default();
        if voter.voted {
            Err(ElectionError::AlreadyVoted {
                voter: voter_address.to_string(),
            })?;
        }

        let candidate_count = self.candidate_count.get_or_err(working_set)?;
        if candidate_id < 1 || candidate_id > candidate_count {
            Err(ElectionError::InvalidCandidate {
                candidate_id,
                candidate_count,
            })?;
        }

        let mut candidate = self.candidates.get_or_err(&candidate_id, working_set)?;
        candidate.vote_count = candidate
            .vote_count
            .checked_add(1)
            .ok_or(anyhow!("Vote count overflow"))?;
        self.candidates.set(&candidate_id, &candidate, working_set);
        self.voters.set(
            voter_address,
            &Voter {
                voted: true,
                candidate_id,
            },
            working_set,
        );
        working_set.add_event(
            "voted",
            &format!("voter={}, candidate_id={}", voter_address, candidate_id),
        );

        Ok(CallResponse::default())
    }
}
