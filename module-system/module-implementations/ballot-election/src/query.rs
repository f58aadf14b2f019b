//! Defines read-only queries exposed by the ballot-election module, along
//! with the relevant response types.

use ballot_modules_api::{Context, WorkingSet};

use crate::{Candidate, Election};

/// Structure returned by the candidate queries.
#[derive(Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize, Clone)]
pub struct CandidateResponse {
    /// Candidate id; `0` means "no such candidate".
    pub id: u64,
    /// Candidate name; empty for the zero record.
    pub name: String,
    /// Votes accumulated so far.
    pub vote_count: u64,
}

impl From<Candidate> for CandidateResponse {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            vote_count: candidate.vote_count,
        }
    }
}

impl CandidateResponse {
    fn zero() -> Self {
        Self {
            id: 0,
            name: String::new(),
            vote_count: 0,
        }
    }
}

impl<C: Context> Election<C> {
    /// Returns the candidate stored under `id`.
    ///
    /// For an id outside `1..=candidate_count` this returns the zero-valued
    /// record rather than failing, mirroring missing-key-returns-default
    /// semantics. Callers must treat `id: 0` in the response as "no such
    /// candidate", not as a real entry.
    pub fn candidate(&self, id: u64, working_set: &mut WorkingSet<C::Storage>) -> CandidateResponse {
        self.candidates
            .get(&id, working_set)
            .map(Into::into)
            .unwrap_or_else(CandidateResponse::zero)
    }

    /// Returns all candidates in ascending id order. Recomputed fresh on
    /// every call.
    pub fn candidates(&self, working_set: &mut WorkingSet<C::Storage>) -> Vec<CandidateResponse> {
        let candidate_count = self.candidate_count.get(working_set).unwrap_or_default();
        (1..=candidate_count)
            .map(|id| self.candidate(id, working_set))
            .collect()
    }

    /// Returns the id of the candidate with the most votes, or `0` when no
    /// candidate has received a vote yet (including when the registry is
    /// empty). On a tie the lowest id wins: the strict `>` comparison means a
    /// later candidate with an equal count never displaces the current leader.
    pub fn winning_candidate_id(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        let candidate_count = self.candidate_count.get(working_set).unwrap_or_default();
        let mut winning_id = 0;
        let mut winning_vote_count = 0;
        for id in 1..=candidate_count {
            if let Some(candidate) = self.candidates.get(&id, working_set) {
                if candidate.vote_count > winning_vote_count {
                    winning_vote_count = candidate.vote_count;
                    winning_id = id;
                }
            }
        }
        winning_id
    }

    /// Returns the name of the winning candidate. When there is no winner the
    /// winning id is `0` and this resolves to the empty name of the zero
    /// record.
    pub fn winner_name(&self, working_set: &mut WorkingSet<C::Storage>) -> String {
        let winning_id = self.winning_candidate_id(working_set);
        self.candidate(winning_id, working_set).name
    }
}
