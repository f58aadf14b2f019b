use std::collections::{HashMap, HashSet};

use ballot_election::{CallMessage, Election, ElectionConfig};
use ballot_modules_api::utils::generate_address;
use ballot_modules_api::{
    Address, Context, DefaultContext, Error, MemoryStorage, Module, WorkingSet,
};
use proptest::prelude::*;

/// Applies one call transactionally: committed on success, dropped on error,
/// the way a host runtime applies transactions.
fn apply_call(
    storage: &MemoryStorage,
    module: &Election<DefaultContext>,
    sender: Address,
    msg: CallMessage,
) -> Result<(), Error> {
    let mut working_set = WorkingSet::new(storage.clone());
    let context = DefaultContext::new(sender);
    module.call(msg, &context, &mut working_set)?;
    working_set.commit();
    Ok(())
}

fn setup() -> (MemoryStorage, Election<DefaultContext>, Address) {
    let storage = MemoryStorage::new();
    let module = Election::<DefaultContext>::default();
    let admin = generate_address::<DefaultContext>("admin");
    let mut working_set = WorkingSet::new(storage.clone());
    module
        .genesis(&ElectionConfig { admin }, &mut working_set)
        .unwrap();
    working_set.commit();
    (storage, module, admin)
}

#[test]
fn test_end_to_end_scenario() {
    let (storage, module, admin) = setup();

    for name in ["Mary", "John"] {
        apply_call(
            &storage,
            &module,
            admin,
            CallMessage::AddCandidate {
                name: name.to_string(),
            },
        )
        .unwrap();
    }

    let voter_x = generate_address::<DefaultContext>("voter_x");
    let voter_y = generate_address::<DefaultContext>("voter_y");

    apply_call(&storage, &module, voter_x, CallMessage::Vote { candidate_id: 1 }).unwrap();
    apply_call(&storage, &module, voter_x, CallMessage::Vote { candidate_id: 2 }).unwrap_err();
    apply_call(&storage, &module, voter_y, CallMessage::Vote { candidate_id: 2 }).unwrap();

    let mut working_set = WorkingSet::new(storage);
    let candidates = module.candidates(&mut working_set);
    let summary: Vec<(u64, &str, u64)> = candidates
        .iter()
        .map(|c| (c.id, c.name.as_str(), c.vote_count))
        .collect();
    assert_eq!(summary, vec![(1, "Mary", 1), (2, "John", 1)]);
    assert_eq!(module.winning_candidate_id(&mut working_set), 1);
    assert_eq!(module.winner_name(&mut working_set), "Mary");
}

#[test]
fn test_failed_calls_commit_nothing() {
    let (storage, module, admin) = setup();
    apply_call(
        &storage,
        &module,
        admin,
        CallMessage::AddCandidate {
            name: "Mary".to_string(),
        },
    )
    .unwrap();

    // A rejected registration by an outsider changes nothing.
    let outsider = generate_address::<DefaultContext>("outsider");
    apply_call(
        &storage,
        &module,
        outsider,
        CallMessage::AddCandidate {
            name: "Eve".to_string(),
        },
    )
    .unwrap_err();

    // A rejected vote does not consume the voter's ballot.
    apply_call(
        &storage,
        &module,
        outsider,
        CallMessage::Vote { candidate_id: 99 },
    )
    .unwrap_err();

    let mut working_set = WorkingSet::new(storage.clone());
    assert_eq!(module.candidates(&mut working_set).len(), 1);
    drop(working_set);

    apply_call(&storage, &module, outsider, CallMessage::Vote { candidate_id: 1 }).unwrap();
    let mut working_set = WorkingSet::new(storage);
    assert_eq!(module.candidate(1, &mut working_set).vote_count, 1);
}

#[test]
fn test_queries_observe_one_committed_state() {
    let (storage, module, admin) = setup();
    for name in ["Mary", "John"] {
        apply_call(
            &storage,
            &module,
            admin,
            CallMessage::AddCandidate {
                name: name.to_string(),
            },
        )
        .unwrap();
    }

    // A query spanning both candidates stays pinned to the state it started
    // from, even when votes are committed between its reads.
    let mut reader = WorkingSet::new(storage.clone());
    assert_eq!(module.candidate(1, &mut reader).vote_count, 0);

    let voter_x = generate_address::<DefaultContext>("voter_x");
    let voter_y = generate_address::<DefaultContext>("voter_y");
    apply_call(&storage, &module, voter_x, CallMessage::Vote { candidate_id: 1 }).unwrap();
    apply_call(&storage, &module, voter_y, CallMessage::Vote { candidate_id: 2 }).unwrap();

    assert_eq!(module.candidate(2, &mut reader).vote_count, 0);

    let mut fresh = WorkingSet::new(storage);
    assert_eq!(module.candidate(1, &mut fresh).vote_count, 1);
    assert_eq!(module.candidate(2, &mut fresh).vote_count, 1);
}

proptest! {
    /// Ids assigned by successful registrations are exactly `1..=n`, in call
    /// order.
    #[test]
    fn candidate_ids_are_dense(names in proptest::collection::vec("[a-z]{1,8}", 0..16)) {
        let (storage, module, admin) = setup();
        for name in &names {
            apply_call(
                &storage,
                &module,
                admin,
                CallMessage::AddCandidate { name: name.clone() },
            )
            .unwrap();
        }

        let mut working_set = WorkingSet::new(storage);
        let candidates = module.candidates(&mut working_set);
        prop_assert_eq!(candidates.len(), names.len());
        for (index, candidate) in candidates.iter().enumerate() {
            prop_assert_eq!(candidate.id, index as u64 + 1);
            prop_assert_eq!(&candidate.name, &names[index]);
        }
    }

    /// At every point, the candidates' vote counts sum to the number of
    /// distinct identities that have voted, and no identity votes twice.
    #[test]
    fn vote_counts_match_voter_count(
        candidate_count in 1u64..5,
        attempts in proptest::collection::vec((0usize..8, 0u64..7), 1..40),
    ) {
        let (storage, module, admin) = setup();
        for index in 0..candidate_count {
            apply_call(
                &storage,
                &module,
                admin,
                CallMessage::AddCandidate { name: format!("candidate_{index}") },
            )
            .unwrap();
        }

        let mut voted: HashSet<Address> = HashSet::new();
        let mut expected_counts: HashMap<u64, u64> = HashMap::new();

        for (voter_index, candidate_id) in attempts {
            let voter = generate_address::<DefaultContext>(&format!("voter_{voter_index}"));
            let valid = (1..=candidate_count).contains(&candidate_id);
            let result = apply_call(
                &storage,
                &module,
                voter,
                CallMessage::Vote { candidate_id },
            );

            if valid && !voted.contains(&voter) {
                prop_assert!(result.is_ok());
                voted.insert(voter);
                *expected_counts.entry(candidate_id).or_default() += 1;
            } else {
                prop_assert!(result.is_err());
            }

            let mut working_set = WorkingSet::new(storage.clone());
            let total: u64 = module
                .candidates(&mut working_set)
                .iter()
                .map(|c| c.vote_count)
                .sum();
            prop_assert_eq!(total, voted.len() as u64);
        }

        let mut working_set = WorkingSet::new(storage);
        for candidate in module.candidates(&mut working_set) {
            let expected = expected_counts.get(&candidate.id).copied().unwrap_or(0);
            prop_assert_eq!(candidate.vote_count, expected);
        }
    }
}
