//! # Property Tests for the Soulbound Ledger
//!
//! Two styles, as elsewhere in the workspace:
//!
//! * a model check driven by `proptest!`: random sequences of
//!   issue/revoke/change are applied both to the contract and to a plain
//!   in-memory model, and the two must agree on every outcome and on the
//!   final bindings;
//! * parametric tests iterating a fixed input matrix, one fresh `Env` per
//!   case.
//!
//! | ID | Property                                                              |
//! |----|-----------------------------------------------------------------------|
//! | L1 | An address holds at most one active id; `owner_of`/`token_of` agree    |
//! | L2 | `total_supply` equals the number of active ids                        |
//! | L3 | An operation succeeds iff the model says it is legal                  |
//! | L4 | Every holder of an id appears in `linked_accounts` exactly once       |
//! | L5 | `update_score` with score `s` yields `{s, v + 1}`                     |

extern crate std;

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;
use std::vec::Vec as StdVec;

use crate::test::setup;
use crate::*;

const IDS: usize = 4;
const ACCOUNTS: usize = 4;

#[derive(Clone, Debug)]
enum Op {
    Issue { account: usize, id: usize },
    Revoke { id: usize },
    Change { id: usize, from: usize, to: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ACCOUNTS, 0..IDS).prop_map(|(account, id)| Op::Issue { account, id }),
        (0..IDS).prop_map(|id| Op::Revoke { id }),
        (0..IDS, 0..ACCOUNTS, 0..ACCOUNTS).prop_map(|(id, from, to)| Op::Change { id, from, to }),
    ]
}

/// Ledger model: owner account per id, id per account.
#[derive(Default)]
struct Model {
    owner: [Option<usize>; IDS],
    token: [Option<usize>; ACCOUNTS],
    linked: [StdVec<usize>; IDS],
}

impl Model {
    /// Apply `op`; returns whether it is legal.
    fn apply(&mut self, op: &Op) -> bool {
        match *op {
            Op::Issue { account, id } => {
                if self.owner[id].is_some() || self.token[account].is_some() {
                    return false;
                }
                self.owner[id] = Some(account);
                self.token[account] = Some(id);
                self.link(id, account);
                true
            }
            Op::Revoke { id } => match self.owner[id].take() {
                Some(account) => {
                    self.token[account] = None;
                    true
                }
                None => false,
            },
            Op::Change { id, from, to } => {
                if self.owner[id] != Some(from) || self.token[to].is_some() {
                    return false;
                }
                self.owner[id] = Some(to);
                self.token[from] = None;
                self.token[to] = Some(id);
                self.link(id, to);
                true
            }
        }
    }

    fn link(&mut self, id: usize, account: usize) {
        if !self.linked[id].contains(&account) {
            self.linked[id].push(account);
        }
    }
}

// ════════════════════════════════════════════════════════════════════
//  L1–L4: ledger lifecycle against the model
// ════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_ledger_matches_model(ops in prop::collection::vec(op_strategy(), 1..24)) {
        let s = setup();
        let accounts: StdVec<Address> =
            (0..ACCOUNTS).map(|_| Address::generate(&s.env)).collect();
        let mut model = Model::default();

        for op in ops.iter() {
            let legal = model.apply(op);
            let accepted = match *op {
                Op::Issue { account, id } => s
                    .client
                    .try_issue(&s.admin, &accounts[account], &(id as u64))
                    .is_ok(),
                Op::Revoke { id } => s.client.try_revoke(&s.admin, &(id as u64)).is_ok(),
                Op::Change { id, from, to } => s
                    .client
                    .try_change(&s.admin, &(id as u64), &accounts[from], &accounts[to])
                    .is_ok(),
            };
            prop_assert_eq!(legal, accepted, "{:?}", op);
        }

        let mut active = 0u64;
        for id in 0..IDS {
            let soulbound_id = id as u64;
            match model.owner[id] {
                Some(account) => {
                    active += 1;
                    prop_assert_eq!(s.client.owner_of(&soulbound_id), accounts[account].clone());
                }
                None => prop_assert!(s.client.try_owner_of(&soulbound_id).is_err()),
            }

            let linked = s.client.linked_accounts(&soulbound_id);
            prop_assert_eq!(linked.len() as usize, model.linked[id].len());
            for (position, account) in model.linked[id].iter().enumerate() {
                prop_assert_eq!(
                    linked.get(position as u32).unwrap(),
                    accounts[*account].clone()
                );
            }
        }
        for account in 0..ACCOUNTS {
            match model.token[account] {
                Some(id) => prop_assert_eq!(s.client.token_of(&accounts[account]), id as u64),
                None => prop_assert!(s.client.try_token_of(&accounts[account]).is_err()),
            }
        }
        prop_assert_eq!(s.client.total_supply(), active);
    }
}

// ════════════════════════════════════════════════════════════════════
//  L5: score writes
// ════════════════════════════════════════════════════════════════════

const SCORE_SEQUENCES: &[&[u128]] = &[
    &[0],
    &[1, 1, 1],
    &[u128::MAX, 0],
    &[750, 640, 820, 700],
    &[1 << 64, (1 << 64) + 1],
];

#[test]
fn test_each_update_bumps_version_by_one() {
    for scores in SCORE_SEQUENCES {
        let s = setup();
        s.client.issue(&s.admin, &Address::generate(&s.env), &0);
        s.client.add_attribute_to(&s.admin, &0, &REPUTATION_ATTRIBUTE);

        for (index, score) in scores.iter().enumerate() {
            s.client.update_score(&s.admin, &0, &REPUTATION_ATTRIBUTE, score);
            assert_eq!(
                s.client.latest_answer(&0, &REPUTATION_ATTRIBUTE),
                LatestAnswer {
                    score: *score,
                    version: index as u64 + 1,
                },
                "scores {:?} at step {}",
                scores,
                index
            );
        }
    }
}

const BOUNDARY_IDS: &[u64] = &[0, 1, u32::MAX as u64, u64::MAX - 1, u64::MAX];

#[test]
fn test_boundary_ids_issue_and_revoke() {
    for soulbound_id in BOUNDARY_IDS {
        let s = setup();
        let holder = Address::generate(&s.env);

        s.client.issue(&s.admin, &holder, soulbound_id);
        assert_eq!(s.client.owner_of(soulbound_id), holder);
        assert_eq!(s.client.token_of(&holder), *soulbound_id);

        s.client.revoke(&s.admin, soulbound_id);
        assert!(s.client.is_revoked(soulbound_id), "id {}", soulbound_id);
        assert_eq!(s.client.total_supply(), 0);
    }
}
