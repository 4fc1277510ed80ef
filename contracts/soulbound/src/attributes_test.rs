#![cfg(test)]

use soroban_sdk::testutils::{Address as _, Events};
use soroban_sdk::{symbol_short, vec, Address, IntoVal, TryIntoVal, Val, Vec};

use crate::test::setup;
use crate::*;

const KYC_ATTRIBUTE: u32 = 7;

#[test]
fn test_register_new_attribute() {
    let s = setup();

    s.client.register_attribute(&s.admin, &KYC_ATTRIBUTE, &false);

    assert!(s.client.is_attribute_valid(&KYC_ATTRIBUTE));
    assert_eq!(
        s.client.attributes(),
        vec![&s.env, REPUTATION_ATTRIBUTE, KYC_ATTRIBUTE]
    );

    let last = s.env.events().all().last().unwrap();
    let topics: Vec<Val> = (symbol_short!("attr_reg"), KYC_ATTRIBUTE).into_val(&s.env);
    assert_eq!(last.1, topics);
    let (is_new, valid): (bool, bool) = last.2.try_into_val(&s.env).unwrap();
    assert!(is_new);
    assert!(valid);
}

#[test]
fn test_invalidate_and_restore_attribute() {
    let s = setup();
    s.client.register_attribute(&s.admin, &KYC_ATTRIBUTE, &false);

    s.client.register_attribute(&s.admin, &KYC_ATTRIBUTE, &true);
    assert!(!s.client.is_attribute_valid(&KYC_ATTRIBUTE));

    let last = s.env.events().all().last().unwrap();
    let (is_new, valid): (bool, bool) = last.2.try_into_val(&s.env).unwrap();
    assert!(!is_new);
    assert!(!valid);

    s.client.register_attribute(&s.admin, &KYC_ATTRIBUTE, &false);
    assert!(s.client.is_attribute_valid(&KYC_ATTRIBUTE));
    // The registry list keeps one entry per id.
    assert_eq!(s.client.attributes().len(), 2);
}

#[test]
fn test_register_invalidated_from_the_start() {
    let s = setup();
    s.client.register_attribute(&s.admin, &KYC_ATTRIBUTE, &true);

    assert!(!s.client.is_attribute_valid(&KYC_ATTRIBUTE));
    assert_eq!(s.client.attributes().len(), 2);
}

#[test]
#[should_panic(expected = "caller lacks required role")]
fn test_register_attribute_requires_manager() {
    let s = setup();
    let outsider = Address::generate(&s.env);
    s.client.register_attribute(&outsider, &KYC_ATTRIBUTE, &false);
}

#[test]
fn test_add_attribute_starts_unset() {
    let s = setup();
    s.client.issue(&s.admin, &Address::generate(&s.env), &1);

    assert!(!s.client.has_attribute(&1, &REPUTATION_ATTRIBUTE));
    s.client.add_attribute_to(&s.admin, &1, &REPUTATION_ATTRIBUTE);

    assert!(s.client.has_attribute(&1, &REPUTATION_ATTRIBUTE));
    assert_eq!(
        s.client.latest_answer(&1, &REPUTATION_ATTRIBUTE),
        LatestAnswer::default()
    );
    assert_eq!(
        s.client.attributes_of(&1),
        vec![&s.env, REPUTATION_ATTRIBUTE]
    );
}

#[test]
fn test_update_score_bumps_version() {
    let s = setup();
    s.client.issue(&s.admin, &Address::generate(&s.env), &1);
    s.client.add_attribute_to(&s.admin, &1, &REPUTATION_ATTRIBUTE);

    s.client.update_score(&s.admin, &1, &REPUTATION_ATTRIBUTE, &640);
    assert_eq!(
        s.client.latest_answer(&1, &REPUTATION_ATTRIBUTE),
        LatestAnswer {
            score: 640,
            version: 1
        }
    );

    s.client.update_score(&s.admin, &1, &REPUTATION_ATTRIBUTE, &u128::MAX);
    assert_eq!(
        s.client.latest_answer(&1, &REPUTATION_ATTRIBUTE),
        LatestAnswer {
            score: u128::MAX,
            version: 2
        }
    );

    let last = s.env.events().all().last().unwrap();
    let topics: Vec<Val> =
        (symbol_short!("update_rs"), 1u64, REPUTATION_ATTRIBUTE).into_val(&s.env);
    assert_eq!(last.1, topics);
    let (score, version): (u128, u64) = last.2.try_into_val(&s.env).unwrap();
    assert_eq!(score, u128::MAX);
    assert_eq!(version, 2);
}

#[test]
fn test_scores_are_isolated_per_soulbound() {
    let s = setup();
    s.client.issue(&s.admin, &Address::generate(&s.env), &1);
    s.client.issue(&s.admin, &Address::generate(&s.env), &2);
    s.client.add_attribute_to(&s.admin, &1, &REPUTATION_ATTRIBUTE);
    s.client.add_attribute_to(&s.admin, &2, &REPUTATION_ATTRIBUTE);

    s.client.update_score(&s.admin, &1, &REPUTATION_ATTRIBUTE, &10);

    assert_eq!(s.client.latest_answer(&2, &REPUTATION_ATTRIBUTE).version, 0);
    assert_eq!(s.client.latest_answer(&1, &REPUTATION_ATTRIBUTE).score, 10);
}

#[test]
#[should_panic(expected = "attribute not supported")]
fn test_add_unregistered_attribute_panics() {
    let s = setup();
    s.client.issue(&s.admin, &Address::generate(&s.env), &1);
    s.client.add_attribute_to(&s.admin, &1, &KYC_ATTRIBUTE);
}

#[test]
#[should_panic(expected = "attribute already added")]
fn test_add_attribute_twice_panics() {
    let s = setup();
    s.client.issue(&s.admin, &Address::generate(&s.env), &1);
    s.client.add_attribute_to(&s.admin, &1, &REPUTATION_ATTRIBUTE);
    s.client.add_attribute_to(&s.admin, &1, &REPUTATION_ATTRIBUTE);
}

#[test]
#[should_panic(expected = "attribute not added")]
fn test_update_unattached_attribute_panics() {
    let s = setup();
    s.client.issue(&s.admin, &Address::generate(&s.env), &1);
    s.client.update_score(&s.admin, &1, &REPUTATION_ATTRIBUTE, &5);
}

#[test]
#[should_panic(expected = "attribute not added")]
fn test_latest_answer_unattached_panics() {
    let s = setup();
    s.client.latest_answer(&1, &REPUTATION_ATTRIBUTE);
}

#[test]
fn test_invalidated_attribute_rejects_updates_but_stays_readable() {
    let s = setup();
    s.client.register_attribute(&s.admin, &KYC_ATTRIBUTE, &false);
    s.client.issue(&s.admin, &Address::generate(&s.env), &1);
    s.client.add_attribute_to(&s.admin, &1, &KYC_ATTRIBUTE);
    s.client.update_score(&s.admin, &1, &KYC_ATTRIBUTE, &1);

    s.client.register_attribute(&s.admin, &KYC_ATTRIBUTE, &true);

    assert!(s
        .client
        .try_update_score(&s.admin, &1, &KYC_ATTRIBUTE, &2)
        .is_err());
    assert_eq!(
        s.client.latest_answer(&1, &KYC_ATTRIBUTE),
        LatestAnswer {
            score: 1,
            version: 1
        }
    );
    assert!(s.client.has_attribute(&1, &KYC_ATTRIBUTE));
}

#[test]
#[should_panic(expected = "invalid id")]
fn test_add_attribute_to_unissued_panics() {
    let s = setup();
    s.client.add_attribute_to(&s.admin, &1, &REPUTATION_ATTRIBUTE);
}

#[test]
fn test_revoked_soulbound_is_frozen_but_readable() {
    let s = setup();
    s.client.issue(&s.admin, &Address::generate(&s.env), &1);
    s.client.add_attribute_to(&s.admin, &1, &REPUTATION_ATTRIBUTE);
    s.client.update_score(&s.admin, &1, &REPUTATION_ATTRIBUTE, &300);
    s.client.revoke(&s.admin, &1);

    assert!(s
        .client
        .try_update_score(&s.admin, &1, &REPUTATION_ATTRIBUTE, &301)
        .is_err());
    assert_eq!(
        s.client.latest_answer(&1, &REPUTATION_ATTRIBUTE),
        LatestAnswer {
            score: 300,
            version: 1
        }
    );
}

#[test]
#[should_panic(expected = "caller lacks required role")]
fn test_update_score_requires_operator() {
    let s = setup();
    let holder = Address::generate(&s.env);
    s.client.issue(&s.admin, &holder, &1);
    s.client.add_attribute_to(&s.admin, &1, &REPUTATION_ATTRIBUTE);
    s.client.update_score(&holder, &1, &REPUTATION_ATTRIBUTE, &900);
}
