//! # Attribute Store
//!
//! Two layers:
//!
//! * the global registry: attribute id → valid flag, plus the ordered list of
//!   every id ever registered;
//! * per soulbound: the set of attached attribute ids and one
//!   [`LatestAnswer`] per attached id.
//!
//! Invalidating an attribute is a soft delete. Attached records stay readable
//! but no longer accept updates, and the id can no longer be attached.

use soroban_sdk::{Env, Vec};
use soulbound_common::{errors, LatestAnswer};

use crate::storage::DataKey;

/// General reputation score, registered when the contract is initialized.
pub const REPUTATION_ATTRIBUTE: u32 = 0;

/// Set the validity of `attribute_id`, registering it if needed.
///
/// Returns `true` when the id was not registered before.
pub fn register(env: &Env, attribute_id: u32, valid: bool) -> bool {
    let key = DataKey::AttributeValid(attribute_id);
    let is_new = !env.storage().persistent().has(&key);
    env.storage().persistent().set(&key, &valid);

    if is_new {
        let mut registered = registered(env);
        registered.push_back(attribute_id);
        env.storage()
            .persistent()
            .set(&DataKey::AttributeList, &registered);
    }
    is_new
}

pub fn is_valid(env: &Env, attribute_id: u32) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::AttributeValid(attribute_id))
        .unwrap_or(false)
}

pub fn registered(env: &Env) -> Vec<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::AttributeList)
        .unwrap_or(Vec::new(env))
}

pub fn attributes_of(env: &Env, soulbound_id: u64) -> Vec<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::SoulAttributes(soulbound_id))
        .unwrap_or(Vec::new(env))
}

pub fn has(env: &Env, soulbound_id: u64, attribute_id: u32) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Answer(soulbound_id, attribute_id))
}

fn require_valid(env: &Env, attribute_id: u32) {
    assert!(
        is_valid(env, attribute_id),
        "{}",
        errors::ATTRIBUTE_NOT_SUPPORTED
    );
}

/// Attach `attribute_id` to a soulbound with a never-set `{0, 0}` record.
pub fn attach(env: &Env, soulbound_id: u64, attribute_id: u32) {
    require_valid(env, attribute_id);
    assert!(
        !has(env, soulbound_id, attribute_id),
        "{}",
        errors::ATTRIBUTE_ALREADY_ADDED
    );

    env.storage().persistent().set(
        &DataKey::Answer(soulbound_id, attribute_id),
        &LatestAnswer::default(),
    );
    let mut attached = attributes_of(env, soulbound_id);
    attached.push_back(attribute_id);
    env.storage()
        .persistent()
        .set(&DataKey::SoulAttributes(soulbound_id), &attached);
}

/// Overwrite the score and bump the version.
pub fn update(env: &Env, soulbound_id: u64, attribute_id: u32, score: u128) -> LatestAnswer {
    require_valid(env, attribute_id);
    let mut answer = latest_answer(env, soulbound_id, attribute_id);

    answer.score = score;
    answer.version = answer
        .version
        .checked_add(1)
        .expect("version overflow");
    env.storage()
        .persistent()
        .set(&DataKey::Answer(soulbound_id, attribute_id), &answer);
    answer
}

/// Panics with "attribute not added" unless the attribute is attached.
pub fn latest_answer(env: &Env, soulbound_id: u64, attribute_id: u32) -> LatestAnswer {
    env.storage()
        .persistent()
        .get(&DataKey::Answer(soulbound_id, attribute_id))
        .expect(errors::ATTRIBUTE_NOT_ADDED)
}
