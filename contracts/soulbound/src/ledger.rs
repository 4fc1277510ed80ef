//! # Soulbound Ledger
//!
//! Per-id lifecycle: `Unissued → Active → Revoked → Active → …`.
//!
//! * An id without a record is unissued. Issuing it creates the record.
//! * Revoking clears the owner but keeps the record, the holder history and
//!   the primary account, so the id can be reissued to anyone.
//! * Changing moves an active id between addresses and extends the history.
//!
//! At most one active id is bound to an address at any time. The binding is
//! dropped on revoke and, for the former holder, on change; history is read
//! through [`linked_accounts`] and [`primary_account`] instead.

use soroban_sdk::{Address, Env, Vec};
use soulbound_common::errors;

use crate::storage::{DataKey, SoulboundRecord};

pub fn get_record(env: &Env, soulbound_id: u64) -> Option<SoulboundRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Soulbound(soulbound_id))
}

fn set_record(env: &Env, soulbound_id: u64, record: &SoulboundRecord) {
    env.storage()
        .persistent()
        .set(&DataKey::Soulbound(soulbound_id), record);
}

/// Current holder, or `None` for unissued and revoked ids.
pub fn active_owner(env: &Env, soulbound_id: u64) -> Option<Address> {
    get_record(env, soulbound_id)
        .filter(|record| !record.revoked)
        .and_then(|record| record.owner)
}

/// Current holder; panics with "invalid id" for unissued and revoked ids.
pub fn require_owner(env: &Env, soulbound_id: u64) -> Address {
    active_owner(env, soulbound_id).expect(errors::INVALID_ID)
}

pub fn is_revoked(env: &Env, soulbound_id: u64) -> bool {
    get_record(env, soulbound_id)
        .map(|record| record.revoked)
        .unwrap_or(false)
}

pub fn token_of(env: &Env, account: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::TokenOf(account.clone()))
}

pub fn linked_accounts(env: &Env, soulbound_id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Linked(soulbound_id))
        .unwrap_or(Vec::new(env))
}

pub fn primary_account(env: &Env, soulbound_id: u64) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Primary(soulbound_id))
}

pub fn total_supply(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::Supply).unwrap_or(0)
}

fn set_total_supply(env: &Env, supply: u64) {
    env.storage().instance().set(&DataKey::Supply, &supply);
}

fn bind(env: &Env, account: &Address, soulbound_id: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::TokenOf(account.clone()), &soulbound_id);
}

fn unbind(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::TokenOf(account.clone()));
}

/// Append `account` to the holder history unless it is already there.
fn link(env: &Env, soulbound_id: u64, account: &Address) {
    let mut linked = linked_accounts(env, soulbound_id);
    if !linked.contains(account) {
        linked.push_back(account.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Linked(soulbound_id), &linked);
    }
}

fn require_unassigned(env: &Env, account: &Address) {
    assert!(
        token_of(env, account).is_none(),
        "{}",
        errors::ALREADY_ASSIGNED
    );
}

/// Issue a fresh or previously revoked id to `to`.
pub fn issue(env: &Env, to: &Address, soulbound_id: u64) {
    let active = get_record(env, soulbound_id).is_some_and(|record| !record.revoked);
    assert!(!active, "{}", errors::ALREADY_ISSUED);
    require_unassigned(env, to);

    set_record(
        env,
        soulbound_id,
        &SoulboundRecord {
            owner: Some(to.clone()),
            revoked: false,
        },
    );
    bind(env, to, soulbound_id);
    link(env, soulbound_id, to);
    env.storage()
        .persistent()
        .set(&DataKey::Primary(soulbound_id), to);

    let supply = total_supply(env)
        .checked_add(1)
        .expect("supply overflow");
    set_total_supply(env, supply);
}

/// Revoke an active id and return its former holder.
pub fn revoke(env: &Env, soulbound_id: u64) -> Address {
    let owner = require_owner(env, soulbound_id);

    set_record(
        env,
        soulbound_id,
        &SoulboundRecord {
            owner: None,
            revoked: true,
        },
    );
    unbind(env, &owner);
    set_total_supply(env, total_supply(env).saturating_sub(1));

    owner
}

/// Move an active id from `from` to `to`.
pub fn change(env: &Env, soulbound_id: u64, from: &Address, to: &Address) {
    let owner = require_owner(env, soulbound_id);
    assert!(owner == *from, "{}", errors::NOT_OWNED);
    require_unassigned(env, to);

    set_record(
        env,
        soulbound_id,
        &SoulboundRecord {
            owner: Some(to.clone()),
            revoked: false,
        },
    );
    unbind(env, from);
    bind(env, to, soulbound_id);
    link(env, soulbound_id, to);
}
