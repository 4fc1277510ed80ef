//! # Soulbound Ledger Contract
//!
//! Non-transferable identity tokens ("soulbounds") and the scored attributes
//! attached to them.
//!
//! ## Roles
//!
//! Every mutation is gated by a role in the configured role registry:
//!
//! | Operation                                 | Role            |
//! |-------------------------------------------|-----------------|
//! | `issue`, `revoke`, `change`               | `ROLE_MINTER`   |
//! | `add_attribute_to`, `update_score`        | `ROLE_OPERATOR` |
//! | `register_attribute`                      | `ROLE_MANAGER`  |
//!
//! In a deployment the minter and updater gateways hold the minter and
//! operator roles, so end users reach the ledger only through signed,
//! fee-paying requests.
//!
//! There is no transfer. An id changes hands only through `change`.

#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};
use soulbound_common::{
    errors, require_role, LatestAnswer, ROLE_ADMIN, ROLE_MANAGER, ROLE_MINTER, ROLE_OPERATOR,
};

pub mod attributes;
pub mod events;
pub mod ledger;
pub mod storage;

pub use attributes::REPUTATION_ATTRIBUTE;
pub use storage::{DataKey, SoulboundRecord};

#[cfg(test)]
mod attributes_test;
#[cfg(test)]
mod property_test;

#[contract]
pub struct SoulboundContract;

#[contractimpl]
impl SoulboundContract {
    // ── Initialization ──────────────────────────────────────────────

    /// One-time initialization.
    ///
    /// `admin` must hold `ROLE_ADMIN` in `registry` and authorize the call.
    /// Registers [`REPUTATION_ATTRIBUTE`] as a valid attribute.
    pub fn initialize(env: Env, admin: Address, registry: Address, name: String, symbol: String) {
        if storage::is_initialized(&env) {
            panic!("{}", errors::ALREADY_INITIALIZED);
        }
        require_role(&env, &registry, &admin, ROLE_ADMIN);

        env.storage().instance().set(&DataKey::Registry, &registry);
        env.storage().instance().set(&DataKey::Name, &name);
        env.storage().instance().set(&DataKey::Symbol, &symbol);

        attributes::register(&env, REPUTATION_ATTRIBUTE, true);
        events::emit_attribute_registered(&env, REPUTATION_ATTRIBUTE, true, true);
    }

    pub fn registry(env: Env) -> Address {
        storage::get_registry(&env)
    }

    pub fn name(env: Env) -> String {
        env.storage()
            .instance()
            .get(&DataKey::Name)
            .expect(errors::NOT_INITIALIZED)
    }

    pub fn symbol(env: Env) -> String {
        env.storage()
            .instance()
            .get(&DataKey::Symbol)
            .expect(errors::NOT_INITIALIZED)
    }

    // ── Ledger: mutations ───────────────────────────────────────────

    /// Issue `soulbound_id` to `to`.
    ///
    /// The id must be unissued or revoked, and `to` must not hold an active
    /// id. Reissuing keeps the holder history and attribute records.
    pub fn issue(env: Env, caller: Address, to: Address, soulbound_id: u64) {
        require_role(&env, &storage::get_registry(&env), &caller, ROLE_MINTER);
        ledger::issue(&env, &to, soulbound_id);
        events::emit_issued(&env, soulbound_id, &to);
    }

    /// Revoke an active id. Its attributes can no longer be updated until it
    /// is reissued.
    pub fn revoke(env: Env, caller: Address, soulbound_id: u64) {
        require_role(&env, &storage::get_registry(&env), &caller, ROLE_MINTER);
        let former_owner = ledger::revoke(&env, soulbound_id);
        events::emit_revoked(&env, soulbound_id, &former_owner);
    }

    /// Move an active id from `from` (its current holder) to `to`.
    pub fn change(env: Env, caller: Address, soulbound_id: u64, from: Address, to: Address) {
        require_role(&env, &storage::get_registry(&env), &caller, ROLE_MINTER);
        ledger::change(&env, soulbound_id, &from, &to);
        events::emit_changed(&env, soulbound_id, &from, &to);
    }

    // ── Ledger: queries ─────────────────────────────────────────────

    /// Panics with "invalid id" for unissued and revoked ids.
    pub fn owner_of(env: Env, soulbound_id: u64) -> Address {
        ledger::require_owner(&env, soulbound_id)
    }

    /// Panics with "not assigned" when `account` holds no active id.
    pub fn token_of(env: Env, account: Address) -> u64 {
        ledger::token_of(&env, &account).expect(errors::NOT_ASSIGNED)
    }

    pub fn is_revoked(env: Env, soulbound_id: u64) -> bool {
        ledger::is_revoked(&env, soulbound_id)
    }

    /// Every address that has held the id, in order of first holding.
    pub fn linked_accounts(env: Env, soulbound_id: u64) -> Vec<Address> {
        ledger::linked_accounts(&env, soulbound_id)
    }

    /// Address the id was most recently issued to; survives revocation.
    pub fn primary_account(env: Env, soulbound_id: u64) -> Option<Address> {
        ledger::primary_account(&env, soulbound_id)
    }

    /// Whether each id is currently active.
    pub fn exists(env: Env, soulbound_ids: Vec<u64>) -> Vec<bool> {
        let mut result = Vec::new(&env);
        for soulbound_id in soulbound_ids.iter() {
            result.push_back(ledger::active_owner(&env, soulbound_id).is_some());
        }
        result
    }

    pub fn balance_of(env: Env, account: Address) -> u32 {
        u32::from(ledger::token_of(&env, &account).is_some())
    }

    /// Number of active soulbounds.
    pub fn total_supply(env: Env) -> u64 {
        ledger::total_supply(&env)
    }

    // ── Attributes ──────────────────────────────────────────────────

    /// Register `attribute_id`, or set its validity when already registered.
    ///
    /// Only MANAGER may call. Emits `attr_reg` with `(is_new, valid)`.
    pub fn register_attribute(env: Env, caller: Address, attribute_id: u32, invalidate: bool) {
        require_role(&env, &storage::get_registry(&env), &caller, ROLE_MANAGER);
        let valid = !invalidate;
        let is_new = attributes::register(&env, attribute_id, valid);
        events::emit_attribute_registered(&env, attribute_id, is_new, valid);
    }

    pub fn is_attribute_valid(env: Env, attribute_id: u32) -> bool {
        attributes::is_valid(&env, attribute_id)
    }

    /// Every attribute id ever registered, valid or not.
    pub fn attributes(env: Env) -> Vec<u32> {
        attributes::registered(&env)
    }

    /// Attach a globally valid attribute to an active soulbound.
    pub fn add_attribute_to(env: Env, caller: Address, soulbound_id: u64, attribute_id: u32) {
        require_role(&env, &storage::get_registry(&env), &caller, ROLE_OPERATOR);
        ledger::require_owner(&env, soulbound_id);
        attributes::attach(&env, soulbound_id, attribute_id);
        events::emit_attribute_to(&env, soulbound_id, attribute_id);
    }

    /// Write a new score for an attached attribute, bumping its version.
    pub fn update_score(
        env: Env,
        caller: Address,
        soulbound_id: u64,
        attribute_id: u32,
        score: u128,
    ) {
        require_role(&env, &storage::get_registry(&env), &caller, ROLE_OPERATOR);
        ledger::require_owner(&env, soulbound_id);
        let answer = attributes::update(&env, soulbound_id, attribute_id, score);
        events::emit_update_rs(&env, soulbound_id, attribute_id, &answer);
    }

    /// `{score, version}` for an attached attribute; `{0, 0}` if never set.
    ///
    /// Panics with "attribute not added" for attributes not attached to the
    /// soulbound. Readable for revoked soulbounds.
    pub fn latest_answer(env: Env, soulbound_id: u64, attribute_id: u32) -> LatestAnswer {
        attributes::latest_answer(&env, soulbound_id, attribute_id)
    }

    pub fn attributes_of(env: Env, soulbound_id: u64) -> Vec<u32> {
        attributes::attributes_of(&env, soulbound_id)
    }

    pub fn has_attribute(env: Env, soulbound_id: u64, attribute_id: u32) -> bool {
        attributes::has(&env, soulbound_id, attribute_id)
    }
}
