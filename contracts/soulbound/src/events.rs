//! Contract events, one helper per topic.

use soroban_sdk::{symbol_short, Address, Env, Symbol};
use soulbound_common::LatestAnswer;

const ISSUED: Symbol = symbol_short!("issued");
const REVOKED: Symbol = symbol_short!("revoked");
const CHANGED: Symbol = symbol_short!("changed");
const ATTRIBUTE_REGISTERED: Symbol = symbol_short!("attr_reg");
const ATTRIBUTE_TO: Symbol = symbol_short!("attr_to");
const UPDATE_RS: Symbol = symbol_short!("update_rs");

pub fn emit_issued(env: &Env, soulbound_id: u64, owner: &Address) {
    env.events().publish((ISSUED, soulbound_id), owner.clone());
}

pub fn emit_revoked(env: &Env, soulbound_id: u64, former_owner: &Address) {
    env.events().publish((REVOKED, soulbound_id), former_owner.clone());
}

pub fn emit_changed(env: &Env, soulbound_id: u64, from: &Address, to: &Address) {
    env.events()
        .publish((CHANGED, soulbound_id), (from.clone(), to.clone()));
}

/// `is_new` separates first registrations from validity toggles.
pub fn emit_attribute_registered(env: &Env, attribute_id: u32, is_new: bool, valid: bool) {
    env.events()
        .publish((ATTRIBUTE_REGISTERED, attribute_id), (is_new, valid));
}

pub fn emit_attribute_to(env: &Env, soulbound_id: u64, attribute_id: u32) {
    env.events()
        .publish((ATTRIBUTE_TO, soulbound_id), attribute_id);
}

pub fn emit_update_rs(env: &Env, soulbound_id: u64, attribute_id: u32, answer: &LatestAnswer) {
    env.events().publish(
        (UPDATE_RS, soulbound_id, attribute_id),
        (answer.score, answer.version),
    );
}
