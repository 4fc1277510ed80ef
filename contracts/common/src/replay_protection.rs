//! # Replay Protection
//!
//! Every signed gateway request embeds the caller's current nonce. The
//! gateway reads the nonce, rebuilds the digest with it, and advances the
//! counter once the signature checks out, so a signature is only ever valid
//! for a single request.
//!
//! Counters live in the storage of whichever contract calls these helpers,
//! which keeps the minter and updater sequences independent.

use soroban_sdk::{contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
enum ReplayKey {
    Nonce(Address),
}

/// Nonce the next request from `account` must be signed with.
pub fn get_nonce(env: &Env, account: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&ReplayKey::Nonce(account.clone()))
        .unwrap_or(0)
}

/// Advance `account`'s counter by one and return the new value.
pub fn advance_nonce(env: &Env, account: &Address) -> u64 {
    let next = get_nonce(env, account)
        .checked_add(1)
        .expect("nonce overflow");
    env.storage()
        .persistent()
        .set(&ReplayKey::Nonce(account.clone()), &next);
    next
}
