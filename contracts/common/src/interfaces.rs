//! Cross-contract interfaces.
//!
//! The soulbound contracts never read roles or ledger state directly; they go
//! through these clients so any contract exposing the same functions (a
//! production registry, a test double) can be plugged in at initialization.

use soroban_sdk::{contractclient, contracttype, Address, BytesN, Env};

use crate::errors;

/// Role bits. An account's roles are stored as a bitmap.
pub const ROLE_ADMIN: u32 = 1;
/// May change gateway and attribute configuration.
pub const ROLE_MANAGER: u32 = 2;
/// May issue, revoke and change soulbounds on the ledger.
pub const ROLE_MINTER: u32 = 4;
/// May add attributes to soulbounds and write scores.
pub const ROLE_OPERATOR: u32 = 8;
/// Held by signer keys whose signatures authorize gateway requests.
pub const ROLE_AUTHORIZER: u32 = 16;

/// Current `{score, version}` pair for one (soulbound, attribute).
///
/// `version == 0` means the attribute is attached but was never scored.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LatestAnswer {
    pub score: u128,
    pub version: u64,
}

#[contractclient(name = "RoleRegistryClient")]
pub trait RoleRegistryInterface {
    fn has_role(env: Env, account: Address, role: u32) -> bool;
    fn has_signer_role(env: Env, signer: BytesN<20>, role: u32) -> bool;
    fn treasury(env: Env) -> Address;
}

#[contractclient(name = "SoulboundClient")]
pub trait SoulboundInterface {
    fn issue(env: Env, caller: Address, to: Address, soulbound_id: u64);
    fn revoke(env: Env, caller: Address, soulbound_id: u64);
    fn change(env: Env, caller: Address, soulbound_id: u64, from: Address, to: Address);
    fn owner_of(env: Env, soulbound_id: u64) -> Address;
    fn has_attribute(env: Env, soulbound_id: u64, attribute_id: u32) -> bool;
    fn add_attribute_to(env: Env, caller: Address, soulbound_id: u64, attribute_id: u32);
    fn update_score(env: Env, caller: Address, soulbound_id: u64, attribute_id: u32, score: u128);
    fn latest_answer(env: Env, soulbound_id: u64, attribute_id: u32) -> LatestAnswer;
}

/// Panics unless `caller` holds `role` in `registry`, then requires the
/// caller's authorization.
pub fn require_role(env: &Env, registry: &Address, caller: &Address, role: u32) {
    assert!(
        RoleRegistryClient::new(env, registry).has_role(caller, &role),
        "{}",
        errors::MISSING_ROLE
    );
    caller.require_auth();
}
