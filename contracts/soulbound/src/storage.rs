//! Storage keys and record types for the soulbound contract.

use soroban_sdk::{contracttype, Address, Env};

use soulbound_common::errors;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Role registry consulted for every privileged call.
    Registry,
    Name,
    Symbol,
    /// Number of active soulbounds.
    Supply,
    /// `SoulboundRecord` per id.
    Soulbound(u64),
    /// Active id held by an address.
    TokenOf(Address),
    /// Every address that ever held an id, in order of first holding.
    Linked(u64),
    /// Address an id was most recently issued to.
    Primary(u64),
    /// Global validity flag per attribute id.
    AttributeValid(u32),
    /// Every attribute id ever registered, in registration order.
    AttributeList,
    /// Attribute ids attached to a soulbound, in order of attachment.
    SoulAttributes(u64),
    /// `LatestAnswer` per (soulbound, attribute).
    Answer(u64, u32),
}

/// Lifecycle record of an issued id.
///
/// An id without a record has never been issued. `owner` is `None` exactly
/// when `revoked` is set.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SoulboundRecord {
    pub owner: Option<Address>,
    pub revoked: bool,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Registry)
}

pub fn get_registry(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Registry)
        .expect(errors::NOT_INITIALIZED)
}
