//! # Soulbound Updater Gateway
//!
//! Lets the holder of a soulbound write its own attribute scores, provided
//! an authorizer signed the exact batch. The signed message covers the
//! target ledger, the soulbound id, both payload arrays, the fee and its
//! payment token, the caller's nonce and an expiry, so the authorizer prices
//! every update individually.
//!
//! The gateway must hold `ROLE_OPERATOR` in the registry of the target
//! ledger.

#![no_std]

use soroban_sdk::{
    contract, contractimpl, contracttype, crypto::Hash, symbol_short, Address, Bytes, BytesN,
    Env, Symbol, Vec,
};
use soulbound_common::{
    errors, payment, replay_protection, require_role, typed_data, SoulboundClient, ROLE_ADMIN,
};


pub const DOMAIN_NAME: &str = "SoulboundUpdater";
pub const DOMAIN_VERSION: &str = "1";

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum DataKey {
    Registry,
    NativeToken,
}

/// A signed batch of score writes for one soulbound.
///
/// `attribute_ids[i]` receives `scores[i]`. `payment_token == None` charges
/// the native asset. `signature` is excluded from the digest.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateRequest {
    pub target: Address,
    pub soulbound_id: u64,
    pub payment_token: Option<Address>,
    pub fee: i128,
    pub expiry: u64,
    pub attribute_ids: Vec<u32>,
    pub scores: Vec<u128>,
    pub signature: Bytes,
}

const UPDATED: Symbol = symbol_short!("updated");

fn read_address(env: &Env, key: &DataKey) -> Address {
    env.storage()
        .instance()
        .get(key)
        .expect(errors::NOT_INITIALIZED)
}

#[contract]
pub struct UpdaterContract;

#[contractimpl]
impl UpdaterContract {
    /// One-time initialization. `admin` must hold `ROLE_ADMIN` in `registry`.
    pub fn initialize(env: Env, admin: Address, registry: Address, native_token: Address) {
        if env.storage().instance().has(&DataKey::Registry) {
            panic!("{}", errors::ALREADY_INITIALIZED);
        }
        require_role(&env, &registry, &admin, ROLE_ADMIN);

        env.storage().instance().set(&DataKey::Registry, &registry);
        env.storage()
            .instance()
            .set(&DataKey::NativeToken, &native_token);
    }

    /// Apply a signed score batch to the caller's soulbound.
    ///
    /// Unattached attributes are attached first, which requires them to be
    /// globally valid. Any failing entry aborts the whole batch.
    pub fn update(env: Env, caller: Address, request: UpdateRequest, value: i128) {
        caller.require_auth();
        assert!(
            request.attribute_ids.len() == request.scores.len(),
            "{}",
            errors::LENGTH_MISMATCH
        );
        typed_data::require_not_expired(&env, request.expiry);

        let ledger = SoulboundClient::new(&env, &request.target);
        assert!(
            ledger.owner_of(&request.soulbound_id) == caller,
            "{}",
            errors::NOT_OWNED
        );

        let registry = read_address(&env, &DataKey::Registry);
        let digest = Self::digest(&env, &caller, &request);
        typed_data::require_authorizer(&env, &registry, &digest, &request.signature);
        replay_protection::advance_nonce(&env, &caller);

        payment::collect_fee(
            &env,
            &registry,
            &read_address(&env, &DataKey::NativeToken),
            &caller,
            &request.payment_token,
            request.fee,
            value,
        );

        let gateway = env.current_contract_address();
        for (attribute_id, score) in request.attribute_ids.iter().zip(request.scores.iter()) {
            if !ledger.has_attribute(&request.soulbound_id, &attribute_id) {
                ledger.add_attribute_to(&gateway, &request.soulbound_id, &attribute_id);
            }
            ledger.update_score(&gateway, &request.soulbound_id, &attribute_id, &score);
        }

        env.events().publish(
            (UPDATED, caller),
            (
                request.soulbound_id,
                request.attribute_ids.len(),
                request.fee,
            ),
        );
    }

    /// Digest an authorizer signs for `request`, computed with the caller's
    /// current nonce. The request's `signature` field is ignored.
    pub fn hash_update(env: Env, caller: Address, request: UpdateRequest) -> BytesN<32> {
        Self::digest(&env, &caller, &request).into()
    }

    pub fn domain_separator(env: Env) -> BytesN<32> {
        typed_data::domain_separator(&env, DOMAIN_NAME, DOMAIN_VERSION)
    }

    pub fn nonce(env: Env, account: Address) -> u64 {
        replay_protection::get_nonce(&env, &account)
    }

    pub fn registry(env: Env) -> Address {
        read_address(&env, &DataKey::Registry)
    }

    pub fn native_token(env: Env) -> Address {
        read_address(&env, &DataKey::NativeToken)
    }
}

impl UpdaterContract {
    fn digest(env: &Env, caller: &Address, request: &UpdateRequest) -> Hash<32> {
        let nonce = replay_protection::get_nonce(env, caller);
        let payload = typed_data::payload_hash(env, &request.attribute_ids, &request.scores);
        let struct_hash = typed_data::update_score_hash(
            env,
            caller,
            &request.target,
            request.soulbound_id,
            &request.payment_token,
            request.fee,
            &payload,
            nonce,
            request.expiry,
        );
        typed_data::typed_digest(env, &Self::domain_separator(env.clone()), &struct_hash)
    }
}
