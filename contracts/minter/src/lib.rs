//! # Soulbound Minter Gateway
//!
//! Issues, revokes and changes soulbounds on behalf of end users. Every
//! request carries a typed-data signature from an off-chain authorizer
//! holding `ROLE_AUTHORIZER`, bound to the caller's current nonce and an
//! expiry, and pays the fee configured with [`MinterContract::set_payment`].
//!
//! The gateway itself must hold `ROLE_MINTER` in the registry; the ledger
//! sees it as the caller of every mutation.
//!
//! ## Request flow
//!
//! 1. caller authorization
//! 2. expiry check
//! 3. digest over the request and the caller's current nonce
//! 4. signer recovery and authorizer check
//! 5. nonce increment
//! 6. fee collection
//! 7. ledger call
//!
//! A failure at any step rolls back the whole request, nonce included.

#![no_std]

use soroban_sdk::{
    contract, contractimpl, contracttype, crypto::Hash, symbol_short, Address, Bytes,
    BytesN, Env, Symbol,
};
use soulbound_common::{
    errors, payment, replay_protection, require_role, typed_data, SoulboundClient, ROLE_ADMIN,
    ROLE_MANAGER,
};


/// Domain name mixed into every minter signature.
pub const DOMAIN_NAME: &str = "SoulboundMinter";
pub const DOMAIN_VERSION: &str = "1";

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum DataKey {
    Registry,
    Ledger,
    NativeToken,
    Payment,
}

/// Fee charged per request. `token == None` charges the native asset.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PaymentConfig {
    pub token: Option<Address>,
    pub amount: i128,
}

const PAYMENT: Symbol = symbol_short!("payment");

fn read_address(env: &Env, key: &DataKey) -> Address {
    env.storage()
        .instance()
        .get(key)
        .expect(errors::NOT_INITIALIZED)
}

#[contract]
pub struct MinterContract;

#[contractimpl]
impl MinterContract {
    // ── Initialization ──────────────────────────────────────────────

    /// One-time initialization. `admin` must hold `ROLE_ADMIN` in
    /// `registry`. Fees start at zero in the native asset.
    pub fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        ledger: Address,
        native_token: Address,
    ) {
        if env.storage().instance().has(&DataKey::Registry) {
            panic!("{}", errors::ALREADY_INITIALIZED);
        }
        require_role(&env, &registry, &admin, ROLE_ADMIN);

        env.storage().instance().set(&DataKey::Registry, &registry);
        env.storage().instance().set(&DataKey::Ledger, &ledger);
        env.storage()
            .instance()
            .set(&DataKey::NativeToken, &native_token);
        env.storage()
            .instance()
            .set(&DataKey::Payment, &PaymentConfig::default());
    }

    // ── Payment configuration ───────────────────────────────────────

    /// Set the per-request fee. Only MANAGER may call.
    pub fn set_payment(env: Env, caller: Address, token: Option<Address>, amount: i128) {
        require_role(&env, &read_address(&env, &DataKey::Registry), &caller, ROLE_MANAGER);
        assert!(amount >= 0, "{}", errors::NEGATIVE_AMOUNT);

        let config = PaymentConfig { token, amount };
        env.storage().instance().set(&DataKey::Payment, &config);
        env.events()
            .publish((PAYMENT,), (config.token, config.amount));
    }

    pub fn payment(env: Env) -> PaymentConfig {
        env.storage()
            .instance()
            .get(&DataKey::Payment)
            .expect(errors::NOT_INITIALIZED)
    }

    // ── Gateway operations ──────────────────────────────────────────

    /// Issue `soulbound_id` to the caller.
    pub fn issue(
        env: Env,
        caller: Address,
        soulbound_id: u64,
        expiry: u64,
        value: i128,
        signature: Bytes,
    ) {
        Self::authorize_action(
            &env,
            typed_data::OP_ISSUE,
            &caller,
            soulbound_id,
            expiry,
            &signature,
        );
        Self::settle(&env, &caller, value);

        SoulboundClient::new(&env, &read_address(&env, &DataKey::Ledger)).issue(
            &env.current_contract_address(),
            &caller,
            &soulbound_id,
        );
    }

    /// Revoke `soulbound_id`.
    pub fn revoke(
        env: Env,
        caller: Address,
        soulbound_id: u64,
        expiry: u64,
        value: i128,
        signature: Bytes,
    ) {
        Self::authorize_action(
            &env,
            typed_data::OP_REVOKE,
            &caller,
            soulbound_id,
            expiry,
            &signature,
        );
        Self::settle(&env, &caller, value);

        SoulboundClient::new(&env, &read_address(&env, &DataKey::Ledger))
            .revoke(&env.current_contract_address(), &soulbound_id);
    }

    /// Move `soulbound_id` from `from` to `to`.
    #[allow(clippy::too_many_arguments)]
    pub fn change(
        env: Env,
        caller: Address,
        soulbound_id: u64,
        from: Address,
        to: Address,
        expiry: u64,
        value: i128,
        signature: Bytes,
    ) {
        caller.require_auth();
        typed_data::require_not_expired(&env, expiry);
        let digest = Self::change_digest(&env, &caller, soulbound_id, &from, &to, expiry);
        Self::admit(&env, &caller, &digest, &signature);
        Self::settle(&env, &caller, value);

        SoulboundClient::new(&env, &read_address(&env, &DataKey::Ledger)).change(
            &env.current_contract_address(),
            &soulbound_id,
            &from,
            &to,
        );
    }

    // ── Digests ─────────────────────────────────────────────────────

    pub fn domain_separator(env: Env) -> BytesN<32> {
        typed_data::domain_separator(&env, DOMAIN_NAME, DOMAIN_VERSION)
    }

    /// Digest an authorizer signs to let `caller` issue `soulbound_id`,
    /// computed with the caller's current nonce.
    pub fn hash_issue(env: Env, caller: Address, soulbound_id: u64, expiry: u64) -> BytesN<32> {
        Self::action_digest(&env, typed_data::OP_ISSUE, &caller, soulbound_id, expiry).into()
    }

    pub fn hash_revoke(env: Env, caller: Address, soulbound_id: u64, expiry: u64) -> BytesN<32> {
        Self::action_digest(&env, typed_data::OP_REVOKE, &caller, soulbound_id, expiry).into()
    }

    pub fn hash_change(
        env: Env,
        caller: Address,
        soulbound_id: u64,
        from: Address,
        to: Address,
        expiry: u64,
    ) -> BytesN<32> {
        Self::change_digest(&env, &caller, soulbound_id, &from, &to, expiry).into()
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn nonce(env: Env, account: Address) -> u64 {
        replay_protection::get_nonce(&env, &account)
    }

    pub fn registry(env: Env) -> Address {
        read_address(&env, &DataKey::Registry)
    }

    pub fn ledger(env: Env) -> Address {
        read_address(&env, &DataKey::Ledger)
    }

    pub fn native_token(env: Env) -> Address {
        read_address(&env, &DataKey::NativeToken)
    }
}

impl MinterContract {
    fn action_digest(
        env: &Env,
        opcode: u32,
        caller: &Address,
        soulbound_id: u64,
        expiry: u64,
    ) -> Hash<32> {
        let nonce = replay_protection::get_nonce(env, caller);
        let struct_hash = typed_data::action_hash(env, opcode, caller, soulbound_id, nonce, expiry);
        typed_data::typed_digest(env, &Self::domain_separator(env.clone()), &struct_hash)
    }

    fn change_digest(
        env: &Env,
        caller: &Address,
        soulbound_id: u64,
        from: &Address,
        to: &Address,
        expiry: u64,
    ) -> Hash<32> {
        let nonce = replay_protection::get_nonce(env, caller);
        let struct_hash =
            typed_data::change_hash(env, caller, soulbound_id, from, to, nonce, expiry);
        typed_data::typed_digest(env, &Self::domain_separator(env.clone()), &struct_hash)
    }

    /// Shared admission path for issue and revoke.
    fn authorize_action(
        env: &Env,
        opcode: u32,
        caller: &Address,
        soulbound_id: u64,
        expiry: u64,
        signature: &Bytes,
    ) {
        caller.require_auth();
        typed_data::require_not_expired(env, expiry);
        let digest = Self::action_digest(env, opcode, caller, soulbound_id, expiry);
        Self::admit(env, caller, &digest, signature);
    }

    /// Check the authorizer signature and consume the caller's nonce.
    fn admit(env: &Env, caller: &Address, digest: &Hash<32>, signature: &Bytes) {
        let registry = read_address(env, &DataKey::Registry);
        typed_data::require_authorizer(env, &registry, digest, signature);
        replay_protection::advance_nonce(env, caller);
    }

    fn settle(env: &Env, caller: &Address, value: i128) {
        let config = Self::payment(env.clone());
        payment::collect_fee(
            env,
            &read_address(env, &DataKey::Registry),
            &read_address(env, &DataKey::NativeToken),
            caller,
            &config.token,
            config.amount,
            value,
        );
    }
}
