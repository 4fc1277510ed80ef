//! Role Registry Contract
//!
//! Holds the role bitmaps consulted by the soulbound ledger and its gateways,
//! plus the treasury address that receives every protocol fee.
//!
//! Principals (`Address`) and signer keys (20-byte addresses recovered from
//! secp256k1 signatures) are tracked separately: a principal role gates who
//! may call a function, a signer role gates whose signature authorizes a
//! request.

#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, Vec};
use soulbound_common::errors;

pub use soulbound_common::{ROLE_ADMIN, ROLE_AUTHORIZER, ROLE_MANAGER, ROLE_MINTER, ROLE_OPERATOR};


/// Data keys for contract storage
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum DataKey {
    Treasury,
    Role(Address),
    RoleHolders,
    SignerRole(BytesN<20>),
}

/// Events
mod events {
    use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

    pub fn emit_role_granted(env: &Env, account: &Address, role: u32, granter: &Address) {
        const ROLE_GRANTED: Symbol = symbol_short!("role_g");
        env.events().publish((ROLE_GRANTED, account.clone()), (role, granter.clone()));
    }

    pub fn emit_role_revoked(env: &Env, account: &Address, role: u32, revoker: &Address) {
        const ROLE_REVOKED: Symbol = symbol_short!("role_r");
        env.events().publish((ROLE_REVOKED, account.clone()), (role, revoker.clone()));
    }

    pub fn emit_signer_granted(env: &Env, signer: &BytesN<20>, role: u32, granter: &Address) {
        const SIGNER_GRANTED: Symbol = symbol_short!("sig_g");
        env.events().publish((SIGNER_GRANTED, signer.clone()), (role, granter.clone()));
    }

    pub fn emit_signer_revoked(env: &Env, signer: &BytesN<20>, role: u32, revoker: &Address) {
        const SIGNER_REVOKED: Symbol = symbol_short!("sig_r");
        env.events().publish((SIGNER_REVOKED, signer.clone()), (role, revoker.clone()));
    }

    pub fn emit_treasury(env: &Env, treasury: &Address) {
        const TREASURY: Symbol = symbol_short!("treasury");
        env.events().publish((TREASURY,), treasury.clone());
    }
}

/// Access control
mod access_control {
    use super::*;

    pub fn has_role(env: &Env, account: &Address, role: u32) -> bool {
        (get_roles(env, account) & role) != 0
    }

    pub fn get_roles(env: &Env, account: &Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::Role(account.clone()))
            .unwrap_or(0)
    }

    pub fn grant_role(env: &Env, account: &Address, role: u32) {
        let key = DataKey::Role(account.clone());
        let before = get_roles(env, account);
        let roles = before | role;
        env.storage().persistent().set(&key, &roles);

        if before == 0 && roles != 0 {
            let mut holders = get_role_holders(env);
            holders.push_back(account.clone());
            env.storage().instance().set(&DataKey::RoleHolders, &holders);
        }
    }

    pub fn revoke_role(env: &Env, account: &Address, role: u32) {
        let key = DataKey::Role(account.clone());
        let roles = get_roles(env, account) & !role;
        env.storage().persistent().set(&key, &roles);

        if roles == 0 {
            let mut holders = get_role_holders(env);
            if let Some(pos) = holders.iter().position(|a| a == *account) {
                holders.remove(pos as u32);
                env.storage().instance().set(&DataKey::RoleHolders, &holders);
            }
        }
    }

    pub fn get_role_holders(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::RoleHolders)
            .unwrap_or(Vec::new(env))
    }

    pub fn get_signer_roles(env: &Env, signer: &BytesN<20>) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::SignerRole(signer.clone()))
            .unwrap_or(0)
    }

    pub fn set_signer_roles(env: &Env, signer: &BytesN<20>, roles: u32) {
        env.storage()
            .persistent()
            .set(&DataKey::SignerRole(signer.clone()), &roles);
    }

    pub fn require_admin(env: &Env, account: &Address) {
        assert!(has_role(env, account, ROLE_ADMIN), "{}", errors::MISSING_ROLE);
        account.require_auth();
    }
}

#[contract]
pub struct RoleRegistryContract;

#[contractimpl]
impl RoleRegistryContract {
    /// One-time initialization. Grants `ROLE_ADMIN` to `admin` and sets the
    /// fee treasury.
    pub fn initialize(env: Env, admin: Address, treasury: Address) {
        if env.storage().instance().has(&DataKey::Treasury) {
            panic!("{}", errors::ALREADY_INITIALIZED);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Treasury, &treasury);
        access_control::grant_role(&env, &admin, ROLE_ADMIN);

        events::emit_role_granted(&env, &admin, ROLE_ADMIN, &admin);
        events::emit_treasury(&env, &treasury);
    }

    // ── Principal roles ─────────────────────────────────────────────

    /// Grant `role` bits to `account`. Only ADMIN may call.
    pub fn grant_role(env: Env, caller: Address, account: Address, role: u32) {
        access_control::require_admin(&env, &caller);
        access_control::grant_role(&env, &account, role);
        events::emit_role_granted(&env, &account, role, &caller);
    }

    /// Revoke `role` bits from `account`. Only ADMIN may call.
    ///
    /// An admin cannot strip its own ADMIN bit while it is the only admin.
    pub fn revoke_role(env: Env, caller: Address, account: Address, role: u32) {
        access_control::require_admin(&env, &caller);

        if account == caller && (role & ROLE_ADMIN) != 0 {
            let admin_count = access_control::get_role_holders(&env)
                .iter()
                .filter(|h| access_control::has_role(&env, h, ROLE_ADMIN))
                .count();
            assert!(admin_count > 1, "cannot revoke last admin role");
        }

        access_control::revoke_role(&env, &account, role);
        events::emit_role_revoked(&env, &account, role, &caller);
    }

    pub fn has_role(env: Env, account: Address, role: u32) -> bool {
        access_control::has_role(&env, &account, role)
    }

    pub fn get_roles(env: Env, account: Address) -> u32 {
        access_control::get_roles(&env, &account)
    }

    pub fn get_role_holders(env: Env) -> Vec<Address> {
        access_control::get_role_holders(&env)
    }

    // ── Signer roles ────────────────────────────────────────────────

    /// Grant `role` bits to a signer key. Only ADMIN may call.
    pub fn grant_signer_role(env: Env, caller: Address, signer: BytesN<20>, role: u32) {
        access_control::require_admin(&env, &caller);
        let roles = access_control::get_signer_roles(&env, &signer) | role;
        access_control::set_signer_roles(&env, &signer, roles);
        events::emit_signer_granted(&env, &signer, role, &caller);
    }

    /// Revoke `role` bits from a signer key. Only ADMIN may call.
    pub fn revoke_signer_role(env: Env, caller: Address, signer: BytesN<20>, role: u32) {
        access_control::require_admin(&env, &caller);
        let roles = access_control::get_signer_roles(&env, &signer) & !role;
        access_control::set_signer_roles(&env, &signer, roles);
        events::emit_signer_revoked(&env, &signer, role, &caller);
    }

    pub fn has_signer_role(env: Env, signer: BytesN<20>, role: u32) -> bool {
        (access_control::get_signer_roles(&env, &signer) & role) != 0
    }

    // ── Treasury ────────────────────────────────────────────────────

    /// Replace the fee treasury. Only ADMIN may call.
    pub fn set_treasury(env: Env, caller: Address, treasury: Address) {
        access_control::require_admin(&env, &caller);
        env.storage().instance().set(&DataKey::Treasury, &treasury);
        events::emit_treasury(&env, &treasury);
    }

    pub fn treasury(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Treasury)
            .expect(errors::NOT_INITIALIZED)
    }
}
