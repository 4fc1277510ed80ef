#![cfg_attr(not(test), no_std)]
//! Shared building blocks for the soulbound contracts.
//!
//! * [`typed_data`] – domain-separated structured digests and signer recovery.
//! * [`replay_protection`] – per-caller nonce counters.
//! * [`payment`] – exact fee collection into the treasury.
//! * [`interfaces`] – clients for the role registry and the soulbound ledger.
//! * [`errors`] – panic messages shared across contracts.

pub mod errors;
pub mod interfaces;
pub mod payment;
pub mod replay_protection;
pub mod typed_data;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

#[cfg(test)]
mod payment_test;

pub use interfaces::{
    require_role, LatestAnswer, RoleRegistryClient, SoulboundClient, ROLE_ADMIN, ROLE_AUTHORIZER,
    ROLE_MANAGER, ROLE_MINTER, ROLE_OPERATOR,
};
