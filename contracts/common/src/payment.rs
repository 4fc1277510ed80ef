//! # Fee Collection
//!
//! Gateways charge the caller a fee per authorized request and route it to
//! the treasury published by the role registry.
//!
//! Two routes exist:
//!
//! * **Native** (`payment_token == None`): the caller declares the attached `value`,
//!   which must equal the fee exactly. The amount moves with a plain
//!   `transfer` on the native asset contract, authorized by the caller.
//! * **Token** (`payment_token == Some(addr)`): nothing may be attached (`value == 0`).
//!   The gateway pulls the fee with `transfer_from`, spending an allowance
//!   the caller granted beforehand. Allowance and balance failures come from
//!   the token contract unchanged.

use soroban_sdk::{log, symbol_short, token, Address, Env, Symbol};

use crate::errors;
use crate::interfaces::RoleRegistryClient;

const FEE_PAID: Symbol = symbol_short!("fee_paid");

/// Value a caller must attach for `fee` on the given route.
pub fn required_value(native: bool, fee: i128) -> i128 {
    if native {
        fee
    } else {
        0
    }
}

/// Collect `fee` from `payer` into the treasury.
///
/// Panics with "invalid payment" when `value` does not match the route, and
/// with "amount must be non-negative" for a negative fee.
pub fn collect_fee(
    env: &Env,
    registry: &Address,
    native_token: &Address,
    payer: &Address,
    payment_token: &Option<Address>,
    fee: i128,
    value: i128,
) {
    assert!(fee >= 0, "{}", errors::NEGATIVE_AMOUNT);
    assert!(
        value == required_value(payment_token.is_none(), fee),
        "{}",
        errors::INVALID_PAYMENT
    );
    if fee == 0 {
        return;
    }

    let treasury = RoleRegistryClient::new(env, registry).treasury();
    match payment_token {
        None => {
            token::Client::new(env, native_token).transfer(payer, &treasury, &fee);
        }
        Some(token) => {
            token::Client::new(env, token).transfer_from(
                &env.current_contract_address(),
                payer,
                &treasury,
                &fee,
            );
        }
    }

    log!(env, "fee collected", payer.clone(), fee);
    env.events()
        .publish((FEE_PAID, payer.clone()), (payment_token.clone(), fee, treasury));
}
