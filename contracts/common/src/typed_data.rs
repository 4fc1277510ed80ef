//! # Typed-Data Signatures
//!
//! Structured, domain-separated messages in the style of EIP-712, adapted to
//! Soroban types.
//!
//! ## Encoding
//!
//! Every field occupies exactly one 32-byte word:
//!
//! | Field type        | Word                                           |
//! |-------------------|------------------------------------------------|
//! | unsigned integer  | big-endian, left-padded with zeros             |
//! | `i128`            | big-endian two's complement, sign-extended     |
//! | `Address`         | `keccak256(xdr(address))`                      |
//! | `Option<Address>` | address word, or all zeros for `None`          |
//! | string            | `keccak256(utf8 bytes)`                        |
//!
//! A struct hash is `keccak256(typeHash ‖ field words…)` and the digest an
//! authorizer signs is `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)`.
//! The domain separator binds the gateway name and version, the network id
//! and the gateway's own contract address, so a signature for one deployment
//! cannot be replayed against another.
//!
//! ## Recovery
//!
//! Signatures are 65 bytes `r ‖ s ‖ v` with `v` in `{0, 1, 27, 28}`. The
//! signer is identified by the Ethereum-style 20-byte address of the recovered
//! public key. A well-formed signature over a different digest recovers a
//! different signer; it is the role check that rejects it.

use soroban_sdk::{crypto::Hash, xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::errors;
use crate::interfaces::{RoleRegistryClient, ROLE_AUTHORIZER};

pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,bytes32 chainId,address verifyingContract)";
pub const ACTION_TYPE: &str =
    "Action(uint8 opcode,address caller,uint256 soulboundId,uint256 nonce,uint256 expiry)";
pub const CHANGE_TYPE: &str = concat!(
    "Change(address caller,uint256 soulboundId,address from,address to,",
    "uint256 nonce,uint256 expiry)"
);
pub const UPDATE_SCORE_TYPE: &str = concat!(
    "UpdateScore(address caller,address target,uint256 soulboundId,",
    "address paymentToken,int128 fee,bytes32 payloadHash,uint256 nonce,uint256 expiry)"
);

/// Opcode carried by `Action` messages authorizing an issue.
pub const OP_ISSUE: u32 = 1;
/// Opcode carried by `Action` messages authorizing a revoke.
pub const OP_REVOKE: u32 = 2;

pub const SIGNATURE_LEN: u32 = 65;

/// Order `n` of the secp256k1 group, big-endian.
pub const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// `n / 2`, the largest `s` accepted in low-S form.
pub const HALF_CURVE_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Encode an unsigned integer as a 32-byte big-endian word.
pub fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encode a signed integer as a sign-extended 32-byte word.
pub fn int_word(value: i128) -> [u8; 32] {
    let fill = if value < 0 { 0xff } else { 0x00 };
    let mut word = [fill; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Append-only builder for fixed-width messages.
pub struct Words {
    env: Env,
    buf: Bytes,
}

impl Words {
    pub fn new(env: &Env) -> Self {
        Self {
            env: env.clone(),
            buf: Bytes::new(env),
        }
    }

    pub fn word(mut self, word: &BytesN<32>) -> Self {
        self.buf.extend_from_array(&word.to_array());
        self
    }

    pub fn uint(mut self, value: u128) -> Self {
        self.buf.extend_from_array(&uint_word(value));
        self
    }

    pub fn int(mut self, value: i128) -> Self {
        self.buf.extend_from_array(&int_word(value));
        self
    }

    pub fn address(self, address: &Address) -> Self {
        let word = address_word(&self.env, address);
        self.word(&word)
    }

    pub fn optional_address(self, address: &Option<Address>) -> Self {
        match address {
            Some(address) => self.address(address),
            None => self.uint(0),
        }
    }

    pub fn hash(self) -> Hash<32> {
        self.env.crypto().keccak256(&self.buf)
    }
}

pub fn address_word(env: &Env, address: &Address) -> BytesN<32> {
    env.crypto()
        .keccak256(&address.clone().to_xdr(env))
        .to_bytes()
}

pub fn string_hash(env: &Env, value: &str) -> BytesN<32> {
    env.crypto()
        .keccak256(&Bytes::from_slice(env, value.as_bytes()))
        .to_bytes()
}

/// Domain separator for the currently executing contract.
pub fn domain_separator(env: &Env, name: &str, version: &str) -> BytesN<32> {
    Words::new(env)
        .word(&string_hash(env, DOMAIN_TYPE))
        .word(&string_hash(env, name))
        .word(&string_hash(env, version))
        .word(&env.ledger().network_id())
        .address(&env.current_contract_address())
        .hash()
        .to_bytes()
}

/// Final digest an authorizer signs.
pub fn typed_digest(
    env: &Env,
    domain_separator: &BytesN<32>,
    struct_hash: &BytesN<32>,
) -> Hash<32> {
    let mut message = Bytes::from_array(env, &[0x19, 0x01]);
    message.extend_from_array(&domain_separator.to_array());
    message.extend_from_array(&struct_hash.to_array());
    env.crypto().keccak256(&message)
}

/// Struct hash for an issue or revoke authorization.
pub fn action_hash(
    env: &Env,
    opcode: u32,
    caller: &Address,
    soulbound_id: u64,
    nonce: u64,
    expiry: u64,
) -> BytesN<32> {
    Words::new(env)
        .word(&string_hash(env, ACTION_TYPE))
        .uint(opcode.into())
        .address(caller)
        .uint(soulbound_id.into())
        .uint(nonce.into())
        .uint(expiry.into())
        .hash()
        .to_bytes()
}

/// Struct hash for an owner change authorization.
pub fn change_hash(
    env: &Env,
    caller: &Address,
    soulbound_id: u64,
    from: &Address,
    to: &Address,
    nonce: u64,
    expiry: u64,
) -> BytesN<32> {
    Words::new(env)
        .word(&string_hash(env, CHANGE_TYPE))
        .address(caller)
        .uint(soulbound_id.into())
        .address(from)
        .address(to)
        .uint(nonce.into())
        .uint(expiry.into())
        .hash()
        .to_bytes()
}

/// Hash binding the attribute ids and scores of an update together.
///
/// The entry count leads so that moving a value between the two arrays
/// always changes the hash.
pub fn payload_hash(env: &Env, attribute_ids: &Vec<u32>, scores: &Vec<u128>) -> BytesN<32> {
    let mut words = Words::new(env).uint(attribute_ids.len().into());
    for attribute_id in attribute_ids.iter() {
        words = words.uint(attribute_id.into());
    }
    for score in scores.iter() {
        words = words.uint(score);
    }
    words.hash().to_bytes()
}

/// Struct hash for a self-serve score update.
#[allow(clippy::too_many_arguments)]
pub fn update_score_hash(
    env: &Env,
    caller: &Address,
    target: &Address,
    soulbound_id: u64,
    payment_token: &Option<Address>,
    fee: i128,
    payload_hash: &BytesN<32>,
    nonce: u64,
    expiry: u64,
) -> BytesN<32> {
    Words::new(env)
        .word(&string_hash(env, UPDATE_SCORE_TYPE))
        .address(caller)
        .address(target)
        .uint(soulbound_id.into())
        .optional_address(payment_token)
        .int(fee)
        .word(payload_hash)
        .uint(nonce.into())
        .uint(expiry.into())
        .hash()
        .to_bytes()
}

/// 20-byte signer address of an uncompressed secp256k1 public key.
pub fn signer_address(env: &Env, public_key: &BytesN<65>) -> BytesN<20> {
    let key = public_key.to_array();
    let hash = env
        .crypto()
        .keccak256(&Bytes::from_slice(env, &key[1..]))
        .to_array();
    let mut signer = [0u8; 20];
    signer.copy_from_slice(&hash[12..]);
    BytesN::from_array(env, &signer)
}

/// Whether `r` and `s` are usable scalars: `1 <= r < n` and `1 <= s <= n/2`.
///
/// Big-endian byte arrays of equal length compare like the integers they
/// encode.
pub fn is_canonical(rs: &[u8; 64]) -> bool {
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&rs[..32]);
    s.copy_from_slice(&rs[32..]);
    let zero = [0u8; 32];

    r != zero && r < CURVE_ORDER && s != zero && s <= HALF_CURVE_ORDER
}

/// Recover the signer of `digest`.
///
/// Panics with "invalid signature" when the signature is empty, has the wrong
/// length, carries an unknown recovery byte, or has an out-of-range or
/// high-S scalar.
pub fn recover(env: &Env, digest: &Hash<32>, signature: &Bytes) -> BytesN<20> {
    assert!(
        signature.len() == SIGNATURE_LEN,
        "{}",
        errors::INVALID_SIGNATURE
    );
    let recovery_id = match signature.get(SIGNATURE_LEN - 1) {
        Some(v @ 0..=1) => u32::from(v),
        Some(v @ 27..=28) => u32::from(v - 27),
        _ => panic!("{}", errors::INVALID_SIGNATURE),
    };
    let mut rs = [0u8; 64];
    signature.slice(0..64).copy_into_slice(&mut rs);
    assert!(is_canonical(&rs), "{}", errors::INVALID_SIGNATURE);
    let public_key =
        env.crypto()
            .secp256k1_recover(digest, &BytesN::from_array(env, &rs), recovery_id);
    signer_address(env, &public_key)
}

/// Recover the signer of `digest` and require it to hold the authorizer role.
pub fn require_authorizer(
    env: &Env,
    registry: &Address,
    digest: &Hash<32>,
    signature: &Bytes,
) -> BytesN<20> {
    let signer = recover(env, digest, signature);
    assert!(
        RoleRegistryClient::new(env, registry).has_signer_role(&signer, &ROLE_AUTHORIZER),
        "{}",
        errors::UNAUTHORIZED
    );
    signer
}

/// Panics unless `expiry` lies strictly in the future.
pub fn require_not_expired(env: &Env, expiry: u64) {
    assert!(
        expiry > env.ledger().timestamp(),
        "{}",
        errors::SIGNATURE_EXPIRED
    );
}
