//! Test helpers: an in-process authorizer that signs gateway digests.

use k256::ecdsa::SigningKey;
use soroban_sdk::{Bytes, BytesN, Env};

use crate::typed_data;

/// A secp256k1 key standing in for an off-chain authorizer.
pub struct TestAuthorizer {
    key: SigningKey,
}

impl TestAuthorizer {
    /// Deterministic key derived from `seed`; distinct seeds give distinct
    /// signers.
    pub fn from_seed(seed: u8) -> Self {
        let mut secret = [0x42u8; 32];
        secret[31] = seed;
        Self {
            key: SigningKey::from_slice(&secret).expect("valid secp256k1 scalar"),
        }
    }

    /// Signer address the gateways will recover for this key.
    pub fn signer(&self, env: &Env) -> BytesN<20> {
        let point = self.key.verifying_key().to_encoded_point(false);
        let mut public_key = [0u8; 65];
        public_key.copy_from_slice(point.as_bytes());
        typed_data::signer_address(env, &BytesN::from_array(env, &public_key))
    }

    /// 65-byte `r ‖ s ‖ v` signature over a prehashed digest.
    pub fn sign(&self, env: &Env, digest: &BytesN<32>) -> Bytes {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest.to_array())
            .expect("signing a 32-byte digest");
        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = 27 + recovery_id.to_byte();
        Bytes::from_array(env, &out)
    }
}
