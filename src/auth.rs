// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Signature gating.
//!
//! Every mutating operation carries an [`Authorization`]. The signed bytes are a
//! domain-separated BLAKE3 digest of the operation arguments, one derivation
//! context per operation, so a signature for one operation can never be replayed
//! as another.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use serde::{Serialize, Deserialize};
use crate::error::{KernelError, Result};
use crate::types::field::Payload;
use crate::types::id::{Identity, Signature};

const ADD_USER_CONTEXT: &str = "spynet 2025-01 add-user";
const SEND_MESSAGE_CONTEXT: &str = "spynet 2025-01 send-message";
const SET_MESSAGE_COUNT_CONTEXT: &str = "spynet 2025-01 set-message-count";
const START_EPOCH_CONTEXT: &str = "spynet 2025-01 start-epoch";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub signer: Identity,
    pub signature: Signature,
}

impl Authorization {
    /// Signs `digest` with `key`.
    pub fn sign(key: &SigningKey, digest: &[u8; 32]) -> Self {
        Self {
            signer: Identity(key.verifying_key().to_bytes()),
            signature: Signature(key.sign(digest).to_bytes()),
        }
    }
}

/// The Ledger's identity/signature verification primitive.
pub trait SignatureVerifier {
    fn verify(&self, signer: &Identity, message: &[u8], signature: &Signature) -> bool;
}

/// Strict Ed25519 verification (rejects small-order keys and malleable signatures).
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, signer: &Identity, message: &[u8], signature: &Signature) -> bool {
        if signer.is_empty() {
            return false;
        }
        let key = match VerifyingKey::from_bytes(signer.as_bytes()) {
            Ok(key) => key,
            Err(_) => return false,
        };
        let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        key.verify_strict(message, &sig).is_ok()
    }
}

/// Checks that `auth` is a valid signature over `digest` by anyone.
pub fn require_signature<V: SignatureVerifier + ?Sized>(
    verifier: &V,
    auth: &Authorization,
    digest: &[u8; 32],
) -> Result<()> {
    if verifier.verify(&auth.signer, digest, &auth.signature) {
        Ok(())
    } else {
        Err(KernelError::Unauthorized)
    }
}

/// Checks that `auth` is a valid signature over `digest` by `expected`.
pub fn require_signer<V: SignatureVerifier + ?Sized>(
    verifier: &V,
    auth: &Authorization,
    expected: &Identity,
    digest: &[u8; 32],
) -> Result<()> {
    if auth.signer != *expected || expected.is_empty() {
        return Err(KernelError::Unauthorized);
    }
    require_signature(verifier, auth, digest)
}

pub fn add_user_digest(candidate: &Identity) -> [u8; 32] {
    blake3::derive_key(ADD_USER_CONTEXT, candidate.as_bytes())
}

pub fn send_message_digest(payload: &Payload) -> [u8; 32] {
    blake3::derive_key(SEND_MESSAGE_CONTEXT, payload.as_bytes())
}

/// Digest for a commit, bound to the attestation of the chain's tip step.
pub fn set_message_count_digest(tip_attestation: &[u8; 32]) -> [u8; 32] {
    blake3::derive_key(SET_MESSAGE_COUNT_CONTEXT, tip_attestation)
}

/// Digest for opening epoch `epoch`.
pub fn start_epoch_digest(epoch: u64) -> [u8; 32] {
    blake3::derive_key(START_EPOCH_CONTEXT, &epoch.to_le_bytes())
}
