// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Step attestation.
//!
//! # Hash Input Structure
//! ```text
//! STEP_TAG
//! kind (u8)
//! public_input: offset, current, prev (u64 LE each)
//! public_output: flag bits (u8)
//! predecessor attestation (32 bytes)
//! witness commitment (32 bytes)
//! ```
//! keyed with the program key. Genesis is the keyed hash of `GENESIS_TAG`.

use core::fmt;
use crate::proof::state::{ValidationOutcome, ValidationState};
use crate::proof::step::{Attestation, StepKind};
use crate::types::message::Message;

const PROGRAM_KEY_CONTEXT: &str = "spynet 2025-01 proof-chain program key";
const GENESIS_TAG: &[u8] = b"spynet/genesis/v1";
const STEP_TAG: &[u8] = b"spynet/step/v1";
const WITNESS_TAG: &[u8] = b"spynet/witness/v1";

/// Secret shared by the prover and the ledger's verifier.
#[derive(Clone, PartialEq, Eq)]
pub struct ProgramKey([u8; 32]);

impl ProgramKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        ProgramKey(bytes)
    }

    /// Derives a key from seed material.
    pub fn derive(seed: &[u8]) -> Self {
        ProgramKey(blake3::derive_key(PROGRAM_KEY_CONTEXT, seed))
    }

    pub fn genesis(&self) -> Attestation {
        Attestation(*blake3::keyed_hash(&self.0, GENESIS_TAG).as_bytes())
    }

    pub fn commit_witness(&self, message: &Message) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new_keyed(&self.0);
        hasher.update(WITNESS_TAG);
        hasher.update(&message.to_le_bytes());
        *hasher.finalize().as_bytes()
    }

    pub fn attest(
        &self,
        kind: StepKind,
        input: &ValidationState,
        output: &ValidationOutcome,
        predecessor: &Attestation,
        witness_commitment: &[u8; 32],
    ) -> Attestation {
        let mut hasher = blake3::Hasher::new_keyed(&self.0);
        hasher.update(STEP_TAG);
        hasher.update(&[kind as u8]);
        hasher.update(&input.to_le_bytes());
        hasher.update(&[output.to_bits()]);
        hasher.update(predecessor.as_bytes());
        hasher.update(witness_commitment);
        Attestation(*hasher.finalize().as_bytes())
    }
}

impl fmt::Debug for ProgramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProgramKey(..)")
    }
}
