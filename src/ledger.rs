// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger counters and the message-count commit protocol.

use serde::{Serialize, Deserialize};
use crate::auth::{require_signer, set_message_count_digest, Authorization, SignatureVerifier};
use crate::error::{KernelError, Result};
use crate::proof::attest::ProgramKey;
use crate::proof::verify::ChainProof;
use crate::types::id::Identity;

/// Public counters stored by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerState {
    total_users: u64,
    total_messages: u64,
    message_count: u64,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_users(&self) -> u64 {
        self.total_users
    }

    pub fn total_messages(&self) -> u64 {
        self.total_messages
    }

    /// Committed count of fully validated messages.
    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    pub(crate) fn set_total_users(&mut self, value: u64) {
        self.total_users = value;
    }

    pub(crate) fn set_total_messages(&mut self, value: u64) {
        self.total_messages = value;
    }
}

/// Verifies a chain proof and advances `message_count` to its tip.
///
/// Checks run in a fixed order: admin signature, stale offset, progress,
/// then the proof itself.
pub struct LedgerCommitProtocol<'a, V: ?Sized> {
    verifier: &'a V,
    admin: &'a Identity,
    key: &'a ProgramKey,
}

impl<'a, V: SignatureVerifier + ?Sized> LedgerCommitProtocol<'a, V> {
    pub fn new(verifier: &'a V, admin: &'a Identity, key: &'a ProgramKey) -> Self {
        Self { verifier, admin, key }
    }

    /// Returns the new message count without touching `ledger`.
    pub fn check(&self, ledger: &LedgerState, proof: &ChainProof, auth: &Authorization) -> Result<u64> {
        let tip = proof.tip().ok_or(KernelError::InvalidProof)?;
        let digest = set_message_count_digest(tip.attestation.as_bytes());
        require_signer(self.verifier, auth, self.admin, &digest)?;

        let input = tip.public_input;
        if input.offset != ledger.message_count {
            return Err(KernelError::StaleCommit);
        }
        if input.current <= input.offset {
            return Err(KernelError::NoProgress);
        }

        proof.verify(self.key)?;
        if !proof.is_finalized() {
            return Err(KernelError::InvalidProof);
        }
        Ok(input.current)
    }

    pub fn commit(&self, ledger: &mut LedgerState, proof: &ChainProof, auth: &Authorization) -> Result<u64> {
        let count = self.check(ledger, proof, auth)?;
        ledger.message_count = count;
        Ok(count)
    }
}
