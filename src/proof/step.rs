// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Proof step records.

use serde::{Serialize, Deserialize};
use crate::proof::state::{ValidationOutcome, ValidationState};
use crate::types::id::StepId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum StepKind {
    Init = 0,
    AgentIdCheck = 1,
    MessageNumberCheck = 2,
    ValidMessageCheck = 3,
    ProcessMessage = 4,
}

impl StepKind {
    /// One of the three mutually exclusive validation branches.
    pub fn is_check(&self) -> bool {
        matches!(
            self,
            StepKind::AgentIdCheck | StepKind::MessageNumberCheck | StepKind::ValidMessageCheck
        )
    }

    /// A step a validation branch may extend.
    pub fn is_ready(&self) -> bool {
        matches!(self, StepKind::Init | StepKind::ProcessMessage)
    }
}

/// Keyed BLAKE3 tag binding a step to its predecessor.
#[derive(Clone, Copy, Debug, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Attestation(pub [u8; 32]);

impl Attestation {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

// Constant-time comparison.
impl PartialEq for Attestation {
    fn eq(&self, other: &Self) -> bool {
        blake3::Hash::from(self.0) == blake3::Hash::from(other.0)
    }
}

impl Eq for Attestation {}

/// An immutable step of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub id: StepId,
    pub kind: StepKind,
    pub public_input: ValidationState,
    pub public_output: ValidationOutcome,
    /// `None` for `init`, whose predecessor is genesis.
    pub predecessor: Option<StepId>,
    pub predecessor_attestation: Attestation,
    /// Commitment to the private message witness; zero for steps without one.
    pub witness_commitment: [u8; 32],
    pub attestation: Attestation,
}
