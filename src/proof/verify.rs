// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Chain verification.
//!
//! A verifier holds the program key and the exported steps, never the witnesses.
//! It re-derives every attestation and re-checks the public transition rules.

use alloc::vec::Vec;
use serde::{Serialize, Deserialize};
use crate::error::{KernelError, Result};
use crate::proof::attest::ProgramKey;
use crate::proof::state::{ValidationOutcome, ValidationState};
use crate::proof::step::{ProofStep, StepKind};

/// Exported chain, genesis-first, ending at the tip being proven.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChainProof {
    pub steps: Vec<ProofStep>,
}

impl ChainProof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn tip(&self) -> Option<&ProofStep> {
        self.steps.last()
    }

    pub fn public_input(&self) -> Option<ValidationState> {
        self.tip().map(|s| s.public_input)
    }

    pub fn public_output(&self) -> Option<ValidationOutcome> {
        self.tip().map(|s| s.public_output)
    }

    /// Tip is a `processMessage` step.
    pub fn is_finalized(&self) -> bool {
        self.tip().map_or(false, |s| s.kind == StepKind::ProcessMessage)
    }

    /// Verifies every step from genesis to the tip.
    pub fn verify(&self, key: &ProgramKey) -> Result<()> {
        if self.steps.is_empty() {
            return Err(KernelError::InvalidProof);
        }

        let mut predecessor: Option<&ProofStep> = None;
        for step in &self.steps {
            verify_link(key, step, predecessor)?;
            predecessor = Some(step);
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|_| KernelError::InvalidInput)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (proof, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|_| KernelError::InvalidProof)?;
        Ok(proof)
    }
}

/// Checks one step against its predecessor (`None` = genesis).
pub fn verify_link(key: &ProgramKey, step: &ProofStep, predecessor: Option<&ProofStep>) -> Result<()> {
    let linked = match (step.predecessor, predecessor) {
        (None, None) => true,
        (Some(id), Some(pred)) => id == pred.id && id < step.id,
        _ => false,
    };
    if !linked {
        return Err(KernelError::InvalidProof);
    }

    let expected_prev = predecessor.map_or_else(|| key.genesis(), |p| p.attestation);
    if step.predecessor_attestation != expected_prev {
        return Err(KernelError::InvalidProof);
    }

    let attestation = key.attest(
        step.kind,
        &step.public_input,
        &step.public_output,
        &step.predecessor_attestation,
        &step.witness_commitment,
    );
    if step.attestation != attestation {
        return Err(KernelError::InvalidProof);
    }

    if transition_holds(step, predecessor) {
        Ok(())
    } else {
        Err(KernelError::InvalidProof)
    }
}

/// Public-data rules each step kind must satisfy relative to its predecessor.
pub fn transition_holds(step: &ProofStep, predecessor: Option<&ProofStep>) -> bool {
    let input = &step.public_input;
    let output = &step.public_output;

    let pred = match (step.kind, predecessor) {
        (StepKind::Init, None) => {
            return input.is_initial() && output.is_zero() && step.witness_commitment == [0u8; 32];
        }
        (StepKind::Init, Some(_)) | (_, None) => return false,
        (_, Some(pred)) => pred,
    };
    let prior = &pred.public_input;

    match step.kind {
        StepKind::Init => false,
        StepKind::AgentIdCheck | StepKind::ValidMessageCheck => {
            let expected = if step.kind == StepKind::AgentIdCheck {
                ValidationOutcome::agent_zero()
            } else {
                ValidationOutcome::message_valid()
            };
            pred.kind.is_ready()
                && input.offset == prior.offset
                && input.prev == prior.prev
                && prior.prev.checked_add(1) == Some(input.current)
                && *output == expected
        }
        StepKind::MessageNumberCheck => {
            pred.kind.is_ready()
                && input.offset == prior.offset
                && input.prev == prior.prev
                && input.current == input.prev
                && *output == ValidationOutcome::sno_greater()
        }
        StepKind::ProcessMessage => {
            pred.kind.is_check()
                && pred.public_output.any()
                && input.offset == prior.offset
                && input.prev == prior.current
                && input.current == input.prev
                && output.is_zero()
                && step.witness_commitment == [0u8; 32]
        }
    }
}
