// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Proof-chain prover.
//!
//! Steps live in an append-only arena and refer to their predecessor by
//! [`StepId`]. A step is only ever extended after its link to its own
//! predecessor verifies, so by induction every step's ancestry verifies and
//! extending a chain costs the same at any length.

use alloc::vec::Vec;
use crate::error::{KernelError, Result};
use crate::proof::attest::ProgramKey;
use crate::proof::state::{ValidationOutcome, ValidationState};
use crate::proof::step::{Attestation, ProofStep, StepKind};
use crate::proof::verify::{verify_link, ChainProof};
use crate::types::id::StepId;
use crate::types::message::Message;

#[derive(Clone, Debug)]
pub struct ProofChain {
    key: ProgramKey,
    steps: Vec<ProofStep>,
}

impl ProofChain {
    pub fn new(key: ProgramKey) -> Self {
        Self { key, steps: Vec::new() }
    }

    pub fn key(&self) -> &ProgramKey {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, id: StepId) -> Result<&ProofStep> {
        self.steps.get(id.index()).ok_or(KernelError::NotFound)
    }

    /// Starts a chain at a committed count.
    pub fn init(&mut self, state: ValidationState) -> Result<StepId> {
        if !state.is_initial() {
            return Err(KernelError::InvalidState);
        }
        let genesis = self.key.genesis();
        Ok(self.push(StepKind::Init, state, ValidationOutcome::ZERO, None, genesis, [0u8; 32]))
    }

    /// Accepts a message from agent 0, exempt from field validation.
    pub fn agent_id_check(&mut self, state: ValidationState, message: &Message, prior: StepId) -> Result<StepId> {
        let pred = self.ready_predecessor(prior)?;
        Self::require_advance(&state, &pred.public_input, message)?;
        if message.agent_id != 0 {
            return Err(KernelError::InvalidState);
        }

        let witness = self.key.commit_witness(message);
        Ok(self.push(StepKind::AgentIdCheck, state, ValidationOutcome::agent_zero(), Some(prior), pred.attestation, witness))
    }

    /// Accepts a duplicate or out-of-order message as a no-op.
    pub fn message_number_check(&mut self, state: ValidationState, message: &Message, prior: StepId) -> Result<StepId> {
        let pred = self.ready_predecessor(prior)?;
        let prior_state = pred.public_input;
        let holds = state.offset == prior_state.offset
            && state.prev == prior_state.prev
            && state.current == state.prev;
        if !holds || message.sequence_number > prior_state.prev {
            return Err(KernelError::InvalidState);
        }

        let witness = self.key.commit_witness(message);
        Ok(self.push(StepKind::MessageNumberCheck, state, ValidationOutcome::sno_greater(), Some(prior), pred.attestation, witness))
    }

    /// Accepts a message whose fields pass validation.
    pub fn valid_message_check(&mut self, state: ValidationState, message: &Message, prior: StepId) -> Result<StepId> {
        let pred = self.ready_predecessor(prior)?;
        Self::require_advance(&state, &pred.public_input, message)?;
        message.validate()?;

        let witness = self.key.commit_witness(message);
        Ok(self.push(StepKind::ValidMessageCheck, state, ValidationOutcome::message_valid(), Some(prior), pred.attestation, witness))
    }

    /// Finalizes a validated message and advances `prev`.
    pub fn process_message(&mut self, state: ValidationState, prior: StepId) -> Result<StepId> {
        let pred = self.verified(prior)?;
        if !pred.public_output.any() {
            return Err(KernelError::UnvalidatedMessage);
        }
        let prior_state = pred.public_input;
        let holds = pred.kind.is_check()
            && state.offset == prior_state.offset
            && state.prev == prior_state.current
            && state.current == state.prev;
        if !holds {
            return Err(KernelError::InvalidState);
        }

        Ok(self.push(StepKind::ProcessMessage, state, ValidationOutcome::ZERO, Some(prior), pred.attestation, [0u8; 32]))
    }

    /// Verifies `id` and its whole ancestry.
    pub fn verify(&self, id: StepId) -> Result<()> {
        self.export(id)?.verify(&self.key)
    }

    /// Collects the ancestry of `id`, genesis-first.
    pub fn export(&self, id: StepId) -> Result<ChainProof> {
        let mut steps = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let step = *self.step(current)?;
            // Predecessors always precede their successors in the arena.
            if matches!(step.predecessor, Some(p) if p >= current) {
                return Err(KernelError::InvalidProof);
            }
            cursor = step.predecessor;
            steps.push(step);
        }
        steps.reverse();
        Ok(ChainProof::new(steps))
    }

    /// Checks `id` against its predecessor only.
    ///
    /// Every step in the arena was pushed on top of a predecessor that passed
    /// this check, so one link is enough to cover the whole ancestry.
    fn verified(&self, id: StepId) -> Result<ProofStep> {
        let step = *self.step(id)?;
        let predecessor = match step.predecessor {
            Some(p) if p >= id => return Err(KernelError::InvalidProof),
            Some(p) => Some(self.step(p)?),
            None => None,
        };
        verify_link(&self.key, &step, predecessor)?;
        Ok(step)
    }

    fn ready_predecessor(&self, id: StepId) -> Result<ProofStep> {
        let pred = self.verified(id)?;
        if !pred.kind.is_ready() {
            return Err(KernelError::InvalidState);
        }
        Ok(pred)
    }

    fn require_advance(state: &ValidationState, prior: &ValidationState, message: &Message) -> Result<()> {
        let holds = state.offset == prior.offset
            && state.prev == prior.prev
            && prior.prev.checked_add(1) == Some(state.current)
            && message.sequence_number == state.current;
        if holds {
            Ok(())
        } else {
            Err(KernelError::InvalidState)
        }
    }

    fn push(
        &mut self,
        kind: StepKind,
        public_input: ValidationState,
        public_output: ValidationOutcome,
        predecessor: Option<StepId>,
        predecessor_attestation: Attestation,
        witness_commitment: [u8; 32],
    ) -> StepId {
        let id = StepId(self.steps.len() as u32);
        let attestation = self.key.attest(kind, &public_input, &public_output, &predecessor_attestation, &witness_commitment);
        self.steps.push(ProofStep {
            id,
            kind,
            public_input,
            public_output,
            predecessor,
            predecessor_attestation,
            witness_commitment,
            attestation,
        });
        id
    }
}
