// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Batch prover: drives a chain over an ordered message stream.

use crate::error::Result;
use crate::proof::attest::ProgramKey;
use crate::proof::chain::ProofChain;
use crate::proof::state::ValidationState;
use crate::proof::verify::ChainProof;
use crate::types::id::StepId;
use crate::types::message::Message;

/// Validation branch chosen for a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    /// Already accepted sequence number.
    Duplicate,
    AgentZero,
    Valid,
}

impl Branch {
    pub fn resolve(ready: &ValidationState, message: &Message) -> Self {
        if message.sequence_number <= ready.prev {
            Branch::Duplicate
        } else if message.agent_id == 0 {
            Branch::AgentZero
        } else {
            Branch::Valid
        }
    }
}

/// Extends the ready step `tip` with one message: a check step, then `processMessage`.
pub fn prove_message(chain: &mut ProofChain, tip: StepId, message: &Message) -> Result<StepId> {
    let ready = chain.step(tip)?.public_input;

    let check = match Branch::resolve(&ready, message) {
        Branch::Duplicate => chain.message_number_check(ready.hold(), message, tip)?,
        Branch::AgentZero => chain.agent_id_check(ready.advance()?, message, tip)?,
        Branch::Valid => chain.valid_message_check(ready.advance()?, message, tip)?,
    };

    let checked = chain.step(check)?.public_input;
    chain.process_message(checked.finalize(), check)
}

/// Proves `messages` in order starting from committed count `offset`.
pub fn prove_messages(key: ProgramKey, offset: u64, messages: &[Message]) -> Result<ChainProof> {
    let mut chain = ProofChain::new(key);
    let mut tip = chain.init(ValidationState::genesis(offset))?;

    for message in messages {
        tip = prove_message(&mut chain, tip, message)?;
    }

    chain.export(tip)
}
