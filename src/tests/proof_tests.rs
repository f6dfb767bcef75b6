// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::KernelError;
use crate::proof::{prove_messages, Branch, ChainProof, ProgramKey, ProofChain, StepKind, ValidationOutcome, ValidationState};
use crate::tests::fixtures::{program_key, valid_message};
use crate::types::id::StepId;
use crate::types::message::Message;
use std::vec::Vec;

fn agent_zero(sno: u64) -> Message {
    // Fields out of range on purpose: agent 0 is exempt from validation
    Message::new(sno, 0, 0, 0, 0)
}

#[test]
fn test_init_and_agent_zero() {
    let mut chain = ProofChain::new(program_key());
    let init = chain.init(ValidationState::new(5, 5, 5)).unwrap();
    assert_eq!(chain.step(init).unwrap().public_output, ValidationOutcome::ZERO);

    let check = chain
        .agent_id_check(ValidationState::new(5, 6, 5), &agent_zero(6), init)
        .unwrap();
    let step = chain.step(check).unwrap();
    assert!(step.public_output.is_agent_zero);
    assert_eq!(step.kind, StepKind::AgentIdCheck);

    let done = chain.process_message(ValidationState::new(5, 6, 6), check).unwrap();
    assert!(chain.verify(done).is_ok());
}

#[test]
fn test_init_requires_aligned_state() {
    let mut chain = ProofChain::new(program_key());
    assert_eq!(chain.init(ValidationState::new(5, 6, 5)), Err(KernelError::InvalidState));
    assert!(chain.is_empty());
}

#[test]
fn test_process_unvalidated_fails() {
    let mut chain = ProofChain::new(program_key());
    let init = chain.init(ValidationState::genesis(0)).unwrap();

    assert_eq!(
        chain.process_message(ValidationState::new(0, 0, 0), init),
        Err(KernelError::UnvalidatedMessage)
    );
}

#[test]
fn test_valid_message_check() {
    let mut chain = ProofChain::new(program_key());
    let init = chain.init(ValidationState::genesis(0)).unwrap();

    let mut bad = valid_message(1);
    bad.checksum += 1;
    assert_eq!(
        chain.valid_message_check(ValidationState::new(0, 1, 0), &bad, init),
        Err(KernelError::InvalidMessage)
    );

    // Sequence number must match the claimed current
    assert_eq!(
        chain.valid_message_check(ValidationState::new(0, 1, 0), &valid_message(2), init),
        Err(KernelError::InvalidState)
    );

    // No skipping ahead
    assert_eq!(
        chain.valid_message_check(ValidationState::new(0, 2, 0), &valid_message(2), init),
        Err(KernelError::InvalidState)
    );

    let check = chain
        .valid_message_check(ValidationState::new(0, 1, 0), &valid_message(1), init)
        .unwrap();
    assert!(chain.step(check).unwrap().public_output.is_message_valid);
}

#[test]
fn test_message_number_check_on_duplicate() {
    let key = program_key();
    let proof = prove_messages(key.clone(), 0, &[valid_message(1), valid_message(2)]).unwrap();
    assert_eq!(proof.public_input(), Some(ValidationState::new(0, 2, 2)));

    let mut chain = ProofChain::new(key);
    let init = chain.init(ValidationState::genesis(3)).unwrap();

    // Already accepted sequence number
    let dup = chain
        .message_number_check(ValidationState::new(3, 3, 3), &valid_message(2), init)
        .unwrap();
    assert!(chain.step(dup).unwrap().public_output.is_sno_greater);

    // A fresh sequence number is not a duplicate
    assert_eq!(
        chain.message_number_check(ValidationState::new(3, 3, 3), &valid_message(4), init),
        Err(KernelError::InvalidState)
    );

    let done = chain.process_message(ValidationState::new(3, 3, 3), dup).unwrap();
    assert_eq!(chain.step(done).unwrap().public_input, ValidationState::genesis(3));
}

#[test]
fn test_check_cannot_extend_check() {
    let mut chain = ProofChain::new(program_key());
    let init = chain.init(ValidationState::genesis(0)).unwrap();
    let check = chain
        .valid_message_check(ValidationState::new(0, 1, 0), &valid_message(1), init)
        .unwrap();

    assert_eq!(
        chain.agent_id_check(ValidationState::new(0, 1, 0), &agent_zero(1), check),
        Err(KernelError::InvalidState)
    );
    assert_eq!(
        chain.process_message(ValidationState::new(0, 0, 0), check),
        Err(KernelError::InvalidState)
    );
}

#[test]
fn test_unknown_predecessor() {
    let mut chain = ProofChain::new(program_key());
    assert_eq!(
        chain.process_message(ValidationState::genesis(0), StepId(9)),
        Err(KernelError::NotFound)
    );
}

#[test]
fn test_branch_resolution() {
    let ready = ValidationState::genesis(4);
    assert_eq!(Branch::resolve(&ready, &valid_message(4)), Branch::Duplicate);
    assert_eq!(Branch::resolve(&ready, &agent_zero(3)), Branch::Duplicate);
    assert_eq!(Branch::resolve(&ready, &agent_zero(5)), Branch::AgentZero);
    assert_eq!(Branch::resolve(&ready, &valid_message(5)), Branch::Valid);
}

#[test]
fn test_prove_batch() {
    let messages = [valid_message(1), agent_zero(2), valid_message(2), valid_message(3)];
    let proof = prove_messages(program_key(), 0, &messages).unwrap();

    // init + 2 steps per message
    assert_eq!(proof.len(), 1 + 2 * messages.len());
    assert!(proof.is_finalized());
    assert_eq!(proof.public_input(), Some(ValidationState::new(0, 3, 3)));
    assert!(proof.verify(&program_key()).is_ok());

    let kinds: Vec<StepKind> = proof.steps.iter().map(|s| s.kind).collect();
    assert_eq!(kinds[3], StepKind::AgentIdCheck);
    assert_eq!(kinds[5], StepKind::MessageNumberCheck);
}

#[test]
fn test_prove_long_batch() {
    let messages: Vec<Message> = (1..=5000).map(valid_message).collect();
    let proof = prove_messages(program_key(), 0, &messages).unwrap();

    assert_eq!(proof.len(), 1 + 2 * messages.len());
    assert_eq!(proof.public_input(), Some(ValidationState::new(0, 5000, 5000)));
    assert!(proof.verify(&program_key()).is_ok());
}

#[test]
fn test_prove_batch_stops_on_invalid_message() {
    let mut bad = valid_message(2);
    bad.y = bad.x;
    assert_eq!(
        prove_messages(program_key(), 0, &[valid_message(1), bad]),
        Err(KernelError::InvalidMessage)
    );
}

#[test]
fn test_wrong_key_rejected() {
    let proof = prove_messages(program_key(), 0, &[valid_message(1)]).unwrap();
    assert_eq!(proof.verify(&ProgramKey::derive(b"other")), Err(KernelError::InvalidProof));
}

#[test]
fn test_tampering_detected() {
    let key = program_key();
    let proof = prove_messages(key.clone(), 0, &[valid_message(1), valid_message(2)]).unwrap();

    // Inflate the tip's claimed count
    let mut forged = proof.clone();
    let last = forged.steps.len() - 1;
    forged.steps[last].public_input = ValidationState::new(0, 9, 9);
    assert_eq!(forged.verify(&key), Err(KernelError::InvalidProof));

    // Flip an outcome flag in the middle
    let mut forged = proof.clone();
    forged.steps[1].public_output = ValidationOutcome::agent_zero();
    assert_eq!(forged.verify(&key), Err(KernelError::InvalidProof));

    // Drop a step
    let mut forged = proof.clone();
    forged.steps.remove(2);
    assert_eq!(forged.verify(&key), Err(KernelError::InvalidProof));

    // Truncating to a prefix still verifies; it just proves less
    let prefix = ChainProof::new(proof.steps[..3].to_vec());
    assert!(prefix.verify(&key).is_ok());
    assert_eq!(prefix.public_input(), Some(ValidationState::new(0, 1, 1)));

    assert_eq!(ChainProof::default().verify(&key), Err(KernelError::InvalidProof));
}

#[test]
fn test_proof_encoding() {
    let key = program_key();
    let proof = prove_messages(key.clone(), 2, &[valid_message(3)]).unwrap();

    let bytes = proof.encode().unwrap();
    let decoded = ChainProof::decode(&bytes).unwrap();
    assert_eq!(decoded, proof);
    assert!(decoded.verify(&key).is_ok());

    assert_eq!(ChainProof::decode(&bytes[..bytes.len() - 1]), Err(KernelError::InvalidProof));
}
