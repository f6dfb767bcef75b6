// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::KernelError;
use crate::proof::{prove_messages, ChainProof, ProgramKey, ProofChain, ValidationState};
use crate::tests::fixtures::*;

fn proof_from(offset: u64, count: u64) -> ChainProof {
    let messages: std::vec::Vec<_> = (offset + 1..=offset + count).map(valid_message).collect();
    prove_messages(program_key(), offset, &messages).unwrap()
}

#[test]
fn test_commit_advances_count() {
    let mut net = network();
    let proof = proof_from(0, 3);

    assert_eq!(commit(&mut net, &proof), Ok(3));
    assert_eq!(net.ledger().message_count(), 3);

    // Next chain starts from the committed count
    assert_eq!(commit(&mut net, &proof_from(3, 2)), Ok(5));
}

#[test]
fn test_non_admin_commit_unauthorized() {
    let mut net = network();
    let proof = proof_from(0, 1);
    let auth = commit_auth(&signing_key(40), &proof);

    assert_eq!(net.set_message_count(&proof, &auth), Err(KernelError::Unauthorized));
    assert_eq!(net.ledger().message_count(), 0);
}

#[test]
fn test_signature_bound_to_tip() {
    let mut net = network();
    let first = proof_from(0, 1);
    let second = proof_from(0, 2);
    let auth = commit_auth(&admin_key(), &first);

    assert_eq!(net.set_message_count(&second, &auth), Err(KernelError::Unauthorized));
}

#[test]
fn test_stale_commit() {
    let mut net = network();
    let proof = proof_from(0, 1);

    assert_eq!(commit(&mut net, &proof), Ok(1));
    assert_eq!(commit(&mut net, &proof), Err(KernelError::StaleCommit));
    assert_eq!(commit(&mut net, &proof_from(4, 1)), Err(KernelError::StaleCommit));
    assert_eq!(net.ledger().message_count(), 1);
}

#[test]
fn test_no_progress() {
    let mut net = network();

    // Only the init step
    let mut chain = ProofChain::new(program_key());
    let init = chain.init(ValidationState::genesis(0)).unwrap();
    let bare = chain.export(init).unwrap();
    assert_eq!(commit(&mut net, &bare), Err(KernelError::NoProgress));

    // A chain of duplicates proves nothing new
    let dups = prove_messages(program_key(), 0, &[valid_message(0)]).unwrap();
    assert_eq!(commit(&mut net, &dups), Err(KernelError::NoProgress));
}

#[test]
fn test_invalid_proof() {
    let mut net = network();

    // Forged under another key
    let foreign = prove_messages(ProgramKey::derive(b"rogue"), 0, &[valid_message(1)]).unwrap();
    assert_eq!(commit(&mut net, &foreign), Err(KernelError::InvalidProof));

    // Tip is a check step, not finalized
    let mut chain = ProofChain::new(program_key());
    let init = chain.init(ValidationState::genesis(0)).unwrap();
    let check = chain
        .valid_message_check(ValidationState::new(0, 1, 0), &valid_message(1), init)
        .unwrap();
    let open = chain.export(check).unwrap();
    assert_eq!(commit(&mut net, &open), Err(KernelError::InvalidProof));

    assert_eq!(commit(&mut net, &ChainProof::default()), Err(KernelError::InvalidProof));
    assert_eq!(net.ledger().message_count(), 0);
}

#[test]
fn test_check_order() {
    let mut net = network();
    commit(&mut net, &proof_from(0, 1)).unwrap();

    // Stale and forged: staleness is reported first
    let foreign = prove_messages(ProgramKey::derive(b"rogue"), 0, &[valid_message(1)]).unwrap();
    assert_eq!(commit(&mut net, &foreign), Err(KernelError::StaleCommit));

    // Stale, forged and unsigned: authorization is reported first
    let auth = commit_auth(&signing_key(41), &foreign);
    assert_eq!(net.set_message_count(&foreign, &auth), Err(KernelError::Unauthorized));
}
