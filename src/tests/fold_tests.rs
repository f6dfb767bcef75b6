// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::action::PendingAction;
use crate::error::KernelError;
use crate::fold::ActionFold;
use crate::types::field::Payload;
use crate::types::id::Identity;
use std::vec::Vec;

fn id(b: u8) -> Identity {
    Identity([b; 32])
}

fn sent(b: u8) -> PendingAction {
    PendingAction::new(id(b), Payload::from_u128(b as u128 + 1))
}

#[test]
fn test_fold_walks_exactly_bound_slots() {
    let fold = ActionFold::new(7);
    let actions = [sent(1), sent(2)];

    let visited = fold.fold(&actions, 0usize, |n, _| n + 1).unwrap();
    assert_eq!(visited, 7);

    let empties = fold
        .fold(&actions, 0usize, |n, a| n + a.is_empty() as usize)
        .unwrap();
    assert_eq!(empties, 5);
}

#[test]
fn test_fold_rejects_oversized_log() {
    let fold = ActionFold::new(2);
    let actions = [sent(1), sent(2), sent(3)];
    assert_eq!(fold.fold(&actions, (), |s, _| s), Err(KernelError::ActionLogFull));
}

#[test]
fn test_identity_exists() {
    let fold = ActionFold::new(10);
    let actions = [PendingAction::enrollment(id(4)), sent(5)];

    assert!(fold.identity_exists(&actions, &id(4)).unwrap());
    assert!(fold.identity_exists(&actions, &id(5)).unwrap());
    assert!(!fold.identity_exists(&actions, &id(6)).unwrap());

    // Padding carries the empty identity
    assert!(fold.identity_exists(&[], &Identity::EMPTY).unwrap());
}

#[test]
fn test_eligibility_reset_sequence() {
    let fold = ActionFold::new(10);
    let mut log: Vec<PendingAction> = Vec::new();

    // Unknown sender
    assert!(!fold.sender_eligible(&log, &id(1)).unwrap());

    // Enrolled
    log.push(PendingAction::enrollment(id(1)));
    assert!(fold.sender_eligible(&log, &id(1)).unwrap());

    // Other agents do not affect the sender
    log.push(sent(2));
    log.push(PendingAction::EMPTY);
    assert!(fold.sender_eligible(&log, &id(1)).unwrap());

    // A genuine send closes the gate
    log.push(sent(1));
    assert!(!fold.sender_eligible(&log, &id(1)).unwrap());

    // A later empty-payload entry re-opens it
    log.push(PendingAction::enrollment(id(1)));
    assert!(fold.sender_eligible(&log, &id(1)).unwrap());
}

#[test]
fn test_send_without_enrollment_is_not_eligible() {
    let fold = ActionFold::new(10);
    assert!(!fold.sender_eligible(&[sent(3)], &id(3)).unwrap());
}
