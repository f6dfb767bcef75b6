// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::action::PendingAction;
use crate::config::NetworkConfig;
use crate::enrollment::Enrollment;
use crate::error::KernelError;
use crate::tests::fixtures::*;
use crate::types::id::Identity;

#[test]
fn test_enroll_and_dedup() {
    let mut net = network();
    let agent = signing_key(10);

    assert_eq!(enroll(&mut net, &agent), Ok(Enrollment::Enrolled));
    assert_eq!(net.ledger().total_users(), 1);
    assert_eq!(net.log().actions()[0], PendingAction::enrollment(identity_of(&agent)));

    // Duplicate appends a sentinel and leaves the counter alone
    assert_eq!(enroll(&mut net, &agent), Ok(Enrollment::AlreadyEnrolled));
    assert_eq!(net.ledger().total_users(), 1);
    assert_eq!(net.log().len(), 2);
    assert_eq!(net.log().actions()[1], PendingAction::EMPTY);
}

#[test]
fn test_non_admin_cannot_enroll() {
    let mut net = network();
    let candidate = identity_of(&signing_key(10));
    let auth = add_user_auth(&signing_key(11), &candidate);

    assert_eq!(net.add_user(&candidate, &auth), Err(KernelError::Unauthorized));
    assert_eq!(net.ledger().total_users(), 0);
    assert!(net.log().is_empty());
}

#[test]
fn test_signature_bound_to_candidate() {
    let mut net = network();
    let auth = add_user_auth(&admin_key(), &identity_of(&signing_key(10)));
    let other = identity_of(&signing_key(12));

    assert_eq!(net.add_user(&other, &auth), Err(KernelError::Unauthorized));
}

#[test]
fn test_capacity_exceeded() {
    let mut net = network_with(NetworkConfig { max_users: 2, ..NetworkConfig::default() });

    enroll(&mut net, &signing_key(10)).unwrap();
    enroll(&mut net, &signing_key(11)).unwrap();
    assert_eq!(enroll(&mut net, &signing_key(12)), Err(KernelError::CapacityExceeded));

    // Checked before dedup, so a re-enrollment at the cap fails too
    assert_eq!(enroll(&mut net, &signing_key(10)), Err(KernelError::CapacityExceeded));
    assert_eq!(net.ledger().total_users(), 2);
    assert_eq!(net.log().len(), 2);
}

#[test]
fn test_action_log_full() {
    let mut net = network_with(NetworkConfig { max_pending_actions: 3, ..NetworkConfig::default() });

    for seed in 10..13 {
        enroll(&mut net, &signing_key(seed)).unwrap();
    }
    assert_eq!(enroll(&mut net, &signing_key(13)), Err(KernelError::ActionLogFull));
    assert_eq!(net.ledger().total_users(), 3);

    // A new epoch frees the log; counters carry over
    let drained = net.start_epoch();
    assert_eq!(drained.actions.len(), 3);
    assert_eq!(net.log().epoch(), 1);
    assert_eq!(enroll(&mut net, &signing_key(13)), Ok(Enrollment::Enrolled));
    assert_eq!(net.ledger().total_users(), 4);
}

#[test]
fn test_empty_identity_never_enrolled() {
    let mut net = network();
    let auth = add_user_auth(&admin_key(), &Identity::EMPTY);

    assert_eq!(net.add_user(&Identity::EMPTY, &auth), Ok(Enrollment::AlreadyEnrolled));
    assert_eq!(net.ledger().total_users(), 0);
}
