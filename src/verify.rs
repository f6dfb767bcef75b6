//! Deterministic Hashing and Verification.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::auth::SignatureVerifier;
use crate::network::SpyNetwork;

/// Computes the cryptographic hash of a network's state.
///
/// **Scope**: covers the deterministic state ONLY:
/// - Configuration and admin identity
/// - Ledger counters
/// - Epoch and pending actions (content + position)
/// - Event stream (content + position)
///
/// It explicitly **EXCLUDES** the program key and the verifier.
pub fn network_state_hash<V: SignatureVerifier>(network: &SpyNetwork<V>) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();

    // 1. Configuration
    let config = network.config();
    hasher.update(&config.max_users.to_le_bytes());
    hasher.update(&(config.max_pending_actions as u64).to_le_bytes());
    hasher.update(&[config.admission as u8]);
    hasher.update(network.admin().as_bytes());

    // 2. Counters
    let ledger = network.ledger();
    hasher.update(&ledger.total_users().to_le_bytes());
    hasher.update(&ledger.total_messages().to_le_bytes());
    hasher.update(&ledger.message_count().to_le_bytes());

    // 3. Pending actions (canonical order: by position)
    let log = network.log();
    hasher.update(&log.epoch().to_le_bytes());
    hasher.update(&(log.len() as u64).to_le_bytes());
    for (i, action) in log.actions().iter().enumerate() {
        hasher.update(&(i as u32).to_le_bytes());
        hasher.update(action.identity.as_bytes());
        hasher.update(action.payload.as_bytes());
    }

    // 4. Events
    hasher.update(&(network.events().len() as u64).to_le_bytes());
    for event in network.events() {
        hasher.update(&[event.topic as u8]);
        hasher.update(event.identity.as_bytes());
    }

    *hasher.finalize().as_bytes()
}
