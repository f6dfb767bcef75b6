// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Operation Replay - Authoritative Recovery
//!
//! **The operation log ALWAYS wins.**
//!
//! # Recovery Protocol
//! 1. Load and validate the log (canonical truth)
//! 2. Replay committed operations into a fresh network
//! 3. Compute state hash
//!
//! # Invariants
//! - Header mismatch → fail closed
//! - Corrupted frame before the tail → fail closed
//! - Torn final frame → ignored with a warning
//! - Every logged operation applied cleanly once, so a replay failure means
//!   the log and the configuration disagree → fail closed

use spynet_kernel::error::KernelError;
use spynet_kernel::event::Operation;
use spynet_kernel::network::SpyNetwork;
use spynet_kernel::verify::network_state_hash;
use crate::events::event_journal::EventJournal;
use crate::events::event_log::{scan_frames, EventLogError, EventLogHeader, HEADER_LEN};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Operation log error: {0}")]
    Log(#[from] EventLogError),

    #[error("Operation {index} failed on replay: {error}")]
    OperationFailed { index: usize, error: KernelError },
}

pub type Result<T> = std::result::Result<T, ReplayError>;

/// Reads every complete operation from the log file, in commit order.
pub fn read_event_log(path: impl AsRef<Path>) -> Result<Vec<Operation>> {
    let bytes = std::fs::read(path.as_ref())?;

    EventLogHeader::from_bytes(&bytes)?.validate()?;

    let scan = scan_frames(&bytes[HEADER_LEN..])?;
    if scan.torn_tail {
        tracing::warn!(
            "Ignoring incomplete operation at end of log (offset {})",
            HEADER_LEN + scan.valid_len
        );
    }

    Ok(scan.operations)
}

/// Replays operations on top of `fresh`.
///
/// # Guarantees
/// - Deterministic: same operations + same configuration → same state
pub fn replay_operations(mut fresh: SpyNetwork, operations: &[Operation]) -> Result<SpyNetwork> {
    for (index, op) in operations.iter().enumerate() {
        fresh.apply(op).map_err(|error| {
            tracing::error!("Replay failed at operation {} ({}): {}", index, op.kind(), error);
            ReplayError::OperationFailed { index, error }
        })?;
    }
    Ok(fresh)
}

/// Full recovery from an operation log
///
/// Returns the recovered network, a journal holding the committed operations,
/// and the operation count.
pub fn recover_from_event_log(
    log_path: impl AsRef<Path>,
    fresh: SpyNetwork,
) -> Result<(SpyNetwork, EventJournal, u64)> {
    tracing::info!("Starting recovery from operation log: {:?}", log_path.as_ref());

    let operations = read_event_log(log_path)?;
    let count = operations.len() as u64;
    tracing::info!("Loaded {} operations from log", count);

    let state = replay_operations(fresh, &operations)?;

    tracing::info!(
        "Replay complete. State hash: {}",
        hex::encode(&network_state_hash(&state)[..8])
    );

    Ok((state, EventJournal::from_committed(operations), count))
}
