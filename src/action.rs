// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-only pending action log.

use alloc::vec::Vec;
use serde::{Serialize, Deserialize};
use crate::error::{KernelError, Result};
use crate::types::field::Payload;
use crate::types::id::Identity;

/// One dispatched action. Empty entries are real values, not absence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PendingAction {
    pub identity: Identity,
    pub payload: Payload,
}

impl PendingAction {
    pub const EMPTY: PendingAction = PendingAction {
        identity: Identity::EMPTY,
        payload: Payload::EMPTY,
    };

    pub fn new(identity: Identity, payload: Payload) -> Self {
        Self { identity, payload }
    }

    /// An enrollment entry: the identity with an empty payload.
    pub fn enrollment(identity: Identity) -> Self {
        Self { identity, payload: Payload::EMPTY }
    }

    pub fn empty() -> Self {
        Self::EMPTY
    }

    pub fn is_empty(&self) -> bool {
        self.identity.is_empty() && self.payload.is_empty()
    }
}

/// Pending actions of one epoch.
///
/// Entries are never mutated or removed individually. The only removal path is
/// [`ActionLog::start_epoch`], which hands the whole epoch to the reconciler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    epoch: u64,
    capacity: usize,
    actions: Vec<PendingAction>,
}

impl ActionLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            epoch: 0,
            capacity,
            actions: Vec::new(),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.actions.len() >= self.capacity
    }

    pub fn actions(&self) -> &[PendingAction] {
        &self.actions
    }

    /// Fails with `ActionLogFull` if another append would not fit.
    pub fn ensure_room(&self) -> Result<()> {
        if self.is_full() {
            return Err(KernelError::ActionLogFull);
        }
        Ok(())
    }

    pub fn append(&mut self, action: PendingAction) -> Result<()> {
        self.ensure_room()?;
        self.actions.push(action);
        Ok(())
    }

    /// Closes the current epoch and returns its actions for reconciliation.
    pub fn start_epoch(&mut self) -> Vec<PendingAction> {
        self.epoch += 1;
        core::mem::take(&mut self.actions)
    }
}
