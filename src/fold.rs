// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-shape reduction over the pending action log.
//!
//! A fold always walks exactly `bound` slots: the epoch's real actions followed
//! by empty padding. There is no early exit, and the accumulator is advanced with
//! [`select`] only, so the cost of a fold does not depend on where (or whether) a
//! match occurs.

use crate::action::PendingAction;
use crate::error::{KernelError, Result};
use crate::select::select;
use crate::types::id::Identity;

static EMPTY_SLOT: PendingAction = PendingAction::EMPTY;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionFold {
    bound: usize,
}

impl ActionFold {
    pub fn new(bound: usize) -> Self {
        Self { bound }
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Folds `actions` (padded to the bound) into a single accumulator.
    pub fn fold<S, F>(&self, actions: &[PendingAction], initial: S, step: F) -> Result<S>
    where
        S: Copy,
        F: Fn(S, &PendingAction) -> S,
    {
        if actions.len() > self.bound {
            return Err(KernelError::ActionLogFull);
        }

        let slots = actions
            .iter()
            .chain(core::iter::repeat(&EMPTY_SLOT))
            .take(self.bound);

        Ok(slots.fold(initial, step))
    }

    /// Enrollment dedup: does `candidate` appear anywhere in the log?
    ///
    /// The empty identity always "exists" because the padding carries it.
    pub fn identity_exists(&self, actions: &[PendingAction], candidate: &Identity) -> Result<bool> {
        self.fold(actions, false, |exists, action| {
            let matched = action.identity == *candidate;
            select(matched, true, exists)
        })
    }

    /// Messaging eligibility for `sender`.
    ///
    /// An entry for the sender with an empty payload (enrollment) makes them
    /// eligible; an entry with a non-empty payload (a genuine send) makes them
    /// ineligible until a later empty-payload entry for them appears.
    pub fn sender_eligible(&self, actions: &[PendingAction], sender: &Identity) -> Result<bool> {
        self.fold(actions, false, |state, action| {
            let found = action.identity == *sender;
            let sent = found & !action.payload.is_empty();
            let exists = found | state;
            select(exists & sent, false, exists)
        })
    }
}
