// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Agent enrollment.

use crate::action::{ActionLog, PendingAction};
use crate::auth::{add_user_digest, require_signer, Authorization, SignatureVerifier};
use crate::error::{KernelError, Result};
use crate::fold::ActionFold;
use crate::ledger::LedgerState;
use crate::select::select;
use crate::types::id::Identity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Enrollment {
    Enrolled,
    /// Already in this epoch's log; an empty sentinel was appended instead.
    AlreadyEnrolled,
}

/// Effects of an enrollment, computed before anything is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnrollmentPlan {
    pub action: PendingAction,
    pub total_users: u64,
    pub outcome: Enrollment,
}

#[derive(Clone, Copy, Debug)]
pub struct EnrollmentProcessor {
    max_users: u64,
    fold: ActionFold,
}

impl EnrollmentProcessor {
    pub fn new(max_users: u64, fold: ActionFold) -> Self {
        Self { max_users, fold }
    }

    pub fn plan<V: SignatureVerifier + ?Sized>(
        &self,
        ledger: &LedgerState,
        log: &ActionLog,
        verifier: &V,
        admin: &Identity,
        candidate: &Identity,
        auth: &Authorization,
    ) -> Result<EnrollmentPlan> {
        require_signer(verifier, auth, admin, &add_user_digest(candidate))?;

        let users = ledger.total_users();
        if users >= self.max_users {
            return Err(KernelError::CapacityExceeded);
        }
        log.ensure_room()?;

        let exists = self.fold.identity_exists(log.actions(), candidate)?;

        Ok(EnrollmentPlan {
            action: select(exists, PendingAction::EMPTY, PendingAction::enrollment(*candidate)),
            total_users: select(exists, users, users + 1),
            outcome: select(exists, Enrollment::AlreadyEnrolled, Enrollment::Enrolled),
        })
    }
}
