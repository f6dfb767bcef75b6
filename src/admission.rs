// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Message admission gate.
//!
//! A message is admitted when its sender is eligible in the current epoch, its
//! flags are well formed, and neither payload nor sender is empty. Every input
//! runs the same fold; the outcome is chosen with [`select`].

use crate::action::{ActionLog, PendingAction};
use crate::auth::{require_signature, send_message_digest, Authorization, SignatureVerifier};
use crate::config::AdmissionPolicy;
use crate::error::{KernelError, Result};
use crate::event::LedgerEvent;
use crate::flags::flags_valid;
use crate::fold::ActionFold;
use crate::ledger::LedgerState;
use crate::select::select;
use crate::types::field::Payload;
use crate::types::id::Identity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// Gate closed: a sentinel entry and a masked event were recorded.
    Masked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdmissionPlan {
    pub action: PendingAction,
    pub total_messages: u64,
    pub event: LedgerEvent,
    pub outcome: Admission,
}

#[derive(Clone, Copy, Debug)]
pub struct MessageAdmission {
    fold: ActionFold,
    policy: AdmissionPolicy,
}

impl MessageAdmission {
    pub fn new(fold: ActionFold, policy: AdmissionPolicy) -> Self {
        Self { fold, policy }
    }

    /// Does the gate open for `sender` sending `payload`?
    pub fn admits(&self, log: &ActionLog, sender: &Identity, payload: &Payload) -> Result<bool> {
        let eligible = self.fold.sender_eligible(log.actions(), sender)?;
        Ok(eligible & flags_valid(payload) & !payload.is_empty() & !sender.is_empty())
    }

    pub fn plan<V: SignatureVerifier + ?Sized>(
        &self,
        ledger: &LedgerState,
        log: &ActionLog,
        verifier: &V,
        payload: &Payload,
        auth: &Authorization,
    ) -> Result<AdmissionPlan> {
        require_signature(verifier, auth, &send_message_digest(payload))?;
        log.ensure_room()?;

        let sender = auth.signer;
        let accepted = self.admits(log, &sender, payload)?;
        if !accepted && self.policy == AdmissionPolicy::Reject {
            return Err(KernelError::Rejected);
        }

        let total = ledger.total_messages();
        let incremented = total.checked_add(1).ok_or(KernelError::Overflow)?;

        Ok(AdmissionPlan {
            action: select(accepted, PendingAction::new(sender, *payload), PendingAction::EMPTY),
            total_messages: select(accepted, incremented, total),
            event: LedgerEvent::received_message_from(select(accepted, sender, Identity::EMPTY)),
            outcome: select(accepted, Admission::Accepted, Admission::Masked),
        })
    }
}
