// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The network: ledger counters, the pending action log and the event stream.
//!
//! Every operation is all-or-nothing. Effects are planned against the current
//! state first and applied only when the whole plan succeeded.

use alloc::vec::Vec;
use crate::action::{ActionLog, PendingAction};
use crate::admission::{Admission, MessageAdmission};
use crate::auth::{require_signer, start_epoch_digest, Authorization, Ed25519Verifier, SignatureVerifier};
use crate::config::NetworkConfig;
use crate::enrollment::{Enrollment, EnrollmentProcessor};
use crate::error::{KernelError, Result};
use crate::event::{LedgerEvent, Operation};
use crate::fold::ActionFold;
use crate::ledger::{LedgerCommitProtocol, LedgerState};
use crate::proof::attest::ProgramKey;
use crate::proof::verify::ChainProof;
use crate::types::field::Payload;
use crate::types::id::Identity;

/// Result of applying an [`Operation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Enrollment(Enrollment),
    Admission(Admission),
    Committed { message_count: u64 },
    EpochStarted { epoch: u64, drained: usize },
}

/// What a closed epoch hands to the external reconciler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpochHandoff {
    pub actions: Vec<PendingAction>,
    pub events: Vec<LedgerEvent>,
}

#[derive(Clone, Debug)]
pub struct SpyNetwork<V: SignatureVerifier = Ed25519Verifier> {
    config: NetworkConfig,
    admin: Identity,
    program_key: ProgramKey,
    verifier: V,
    ledger: LedgerState,
    log: ActionLog,
    events: Vec<LedgerEvent>,
}

impl SpyNetwork<Ed25519Verifier> {
    pub fn new(config: NetworkConfig, admin: Identity, program_key: ProgramKey) -> Self {
        Self::with_verifier(config, admin, program_key, Ed25519Verifier)
    }
}

impl<V: SignatureVerifier> SpyNetwork<V> {
    pub fn with_verifier(config: NetworkConfig, admin: Identity, program_key: ProgramKey, verifier: V) -> Self {
        Self {
            config,
            admin,
            program_key,
            verifier,
            ledger: LedgerState::new(),
            log: ActionLog::new(config.max_pending_actions),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    pub fn program_key(&self) -> &ProgramKey {
        &self.program_key
    }

    pub fn ledger(&self) -> &LedgerState {
        &self.ledger
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    fn fold(&self) -> ActionFold {
        ActionFold::new(self.config.max_pending_actions)
    }

    /// Enrolls `candidate`. Admin only.
    pub fn add_user(&mut self, candidate: &Identity, auth: &Authorization) -> Result<Enrollment> {
        let plan = EnrollmentProcessor::new(self.config.max_users, self.fold())
            .plan(&self.ledger, &self.log, &self.verifier, &self.admin, candidate, auth)?;

        self.log.append(plan.action)?;
        self.ledger.set_total_users(plan.total_users);
        Ok(plan.outcome)
    }

    /// Submits a payload signed by its sender.
    pub fn send_message(&mut self, payload: &Payload, auth: &Authorization) -> Result<Admission> {
        let plan = MessageAdmission::new(self.fold(), self.config.admission)
            .plan(&self.ledger, &self.log, &self.verifier, payload, auth)?;

        self.log.append(plan.action)?;
        self.ledger.set_total_messages(plan.total_messages);
        self.events.push(plan.event);
        Ok(plan.outcome)
    }

    /// Commits a proven message count. Admin only.
    pub fn set_message_count(&mut self, proof: &ChainProof, auth: &Authorization) -> Result<u64> {
        LedgerCommitProtocol::new(&self.verifier, &self.admin, &self.program_key)
            .commit(&mut self.ledger, proof, auth)
    }

    pub fn apply(&mut self, op: &Operation) -> Result<Outcome> {
        match op {
            Operation::AddUser { candidate, auth } => {
                self.add_user(candidate, auth).map(Outcome::Enrollment)
            }
            Operation::SendMessage { payload, auth } => {
                self.send_message(payload, auth).map(Outcome::Admission)
            }
            Operation::SetMessageCount { proof, auth } => self
                .set_message_count(proof, auth)
                .map(|message_count| Outcome::Committed { message_count }),
            Operation::StartEpoch { epoch, auth } => self
                .rotate_epoch(*epoch, auth)
                .map(|handoff| Outcome::EpochStarted { epoch: *epoch, drained: handoff.actions.len() }),
        }
    }

    /// Closes the epoch and hands its actions and events to the reconciler.
    ///
    /// Counters are not reset. Live state stays bounded by one epoch.
    pub fn start_epoch(&mut self) -> EpochHandoff {
        EpochHandoff {
            actions: self.log.start_epoch(),
            events: core::mem::take(&mut self.events),
        }
    }

    /// Admin-signed [`start_epoch`](Self::start_epoch). `epoch` must be the next epoch number.
    pub fn rotate_epoch(&mut self, epoch: u64, auth: &Authorization) -> Result<EpochHandoff> {
        require_signer(&self.verifier, auth, &self.admin, &start_epoch_digest(epoch))?;
        if self.log.epoch().checked_add(1) != Some(epoch) {
            return Err(KernelError::InvalidInput);
        }
        Ok(self.start_epoch())
    }
}
