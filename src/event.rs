// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Operations and Ledger Events
//!
//! Every state transition of a network is expressed as an [`Operation`]. A host
//! persists accepted operations in order; replaying them against a fresh network
//! with the same configuration reproduces the same state.
//!
//! # Determinism Guarantees
//! - No timestamps
//! - No randomness
//! - Operations carry their own authorization, so replay re-verifies them
//!
//! [`LedgerEvent`]s are the observable stream emitted while applying operations.

use alloc::vec::Vec;
use serde::{Serialize, Deserialize};
use crate::auth::Authorization;
use crate::config::RECEIVED_MESSAGE_TOPIC;
use crate::error::{KernelError, Result};
use crate::proof::verify::ChainProof;
use crate::types::field::Payload;
use crate::types::id::Identity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    ReceivedMessageFrom,
}

impl EventTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventTopic::ReceivedMessageFrom => RECEIVED_MESSAGE_TOPIC,
        }
    }
}

/// Emitted once per `send_message`. A masked send carries the empty identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub topic: EventTopic,
    pub identity: Identity,
}

impl LedgerEvent {
    pub fn received_message_from(identity: Identity) -> Self {
        Self { topic: EventTopic::ReceivedMessageFrom, identity }
    }

    pub fn is_masked(&self) -> bool {
        self.identity.is_empty()
    }
}

/// A mutating call against the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    AddUser {
        candidate: Identity,
        auth: Authorization,
    },
    SendMessage {
        payload: Payload,
        auth: Authorization,
    },
    SetMessageCount {
        proof: ChainProof,
        auth: Authorization,
    },
    /// Opens epoch `epoch`, draining the pending log.
    StartEpoch {
        epoch: u64,
        auth: Authorization,
    },
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::AddUser { .. } => "add_user",
            Operation::SendMessage { .. } => "send_message",
            Operation::SetMessageCount { .. } => "set_message_count",
            Operation::StartEpoch { .. } => "start_epoch",
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|_| KernelError::InvalidInput)
    }

    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|_| KernelError::InvalidInput)
    }
}
