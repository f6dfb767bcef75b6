// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! HTTP request and response bodies.
//!
//! Identities, signatures and payloads travel as lowercase hex. Payloads are
//! 32 little-endian bytes.

use serde::{Deserialize, Serialize};
use spynet_kernel::action::PendingAction;
use spynet_kernel::auth::Authorization;
use spynet_kernel::event::LedgerEvent;
use spynet_kernel::network::Outcome;
use spynet_kernel::proof::ChainProof;
use spynet_kernel::types::field::Payload;
use spynet_kernel::types::id::{Identity, Signature};
use spynet_kernel::types::message::Message;
use crate::errors::EngineError;

pub fn decode_hex<const N: usize>(field: &str, value: &str) -> Result<[u8; N], EngineError> {
    let bytes = hex::decode(value.trim())
        .map_err(|e| EngineError::InvalidInput(format!("{field}: {e}")))?;
    bytes
        .try_into()
        .map_err(|_| EngineError::InvalidInput(format!("{field}: expected {N} bytes")))
}

pub fn parse_identity(field: &str, value: &str) -> Result<Identity, EngineError> {
    decode_hex::<32>(field, value).map(Identity)
}

pub fn parse_payload(value: &str) -> Result<Payload, EngineError> {
    Payload::from_le_bytes(decode_hex::<32>("payload", value)?)
        .map_err(|_| EngineError::InvalidInput("payload: bit 255 must be clear".to_string()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationDto {
    pub signer: String,
    pub signature: String,
}

impl AuthorizationDto {
    pub fn from_auth(auth: &Authorization) -> Self {
        Self {
            signer: hex::encode(auth.signer.as_bytes()),
            signature: hex::encode(auth.signature.as_bytes()),
        }
    }

    pub fn to_auth(&self) -> Result<Authorization, EngineError> {
        Ok(Authorization {
            signer: parse_identity("signer", &self.signer)?,
            signature: Signature(decode_hex::<64>("signature", &self.signature)?),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddUserRequest {
    pub candidate: String,
    pub auth: AuthorizationDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub payload: String,
    pub auth: AuthorizationDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProveRequest {
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProveResponse {
    pub proof: ChainProof,
    pub offset: u64,
    pub current: u64,
    pub prev: u64,
    pub steps: usize,
    /// The digest an admin signs to commit this proof.
    pub tip_attestation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRequest {
    pub proof: ChainProof,
    pub auth: AuthorizationDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartEpochRequest {
    pub epoch: u64,
    pub auth: AuthorizationDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    pub outcome: String,
    pub message_count: Option<u64>,
    pub epoch: Option<u64>,
    pub drained: Option<usize>,
}

impl From<Outcome> for OperationResponse {
    fn from(outcome: Outcome) -> Self {
        use spynet_kernel::admission::Admission;
        use spynet_kernel::enrollment::Enrollment;

        let mut response = OperationResponse {
            outcome: String::new(),
            message_count: None,
            epoch: None,
            drained: None,
        };
        response.outcome = match outcome {
            Outcome::Enrollment(Enrollment::Enrolled) => "enrolled",
            Outcome::Enrollment(Enrollment::AlreadyEnrolled) => "already_enrolled",
            Outcome::Admission(Admission::Accepted) => "accepted",
            Outcome::Admission(Admission::Masked) => "masked",
            Outcome::Committed { message_count } => {
                response.message_count = Some(message_count);
                "committed"
            }
            Outcome::EpochStarted { epoch, drained } => {
                response.epoch = Some(epoch);
                response.drained = Some(drained);
                "epoch_started"
            }
        }
        .to_string();
        response
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    pub total_users: u64,
    pub total_messages: u64,
    pub message_count: u64,
    pub epoch: u64,
    pub pending_actions: usize,
    pub operations: u64,
    pub admin: String,
    pub state_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionView {
    pub identity: String,
    pub payload: String,
}

impl From<&PendingAction> for ActionView {
    fn from(action: &PendingAction) -> Self {
        Self {
            identity: hex::encode(action.identity.as_bytes()),
            payload: hex::encode(action.payload.as_bytes()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsResponse {
    pub epoch: u64,
    pub capacity: usize,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    pub topic: String,
    pub identity: String,
}

impl From<&LedgerEvent> for EventView {
    fn from(event: &LedgerEvent) -> Self {
        Self {
            topic: event.topic.as_str().to_string(),
            identity: hex::encode(event.identity.as_bytes()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<EventView>,
}
