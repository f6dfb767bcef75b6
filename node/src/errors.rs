// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use spynet_kernel::error::KernelError;
use thiserror::Error;
use crate::events::event_commit::CommitError;
use crate::events::event_log::EventLogError;
use crate::events::event_replay::ReplayError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Kernel error: {0}")]
    Kernel(KernelError),
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),
    #[error("Recovery error: {0}")]
    Replay(#[from] ReplayError),
    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal server error")]
    Internal,
}

impl EngineError {
    pub fn status(&self) -> StatusCode {
        match self {
            EngineError::Kernel(k_err) => match k_err {
                KernelError::Unauthorized => StatusCode::UNAUTHORIZED,
                KernelError::CapacityExceeded => StatusCode::INSUFFICIENT_STORAGE,
                KernelError::ActionLogFull | KernelError::StaleCommit => StatusCode::CONFLICT,
                KernelError::NoProgress
                | KernelError::InvalidMessage
                | KernelError::UnvalidatedMessage
                | KernelError::InvalidState
                | KernelError::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
                KernelError::InvalidProof | KernelError::InvalidInput => StatusCode::BAD_REQUEST,
                KernelError::NotFound => StatusCode::NOT_FOUND,
                KernelError::Overflow => StatusCode::INTERNAL_SERVER_ERROR,
            },
            EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EngineError::Commit(_)
            | EngineError::Replay(_)
            | EngineError::EventLog(_)
            | EngineError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            EngineError::Kernel(k_err) => k_err.to_string(),
            EngineError::InvalidInput(msg) => msg.clone(),
            // Storage details stay in the server log.
            other => {
                tracing::error!("{}", other);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<KernelError> for EngineError {
    fn from(e: KernelError) -> Self {
        EngineError::Kernel(e)
    }
}
