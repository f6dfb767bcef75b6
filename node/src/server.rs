// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

pub use crate::engine::SharedEngine;
use crate::api::*;
use crate::engine;
use crate::errors::EngineError;

pub fn build_router(state: SharedEngine) -> Router {
    Router::new()
        .route("/v1/users", post(add_user))
        .route("/v1/messages", post(send_message))
        .route("/v1/proofs", post(prove))
        .route("/v1/commit", post(commit))
        .route("/v1/epochs", post(start_epoch))
        .route("/v1/state", get(get_state))
        .route("/v1/actions", get(get_actions))
        .route("/v1/events", get(get_events))
        // Observability
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn add_user(
    State(state): State<SharedEngine>,
    Json(req): Json<AddUserRequest>,
) -> Result<Json<OperationResponse>, EngineError> {
    let candidate = parse_identity("candidate", &req.candidate)?;
    let auth = req.auth.to_auth()?;

    let mut engine = state.lock().await;
    let outcome = engine.add_user(candidate, auth)?;
    Ok(Json(outcome.into()))
}

async fn send_message(
    State(state): State<SharedEngine>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<OperationResponse>, EngineError> {
    let payload = parse_payload(&req.payload)?;
    let auth = req.auth.to_auth()?;

    let mut engine = state.lock().await;
    let outcome = engine.send_message(payload, auth)?;
    Ok(Json(outcome.into()))
}

async fn prove(
    State(state): State<SharedEngine>,
    Json(req): Json<ProveRequest>,
) -> Result<Json<ProveResponse>, EngineError> {
    let proof = engine::prove(&state, req.messages).await?;

    let tip = proof.tip().ok_or(EngineError::Internal)?;
    let response = ProveResponse {
        offset: tip.public_input.offset,
        current: tip.public_input.current,
        prev: tip.public_input.prev,
        steps: proof.len(),
        tip_attestation: hex::encode(tip.attestation.as_bytes()),
        proof,
    };
    Ok(Json(response))
}

async fn commit(
    State(state): State<SharedEngine>,
    Json(req): Json<CommitRequest>,
) -> Result<Json<OperationResponse>, EngineError> {
    let auth = req.auth.to_auth()?;

    let mut engine = state.lock().await;
    let outcome = engine.set_message_count(req.proof, auth)?;
    Ok(Json(outcome.into()))
}

async fn start_epoch(
    State(state): State<SharedEngine>,
    Json(req): Json<StartEpochRequest>,
) -> Result<Json<OperationResponse>, EngineError> {
    let auth = req.auth.to_auth()?;

    let mut engine = state.lock().await;
    let outcome = engine.start_epoch(req.epoch, auth)?;
    Ok(Json(outcome.into()))
}

async fn get_state(State(state): State<SharedEngine>) -> Json<StateResponse> {
    let engine = state.lock().await;
    let network = engine.network();
    let ledger = network.ledger();

    Json(StateResponse {
        total_users: ledger.total_users(),
        total_messages: ledger.total_messages(),
        message_count: ledger.message_count(),
        epoch: network.log().epoch(),
        pending_actions: network.log().len(),
        operations: engine.operation_count(),
        admin: hex::encode(network.admin().as_bytes()),
        state_hash: hex::encode(engine.state_hash()),
    })
}

async fn get_actions(State(state): State<SharedEngine>) -> Json<ActionsResponse> {
    let engine = state.lock().await;
    let log = engine.network().log();

    Json(ActionsResponse {
        epoch: log.epoch(),
        capacity: log.capacity(),
        actions: log.actions().iter().map(ActionView::from).collect(),
    })
}

async fn get_events(State(state): State<SharedEngine>) -> Json<EventsResponse> {
    let engine = state.lock().await;
    Json(EventsResponse {
        events: engine.network().events().iter().map(EventView::from).collect(),
    })
}

async fn metrics_handler() -> String {
    crate::telemetry::get_metrics()
}
