// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Host engine: the live network behind the commit barrier.

use spynet_kernel::admission::Admission;
use spynet_kernel::auth::Authorization;
use spynet_kernel::event::Operation;
use spynet_kernel::network::{Outcome, SpyNetwork};
use spynet_kernel::proof::{prove_messages, ChainProof, ProgramKey};
use spynet_kernel::types::field::Payload;
use spynet_kernel::types::id::Identity;
use spynet_kernel::types::message::Message;
use spynet_kernel::verify::network_state_hash;

use crate::config::NodeConfig;
use crate::errors::EngineError;
use crate::events::{recover_from_event_log, CommitResult, EventCommitter, EventJournal, EventLogWriter};

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

pub type SharedEngine = Arc<Mutex<Engine>>;

pub struct Engine {
    committer: EventCommitter,
    config: NodeConfig,
}

impl Engine {
    /// Builds the engine, replaying the operation log first when one exists.
    pub fn new(cfg: &NodeConfig) -> Result<Self, EngineError> {
        let fresh = SpyNetwork::new(cfg.network, cfg.admin_identity, cfg.program_key());
        if cfg.admin_identity.is_empty() {
            tracing::warn!("No admin identity configured. Enrollment and commits are disabled.");
        }

        let committer = match &cfg.event_log_path {
            Some(path) => {
                let has_history = std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
                let (network, journal) = if has_history {
                    let start = Instant::now();
                    let (network, journal, count) = recover_from_event_log(path, fresh)?;
                    metrics::histogram!("spynet_replay_duration_seconds", start.elapsed().as_secs_f64());
                    tracing::info!("Recovered {} operations from {:?}", count, path);
                    (network, journal)
                } else {
                    (fresh, EventJournal::new())
                };
                let log = EventLogWriter::open(path)?;
                EventCommitter::new(Some(log), journal, network)
            }
            None => {
                tracing::warn!("No operation log configured. State will not survive a restart.");
                EventCommitter::new(None, EventJournal::new(), fresh)
            }
        };

        Ok(Self { committer, config: cfg.clone() })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Commits one operation through the barrier.
    pub fn submit(&mut self, op: Operation) -> Result<Outcome, EngineError> {
        let kind = op.kind();
        match self.committer.commit(op)? {
            CommitResult::Committed(outcome) => {
                metrics::counter!("spynet_operations_total", 1, "kind" => kind);
                match outcome {
                    Outcome::Admission(Admission::Masked) => {
                        metrics::counter!("spynet_masked_messages_total", 1);
                        tracing::warn!("Message admitted as a masked entry");
                    }
                    Outcome::Committed { message_count } => {
                        metrics::counter!("spynet_commits_total", 1);
                        tracing::info!("Message count committed: {}", message_count);
                    }
                    Outcome::EpochStarted { epoch, drained } => {
                        tracing::info!("Epoch {} started, {} actions handed off", epoch, drained);
                    }
                    _ => {}
                }
                Ok(outcome)
            }
            CommitResult::RolledBack(e) => {
                metrics::counter!("spynet_operations_rejected_total", 1, "kind" => kind);
                tracing::debug!("{} rejected: {}", kind, e);
                Err(EngineError::Kernel(e))
            }
        }
    }

    pub fn add_user(&mut self, candidate: Identity, auth: Authorization) -> Result<Outcome, EngineError> {
        self.submit(Operation::AddUser { candidate, auth })
    }

    pub fn send_message(&mut self, payload: Payload, auth: Authorization) -> Result<Outcome, EngineError> {
        self.submit(Operation::SendMessage { payload, auth })
    }

    pub fn set_message_count(&mut self, proof: ChainProof, auth: Authorization) -> Result<Outcome, EngineError> {
        self.submit(Operation::SetMessageCount { proof, auth })
    }

    pub fn start_epoch(&mut self, epoch: u64, auth: Authorization) -> Result<Outcome, EngineError> {
        self.submit(Operation::StartEpoch { epoch, auth })
    }

    pub fn network(&self) -> &SpyNetwork {
        self.committer.live_state()
    }

    pub fn state_hash(&self) -> [u8; 32] {
        network_state_hash(self.network())
    }

    /// Committed operations since the log was created.
    pub fn operation_count(&self) -> u64 {
        self.committer.journal().committed_height()
    }

    /// What a prover needs: the program key and the committed count to start from.
    pub fn prove_inputs(&self) -> (ProgramKey, u64) {
        let network = self.network();
        (network.program_key().clone(), network.ledger().message_count())
    }
}

/// Proves `messages` on top of the committed count.
///
/// Batches longer than `max_prove_messages` are refused before any work starts.
/// Proving runs on the blocking pool without holding the engine lock.
pub async fn prove(engine: &SharedEngine, messages: Vec<Message>) -> Result<ChainProof, EngineError> {
    let (key, offset) = {
        let engine = engine.lock().await;
        let limit = engine.config().max_prove_messages;
        if messages.len() > limit {
            return Err(EngineError::InvalidInput(format!(
                "{} messages exceeds the batch limit of {}",
                messages.len(),
                limit
            )));
        }
        engine.prove_inputs()
    };

    let start = Instant::now();
    let proof = tokio::task::spawn_blocking(move || prove_messages(key, offset, &messages))
        .await
        .map_err(|e| {
            tracing::error!("Prover task failed: {}", e);
            EngineError::Internal
        })??;

    metrics::histogram!("spynet_prove_duration_seconds", start.elapsed().as_secs_f64());
    metrics::counter!("spynet_proof_steps_total", proof.len() as u64);
    Ok(proof)
}
