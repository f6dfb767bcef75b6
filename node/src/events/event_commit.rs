// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Operation Commit - The Safety Wall
//!
//! Commit barrier:
//! 1. Shadow execution on a clone of the live network
//! 2. Operation persisted to disk (fsync)
//! 3. Commit boundary (journal)
//! 4. Live state replaced by the shadow
//!
//! If ANY step fails, the buffer is rolled back and live state is unchanged.
//! An operation the kernel rejects never reaches the log, so replay only ever
//! sees operations that applied cleanly.

use spynet_kernel::error::KernelError;
use spynet_kernel::event::Operation;
use spynet_kernel::network::{Outcome, SpyNetwork};
use crate::events::event_journal::EventJournal;
use crate::events::event_log::{EventLogError, EventLogWriter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),
}

pub type Result<T> = std::result::Result<T, CommitError>;

/// Result of a commit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitResult {
    /// Operation applied and (if a log is configured) durably recorded
    Committed(Outcome),

    /// Kernel rejected the operation; nothing changed
    RolledBack(KernelError),
}

/// Owns the live network and enforces the commit barrier.
pub struct EventCommitter {
    /// Durable storage; `None` runs in memory only
    event_log: Option<EventLogWriter>,

    journal: EventJournal,

    live_state: SpyNetwork,
}

impl EventCommitter {
    pub fn new(
        event_log: Option<EventLogWriter>,
        journal: EventJournal,
        live_state: SpyNetwork,
    ) -> Self {
        Self {
            event_log,
            journal,
            live_state,
        }
    }

    /// Commit an operation (the ONLY way to mutate state)
    ///
    /// Returns:
    /// - `Ok(CommitResult::Committed)` if successful
    /// - `Ok(CommitResult::RolledBack)` if the kernel rejected it (safe failure)
    /// - `Err(_)` if persistence failed (critical failure, state unchanged)
    pub fn commit(&mut self, op: Operation) -> Result<CommitResult> {
        self.journal.append_buffered(op.clone());

        let mut shadow = self.live_state.clone();
        let outcome = match shadow.apply(&op) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!("Shadow apply of {} rejected: {}", op.kind(), e);
                self.journal.rollback_buffer();
                return Ok(CommitResult::RolledBack(e));
            }
        };

        if let Some(log) = self.event_log.as_mut() {
            if let Err(e) = log.append(&op) {
                tracing::error!("Failed to persist {}: {}. Rolling back.", op.kind(), e);
                self.journal.rollback_buffer();
                return Err(e.into());
            }
        }

        // COMMIT BOUNDARY
        self.journal.commit_buffer();
        self.live_state = shadow;

        tracing::debug!("Operation committed: {}", op.kind());
        Ok(CommitResult::Committed(outcome))
    }

    pub fn live_state(&self) -> &SpyNetwork {
        &self.live_state
    }

    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    pub fn event_log(&self) -> Option<&EventLogWriter> {
        self.event_log.as_ref()
    }
}
