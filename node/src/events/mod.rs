// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Operation-Sourced Persistence Layer
//!
//! # Architecture
//! - Operation Log = Primary truth (append-only, durable)
//! - Journal = Runtime state (buffer + committed)
//!
//! # Guarantees
//! - Only operations that applied cleanly are logged
//! - Operations are fsync'd before they become visible
//! - Crash-symmetric recovery via replay
//! - No partial commits

pub mod event_log;
pub mod event_journal;
pub mod event_replay;
pub mod event_commit;

pub use event_log::EventLogWriter;
pub use event_journal::EventJournal;
pub use event_replay::recover_from_event_log;
pub use event_commit::{CommitResult, EventCommitter};
