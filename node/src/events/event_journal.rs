// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Operation Journal - Runtime State Management
//!
//! Maintains the distinction between:
//! - **committed** = canonical truth (durably logged)
//! - **buffer** = shadow execution (pending commit)
//!
//! # Flow
//! 1. append_buffered() - add to shadow
//! 2. commit_buffer() - promote to truth
//! 3. rollback_buffer() - discard on failure

use spynet_kernel::event::Operation;

#[derive(Clone, Debug, Default)]
pub struct EventJournal {
    /// Committed operations (canonical truth)
    committed: Vec<Operation>,

    /// Buffered operations (shadow execution, not yet truth)
    buffer: Vec<Operation>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a journal from committed operations (recovery scenario)
    pub fn from_committed(operations: Vec<Operation>) -> Self {
        Self {
            committed: operations,
            buffer: Vec::new(),
        }
    }

    pub fn append_buffered(&mut self, op: Operation) {
        self.buffer.push(op);
    }

    /// Promotes buffered operations to canonical truth.
    ///
    /// Only call once the operations are durably written and applied.
    pub fn commit_buffer(&mut self) {
        self.committed.append(&mut self.buffer);
    }

    pub fn rollback_buffer(&mut self) {
        self.buffer.clear();
    }

    pub fn committed(&self) -> &[Operation] {
        &self.committed
    }

    pub fn committed_height(&self) -> u64 {
        self.committed.len() as u64
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn has_pending_buffer(&self) -> bool {
        !self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spynet_kernel::auth::Authorization;
    use spynet_kernel::types::field::Payload;
    use spynet_kernel::types::id::{Identity, Signature};

    fn op(v: u128) -> Operation {
        Operation::SendMessage {
            payload: Payload::from_u128(v),
            auth: Authorization { signer: Identity([7; 32]), signature: Signature::default() },
        }
    }

    #[test]
    fn test_journal_buffer_commit() {
        let mut journal = EventJournal::new();
        journal.append_buffered(op(1));

        assert_eq!(journal.buffer_size(), 1);
        assert_eq!(journal.committed_height(), 0);

        journal.commit_buffer();

        assert!(!journal.has_pending_buffer());
        assert_eq!(journal.committed_height(), 1);
        assert_eq!(journal.committed(), &[op(1)]);
    }

    #[test]
    fn test_journal_buffer_rollback() {
        let mut journal = EventJournal::from_committed(vec![op(1), op(2)]);
        journal.append_buffered(op(3));
        journal.rollback_buffer();

        assert_eq!(journal.buffer_size(), 0);
        assert_eq!(journal.committed_height(), 2);
    }
}
