// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Agent message details.

use serde::{Serialize, Deserialize};
use crate::config::{AGENT_ID_MAX, X_MAX, Y_MAX, Y_MIN};
use crate::error::{KernelError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Message {
    pub sequence_number: u64,
    pub agent_id: u64,
    pub x: u64,
    pub y: u64,
    pub checksum: u64,
}

impl Message {
    pub fn new(sequence_number: u64, agent_id: u64, x: u64, y: u64, checksum: u64) -> Self {
        Self { sequence_number, agent_id, x, y, checksum }
    }

    /// `checksum == agent_id + x + y`, with overflow counting as a mismatch.
    pub fn checksum_holds(&self) -> bool {
        self.agent_id
            .checked_add(self.x)
            .and_then(|s| s.checked_add(self.y))
            .map_or(false, |sum| sum == self.checksum)
    }

    /// Full field-validity predicate. Every clause is evaluated.
    pub fn is_valid(&self) -> bool {
        let agent_in_range = (self.agent_id > 0) & (self.agent_id < AGENT_ID_MAX);
        let x_in_range = (self.x > 0) & (self.x < X_MAX);
        let y_in_range = (self.y > Y_MIN) & (self.y < Y_MAX);
        let ordered = self.y > self.x;

        self.checksum_holds() & agent_in_range & x_in_range & y_in_range & ordered
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(KernelError::InvalidMessage)
        }
    }

    /// Canonical byte encoding used for witness commitments.
    pub fn to_le_bytes(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        out[0..8].copy_from_slice(&self.sequence_number.to_le_bytes());
        out[8..16].copy_from_slice(&self.agent_id.to_le_bytes());
        out[16..24].copy_from_slice(&self.x.to_le_bytes());
        out[24..32].copy_from_slice(&self.y.to_le_bytes());
        out[32..40].copy_from_slice(&self.checksum.to_le_bytes());
        out
    }
}
