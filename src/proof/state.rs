// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Public input and output of a proof step.

use serde::{Serialize, Deserialize};
use crate::error::{KernelError, Result};

/// Public input of a step.
///
/// - `offset`: committed message count the chain started from (fixed for the chain)
/// - `current`: sequence number the step claims to validate
/// - `prev`: last sequence number the chain has fully accepted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ValidationState {
    pub offset: u64,
    pub current: u64,
    pub prev: u64,
}

impl ValidationState {
    pub fn new(offset: u64, current: u64, prev: u64) -> Self {
        Self { offset, current, prev }
    }

    /// Chain start at a committed count: `offset == current == prev`.
    pub fn genesis(offset: u64) -> Self {
        Self { offset, current: offset, prev: offset }
    }

    pub fn is_initial(&self) -> bool {
        self.offset == self.current && self.current == self.prev
    }

    /// State for validating the next sequence number after `prev`.
    pub fn advance(&self) -> Result<Self> {
        let current = self.prev.checked_add(1).ok_or(KernelError::Overflow)?;
        Ok(Self { offset: self.offset, current, prev: self.prev })
    }

    /// State for re-checking an already accepted sequence number.
    pub fn hold(&self) -> Self {
        Self { offset: self.offset, current: self.prev, prev: self.prev }
    }

    /// State after accepting `current`.
    pub fn finalize(&self) -> Self {
        Self { offset: self.offset, current: self.current, prev: self.current }
    }

    pub fn to_le_bytes(&self) -> [u8; 24] {
        let mut out = [0u8; 24];
        out[0..8].copy_from_slice(&self.offset.to_le_bytes());
        out[8..16].copy_from_slice(&self.current.to_le_bytes());
        out[16..24].copy_from_slice(&self.prev.to_le_bytes());
        out
    }
}

/// Public output of a step: which validation branch accepted the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_agent_zero: bool,
    pub is_sno_greater: bool,
    pub is_message_valid: bool,
}

impl ValidationOutcome {
    pub const ZERO: ValidationOutcome = ValidationOutcome {
        is_agent_zero: false,
        is_sno_greater: false,
        is_message_valid: false,
    };

    pub fn agent_zero() -> Self {
        Self { is_agent_zero: true, ..Self::ZERO }
    }

    pub fn sno_greater() -> Self {
        Self { is_sno_greater: true, ..Self::ZERO }
    }

    pub fn message_valid() -> Self {
        Self { is_message_valid: true, ..Self::ZERO }
    }

    pub fn any(&self) -> bool {
        self.is_agent_zero | self.is_sno_greater | self.is_message_valid
    }

    pub fn is_zero(&self) -> bool {
        !self.any()
    }

    pub fn to_bits(&self) -> u8 {
        (self.is_agent_zero as u8) | ((self.is_sno_greater as u8) << 1) | ((self.is_message_valid as u8) << 2)
    }
}
