// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Message payload as a 255-bit field element.

use serde::{Serialize, Deserialize};
use crate::error::{KernelError, Result};

/// Number of usable bits in a payload.
pub const PAYLOAD_BITS: usize = 255;

/// A field element stored as 32 little-endian bytes.
///
/// Bit `i` is bit `i % 8` of byte `i / 8`, so the flag bits 249..=254 live in the
/// last byte. Bit 255 is outside the field and always reads as clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Payload(pub [u8; 32]);

impl Payload {
    pub const EMPTY: Payload = Payload([0u8; 32]);

    /// Builds a payload from little-endian bytes, rejecting values with bit 255 set.
    pub fn from_le_bytes(bytes: [u8; 32]) -> Result<Self> {
        if bytes[31] & 0x80 != 0 {
            return Err(KernelError::InvalidInput);
        }
        Ok(Payload(bytes))
    }

    pub fn from_u128(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&value.to_le_bytes());
        Payload(bytes)
    }

    pub fn empty() -> Self {
        Self::EMPTY
    }

    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Reads bit `index`. Indices past the payload width read as clear.
    pub fn bit(&self, index: usize) -> bool {
        if index >= PAYLOAD_BITS {
            return false;
        }
        (self.0[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Returns a copy with bit `index` set to `value`.
    pub fn with_bit(mut self, index: usize, value: bool) -> Self {
        if index >= PAYLOAD_BITS {
            return self;
        }
        let mask = 1u8 << (index % 8);
        let byte = &mut self.0[index / 8];
        *byte = (*byte & !mask) | ((value as u8) << (index % 8));
        self
    }
}
