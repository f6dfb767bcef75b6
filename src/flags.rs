// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Message flag format.
//!
//! The six high-order payload bits carry flags 1..=6:
//!
//! ```text
//! flag 1 = bit 249    flag 4 = bit 252
//! flag 2 = bit 250    flag 5 = bit 253
//! flag 3 = bit 251    flag 6 = bit 254
//! ```
//!
//! A payload is well-formed iff:
//! - flag 1 set  => flags 2..=6 clear
//! - flag 2 set  => flag 3 set
//! - flag 4 set  => flags 5 and 6 clear
//!
//! No other bits are inspected.

use crate::config::{FLAG_BIT_BASE, FLAG_COUNT};
use crate::select::{all, implies};
use crate::types::field::Payload;

/// The six flag bits, flag 1 in bit 0 of the mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MessageFlags(pub u8);

impl MessageFlags {
    pub fn from_payload(payload: &Payload) -> Self {
        let mut mask = 0u8;
        for i in 0..FLAG_COUNT {
            mask |= (payload.bit(FLAG_BIT_BASE + i) as u8) << i;
        }
        MessageFlags(mask)
    }

    /// Flag `n`, 1-based.
    pub fn flag(&self, n: usize) -> bool {
        (self.0 >> (n - 1)) & 1 == 1
    }

    /// Writes these flags into the top bits of `payload`, leaving the rest untouched.
    pub fn apply_to(&self, payload: Payload) -> Payload {
        (0..FLAG_COUNT).fold(payload, |p, i| p.with_bit(FLAG_BIT_BASE + i, self.flag(i + 1)))
    }

    pub fn is_valid(&self) -> bool {
        let f = |n| self.flag(n);

        let rule_a = implies(f(1), all(&[!f(2), !f(3), !f(4), !f(5), !f(6)]));
        let rule_b = implies(f(2), f(3));
        let rule_c = implies(f(4), !f(5) & !f(6));

        rule_a & rule_b & rule_c
    }
}

/// FlagAutomaton: `true` iff the payload's flag bits are well-formed.
pub fn flags_valid(payload: &Payload) -> bool {
    MessageFlags::from_payload(payload).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_bits_ignored() {
        let p = Payload([0xFF; 32]);
        // all six flags set: fails rule A
        assert!(!flags_valid(&p));

        let only_low = MessageFlags(0).apply_to(Payload([0xFF; 32]));
        assert!(flags_valid(&only_low));
    }
}
