// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::flags::{flags_valid, MessageFlags};
use crate::types::field::Payload;

fn with_flags(bits: &[usize]) -> Payload {
    bits.iter().fold(Payload::from_u128(0x1234_5678), |p, &b| p.with_bit(b, true))
}

#[test]
fn test_named_patterns() {
    // Flag 1 alone passes rule A
    assert!(flags_valid(&with_flags(&[249])));
    // Flag 1 with flag 2 fails rule A
    assert!(!flags_valid(&with_flags(&[249, 250])));
    // Flag 2 without flag 3 fails rule B
    assert!(!flags_valid(&with_flags(&[250])));
    assert!(flags_valid(&with_flags(&[250, 251])));
    // Flag 4 with flag 5 fails rule C
    assert!(!flags_valid(&with_flags(&[252, 253])));
    assert!(!flags_valid(&with_flags(&[252, 254])));
    assert!(flags_valid(&with_flags(&[252])));
    // No flags at all is well formed
    assert!(flags_valid(&with_flags(&[])));
}

#[test]
fn test_truth_table_matches_rules() {
    let mut passing = 0;
    for mask in 0u8..64 {
        let f = |n: u8| (mask >> (n - 1)) & 1 == 1;

        let rule_a = !f(1) || (mask & 0b11_1110) == 0;
        let rule_b = !f(2) || f(3);
        let rule_c = !f(4) || (!f(5) && !f(6));
        let expected = rule_a && rule_b && rule_c;

        let payload = MessageFlags(mask).apply_to(Payload::from_u128(u128::MAX));
        assert_eq!(MessageFlags::from_payload(&payload), MessageFlags(mask));
        assert_eq!(flags_valid(&payload), expected, "mask {:06b}", mask);

        if expected {
            passing += 1;
        }
    }
    // flag 1 clear: 3 choices for flags 2/3, 5 for flags 4..=6. flag 1 set: 1.
    assert_eq!(passing, 16);
}

#[test]
fn test_flag_six_is_most_significant() {
    let p = MessageFlags(0b10_0000).apply_to(Payload::EMPTY);
    assert!(p.bit(254));
    assert_eq!(p.0[31], 0b0100_0000);
}
