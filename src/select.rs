// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Value selection instead of control flow.
//!
//! Folds and predicates that must keep a data-independent evaluation shape pick
//! between values with [`select`] rather than branching on the condition. Both
//! candidates are always computed by the caller.

/// Returns `if_true` when `condition` holds, `if_false` otherwise.
#[inline]
pub fn select<T: Copy>(condition: bool, if_true: T, if_false: T) -> T {
    [if_false, if_true][condition as usize]
}

/// `antecedent -> consequent`, evaluated without short-circuiting.
#[inline]
pub fn implies(antecedent: bool, consequent: bool) -> bool {
    select(antecedent, consequent, true)
}

/// Conjunction over a fixed set of clauses; every clause is read.
#[inline]
pub fn all(clauses: &[bool]) -> bool {
    clauses.iter().fold(true, |acc, c| acc & *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_implies() {
        assert_eq!(select(true, 1u8, 2u8), 1);
        assert_eq!(select(false, 1u8, 2u8), 2);

        assert!(implies(false, false));
        assert!(implies(false, true));
        assert!(!implies(true, false));
        assert!(implies(true, true));

        assert!(all(&[]));
        assert!(!all(&[true, false, true]));
    }
}
