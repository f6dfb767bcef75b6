// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// Missing or invalid signature, or a signer without the required role.
    Unauthorized,
    /// Enrollment cap reached.
    CapacityExceeded,
    /// Pending-action log for the current epoch is full.
    ActionLogFull,
    /// Message field validation failed (checksum, range or ordering).
    InvalidMessage,
    /// Finalize attempted on an outcome with no validity flag set.
    UnvalidatedMessage,
    /// Commit does not advance the message count.
    NoProgress,
    /// Commit offset no longer matches the stored message count.
    StaleCommit,
    /// Proof chain verification failed.
    InvalidProof,
    /// Admission gate failed (flag format or eligibility) under the rejecting policy.
    Rejected,
    /// A proof step precondition on the public state did not hold.
    InvalidState,
    /// Unknown proof step id.
    NotFound,
    /// Arithmetic overflow on a counter.
    Overflow,
    /// Malformed encoded input.
    InvalidInput,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            KernelError::Unauthorized => "unauthorized",
            KernelError::CapacityExceeded => "max user limit reached",
            KernelError::ActionLogFull => "pending action log is full",
            KernelError::InvalidMessage => "message validation failed",
            KernelError::UnvalidatedMessage => "message was not validated by any branch",
            KernelError::NoProgress => "commit does not advance the message count",
            KernelError::StaleCommit => "commit offset does not match stored message count",
            KernelError::InvalidProof => "proof chain verification failed",
            KernelError::Rejected => "message rejected by admission gate",
            KernelError::InvalidState => "validation state precondition failed",
            KernelError::NotFound => "proof step not found",
            KernelError::Overflow => "counter overflow",
            KernelError::InvalidInput => "invalid input",
        };
        f.write_str(msg)
    }
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
pub type Result<T> = KernelResult<T>;
