// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Incrementally verifiable proof chain.
//!
//! A chain is a singly-linked sequence of attested steps:
//!
//! ```text
//! Genesis -> init -> { agentIdCheck | messageNumberCheck | validMessageCheck } -> processMessage
//!                      ^                                                            |
//!                      +------------------------ next message ----------------------+
//! ```
//!
//! Each step names exactly one predecessor and carries a keyed BLAKE3 attestation
//! over its public input, public output, witness commitment and the predecessor's
//! attestation. Verifying a step means verifying its whole ancestry back to genesis.

pub mod state;
pub mod step;
pub mod attest;
pub mod chain;
pub mod verify;
pub mod driver;

pub use state::{ValidationOutcome, ValidationState};
pub use step::{Attestation, ProofStep, StepKind};
pub use attest::ProgramKey;
pub use chain::ProofChain;
pub use verify::ChainProof;
pub use driver::{prove_message, prove_messages, Branch};
