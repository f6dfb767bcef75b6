// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Core value types.

pub mod id;
pub mod field;
pub mod message;

pub use id::{Identity, Signature, StepId};
pub use field::Payload;
pub use message::Message;
