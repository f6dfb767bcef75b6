// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

use serde::{Serialize, Deserialize};

/// Hard cap on enrolled agents.
pub const MAX_USERS: u64 = 100;

/// Number of pending-action slots a fold walks per epoch.
pub const MAX_PENDING_ACTIONS: usize = 200;

/// Bit index of flag 1 inside a payload. Flags 1..=6 occupy bits 249..=254.
pub const FLAG_BIT_BASE: usize = 249;

/// Number of flag bits.
pub const FLAG_COUNT: usize = 6;

/// Exclusive upper bound of `agent_id`. Lower bound is exclusive 0.
pub const AGENT_ID_MAX: u64 = 3000;

/// Exclusive upper bound of `x`. Lower bound is exclusive 0.
pub const X_MAX: u64 = 15000;

/// Exclusive bounds of `y`.
pub const Y_MIN: u64 = 5000;
pub const Y_MAX: u64 = 20000;

/// Topic of the per-message event stream.
pub const RECEIVED_MESSAGE_TOPIC: &str = "received-message-from";

/// What `send_message` does when the admission gate is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AdmissionPolicy {
    /// Succeed with a null effect: append an empty sentinel and emit a masked event.
    #[default]
    Mask,
    /// Fail the whole call with `KernelError::Rejected`.
    Reject,
}

/// Runtime parameters of a network instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub max_users: u64,
    pub max_pending_actions: usize,
    pub admission: AdmissionPolicy,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_users: MAX_USERS,
            max_pending_actions: MAX_PENDING_ACTIONS,
            admission: AdmissionPolicy::Mask,
        }
    }
}
