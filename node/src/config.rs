// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use spynet_kernel::config::{AdmissionPolicy, NetworkConfig, MAX_USERS};
use spynet_kernel::proof::ProgramKey;
use spynet_kernel::types::id::Identity;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PROGRAM_SEED: &str = "spynet-dev";
pub const DEFAULT_MAX_PROVE_MESSAGES: usize = 4096;

#[derive(Error, Debug)]
#[error("invalid {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// Durable operation log. `None` keeps state in memory only.
    pub event_log_path: Option<PathBuf>,
    /// Signer for enrollment, commits and epoch rotation. Empty disables them.
    pub admin_identity: Identity,
    pub program_seed: String,
    /// Largest batch a single prove request may carry.
    pub max_prove_messages: usize,
    pub network: NetworkConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            event_log_path: None,
            admin_identity: Identity::EMPTY,
            program_seed: DEFAULT_PROGRAM_SEED.to_string(),
            max_prove_messages: DEFAULT_MAX_PROVE_MESSAGES,
            network: NetworkConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by `SPYNET_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(bind) = lookup("SPYNET_BIND") {
            cfg.bind_addr = bind.parse().map_err(|e| invalid("SPYNET_BIND", e))?;
        }
        if let Some(path) = lookup("SPYNET_EVENT_LOG") {
            cfg.event_log_path = Some(PathBuf::from(path));
        }
        if let Some(admin) = lookup("SPYNET_ADMIN") {
            let bytes = hex::decode(admin.trim()).map_err(|e| invalid("SPYNET_ADMIN", e))?;
            let bytes: [u8; 32] = bytes
                .try_into()
                .map_err(|_| invalid("SPYNET_ADMIN", "expected 32 bytes"))?;
            cfg.admin_identity = Identity(bytes);
        }
        if let Some(seed) = lookup("SPYNET_PROGRAM_SEED") {
            cfg.program_seed = seed;
        }
        if let Some(max) = lookup("SPYNET_MAX_USERS") {
            let max: u64 = max.parse().map_err(|e| invalid("SPYNET_MAX_USERS", e))?;
            if max > MAX_USERS {
                return Err(invalid("SPYNET_MAX_USERS", format!("cap is {MAX_USERS}")));
            }
            cfg.network.max_users = max;
        }
        if let Some(max) = lookup("SPYNET_MAX_PENDING_ACTIONS") {
            cfg.network.max_pending_actions = max
                .parse()
                .map_err(|e| invalid("SPYNET_MAX_PENDING_ACTIONS", e))?;
        }
        if let Some(max) = lookup("SPYNET_MAX_PROVE_MESSAGES") {
            cfg.max_prove_messages = max
                .parse()
                .map_err(|e| invalid("SPYNET_MAX_PROVE_MESSAGES", e))?;
        }
        if let Some(policy) = lookup("SPYNET_ADMISSION") {
            cfg.network.admission = match policy.to_ascii_lowercase().as_str() {
                "mask" => AdmissionPolicy::Mask,
                "reject" => AdmissionPolicy::Reject,
                other => return Err(invalid("SPYNET_ADMISSION", format!("unknown policy {other:?}"))),
            };
        }

        Ok(cfg)
    }

    pub fn program_key(&self) -> ProgramKey {
        ProgramKey::derive(self.program_seed.as_bytes())
    }
}

fn invalid(var: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError { var, reason: reason.to_string() }
}
