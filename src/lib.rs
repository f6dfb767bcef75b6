// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![no_std]

//! spynet-kernel: A deterministic, no_std core for enrolling agents, admitting their
//! messages and committing recursively attested message counts.

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod error;
pub mod types;
pub mod select;
pub mod flags;
pub mod action;
pub mod fold;
pub mod auth;
pub mod enrollment;
pub mod admission;
pub mod proof;
pub mod ledger;
pub mod event;
pub mod network;
pub mod verify;

#[cfg(test)]
pub mod tests;
