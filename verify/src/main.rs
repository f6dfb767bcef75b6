// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use spynet_kernel::proof::{ChainProof, ProgramKey};
use std::fs;
use std::path::PathBuf;

/// Seed the node derives its program key from unless configured otherwise.
const DEFAULT_PROGRAM_SEED: &str = "spynet-dev";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Exported proof chain: a bare chain or a `/v1/proofs` response
    proof: PathBuf,

    /// Seed of the program key the chain was attested under
    #[arg(long, default_value = DEFAULT_PROGRAM_SEED)]
    seed: String,
}

#[derive(Serialize, Debug)]
struct Report {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    offset: Option<u64>,
    current: Option<u64>,
    prev: Option<u64>,
    steps: usize,
    tip_attestation: Option<String>,
}

fn load_proof(path: &PathBuf) -> Result<ChainProof> {
    let bytes = fs::read(path).context("Failed to read proof file")?;
    let mut value: serde_json::Value = serde_json::from_slice(&bytes).context("Proof file is not JSON")?;

    // Accept the node's prove response as-is.
    if let Some(inner) = value.get_mut("proof") {
        value = inner.take();
    }
    serde_json::from_value(value).context("Failed to parse proof chain")
}

fn main() -> Result<()> {
    let args = Args::parse();

    eprintln!("SpyNet Verifier v{}", env!("CARGO_PKG_VERSION"));

    let proof = load_proof(&args.proof)?;
    let key = ProgramKey::derive(args.seed.as_bytes());

    let verdict = proof.verify(&key).and_then(|_| {
        if proof.is_finalized() {
            Ok(())
        } else {
            Err(spynet_kernel::error::KernelError::InvalidProof)
        }
    });

    let tip = proof.tip();
    let report = Report {
        valid: verdict.is_ok(),
        error: verdict.err().map(|e| e.to_string()),
        offset: tip.map(|s| s.public_input.offset),
        current: tip.map(|s| s.public_input.current),
        prev: tip.map(|s| s.public_input.prev),
        steps: proof.len(),
        tip_attestation: tip.map(|s| hex::encode(s.attestation.as_bytes())),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.valid {
        std::process::exit(1);
    }
    Ok(())
}
