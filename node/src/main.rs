// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use spynet_node::config::NodeConfig;
use spynet_node::engine::Engine;
use spynet_node::server::{build_router, SharedEngine};
use spynet_node::telemetry::init_telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_telemetry();

    let cfg = NodeConfig::from_env()?;
    tracing::info!("Initializing SpyNet node with config: {:?}", cfg);

    let engine = Engine::new(&cfg)?;
    let shared_state: SharedEngine = Arc::new(Mutex::new(engine));

    let app = build_router(shared_state);

    let addr = cfg.bind_addr;
    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
