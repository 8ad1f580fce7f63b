// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uptime Checks API Server
//!
//! Serves check CRUD over HTTP on top of Firestore, or an in-memory store
//! for local development.

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uptime_checks::{
    config::{Config, StorageBackend},
    db::{FirestoreDb, MemoryStore, RecordStore},
    services::{CheckService, StoreTokenVerifier},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        max_checks = config.max_checks,
        backend = ?config.storage_backend,
        "Starting Uptime Checks API"
    );

    let store: Arc<dyn RecordStore> = match config.storage_backend {
        StorageBackend::Firestore => Arc::new(
            FirestoreDb::new(&config.gcp_project_id)
                .await
                .context("Failed to connect to Firestore")?,
        ),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let tokens = Arc::new(StoreTokenVerifier::new(store.clone()));
    let checks = CheckService::new(store, tokens, config.max_checks);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        checks,
    });

    // Build router
    let app = uptime_checks::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uptime_checks=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
