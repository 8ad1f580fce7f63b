// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uptime checks: manage periodic URL health checks for authenticated users.
//!
//! This crate provides the API for creating, reading, updating and deleting
//! check definitions, while keeping each user's list of check ids in step
//! with the `checks` collection.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::CheckService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub checks: CheckService,
}
