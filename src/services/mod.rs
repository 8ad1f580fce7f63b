// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth;
pub mod checks;
pub mod ids;
pub mod validation;

pub use auth::{StoreTokenVerifier, TokenVerifier};
pub use checks::CheckService;
pub use ids::{IdSource, RandomIds};
