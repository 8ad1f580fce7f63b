// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Caller token extraction.
//!
//! Tokens are opaque strings sent in the `token` header. Extraction never
//! rejects; a missing or non-UTF-8 header yields an empty token, which
//! fails verification further down.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Request header carrying the caller's token.
pub const TOKEN_HEADER: &str = "token";

/// The caller's token, as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerToken(pub String);

impl<S> FromRequestParts<S> for CallerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(CallerToken(token))
    }
}
