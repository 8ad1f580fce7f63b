// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token verification against the `tokens` collection.

use crate::db::{collections, RecordStore, StoreError};
use crate::models::TokenRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Answers whether a caller's token may act for a user.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Phone number the token was issued to, if the token record exists.
    ///
    /// Does not check expiry; pair with [`TokenVerifier::verify`].
    async fn owner_of(&self, token: &str) -> Option<String>;

    /// True iff the token exists, is unexpired, and is bound to `phone`.
    /// Never errors.
    async fn verify(&self, token: &str, phone: &str) -> bool;
}

/// [`TokenVerifier`] that reads token records from a [`RecordStore`].
#[derive(Clone)]
pub struct StoreTokenVerifier {
    store: Arc<dyn RecordStore>,
}

impl StoreTokenVerifier {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn lookup(&self, token: &str) -> Result<TokenRecord, StoreError> {
        if token.is_empty() {
            return Err(StoreError::not_found(collections::TOKENS, token));
        }
        let record = self.store.read(collections::TOKENS, token).await?;
        serde_json::from_value(record).map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl TokenVerifier for StoreTokenVerifier {
    async fn owner_of(&self, token: &str) -> Option<String> {
        match self.lookup(token).await {
            Ok(record) => Some(record.phone),
            Err(err) => {
                tracing::debug!(error = %err, "Token lookup failed");
                None
            }
        }
    }

    async fn verify(&self, token: &str, phone: &str) -> bool {
        let record = match self.lookup(token).await {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(error = %err, "Token lookup failed");
                return false;
            }
        };

        record.phone == phone && record.is_live_at(chrono::Utc::now().timestamp_millis())
    }
}
