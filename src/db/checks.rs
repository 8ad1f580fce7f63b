// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed access to the `checks` collection.
//!
//! Loaded checks keep the full stored document alongside the typed view.
//! Updates only rewrite the keys they patch, so fields written by other
//! components (e.g. monitoring state) and legacy spellings survive untouched.

use crate::db::{collections, RecordStore, StoreError};
use crate::models::{Check, CheckPatch};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A check as stored, together with its decoded fields.
#[derive(Debug, Clone)]
pub struct StoredCheck {
    id: String,
    check: Check,
    record: Map<String, Value>,
}

impl StoredCheck {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    /// The stored document, including fields [`Check`] does not model.
    pub fn into_record(self) -> Value {
        Value::Object(self.record)
    }

    /// Apply the present fields of `patch`. Other keys are left as stored.
    pub fn apply(&mut self, patch: CheckPatch) {
        if let Some(protocol) = patch.protocol {
            self.check.protocol = protocol;
            self.set("protocol", Value::String(protocol.as_str().to_string()));
        }
        if let Some(url) = patch.url {
            self.set("url", Value::String(url.clone()));
            self.check.url = url;
        }
        if let Some(method) = patch.method {
            self.check.method = method;
            self.set("method", Value::String(method.as_str().to_string()));
        }
        if let Some(success_codes) = patch.success_codes {
            self.set("successCodes", Value::Array(success_codes.clone()));
            self.check.success_codes = success_codes;
        }
        if let Some(timeout_seconds) = patch.timeout_seconds {
            self.check.timeout_seconds = timeout_seconds;
            self.set("timeoutSeconds", Value::from(timeout_seconds));
        }
    }

    fn set(&mut self, key: &str, value: Value) {
        self.record.insert(key.to_string(), value);
    }

    fn from_record(id: &str, record: Value) -> Result<Self, StoreError> {
        let malformed = |detail: String| {
            StoreError::Malformed(format!("{}/{}: {}", collections::CHECKS, id, detail))
        };

        let check: Check =
            serde_json::from_value(record.clone()).map_err(|e| malformed(e.to_string()))?;
        let Value::Object(record) = record else {
            return Err(malformed("not an object".to_string()));
        };

        Ok(Self {
            id: id.to_string(),
            check,
            record,
        })
    }
}

/// Reads and writes check records.
#[derive(Clone)]
pub struct CheckStore {
    store: Arc<dyn RecordStore>,
}

impl CheckStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Load a check by id.
    pub async fn get(&self, id: &str) -> Result<StoredCheck, StoreError> {
        let record = self.store.read(collections::CHECKS, id).await?;
        StoredCheck::from_record(id, record)
    }

    /// Persist a new check. Fails `Conflict` if the id is already taken.
    pub async fn create(&self, check: &Check) -> Result<(), StoreError> {
        let record = serde_json::to_value(check).map_err(|e| StoreError::Malformed(e.to_string()))?;
        self.store
            .create(collections::CHECKS, &check.id, &record)
            .await
    }

    /// Write a loaded check back, including any fields it was loaded with.
    pub async fn update(&self, stored: &StoredCheck) -> Result<(), StoreError> {
        self.store
            .update(
                collections::CHECKS,
                &stored.id,
                &Value::Object(stored.record.clone()),
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(collections::CHECKS, id).await
    }
}
