// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process record store.
//!
//! Used for local development (`STORAGE_BACKEND=memory`) and tests. Each
//! call is individually atomic; nothing spans two calls.

use crate::db::{RecordStore, StoreError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

type Key = (String, String);

/// Record store backed by a concurrent map keyed by `(collection, id)`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<Key, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a record without existence checks (seeding).
    pub fn put(&self, collection: &str, id: &str, record: Value) {
        self.records.insert(key(collection, id), record);
    }

    /// Snapshot of a record, if present.
    pub fn get(&self, collection: &str, id: &str) -> Option<Value> {
        self.records.get(&key(collection, id)).map(|r| r.value().clone())
    }

    /// Number of records in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.records
            .iter()
            .filter(|entry| entry.key().0 == collection)
            .count()
    }
}

fn key(collection: &str, id: &str) -> Key {
    (collection.to_string(), id.to_string())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        self.get(collection, id)
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn create(&self, collection: &str, id: &str, record: &Value) -> Result<(), StoreError> {
        match self.records.entry(key(collection, id)) {
            Entry::Occupied(_) => Err(StoreError::conflict(collection, id)),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, collection: &str, id: &str, record: &Value) -> Result<(), StoreError> {
        match self.records.get_mut(&key(collection, id)) {
            Some(mut existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(collection, id)),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.records
            .remove(&key(collection, id))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(collection, id))
    }
}
