// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed access to the check-id list held on each `users` record.
//!
//! Only the `checks` field is interpreted. Every other field of the user
//! record is carried through untouched when the list is written back.

use crate::db::{collections, RecordStore, StoreError};
use serde_json::{Map, Value};
use std::sync::Arc;

const CHECKS_FIELD: &str = "checks";

/// A user's check-id list, together with the rest of the user record.
///
/// Entries are kept exactly as stored. Every entry counts toward the quota,
/// even one that is not a string; ids are matched by string equality.
#[derive(Debug, Clone)]
pub struct UserCheckList {
    phone: String,
    record: Map<String, Value>,
    entries: Vec<Value>,
}

impl UserCheckList {
    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Append an id unless it is already present.
    pub fn push(&mut self, id: &str) {
        if !self.contains(id) {
            self.entries.push(Value::String(id.to_string()));
        }
    }

    /// Remove an id. Returns false if it was not in the list.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.as_str() == Some(id))
    }

    fn from_record(phone: &str, record: Value) -> Result<Self, StoreError> {
        let Value::Object(record) = record else {
            return Err(StoreError::Malformed(format!(
                "{}/{}: not an object",
                collections::USERS,
                phone
            )));
        };

        // A missing or non-array field counts as an empty list.
        let entries = match record.get(CHECKS_FIELD) {
            Some(Value::Array(entries)) => entries.clone(),
            _ => Vec::new(),
        };

        Ok(Self {
            phone: phone.to_string(),
            record,
            entries,
        })
    }

    fn to_record(&self) -> Value {
        let mut record = self.record.clone();
        record.insert(CHECKS_FIELD.to_string(), Value::Array(self.entries.clone()));
        Value::Object(record)
    }
}

/// Loads and saves [`UserCheckList`]s.
#[derive(Clone)]
pub struct UserCheckStore {
    store: Arc<dyn RecordStore>,
}

impl UserCheckStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self, phone: &str) -> Result<UserCheckList, StoreError> {
        let record = self.store.read(collections::USERS, phone).await?;
        UserCheckList::from_record(phone, record)
    }

    /// Write the list back onto the user record.
    pub async fn save(&self, list: &UserCheckList) -> Result<(), StoreError> {
        self.store
            .update(collections::USERS, &list.phone, &list.to_record())
            .await
    }
}
