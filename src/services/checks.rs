// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check lifecycle: create, read, update and delete.
//!
//! A check lives in the `checks` collection, and its id is also listed on
//! the owning user's record. The two records are written separately, with
//! no transaction and no compensation:
//!
//! - On create, the check is written first and then added to the user's
//!   list. If the second write fails the check is orphaned.
//! - On delete, the check is removed first and then dropped from the
//!   user's list. If the second half fails the list keeps a stale id.
//!
//! Both cases are reported as a server error and logged; neither is
//! repaired. Concurrent creates or deletes for the same user each
//! read-modify-write the whole list, so one of them can lose its change.
//! Every step runs only if the previous one succeeded.

use crate::db::{CheckStore, RecordStore, StoredCheck, UserCheckStore};
use crate::error::{AppError, Result};
use crate::models::Check;
use crate::services::auth::TokenVerifier;
use crate::services::ids::{IdSource, RandomIds};
use crate::services::validation;
use serde_json::Value;
use std::sync::Arc;

/// Orchestrates check CRUD across the `checks` and `users` collections.
pub struct CheckService {
    checks: CheckStore,
    users: UserCheckStore,
    tokens: Arc<dyn TokenVerifier>,
    ids: Arc<dyn IdSource>,
    max_checks: usize,
}

impl CheckService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        tokens: Arc<dyn TokenVerifier>,
        max_checks: usize,
    ) -> Self {
        Self {
            checks: CheckStore::new(store.clone()),
            users: UserCheckStore::new(store),
            tokens,
            ids: Arc::new(RandomIds::new()),
            max_checks,
        }
    }

    /// Replace the id source (tests use this to force collisions).
    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn max_checks(&self) -> usize {
        self.max_checks
    }

    /// Create a check owned by the token's user.
    pub async fn create(&self, token: &str, payload: &Value) -> Result<Check> {
        let fields = validation::new_check(payload).ok_or_else(|| {
            AppError::InvalidRequest("You have a problem in your request".to_string())
        })?;

        let phone = self
            .tokens
            .owner_of(token)
            .await
            .ok_or_else(|| AppError::Forbidden("Authentication problem".to_string()))?;

        let mut user = self.users.load(&phone).await.map_err(|err| {
            tracing::warn!(phone = %phone, error = %err, "Token owner could not be loaded");
            AppError::Forbidden("User not found".to_string())
        })?;

        self.authorize(token, &phone).await?;

        if user.len() >= self.max_checks {
            tracing::info!(
                phone = %phone,
                checks = user.len(),
                max_checks = self.max_checks,
                "Check quota reached"
            );
            return Err(AppError::QuotaExceeded);
        }

        let check = Check {
            id: self.ids.next_id()?,
            user_phone: phone,
            protocol: fields.protocol,
            url: fields.url,
            method: fields.method,
            success_codes: fields.success_codes,
            timeout_seconds: fields.timeout_seconds,
        };

        self.checks.create(&check).await?;

        user.push(&check.id);
        if let Err(err) = self.users.save(&user).await {
            tracing::error!(
                check_id = %check.id,
                phone = %check.user_phone,
                error = %err,
                "Check created but not added to user; check is orphaned"
            );
            return Err(err.into());
        }

        tracing::info!(check_id = %check.id, phone = %check.user_phone, "Check created");
        Ok(check)
    }

    /// Fetch a check visible to the token's user.
    pub async fn get(&self, id: Option<&str>, token: &str) -> Result<StoredCheck> {
        let id = validation::check_id(id).ok_or_else(|| {
            AppError::InvalidRequest("You have a problem in your request".to_string())
        })?;

        let stored = self.checks.get(&id).await?;
        self.authorize(token, &stored.check().user_phone).await?;
        Ok(stored)
    }

    /// Apply whichever mutable fields in `payload` validate.
    ///
    /// Absent fields, and stored fields outside the check model, keep their
    /// stored values. Last writer wins per field.
    pub async fn update(&self, token: &str, payload: &Value) -> Result<()> {
        let id = validation::check_id(payload.get("id").and_then(Value::as_str)).ok_or_else(
            || AppError::InvalidRequest("You have a problem in your request".to_string()),
        )?;

        let patch = validation::check_patch(payload);
        if patch.is_empty() {
            return Err(AppError::InvalidRequest(
                "Provide fields to update".to_string(),
            ));
        }

        let mut stored = self.checks.get(&id).await?;
        self.authorize(token, &stored.check().user_phone).await?;

        stored.apply(patch);
        self.checks.update(&stored).await?;

        tracing::info!(check_id = %stored.id(), "Check updated");
        Ok(())
    }

    /// Delete a check and remove it from its owner's list.
    pub async fn delete(&self, id: Option<&str>, token: &str) -> Result<()> {
        let id = validation::check_id(id).ok_or_else(|| {
            AppError::InvalidRequest("You have a problem in your request".to_string())
        })?;

        let check = self.checks.get(&id).await?.check().clone();
        self.authorize(token, &check.user_phone).await?;

        self.checks.delete(&id).await?;

        let mut user = self.users.load(&check.user_phone).await.map_err(|err| {
            tracing::error!(
                check_id = %id,
                phone = %check.user_phone,
                error = %err,
                "Check deleted but owner could not be loaded; reference is stale"
            );
            AppError::from(err)
        })?;

        if !user.remove(&id) {
            tracing::warn!(
                check_id = %id,
                phone = %check.user_phone,
                "Deleted check was not in its owner's list"
            );
            return Err(AppError::NotFound(
                "The check id not found for this user".to_string(),
            ));
        }

        if let Err(err) = self.users.save(&user).await {
            tracing::error!(
                check_id = %id,
                phone = %check.user_phone,
                error = %err,
                "Check deleted but owner list not updated; reference is stale"
            );
            return Err(err.into());
        }

        tracing::info!(check_id = %id, phone = %check.user_phone, "Check deleted");
        Ok(())
    }

    async fn authorize(&self, token: &str, phone: &str) -> Result<()> {
        if self.tokens.verify(token, phone).await {
            Ok(())
        } else {
            tracing::debug!(phone = %phone, "Token rejected");
            Err(AppError::Forbidden("Authentication failure".to_string()))
        }
    }
}
