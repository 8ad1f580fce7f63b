// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check CRUD routes.
//!
//! All four operations share `/check`. Any other method gets a 405 from
//! the method router. Authorization happens in the service, against the
//! owner of the check being touched.

use crate::error::Result;
use crate::middleware::CallerToken;
use crate::models::Check;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/check",
        get(get_check)
            .post(create_check)
            .put(update_check)
            .delete(delete_check),
    )
}

#[derive(Deserialize)]
struct CheckQuery {
    id: Option<String>,
}

/// Acknowledgement returned by a successful update.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MessageResponse {
    pub message: String,
}

/// Parse a JSON body, treating anything unparseable as an empty object so
/// that it fails field validation instead of being rejected by the extractor.
fn parse_payload(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Default::default()))
}

async fn create_check(
    State(state): State<Arc<AppState>>,
    CallerToken(token): CallerToken,
    body: Bytes,
) -> Result<Json<Check>> {
    let payload = parse_payload(&body);
    let check = state.checks.create(&token, &payload).await?;
    Ok(Json(check))
}

async fn get_check(
    State(state): State<Arc<AppState>>,
    CallerToken(token): CallerToken,
    Query(query): Query<CheckQuery>,
) -> Result<Json<Value>> {
    let stored = state.checks.get(query.id.as_deref(), &token).await?;
    Ok(Json(stored.into_record()))
}

async fn update_check(
    State(state): State<Arc<AppState>>,
    CallerToken(token): CallerToken,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let payload = parse_payload(&body);
    state.checks.update(&token, &payload).await?;
    Ok(Json(MessageResponse {
        message: "Check updated!".to_string(),
    }))
}

async fn delete_check(
    State(state): State<Arc<AppState>>,
    CallerToken(token): CallerToken,
    Query(query): Query<CheckQuery>,
) -> Result<StatusCode> {
    state.checks.delete(query.id.as_deref(), &token).await?;
    Ok(StatusCode::OK)
}
