// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uptime_checks::config::Config;
use uptime_checks::db::{FirestoreDb, MemoryStore, RecordStore, StoreError};
use uptime_checks::routes::create_router;
use uptime_checks::services::{CheckService, IdSource, StoreTokenVerifier};
use uptime_checks::AppState;

#[allow(dead_code)]
pub const PHONE: &str = "15551234567";
#[allow(dead_code)]
pub const TOKEN: &str = "tokentokentokentoken";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Seed a user record with the given check ids.
#[allow(dead_code)]
pub fn seed_user(store: &MemoryStore, phone: &str, checks: &[&str]) {
    store.put(
        "users",
        phone,
        json!({
            "firstName": "Test",
            "lastName": "User",
            "phone": phone,
            "tosAgreement": true,
            "checks": checks,
        }),
    );
}

/// Seed a token for `phone` that expires in an hour.
#[allow(dead_code)]
pub fn seed_token(store: &MemoryStore, token: &str, phone: &str) {
    let expires = chrono::Utc::now().timestamp_millis() + 60 * 60 * 1000;
    store.put(
        "tokens",
        token,
        json!({"id": token, "phone": phone, "expires": expires}),
    );
}

/// Seed a check record owned by `phone`.
#[allow(dead_code)]
pub fn seed_check(store: &MemoryStore, id: &str, phone: &str) {
    store.put(
        "checks",
        id,
        json!({
            "id": id,
            "userPhone": phone,
            "protocol": "http",
            "url": "example.com",
            "method": "GET",
            "successCodes": [200, 301],
            "timeoutSeconds": 2,
        }),
    );
}

/// Build the router over an arbitrary store.
#[allow(dead_code)]
pub fn create_test_app_with(
    store: Arc<dyn RecordStore>,
    max_checks: usize,
    ids: Option<Arc<dyn IdSource>>,
) -> (Router, Arc<AppState>) {
    let config = Config {
        max_checks,
        ..Config::test_default()
    };

    let tokens = Arc::new(StoreTokenVerifier::new(store.clone()));
    let mut checks = CheckService::new(store, tokens, config.max_checks);
    if let Some(ids) = ids {
        checks = checks.with_id_source(ids);
    }

    let state = Arc::new(AppState { config, checks });
    (create_router(state.clone()), state)
}

/// Create a test app over a fresh memory store with a user and live token.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    seed_user(&store, PHONE, &[]);
    seed_token(&store, TOKEN, PHONE);
    let (app, _) = create_test_app_with(Arc::new(store.clone()), 5, None);
    (app, store)
}

/// Send a request and return the status and JSON body (`Null` if empty).
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Build a JSON request carrying a token header.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("token", token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a body-less request carrying a token header.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("token", token)
        .body(Body::empty())
        .unwrap()
}

/// Valid create payload.
#[allow(dead_code)]
pub fn check_payload() -> Value {
    json!({
        "protocol": "https",
        "url": "http://x.com",
        "method": "GET",
        "successCodes": [200],
        "timeoutSeconds": 3
    })
}

/// Id source that always returns the same id.
#[allow(dead_code)]
pub struct FixedIds(pub String);

impl IdSource for FixedIds {
    fn next_id(&self) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read,
    Create,
    Update,
    Delete,
}

/// Memory store that logs every call and can be told to fail some of them.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    calls: Mutex<Vec<(Op, String)>>,
    failures: Mutex<Vec<(Op, String)>>,
}

#[allow(dead_code)]
impl RecordingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Make every `op` against `collection` fail with a backend error.
    pub fn fail(&self, op: Op, collection: &str) {
        self.failures
            .lock()
            .unwrap()
            .push((op, collection.to_string()));
    }

    pub fn calls(&self) -> Vec<(Op, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<(Op, String)> {
        self.calls()
            .into_iter()
            .filter(|(op, _)| *op != Op::Read)
            .collect()
    }

    fn record(&self, op: Op, collection: &str) -> Result<(), StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((op, collection.to_string()));

        let failing = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .any(|(o, c)| *o == op && c == collection);
        if failing {
            Err(StoreError::Backend(format!("injected {op:?} failure")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn read(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        self.record(Op::Read, collection)?;
        self.inner.read(collection, id).await
    }

    async fn create(&self, collection: &str, id: &str, record: &Value) -> Result<(), StoreError> {
        self.record(Op::Create, collection)?;
        self.inner.create(collection, id, record).await
    }

    async fn update(&self, collection: &str, id: &str, record: &Value) -> Result<(), StoreError> {
        self.record(Op::Update, collection)?;
        self.inner.update(collection, id, record).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.record(Op::Delete, collection)?;
        self.inner.delete(collection, id).await
    }
}

/// Recording store seeded with the default user and token, plus its app.
#[allow(dead_code)]
pub fn create_recording_app(max_checks: usize) -> (Router, Arc<RecordingStore>) {
    let memory = MemoryStore::new();
    seed_user(&memory, PHONE, &[]);
    seed_token(&memory, TOKEN, PHONE);
    let store = Arc::new(RecordingStore::new(memory));
    let (app, _) = create_test_app_with(store.clone(), max_checks, None);
    (app, store)
}
