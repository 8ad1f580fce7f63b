//! Database layer: the record store seam and its typed adapters.

pub mod checks;
pub mod firestore;
pub mod memory;
pub mod user_checks;

pub use checks::{CheckStore, StoredCheck};
pub use self::firestore::FirestoreDb;
pub use memory::MemoryStore;
pub use user_checks::{UserCheckList, UserCheckStore};

use async_trait::async_trait;
use serde_json::Value;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TOKENS: &str = "tokens";
    pub const CHECKS: &str = "checks";
}

/// Storage failures, as seen by callers of [`RecordStore`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("{collection}/{id} not found")]
    NotFound { collection: String, id: String },

    #[error("{collection}/{id} already exists")]
    Conflict { collection: String, id: String },

    /// The record exists but could not be decoded into the expected shape.
    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn conflict(collection: &str, id: &str) -> Self {
        StoreError::Conflict {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Key-record storage addressed by collection and id.
///
/// Operations are independent: there is no transaction spanning two calls,
/// and each call completes with exactly one success or error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read a record. Fails `NotFound` if absent.
    async fn read(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    /// Create a record. Fails `Conflict` if the id is taken.
    async fn create(&self, collection: &str, id: &str, record: &Value) -> Result<(), StoreError>;

    /// Replace an existing record. Fails `NotFound` if absent.
    async fn update(&self, collection: &str, id: &str, record: &Value) -> Result<(), StoreError>;

    /// Remove a record. Fails `NotFound` if absent.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
