//! Session token record.

use serde::{Deserialize, Serialize};

/// Token stored in the `tokens` collection, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Opaque token string (also used as document ID)
    pub id: String,
    /// Phone number of the user the token was issued to
    pub phone: String,
    /// Expiry as a Unix timestamp in milliseconds
    pub expires: i64,
}

impl TokenRecord {
    /// Whether the token is still valid at `now_ms`.
    pub fn is_live_at(&self, now_ms: i64) -> bool {
        self.expires > now_ms
    }
}
