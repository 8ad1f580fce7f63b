// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check model for storage and API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Length of a check id.
pub const CHECK_ID_LEN: usize = 20;

/// Scheme used when probing the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            _ => None,
        }
    }
}

/// HTTP method used when probing the target.
///
/// Always stored uppercase. Older records written with lowercase names are
/// still readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckMethod {
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "delete")]
    Delete,
}

impl CheckMethod {
    /// Uppercase name, as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Parse an uppercase method name (`GET`, `POST`, `PUT`, `DELETE`).
    pub fn from_upper(raw: &str) -> Option<Self> {
        match raw {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Parse a lowercase method name (`get`, `post`, `put`, `delete`).
    pub fn from_lower(raw: &str) -> Option<Self> {
        match raw {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// A periodic URL health check owned by one user.
///
/// Stored in the `checks` collection keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    /// Random 20-character id (also used as document ID)
    pub id: String,
    /// Phone number of the owning user
    pub user_phone: String,
    pub protocol: Protocol,
    /// Target URL, as submitted
    pub url: String,
    pub method: CheckMethod,
    /// Accepted status codes. Element types are not enforced.
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<number>"))]
    pub success_codes: Vec<Value>,
    /// Check timeout, 1 to 5 seconds
    pub timeout_seconds: u8,
}

/// Fields of a check being updated. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckPatch {
    pub protocol: Option<Protocol>,
    pub url: Option<String>,
    pub method: Option<CheckMethod>,
    pub success_codes: Option<Vec<Value>>,
    pub timeout_seconds: Option<u8>,
}

impl CheckPatch {
    pub fn is_empty(&self) -> bool {
        self.protocol.is_none()
            && self.url.is_none()
            && self.method.is_none()
            && self.success_codes.is_none()
            && self.timeout_seconds.is_none()
    }
}
