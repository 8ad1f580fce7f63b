// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request field validation.
//!
//! Each function takes the untyped request payload and returns the typed
//! field, or `None` when it is absent or outside its domain. Nothing here
//! fails loudly; callers decide what an absent field means.

use crate::models::{CheckMethod, CheckPatch, Protocol, CHECK_ID_LEN};
use serde_json::Value;

/// Smallest accepted check timeout, in seconds.
pub const MIN_TIMEOUT_SECONDS: u8 = 1;
/// Largest accepted check timeout, in seconds.
pub const MAX_TIMEOUT_SECONDS: u8 = 5;

/// Fields of a check being created. All are required.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCheck {
    pub protocol: Protocol,
    pub url: String,
    pub method: CheckMethod,
    pub success_codes: Vec<Value>,
    pub timeout_seconds: u8,
}

fn str_field<'a>(payload: &'a Value, name: &str) -> Option<&'a str> {
    payload.get(name)?.as_str()
}

pub fn protocol(payload: &Value) -> Option<Protocol> {
    str_field(payload, "protocol").and_then(Protocol::parse)
}

/// Non-blank URL. The submitted string is kept as is.
pub fn url(payload: &Value) -> Option<String> {
    str_field(payload, "url")
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string)
}

/// Method as accepted on create: uppercase names only.
pub fn create_method(payload: &Value) -> Option<CheckMethod> {
    str_field(payload, "method").and_then(CheckMethod::from_upper)
}

/// Method as accepted on update: lowercase names, plus uppercase.
pub fn update_method(payload: &Value) -> Option<CheckMethod> {
    str_field(payload, "method")
        .and_then(|m| CheckMethod::from_lower(m).or_else(|| CheckMethod::from_upper(m)))
}

/// Any JSON array.
pub fn success_codes(payload: &Value) -> Option<Vec<Value>> {
    payload.get("successCodes")?.as_array().cloned()
}

/// Whole number of seconds in `[1, 5]`. `3.0` counts as whole.
pub fn timeout_seconds(payload: &Value) -> Option<u8> {
    let n = payload.get("timeoutSeconds")?.as_f64()?;
    let range = f64::from(MIN_TIMEOUT_SECONDS)..=f64::from(MAX_TIMEOUT_SECONDS);
    (n.fract() == 0.0 && range.contains(&n)).then_some(n as u8)
}

/// Check id whose trimmed length is exactly [`CHECK_ID_LEN`].
pub fn check_id(raw: Option<&str>) -> Option<String> {
    let id = raw?.trim();
    (id.chars().count() == CHECK_ID_LEN).then(|| id.to_string())
}

/// All five fields, or nothing.
pub fn new_check(payload: &Value) -> Option<NewCheck> {
    Some(NewCheck {
        protocol: protocol(payload)?,
        url: url(payload)?,
        method: create_method(payload)?,
        success_codes: success_codes(payload)?,
        timeout_seconds: timeout_seconds(payload)?,
    })
}

/// Whichever mutable fields validate. Invalid fields are dropped.
pub fn check_patch(payload: &Value) -> CheckPatch {
    CheckPatch {
        protocol: protocol(payload),
        url: url(payload),
        method: update_method(payload),
        success_codes: success_codes(payload),
        timeout_seconds: timeout_seconds(payload),
    }
}
