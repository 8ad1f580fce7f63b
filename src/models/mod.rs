// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod check;
pub mod token;

pub use check::{Check, CheckMethod, CheckPatch, Protocol, CHECK_ID_LEN};
pub use token::TokenRecord;
