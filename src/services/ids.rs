// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check id generation.

use crate::models::CHECK_ID_LEN;
use ring::rand::{SecureRandom, SystemRandom};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Source of fresh check ids.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> anyhow::Result<String>;
}

/// Random lowercase-alphanumeric ids of [`CHECK_ID_LEN`] characters.
pub struct RandomIds {
    rng: SystemRandom,
}

impl RandomIds {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIds {
    fn next_id(&self) -> anyhow::Result<String> {
        let mut bytes = [0u8; CHECK_ID_LEN];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| anyhow::anyhow!("system random source failed"))?;

        // Slightly biased by the modulo; ids only need to be unique.
        Ok(bytes
            .iter()
            .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
            .collect())
    }
}
