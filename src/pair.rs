// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The Pair codec: a fixed 137-byte `(key, value, timestamp)` record.
//!
//! ```text
//! offset  0: key_len     u16 LE
//! offset  2: value_len   u16 LE
//! offset  4: time_len    u16 LE  (always 8)
//! offset  6: key         30 bytes (first key_len valid; remainder undefined)
//! offset 36: value       93 bytes (first value_len valid; remainder undefined)
//! offset 129: timestamp  8 bytes (epoch seconds; high 4 bytes zero)
//! ```

use crate::core::validation::{self, MAX_KEY_LEN, MAX_VALUE_LEN};
use crate::error::{Error, Result};

/// Wire size, in bytes, of an encoded Pair.
pub const PAIR_SIZE: usize = 137;

const KEY_OFFSET: usize = 6;
const VALUE_OFFSET: usize = KEY_OFFSET + MAX_KEY_LEN; // 36
const TIME_OFFSET: usize = VALUE_OFFSET + MAX_VALUE_LEN; // 129

/// The atomic record stored in a B-tree node: a key, a value, and an
/// epoch-seconds timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub timestamp: u32,
}

impl Pair {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>, timestamp: u32) -> Self {
        Self { key: key.into(), value: value.into(), timestamp }
    }

    /// Checks the key against the 1..=30 byte bound and the value against
    /// the 1..=93 byte bound.
    pub fn validate(&self) -> Result<()> {
        validation::validate_key(&self.key)?;
        validation::validate_value(&self.value)?;
        Ok(())
    }

    /// Packs this Pair into its fixed 137-byte wire form. Bytes past the
    /// live `key`/`value` payload are written as zero for determinism.
    pub fn encode(&self) -> [u8; PAIR_SIZE] {
        let mut buf = [0u8; PAIR_SIZE];
        buf[0..2].copy_from_slice(&(self.key.len() as u16).to_le_bytes());
        buf[2..4].copy_from_slice(&(self.value.len() as u16).to_le_bytes());
        buf[4..6].copy_from_slice(&8u16.to_le_bytes());
        buf[KEY_OFFSET..KEY_OFFSET + self.key.len()].copy_from_slice(&self.key);
        buf[VALUE_OFFSET..VALUE_OFFSET + self.value.len()].copy_from_slice(&self.value);
        buf[TIME_OFFSET..TIME_OFFSET + 4].copy_from_slice(&self.timestamp.to_le_bytes());
        buf
    }

    /// Unpacks a Pair from its 137-byte wire form. Does not itself validate
    /// `key_len`/`value_len` against the 30/93 bounds; call `validate` if
    /// the bytes come from an untrusted source.
    pub fn decode(bytes: &[u8; PAIR_SIZE]) -> Result<Self> {
        let key_len = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
        let value_len = u16::from_le_bytes([bytes[2], bytes[3]]) as usize;
        if key_len > MAX_KEY_LEN {
            return Err(Error::KeyTooLong { len: key_len });
        }
        if value_len > MAX_VALUE_LEN {
            return Err(Error::ValueTooLong { len: value_len });
        }
        let key = bytes[KEY_OFFSET..KEY_OFFSET + key_len].to_vec();
        let value = bytes[VALUE_OFFSET..VALUE_OFFSET + value_len].to_vec();
        let timestamp = u32::from_le_bytes(bytes[TIME_OFFSET..TIME_OFFSET + 4].try_into().unwrap());
        Ok(Self { key, value, timestamp })
    }
}

#[cfg(test)]
#[path = "pair_test.rs"]
mod pair_test;
