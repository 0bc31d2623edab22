// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for lwwtree operations.

use std::fmt;

/// Standard Result type for all lwwtree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the block service, the B-tree, and the CRDT layers.
#[derive(Debug)]
pub enum Error {
    /// A key exceeded the 30-byte bound.
    KeyTooLong { len: usize },

    /// A value exceeded the 93-byte bound.
    ValueTooLong { len: usize },

    /// A block's declared `leaf_count`/`child_count` could not have come
    /// from a well-formed write: either the counters would overflow 4096
    /// bytes, or `child_count` is neither `0` nor `leaf_count + 1`.
    Corrupt { block_id: u64, reason: String },

    /// Underlying file I/O failure.
    Io { operation: &'static str, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyTooLong { len } => {
                write!(f, "key length should not be more than 30, currently it is {}", len)
            }
            Self::ValueTooLong { len } => {
                write!(f, "value length should not be more than 93, currently it is {}", len)
            }
            Self::Corrupt { block_id, reason } => {
                write!(f, "block {} is corrupt: {}", block_id, reason)
            }
            Self::Io { operation, reason } => {
                write!(f, "I/O error during '{}': {}", operation, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub(crate) fn io(operation: &'static str, source: std::io::Error) -> Self {
        Error::Io { operation, reason: source.to_string() }
    }
}
