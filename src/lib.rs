// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! lwwtree - an embeddable key-value store: a disk-resident B-tree of
//! fixed 4KB blocks carrying a Last-Writer-Wins CRDT.
//!
//! ## Quick start
//!
//! ```rust
//! use lwwtree::Store;
//!
//! # fn main() -> lwwtree::error::Result<()> {
//! let dir = tempfile::tempdir().unwrap();
//! let store = Store::open(dir.path().join("additions.db"), dir.path().join("removals.db"))?;
//! store.put(b"page.title", b"hello")?;
//! assert_eq!(store.get(b"page.title")?, Some(b"hello".to_vec()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **btree**: fixed 4096-byte blocks, the block service that reads and
//!   writes them, and the node split/search algorithms.
//! - **pair**: the 137-byte `(key, value, timestamp)` wire record.
//! - **tsmap**: a last-writer-wins `key -> value` map layered over a
//!   single B-tree file.
//! - **lww**: the LWW-Set CRDT, a pair of time-stamped maps.
//! - **vector**: an optional brute-force nearest-neighbor scan over a
//!   tree's values.

pub mod btree;
pub mod core;
pub mod error;
pub mod lww;
pub mod pair;
pub mod tsmap;
pub mod vector;

use std::path::Path;

pub use error::{Error, Result};
pub use lww::LwwSet;
pub use pair::Pair;

/// The public, embeddable key-value store: an `LwwSet` with the API
/// surface described for this crate (`open`/`put`/`delete`/`get`/`each`/
/// `merge`).
pub struct Store {
    set: LwwSet,
}

impl Store {
    /// Opens (creating if necessary) a store backed by two B-tree files.
    ///
    /// ## Input
    /// - `additions_path`: backing file for the LWW-Set's `Additions` map
    /// - `removals_path`: backing file for the LWW-Set's `Removals` map
    ///
    /// ## Output
    /// - `Ok(Store)`: ready for use; either file is created if missing
    /// - `Err(Error::Io)`: the file could not be opened or its empty root
    ///   block could not be written
    ///
    /// ## Performance
    /// - O(1): at most one 4096-byte write per file (the initial root block)
    pub fn open<P: AsRef<Path>>(additions_path: P, removals_path: P) -> Result<Self> {
        Ok(Self { set: LwwSet::open(additions_path, removals_path)? })
    }

    /// Adds `(key, value)` at the current wall time.
    ///
    /// ## Input
    /// - `key`: 1–30 bytes
    /// - `value`: 1–93 bytes
    ///
    /// ## Output
    /// - `Ok(())`: the addition was appended
    /// - `Err(Error::KeyTooLong | Error::ValueTooLong)`: a bound was violated
    /// - `Err(Error::Io)`: the underlying write failed
    ///
    /// ## Performance
    /// - O(log n) block reads/writes, plus a possible O(log n) cascade of
    ///   node splits
    ///
    /// ## Error Conditions
    /// - `key` is empty or longer than 30 bytes
    /// - `value` is empty or longer than 93 bytes
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.set.add(key, value)
    }

    /// Marks `(key, value)` as removed at the current wall time.
    ///
    /// ## Input
    /// - `key`, `value`: the pair being tombstoned (recorded, not matched
    ///   against the current value — any removal timestamped later than the
    ///   newest addition masks `key` regardless of which value was added)
    ///
    /// ## Output
    /// - `Ok(())`: the removal was appended
    /// - `Err(Error::KeyTooLong | Error::ValueTooLong)`: a bound was violated
    ///
    /// ## Performance
    /// - O(log n), identical cost shape to `put`
    pub fn delete(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.set.remove(key, value)
    }

    /// Looks up the value currently associated with `key`.
    ///
    /// ## Input
    /// - `key`: the key to look up
    ///
    /// ## Output
    /// - `Ok(Some(value))`: `key` is present (added, and not masked by a
    ///   newer removal)
    /// - `Ok(None)`: `key` was never added, or its newest removal is at
    ///   least as new as its newest addition
    ///
    /// ## Performance
    /// - O(n) in the number of Pairs ever added for `key`: resolving the
    ///   winning timestamp requires a full tree scan (see `tsmap.rs`)
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.set.get(key)
    }

    /// Visits every present `(key, value)` pair: every addition not masked
    /// by a newer removal.
    ///
    /// ## Input
    /// - `visitor`: called once per present pair; returning `Err` aborts
    ///   the visit and propagates
    ///
    /// ## Output
    /// - `Ok(())`: every present pair was visited
    /// - `Err(e)`: propagated from the visitor, or from the underlying scan
    ///
    /// ## Performance
    /// - O(n) in the total number of Pairs across both trees
    pub fn each<F>(&self, visitor: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Result<()>,
    {
        self.set.get_all(visitor)
    }

    /// Replays every record of `other` into this store, preserving original
    /// timestamps.
    ///
    /// ## Input
    /// - `other`: the replica to merge from; left unmodified
    ///
    /// ## Output
    /// - `Ok(())`: every addition and removal of `other` was replayed
    ///
    /// ## Performance
    /// - O(n) in `other`'s total Pair count
    ///
    /// ## Error Conditions
    /// - Propagates any I/O error hit while reading `other` or writing `self`
    ///
    /// Idempotent and commutative: merging the same replica twice, or
    /// merging two replicas in either order, leaves equal observable state.
    pub fn merge(&self, other: &Store) -> Result<()> {
        self.set.merge(&other.set)
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;
