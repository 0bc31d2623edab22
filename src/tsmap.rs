// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The time-stamped map: a logical `key -> (value, timestamp)` map
//! layered over a [`Btree`], monotone in timestamp.
//!
//! The monotone-write invariant ("insert only if T strictly later than
//! stored T") is achieved by the Pair's timestamp field combined with
//! the tree's duplicate-key behavior: every add appends a new Pair, and
//! readers take the Pair with the maximum timestamp for a given key.
//! Ties are broken in favor of the lexicographically greater value, a
//! deterministic rule independent of insertion order or physical tree
//! shape — required so two replicas that apply the same adds in a
//! different order still agree on the winner.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::btree::Btree;
use crate::error::Result;
use crate::pair::Pair;

/// A `key -> (value, timestamp)` map with last-writer-wins semantics,
/// backed by a single B-tree file.
pub struct TimestampedMap {
    tree: Btree,
}

impl TimestampedMap {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self { tree: Btree::open(path)? })
    }

    /// Adds `(key, value)` at the current wall-clock time.
    pub fn add(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.add_at(key, value, now())
    }

    /// Adds `(key, value)` at an explicit timestamp. Always appends; the
    /// monotone-write contract is enforced by readers, not by skipping
    /// the write.
    pub fn add_at(&self, key: &[u8], value: &[u8], timestamp: u32) -> Result<()> {
        self.tree.insert(Pair::new(key.to_vec(), value.to_vec(), timestamp))
    }

    /// Returns the `(value, timestamp)` with the maximum timestamp
    /// recorded for `key`, if any were ever added.
    pub fn added_at(&self, key: &[u8]) -> Result<Option<(Vec<u8>, u32)>> {
        let mut best: Option<(Vec<u8>, u32)> = None;
        self.tree.iterate(|k, v, t| {
            if k == key {
                let replace = match &best {
                    None => true,
                    Some((bv, bt)) => t > *bt || (t == *bt && v > bv.as_slice()),
                };
                if replace {
                    best = Some((v.to_vec(), t));
                }
            }
            Ok(())
        })?;
        Ok(best)
    }

    /// `(value, found)` for the winning record at `key`.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.added_at(key)?.map(|(v, _t)| v))
    }

    /// Visits the winning `(key, value, timestamp)` for every distinct
    /// key ever added.
    pub fn each<F>(&self, mut visitor: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8], u32) -> Result<()>,
    {
        let mut winners: Vec<(Vec<u8>, Vec<u8>, u32)> = Vec::new();
        self.tree.iterate(|k, v, t| {
            match winners.iter_mut().find(|(wk, _, _)| wk.as_slice() == k) {
                Some(entry) => {
                    if t > entry.2 || (t == entry.2 && v > entry.1.as_slice()) {
                        entry.1 = v.to_vec();
                        entry.2 = t;
                    }
                }
                None => winners.push((k.to_vec(), v.to_vec(), t)),
            }
            Ok(())
        })?;
        for (k, v, t) in &winners {
            visitor(k, v, *t)?;
        }
        Ok(())
    }

    /// The underlying tree's root-block Pair count (see `Btree::size`).
    pub fn size(&self) -> Result<usize> {
        self.tree.size()
    }
}

fn now() -> u32 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as u32
}

#[cfg(test)]
#[path = "tsmap_test.rs"]
mod tsmap_test;
