// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The LWW-Set CRDT: a pair of time-stamped maps, `Additions` and
//! `Removals`, with adds winning ties.
//!
//! The LWW-Set holds two independent B-trees (two independent files) in
//! the intended deployment.

use std::path::Path;

use crate::error::Result;
use crate::tsmap::TimestampedMap;

/// A last-writer-wins set: membership is determined by comparing the
/// newest addition timestamp for a key against the newest removal.
pub struct LwwSet {
    additions: TimestampedMap,
    removals: TimestampedMap,
}

impl LwwSet {
    pub fn open<P: AsRef<Path>>(additions_path: P, removals_path: P) -> Result<Self> {
        Ok(Self {
            additions: TimestampedMap::open(additions_path)?,
            removals: TimestampedMap::open(removals_path)?,
        })
    }

    /// `Additions.add(k, v)` at the current wall time.
    pub fn add(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.additions.add(key, value)
    }

    /// `Removals.add(k, v)` at the current wall time.
    pub fn remove(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.removals.add(key, value)
    }

    /// Present iff `key` was added and, if it was also removed, the
    /// newest addition is at least as new as the newest removal.
    pub fn exists(&self, key: &[u8]) -> Result<bool> {
        let added_t = match self.additions.added_at(key)? {
            Some((_, t)) => t,
            None => return Ok(false),
        };
        match self.removals.added_at(key)? {
            Some((_, removed_t)) => Ok(added_t >= removed_t),
            None => Ok(true),
        }
    }

    /// The value from `Additions` iff `exists(key)`.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        if !self.exists(key)? {
            return Ok(None);
        }
        self.additions.get(key)
    }

    /// Visits every present `(key, value)`: every addition not masked by
    /// a newer removal.
    pub fn get_all<F>(&self, mut visitor: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Result<()>,
    {
        self.additions.each(|key, value, added_at| {
            let removed = match self.removals.added_at(key)? {
                Some((_, removed_at)) => added_at < removed_at,
                None => false,
            };
            if !removed {
                visitor(key, value)?;
            }
            Ok(())
        })
    }

    /// Replays every record of `other` into `self` via timestamp-
    /// preserving adds. The monotone-write rule on each side guarantees
    /// idempotence and commutativity: for any two replicas A and B,
    /// `A.merge(B)` followed by `B.merge(A)` yields equal observable
    /// state on both.
    pub fn merge(&self, other: &LwwSet) -> Result<()> {
        other.additions.each(|k, v, t| self.additions.add_at(k, v, t))?;
        other.removals.each(|k, v, t| self.removals.add_at(k, v, t))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "lww_test.rs"]
mod lww_test;
