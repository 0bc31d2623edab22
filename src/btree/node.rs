// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The in-memory projection of a block: an ordered Pair list plus an
//! ordered list of child block ids.
//!
//! ```text
//! offset   0: block_id            u64 LE
//! offset   8: leaf_count (P)      u64 LE  (# Pairs in this node)
//! offset  16: child_count (C)     u64 LE  (# child block ids; 0 if leaf)
//! offset  24: pairs               P x 137 bytes
//! offset  24 + P*137: child_ids   C x 8 bytes
//! ```

use crate::error::{Error, Result};
use crate::pair::{Pair, PAIR_SIZE};

/// Fixed size, in bytes, of a block on disk.
pub const BLOCK_SIZE: usize = 4096;

const HEADER_SIZE: usize = 24;

/// Maximum number of Pairs a node may hold before it overflows.
///
/// An internal node with `n` Pairs carries `n + 1` 8-byte child ids, so
/// it is the tighter of the two shapes: `24 + n*137 + (n+1)*8 <= 4096`
/// bounds `n` at 28, one less than a leaf (`24 + n*137 <= 4096` allows
/// 29). A single node-wide threshold is used for both shapes so that
/// `overflows()` applies uniformly regardless of whether the node is a
/// leaf, which means 28 is the only value that keeps every node's
/// encoded form inside one block.
pub const MAX_LEAF_SIZE: usize = 28;

/// A single B-tree node, reconstituted on demand from its block.
///
/// A node is a leaf iff `children` is empty. Pairs are kept in ascending
/// key order; for an internal node with `n` Pairs there are `n + 1`
/// children, `children[i]` rooted strictly below `pairs[i].key` and
/// `children[i + 1]` strictly above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: u64,
    pub pairs: Vec<Pair>,
    pub children: Vec<u64>,
}

impl Node {
    pub fn new_leaf(id: u64) -> Self {
        Self { id, pairs: Vec::new(), children: Vec::new() }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True once an insert has pushed this node past `MAX_LEAF_SIZE` Pairs.
    pub fn overflows(&self) -> bool {
        self.pairs.len() > MAX_LEAF_SIZE
    }

    /// Packs this node into a 4096-byte block. All bytes past the live
    /// payload are zero.
    pub fn encode(&self) -> Result<[u8; BLOCK_SIZE]> {
        let leaf_count = self.pairs.len();
        let child_count = self.children.len();
        let payload = HEADER_SIZE + leaf_count * PAIR_SIZE + child_count * 8;
        if payload > BLOCK_SIZE {
            return Err(Error::Corrupt {
                block_id: self.id,
                reason: format!(
                    "{} pairs and {} children would need {} bytes, block holds {}",
                    leaf_count, child_count, payload, BLOCK_SIZE
                ),
            });
        }

        let mut buf = [0u8; BLOCK_SIZE];
        buf[0..8].copy_from_slice(&self.id.to_le_bytes());
        buf[8..16].copy_from_slice(&(leaf_count as u64).to_le_bytes());
        buf[16..24].copy_from_slice(&(child_count as u64).to_le_bytes());

        let mut offset = HEADER_SIZE;
        for pair in &self.pairs {
            buf[offset..offset + PAIR_SIZE].copy_from_slice(&pair.encode());
            offset += PAIR_SIZE;
        }
        for &child in &self.children {
            buf[offset..offset + 8].copy_from_slice(&child.to_le_bytes());
            offset += 8;
        }
        Ok(buf)
    }

    /// Unpacks a node from a 4096-byte block, rejecting counters that
    /// could not have come from a well-formed write.
    pub fn decode(bytes: &[u8; BLOCK_SIZE]) -> Result<Self> {
        let id = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
        let leaf_count = u64::from_le_bytes(bytes[8..16].try_into().unwrap()) as usize;
        let child_count = u64::from_le_bytes(bytes[16..24].try_into().unwrap()) as usize;

        if leaf_count > MAX_LEAF_SIZE || (child_count != 0 && child_count != leaf_count + 1) {
            return Err(Error::Corrupt {
                block_id: id,
                reason: format!(
                    "leaf_count={} child_count={} is not a valid node shape",
                    leaf_count, child_count
                ),
            });
        }
        let payload = HEADER_SIZE + leaf_count * PAIR_SIZE + child_count * 8;
        if payload > BLOCK_SIZE {
            return Err(Error::Corrupt {
                block_id: id,
                reason: format!("declared payload {} exceeds block size", payload),
            });
        }

        let mut offset = HEADER_SIZE;
        let mut pairs = Vec::with_capacity(leaf_count);
        for _ in 0..leaf_count {
            let chunk: [u8; PAIR_SIZE] = bytes[offset..offset + PAIR_SIZE].try_into().unwrap();
            pairs.push(Pair::decode(&chunk).map_err(|e| Error::Corrupt {
                block_id: id,
                reason: e.to_string(),
            })?);
            offset += PAIR_SIZE;
        }
        let mut children = Vec::with_capacity(child_count);
        for _ in 0..child_count {
            children.push(u64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap()));
            offset += 8;
        }
        Ok(Self { id, pairs, children })
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
