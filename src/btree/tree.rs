// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Disk node & B-tree algorithms: insert, search, and split, all routed
//! through a [`BlockService`].
//!
//! Within a node, Pairs are kept in ascending key order. A node overflows
//! once it holds one more than [`super::MAX_LEAF_SIZE`] Pairs after an
//! insert; the split promotes a middle Pair to the parent (or grows a
//! fresh root if the node that split was block 0).

use std::path::Path;

use crate::error::Result;
use crate::pair::Pair;

use super::block::BlockService;
use super::iter::Iter;
use super::node::Node;

/// Outcome of a recursive insert: either the subtree absorbed the new
/// Pair without growing, or it split and hands a promoted middle Pair
/// plus two new child ids back to its caller.
enum Insert {
    Done,
    Split { middle: Pair, left: u64, right: u64 },
}

/// A disk-resident B-tree of fixed 4096-byte blocks.
///
/// `Btree` owns the block service; the block service exclusively owns
/// the backing file handle. There is no in-memory node cache: every
/// operation reconstitutes the nodes it touches from disk.
pub struct Btree {
    blocks: BlockService,
}

impl Btree {
    /// Opens (creating if necessary) the B-tree backed by `path`. Leaves
    /// an empty root block (id 0) in place if the file was just created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let blocks = BlockService::open(path)?;
        blocks.root_block()?;
        Ok(Self { blocks })
    }

    /// Validates `pair`, then inserts it. Duplicate keys are not
    /// detected at this layer: re-inserting an existing key appends a
    /// second Pair rather than replacing the first.
    pub fn insert(&self, pair: Pair) -> Result<()> {
        pair.validate()?;
        match insert_into(&self.blocks, 0, pair)? {
            Insert::Done => Ok(()),
            Insert::Split { .. } => unreachable!("root split is absorbed by insert_into"),
        }
    }

    /// Linearly scans from the root down, returning the first matching
    /// Pair's value and timestamp. Does not resolve duplicate keys to
    /// the latest timestamp; callers needing that guarantee should use
    /// the time-stamped map layer.
    pub fn get(&self, key: &[u8]) -> Result<Option<(Vec<u8>, u32)>> {
        search(&self.blocks, 0, key)
    }

    /// Visits every Pair in the tree in post-order (all of a node's
    /// children, left to right, then the node's own Pairs).
    pub fn iterate<F>(&self, mut visitor: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8], u32) -> Result<()>,
    {
        for item in self.iter() {
            let (k, v, t) = item?;
            visitor(&k, &v, t)?;
        }
        Ok(())
    }

    /// Returns a fresh, independent iterator positioned at the root.
    /// Traversal state lives entirely in the returned `Iter`, so
    /// multiple iterators may be live concurrently.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.blocks, 0)
    }

    /// Returns the root block's Pair count. This is not the total number
    /// of Pairs in the tree; see the design notes on this quirk.
    pub fn size(&self) -> Result<usize> {
        Ok(self.blocks.read_block(0)?.pairs.len())
    }
}

fn insert_into(blocks: &BlockService, node_id: u64, pair: Pair) -> Result<Insert> {
    let mut node = blocks.read_block(node_id)?;

    if node.is_leaf() {
        let idx = node.pairs.partition_point(|p| p.key < pair.key);
        node.pairs.insert(idx, pair);
        if !node.overflows() {
            blocks.update(&node)?;
            return Ok(Insert::Done);
        }
        return split_and_promote(blocks, node, node_id);
    }

    let child_idx = node.pairs.iter().position(|p| p.key > pair.key).unwrap_or(node.pairs.len());
    let child_id = node.children[child_idx];
    match insert_into(blocks, child_id, pair)? {
        Insert::Done => {
            blocks.update(&node)?;
            Ok(Insert::Done)
        }
        Insert::Split { middle, left, right } => {
            let idx = node.pairs.partition_point(|p| p.key < middle.key);
            node.pairs.insert(idx, middle);
            node.children[idx] = left;
            node.children.insert(idx + 1, right);
            if !node.overflows() {
                blocks.update(&node)?;
                return Ok(Insert::Done);
            }
            split_and_promote(blocks, node, node_id)
        }
    }
}

/// Splits an overflowed node into two siblings plus a promoted middle
/// Pair, then either grows a new root (if `node_id` was block 0) or
/// returns the split to the caller.
fn split_and_promote(blocks: &BlockService, mut node: Node, node_id: u64) -> Result<Insert> {
    let is_leaf = node.is_leaf();
    let mid = node.pairs.len() / 2;
    let mut right_pairs = node.pairs.split_off(mid);
    let middle = right_pairs.remove(0);
    let left_pairs = node.pairs;

    let (left_children, right_children) = if is_leaf {
        (Vec::new(), Vec::new())
    } else {
        let right_children = node.children.split_off(mid + 1);
        (node.children, right_children)
    };

    let mut left = Node { id: 0, pairs: left_pairs, children: left_children };
    let mut right = Node { id: 0, pairs: right_pairs, children: right_children };
    let left_id = blocks.save_new(&mut left)?;
    let right_id = blocks.save_new(&mut right)?;

    if node_id == 0 {
        let mut new_root = Node { id: 0, pairs: vec![middle], children: vec![left_id, right_id] };
        blocks.update_root(&mut new_root)?;
        Ok(Insert::Done)
    } else {
        Ok(Insert::Split { middle, left: left_id, right: right_id })
    }
}

fn search(blocks: &BlockService, node_id: u64, key: &[u8]) -> Result<Option<(Vec<u8>, u32)>> {
    let node = blocks.read_block(node_id)?;
    if let Some(p) = node.pairs.iter().find(|p| p.key == key) {
        return Ok(Some((p.value.clone(), p.timestamp)));
    }
    if node.is_leaf() {
        return Ok(None);
    }
    let child_idx = node.pairs.iter().position(|p| p.key.as_slice() > key).unwrap_or(node.pairs.len());
    search(blocks, node.children[child_idx], key)
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
