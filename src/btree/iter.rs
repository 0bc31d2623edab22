// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! A post-order iterator over a B-tree's Pairs.
//!
//! Traversal state lives entirely in the `Iter` value returned by
//! [`Btree::iter`](super::tree::Btree::iter), not in the tree handle, so
//! several iterators may be open over the same tree at once.

use crate::error::Result;
use crate::pair::Pair;

use super::block::BlockService;

enum Frame {
    Visit(u64),
    Emit(Vec<Pair>, usize),
}

/// Visits every child subtree, left to right, before a node's own
/// Pairs — an iterative restatement of the natural recursive walk.
pub struct Iter<'a> {
    blocks: &'a BlockService,
    stack: Vec<Frame>,
}

impl<'a> Iter<'a> {
    pub(super) fn new(blocks: &'a BlockService, root: u64) -> Self {
        Self { blocks, stack: vec![Frame::Visit(root)] }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Result<(Vec<u8>, Vec<u8>, u32)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Frame::Visit(id) => {
                    let node = match self.blocks.read_block(id) {
                        Ok(node) => node,
                        Err(e) => return Some(Err(e)),
                    };
                    self.stack.push(Frame::Emit(node.pairs, 0));
                    for &child in node.children.iter().rev() {
                        self.stack.push(Frame::Visit(child));
                    }
                }
                Frame::Emit(pairs, idx) => {
                    if idx >= pairs.len() {
                        continue;
                    }
                    let pair = pairs[idx].clone();
                    self.stack.push(Frame::Emit(pairs, idx + 1));
                    return Some(Ok((pair.key, pair.value, pair.timestamp)));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
