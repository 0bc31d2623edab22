// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The block service: an exclusive handle on the backing file, with a
//! mutex serializing writes. Reads are positional and need no lock.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use crate::error::{Error, Result};

use super::node::{Node, BLOCK_SIZE};

/// Reads and writes fixed 4096-byte blocks of a single backing file.
///
/// Opening the same file from two `BlockService` instances in the same
/// process is undefined; each service exclusively owns its file handle.
pub struct BlockService {
    file: File,
    write_lock: Mutex<()>,
}

impl BlockService {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)
            .map_err(|e| Error::io("open", e))?;
        Ok(Self { file, write_lock: Mutex::new(()) })
    }

    /// `(file_size / 4096) - 1`, or `-1` if the file is empty.
    pub fn latest_block_id(&self) -> Result<i64> {
        let len = self.file.metadata().map_err(|e| Error::io("stat", e))?.len();
        if len == 0 {
            return Ok(-1);
        }
        Ok((len / BLOCK_SIZE as u64) as i64 - 1)
    }

    /// If the file is empty, allocates block 0 (leaf, no pairs) and
    /// persists it before returning; otherwise reads block 0.
    pub fn root_block(&self) -> Result<Node> {
        if self.latest_block_id()? < 0 {
            let root = Node::new_leaf(0);
            self.write_block(&root)?;
            return Ok(root);
        }
        self.read_block(0)
    }

    /// Seeks to `id * 4096`, reads 4096 bytes, and decodes them.
    pub fn read_block(&self, id: u64) -> Result<Node> {
        let mut buf = [0u8; BLOCK_SIZE];
        io_at::read_exact_at(&self.file, &mut buf, id * BLOCK_SIZE as u64)
            .map_err(|e| Error::io("read_block", e))?;
        Node::decode(&buf)
    }

    /// Under the write mutex, seeks to `node.id * 4096` and writes 4096
    /// bytes. The write is positional; concurrent writes to distinct ids
    /// are serialized but safe.
    pub fn write_block(&self, node: &Node) -> Result<()> {
        let bytes = node.encode()?;
        let _guard = self.write_lock.lock().unwrap();
        io_at::write_all_at(&self.file, &bytes, node.id * BLOCK_SIZE as u64)
            .map_err(|e| Error::io("write_block", e))
    }

    /// Assigns `node.id = latest_block_id() + 1`, then writes it. Returns
    /// the assigned id.
    pub fn save_new(&self, node: &mut Node) -> Result<u64> {
        let id = (self.latest_block_id()? + 1) as u64;
        node.id = id;
        self.write_block(node)?;
        Ok(id)
    }

    /// Writes `node` back at its existing id.
    pub fn update(&self, node: &Node) -> Result<()> {
        self.write_block(node)
    }

    /// Forces `node.id = 0`, then writes it.
    pub fn update_root(&self, node: &mut Node) -> Result<()> {
        node.id = 0;
        self.write_block(node)
    }
}

/// Positional file I/O, factored out so the block service does not need
/// `&mut File` (and therefore an outer lock) for reads.
#[cfg(unix)]
mod io_at {
    use std::fs::File;
    use std::io;
    use std::os::unix::fs::FileExt;

    pub fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
        file.read_exact_at(buf, offset)
    }

    pub fn write_all_at(file: &File, buf: &[u8], offset: u64) -> io::Result<()> {
        file.write_all_at(buf, offset)
    }
}

#[cfg(windows)]
mod io_at {
    use std::fs::File;
    use std::io;
    use std::os::windows::fs::FileExt;

    pub fn read_exact_at(file: &File, mut buf: &mut [u8], mut offset: u64) -> io::Result<()> {
        while !buf.is_empty() {
            let n = file.seek_read(buf, offset)?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "short read"));
            }
            buf = &mut buf[n..];
            offset += n as u64;
        }
        Ok(())
    }

    pub fn write_all_at(file: &File, mut buf: &[u8], mut offset: u64) -> io::Result<()> {
        while !buf.is_empty() {
            let n = file.seek_write(buf, offset)?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "short write"));
            }
            buf = &buf[n..];
            offset += n as u64;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "block_test.rs"]
mod block_test;
