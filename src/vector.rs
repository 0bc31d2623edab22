// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! A brute-force vector similarity scan riding the B-tree's iterator.
//!
//! Value strings may encode a `[]f64` via a `$`-separated decimal format:
//! `"v0$v1$...$vN$"`. This component exists to exercise the iterator
//! contract and is not required for a minimal port.

use crate::btree::Btree;
use crate::error::Result;

/// Encodes a vector as `"v0$v1$...$vN$"`.
pub fn encode_vector(values: &[f64]) -> Vec<u8> {
    let mut s = String::new();
    for v in values {
        s.push_str(&v.to_string());
        s.push('$');
    }
    s.into_bytes()
}

/// Decodes a `$`-separated vector, or `None` if any component fails to
/// parse as a decimal float.
pub fn decode_vector(bytes: &[u8]) -> Option<Vec<f64>> {
    let text = std::str::from_utf8(bytes).ok()?;
    text.split('$')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok())
        .collect()
}

/// Cosine distance: `1 - cosine_similarity(a, b)`. Treats a zero-length
/// vector as maximally distant (`1.0`) rather than dividing by zero.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

/// Iterates every key in `tree`, decodes its value as a vector, scores it
/// against `query` with `distance`, and returns the `limit` closest keys
/// ascending by distance. Keys whose value does not decode as a vector
/// are skipped.
pub fn search_by_vector<D>(
    tree: &Btree,
    query: &[f64],
    limit: usize,
    distance: D,
) -> Result<Vec<(Vec<u8>, f64)>>
where
    D: Fn(&[f64], &[f64]) -> f64,
{
    let mut scored = Vec::new();
    tree.iterate(|key, value, _t| {
        if let Some(vector) = decode_vector(value) {
            scored.push((key.to_vec(), distance(query, &vector)));
        }
        Ok(())
    })?;
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    Ok(scored)
}

#[cfg(test)]
#[path = "vector_test.rs"]
mod vector_test;
