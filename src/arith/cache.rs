// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Single-writer-wins memo cells for grouping arithmetic.

Every entry is the result of a pure function of an immutable grouping.
Concurrent first readers may all compute it; each stores the identical
result and the first completed store is the one everyone reads from then
on. Nothing is ever invalidated and no lock is taken.
*/

use once_cell::race::{OnceBool, OnceNonZeroUsize};
use std::{fmt, num::NonZeroUsize};

/// Stored as `prefix + 1`.
#[inline]
fn encode_prefix(prefix: u32) -> NonZeroUsize {
    NonZeroUsize::MIN.saturating_add(prefix as usize)
}

#[inline]
fn decode_prefix(v: NonZeroUsize) -> u32 {
    (v.get() - 1) as u32
}

/// `None` is stored as 1, `Some(p)` as `p + 2`.
#[inline]
fn encode_opt_prefix(prefix: Option<u32>) -> NonZeroUsize {
    match prefix {
        None => NonZeroUsize::MIN,
        Some(p) => NonZeroUsize::MIN.saturating_add(p as usize + 1),
    }
}

#[inline]
fn decode_opt_prefix(v: NonZeroUsize) -> Option<u32> {
    match v.get() {
        1 => None,
        n => Some((n - 2) as u32),
    }
}

/* -------------------------------------------------------------------------- */

#[derive(Default)]
pub(crate) struct PrefixCache {
    min_prefix: OnceNonZeroUsize,
    equivalent_prefix: OnceNonZeroUsize,
    single_prefix_block: OnceBool,
}

impl PrefixCache {
    pub(crate) fn min_prefix(&self, compute: impl FnOnce() -> u32) -> u32 {
        decode_prefix(self.min_prefix.get_or_init(|| encode_prefix(compute())))
    }

    /// A single block prefix is also the minimum block prefix, so a found
    /// value fills both cells.
    pub(crate) fn equivalent_prefix(&self, compute: impl FnOnce() -> Option<u32>) -> Option<u32> {
        let v: NonZeroUsize = self.equivalent_prefix.get_or_init(|| encode_opt_prefix(compute()));
        let prefix: Option<u32> = decode_opt_prefix(v);
        if let Some(p) = prefix {
            let _ = self.min_prefix.set(encode_prefix(p));
        }
        prefix
    }

    pub(crate) fn single_prefix_block(&self, compute: impl FnOnce() -> bool) -> bool {
        self.single_prefix_block.get_or_init(compute)
    }

    /// Whether the minimum prefix has been published yet.
    #[cfg(test)]
    pub(crate) fn has_min_prefix(&self) -> bool {
        self.min_prefix.get().is_some()
    }
}

/// Copies whatever has been published so far.
impl Clone for PrefixCache {
    fn clone(&self) -> Self {
        let copy = PrefixCache::default();
        if let Some(v) = self.min_prefix.get() {
            let _ = copy.min_prefix.set(v);
        }
        if let Some(v) = self.equivalent_prefix.get() {
            let _ = copy.equivalent_prefix.set(v);
        }
        if let Some(v) = self.single_prefix_block.get() {
            let _ = copy.single_prefix_block.set(v);
        }
        copy
    }
}

impl fmt::Debug for PrefixCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixCache")
            .field("min_prefix", &self.min_prefix.get().map(decode_prefix))
            .field("equivalent_prefix", &self.equivalent_prefix.get().map(decode_opt_prefix))
            .field("single_prefix_block", &self.single_prefix_block.get())
            .finish()
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_encoding() {
        for p in [0, 1, 64, 128] {
            assert_eq!(decode_prefix(encode_prefix(p)), p);
            assert_eq!(decode_opt_prefix(encode_opt_prefix(Some(p))), Some(p));
        }
        assert_eq!(decode_opt_prefix(encode_opt_prefix(None)), None);
    }

    #[test]
    fn test_first_store_wins() {
        let cache = PrefixCache::default();
        assert_eq!(cache.min_prefix(|| 24), 24);
        assert_eq!(cache.min_prefix(|| 99), 24);
        assert!(cache.single_prefix_block(|| true));
        assert!(cache.single_prefix_block(|| false));
    }

    #[test]
    fn test_equivalent_fills_min() {
        let cache = PrefixCache::default();
        assert!(!cache.has_min_prefix());
        assert_eq!(cache.equivalent_prefix(|| Some(16)), Some(16));
        assert!(cache.has_min_prefix());
        assert_eq!(cache.min_prefix(|| unreachable!()), 16);

        let cache = PrefixCache::default();
        assert_eq!(cache.equivalent_prefix(|| None), None);
        assert!(!cache.has_min_prefix());
    }

    #[test]
    fn test_clone_keeps_published() {
        let cache = PrefixCache::default();
        cache.min_prefix(|| 8);
        let copy = cache.clone();
        assert_eq!(copy.min_prefix(|| unreachable!()), 8);
        assert_eq!(copy.equivalent_prefix(|| None), None);
    }

    #[test]
    fn test_concurrent_publish() {
        let cache = PrefixCache::default();
        let computed = AtomicUsize::new(0);
        let results: Vec<u32> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        cache.min_prefix(|| {
                            computed.fetch_add(1, Ordering::Relaxed);
                            48
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.iter().all(|&p| p == 48));
        assert!(computed.load(Ordering::Relaxed) >= 1);
    }
}
