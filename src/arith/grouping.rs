// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    cache::PrefixCache,
    division::{network_mask, shl_or_zero, Division},
};
use std::hash::{Hash, Hasher};

/**
An ordered sequence of [Division]s, most significant first, with an optional
prefix length. Immutable once built; the prefix arithmetic results are
memoized in a lock-free cache that concurrent readers may share.

```
use addrstr::{Division, Grouping};

// 10.1.0-255.*
let g = Grouping::new(vec![
    Division::single(10, 8),
    Division::single(1, 8),
    Division::full(8),
    Division::full(8),
]);
assert_eq!(g.min_prefix_len_for_block(), 16);
assert_eq!(g.prefix_len_for_single_block(), Some(16));
assert!(g.contains_prefix_block(16));
```
*/
#[derive(Clone, Debug, Default)]
pub struct Grouping {
    divisions: Vec<Division>,
    prefix_len: Option<u32>,
    cache: PrefixCache,
}

impl PartialEq for Grouping {
    fn eq(&self, other: &Self) -> bool {
        self.divisions == other.divisions && self.prefix_len == other.prefix_len
    }
}

impl Eq for Grouping {}

impl Hash for Grouping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.divisions.hash(state);
        self.prefix_len.hash(state);
    }
}

impl Grouping {
    pub fn new(divisions: Vec<Division>) -> Self {
        Grouping { divisions, prefix_len: None, cache: PrefixCache::default() }
    }

    /// Same divisions with the given prefix length, clamped to the bit count.
    pub fn with_prefix_len(self, prefix_len: Option<u32>) -> Self {
        let bits: u32 = self.bit_count();
        Grouping { prefix_len: prefix_len.map(|p| p.min(bits)), ..self }
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn division(&self, i: usize) -> Option<&Division> {
        self.divisions.get(i)
    }

    pub fn division_count(&self) -> usize {
        self.divisions.len()
    }

    pub fn bit_count(&self) -> u32 {
        self.divisions.iter().map(|d| d.bit_count()).sum()
    }

    pub fn prefix_len(&self) -> Option<u32> {
        self.prefix_len
    }

    pub fn is_multiple(&self) -> bool {
        self.divisions.iter().any(|d| d.is_multiple())
    }

    pub fn is_full_range(&self) -> bool {
        self.divisions.iter().all(|d| d.is_full_range())
    }

    /// Every value from the lowest to the highest is present: divisions after
    /// the first multi-valued one are all full range.
    pub fn is_sequential(&self) -> bool {
        match self.divisions.iter().position(|d| d.is_multiple()) {
            None => true,
            Some(i) => self.divisions[i + 1..].iter().all(|d| d.is_full_range()),
        }
    }

    /// Number of distinct values, saturating at `u128::MAX`.
    pub fn count(&self) -> u128 {
        self.divisions.iter().fold(1u128, |acc, d| acc.saturating_mul(d.count()))
    }

    /// Lowest value, from the low 128 bits of the concatenated divisions.
    pub fn value(&self) -> u128 {
        self.divisions.iter().fold(0u128, |acc, d| shl_or_zero(acc, d.bit_count()) | d.value())
    }

    /// Highest value, from the low 128 bits of the concatenated divisions.
    pub fn upper_value(&self) -> u128 {
        self.divisions.iter().fold(0u128, |acc, d| shl_or_zero(acc, d.bit_count()) | d.upper_value())
    }

    /// Big-endian bytes of the lowest value.
    pub fn bytes(&self) -> Vec<u8> {
        self.to_bytes(self.value())
    }

    /// Big-endian bytes of the highest value.
    pub fn upper_bytes(&self) -> Vec<u8> {
        self.to_bytes(self.upper_value())
    }

    fn to_bytes(&self, v: u128) -> Vec<u8> {
        let len: usize = (self.bit_count().min(u128::BITS) as usize).div_ceil(8);
        v.to_be_bytes()[16 - len..].to_vec()
    }

    /// The grouping of lowest division values.
    pub fn lower(&self) -> Grouping {
        let divs = self.divisions.iter().map(|d| Division::single(d.value(), d.bit_count())).collect();
        Grouping::new(divs).with_prefix_len(self.prefix_len)
    }

    /// The grouping of highest division values.
    pub fn upper(&self) -> Grouping {
        let divs = self.divisions.iter().map(|d| Division::single(d.upper_value(), d.bit_count())).collect();
        Grouping::new(divs).with_prefix_len(self.prefix_len)
    }

    /**
    The block of every value sharing the first `prefix` bits with this
    grouping: host bits of the straddling division cleared and filled,
    later divisions full range.
    */
    pub fn to_prefix_block(&self, prefix: u32) -> Grouping {
        let prefix: u32 = prefix.min(self.bit_count());
        let mut consumed: u32 = 0;
        let divs: Vec<Division> = self
            .divisions
            .iter()
            .map(|d| {
                let bits: u32 = d.bit_count();
                let local: u32 = prefix.saturating_sub(consumed).min(bits);
                consumed += bits;
                let mask: u128 = network_mask(bits, local);
                Division::new(d.value() & mask, d.upper_value() | (d.max_value() & !mask), bits)
            })
            .collect();
        Grouping::new(divs).with_prefix_len(Some(prefix))
    }

    /* ---------------------------------- */

    /**
    Whether the values include every value of each `prefix`-bit block they
    touch. The division holding the prefix boundary must contain its local
    sub-prefix block and every later division must be full range.
    */
    pub fn contains_prefix_block(&self, prefix: u32) -> bool {
        let prefix: u32 = prefix.min(self.bit_count());
        let mut prev: u32 = 0;
        for (i, d) in self.divisions.iter().enumerate() {
            let total: u32 = prev + d.bit_count();
            if prefix < total {
                if !d.contains_prefix_block(prefix - prev) {
                    return false;
                }
                return self.divisions[i + 1..].iter().all(|d| d.is_full_range());
            }
            prev = total;
        }
        true
    }

    /// Whether the values are exactly one `prefix`-bit block.
    pub fn contains_single_prefix_block(&self, prefix: u32) -> bool {
        let prefix: u32 = prefix.min(self.bit_count());
        let mut prev: u32 = 0;
        for (i, d) in self.divisions.iter().enumerate() {
            let total: u32 = prev + d.bit_count();
            if prefix >= total {
                if d.is_multiple() {
                    return false;
                }
            } else {
                if !d.contains_single_prefix_block(prefix - prev) {
                    return false;
                }
                return self.divisions[i + 1..].iter().all(|d| d.is_full_range());
            }
            prev = total;
        }
        true
    }

    /// Smallest prefix length for which the values span whole prefix
    /// blocks. The bit count for a single value, 0 for the full range.
    pub fn min_prefix_len_for_block(&self) -> u32 {
        self.cache.min_prefix(|| {
            let mut total: u32 = self.bit_count();
            for d in self.divisions.iter().rev() {
                let bits: u32 = d.bit_count();
                let local: u32 = d.min_prefix_len_for_block();
                if local == bits {
                    break;
                }
                total -= bits;
                if local != 0 {
                    total += local;
                    break;
                }
            }
            total
        })
    }

    /// Prefix length for which the values are exactly one prefix block, if
    /// there is one.
    pub fn prefix_len_for_single_block(&self) -> Option<u32> {
        self.cache.equivalent_prefix(|| {
            let mut total: u32 = 0;
            for (i, d) in self.divisions.iter().enumerate() {
                let local: u32 = d.prefix_len_for_single_block()?;
                total += local;
                if local < d.bit_count() {
                    if !self.divisions[i + 1..].iter().all(|d| d.is_full_range()) {
                        return None;
                    }
                    break;
                }
            }
            Some(total)
        })
    }

    /// Has a prefix length and contains the block for it.
    pub fn is_prefix_block(&self) -> bool {
        self.prefix_len.is_some_and(|p| self.contains_prefix_block(p))
    }

    /// Has a prefix length and is exactly the one block for it.
    pub fn is_single_prefix_block(&self) -> bool {
        self.cache.single_prefix_block(|| self.prefix_len.is_some_and(|p| self.contains_single_prefix_block(p)))
    }
}

impl FromIterator<Division> for Grouping {
    fn from_iter<I: IntoIterator<Item = Division>>(iter: I) -> Self {
        Grouping::new(iter.into_iter().collect())
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn octets(ranges: &[(u128, u128)]) -> Grouping {
        ranges.iter().map(|&(lo, hi)| Division::new(lo, hi, 8)).collect()
    }

    fn ipv4(v: u32) -> Grouping {
        v.to_be_bytes().iter().map(|&b| Division::single(b as u128, 8)).collect()
    }

    #[test]
    fn test_values_and_bytes() {
        let g = octets(&[(192, 192), (168, 168), (0, 255), (1, 1)]);
        assert_eq!(g.bit_count(), 32);
        assert_eq!(g.value(), 0xc0a8_0001);
        assert_eq!(g.upper_value(), 0xc0a8_ff01);
        assert_eq!(g.bytes(), vec![192, 168, 0, 1]);
        assert_eq!(g.upper_bytes(), vec![192, 168, 255, 1]);
        assert_eq!(g.count(), 256);
        assert!(!g.is_sequential());
        assert!(g.is_multiple());
    }

    #[test]
    fn test_count_saturates() {
        let g: Grouping = (0..8).map(|_| Division::full(16)).collect();
        assert_eq!(g.count(), u128::MAX);
        assert!(g.is_full_range());
        assert_eq!(g.upper_value(), u128::MAX);
    }

    #[test]
    fn test_contains_prefix_block() {
        let g = octets(&[(10, 10), (1, 1), (0, 255), (0, 255)]);
        assert!(g.contains_prefix_block(16));
        assert!(g.contains_prefix_block(20));
        assert!(g.contains_prefix_block(32));
        assert!(!g.contains_prefix_block(15));
        assert!(!g.contains_prefix_block(8));
        // boundary inside the third octet
        let g = octets(&[(10, 10), (1, 1), (16, 31), (0, 255)]);
        assert!(g.contains_prefix_block(20));
        assert!(!g.contains_prefix_block(19));
        // a multi-valued octet after the boundary that is not full range
        let g = octets(&[(10, 10), (0, 255), (0, 1), (0, 255)]);
        assert!(!g.contains_prefix_block(8));
    }

    #[test]
    fn test_single_prefix_block() {
        let g = octets(&[(10, 10), (1, 1), (0, 255), (0, 255)]);
        assert!(g.contains_single_prefix_block(16));
        assert!(!g.contains_single_prefix_block(8));
        let g = octets(&[(10, 11), (0, 255), (0, 255), (0, 255)]);
        assert!(g.contains_single_prefix_block(7));
        assert!(!g.contains_single_prefix_block(8));
        assert!(g.contains_prefix_block(8));
    }

    #[test]
    fn test_min_prefix_len_for_block() {
        assert_eq!(ipv4(0x0a01_0203).min_prefix_len_for_block(), 32);
        assert_eq!(octets(&[(10, 10), (1, 1), (0, 255), (0, 255)]).min_prefix_len_for_block(), 16);
        assert_eq!(octets(&[(10, 10), (1, 1), (16, 47), (0, 255)]).min_prefix_len_for_block(), 20);
        assert_eq!(octets(&[(0, 255); 4]).min_prefix_len_for_block(), 0);
        assert_eq!(octets(&[(10, 10), (0, 255), (0, 1), (0, 255)]).min_prefix_len_for_block(), 23);
    }

    #[test]
    fn test_prefix_len_for_single_block() {
        assert_eq!(octets(&[(10, 10), (1, 1), (0, 255), (0, 255)]).prefix_len_for_single_block(), Some(16));
        assert_eq!(octets(&[(10, 10), (1, 1), (16, 47), (0, 255)]).prefix_len_for_single_block(), None);
        assert_eq!(octets(&[(10, 10), (0, 255), (0, 1), (0, 255)]).prefix_len_for_single_block(), None);
        assert_eq!(ipv4(1).prefix_len_for_single_block(), Some(32));
        assert_eq!(octets(&[(0, 255); 4]).prefix_len_for_single_block(), Some(0));
    }

    #[test]
    fn test_prefix_block_flags() {
        let g = octets(&[(10, 10), (1, 1), (0, 255), (0, 255)]);
        assert!(!g.is_prefix_block());
        let g = g.with_prefix_len(Some(16));
        assert!(g.is_prefix_block());
        assert!(g.is_single_prefix_block());
        let g = octets(&[(10, 11), (0, 255), (0, 255), (0, 255)]).with_prefix_len(Some(8));
        assert!(g.is_prefix_block());
        assert!(!g.is_single_prefix_block());
    }

    #[test]
    fn test_to_prefix_block_contains_prefix() {
        let addr = ipv4(0xc0a8_0a0b);
        for p in 0..=32 {
            let block = addr.to_prefix_block(p);
            assert!(block.contains_prefix_block(p), "prefix {p}");
            assert!(block.contains_single_prefix_block(p), "prefix {p}");
            assert_eq!(block.prefix_len_for_single_block(), Some(p));
            assert_eq!(block.prefix_len(), Some(p));
        }
        let block = addr.to_prefix_block(20);
        assert_eq!(block.value(), 0xc0a8_0000);
        assert_eq!(block.upper_value(), 0xc0a8_0fff);
    }

    #[test]
    fn test_lower_upper() {
        let g = octets(&[(1, 2), (3, 3)]).with_prefix_len(Some(8));
        assert_eq!(g.lower(), octets(&[(1, 1), (3, 3)]).with_prefix_len(Some(8)));
        assert_eq!(g.upper().value(), 0x0203);
    }

    #[test]
    fn test_concurrent_min_prefix() {
        let g = octets(&[(10, 10), (1, 1), (16, 47), (0, 255)]);
        let results: Vec<u32> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| g.min_prefix_len_for_block())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.iter().all(|&p| p == 20));
    }
}
