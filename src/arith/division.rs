// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One address division and the prefix arithmetic on a lower/upper pair.

/// All ones in the low `bits` bits.
#[inline]
pub(crate) fn width_mask(bits: u32) -> u128 {
    if bits >= u128::BITS {
        !0u128
    } else {
        (1u128 << bits) - 1
    }
}

#[inline]
pub(crate) fn shl_or_zero(v: u128, bits: u32) -> u128 {
    v.checked_shl(bits).unwrap_or(0)
}

#[inline]
pub(crate) fn shr_or_zero(v: u128, bits: u32) -> u128 {
    v.checked_shr(bits).unwrap_or(0)
}

/// `prefix` leading ones within a field of `bits` bits.
#[inline]
pub(crate) fn network_mask(bits: u32, prefix: u32) -> u128 {
    if prefix == 0 {
        return 0;
    }
    if prefix >= bits {
        return width_mask(bits);
    }
    width_mask(bits) & !width_mask(bits - prefix)
}

/// The complement of [network_mask] within `bits`.
#[inline]
pub(crate) fn host_mask(bits: u32, prefix: u32) -> u128 {
    width_mask(bits) & !network_mask(bits, prefix)
}

/// `[lower, upper]` contains every value of each `prefix`-bit block it touches.
pub(crate) fn is_prefix_block_vals(lower: u128, upper: u128, prefix: u32, bits: u32) -> bool {
    if prefix == 0 {
        return lower == 0 && upper == width_mask(bits);
    }
    if prefix >= bits {
        return true;
    }
    let host: u128 = host_mask(bits, prefix);
    lower & host == 0 && upper & host == host
}

/// `[lower, upper]` is exactly one `prefix`-bit block.
pub(crate) fn is_single_prefix_block_vals(lower: u128, upper: u128, prefix: u32, bits: u32) -> bool {
    let host: u128 = host_mask(bits, prefix.min(bits));
    lower & host == 0 && upper == lower | host
}

/**
Smallest prefix length for which `[lower, upper]` spans whole prefix blocks.
Returns `bits` for a single value and 0 for the full range.
*/
pub(crate) fn min_prefix_len_for_block(lower: u128, upper: u128, bits: u32) -> u32 {
    if lower == upper {
        return bits;
    }
    if lower == 0 && upper == width_mask(bits) {
        return 0;
    }
    let lower_zeros: u32 = lower.trailing_zeros();
    let upper_ones: u32 = (!upper).trailing_zeros();
    bits - lower_zeros.min(upper_ones).min(bits)
}

/// Prefix length for which `[lower, upper]` is exactly one block, if any.
pub(crate) fn prefix_len_for_single_block(lower: u128, upper: u128, bits: u32) -> Option<u32> {
    let prefix: u32 = min_prefix_len_for_block(lower, upper, bits);
    if prefix == bits {
        return (lower == upper).then_some(bits);
    }
    let shift: u32 = bits - prefix;
    let same: bool = shr_or_zero(lower, shift) == shr_or_zero(upper, shift);
    same.then_some(prefix)
}

/* -------------------------------------------------------------------------- */

/**
A single division of an address: an IPv4 or MAC octet, an IPv6 segment, or
an arbitrary width field of up to 128 bits. Holds the inclusive value range
`lower..=upper`.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Division {
    Fixed8 { lower: u8, upper: u8 },
    Fixed16 { lower: u16, upper: u16 },
    Large { lower: u128, upper: u128, bits: u32 },
}

impl Division {
    /// Range division of the given width. Bounds are masked to the width and
    /// ordered.
    pub fn new(lower: u128, upper: u128, bits: u32) -> Self {
        let bits: u32 = bits.clamp(1, u128::BITS);
        let mask: u128 = width_mask(bits);
        let (lower, upper) = (lower & mask, upper & mask);
        let (lower, upper) = if lower <= upper { (lower, upper) } else { (upper, lower) };
        match bits {
            8 => Division::Fixed8 { lower: lower as u8, upper: upper as u8 },
            16 => Division::Fixed16 { lower: lower as u16, upper: upper as u16 },
            _ => Division::Large { lower, upper, bits },
        }
    }

    pub fn single(value: u128, bits: u32) -> Self {
        Self::new(value, value, bits)
    }

    /// Every value the width allows.
    pub fn full(bits: u32) -> Self {
        Self::new(0, width_mask(bits), bits)
    }

    pub fn bit_count(&self) -> u32 {
        match self {
            Division::Fixed8 { .. } => 8,
            Division::Fixed16 { .. } => 16,
            Division::Large { bits, .. } => *bits,
        }
    }

    pub fn value(&self) -> u128 {
        match *self {
            Division::Fixed8 { lower, .. } => lower as u128,
            Division::Fixed16 { lower, .. } => lower as u128,
            Division::Large { lower, .. } => lower,
        }
    }

    pub fn upper_value(&self) -> u128 {
        match *self {
            Division::Fixed8 { upper, .. } => upper as u128,
            Division::Fixed16 { upper, .. } => upper as u128,
            Division::Large { upper, .. } => upper,
        }
    }

    pub fn max_value(&self) -> u128 {
        width_mask(self.bit_count())
    }

    pub fn is_multiple(&self) -> bool {
        self.value() != self.upper_value()
    }

    pub fn is_full_range(&self) -> bool {
        self.value() == 0 && self.upper_value() == self.max_value()
    }

    /// Number of values, saturating at `u128::MAX` for a full 128-bit range.
    pub fn count(&self) -> u128 {
        (self.upper_value() - self.value()).saturating_add(1)
    }

    pub fn contains_prefix_block(&self, prefix: u32) -> bool {
        is_prefix_block_vals(self.value(), self.upper_value(), prefix, self.bit_count())
    }

    pub fn contains_single_prefix_block(&self, prefix: u32) -> bool {
        is_single_prefix_block_vals(self.value(), self.upper_value(), prefix, self.bit_count())
    }

    pub fn min_prefix_len_for_block(&self) -> u32 {
        min_prefix_len_for_block(self.value(), self.upper_value(), self.bit_count())
    }

    pub fn prefix_len_for_single_block(&self) -> Option<u32> {
        prefix_len_for_single_block(self.value(), self.upper_value(), self.bit_count())
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks() {
        assert_eq!(network_mask(32, 24), 0xffff_ff00);
        assert_eq!(host_mask(32, 24), 0xff);
        assert_eq!(network_mask(128, 128), !0u128);
        assert_eq!(network_mask(16, 0), 0);
        assert_eq!(host_mask(8, 8), 0);
        assert_eq!(width_mask(128), !0u128);
    }

    #[test]
    fn test_variants() {
        assert_eq!(Division::new(5, 2, 8), Division::Fixed8 { lower: 2, upper: 5 });
        assert_eq!(Division::single(0x1ff, 16), Division::Fixed16 { lower: 0x1ff, upper: 0x1ff });
        assert_eq!(Division::full(24).upper_value(), 0xff_ffff);
        assert_eq!(Division::full(128).count(), u128::MAX);
        assert_eq!(Division::new(0, 0x0f, 8).count(), 16);
    }

    #[test]
    fn test_contains_prefix_block() {
        let d = Division::new(0x10, 0x1f, 8);
        assert!(d.contains_prefix_block(4));
        assert!(d.contains_prefix_block(8));
        assert!(!d.contains_prefix_block(3));
        assert!(!d.contains_prefix_block(0));
        assert!(Division::full(8).contains_prefix_block(0));
        // two whole /4 blocks
        let d = Division::new(0x10, 0x2f, 8);
        assert!(d.contains_prefix_block(4));
        assert!(!d.contains_single_prefix_block(4));
        assert!(Division::new(0x10, 0x1f, 8).contains_single_prefix_block(4));
    }

    #[test]
    fn test_min_prefix_len() {
        assert_eq!(Division::single(7, 8).min_prefix_len_for_block(), 8);
        assert_eq!(Division::full(16).min_prefix_len_for_block(), 0);
        assert_eq!(Division::new(0x10, 0x2f, 8).min_prefix_len_for_block(), 4);
        assert_eq!(Division::new(0, 0x7f, 8).min_prefix_len_for_block(), 1);
        assert_eq!(Division::new(1, 2, 8).min_prefix_len_for_block(), 8);
    }

    #[test]
    fn test_prefix_len_for_single_block() {
        assert_eq!(Division::new(0x10, 0x1f, 8).prefix_len_for_single_block(), Some(4));
        assert_eq!(Division::new(0x10, 0x2f, 8).prefix_len_for_single_block(), None);
        assert_eq!(Division::single(3, 8).prefix_len_for_single_block(), Some(8));
        assert_eq!(Division::full(128).prefix_len_for_single_block(), Some(0));
        assert_eq!(Division::new(1, 2, 8).prefix_len_for_single_block(), None);
    }
}
