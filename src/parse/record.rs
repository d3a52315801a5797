// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// IP address version as far as the scanner has resolved it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum IpVersion {
    #[default]
    Indeterminate,
    V4,
    V6,
}

impl IpVersion {
    pub fn is_ipv4(&self) -> bool {
        *self == IpVersion::V4
    }

    pub fn is_ipv6(&self) -> bool {
        *self == IpVersion::V6
    }

    /// Address size in bits, zero while indeterminate.
    pub fn bit_count(&self) -> u32 {
        match self {
            IpVersion::V4 => super::IPV4_BITS,
            IpVersion::V6 => super::IPV6_BITS,
            IpVersion::Indeterminate => 0,
        }
    }
}

/// MAC address separator style.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MacFormat {
    /// `aa:bb:cc:dd:ee:ff`
    Colon,
    /// `aa-bb-cc-dd-ee-ff`, ranges written with `|`
    Dashed,
    /// `aabb.ccdd.eeff`
    Dotted,
    /// `aa bb cc dd ee ff`
    Space,
}

/* -------------------------------------------------------------------------- */

/// Per-segment flags.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SegmentFlags {
    /// `*`
    pub wildcard:           bool,
    /// one or more trailing `_`
    pub single_wildcard:    bool,
    /// written as `a-b`
    pub range_wildcard:     bool,
    /// plain digits in the family's default radix, no leading zeros
    pub standard_str:       bool,
    /// range written with the family's standard range character
    pub standard_range_str: bool,
    /// `-b`: the lower bound was omitted
    pub inferred_lower:     bool,
    /// `a-` or a joined segment: the upper bound was omitted
    pub inferred_upper:     bool,
    /// a `*` standing for both an IPv6 segment and the following IPv4 section
    pub merged_mixed:       bool,
}

/// One committed segment. `lower <= upper` always holds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SegmentRecord {
    pub lower: u64,
    pub upper: u64,
    /// high 64 bits, only for a single-segment IPv6 address
    pub extended_lower: u64,
    pub extended_upper: u64,
    /// radix of the lower bound
    pub radix: u32,
    /// radix of the upper bound, which may differ in a range like `0x1-20`
    pub upper_radix: u32,
    /// byte offset of the segment's first character
    pub start: usize,
    /// start of the lower bound text, radix prefix and leading zeros included
    pub lower_start: usize,
    /// end of the lower bound text
    pub lower_end: usize,
    /// start of the upper bound text
    pub upper_start: usize,
    /// end of the upper bound text
    pub upper_end: usize,
    pub flags: SegmentFlags,
}

impl SegmentRecord {
    pub fn lower_value(&self) -> u128 {
        (self.extended_lower as u128) << 64 | self.lower as u128
    }

    pub fn upper_value(&self) -> u128 {
        (self.extended_upper as u128) << 64 | self.upper as u128
    }

    pub fn is_range(&self) -> bool {
        self.lower != self.upper || self.extended_lower != self.extended_upper
    }

    /// Swap the bounds together with their string offsets.
    pub(crate) fn swap_bounds(&mut self) {
        std::mem::swap(&mut self.lower, &mut self.upper);
        std::mem::swap(&mut self.extended_lower, &mut self.extended_upper);
        std::mem::swap(&mut self.radix, &mut self.upper_radix);
        std::mem::swap(&mut self.lower_start, &mut self.upper_start);
        std::mem::swap(&mut self.lower_end, &mut self.upper_end);
        std::mem::swap(&mut self.flags.inferred_lower, &mut self.flags.inferred_upper);
    }
}

/* -------------------------------------------------------------------------- */

/// The trailing qualifier of an address string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Qualifier {
    pub prefix_len: Option<u32>,
    pub zone: Option<String>,
    pub port: Option<u16>,
    pub service: Option<String>,
    /// mask given in place of a prefix length
    pub mask: Option<Box<ParseRecord>>,
}

impl Qualifier {
    pub fn is_empty(&self) -> bool {
        self.prefix_len.is_none()
            && self.zone.is_none()
            && self.port.is_none()
            && self.service.is_none()
            && self.mask.is_none()
    }
}

/// Whole-string flags.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RecordFlags {
    pub empty:              bool,
    /// `*` alone
    pub all:                bool,
    pub single_segment:     bool,
    pub wildcard:           bool,
    /// trailing segment stands for several `inet_aton` segments
    pub inet_aton_joined:   bool,
    /// some segment used `inet_aton` hex or octal notation
    pub inet_aton_value:    bool,
    pub ipv4_leading_zeros: bool,
    pub binary_digits:      bool,
    pub base85:             bool,
    pub zoned:              bool,
    pub prefix_separator:   bool,
    /// MAC `aaaaaa-bbbbbb`
    pub double_segment:     bool,
    /// MAC with 8 (dotted 4) segments
    pub extended_mac:       bool,
}

/**
Everything the scanner learned about one address string. Filled strictly left
to right; immutable once returned.
*/
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParseRecord {
    pub(crate) segments: Vec<SegmentRecord>,
    pub(crate) version: IpVersion,
    pub(crate) mac_format: Option<MacFormat>,
    pub(crate) is_mac: bool,
    pub(crate) flags: RecordFlags,
    /// segment index of the `::` placeholder
    pub(crate) compressed_index: Option<usize>,
    /// byte offset of the first `:` of `::`
    pub(crate) compressed_offset: Option<usize>,
    pub(crate) mixed: Option<Box<ParseRecord>>,
    pub(crate) qualifier: Qualifier,
    pub(crate) qualifier_index: Option<usize>,
    pub(crate) start: usize,
    /// end of the address body; the qualifier (if any) follows
    pub(crate) end: usize,
}

impl ParseRecord {
    pub(crate) fn new(start: usize, end: usize, is_mac: bool) -> Self {
        ParseRecord { start, end, is_mac, ..Default::default() }
    }

    pub fn segments(&self) -> &[SegmentRecord] {
        &self.segments
    }

    pub fn segment(&self, i: usize) -> Option<&SegmentRecord> {
        self.segments.get(i)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn version(&self) -> IpVersion {
        self.version
    }

    pub fn is_mac(&self) -> bool {
        self.is_mac
    }

    pub fn mac_format(&self) -> Option<MacFormat> {
        self.mac_format
    }

    pub fn flags(&self) -> &RecordFlags {
        &self.flags
    }

    pub fn is_empty(&self) -> bool {
        self.flags.empty
    }

    pub fn is_all(&self) -> bool {
        self.flags.all
    }

    pub fn is_base85(&self) -> bool {
        self.flags.base85
    }

    pub fn compressed_index(&self) -> Option<usize> {
        self.compressed_index
    }

    pub fn mixed(&self) -> Option<&ParseRecord> {
        self.mixed.as_deref()
    }

    pub fn qualifier(&self) -> &Qualifier {
        &self.qualifier
    }

    pub fn prefix_len(&self) -> Option<u32> {
        self.qualifier.prefix_len
    }

    pub fn zone(&self) -> Option<&str> {
        self.qualifier.zone.as_deref()
    }

    /// Byte range of the address body in the original string.
    pub fn body(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Segments written or implied, counting an embedded IPv4 section as two.
    pub(crate) fn total_segment_count(&self) -> usize {
        self.segments.len() + if self.mixed.is_some() { super::IPV6_MIXED_REPLACED } else { 0 }
    }

    pub(crate) fn push(&mut self, seg: SegmentRecord) {
        self.segments.push(seg);
    }
}

/* -------------------------------------------------------------------------- */

/// Radix information gathered while digits are still being folded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RadixHint {
    /// decided at commit time from leading zeros and options
    #[default]
    Natural,
    /// an explicit `0x` was seen at the given offset
    Hex(usize),
}

/**
Digits of the segment under construction.

Digits are always folded as base 16, four bits per character, whatever the
eventual radix. The true radix is applied only when the segment is
committed, which is where invalid digits for that radix are reported.
*/
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PendingDigits {
    pub accumulator: u64,
    pub radix_hint: RadixHint,
    /// zeros before the first significant digit; an all-zero run keeps one
    /// zero as its significant digit
    pub leading_zero_count: usize,
    /// a nonzero digit or a `_` was seen
    pub has_digits: bool,
    /// the run started with `0`
    pub leading_with_zero: bool,
    pub uppercase: bool,
}

impl PendingDigits {
    #[inline]
    pub fn push(&mut self, c: u8, value: u8) {
        if self.has_digits {
            self.accumulator = self.accumulator << 4 | value as u64;
        } else if c == b'0' {
            if self.leading_with_zero {
                self.leading_zero_count += 1;
            } else {
                self.leading_with_zero = true;
            }
        } else {
            self.has_digits = true;
            self.accumulator = self.accumulator << 4 | value as u64;
        }
        if c.is_ascii_uppercase() {
            self.uppercase = true;
        }
    }

    /// Leading zeros of a digit run spanning `total` characters.
    #[inline]
    pub fn leading_zeros(&self, total: usize) -> usize {
        let lz: usize = self.leading_zero_count;
        if self.leading_with_zero && (self.has_digits || total > lz + 1) {
            lz + 1
        } else {
            lz
        }
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(s: &str) -> PendingDigits {
        let mut d = PendingDigits::default();
        for c in s.bytes() {
            d.push(c, crate::parse::CharClass::digit(c).unwrap());
        }
        d
    }

    #[test]
    fn test_pending_digits_fold() {
        let d = fold("1f");
        assert_eq!(d.accumulator, 0x1f);
        assert_eq!(d.leading_zeros(2), 0);
        // octal 010 is folded as hex 0x10
        let d = fold("010");
        assert_eq!(d.accumulator, 0x10);
        assert_eq!(d.leading_zeros(3), 1);
    }

    #[test]
    fn test_pending_digits_all_zero() {
        let d = fold("0000");
        assert_eq!(d.accumulator, 0);
        assert!(!d.has_digits);
        assert_eq!(d.leading_zeros(4), 3);
        let d = fold("0");
        assert_eq!(d.leading_zeros(1), 0);
    }

    #[test]
    fn test_swap_bounds() {
        let mut seg = SegmentRecord {
            lower: 5,
            upper: 2,
            lower_start: 0,
            lower_end: 1,
            upper_start: 2,
            upper_end: 3,
            ..Default::default()
        };
        seg.swap_bounds();
        assert_eq!((seg.lower, seg.upper), (2, 5));
        assert_eq!((seg.lower_start, seg.lower_end), (2, 3));
        assert_eq!((seg.upper_start, seg.upper_end), (0, 1));
    }
}
