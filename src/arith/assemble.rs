// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Turns a validated [ParseRecord] into an immutable [AddressValue]: elided
segments are expanded, joined and single-segment values are split across
the canonical divisions, an embedded IPv4 section becomes two IPv6 segments
and a mask qualifier becomes a prefix length (or is applied to the values).
*/

use super::{
    division::{network_mask, shl_or_zero, shr_or_zero, width_mask, Division},
    enumerate::GroupingIter,
    grouping::Grouping,
};
use crate::parse::{
    strings::*, AddressStringError, AllStrOption, EmptyStrOption, IpVersion, MacFormat, MacOptions, MacSize,
    ParseOptions, ParseRecord, SegmentRecord, IPV4_SEGMENT_COUNT, IPV6_BITS, IPV6_SEGMENT_COUNT,
};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};
use tracing::debug;

const IPV4_DIVISION_BITS: u32 = 8;
const IPV6_DIVISION_BITS: u32 = 16;
const MAC_DIVISION_BITS: u32 = 8;
const MAC48_BITS: u32 = 48;
const EUI64_BITS: u32 = 64;

/// Address family of an assembled value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum AddressKind {
    Ipv4,
    Ipv6,
    Mac,
}

/**
An assembled address or address range: one [Grouping] of canonical divisions
(octets for IPv4 and MAC, 16-bit segments for IPv6), plus whatever qualifier
the string carried.

```
use addrstr::{parse_value, AddressKind, ParseOptions};

let v = parse_value("1::2", &ParseOptions::default()).unwrap().unwrap();
assert_eq!(v.kind(), AddressKind::Ipv6);
assert_eq!(v.grouping().division_count(), 8);
assert_eq!(v.grouping().value(), 0x0001_0000_0000_0000_0000_0000_0000_0002);
```
*/
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct AddressValue {
    kind: AddressKind,
    grouping: Grouping,
    zone: Option<String>,
    port: Option<u16>,
    service: Option<String>,
}

impl AddressValue {
    pub fn new(kind: AddressKind, grouping: Grouping) -> Self {
        AddressValue { kind, grouping, zone: None, port: None, service: None }
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    pub fn prefix_len(&self) -> Option<u32> {
        self.grouping.prefix_len()
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn is_multiple(&self) -> bool {
        self.grouping.is_multiple()
    }

    /// Number of individual addresses, saturating at `u128::MAX`.
    pub fn count(&self) -> u128 {
        self.grouping.count()
    }

    fn with_grouping(&self, grouping: Grouping) -> Self {
        AddressValue { grouping, ..self.clone() }
    }

    pub fn lower(&self) -> AddressValue {
        self.with_grouping(self.grouping.lower())
    }

    pub fn upper(&self) -> AddressValue {
        self.with_grouping(self.grouping.upper())
    }

    /// The block of all addresses sharing the prefix, or the value itself
    /// when there is no prefix length.
    pub fn to_prefix_block(&self) -> AddressValue {
        match self.prefix_len() {
            Some(p) => self.with_grouping(self.grouping.to_prefix_block(p)),
            None => self.clone(),
        }
    }

    /// The lowest address as a standard library IP address.
    pub fn to_ip_addr(&self) -> Option<IpAddr> {
        int_to_ip(self.kind, self.grouping.value())
    }

    pub fn upper_ip_addr(&self) -> Option<IpAddr> {
        int_to_ip(self.kind, self.grouping.upper_value())
    }

    /**
    The network implied by the prefix length, or, without one, the single
    prefix block the range is equal to. `None` for MAC values and for ranges
    that are not a prefix block.
    */
    pub fn to_ip_net(&self) -> Option<IpNet> {
        let prefix: u32 = self.prefix_len().or_else(|| self.grouping.prefix_len_for_single_block())?;
        let ip: IpAddr = self.to_ip_addr()?;
        IpNet::new(ip, prefix as u8).ok().map(|net| net.trunc())
    }

    /// Every individual address, ascending.
    pub fn iter(&self) -> AddressIter<'_> {
        AddressIter { value: self, inner: self.grouping.iter() }
    }
}

impl<'a> IntoIterator for &'a AddressValue {
    type Item = AddressValue;
    type IntoIter = AddressIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the individual addresses of an [AddressValue].
pub struct AddressIter<'a> {
    value: &'a AddressValue,
    inner: GroupingIter,
}

impl Iterator for AddressIter<'_> {
    type Item = AddressValue;

    fn next(&mut self) -> Option<Self::Item> {
        let g: Grouping = self.inner.next()?.with_prefix_len(self.value.prefix_len());
        Some(self.value.with_grouping(g))
    }
}

#[inline]
pub(crate) fn int_to_ip(kind: AddressKind, v: u128) -> Option<IpAddr> {
    match kind {
        AddressKind::Ipv4 => Some(IpAddr::V4(Ipv4Addr::from((v as u32).to_be_bytes()))),
        AddressKind::Ipv6 => Some(IpAddr::V6(Ipv6Addr::from(v.to_be_bytes()))),
        AddressKind::Mac => None,
    }
}

/* ---------------------------------- */

impl fmt::Display for AddressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_multiple(), self.to_ip_addr()) {
            (false, Some(ip)) => write!(f, "{ip}")?,
            _ => {
                let (sep, width, hex) = match self.kind {
                    AddressKind::Ipv4 => ('.', 0, false),
                    AddressKind::Ipv6 => (':', 0, true),
                    AddressKind::Mac => (':', 2, true),
                };
                for (i, d) in self.grouping.divisions().iter().enumerate() {
                    if i > 0 {
                        write!(f, "{sep}")?;
                    }
                    if d.is_multiple() && d.is_full_range() {
                        write!(f, "*")?;
                        continue;
                    }
                    let bound = |f: &mut fmt::Formatter<'_>, v: u128| match hex {
                        true => write!(f, "{v:0width$x}"),
                        false => write!(f, "{v}"),
                    };
                    bound(f, d.value())?;
                    if d.is_multiple() {
                        write!(f, "-")?;
                        bound(f, d.upper_value())?;
                    }
                }
            }
        }
        if let Some(zone) = &self.zone {
            write!(f, "%{zone}")?;
        }
        if let Some(p) = self.prefix_len() {
            write!(f, "/{p}")?;
        }
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */

/// A run of bits as written: one segment, a joined segment or a whole
/// single-segment address.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Part {
    lower: u128,
    upper: u128,
    bits: u32,
    wildcard: bool,
}

impl Part {
    fn of(seg: &SegmentRecord, bits: u32) -> Self {
        Part { lower: seg.lower_value(), upper: seg.upper_value(), bits, wildcard: seg.flags.wildcard }
    }

    fn zero(bits: u32) -> Self {
        Part { bits, ..Default::default() }
    }

    fn full(bits: u32) -> Self {
        Part { lower: 0, upper: width_mask(bits), bits, wildcard: true }
    }
}

/// Widen the last wildcard part to cover `missing` unwritten bits.
fn cover_missing(parts: &mut [Part], missing: u32) -> bool {
    if missing == 0 {
        return true;
    }
    match parts.iter_mut().rev().find(|p| p.wildcard) {
        Some(p) => {
            *p = Part::full(p.bits + missing);
            true
        }
        None => false,
    }
}

/**
Cut the concatenated parts into divisions of `div_bits` each. Where a range
has to be cut, the cut must not lose values: once the more significant bits
of a division or a part are multi-valued, every less significant bit must be
full range. Returns `None` when that does not hold.
*/
fn regroup(parts: &[Part], div_bits: u32) -> Option<Vec<Division>> {
    let mut out: Vec<Division> = Vec::new();
    let (mut lo, mut hi, mut filled) = (0u128, 0u128, 0u32);
    for p in parts {
        let (mut p_lo, mut p_hi, mut remaining) = (p.lower, p.upper, p.bits);
        while remaining > 0 {
            let take: u32 = (div_bits - filled).min(remaining);
            let shift: u32 = remaining - take;
            let (c_lo, c_hi) = (shr_or_zero(p_lo, shift), shr_or_zero(p_hi, shift));
            if lo != hi && (c_lo != 0 || c_hi != width_mask(take)) {
                return None;
            }
            lo = shl_or_zero(lo, take) | c_lo;
            hi = shl_or_zero(hi, take) | c_hi;
            filled += take;
            p_lo &= width_mask(shift);
            p_hi &= width_mask(shift);
            remaining = shift;
            if c_lo != c_hi && (p_lo != 0 || p_hi != width_mask(shift)) {
                return None;
            }
            if filled == div_bits {
                out.push(Division::new(lo, hi, div_bits));
                (lo, hi, filled) = (0, 0, 0);
            }
        }
    }
    (filled == 0).then_some(out)
}

/* -------------------------------------------------------------------------- */

fn ipv4_parts(input: &str, rec: &ParseRecord) -> Result<Vec<Part>, AddressStringError> {
    let count: usize = rec.segments.len();
    let missing: u32 = IPV4_SEGMENT_COUNT.saturating_sub(count) as u32 * IPV4_DIVISION_BITS;
    let joined: bool = count == 1 || rec.flags.inet_aton_joined;
    let mut parts: Vec<Part> = Vec::with_capacity(count);
    for (i, seg) in rec.segments.iter().enumerate() {
        let bits: u32 = if joined && i == count - 1 { IPV4_DIVISION_BITS + missing } else { IPV4_DIVISION_BITS };
        parts.push(Part::of(seg, bits));
    }
    if !joined && !cover_missing(&mut parts, missing) {
        return Err(AddressStringError::new(input, KEY_IPV4_TOO_FEW));
    }
    Ok(parts)
}

fn ipv4_grouping(input: &str, rec: &ParseRecord) -> Result<Grouping, AddressStringError> {
    let parts: Vec<Part> = ipv4_parts(input, rec)?;
    let divs = regroup(&parts, IPV4_DIVISION_BITS).ok_or_else(|| AddressStringError::new(input, KEY_JOINED_RANGES))?;
    Ok(Grouping::new(divs))
}

fn ipv6_grouping(input: &str, rec: &ParseRecord) -> Result<Grouping, AddressStringError> {
    if rec.flags.single_segment {
        let parts: Vec<Part> = rec.segments.iter().map(|s| Part::of(s, IPV6_BITS)).collect();
        let divs = regroup(&parts, IPV6_DIVISION_BITS).ok_or_else(|| AddressStringError::new(input, KEY_JOINED_RANGES))?;
        return Ok(Grouping::new(divs));
    }

    let total: usize = rec.total_segment_count();
    let mut parts: Vec<Part> = Vec::with_capacity(IPV6_SEGMENT_COUNT);
    let mut missing: u32 = 0;
    for (i, seg) in rec.segments.iter().enumerate() {
        if rec.compressed_index == Some(i) {
            let expand: usize = (IPV6_SEGMENT_COUNT + 1)
                .checked_sub(total)
                .filter(|n| *n > 0)
                .ok_or_else(|| AddressStringError::new(input, KEY_TOO_MANY_SEGMENTS))?;
            parts.extend((0..expand).map(|_| Part::zero(IPV6_DIVISION_BITS)));
        } else {
            parts.push(Part::of(seg, IPV6_DIVISION_BITS));
        }
    }
    if rec.compressed_index.is_none() {
        missing = IPV6_SEGMENT_COUNT.saturating_sub(total) as u32 * IPV6_DIVISION_BITS;
    }
    if !cover_missing(&mut parts, missing) {
        return Err(AddressStringError::new(input, KEY_TOO_FEW_SEGMENTS));
    }

    let mut divs: Vec<Division> =
        regroup(&parts, IPV6_DIVISION_BITS).ok_or_else(|| AddressStringError::new(input, KEY_JOINED_RANGES))?;
    if let Some(mixed) = rec.mixed() {
        let v4: Vec<Part> = ipv4_parts(input, mixed)?;
        let octets: Vec<Part> = regroup(&v4, IPV4_DIVISION_BITS)
            .ok_or_else(|| AddressStringError::new(input, KEY_JOINED_RANGES))?
            .iter()
            .map(|d| Part { lower: d.value(), upper: d.upper_value(), bits: IPV4_DIVISION_BITS, wildcard: false })
            .collect();
        let tail = regroup(&octets, IPV6_DIVISION_BITS).ok_or_else(|| AddressStringError::new(input, KEY_MIXED_RANGE))?;
        divs.extend(tail);
    }
    Ok(Grouping::new(divs))
}

fn mac_grouping(input: &str, rec: &ParseRecord) -> Result<Grouping, AddressStringError> {
    let expected: u32 = if rec.flags.extended_mac { EUI64_BITS } else { MAC48_BITS };
    let mut parts: Vec<Part> = Vec::with_capacity(rec.segments.len());
    if rec.flags.single_segment {
        parts.extend(rec.segments.iter().map(|s| Part::of(s, expected)));
    } else if rec.flags.double_segment {
        let half: u32 = MAC48_BITS / 2;
        for (i, seg) in rec.segments.iter().enumerate() {
            parts.push(Part::of(seg, if i == 0 { half } else { expected - half }));
        }
    } else {
        let bits: u32 = match rec.mac_format {
            Some(MacFormat::Dotted) => 2 * MAC_DIVISION_BITS,
            _ => MAC_DIVISION_BITS,
        };
        parts.extend(rec.segments.iter().map(|s| Part::of(s, bits)));
    }
    let written: u32 = parts.iter().map(|p| p.bits).sum();
    if !cover_missing(&mut parts, expected.saturating_sub(written)) {
        return Err(AddressStringError::new(input, KEY_TOO_FEW_SEGMENTS));
    }
    let divs = regroup(&parts, MAC_DIVISION_BITS).ok_or_else(|| AddressStringError::new(input, KEY_JOINED_RANGES))?;
    Ok(Grouping::new(divs))
}

/* ---------------------------------- */

/// Version for the empty and `*` strings.
fn default_version(opts: &ParseOptions, prefer_ipv6: bool) -> IpVersion {
    match (opts.allow_ipv4, opts.allow_ipv6) {
        (true, false) => IpVersion::V4,
        (false, true) => IpVersion::V6,
        _ if prefer_ipv6 => IpVersion::V6,
        _ if opts.preferred_version == IpVersion::V4 => IpVersion::V4,
        _ => IpVersion::V6,
    }
}

fn full_grouping(version: IpVersion) -> Grouping {
    let (count, bits) = layout(version);
    (0..count).map(|_| Division::full(bits)).collect()
}

fn fixed_grouping(version: IpVersion, value: u128) -> Grouping {
    let (count, bits) = layout(version);
    (0..count)
        .rev()
        .map(|i| Division::single(shr_or_zero(value, i as u32 * bits), bits))
        .collect()
}

fn layout(version: IpVersion) -> (usize, u32) {
    match version {
        IpVersion::V4 => (IPV4_SEGMENT_COUNT, IPV4_DIVISION_BITS),
        _ => (IPV6_SEGMENT_COUNT, IPV6_DIVISION_BITS),
    }
}

fn kind_of(version: IpVersion) -> AddressKind {
    match version {
        IpVersion::V4 => AddressKind::Ipv4,
        _ => AddressKind::Ipv6,
    }
}

/// Value of a single-valued mask grouping, if it is a network mask its
/// prefix length too.
fn mask_prefix(mask: &Grouping) -> Option<u32> {
    let bits: u32 = mask.bit_count();
    let m: u128 = mask.value();
    let ones: u32 = (m << (u128::BITS - bits)).leading_ones().min(bits);
    (m == network_mask(bits, ones)).then_some(ones)
}

/**
Apply a mask that is not a network mask to every division. A multi-valued
division keeps an exact range only if the mask keeps every bit from its
highest differing bit down.
*/
fn apply_mask(input: &str, g: &Grouping, mask: &Grouping) -> Result<Grouping, AddressStringError> {
    let mut divs: Vec<Division> = Vec::with_capacity(g.division_count());
    for (d, m) in g.divisions().iter().zip(mask.divisions()) {
        let (lo, hi, mk) = (d.value(), d.upper_value(), m.value());
        if lo != hi {
            let diff_bits: u32 = u128::BITS - (lo ^ hi).leading_zeros();
            let low: u128 = width_mask(diff_bits);
            if mk & low != low {
                return Err(AddressStringError::new(input, KEY_MASK_MISMATCH));
            }
        }
        divs.push(Division::new(lo & mk, hi & mk, d.bit_count()));
    }
    Ok(Grouping::new(divs))
}

/**
Assemble a scanned IP address record. Consumes the record. Returns `None`
for an empty string configured as [EmptyStrOption::NoAddress].
*/
pub fn assemble(input: &str, rec: ParseRecord, opts: &ParseOptions) -> Result<Option<AddressValue>, AddressStringError> {
    if rec.is_mac {
        return assemble_mac(input, rec, &opts.mac);
    }
    let prefix: Option<u32> = rec.qualifier.prefix_len;

    let (version, grouping) = if rec.flags.empty {
        let version: IpVersion = default_version(opts, false);
        let value: u128 = match opts.empty_str {
            EmptyStrOption::NoAddress => return Ok(None),
            EmptyStrOption::Zero => 0,
            EmptyStrOption::Loopback if version.is_ipv4() => u32::from(Ipv4Addr::LOCALHOST) as u128,
            EmptyStrOption::Loopback => u128::from(Ipv6Addr::LOCALHOST),
        };
        (version, fixed_grouping(version, value))
    } else if rec.flags.all {
        let version: IpVersion = match (rec.version, opts.all_str) {
            (IpVersion::Indeterminate, _) if rec.qualifier.mask.as_ref().is_some_and(|m| m.version.is_ipv4()) => {
                IpVersion::V4
            }
            (IpVersion::Indeterminate, AllStrOption::AllAddresses) => default_version(opts, true),
            (IpVersion::Indeterminate, AllStrOption::PreferredVersion) => default_version(opts, false),
            // resolved by the qualifier
            (v, _) => v,
        };
        (version, full_grouping(version))
    } else if rec.version.is_ipv4() {
        (IpVersion::V4, ipv4_grouping(input, &rec)?)
    } else {
        (IpVersion::V6, ipv6_grouping(input, &rec)?)
    };

    let mut grouping: Grouping = grouping.with_prefix_len(prefix);
    if let Some(mask_rec) = rec.qualifier.mask.as_deref() {
        let mask: Grouping = if mask_rec.version.is_ipv4() {
            ipv4_grouping(input, mask_rec)?
        } else {
            ipv6_grouping(input, mask_rec)?
        };
        match mask_prefix(&mask) {
            Some(p) => grouping = grouping.with_prefix_len(Some(p)),
            None => {
                debug!("applying non-network mask to '{input}'");
                grouping = apply_mask(input, &grouping, &mask)?;
            }
        }
    }

    let q = rec.qualifier;
    Ok(Some(AddressValue {
        kind: kind_of(version),
        grouping,
        zone: q.zone,
        port: q.port,
        service: q.service,
    }))
}

/// Assemble a scanned MAC address record. Returns `None` for an empty string.
pub fn assemble_mac(input: &str, rec: ParseRecord, opts: &MacOptions) -> Result<Option<AddressValue>, AddressStringError> {
    let grouping: Grouping = if rec.flags.empty {
        return Ok(None);
    } else if rec.flags.all {
        let bits: u32 = if opts.address_size == MacSize::Eui64 { EUI64_BITS } else { MAC48_BITS };
        (0..bits / MAC_DIVISION_BITS).map(|_| Division::full(MAC_DIVISION_BITS)).collect()
    } else {
        mac_grouping(input, &rec)?
    };
    Ok(Some(AddressValue::new(AddressKind::Mac, grouping)))
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_address, parse_mac};

    const V4: &str = "192.168.10.11";
    const V6_MIXED: &str = "1:2:3:4:5:6:1.2.3.4";

    fn value(s: &str) -> AddressValue {
        value_with(s, &ParseOptions::default())
    }

    fn value_with(s: &str, opts: &ParseOptions) -> AddressValue {
        let rec = parse_address(s, opts).unwrap();
        assemble(s, rec, opts).unwrap().unwrap()
    }

    fn error(s: &str) -> &'static str {
        let opts = ParseOptions::default();
        let rec = parse_address(s, &opts).unwrap();
        assemble(s, rec, &opts).unwrap_err().key()
    }

    fn mac(s: &str) -> AddressValue {
        let opts = MacOptions::default();
        assemble_mac(s, parse_mac(s, &opts).unwrap(), &opts).unwrap().unwrap()
    }

    #[test]
    fn test_regroup() {
        let parts = [Part { lower: 0x0102, upper: 0x0102, bits: 16, wildcard: false }];
        let divs = regroup(&parts, 8).unwrap();
        assert_eq!(divs, vec![Division::single(1, 8), Division::single(2, 8)]);
        // high byte fixed, low byte ranged
        let parts = [Part { lower: 0x0103, upper: 0x0104, bits: 16, wildcard: false }];
        assert!(regroup(&parts, 8).is_some());
        // high byte ranged, low byte not full range
        let parts = [Part { lower: 0x01ff, upper: 0x0200, bits: 16, wildcard: false }];
        assert!(regroup(&parts, 8).is_none());
        // merging: low part not full range under a ranged high part
        let parts = [
            Part { lower: 1, upper: 2, bits: 8, wildcard: false },
            Part { lower: 3, upper: 3, bits: 8, wildcard: false },
        ];
        assert!(regroup(&parts, 16).is_none());
    }

    #[test]
    fn test_ipv4_value() {
        let v = value(V4);
        assert_eq!(v.kind(), AddressKind::Ipv4);
        assert_eq!(v.grouping().value(), 0xc0a8_0a0b);
        assert_eq!(v.to_ip_addr(), Some("192.168.10.11".parse().unwrap()));
        assert_eq!(v.to_string(), V4);
        assert_eq!(value("255.255.255.255").grouping().upper_value(), 0xffff_ffff);
    }

    #[test]
    fn test_ipv4_joined() {
        let v = value("1.2.772");
        assert_eq!(v.grouping().bytes(), vec![1, 2, 3, 4]);
        let v = value("3232235777");
        assert_eq!(v.to_ip_addr(), Some("192.168.1.1".parse().unwrap()));
        let v = value("1.2.256-511");
        assert_eq!(v.grouping().value(), 0x0102_0100);
        assert_eq!(v.grouping().upper_value(), 0x0102_01ff);
        assert_eq!(error("1.2.255-256"), KEY_JOINED_RANGES);
    }

    #[test]
    fn test_ipv4_wildcard() {
        let v = value("1.2.*.4");
        assert_eq!(v.count(), 256);
        assert_eq!(v.to_string(), "1.2.*.4");
        let v = value("1.2.*");
        assert_eq!(v.grouping().division_count(), 4);
        assert_eq!(v.grouping().upper_value(), 0x0102_ffff);
    }

    #[test]
    fn test_ipv6_expansion() {
        let v = value("::");
        assert_eq!(v.grouping().division_count(), 8);
        assert_eq!(v.grouping().value(), 0);
        let v = value("1::2");
        let segs: Vec<u128> = v.grouping().divisions().iter().map(|d| d.value()).collect();
        assert_eq!(segs, vec![1, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(v.to_string(), "1::2");
        let v = value("1:2:3:4:5:6:7::");
        assert_eq!(v.grouping().division(7), Some(&Division::single(0, 16)));
    }

    #[test]
    fn test_ipv6_mixed() {
        let v = value(V6_MIXED);
        assert_eq!(v.grouping().division(6), Some(&Division::single(0x0102, 16)));
        assert_eq!(v.grouping().division(7), Some(&Division::single(0x0304, 16)));
        let v = value("::ffff:1.2.3.0-255");
        assert_eq!(v.grouping().division(7), Some(&Division::new(0x0300, 0x03ff, 16)));
        assert_eq!(error("::1-2.3.4.5"), KEY_MIXED_RANGE);
    }

    #[test]
    fn test_ipv6_single_segment() {
        let v = value("00010002000300040005000600070008");
        assert_eq!(v.grouping().value(), 0x0001_0002_0003_0004_0005_0006_0007_0008);
        assert_eq!(v.grouping().division_count(), 8);
    }

    #[test]
    fn test_prefix_and_zone() {
        let v = value("fe80::1%eth0/64");
        assert_eq!(v.zone(), Some("eth0"));
        assert_eq!(v.prefix_len(), Some(64));
        assert_eq!(v.to_string(), "fe80::1%eth0/64");
        let net = v.to_ip_net().unwrap();
        assert_eq!(net.to_string(), "fe80::/64");
        let block = value("10.1.2.3/16").to_prefix_block();
        assert_eq!(block.count(), 65536);
        assert!(block.grouping().is_prefix_block());
    }

    #[test]
    fn test_mask() {
        let v = value("1.2.3.4/255.255.0.0");
        assert_eq!(v.prefix_len(), Some(16));
        assert_eq!(v.grouping().value(), 0x0102_0304);
        let v = value("1.2.3.4/0.0.255.255");
        assert_eq!(v.prefix_len(), None);
        assert_eq!(v.grouping().value(), 0x0000_0304);
        assert_eq!(error("1.2.0-255.4/0.0.15.255"), KEY_MASK_MISMATCH);
    }

    #[test]
    fn test_empty_and_all() {
        let opts = ParseOptions::default();
        let v = value_with("", &opts);
        assert_eq!(v.kind(), AddressKind::Ipv6);
        assert_eq!(v.grouping().value(), 0);
        let opts = ParseOptions { empty_str: EmptyStrOption::Loopback, ..Default::default() }.with_versions(true, false);
        let v = value_with("", &opts);
        assert_eq!(v.to_ip_addr(), Some("127.0.0.1".parse().unwrap()));
        let opts = ParseOptions { empty_str: EmptyStrOption::NoAddress, ..Default::default() };
        let rec = parse_address("", &opts).unwrap();
        assert_eq!(assemble("", rec, &opts).unwrap(), None);

        let v = value("*");
        assert_eq!(v.kind(), AddressKind::Ipv6);
        assert_eq!(v.count(), u128::MAX);
        let v = value_with("*", &ParseOptions::default().with_versions(true, false));
        assert_eq!(v.kind(), AddressKind::Ipv4);
        assert_eq!(v.count(), 1 << 32);
    }

    #[test]
    fn test_iter_addresses() {
        let v = value("10.0.0.254-255");
        let got: Vec<String> = v.iter().map(|a| a.to_string()).collect();
        assert_eq!(got, vec!["10.0.0.254", "10.0.0.255"]);
        assert_eq!((&v).into_iter().count(), 2);
    }

    #[test]
    fn test_mac_values() {
        let v = mac("aa:bb:cc:dd:ee:ff");
        assert_eq!(v.kind(), AddressKind::Mac);
        assert_eq!(v.grouping().bytes(), vec![0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(v.to_ip_addr(), None);
        let v = mac("aabb.ccdd.eeff");
        assert_eq!(v.grouping().division_count(), 6);
        assert_eq!(v.grouping().value(), 0xaabb_ccdd_eeff);
        let v = mac("aabbcc-ddeeff");
        assert_eq!(v.grouping().value(), 0xaabb_ccdd_eeff);
        let v = mac("aabbccddeeff");
        assert_eq!(v.grouping().division_count(), 6);
        assert_eq!(v.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_mac_record_uses_caller_options() {
        let mac_opts = MacOptions { address_size: MacSize::Eui64, ..Default::default() };
        let opts = ParseOptions { mac: mac_opts, ..Default::default() };
        let rec = parse_mac("*", &mac_opts).unwrap();
        let v = assemble("*", rec, &opts).unwrap().unwrap();
        assert_eq!(v.kind(), AddressKind::Mac);
        assert_eq!(v.grouping().division_count(), 8);
        let rec = parse_mac("*", &mac_opts).unwrap();
        let v = assemble("*", rec, &ParseOptions::default()).unwrap().unwrap();
        assert_eq!(v.grouping().division_count(), 6);
    }

    #[test]
    fn test_ipv6_overcount_rejected() {
        let opts = ParseOptions::default();
        for s in ["1:2:3:4:5:6:7::8", "::1:2:3:4:5:6:7:8", "1:2:3:4:5:6::7:8"] {
            let err = parse_address(s, &opts).unwrap_err();
            assert_eq!(err.key(), KEY_TOO_MANY_SEGMENTS, "{s}");
        }
        // `::` standing for exactly one segment
        let v = value("1:2:3:4:5:6:7::");
        assert_eq!(v.grouping().division_count(), 8);
        assert_eq!(v.grouping().value(), 0x0001_0002_0003_0004_0005_0006_0007_0000);
    }
}
