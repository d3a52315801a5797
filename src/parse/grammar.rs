// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-family segment grammars. The scanner resolves the family from the
//! first decisive separator and from then on defers every family specific
//! decision (digit interpretation, segment sizes, elision rules) to one of
//! the [FamilyGrammar] implementations here.

use super::{
    convert::{expand_single_wildcard, parse_digits, switch_value},
    options::{FormatOptions, MacOptions, MacSize, ParseOptions},
    record::{IpVersion, MacFormat, ParseRecord, PendingDigits, RadixHint},
    strings::*,
    AddressStringError, EUI64_SEGMENT_COUNT, IPV4_SEGMENT_COUNT, IPV6_SEGMENT_COUNT, MAC48_SEGMENT_COUNT,
    MAC_DOTTED64_SEGMENT_COUNT, MAC_DOTTED_SEGMENT_COUNT,
};

pub(crate) const IPV4_MAX_SEGMENT: u64 = 0xff;
pub(crate) const IPV6_MAX_SEGMENT: u64 = 0xffff;
/// MAC `aaaaaa-bbbbbb` halves
pub(crate) const MAC_MAX_TRIPLE: u64 = 0xff_ffff;
pub(crate) const MAC_MAX_QUINTUPLE: u64 = 0xff_ffff_ffff;
pub(crate) const MAC_DOUBLE_DIGITS: usize = 6;
pub(crate) const MAC_EXTENDED_DOUBLE_DIGITS: usize = 10;
pub(crate) const MAC_SINGLE_DIGITS: usize = 12;
pub(crate) const MAC_EXTENDED_SINGLE_DIGITS: usize = 16;

/// Maximum value of an IPv4 segment standing for `covered` segments.
#[rustfmt::skip]
pub(crate) fn ipv4_max_value(covered: usize) -> u64 {
    match covered {
        0 | 1 => 0xff,
        2     => 0xffff,
        3     => 0xff_ffff,
        _     => 0xffff_ffff,
    }
}

/// Maximum digits (radix prefix and leading zeros excluded) of an IPv4
/// segment standing for `1 + additional` segments.
#[rustfmt::skip]
fn ipv4_max_string_len(additional: usize, radix: u32) -> usize {
    let lens: [usize; 4] = match radix {
        2  => [8, 16, 24, 32],
        8  => [3, 6, 8, 11],
        16 => [2, 4, 6, 8],
        _  => [3, 5, 8, 10],
    };
    lens[additional.min(3)]
}

/// Characters preceding the digits of a value written in `radix`.
fn radix_prefix_len(radix: u32) -> usize {
    match radix {
        2 | 16 => 2,
        8 => 1,
        _ => 0,
    }
}

/* -------------------------------------------------------------------------- */

/// Options in force for a scan.
#[derive(Clone, Copy, Debug)]
pub enum ScanOptions<'a> {
    Ip(&'a ParseOptions),
    Mac(&'a MacOptions),
}

impl<'a> ScanOptions<'a> {
    pub(crate) fn ip(&self) -> Option<&'a ParseOptions> {
        match self {
            ScanOptions::Ip(o) => Some(o),
            ScanOptions::Mac(_) => None,
        }
    }

    pub(crate) fn mac(&self) -> Option<&'a MacOptions> {
        match self {
            ScanOptions::Mac(o) => Some(o),
            ScanOptions::Ip(_) => None,
        }
    }
}

/// Digits of one range bound as scanned.
#[derive(Clone, Copy, Debug, Default)]
pub struct DigitRun {
    pub digits: PendingDigits,
    /// start of the bound's text
    pub start: usize,
    /// first character after a `0x`, otherwise equal to `start`
    pub value_start: usize,
    pub end: usize,
    /// trailing `_` characters
    pub single_wildcards: usize,
}

impl DigitRun {
    /// Characters after any `0x`.
    pub fn len(&self) -> usize {
        self.end - self.value_start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Leading zeros before the first significant digit.
    pub fn leading_zeros(&self) -> usize {
        self.digits.leading_zeros(self.len() - self.single_wildcards)
    }

    /// Significant digits, single wildcards excluded.
    pub fn digit_count(&self) -> usize {
        self.len() - self.single_wildcards - self.leading_zeros()
    }
}

/// A digit run converted to its numeric value (or range, for `_` wildcards).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Converted {
    pub lower: u64,
    pub upper: u64,
    pub radix: u32,
    /// default radix, no leading zeros, no uppercase
    pub standard: bool,
    pub single_wildcard: bool,
}

/**
Family specific parts of the segment grammar.

Implementations are stateless; whatever the grammar needs to know about the
string so far is in the [ParseRecord].
*/
pub trait FamilyGrammar: Sync {
    fn name(&self) -> &'static str;

    /// Radix of a plain digit run.
    fn default_radix(&self) -> u32;

    /// Bits in one written segment.
    fn segment_bits(&self, rec: &ParseRecord) -> u32;

    fn max_segment_value(&self, rec: &ParseRecord) -> u64 {
        let bits: u32 = self.segment_bits(rec);
        if bits >= 64 {
            u64::MAX
        } else {
            !(u64::MAX << bits)
        }
    }

    /// Upper bound of `a-`, before segment joining is known.
    fn inferred_upper(&self, rec: &ParseRecord) -> u64 {
        self.max_segment_value(rec)
    }

    /// Segments in a complete address of the family.
    fn segment_count(&self, rec: &ParseRecord) -> usize;

    fn format<'o>(&self, opts: &ScanOptions<'o>) -> &'o FormatOptions;

    /// Interpret one bound's digits under the family's radix rules.
    fn convert(
        &self,
        input: &str,
        run: &DigitRun,
        opts: &ScanOptions,
        rec: &mut ParseRecord,
    ) -> Result<Converted, AddressStringError>;

    /// Segment counts, elisions and value limits, once the body is scanned.
    fn check_segments(&self, input: &str, rec: &mut ParseRecord, opts: &ScanOptions)
        -> Result<(), AddressStringError>;
}

/// Trailing `_` wildcards: permitted and strictly trailing.
fn check_single_wildcard(input: &str, run: &DigitRun, fmt: &FormatOptions) -> Result<(), AddressStringError> {
    if !fmt.range.allow_single_wildcard {
        return Err(AddressStringError::new(input, KEY_NO_SINGLE_WILDCARD));
    }
    let tail: &[u8] = &input.as_bytes()[run.end - run.single_wildcards..run.end];
    if tail.iter().any(|c| *c != b'_') {
        return Err(AddressStringError::new(input, KEY_SINGLE_WILDCARD_ORDER));
    }
    Ok(())
}

fn with_single_wildcard(value: u64, radix: u32, run: &DigitRun, standard: bool) -> Converted {
    if run.single_wildcards > 0 {
        let (lower, upper) = expand_single_wildcard(value, radix, run.single_wildcards);
        Converted { lower, upper, radix, standard: false, single_wildcard: true }
    } else {
        Converted { lower: value, upper: value, radix, standard, single_wildcard: false }
    }
}

/**
Hex digit run of at most `max_digits` significant digits, as used by IPv6
and MAC segments. A run of exactly `0b` followed by `binary_digits` binary
digits is read as binary when binary is allowed.
*/
fn convert_hex(
    input: &str,
    run: &DigitRun,
    fmt: &FormatOptions,
    max_digits: usize,
    binary_digits: usize,
    rec: &mut ParseRecord,
) -> Result<Converted, AddressStringError> {
    if let RadixHint::Hex(i) = run.digits.radix_hint {
        return Err(AddressStringError::at(input, KEY_INVALID_CHAR, i));
    }
    if run.single_wildcards > 0 {
        check_single_wildcard(input, run, fmt)?;
    }
    let bytes: &[u8] = input.as_bytes();
    let lz: usize = run.leading_zeros();
    let digits: usize = run.digit_count();

    if fmt.allow_binary
        && lz == 1
        && digits == binary_digits + 1
        && run.single_wildcards == 0
        && bytes[run.value_start + 1] == b'b'
    {
        let body: &[u8] = &bytes[run.value_start + 2..run.end];
        let value: u128 = parse_digits(body, 2).map_err(|k| AddressStringError::new(input, k))?;
        rec.flags.binary_digits = true;
        return Ok(Converted { lower: value as u64, upper: value as u64, radix: 2, standard: false, single_wildcard: false });
    }

    if digits + run.single_wildcards > max_digits {
        return Err(AddressStringError::at(input, KEY_SEGMENT_TOO_LONG_AT, run.value_start));
    }
    if lz > 0 {
        if !fmt.allow_leading_zeros {
            return Err(AddressStringError::new(input, KEY_LEADING_ZEROS));
        }
        if !fmt.allow_unlimited_leading_zeros && run.len() > max_digits {
            return Err(AddressStringError::at(input, KEY_SEGMENT_TOO_LONG_AT, run.value_start));
        }
    }
    let standard: bool = lz == 0 && !run.digits.uppercase;
    Ok(with_single_wildcard(run.digits.accumulator, 16, run, standard))
}

/* -------------------------------------------------------------------------- */

/// Dotted decimal IPv4 with the `inet_aton` radix and joining extensions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ipv4Grammar;

impl FamilyGrammar for Ipv4Grammar {
    fn name(&self) -> &'static str {
        "IPv4"
    }

    fn default_radix(&self) -> u32 {
        10
    }

    fn segment_bits(&self, _rec: &ParseRecord) -> u32 {
        8
    }

    fn inferred_upper(&self, _rec: &ParseRecord) -> u64 {
        ipv4_max_value(IPV4_SEGMENT_COUNT)
    }

    fn segment_count(&self, _rec: &ParseRecord) -> usize {
        IPV4_SEGMENT_COUNT
    }

    fn format<'o>(&self, opts: &ScanOptions<'o>) -> &'o FormatOptions {
        match opts {
            ScanOptions::Ip(o) => &o.ipv4.format,
            ScanOptions::Mac(o) => &o.format,
        }
    }

    fn convert(
        &self,
        input: &str,
        run: &DigitRun,
        opts: &ScanOptions,
        rec: &mut ParseRecord,
    ) -> Result<Converted, AddressStringError> {
        let Some(ip) = opts.ip() else {
            return Err(AddressStringError::new(input, KEY_IPV4));
        };
        let v4 = &ip.ipv4;
        let fmt: &FormatOptions = &v4.format;
        if run.single_wildcards > 0 {
            check_single_wildcard(input, run, fmt)?;
        }
        let bytes: &[u8] = input.as_bytes();
        let lz: usize = run.leading_zeros();
        let digits: usize = run.digit_count();
        let acc: u64 = run.digits.accumulator;
        let bad = |key: &'static str| AddressStringError::new(input, key);

        if let RadixHint::Hex(x) = run.digits.radix_hint {
            if !fmt.allow_leading_zeros {
                return Err(bad(KEY_LEADING_ZEROS));
            } else if !v4.allow_inet_aton_hex {
                return Err(bad(KEY_IPV4_HEX));
            } else if lz > 0 && !v4.allow_inet_aton_leading_zeros {
                return Err(bad(KEY_LEADING_ZEROS));
            } else if run.len() == 0 {
                return Err(AddressStringError::at(input, KEY_INVALID_CHAR_COMBO, x));
            } else if digits + run.single_wildcards > 8 {
                return Err(AddressStringError::at(input, KEY_SEGMENT_TOO_LONG_AT, run.value_start));
            }
            rec.flags.inet_aton_value = true;
            return Ok(with_single_wildcard(acc, 16, run, false));
        }

        if lz == 1 && fmt.allow_binary && digits > 1 && bytes[run.value_start + 1] == b'b' {
            let bin_digits: usize = digits - 1;
            if bin_digits + run.single_wildcards > 32 {
                return Err(AddressStringError::at(input, KEY_SEGMENT_TOO_LONG_AT, run.value_start));
            }
            let value: u64 = if bin_digits <= 15 {
                // drop the folded 'b' nibble
                let mask: u64 = !(u64::MAX << (4 * bin_digits));
                switch_value(acc & mask, 2, bin_digits).map_err(bad)?
            } else {
                let body: &[u8] = &bytes[run.value_start + 2..run.end - run.single_wildcards];
                parse_digits(body, 2).map_err(bad)? as u64
            };
            rec.flags.binary_digits = true;
            return Ok(with_single_wildcard(value, 2, run, false));
        }

        if lz > 0 && v4.allow_inet_aton_octal {
            if !fmt.allow_leading_zeros {
                return Err(bad(KEY_LEADING_ZEROS));
            } else if lz > 1 && !v4.allow_inet_aton_leading_zeros {
                return Err(bad(KEY_LEADING_ZEROS));
            } else if digits + run.single_wildcards > 11 {
                return Err(AddressStringError::at(input, KEY_SEGMENT_TOO_LONG_AT, run.value_start));
            }
            let value: u64 = switch_value(acc, 8, digits).map_err(bad)?;
            rec.flags.inet_aton_value = true;
            return Ok(with_single_wildcard(value, 8, run, false));
        }

        if lz > 0 {
            if !fmt.allow_leading_zeros {
                return Err(bad(KEY_LEADING_ZEROS));
            }
            rec.flags.ipv4_leading_zeros = true;
        }
        if digits + run.single_wildcards > 10 {
            return Err(AddressStringError::at(input, KEY_SEGMENT_TOO_LONG_AT, run.value_start));
        }
        let value: u64 = switch_value(acc, 10, digits).map_err(bad)?;
        Ok(with_single_wildcard(value, 10, run, lz == 0))
    }

    fn check_segments(
        &self,
        input: &str,
        rec: &mut ParseRecord,
        opts: &ScanOptions,
    ) -> Result<(), AddressStringError> {
        let Some(ip) = opts.ip() else {
            return Ok(());
        };
        let v4 = &ip.ipv4;
        let count: usize = rec.segments.len();
        let missing: usize = IPV4_SEGMENT_COUNT.saturating_sub(count);
        let wildcard_separator: bool = rec.flags.wildcard && v4.format.allow_wildcarded_separator;

        let mut joined: bool = false;
        if missing > 0 {
            if count > 1 {
                if v4.allow_inet_aton_joined {
                    joined = true;
                    rec.flags.inet_aton_joined = true;
                } else if !wildcard_separator {
                    return Err(AddressStringError::new(input, KEY_IPV4_TOO_FEW));
                }
            } else {
                joined = v4.allow_inet_aton_joined;
            }
        }

        let limit_length: bool = !v4.format.allow_unlimited_leading_zeros;
        for (i, seg) in rec.segments.iter_mut().enumerate() {
            let last: bool = joined && i == count - 1;
            let max: u64 = if last { ipv4_max_value(missing + 1) } else { IPV4_MAX_SEGMENT };
            let additional: usize = if last { missing } else { 0 };
            if seg.flags.wildcard {
                if last {
                    seg.upper = max;
                }
                continue;
            }
            if seg.flags.inferred_upper {
                if seg.lower > max {
                    return Err(AddressStringError::new(input, KEY_IPV4_TOO_LARGE));
                }
                seg.upper = max;
            } else if seg.flags.single_wildcard {
                if seg.lower > max {
                    return Err(AddressStringError::new(input, KEY_IPV4_TOO_LARGE));
                }
                seg.upper = seg.upper.min(max);
            } else if seg.upper > max {
                return Err(AddressStringError::new(input, KEY_IPV4_TOO_LARGE));
            }
            if limit_length {
                let lower_len: usize = (seg.lower_end - seg.lower_start).saturating_sub(radix_prefix_len(seg.radix));
                if !seg.flags.inferred_lower && lower_len > ipv4_max_string_len(additional, seg.radix) {
                    return Err(AddressStringError::new(input, KEY_SEGMENT_TOO_LONG));
                }
                if seg.lower_end != seg.upper_end && !seg.flags.inferred_upper {
                    let upper_len: usize =
                        (seg.upper_end - seg.upper_start).saturating_sub(radix_prefix_len(seg.upper_radix));
                    if upper_len > ipv4_max_string_len(additional, seg.upper_radix) {
                        return Err(AddressStringError::new(input, KEY_SEGMENT_TOO_LONG));
                    }
                }
            }
        }
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */

/// Colon separated IPv6, including the `::` elision.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ipv6Grammar;

impl FamilyGrammar for Ipv6Grammar {
    fn name(&self) -> &'static str {
        "IPv6"
    }

    fn default_radix(&self) -> u32 {
        16
    }

    fn segment_bits(&self, _rec: &ParseRecord) -> u32 {
        16
    }

    fn segment_count(&self, _rec: &ParseRecord) -> usize {
        IPV6_SEGMENT_COUNT
    }

    fn format<'o>(&self, opts: &ScanOptions<'o>) -> &'o FormatOptions {
        match opts {
            ScanOptions::Ip(o) => &o.ipv6.format,
            ScanOptions::Mac(o) => &o.format,
        }
    }

    fn convert(
        &self,
        input: &str,
        run: &DigitRun,
        opts: &ScanOptions,
        rec: &mut ParseRecord,
    ) -> Result<Converted, AddressStringError> {
        convert_hex(input, run, self.format(opts), 4, 16, rec)
    }

    fn check_segments(
        &self,
        input: &str,
        rec: &mut ParseRecord,
        opts: &ScanOptions,
    ) -> Result<(), AddressStringError> {
        let total: usize = rec.total_segment_count();
        if rec.compressed_index.is_some() && total > IPV6_SEGMENT_COUNT {
            // `::` must stand for at least one zero segment
            return Err(AddressStringError::new(input, KEY_TOO_MANY_SEGMENTS));
        }
        let wildcard_separator: bool = rec.flags.wildcard && self.format(opts).allow_wildcarded_separator;
        if !wildcard_separator && total != 1 && total < IPV6_SEGMENT_COUNT && rec.compressed_index.is_none() {
            return Err(AddressStringError::new(input, KEY_TOO_FEW_SEGMENTS));
        }
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */

/// MAC-48 and EUI-64 in every separator style.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacGrammar;

impl MacGrammar {
    /// Hex digits in one segment of the format.
    fn segment_digits(&self, rec: &ParseRecord) -> usize {
        match rec.mac_format {
            Some(MacFormat::Dotted) => 4,
            _ => 2,
        }
    }

    /// Segment limit for the preferred address size.
    pub(crate) fn segment_limit(format: MacFormat, size: MacSize) -> usize {
        match (format, size) {
            (MacFormat::Dotted, MacSize::Mac48) => MAC_DOTTED_SEGMENT_COUNT,
            (MacFormat::Dotted, _) => MAC_DOTTED64_SEGMENT_COUNT,
            (_, MacSize::Mac48) => MAC48_SEGMENT_COUNT,
            _ => EUI64_SEGMENT_COUNT,
        }
    }
}

impl FamilyGrammar for MacGrammar {
    fn name(&self) -> &'static str {
        "MAC"
    }

    fn default_radix(&self) -> u32 {
        16
    }

    fn segment_bits(&self, rec: &ParseRecord) -> u32 {
        if rec.flags.single_segment {
            return if rec.flags.extended_mac { 64 } else { 48 };
        }
        match rec.mac_format {
            Some(MacFormat::Dotted) => 16,
            _ => 8,
        }
    }

    fn segment_count(&self, rec: &ParseRecord) -> usize {
        match (rec.mac_format, rec.flags.extended_mac) {
            (Some(MacFormat::Dotted), false) => MAC_DOTTED_SEGMENT_COUNT,
            (Some(MacFormat::Dotted), true) => MAC_DOTTED64_SEGMENT_COUNT,
            (_, false) => MAC48_SEGMENT_COUNT,
            (_, true) => EUI64_SEGMENT_COUNT,
        }
    }

    fn format<'o>(&self, opts: &ScanOptions<'o>) -> &'o FormatOptions {
        match opts {
            ScanOptions::Mac(o) => &o.format,
            ScanOptions::Ip(o) => &o.ipv6.format,
        }
    }

    fn convert(
        &self,
        input: &str,
        run: &DigitRun,
        opts: &ScanOptions,
        rec: &mut ParseRecord,
    ) -> Result<Converted, AddressStringError> {
        let fmt: &FormatOptions = self.format(opts);
        let max_digits: usize = if rec.flags.single_segment {
            if rec.flags.extended_mac {
                MAC_EXTENDED_SINGLE_DIGITS
            } else {
                MAC_SINGLE_DIGITS
            }
        } else if rec.flags.double_segment {
            MAC_EXTENDED_DOUBLE_DIGITS
        } else {
            self.segment_digits(rec)
        };
        let conv: Converted = convert_hex(input, run, fmt, max_digits, 4 * max_digits, rec)?;

        let short: bool = run.len() < self.segment_digits(rec) && run.single_wildcards == 0;
        let allow_short: bool = opts.mac().map(|m| m.allow_short_segments).unwrap_or(true);
        if short && !allow_short && !rec.flags.single_segment && !rec.flags.double_segment {
            return Err(AddressStringError::at(input, KEY_SEGMENT_TOO_SHORT_AT, run.start));
        }
        Ok(conv)
    }

    fn check_segments(
        &self,
        input: &str,
        rec: &mut ParseRecord,
        opts: &ScanOptions,
    ) -> Result<(), AddressStringError> {
        let mac: MacOptions = opts.mac().copied().unwrap_or_default();
        let count: usize = rec.segments.len();

        if rec.flags.double_segment {
            let back_max: u64 = if rec.flags.extended_mac { MAC_MAX_QUINTUPLE } else { MAC_MAX_TRIPLE };
            for (i, max) in [MAC_MAX_TRIPLE, back_max].into_iter().enumerate() {
                if let Some(seg) = rec.segments.get_mut(i) {
                    if seg.flags.wildcard || seg.flags.inferred_upper {
                        seg.upper = max;
                    } else if seg.upper > max {
                        return Err(AddressStringError::new(input, KEY_SEGMENT_TOO_LONG));
                    }
                }
            }
            return Ok(());
        }
        if rec.flags.single_segment {
            return Ok(());
        }

        let Some(format) = rec.mac_format else {
            return Ok(());
        };
        let (short_count, long_count) = match format {
            MacFormat::Dotted => (MAC_DOTTED_SEGMENT_COUNT, MAC_DOTTED64_SEGMENT_COUNT),
            _ => (MAC48_SEGMENT_COUNT, EUI64_SEGMENT_COUNT),
        };
        let wildcard_separator: bool = rec.flags.wildcard && mac.format.allow_wildcarded_separator;
        let expected: usize = match mac.address_size {
            MacSize::Mac48 => short_count,
            MacSize::Eui64 => long_count,
            MacSize::Any if count > short_count => long_count,
            MacSize::Any => short_count,
        };
        if count > expected {
            return Err(AddressStringError::new(input, KEY_TOO_MANY_SEGMENTS));
        }
        if count < expected && !wildcard_separator {
            return Err(AddressStringError::new(input, KEY_TOO_FEW_SEGMENTS));
        }
        rec.flags.extended_mac = expected == long_count;
        let max: u64 = self.max_segment_value(rec);
        if rec.segments.iter().any(|s| s.upper > max) {
            return Err(AddressStringError::new(input, KEY_SEGMENT_TOO_LONG));
        }
        Ok(())
    }
}

/// Grammar for a resolved IP version.
pub(crate) fn for_version(version: IpVersion) -> &'static dyn FamilyGrammar {
    static V4: Ipv4Grammar = Ipv4Grammar;
    static V6: Ipv6Grammar = Ipv6Grammar;
    match version {
        IpVersion::V4 => &V4,
        _ => &V6,
    }
}

pub(crate) fn mac() -> &'static dyn FamilyGrammar {
    static MAC: MacGrammar = MacGrammar;
    &MAC
}

/* -------------------------------------------------------------------------- */
