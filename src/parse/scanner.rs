// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    chars::CharClass,
    convert::{parse_base85, parse_digits, BASE85_DIGITS},
    grammar::{
        self, DigitRun, FamilyGrammar, MacGrammar, ScanOptions, MAC_DOUBLE_DIGITS, MAC_EXTENDED_DOUBLE_DIGITS,
        MAC_EXTENDED_SINGLE_DIGITS, MAC_SINGLE_DIGITS,
    },
    options::{MacOptions, MacSize, ParseOptions},
    qualifier::QualifierParser,
    record::*,
    strings::*,
    AddressStringError, IPV4_SEGMENT_COUNT, IPV6_MIXED_REPLACED, IPV6_SEGMENT_COUNT,
};
use tracing::{debug, trace};

/// 20 `*` characters are a base-85 address, not "all".
const MAX_WILDCARDS: usize = BASE85_DIGITS - 1;
const IPV6_SINGLE_DIGITS: usize = 32;
/// `0b` and 128 binary digits
const IPV6_SINGLE_BINARY_CHARS: usize = 130;
const IPV4_SINGLE_MAX_DIGITS: usize = 11;
/// `0b` and 32 binary digits
const IPV4_SINGLE_BINARY_CHARS: usize = 34;
/// base-85 range separator
const BASE85_RANGE: &[u8] = b"~~";
/// base-85 zone separator, `%` being a base-85 digit
const BASE85_ZONE: &[u8] = "\u{a7}".as_bytes();

/// Frozen lower bound of a range.
#[derive(Clone, Copy, Debug)]
struct Front {
    run: DigitRun,
    wildcards: usize,
    /// offset of the range character
    index: usize,
    /// written with the family's standard range character
    standard_char: bool,
}

/// The segment under construction.
#[derive(Clone, Copy, Debug, Default)]
struct SegmentState {
    start: usize,
    /// start of the live bound (after the range character, if any)
    run_start: usize,
    value_start: usize,
    digits: PendingDigits,
    wildcards: usize,
    single_wildcards: usize,
    front: Option<Front>,
}

impl SegmentState {
    fn at(start: usize) -> Self {
        SegmentState { start, run_start: start, value_start: start, ..Default::default() }
    }

    fn run(&self, end: usize) -> DigitRun {
        DigitRun {
            digits: self.digits,
            start: self.run_start,
            value_start: self.value_start,
            end,
            single_wildcards: self.single_wildcards,
        }
    }
}

/**
Forward-only address string scanner.

One index walks the string once. Digits accumulate into [PendingDigits]
until a separator commits the segment through the resolved
[FamilyGrammar]; the end of the body acts as a final separator.
*/
pub(crate) struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    opts: ScanOptions<'a>,
    /// scanning the IPv4 tail of a mixed IPv6 address
    embedded: bool,
    index: usize,
    end: usize,
    rec: ParseRecord,
    grammar: Option<&'static dyn FamilyGrammar>,
    seg: SegmentState,
    can_be_base85: bool,
    /// first character only valid in base 85
    extended_index: Option<usize>,
    extended_range_index: Option<usize>,
    /// MAC first segment range written with `|`
    first_segment_dashed_range: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn ip(input: &'a str, opts: &'a ParseOptions) -> Self {
        Self::ip_within(input, 0, input.len(), opts, false)
    }

    /// Scan `input[start..end]` as an IP address body.
    pub(crate) fn ip_within(input: &'a str, start: usize, end: usize, opts: &'a ParseOptions, embedded: bool) -> Self {
        Scanner {
            input,
            bytes: input.as_bytes(),
            opts: ScanOptions::Ip(opts),
            embedded,
            index: start,
            end,
            rec: ParseRecord::new(start, end, false),
            grammar: None,
            seg: SegmentState::at(start),
            can_be_base85: !embedded && opts.allow_ipv6 && opts.ipv6.allow_base85,
            extended_index: None,
            extended_range_index: None,
            first_segment_dashed_range: false,
        }
    }

    pub(crate) fn mac(input: &'a str, opts: &'a MacOptions) -> Self {
        Scanner {
            input,
            bytes: input.as_bytes(),
            opts: ScanOptions::Mac(opts),
            embedded: false,
            index: 0,
            end: input.len(),
            rec: ParseRecord::new(0, input.len(), true),
            grammar: Some(grammar::mac()),
            seg: SegmentState::at(0),
            can_be_base85: false,
            extended_index: None,
            extended_range_index: None,
            first_segment_dashed_range: false,
        }
    }

    /// Scan the body, then the qualifier.
    pub(crate) fn run(mut self) -> Result<ParseRecord, AddressStringError> {
        self.scan()?;
        if let Some(ip) = self.opts.ip() {
            QualifierParser::new(self.input, ip).parse(&mut self.rec)?;
        }
        Ok(self.rec)
    }

    /// Scan the body only; any qualifier is left unparsed.
    pub(crate) fn scan_only(mut self) -> Result<ParseRecord, AddressStringError> {
        self.scan()?;
        Ok(self.rec)
    }

    #[inline]
    fn is_mac(&self) -> bool {
        self.rec.is_mac
    }

    fn err(&self, key: &'static str) -> AddressStringError {
        AddressStringError::new(self.input, key)
    }

    fn err_at(&self, key: &'static str, index: usize) -> AddressStringError {
        AddressStringError::at(self.input, key, index)
    }

    fn resolved(&self) -> Result<&'static dyn FamilyGrammar, AddressStringError> {
        self.grammar.ok_or_else(|| self.err(KEY_TOO_FEW_SEGMENTS))
    }

    fn set_version(&mut self, version: IpVersion, index: usize) {
        debug!("resolved {version:?} at index {index}: '{}'", self.input);
        self.rec.version = version;
        self.grammar = Some(grammar::for_version(version));
    }

    fn mark_extended(&mut self, index: usize) {
        self.extended_index.get_or_insert(index);
    }

    fn next_segment(&mut self, start: usize) {
        self.index = start;
        self.seg = SegmentState::at(start);
    }

    /* ---------------------------------- */

    fn scan(&mut self) -> Result<(), AddressStringError> {
        while self.index < self.end {
            let i: usize = self.index;
            let c: u8 = self.bytes[i];
            match c {
                b'0'..=b'9' | b'a'..=b'f' | b'A'..=b'F' => {
                    self.seg.digits.push(c, CharClass::digit(c).unwrap_or(0));
                    self.index += 1;
                }
                b'.' => self.dot(i)?,
                b':' => self.colon(i)?,
                b'-' => self.dash(i)?,
                b'|' if self.is_mac() => self.pipe(i)?,
                b' ' if self.is_mac() => self.mac_separator(MacFormat::Space, i)?,
                b'*' => {
                    self.seg.wildcards += 1;
                    self.index += 1;
                }
                b'_' => {
                    self.seg.single_wildcards += 1;
                    self.seg.digits.has_digits = true;
                    self.index += 1;
                }
                b'%' => self.percent(i)?,
                b'/' => self.slash(i)?,
                b'x' | b'X' => self.hex_delimiter(i)?,
                _ => self.other(c, i)?,
            }
        }
        self.finish()
    }

    /* ---------------------------------- */

    fn dot(&mut self, i: usize) -> Result<(), AddressStringError> {
        if self.is_mac() {
            return self.mac_separator(MacFormat::Dotted, i);
        }
        if let Some(x) = self.extended_index {
            return Err(self.err_at(KEY_INVALID_CHAR, x));
        }
        self.can_be_base85 = false;
        let allow_ipv4: bool = self.opts.ip().map(|o| o.allow_ipv4).unwrap_or(false);
        match self.rec.version {
            IpVersion::Indeterminate => {
                if !allow_ipv4 {
                    return Err(self.err(KEY_IPV4));
                }
                self.set_version(IpVersion::V4, i);
                self.rec.segments.reserve(IPV4_SEGMENT_COUNT);
            }
            IpVersion::V6 => return self.mixed(i),
            IpVersion::V4 => {
                if self.rec.segments.len() >= IPV4_SEGMENT_COUNT - 1 {
                    return Err(self.err(KEY_IPV4_TOO_MANY));
                }
            }
        }
        self.end_segment(i)?;
        self.next_segment(i + 1);
        Ok(())
    }

    /// IPv4 tail of a mixed address, scanned by a nested scanner.
    fn mixed(&mut self, i: usize) -> Result<(), AddressStringError> {
        let Some(ip) = self.opts.ip() else {
            return Err(self.err_at(KEY_INVALID_CHAR, i));
        };
        if !ip.ipv6.allow_mixed {
            return Err(self.err(KEY_NO_MIXED));
        }
        let total: usize = self.rec.segments.len() + IPV6_MIXED_REPLACED;
        if total > IPV6_SEGMENT_COUNT {
            return Err(self.err(KEY_TOO_MANY_SEGMENTS));
        }
        if self.seg.wildcards > 0
            && self.rec.compressed_index.is_none()
            && total < IPV6_SEGMENT_COUNT
            && ip.ipv6.format.allow_wildcarded_separator
        {
            // `1:2:3:4:5:*.2.3.4`: the `*` covers an IPv6 segment too
            let start: usize = self.seg.start;
            self.rec.flags.wildcard = true;
            self.rec.push(SegmentRecord {
                upper: grammar::IPV6_MAX_SEGMENT,
                radix: 16,
                upper_radix: 16,
                start,
                lower_start: start,
                lower_end: i,
                upper_start: start,
                upper_end: i,
                flags: SegmentFlags { wildcard: true, merged_mixed: true, ..Default::default() },
                ..Default::default()
            });
        }

        let start: usize = self.seg.start;
        debug!("embedded IPv4 section at index {start}: '{}'", self.input);
        let emb: ParseOptions = ip.embedded();
        let mut mixed: ParseRecord = Scanner::ip_within(self.input, start, self.end, &emb, true)
            .scan_only()
            .map_err(|e| AddressStringError::wrap(self.input, e.key(), e))?;
        mixed.qualifier = Qualifier::default();
        mixed.qualifier_index = None;
        let resume: usize = mixed.end;
        self.rec.mixed = Some(Box::new(mixed));
        self.next_segment(resume);
        Ok(())
    }

    fn colon(&mut self, i: usize) -> Result<(), AddressStringError> {
        if self.is_mac() {
            if self.first_segment_dashed_range {
                return Err(self.err_at(KEY_MAC_MIXED_FORMAT, i));
            }
            return self.mac_separator(MacFormat::Colon, i);
        }
        if let Some(x) = self.extended_index {
            return Err(self.err_at(KEY_INVALID_CHAR, x));
        }
        self.can_be_base85 = false;
        if let RadixHint::Hex(x) = self.seg.digits.radix_hint {
            return Err(self.err_at(KEY_INVALID_CHAR, x));
        }
        let allow_ipv6: bool = self.opts.ip().map(|o| o.allow_ipv6).unwrap_or(false);
        let at_segment_start: bool = i == self.seg.start && self.seg.front.is_none();
        match self.rec.version {
            IpVersion::V4 => return Err(self.err(KEY_IPV6_SEPARATOR)),
            IpVersion::Indeterminate => {
                if !allow_ipv6 {
                    return Err(self.err(KEY_IPV6));
                }
                self.set_version(IpVersion::V6, i);
                self.rec.segments.reserve(IPV6_SEGMENT_COUNT);
                if at_segment_start {
                    // leading `::`
                    if i + 1 >= self.end || self.bytes[i + 1] != b':' {
                        return Err(self.err(KEY_IPV6_START_SEPARATOR));
                    }
                    self.compress(i);
                    self.next_segment(i + 2);
                    return Ok(());
                }
            }
            IpVersion::V6 => {}
        }
        if self.rec.segments.len() >= IPV6_SEGMENT_COUNT {
            return Err(self.err(KEY_TOO_MANY_SEGMENTS));
        }
        if at_segment_start && self.seg.wildcards == 0 {
            // second `:` of `::`
            if self.rec.compressed_index.is_some() {
                return Err(self.err(KEY_IPV6_AMBIGUOUS));
            }
            self.compress(i - 1);
            self.next_segment(i + 1);
            return Ok(());
        }
        self.end_segment(i)?;
        self.next_segment(i + 1);
        Ok(())
    }

    /// Record the `::` placeholder segment starting at `offset`.
    fn compress(&mut self, offset: usize) {
        self.rec.compressed_index = Some(self.rec.segments.len());
        self.rec.compressed_offset = Some(offset);
        self.rec.push(SegmentRecord {
            radix: 16,
            upper_radix: 16,
            start: offset,
            lower_start: offset,
            lower_end: offset + 2,
            upper_start: offset,
            upper_end: offset + 2,
            ..Default::default()
        });
    }

    fn dash(&mut self, i: usize) -> Result<(), AddressStringError> {
        if !self.is_mac() {
            return self.range_char(i, true);
        }
        match self.rec.mac_format {
            Some(MacFormat::Dashed) => self.mac_separator(MacFormat::Dashed, i),
            Some(_) => self.range_char(i, true),
            None => match self.seg.front {
                Some(_) if self.first_segment_dashed_range => self.mac_separator(MacFormat::Dashed, i),
                Some(front) => {
                    // `aa-bb-`: the first dash was a separator after all
                    self.set_mac_format(MacFormat::Dashed, i)?;
                    self.commit_front_alone(front)?;
                    self.mac_separator(MacFormat::Dashed, i)
                }
                // range front, or the first separator: decided by what follows
                None => self.range_char(i, false),
            },
        }
    }

    fn pipe(&mut self, i: usize) -> Result<(), AddressStringError> {
        match self.rec.mac_format {
            None | Some(MacFormat::Dashed) => {
                if self.seg.front.is_some() {
                    return Err(self.err_at(KEY_INVALID_CHAR_COMBO, i));
                }
                if self.rec.mac_format.is_none() && self.rec.segments.is_empty() {
                    self.first_segment_dashed_range = true;
                }
                self.range_char(i, true)
            }
            Some(_) => Err(self.err_at(KEY_INVALID_CHAR_COMBO, i)),
        }
    }

    /// Freeze the front of a range.
    fn range_char(&mut self, i: usize, standard: bool) -> Result<(), AddressStringError> {
        if self.extended_index.is_some() {
            self.index += 1;
            return Ok(());
        }
        if self.seg.front.is_some() {
            if self.can_be_base85 {
                self.mark_extended(i);
                self.index += 1;
                return Ok(());
            }
            return Err(self.err_at(KEY_INVALID_CHAR_COMBO, i));
        }
        self.seg.front = Some(Front {
            run: self.seg.run(i),
            wildcards: self.seg.wildcards,
            index: i,
            standard_char: standard,
        });
        self.seg.digits = PendingDigits::default();
        self.seg.wildcards = 0;
        self.seg.single_wildcards = 0;
        self.seg.run_start = i + 1;
        self.seg.value_start = i + 1;
        self.index = i + 1;
        Ok(())
    }

    fn percent(&mut self, i: usize) -> Result<(), AddressStringError> {
        let Some(ip) = self.opts.ip() else {
            return Err(self.err_at(KEY_INVALID_CHAR, i));
        };
        let all_wildcards: bool = self.seg.wildcards == i - self.rec.start && self.seg.wildcards <= MAX_WILDCARDS;
        let single_v6: bool = self.rec.version == IpVersion::Indeterminate
            && self.seg.front.is_none()
            && i - self.seg.value_start == IPV6_SINGLE_DIGITS;
        let at_ipv6: bool = self.rec.version.is_ipv6() || self.embedded;
        let d: &PendingDigits = &self.seg.digits;
        let after_digits: bool = (d.has_digits || d.leading_with_zero) && self.seg.wildcards == 0;
        if ip.ipv6.allow_zone && self.rec.version.is_ipv4() && !self.embedded && after_digits {
            // `1.2.3.4%eth0`
            return Err(self.err_at(KEY_ONLY_IPV6_ZONE, i));
        }
        if ip.ipv6.allow_zone && (at_ipv6 || single_v6 || all_wildcards) {
            self.can_be_base85 = false;
            self.rec.flags.zoned = true;
            self.rec.qualifier_index = Some(i + 1);
            self.end = i;
        } else {
            // SQL style wildcard
            self.seg.wildcards += 1;
            self.index += 1;
        }
        Ok(())
    }

    fn slash(&mut self, i: usize) -> Result<(), AddressStringError> {
        if self.is_mac() {
            return Err(self.err_at(KEY_INVALID_CHAR, i));
        }
        self.rec.flags.prefix_separator = true;
        self.rec.qualifier_index = Some(i + 1);
        self.end = i;
        Ok(())
    }

    fn hex_delimiter(&mut self, i: usize) -> Result<(), AddressStringError> {
        let d: &PendingDigits = &self.seg.digits;
        let lone_zero: bool = d.leading_with_zero
            && !d.has_digits
            && d.leading_zero_count == 0
            && d.radix_hint == RadixHint::Natural
            && self.seg.wildcards == 0
            && i == self.seg.run_start + 1;
        if !lone_zero {
            if self.can_be_base85 {
                self.mark_extended(i);
                self.index += 1;
                return Ok(());
            }
            return Err(self.err_at(KEY_INVALID_CHAR_COMBO, i));
        }
        if (self.is_mac() && !self.rec.segments.is_empty()) || self.rec.version.is_ipv6() {
            return Err(self.err_at(KEY_INVALID_CHAR, i));
        }
        self.seg.digits = PendingDigits { radix_hint: RadixHint::Hex(i), ..Default::default() };
        self.seg.value_start = i + 1;
        self.index = i + 1;
        Ok(())
    }

    fn other(&mut self, c: u8, i: usize) -> Result<(), AddressStringError> {
        if self.can_be_base85 {
            let next: &[u8] = &self.bytes[i..self.end.min(i + 2)];
            if next == BASE85_RANGE {
                let offset: usize = i - self.rec.start;
                if self.extended_range_index.is_none() && (offset == 0 || offset == BASE85_DIGITS) {
                    self.extended_range_index = Some(i);
                    self.mark_extended(i);
                    self.index += 2;
                    return Ok(());
                }
            }
            if next == BASE85_ZONE {
                let allow_zone: bool = self.opts.ip().map(|o| o.ipv6.allow_zone).unwrap_or(false);
                if !allow_zone {
                    return Err(self.err_at(KEY_INVALID_CHAR, i));
                }
                self.rec.flags.zoned = true;
                self.rec.qualifier_index = Some(i + BASE85_ZONE.len());
                self.end = i;
                return Ok(());
            }
            if CharClass::base85(c).is_some() {
                self.mark_extended(i);
                self.index += 1;
                return Ok(());
            }
        }
        Err(self.err_at(KEY_INVALID_CHAR, i))
    }

    /* ---------------------------------- */

    fn set_mac_format(&mut self, format: MacFormat, i: usize) -> Result<(), AddressStringError> {
        let mac: MacOptions = self.opts.mac().copied().unwrap_or_default();
        match self.rec.mac_format {
            None => {
                let allowed: bool = match format {
                    MacFormat::Colon => mac.allow_colon_delimited,
                    MacFormat::Dashed => mac.allow_dashed,
                    MacFormat::Dotted => mac.allow_dotted,
                    MacFormat::Space => mac.allow_space_delimited,
                };
                if !allowed {
                    return Err(self.err(KEY_MAC_FORMAT));
                }
                debug!("resolved MAC {format:?} at index {i}: '{}'", self.input);
                self.rec.mac_format = Some(format);
                if format != MacFormat::Dashed {
                    // a `-` range in the first segment is standard outside the dashed format
                    if let Some(front) = self.seg.front.as_mut() {
                        front.standard_char = self.bytes[front.index] == b'-';
                    }
                }
                Ok(())
            }
            Some(f) if f != format => Err(self.err_at(KEY_MAC_MIXED_FORMAT, i)),
            Some(_) => Ok(()),
        }
    }

    fn mac_separator(&mut self, format: MacFormat, i: usize) -> Result<(), AddressStringError> {
        self.set_mac_format(format, i)?;
        let size: MacSize = self.opts.mac().map(|m| m.address_size).unwrap_or_default();
        if self.rec.segments.len() + 1 >= MacGrammar::segment_limit(format, size) {
            return Err(self.err(KEY_TOO_MANY_SEGMENTS));
        }
        self.end_segment(i)?;
        self.next_segment(i + 1);
        Ok(())
    }

    /// Commit a frozen range front as a segment of its own; the live digits
    /// become the next segment.
    fn commit_front_alone(&mut self, front: Front) -> Result<(), AddressStringError> {
        let grammar: &'static dyn FamilyGrammar = self.resolved()?;
        let start: usize = self.seg.start;
        let seg: SegmentRecord = self.value_segment(grammar, &front.run, front.wildcards, start)?;
        self.rec.push(seg);
        self.seg.front = None;
        self.seg.start = front.index + 1;
        Ok(())
    }

    /* ---------------------------------- */

    /// Commit the segment ending at `end`.
    fn end_segment(&mut self, end: usize) -> Result<(), AddressStringError> {
        let grammar: &'static dyn FamilyGrammar = self.resolved()?;
        let back: DigitRun = self.seg.run(end);
        let start: usize = self.seg.start;
        let seg: SegmentRecord = match self.seg.front.take() {
            Some(front) => {
                if front.wildcards > 0 {
                    return Err(self.err_at(KEY_INVALID_CHAR_COMBO, front.index));
                }
                if self.seg.wildcards > 0 {
                    return Err(self.err_at(KEY_INVALID_CHAR_COMBO, end));
                }
                self.range_segment(grammar, front, &back, start)?
            }
            None => self.value_segment(grammar, &back, self.seg.wildcards, start)?,
        };
        trace!(
            index = self.rec.segments.len(),
            radix = seg.radix,
            lower = seg.lower,
            upper = seg.upper,
            "segment committed"
        );
        self.rec.push(seg);
        Ok(())
    }

    /// Segment holding a single value, a `*`, or a `_` wildcard run.
    fn value_segment(
        &mut self,
        grammar: &'static dyn FamilyGrammar,
        run: &DigitRun,
        wildcards: usize,
        start: usize,
    ) -> Result<SegmentRecord, AddressStringError> {
        let radix: u32 = grammar.default_radix();
        if wildcards > 0 {
            if !grammar.format(&self.opts).range.allow_wildcard {
                return Err(self.err(KEY_NO_WILDCARD));
            }
            if wildcards != run.end - start || run.digits.radix_hint != RadixHint::Natural {
                return Err(self.err_at(KEY_INVALID_CHAR_COMBO, run.end));
            }
            self.rec.flags.wildcard = true;
            return Ok(SegmentRecord {
                upper: grammar.max_segment_value(&self.rec),
                radix,
                upper_radix: radix,
                start,
                lower_start: start,
                lower_end: run.end,
                upper_start: start,
                upper_end: run.end,
                flags: SegmentFlags { wildcard: true, ..Default::default() },
                ..Default::default()
            });
        }
        if run.is_empty() {
            return Err(self.err_at(KEY_EMPTY_SEGMENT, start));
        }
        let c = grammar.convert(self.input, run, &self.opts, &mut self.rec)?;
        if c.single_wildcard {
            self.rec.flags.wildcard = true;
        }
        Ok(SegmentRecord {
            lower: c.lower,
            upper: c.upper,
            radix: c.radix,
            upper_radix: c.radix,
            start,
            lower_start: run.start,
            lower_end: run.end,
            upper_start: run.start,
            upper_end: run.end,
            flags: SegmentFlags { standard_str: c.standard, single_wildcard: c.single_wildcard, ..Default::default() },
            ..Default::default()
        })
    }

    /// Segment written as `a-b`, `-b` or `a-`.
    fn range_segment(
        &mut self,
        grammar: &'static dyn FamilyGrammar,
        front: Front,
        back: &DigitRun,
        start: usize,
    ) -> Result<SegmentRecord, AddressStringError> {
        let range = grammar.format(&self.opts).range;
        if !range.allow_range_separator {
            return Err(self.err(KEY_NO_RANGE));
        }
        if front.run.single_wildcards > 0 || back.single_wildcards > 0 {
            return Err(self.err_at(KEY_INVALID_CHAR_COMBO, front.index));
        }
        let radix: u32 = grammar.default_radix();
        let mut flags = SegmentFlags { range_wildcard: true, ..Default::default() };

        let (lower, lower_radix, lower_std) = if front.run.is_empty() {
            if !range.allow_inferred_boundary {
                return Err(self.err_at(KEY_EMPTY_SEGMENT, start));
            }
            flags.inferred_lower = true;
            (0, radix, true)
        } else {
            let c = grammar.convert(self.input, &front.run, &self.opts, &mut self.rec)?;
            (c.lower, c.radix, c.standard)
        };
        let (upper, upper_radix, upper_std) = if back.is_empty() {
            if !range.allow_inferred_boundary {
                return Err(self.err_at(KEY_EMPTY_SEGMENT, back.start));
            }
            flags.inferred_upper = true;
            (grammar.inferred_upper(&self.rec), radix, true)
        } else {
            let c = grammar.convert(self.input, back, &self.opts, &mut self.rec)?;
            (c.lower, c.radix, c.standard)
        };
        flags.standard_range_str = front.standard_char && lower_std && upper_std;

        let mut seg = SegmentRecord {
            lower,
            upper,
            radix: lower_radix,
            upper_radix,
            start,
            lower_start: front.run.start,
            lower_end: front.index,
            upper_start: back.start,
            upper_end: back.end,
            flags,
            ..Default::default()
        };
        if lower > upper {
            if flags.inferred_upper {
                return Err(self.err(KEY_INVALID_RANGE));
            }
            if !range.allow_reverse_range {
                return Err(self.err(KEY_INVALID_RANGE));
            }
            seg.swap_bounds();
        }
        Ok(seg)
    }

    /* ---------------------------------- */

    fn is_segmented(&self) -> bool {
        if self.is_mac() {
            self.rec.mac_format.is_some()
        } else {
            self.rec.version != IpVersion::Indeterminate
        }
    }

    fn finish(&mut self) -> Result<(), AddressStringError> {
        let end: usize = self.index;
        self.rec.end = end;
        if self.is_segmented() {
            if !self.is_mac() {
                if let Some(x) = self.extended_index {
                    return Err(self.err_at(KEY_INVALID_CHAR, x));
                }
            }
            if self.rec.version.is_ipv6() && end == self.seg.start && self.seg.front.is_none() {
                let ends_compressed: bool = self.rec.compressed_offset.map(|o| o + 2) == Some(end);
                if !ends_compressed && self.rec.mixed.is_none() {
                    return Err(self.err(KEY_END_SEPARATOR));
                }
            } else {
                self.end_segment(end)?;
            }
        } else if !self.finish_unsegmented(end)? {
            return Ok(());
        }
        let grammar: &'static dyn FamilyGrammar = self.resolved()?;
        grammar.check_segments(self.input, &mut self.rec, &self.opts)
    }

    /// No separator was seen. Returns whether segment checks still apply.
    fn finish_unsegmented(&mut self, end: usize) -> Result<bool, AddressStringError> {
        let total: usize = end - self.rec.start;
        let (allow_empty, allow_all) = match self.opts {
            ScanOptions::Ip(o) => (o.allow_empty, o.allow_all),
            ScanOptions::Mac(o) => (o.allow_empty, o.allow_all),
        };
        if total == 0 {
            if self.rec.flags.prefix_separator {
                return Err(self.err(KEY_PREFIX_ONLY));
            } else if self.rec.flags.zoned {
                return Err(self.err(KEY_ONLY_ZONE));
            } else if !allow_empty {
                return Err(self.err(KEY_EMPTY));
            }
            self.rec.flags.empty = true;
            return Ok(false);
        }
        if self.seg.front.is_none() && self.seg.wildcards == total && total <= MAX_WILDCARDS {
            if !allow_all {
                return Err(self.err(KEY_ALL));
            }
            self.rec.flags.wildcard = true;
            self.rec.flags.all = true;
            return Ok(false);
        }
        if self.is_mac() {
            self.finish_mac_unsegmented(end)?;
            Ok(true)
        } else {
            self.finish_ip_unsegmented(end)
        }
    }

    fn finish_ip_unsegmented(&mut self, end: usize) -> Result<bool, AddressStringError> {
        let Some(ip) = self.opts.ip() else {
            return Err(self.err(KEY_TOO_FEW_DIGITS));
        };
        if !ip.allow_single_segment {
            return Err(self.err(KEY_SINGLE_SEGMENT));
        }
        if self.can_be_base85 && self.base85(end)? {
            return Ok(false);
        }
        if let Some(x) = self.extended_index {
            return Err(self.err_at(KEY_INVALID_CHAR, x));
        }
        let back: DigitRun = self.seg.run(end);
        let front: Option<Front> = self.seg.front;

        let v6_len = |run: &DigitRun| -> bool {
            run.len() == IPV6_SINGLE_DIGITS
                || (ip.ipv6.format.allow_binary
                    && run.len() == IPV6_SINGLE_BINARY_CHARS
                    && self.bytes[run.value_start..].starts_with(b"0b"))
        };
        let is_ipv6: bool = ip.allow_ipv6
            && match front {
                None => v6_len(&back),
                Some(f) if back.is_empty() => v6_len(&f.run),
                Some(f) if v6_len(&back) => {
                    if !f.run.is_empty() && !v6_len(&f.run) {
                        return Err(self.err(KEY_FRONT_DIGIT_COUNT));
                    }
                    true
                }
                Some(_) => false,
            };
        if is_ipv6 {
            self.set_version(IpVersion::V6, end);
            self.rec.flags.single_segment = true;
            self.single_ipv6(front, &back)?;
            return Ok(false);
        }

        let v4_len = |run: &DigitRun| -> bool {
            run.len() - run.leading_zeros() <= IPV4_SINGLE_MAX_DIGITS
                || (ip.ipv4.format.allow_binary
                    && run.len() == IPV4_SINGLE_BINARY_CHARS
                    && self.bytes[run.value_start..].starts_with(b"0b"))
        };
        let is_ipv4: bool = ip.allow_ipv4
            && match front {
                None => v4_len(&back),
                Some(f) if back.is_empty() => v4_len(&f.run),
                Some(f) => v4_len(&back) && (f.run.is_empty() || v4_len(&f.run)),
            };
        if !is_ipv4 {
            return Err(self.err(KEY_TOO_FEW_DIGITS));
        }
        self.set_version(IpVersion::V4, end);
        self.rec.flags.single_segment = true;
        self.end_segment(end)?;
        Ok(true)
    }

    /// Value of one bound of a single-segment IPv6 address.
    fn single_ipv6_value(&self, run: &DigitRun) -> Result<(u128, u32), AddressStringError> {
        let digits: &[u8] = &self.bytes[run.value_start..run.end - run.single_wildcards];
        let (value, radix) = if run.len() == IPV6_SINGLE_BINARY_CHARS && digits.starts_with(b"0b") {
            (parse_digits(&digits[2..], 2), 2)
        } else {
            (parse_digits(digits, 16), 16)
        };
        let value: u128 = value.map_err(|k| self.err(k))?;
        Ok((value, radix))
    }

    fn single_ipv6(&mut self, front: Option<Front>, back: &DigitRun) -> Result<(), AddressStringError> {
        let start: usize = self.seg.start;
        let range = self.opts.ip().map(|o| o.ipv6.format.range).unwrap_or_default();
        let mut flags = SegmentFlags::default();
        if back.single_wildcards > 0 || front.map_or(false, |f| f.run.single_wildcards > 0) {
            return Err(self.err_at(KEY_INVALID_CHAR_COMBO, back.end - back.single_wildcards));
        }

        let (mut lower, mut upper, lower_radix, upper_radix) = match front {
            None => {
                let (v, radix) = self.single_ipv6_value(back)?;
                flags.standard_str = radix == 16 && back.leading_zeros() == 0 && !back.digits.uppercase;
                (v, v, radix, radix)
            }
            Some(f) => {
                if !range.allow_range_separator {
                    return Err(self.err(KEY_NO_RANGE));
                }
                flags.range_wildcard = true;
                let (lo, lr) = if f.run.is_empty() {
                    if !range.allow_inferred_boundary {
                        return Err(self.err_at(KEY_EMPTY_SEGMENT, start));
                    }
                    flags.inferred_lower = true;
                    (0, 16)
                } else {
                    self.single_ipv6_value(&f.run)?
                };
                let (hi, hr) = if back.is_empty() {
                    if !range.allow_inferred_boundary {
                        return Err(self.err_at(KEY_EMPTY_SEGMENT, back.start));
                    }
                    flags.inferred_upper = true;
                    (u128::MAX, 16)
                } else {
                    self.single_ipv6_value(back)?
                };
                (lo, hi, lr, hr)
            }
        };
        let mut seg = SegmentRecord {
            radix: lower_radix,
            upper_radix,
            start,
            lower_start: front.map_or(back.start, |f| f.run.start),
            lower_end: front.map_or(back.end, |f| f.index),
            upper_start: back.start,
            upper_end: back.end,
            flags,
            ..Default::default()
        };
        if lower > upper {
            if !range.allow_reverse_range {
                return Err(self.err(KEY_INVALID_RANGE));
            }
            std::mem::swap(&mut lower, &mut upper);
            std::mem::swap(&mut seg.radix, &mut seg.upper_radix);
            std::mem::swap(&mut seg.lower_start, &mut seg.upper_start);
            std::mem::swap(&mut seg.lower_end, &mut seg.upper_end);
        }
        if lower_radix == 2 || upper_radix == 2 {
            self.rec.flags.binary_digits = true;
        }
        seg.lower = lower as u64;
        seg.extended_lower = (lower >> 64) as u64;
        seg.upper = upper as u64;
        seg.extended_upper = (upper >> 64) as u64;
        trace!(lower = %lower, upper = %upper, "single segment IPv6 committed");
        self.rec.push(seg);
        Ok(())
    }

    /// Try the input as a 20-character base-85 address, or a `~~` range of two.
    fn base85(&mut self, end: usize) -> Result<bool, AddressStringError> {
        let start: usize = self.rec.start;
        let total: usize = end - start;
        let sep: Option<usize> = self.extended_range_index.map(|r| r - start);
        let gap: usize = BASE85_RANGE.len();
        let max: u128 = u128::MAX;

        let (mut lower, mut upper, inferred_lower, inferred_upper, is_range) = match (total, sep) {
            (BASE85_DIGITS, _) => {
                let v: u128 = parse_base85(self.input, start)?;
                (v, v, false, false, false)
            }
            (t, Some(BASE85_DIGITS)) if t == 2 * BASE85_DIGITS + gap => {
                let lo: u128 = parse_base85(self.input, start)?;
                let hi: u128 = parse_base85(self.input, start + BASE85_DIGITS + gap)?;
                (lo, hi, false, false, true)
            }
            (t, Some(0)) if t == BASE85_DIGITS + gap => (0, parse_base85(self.input, start + gap)?, true, false, true),
            (t, Some(BASE85_DIGITS)) if t == BASE85_DIGITS + gap => (parse_base85(self.input, start)?, max, false, true, true),
            _ => return Ok(false),
        };

        let range = self.opts.ip().map(|o| o.ipv6.format.range).unwrap_or_default();
        if is_range {
            if !range.allow_range_separator {
                return Err(self.err(KEY_NO_RANGE));
            }
            if (inferred_lower || inferred_upper) && !range.allow_inferred_boundary {
                return Err(self.err_at(KEY_EMPTY_SEGMENT, start));
            }
        }
        if lower > upper {
            if !range.allow_reverse_range {
                return Err(self.err(KEY_INVALID_RANGE));
            }
            std::mem::swap(&mut lower, &mut upper);
        }
        self.set_version(IpVersion::V6, end);
        self.rec.flags.base85 = true;
        self.rec.flags.single_segment = true;
        self.rec.push(SegmentRecord {
            lower: lower as u64,
            upper: upper as u64,
            extended_lower: (lower >> 64) as u64,
            extended_upper: (upper >> 64) as u64,
            radix: 85,
            upper_radix: 85,
            start,
            lower_start: start,
            lower_end: if is_range { start + sep.unwrap_or(0) } else { end },
            upper_start: if is_range { start + sep.unwrap_or(0) + gap } else { start },
            upper_end: end,
            flags: SegmentFlags { range_wildcard: is_range, inferred_lower, inferred_upper, ..Default::default() },
            ..Default::default()
        });
        Ok(true)
    }

    fn finish_mac_unsegmented(&mut self, end: usize) -> Result<(), AddressStringError> {
        let mac: MacOptions = self.opts.mac().copied().unwrap_or_default();
        let back: DigitRun = self.seg.run(end);
        let back_wild: bool = self.seg.wildcards > 0;
        let back_len: usize = back.len();

        if let Some(front) = self.seg.front.filter(|_| !self.first_segment_dashed_range) {
            let front_wild: bool = front.wildcards > 0;
            let front_len: usize = front.run.len();
            let double: bool = ((back_len == MAC_DOUBLE_DIGITS || back_len == MAC_EXTENDED_DOUBLE_DIGITS)
                && (front_len == MAC_DOUBLE_DIGITS || front_wild))
                || (front_len == MAC_DOUBLE_DIGITS && back_wild)
                || (front_wild && back_wild);
            if double {
                if mac.address_size == MacSize::Eui64 && back_len == MAC_DOUBLE_DIGITS {
                    return Err(self.err(KEY_TOO_FEW_SEGMENTS));
                } else if mac.address_size == MacSize::Mac48 && back_len == MAC_EXTENDED_DOUBLE_DIGITS {
                    return Err(self.err(KEY_TOO_MANY_SEGMENTS));
                }
                if !mac.allow_single_dashed {
                    return Err(self.err(KEY_MAC_FORMAT));
                }
                self.rec.flags.double_segment = true;
                self.rec.flags.extended_mac = back_len == MAC_EXTENDED_DOUBLE_DIGITS;
                self.rec.mac_format = Some(MacFormat::Dashed);
                self.commit_front_alone(front)?;
                return self.end_segment(end);
            }
            if front_wild || back_wild {
                // `x-*` or `*-x`, the wildcard standing for the missing segments
                if !mac.allow_single_dashed {
                    return Err(self.err(KEY_MAC_FORMAT));
                }
                self.rec.mac_format = Some(MacFormat::Dashed);
                self.commit_front_alone(front)?;
                return self.end_segment(end);
            }
        }

        if !mac.allow_single_segment {
            return Err(self.err(KEY_SINGLE_SEGMENT));
        }
        let is12: bool = back_len == MAC_SINGLE_DIGITS;
        let is16: bool = back_len == MAC_EXTENDED_SINGLE_DIGITS;
        let mut front16: bool = false;
        if let Some(front) = self.seg.front {
            let f_len: usize = front.run.len();
            let f12: bool = f_len == MAC_SINGLE_DIGITS;
            front16 = f_len == MAC_EXTENDED_SINGLE_DIGITS;
            let f_none: bool = front.run.is_empty();
            let ok: bool = if is12 {
                f12 || f_none
            } else if is16 {
                front16 || f_none
            } else {
                back.is_empty() && (f12 || front16)
            };
            if !ok {
                return Err(self.err(KEY_FRONT_DIGIT_COUNT));
            }
        } else if !(is12 || is16) {
            return Err(self.err(KEY_TOO_FEW_DIGITS));
        }
        self.rec.flags.single_segment = true;
        self.rec.flags.extended_mac = is16 || front16;
        self.end_segment(end)
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(s: &str) -> Result<ParseRecord, AddressStringError> {
        Scanner::ip(s, &ParseOptions::default()).run()
    }

    fn values(rec: &ParseRecord) -> Vec<(u64, u64)> {
        rec.segments().iter().map(|s| (s.lower, s.upper)).collect()
    }

    const V4_MAX: &str = "255.255.255.255";
    const V4_WILDCARD: &str = "1.2.*.4";
    const V6_COMPRESSED: &str = "1::2";
    const V6_MIXED: &str = "::ffff:1.2.3.4";

    #[test]
    fn test_ipv4_basic() {
        let rec = scan(V4_MAX).unwrap();
        assert_eq!(rec.version(), IpVersion::V4);
        assert_eq!(values(&rec), vec![(255, 255); 4]);
        assert!(rec.segments().iter().all(|s| s.flags.standard_str));
    }

    #[test]
    fn test_ipv4_wildcard() {
        let rec = scan(V4_WILDCARD).unwrap();
        assert_eq!(rec.segment_count(), 4);
        let seg = rec.segment(2).unwrap();
        assert_eq!((seg.lower, seg.upper), (0, 255));
        assert!(seg.flags.wildcard);
        assert!(rec.flags().wildcard);
    }

    #[test]
    fn test_ipv4_range_reversal() {
        let fwd = scan("1.2-5.3.4").unwrap();
        let rev = scan("1.5-2.3.4").unwrap();
        assert_eq!(fwd.segment(1).unwrap().lower, rev.segment(1).unwrap().lower);
        assert_eq!(fwd.segment(1).unwrap().upper, rev.segment(1).unwrap().upper);
        // offsets follow the swapped values
        assert_eq!(rev.segment(1).unwrap().lower_start, 4);
        assert_eq!(rev.segment(1).unwrap().upper_start, 2);
        let opts = ParseOptions::default().with_ranges(crate::parse::RangeOptions {
            allow_reverse_range: false,
            ..Default::default()
        });
        let err = Scanner::ip("1.5-2.3.4", &opts).run().unwrap_err();
        assert_eq!(err.key(), KEY_INVALID_RANGE);
    }

    #[test]
    fn test_ipv4_inferred_range() {
        let rec = scan("1.2.3.-5").unwrap();
        assert_eq!(values(&rec)[3], (0, 5));
        let rec = scan("1.2.3.7-").unwrap();
        assert_eq!(values(&rec)[3], (7, 255));
        assert!(rec.segment(3).unwrap().flags.inferred_upper);
    }

    #[test]
    fn test_ipv4_errors() {
        assert_eq!(scan("1.2.3.4.5").unwrap_err().key(), KEY_IPV4_TOO_MANY);
        let err = scan("1..2.3").unwrap_err();
        assert_eq!(err.key(), KEY_EMPTY_SEGMENT);
        assert_eq!(err.index(), Some(2));
        assert_eq!(scan("1.2.3.256").unwrap_err().key(), KEY_IPV4_TOO_LARGE);
        assert_eq!(scan("1.2.3.4:").unwrap_err().key(), KEY_IPV6_SEPARATOR);
        assert_eq!(scan("1.2.3.4g").unwrap_err().index(), Some(7));
    }

    #[test]
    fn test_ipv4_inet_aton() {
        let rec = scan("0xa.010.0b11.4").unwrap();
        assert_eq!(values(&rec), vec![(10, 10), (8, 8), (3, 3), (4, 4)]);
        assert!(rec.flags().inet_aton_value);
        assert!(rec.flags().binary_digits);
        let rec = scan("1.2.768").unwrap();
        assert!(rec.flags().inet_aton_joined);
        assert_eq!(values(&rec)[2], (768, 768));
        let err = Scanner::ip("1.2.3", &ParseOptions::strict()).run().unwrap_err();
        assert_eq!(err.key(), KEY_IPV4_TOO_FEW);
    }

    #[test]
    fn test_ipv6_compression() {
        let rec = scan("::").unwrap();
        assert_eq!(rec.compressed_index(), Some(0));
        assert_eq!(rec.segment_count(), 1);
        let rec = scan(V6_COMPRESSED).unwrap();
        assert_eq!(rec.compressed_index(), Some(1));
        assert_eq!(values(&rec), vec![(1, 1), (0, 0), (2, 2)]);
        let rec = scan("1::").unwrap();
        assert_eq!(rec.compressed_index(), Some(1));
    }

    #[test]
    fn test_ipv6_errors() {
        assert_eq!(scan("1:2:3:4:5:6:7:8:9").unwrap_err().key(), KEY_TOO_MANY_SEGMENTS);
        let err = scan("fffff::1").unwrap_err();
        assert_eq!(err.key(), KEY_SEGMENT_TOO_LONG_AT);
        assert_eq!(err.index(), Some(0));
        assert_eq!(scan("1::2::3").unwrap_err().key(), KEY_IPV6_AMBIGUOUS);
        assert_eq!(scan(":1::2").unwrap_err().key(), KEY_IPV6_START_SEPARATOR);
        assert_eq!(scan("1:2:3").unwrap_err().key(), KEY_TOO_FEW_SEGMENTS);
        assert_eq!(scan("1:2:3:4:5:6:7:").unwrap_err().key(), KEY_END_SEPARATOR);
    }

    #[test]
    fn test_ipv6_compressed_too_many_segments() {
        const OVERCOUNT: [&str; 5] =
            ["1:2:3:4:5:6:7::8", "::1:2:3:4:5:6:7:8", "1:2:3:4:5:6::7:8", "1:2:3:4:5:6::1.2.3.4", "1:2:3:4:5:6:7:8::"];
        for s in OVERCOUNT {
            assert_eq!(scan(s).unwrap_err().key(), KEY_TOO_MANY_SEGMENTS, "{s}");
        }
        assert_eq!(scan("::1:2:3:4:5:6:7").unwrap().total_segment_count(), 8);
        assert_eq!(scan("1:2:3:4:5::1.2.3.4").unwrap().total_segment_count(), 8);
    }

    #[test]
    fn test_ipv4_zone_rejected() {
        let err = scan("1.2.3.4%eth0").unwrap_err();
        assert_eq!(err.key(), KEY_ONLY_IPV6_ZONE);
        assert_eq!(err.index(), Some(7));
        // SQL style wildcard still applies to an IPv4 segment
        assert!(scan("1.2.3.%").is_ok());
    }

    #[test]
    fn test_ipv6_mixed() {
        let rec = scan(V6_MIXED).unwrap();
        let mixed = rec.mixed().unwrap();
        assert_eq!(mixed.version(), IpVersion::V4);
        assert_eq!(values(mixed), vec![(1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(rec.total_segment_count(), 4);
        let err = scan("1:2:3:4:5:6:7:1.2.3.4").unwrap_err();
        assert_eq!(err.key(), KEY_TOO_MANY_SEGMENTS);
        let err = scan("::1.2.3.256").unwrap_err();
        assert_eq!(err.key(), KEY_IPV4_TOO_LARGE);
        assert_eq!(err.inner().map(|e| e.key()), Some(KEY_IPV4_TOO_LARGE));
    }

    #[test]
    fn test_ipv6_zone_and_prefix() {
        let rec = scan("fe80::1%eth0/64").unwrap();
        assert_eq!(rec.zone(), Some("eth0"));
        assert_eq!(rec.prefix_len(), Some(64));
        assert_eq!(rec.body(), 0..7);
    }

    #[test]
    fn test_single_segments() {
        let rec = scan("3232235777").unwrap();
        assert_eq!(rec.version(), IpVersion::V4);
        assert!(rec.flags().single_segment);
        assert_eq!(values(&rec), vec![(3232235777, 3232235777)]);
        let rec = scan("0123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(rec.version(), IpVersion::V6);
        assert_eq!(rec.segment(0).unwrap().lower_value(), 0x0123456789abcdef0123456789abcdef);
        assert_eq!(scan("123456789012345").unwrap_err().key(), KEY_TOO_FEW_DIGITS);
    }

    #[test]
    fn test_empty_and_all() {
        assert!(scan("").unwrap().is_empty());
        assert!(scan("*").unwrap().is_all());
        assert_eq!(scan("/64").unwrap_err().key(), KEY_PREFIX_ONLY);
        let strict = ParseOptions::strict();
        assert_eq!(Scanner::ip("", &strict).run().unwrap_err().key(), KEY_EMPTY);
        assert_eq!(Scanner::ip("*", &strict).run().unwrap_err().key(), KEY_ALL);
    }

    #[test]
    fn test_base85() {
        const B85: &str = "4)+k&C#VzJ4br>0wv%Yp";
        let rec = scan(B85).unwrap();
        assert!(rec.is_base85());
        assert_eq!(rec.segment(0).unwrap().lower_value(), 0x1080_0000_0000_0000_0008_0800_200c_417a);
        let range = format!("{B85}~~{B85}");
        let rec = scan(&range).unwrap();
        assert!(rec.segment(0).unwrap().flags.range_wildcard);
        let rec = scan(&format!("~~{B85}")).unwrap();
        assert_eq!(rec.segment(0).unwrap().lower_value(), 0);
        assert!(rec.segment(0).unwrap().flags.inferred_lower);
    }

    #[test]
    fn test_idempotence() {
        const ADDR: &str = "1-2.3.*.0x4/24";
        assert_eq!(scan(ADDR).unwrap(), scan(ADDR).unwrap());
    }

    #[test]
    fn test_mac_formats() {
        let opts = MacOptions::default();
        let rec = Scanner::mac("aa:bb:cc:dd:ee:ff", &opts).run().unwrap();
        assert_eq!(rec.mac_format(), Some(MacFormat::Colon));
        assert_eq!(values(&rec)[0], (0xaa, 0xaa));
        let rec = Scanner::mac("aa-bb-cc-dd-ee-ff", &opts).run().unwrap();
        assert_eq!(rec.mac_format(), Some(MacFormat::Dashed));
        assert_eq!(rec.segment_count(), 6);
        let rec = Scanner::mac("aabb.ccdd.eeff", &opts).run().unwrap();
        assert_eq!(values(&rec)[2], (0xeeff, 0xeeff));
        let rec = Scanner::mac("aa bb cc dd ee ff 01 02", &opts).run().unwrap();
        assert!(rec.flags().extended_mac);
        let rec = Scanner::mac("aabbcc-ddeeff", &opts).run().unwrap();
        assert!(rec.flags().double_segment);
        assert_eq!(values(&rec), vec![(0xaabbcc, 0xaabbcc), (0xddeeff, 0xddeeff)]);
        let rec = Scanner::mac("aabbccddeeff", &opts).run().unwrap();
        assert!(rec.flags().single_segment);
        assert_eq!(values(&rec), vec![(0xaabbccddeeff, 0xaabbccddeeff)]);
    }

    #[test]
    fn test_mac_ranges_and_errors() {
        let opts = MacOptions::default();
        let rec = Scanner::mac("aa:bb:cc:dd:ee:0-f", &opts).run().unwrap();
        assert_eq!(values(&rec)[5], (0, 0xf));
        let rec = Scanner::mac("aa-bb-cc-dd-ee-0|f", &opts).run().unwrap();
        assert_eq!(values(&rec)[5], (0, 0xf));
        assert!(rec.segment(5).unwrap().flags.standard_range_str);
        let rec = Scanner::mac("0-f:bb:cc:dd:ee:ff", &opts).run().unwrap();
        assert_eq!(values(&rec)[0], (0, 0xf));
        assert!(rec.segment(0).unwrap().flags.standard_range_str);
        let err = Scanner::mac("aa:bb:cc-dd-ee:ff", &opts).run().unwrap_err();
        assert_eq!(err.key(), KEY_INVALID_CHAR_COMBO);
        assert_eq!(err.index(), Some(11));
        let err = Scanner::mac("aa:bb:cc:dd:ee:ff:00:11:22", &opts).run().unwrap_err();
        assert_eq!(err.key(), KEY_TOO_MANY_SEGMENTS);
        let err = Scanner::mac("aa:bb:cc", &opts).run().unwrap_err();
        assert_eq!(err.key(), KEY_TOO_FEW_SEGMENTS);
        let strict = MacOptions { allow_short_segments: false, ..Default::default() };
        let err = Scanner::mac("a:bb:cc:dd:ee:ff", &strict).run().unwrap_err();
        assert_eq!(err.key(), KEY_SEGMENT_TOO_SHORT_AT);
        assert_eq!(err.index(), Some(0));
    }
}
