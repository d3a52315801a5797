// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Everything after the address body: `%zone`, `/prefix`, `/mask`, and for
//! host strings `:port` or `:service`.

use super::{
    options::ParseOptions,
    record::{IpVersion, ParseRecord},
    scanner::Scanner,
    strings::*,
    AddressStringError, IPV4_BITS, IPV6_BITS,
};
use tracing::{debug, trace};

/// Longest service name accepted after a host.
const MAX_SERVICE_LEN: usize = 15;
const MAX_PORT_DIGITS: usize = 5;
/// `%25` is the URI form of the zone separator
const ENCODED_ZONE_SEPARATOR: &[u8] = b"25";

/// Zone characters that need no percent encoding.
fn is_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'.' | b'_' | b'~')
}

fn hex_value(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

pub(crate) struct QualifierParser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    opts: &'a ParseOptions,
    /// zone is percent encoded, as inside a bracketed URI host
    encoded_zone: bool,
}

impl<'a> QualifierParser<'a> {
    pub(crate) fn new(input: &'a str, opts: &'a ParseOptions) -> Self {
        QualifierParser { input, bytes: input.as_bytes(), opts, encoded_zone: false }
    }

    pub(crate) fn encoded(mut self) -> Self {
        self.encoded_zone = true;
        self
    }

    fn err(&self, key: &'static str) -> AddressStringError {
        AddressStringError::new(self.input, key)
    }

    fn err_at(&self, key: &'static str, index: usize) -> AddressStringError {
        AddressStringError::at(self.input, key, index)
    }

    /// Parse the qualifier following the record's body, if any.
    pub(crate) fn parse(&self, rec: &mut ParseRecord) -> Result<(), AddressStringError> {
        let Some(start) = rec.qualifier_index else {
            return Ok(());
        };
        let end: usize = self.input.len();
        if !rec.flags.zoned {
            return self.prefix_or_mask(rec, start, end);
        }
        if rec.version.is_ipv4() {
            return Err(self.err(KEY_ONLY_IPV6_ZONE));
        }
        let zone_end: usize = self.bytes[start..end].iter().position(|c| *c == b'/').map_or(end, |p| start + p);
        let zone: String = self.zone(start, zone_end)?;
        trace!(zone = %zone, "zone parsed");
        rec.qualifier.zone = Some(zone);
        if zone_end < end {
            rec.flags.prefix_separator = true;
            self.prefix_or_mask(rec, zone_end + 1, end)?;
        }
        Ok(())
    }

    fn zone(&self, start: usize, end: usize) -> Result<String, AddressStringError> {
        if self.encoded_zone {
            return self.decode_zone(start, end);
        }
        if start == end {
            if !self.opts.ipv6.allow_empty_zone {
                return Err(self.err_at(KEY_INVALID_ZONE, start));
            }
            return Ok(String::new());
        }
        if let Some(p) = self.bytes[start..end].iter().position(|c| *c == b':') {
            return Err(self.err_at(KEY_INVALID_ZONE, start + p));
        }
        Ok(self.input[start..end].to_string())
    }

    /// Percent decoded zone; only unreserved characters may appear unencoded.
    fn decode_zone(&self, start: usize, end: usize) -> Result<String, AddressStringError> {
        let mut i: usize = start;
        if self.bytes[start..end].starts_with(ENCODED_ZONE_SEPARATOR) {
            i += ENCODED_ZONE_SEPARATOR.len();
        }
        if i == end && !self.opts.ipv6.allow_empty_zone {
            return Err(self.err_at(KEY_INVALID_ZONE, i));
        }
        let mut out: Vec<u8> = Vec::with_capacity(end - i);
        while i < end {
            let c: u8 = self.bytes[i];
            if c == b'%' {
                if i + 2 >= end {
                    return Err(self.err_at(KEY_INVALID_ZONE_ENCODING, i));
                }
                let (Some(hi), Some(lo)) = (hex_value(self.bytes[i + 1]), hex_value(self.bytes[i + 2])) else {
                    return Err(self.err_at(KEY_INVALID_ZONE_ENCODING, i));
                };
                out.push(hi << 4 | lo);
                i += 3;
            } else if is_unreserved(c) {
                out.push(c);
                i += 1;
            } else {
                return Err(self.err_at(KEY_INVALID_ZONE, i));
            }
        }
        String::from_utf8(out).map_err(|_| self.err_at(KEY_INVALID_ZONE_ENCODING, start))
    }

    fn prefix_or_mask(&self, rec: &mut ParseRecord, start: usize, end: usize) -> Result<(), AddressStringError> {
        let text: &[u8] = &self.bytes[start..end];
        if text.is_empty() {
            return Err(self.err(KEY_MASK_EMPTY));
        }
        if !text.iter().all(u8::is_ascii_digit) {
            return self.mask(rec, start, end);
        }
        let value: Option<u32> = std::str::from_utf8(text).ok().and_then(|s| s.parse::<u32>().ok());
        let single_mask: bool = rec.version.is_ipv4() && self.opts.ipv4.allow_single_segment_mask;
        if single_mask && value.map_or(true, |v| v > IPV4_BITS) {
            return self.mask(rec, start, end);
        }
        self.prefix(rec, start, end, value)
    }

    fn prefix(&self, rec: &mut ParseRecord, start: usize, end: usize, value: Option<u32>) -> Result<(), AddressStringError> {
        if !self.opts.allow_prefix {
            return Err(self.err(KEY_CIDR_NOT_ALLOWED));
        }
        if end - start > 1 && self.bytes[start] == b'0' && !self.opts.allow_prefix_len_leading_zeros {
            let key: &'static str = if rec.version.is_ipv4() { KEY_IPV4_PREFIX_ZEROS } else { KEY_IPV6_PREFIX_ZEROS };
            return Err(self.err(key));
        }
        let bits: u32 = match rec.version {
            IpVersion::V4 => IPV4_BITS,
            _ => IPV6_BITS,
        };
        let prefix: u32 = match value {
            Some(v) if v <= bits => v,
            _ if self.opts.allow_prefixes_beyond_address_size => bits,
            _ => return Err(self.err(KEY_PREFIX_SIZE)),
        };
        trace!(prefix, "prefix length parsed");
        rec.qualifier.prefix_len = Some(prefix);
        Ok(())
    }

    fn mask(&self, rec: &mut ParseRecord, start: usize, end: usize) -> Result<(), AddressStringError> {
        if !self.opts.allow_mask {
            let key: &'static str = if self.opts.allow_prefix { KEY_INVALID_PREFIX } else { KEY_CIDR_NOT_ALLOWED };
            return Err(self.err(key));
        }
        if rec.flags.empty {
            return Err(self.err(KEY_MASK_ADDRESS_EMPTY));
        }
        debug!("mask at index {start}: '{}'", self.input);
        let mask_opts: ParseOptions = self.opts.for_mask();
        let mask: ParseRecord = Scanner::ip_within(self.input, start, end, &mask_opts, false)
            .scan_only()
            .map_err(|e| {
                let key: &'static str = if e.key() == KEY_NO_WILDCARD || e.key() == KEY_ALL {
                    KEY_MASK_WILDCARD
                } else {
                    KEY_INVALID_PREFIX_OR_MASK
                };
                AddressStringError::wrap(self.input, key, e)
            })?;
        if mask.end != end {
            return Err(self.err_at(KEY_MASK_EXTRA_CHARS, mask.end));
        }
        if mask.version.is_ipv4() && mask.flags.single_segment && !self.opts.ipv4.allow_single_segment_mask {
            return Err(self.err(KEY_MASK_SINGLE_SEGMENT));
        }
        if rec.version != IpVersion::Indeterminate && mask.version != rec.version {
            return Err(self.err(KEY_IP_MISMATCH));
        }
        rec.qualifier.mask = Some(Box::new(mask));
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */

/// Port number or service name following a host, `input[start..end]`.
pub(crate) fn parse_port_or_service(
    input: &str,
    start: usize,
    end: usize,
    opts: &ParseOptions,
) -> Result<(Option<u16>, Option<String>), AddressStringError> {
    let text: &[u8] = &input.as_bytes()[start..end];
    let err = |key: &'static str| AddressStringError::new(input, key);
    if text.is_empty() {
        return Err(err(if opts.allow_port { KEY_PORT_NO_DIGITS } else { KEY_SERVICE_NO_CHARS }));
    }

    if text.iter().all(u8::is_ascii_digit) {
        if !opts.allow_port {
            return Err(err(KEY_PORT));
        }
        if text.len() > MAX_PORT_DIGITS {
            return Err(err(KEY_PORT_TOO_LARGE));
        }
        let port: u32 = text.iter().fold(0, |acc, c| acc * 10 + (c - b'0') as u32);
        let port: u16 = u16::try_from(port).map_err(|_| err(KEY_PORT_TOO_LARGE))?;
        return Ok((Some(port), None));
    }

    if !opts.allow_service {
        return Err(err(if opts.allow_port { KEY_PORT_SERVICE } else { KEY_SERVICE }));
    }
    if text.len() > MAX_SERVICE_LEN {
        return Err(err(KEY_SERVICE_TOO_LONG));
    }
    let mut has_letter: bool = false;
    for (i, &c) in text.iter().enumerate() {
        match c {
            b'-' if i == 0 => return Err(err(KEY_SERVICE_HYPHEN_START)),
            b'-' if text[i - 1] == b'-' => return Err(err(KEY_SERVICE_HYPHEN_DOUBLE)),
            b'-' if i == text.len() - 1 => return Err(err(KEY_SERVICE_HYPHEN_END)),
            b'-' | b'0'..=b'9' => {}
            c if c.is_ascii_alphabetic() => has_letter = true,
            _ => return Err(AddressStringError::at(input, KEY_PORT_SERVICE, start + i)),
        }
    }
    if !has_letter {
        return Err(err(KEY_SERVICE_NO_LETTER));
    }
    Ok((None, Some(input[start..end].to_string())))
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str, opts: &ParseOptions) -> Result<ParseRecord, AddressStringError> {
        Scanner::ip(s, opts).run()
    }

    #[test]
    fn test_prefix() {
        let opts = ParseOptions::default();
        assert_eq!(parse("1.2.3.4/24", &opts).unwrap().prefix_len(), Some(24));
        assert_eq!(parse("1::/64", &opts).unwrap().prefix_len(), Some(64));
        assert_eq!(parse("1.2.3.4/33", &opts).unwrap_err().key(), KEY_PREFIX_SIZE);
        assert_eq!(parse("1.2.3.4/", &opts).unwrap_err().key(), KEY_MASK_EMPTY);
        let beyond = ParseOptions { allow_prefixes_beyond_address_size: true, ..Default::default() };
        assert_eq!(parse("1.2.3.4/40", &beyond).unwrap().prefix_len(), Some(32));
        let no_zeros = ParseOptions { allow_prefix_len_leading_zeros: false, ..Default::default() };
        assert_eq!(parse("1.2.3.4/024", &no_zeros).unwrap_err().key(), KEY_IPV4_PREFIX_ZEROS);
        let no_prefix = ParseOptions { allow_prefix: false, ..Default::default() };
        assert_eq!(parse("1.2.3.4/24", &no_prefix).unwrap_err().key(), KEY_CIDR_NOT_ALLOWED);
    }

    #[test]
    fn test_mask() {
        let opts = ParseOptions::default();
        let rec = parse("1.2.3.4/255.255.0.0", &opts).unwrap();
        let mask = rec.qualifier().mask.as_deref().unwrap();
        assert_eq!(mask.segment(1).unwrap().lower, 255);
        assert_eq!(mask.segment(2).unwrap().lower, 0);
        assert_eq!(parse("1.2.3.4/ffff::", &opts).unwrap_err().key(), KEY_IP_MISMATCH);
        let err = parse("1.2.3.4/255.*.0.0", &opts).unwrap_err();
        assert_eq!(err.key(), KEY_MASK_WILDCARD);
        assert_eq!(err.root().key(), KEY_NO_WILDCARD);
        let err = parse("1.2.3.4/255.0.0.0/8", &opts).unwrap_err();
        assert_eq!(err.key(), KEY_MASK_EXTRA_CHARS);
        assert_eq!(err.index(), Some(17));
    }

    #[test]
    fn test_single_segment_mask() {
        let opts = ParseOptions {
            ipv4: crate::parse::Ipv4Options { allow_single_segment_mask: true, ..Default::default() },
            ..Default::default()
        };
        let rec = parse("1.2.3.4/4294901760", &opts).unwrap();
        assert_eq!(rec.qualifier().mask.as_deref().unwrap().segment(0).unwrap().lower, 0xffff_0000);
        assert_eq!(parse("1.2.3.4/16", &opts).unwrap().prefix_len(), Some(16));
    }

    #[test]
    fn test_zone() {
        let opts = ParseOptions::default();
        assert_eq!(parse("fe80::1%eth0", &opts).unwrap().zone(), Some("eth0"));
        assert_eq!(parse("fe80::1%", &opts).unwrap().zone(), Some(""));
        let err = parse("fe80::1%eth:0", &opts).unwrap_err();
        assert_eq!(err.key(), KEY_INVALID_ZONE);
        assert_eq!(err.index(), Some(11));
        let no_empty = ParseOptions {
            ipv6: crate::parse::Ipv6Options { allow_empty_zone: false, ..Default::default() },
            ..Default::default()
        };
        assert_eq!(parse("fe80::1%", &no_empty).unwrap_err().key(), KEY_INVALID_ZONE);
    }

    #[test]
    fn test_encoded_zone() {
        const HOST: &str = "fe80::1%25eth%2d0";
        let opts = ParseOptions::default();
        let mut rec = Scanner::ip(HOST, &opts).scan_only().unwrap();
        QualifierParser::new(HOST, &opts).encoded().parse(&mut rec).unwrap();
        assert_eq!(rec.zone(), Some("eth-0"));
        const BAD: &str = "fe80::1%25eth%2";
        let mut rec = Scanner::ip(BAD, &opts).scan_only().unwrap();
        let err = QualifierParser::new(BAD, &opts).encoded().parse(&mut rec).unwrap_err();
        assert_eq!(err.key(), KEY_INVALID_ZONE_ENCODING);
        assert_eq!(err.index(), Some(13));
    }

    #[test]
    fn test_port_and_service() {
        const HOST: &str = "example.com:8080";
        let opts = ParseOptions::default().with_port(true, true);
        assert_eq!(parse_port_or_service(HOST, 12, HOST.len(), &opts).unwrap(), (Some(8080), None));
        const SVC: &str = "http-alt";
        assert_eq!(parse_port_or_service(SVC, 0, SVC.len(), &opts).unwrap(), (None, Some(SVC.to_string())));
        let err = |s: &str| parse_port_or_service(s, 0, s.len(), &opts).unwrap_err().key();
        assert_eq!(err("65536"), KEY_PORT_TOO_LARGE);
        assert_eq!(err("-http"), KEY_SERVICE_HYPHEN_START);
        assert_eq!(err("ht--tp"), KEY_SERVICE_HYPHEN_DOUBLE);
        assert_eq!(err("http-"), KEY_SERVICE_HYPHEN_END);
        assert_eq!(err("ht.tp"), KEY_PORT_SERVICE);
        let ports_only = ParseOptions::default().with_port(true, false);
        assert_eq!(parse_port_or_service("http", 0, 4, &ports_only).unwrap_err().key(), KEY_PORT_SERVICE);
    }
}
