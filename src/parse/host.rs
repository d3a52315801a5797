// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Host strings: an address in one of its host forms, or a DNS host name.

Resolution order for a host string:
1. `[addr]` bracketed IPv6 (optionally `[IPv6:addr]`), then `/prefix` or `:port`
2. UNC IPv6 literals (`*.ipv6-literal.net`) and reverse DNS names
   (`*.in-addr.arpa`, `*.ip6.arpa`, `*.ip6.int`)
3. a single `:port` or `:service` suffix is split off, when allowed
4. an address parse; if it fails and the text is address shaped (only
   digits and dots, or containing `:`, `*`, `%` or `/`) its error is final
5. a DNS host name
*/

use super::{
    qualifier::{parse_port_or_service, QualifierParser},
    record::ParseRecord,
    scanner::Scanner,
    strings::*,
    AddressStringError, ParseOptions, IPV4_SEGMENT_COUNT, IPV6_SEGMENT_COUNT,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

const MAX_HOST_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
const MAX_LABELS: usize = 127;
const UNC_SEGMENT_SEPARATOR: char = '-';
const UNC_ZONE_SEPARATOR: char = 's';
const UNC_RANGE_SEPARATOR: char = '\u{bb}';
/// nibble labels of a full `ip6.arpa` name
const IPV6_REVERSE_NIBBLES: usize = 32;

lazy_static! {
    static ref HOST_LABEL: Regex =
        Regex::new(r"^[A-Za-z0-9_](?:[A-Za-z0-9_-]*[A-Za-z0-9_])?$").expect("host label pattern");
}

/// How an address was written within a host string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostForm {
    Plain,
    /// `[addr]`
    Bracketed,
    /// `x-x-x-x-x-x-x-x.ipv6-literal.net`
    Unc,
    /// `d.c.b.a.in-addr.arpa` and the IPv6 nibble forms
    ReverseDns,
}

/// A validated DNS host name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostName {
    name: String,
    trailing_dot: bool,
}

impl HostName {
    /// The name as written, without a trailing dot.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }

    /// Written as a fully qualified name with a trailing dot.
    pub fn is_fully_qualified(&self) -> bool {
        self.trailing_dot
    }

    /// Lowercase form, host names being case insensitive.
    pub fn normalized(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

impl std::fmt::Display for HostName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// What a host string turned out to be.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Host {
    Address {
        record: ParseRecord,
        /// the text the record's offsets refer to, after any rewriting
        scanned: String,
        form: HostForm,
    },
    Name(HostName),
}

/// A parsed host string with its optional port or service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedHost {
    host: Host,
    port: Option<u16>,
    service: Option<String>,
}

impl ParsedHost {
    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn is_address(&self) -> bool {
        matches!(self.host, Host::Address { .. })
    }

    pub fn record(&self) -> Option<&ParseRecord> {
        match &self.host {
            Host::Address { record, .. } => Some(record),
            Host::Name(_) => None,
        }
    }

    pub fn into_record(self) -> Option<ParseRecord> {
        match self.host {
            Host::Address { record, .. } => Some(record),
            Host::Name(_) => None,
        }
    }

    pub fn name(&self) -> Option<&HostName> {
        match &self.host {
            Host::Name(n) => Some(n),
            Host::Address { .. } => None,
        }
    }

    fn address(mut record: ParseRecord, scanned: String, form: HostForm, port: Option<u16>, service: Option<String>) -> Self {
        record.qualifier.port = port;
        record.qualifier.service = service.clone();
        ParsedHost { host: Host::Address { record, scanned, form }, port, service }
    }
}

/* -------------------------------------------------------------------------- */

/**
Parse a host string: an address, an address in a host-only form, or a DNS
host name, each optionally followed by a port or service when `opts`
allows one.

```
use addrstr::{parse_host, ParseOptions};

let opts = ParseOptions::default().with_port(true, false);
let host = parse_host("[::1]:8080", &opts).unwrap();
assert!(host.is_address());
assert_eq!(host.port(), Some(8080));
let host = parse_host("example.com", &opts).unwrap();
assert_eq!(host.name().unwrap().as_str(), "example.com");
```
*/
pub fn parse_host(s: &str, opts: &ParseOptions) -> Result<ParsedHost, AddressStringError> {
    let res = parse_host_inner(s, opts);
    if let Err(e) = &res {
        debug!(key = e.key(), index = ?e.index(), "host parse failed: '{s}'");
    }
    res
}

fn parse_host_inner(s: &str, opts: &ParseOptions) -> Result<ParsedHost, AddressStringError> {
    if s.is_empty() {
        return Err(AddressStringError::new(s, KEY_HOST_EMPTY));
    }
    if s.starts_with('[') {
        return bracketed(s, opts);
    }
    if let Some(host) = special_host(s, opts)? {
        return Ok(host);
    }

    let (body, port, service) = split_port(s, opts)?;
    match Scanner::ip(body, opts).run() {
        Ok(record) => Ok(ParsedHost::address(record, body.to_string(), HostForm::Plain, port, service)),
        Err(e) if is_address_shaped(body) => Err(e),
        Err(e) => {
            debug!(key = e.key(), "not an address, validating as host name: '{body}'");
            let name: HostName = validate_host_name(body)?;
            Ok(ParsedHost { host: Host::Name(name), port, service })
        }
    }
}

/// Split one trailing `:port` or `:service`, when allowed and unambiguous.
fn split_port<'s>(
    s: &'s str,
    opts: &ParseOptions,
) -> Result<(&'s str, Option<u16>, Option<String>), AddressStringError> {
    if !(opts.allow_port || opts.allow_service) || s.matches(':').count() != 1 {
        return Ok((s, None, None));
    }
    let Some(colon) = s.find(':') else {
        return Ok((s, None, None));
    };
    let (port, service) = parse_port_or_service(s, colon + 1, s.len(), opts)?;
    Ok((&s[..colon], port, service))
}

/// Would a failed address parse of `s` be better reported than a host name check.
fn is_address_shaped(s: &str) -> bool {
    s.bytes().all(|c| c.is_ascii_digit() || c == b'.') || s.bytes().any(|c| matches!(c, b':' | b'*' | b'%' | b'/'))
}

fn bracketed(s: &str, opts: &ParseOptions) -> Result<ParsedHost, AddressStringError> {
    let Some(close) = s.find(']') else {
        return Err(AddressStringError::new(s, KEY_HOST_BRACKET_END));
    };
    let mut start: usize = 1;
    if s[start..close].starts_with(|c: char| c.eq_ignore_ascii_case(&'v')) {
        return Err(AddressStringError::at(s, KEY_HOST_MECHANISM, start));
    }
    let smtp: usize = SMTP_IPV6_PREFIX.len();
    if close - start > smtp && s.get(start..start + smtp).is_some_and(|p| p.eq_ignore_ascii_case(SMTP_IPV6_PREFIX)) {
        start += smtp;
    }

    // a prefix follows the bracket, a port or service may follow either
    let rest: &str = &s[close + 1..];
    let (prefix, port_text): (&str, Option<usize>) = match rest.as_bytes().first() {
        None => ("", None),
        Some(b'/') => match rest.find(':') {
            Some(c) => (&rest[..c], Some(close + 1 + c)),
            None => (rest, None),
        },
        Some(b':') => ("", Some(close + 1)),
        Some(_) => return Err(AddressStringError::at(s, KEY_HOST_INVALID_CHAR, close + 1)),
    };
    let (port, service) = match port_text {
        Some(colon) => parse_port_or_service(s, colon + 1, s.len(), opts)?,
        None => (None, None),
    };

    let scanned: String = format!("{}{prefix}", &s[start..close]);
    debug!("bracketed host address: '{scanned}'");
    let wrap = |e: AddressStringError| AddressStringError::wrap(s, e.key(), e);
    let mut record: ParseRecord = Scanner::ip(&scanned, opts).scan_only().map_err(wrap)?;
    QualifierParser::new(&scanned, opts).encoded().parse(&mut record).map_err(wrap)?;
    if !record.version.is_ipv6() {
        return Err(AddressStringError::new(s, KEY_HOST_BRACKET_NOT_V6));
    }
    Ok(ParsedHost::address(record, scanned, HostForm::Bracketed, port, service))
}

/* -------------------------------------------------------------------------- */

/// Case insensitive `suffix` match; returns where the suffix starts.
fn suffix_start(s: &str, suffix: &str) -> Option<usize> {
    let start: usize = s.len().checked_sub(suffix.len())?;
    (start > 0 && s.is_char_boundary(start) && s[start..].eq_ignore_ascii_case(suffix)).then_some(start)
}

/// UNC and reverse DNS forms, rewritten to address strings and scanned.
fn special_host(s: &str, opts: &ParseOptions) -> Result<Option<ParsedHost>, AddressStringError> {
    let (rewritten, form) = if let Some(at) = suffix_start(s, IPV6_UNC_SUFFIX) {
        (unc_to_ipv6(&s[..at]), HostForm::Unc)
    } else if let Some(at) = suffix_start(s, IPV4_REVERSE_SUFFIX) {
        (reverse_ipv4(s, at)?, HostForm::ReverseDns)
    } else if let Some(at) = suffix_start(s, IPV6_REVERSE_SUFFIX).or_else(|| suffix_start(s, IPV6_REVERSE_SUFFIX_DEPRECATED)) {
        (reverse_ipv6(s, at)?, HostForm::ReverseDns)
    } else {
        return Ok(None);
    };
    debug!("{form:?} host rewritten to '{rewritten}': '{s}'");
    let record: ParseRecord =
        Scanner::ip(&rewritten, opts).run().map_err(|e| AddressStringError::wrap(s, e.key(), e))?;
    Ok(Some(ParsedHost::address(record, rewritten, form, None, None)))
}

/// `-` separates segments, `s` starts the zone and `»` writes a range.
fn unc_to_ipv6(body: &str) -> String {
    let mut zoned: bool = false;
    body.chars()
        .map(|c| match c {
            UNC_SEGMENT_SEPARATOR => ':',
            UNC_RANGE_SEPARATOR => '-',
            UNC_ZONE_SEPARATOR if !zoned => {
                zoned = true;
                '%'
            }
            c => c,
        })
        .collect()
}

/// `d.c.b.a` to `a.b.c.d`
fn reverse_ipv4(s: &str, suffix_at: usize) -> Result<String, AddressStringError> {
    let body: &str = &s[..suffix_at];
    let labels: Vec<&str> = body.split('.').collect();
    if labels.len() != IPV4_SEGMENT_COUNT {
        return Err(AddressStringError::at(s, KEY_INVALID_CHAR, 0));
    }
    let mut offset: usize = 0;
    for label in &labels {
        if label.is_empty() {
            return Err(AddressStringError::at(s, KEY_INVALID_CHAR, offset));
        }
        offset += label.len() + 1;
    }
    Ok(labels.into_iter().rev().collect::<Vec<_>>().join("."))
}

/**
32 reversed nibble labels to 8 colon separated segments. A `*` nibble stands
for every hex digit and may only be followed (towards the least significant
end) by more `*` nibbles within its segment.
*/
fn reverse_ipv6(s: &str, suffix_at: usize) -> Result<String, AddressStringError> {
    let body: &str = &s[..suffix_at];
    let mut nibbles: Vec<(usize, u8)> = Vec::with_capacity(IPV6_REVERSE_NIBBLES);
    let mut offset: usize = 0;
    for label in body.split('.') {
        match label.as_bytes() {
            [c] if c.is_ascii_hexdigit() || *c == b'*' => nibbles.push((offset, *c)),
            _ => return Err(AddressStringError::at(s, KEY_INVALID_CHAR, offset)),
        }
        offset += label.len() + 1;
    }
    if nibbles.len() != IPV6_REVERSE_NIBBLES {
        return Err(AddressStringError::at(s, KEY_INVALID_CHAR, 0));
    }

    let mut segments: Vec<String> = Vec::with_capacity(IPV6_SEGMENT_COUNT);
    // most significant nibble is last
    for group in nibbles.rchunks(4) {
        let (mut low, mut high) = (String::with_capacity(4), String::with_capacity(4));
        let mut wild: bool = false;
        for &(at, c) in group.iter().rev() {
            match c {
                b'*' => {
                    wild = true;
                    low.push('0');
                    high.push('f');
                }
                _ if wild => return Err(AddressStringError::at(s, KEY_INVALID_CHAR, at)),
                _ => {
                    low.push(c as char);
                    high.push(c as char);
                }
            }
        }
        segments.push(if wild { format!("{low}-{high}") } else { low });
    }
    Ok(segments.join(":"))
}

/* -------------------------------------------------------------------------- */

fn validate_host_name(s: &str) -> Result<HostName, AddressStringError> {
    let (name, trailing_dot) = match s.strip_suffix('.') {
        Some(n) => (n, true),
        None => (s, false),
    };
    if name.is_empty() {
        return Err(AddressStringError::new(s, KEY_HOST_EMPTY));
    }
    if name.len() > MAX_HOST_LEN {
        return Err(AddressStringError::new(s, KEY_HOST_LENGTH));
    }
    let mut offset: usize = 0;
    for (n, label) in name.split('.').enumerate() {
        if n >= MAX_LABELS {
            return Err(AddressStringError::new(s, KEY_HOST_TOO_MANY_LABELS));
        }
        if label.is_empty() {
            return Err(AddressStringError::at(s, KEY_HOST_LABEL_SHORT, offset));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(AddressStringError::at(s, KEY_SEGMENT_TOO_LONG_AT, offset));
        }
        if !HOST_LABEL.is_match(label) {
            let bad: usize = label
                .bytes()
                .enumerate()
                .position(|(i, c)| {
                    !(c.is_ascii_alphanumeric() || c == b'_' || c == b'-') || (c == b'-' && (i == 0 || i == label.len() - 1))
                })
                .unwrap_or(0);
            return Err(AddressStringError::at(s, KEY_HOST_INVALID_CHAR, offset + bad));
        }
        offset += label.len() + 1;
    }
    Ok(HostName { name: name.to_string(), trailing_dot })
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::IpVersion;

    fn host(s: &str) -> Result<ParsedHost, AddressStringError> {
        parse_host(s, &ParseOptions::default().with_port(true, true))
    }

    #[test]
    fn test_plain_address() {
        let h = host("1.2.3.4:80").unwrap();
        let rec = h.record().unwrap();
        assert_eq!(rec.version(), IpVersion::V4);
        assert_eq!(rec.qualifier().port, Some(80));
        assert_eq!(h.port(), Some(80));
        let h = host("::1").unwrap();
        assert!(h.is_address());
        assert_eq!(h.port(), None);
    }

    #[test]
    fn test_bracketed() {
        let h = host("[fe80::1%25eth0]:443").unwrap();
        assert_eq!(h.record().unwrap().zone(), Some("eth0"));
        assert_eq!(h.port(), Some(443));
        let h = host("[fe80::1%25en%2d1]").unwrap();
        assert_eq!(h.record().unwrap().zone(), Some("en-1"));
        assert_eq!(host("[fe80::1%25en%2]").unwrap_err().root().key(), KEY_INVALID_ZONE_ENCODING);
        let h = host("[IPv6:1::]/64").unwrap();
        assert_eq!(h.record().unwrap().prefix_len(), Some(64));
        assert!(matches!(h.host(), Host::Address { form: HostForm::Bracketed, .. }));
        assert_eq!(host("[1::2").unwrap_err().key(), KEY_HOST_BRACKET_END);
        assert_eq!(host("[v1.x]").unwrap_err().key(), KEY_HOST_MECHANISM);
        assert_eq!(host("[1.2.3.4]").unwrap_err().key(), KEY_HOST_BRACKET_NOT_V6);
        assert_eq!(host("[::1]x").unwrap_err().index(), Some(5));
    }

    #[test]
    fn test_unc() {
        const UNC: &str = "fe80--1s4.ipv6-literal.net";
        let h = host(UNC).unwrap();
        let rec = h.record().unwrap();
        assert_eq!(rec.zone(), Some("4"));
        assert_eq!(rec.compressed_index(), Some(1));
        let h = host("1-2-3-4-5-6-7-0\u{bb}f.IPV6-LITERAL.NET").unwrap();
        let last = h.record().unwrap().segment(7).unwrap();
        assert_eq!((last.lower, last.upper), (0, 0xf));
    }

    #[test]
    fn test_reverse_dns() {
        let h = host("4.3.2.1.in-addr.arpa").unwrap();
        let rec = h.record().unwrap();
        assert_eq!(rec.segment(0).unwrap().lower, 1);
        assert_eq!(rec.segment(3).unwrap().lower, 4);
        assert_eq!(host("3.2.1.in-addr.arpa").unwrap_err().key(), KEY_INVALID_CHAR);

        const V6: &str = "b.a.9.8.7.6.5.0.4.0.0.0.3.0.0.0.2.0.0.0.1.0.0.0.0.0.0.0.1.2.3.4.ip6.arpa";
        let rec = host(V6).unwrap().into_record().unwrap();
        assert_eq!(rec.segment(0).unwrap().lower, 0x4321);
        assert_eq!(rec.segment(7).unwrap().lower, 0x89ab);
        const WILD: &str = "*.*.9.8.7.6.5.0.4.0.0.0.3.0.0.0.2.0.0.0.1.0.0.0.0.0.0.0.1.2.3.4.ip6.int";
        let rec = host(WILD).unwrap().into_record().unwrap();
        let seg = rec.segment(7).unwrap();
        assert_eq!((seg.lower, seg.upper), (0x8900, 0x89ff));
    }

    #[test]
    fn test_host_names() {
        let h = host("Example.COM.").unwrap();
        let name = h.name().unwrap();
        assert!(name.is_fully_qualified());
        assert_eq!(name.normalized(), "example.com");
        assert_eq!(name.labels().count(), 2);
        let h = host("example.com:http").unwrap();
        assert_eq!(h.service(), Some("http"));
        assert_eq!(host("a..b").unwrap_err().key(), KEY_HOST_LABEL_SHORT);
        let err = host("ex-.com").unwrap_err();
        assert_eq!((err.key(), err.index()), (KEY_HOST_INVALID_CHAR, Some(2)));
        let err = host("ex ample.com").unwrap_err();
        assert_eq!(err.index(), Some(2));
        let long: String = format!("{}.com", "a".repeat(64));
        assert_eq!(host(&long).unwrap_err().key(), KEY_SEGMENT_TOO_LONG_AT);
    }

    #[test]
    fn test_address_shaped_errors() {
        assert_eq!(host("1.2.3.4.5").unwrap_err().key(), KEY_IPV4_TOO_MANY);
        assert_eq!(host("1:2:3:4:5:6:7:8:9").unwrap_err().key(), KEY_TOO_MANY_SEGMENTS);
        assert_eq!(host("").unwrap_err().key(), KEY_HOST_EMPTY);
    }
}
