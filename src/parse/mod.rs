// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Address string validation: one forward scan per string producing a [ParseRecord].

mod chars;
mod convert;
mod grammar;
mod host;
mod options;
mod qualifier;
mod record;
mod scanner;
pub(crate) mod strings;

use std::{error, fmt};
use strings::describe;
use tracing::debug;

pub use chars::CharClass;
pub use convert::{base85_decode, base85_encode};
pub use grammar::{FamilyGrammar, Ipv4Grammar, Ipv6Grammar, MacGrammar};
pub use host::{parse_host, Host, HostForm, HostName, ParsedHost};
pub use options::*;
pub use record::*;

pub(crate) use scanner::Scanner;

pub(crate) const IPV4_BITS: u32 = 32;
pub(crate) const IPV6_BITS: u32 = 128;
pub(crate) const IPV4_SEGMENT_COUNT: usize = 4;
pub(crate) const IPV6_SEGMENT_COUNT: usize = 8;
pub(crate) const MAC48_SEGMENT_COUNT: usize = 6;
pub(crate) const EUI64_SEGMENT_COUNT: usize = 8;
pub(crate) const MAC_DOTTED_SEGMENT_COUNT: usize = 3;
pub(crate) const MAC_DOTTED64_SEGMENT_COUNT: usize = 4;
/// IPv6 segments replaced by an embedded IPv4 section
pub(crate) const IPV6_MIXED_REPLACED: usize = 2;

/**
Parse an IPv4 or IPv6 address string, including any trailing qualifier
(prefix length, mask, zone), into a validated [ParseRecord].

```
use addrstr::{parse_address, IpVersion, ParseOptions};

let rec = parse_address("1::2", &ParseOptions::default()).unwrap();
assert_eq!(rec.version(), IpVersion::V6);
assert_eq!(rec.segment_count(), 3); // `1`, the `::` placeholder and `2`
```
*/
pub fn parse_address(s: &str, opts: &ParseOptions) -> Result<ParseRecord, AddressStringError> {
    let res = Scanner::ip(s, opts).run();
    if let Err(e) = &res {
        debug!(key = e.key(), index = ?e.index(), "address parse failed: '{s}'");
    }
    res
}

/// Parse a MAC-48 or EUI-64 address string into a validated [ParseRecord].
pub fn parse_mac(s: &str, opts: &MacOptions) -> Result<ParseRecord, AddressStringError> {
    let res = Scanner::mac(s, opts).run();
    if let Err(e) = &res {
        debug!(key = e.key(), index = ?e.index(), "MAC parse failed: '{s}'");
    }
    res
}

/* -------------------------------------------------------------------------- */

/**
Address string validation failure. Every variant carries a stable message
key (see [AddressStringError::key]) suitable for message catalog lookups.
Nested sub-parses (embedded IPv4, masks, rewritten host forms) keep the
inner failure reachable via [std::error::Error::source].
*/
#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressStringError {
    /// the string as a whole is invalid
    Invalid  { key: &'static str, input: String },
    /// invalid at a specific byte offset
    AtIndex  { key: &'static str, input: String, index: usize },
    /// a nested parse failed
    Wrapped  { key: &'static str, input: String, inner: Box<AddressStringError> },
}

impl AddressStringError {
    pub(crate) fn new(input: &str, key: &'static str) -> Self {
        Self::Invalid { key, input: input.to_string() }
    }

    pub(crate) fn at(input: &str, key: &'static str, index: usize) -> Self {
        Self::AtIndex { key, input: input.to_string(), index }
    }

    pub(crate) fn wrap(input: &str, key: &'static str, inner: AddressStringError) -> Self {
        Self::Wrapped { key, input: input.to_string(), inner: Box::new(inner) }
    }

    /// Stable message key, e.g. `ipaddress.error.too.many.segments`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Invalid { key, .. } | Self::AtIndex { key, .. } | Self::Wrapped { key, .. } => key,
        }
    }

    /// Byte offset into the original string, where applicable.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::AtIndex { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::Invalid { input, .. } | Self::AtIndex { input, .. } | Self::Wrapped { input, .. } => input,
        }
    }

    /// The wrapped failure of a nested sub-parse.
    pub fn inner(&self) -> Option<&AddressStringError> {
        match self {
            Self::Wrapped { inner, .. } => Some(inner),
            _ => None,
        }
    }

    /// The innermost failure in a chain of wrapped errors.
    pub fn root(&self) -> &AddressStringError {
        let mut cur: &AddressStringError = self;
        while let Some(inner) = cur.inner() {
            cur = inner;
        }
        cur
    }
}

impl fmt::Display for AddressStringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressStringError::Invalid { key, input } => {
                write!(f, "{}: '{input}'", describe(key))
            }
            AddressStringError::AtIndex { key, input, index } => {
                write!(f, "{} at index {index}: '{input}'", describe(key))
            }
            AddressStringError::Wrapped { key, input, inner } => {
                write!(f, "{}: '{input}': {inner}", describe(key))
            }
        }
    }
}

impl error::Error for AddressStringError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            AddressStringError::Wrapped { inner, .. } => Some(inner.as_ref()),
            _ => None,
        }
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_accessors() {
        let inner = AddressStringError::at("1.2.3", strings::KEY_EMPTY_SEGMENT, 2);
        let outer = AddressStringError::wrap("::/1.2.3", strings::KEY_INVALID_PREFIX_OR_MASK, inner.clone());
        assert_eq!(outer.key(), "ipaddress.error.invalidCIDRPrefixOrMask");
        assert_eq!(outer.index(), None);
        assert_eq!(outer.inner(), Some(&inner));
        assert_eq!(outer.root().index(), Some(2));
        assert!(outer.source().is_some());
        assert!(inner.source().is_none());
    }

    #[test]
    fn test_error_display() {
        let e = AddressStringError::at("1..2", strings::KEY_EMPTY_SEGMENT, 2);
        assert_eq!(e.to_string(), "empty segment at index 2: '1..2'");
        let e = AddressStringError::new("", strings::KEY_EMPTY);
        assert_eq!(e.to_string(), "empty address string: ''");
    }
}
