// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable option bundles controlling which notations a scan accepts.
//! Every struct deserializes with missing fields taking their defaults.

use super::record::IpVersion;
use serde::{Deserialize, Serialize};

/// How an empty address string is interpreted, when empty strings are allowed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyStrOption {
    /// the zero address of the preferred version
    #[default]
    Zero,
    /// the loopback address of the preferred version
    Loopback,
    /// valid string, but no address
    NoAddress,
}

/// How the `*` string is interpreted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllStrOption {
    /// all addresses of every allowed version
    #[default]
    AllAddresses,
    /// all addresses of the preferred version only
    PreferredVersion,
}

/// Preferred MAC address length.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacSize {
    Mac48,
    Eui64,
    #[default]
    Any,
}

/* -------------------------------------------------------------------------- */

/// Which wildcard and range notations are accepted within segments.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    /// `*` for a whole segment (and `%` as an SQL-style wildcard)
    pub allow_wildcard:          bool,
    /// `a-b`
    pub allow_range_separator:   bool,
    /// `b-a` where `b > a`
    pub allow_reverse_range:     bool,
    /// `-b` and `a-`
    pub allow_inferred_boundary: bool,
    /// `_` as a trailing any-digit wildcard
    pub allow_single_wildcard:   bool,
}

impl RangeOptions {
    #[rustfmt::skip]
    pub const NO_RANGE: RangeOptions = RangeOptions {
        allow_wildcard: false, allow_range_separator: false, allow_reverse_range: false,
        allow_inferred_boundary: false, allow_single_wildcard: false,
    };
    #[rustfmt::skip]
    pub const WILDCARD_ONLY: RangeOptions = RangeOptions {
        allow_wildcard: true, allow_range_separator: false, allow_reverse_range: false,
        allow_inferred_boundary: false, allow_single_wildcard: true,
    };
    #[rustfmt::skip]
    pub const WILDCARD_AND_RANGE: RangeOptions = RangeOptions {
        allow_wildcard: true, allow_range_separator: true, allow_reverse_range: true,
        allow_inferred_boundary: true, allow_single_wildcard: true,
    };

    /// Any range or wildcard notation at all.
    pub fn allows_any(&self) -> bool {
        self.allow_wildcard || self.allow_range_separator || self.allow_single_wildcard
    }
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self::WILDCARD_AND_RANGE
    }
}

/* -------------------------------------------------------------------------- */

/// Segment notation options shared by every address family.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub allow_leading_zeros:           bool,
    /// more leading zeros than the segment's maximum digit count
    pub allow_unlimited_leading_zeros: bool,
    /// `0b` prefixed binary segments
    pub allow_binary:                  bool,
    /// a `*` segment may stand for several missing segments
    pub allow_wildcarded_separator:    bool,
    pub range:                         RangeOptions,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            allow_leading_zeros: true,
            allow_unlimited_leading_zeros: false,
            allow_binary: true,
            allow_wildcarded_separator: true,
            range: RangeOptions::default(),
        }
    }
}

/// IPv4 specific options, including the `inet_aton` legacy notations.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ipv4Options {
    pub format:                        FormatOptions,
    /// `0xa.0xb.0xc.0xd`
    pub allow_inet_aton_hex:           bool,
    /// `012.013.014.015`
    pub allow_inet_aton_octal:         bool,
    /// `0x00a`, `0012`
    pub allow_inet_aton_leading_zeros: bool,
    /// `1.2.3`, `1.2`, `1`
    pub allow_inet_aton_joined:        bool,
    /// `1.2.3.4/255` read as a mask rather than a prefix
    pub allow_single_segment_mask:     bool,
}

impl Default for Ipv4Options {
    fn default() -> Self {
        Ipv4Options {
            format: FormatOptions::default(),
            allow_inet_aton_hex: true,
            allow_inet_aton_octal: true,
            allow_inet_aton_leading_zeros: true,
            allow_inet_aton_joined: true,
            allow_single_segment_mask: false,
        }
    }
}

impl Ipv4Options {
    /// Options with every `inet_aton` notation disabled.
    pub fn strict() -> Self {
        Ipv4Options {
            allow_inet_aton_hex: false,
            allow_inet_aton_octal: false,
            allow_inet_aton_leading_zeros: false,
            allow_inet_aton_joined: false,
            ..Default::default()
        }
    }
}

/// IPv6 specific options.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ipv6Options {
    pub format:           FormatOptions,
    /// `a:b:c:d:e:f:1.2.3.4`
    pub allow_mixed:      bool,
    pub allow_zone:       bool,
    pub allow_empty_zone: bool,
    /// RFC 1924 20-character strings
    pub allow_base85:     bool,
    /// options for the embedded IPv4 section of mixed addresses
    pub mixed:            Ipv4Options,
}

impl Default for Ipv6Options {
    fn default() -> Self {
        Ipv6Options {
            format: FormatOptions::default(),
            allow_mixed: true,
            allow_zone: true,
            allow_empty_zone: true,
            allow_base85: true,
            mixed: Ipv4Options::strict(),
        }
    }
}

/* -------------------------------------------------------------------------- */

/// Options for scanning IP address strings.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub allow_empty:                        bool,
    pub empty_str:                          EmptyStrOption,
    /// `*` alone
    pub allow_all:                          bool,
    pub all_str:                            AllStrOption,
    /// version used for empty and `*` strings when both are allowed
    pub preferred_version:                  IpVersion,
    /// a whole address written as one segment, e.g. `3232235777`
    pub allow_single_segment:               bool,
    pub allow_prefix:                       bool,
    pub allow_mask:                         bool,
    pub allow_ipv4:                         bool,
    pub allow_ipv6:                         bool,
    pub allow_prefix_len_leading_zeros:     bool,
    /// prefix lengths above the bit count are clamped instead of rejected
    pub allow_prefixes_beyond_address_size: bool,
    pub allow_port:                         bool,
    pub allow_service:                      bool,
    pub ipv4:                               Ipv4Options,
    pub ipv6:                               Ipv6Options,
    /// applied when a MAC record is assembled through [ParseOptions]
    pub mac:                                MacOptions,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            allow_empty: true,
            empty_str: EmptyStrOption::default(),
            allow_all: true,
            all_str: AllStrOption::default(),
            preferred_version: IpVersion::V6,
            allow_single_segment: true,
            allow_prefix: true,
            allow_mask: true,
            allow_ipv4: true,
            allow_ipv6: true,
            allow_prefix_len_leading_zeros: true,
            allow_prefixes_beyond_address_size: false,
            allow_port: false,
            allow_service: false,
            ipv4: Ipv4Options::default(),
            ipv6: Ipv6Options::default(),
            mac: MacOptions::default(),
        }
    }
}

impl ParseOptions {
    /// Options accepting only plain, single-valued addresses and prefixes.
    pub fn strict() -> Self {
        let mut opts = ParseOptions {
            allow_empty: false,
            allow_all: false,
            allow_single_segment: false,
            ipv4: Ipv4Options::strict(),
            ..Default::default()
        };
        opts.ipv4.format.range = RangeOptions::NO_RANGE;
        opts.ipv6.format.range = RangeOptions::NO_RANGE;
        opts.ipv6.allow_base85 = false;
        opts
    }

    pub fn with_ranges(mut self, range: RangeOptions) -> Self {
        self.ipv4.format.range = range;
        self.ipv6.format.range = range;
        self.ipv6.mixed.format.range = range;
        self
    }

    pub fn with_versions(mut self, ipv4: bool, ipv6: bool) -> Self {
        self.allow_ipv4 = ipv4;
        self.allow_ipv6 = ipv6;
        self
    }

    pub fn with_port(mut self, port: bool, service: bool) -> Self {
        self.allow_port = port;
        self.allow_service = service;
        self
    }

    /// Options for the embedded IPv4 section of a mixed address.
    pub(crate) fn embedded(&self) -> ParseOptions {
        ParseOptions {
            allow_empty: false,
            allow_all: false,
            allow_single_segment: false,
            allow_prefix: false,
            allow_mask: false,
            allow_ipv4: true,
            allow_ipv6: false,
            allow_port: false,
            allow_service: false,
            ipv4: self.ipv6.mixed,
            ..*self
        }
    }

    /// Options for a mask qualifier: no ranges, no `*`, no nested qualifiers.
    pub(crate) fn for_mask(&self) -> ParseOptions {
        let mut opts = ParseOptions {
            allow_empty: false,
            allow_all: false,
            allow_prefix: false,
            allow_mask: false,
            allow_port: false,
            allow_service: false,
            ..*self
        }
        .with_ranges(RangeOptions::NO_RANGE);
        opts.ipv6.allow_zone = false;
        opts
    }
}

/// Options for scanning MAC address strings.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacOptions {
    pub allow_empty:           bool,
    pub allow_all:             bool,
    /// `0a0b0c0d0e0f` or `0a0b0c-0d0e0f`
    pub allow_single_segment:  bool,
    /// `aa-bb-cc-dd-ee-ff`
    pub allow_dashed:          bool,
    /// `aabbcc-ddeeff`
    pub allow_single_dashed:   bool,
    /// `aa:bb:cc:dd:ee:ff`
    pub allow_colon_delimited: bool,
    /// `aabb.ccdd.eeff`
    pub allow_dotted:          bool,
    /// `aa bb cc dd ee ff`
    pub allow_space_delimited: bool,
    /// `a:b:c:d:e:f`
    pub allow_short_segments:  bool,
    pub address_size:          MacSize,
    pub format:                FormatOptions,
}

impl Default for MacOptions {
    fn default() -> Self {
        MacOptions {
            allow_empty: true,
            allow_all: true,
            allow_single_segment: true,
            allow_dashed: true,
            allow_single_dashed: true,
            allow_colon_delimited: true,
            allow_dotted: true,
            allow_space_delimited: true,
            allow_short_segments: true,
            address_size: MacSize::default(),
            format: FormatOptions::default(),
        }
    }
}

/* -------------------------------------------------------------------------- */
