// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static IPV6_UNC_SUFFIX: &str = ".ipv6-literal.net";
pub(crate) static IPV4_REVERSE_SUFFIX: &str = ".in-addr.arpa";
pub(crate) static IPV6_REVERSE_SUFFIX: &str = ".ip6.arpa";
pub(crate) static IPV6_REVERSE_SUFFIX_DEPRECATED: &str = ".ip6.int";
pub(crate) static SMTP_IPV6_PREFIX: &str = "IPv6:";

// scanner.rs
pub(crate) static KEY_EMPTY: &str = "ipaddress.error.empty";
pub(crate) static KEY_ALL: &str = "ipaddress.error.all";
pub(crate) static KEY_PREFIX_ONLY: &str = "ipaddress.error.prefix.only";
pub(crate) static KEY_SINGLE_SEGMENT: &str = "ipaddress.error.single.segment";
pub(crate) static KEY_INVALID_CHAR: &str = "ipaddress.error.invalid.character.at.index";
pub(crate) static KEY_INVALID_CHAR_COMBO: &str = "ipaddress.error.invalid.character.combination.at.index";
pub(crate) static KEY_EMPTY_SEGMENT: &str = "ipaddress.error.empty.segment.at.index";
pub(crate) static KEY_LEADING_ZEROS: &str = "ipaddress.error.segment.leading.zeros";
pub(crate) static KEY_SEGMENT_TOO_LONG: &str = "ipaddress.error.segment.too.long";
pub(crate) static KEY_SEGMENT_TOO_LONG_AT: &str = "ipaddress.error.segment.too.long.at.index";
pub(crate) static KEY_SEGMENT_TOO_SHORT_AT: &str = "ipaddress.error.segment.too.short.at.index";
pub(crate) static KEY_TOO_FEW_SEGMENTS: &str = "ipaddress.error.too.few.segments";
pub(crate) static KEY_TOO_FEW_DIGITS: &str = "ipaddress.error.too.few.segments.digit.count";
pub(crate) static KEY_TOO_MANY_SEGMENTS: &str = "ipaddress.error.too.many.segments";
pub(crate) static KEY_FRONT_DIGIT_COUNT: &str = "ipaddress.error.front.digit.count";
pub(crate) static KEY_NO_WILDCARD: &str = "ipaddress.error.no.wildcard";
pub(crate) static KEY_NO_SINGLE_WILDCARD: &str = "ipaddress.error.no.single.wildcard";
pub(crate) static KEY_SINGLE_WILDCARD_ORDER: &str = "ipaddress.error.single.wildcard.order";
pub(crate) static KEY_NO_RANGE: &str = "ipaddress.error.no.range";
pub(crate) static KEY_INVALID_RANGE: &str = "ipaddress.error.invalidRange";
pub(crate) static KEY_NO_MIXED: &str = "ipaddress.error.no.mixed";
pub(crate) static KEY_ADDRESS_TOO_LARGE: &str = "ipaddress.error.address.too.large";
pub(crate) static KEY_IPV4: &str = "ipaddress.error.ipv4";
pub(crate) static KEY_IPV6: &str = "ipaddress.error.ipv6";
pub(crate) static KEY_IPV4_TOO_MANY: &str = "ipaddress.error.ipv4.too.many.segments";
pub(crate) static KEY_IPV4_TOO_FEW: &str = "ipaddress.error.ipv4.too.few.segments";
pub(crate) static KEY_IPV4_TOO_LARGE: &str = "ipaddress.error.ipv4.segment.too.large";
pub(crate) static KEY_IPV4_HEX: &str = "ipaddress.error.ipv4.segment.hex";
pub(crate) static KEY_IPV6_AMBIGUOUS: &str = "ipaddress.error.ipv6.ambiguous";
pub(crate) static KEY_IPV6_SEPARATOR: &str = "ipaddress.error.ipv6.separator";
pub(crate) static KEY_IPV6_START_SEPARATOR: &str = "ipaddress.error.ipv6.cannot.start.with.single.separator";
pub(crate) static KEY_END_SEPARATOR: &str = "ipaddress.error.cannot.end.with.single.separator";
pub(crate) static KEY_MAC_FORMAT: &str = "ipaddress.mac.error.format";
pub(crate) static KEY_MAC_MIXED_FORMAT: &str = "ipaddress.mac.error.mix.format.characters.at.index";

// convert.rs
pub(crate) static KEY_INVALID_BINARY: &str = "ipaddress.error.ipv4.invalid.binary.digit";
pub(crate) static KEY_INVALID_OCTAL: &str = "ipaddress.error.ipv4.invalid.octal.digit";
pub(crate) static KEY_INVALID_DECIMAL: &str = "ipaddress.error.ipv4.invalid.decimal.digit";

// qualifier.rs
pub(crate) static KEY_PREFIX_SIZE: &str = "ipaddress.error.prefixSize";
pub(crate) static KEY_INVALID_PREFIX: &str = "ipaddress.error.invalidCIDRPrefix";
pub(crate) static KEY_INVALID_PREFIX_OR_MASK: &str = "ipaddress.error.invalidCIDRPrefixOrMask";
pub(crate) static KEY_CIDR_NOT_ALLOWED: &str = "ipaddress.error.CIDRNotAllowed";
pub(crate) static KEY_IPV4_PREFIX_ZEROS: &str = "ipaddress.error.ipv4.prefix.leading.zeros";
pub(crate) static KEY_IPV6_PREFIX_ZEROS: &str = "ipaddress.error.ipv6.prefix.leading.zeros";
pub(crate) static KEY_MASK_ADDRESS_EMPTY: &str = "ipaddress.error.invalid.mask.address.empty";
pub(crate) static KEY_MASK_EMPTY: &str = "ipaddress.error.invalid.mask.empty";
pub(crate) static KEY_MASK_WILDCARD: &str = "ipaddress.error.invalid.mask.wildcard";
pub(crate) static KEY_MASK_EXTRA_CHARS: &str = "ipaddress.error.invalid.mask.extra.chars";
pub(crate) static KEY_MASK_SINGLE_SEGMENT: &str = "ipaddress.error.mask.single.segment";
pub(crate) static KEY_IP_MISMATCH: &str = "ipaddress.error.ipMismatch";
pub(crate) static KEY_ONLY_ZONE: &str = "ipaddress.error.only.zone";
pub(crate) static KEY_ONLY_IPV6_ZONE: &str = "ipaddress.error.only.ipv6.has.zone";
pub(crate) static KEY_INVALID_ZONE: &str = "ipaddress.error.invalid.zone";
pub(crate) static KEY_INVALID_ZONE_ENCODING: &str = "ipaddress.error.invalid.zone.encoding";
pub(crate) static KEY_PORT: &str = "ipaddress.host.error.port";
pub(crate) static KEY_PORT_NO_DIGITS: &str = "ipaddress.host.error.invalidPort.no.digits";
pub(crate) static KEY_PORT_TOO_LARGE: &str = "ipaddress.host.error.invalidPort.too.large";
pub(crate) static KEY_SERVICE: &str = "ipaddress.host.error.service";
pub(crate) static KEY_PORT_SERVICE: &str = "ipaddress.host.error.invalid.port.service";
pub(crate) static KEY_SERVICE_HYPHEN_START: &str = "ipaddress.host.error.invalid.service.hyphen.start";
pub(crate) static KEY_SERVICE_HYPHEN_END: &str = "ipaddress.host.error.invalid.service.hyphen.end";
pub(crate) static KEY_SERVICE_HYPHEN_DOUBLE: &str = "ipaddress.host.error.invalid.service.hyphen.consecutive";
pub(crate) static KEY_SERVICE_NO_CHARS: &str = "ipaddress.host.error.invalidService.no.chars";
pub(crate) static KEY_SERVICE_NO_LETTER: &str = "ipaddress.host.error.invalidService.no.letter";
pub(crate) static KEY_SERVICE_TOO_LONG: &str = "ipaddress.host.error.invalidService.too.long";

// host.rs
pub(crate) static KEY_HOST_EMPTY: &str = "ipaddress.host.error.empty";
pub(crate) static KEY_HOST_INVALID: &str = "ipaddress.host.error.invalid";
pub(crate) static KEY_HOST_LENGTH: &str = "ipaddress.host.error.invalid.length";
pub(crate) static KEY_HOST_INVALID_CHAR: &str = "ipaddress.host.error.invalid.character.at.index";
pub(crate) static KEY_HOST_LABEL_SHORT: &str = "ipaddress.host.error.segment.too.short";
pub(crate) static KEY_HOST_TOO_MANY_LABELS: &str = "ipaddress.host.error.too.many.segments";
pub(crate) static KEY_HOST_BRACKET_END: &str = "ipaddress.host.error.bracketed.missing.end";
pub(crate) static KEY_HOST_BRACKET_NOT_V6: &str = "ipaddress.host.error.bracketed.not.ipv6";
pub(crate) static KEY_HOST_MECHANISM: &str = "ipaddress.host.error.invalid.mechanism";

// assemble.rs
pub(crate) static KEY_JOINED_RANGES: &str = "ipaddress.error.invalid.joined.ranges";
pub(crate) static KEY_MIXED_RANGE: &str = "ipaddress.error.invalidMixedRange";
pub(crate) static KEY_MASK_MISMATCH: &str = "ipaddress.error.maskMismatch";

/// Map a stable error key to its English message.
#[rustfmt::skip]
pub(crate) fn describe(key: &str) -> &'static str {
    match key.rsplit_once("error.").map(|(_, k)| k).unwrap_or(key) {
        "empty"                                 => "empty address string",
        "all"                                   => "the all-addresses wildcard is not allowed",
        "prefix.only"                           => "a prefix length alone is not an address",
        "single.segment"                        => "single segment addresses are not allowed",
        "invalid.character.at.index"            => "invalid character",
        "invalid.character.combination.at.index" => "invalid combination of characters",
        "empty.segment.at.index"                => "empty segment",
        "segment.leading.zeros"                 => "leading zeros are not allowed",
        "segment.too.long"                      => "segment value has too many digits",
        "segment.too.long.at.index"             => "segment value has too many digits",
        "segment.too.short.at.index"            => "segment value has too few digits",
        "too.few.segments"                      => "too few segments",
        "too.few.segments.digit.count"          => "too few segments for the number of digits",
        "too.many.segments"                     => "too many segments",
        "front.digit.count"                     => "range front has too many digits",
        "no.wildcard"                           => "wildcards are not allowed",
        "no.single.wildcard"                    => "single digit wildcards are not allowed",
        "single.wildcard.order"                 => "single digit wildcards must be the trailing digits",
        "no.range"                              => "ranges are not allowed",
        "invalidRange"                          => "reversed ranges are not allowed",
        "no.mixed"                              => "mixed IPv6/IPv4 addresses are not allowed",
        "address.too.large"                     => "address value is too large",
        "ipv4"                                  => "IPv4 addresses are not allowed",
        "ipv6"                                  => "IPv6 addresses are not allowed",
        "ipv4.too.many.segments"                => "IPv4 address has too many segments",
        "ipv4.too.few.segments"                 => "IPv4 address has too few segments",
        "ipv4.segment.too.large"                => "IPv4 segment value is too large",
        "ipv4.segment.hex"                      => "hexadecimal IPv4 segments are not allowed",
        "ipv6.ambiguous"                        => "IPv6 address may contain only one '::'",
        "ipv6.separator"                        => "IPv6 separator in an IPv4 address",
        "ipv6.cannot.start.with.single.separator" => "IPv6 address cannot start with a single ':'",
        "cannot.end.with.single.separator"      => "address cannot end with a single separator",
        "format"                                => "MAC address format is not allowed",
        "mix.format.characters.at.index"        => "MAC address mixes separator styles",
        "ipv4.invalid.binary.digit"             => "invalid binary digit",
        "ipv4.invalid.octal.digit"              => "invalid octal digit",
        "ipv4.invalid.decimal.digit"            => "invalid decimal digit",
        "prefixSize"                            => "prefix length exceeds address size",
        "invalidCIDRPrefix"                     => "invalid prefix length",
        "invalidCIDRPrefixOrMask"               => "invalid prefix length or mask",
        "CIDRNotAllowed"                        => "prefix lengths and masks are not allowed",
        "ipv4.prefix.leading.zeros"             => "IPv4 prefix length has leading zeros",
        "ipv6.prefix.leading.zeros"             => "IPv6 prefix length has leading zeros",
        "invalid.mask.address.empty"            => "a mask requires an address",
        "invalid.mask.empty"                    => "empty mask",
        "invalid.mask.wildcard"                 => "mask cannot be a wildcard",
        "invalid.mask.extra.chars"              => "unexpected characters after mask",
        "mask.single.segment"                   => "single segment IPv4 masks are not allowed",
        "ipMismatch"                            => "mask and address versions differ",
        "only.zone"                             => "a zone alone is not an address",
        "only.ipv6.has.zone"                    => "only IPv6 addresses have zones",
        "invalid.zone"                          => "invalid zone",
        "invalid.zone.encoding"                 => "invalid percent encoding in zone",
        "port"                                  => "ports are not allowed",
        "invalidPort.no.digits"                 => "port value is zero or missing",
        "invalidPort.too.large"                 => "port value is too large",
        "service"                               => "services are not allowed",
        "invalid.port.service"                  => "invalid port or service",
        "invalid.service.hyphen.start"          => "service cannot start with a hyphen",
        "invalid.service.hyphen.end"            => "service cannot end with a hyphen",
        "invalid.service.hyphen.consecutive"    => "service cannot contain consecutive hyphens",
        "invalidService.no.chars"               => "empty service",
        "invalidService.no.letter"              => "service requires at least one letter",
        "invalidService.too.long"               => "service name is too long",
        "invalid"                               => "invalid host",
        "invalid.length"                        => "host name is too long",
        "segment.too.short"                     => "empty host label",
        "bracketed.missing.end"                 => "missing closing bracket",
        "bracketed.not.ipv6"                    => "bracketed host is not an IPv6 address",
        "invalid.mechanism"                     => "unsupported address mechanism",
        "invalid.joined.ranges"                 => "joined segment range cannot be split into segments",
        "invalidMixedRange"                     => "embedded IPv4 range cannot be split into IPv6 segments",
        "maskMismatch"                          => "mask cannot be applied to the range",
        _                                       => "invalid address string",
    }
}
