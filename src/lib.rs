// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
IPv4, IPv6 and MAC address string validation with bit-range arithmetic.

Parsing is split in two: [parse_address], [parse_mac] and [parse_host]
validate a string in one forward pass and produce a [ParseRecord];
[assemble] turns that record into an immutable [AddressValue] whose
[Grouping] answers prefix block questions and enumerates its addresses.

```
use addrstr::{parse_value, ParseOptions};

let v = parse_value("1.2.3-4.*", &ParseOptions::default()).unwrap().unwrap();
assert_eq!(v.count(), 512);
assert_eq!(v.grouping().min_prefix_len_for_block(), 24);
assert_eq!(v.iter().next().unwrap().to_string(), "1.2.3.0");
```
*/

mod arith;
mod parse;

/* ######################################################################### */

pub use arith::{
    assemble, assemble_mac, parse_mac_value, parse_value, AddressIter, AddressKind, AddressValue, Division,
    Grouping, GroupingIter, RangeEnumerator, SubnetEnumerator,
};
pub use parse::{
    base85_decode, base85_encode, parse_address, parse_host, parse_mac, AddressStringError, AllStrOption,
    CharClass, EmptyStrOption, FamilyGrammar, FormatOptions, Host, HostForm, HostName, IpVersion, Ipv4Grammar,
    Ipv4Options, Ipv6Grammar, Ipv6Options, MacFormat, MacGrammar, MacOptions, MacSize, ParseOptions,
    ParseRecord, ParsedHost, PendingDigits, Qualifier, RadixHint, RangeOptions, RecordFlags, SegmentFlags,
    SegmentRecord,
};
