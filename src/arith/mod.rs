// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembled address values and the bit-range arithmetic on them.

mod assemble;
mod cache;
mod division;
mod enumerate;
mod grouping;

use crate::parse::{parse_address, parse_mac, AddressStringError, MacOptions, ParseOptions, ParseRecord};

pub use assemble::{assemble, assemble_mac, AddressIter, AddressKind, AddressValue};
pub use division::Division;
pub use enumerate::{GroupingIter, RangeEnumerator, SubnetEnumerator};
pub use grouping::Grouping;

/// Parse and assemble an IP address string in one step. `Ok(None)` is a valid
/// empty string configured to stand for no address.
///
/// ```
/// use addrstr::{parse_value, ParseOptions};
///
/// let v = parse_value("10.1.0-1.*/23", &ParseOptions::default()).unwrap().unwrap();
/// assert_eq!(v.count(), 512);
/// assert!(v.grouping().is_prefix_block());
/// assert_eq!(v.to_ip_net().unwrap().to_string(), "10.1.0.0/23");
/// ```
pub fn parse_value(s: &str, opts: &ParseOptions) -> Result<Option<AddressValue>, AddressStringError> {
    let rec: ParseRecord = parse_address(s, opts)?;
    assemble(s, rec, opts)
}

/// Parse and assemble a MAC address string in one step.
pub fn parse_mac_value(s: &str, opts: &MacOptions) -> Result<Option<AddressValue>, AddressStringError> {
    let rec: ParseRecord = parse_mac(s, opts)?;
    assemble_mac(s, rec, opts)
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const V4_BLOCK: &str = "192.168.0.0/16";
    const V6_BLOCK: &str = "2001:db8::/32";

    #[test]
    fn test_round_trip_values() {
        let opts = ParseOptions::default();
        let v = parse_value("255.255.255.255", &opts).unwrap().unwrap();
        assert_eq!(v.grouping().value(), 0xffff_ffff);
        assert_eq!(v.grouping().upper_value(), 0xffff_ffff);
        let v = parse_value("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff", &opts).unwrap().unwrap();
        assert_eq!(v.grouping().value(), u128::MAX);
    }

    #[test]
    fn test_prefix_containment() {
        let opts = ParseOptions::default();
        for s in [V4_BLOCK, V6_BLOCK] {
            let v = parse_value(s, &opts).unwrap().unwrap();
            let p: u32 = v.prefix_len().unwrap();
            let block = v.to_prefix_block();
            assert!(block.grouping().contains_prefix_block(p), "{s}");
            assert_eq!(block.grouping().min_prefix_len_for_block(), p, "{s}");
            assert_eq!(block.to_ip_net().unwrap().to_string(), s);
        }
        // every prefix length of one address
        let v = parse_value("172.16.5.4", &opts).unwrap().unwrap();
        for p in 0..=32 {
            assert!(v.grouping().to_prefix_block(p).contains_prefix_block(p), "/{p}");
        }
    }

    #[test]
    fn test_concurrent_min_prefix_on_value() {
        let v = parse_value("10.0.0.0-127.*", &ParseOptions::default()).unwrap().unwrap();
        let results: Vec<u32> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| v.grouping().min_prefix_len_for_block()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results, vec![17; 4]);
    }

    #[test]
    fn test_mac_value() {
        let v = parse_mac_value("01-23-45-67-89-ab", &MacOptions::default()).unwrap().unwrap();
        assert_eq!(v.grouping().value(), 0x0123_4567_89ab);
        assert_eq!(parse_mac_value("", &MacOptions::default()).unwrap(), None);
    }

    #[test]
    fn test_errors_propagate() {
        let err = parse_value("1.2.3.4.5", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.key(), "ipaddress.error.ipv4.too.many.segments");
    }
}
