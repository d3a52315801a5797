// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Radix conversion of committed digit runs.
//!
//! The scanner folds every digit into a base-16 accumulator; the functions
//! here reinterpret that accumulator nibble by nibble in the true radix,
//! rejecting nibbles that are not digits of that radix.

use super::{
    chars::{CharClass, BASE85_ALPHABET, POW10, POW85},
    strings::*,
    AddressStringError,
};

/// Characters in a base-85 IPv6 address.
pub(crate) const BASE85_DIGITS: usize = 20;
const BASE85_CHUNK: usize = 9;

/// Accumulated nibbles read as binary digits.
pub(crate) fn switch_value2(hex: u64, digit_count: usize) -> Result<u64, &'static str> {
    let mut hex: u64 = hex;
    let mut result: u64 = 0;
    for shift in 0..digit_count {
        match hex & 0xf {
            0 => {}
            1 => result |= 1 << shift,
            _ => return Err(KEY_INVALID_BINARY),
        }
        hex >>= 4;
    }
    Ok(result)
}

/// Accumulated nibbles read as octal digits.
pub(crate) fn switch_value8(hex: u64, digit_count: usize) -> Result<u64, &'static str> {
    let mut hex: u64 = hex;
    let mut result: u64 = 0;
    for i in 0..digit_count {
        let nibble: u64 = hex & 0xf;
        if nibble >= 8 {
            return Err(KEY_INVALID_OCTAL);
        }
        result |= nibble << (3 * i);
        hex >>= 4;
    }
    Ok(result)
}

/// Accumulated nibbles read as decimal digits.
pub(crate) fn switch_value10(hex: u64, digit_count: usize) -> Result<u64, &'static str> {
    let mut hex: u64 = hex;
    let mut result: u64 = 0;
    for i in 0..digit_count {
        let nibble: u64 = hex & 0xf;
        if nibble >= 10 {
            return Err(KEY_INVALID_DECIMAL);
        }
        result += nibble * POW10[i];
        hex >>= 4;
    }
    Ok(result)
}

/// Accumulated digits interpreted in `radix`.
pub(crate) fn switch_value(hex: u64, radix: u32, digit_count: usize) -> Result<u64, &'static str> {
    match radix {
        2 => switch_value2(hex, digit_count),
        8 => switch_value8(hex, digit_count),
        10 => switch_value10(hex, digit_count),
        _ => Ok(hex),
    }
}

/**
Parse a digit run directly from the string. Used for runs too long for the
64-bit accumulator (binary and whole-address single segments).
*/
pub(crate) fn parse_digits(s: &[u8], radix: u32) -> Result<u128, &'static str> {
    let mut result: u128 = 0;
    for c in s {
        let d: u32 = match CharClass::digit(*c) {
            Some(d) if (d as u32) < radix => d as u32,
            _ => {
                return Err(match radix {
                    2 => KEY_INVALID_BINARY,
                    8 => KEY_INVALID_OCTAL,
                    10 => KEY_INVALID_DECIMAL,
                    _ => KEY_INVALID_CHAR,
                })
            }
        };
        result = result
            .checked_mul(radix as u128)
            .and_then(|r| r.checked_add(d as u128))
            .ok_or(KEY_ADDRESS_TOO_LARGE)?;
    }
    Ok(result)
}

/// Bits covered by each digit of the radix, decimal excluded.
fn radix_bits(radix: u32) -> Option<u32> {
    match radix {
        2 => Some(1),
        8 => Some(3),
        16 => Some(4),
        _ => None,
    }
}

/**
Expand `value` followed by `count` single-digit wildcards into the range of
every value the wildcards can stand for, e.g. decimal `1__` is `100..=199`
and hex `a_` is `0xa0..=0xaf`.
*/
pub(crate) fn expand_single_wildcard(value: u64, radix: u32, count: usize) -> (u64, u64) {
    match radix_bits(radix) {
        Some(bits) => {
            let shift: u32 = bits * count as u32;
            if shift >= 64 {
                return (0, u64::MAX);
            }
            let lower: u64 = value << shift;
            (lower, lower | !(u64::MAX << shift))
        }
        None => {
            let factor: u64 = POW10[count.min(19)];
            let lower: u64 = value.saturating_mul(factor);
            (lower, lower.saturating_add(factor - 1))
        }
    }
}

/* -------------------------------------------------------------------------- */

/// Decode exactly 20 base-85 characters starting at `start` of `s`.
pub(crate) fn parse_base85(input: &str, start: usize) -> Result<u128, AddressStringError> {
    let bytes: &[u8] = input.as_bytes();
    let digits: &[u8] = bytes
        .get(start..start + BASE85_DIGITS)
        .ok_or_else(|| AddressStringError::new(input, KEY_TOO_FEW_DIGITS))?;

    let mut value: u128 = 0;
    for (n, chunk) in digits.chunks(BASE85_CHUNK).enumerate() {
        let mut part: u64 = 0;
        for (i, c) in chunk.iter().enumerate() {
            let d: u8 = CharClass::base85(*c).ok_or_else(|| {
                AddressStringError::at(input, KEY_INVALID_CHAR, start + n * BASE85_CHUNK + i)
            })?;
            part = part * 85 + d as u64;
        }
        value = value
            .checked_mul(POW85[chunk.len()] as u128)
            .and_then(|v| v.checked_add(part as u128))
            .ok_or_else(|| AddressStringError::new(input, KEY_ADDRESS_TOO_LARGE))?;
    }
    Ok(value)
}

/**
Decode an RFC 1924 base-85 IPv6 address string.

```
use addrstr::{base85_decode, base85_encode};

let v: u128 = base85_decode("4)+k&C#VzJ4br>0wv%Yp").unwrap();
assert_eq!(v, 0x1080_0000_0000_0000_0008_0800_200c_417a);
assert_eq!(base85_encode(v), "4)+k&C#VzJ4br>0wv%Yp");
```
*/
pub fn base85_decode(s: &str) -> Result<u128, AddressStringError> {
    if s.len() != BASE85_DIGITS {
        return Err(AddressStringError::new(s, KEY_TOO_FEW_DIGITS));
    }
    parse_base85(s, 0)
}

/// Encode a 128-bit value as 20 base-85 characters.
pub fn base85_encode(value: u128) -> String {
    let mut out: [u8; BASE85_DIGITS] = [b'0'; BASE85_DIGITS];
    let mut v: u128 = value;
    for slot in out.iter_mut().rev() {
        *slot = BASE85_ALPHABET[(v % 85) as usize];
        v /= 85;
    }
    out.iter().map(|c| *c as char).collect()
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const RFC1924_STR: &str = "4)+k&C#VzJ4br>0wv%Yp";
    const RFC1924_VAL: u128 = 0x1080_0000_0000_0000_0008_0800_200c_417a;

    #[test]
    fn test_switch_values() {
        assert_eq!(switch_value2(0x1011, 4), Ok(0b1011));
        assert_eq!(switch_value8(0x377, 3), Ok(0o377));
        assert_eq!(switch_value10(0x255, 3), Ok(255));
        assert_eq!(switch_value(0xff, 16, 2), Ok(0xff));
    }

    #[test]
    fn test_invalid_digits() {
        assert_eq!(switch_value2(0x12, 2), Err(KEY_INVALID_BINARY));
        assert_eq!(switch_value8(0x8, 1), Err(KEY_INVALID_OCTAL));
        assert_eq!(switch_value10(0x1a, 2), Err(KEY_INVALID_DECIMAL));
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits(b"11111111111111111111", 2), Ok(0xfffff));
        assert_eq!(parse_digits(b"ffffffffffffffffffffffffffffffff", 16), Ok(u128::MAX));
        assert_eq!(parse_digits(b"12", 2), Err(KEY_INVALID_BINARY));
        assert_eq!(parse_digits(b"1ffffffffffffffffffffffffffffffff", 16), Err(KEY_ADDRESS_TOO_LARGE));
    }

    #[test]
    fn test_single_wildcard_expansion() {
        assert_eq!(expand_single_wildcard(1, 10, 2), (100, 199));
        assert_eq!(expand_single_wildcard(0xa, 16, 1), (0xa0, 0xaf));
        assert_eq!(expand_single_wildcard(1, 8, 1), (0o10, 0o17));
        assert_eq!(expand_single_wildcard(1, 2, 3), (0b1000, 0b1111));
        assert_eq!(expand_single_wildcard(0, 10, 3), (0, 999));
    }

    #[test]
    fn test_base85_rfc1924() {
        assert_eq!(base85_decode(RFC1924_STR), Ok(RFC1924_VAL));
        assert_eq!(base85_encode(RFC1924_VAL), RFC1924_STR);
    }

    #[test]
    fn test_base85_limits() {
        assert_eq!(base85_decode("00000000000000000000"), Ok(0));
        assert_eq!(base85_decode(&base85_encode(u128::MAX)), Ok(u128::MAX));
        let err = base85_decode("~~~~~~~~~~~~~~~~~~~~").unwrap_err();
        assert_eq!(err.key(), KEY_ADDRESS_TOO_LARGE);
        let err = base85_decode("0000000000000000000.").unwrap_err();
        assert_eq!(err.index(), Some(19));
    }
}
