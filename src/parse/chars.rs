// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use lazy_static::lazy_static;

/// Marks a byte that is not a digit in the alphabet.
const NONE: u8 = 0xff;

/// Base-85 alphabet (RFC 1924), in digit value order.
pub(crate) static BASE85_ALPHABET: &[u8; 85] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{|}~";

lazy_static! {
    /// 36-symbol alphabet: `0-9`, then `a-z` (case-insensitive) for 10..=35.
    static ref CANONICAL: [u8; 256] = {
        let mut t: [u8; 256] = [NONE; 256];
        for c in b'0'..=b'9' {
            t[c as usize] = c - b'0';
        }
        for c in b'a'..=b'z' {
            t[c as usize] = c - b'a' + 10;
            t[c.to_ascii_uppercase() as usize] = c - b'a' + 10;
        }
        t
    };

    static ref EXTENDED: [u8; 256] = {
        let mut t: [u8; 256] = [NONE; 256];
        for (i, c) in BASE85_ALPHABET.iter().enumerate() {
            t[*c as usize] = i as u8;
        }
        t
    };

    /// `10^n` for every `n` that fits a u64.
    pub(crate) static ref POW10: [u64; 20] = {
        let mut t: [u64; 20] = [1; 20];
        for i in 1..20 {
            t[i] = t[i - 1] * 10;
        }
        t
    };

    /// `85^n` for `n` in `0..=9`; a 9-digit base-85 chunk fits comfortably in a u64.
    pub(crate) static ref POW85: [u64; 10] = {
        let mut t: [u64; 10] = [1; 10];
        for i in 1..10 {
            t[i] = t[i - 1] * 85;
        }
        t
    };
}

/**
Constant-time byte classification for the two digit alphabets used by
address strings.

```
use addrstr::CharClass;

assert_eq!(CharClass::digit(b'F'), Some(15));
assert_eq!(CharClass::base85(b'~'), Some(84));
assert_eq!(CharClass::digit(b'.'), None);
```
*/
#[derive(Clone, Copy, Debug)]
pub struct CharClass;

impl CharClass {
    /// Value of `c` in the 36-symbol canonical alphabet.
    #[inline]
    pub fn digit(c: u8) -> Option<u8> {
        match CANONICAL[c as usize] {
            NONE => None,
            v => Some(v),
        }
    }

    /// Value of `c` in the 85-symbol extended alphabet.
    #[inline]
    pub fn base85(c: u8) -> Option<u8> {
        match EXTENDED[c as usize] {
            NONE => None,
            v => Some(v),
        }
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table() {
        assert_eq!(CharClass::digit(b'0'), Some(0));
        assert_eq!(CharClass::digit(b'9'), Some(9));
        assert_eq!(CharClass::digit(b'a'), Some(10));
        assert_eq!(CharClass::digit(b'Z'), Some(35));
        assert_eq!(CharClass::digit(b'.'), None);
        assert_eq!(CharClass::digit(0xc2), None);
    }

    #[test]
    fn test_extended_table() {
        assert_eq!(CharClass::base85(b'A'), Some(10));
        assert_eq!(CharClass::base85(b'a'), Some(36));
        assert_eq!(CharClass::base85(b'!'), Some(62));
        assert_eq!(CharClass::base85(b'.'), None);
        assert_eq!(CharClass::base85(b':'), None);
        assert_eq!(CharClass::base85(b'~'), Some(84));
    }

    #[test]
    fn test_power_tables() {
        assert_eq!(POW10[19], 10_000_000_000_000_000_000);
        assert_eq!(POW85[9], 231_616_946_283_203_125);
    }
}
