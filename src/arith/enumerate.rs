// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lazy enumeration of the individual values of a range, one division at a
//! time, without materializing the whole range.

use super::{
    division::{width_mask, Division},
    grouping::Grouping,
};

/// How one division position advances.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Shape {
    /// bounds agree here and everywhere before: yields one value
    Fixed,
    /// first position where the bounds diverge: lower to upper
    FirstDiffering,
    /// after the first divergence: the whole domain, except on the first
    /// pass (starts at the lower bound) and the final pass (stops at the
    /// upper bound)
    Wrapping,
}

/**
Every value between a lower and an upper bound, in ascending order.

The first pass through the later positions starts from the lower bound's
values; each subsequent pass covers the whole domain of the position until
the final pass, which stops at the upper bound's value. Whether a pass is the
final one is tracked per position in `final_pass`: position `i` is on its
final pass when positions `..=i` all hold the upper bound's values.
*/
#[derive(Clone, Debug)]
pub struct RangeEnumerator {
    bits: Vec<u32>,
    shapes: Vec<Shape>,
    upper: Vec<u128>,
    current: Vec<u128>,
    final_pass: Vec<bool>,
    done: bool,
}

impl RangeEnumerator {
    /// Values from the lowest to the highest of a sequential grouping.
    pub fn new(grouping: &Grouping) -> Self {
        Self::between(&grouping.lower(), &grouping.upper())
    }

    /**
    Values from `lower` to `upper`. Both must have the same division widths;
    only their lowest and highest values are used respectively. Yields
    nothing if `lower` is above `upper` or the layouts differ.
    */
    pub fn between(lower: &Grouping, upper: &Grouping) -> Self {
        let bits: Vec<u32> = lower.divisions().iter().map(|d| d.bit_count()).collect();
        let same_layout: bool =
            bits.iter().copied().eq(upper.divisions().iter().map(|d| d.bit_count()));
        let current: Vec<u128> = lower.divisions().iter().map(|d| d.value()).collect();
        let upper: Vec<u128> = upper.divisions().iter().map(|d| d.upper_value()).collect();

        let first_diff: Option<usize> = current.iter().zip(&upper).position(|(l, u)| l != u);
        let shapes: Vec<Shape> = (0..bits.len())
            .map(|i| match first_diff {
                Some(d) if i == d => Shape::FirstDiffering,
                Some(d) if i > d => Shape::Wrapping,
                _ => Shape::Fixed,
            })
            .collect();
        let reversed: bool = first_diff.is_some_and(|d| current[d] > upper[d]);

        let mut e = RangeEnumerator {
            final_pass: vec![false; bits.len()],
            bits,
            shapes,
            upper,
            current,
            done: !same_layout || reversed,
        };
        for i in 0..e.current.len() {
            e.refresh_final(i);
        }
        e
    }

    #[inline]
    fn prior_final(&self, i: usize) -> bool {
        i == 0 || self.final_pass[i - 1]
    }

    #[inline]
    fn refresh_final(&mut self, i: usize) {
        self.final_pass[i] = self.prior_final(i) && self.current[i] == self.upper[i];
    }

    fn value(&self) -> Grouping {
        self.current.iter().zip(&self.bits).map(|(&v, &bits)| Division::single(v, bits)).collect()
    }

    fn advance(&mut self) {
        for i in (0..self.current.len()).rev() {
            let limit: u128 = match self.shapes[i] {
                Shape::Fixed => break,
                Shape::FirstDiffering => self.upper[i],
                Shape::Wrapping if self.prior_final(i) => self.upper[i],
                Shape::Wrapping => width_mask(self.bits[i]),
            };
            if self.current[i] < limit {
                self.current[i] += 1;
                self.refresh_final(i);
                for j in i + 1..self.current.len() {
                    self.current[j] = 0;
                    self.refresh_final(j);
                }
                return;
            }
        }
        self.done = true;
    }
}

impl Iterator for RangeEnumerator {
    type Item = Grouping;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let value: Grouping = self.value();
        self.advance();
        Some(value)
    }
}

/* ---------------------------------- */

/**
The cartesian product of the divisions' ranges, for groupings that are not
sequential (e.g. `1-2.3-4.0.0`). Each position runs from its own lower to its
own upper value and resets to its lower value on carry.
*/
#[derive(Clone, Debug)]
pub struct SubnetEnumerator {
    divisions: Vec<Division>,
    current: Vec<u128>,
    done: bool,
}

impl SubnetEnumerator {
    pub fn new(grouping: &Grouping) -> Self {
        let divisions: Vec<Division> = grouping.divisions().to_vec();
        let current: Vec<u128> = divisions.iter().map(|d| d.value()).collect();
        SubnetEnumerator { divisions, current, done: false }
    }

    fn advance(&mut self) {
        for (i, d) in self.divisions.iter().enumerate().rev() {
            if self.current[i] < d.upper_value() {
                self.current[i] += 1;
                return;
            }
            self.current[i] = d.value();
        }
        self.done = true;
    }
}

impl Iterator for SubnetEnumerator {
    type Item = Grouping;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let value: Grouping = self
            .current
            .iter()
            .zip(&self.divisions)
            .map(|(&v, d)| Division::single(v, d.bit_count()))
            .collect();
        self.advance();
        Some(value)
    }
}

/* ---------------------------------- */

/// Either enumerator, picked by whether the grouping is sequential.
#[derive(Clone, Debug)]
pub enum GroupingIter {
    Range(RangeEnumerator),
    Subnet(SubnetEnumerator),
}

impl Iterator for GroupingIter {
    type Item = Grouping;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            GroupingIter::Range(it) => it.next(),
            GroupingIter::Subnet(it) => it.next(),
        }
    }
}

impl Grouping {
    /// Every individual value, ascending.
    pub fn iter(&self) -> GroupingIter {
        if self.is_sequential() {
            GroupingIter::Range(RangeEnumerator::new(self))
        } else {
            GroupingIter::Subnet(SubnetEnumerator::new(self))
        }
    }
}

impl IntoIterator for &Grouping {
    type Item = Grouping;
    type IntoIter = GroupingIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn octets(ranges: &[(u128, u128)]) -> Grouping {
        ranges.iter().map(|&(lo, hi)| Division::new(lo, hi, 8)).collect()
    }

    fn addr(b: [u8; 4]) -> Grouping {
        b.iter().map(|&v| Division::single(v as u128, 8)).collect()
    }

    fn values<I: Iterator<Item = Grouping>>(it: I) -> Vec<u128> {
        it.map(|g| g.value()).collect()
    }

    #[test]
    fn test_single_value() {
        let g = addr([1, 2, 3, 4]);
        assert_eq!(values(RangeEnumerator::new(&g)), vec![0x0102_0304]);
    }

    #[test]
    fn test_first_differing() {
        let g = octets(&[(1, 1), (2, 2), (3, 3), (250, 253)]);
        assert_eq!(values(g.iter()), vec![0x0102_03fa, 0x0102_03fb, 0x0102_03fc, 0x0102_03fd]);
    }

    #[test]
    fn test_wraparound_between_bounds() {
        let lower = addr([10, 0, 0, 254]);
        let upper = addr([10, 0, 2, 1]);
        let got = values(RangeEnumerator::between(&lower, &upper));
        assert_eq!(got.len(), 2 + 256 + 2);
        assert_eq!(got[0], 0x0a00_00fe);
        assert_eq!(got[1], 0x0a00_00ff);
        assert_eq!(got[2], 0x0a00_0100);
        assert_eq!(got[257], 0x0a00_01ff);
        assert_eq!(got[258], 0x0a00_0200);
        assert_eq!(*got.last().unwrap(), 0x0a00_0201);
        assert!(got.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_sequential_grouping_matches_count() {
        let g = octets(&[(10, 10), (1, 2), (0, 255), (0, 255)]);
        assert!(g.is_sequential());
        let mut it = g.iter();
        assert!(matches!(it, GroupingIter::Range(_)));
        assert_eq!(it.by_ref().count() as u128, g.count());
    }

    #[test]
    fn test_reversed_or_mismatched_bounds() {
        assert_eq!(RangeEnumerator::between(&addr([1, 0, 0, 2]), &addr([1, 0, 0, 1])).count(), 0);
        let v6: Grouping = (0..8).map(|_| Division::single(0, 16)).collect();
        assert_eq!(RangeEnumerator::between(&addr([0; 4]), &v6).count(), 0);
    }

    #[test]
    fn test_restartable() {
        let g = octets(&[(1, 1), (1, 1), (1, 1), (1, 3)]);
        let first = values(g.iter());
        let second = values((&g).into_iter());
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_subnet_product() {
        let g = octets(&[(1, 2), (3, 4), (0, 0), (0, 0)]);
        assert!(!g.is_sequential());
        let got = values(g.iter());
        assert_eq!(got, vec![0x0103_0000, 0x0104_0000, 0x0203_0000, 0x0204_0000]);
    }

    #[test]
    fn test_ipv6_full_last_segment() {
        let mut divs: Vec<Division> = (0..7).map(|_| Division::single(0, 16)).collect();
        divs.push(Division::new(0xfffe, 0xffff, 16));
        let g: Grouping = divs.into_iter().collect();
        assert_eq!(values(g.iter()), vec![0xfffe, 0xffff]);
    }
}
