//! Index-addressed permutation enumeration.
//!
//! The index is decoded in the factorial number system into a sequence of
//! swaps, so any permutation of size `n` can be produced directly from its
//! index in O(n) without recursion or state carried between calls. The
//! resulting order is deterministic but not lexicographic.

use crate::error::{CrackError, CrackResult};

/// Largest size whose factorial still fits in a `u64`.
pub const MAX_KEY_SIZE: usize = 20;

/// `n!`, or an error when it would overflow.
pub fn factorial(n: usize) -> CrackResult<u64> {
    if n > MAX_KEY_SIZE {
        return Err(CrackError::KeyRange {
            min: n,
            max: n,
            limit: MAX_KEY_SIZE,
        });
    }
    Ok((2..=n as u64).product())
}

/// Writes the `index`-th permutation of `0..key.len()` into `key`.
///
/// Every index in `1..=n!` yields a distinct permutation. Indices outside
/// that range wrap modulo `n!`.
#[inline(always)]
pub fn nth_permutation(index: u64, key: &mut [usize]) {
    for (j, slot) in key.iter_mut().enumerate() {
        *slot = j;
    }

    let mut k = index;
    for j in 2..=key.len() {
        k /= (j - 1) as u64;
        let p = (k % j as u64) as usize;
        key.swap(p, j - 1);
    }
}

/// Finite, restartable sequence of every permutation of a given size.
///
/// Items are produced in enumeration-index order, starting from index 1.
#[derive(Debug, Clone)]
pub struct Permutations {
    size: usize,
    next: u64,
    total: u64,
}

impl Permutations {
    pub fn new(size: usize) -> CrackResult<Self> {
        Ok(Self {
            size,
            next: 1,
            total: factorial(size)?,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn restart(&mut self) {
        self.next = 1;
    }

    /// Fills the first `size` slots of `key` with the next permutation,
    /// returning its index.
    ///
    /// Returns `None` once the sequence is exhausted, or without advancing
    /// when `key` is shorter than the permutation size.
    pub fn next_into(&mut self, key: &mut [usize]) -> Option<u64> {
        if self.next > self.total {
            return None;
        }
        let slots = key.get_mut(..self.size)?;
        let index = self.next;
        nth_permutation(index, slots);
        self.next += 1;
        Some(index)
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut key = vec![0; self.size];
        self.next_into(&mut key).map(|_| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total + 1).saturating_sub(self.next);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
