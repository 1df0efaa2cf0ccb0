//! Feature subset enumeration.
//!
//! Subsets of a given size are produced in lexicographic order, so the
//! enumeration order is stable across runs and machines. Each yielded
//! `FeatureSubset` is an independent value; the iterator keeps its own cursor
//! and nothing is shared between iterators.

use crate::domain::FeatureSubset;
use crate::error::{Result, SearchError};

/// Iterator over every `k`-subset of `{0, .., n-1}` in lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    cursor: Option<Vec<usize>>,
}

/// Enumerate every strictly increasing `k`-length index list drawn from `[0, n)`.
///
/// `k > n` yields nothing. `n == 0` or `k == 0` is rejected.
pub fn combinations(n: usize, k: usize) -> Result<Combinations> {
    if n == 0 || k == 0 {
        return Err(SearchError::InvalidArgument { n, k });
    }
    let cursor = (k <= n).then(|| (0..k).collect());
    Ok(Combinations { n, cursor })
}

impl Iterator for Combinations {
    type Item = FeatureSubset;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        self.cursor = successor(&current, self.n);
        Some(FeatureSubset::from_sorted(current))
    }
}

/// Next subset after `current`, or `None` once the last one (`[n-k, .., n-1]`) is reached.
fn successor(current: &[usize], n: usize) -> Option<Vec<usize>> {
    let k = current.len();
    // Rightmost position that can still be bumped.
    let i = (0..k).rev().find(|&i| current[i] < n - k + i)?;

    let mut next = current.to_vec();
    next[i] += 1;
    for j in (i + 1)..k {
        next[j] = next[j - 1] + 1;
    }
    Some(next)
}

/// `C(n, k)`, saturating at `usize::MAX`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // Exact at every step: acc * (n - i) is divisible by (i + 1).
        let Some(scaled) = acc.checked_mul((n - i) as u128) else {
            return usize::MAX;
        };
        acc = scaled / (i + 1) as u128;
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}
