//! Append-only bijection between monomials and matrix indices.
//!
//! A `BasisIndex` is created fresh for each `(n, p)` computation and owned by
//! the resulting operator; it is never shared across computations with
//! different `n`. The initial population enumerates every monomial of degree
//! <= 3 over `{0..n}` in a fixed deterministic order (degree 3, then 2, then
//! 1, then the constant), so the first `r = C(n,3) + C(n,2) + n + 1` indices
//! always mean the same thing for a given `n`. Monomials of higher degree
//! discovered during operator construction are appended with fresh indices;
//! an index, once assigned, is immutable and never reused.

use crate::monomial::Monomial;
use itertools::Itertools;
use std::collections::HashMap;

/// Bijective monomial <-> index map, extensible at the end only.
#[derive(Debug, Clone)]
pub struct BasisIndex {
    monomials: Vec<Monomial>,
    index: HashMap<Monomial, usize>,
    initial_len: usize,
}

impl BasisIndex {
    /// Enumerate all degree-<=3 monomials over `n` variables in the canonical
    /// order: triples `i<j<k`, pairs `i<j`, singletons, constant.
    pub fn populate(n: u32) -> Self {
        let mut monomials = Vec::new();
        for degree in [3usize, 2, 1] {
            for combo in (0..n).combinations(degree) {
                // combinations() yields sorted, distinct indices.
                monomials.push(
                    Monomial::new(&combo).expect("combinations are duplicate-free"),
                );
            }
        }
        monomials.push(Monomial::one());

        let index = monomials
            .iter()
            .enumerate()
            .map(|(i, m)| (m.clone(), i))
            .collect();
        let initial_len = monomials.len();
        BasisIndex {
            monomials,
            index,
            initial_len,
        }
    }

    /// Index of a monomial, appending it with the next free index if unseen.
    pub fn extend(&mut self, m: &Monomial) -> usize {
        if let Some(&i) = self.index.get(m) {
            return i;
        }
        let i = self.monomials.len();
        self.monomials.push(m.clone());
        self.index.insert(m.clone(), i);
        i
    }

    /// Index of a monomial already in the map.
    pub fn index_of(&self, m: &Monomial) -> Option<usize> {
        self.index.get(m).copied()
    }

    /// Monomial at a previously assigned index.
    pub fn monomial_at(&self, index: usize) -> &Monomial {
        &self.monomials[index]
    }

    /// Total number of indexed monomials (the ambient dimension).
    pub fn len(&self) -> usize {
        self.monomials.len()
    }

    /// Whether no monomial has been indexed. Always false after `populate`.
    pub fn is_empty(&self) -> bool {
        self.monomials.is_empty()
    }

    /// Size of the initial degree-<=3 population, `r`.
    pub fn initial_len(&self) -> usize {
        self.initial_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_count_n5() {
        // C(5,3) + C(5,2) + 5 + 1 = 10 + 10 + 5 + 1
        let basis = BasisIndex::populate(5);
        assert_eq!(basis.initial_len(), 26);
        assert_eq!(basis.len(), 26);
    }

    #[test]
    fn test_population_order() {
        let basis = BasisIndex::populate(4);
        // Degree-3 monomials come first, the constant last.
        assert_eq!(basis.monomial_at(0).degree(), 3);
        assert_eq!(basis.monomial_at(basis.initial_len() - 1).degree(), 0);
        let degrees: Vec<usize> = (0..basis.len())
            .map(|i| basis.monomial_at(i).degree())
            .collect();
        let mut sorted = degrees.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(degrees, sorted);
    }

    #[test]
    fn test_bijectivity() {
        let mut basis = BasisIndex::populate(4);
        let quartic = Monomial::new(&[0, 1, 2, 3]).unwrap();
        let i = basis.extend(&quartic);
        assert_eq!(i, basis.len() - 1);
        for idx in 0..basis.len() {
            assert_eq!(basis.index_of(basis.monomial_at(idx)), Some(idx));
        }
    }

    #[test]
    fn test_extend_is_stable() {
        let mut basis = BasisIndex::populate(4);
        let quartic = Monomial::new(&[0, 1, 2, 3]).unwrap();
        let first = basis.extend(&quartic);
        let again = basis.extend(&quartic);
        assert_eq!(first, again);
        assert_eq!(basis.len(), basis.initial_len() + 1);
    }
}
