//! GF(2) polynomials as mod-2 sums of square-free monomials.
//!
//! A polynomial is kept in canonical form: a sorted list of pairwise distinct
//! monomials. Addition is symmetric difference. Multiplication expands the
//! full cross product of terms and then cancels equal monomials by parity;
//! a maximal run of `k` equal monomials collapses to `k mod 2` copies. Runs
//! longer than two genuinely occur (several distinct term pairs can produce
//! the same product monomial), so the reduction handles arbitrary run lengths
//! rather than cancelling pairwise.

use crate::error::Error;
use crate::monomial::Monomial;
use serde::Serialize;
use std::fmt;

/// A GF(2) polynomial in canonical sorted form.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Poly(Vec<Monomial>);

impl Poly {
    /// The zero polynomial (empty sum).
    pub fn zero() -> Self {
        Poly(Vec::new())
    }

    /// The constant polynomial `1`, the multiplicative identity.
    pub fn one() -> Self {
        Poly(vec![Monomial::one()])
    }

    /// A polynomial with a single term.
    pub fn from_monomial(m: Monomial) -> Self {
        Poly(vec![m])
    }

    /// Build a polynomial from a list of monomials, cancelling by parity.
    ///
    /// An even number of occurrences of the same monomial cancels to zero
    /// occurrences, an odd number to one.
    pub fn from_monomials(mut terms: Vec<Monomial>) -> Self {
        terms.sort_unstable();
        Poly(reduce_sorted(terms))
    }

    /// Build a quadratic polynomial from variable pairs, e.g.
    /// `[(0, 1), (1, 2)]` for `x0*x1 + x1*x2`.
    pub fn from_pairs(pairs: &[(u32, u32)]) -> Result<Self, Error> {
        let mut terms = Vec::with_capacity(pairs.len());
        for &(i, j) in pairs {
            terms.push(Monomial::pair(i, j)?);
        }
        Ok(Poly::from_monomials(terms))
    }

    /// The canonical term list, sorted and duplicate-free.
    pub fn terms(&self) -> &[Monomial] {
        &self.0
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the zero polynomial.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest term degree, or 0 for the zero polynomial.
    pub fn max_degree(&self) -> usize {
        self.0.iter().map(Monomial::degree).max().unwrap_or(0)
    }

    /// Largest variable index mentioned, if any.
    pub fn max_var(&self) -> Option<u32> {
        self.0.iter().filter_map(Monomial::max_var).max()
    }

    /// Mod-2 sum: the symmetric difference of the two term sets.
    pub fn add(&self, other: &Poly) -> Poly {
        let mut merged = Vec::with_capacity(self.0.len() + other.0.len());
        merged.extend_from_slice(&self.0);
        merged.extend_from_slice(&other.0);
        merged.sort_unstable();
        Poly(reduce_sorted(merged))
    }

    /// Product over GF(2) with idempotent variables.
    ///
    /// Expands every cross pair of terms, sorts the resulting multiset, and
    /// collapses equal runs by parity. Cost is
    /// `O(|self| * |other| * log(|self| * |other|))`.
    pub fn multiply(&self, other: &Poly) -> Poly {
        let mut products = Vec::with_capacity(self.0.len() * other.0.len());
        for a in &self.0 {
            for b in &other.0 {
                products.push(a.multiply(b));
            }
        }
        products.sort_unstable();
        Poly(reduce_sorted(products))
    }
}

/// Collapse maximal runs of equal monomials in a sorted list by parity.
fn reduce_sorted(terms: Vec<Monomial>) -> Vec<Monomial> {
    let mut out = Vec::with_capacity(terms.len());
    let mut iter = terms.into_iter().peekable();
    while let Some(m) = iter.next() {
        let mut count = 1usize;
        while iter.peek() == Some(&m) {
            iter.next();
            count += 1;
        }
        if count % 2 == 1 {
            out.push(m);
        }
    }
    out
}

impl fmt::Debug for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "0");
        }
        for (k, m) in self.0.iter().enumerate() {
            if k > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{:?}", m)?;
        }
        Ok(())
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mon(vars: &[u32]) -> Monomial {
        Monomial::new(vars).unwrap()
    }

    #[test]
    fn test_identity_element() {
        let p = Poly::from_pairs(&[(0, 1), (2, 3)]).unwrap();
        assert_eq!(p.multiply(&Poly::one()), p);
        assert_eq!(Poly::one().multiply(&p), p);
    }

    #[test]
    fn test_even_run_cancels() {
        // (x0x1 + x0)(x1) = x0x1 + x0x1 = 0
        let p = Poly::from_monomials(vec![mon(&[0, 1]), mon(&[0])]);
        let q = Poly::from_monomial(mon(&[1]));
        assert!(p.multiply(&q).is_empty());
    }

    #[test]
    fn test_odd_run_survives() {
        // (x0x1 + x0 + x1)(x0x1): all three cross terms equal x0x1,
        // a run of three collapses to a single copy.
        let p = Poly::from_monomials(vec![mon(&[0, 1]), mon(&[0]), mon(&[1])]);
        let q = Poly::from_monomial(mon(&[0, 1]));
        assert_eq!(p.multiply(&q), Poly::from_monomial(mon(&[0, 1])));
    }

    #[test]
    fn test_add_symmetric_difference() {
        let p = Poly::from_pairs(&[(0, 1), (1, 2)]).unwrap();
        let q = Poly::from_pairs(&[(1, 2), (2, 3)]).unwrap();
        let expected = Poly::from_pairs(&[(0, 1), (2, 3)]).unwrap();
        assert_eq!(p.add(&q), expected);
        assert!(p.add(&p).is_empty());
    }

    #[test]
    fn test_from_monomials_cancels_duplicates() {
        let p = Poly::from_monomials(vec![mon(&[2]), mon(&[2])]);
        assert!(p.is_empty());
        let p = Poly::from_monomials(vec![mon(&[2]), mon(&[2]), mon(&[2])]);
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_zero_annihilates() {
        let p = Poly::from_pairs(&[(0, 1)]).unwrap();
        assert!(p.multiply(&Poly::zero()).is_empty());
        assert_eq!(p.max_degree(), 2);
        assert_eq!(Poly::zero().max_degree(), 0);
    }
}
