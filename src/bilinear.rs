//! Bilinear-form rank upper bound from local 4-index relations.
//!
//! For a quadratic `p`, every 4-tuple `i < j < k < l` of variables yields a
//! local linear relation among pair-indicator unknowns: for each way of
//! designating one of the six pairs inside the tuple, if the designated pair
//! is a term of `p`, the complementary pair's unknown enters the equation.
//! The resulting sparse GF(2) system constrains any quadratic cofactor, and
//! `C(n,2) - rank` bounds the rank of the quadratic form generated by `p`
//! from above, without ever expanding a polynomial product.

use crate::error::Error;
use crate::gf2::Gf2Matrix;
use crate::poly::Poly;
use itertools::Itertools;
use std::collections::HashMap;

/// Upper bound on the rank of the quadratic form generated by `p`.
///
/// Requires `n >= 4` (no 4-tuple exists otherwise) and a homogeneous
/// quadratic `p` with all variable indices below `n`.
pub fn quadratic_rank_bound(n: u32, p: &Poly) -> Result<usize, Error> {
    if n < 4 {
        return Err(Error::TooFewVariables { n });
    }
    for term in p.terms() {
        if term.degree() != 2 {
            return Err(Error::NotQuadratic {
                degree: term.degree(),
            });
        }
    }
    if let Some(max) = p.max_var() {
        if max >= n {
            return Err(Error::VariableOutOfRange { index: max, n });
        }
    }

    let pairs: Vec<(u32, u32)> = (0..n).tuple_combinations().collect();
    let pair_col: HashMap<(u32, u32), usize> = pairs
        .iter()
        .enumerate()
        .map(|(i, &pr)| (pr, i))
        .collect();
    let in_p: std::collections::HashSet<(u32, u32)> = p
        .terms()
        .iter()
        .map(|m| (m.vars()[0], m.vars()[1]))
        .collect();

    // The six (designated pair, complementary pair) splits of 4 positions.
    let splits: Vec<((usize, usize), (usize, usize))> = (0..4usize)
        .tuple_combinations()
        .map(|(a, b)| {
            let rest: Vec<usize> = (0..4).filter(|x| *x != a && *x != b).collect();
            ((a, b), (rest[0], rest[1]))
        })
        .collect();

    let mut entries: Vec<(usize, usize)> = Vec::new();
    let mut row = 0usize;
    for tuple in (0..n).combinations(4) {
        for &((a, b), (c, d)) in &splits {
            let designated = (tuple[a], tuple[b]);
            if in_p.contains(&designated) {
                let complement = (tuple[c], tuple[d]);
                entries.push((row, pair_col[&complement]));
            }
        }
        row += 1;
    }

    let matrix = Gf2Matrix::from_entries(row, pairs.len(), entries);
    Ok(pairs.len() - matrix.rank())
}
