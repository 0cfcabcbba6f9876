//! Matching constraints and solution search over the pair encoding.
//!
//! The matching constraint pins down a structured seed: the p-slot must
//! contain the disjoint pairs `(4i, 4i+1)` and the q-slot the pairs
//! `(4i+2, 4i+3)` for `i < k`, with a symmetry-breaking clause fixing the
//! cross-slot orientation of the first matched pair. On top of that,
//! [`solve_one`] extracts a single `(p, q)` solution and [`enumerate`]
//! drives a lazy all-solutions scan through blocking clauses.

use super::encoder::{encode, PairFormula};
use super::{SatBackend, Slot, VarisatBackend};
use crate::error::Error;
use log::debug;

/// A decoded solution: the pair sets of the two slots.
pub type PairSolution = (Vec<(u32, u32)>, Vec<(u32, u32)>);

/// Encode `n` and force a size-`k` matching into both slots.
///
/// Fails with [`Error::MatchingTooLarge`] when the forced indices would not
/// fit, i.e. when `4k > n`. `k = 0` adds no constraints.
pub fn with_matching(n: u32, k: u32) -> Result<PairFormula, Error> {
    if 4 * k > n {
        return Err(Error::MatchingTooLarge { n, k });
    }
    let mut formula = encode(n);
    for i in 0..k {
        let p_pair = (4 * i, 4 * i + 1);
        let q_pair = (4 * i + 2, 4 * i + 3);
        let p_lit = formula.coeff_lit(Slot::P, p_pair);
        let q_lit = formula.coeff_lit(Slot::Q, q_pair);
        formula.clauses.push(vec![p_lit]);
        formula.clauses.push(vec![q_lit]);
    }
    if k > 0 {
        // Break the p/q exchange symmetry on the first matched pair.
        let first = (0, 1);
        let q_first = formula.coeff_lit(Slot::Q, first);
        let p_first = formula.coeff_lit(Slot::P, first);
        formula.clauses.push(vec![-q_first]);
        formula.clauses.push(vec![p_first]);
    }
    Ok(formula)
}

/// Find one `(p, q)` solution for the matching-`k` problem.
///
/// The formula is satisfiable by construction for every valid `k`; an unsat
/// answer therefore surfaces as [`Error::UnsatisfiableConstruction`] and is
/// never retried.
pub fn solve_one(n: u32, k: u32) -> Result<PairSolution, Error> {
    let formula = with_matching(n, k)?;
    let mut backend = VarisatBackend::new();
    backend.load(&formula.clauses);
    match backend.solve()? {
        Some(model) => Ok(formula.decode_model(&model)),
        None => Err(Error::UnsatisfiableConstruction { n, k }),
    }
}

/// Lazy enumeration of every `(p, q)` solution of the matching-`k` problem.
///
/// Each pull runs one solve, which may take solver-dependent time; stopping
/// early means dropping the iterator (there is no mid-solve abort). The
/// sequence is finite but can be very large. It is not restartable: a fresh
/// call to [`enumerate`] rebuilds the search from scratch.
pub fn enumerate(n: u32, k: u32) -> Result<Solutions, Error> {
    let formula = with_matching(n, k)?;
    let mut backend = VarisatBackend::new();
    backend.load(&formula.clauses);
    Ok(Solutions {
        formula,
        backend,
        count: 0,
        done: false,
    })
}

/// Iterator over all solutions, produced by repeated model extraction.
pub struct Solutions {
    formula: PairFormula,
    backend: VarisatBackend,
    count: usize,
    done: bool,
}

impl Iterator for Solutions {
    type Item = Result<PairSolution, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.backend.solve() {
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
            Ok(None) => {
                debug!("enumeration exhausted after {} solutions", self.count);
                self.done = true;
                None
            }
            Ok(Some(model)) => {
                let block = self.formula.blocking_clause(&model);
                self.backend.add_clause(&block);
                self.count += 1;
                Some(Ok(self.formula.decode_model(&model)))
            }
        }
    }
}
