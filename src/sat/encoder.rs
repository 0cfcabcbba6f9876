//! CNF encoding of the degree-<4 product property for quadratic pairs.
//!
//! Both slots range over quadratic polynomials given by their pair sets. One
//! coefficient variable exists per pair `i < j` per slot; one auxiliary
//! variable per `(p-pair, q-pair)` combination is Tseitin-constrained to
//! equal the conjunction of the two coefficients. Auxiliaries are grouped by
//! their product monomial (the union of the two pairs); for every product of
//! degree exactly 4, the mod-2 sum of its contributing auxiliaries is forced
//! to zero, which is precisely the statement that the degree-4 monomial
//! cancels in `p * q`.
//!
//! The parity constraint is encoded directly: one blocking clause per
//! odd-weight assignment of the contributing set, `2^(k-1)` clauses for a set
//! of size `k`. Disjoint pair unions always have six contributors, so this
//! stays at 32 clauses per degree-4 monomial; a chained XOR gadget would be
//! needed before pushing `k` higher.

use super::{Clause, CnfLit, Slot, VarKey, VarPool};
use crate::monomial::Monomial;
use itertools::Itertools;
use std::collections::BTreeMap;

/// The encoded formula for one `n`, with its variable pool.
#[derive(Debug, Clone)]
pub struct PairFormula {
    /// Number of boolean variables in each slot's polynomial.
    pub n: u32,
    /// All pairs `(i, j)`, `i < j < n`, in lexicographic order.
    pub pairs: Vec<(u32, u32)>,
    /// The clause set.
    pub clauses: Vec<Clause>,
    /// Variable pool backing the clause literals.
    pub pool: VarPool,
}

/// Encode the closure property over `n` variables.
pub fn encode(n: u32) -> PairFormula {
    let pairs: Vec<(u32, u32)> = (0..n).tuple_combinations().collect();
    let mut pool = VarPool::new();
    let mut clauses: Vec<Clause> = Vec::new();

    // Coefficient variables first, p-slot then q-slot, so their numbering is
    // deterministic and dense.
    for slot in [Slot::P, Slot::Q] {
        for &pair in &pairs {
            pool.lit(VarKey::Coeff { slot, pair });
        }
    }

    // BTreeMap keeps the clause emission order deterministic.
    let mut by_product: BTreeMap<Monomial, Vec<CnfLit>> = BTreeMap::new();

    for &x in &pairs {
        for &y in &pairs {
            let cp = pool.lit(VarKey::Coeff {
                slot: Slot::P,
                pair: x,
            });
            let cq = pool.lit(VarKey::Coeff {
                slot: Slot::Q,
                pair: y,
            });
            let aux = pool.lit(VarKey::Prod {
                p_pair: x,
                q_pair: y,
            });
            // aux <-> cp AND cq
            clauses.push(vec![-cp, -cq, aux]);
            clauses.push(vec![-aux, cp]);
            clauses.push(vec![-aux, cq]);

            let product = Monomial::pair(x.0, x.1)
                .expect("pair indices are distinct")
                .multiply(&Monomial::pair(y.0, y.1).expect("pair indices are distinct"));
            by_product.entry(product).or_default().push(aux);
        }
    }

    for (product, contributors) in &by_product {
        if product.degree() != 4 {
            continue;
        }
        append_even_parity(&mut clauses, contributors);
    }

    PairFormula {
        n,
        pairs,
        clauses,
        pool,
    }
}

/// Force the mod-2 sum of `vars` to zero.
///
/// Emits one clause per odd-weight assignment `s`, built so that the clause
/// is falsified exactly by `s`: the literal for a member is negative where
/// `s` sets it and positive where `s` clears it.
fn append_even_parity(clauses: &mut Vec<Clause>, vars: &[CnfLit]) {
    let k = vars.len();
    for signs in 0u32..(1 << k) {
        if signs.count_ones() % 2 == 0 {
            continue;
        }
        let clause = vars
            .iter()
            .enumerate()
            .map(|(i, &v)| if signs >> i & 1 == 1 { -v } else { v })
            .collect();
        clauses.push(clause);
    }
}

impl PairFormula {
    /// Coefficient literal for a pair in a slot.
    pub fn coeff_lit(&self, slot: Slot, pair: (u32, u32)) -> CnfLit {
        self.pool
            .get(&VarKey::Coeff { slot, pair })
            .expect("coefficient variables are allocated for every pair")
    }

    /// Decode a model into the two pair sets `(p, q)`.
    pub fn decode_model(&self, model: &super::SatModel) -> (Vec<(u32, u32)>, Vec<(u32, u32)>) {
        let decode_slot = |slot| {
            self.pairs
                .iter()
                .copied()
                .filter(|&pair| model.is_true(self.coeff_lit(slot, pair)))
                .collect()
        };
        (decode_slot(Slot::P), decode_slot(Slot::Q))
    }

    /// Clause excluding the model's coefficient assignment.
    ///
    /// Blocking only the projection onto coefficient variables makes model
    /// enumeration yield each distinct `(p, q)` exactly once; the auxiliaries
    /// are functionally determined and never need blocking.
    pub fn blocking_clause(&self, model: &super::SatModel) -> Clause {
        let mut clause = Clause::with_capacity(2 * self.pairs.len());
        for slot in [Slot::P, Slot::Q] {
            for &pair in &self.pairs {
                let v = self.coeff_lit(slot, pair);
                clause.push(if model.is_true(v) { -v } else { v });
            }
        }
        clause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_counts() {
        // n = 4: 6 pairs per slot, 36 auxiliaries.
        let formula = encode(4);
        assert_eq!(formula.pairs.len(), 6);
        assert_eq!(formula.pool.num_vars(), 12 + 36);
    }

    #[test]
    fn test_clause_counts() {
        // 3 Tseitin clauses per auxiliary; one degree-4 product (x0x1x2x3)
        // with six contributors and 2^5 odd-parity blocking clauses.
        let formula = encode(4);
        assert_eq!(formula.clauses.len(), 3 * 36 + 32);
    }

    #[test]
    fn test_degree4_groups_scale() {
        // n = 5 has C(5,4) = 5 degree-4 products, each with 6 contributors.
        let formula = encode(5);
        let aux = 10 * 10;
        assert_eq!(formula.clauses.len(), 3 * aux + 5 * 32);
    }

    #[test]
    fn test_parity_clauses_block_odd_assignments() {
        let mut clauses = Vec::new();
        append_even_parity(&mut clauses, &[1, 2, 3]);
        assert_eq!(clauses.len(), 4);
        // Every assignment of {1,2,3}: check a clause is falsified exactly
        // for odd-weight assignments.
        for assignment in 0u32..8 {
            let truth = |lit: CnfLit| {
                let var = lit.unsigned_abs() - 1;
                let value = assignment >> var & 1 == 1;
                if lit > 0 {
                    value
                } else {
                    !value
                }
            };
            let blocked = clauses
                .iter()
                .any(|c| c.iter().all(|&l| !truth(l)));
            assert_eq!(blocked, assignment.count_ones() % 2 == 1);
        }
    }
}
