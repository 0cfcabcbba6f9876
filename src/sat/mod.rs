//! CNF machinery and the SAT solving collaborator.
//!
//! Clauses use DIMACS-style signed integer literals: positive `v` means
//! variable `v` is true, negative means false, and variable numbering starts
//! at 1. Variable identities are managed by [`VarPool`], an injective map
//! from semantic keys (pair coefficients and Tseitin product auxiliaries) to
//! solver variables.
//!
//! Solving goes through the [`SatBackend`] trait; [`VarisatBackend`] is the
//! default implementation on top of the `varisat` solver. The backend is
//! assumed correct: the encoder never re-verifies models beyond decoding.

pub mod encoder;
pub mod search;

use crate::error::Error;
use std::collections::{HashMap, HashSet};
use varisat::{ExtendFormula, Lit};

/// A CNF literal, DIMACS-style signed integer.
pub type CnfLit = i32;

/// A disjunction of literals.
pub type Clause = Vec<CnfLit>;

/// The two polynomial slots of the pair encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The fixed-side polynomial `p`.
    P,
    /// The cofactor polynomial `q`.
    Q,
}

/// Semantic identity of a solver variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VarKey {
    /// Coefficient of the pair `x_i x_j` in one slot.
    Coeff {
        /// Which polynomial the coefficient belongs to.
        slot: Slot,
        /// The variable pair `(i, j)`, `i < j`.
        pair: (u32, u32),
    },
    /// Tseitin auxiliary equal to `coeff(P, p_pair) AND coeff(Q, q_pair)`.
    Prod {
        /// Pair taken from the p-slot.
        p_pair: (u32, u32),
        /// Pair taken from the q-slot.
        q_pair: (u32, u32),
    },
}

/// Injective pool of solver variables, keyed by [`VarKey`].
#[derive(Debug, Default, Clone)]
pub struct VarPool {
    by_key: HashMap<VarKey, CnfLit>,
    keys: Vec<VarKey>,
}

impl VarPool {
    /// An empty pool.
    pub fn new() -> Self {
        VarPool::default()
    }

    /// Positive literal for a key, allocating the next variable if unseen.
    pub fn lit(&mut self, key: VarKey) -> CnfLit {
        if let Some(&v) = self.by_key.get(&key) {
            return v;
        }
        let v = (self.keys.len() + 1) as CnfLit;
        self.keys.push(key.clone());
        self.by_key.insert(key, v);
        v
    }

    /// Positive literal for an already-allocated key.
    pub fn get(&self, key: &VarKey) -> Option<CnfLit> {
        self.by_key.get(key).copied()
    }

    /// Number of allocated variables.
    pub fn num_vars(&self) -> usize {
        self.keys.len()
    }
}

/// A satisfying assignment, as the set of true variables.
#[derive(Debug, Clone)]
pub struct SatModel {
    true_vars: HashSet<CnfLit>,
}

impl SatModel {
    /// Whether the given variable (positive DIMACS id) is true.
    pub fn is_true(&self, var: CnfLit) -> bool {
        debug_assert!(var > 0);
        self.true_vars.contains(&var)
    }
}

/// Incremental SAT solving capability.
pub trait SatBackend {
    /// Add one clause to the solver.
    fn add_clause(&mut self, clause: &[CnfLit]);

    /// Solve the clauses added so far.
    ///
    /// Returns `Ok(Some(model))` when satisfiable, `Ok(None)` when
    /// unsatisfiable, and `Err` only for solver-internal failures.
    fn solve(&mut self) -> Result<Option<SatModel>, Error>;
}

/// [`SatBackend`] implementation on top of `varisat`.
pub struct VarisatBackend {
    solver: varisat::Solver<'static>,
}

impl Default for VarisatBackend {
    fn default() -> Self {
        VarisatBackend::new()
    }
}

impl VarisatBackend {
    /// A fresh solver with no clauses.
    pub fn new() -> Self {
        VarisatBackend {
            solver: varisat::Solver::new(),
        }
    }

    /// Add a whole clause list at once.
    pub fn load(&mut self, clauses: &[Clause]) {
        for clause in clauses {
            SatBackend::add_clause(self, clause);
        }
    }
}

impl SatBackend for VarisatBackend {
    fn add_clause(&mut self, clause: &[CnfLit]) {
        let lits: Vec<Lit> = clause
            .iter()
            .map(|&l| Lit::from_dimacs(l as isize))
            .collect();
        self.solver.add_clause(&lits);
    }

    fn solve(&mut self) -> Result<Option<SatModel>, Error> {
        match self.solver.solve() {
            Ok(true) => {
                let model = self.solver.model().ok_or_else(|| Error::Solver {
                    message: "solver reported sat but produced no model".into(),
                })?;
                let true_vars = model
                    .iter()
                    .filter(|l| l.is_positive())
                    .map(|l| l.to_dimacs() as CnfLit)
                    .collect();
                Ok(Some(SatModel { true_vars }))
            }
            Ok(false) => Ok(None),
            Err(e) => Err(Error::Solver {
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_is_injective_and_stable() {
        let mut pool = VarPool::new();
        let a = pool.lit(VarKey::Coeff {
            slot: Slot::P,
            pair: (0, 1),
        });
        let b = pool.lit(VarKey::Coeff {
            slot: Slot::Q,
            pair: (0, 1),
        });
        assert_ne!(a, b);
        let again = pool.lit(VarKey::Coeff {
            slot: Slot::P,
            pair: (0, 1),
        });
        assert_eq!(a, again);
        assert_eq!(pool.num_vars(), 2);
    }

    #[test]
    fn test_backend_sat_and_unsat() {
        let mut backend = VarisatBackend::new();
        backend.add_clause(&[1, 2]);
        backend.add_clause(&[-1]);
        let model = backend.solve().unwrap().expect("satisfiable");
        assert!(model.is_true(2));
        assert!(!model.is_true(1));

        backend.add_clause(&[-2]);
        assert!(backend.solve().unwrap().is_none());
    }
}
