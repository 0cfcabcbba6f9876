//! # quadclose
//!
//! Multiplicative closure analysis for square-free polynomials over GF(2).
//!
//! Boolean polynomials live in the quotient ring where every variable is
//! idempotent (`x_i^2 = x_i`). For a fixed polynomial `p` over `n` variables,
//! this crate determines the subspace of degree-<=3 combinations `q` whose
//! product `p * q` contains no monomial of degree 4 or more, and the
//! dimension of the image of that subspace under multiplication by `p`. This
//! is the algebraic structure behind annihilator and degree-reduction
//! arguments in the algebraic analysis of stream-cipher-style combiners.
//!
//! ## What the crate computes
//!
//! Three independent views of the same closure property:
//!
//! 1. **Linear algebra** ([`closure`]): build the sparse multiplication
//!    operator `A` over a deterministic monomial basis, project onto the
//!    degree->=4 coordinates, and read the closure subspace off the kernel of
//!    `P * A`. Reports `dim_qs`, `dim_prod`, and decoded witnesses.
//! 2. **Satisfiability** ([`sat`]): encode "the product of two quadratics has
//!    no degree-4 monomial" as CNF over pair-coefficient variables, force
//!    structured matchings, and search or enumerate `(p, q)` solutions.
//! 3. **Bilinear bound** ([`bilinear`]): a local 4-index linear system whose
//!    corank bounds the rank of the quadratic form generated by `p`.
//!
//! ## Quick start
//!
//! ```ignore
//! use quadclose::{ClosureAnalysis, Poly};
//!
//! // p = x0*x1 + x1*x2 over 5 variables
//! let p = Poly::from_pairs(&[(0, 1), (1, 2)])?;
//! let analysis = ClosureAnalysis::analyze(5, &p)?;
//!
//! println!("dim_qs = {}", analysis.dim_qs());
//! println!("dim_prod = {}", analysis.dim_prod());
//! if let Some(q) = analysis.witness() {
//!     println!("p * ({}) = {}", q, p.multiply(&q));
//! }
//! ```
//!
//! SAT-side search:
//!
//! ```ignore
//! use quadclose::sat::search;
//!
//! // One solution with a forced size-1 matching over 8 variables.
//! let (p_pairs, q_pairs) = search::solve_one(8, 1)?;
//!
//! // Lazy enumeration; stop by dropping the iterator.
//! for solution in search::enumerate(8, 1)?.take(10) {
//!     let (p_pairs, q_pairs) = solution?;
//! }
//! ```
//!
//! ## Design notes
//!
//! - All state is per-computation: the monomial index map is owned by the
//!   operator it indexes and never shared across different `n`.
//! - Exact GF(2) linear algebra is behind the [`gf2::Gf2LinearAlgebra`]
//!   trait; SAT solving is behind [`sat::SatBackend`]. Both ship with a
//!   default implementation (dense Gaussian elimination, `varisat`).
//! - Everything is single-threaded and synchronous; parallel sweeps over
//!   `n` or `p` need one analysis instance each.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod basis;
pub mod bilinear;
pub mod closure;
pub mod error;
pub mod gf2;
pub mod monomial;
pub mod poly;
pub mod sat;

pub use basis::BasisIndex;
pub use bilinear::quadratic_rank_bound;
pub use closure::operator::MulOperator;
pub use closure::{ClosureAnalysis, ClosureReport};
pub use error::Error;
pub use gf2::{DenseGauss, Gf2LinearAlgebra, Gf2Matrix};
pub use monomial::Monomial;
pub use poly::Poly;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        let p = Poly::from_pairs(&[(0, 1)]).unwrap();
        let analysis = ClosureAnalysis::analyze(4, &p).unwrap();
        assert!(analysis.dim_prod() <= analysis.dim_qs());
    }

    #[test]
    fn test_version_info() {
        assert_eq!(NAME, "quadclose");
        assert!(!VERSION.is_empty());
    }
}
