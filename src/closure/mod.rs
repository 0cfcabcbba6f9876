//! Closure subspace analysis for multiplication by a fixed polynomial.
//!
//! For `p` over `n` boolean variables, consider all polynomials `q` spanned
//! by the degree-<=3 basis whose product `p * q` contains no monomial of
//! degree 4 or more. With `A` the multiplication operator and `P` the
//! degree->=4 projector, that subspace is exactly the right kernel of
//! `M = P * A`. This module computes a kernel basis, the two dimensions of
//! interest, and decodes kernel vectors back into concrete witness
//! polynomials:
//!
//! - `dim_qs`: dimension of the closure subspace itself;
//! - `dim_prod`: dimension of its image under multiplication by `p`,
//!   i.e. the space of attainable degree-<=3 products.
//!
//! Numeric linear algebra is delegated to a [`Gf2LinearAlgebra`] backend;
//! the analysis itself never eliminates a matrix by hand.

pub mod operator;

use crate::error::Error;
use crate::gf2::{DenseGauss, Gf2LinearAlgebra, Gf2Matrix};
use crate::poly::Poly;
use log::info;
use operator::{MulOperator, DEGREE_CAP};
use serde::Serialize;

/// Result of a closure analysis for one `(n, p)`.
#[derive(Debug)]
pub struct ClosureAnalysis {
    n: u32,
    p: Poly,
    operator: MulOperator,
    kernel: Gf2Matrix,
    dim_prod: usize,
}

impl ClosureAnalysis {
    /// Analyze `(n, p)` with the default dense GF(2) backend.
    pub fn analyze(n: u32, p: &Poly) -> Result<Self, Error> {
        Self::analyze_with(n, p, &DenseGauss)
    }

    /// Analyze `(n, p)` with an explicit linear-algebra backend.
    pub fn analyze_with<L: Gf2LinearAlgebra>(
        n: u32,
        p: &Poly,
        linalg: &L,
    ) -> Result<Self, Error> {
        let operator = MulOperator::build(n, p)?;
        let m = linalg.multiply(&operator.projector, &operator.matrix);
        let kernel = linalg.kernel_basis(&m);

        // A returned basis must be linearly independent; anything else means
        // the backend broke its contract.
        if linalg.rank(&kernel) != kernel.rows() {
            return Err(Error::Invariant {
                message: format!(
                    "kernel basis of {} rows has rank {}",
                    kernel.rows(),
                    linalg.rank(&kernel)
                ),
            });
        }

        let analysis = ClosureAnalysis {
            n,
            p: p.clone(),
            dim_prod: 0,
            operator,
            kernel,
        };

        // Defining property of the kernel: every decoded vector multiplies
        // with p to a degree-<=3 product. Checked, not assumed.
        for row in 0..analysis.kernel.rows() {
            let q = analysis.decode(row);
            let product = p.multiply(&q);
            if product.max_degree() > DEGREE_CAP {
                return Err(Error::Invariant {
                    message: format!(
                        "kernel row {} decodes to q with deg(p*q) = {}",
                        row,
                        product.max_degree()
                    ),
                });
            }
        }

        let image = linalg.multiply(
            &analysis.operator.matrix,
            &linalg.transpose(&analysis.kernel),
        );
        let dim_prod = linalg.rank(&image);
        info!(
            "closure analysis n={}: dim_qs={}, dim_prod={}",
            n,
            analysis.kernel.rows(),
            dim_prod
        );

        Ok(ClosureAnalysis { dim_prod, ..analysis })
    }

    /// Dimension of the closure subspace.
    pub fn dim_qs(&self) -> usize {
        self.kernel.rows()
    }

    /// Dimension of the image of the closure subspace under multiplication.
    pub fn dim_prod(&self) -> usize {
        self.dim_prod
    }

    /// The kernel basis, one vector per row over the degree-<=3 basis.
    pub fn kernel(&self) -> &Gf2Matrix {
        &self.kernel
    }

    /// The operator pair this analysis was computed from.
    pub fn operator(&self) -> &MulOperator {
        &self.operator
    }

    /// Decode one kernel basis vector into a polynomial.
    pub fn decode(&self, row: usize) -> Poly {
        self.operator.decode(self.kernel.row_support(row))
    }

    /// A nonzero closure witness, or `None` when `dim_qs = 0`.
    ///
    /// A zero-dimensional kernel is a valid, meaningful outcome (only the
    /// zero polynomial closes with `p`), which is why this is an `Option`
    /// rather than an unconditional first vector.
    pub fn witness(&self) -> Option<Poly> {
        (self.kernel.rows() > 0).then(|| self.decode(0))
    }

    /// Summary suitable for printing or JSON output.
    pub fn report(&self) -> ClosureReport {
        let witness = self.witness();
        let product = witness.as_ref().map(|q| self.p.multiply(q));
        ClosureReport {
            n: self.n,
            p: self.p.clone(),
            dim_qs: self.dim_qs(),
            dim_prod: self.dim_prod,
            witness,
            product,
        }
    }
}

/// Printable summary of a closure analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ClosureReport {
    /// Number of variables.
    pub n: u32,
    /// The fixed polynomial.
    pub p: Poly,
    /// Dimension of the closure subspace.
    pub dim_qs: usize,
    /// Dimension of its image under multiplication by `p`.
    pub dim_prod: usize,
    /// A decoded nonzero witness `q`, if one exists.
    pub witness: Option<Poly>,
    /// The product `p * witness` for manual verification.
    pub product: Option<Poly>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pair_dimensions() {
        let p = Poly::from_pairs(&[(0, 1)]).unwrap();
        let analysis = ClosureAnalysis::analyze(5, &p).unwrap();
        assert_eq!(analysis.dim_qs(), 22);
        assert_eq!(analysis.dim_prod(), 4);
    }

    #[test]
    fn test_zero_polynomial_closes_with_everything() {
        let analysis = ClosureAnalysis::analyze(4, &Poly::zero()).unwrap();
        assert_eq!(analysis.dim_qs(), analysis.operator().basis_len());
        assert_eq!(analysis.dim_prod(), 0);
    }

    #[test]
    fn test_witness_product_is_low_degree() {
        let p = Poly::from_pairs(&[(0, 1), (2, 3)]).unwrap();
        let analysis = ClosureAnalysis::analyze(5, &p).unwrap();
        let q = analysis.witness().expect("nonempty kernel");
        assert!(p.multiply(&q).max_degree() <= DEGREE_CAP);
    }

    #[test]
    fn test_report_round_trip() {
        let p = Poly::from_pairs(&[(0, 1)]).unwrap();
        let report = ClosureAnalysis::analyze(4, &p).unwrap().report();
        assert!(report.dim_qs >= report.dim_prod);
        if let (Some(q), Some(prod)) = (&report.witness, &report.product) {
            assert_eq!(&report.p.multiply(q), prod);
        }
    }
}
