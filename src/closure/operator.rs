//! Construction of the multiplication operator and degree projector.
//!
//! For a fixed polynomial `p`, the operator `A` describes multiplication by
//! `p` as a linear map from the degree-<=3 basis into the ambient monomial
//! space: `A[row, col] = 1` iff the monomial at `row` appears in the fully
//! reduced product `p * {b}`, where `b` is the basis monomial at `col`.
//! The projector `P` is diagonal and selects the degree->=4 coordinates.

use crate::basis::BasisIndex;
use crate::error::Error;
use crate::gf2::Gf2Matrix;
use crate::monomial::Monomial;
use crate::poly::Poly;
use log::debug;

/// Monomials of degree 4 and above are the ones closure must suppress.
pub const DEGREE_CAP: usize = 3;

/// The operator pair `(A, P)` together with the basis that indexes them.
#[derive(Debug, Clone)]
pub struct MulOperator {
    /// Multiplication-by-`p` matrix, `ambient_dim x basis_len`.
    pub matrix: Gf2Matrix,
    /// Diagonal projector onto degree->=4 coordinates, `ambient_dim x ambient_dim`.
    pub projector: Gf2Matrix,
    /// Monomial <-> index bijection, frozen after construction.
    pub basis: BasisIndex,
}

impl MulOperator {
    /// Number of degree-<=3 basis columns, `r`.
    pub fn basis_len(&self) -> usize {
        self.basis.initial_len()
    }

    /// Total number of indexed monomials.
    pub fn ambient_dim(&self) -> usize {
        self.basis.len()
    }

    /// Build `(A, P)` for multiplication by `p` over `n` variables.
    ///
    /// Each column is the indicator of the full polynomial product
    /// `p * {b}`. Multiplying `p`'s terms against `b` one by one and
    /// collecting the results without cancellation would be wrong: distinct
    /// terms of `p` can map to the same product monomial, and those
    /// collisions must cancel mod 2 before the column is recorded.
    pub fn build(n: u32, p: &Poly) -> Result<Self, Error> {
        if let Some(max) = p.max_var() {
            if max >= n {
                return Err(Error::VariableOutOfRange { index: max, n });
            }
        }

        let mut basis = BasisIndex::populate(n);
        let r = basis.initial_len();
        let mut entries: Vec<(usize, usize)> = Vec::new();

        for col in 0..r {
            let b = Poly::from_monomial(basis.monomial_at(col).clone());
            let result = p.multiply(&b);
            for m in result.terms() {
                let row = basis.extend(m);
                entries.push((row, col));
            }
        }

        let ambient = basis.len();
        debug!(
            "operator for n={}: {} basis columns, ambient dim {}, {} entries",
            n,
            r,
            ambient,
            entries.len()
        );

        let matrix = Gf2Matrix::from_entries(ambient, r, entries);
        let high_degree: Vec<bool> = (0..ambient)
            .map(|i| basis.monomial_at(i).degree() > DEGREE_CAP)
            .collect();
        let projector = Gf2Matrix::diagonal(&high_degree);

        Ok(MulOperator {
            matrix,
            projector,
            basis,
        })
    }

    /// Decode an indicator vector over basis indices into a polynomial.
    pub fn decode(&self, indices: impl IntoIterator<Item = usize>) -> Poly {
        Poly::from_monomials(
            indices
                .into_iter()
                .map(|i| self.basis.monomial_at(i).clone())
                .collect(),
        )
    }

    /// The basis monomial at a column index.
    pub fn column_monomial(&self, col: usize) -> &Monomial {
        self.basis.monomial_at(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pair_operator_shape() {
        let p = Poly::from_pairs(&[(0, 1)]).unwrap();
        let op = MulOperator::build(5, &p).unwrap();
        assert_eq!(op.basis_len(), 26);
        // Products of x0x1 with the degree-3 basis discover three degree-4
        // monomials x0x1x_ax_b (a, b in {2,3,4}) and x0x1x2x3x4.
        assert_eq!(op.ambient_dim(), 30);
    }

    #[test]
    fn test_columns_match_full_product() {
        let p = Poly::from_pairs(&[(0, 1), (1, 2), (2, 3), (1, 3)]).unwrap();
        let op = MulOperator::build(4, &p).unwrap();
        for col in 0..op.basis_len() {
            let b = Poly::from_monomial(op.column_monomial(col).clone());
            let expected = p.multiply(&b);
            let mut got: Vec<&Monomial> = (0..op.ambient_dim())
                .filter(|&row| op.matrix.get(row, col))
                .map(|row| op.basis.monomial_at(row))
                .collect();
            got.sort();
            assert_eq!(got, expected.terms().iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_cross_term_cancellation_in_column() {
        // p = x0x1 + x1x2 + x2x3 + x1x3 against b = x0x1x2: every term
        // multiplies to x0x1x2 or x0x1x2x3, each an even number of times,
        // so the whole column is zero.
        let p = Poly::from_pairs(&[(0, 1), (1, 2), (2, 3), (1, 3)]).unwrap();
        let op = MulOperator::build(4, &p).unwrap();
        let b = Monomial::new(&[0, 1, 2]).unwrap();
        let col = op.basis.index_of(&b).unwrap();
        for row in 0..op.ambient_dim() {
            assert!(!op.matrix.get(row, col));
        }
    }

    #[test]
    fn test_projector_selects_high_degree() {
        let p = Poly::from_pairs(&[(0, 1)]).unwrap();
        let op = MulOperator::build(5, &p).unwrap();
        for i in 0..op.ambient_dim() {
            let high = op.basis.monomial_at(i).degree() > DEGREE_CAP;
            assert_eq!(op.projector.get(i, i), high);
        }
    }

    #[test]
    fn test_out_of_range_variable_rejected() {
        let p = Poly::from_pairs(&[(0, 7)]).unwrap();
        assert!(matches!(
            MulOperator::build(5, &p),
            Err(Error::VariableOutOfRange { index: 7, n: 5 })
        ));
    }
}
