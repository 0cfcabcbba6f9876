//! Dense bit-packed linear algebra over GF(2).
//!
//! The closure analysis delegates all numeric linear algebra to the
//! [`Gf2LinearAlgebra`] capability, which exposes exactly the four operations
//! the analysis needs: rank, right-kernel basis, multiply, transpose. The
//! default implementation, [`DenseGauss`], stores matrices as rows of `u64`
//! words and runs plain Gaussian elimination; at the dimensions this crate
//! works with (a few hundred rows) that is entirely sufficient. All
//! arithmetic is exact.
//!
//! The kernel routine eliminates columns while tracking coefficients, so each
//! column that reduces to zero directly yields a kernel basis vector.

use std::fmt;

const WORD_BITS: usize = 64;

fn words_for(bits: usize) -> usize {
    (bits + WORD_BITS - 1) / WORD_BITS
}

fn first_set(words: &[u64]) -> Option<usize> {
    for (w, &word) in words.iter().enumerate() {
        if word != 0 {
            return Some(w * WORD_BITS + word.trailing_zeros() as usize);
        }
    }
    None
}

fn xor_assign(target: &mut [u64], source: &[u64]) {
    debug_assert_eq!(target.len(), source.len());
    for (t, s) in target.iter_mut().zip(source) {
        *t ^= s;
    }
}

/// A dense GF(2) matrix with bit-packed rows.
#[derive(Clone, PartialEq, Eq)]
pub struct Gf2Matrix {
    rows: usize,
    cols: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Gf2Matrix {
    /// The zero matrix of the given shape.
    pub fn zero(rows: usize, cols: usize) -> Self {
        let words_per_row = words_for(cols).max(1);
        Gf2Matrix {
            rows,
            cols,
            words_per_row,
            bits: vec![0; rows * words_per_row],
        }
    }

    /// Build a matrix from sparse `(row, col)` coordinates.
    ///
    /// Coordinates are accumulated mod 2, so a coordinate listed twice
    /// cancels, matching the usual sparse-sum convention.
    pub fn from_entries<I>(rows: usize, cols: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut m = Gf2Matrix::zero(rows, cols);
        for (r, c) in entries {
            m.flip(r, c);
        }
        m
    }

    /// Diagonal matrix with `flags[i]` on the diagonal.
    pub fn diagonal(flags: &[bool]) -> Self {
        let mut m = Gf2Matrix::zero(flags.len(), flags.len());
        for (i, &on) in flags.iter().enumerate() {
            if on {
                m.set(i, i, true);
            }
        }
        m
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols);
        let word = self.bits[row * self.words_per_row + col / WORD_BITS];
        (word >> (col % WORD_BITS)) & 1 == 1
    }

    /// Set the entry at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.rows && col < self.cols);
        let word = &mut self.bits[row * self.words_per_row + col / WORD_BITS];
        let mask = 1u64 << (col % WORD_BITS);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    fn flip(&mut self, row: usize, col: usize) {
        assert!(row < self.rows && col < self.cols);
        self.bits[row * self.words_per_row + col / WORD_BITS] ^= 1u64 << (col % WORD_BITS);
    }

    fn row_words(&self, row: usize) -> &[u64] {
        &self.bits[row * self.words_per_row..(row + 1) * self.words_per_row]
    }

    /// Column indices of the set bits in a row.
    pub fn row_support(&self, row: usize) -> Vec<usize> {
        let mut out = Vec::new();
        for (w, &word) in self.row_words(row).iter().enumerate() {
            let mut bits = word;
            while bits != 0 {
                let b = bits.trailing_zeros() as usize;
                out.push(w * WORD_BITS + b);
                bits &= bits - 1;
            }
        }
        out
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> Gf2Matrix {
        let mut t = Gf2Matrix::zero(self.cols, self.rows);
        for r in 0..self.rows {
            for c in self.row_support(r) {
                t.set(c, r, true);
            }
        }
        t
    }

    /// Matrix product over GF(2). The shapes must be compatible.
    pub fn multiply(&self, rhs: &Gf2Matrix) -> Gf2Matrix {
        assert_eq!(
            self.cols, rhs.rows,
            "shape mismatch: {}x{} times {}x{}",
            self.rows, self.cols, rhs.rows, rhs.cols
        );
        let mut out = Gf2Matrix::zero(self.rows, rhs.cols);
        for r in 0..self.rows {
            for k in self.row_support(r) {
                let (dst, src) = {
                    let start = r * out.words_per_row;
                    let rhs_start = k * rhs.words_per_row;
                    (start, rhs_start)
                };
                for w in 0..out.words_per_row {
                    out.bits[dst + w] ^= rhs.bits[src + w];
                }
            }
        }
        out
    }

    /// Row-space dimension, by Gaussian elimination on a copy.
    pub fn rank(&self) -> usize {
        let mut pivots: Vec<(usize, Vec<u64>)> = Vec::new();
        for r in 0..self.rows {
            let mut row = self.row_words(r).to_vec();
            loop {
                let Some(lead) = first_set(&row) else {
                    break;
                };
                match pivots.iter().find(|(l, _)| *l == lead) {
                    Some((_, pivot)) => xor_assign(&mut row, pivot),
                    None => {
                        pivots.push((lead, row));
                        break;
                    }
                }
            }
        }
        pivots.len()
    }

    /// Basis of the right kernel `{x : self * x = 0}`.
    ///
    /// Returns a matrix whose rows are the basis vectors, each of length
    /// `self.cols()`. The row count equals `cols - rank`; an empty matrix
    /// (zero rows) means only the zero vector is in the kernel.
    pub fn right_kernel(&self) -> Gf2Matrix {
        let col_words = words_for(self.rows).max(1);
        let coef_words = words_for(self.cols).max(1);
        // (column vector over rows, coefficient vector over columns)
        let mut pivots: Vec<(usize, Vec<u64>, Vec<u64>)> = Vec::new();
        let mut kernel: Vec<Vec<u64>> = Vec::new();

        for j in 0..self.cols {
            let mut col = vec![0u64; col_words];
            for r in 0..self.rows {
                if self.get(r, j) {
                    col[r / WORD_BITS] |= 1u64 << (r % WORD_BITS);
                }
            }
            let mut coef = vec![0u64; coef_words];
            coef[j / WORD_BITS] |= 1u64 << (j % WORD_BITS);

            loop {
                let Some(lead) = first_set(&col) else {
                    kernel.push(coef);
                    break;
                };
                match pivots.iter().find(|(l, _, _)| *l == lead) {
                    Some((_, pcol, pcoef)) => {
                        xor_assign(&mut col, pcol);
                        xor_assign(&mut coef, pcoef);
                    }
                    None => {
                        pivots.push((lead, col, coef));
                        break;
                    }
                }
            }
        }

        let mut out = Gf2Matrix::zero(kernel.len(), self.cols);
        for (i, coef) in kernel.iter().enumerate() {
            let start = i * out.words_per_row;
            out.bits[start..start + out.words_per_row].copy_from_slice(coef);
        }
        out
    }
}

impl fmt::Debug for Gf2Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gf2Matrix {}x{}", self.rows, self.cols)?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(f, "{}", if self.get(r, c) { '1' } else { '0' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Exact linear-algebra capability over GF(2).
///
/// The closure analysis is written against this trait so the numeric backend
/// stays pluggable; [`DenseGauss`] is the default implementation.
pub trait Gf2LinearAlgebra {
    /// Row-space dimension of `m`.
    fn rank(&self, m: &Gf2Matrix) -> usize;
    /// Basis of `{x : m * x = 0}`, one basis vector per row.
    fn kernel_basis(&self, m: &Gf2Matrix) -> Gf2Matrix;
    /// Product `a * b`.
    fn multiply(&self, a: &Gf2Matrix, b: &Gf2Matrix) -> Gf2Matrix;
    /// Transpose of `m`.
    fn transpose(&self, m: &Gf2Matrix) -> Gf2Matrix;
}

/// Dense Gaussian-elimination backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenseGauss;

impl Gf2LinearAlgebra for DenseGauss {
    fn rank(&self, m: &Gf2Matrix) -> usize {
        m.rank()
    }

    fn kernel_basis(&self, m: &Gf2Matrix) -> Gf2Matrix {
        m.right_kernel()
    }

    fn multiply(&self, a: &Gf2Matrix, b: &Gf2Matrix) -> Gf2Matrix {
        a.multiply(b)
    }

    fn transpose(&self, m: &Gf2Matrix) -> Gf2Matrix {
        m.transpose()
    }
}
