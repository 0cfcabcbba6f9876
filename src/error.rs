//! Error type shared across the crate.

use thiserror::Error;

/// Errors reported by closure analysis, SAT search, and the bilinear bound.
#[derive(Debug, Error)]
pub enum Error {
    /// A monomial was constructed with a repeated variable index.
    #[error("duplicate variable index {index} in monomial")]
    DuplicateVariable {
        /// The repeated index.
        index: u32,
    },

    /// A polynomial mentions a variable outside `0..n`.
    #[error("variable index {index} out of range for n = {n}")]
    VariableOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of variables in the current computation.
        n: u32,
    },

    /// A polynomial handed to the bilinear bound contains a non-quadratic term.
    #[error("quadratic rank bound requires a homogeneous degree-2 polynomial, found a term of degree {degree}")]
    NotQuadratic {
        /// Degree of the offending term.
        degree: usize,
    },

    /// The bilinear bound needs at least one 4-tuple of variables.
    #[error("quadratic rank bound requires n >= 4, got n = {n}")]
    TooFewVariables {
        /// Number of variables supplied.
        n: u32,
    },

    /// A matching of size `k` forces variable indices up to `4k - 1`.
    #[error("matching of size {k} needs at least {} variables, got n = {n}", 4 * k)]
    MatchingTooLarge {
        /// Number of variables supplied.
        n: u32,
        /// Requested matching size.
        k: u32,
    },

    /// The pair formula is satisfiable by construction; an unsat answer means
    /// the encoding itself is broken.
    #[error("pair formula unexpectedly unsatisfiable for n = {n}, k = {k}")]
    UnsatisfiableConstruction {
        /// Number of variables.
        n: u32,
        /// Matching size.
        k: u32,
    },

    /// An internal consistency check failed.
    #[error("invariant violated: {message}")]
    Invariant {
        /// What went wrong.
        message: String,
    },

    /// The SAT backend reported a failure unrelated to satisfiability.
    #[error("sat solver failure: {message}")]
    Solver {
        /// Backend-provided description.
        message: String,
    },
}
