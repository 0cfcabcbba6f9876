//! Square-free monomials over boolean variables.
//!
//! A monomial is a product of distinct variables `x_i` under the idempotency
//! relation `x_i^2 = x_i`, represented canonically as a strictly increasing
//! sequence of variable indices. The empty sequence is the constant `1`.
//! Multiplication is the sorted union of the two index sets, which makes it
//! commutative, associative, and idempotent.

use crate::error::Error;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Inline capacity covers every monomial this crate produces: basis monomials
/// have degree <= 3 and products against quadratic terms stay <= 5.
type VarList = SmallVec<[u32; 6]>;

/// A square-free monomial, canonically sorted.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Monomial(VarList);

impl Monomial {
    /// The constant monomial `1`.
    pub fn one() -> Self {
        Monomial(VarList::new())
    }

    /// Build a monomial from variable indices, in any order.
    ///
    /// Rejects repeated indices eagerly rather than silently collapsing them:
    /// a duplicate in the input is a caller bug, not an application of
    /// idempotency.
    pub fn new(vars: &[u32]) -> Result<Self, Error> {
        let mut sorted: VarList = vars.iter().copied().collect();
        sorted.sort_unstable();
        for w in sorted.windows(2) {
            if w[0] == w[1] {
                return Err(Error::DuplicateVariable { index: w[0] });
            }
        }
        Ok(Monomial(sorted))
    }

    /// The quadratic monomial `x_i * x_j`, `i != j`.
    pub fn pair(i: u32, j: u32) -> Result<Self, Error> {
        Monomial::new(&[i, j])
    }

    /// Number of variables in the monomial.
    pub fn degree(&self) -> usize {
        self.0.len()
    }

    /// The sorted variable indices.
    pub fn vars(&self) -> &[u32] {
        &self.0
    }

    /// Largest variable index, if any.
    pub fn max_var(&self) -> Option<u32> {
        self.0.last().copied()
    }

    /// Product under `x_i^2 = x_i`: the sorted union of both index sets.
    pub fn multiply(&self, other: &Monomial) -> Monomial {
        let mut out = VarList::with_capacity(self.0.len() + other.0.len());
        let (mut a, mut b) = (self.0.iter().peekable(), other.0.iter().peekable());
        loop {
            match (a.peek(), b.peek()) {
                (Some(&&x), Some(&&y)) => {
                    if x < y {
                        out.push(x);
                        a.next();
                    } else if y < x {
                        out.push(y);
                        b.next();
                    } else {
                        out.push(x);
                        a.next();
                        b.next();
                    }
                }
                (Some(&&x), None) => {
                    out.push(x);
                    a.next();
                }
                (None, Some(&&y)) => {
                    out.push(y);
                    b.next();
                }
                (None, None) => break,
            }
        }
        Monomial(out)
    }
}

impl fmt::Debug for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "1");
        }
        for (k, v) in self.0.iter().enumerate() {
            if k > 0 {
                write!(f, "*")?;
            }
            write!(f, "x{}", v)?;
        }
        Ok(())
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
