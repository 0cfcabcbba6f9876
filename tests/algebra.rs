//! Algebraic properties of monomials and polynomials, cross-checked against
//! truth tables. A square-free polynomial over GF(2) is the algebraic normal
//! form of a boolean function, and the normal form is unique, so two
//! polynomials are equal iff they agree on every assignment. That makes the
//! pointwise check `eval(p*q, a) = eval(p, a) AND eval(q, a)` a complete
//! reference for the reduced product.

use quadclose::{Monomial, Poly};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Evaluate a monomial at an assignment given as a bitmask.
fn eval_monomial(m: &Monomial, assignment: u32) -> bool {
    m.vars().iter().all(|&v| assignment >> v & 1 == 1)
}

/// Evaluate a polynomial (XOR over its terms) at an assignment.
fn eval_poly(p: &Poly, assignment: u32) -> bool {
    p.terms()
        .iter()
        .filter(|m| eval_monomial(m, assignment))
        .count()
        % 2
        == 1
}

/// A random polynomial over `n` variables with terms of degree <= max_degree.
fn random_poly(rng: &mut StdRng, n: u32, max_degree: usize, terms: usize) -> Poly {
    let mut monomials = Vec::with_capacity(terms);
    for _ in 0..terms {
        let degree = rng.gen_range(0..=max_degree.min(n as usize));
        let mut vars: Vec<u32> = (0..n).collect();
        for i in 0..degree {
            let j = rng.gen_range(i..vars.len());
            vars.swap(i, j);
        }
        monomials.push(Monomial::new(&vars[..degree]).expect("distinct by construction"));
    }
    Poly::from_monomials(monomials)
}

#[test]
fn test_product_matches_truth_table() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for n in 2..=6u32 {
        for _ in 0..40 {
            let p = random_poly(&mut rng, n, 3, 5);
            let q = random_poly(&mut rng, n, 3, 5);
            let product = p.multiply(&q);
            for assignment in 0..1u32 << n {
                assert_eq!(
                    eval_poly(&product, assignment),
                    eval_poly(&p, assignment) && eval_poly(&q, assignment),
                    "product disagrees with truth table for p={}, q={} at {:#b}",
                    p,
                    q,
                    assignment
                );
            }
        }
    }
}

#[test]
fn test_addition_matches_truth_table() {
    let mut rng = StdRng::seed_from_u64(0xadd);
    for _ in 0..40 {
        let p = random_poly(&mut rng, 5, 3, 6);
        let q = random_poly(&mut rng, 5, 3, 6);
        let sum = p.add(&q);
        for assignment in 0..1u32 << 5 {
            assert_eq!(
                eval_poly(&sum, assignment),
                eval_poly(&p, assignment) ^ eval_poly(&q, assignment)
            );
        }
    }
}

#[test]
fn test_multiplication_commutes_and_associates() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let a = random_poly(&mut rng, 5, 2, 4);
        let b = random_poly(&mut rng, 5, 2, 4);
        let c = random_poly(&mut rng, 5, 2, 4);
        assert_eq!(a.multiply(&b), b.multiply(&a));
        assert_eq!(a.multiply(&b).multiply(&c), a.multiply(&b.multiply(&c)));
    }
}

#[test]
fn test_identity_for_random_polynomials() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        let p = random_poly(&mut rng, 6, 3, 8);
        assert_eq!(p.multiply(&Poly::one()), p);
    }
}

#[test]
fn test_square_is_itself() {
    // Idempotent variables make every polynomial satisfy p*p = p.
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..20 {
        let p = random_poly(&mut rng, 5, 3, 6);
        assert_eq!(p.multiply(&p), p);
    }
}
