//! Algebraic laws and term-level semantics of boolean polynomials

use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const VARS: usize = 6;

fn random_poly(rng: &mut ChaCha8Rng) -> BoolPoly {
    let terms = rng.gen_range(0..8);
    BoolPoly::from_monomials((0..terms).map(|_| {
        let degree = rng.gen_range(0..4);
        (0..degree)
            .map(|_| rng.gen_range(0..VARS))
            .collect::<Vec<_>>()
    }))
}

fn all_assignments() -> impl Iterator<Item = BTreeMap<Var, bool>> {
    (0u32..1 << VARS).map(|bits| (0..VARS).map(|v| (v, bits >> v & 1 == 1)).collect())
}

#[test]
fn test_xor_is_involutive_group_operation() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..200 {
        let a = random_poly(&mut rng);
        let b = random_poly(&mut rng);
        let c = random_poly(&mut rng);

        assert!((&a ^ &a).is_zero());
        assert_eq!(&a ^ &b, &b ^ &a);
        assert_eq!(&(&a ^ &b) ^ &c, &a ^ &(&b ^ &c));
        assert_eq!(&a ^ &BoolPoly::zero(), a);
    }
}

#[test]
fn test_and_distributes_over_xor() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for _ in 0..200 {
        let a = random_poly(&mut rng);
        let b = random_poly(&mut rng);
        let c = random_poly(&mut rng);

        let lhs = &a & &(&b ^ &c);
        let rhs = &(&a & &b) ^ &(&a & &c);
        assert_eq!(lhs, rhs, "a = {}, b = {}, c = {}", a, b, c);
    }
}

#[test]
fn test_and_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..200 {
        let a = random_poly(&mut rng);
        assert_eq!(&a & &a, a, "a = {}", a);
    }
}

#[test]
fn test_and_matches_pointwise_evaluation() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for _ in 0..50 {
        let a = random_poly(&mut rng);
        let b = random_poly(&mut rng);
        let prod = &a & &b;
        let sum = &a ^ &b;
        for point in all_assignments() {
            let (ea, eb) = (a.evaluate(&point).unwrap(), b.evaluate(&point).unwrap());
            assert_eq!(prod.evaluate(&point), Some(ea & eb));
            assert_eq!(sum.evaluate(&point), Some(ea ^ eb));
            assert_eq!((!&a).evaluate(&point), Some(!ea));
        }
    }
}

#[test]
fn test_and_rules() {
    let x0 = BoolPoly::var(0);
    let x1 = BoolPoly::var(1);

    // Same variable collapses
    assert_eq!(&x0 & &x0, x0);
    // Different variables form a degree-2 monomial
    let x0x1 = &x0 & &x1;
    assert_eq!(x0x1, BoolPoly::from_monomials([vec![0, 1]]));
    assert_eq!(x0x1.degree(), 2);
    // (x0 + 1) * x1 = x0*x1 + x1
    assert_eq!(&!&x0 & &x1, BoolPoly::from_monomials([vec![0, 1], vec![1]]));
    // x0 * x0x1 collapses to x0x1
    assert_eq!(&x0 & &x0x1, x0x1);
    // Constants
    assert!((&x0 & &BoolPoly::zero()).is_zero());
    assert_eq!(&x0x1 & &BoolPoly::one(), x0x1);
}

#[test]
fn test_invert_only_flips_constant() {
    let p = BoolPoly::from_monomials([vec![], vec![2], vec![3, 4]]);
    let q = !&p;
    assert!(!q.constant_term());
    assert_eq!(q.linear(), p.linear());
    assert_eq!(q.nonlinear(), p.nonlinear());
    assert_eq!(!q, p);
}

#[test]
fn test_from_monomials_routes_and_cancels() {
    let p = BoolPoly::from_monomials([vec![], vec![1], vec![1, 1], vec![2, 3], vec![3, 2], vec![4, 5]]);
    // [1] and [1, 1] are both x1, [2, 3] and [3, 2] are the same monomial
    assert!(p.constant_term());
    assert!(p.linear().is_empty());
    assert_eq!(p.nonlinear().len(), 1);
    assert_eq!(p.to_string(), "1 + x4*x5");
}

#[test]
fn test_assign_false_drops_terms() {
    let mut p = BoolPoly::from_monomials([vec![0], vec![1], vec![0, 2], vec![1, 2]]);
    p.assign(0, false);
    assert_eq!(p, BoolPoly::from_monomials([vec![1], vec![1, 2]]));
    assert!(!p.contains_var(0));
}

#[test]
fn test_assign_true_demotes_and_cancels() {
    // x0*x1 + x1 with x0 = 1 → x1 + x1 = 0
    let mut p = BoolPoly::from_monomials([vec![0, 1], vec![1]]);
    p.assign(0, true);
    assert!(p.is_zero());

    // x0 + x0*x1*x2 + x1*x2 with x0 = 1 → 1
    let mut p = BoolPoly::from_monomials([vec![0], vec![0, 1, 2], vec![1, 2]]);
    p.assign(0, true);
    assert!(p.is_one());

    // x0*x1*x2 with x0 = 1 → x1*x2, stays nonlinear
    let mut p = BoolPoly::from_monomials([vec![0, 1, 2]]);
    p.assign(0, true);
    assert_eq!(p, BoolPoly::from_monomials([vec![1, 2]]));
}

#[test]
fn test_assign_removes_variable_and_preserves_value() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..100 {
        let p = random_poly(&mut rng);
        let var = rng.gen_range(0..VARS);
        for value in [false, true] {
            let mut q = p.clone();
            q.assign(var, value);
            assert!(!q.contains_var(var));
            for point in all_assignments().filter(|pt| pt[&var] == value) {
                assert_eq!(q.evaluate(&point), p.evaluate(&point));
            }
        }
    }
}

#[test]
fn test_subset_reduction_safety() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut checked = 0;
    for _ in 0..500 {
        let p = random_poly(&mut rng);
        let q = random_poly(&mut rng);
        if !q.subset_of(&p) {
            continue;
        }
        checked += 1;
        let r = &p ^ &q;
        assert!(r.linear().is_disjoint(q.linear()));
        assert!(r.nonlinear().is_disjoint(q.nonlinear()));
        assert!(r.subset_of(&p));
        assert_eq!(r.term_count(), p.term_count() - q.term_count());
    }
    assert!(checked > 0);
}

#[test]
fn test_predicates() {
    assert!(BoolPoly::zero().is_zero());
    assert!(BoolPoly::zero().is_constant());
    assert!(BoolPoly::one().is_one());
    assert!(BoolPoly::var(3).is_variable());
    assert!((&BoolPoly::var(3) ^ true).is_variable());
    assert!(!BoolPoly::from_monomials([vec![1], vec![2]]).is_variable());
    assert!(!BoolPoly::from_monomials([vec![1], vec![2, 3]]).is_variable());
    assert!(BoolPoly::from_monomials([vec![1], vec![2]]).is_linear());
}

#[test]
fn test_evaluate_missing_variable() {
    let p = BoolPoly::from_monomials([vec![0], vec![1, 2]]);
    let mut point = BTreeMap::new();
    point.insert(0, true);
    point.insert(1, false);
    assert_eq!(p.evaluate(&point), None);
    point.insert(2, true);
    assert_eq!(p.evaluate(&point), Some(true));
}

#[test]
fn test_display() {
    assert_eq!(BoolPoly::zero().to_string(), "0");
    assert_eq!(BoolPoly::one().to_string(), "1");
    let p = BoolPoly::from_monomials([vec![], vec![3], vec![0], vec![2, 1]]);
    assert_eq!(p.to_string(), "1 + x0 + x3 + x1*x2");
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_roundtrip() {
    let p = BoolPoly::from_monomials([vec![], vec![3], vec![2, 1]]);
    let json = serde_json::to_string(&p).unwrap();
    let back: BoolPoly = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}
