//! Property-based tests for the Boolean polynomial algebra

use keccak_anf_algebra::BoolPoly;
use keccak_anf_tests::assignment_from_mask;
use proptest::prelude::*;

const VARS: usize = 6;

/// Arbitrary polynomial over `x0..x5`
fn poly() -> impl Strategy<Value = BoolPoly> {
    prop::collection::vec(prop::collection::vec(0..VARS, 0..4), 0..8)
        .prop_map(BoolPoly::from_monomials)
}

fn eval(p: &BoolPoly, mask: u64) -> bool {
    p.evaluate(&assignment_from_mask(VARS, mask))
        .expect("every variable is assigned")
}

proptest! {
    #[test]
    fn xor_is_a_group(a in poly(), b in poly(), c in poly()) {
        prop_assert_eq!(&a ^ &b, &b ^ &a);
        prop_assert_eq!(&(&a ^ &b) ^ &c, &a ^ &(&b ^ &c));
        prop_assert_eq!(&a ^ &BoolPoly::zero(), a.clone());
        prop_assert!((&a ^ &a).is_zero());
    }

    #[test]
    fn and_is_a_commutative_monoid(a in poly(), b in poly(), c in poly()) {
        prop_assert_eq!(a.and(&b), b.and(&a));
        prop_assert_eq!(a.and(&b).and(&c), a.and(&b.and(&c)));
        prop_assert_eq!(a.and(&BoolPoly::one()), a.clone());
        prop_assert!(a.and(&BoolPoly::zero()).is_zero());
        prop_assert_eq!(a.and(&a), a.clone());
    }

    #[test]
    fn and_distributes_over_xor(a in poly(), b in poly(), c in poly()) {
        prop_assert_eq!(a.and(&(&b ^ &c)), &a.and(&b) ^ &a.and(&c));
    }

    #[test]
    fn invert_is_xor_one(a in poly()) {
        prop_assert_eq!(a.invert(), &a ^ &BoolPoly::one());
        prop_assert_eq!(a.invert().invert(), a.clone());
    }

    #[test]
    fn operations_agree_pointwise(a in poly(), b in poly(), mask in 0u64..64) {
        prop_assert_eq!(eval(&(&a ^ &b), mask), eval(&a, mask) ^ eval(&b, mask));
        prop_assert_eq!(eval(&a.and(&b), mask), eval(&a, mask) & eval(&b, mask));
        prop_assert_eq!(eval(&a.invert(), mask), !eval(&a, mask));
    }

    #[test]
    fn assign_is_substitution(a in poly(), var in 0..VARS, value: bool, mask in 0u64..64) {
        let mut assigned = a.clone();
        assigned.assign(var, value);
        prop_assert!(!assigned.contains_var(var));

        // Agrees with `a` on every point where `var` has the assigned value
        let point = if value { mask | (1 << var) } else { mask & !(1 << var) };
        prop_assert_eq!(eval(&assigned, point), eval(&a, point));
    }

    #[test]
    fn term_levels_are_well_formed(a in poly(), b in poly()) {
        let p = a.and(&b);
        prop_assert!(p.nonlinear().iter().all(|m| m.len() >= 2));
        prop_assert!(p.degree() <= VARS);
        prop_assert_eq!(p.term_count(), p.linear().len() + p.nonlinear().len());
    }
}
