//! GF(2) elimination on random systems

use std::collections::BTreeMap;

use keccak_anf_algebra::{BoolPoly, ConstraintStore, LinearSolver, Propagation, Solution, Var};
use keccak_anf_tests::rng;
use rand::Rng;

/// Random linear polynomial that vanishes at `secret`
fn equation_for(rng: &mut impl Rng, secret: &BTreeMap<Var, bool>) -> BoolPoly {
    let mut p = BoolPoly::zero();
    let mut value = false;
    for (&v, &bit) in secret {
        if rng.gen_bool(0.3) {
            p ^= &BoolPoly::var(v);
            value ^= bit;
        }
    }
    p ^ value
}

fn satisfied(p: &BoolPoly, solution: &BTreeMap<Var, bool>) -> bool {
    let mut full = solution.clone();
    for v in p.variables() {
        full.entry(v).or_insert(false);
    }
    p.evaluate(&full) == Some(false)
}

#[test]
fn random_consistent_systems_are_solved() {
    let mut rng = rng(21);
    for round in 0..20 {
        let vars = 24;
        let secret: BTreeMap<Var, bool> = (0..vars).map(|v| (v, rng.gen())).collect();
        let equations: Vec<BoolPoly> = (0..rng.gen_range(4..40))
            .map(|_| equation_for(&mut rng, &secret))
            .collect();

        let mut store = ConstraintStore::new();
        for eq in &equations {
            store.append(eq.clone());
        }
        assert_ne!(store.propagate().unwrap(), Propagation::Unsatisfiable);

        let solution = match LinearSolver::new(&store).unwrap().solve() {
            Solution::Assignment(map) => map,
            Solution::Unsatisfiable => panic!("system {} has a solution", round),
        };
        for eq in &equations {
            assert!(satisfied(eq, &solution), "system {}: {} not satisfied", round, eq);
        }
    }
}

#[test]
fn contradiction_is_reported() {
    let mut rng = rng(22);
    let secret: BTreeMap<Var, bool> = (0..16).map(|v| (v, rng.gen())).collect();

    let equations: Vec<BoolPoly> = (0..8).map(|_| equation_for(&mut rng, &secret)).collect();
    let mut store = ConstraintStore::new();
    for eq in &equations {
        store.append(eq.clone());
    }
    // Same variables, opposite constant
    store.append(equations[7].invert());

    let unsat = match store.clone().propagate().unwrap() {
        Propagation::Unsatisfiable => true,
        _ => LinearSolver::new(&store).unwrap().solve() == Solution::Unsatisfiable,
    };
    assert!(unsat);
}

#[test]
fn solution_keeps_propagated_values() {
    // x3 = 1 is forced; x0 + x1 = 0 leaves a free variable
    let mut store = ConstraintStore::new();
    store.append(BoolPoly::var(3) ^ true);
    store.append(&BoolPoly::var(0) ^ &BoolPoly::var(1));
    assert_eq!(store.propagate().unwrap(), Propagation::NoProgress);
    assert_eq!(store.assignments().get(&3), Some(&true));

    let solution = LinearSolver::new(&store).unwrap().solve();
    let map = solution.assignment().unwrap();
    assert!(map[&3]);
    assert_eq!(map[&0], map[&1]);
}
