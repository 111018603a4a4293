//! Symbolic rounds against the concrete permutation

use std::collections::BTreeMap;

use keccak_anf_algebra::reference;
use keccak_anf_algebra::{ConstraintStore, PolyLane, PolyState, Propagation};
use keccak_anf_tests::{random_words, rng};
use proptest::prelude::*;

#[test]
fn constant_rounds_match_reference_for_every_width() {
    let mut rng = rng(11);
    for w in [1usize, 2, 4, 8, 16, 32, 64] {
        let input = random_words(&mut rng, w);
        let mut state = PolyState::from_words(w, &input).unwrap();
        for rci in 0..3 {
            state.round(rci).unwrap();
        }

        let mut expected = input;
        reference::permute(&mut expected, w, 0, 3).unwrap();
        assert_eq!(state.to_words().unwrap(), expected, "w = {}", w);
    }
}

#[test]
fn symbolic_round_evaluates_like_concrete_round() {
    // Lane 0 symbolic, everything else constant
    let w = 8;
    let mut rng = rng(12);
    let input = random_words(&mut rng, w);

    let mut symbolic = PolyState::from_words(w, &input).unwrap();
    symbolic.set_lane(0, PolyLane::variables(w, 0)).unwrap();
    symbolic.round(0).unwrap();

    for guess in [0u64, 0x5A, 0xFF] {
        let assignments: BTreeMap<_, _> = (0..w).map(|j| (j, (guess >> j) & 1 == 1)).collect();
        let mut evaluated = symbolic.clone();
        evaluated.assign_all(&assignments);

        let mut concrete = input;
        concrete[0] = guess;
        reference::permute(&mut concrete, w, 0, 1).unwrap();
        assert_eq!(evaluated.to_words().unwrap(), concrete, "guess {:#x}", guess);
    }
}

#[test]
fn linearized_round_agrees_once_constraints_hold() {
    // Mirrored lanes cancel in every column, so the constraints are trivial
    // and the linearized round is exact
    let w = 16;
    let mut state = PolyState::new(w).unwrap();
    for i in 0..5 {
        let lane = PolyLane::variables(w, i * w);
        state.set_lane(i + 10, lane.clone()).unwrap();
        state.set_lane(i, lane).unwrap();
    }
    let mut plain = state.clone();
    let mut store = ConstraintStore::new();

    plain.round(0).unwrap();
    state.linearized_round(0, &mut store).unwrap();

    assert!(store.is_empty());
    assert_eq!(store.clone().propagate().unwrap(), Propagation::Satisfied);
    assert_eq!(state, plain);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn rho_pi_preserves_bit_count(lanes in prop::array::uniform25(any::<u64>())) {
        let mut state = PolyState::from_words(64, &lanes).unwrap();
        state.rho_pi();
        let words = state.to_words().unwrap();
        let before: u32 = lanes.iter().map(|w| w.count_ones()).sum();
        let after: u32 = words.iter().map(|w| w.count_ones()).sum();
        prop_assert_eq!(before, after);
        prop_assert_eq!(words[0], lanes[0]);
    }

    #[test]
    fn chi_is_invertible_on_rows(row in prop::array::uniform5(0u64..256)) {
        // χ is a permutation of each 5-lane row, so distinct rows stay distinct
        let mut a = [0u64; 25];
        a[..5].copy_from_slice(&row);
        let mut b = a;
        b[0] ^= 1;

        let mut sa = PolyState::from_words(8, &a).unwrap();
        let mut sb = PolyState::from_words(8, &b).unwrap();
        sa.chi();
        sb.chi();
        prop_assert_ne!(sa.to_words().unwrap(), sb.to_words().unwrap());
    }
}
