//! Shared fixtures for the keccak-anf integration tests

use std::collections::BTreeMap;

use keccak_anf_algebra::reference::Words;
use keccak_anf_algebra::{BoolPoly, Var};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic generator for a test
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Random polynomial over `x0..x{vars}` with up to `terms` monomials
pub fn random_poly(rng: &mut impl Rng, vars: usize, terms: usize) -> BoolPoly {
    let monomials: Vec<Vec<Var>> = (0..terms)
        .map(|_| (0..vars).filter(|_| rng.gen_bool(0.4)).collect())
        .collect();
    BoolPoly::from_monomials(monomials)
}

/// Full assignment of `x0..x{vars}` from the bits of `mask`
pub fn assignment_from_mask(vars: usize, mask: u64) -> BTreeMap<Var, bool> {
    (0..vars).map(|v| (v, (mask >> v) & 1 == 1)).collect()
}

/// Random concrete state with lanes masked to `w` bits
pub fn random_words(rng: &mut impl Rng, w: usize) -> Words {
    let mask = if w == 64 { u64::MAX } else { (1u64 << w) - 1 };
    let mut words = [0u64; 25];
    for word in words.iter_mut() {
        *word = rng.gen::<u64>() & mask;
    }
    words
}
