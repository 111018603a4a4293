//! Concrete Keccak-f reference permutation
//!
//! Plain word implementation of the Keccak-f[25·w] family, used as the
//! oracle the symbolic sub-steps are checked against. Lanes narrower than 64
//! bits live in the low bits of each `u64`.

use keccak_anf_api::{validate, Result};
use keccak_anf_params::{is_valid_lane_size, KECCAK_STATE_LANES, PI, RC, RHO};

/// A concrete state, lane `(x, y)` at index `5 * y + x`
pub type Words = [u64; KECCAK_STATE_LANES];

#[inline(always)]
fn mask(w: usize) -> u64 {
    if w == 64 {
        u64::MAX
    } else {
        (1u64 << w) - 1
    }
}

#[inline(always)]
fn rotl(word: u64, r: u32, w: usize) -> u64 {
    let r = r as usize % w;
    if r == 0 {
        return word;
    }
    ((word << r) | (word >> (w - r))) & mask(w)
}

fn check_width(w: usize) -> Result<()> {
    validate::parameter(
        is_valid_lane_size(w),
        "lane_size",
        "must be a power of two between 1 and 64",
    )
}

fn theta_lanes(state: &mut Words, w: usize) {
    let mut c = [0u64; 5];
    for x in 0..5 {
        c[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
    }
    for x in 0..5 {
        let d = c[(x + 4) % 5] ^ rotl(c[(x + 1) % 5], 1, w);
        for y in 0..5 {
            state[x + 5 * y] ^= d;
        }
    }
}

fn rho_pi_lanes(state: &mut Words, w: usize) {
    let mut t = state[1];
    for i in 0..24 {
        let j = PI[i];
        let tmp = state[j];
        state[j] = rotl(t, RHO[i], w);
        t = tmp;
    }
}

fn chi_lanes(state: &mut Words, w: usize) {
    for y in 0..5 {
        let mut row = [0u64; 5];
        for x in 0..5 {
            row[x] = state[x + 5 * y];
        }
        for x in 0..5 {
            state[x + 5 * y] ^= (!row[(x + 1) % 5]) & row[(x + 2) % 5] & mask(w);
        }
    }
}

fn round_lanes(state: &mut Words, rci: usize, w: usize) {
    theta_lanes(state, w);
    rho_pi_lanes(state, w);
    chi_lanes(state, w);
    state[0] ^= RC[rci] & mask(w);
}

/// θ step
pub fn theta(state: &mut Words, w: usize) -> Result<()> {
    check_width(w)?;
    theta_lanes(state, w);
    Ok(())
}

/// ρ + π step
pub fn rho_pi(state: &mut Words, w: usize) -> Result<()> {
    check_width(w)?;
    rho_pi_lanes(state, w);
    Ok(())
}

/// χ step
pub fn chi(state: &mut Words, w: usize) -> Result<()> {
    check_width(w)?;
    chi_lanes(state, w);
    Ok(())
}

/// ι step
pub fn iota(state: &mut Words, rci: usize, w: usize) -> Result<()> {
    check_width(w)?;
    validate::index("round constant", rci, RC.len())?;
    state[0] ^= RC[rci] & mask(w);
    Ok(())
}

/// One round with round constant `RC[rci]`.
pub fn round(state: &mut Words, rci: usize, w: usize) -> Result<()> {
    check_width(w)?;
    validate::index("round constant", rci, RC.len())?;
    round_lanes(state, rci, w);
    Ok(())
}

/// Rounds `first..first + rounds` of Keccak-f[25·w].
pub fn permute(state: &mut Words, w: usize, first: usize, rounds: usize) -> Result<()> {
    check_width(w)?;
    validate::index("round constant", first + rounds, RC.len() + 1)?;
    for word in state.iter_mut() {
        *word &= mask(w);
    }
    for rci in first..first + rounds {
        round_lanes(state, rci, w);
    }
    Ok(())
}

/// The full 24-round Keccak-f[1600].
pub fn keccak_f1600(state: &mut Words) {
    for rci in 0..RC.len() {
        round_lanes(state, rci, 64);
    }
}
