//! Symbolic Keccak-f state and round sub-steps
//!
//! The state is the 5×5 grid of [`PolyLane`]s with lane `(x, y)` stored at
//! index `5 * y + x`. Each sub-step mirrors the concrete permutation in
//! [`crate::reference`] with `u64` operations replaced by lane operations.
//! Round scheduling is left to the caller.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use tracing::debug;

use keccak_anf_api::{validate, Error, Result, ResultExt, Var};
use keccak_anf_params::{is_valid_lane_size, KECCAK_GRID, KECCAK_STATE_LANES, PI, RC, RHO};

use crate::lane::PolyLane;
use crate::poly::BoolPoly;
use crate::store::ConstraintStore;

/// The whole permutation state, every bit symbolic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyState {
    lane_size: usize,
    lanes: Vec<PolyLane>,
}

impl PolyState {
    /// An all-zero state of 25 lanes of `lane_size` bits.
    pub fn new(lane_size: usize) -> Result<Self> {
        validate::parameter(
            is_valid_lane_size(lane_size),
            "lane_size",
            "must be a power of two between 1 and 64",
        )?;
        Ok(Self {
            lane_size,
            lanes: vec![PolyLane::zero(lane_size); KECCAK_STATE_LANES],
        })
    }

    /// A constant state holding `words` (truncated to `lane_size` bits).
    pub fn from_words(lane_size: usize, words: &[u64; KECCAK_STATE_LANES]) -> Result<Self> {
        let mut state = Self::new(lane_size)?;
        for (lane, &word) in state.lanes.iter_mut().zip(words) {
            *lane = PolyLane::from_word(lane_size, word);
        }
        Ok(state)
    }

    /// Lane width in bits
    pub fn lane_size(&self) -> usize {
        self.lane_size
    }

    /// All lanes, index `5 * y + x`
    pub fn lanes(&self) -> &[PolyLane] {
        &self.lanes
    }

    /// Lane `i`, checked
    pub fn lane(&self, i: usize) -> Result<&PolyLane> {
        validate::index("state lane", i, KECCAK_STATE_LANES)?;
        Ok(&self.lanes[i])
    }

    /// Mutable lane `i`, checked
    pub fn lane_mut(&mut self, i: usize) -> Result<&mut PolyLane> {
        validate::index("state lane", i, KECCAK_STATE_LANES)?;
        Ok(&mut self.lanes[i])
    }

    /// Replaces lane `i`; the new lane must have the state's width.
    pub fn set_lane(&mut self, i: usize, lane: PolyLane) -> Result<()> {
        validate::index("state lane", i, KECCAK_STATE_LANES)?;
        validate::width("state lane", lane.width(), self.lane_size)?;
        self.lanes[i] = lane;
        Ok(())
    }

    /// Bit `n` of the flattened state (lane `n / lane_size`, bit `n % lane_size`).
    pub fn bit(&self, n: usize) -> Result<&BoolPoly> {
        validate::index("state bit", n, KECCAK_STATE_LANES * self.lane_size)?;
        self.lanes[n / self.lane_size].get(n % self.lane_size)
    }

    /// θ: XOR every lane with the parities of two neighbouring columns.
    pub fn theta(&mut self) {
        self.theta_with(None);
    }

    /// θ with every intermediate XOR reduced against `source`.
    pub fn theta_reduced(&mut self, source: &ConstraintStore) {
        self.theta_with(Some(source));
    }

    fn column_parities(&self) -> Vec<PolyLane> {
        let mut c = vec![PolyLane::zero(self.lane_size); 5];
        for (x, parity) in c.iter_mut().enumerate() {
            for y in 0..5 {
                parity.xor_assign(&self.lanes[5 * y + x]);
            }
        }
        c
    }

    fn apply_parities(&mut self, c: &[PolyLane], source: Option<&ConstraintStore>) {
        for x in 0..5 {
            let d = c[(x + 4) % 5].xor_reduced(&c[(x + 1) % 5].rotate_left(1), source);
            for y in 0..5 {
                let lane = &mut self.lanes[5 * y + x];
                *lane = lane.xor_reduced(&d, source);
            }
        }
    }

    fn theta_with(&mut self, source: Option<&ConstraintStore>) {
        let c = self.column_parities();
        self.apply_parities(&c, source);
        debug!(peak_terms = self.peak_terms(), "theta");
    }

    /// θ with linearized column parities.
    ///
    /// The variable part of every column-parity bit is appended to `store`
    /// as a zero constraint and dropped from the parity, which keeps only its
    /// constant term. The second pass therefore mixes in constants instead
    /// of whole expressions, bounding degree growth; the appended constraints
    /// record the condition under which this matches plain θ.
    pub fn conditional_theta(&mut self, store: &mut ConstraintStore) {
        let mut c = self.column_parities();
        for parity in c.iter_mut() {
            for bit in parity.iter_mut() {
                let constant = bit.constant_term();
                let mut condition = std::mem::replace(bit, BoolPoly::constant(constant));
                condition ^= constant;
                store.append(condition);
            }
        }
        self.apply_parities(&c, None);
        debug!(
            peak_terms = self.peak_terms(),
            constraints = store.len(),
            "conditional theta"
        );
    }

    /// ρ and π in one walk: rotate each lane and move it to its π position.
    /// Lane 0 is untouched.
    pub fn rho_pi(&mut self) {
        let mut last = self.lanes[1].clone();
        for (&j, &r) in PI.iter().zip(RHO.iter()) {
            let rotated = last.rotate_left(r);
            last = std::mem::replace(&mut self.lanes[j], rotated);
        }
        debug!("rho_pi");
    }

    /// χ: `a[x] ^= !a[x+1] & a[x+2]` row by row, from a snapshot of the row.
    pub fn chi(&mut self) {
        self.chi_with(None);
    }

    /// χ with every XOR reduced against `source`.
    pub fn chi_reduced(&mut self, source: &ConstraintStore) {
        self.chi_with(Some(source));
    }

    fn chi_with(&mut self, source: Option<&ConstraintStore>) {
        for y in (0..KECCAK_STATE_LANES).step_by(KECCAK_GRID) {
            let row: Vec<PolyLane> = self.lanes[y..y + KECCAK_GRID].to_vec();
            for x in 0..KECCAK_GRID {
                let t = row[(x + 1) % 5].invert().and(&row[(x + 2) % 5]);
                self.lanes[y + x] = row[x].xor_reduced(&t, source);
            }
        }
        debug!(peak_terms = self.peak_terms(), "chi");
    }

    /// ι: XOR round constant `RC[rci]` (truncated to the lane width) into lane 0.
    pub fn iota(&mut self, rci: usize) -> Result<()> {
        self.iota_with(rci, None)
    }

    /// ι with the result reduced against `source`.
    pub fn iota_reduced(&mut self, rci: usize, source: &ConstraintStore) -> Result<()> {
        self.iota_with(rci, Some(source))
    }

    fn iota_with(&mut self, rci: usize, source: Option<&ConstraintStore>) -> Result<()> {
        validate::index("round constant", rci, RC.len())?;
        self.lanes[0] = self.lanes[0].xor_word_reduced(RC[rci], source);
        debug!(rci, "iota");
        Ok(())
    }

    /// One plain round: θ, ρ+π, χ, ι.
    pub fn round(&mut self, rci: usize) -> Result<()> {
        self.theta();
        self.rho_pi();
        self.chi();
        self.iota(rci)
    }

    /// One linearized round: conditional θ, ρ+π, χ, ι.
    pub fn linearized_round(&mut self, rci: usize, store: &mut ConstraintStore) -> Result<()> {
        self.conditional_theta(store);
        self.rho_pi();
        self.chi();
        self.iota(rci)
    }

    /// Substitutes known variable values into every bit.
    pub fn assign_all(&mut self, assignments: &BTreeMap<Var, bool>) {
        for lane in self.lanes.iter_mut() {
            lane.assign_all(assignments);
        }
    }

    /// The concrete state, when every bit is constant.
    pub fn to_words(&self) -> Result<[u64; KECCAK_STATE_LANES]> {
        let mut words = [0u64; KECCAK_STATE_LANES];
        for (i, (word, lane)) in words.iter_mut().zip(&self.lanes).enumerate() {
            *word = lane.to_word().map_err(|e| match e {
                Error::NonConstant { index, .. } => Error::NonConstant {
                    context: "state",
                    index: i * self.lane_size + index,
                },
                other => other,
            })?;
        }
        Ok(words)
    }

    /// Largest term count over all bits
    pub fn peak_terms(&self) -> usize {
        self.lanes.iter().map(PolyLane::peak_terms).max().unwrap_or(0)
    }

    /// Checked copy of lane `from` into lane `to`.
    pub fn copy_lane(&mut self, from: usize, to: usize) -> Result<()> {
        let lane = self.lane(from).with_context("state copy source")?.clone();
        self.set_lane(to, lane)
    }
}

impl Index<usize> for PolyState {
    type Output = PolyLane;

    fn index(&self, i: usize) -> &PolyLane {
        &self.lanes[i]
    }
}

impl IndexMut<usize> for PolyState {
    fn index_mut(&mut self, i: usize) -> &mut PolyLane {
        &mut self.lanes[i]
    }
}

/// Lanes separated by a blank line.
impl fmt::Display for PolyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lane) in self.lanes.iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{}", lane)?;
        }
        Ok(())
    }
}
