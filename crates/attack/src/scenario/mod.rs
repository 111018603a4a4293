//! The preimage scenario
//!
//! Seeds a state with symbolic lanes, runs full and linearized rounds,
//! constrains the leading output bits to zero, fixes the known variables,
//! and solves what is left. The recovered input is checked against the
//! concrete permutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use keccak_anf_algebra::reference::{self, Words};
use keccak_anf_algebra::{
    ConstraintStore, LinearSolver, PolyLane, PolyState, Propagation, Solution, StoreStats,
};
use keccak_anf_api::Var;
use keccak_anf_params::KECCAK_STATE_LANES;

use crate::config::AttackConfig;
use crate::error::Result;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// The constraints contradict each other
    Unsatisfiable,
    /// A candidate input was found
    Recovered {
        /// The 25 input lanes, index `5 * y + x`
        lanes: Words,
        /// Whether the concrete permutation reproduces the zero prefix
        verified: bool,
        /// Store snapshot taken before solving
        stats: StoreStats,
    },
}

/// A configured run.
#[derive(Debug, Clone)]
pub struct PreimageAttack {
    config: AttackConfig,
}

impl PreimageAttack {
    /// Validates `config` and prepares a run.
    pub fn new(config: AttackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The run's configuration
    pub fn config(&self) -> &AttackConfig {
        &self.config
    }

    /// Seeded input state: every seeded lane and its mirror hold the same variables.
    pub fn initial_state(&self) -> Result<PolyState> {
        let w = self.config.lane_size;
        let mut state = PolyState::new(w)?;
        for &position in &self.config.seed_lanes {
            let lane = PolyLane::variables(w, self.config.seed_base(position));
            if let Some(mirror) = self.config.mirror_of(position) {
                state.set_lane(mirror, lane.clone())?;
            }
            state.set_lane(position, lane)?;
        }
        Ok(state)
    }

    /// Runs the configured rounds, collecting conditional-θ constraints in `store`.
    pub fn symbolic_rounds(&self, state: &mut PolyState, store: &mut ConstraintStore) -> Result<()> {
        let full = self.config.full_rounds;
        for rci in 0..full {
            state.round(rci)?;
            info!(round = rci, peak_terms = state.peak_terms(), "full round");
        }
        for rci in full..self.config.rounds() {
            state.linearized_round(rci, store)?;
            info!(
                round = rci,
                peak_terms = state.peak_terms(),
                constraints = store.len(),
                "linearized round"
            );
        }
        Ok(())
    }

    /// Appends the zero-prefix bits, then fixes the id and linearization variables.
    pub fn constrain(&self, state: &PolyState, store: &mut ConstraintStore) -> Result<()> {
        for n in 0..self.config.zero_prefix_bits {
            store.append(state.bit(n)?.clone());
        }
        info!(
            bits = self.config.zero_prefix_bits,
            constraints = store.len(),
            "zero prefix appended"
        );

        for (var, value) in self.config.id_bits() {
            store.assign(var, value)?;
        }
        for var in self.config.linearization.clone() {
            store.assign(var, false)?;
        }
        info!(assigned = store.assignments().len(), "known variables fixed");
        Ok(())
    }

    /// Input lanes under `solution`; variables it leaves out default to zero.
    pub fn recover(&self, solution: &BTreeMap<Var, bool>) -> Words {
        let w = self.config.lane_size;
        let mut lanes = [0u64; KECCAK_STATE_LANES];
        for &position in &self.config.seed_lanes {
            let base = self.config.seed_base(position);
            let word = (0..w).fold(0u64, |word, j| {
                let bit = solution.get(&(base + j)).copied().unwrap_or(false);
                word | (u64::from(bit) << j)
            });
            lanes[position] = word;
            if let Some(mirror) = self.config.mirror_of(position) {
                lanes[mirror] = word;
            }
        }
        lanes
    }

    /// Runs `lanes` through the concrete rounds and checks the zero prefix.
    pub fn verify(&self, lanes: &Words) -> Result<bool> {
        let w = self.config.lane_size;
        let mut out = *lanes;
        reference::permute(&mut out, w, 0, self.config.rounds())?;
        let clean = (0..self.config.zero_prefix_bits).all(|n| (out[n / w] >> (n % w)) & 1 == 0);
        Ok(clean)
    }

    /// Runs the whole scenario.
    pub fn run(&self) -> Result<AttackOutcome> {
        info!(
            lane_size = self.config.lane_size,
            full_rounds = self.config.full_rounds,
            linearized_rounds = self.config.linearized_rounds,
            "starting preimage search"
        );
        let mut state = self.initial_state()?;
        let mut store = ConstraintStore::new();

        self.symbolic_rounds(&mut state, &mut store)?;
        self.constrain(&state, &mut store)?;

        match store.propagate()? {
            Propagation::Unsatisfiable => {
                info!("propagation found a contradiction");
                return Ok(AttackOutcome::Unsatisfiable);
            }
            outcome => debug!(?outcome, "propagation finished"),
        }
        let stats = store.stats();
        info!(
            polys = stats.polys,
            linear = stats.linear,
            nonlinear = stats.nonlinear,
            assigned = stats.assigned,
            "residue after propagation"
        );

        let solution = match LinearSolver::new(&store)?.solve() {
            Solution::Unsatisfiable => {
                info!("linear system is inconsistent");
                return Ok(AttackOutcome::Unsatisfiable);
            }
            Solution::Assignment(map) => map,
        };

        let lanes = self.recover(&solution);
        let verified = self.verify(&lanes)?;
        if verified {
            info!("recovered input reproduces the zero prefix");
        } else {
            warn!("recovered input does not reproduce the zero prefix");
        }
        Ok(AttackOutcome::Recovered {
            lanes,
            verified,
            stats,
        })
    }
}
