//! Scenario configuration
//!
//! Every field has a default reproducing the published two-round
//! Keccak-f[1600] preimage setting, so an empty TOML document is a valid
//! configuration.

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use keccak_anf_api::{validate, Error as CoreError, Var};
use keccak_anf_params::{is_valid_lane_size, KECCAK_STATE_LANES, RC};

use crate::error::{Error, Result};

/// Parameters of one preimage run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttackConfig {
    /// Lane width in bits
    pub lane_size: usize,
    /// State positions seeded with fresh variables; position `i` receives
    /// variables `i * lane_size ..`
    pub seed_lanes: Vec<usize>,
    /// Every seeded lane is duplicated at `i + mirror_offset`; 0 disables mirroring
    pub mirror_offset: usize,
    /// Rounds evaluated with plain θ
    pub full_rounds: usize,
    /// Rounds evaluated with conditional θ, after the full rounds
    pub linearized_rounds: usize,
    /// Leading output bits constrained to zero
    pub zero_prefix_bits: usize,
    /// Known field, LSB first
    pub id: u64,
    /// Variable carrying bit 0 of `id`
    pub id_base_var: Var,
    /// Auxiliary variables fixed to zero
    pub linearization: Range<Var>,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            lane_size: 64,
            seed_lanes: vec![0, 1, 2, 3, 4],
            mirror_offset: 10,
            full_rounds: 1,
            linearized_rounds: 1,
            zero_prefix_bits: 80,
            id: 0x0202_3180_1867_0057,
            id_base_var: 0,
            linearization: 272..288,
        }
    }
}

impl AttackConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Total number of rounds, the index of the first round constant unused
    pub fn rounds(&self) -> usize {
        self.full_rounds + self.linearized_rounds
    }

    /// First variable of the lane seeded at `position`
    pub fn seed_base(&self, position: usize) -> Var {
        position * self.lane_size
    }

    /// Mirror position of a seeded lane, if mirroring is enabled
    pub fn mirror_of(&self, position: usize) -> Option<usize> {
        (self.mirror_offset != 0).then(|| position + self.mirror_offset)
    }

    /// Variables pinned by `id`, with their values
    pub fn id_bits(&self) -> impl Iterator<Item = (Var, bool)> + '_ {
        (0..self.lane_size).map(move |j| (self.id_base_var + j, (self.id >> j) & 1 == 1))
    }

    /// Rejects configurations the scenario cannot run.
    pub fn validate(&self) -> core::result::Result<(), CoreError> {
        validate::parameter(
            is_valid_lane_size(self.lane_size),
            "lane_size",
            "must be a power of two between 1 and 64",
        )?;
        validate::parameter(
            self.rounds() <= RC.len(),
            "rounds",
            "full and linearized rounds together exceed the round constants",
        )?;
        validate::parameter(
            self.zero_prefix_bits <= KECCAK_STATE_LANES * self.lane_size,
            "zero_prefix_bits",
            "longer than the state",
        )?;
        validate::parameter(
            self.lane_size == 64 || self.id >> self.lane_size == 0,
            "id",
            "does not fit in one lane",
        )?;

        let mut occupied = BTreeSet::new();
        for &position in &self.seed_lanes {
            validate::index("seed lane", position, KECCAK_STATE_LANES)?;
            if !occupied.insert(position) {
                return Err(CoreError::param(
                    "seed_lanes",
                    format!("position {} is seeded twice", position),
                ));
            }
        }
        for &position in &self.seed_lanes {
            if let Some(mirror) = self.mirror_of(position) {
                validate::index("mirror lane", mirror, KECCAK_STATE_LANES)?;
                if !occupied.insert(mirror) {
                    return Err(CoreError::param(
                        "mirror_offset",
                        format!("mirror of position {} lands on an occupied lane", position),
                    ));
                }
            }
        }

        let id_vars = self.id_base_var..self.id_base_var + self.lane_size;
        validate::parameter(
            self.linearization.end <= id_vars.start || id_vars.end <= self.linearization.start,
            "linearization",
            "overlaps the id variables",
        )?;
        Ok(())
    }
}
