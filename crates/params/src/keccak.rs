//! Keccak-f round constants, ρ offsets and π mapping

/// Number of rounds of the full Keccak-f[1600] permutation
pub const KECCAK_F_ROUND_COUNT: usize = 24;

/// Number of lanes in the 5×5 state
pub const KECCAK_STATE_LANES: usize = 25;

/// Side of the state grid; lane `(x, y)` lives at index `5 * y + x`
pub const KECCAK_GRID: usize = 5;

/// Widest supported lane, in bits (Keccak-f[1600])
pub const MAX_LANE_SIZE: usize = 64;

/// Keccak round constants.
pub const RC: [u64; KECCAK_F_ROUND_COUNT] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rotation offsets for the ρ step, in the order the combined ρ+π walk visits lanes.
pub const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// π-mapping indexes.
pub const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Returns true for the lane widths of the Keccak-f[25·w] family (1, 2, 4, …, 64).
pub const fn is_valid_lane_size(lane_size: usize) -> bool {
    lane_size != 0 && lane_size <= MAX_LANE_SIZE && lane_size.is_power_of_two()
}
