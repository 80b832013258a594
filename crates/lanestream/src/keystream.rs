//! Block key derivation.
//!
//! The offset space is cut into 16 KiB blocks. Each block gets its own set of
//! four 64-bit lane keys, derived from the block index and the stream's
//! subkeys alone. No block depends on any other block, which is what makes
//! random access O(1).
//!
//! # Invariants
//!
//! - Purity: the same `(subkeys, block)` always yields the same keys
//! - Key sets are never cached; callers recompute them on every use

/// Log2 of [`BLOCK_SIZE`].
pub const BLOCK_SHIFT: u32 = 14;

/// Bytes per block. All bytes of a block share one key set.
pub const BLOCK_SIZE: usize = 1 << BLOCK_SHIFT;

/// Bytes per lane. A lane is XORed against the four keys, 8 bytes each.
pub const LANE_SIZE: usize = 32;

/// Number of keys (and subkeys) per lane.
pub const LANE_KEYS: usize = 4;

/// The four keys applied to every lane of one block.
pub type LaneKeys = [u64; LANE_KEYS];

const SCRAMBLE_A: u64 = 0x9E37_79B1_85EB_CA87;
const SCRAMBLE_B: u64 = 0xC2B2_AE3D_27D4_EB4F;
const AVALANCHE: u64 = 0x9FB2_1C65_1E98_DF25;

/// Multiplier that spreads consecutive block indices across the key space.
pub const GOLDEN64: u64 = 0x9E37_79B9_7F4A_7C15;

/// Avalanche-mixes a block index into a 64-bit base value.
///
/// An 8-byte finalizer in the style of XXH3's `rrmxmx`. Every step is
/// invertible, so distinct block indices never collide.
#[inline]
pub const fn scramble(block: u64) -> u64 {
    let mut h = block ^ (SCRAMBLE_A ^ SCRAMBLE_B);
    h ^= h.rotate_left(49) ^ h.rotate_left(24);
    h = h.wrapping_mul(AVALANCHE);
    h ^= (h >> 35).wrapping_add(8);
    h = h.wrapping_mul(AVALANCHE);
    h ^ (h >> 28)
}

/// Derives the lane keys for `block` from the stream's subkeys.
#[inline]
pub fn block_keys(subkeys: &LaneKeys, block: u64) -> LaneKeys {
    let base = scramble(block) ^ block.wrapping_mul(GOLDEN64);
    subkeys.map(|subkey| base ^ subkey)
}

/// Block index containing absolute `offset`.
#[inline]
pub const fn block_of(offset: u64) -> u64 {
    offset >> BLOCK_SHIFT
}

/// Position of `offset` inside its block.
#[inline]
pub const fn offset_in_block(offset: u64) -> usize {
    (offset & (BLOCK_SIZE as u64 - 1)) as usize
}
