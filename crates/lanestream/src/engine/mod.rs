//! Lane XOR engines.
//!
//! An engine turns template bytes into keystream bytes: every 32-byte lane of
//! the template is XORed with the four block keys, 8 bytes per key, keys
//! encoded little-endian. Two interchangeable implementations exist:
//!
//! - [`portable`]: byte-at-a-time, no assumptions about the target
//! - [`words`]: 64-bit word loads and stores through `zerocopy` views
//!
//! Both must agree bit-for-bit on every valid input. The stream picks one at
//! construction via [`Engine::detect`] unless the config forces a choice.
//!
//! # Contract
//!
//! Output length must be a multiple of [`LANE_SIZE`] and the template must be
//! at least as long as the output. Violations are bugs in the caller and
//! panic instead of producing truncated output.

pub mod portable;
pub mod words;

use serde::{Deserialize, Serialize};

use crate::keystream::{LANE_SIZE, LaneKeys};

/// Selects the lane XOR implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Byte-oriented implementation.
    Portable,
    /// 64-bit word implementation.
    Words,
}

impl Engine {
    /// Picks the engine for the current target.
    ///
    /// Word access pays off on 64-bit targets; everything else gets the
    /// portable engine.
    pub const fn detect() -> Self {
        if cfg!(target_pointer_width = "64") { Self::Words } else { Self::Portable }
    }

    /// Short name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Words => "words",
        }
    }

    /// XORs `template` lanes with `keys` into `dst`.
    ///
    /// # Panics
    ///
    /// If `dst.len()` is not a multiple of [`LANE_SIZE`] or `template` is
    /// shorter than `dst`.
    #[inline]
    pub fn xor_lanes(self, template: &[u8], dst: &mut [u8], keys: &LaneKeys) {
        match self {
            Self::Portable => portable::xor_lanes(template, dst, keys),
            Self::Words => words::xor_lanes(template, dst, keys),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::detect()
    }
}

/// Enforces the engine contract.
#[inline]
fn check_lanes(template_len: usize, dst_len: usize) {
    assert!(
        dst_len % LANE_SIZE == 0,
        "lane XOR length {dst_len} is not a multiple of {LANE_SIZE}"
    );
    assert!(
        template_len >= dst_len,
        "lane XOR needs {dst_len} template bytes, only {template_len} available"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_is_stable() {
        assert_eq!(Engine::detect(), Engine::detect());
        assert_eq!(Engine::default(), Engine::detect());
    }

    #[test]
    fn zero_template_yields_keys() {
        let keys = [0x0102_0304_0506_0708, 1, u64::MAX, 0];
        for engine in [Engine::Portable, Engine::Words] {
            let mut out = [0u8; 64];
            engine.xor_lanes(&[0u8; 64], &mut out, &keys);

            assert_eq!(out[..8], [8, 7, 6, 5, 4, 3, 2, 1], "{}", engine.name());
            assert_eq!(out[8..16], 1u64.to_le_bytes());
            assert_eq!(out[16..24], [0xff; 8]);
            assert_eq!(out[24..32], [0; 8]);
            assert_eq!(out[..32], out[32..]);
        }
    }

    #[test]
    fn empty_output_is_valid() {
        for engine in [Engine::Portable, Engine::Words] {
            engine.xor_lanes(&[], &mut [], &[1, 2, 3, 4]);
        }
    }

    #[test]
    #[should_panic(expected = "not a multiple")]
    fn rejects_partial_lane() {
        Engine::Portable.xor_lanes(&[0u8; 64], &mut [0u8; 33], &[0; 4]);
    }

    #[test]
    #[should_panic(expected = "template bytes")]
    fn rejects_short_template() {
        Engine::Words.xor_lanes(&[0u8; 32], &mut [0u8; 64], &[0; 4]);
    }
}
