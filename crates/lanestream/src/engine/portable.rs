//! Byte-at-a-time lane XOR.

use crate::keystream::{LANE_SIZE, LaneKeys};

/// XORs `template` with `keys` into `dst`, one byte at a time.
///
/// # Panics
///
/// See [`Engine::xor_lanes`](super::Engine::xor_lanes).
pub fn xor_lanes(template: &[u8], dst: &mut [u8], keys: &LaneKeys) {
    super::check_lanes(template.len(), dst.len());

    let pad = lane_pad(keys);
    for (out, (byte, key_byte)) in dst.iter_mut().zip(template.iter().zip(pad.iter().cycle())) {
        *out = byte ^ key_byte;
    }
}

/// Expands the keys into the 32 bytes applied to every lane.
fn lane_pad(keys: &LaneKeys) -> [u8; LANE_SIZE] {
    let mut pad = [0u8; LANE_SIZE];
    for (chunk, key) in pad.chunks_exact_mut(8).zip(keys) {
        chunk.copy_from_slice(&key.to_le_bytes());
    }
    pad
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_is_little_endian() {
        let pad = lane_pad(&[0xAABB, 0, 0, 0x01 << 56]);
        assert_eq!(pad[0], 0xBB);
        assert_eq!(pad[1], 0xAA);
        assert_eq!(pad[31], 0x01);
    }

    #[test]
    fn xor_is_an_involution() {
        let template: Vec<u8> = (0..=255).collect();
        let keys = [3, 5, 7, 11];

        let mut once = vec![0u8; 256];
        xor_lanes(&template, &mut once, &keys);
        let mut twice = vec![0u8; 256];
        xor_lanes(&once, &mut twice, &keys);

        assert_eq!(twice, template);
    }
}
