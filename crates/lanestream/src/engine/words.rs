//! Word-wise lane XOR.
//!
//! When both template and destination are 8-byte aligned the bytes are viewed
//! as native `u64` words and XORed with the keys converted to the in-memory
//! form of their little-endian encoding. Otherwise the bytes are viewed as
//! unaligned little-endian words. Both views come from `zerocopy`, so there is
//! no `unsafe` here.

use zerocopy::{FromBytes, byteorder::little_endian::U64};

use crate::keystream::{LANE_KEYS, LaneKeys};

const WORD: usize = size_of::<u64>();

/// XORs `template` with `keys` into `dst`, eight bytes at a time.
///
/// # Panics
///
/// See [`Engine::xor_lanes`](super::Engine::xor_lanes).
pub fn xor_lanes(template: &[u8], dst: &mut [u8], keys: &LaneKeys) {
    super::check_lanes(template.len(), dst.len());
    let src = &template[..dst.len()];

    if dst.as_ptr().addr() % WORD == 0 {
        if let (Ok(src), Ok(out)) = (<[u64]>::ref_from_bytes(src), <[u64]>::mut_from_bytes(&mut *dst))
        {
            xor_native(src, out, keys);
            return;
        }
    }

    if let (Ok(src), Ok(out)) = (<[U64]>::ref_from_bytes(src), <[U64]>::mut_from_bytes(&mut *dst)) {
        xor_little_endian(src, out, keys);
        return;
    }

    // Lane-multiple lengths always form whole words; kept for completeness.
    super::portable::xor_lanes(src, dst, keys);
}

fn xor_native(src: &[u64], out: &mut [u64], keys: &LaneKeys) {
    let keys = keys.map(u64::to_le);
    for (out_lane, src_lane) in out.chunks_exact_mut(LANE_KEYS).zip(src.chunks_exact(LANE_KEYS)) {
        for ((word, source), key) in out_lane.iter_mut().zip(src_lane).zip(&keys) {
            *word = source ^ key;
        }
    }
}

fn xor_little_endian(src: &[U64], out: &mut [U64], keys: &LaneKeys) {
    for (out_lane, src_lane) in out.chunks_exact_mut(LANE_KEYS).zip(src.chunks_exact(LANE_KEYS)) {
        for ((word, source), key) in out_lane.iter_mut().zip(src_lane).zip(keys) {
            word.set(source.get() ^ key);
        }
    }
}
