//! Engine equivalence tests
//!
//! The portable and word engines must agree bit-for-bit on every valid input,
//! including destinations that are not word aligned.

use lanestream::{
    Engine, LANE_SIZE,
    engine::{portable, words},
};
use proptest::prelude::*;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_template(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
    let mut template = vec![0u8; len];
    rng.fill_bytes(&mut template);
    template
}

#[test]
fn engines_agree_on_reference_lengths() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);

    for len in [0, 32, 64, 992, 1_048_576] {
        let template = random_template(&mut rng, len);
        let keys: [u64; 4] = rng.r#gen();

        let mut from_portable = vec![0u8; len];
        let mut from_words = vec![0u8; len];
        portable::xor_lanes(&template, &mut from_portable, &keys);
        words::xor_lanes(&template, &mut from_words, &keys);

        assert!(from_portable == from_words, "engines disagree at length {len}");
    }
}

#[test]
fn engines_agree_on_every_destination_alignment() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let template = random_template(&mut rng, 4096);
    let keys: [u64; 4] = rng.r#gen();

    for shift in 0..8 {
        let mut backing_portable = vec![0u8; 4096 + 8];
        let mut backing_words = vec![0u8; 4096 + 8];
        let out_portable = &mut backing_portable[shift..shift + 4096];
        let out_words = &mut backing_words[shift..shift + 4096];

        Engine::Portable.xor_lanes(&template, out_portable, &keys);
        Engine::Words.xor_lanes(&template, out_words, &keys);

        assert_eq!(out_portable, out_words, "shift {shift}");
    }
}

#[test]
fn longer_template_is_allowed() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let template = random_template(&mut rng, 1024);
    let keys = [1, 2, 3, 4];

    let mut a = vec![0u8; 96];
    let mut b = vec![0u8; 96];
    Engine::Portable.xor_lanes(&template, &mut a, &keys);
    Engine::Words.xor_lanes(&template, &mut b, &keys);

    assert_eq!(a, b);
}

#[test]
fn prop_engines_agree() {
    proptest!(|(
        seed in any::<u64>(),
        lanes in 0usize..128,
        keys in any::<[u64; 4]>(),
        shift in 0usize..8,
    )| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let len = lanes * LANE_SIZE;
        let backing = random_template(&mut rng, len + shift);
        let template = &backing[shift..];

        let mut a = vec![0u8; len];
        let mut b = vec![0u8; len];
        portable::xor_lanes(template, &mut a, &keys);
        words::xor_lanes(template, &mut b, &keys);

        // PROPERTY: engines are interchangeable
        prop_assert_eq!(a, b);
    });
}
