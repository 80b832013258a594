//! Seed material: the raw template and the subkeys.

use zerocopy::{FromZeros, IntoBytes, byteorder::little_endian::U64};

use crate::{
    entropy::EntropySource,
    error::ConfigError,
    keystream::{BLOCK_SIZE, LANE_KEYS, LANE_SIZE, LaneKeys},
};

/// Template length in 64-bit words. Word storage keeps the template aligned
/// for the word engine.
const TEMPLATE_WORDS: usize = BLOCK_SIZE / size_of::<u64>();

/// Everything a stream derives its bytes from.
pub(crate) struct SeedMaterial {
    /// One block of raw random bytes.
    pub template: Box<[u64]>,
    /// Mixed into every block's keys.
    pub subkeys: LaneKeys,
}

impl SeedMaterial {
    /// Draws the template, then 32 bytes of little-endian subkeys.
    ///
    /// Nothing is kept if either draw fails.
    pub fn draw<S: EntropySource + ?Sized>(source: &mut S) -> Result<Self, ConfigError> {
        let mut template = vec![0u64; TEMPLATE_WORDS].into_boxed_slice();
        source
            .fill_bytes(template.as_mut_bytes())
            .map_err(|source| ConfigError::SeedUnavailable { needed: BLOCK_SIZE, source })?;

        let mut raw = [U64::new_zeroed(); LANE_KEYS];
        source
            .fill_bytes(raw.as_mut_bytes())
            .map_err(|source| ConfigError::SeedUnavailable { needed: LANE_SIZE, source })?;

        Ok(Self { template, subkeys: raw.map(U64::get) })
    }

    pub fn template_bytes(&self) -> &[u8] {
        self.template.as_bytes()
    }
}
