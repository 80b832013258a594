//! Seed sources.
//!
//! A stream draws its template and subkeys from an [`EntropySource`] at
//! construction and on every reset. The source is injected, never global:
//!
//! - [`TimeSeeded`]: default, a generator keyed to the wall clock
//! - [`SeededSource`]: fixed seed, identical streams across runs
//! - [`OsEntropy`]: operating system entropy
//! - [`RngSource`]: any `rand` generator
//! - [`ReaderSource`]: any byte reader, e.g. `std::io::repeat(0)`
//!
//! Unpredictability is not a goal of the stream, so the time-seeded default
//! only has to make separate streams unrelated, not unguessable.

use std::{
    fmt,
    io::Read,
    time::{SystemTime, UNIX_EPOCH},
};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::EntropyError;

/// Supplies raw seed bytes to a stream.
///
/// # Invariants
///
/// - Fill: on `Ok`, every byte of `dest` has been written
/// - Determinism: sources built from the same seed yield the same sequence
pub trait EntropySource {
    /// Fills `dest` completely or fails.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill_bytes(dest)
    }
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill_bytes(dest)
    }
}

/// Process-local generator seeded from the wall clock.
///
/// Two instances created at different instants produce unrelated streams.
#[derive(Clone)]
pub struct TimeSeeded {
    rng: ChaCha8Rng,
}

impl TimeSeeded {
    /// Seeds a new generator from the current time and process id.
    pub fn new() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs().wrapping_mul(1_000_000_000) ^ u64::from(d.subsec_nanos()));
        let seed = now ^ (u64::from(std::process::id()) << 32);
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Default for TimeSeeded {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimeSeeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSeeded").finish_non_exhaustive()
    }
}

impl EntropySource for TimeSeeded {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        self.rng.fill_bytes(dest);
        Ok(())
    }
}

/// Generator with a caller-chosen seed.
///
/// Streams built from `SeededSource::new(n)` are identical for the same `n`.
/// A reset draws the next bytes of the generator, so the reset stream is
/// reproducible too but differs from the first one.
#[derive(Clone)]
pub struct SeededSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a source from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// The seed this source was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl fmt::Debug for SeededSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededSource").field("seed", &self.seed).finish_non_exhaustive()
    }
}

impl EntropySource for SeededSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        self.rng.fill_bytes(dest);
        Ok(())
    }
}

/// Operating system entropy via `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::fill(dest).map_err(EntropyError::Os)
    }
}

/// Adapts any `rand` generator, surfacing `try_fill_bytes` failures.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: RngCore> EntropySource for RngSource<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        self.0.try_fill_bytes(dest).map_err(EntropyError::Rng)
    }
}

/// Pulls seed bytes from a reader. A short read is an error.
#[derive(Debug)]
pub struct ReaderSource<R>(pub R);

impl<R: Read> EntropySource for ReaderSource<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        self.0.read_exact(dest)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn seeded_sources_agree() {
        let mut a = SeededSource::new(99);
        let mut b = SeededSource::new(99);
        let (mut x, mut y) = ([0u8; 64], [0u8; 64]);

        a.fill_bytes(&mut x).expect("infallible");
        b.fill_bytes(&mut y).expect("infallible");

        assert_eq!(x, y);
        assert_eq!(a.seed(), 99);
    }

    #[test]
    fn seeded_source_advances() {
        let mut source = SeededSource::new(1);
        let (mut x, mut y) = ([0u8; 32], [0u8; 32]);

        source.fill_bytes(&mut x).expect("infallible");
        source.fill_bytes(&mut y).expect("infallible");

        assert_ne!(x, y);
    }

    #[test]
    fn os_entropy_fills_buffer() {
        let mut bytes = [0u8; 64];
        OsEntropy.fill_bytes(&mut bytes).expect("OS entropy available");

        let non_zero_count = bytes.iter().filter(|&&b| b != 0).count();
        assert!(non_zero_count > 32, "Most bytes should be non-zero");
    }

    #[test]
    fn reader_source_reports_short_read() {
        let mut source = ReaderSource(&[1u8, 2, 3][..]);
        let mut bytes = [0u8; 8];

        let err = source.fill_bytes(&mut bytes).expect_err("reader is too short");
        assert!(matches!(err, EntropyError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn reader_source_repeats() {
        let mut source = ReaderSource(io::repeat(0xAB));
        let mut bytes = [0u8; 16];

        source.fill_bytes(&mut bytes).expect("repeat never ends");
        assert_eq!(bytes, [0xAB; 16]);
    }

    #[test]
    fn rng_source_wraps_generator() {
        let mut a = RngSource(ChaCha8Rng::seed_from_u64(5));
        let mut b = SeededSource::new(5);
        let (mut x, mut y) = ([0u8; 32], [0u8; 32]);

        a.fill_bytes(&mut x).expect("chacha never fails");
        b.fill_bytes(&mut y).expect("infallible");

        assert_eq!(x, y);
    }

    #[test]
    fn boxed_and_borrowed_sources_forward() {
        let mut boxed: Box<dyn EntropySource> = Box::new(SeededSource::new(3));
        let mut plain = SeededSource::new(3);
        let (mut x, mut y) = ([0u8; 16], [0u8; 16]);

        (&mut boxed).fill_bytes(&mut x).expect("infallible");
        plain.fill_bytes(&mut y).expect("infallible");

        assert_eq!(x, y);
    }
}
