//! The seekable stream.
//!
//! [`RandomStream`] serves bytes two ways:
//!
//! - Sequential: [`read`](RandomStream::read), [`seek`](RandomStream::seek)
//!   and [`reset`](RandomStream::reset) move a cursor and need `&mut self`
//! - Offset-addressed: [`read_at`](RandomStream::read_at) takes the offset
//!   explicitly and only needs `&self`
//!
//! Both run the same lane walker, so the byte at an offset never depends on
//! how it was reached.
//!
//! # End of stream
//!
//! On a bounded stream the call that reaches the end reports it together with
//! its final bytes (`end_of_stream` set, `written > 0`). Every later call at
//! the end returns `written == 0` with `end_of_stream` set. `read` and
//! `read_at` follow the same rule. The [`io::Read`] adapter maps this onto
//! the usual `Ok(0)` convention.
//!
//! An unbounded stream still ends at `u64::MAX`: offsets never wrap.

use std::{fmt, io};

use crate::{
    config::StreamConfig,
    engine::Engine,
    entropy::{EntropySource, TimeSeeded},
    error::{ConfigError, SeekError},
    keystream::{BLOCK_SIZE, LANE_SIZE, block_keys, block_of, offset_in_block},
    seed::SeedMaterial,
};

/// Result of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutcome {
    /// Bytes written to the front of the buffer.
    pub written: usize,
    /// No bytes exist past the last one written.
    pub end_of_stream: bool,
}

/// Reference point for [`RandomStream::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Offset from byte 0.
    Start,
    /// Offset from the cursor.
    Current,
    /// Offset from the end of a bounded stream.
    End,
}

/// Deterministic pseudorandom byte stream with O(1) seeking.
///
/// The inherent `read` and `seek` shadow the [`io::Read`] and [`io::Seek`]
/// methods of the same name; call those through the traits when a
/// `std::io` signature is needed.
pub struct RandomStream<S = TimeSeeded> {
    source: S,
    material: SeedMaterial,
    engine: Engine,
    cursor: u64,
    size: Option<u64>,
}

impl RandomStream<TimeSeeded> {
    /// Builds a stream seeded from a fresh [`TimeSeeded`] generator.
    pub fn new(config: StreamConfig) -> Result<Self, ConfigError> {
        Self::with_source(TimeSeeded::new(), config)
    }
}

impl<S: EntropySource> RandomStream<S> {
    /// Builds a stream, drawing its seed material from `source`.
    ///
    /// The source is kept for [`reset`](Self::reset).
    pub fn with_source(mut source: S, config: StreamConfig) -> Result<Self, ConfigError> {
        let engine = config.resolved_engine();
        let material = SeedMaterial::draw(&mut source).inspect_err(|err| {
            tracing::warn!(error = %err, "seed source failed during stream construction");
        })?;

        tracing::debug!(engine = engine.name(), size = ?config.size, "random stream created");

        Ok(Self { source, material, engine, cursor: 0, size: config.size })
    }

    /// Redraws the seed material and rewinds to offset 0.
    ///
    /// The stream afterwards is unrelated to the one before, unless the
    /// source repeats itself. On error the stream is left as it was.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        let material = SeedMaterial::draw(&mut self.source).inspect_err(|err| {
            tracing::warn!(error = %err, "seed source failed during stream reset");
        })?;

        self.material = material;
        self.cursor = 0;
        tracing::debug!(engine = self.engine.name(), "random stream reset");
        Ok(())
    }
}

impl<S> RandomStream<S> {
    /// Reads from the cursor and advances it by the bytes written.
    pub fn read(&mut self, buf: &mut [u8]) -> ReadOutcome {
        let outcome = self.fill_at(buf, self.cursor);
        self.cursor += outcome.written as u64;
        outcome
    }

    /// Reads starting at `offset` without touching the cursor.
    ///
    /// Safe to call from several threads through a shared reference.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> ReadOutcome {
        self.fill_at(buf, offset)
    }

    /// Moves the cursor and returns the new absolute offset.
    ///
    /// Fails without moving on a negative target, on [`Whence::End`] for an
    /// unbounded stream, and on a target past the end of a bounded stream.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64, SeekError> {
        self.seek_to(i128::from(offset), whence)
    }

    /// Current cursor position.
    pub const fn position(&self) -> u64 {
        self.cursor
    }

    /// Stream length, `None` when unbounded.
    pub const fn size(&self) -> Option<u64> {
        self.size
    }

    /// Engine in use.
    pub const fn engine(&self) -> Engine {
        self.engine
    }

    /// Gives the seed source back.
    pub fn into_source(self) -> S {
        self.source
    }

    fn seek_to(&mut self, offset: i128, whence: Whence) -> Result<u64, SeekError> {
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => i128::from(self.cursor),
            Whence::End => i128::from(self.size.ok_or(SeekError::Unbounded)?),
        };
        let target = base + offset;

        if target < 0 {
            return Err(SeekError::Negative { target });
        }
        let target = u64::try_from(target).map_err(|_| SeekError::Overflow)?;
        if let Some(size) = self.size.filter(|&size| target > size) {
            return Err(SeekError::PastEnd { target, size });
        }

        tracing::trace!(offset = target, ?whence, "seek");
        self.cursor = target;
        Ok(target)
    }

    /// Shared body of `read` and `read_at`.
    fn fill_at(&self, buf: &mut [u8], offset: u64) -> ReadOutcome {
        let (len, end_of_stream) = self.clamp(offset, buf.len());
        self.apply_keystream(offset, &mut buf[..len]);
        ReadOutcome { written: len, end_of_stream }
    }

    /// Bytes available for a request of `requested` bytes at `offset`, and
    /// whether serving them reaches the end.
    ///
    /// An unbounded stream ends at `u64::MAX`.
    fn clamp(&self, offset: u64, requested: usize) -> (usize, bool) {
        let end = self.size.unwrap_or(u64::MAX);
        match usize::try_from(end.saturating_sub(offset)) {
            Ok(remaining) if remaining <= requested => (remaining, true),
            _ => (requested, false),
        }
    }

    /// Writes keystream bytes for `[offset, offset + dst.len())` into `dst`.
    fn apply_keystream(&self, offset: u64, dst: &mut [u8]) {
        let template = self.material.template_bytes();
        let mut pos = offset;
        let mut filled = 0;

        while filled < dst.len() {
            let out = &mut dst[filled..];
            let keys = block_keys(&self.material.subkeys, block_of(pos));
            let in_block = offset_in_block(pos);
            let in_lane = in_block % LANE_SIZE;

            let written = if in_lane != 0 || out.len() < LANE_SIZE {
                let lane_start = in_block - in_lane;
                let mut lane = [0u8; LANE_SIZE];
                self.engine.xor_lanes(
                    &template[lane_start..lane_start + LANE_SIZE],
                    &mut lane,
                    &keys,
                );
                let n = (LANE_SIZE - in_lane).min(out.len());
                out[..n].copy_from_slice(&lane[in_lane..in_lane + n]);
                n
            } else {
                let run = (BLOCK_SIZE - in_block).min(out.len()) / LANE_SIZE * LANE_SIZE;
                self.engine.xor_lanes(&template[in_block..in_block + run], &mut out[..run], &keys);
                run
            };

            filled += written;
            pos += written as u64;
        }
    }
}

impl<S> fmt::Debug for RandomStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomStream")
            .field("engine", &self.engine)
            .field("cursor", &self.cursor)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<S> io::Read for RandomStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Self::read(self, buf).written)
    }
}

impl<S> io::Seek for RandomStream<S> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let target = match pos {
            io::SeekFrom::Start(offset) => self.seek_to(i128::from(offset), Whence::Start),
            io::SeekFrom::Current(delta) => self.seek_to(i128::from(delta), Whence::Current),
            io::SeekFrom::End(delta) => self.seek_to(i128::from(delta), Whence::End),
        };
        target.map_err(io::Error::from)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.cursor)
    }
}
