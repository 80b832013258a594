//! Lanestream
//!
//! Deterministic, seekable pseudorandom byte streams. A stream is defined by
//! a 16 KiB random template and four subkeys drawn once from an
//! [`EntropySource`]. Every byte at an absolute offset is a pure function of
//! that seed material and the offset, so any position can be produced in O(1)
//! without replaying the stream from the start.
//!
//! # Architecture
//!
//! ```text
//! lanestream
//!   ├─ EntropySource   (injected seed bytes: time-seeded, fixed seed, OS, reader)
//!   ├─ SeedMaterial    (template + subkeys, redrawn only on construction/reset)
//!   ├─ block_keys      (block index -> four lane keys, pure)
//!   ├─ Engine          (template XOR keys, portable and word-wise variants)
//!   └─ RandomStream    (sequential read/seek/reset + offset-addressed read_at)
//! ```
//!
//! # Invariants
//!
//! - Access-path equivalence: `read` from 0, `seek` + `read`, and `read_at`
//!   all yield the same byte for the same offset.
//! - Engine equivalence: [`Engine::Portable`] and [`Engine::Words`] produce
//!   bit-identical output.
//! - `read_at` never touches the cursor and uses only call-local scratch, so
//!   it is safe to call concurrently through a shared reference.
//!
//! # Example
//!
//! ```
//! use lanestream::{RandomStream, SeededSource, StreamConfig};
//!
//! let mut stream = RandomStream::with_source(SeededSource::new(7), StreamConfig::bounded(100))?;
//! let mut buf = [0u8; 150];
//! let outcome = stream.read(&mut buf);
//! assert_eq!(outcome.written, 100);
//! assert!(outcome.end_of_stream);
//!
//! let mut again = [0u8; 10];
//! stream.read_at(&mut again, 0);
//! assert_eq!(again, buf[..10]);
//! # Ok::<(), lanestream::ConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod engine;
mod entropy;
mod error;
pub mod keystream;
mod read_at;
mod seed;
mod stream;

pub use config::StreamConfig;
pub use engine::Engine;
pub use entropy::{
    EntropySource, OsEntropy, ReaderSource, RngSource, SeededSource, TimeSeeded,
};
pub use error::{ConfigError, EntropyError, SeekError};
pub use keystream::{BLOCK_SIZE, LANE_SIZE, LaneKeys, block_keys, scramble};
pub use read_at::ReadAt;
pub use stream::{RandomStream, ReadOutcome, Whence};
