//! Fuzz target for [`RandomStream`] access paths
//!
//! Catch any divergence between sequential and offset-addressed reads
//!
//! # Strategy
//!
//! - Operation sequences: arbitrary reads, seeks, and positional reads
//! - Bounds: optional small size bound so end-of-stream is hit often
//! - Alignment: arbitrary offsets and lengths cross lane and block edges
//!
//! # Invariants
//!
//! - `read` returns the same bytes `read_at` returns at the old cursor
//! - `read_at` agrees with `seek` + `read` and with a split `read_at`
//! - The cursor advances by exactly the bytes written
//! - The cursor never exceeds the bound
//! - A failed seek leaves the cursor untouched
//! - End-of-stream is reported iff the returned bytes reach the bound
//! - NEVER panic on any operation sequence

#![no_main]

use std::io::{Seek, SeekFrom};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lanestream::{RandomStream, SeededSource, StreamConfig, Whence};

#[derive(Debug, Clone, Arbitrary)]
enum StreamOp {
    Read { len: u16 },
    ReadAt { offset: u32, len: u16 },
    Seek { offset: i32, whence: FuzzWhence },
    Reset,
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum FuzzWhence {
    Start,
    Current,
    End,
}

impl From<FuzzWhence> for Whence {
    fn from(whence: FuzzWhence) -> Self {
        match whence {
            FuzzWhence::Start => Whence::Start,
            FuzzWhence::Current => Whence::Current,
            FuzzWhence::End => Whence::End,
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    seed: u64,
    /// Size bound, `None` for an unbounded stream.
    size: Option<u32>,
    ops: Vec<StreamOp>,
}

fuzz_target!(|input: FuzzInput| {
    let size = input.size.map(u64::from);
    let config = StreamConfig::unbounded().with_size(size);
    let Ok(mut stream) = RandomStream::with_source(SeededSource::new(input.seed), config) else {
        return;
    };

    for op in input.ops {
        match op {
            StreamOp::Read { len } => {
                let before = stream.position();
                let mut buf = vec![0u8; usize::from(len)];
                let outcome = stream.read(&mut buf);

                let mut expected = vec![0u8; usize::from(len)];
                let direct = stream.read_at(&mut expected, before);

                assert_eq!(outcome, direct, "read and read_at disagree on outcome");
                assert_eq!(buf, expected, "read and read_at disagree on bytes");
                assert_eq!(stream.position(), before + outcome.written as u64);
                if let Some(size) = size {
                    assert!(stream.position() <= size);
                    assert_eq!(outcome.end_of_stream, stream.position() == size);
                }
            },
            StreamOp::ReadAt { offset: raw, len } => {
                let offset = u64::from(raw);
                let mut buf = vec![0u8; usize::from(len)];
                let outcome = stream.read_at(&mut buf, offset);
                assert!(outcome.written <= buf.len());
                if size.is_none() {
                    assert_eq!(outcome.written, buf.len());
                    assert!(!outcome.end_of_stream);
                }

                // Same bytes through the cursor, then put the cursor back.
                let before = stream.position();
                match stream.seek(i64::from(raw), Whence::Start) {
                    Ok(_) => {
                        let mut via_cursor = vec![0u8; usize::from(len)];
                        let sequential = stream.read(&mut via_cursor);
                        assert_eq!(outcome, sequential, "read_at and seek+read disagree on outcome");
                        assert_eq!(buf, via_cursor, "read_at and seek+read disagree on bytes");
                        Seek::seek(&mut stream, SeekFrom::Start(before)).expect("cursor was in range");
                    },
                    Err(_) => {
                        assert_eq!(outcome.written, 0);
                        assert!(outcome.end_of_stream);
                        assert_eq!(stream.position(), before);
                    },
                }

                // A split read at the same offset stitches to the same bytes.
                let mid = buf.len() / 2;
                let mut split = vec![0u8; buf.len()];
                let (head, tail) = split.split_at_mut(mid);
                let first = stream.read_at(head, offset);
                stream.read_at(tail, offset + first.written as u64);
                assert_eq!(split[..outcome.written], buf[..outcome.written]);
            },
            StreamOp::Seek { offset, whence } => {
                let before = stream.position();
                match stream.seek(i64::from(offset), whence.into()) {
                    Ok(at) => assert_eq!(stream.position(), at),
                    Err(_) => assert_eq!(stream.position(), before),
                }
            },
            StreamOp::Reset => {
                stream.reset().expect("seeded source never fails");
                assert_eq!(stream.position(), 0);
            },
        }
    }
});
