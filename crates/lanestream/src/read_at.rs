//! Positional reads through `std::io` types.

use std::io;

use crate::stream::RandomStream;

/// Reads at an explicit offset through a shared reference.
///
/// Same shape as `std::os::unix::fs::FileExt::read_at`, usable on every
/// platform and by generic harness code.
pub trait ReadAt {
    /// Reads into `buf` starting at `offset`. `Ok(0)` with a non-empty `buf`
    /// means there is nothing at or past `offset`.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

    /// Fills `buf` completely from `offset`.
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] when the data ends first.
    fn read_exact_at(&self, mut buf: &mut [u8], mut offset: u64) -> io::Result<()> {
        while !buf.is_empty() {
            match self.read_at(buf, offset) {
                Ok(0) => break,
                Ok(n) => {
                    buf = &mut buf[n..];
                    offset = offset.checked_add(n as u64).ok_or_else(|| {
                        io::Error::new(io::ErrorKind::InvalidInput, "read offset overflows u64")
                    })?;
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
                Err(e) => return Err(e),
            }
        }
        if buf.is_empty() {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "failed to fill whole buffer"))
        }
    }
}

impl<S> ReadAt for RandomStream<S> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        Ok(Self::read_at(self, buf, offset).written)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }
}
