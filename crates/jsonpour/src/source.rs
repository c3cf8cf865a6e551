//! Byte sources the decoder pulls from when its buffer runs dry.

use crate::DecodeError;

/// A pull-based byte source.
///
/// `fill` writes up to `buf.len()` bytes and returns how many it wrote.
/// Returning `0` signals end of input. Implementations may block.
pub trait Source {
    /// Writes the next bytes into `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Read`] when the underlying input fails.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError>;
}

impl Source for &[u8] {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        let n = buf.len().min(self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(n)
    }
}

/// Adapts any [`std::io::Read`] into a [`Source`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R>(pub R);

#[cfg(feature = "std")]
impl<R: std::io::Read> Source for IoSource<R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        use alloc::string::ToString;
        loop {
            match self.0.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(DecodeError::Read(e.to_string())),
            }
        }
    }
}
