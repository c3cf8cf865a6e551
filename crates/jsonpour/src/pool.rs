//! Buffer recycling for decoders that are created over and over.
//!
//! A [`DecoderPool`] keeps the input buffers of finished decoders. Each
//! [`lease`](DecoderPool::lease) hands out a [`PooledDecoder`] over a new
//! source but backed by a recycled buffer. Returning the lease (by dropping
//! it or calling [`release`](PooledDecoder::release)) marks the decoder
//! pooled, so any decode call that somehow reaches it afterwards aborts with
//! [`ReuseAfterPool`](crate::ReuseAfterPool).
//!
//! The pool is meant for one thread: it is `!Sync`.

use alloc::{boxed::Box, vec::Vec};
use core::{
    cell::RefCell,
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{Decoder, DecoderOptions, Source};

/// A per-thread store of reusable decoder buffers.
///
/// # Examples
///
/// ```rust
/// use jsonpour::{DecoderPool, DecoderOptions};
///
/// let pool = DecoderPool::new(DecoderOptions::default());
/// for doc in [&b"1"[..], &b"22"[..], &b"333"[..]] {
///     let mut dec = pool.lease(doc);
///     let mut n = 0i64;
///     dec.decode_int(&mut n).unwrap();
///     assert_eq!(n.to_string().len(), doc.len());
/// }
/// assert_eq!(pool.idle(), 1);
/// ```
pub struct DecoderPool {
    buffers: RefCell<Vec<Vec<u8>>>,
    options: DecoderOptions,
    max_idle: usize,
}

impl fmt::Debug for DecoderPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderPool")
            .field("idle", &self.idle())
            .field("options", &self.options)
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

impl DecoderPool {
    const DEFAULT_MAX_IDLE: usize = 16;

    /// Creates an empty pool whose decoders use `options`.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self::with_max_idle(options, Self::DEFAULT_MAX_IDLE)
    }

    /// Creates an empty pool that keeps at most `max_idle` buffers.
    #[must_use]
    pub fn with_max_idle(options: DecoderOptions, max_idle: usize) -> Self {
        Self {
            buffers: RefCell::new(Vec::new()),
            options,
            max_idle,
        }
    }

    /// Hands out a decoder over `source`, reusing an idle buffer if one is
    /// available.
    pub fn lease<'src>(&self, source: impl Source + 'src) -> PooledDecoder<'_, 'src> {
        let buffer = self.buffers.borrow_mut().pop();
        let reused = buffer.is_some();
        let decoder = Decoder::with_buffer(
            Box::new(source),
            buffer.unwrap_or_default(),
            self.options,
        );
        log::debug!("leased decoder (reused buffer: {reused})");
        PooledDecoder {
            pool: self,
            decoder,
        }
    }

    /// Number of buffers waiting to be reused.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.buffers.borrow().len()
    }

    fn put_back(&self, buffer: Vec<u8>) {
        let mut buffers = self.buffers.borrow_mut();
        if buffers.len() < self.max_idle {
            buffers.push(buffer);
        } else {
            log::debug!("decoder pool full ({} idle), dropping buffer", self.max_idle);
        }
    }
}

/// A decoder on loan from a [`DecoderPool`].
///
/// Derefs to [`Decoder`]. The buffer goes back to the pool when the lease
/// is dropped.
pub struct PooledDecoder<'pool, 'src> {
    pool: &'pool DecoderPool,
    decoder: Decoder<'src>,
}

impl PooledDecoder<'_, '_> {
    /// Returns the decoder to its pool.
    pub fn release(self) {
        drop(self);
    }
}

impl fmt::Debug for PooledDecoder<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledDecoder").field(&self.decoder).finish()
    }
}

impl<'src> Deref for PooledDecoder<'_, 'src> {
    type Target = Decoder<'src>;

    fn deref(&self) -> &Self::Target {
        &self.decoder
    }
}

impl DerefMut for PooledDecoder<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.decoder
    }
}

impl Drop for PooledDecoder<'_, '_> {
    fn drop(&mut self) {
        if let Some(err) = self.decoder.error() {
            log::debug!("returning decoder to pool with recorded error: {err}");
        }
        let buffer = self.decoder.recycle();
        self.pool.put_back(buffer);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use rstest::rstest;

    use super::*;
    use crate::{ArrayFn, ArrayableFn, DecodeError, ObjectFn, VariableFn};

    #[test]
    fn buffers_are_recycled() {
        let pool = DecoderPool::new(DecoderOptions::default());
        assert_eq!(pool.idle(), 0);
        let mut dec = pool.lease(&b"\"a\""[..]);
        let mut s = String::new();
        dec.decode_string(&mut s).unwrap();
        dec.release();
        assert_eq!(pool.idle(), 1);

        let mut dec = pool.lease(&b"\"bc\""[..]);
        assert_eq!(pool.idle(), 0);
        dec.decode_string(&mut s).unwrap();
        assert_eq!(s, "bc");
        assert_eq!(dec.cursor(), 4);
        drop(dec);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn recycled_buffer_keeps_capacity_but_no_data() {
        let pool = DecoderPool::new(DecoderOptions::default());
        let mut first = pool.lease(&br#"{"long":"xxxxxxxxxxxxxxxx"}"#[..]);
        first.decode_object(&mut ObjectFn::empty()).unwrap();
        drop(first);
        let mut second = pool.lease(&b"7"[..]);
        assert!(second.data.is_empty());
        assert!(second.data.capacity() > 0);
        let mut n = 0i64;
        second.decode_int(&mut n).unwrap();
        assert_eq!(n, 7);
    }

    #[test]
    fn max_idle_caps_the_pool() {
        let pool = DecoderPool::with_max_idle(DecoderOptions::default(), 1);
        let a = pool.lease(&b"1"[..]);
        let b = pool.lease(&b"2"[..]);
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn leased_decoder_starts_clean() {
        let pool = DecoderPool::new(DecoderOptions::default());
        let mut dec = pool.lease(&b"[1]"[..]);
        dec.decode_string(&mut String::new()).unwrap();
        assert!(dec.error().is_some_and(DecodeError::is_unmarshal));
        dec.release();
        let dec = pool.lease(&b""[..]);
        assert!(dec.error().is_none());
        assert!(!dec.pooled);
    }

    fn object(dec: &mut Decoder<'_>) {
        let _ = dec.decode_object(&mut ObjectFn::empty());
    }

    fn array(dec: &mut Decoder<'_>) {
        let _ = dec.decode_array(&mut ArrayFn::empty());
    }

    fn variable(dec: &mut Decoder<'_>) {
        let _ = dec.decode_variable(&mut VariableFn::empty());
    }

    fn arrayable(dec: &mut Decoder<'_>) {
        let _ = dec.decode_arrayable(&mut ArrayableFn::empty());
    }

    fn string(dec: &mut Decoder<'_>) {
        let _ = dec.decode_string(&mut String::new());
    }

    fn int(dec: &mut Decoder<'_>) {
        let _ = dec.decode_int(&mut 0);
    }

    fn uint(dec: &mut Decoder<'_>) {
        let _ = dec.decode_uint(&mut 0);
    }

    fn float(dec: &mut Decoder<'_>) {
        let _ = dec.decode_float(&mut 0.0);
    }

    fn boolean(dec: &mut Decoder<'_>) {
        let _ = dec.decode_bool(&mut false);
    }

    #[rstest]
    #[case::object(object)]
    #[case::array(array)]
    #[case::variable(variable)]
    #[case::arrayable(arrayable)]
    #[case::string(string)]
    #[case::int(int)]
    #[case::uint(uint)]
    #[case::float(float)]
    #[case::boolean(boolean)]
    #[should_panic(expected = "decoder used after being returned to its pool")]
    fn pooled_decoder_refuses_every_entry_point(#[case] call: fn(&mut Decoder<'_>)) {
        let mut dec = Decoder::from_slice(b"null");
        let _ = dec.recycle();
        call(&mut dec);
    }
}
