//! The pull decoder: buffered input, a cursor, and the terminal error.
//!
//! Every decode operation is a method on [`Decoder`]. Each comes in two
//! flavours:
//!
//! - `decode_*` entry points are used once per document, from outside any
//!   callback. They check the reuse guard first.
//! - the bare names (`object`, `string`, `variable`, `arrayable`, ...) are
//!   used from inside a capability callback. They mark the value consumed so
//!   the enclosing object or array loop does not skip it a second time.
//!
//! Data lives in caller-owned targets. The decoder only keeps the input it
//! has pulled so far, the cursor, and the last error recorded by a lenient
//! path.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::fmt;

use bstr::BStr;

use crate::{
    DecodeError, DecoderOptions, ReuseAfterPool, Source, SyntaxError, Target, ValueKind,
};

/// A pull-based JSON decoder over a [`Source`].
///
/// # Examples
///
/// ```rust
/// use jsonpour::{Decoder, ObjectFn};
///
/// let mut name = String::new();
/// let mut dec = Decoder::from_slice(br#"{"name":"john","age":7}"#);
/// dec.decode_object(&mut ObjectFn::new(|dec, key| match key {
///     "name" => dec.string(&mut name),
///     _ => Ok(()),
/// }))
/// .unwrap();
/// assert_eq!(name, "john");
/// assert!(dec.error().is_none());
/// ```
pub struct Decoder<'src> {
    source: Box<dyn Source + 'src>,
    pub(crate) data: Vec<u8>,
    pub(crate) cursor: usize,
    end_of_input: bool,
    err: Option<DecodeError>,
    /// Set by nested entry points once they consumed a value.
    pub(crate) called: bool,
    pub(crate) depth: usize,
    pub(crate) pooled: bool,
    /// Reused storage for object keys.
    pub(crate) key_scratch: String,
    pub(crate) options: DecoderOptions,
}

impl fmt::Debug for Decoder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("buffered", &BStr::new(&self.data[self.cursor..]))
            .field("cursor", &self.cursor)
            .field("end_of_input", &self.end_of_input)
            .field("err", &self.err)
            .field("depth", &self.depth)
            .field("pooled", &self.pooled)
            .finish_non_exhaustive()
    }
}

impl<'src> Decoder<'src> {
    /// Creates a decoder over `source` with default options.
    pub fn new(source: impl Source + 'src) -> Self {
        Self::with_options(source, DecoderOptions::default())
    }

    /// Creates a decoder over `source`.
    pub fn with_options(source: impl Source + 'src, options: DecoderOptions) -> Self {
        Self::with_buffer(Box::new(source), Vec::new(), options)
    }

    /// Creates a decoder over an in-memory document.
    #[must_use]
    pub fn from_slice(input: &'src [u8]) -> Self {
        Self::new(input)
    }

    /// Creates a decoder over any [`std::io::Read`].
    #[cfg(feature = "std")]
    pub fn from_reader(reader: impl std::io::Read + 'src) -> Self {
        Self::new(crate::IoSource(reader))
    }

    pub(crate) fn with_buffer(
        source: Box<dyn Source + 'src>,
        mut data: Vec<u8>,
        options: DecoderOptions,
    ) -> Self {
        data.clear();
        Self {
            source,
            data,
            cursor: 0,
            end_of_input: false,
            err: None,
            called: false,
            depth: 0,
            pooled: false,
            key_scratch: String::new(),
            options,
        }
    }

    /// The options this decoder was built with.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// The absolute byte offset of the cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The terminal error recorded by a lenient path, if any.
    ///
    /// Shape mismatches (a string where an arrayable was expected, an
    /// object where an integer was expected, ...) do not fail the call that
    /// met them. They are recorded here and the offending value is skipped,
    /// so one bad field does not abort the rest of the document.
    #[must_use]
    pub fn error(&self) -> Option<&DecodeError> {
        self.err.as_ref()
    }

    /// Removes and returns the terminal error.
    pub fn take_error(&mut self) -> Option<DecodeError> {
        self.err.take()
    }

    /// Consumes the decoder, returning the terminal error if one was
    /// recorded.
    ///
    /// # Errors
    ///
    /// Returns the recorded error.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(crate) fn record(&mut self, err: DecodeError) {
        self.err = Some(err);
    }

    /// Aborts when the decoder was already handed back to its pool.
    pub(crate) fn guard(&self) {
        if self.pooled {
            panic!("{}", ReuseAfterPool);
        }
    }

    /// Marks the decoder pooled and hands its buffer back.
    pub(crate) fn recycle(&mut self) -> Vec<u8> {
        self.pooled = true;
        self.cursor = 0;
        core::mem::take(&mut self.data)
    }

    /// Pulls more input. Returns `false` once the source is exhausted.
    pub(crate) fn fill(&mut self) -> Result<bool, DecodeError> {
        if self.end_of_input {
            return Ok(false);
        }
        let start = self.data.len();
        let want = self.options.buffer_size.max(1);
        self.data.resize(start + want, 0);
        let res = self.source.fill(&mut self.data[start..]);
        let read = match res {
            Ok(read) => read.min(want),
            Err(e) => {
                self.data.truncate(start);
                return Err(e);
            }
        };
        self.data.truncate(start + read);
        log::trace!("refilled {read} bytes at offset {start}");
        if read == 0 {
            self.end_of_input = true;
        }
        Ok(read > 0)
    }

    /// The byte under the cursor, refilling if needed. `None` at end of
    /// input.
    #[inline]
    pub(crate) fn current(&mut self) -> Result<Option<u8>, DecodeError> {
        while self.cursor >= self.data.len() {
            if !self.fill()? {
                return Ok(None);
            }
        }
        Ok(Some(self.data[self.cursor]))
    }

    /// Like [`current`](Self::current) but treats end of input as a syntax
    /// error.
    #[inline]
    pub(crate) fn require(&mut self) -> Result<u8, DecodeError> {
        match self.current()? {
            Some(b) => Ok(b),
            None => Err(self.unexpected_end()),
        }
    }

    pub(crate) fn syntax(&self, source: SyntaxError, position: usize) -> DecodeError {
        DecodeError::InvalidJson { source, position }
    }

    pub(crate) fn invalid_char(&self, position: usize) -> DecodeError {
        self.syntax(SyntaxError::InvalidCharacter(self.data[position]), position)
    }

    pub(crate) fn unexpected_end(&self) -> DecodeError {
        self.syntax(SyntaxError::UnexpectedEndOfInput, self.cursor)
    }

    pub(crate) fn enter(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(self.syntax(
                SyntaxError::DepthLimitExceeded(self.options.max_depth),
                self.cursor,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Runs a capability callback that is expected to consume one value.
    ///
    /// When the callback returns `Ok` without consuming anything, the value
    /// is skipped. Returns whether the callback consumed it.
    pub(crate) fn consume_with(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), DecodeError>,
    ) -> Result<bool, DecodeError> {
        let outer = core::mem::replace(&mut self.called, false);
        let res = f(self);
        let consumed = self.called;
        self.called = outer;
        res?;
        if !consumed {
            self.skip_next()?;
        }
        Ok(consumed)
    }

    /// The lenient shape-mismatch policy: record, skip, report success.
    ///
    /// `b` must be the classified leading byte under the cursor.
    pub(crate) fn mismatch(
        &mut self,
        expected: Target,
        b: u8,
        found: ValueKind,
    ) -> Result<(), DecodeError> {
        log::debug!(
            "cannot unmarshal {found} into {expected} at byte {}, skipping",
            self.cursor
        );
        self.record(DecodeError::InvalidUnmarshal { expected, found });
        self.skip_classified(b, found)
    }

    /// Marks the current value as consumed for the enclosing loop.
    #[inline]
    pub(crate) fn mark_consumed(&mut self) {
        self.called = true;
    }
}
