//! Skipping whole values without decoding them.

use alloc::vec::Vec;

use crate::{
    DecodeError, Decoder, SyntaxError, ValueKind,
    classify::is_whitespace,
    literal::Literal,
};

impl Decoder<'_> {
    /// Consumes exactly one value of any shape, leading separators included.
    ///
    /// The cursor ends one past the value, where a sibling value (or the
    /// enclosing closer) would begin.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeError::InvalidJson`] when the value is malformed.
    pub fn skip_value(&mut self) -> Result<(), DecodeError> {
        self.skip_next()?;
        self.mark_consumed();
        Ok(())
    }

    pub(crate) fn skip_next(&mut self) -> Result<(), DecodeError> {
        let (b, kind) = self.classify()?;
        self.skip_classified(b, kind)
    }

    pub(crate) fn skip_classified(&mut self, b: u8, kind: ValueKind) -> Result<(), DecodeError> {
        match kind {
            ValueKind::String => {
                self.cursor += 1;
                self.skip_string_body()
            }
            ValueKind::Number => self.scan_number().map(|_| ()),
            ValueKind::Boolean | ValueKind::Null => match Literal::from_leading(b) {
                Some(lit) => self.consume_literal(lit),
                None => Err(self.invalid_char(self.cursor)),
            },
            ValueKind::Object => {
                self.cursor += 1;
                self.skip_container(alloc::vec![b'}'])
            }
            ValueKind::Array => {
                self.cursor += 1;
                self.skip_container(alloc::vec![b']'])
            }
        }
    }

    /// Skips the rest of a string whose opening quote was consumed.
    pub(crate) fn skip_string_body(&mut self) -> Result<(), DecodeError> {
        loop {
            let b = self.require()?;
            self.cursor += 1;
            match b {
                b'"' => return Ok(()),
                b'\\' => {
                    self.require()?;
                    self.cursor += 1;
                }
                _ => {}
            }
        }
    }

    /// Skips to the matching closer of every container on `closers`.
    ///
    /// Only nesting is checked here; commas and colons are not.
    pub(crate) fn skip_container(&mut self, mut closers: Vec<u8>) -> Result<(), DecodeError> {
        let base = self.depth;
        for _ in 0..closers.len() {
            self.enter()?;
        }
        let res = self.skip_container_inner(&mut closers);
        self.depth = base;
        res
    }

    /// Skips the rest of a container the caller already entered.
    pub(crate) fn skip_rest_of_entered(&mut self, closer: u8) -> Result<(), DecodeError> {
        let base = self.depth;
        let res = self.skip_container_inner(&mut alloc::vec![closer]);
        self.depth = base;
        res
    }

    fn skip_container_inner(&mut self, closers: &mut Vec<u8>) -> Result<(), DecodeError> {
        while let Some(&want) = closers.last() {
            let b = self.require()?;
            match b {
                b'"' => {
                    self.cursor += 1;
                    self.skip_string_body()?;
                }
                b'{' | b'[' => {
                    self.enter()?;
                    closers.push(if b == b'{' { b'}' } else { b']' });
                    self.cursor += 1;
                }
                b'}' | b']' => {
                    if b != want {
                        return Err(self.syntax(SyntaxError::MismatchedClose(b), self.cursor));
                    }
                    closers.pop();
                    self.cursor += 1;
                }
                b',' | b':' => self.cursor += 1,
                _ if is_whitespace(b) => self.cursor += 1,
                b'-' | b'0'..=b'9' => {
                    self.scan_number()?;
                }
                b'n' | b't' | b'f' => {
                    if let Some(lit) = Literal::from_leading(b) {
                        self.consume_literal(lit)?;
                    }
                }
                _ => return Err(self.invalid_char(self.cursor)),
            }
        }
        Ok(())
    }
}
