//! Scalar decoders: strings, numbers and booleans.
//!
//! Each scalar follows the shared dispatch rules: `null` leaves the
//! destination untouched, a value of another shape is recorded as
//! [`DecodeError::InvalidUnmarshal`] and skipped.

use alloc::{string::String, vec::Vec};

use bstr::BString;

use crate::{
    DecodeError, Decoder, SyntaxError, Target, ValueKind,
    escape::{SurrogatePair, UnicodeEscapeBuffer},
    literal::Literal,
};

/// Checks `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`.
fn is_json_number(text: &[u8]) -> bool {
    fn digits(text: &[u8], i: &mut usize) -> usize {
        let start = *i;
        while text.get(*i).is_some_and(u8::is_ascii_digit) {
            *i += 1;
        }
        *i - start
    }

    let mut i = 0;
    if text.first() == Some(&b'-') {
        i += 1;
    }
    match text.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(text, &mut i);
        }
        _ => return false,
    }
    if text.get(i) == Some(&b'.') {
        i += 1;
        if digits(text, &mut i) == 0 {
            return false;
        }
    }
    if matches!(text.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(text.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(text, &mut i) == 0 {
            return false;
        }
    }
    i == text.len()
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut tmp = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
}

impl Decoder<'_> {
    /// Consumes a number starting at the cursor and returns its byte range.
    pub(crate) fn scan_number(&mut self) -> Result<(usize, usize), DecodeError> {
        let start = self.cursor;
        while let Some(b) = self.current()? {
            if !matches!(b, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') {
                break;
            }
            self.cursor += 1;
        }
        let text = &self.data[start..self.cursor];
        if !is_json_number(text) {
            let found = BString::from(text);
            return Err(self.syntax(SyntaxError::InvalidNumber(found), start));
        }
        Ok((start, self.cursor))
    }

    fn number_text(&self, (start, end): (usize, usize)) -> &str {
        // `scan_number` only accepts ASCII.
        core::str::from_utf8(&self.data[start..end]).unwrap_or_default()
    }

    /// Reads the rest of a string whose opening quote was consumed into
    /// `out`, replacing its contents. On error `out` holds partial output.
    pub(crate) fn read_string_into(&mut self, out: &mut String) -> Result<(), DecodeError> {
        let start = self.cursor.saturating_sub(1);
        let mut bytes = core::mem::take(out).into_bytes();
        bytes.clear();
        let mut pair = SurrogatePair::default();
        loop {
            let b = self.require()?;
            self.cursor += 1;
            let c = match b {
                b'"' => break,
                b'\\' => {
                    let e = self.require()?;
                    self.cursor += 1;
                    match e {
                        b'"' => '"',
                        b'\\' => '\\',
                        b'/' => '/',
                        b'b' => '\u{8}',
                        b'f' => '\u{c}',
                        b'n' => '\n',
                        b'r' => '\r',
                        b't' => '\t',
                        b'u' => {
                            let unit = self.read_unicode_escape()?;
                            let at = self.cursor - 6;
                            match pair.push(unit) {
                                Ok(Some(c)) => push_char(&mut bytes, c),
                                Ok(None) => {}
                                Err(source) => return Err(self.syntax(source, at)),
                            }
                            continue;
                        }
                        other => {
                            return Err(self.syntax(SyntaxError::InvalidEscape(other), self.cursor - 1));
                        }
                    }
                }
                0x00..=0x1F => return Err(self.invalid_char(self.cursor - 1)),
                _ => {
                    if let Err(source) = pair.finish() {
                        return Err(self.syntax(source, self.cursor - 1));
                    }
                    bytes.push(b);
                    continue;
                }
            };
            if let Err(source) = pair.finish() {
                return Err(self.syntax(source, self.cursor - 2));
            }
            push_char(&mut bytes, c);
        }
        if let Err(source) = pair.finish() {
            return Err(self.syntax(source, self.cursor - 1));
        }
        match String::from_utf8(bytes) {
            Ok(s) => {
                *out = s;
                Ok(())
            }
            Err(e) => {
                let at = start + 1 + e.utf8_error().valid_up_to();
                Err(self.syntax(SyntaxError::InvalidUtf8, at))
            }
        }
    }

    fn read_unicode_escape(&mut self) -> Result<u16, DecodeError> {
        let mut buf = UnicodeEscapeBuffer::new();
        loop {
            let b = self.require()?;
            match buf.feed(b) {
                Ok(done) => {
                    self.cursor += 1;
                    if let Some(unit) = done {
                        return Ok(unit);
                    }
                }
                Err(source) => return Err(self.syntax(source, self.cursor)),
            }
        }
    }

    fn decode_string_value(&mut self, v: &mut String) -> Result<(), DecodeError> {
        let (b, kind) = self.classify()?;
        match kind {
            ValueKind::String => {
                self.cursor += 1;
                let mut s = String::new();
                self.read_string_into(&mut s)?;
                *v = s;
                Ok(())
            }
            ValueKind::Null => self.assert_null(),
            _ => self.mismatch(Target::String, b, kind),
        }
    }

    fn decode_number_value<T: core::str::FromStr>(
        &mut self,
        v: &mut T,
        target: Target,
    ) -> Result<(), DecodeError> {
        let (b, kind) = self.classify()?;
        match kind {
            ValueKind::Number => {
                let range = self.scan_number()?;
                match self.number_text(range).parse::<T>() {
                    Ok(n) => *v = n,
                    Err(_) => {
                        log::debug!("number at byte {} does not fit {target}", range.0);
                        self.record(DecodeError::InvalidUnmarshal {
                            expected: target,
                            found: ValueKind::Number,
                        });
                    }
                }
                Ok(())
            }
            ValueKind::Null => self.assert_null(),
            _ => self.mismatch(target, b, kind),
        }
    }

    fn decode_bool_value(&mut self, v: &mut bool) -> Result<(), DecodeError> {
        let (b, kind) = self.classify()?;
        match (kind, Literal::from_leading(b)) {
            (ValueKind::Boolean, Some(lit)) => {
                self.consume_literal(lit)?;
                *v = lit == Literal::True;
                Ok(())
            }
            (ValueKind::Null, _) => self.assert_null(),
            _ => self.mismatch(Target::Bool, b, kind),
        }
    }

    /// Decodes a string field or element.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON. Shape mismatches are recorded instead.
    pub fn string(&mut self, v: &mut String) -> Result<(), DecodeError> {
        self.decode_string_value(v)?;
        self.mark_consumed();
        Ok(())
    }

    /// Decodes a signed integer field or element.
    ///
    /// Fractions, exponents and out-of-range values are recorded as
    /// [`DecodeError::InvalidUnmarshal`] and leave `v` untouched.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    pub fn int(&mut self, v: &mut i64) -> Result<(), DecodeError> {
        self.decode_number_value(v, Target::Int)?;
        self.mark_consumed();
        Ok(())
    }

    /// Decodes an unsigned integer field or element.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON. Negative values are recorded as mismatches.
    pub fn uint(&mut self, v: &mut u64) -> Result<(), DecodeError> {
        self.decode_number_value(v, Target::Uint)?;
        self.mark_consumed();
        Ok(())
    }

    /// Decodes a floating point field or element.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    pub fn float(&mut self, v: &mut f64) -> Result<(), DecodeError> {
        self.decode_number_value(v, Target::Float)?;
        self.mark_consumed();
        Ok(())
    }

    /// Decodes a boolean field or element.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    pub fn bool(&mut self, v: &mut bool) -> Result<(), DecodeError> {
        self.decode_bool_value(v)?;
        self.mark_consumed();
        Ok(())
    }

    /// Decodes a whole document as a string.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    ///
    /// # Panics
    ///
    /// Panics with [`ReuseAfterPool`](crate::ReuseAfterPool) if the decoder
    /// was returned to its pool.
    pub fn decode_string(&mut self, v: &mut String) -> Result<(), DecodeError> {
        self.guard();
        self.decode_string_value(v)
    }

    /// Decodes a whole document as a signed integer.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    ///
    /// # Panics
    ///
    /// Panics with [`ReuseAfterPool`](crate::ReuseAfterPool) if the decoder
    /// was returned to its pool.
    pub fn decode_int(&mut self, v: &mut i64) -> Result<(), DecodeError> {
        self.guard();
        self.decode_number_value(v, Target::Int)
    }

    /// Decodes a whole document as an unsigned integer.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    ///
    /// # Panics
    ///
    /// Panics with [`ReuseAfterPool`](crate::ReuseAfterPool) if the decoder
    /// was returned to its pool.
    pub fn decode_uint(&mut self, v: &mut u64) -> Result<(), DecodeError> {
        self.guard();
        self.decode_number_value(v, Target::Uint)
    }

    /// Decodes a whole document as a float.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    ///
    /// # Panics
    ///
    /// Panics with [`ReuseAfterPool`](crate::ReuseAfterPool) if the decoder
    /// was returned to its pool.
    pub fn decode_float(&mut self, v: &mut f64) -> Result<(), DecodeError> {
        self.guard();
        self.decode_number_value(v, Target::Float)
    }

    /// Decodes a whole document as a boolean.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    ///
    /// # Panics
    ///
    /// Panics with [`ReuseAfterPool`](crate::ReuseAfterPool) if the decoder
    /// was returned to its pool.
    pub fn decode_bool(&mut self, v: &mut bool) -> Result<(), DecodeError> {
        self.guard();
        self.decode_bool_value(v)
    }
}
