//! Shape classification: the scan loop shared by every decode path.

use core::fmt;

use crate::{DecodeError, Decoder};

/// The shape of a JSON value, known from its leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `{`
    Object,
    /// `[`
    Array,
    /// `"`
    String,
    /// `t` or `f`
    Boolean,
    /// a digit or `-`
    Number,
    /// `n`
    Null,
}

impl ValueKind {
    /// Classifies a leading byte. Returns `None` for bytes that cannot start
    /// a value.
    ///
    /// ```rust
    /// use jsonpour::ValueKind;
    ///
    /// assert_eq!(ValueKind::from_leading(b'-'), Some(ValueKind::Number));
    /// assert_eq!(ValueKind::from_leading(b'}'), None);
    /// ```
    #[must_use]
    pub fn from_leading(b: u8) -> Option<Self> {
        Some(match b {
            b'{' => Self::Object,
            b'[' => Self::Array,
            b'"' => Self::String,
            b't' | b'f' => Self::Boolean,
            b'0'..=b'9' | b'-' => Self::Number,
            b'n' => Self::Null,
            _ => return None,
        })
    }

    /// `true` for strings, numbers and booleans.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Boolean)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::Null => "null",
        })
    }
}

/// Bytes skipped between values. Commas are insignificant at value start.
#[inline]
pub(crate) fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'\r' | b',')
}

#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'\r')
}

impl Decoder<'_> {
    /// Scans to the next significant byte and classifies it.
    ///
    /// The cursor is left *on* the leading byte. Exhausted input and bytes
    /// that cannot start a value fail with
    /// [`DecodeError::InvalidJson`].
    pub(crate) fn classify(&mut self) -> Result<(u8, ValueKind), DecodeError> {
        loop {
            let Some(b) = self.current()? else {
                return Err(self.unexpected_end());
            };
            if is_separator(b) {
                self.cursor += 1;
                continue;
            }
            return match ValueKind::from_leading(b) {
                Some(kind) => Ok((b, kind)),
                None => Err(self.invalid_char(self.cursor)),
            };
        }
    }

    /// Skips plain whitespace (not commas) and returns the next byte.
    pub(crate) fn skip_whitespace(&mut self) -> Result<Option<u8>, DecodeError> {
        while let Some(b) = self.current()? {
            if !is_whitespace(b) {
                return Ok(Some(b));
            }
            self.cursor += 1;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{DecoderOptions, SyntaxError};

    #[rstest]
    #[case(b"{", ValueKind::Object)]
    #[case(b"[", ValueKind::Array)]
    #[case(b"\"", ValueKind::String)]
    #[case(b"t", ValueKind::Boolean)]
    #[case(b"f", ValueKind::Boolean)]
    #[case(b"7", ValueKind::Number)]
    #[case(b"-", ValueKind::Number)]
    #[case(b"n", ValueKind::Null)]
    fn classifies_leading_byte(#[case] input: &[u8], #[case] kind: ValueKind) {
        let mut dec = Decoder::from_slice(input);
        assert_eq!(dec.classify().unwrap(), (input[0], kind));
        assert_eq!(dec.cursor(), 0);
    }

    #[test]
    fn skips_whitespace_and_commas_across_refills() {
        let mut dec = Decoder::with_options(
            &b" \n\t\r,, ,{"[..],
            DecoderOptions {
                buffer_size: 2,
                ..Default::default()
            },
        );
        assert_eq!(dec.classify().unwrap(), (b'{', ValueKind::Object));
        assert_eq!(dec.cursor(), 8);
    }

    #[test]
    fn exhausted_input_is_unexpected_end() {
        let mut dec = Decoder::from_slice(b"  , ");
        let err = dec.classify().unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidJson {
                source: SyntaxError::UnexpectedEndOfInput,
                position: 4
            }
        );
    }

    #[test]
    fn unknown_byte_reports_its_position() {
        let mut dec = Decoder::from_slice(b"  }");
        let err = dec.classify().unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidJson {
                source: SyntaxError::InvalidCharacter(b'}'),
                position: 2
            }
        );
    }
}
