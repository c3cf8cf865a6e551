//! Buffering and decoding of four-digit `\u` escapes.
//!
//! [`UnicodeEscapeBuffer`] accumulates four ASCII hex digits into one UTF-16
//! code unit. [`SurrogatePair`] joins a high and a low surrogate into a
//! scalar value.
//!
//! # Errors
//!
//! - A non-hex byte yields [`SyntaxError::InvalidUnicodeEscapeChar`].
//! - An unpaired surrogate yields
//!   [`SyntaxError::InvalidUnicodeEscapeSequence`].
use crate::SyntaxError;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    value: u32,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feeds one hex digit.
    ///
    /// Returns `Ok(Some(unit))` once four digits have been accumulated and
    /// resets itself.
    pub(crate) fn feed(&mut self, b: u8) -> Result<Option<u16>, SyntaxError> {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return Err(SyntaxError::InvalidUnicodeEscapeChar(b)),
        };
        self.value = (self.value << 4) | u32::from(digit);
        self.len += 1;
        if self.len == 4 {
            // Four hex digits fit in 16 bits.
            let unit = u16::try_from(self.value).unwrap_or(u16::MAX);
            *self = Self::default();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct SurrogatePair {
    high: Option<u16>,
}

impl SurrogatePair {
    /// Accepts one decoded code unit.
    ///
    /// Returns `Ok(None)` while waiting for the low half of a pair.
    pub(crate) fn push(&mut self, unit: u16) -> Result<Option<char>, SyntaxError> {
        match (self.high.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high = Some(unit);
                Ok(None)
            }
            (None, 0xDC00..=0xDFFF) => Err(SyntaxError::InvalidUnicodeEscapeSequence(unit.into())),
            (None, _) => Ok(char::from_u32(unit.into())),
            (Some(high), 0xDC00..=0xDFFF) => {
                let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                Ok(char::from_u32(code))
            }
            (Some(high), _) => Err(SyntaxError::InvalidUnicodeEscapeSequence(high.into())),
        }
    }

    /// Fails if a high surrogate is still waiting for its partner.
    pub(crate) fn finish(&mut self) -> Result<(), SyntaxError> {
        match self.high.take() {
            Some(high) => Err(SyntaxError::InvalidUnicodeEscapeSequence(high.into())),
            None => Ok(()),
        }
    }
}
