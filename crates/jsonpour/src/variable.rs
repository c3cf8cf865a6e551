//! Variable decode: values whose shape only the caller knows.
//!
//! The typical target is a closed union. The decoder classifies the leading
//! byte and hands the decision to the caller, who consumes the value with
//! whichever primitive matches:
//!
//! ```rust
//! use jsonpour::{DecodeError, Decoder, UnmarshalVariable};
//!
//! #[derive(Debug, PartialEq)]
//! enum IdOrName {
//!     Unset,
//!     Id(i64),
//!     Name(String),
//! }
//!
//! impl UnmarshalVariable for IdOrName {
//!     fn unmarshal_variable(&mut self, dec: &mut Decoder<'_>, leading: u8) -> Result<(), DecodeError> {
//!         match leading {
//!             b'"' => {
//!                 let mut s = String::new();
//!                 dec.string(&mut s)?;
//!                 *self = IdOrName::Name(s);
//!             }
//!             b'-' | b'0'..=b'9' => {
//!                 let mut n = 0;
//!                 dec.int(&mut n)?;
//!                 *self = IdOrName::Id(n);
//!             }
//!             _ => return Err(DecodeError::custom("expected id or name")),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut v = IdOrName::Unset;
//! Decoder::from_slice(b"42").decode_variable(&mut v).unwrap();
//! assert_eq!(v, IdOrName::Id(42));
//!
//! let mut v = IdOrName::Unset;
//! Decoder::from_slice(b"null").decode_variable(&mut v).unwrap();
//! assert_eq!(v, IdOrName::Unset);
//! ```

use crate::{DecodeError, Decoder, ValueKind};

/// A type decoded from a value of any shape.
///
/// `unmarshal_variable` receives the decoder positioned *on* the value and
/// its leading byte (`{ [ " t f - 0-9`). It must consume exactly that one
/// value through the primitive decoders. `null` never reaches it.
pub trait UnmarshalVariable {
    /// Decodes the value starting with `leading`.
    ///
    /// # Errors
    ///
    /// The error is recorded on the decoder and returned.
    fn unmarshal_variable(&mut self, dec: &mut Decoder<'_>, leading: u8)
    -> Result<(), DecodeError>;
}

/// Adapts a closure into an [`UnmarshalVariable`].
///
/// An empty adapter skips the value.
pub struct VariableFn<F>(Option<F>);

type NoVariable = fn(&mut Decoder<'_>, u8) -> Result<(), DecodeError>;

impl VariableFn<NoVariable> {
    /// An adapter with no closure.
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }
}

impl<F> VariableFn<F>
where
    F: FnMut(&mut Decoder<'_>, u8) -> Result<(), DecodeError>,
{
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self(Some(f))
    }

    /// `true` when no closure is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl<F> UnmarshalVariable for VariableFn<F>
where
    F: FnMut(&mut Decoder<'_>, u8) -> Result<(), DecodeError>,
{
    fn unmarshal_variable(
        &mut self,
        dec: &mut Decoder<'_>,
        leading: u8,
    ) -> Result<(), DecodeError> {
        match &mut self.0 {
            Some(f) => f(dec, leading),
            None => Ok(()),
        }
    }
}

impl Decoder<'_> {
    fn decode_variable_value(&mut self, v: &mut dyn UnmarshalVariable) -> Result<(), DecodeError> {
        let (b, kind) = self.classify()?;
        if kind == ValueKind::Null {
            log::trace!("variable: null at byte {}", self.cursor);
            return self.assert_null();
        }
        log::trace!("variable: {kind} at byte {}", self.cursor);
        let res = self.consume_with(|dec| v.unmarshal_variable(dec, b));
        if let Err(err) = &res {
            self.record(err.clone());
        }
        res.map(|_| ())
    }

    /// Decodes a whole document whose shape only `v` knows.
    ///
    /// `null` consumes the literal and never calls `v`. Any other valid
    /// leading byte calls `v` exactly once.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, or with whatever `v` returned.
    ///
    /// # Panics
    ///
    /// Panics with [`ReuseAfterPool`](crate::ReuseAfterPool) if the decoder
    /// was returned to its pool.
    pub fn decode_variable(&mut self, v: &mut dyn UnmarshalVariable) -> Result<(), DecodeError> {
        self.guard();
        self.decode_variable_value(v)
    }

    /// Decodes a field or element whose shape only `v` knows.
    ///
    /// Usable from inside object and array callbacks.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, or with whatever `v` returned.
    pub fn variable(&mut self, v: &mut dyn UnmarshalVariable) -> Result<(), DecodeError> {
        self.decode_variable_value(v)?;
        self.mark_consumed();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use rstest::rstest;

    use super::*;
    use crate::{DecoderOptions, SyntaxError};

    #[rstest]
    #[case(b"  {\"a\":1}", b'{')]
    #[case(b"[1]", b'[')]
    #[case(b",\"s\"", b'"')]
    #[case(b"true", b't')]
    #[case(b"false", b'f')]
    #[case(b"\n-3", b'-')]
    #[case(b"9", b'9')]
    fn callback_sees_exact_leading_byte(#[case] input: &[u8], #[case] expected: u8) {
        let mut seen = Vec::new();
        let mut dec = Decoder::from_slice(input);
        dec.decode_variable(&mut VariableFn::new(|dec, b| {
            seen.push(b);
            dec.skip_value()
        }))
        .unwrap();
        assert_eq!(seen, [expected]);
        assert_eq!(dec.cursor(), input.len());
    }

    #[test]
    fn null_never_calls_back() {
        let mut calls = 0;
        let mut dec = Decoder::from_slice(b"  null ");
        dec.decode_variable(&mut VariableFn::new(|_, _| {
            calls += 1;
            Ok(())
        }))
        .unwrap();
        assert_eq!(calls, 0);
        assert_eq!(dec.cursor(), 6);
        assert!(dec.error().is_none());
    }

    #[test]
    fn malformed_null_fails() {
        let mut dec = Decoder::from_slice(b"nil");
        let err = dec.decode_variable(&mut VariableFn::empty()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidJson {
                source: SyntaxError::InvalidLiteral { expected: "null", .. },
                position: 0
            }
        ));
    }

    #[rstest]
    #[case(b"}")]
    #[case(b"x")]
    #[case(b":")]
    fn invalid_leading_byte(#[case] input: &[u8]) {
        let mut dec = Decoder::from_slice(input);
        let err = dec.decode_variable(&mut VariableFn::empty()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidJson {
                source: SyntaxError::InvalidCharacter(input[0]),
                position: 0
            }
        );
    }

    #[test]
    fn empty_input_is_unexpected_end() {
        let mut dec = Decoder::from_slice(b" \n");
        let err = dec.decode_variable(&mut VariableFn::empty()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidJson {
                source: SyntaxError::UnexpectedEndOfInput,
                ..
            }
        ));
    }

    #[test]
    fn empty_adapter_skips_value() {
        let mut dec = Decoder::with_options(
            &br#"{"a":[1,{"b":"c"}]} "#[..],
            DecoderOptions {
                buffer_size: 1,
                ..Default::default()
            },
        );
        let mut v = VariableFn::empty();
        assert!(v.is_empty());
        dec.decode_variable(&mut v).unwrap();
        assert_eq!(dec.cursor(), 19);
    }

    #[test]
    fn callback_error_is_recorded_and_returned() {
        let mut dec = Decoder::from_slice(b"[1]");
        let err = dec
            .decode_variable(&mut VariableFn::new(|_, _| Err(DecodeError::custom("nope"))))
            .unwrap_err();
        assert_eq!(err, DecodeError::Custom("nope".into()));
        assert_eq!(dec.error(), Some(&err));
    }

    #[test]
    fn nested_variable_inside_object() {
        let mut value = String::new();
        let mut dec = Decoder::from_slice(br#"{"value":"samplestring","other":1}"#);
        dec.decode_object(&mut crate::ObjectFn::new(|dec, key| {
            if key == "value" {
                dec.variable(&mut VariableFn::new(|dec, b| {
                    assert_eq!(b, b'"');
                    dec.string(&mut value)
                }))?;
            }
            Ok(())
        }))
        .unwrap();
        assert_eq!(value, "samplestring");
    }
}
