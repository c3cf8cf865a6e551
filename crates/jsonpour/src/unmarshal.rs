//! One-shot helpers for decoding an in-memory document.
//!
//! Unlike the decoder methods, these fold the recorded terminal error into
//! the result: a shape mismatch anywhere in the document is returned as
//! [`DecodeError::InvalidUnmarshal`] after the rest of the document was
//! decoded.

use crate::{
    DecodeError, Decoder, UnmarshalArray, UnmarshalArrayable, UnmarshalObject, UnmarshalVariable,
};

fn run(
    data: &[u8],
    f: impl FnOnce(&mut Decoder<'_>) -> Result<(), DecodeError>,
) -> Result<(), DecodeError> {
    let mut dec = Decoder::from_slice(data);
    f(&mut dec)?;
    dec.finish()
}

/// Decodes `data` as an object into `v`.
///
/// # Errors
///
/// Returns the first fatal error, otherwise the last recorded mismatch.
pub fn unmarshal_object(data: &[u8], v: &mut dyn UnmarshalObject) -> Result<(), DecodeError> {
    run(data, |dec| dec.decode_object(v))
}

/// Decodes `data` as an array into `v`.
///
/// # Errors
///
/// Returns the first fatal error, otherwise the last recorded mismatch.
pub fn unmarshal_array(data: &[u8], v: &mut dyn UnmarshalArray) -> Result<(), DecodeError> {
    run(data, |dec| dec.decode_array(v))
}

/// Decodes `data`, of any shape, into `v`.
///
/// # Errors
///
/// Returns the first fatal error, otherwise the last recorded mismatch.
pub fn unmarshal_variable(data: &[u8], v: &mut dyn UnmarshalVariable) -> Result<(), DecodeError> {
    run(data, |dec| dec.decode_variable(v))
}

/// Decodes `data`, an array or a single object, into `v`.
///
/// # Errors
///
/// Returns the first fatal error, otherwise the last recorded mismatch.
///
/// ```rust
/// use jsonpour::{ArrayableFn, DecodeError, Target, ValueKind, unmarshal_arrayable};
///
/// let err = unmarshal_arrayable(b"42", &mut ArrayableFn::empty()).unwrap_err();
/// assert_eq!(
///     err,
///     DecodeError::InvalidUnmarshal {
///         expected: Target::Arrayable,
///         found: ValueKind::Number,
///     }
/// );
/// ```
pub fn unmarshal_arrayable(
    data: &[u8],
    v: &mut dyn UnmarshalArrayable,
) -> Result<(), DecodeError> {
    run(data, |dec| dec.decode_arrayable(v))
}
