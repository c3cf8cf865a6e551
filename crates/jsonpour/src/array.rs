//! Array decoding: the element loop and its capability.

use crate::{DecodeError, Decoder, Target, ValueKind};

/// A type that can be decoded from a JSON array, one element at a time.
///
/// `unmarshal_element` is called once per element, in document order.
/// Elements the callback does not consume are skipped.
pub trait UnmarshalArray {
    /// Decodes one element.
    ///
    /// # Errors
    ///
    /// Any error aborts the enclosing decode.
    fn unmarshal_element(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError>;
}

/// Adapts a closure into an [`UnmarshalArray`].
///
/// An empty adapter skips every element.
pub struct ArrayFn<F>(Option<F>);

type NoElements = fn(&mut Decoder<'_>) -> Result<(), DecodeError>;

impl ArrayFn<NoElements> {
    /// An adapter with no closure.
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }
}

impl<F> ArrayFn<F>
where
    F: FnMut(&mut Decoder<'_>) -> Result<(), DecodeError>,
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

impl<F> UnmarshalArray for ArrayFn<F>
where
    F: FnMut(&mut Decoder<'_>) -> Result<(), DecodeError>,
{
    fn unmarshal_element(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError> {
        match &mut self.0 {
            Some(f) => f(dec),
            None => Ok(()),
        }
    }
}

impl Decoder<'_> {
    /// Runs the element loop. The cursor is on the opening `[`.
    ///
    /// `each` is called once per element; elements it leaves unconsumed are
    /// skipped.
    pub(crate) fn array_body(
        &mut self,
        mut each: impl FnMut(&mut Self) -> Result<(), DecodeError>,
    ) -> Result<(), DecodeError> {
        self.enter()?;
        self.cursor += 1;
        let res = self.array_elements(&mut each);
        self.leave();
        res
    }

    fn array_elements(
        &mut self,
        each: &mut impl FnMut(&mut Self) -> Result<(), DecodeError>,
    ) -> Result<(), DecodeError> {
        loop {
            let Some(b) = self.current()? else {
                return Err(self.unexpected_end());
            };
            match b {
                b' ' | b'\n' | b'\t' | b'\r' | b',' => self.cursor += 1,
                b']' => {
                    self.cursor += 1;
                    return Ok(());
                }
                _ => {
                    self.consume_with(&mut *each)?;
                }
            }
        }
    }

    /// The array routine used by top-level entry points: does not mark the
    /// value consumed.
    pub(crate) fn decode_array_value(
        &mut self,
        v: &mut dyn UnmarshalArray,
    ) -> Result<(), DecodeError> {
        let (b, kind) = self.classify()?;
        match kind {
            ValueKind::Array => self.array_body(|dec| v.unmarshal_element(dec)),
            ValueKind::Null => self.assert_null(),
            _ => self.mismatch(Target::Array, b, kind),
        }
    }

    /// Decodes an array field or element into `v`.
    ///
    /// `null` leaves `v` untouched. Any other non-array value is recorded
    /// as [`DecodeError::InvalidUnmarshal`] and skipped.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when an element callback fails.
    pub fn array(&mut self, v: &mut dyn UnmarshalArray) -> Result<(), DecodeError> {
        self.decode_array_value(v)?;
        self.mark_consumed();
        Ok(())
    }

    /// Like [`array`](Self::array), but creates the target only when the
    /// value is not `null`.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when an element callback fails.
    pub fn array_null<T>(&mut self, v: &mut Option<T>) -> Result<(), DecodeError>
    where
        T: UnmarshalArray + Default,
    {
        let (b, kind) = self.classify()?;
        match kind {
            ValueKind::Array => {
                let target = v.get_or_insert_with(T::default);
                self.array_body(|dec| target.unmarshal_element(dec))?;
            }
            ValueKind::Null => self.assert_null()?,
            _ => self.mismatch(Target::Array, b, kind)?,
        }
        self.mark_consumed();
        Ok(())
    }

    /// Decodes a whole document as an array.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when an element callback fails.
    ///
    /// # Panics
    ///
    /// Panics with [`ReuseAfterPool`](crate::ReuseAfterPool) if the decoder
    /// was returned to its pool.
    pub fn decode_array(&mut self, v: &mut dyn UnmarshalArray) -> Result<(), DecodeError> {
        self.guard();
        self.decode_array_value(v)
    }
}
