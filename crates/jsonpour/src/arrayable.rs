//! Arrayable decode: a collection that also accepts a bare object.
//!
//! APIs often send `[{...}, {...}]` but shorten a single item to `{...}`.
//! An [`UnmarshalArrayable`] target sees both forms through the same path:
//!
//! | input        | route                                   |
//! |--------------|-----------------------------------------|
//! | `[...]`      | `unmarshal_array_element` per element   |
//! | `{...}`      | `unmarshal_bare` once                   |
//! | `null`       | nothing                                 |
//! | scalar       | recorded mismatch, value skipped        |
//!
//! A leading byte outside JSON is a syntax error.

use crate::{DecodeError, Decoder, Target, ValueKind};

/// A collection decoded from either an array of items or a single object.
///
/// Both methods are required. For a single object, `unmarshal_bare` must
/// leave the target in the same state a one-element array containing that
/// object would.
pub trait UnmarshalArrayable {
    /// Decodes one element of the array form.
    ///
    /// # Errors
    ///
    /// Any error aborts the enclosing decode.
    fn unmarshal_array_element(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError>;

    /// Decodes the bare object form. The cursor is on the `{`.
    ///
    /// # Errors
    ///
    /// Any error aborts the enclosing decode.
    fn unmarshal_bare(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError>;
}

/// Adapts a closure into an [`UnmarshalArrayable`].
///
/// The same closure serves array elements and the bare object, so both
/// forms always decode the same way. An empty adapter skips the value.
///
/// ```rust
/// use jsonpour::{ArrayableFn, Decoder};
///
/// let mut names = Vec::new();
/// let mut collect = ArrayableFn::new(|dec: &mut Decoder<'_>| {
///     let mut name = String::new();
///     dec.object(&mut jsonpour::ObjectFn::new(|dec, key| match key {
///         "name" => dec.string(&mut name),
///         _ => Ok(()),
///     }))?;
///     names.push(name);
///     Ok(())
/// });
/// Decoder::from_slice(br#"{"name":"john"}"#).decode_arrayable(&mut collect).unwrap();
/// Decoder::from_slice(br#"[{"name":"ada"},{"name":"bob"}]"#)
///     .decode_arrayable(&mut collect)
///     .unwrap();
/// drop(collect);
/// assert_eq!(names, ["john", "ada", "bob"]);
/// ```
pub struct ArrayableFn<F>(Option<F>);

type NoItems = fn(&mut Decoder<'_>) -> Result<(), DecodeError>;

impl ArrayableFn<NoItems> {
    /// An adapter with no closure.
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }
}

impl<F> ArrayableFn<F>
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

impl<F> UnmarshalArrayable for ArrayableFn<F>
where
    F: FnMut(&mut Decoder<'_>) -> Result<(), DecodeError>,
{
    fn unmarshal_array_element(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError> {
        match &mut self.0 {
            Some(f) => f(dec),
            None => Ok(()),
        }
    }

    fn unmarshal_bare(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError> {
        self.unmarshal_array_element(dec)
    }
}

impl Decoder<'_> {
    /// Routes an already classified value to `v`.
    fn arrayable_routed(
        &mut self,
        v: &mut dyn UnmarshalArrayable,
        b: u8,
        kind: ValueKind,
    ) -> Result<(), DecodeError> {
        log::trace!("arrayable: {kind} at byte {}", self.cursor);
        match kind {
            ValueKind::Array => self.array_body(|dec| v.unmarshal_array_element(dec)),
            ValueKind::Object => self.consume_with(|dec| v.unmarshal_bare(dec)).map(|_| ()),
            ValueKind::Null => self.assert_null(),
            ValueKind::String | ValueKind::Number | ValueKind::Boolean => {
                self.mismatch(Target::Arrayable, b, kind)
            }
        }
    }

    fn decode_arrayable_value(&mut self, v: &mut dyn UnmarshalArrayable) -> Result<(), DecodeError> {
        let (b, kind) = self.classify()?;
        self.arrayable_routed(v, b, kind)
    }

    /// Decodes a whole document that is either an array of items or a
    /// single object.
    ///
    /// A string, number or boolean is not an error for this call: it is
    /// recorded as [`DecodeError::InvalidUnmarshal`] (see
    /// [`error`](Self::error)), skipped, and `Ok` is returned.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when `v` fails.
    ///
    /// # Panics
    ///
    /// Panics with [`ReuseAfterPool`](crate::ReuseAfterPool) if the decoder
    /// was returned to its pool.
    pub fn decode_arrayable(&mut self, v: &mut dyn UnmarshalArrayable) -> Result<(), DecodeError> {
        self.guard();
        self.decode_arrayable_value(v)
    }

    /// Decodes an arrayable field or element.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when `v` fails.
    pub fn arrayable(&mut self, v: &mut dyn UnmarshalArrayable) -> Result<(), DecodeError> {
        self.decode_arrayable_value(v)?;
        self.mark_consumed();
        Ok(())
    }

    /// Like [`arrayable`](Self::arrayable), but creates the target only for
    /// an array or an object.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when the target fails.
    pub fn arrayable_null<T>(&mut self, v: &mut Option<T>) -> Result<(), DecodeError>
    where
        T: UnmarshalArrayable + Default,
    {
        let (b, kind) = self.classify()?;
        match kind {
            ValueKind::Array | ValueKind::Object => {
                let target = v.get_or_insert_with(T::default);
                self.arrayable_routed(target, b, kind)?;
            }
            _ => self.arrayable_routed(&mut ArrayableFn::empty(), b, kind)?,
        }
        self.mark_consumed();
        Ok(())
    }
}
