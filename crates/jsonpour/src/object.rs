//! Object decoding: the field loop and its capability.

use crate::{DecodeError, Decoder, Target, ValueKind};

/// A type that can be decoded from a JSON object, one field at a time.
///
/// `unmarshal_field` is called once per key, with the decoder positioned
/// before the field's value. Consume the value through a nested decode
/// call (`dec.string(..)`, `dec.object(..)`, `dec.variable(..)`, ...). If
/// the callback returns without consuming it, the value is skipped.
pub trait UnmarshalObject {
    /// Decodes the value of field `key`.
    ///
    /// # Errors
    ///
    /// Any error aborts the enclosing decode.
    fn unmarshal_field(&mut self, dec: &mut Decoder<'_>, key: &str) -> Result<(), DecodeError>;

    /// How many fields this type wants.
    ///
    /// When non-zero, the rest of the object is skipped as soon as that many
    /// fields were consumed. `0` reads every field.
    fn field_count(&self) -> usize {
        0
    }
}

/// Adapts a closure into an [`UnmarshalObject`].
///
/// An empty adapter skips every field.
pub struct ObjectFn<F>(Option<F>);

type NoFields = fn(&mut Decoder<'_>, &str) -> Result<(), DecodeError>;

impl ObjectFn<NoFields> {
    /// An adapter with no closure.
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }
}

impl<F> ObjectFn<F>
where
    F: FnMut(&mut Decoder<'_>, &str) -> Result<(), DecodeError>,
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

impl<F> UnmarshalObject for ObjectFn<F>
where
    F: FnMut(&mut Decoder<'_>, &str) -> Result<(), DecodeError>,
{
    fn unmarshal_field(&mut self, dec: &mut Decoder<'_>, key: &str) -> Result<(), DecodeError> {
        match &mut self.0 {
            Some(f) => f(dec, key),
            None => Ok(()),
        }
    }
}

impl Decoder<'_> {
    pub(crate) fn decode_object_value(
        &mut self,
        v: &mut dyn UnmarshalObject,
    ) -> Result<(), DecodeError> {
        let (b, kind) = self.classify()?;
        match kind {
            ValueKind::Object => self.object_body(v),
            ValueKind::Null => self.assert_null(),
            _ => self.mismatch(Target::Object, b, kind),
        }
    }

    /// Runs the field loop. The cursor is on the opening `{`.
    pub(crate) fn object_body(&mut self, v: &mut dyn UnmarshalObject) -> Result<(), DecodeError> {
        self.enter()?;
        self.cursor += 1;
        let res = self.object_fields(v);
        self.leave();
        res
    }

    fn object_fields(&mut self, v: &mut dyn UnmarshalObject) -> Result<(), DecodeError> {
        let wanted = v.field_count();
        let mut done = 0;
        loop {
            let mut key = core::mem::take(&mut self.key_scratch);
            let more = self.next_key(&mut key);
            let res = match more {
                Ok(true) => self.consume_with(|dec| v.unmarshal_field(dec, &key)),
                Ok(false) => {
                    self.key_scratch = key;
                    return Ok(());
                }
                Err(e) => Err(e),
            };
            self.key_scratch = key;
            if res? {
                done += 1;
            }
            if wanted > 0 && done >= wanted {
                log::trace!("all {wanted} fields consumed, skipping rest of object");
                return self.skip_rest_of_entered(b'}');
            }
        }
    }

    /// Reads the next key and its colon. Returns `false` after consuming the
    /// closing `}`.
    fn next_key(&mut self, key: &mut alloc::string::String) -> Result<bool, DecodeError> {
        loop {
            let Some(b) = self.current()? else {
                return Err(self.unexpected_end());
            };
            match b {
                b' ' | b'\n' | b'\t' | b'\r' | b',' => self.cursor += 1,
                b'}' => {
                    self.cursor += 1;
                    return Ok(false);
                }
                b'"' => {
                    self.cursor += 1;
                    self.read_string_into(key)?;
                    return match self.skip_whitespace()? {
                        Some(b':') => {
                            self.cursor += 1;
                            Ok(true)
                        }
                        Some(_) => Err(self.invalid_char(self.cursor)),
                        None => Err(self.unexpected_end()),
                    };
                }
                _ => return Err(self.invalid_char(self.cursor)),
            }
        }
    }

    /// Decodes an object field or element into `v`.
    ///
    /// `null` leaves `v` untouched. Any other non-object value is recorded
    /// as [`DecodeError::InvalidUnmarshal`] and skipped.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when a field callback fails.
    pub fn object(&mut self, v: &mut dyn UnmarshalObject) -> Result<(), DecodeError> {
        self.decode_object_value(v)?;
        self.mark_consumed();
        Ok(())
    }

    /// Like [`object`](Self::object), but creates the target only when the
    /// value is not `null`.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when a field callback fails.
    pub fn object_null<T>(&mut self, v: &mut Option<T>) -> Result<(), DecodeError>
    where
        T: UnmarshalObject + Default,
    {
        let (b, kind) = self.classify()?;
        match kind {
            ValueKind::Object => self.object_body(v.get_or_insert_with(T::default))?,
            ValueKind::Null => self.assert_null()?,
            _ => self.mismatch(Target::Object, b, kind)?,
        }
        self.mark_consumed();
        Ok(())
    }

    /// Decodes a whole document as an object.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when a field callback fails.
    ///
    /// # Panics
    ///
    /// Panics with [`ReuseAfterPool`](crate::ReuseAfterPool) if the decoder
    /// was returned to its pool.
    pub fn decode_object(&mut self, v: &mut dyn UnmarshalObject) -> Result<(), DecodeError> {
        self.guard();
        self.decode_object_value(v)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::{DecoderOptions, SyntaxError};

    #[derive(Default, Debug, PartialEq)]
    struct Person {
        name: String,
        age: i64,
    }

    impl UnmarshalObject for Person {
        fn unmarshal_field(&mut self, dec: &mut Decoder<'_>, key: &str) -> Result<(), DecodeError> {
            match key {
                "name" => dec.string(&mut self.name),
                "age" => dec.int(&mut self.age),
                _ => Ok(()),
            }
        }
    }

    #[test]
    fn decodes_fields_and_skips_unknown() {
        let input = br#"{ "extra": {"deep": [1, "x"]}, "name": "john", "age": 31 }"#;
        let mut p = Person::default();
        let mut dec = Decoder::with_options(
            &input[..],
            DecoderOptions {
                buffer_size: 4,
                ..Default::default()
            },
        );
        dec.decode_object(&mut p).unwrap();
        assert_eq!(
            p,
            Person {
                name: "john".into(),
                age: 31
            }
        );
        assert_eq!(dec.cursor(), input.len());
        assert!(dec.error().is_none());
    }

    #[test]
    fn field_count_exits_early_past_closer() {
        struct OnlyName(String);
        impl UnmarshalObject for OnlyName {
            fn unmarshal_field(&mut self, dec: &mut Decoder<'_>, key: &str) -> Result<(), DecodeError> {
                if key == "name" {
                    dec.string(&mut self.0)?;
                }
                Ok(())
            }
            fn field_count(&self) -> usize {
                1
            }
        }
        let input = br#"{"name":"a","rest":{"x":[1,2]},"more":true} tail"#;
        let mut v = OnlyName(String::new());
        let mut dec = Decoder::from_slice(input);
        dec.decode_object(&mut v).unwrap();
        assert_eq!(v.0, "a");
        assert_eq!(dec.cursor(), input.len() - 5);
    }

    #[test]
    fn field_count_exit_counts_object_once() {
        struct FirstOnly(i64);
        impl UnmarshalObject for FirstOnly {
            fn unmarshal_field(&mut self, dec: &mut Decoder<'_>, _key: &str) -> Result<(), DecodeError> {
                dec.int(&mut self.0)
            }
            fn field_count(&self) -> usize {
                1
            }
        }
        let input = br#"{"a":1,"b":2}"#;
        let mut v = FirstOnly(0);
        let mut dec = Decoder::with_options(
            &input[..],
            DecoderOptions {
                max_depth: 1,
                ..Default::default()
            },
        );
        dec.decode_object(&mut v).unwrap();
        assert_eq!(v.0, 1);
        assert_eq!(dec.cursor(), input.len());
        assert_eq!(dec.depth, 0);

        let mut dec = Decoder::with_options(
            &br#"{"a":1,"b":[2]}"#[..],
            DecoderOptions {
                max_depth: 1,
                ..Default::default()
            },
        );
        let err = dec.decode_object(&mut FirstOnly(0)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidJson {
                source: SyntaxError::DepthLimitExceeded(1),
                position: 11
            }
        );
    }

    #[test]
    fn object_null_creates_only_for_objects() {
        let mut slot: Option<Person> = None;
        let mut dec = Decoder::from_slice(br#"{"a":null,"b":{"name":"z"}}"#);
        let mut second: Option<Person> = None;
        dec.decode_object(&mut ObjectFn::new(|dec, key| match key {
            "a" => dec.object_null(&mut slot),
            "b" => dec.object_null(&mut second),
            _ => Ok(()),
        }))
        .unwrap();
        assert!(slot.is_none());
        assert_eq!(second.unwrap().name, "z");
    }

    #[test]
    fn missing_colon_is_syntax_error() {
        let mut dec = Decoder::from_slice(br#"{"a" 1}"#);
        let err = dec.decode_object(&mut Person::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidJson {
                source: SyntaxError::InvalidCharacter(b'1'),
                position: 5
            }
        );
    }

    #[test]
    fn unquoted_key_is_syntax_error() {
        let mut dec = Decoder::from_slice(b"{a:1}");
        let err = dec.decode_object(&mut Person::default()).unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn empty_adapter_skips_everything() {
        let f = ObjectFn::empty();
        assert!(f.is_empty());
        let mut f = f;
        let mut dec = Decoder::from_slice(br#"{"a":[1,2],"b":{"c":null}}"#);
        dec.decode_object(&mut f).unwrap();
        assert_eq!(dec.cursor(), 26);
    }

    #[test]
    fn array_where_object_expected_is_recorded() {
        let mut dec = Decoder::from_slice(b"[1,2]");
        let mut p = Person::default();
        dec.decode_object(&mut p).unwrap();
        assert_eq!(
            dec.error(),
            Some(&DecodeError::InvalidUnmarshal {
                expected: Target::Object,
                found: ValueKind::Array
            })
        );
        assert_eq!(dec.cursor(), 5);
    }
}
