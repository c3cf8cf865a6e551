//! A dynamically typed JSON tree.
//!
//! [`Value`] implements [`UnmarshalVariable`], so it can capture a field of
//! unknown shape: pass it to [`Decoder::variable`] or
//! [`Decoder::decode_variable`].
use alloc::{collections::BTreeMap, string::String, vec::Vec};

use crate::{ArrayFn, DecodeError, Decoder, ObjectFn, UnmarshalVariable};

/// Object members, sorted by key. A repeated key keeps its last value.
pub type Map = BTreeMap<String, Value>;
/// Array elements, in document order.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// # Examples
///
/// ```
/// use jsonpour::{Decoder, Value};
///
/// let mut v = Value::default();
/// let mut dec = Decoder::from_slice(br#"{"id":[1,"two",null]}"#);
/// dec.decode_variable(&mut v).unwrap();
/// let Value::Object(map) = v else { panic!("not an object") };
/// assert_eq!(
///     map["id"],
///     Value::Array(vec![1.0.into(), "two".into(), Value::Null])
/// );
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(untagged))]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// Any number. Integers beyond 2^53 lose precision.
    Number(f64),
    /// A string.
    String(String),
    /// An array.
    Array(Array),
    /// An object.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }
}

impl UnmarshalVariable for Value {
    fn unmarshal_variable(&mut self, dec: &mut Decoder<'_>, leading: u8) -> Result<(), DecodeError> {
        *self = match leading {
            b'{' => {
                let mut map = Map::new();
                dec.object(&mut ObjectFn::new(|dec, key| {
                    let mut member = Value::Null;
                    dec.variable(&mut member)?;
                    map.insert(key.into(), member);
                    Ok(())
                }))?;
                Value::Object(map)
            }
            b'[' => {
                let mut items = Array::new();
                dec.array(&mut ArrayFn::new(|dec| {
                    let mut item = Value::Null;
                    dec.variable(&mut item)?;
                    items.push(item);
                    Ok(())
                }))?;
                Value::Array(items)
            }
            b'"' => {
                let mut s = String::new();
                dec.string(&mut s)?;
                Value::String(s)
            }
            b't' | b'f' => {
                let mut b = false;
                dec.bool(&mut b)?;
                Value::Boolean(b)
            }
            _ => {
                let mut n = 0.0;
                dec.float(&mut n)?;
                Value::Number(n)
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::DecoderOptions;

    fn decode(input: &[u8]) -> Value {
        let mut v = Value::Boolean(false);
        let mut dec = Decoder::with_options(
            input,
            DecoderOptions {
                buffer_size: 3,
                ..Default::default()
            },
        );
        dec.decode_variable(&mut v).unwrap();
        assert!(dec.error().is_none());
        v
    }

    #[test]
    fn scalars() {
        assert_eq!(decode(b"true"), Value::Boolean(true));
        assert_eq!(decode(b"-2.5e1"), Value::Number(-25.0));
        assert_eq!(decode(br#""x\ny""#), Value::String("x\ny".into()));
    }

    #[test]
    fn top_level_null_leaves_target_alone() {
        assert_eq!(decode(b"null"), Value::Boolean(false));
    }

    #[test]
    fn nested_tree() {
        let v = decode(br#"{"mem1":"val1","mem2":{"mem3":[true,-0.1,null,{}]},"mem1":"dup"}"#);
        let mut inner = Map::new();
        inner.insert(
            "mem3".into(),
            Value::Array(vec![
                Value::Boolean(true),
                Value::Number(-0.1),
                Value::Null,
                Value::Object(Map::new()),
            ]),
        );
        let mut expected = Map::new();
        expected.insert("mem1".into(), "dup".into());
        expected.insert("mem2".into(), Value::Object(inner));
        assert_eq!(v, Value::Object(expected));
    }

    fn nested(levels: usize) -> alloc::string::String {
        let mut doc = alloc::string::String::new();
        for i in 0..levels {
            doc.push_str(if i % 2 == 0 { "[" } else { r#"{"k":"# });
        }
        for i in (0..levels).rev() {
            doc.push(if i % 2 == 0 { ']' } else { '}' });
        }
        doc
    }

    #[test]
    fn default_depth_fits_default_thread_stack() {
        let limit = DecoderOptions::default().max_depth;
        let handle = std::thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(move || {
                let mut v = Value::Null;
                let res = Decoder::from_slice(nested(limit - 1).as_bytes()).decode_variable(&mut v);
                (res, v)
            })
            .unwrap();
        let (res, v) = handle.join().unwrap();
        res.unwrap();
        assert!(v.is_array());
    }

    #[test]
    fn past_default_depth_is_an_error() {
        let limit = DecoderOptions::default().max_depth;
        let doc = nested(limit + 1);
        let err = Decoder::from_slice(doc.as_bytes())
            .decode_variable(&mut Value::Null)
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidJson {
                source: crate::SyntaxError::DepthLimitExceeded(l),
                ..
            } if l == limit
        ));
    }

    #[test]
    fn predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::from(true).is_bool());
        assert!(Value::from(1.0).is_number());
        assert!(Value::from("s").is_string());
        assert!(Value::from(Array::new()).is_array());
        assert!(Value::from(Map::new()).is_object());
        assert!(!Value::Null.is_object());
    }
}
