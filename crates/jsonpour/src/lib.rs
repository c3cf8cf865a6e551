//! Pull-based JSON decoding straight into caller-owned types.
//!
//! There is no intermediate tree. A [`Decoder`] pulls bytes from a
//! [`Source`], classifies each value from its first significant byte and
//! hands it to a capability the caller implements:
//!
//! - [`UnmarshalObject`] and [`UnmarshalArray`] for fixed shapes,
//! - [`UnmarshalVariable`] for values whose shape only the caller knows
//!   (closed unions such as "an id or a name"),
//! - [`UnmarshalArrayable`] for collections that also accept a single bare
//!   object in place of a one-element array.
//!
//! Shape mismatches are lenient: the offending value is skipped, the
//! mismatch is recorded on the decoder ([`Decoder::error`]) and decoding
//! continues. Malformed JSON always fails the call.
//!
//! ```rust
//! use jsonpour::{Decoder, ObjectFn, UnmarshalArrayable, UnmarshalObject, DecodeError};
//!
//! #[derive(Default)]
//! struct Tag(String);
//!
//! impl UnmarshalObject for Tag {
//!     fn unmarshal_field(&mut self, dec: &mut Decoder<'_>, key: &str) -> Result<(), DecodeError> {
//!         if key == "name" {
//!             dec.string(&mut self.0)?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Tags(Vec<Tag>);
//!
//! impl UnmarshalArrayable for Tags {
//!     fn unmarshal_array_element(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError> {
//!         let mut tag = Tag::default();
//!         dec.object(&mut tag)?;
//!         self.0.push(tag);
//!         Ok(())
//!     }
//!
//!     fn unmarshal_bare(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError> {
//!         self.unmarshal_array_element(dec)
//!     }
//! }
//!
//! let mut tags = Tags::default();
//! let mut dec = Decoder::from_slice(br#"{"tags":{"name":"solo"}}"#);
//! dec.decode_object(&mut ObjectFn::new(|dec, key| match key {
//!     "tags" => dec.arrayable(&mut tags),
//!     _ => Ok(()),
//! }))
//! .unwrap();
//! assert_eq!(tags.0.len(), 1);
//! assert_eq!(tags.0[0].0, "solo");
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod array;
mod arrayable;
mod classify;
mod decoder;
mod error;
mod escape;
mod literal;
mod object;
mod options;
mod pool;
mod scalar;
mod skip;
mod source;
mod unmarshal;
mod value;
mod variable;


pub use array::{ArrayFn, UnmarshalArray};
pub use arrayable::{ArrayableFn, UnmarshalArrayable};
pub use classify::ValueKind;
pub use decoder::Decoder;
pub use error::{DecodeError, ReuseAfterPool, SyntaxError, Target};
pub use object::{ObjectFn, UnmarshalObject};
pub use options::DecoderOptions;
pub use pool::{DecoderPool, PooledDecoder};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::Source;
pub use unmarshal::{unmarshal_array, unmarshal_arrayable, unmarshal_object, unmarshal_variable};
pub use value::{Array, Map, Value};
pub use variable::{UnmarshalVariable, VariableFn};
