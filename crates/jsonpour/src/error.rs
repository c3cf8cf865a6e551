use alloc::string::String;
use core::fmt;

use bstr::BString;
use thiserror::Error;

use crate::classify::ValueKind;

/// Errors surfaced by decode calls.
///
/// Shape mismatches are usually *recorded* on the decoder rather than
/// returned; see [`Decoder::error`](crate::Decoder::error).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The input is not well-formed JSON.
    #[error("{source} at byte {position}")]
    InvalidJson {
        /// What went wrong.
        source: SyntaxError,
        /// Absolute byte offset in the input.
        position: usize,
    },
    /// A well-formed value cannot populate the requested target.
    #[error("cannot unmarshal {found} into {expected} target")]
    InvalidUnmarshal {
        /// The capability or scalar type the caller asked for.
        expected: Target,
        /// The shape that was actually found.
        found: ValueKind,
    },
    /// The byte source failed.
    #[error("read error: {0}")]
    Read(String),
    /// Raised by a caller callback.
    #[error("{0}")]
    Custom(String),
}

impl DecodeError {
    /// Builds a [`DecodeError::Custom`] from anything printable.
    pub fn custom(msg: impl fmt::Display) -> Self {
        use alloc::string::ToString;
        Self::Custom(msg.to_string())
    }

    /// Returns `true` for [`DecodeError::InvalidJson`].
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::InvalidJson { .. })
    }

    /// Returns `true` for [`DecodeError::InvalidUnmarshal`].
    #[must_use]
    pub fn is_unmarshal(&self) -> bool {
        matches!(self, Self::InvalidUnmarshal { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
/// Syntax-level failures carried by [`DecodeError::InvalidJson`].
pub enum SyntaxError {
    /// A byte that cannot appear at this position.
    #[error("invalid character '{}'", .0.escape_ascii())]
    InvalidCharacter(u8),
    /// A literal (`null`, `true`, `false`) did not match.
    #[error("invalid literal, expected '{expected}', found '{found}'")]
    InvalidLiteral {
        /// The literal that was expected.
        expected: &'static str,
        /// The bytes read so far.
        found: BString,
    },
    /// A `\u` escape contained a non-hex digit.
    #[error("invalid unicode escape sequence at character: '{}'", .0.escape_ascii())]
    InvalidUnicodeEscapeChar(u8),
    /// A `\u` escape decoded to an unpaired surrogate.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscapeSequence(u32),
    /// A backslash followed by an unknown escape character.
    #[error("invalid escape character '{}'", .0.escape_ascii())]
    InvalidEscape(u8),
    /// A number that does not follow the JSON grammar.
    #[error("invalid number '{0}'")]
    InvalidNumber(BString),
    /// String contents were not valid UTF-8.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    /// A closing bracket did not match the open container.
    #[error("mismatched closing '{}'", .0.escape_ascii())]
    MismatchedClose(u8),
    /// Nesting exceeded [`DecoderOptions::max_depth`](crate::DecoderOptions::max_depth).
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    /// Input ended inside a value or before any value.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// The target a decode call was asked to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// An [`UnmarshalArrayable`](crate::UnmarshalArrayable).
    Arrayable,
    /// An [`UnmarshalObject`](crate::UnmarshalObject).
    Object,
    /// An [`UnmarshalArray`](crate::UnmarshalArray).
    Array,
    /// A `String`.
    String,
    /// A signed integer.
    Int,
    /// An unsigned integer.
    Uint,
    /// A float.
    Float,
    /// A `bool`.
    Bool,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Arrayable => "arrayable",
            Target::Object => "object",
            Target::Array => "array",
            Target::String => "string",
            Target::Int => "integer",
            Target::Uint => "unsigned integer",
            Target::Float => "float",
            Target::Bool => "boolean",
        })
    }
}

/// Panic payload for driving a decoder that was already returned to its
/// pool.
///
/// This is never returned as an error: the buffer may already belong to a
/// different decode, so the only safe response is to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReuseAfterPool;

impl fmt::Display for ReuseAfterPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("decoder used after being returned to its pool")
    }
}

impl core::error::Error for ReuseAfterPool {}
