use bstr::BString;

use crate::{DecodeError, Decoder, SyntaxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

impl Literal {
    pub(crate) fn from_leading(first: u8) -> Option<Self> {
        match first {
            b'n' => Some(Literal::Null),
            b't' => Some(Literal::True),
            b'f' => Some(Literal::False),
            _ => None,
        }
    }

    pub(crate) fn text(self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::True => "true",
            Literal::False => "false",
        }
    }
}

/// What happened after feeding one more byte into the matcher?
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(Literal),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// Tracks the bytes still expected while matching `null`, `true` or `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LiteralMatcher {
    remaining: &'static [u8],
    kind: Literal,
}

impl LiteralMatcher {
    /// Starts matching after the *first* byte (`n`, `t`, or `f`).
    pub(crate) fn new(kind: Literal) -> Self {
        Self {
            remaining: &kind.text().as_bytes()[1..],
            kind,
        }
    }

    pub(crate) fn step(&mut self, b: u8) -> Step {
        match self.remaining.split_first() {
            Some((&want, rest)) if want == b => {
                self.remaining = rest;
                if rest.is_empty() {
                    Step::Done(self.kind)
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}

impl Decoder<'_> {
    /// Consumes the literal whose first byte is under the cursor.
    ///
    /// The cursor ends one past the literal. A mismatch or early end of
    /// input fails with [`SyntaxError::InvalidLiteral`] at the literal's
    /// first byte.
    pub(crate) fn consume_literal(&mut self, kind: Literal) -> Result<(), DecodeError> {
        let start = self.cursor;
        let mut matcher = LiteralMatcher::new(kind);
        self.cursor += 1;
        loop {
            let step = match self.current()? {
                Some(b) => matcher.step(b),
                None => Step::Reject,
            };
            match step {
                Step::NeedMore => self.cursor += 1,
                Step::Done(_) => {
                    self.cursor += 1;
                    return Ok(());
                }
                Step::Reject => {
                    let end = (self.cursor + 1).min(self.data.len());
                    let found = BString::from(&self.data[start..end]);
                    return Err(self.syntax(
                        SyntaxError::InvalidLiteral {
                            expected: kind.text(),
                            found,
                        },
                        start,
                    ));
                }
            }
        }
    }

    /// Consumes a `null` literal starting at the cursor.
    pub(crate) fn assert_null(&mut self) -> Result<(), DecodeError> {
        self.consume_literal(Literal::Null)
    }
}
