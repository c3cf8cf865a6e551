/// Configuration options for a [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```rust
/// use jsonpour::{Decoder, DecoderOptions};
///
/// let options = DecoderOptions {
///     buffer_size: 64,
///     ..Default::default()
/// };
/// let mut dec = Decoder::with_options(&b"[1,2,3]"[..], options);
/// let mut last = 0i64;
/// dec.decode_array(&mut jsonpour::ArrayFn::new(|dec| dec.int(&mut last)))
///     .unwrap();
/// assert_eq!(last, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecoderOptions {
    /// How many bytes to request from the [`Source`](crate::Source) per
    /// refill.
    ///
    /// Small values exercise more refills; they never change results.
    ///
    /// # Default
    ///
    /// `512`
    pub buffer_size: usize,

    /// Maximum container nesting accepted by the object and array loops and
    /// by the skipper.
    ///
    /// Exceeding it fails with
    /// [`SyntaxError::DepthLimitExceeded`](crate::SyntaxError::DepthLimitExceeded).
    ///
    /// The skipper walks containers iteratively, but every level decoded
    /// through capability callbacks (such as [`Value`](crate::Value)) costs
    /// several stack frames. Raise this only together with the stack size
    /// of the decoding thread.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,
}

impl DecoderOptions {
    pub(crate) const DEFAULT_BUFFER_SIZE: usize = 512;
    pub(crate) const DEFAULT_MAX_DEPTH: usize = 128;
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            buffer_size: Self::DEFAULT_BUFFER_SIZE,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
