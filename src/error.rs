/// Failures surfaced by the codec.
///
/// Every variant is deterministic: the same input fails the same way on
/// every call, so retrying is never useful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A character outside the configured alphabet. `index` is the byte
    /// offset of the character in the input text.
    AlphabetMismatch { ch: char, index: usize },

    /// A digit group of `len` characters starting at byte offset `index`
    /// does not correspond to any chunk width.
    Framing { len: usize, index: usize },

    /// The digit group starting at byte offset `index` decodes to a value
    /// that does not fit in `bytes` bytes.
    Overflow { index: usize, bytes: usize },

    /// Aligned mode only: the input length is not a multiple of `align`.
    InvalidInputLength { len: usize, align: usize },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::AlphabetMismatch { ch, index } => {
                write!(f, "invalid base62 character {ch:?} at index {index}")
            }
            Error::Framing { len, index } => {
                write!(
                    f,
                    "base62 group of {len} characters at index {index} has no matching chunk width"
                )
            }
            Error::Overflow { index, bytes } => {
                write!(
                    f,
                    "base62 group at index {index} exceeds {} bits",
                    bytes * 8
                )
            }
            Error::InvalidInputLength { len, align } => {
                write!(f, "input of {len} bytes is not a multiple of {align} bytes")
            }
        }
    }
}

impl std::error::Error for Error {}
