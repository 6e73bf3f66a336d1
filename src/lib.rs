//! Chunked base62: bytes to alphanumeric text and back, bit-exact.
//!
//! Input is cut into chunks of up to 32 bytes. Each chunk is read as a
//! big-endian integer and written as a fixed-width group of base62 digits,
//! so the text splits back into groups without separators and leading zero
//! bytes survive the round trip.
//!
//! ```rust
//! let text = chunked_base62::encode(&[0, 0, 0, 1]);
//! assert_eq!(text, "000001");
//! assert_eq!(chunked_base62::decode(&text).unwrap(), vec![0, 0, 0, 1]);
//! ```

mod alphabet;
mod base62;
mod codec;
mod config;
mod error;
mod table;

pub use alphabet::{Alphabet, UnknownName};
pub use codec::{ALIGNMENT, Codec, Group, Groups, Mode};
pub use config::CodecConfig;
pub use error::Error;
pub use table::{ChunkTable, MAX_CHUNK, MAX_GROUP, chunk_table};

/// Lexicographic alphabet, chunked mode.
pub const DEFAULT: Codec = Codec::new(Alphabet::Lexicographic, Mode::Chunked);

/// Encode `bytes` with the [`DEFAULT`] codec. Never fails.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::new();
    DEFAULT.write_chunks(bytes, &mut out);
    out
}

/// Decode `text` with the [`DEFAULT`] codec.
pub fn decode(text: &str) -> Result<Vec<u8>, Error> {
    DEFAULT.decode(text)
}
