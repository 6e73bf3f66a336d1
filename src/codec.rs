use crate::alphabet::{Alphabet, UnknownName};
use crate::base62::{decode_group, encode_group};
use crate::error::Error;
use crate::table::{MAX_CHUNK, chunk_table};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Input alignment required by [`Mode::Aligned`].
pub const ALIGNMENT: usize = 4;

/// Group widths used by [`Mode::Aligned`], for chunks of 4, 8, 16 and 32 bytes.
const ALIGNED_WIDTHS: [usize; 4] = [6, 11, 22, 43];

/// How input bytes are cut into chunks.
///
/// The two modes produce the same text only when every chunk has the same
/// width in both, so text must be decoded with the mode that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Any input length; chunks of `min(remaining, 32)` bytes.
    #[default]
    Chunked,

    /// Input length must be a multiple of 4; chunks are the largest of
    /// 32, 16, 8 or 4 bytes that fits the remaining input.
    #[serde(alias = "legacy")]
    Aligned,
}

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Chunked => "chunked",
            Mode::Aligned => "aligned",
        }
    }

    /// Byte length of the next chunk given `remaining` unencoded bytes.
    fn chunk_len(self, remaining: usize) -> usize {
        match self {
            Mode::Chunked => remaining.min(MAX_CHUNK),
            Mode::Aligned => 1 << remaining.ilog2().min(MAX_CHUNK.ilog2()),
        }
    }

    fn check_len(self, len: usize) -> Result<(), Error> {
        match self {
            Mode::Aligned if len % ALIGNMENT != 0 => Err(Error::InvalidInputLength {
                len,
                align: ALIGNMENT,
            }),
            _ => Ok(()),
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Mode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chunked" => Ok(Mode::Chunked),
            "aligned" | "legacy" => Ok(Mode::Aligned),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

/// A base62 codec: one alphabet and one chunking mode.
///
/// `Codec` is a small `Copy` value holding no buffers, so it can be shared
/// freely between threads. The default is [`Alphabet::Lexicographic`] with
/// [`Mode::Chunked`].
///
/// ```rust
/// # use chunked_base62::{Alphabet, Codec, Mode};
/// let codec = Codec::new(Alphabet::Base64, Mode::Chunked);
/// let text = codec.encode(&[169, 154, 142, 36]).unwrap();
/// assert_eq!(text, "DGjU5e");
/// assert_eq!(codec.decode(&text).unwrap(), vec![169, 154, 142, 36]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Codec {
    alphabet: Alphabet,
    mode: Mode,
}

impl Codec {
    pub const fn new(alphabet: Alphabet, mode: Mode) -> Self {
        Self { alphabet, mode }
    }

    pub const fn with_alphabet(self, alphabet: Alphabet) -> Self {
        Self { alphabet, ..self }
    }

    pub const fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Encode `bytes` into a new string.
    ///
    /// Only fails in [`Mode::Aligned`], when the length is not a multiple of
    /// [`ALIGNMENT`].
    pub fn encode(&self, bytes: &[u8]) -> Result<String, Error> {
        let mut out = String::new();
        self.encode_to(bytes, &mut out)?;
        Ok(out)
    }

    /// Append the encoding of `bytes` to `out`. Nothing is written on error.
    pub fn encode_to(&self, bytes: &[u8], out: &mut String) -> Result<(), Error> {
        self.mode.check_len(bytes.len())?;
        self.write_chunks(bytes, out);
        Ok(())
    }

    /// The chunk loop proper. The caller has already checked the alignment.
    pub(crate) fn write_chunks(&self, bytes: &[u8], out: &mut String) {
        let table = chunk_table();
        out.reserve(self.width_of(bytes.len()));

        let mut rest = bytes;
        while !rest.is_empty() {
            let (chunk, tail) = rest.split_at(self.mode.chunk_len(rest.len()));
            let width = table
                .digits_for(chunk.len())
                .expect("chunk length within table");
            encode_group(chunk, width, self.alphabet, out);
            rest = tail;
        }

        trace!(bytes = bytes.len(), chars = out.len(), "encoded base62");
    }

    /// Decode `text` into a new byte vector.
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        self.decode_to(text, &mut out)?;
        Ok(out)
    }

    /// Append the decoding of `text` to `out`.
    ///
    /// The whole text is checked against the alphabet before any group is
    /// converted. On error `out` is left exactly as it was.
    pub fn decode_to(&self, text: &str, out: &mut Vec<u8>) -> Result<(), Error> {
        let start = out.len();
        let res = self.decode_groups(text, out);
        if let Err(err) = &res {
            debug!(%err, len = text.len(), alphabet = %self.alphabet, mode = %self.mode, "rejected base62 input");
            out.truncate(start);
        }
        res
    }

    fn decode_groups(&self, text: &str, out: &mut Vec<u8>) -> Result<(), Error> {
        out.reserve(text.len() * 6 / 8 + 1);
        for group in self.groups(text)? {
            let group = group?;
            decode_group(
                group.text.as_bytes(),
                group.bytes,
                group.index,
                self.alphabet,
                out,
            )?;
        }
        Ok(())
    }

    /// Split `text` into the digit groups it would be decoded from.
    ///
    /// Fails up front if `text` contains a character outside the alphabet.
    /// Framing errors are yielded by the iterator, which stops after the
    /// first one.
    pub fn groups<'a>(&self, text: &'a str) -> Result<Groups<'a>, Error> {
        self.alphabet.validate(text)?;
        Ok(Groups {
            text,
            mode: self.mode,
            index: 0,
            halted: false,
        })
    }

    /// Length of the text produced for `len` input bytes.
    pub fn encoded_len(&self, len: usize) -> Result<usize, Error> {
        self.mode.check_len(len)?;
        Ok(self.width_of(len))
    }

    fn width_of(&self, mut len: usize) -> usize {
        let table = chunk_table();
        let mut width = 0;
        while len > 0 {
            let chunk = self.mode.chunk_len(len);
            width += table.digits_for(chunk).expect("chunk length within table");
            len -= chunk;
        }
        width
    }

    /// Number of bytes a text of `len` characters decodes to.
    ///
    /// Only the framing is checked, so a text of this length can still fail
    /// to decode because of its content.
    pub fn decoded_len(&self, len: usize) -> Result<usize, Error> {
        let mut index = 0;
        let mut bytes = 0;
        while index < len {
            let (width, chunk) = frame(self.mode, len - index, index)?;
            index += width;
            bytes += chunk;
        }
        Ok(bytes)
    }
}

/// Width and chunk length of the group at `index`, given `remaining`
/// characters left in the text.
///
/// Aligned mode picks the widest group that fits. Since full chunks come
/// first and the tail is 16, 8 and 4 bytes at most once each, that greedy
/// choice reproduces the encoder's split exactly.
fn frame(mode: Mode, remaining: usize, index: usize) -> Result<(usize, usize), Error> {
    let table = chunk_table();
    let width = match mode {
        Mode::Chunked => Some(remaining.min(table.max_digits())),
        Mode::Aligned => ALIGNED_WIDTHS.iter().copied().rev().find(|&w| w <= remaining),
    };

    width
        .and_then(|w| Some((w, table.bytes_for(w)?)))
        .ok_or(Error::Framing {
            len: width.unwrap_or(remaining),
            index,
        })
}

/// One digit group of an encoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group<'a> {
    /// Byte offset of the group in the text.
    pub index: usize,

    /// The group's symbols.
    pub text: &'a str,

    /// Length of the chunk the group decodes to.
    pub bytes: usize,
}

/// Iterator over the digit groups of a validated text, see [`Codec::groups`].
///
/// Errors are non-recoverable: once one is yielded the iterator halts.
#[derive(Debug, Clone)]
pub struct Groups<'a> {
    text: &'a str,
    mode: Mode,
    index: usize,
    halted: bool,
}

impl<'a> Iterator for Groups<'a> {
    type Item = Result<Group<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted || self.index >= self.text.len() {
            return None;
        }

        let index = self.index;
        match frame(self.mode, self.text.len() - index, index) {
            Ok((width, bytes)) => {
                self.index += width;
                Some(Ok(Group {
                    index,
                    // validated text is ASCII, so any offset is a char boundary
                    text: &self.text[index..index + width],
                    bytes,
                }))
            }
            Err(err) => {
                self.halted = true;
                Some(Err(err))
            }
        }
    }
}
