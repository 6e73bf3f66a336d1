use crate::error::Error;
use serde::{Deserialize, Serialize};

const LEXICOGRAPHIC: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE64: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const BASE_N: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Marks a byte that is not part of an alphabet in the reverse indices.
const INVALID: u8 = 0xFF;

const LEXICOGRAPHIC_INDEX: [u8; 256] = reverse_index(LEXICOGRAPHIC);
const BASE64_INDEX: [u8; 256] = reverse_index(BASE64);
const BASE_N_INDEX: [u8; 256] = reverse_index(BASE_N);

const fn reverse_index(symbols: &[u8; 62]) -> [u8; 256] {
    let mut index = [INVALID; 256];
    let mut i = 0;
    while i < symbols.len() {
        index[symbols[i] as usize] = i as u8;
        i += 1;
    }
    index
}

/// The ordering of the 62 symbols used for digits `0..62`.
///
/// All three orderings use the same character set (`0-9`, `A-Z`, `a-z`), so
/// text is always URL-safe; they differ in which symbol stands for which
/// digit. Only [`Alphabet::Lexicographic`] makes encoded groups of equal
/// width sort the same way as the bytes they came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alphabet {
    /// `0-9A-Za-z`, the ASCII sort order.
    #[default]
    #[serde(alias = "lex")]
    Lexicographic,

    /// `A-Za-z0-9`, the first 62 symbols of standard base64.
    #[serde(alias = "b64", alias = "base64-like")]
    Base64,

    /// `0-9a-zA-Z`, the digits-then-lowercase order of most base-N tools.
    #[serde(alias = "natural", alias = "basen")]
    BaseN,
}

impl Alphabet {
    pub const ALL: [Alphabet; 3] = [Alphabet::Lexicographic, Alphabet::Base64, Alphabet::BaseN];

    /// Symbols indexed by digit value.
    pub const fn symbols(self) -> &'static [u8; 62] {
        match self {
            Alphabet::Lexicographic => LEXICOGRAPHIC,
            Alphabet::Base64 => BASE64,
            Alphabet::BaseN => BASE_N,
        }
    }

    /// The symbol for digit zero, used to left-pad groups.
    pub const fn zero(self) -> u8 {
        self.symbols()[0]
    }

    /// Symbol for `digit`. `digit` must be below 62.
    #[inline]
    pub(crate) fn symbol(self, digit: u8) -> u8 {
        self.symbols()[digit as usize]
    }

    /// Digit value of the ASCII byte `b`, or `None` if it is not a symbol.
    #[inline]
    pub fn digit(self, b: u8) -> Option<u8> {
        let index = match self {
            Alphabet::Lexicographic => &LEXICOGRAPHIC_INDEX,
            Alphabet::Base64 => &BASE64_INDEX,
            Alphabet::BaseN => &BASE_N_INDEX,
        };
        match index[b as usize] {
            INVALID => None,
            d => Some(d),
        }
    }

    /// Check that every character of `text` belongs to this alphabet.
    ///
    /// Reports the first offending character together with its byte offset.
    pub fn validate(self, text: &str) -> Result<(), Error> {
        if text.bytes().all(|b| self.digit(b).is_some()) {
            return Ok(());
        }

        // slow path: recover the full char, which may be multi-byte
        for (index, ch) in text.char_indices() {
            if !ch.is_ascii() || self.digit(ch as u8).is_none() {
                return Err(Error::AlphabetMismatch { ch, index });
            }
        }
        Ok(())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Alphabet::Lexicographic => "lexicographic",
            Alphabet::Base64 => "base64",
            Alphabet::BaseN => "base-n",
        }
    }
}

impl core::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown alphabet or mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl core::fmt::Display for UnknownName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown name '{}'", self.0)
    }
}

impl std::error::Error for UnknownName {}

impl core::str::FromStr for Alphabet {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexicographic" | "lex" => Ok(Alphabet::Lexicographic),
            "base64" | "b64" | "base64-like" => Ok(Alphabet::Base64),
            "base-n" | "natural" | "basen" => Ok(Alphabet::BaseN),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}
