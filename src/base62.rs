//! Conversion of a single chunk to and from its fixed-width digit group.
//!
//! Chunks are at most [`MAX_CHUNK`] bytes, so the arithmetic runs over a
//! stack buffer holding the big-endian integer directly.

use crate::alphabet::Alphabet;
use crate::error::Error;
use crate::table::{MAX_CHUNK, MAX_GROUP};

/// Append the `width`-symbol digit group for `chunk` to `out`.
///
/// `width` must be large enough for every value of `chunk`, which holds for
/// widths taken from the chunk table. Exactly `width` divisions are
/// performed, so leading zero digits come out as the alphabet's zero symbol
/// without a separate padding step.
pub(crate) fn encode_group(chunk: &[u8], width: usize, alphabet: Alphabet, out: &mut String) {
    debug_assert!(chunk.len() <= MAX_CHUNK && width <= MAX_GROUP);

    let mut scratch = [0u8; MAX_CHUNK];
    let num = &mut scratch[..chunk.len()];
    num.copy_from_slice(chunk);

    let mut digits = [0u8; MAX_GROUP];

    // Skip the leading zero bytes of the quotient instead of re-dividing them.
    let mut head = num.iter().position(|&b| b != 0).unwrap_or(num.len());

    for slot in digits[..width].iter_mut().rev() {
        let mut rem: u16 = 0;
        for byte in num[head..].iter_mut() {
            let acc = (rem << 8) | *byte as u16;
            *byte = (acc / 62) as u8;
            rem = acc % 62;
        }
        *slot = alphabet.symbol(rem as u8);

        while head < num.len() && num[head] == 0 {
            head += 1;
        }
    }
    debug_assert_eq!(head, num.len(), "group width too small for chunk");

    out.extend(digits[..width].iter().map(|&b| b as char));
}

/// Decode `group` into exactly `bytes` big-endian bytes appended to `out`.
///
/// `index` is the group's offset in the full text and only feeds error
/// reporting. Values of `2^(8 * bytes)` or more fail with
/// [`Error::Overflow`]; on any error `out` may hold a partial chunk and the
/// caller is expected to truncate it.
pub(crate) fn decode_group(
    group: &[u8],
    bytes: usize,
    index: usize,
    alphabet: Alphabet,
    out: &mut Vec<u8>,
) -> Result<(), Error> {
    let start = out.len();
    out.resize(start + bytes, 0);
    let num = &mut out[start..];

    for (i, &b) in group.iter().enumerate() {
        let digit = alphabet.digit(b).ok_or(Error::AlphabetMismatch {
            ch: b as char,
            index: index + i,
        })?;

        // num = num * 62 + digit
        let mut carry = digit as u32;
        for limb in num.iter_mut().rev() {
            let acc = (*limb as u32) * 62 + carry;
            *limb = (acc & 0xFF) as u8;
            carry = acc >> 8;
        }

        // the value only grows, so a carry past the top byte can never be undone
        if carry != 0 {
            return Err(Error::Overflow { index, bytes });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_group, encode_group};
    use crate::alphabet::Alphabet;
    use crate::error::Error;

    fn enc(chunk: &[u8], width: usize, alphabet: Alphabet) -> String {
        let mut s = String::new();
        encode_group(chunk, width, alphabet, &mut s);
        s
    }

    fn dec(group: &str, bytes: usize, alphabet: Alphabet) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        decode_group(group.as_bytes(), bytes, 0, alphabet, &mut out)?;
        Ok(out)
    }

    #[test]
    fn basics() {
        let lex = Alphabet::Lexicographic;
        assert_eq!(enc(&[0], 2, lex), "00");
        assert_eq!(enc(&[1], 2, lex), "01");
        assert_eq!(enc(&[255], 2, lex), "47"); // 255 = 4*62 + 7
        assert_eq!(enc(&[0, 0, 0, 1], 6, lex), "000001");
        assert_eq!(enc(b"hello", 7, lex), "7tQLFHz");
        assert_eq!(enc(&[0xFF; 4], 6, lex), "4gfFC3");
    }

    #[test]
    fn leading_zero_bytes_become_zero_symbols() {
        assert_eq!(enc(&[0, 0, 0, 0], 6, Alphabet::Base64), "AAAAAA");
        assert_eq!(enc(&[0, 0, 0, 62], 6, Alphabet::Base64), "AAAABA");
    }

    #[test]
    fn specific_values() {
        let lex = Alphabet::Lexicographic;
        assert_eq!(dec("00", 1, lex).unwrap(), vec![0]);
        assert_eq!(dec("01", 1, lex).unwrap(), vec![1]);
        assert_eq!(dec("47", 1, lex).unwrap(), vec![255]);
        assert_eq!(dec("000001", 4, lex).unwrap(), vec![0, 0, 0, 1]);
        assert_eq!(dec("7tQLFHz", 5, lex).unwrap(), b"hello");
    }

    #[test]
    fn full_width_chunk() {
        let lex = Alphabet::Lexicographic;
        let max = enc(&[0xFF; 32], 43, lex);
        assert_eq!(max, "yhjskwdA6OZ1AL1YmHWZWm8LLG7HjnuCA2j5rOw8Xp1");
        assert_eq!(dec(&max, 32, lex).unwrap(), vec![0xFF; 32]);
    }

    #[test]
    fn rejects_values_past_the_chunk_width() {
        let lex = Alphabet::Lexicographic;
        // 256 = 4*62 + 8
        assert_eq!(dec("48", 1, lex), Err(Error::Overflow { index: 0, bytes: 1 }));
        assert_eq!(dec("zz", 1, lex), Err(Error::Overflow { index: 0, bytes: 1 }));
        // 62^6 - 1 > 2^32 - 1
        assert_eq!(
            dec("zzzzzz", 4, lex),
            Err(Error::Overflow { index: 0, bytes: 4 })
        );
        // one past "4gfFC3" (2^32 - 1)
        assert_eq!(
            dec("4gfFC4", 4, lex),
            Err(Error::Overflow { index: 0, bytes: 4 })
        );
    }

    #[test]
    fn reports_foreign_symbols_at_their_offset() {
        let mut out = Vec::new();
        let err = decode_group(b"0!", 1, 10, Alphabet::Lexicographic, &mut out).unwrap_err();
        assert_eq!(err, Error::AlphabetMismatch { ch: '!', index: 11 });
    }
}
