use once_cell::sync::Lazy;

/// Largest number of bytes converted as one integer. Changing this changes
/// the text format.
pub const MAX_CHUNK: usize = 32;

/// Digits needed for a full [`MAX_CHUNK`] chunk.
pub const MAX_GROUP: usize = 43;

static TABLE: Lazy<ChunkTable> = Lazy::new(|| ChunkTable::new(MAX_CHUNK));

/// The process-wide table for [`MAX_CHUNK`].
pub fn chunk_table() -> &'static ChunkTable {
    &TABLE
}

/// Two-way lookup between a chunk's byte length and the width of its digit
/// group.
///
/// `digits[len]` is the smallest `d` with `62^d >= 2^(8 * len)`, i.e.
/// `ceil(len * 8 / log2(62))`. Index 0 is unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkTable {
    digits: Vec<usize>,
    bytes: Vec<Option<usize>>,
}

impl ChunkTable {
    pub fn new(max_chunk: usize) -> Self {
        let bits_per_digit = 62f64.log2();

        let mut digits = vec![0; max_chunk + 1];
        for len in 1..=max_chunk {
            digits[len] = ((len * 8) as f64 / bits_per_digit).ceil() as usize;
        }

        let mut bytes = vec![None; digits[max_chunk] + 1];
        for len in 1..=max_chunk {
            bytes[digits[len]] = Some(len);
        }

        Self { digits, bytes }
    }

    pub fn max_chunk(&self) -> usize {
        self.digits.len() - 1
    }

    pub fn max_digits(&self) -> usize {
        self.digits[self.max_chunk()]
    }

    /// Group width for a chunk of `len` bytes.
    pub fn digits_for(&self, len: usize) -> Option<usize> {
        match len {
            0 => None,
            _ => self.digits.get(len).copied(),
        }
    }

    /// Chunk length for a group of `width` digits, if any chunk produces it.
    pub fn bytes_for(&self, width: usize) -> Option<usize> {
        self.bytes.get(width).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_widths() {
        let table = chunk_table();
        assert_eq!(table.max_chunk(), MAX_CHUNK);
        assert_eq!(table.max_digits(), MAX_GROUP);
        assert_eq!(table.digits_for(0), None);
        assert_eq!(table.digits_for(1), Some(2));
        assert_eq!(table.digits_for(2), Some(3));
        assert_eq!(table.digits_for(3), Some(5));
        assert_eq!(table.digits_for(4), Some(6));
        assert_eq!(table.digits_for(8), Some(11));
        assert_eq!(table.digits_for(16), Some(22));
        assert_eq!(table.digits_for(32), Some(43));
        assert_eq!(table.digits_for(33), None);
    }

    #[test]
    fn widths_are_strictly_increasing() {
        let table = chunk_table();
        for len in 2..=MAX_CHUNK {
            assert!(table.digits_for(len) > table.digits_for(len - 1));
        }
    }

    #[test]
    fn inverse_is_exact() {
        let table = chunk_table();
        for len in 1..=MAX_CHUNK {
            let width = table.digits_for(len).unwrap();
            assert_eq!(table.bytes_for(width), Some(len));
        }

        let mapped = (0..=MAX_GROUP + 1)
            .filter(|&w| table.bytes_for(w).is_some())
            .count();
        assert_eq!(mapped, MAX_CHUNK);

        // widths skipped by the table
        assert_eq!(table.bytes_for(0), None);
        assert_eq!(table.bytes_for(1), None);
        assert_eq!(table.bytes_for(4), None);
        assert_eq!(table.bytes_for(44), None);
    }

    #[test]
    fn widths_are_minimal() {
        // 62^d must cover every value of the chunk, 62^(d-1) must not.
        let table = chunk_table();
        for len in 1..=MAX_CHUNK {
            let d = table.digits_for(len).unwrap() as f64;
            let bits = (len * 8) as f64;
            assert!(d * 62f64.log2() >= bits);
            assert!((d - 1.0) * 62f64.log2() < bits);
        }
    }

    #[test]
    fn smaller_tables_agree_with_the_global_one() {
        let small = ChunkTable::new(4);
        assert_eq!(small.max_chunk(), 4);
        assert_eq!(small.max_digits(), 6);
        for len in 1..=4 {
            assert_eq!(small.digits_for(len), chunk_table().digits_for(len));
        }
        assert_eq!(small.digits_for(5), None);
    }
}
