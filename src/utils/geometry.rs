//! Packed-word addressing for square matrices.
//!
//! Each row starts on a fresh word, so a row occupies `words_per_row`
//! consecutive words and cell `(row, col)` lives entirely inside
//! `words[row * words_per_row + col * bits / 64]` at bit
//! `col * bits % 64`. Cell widths are powers of two no wider than a word,
//! so a cell never straddles two words.

use crate::models::CellWidth;
use std::ops::Range;

/// Bits in one storage word
pub const WORD_BITS: usize = 64;
/// log2 of [`WORD_BITS`]
pub const WORD_BITS_EXP: u32 = 6;

/// Layout of a `size` x `size` matrix of `width`-bit cells.
///
/// Computed once at construction and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    size: usize,
    width: CellWidth,
    words_per_row: usize,
}

impl Geometry {
    /// Derive the layout for a matrix of the given width and size
    pub fn new(width: CellWidth, size: usize) -> Self {
        let bits_per_row = size << width.exp();
        Self {
            size,
            width,
            words_per_row: bits_per_row.div_ceil(WORD_BITS),
        }
    }

    /// Row (and column) count
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell width
    pub fn width(&self) -> CellWidth {
        self.width
    }

    /// Words needed for one row, rounded up
    pub fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    /// Total words backing the matrix
    pub fn word_count(&self) -> usize {
        self.size * self.words_per_row
    }

    /// Mask isolating one cell in the low bits of a word
    pub fn cell_mask(&self) -> u64 {
        self.width.mask()
    }

    /// Whether `(row, col)` addresses a cell of this matrix
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Index of the word holding cell `(row, col)`
    pub fn word_index(&self, row: usize, col: usize) -> usize {
        row * self.words_per_row + ((col << self.width.exp()) >> WORD_BITS_EXP)
    }

    /// Offset of the cell's bit 0 inside its word
    pub fn bit_offset(&self, col: usize) -> u32 {
        ((col << self.width.exp()) & (WORD_BITS - 1)) as u32
    }

    /// Word range of `row` inside the word store
    pub fn row_range(&self, row: usize) -> Range<usize> {
        let start = row * self.words_per_row;
        start..start + self.words_per_row
    }

    /// Unused high bits at the end of every row's last word
    pub fn padding_bits(&self) -> u32 {
        (self.words_per_row * WORD_BITS - (self.size << self.width.exp())) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_per_row() {
        for width in CellWidth::ALL {
            for size in [1usize, 2, 8, 50, 100, 1024] {
                let geometry = Geometry::new(width, size);
                let expected = (size * width.bits() as usize + 63) / 64;
                assert_eq!(geometry.words_per_row(), expected, "{width:?} x {size}");
                assert_eq!(geometry.word_count(), size * expected);
            }
        }
    }

    #[test]
    fn test_word_index_and_offset() {
        // 100 four-bit cells: 400 bits, 7 words per row
        let geometry = Geometry::new(CellWidth::FourBit, 100);
        assert_eq!(geometry.words_per_row(), 7);
        assert_eq!(geometry.word_index(0, 15), 0);
        assert_eq!(geometry.word_index(0, 16), 1);
        assert_eq!(geometry.word_index(31, 31), 31 * 7 + 1);
        assert_eq!(geometry.bit_offset(31), 60);
        assert_eq!(geometry.bit_offset(16), 0);
        assert_eq!(geometry.padding_bits(), 48);
    }

    #[test]
    fn test_long_cells_fill_whole_words() {
        let geometry = Geometry::new(CellWidth::Long, 3);
        assert_eq!(geometry.words_per_row(), 3);
        assert_eq!(geometry.word_index(2, 1), 7);
        assert_eq!(geometry.bit_offset(1), 0);
        assert_eq!(geometry.padding_bits(), 0);
    }

    #[test]
    fn test_empty_geometry() {
        let geometry = Geometry::new(CellWidth::Byte, 0);
        assert_eq!(geometry.words_per_row(), 0);
        assert_eq!(geometry.word_count(), 0);
        assert_eq!(geometry.padding_bits(), 0);
        assert!(!geometry.contains(0, 0));
    }
}
