use rayon::prelude::*;
use tracing::{debug, trace};

use super::{CellWidth, TransposeView};
use crate::config::parallel_min_rows;
use crate::error::{MatrixError, Result};
use crate::utils::bits::{count_nonzero_cells, reverse_row_words};
use crate::utils::geometry::Geometry;

/// Operations shared by owning matrices and transpose views.
///
/// The first coordinate is always the row, the second the column. Every
/// coordinate-taking operation fails with [`MatrixError::OutOfBounds`]
/// instead of panicking or clamping.
pub trait Matrix {
    /// What [`Matrix::transpose`] hands back: a view for an owning matrix,
    /// the owning matrix again for a view.
    type Transposed<'a>: Matrix
    where
        Self: 'a;

    /// Row (and column) count
    fn size(&self) -> usize;

    /// Width of every cell
    fn cell_width(&self) -> CellWidth;

    /// Words in one packed row, as used by [`Matrix::get_row`]
    fn words_per_row(&self) -> usize;

    /// Set the principal bit (bit 0) of a cell
    fn set(&mut self, row: usize, col: usize) -> Result<()>;

    /// Clear the principal bit of a cell
    fn unset(&mut self, row: usize, col: usize) -> Result<()>;

    /// Set bit `bit` of a cell, `bit < cell_width().bits()`
    fn set_bit(&mut self, row: usize, col: usize, bit: u32) -> Result<()>;

    /// Clear bit `bit` of a cell, leaving neighbouring cells untouched
    fn unset_bit(&mut self, row: usize, col: usize, bit: u32) -> Result<()>;

    /// Overwrite a whole cell. Bits of `value` above the cell width are dropped.
    fn replace(&mut self, row: usize, col: usize, value: u64) -> Result<()>;

    /// Zero a whole cell
    fn clear(&mut self, row: usize, col: usize) -> Result<()> {
        self.replace(row, col, 0)
    }

    /// Read a cell
    fn get(&self, row: usize, col: usize) -> Result<u64>;

    /// Copy out the packed words of a row
    fn get_row(&self, row: usize) -> Result<Vec<u64>>;

    /// Overwrite a row from exactly `words_per_row()` packed words
    fn set_row(&mut self, row: usize, words: &[u64]) -> Result<()>;

    /// Exchange the contents of two cells
    fn swap(&mut self, row0: usize, col0: usize, row1: usize, col1: usize) -> Result<()>;

    /// Reverse the order of the cells in a row. Each cell keeps its own bits.
    fn reverse_row(&mut self, row: usize) -> Result<()>;

    /// Deep copy into a new owning matrix holding the data as seen here
    fn copy(&self) -> ArrayMatrix;

    /// Swap rows and columns without copying storage
    fn transpose(&mut self) -> Self::Transposed<'_>;
}

/// Square matrix stored as a flat array of 64-bit words, one word-aligned
/// run of `words_per_row` words per row.
///
/// Not internally synchronized: concurrent readers are fine only while no
/// writer is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayMatrix {
    geometry: Geometry,
    words: Vec<u64>,
}

impl ArrayMatrix {
    /// Create a zero-filled `size` x `size` matrix of `width`-bit cells.
    ///
    /// A zero size gives an empty matrix on which every coordinate is out
    /// of bounds.
    pub fn new(width: CellWidth, size: usize) -> Self {
        let geometry = Geometry::new(width, size);
        debug!(
            size,
            cell_bits = width.bits(),
            words_per_row = geometry.words_per_row(),
            "allocating array matrix"
        );
        Self {
            words: vec![0; geometry.word_count()],
            geometry,
        }
    }

    /// Layout of this matrix
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Mask isolating one cell
    pub fn cell_mask(&self) -> u64 {
        self.geometry.cell_mask()
    }

    /// The whole word store, row after row
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Zero every cell, keeping the allocation
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Reverse every row. Large matrices are processed in parallel.
    pub fn reverse_rows(&mut self) {
        let stride = self.geometry.words_per_row();
        if stride == 0 {
            return;
        }
        let width = self.geometry.width();
        let padding = self.geometry.padding_bits();
        if self.geometry.size() >= parallel_min_rows() {
            debug!(size = self.geometry.size(), "reversing rows in parallel");
            self.words
                .par_chunks_mut(stride)
                .for_each(|row| reverse_row_words(row, width, padding));
        } else {
            self.words
                .chunks_mut(stride)
                .for_each(|row| reverse_row_words(row, width, padding));
        }
    }

    /// Number of cells holding a non-zero value (the edge count of an
    /// adjacency matrix). Bits in row padding are ignored.
    pub fn count_nonzero(&self) -> usize {
        let stride = self.geometry.words_per_row();
        if stride == 0 {
            return 0;
        }
        let width = self.geometry.width();
        let tail_mask = u64::MAX >> self.geometry.padding_bits();
        let count_row = |row: &[u64]| -> usize {
            let (last, body) = row.split_last().map_or((0, row), |(l, b)| (*l, b));
            body.iter()
                .map(|&w| count_nonzero_cells(w, width) as usize)
                .sum::<usize>()
                + count_nonzero_cells(last & tail_mask, width) as usize
        };
        if self.geometry.size() >= parallel_min_rows() {
            debug!(size = self.geometry.size(), "counting cells in parallel");
            self.words.par_chunks(stride).map(count_row).sum()
        } else {
            self.words.chunks(stride).map(count_row).sum()
        }
    }

    /// Bounds-check a cell and return its word index and bit offset
    fn locate(&self, row: usize, col: usize) -> Result<(usize, u32)> {
        if !self.geometry.contains(row, col) {
            trace!(row, col, size = self.geometry.size(), "cell out of bounds");
            return Err(MatrixError::OutOfBounds);
        }
        Ok((
            self.geometry.word_index(row, col),
            self.geometry.bit_offset(col),
        ))
    }

    fn check_bit(&self, bit: u32) -> Result<()> {
        if bit >= self.geometry.width().bits() {
            trace!(bit, "sub-bit index out of bounds");
            return Err(MatrixError::OutOfBounds);
        }
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.geometry.size() {
            trace!(row, size = self.geometry.size(), "row out of bounds");
            return Err(MatrixError::OutOfBounds);
        }
        Ok(())
    }

    /// XOR-swap two in-bounds cells; works when both share a word
    fn swap_unchecked(&mut self, row0: usize, col0: usize, row1: usize, col1: usize) {
        let mask = self.geometry.cell_mask();
        let (idx0, off0) = (
            self.geometry.word_index(row0, col0),
            self.geometry.bit_offset(col0),
        );
        let (idx1, off1) = (
            self.geometry.word_index(row1, col1),
            self.geometry.bit_offset(col1),
        );
        let diff = ((self.words[idx0] >> off0) ^ (self.words[idx1] >> off1)) & mask;
        self.words[idx0] ^= diff << off0;
        self.words[idx1] ^= diff << off1;
    }

    /// Transpose the data in place by swapping across the diagonal
    pub(crate) fn transpose_in_place(&mut self) {
        let size = self.geometry.size();
        for i in 0..size {
            for j in (i + 1)..size {
                self.swap_unchecked(i, j, j, i);
            }
        }
    }
}

impl Default for ArrayMatrix {
    fn default() -> Self {
        Self::new(CellWidth::Bit, 0)
    }
}

impl Matrix for ArrayMatrix {
    type Transposed<'a> = TransposeView<'a>;

    fn size(&self) -> usize {
        self.geometry.size()
    }

    fn cell_width(&self) -> CellWidth {
        self.geometry.width()
    }

    fn words_per_row(&self) -> usize {
        self.geometry.words_per_row()
    }

    fn set(&mut self, row: usize, col: usize) -> Result<()> {
        let (idx, offset) = self.locate(row, col)?;
        self.words[idx] |= 1 << offset;
        Ok(())
    }

    fn unset(&mut self, row: usize, col: usize) -> Result<()> {
        let (idx, offset) = self.locate(row, col)?;
        self.words[idx] &= !(1 << offset);
        Ok(())
    }

    fn set_bit(&mut self, row: usize, col: usize, bit: u32) -> Result<()> {
        let (idx, offset) = self.locate(row, col)?;
        self.check_bit(bit)?;
        self.words[idx] |= 1 << (offset + bit);
        Ok(())
    }

    fn unset_bit(&mut self, row: usize, col: usize, bit: u32) -> Result<()> {
        let (idx, offset) = self.locate(row, col)?;
        self.check_bit(bit)?;
        self.words[idx] &= !((1 << (offset + bit)) & (self.geometry.cell_mask() << offset));
        Ok(())
    }

    fn replace(&mut self, row: usize, col: usize, value: u64) -> Result<()> {
        let (idx, offset) = self.locate(row, col)?;
        let word = self.words[idx];
        self.words[idx] ^= (word ^ (value << offset)) & (self.geometry.cell_mask() << offset);
        Ok(())
    }

    fn get(&self, row: usize, col: usize) -> Result<u64> {
        let (idx, offset) = self.locate(row, col)?;
        Ok((self.words[idx] >> offset) & self.geometry.cell_mask())
    }

    fn get_row(&self, row: usize) -> Result<Vec<u64>> {
        self.check_row(row)?;
        Ok(self.words[self.geometry.row_range(row)].to_vec())
    }

    fn set_row(&mut self, row: usize, words: &[u64]) -> Result<()> {
        self.check_row(row)?;
        if words.len() != self.geometry.words_per_row() {
            trace!(
                len = words.len(),
                expected = self.geometry.words_per_row(),
                "row buffer has the wrong length"
            );
            return Err(MatrixError::OutOfBounds);
        }
        let range = self.geometry.row_range(row);
        self.words[range].copy_from_slice(words);
        Ok(())
    }

    fn swap(&mut self, row0: usize, col0: usize, row1: usize, col1: usize) -> Result<()> {
        self.locate(row0, col0)?;
        self.locate(row1, col1)?;
        self.swap_unchecked(row0, col0, row1, col1);
        Ok(())
    }

    fn reverse_row(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        let range = self.geometry.row_range(row);
        reverse_row_words(
            &mut self.words[range],
            self.geometry.width(),
            self.geometry.padding_bits(),
        );
        Ok(())
    }

    fn copy(&self) -> ArrayMatrix {
        self.clone()
    }

    fn transpose(&mut self) -> TransposeView<'_> {
        TransposeView::new(self)
    }
}

impl<M: Matrix + ?Sized> Matrix for &mut M {
    type Transposed<'a>
        = M::Transposed<'a>
    where
        Self: 'a;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn cell_width(&self) -> CellWidth {
        (**self).cell_width()
    }

    fn words_per_row(&self) -> usize {
        (**self).words_per_row()
    }

    fn set(&mut self, row: usize, col: usize) -> Result<()> {
        (**self).set(row, col)
    }

    fn unset(&mut self, row: usize, col: usize) -> Result<()> {
        (**self).unset(row, col)
    }

    fn set_bit(&mut self, row: usize, col: usize, bit: u32) -> Result<()> {
        (**self).set_bit(row, col, bit)
    }

    fn unset_bit(&mut self, row: usize, col: usize, bit: u32) -> Result<()> {
        (**self).unset_bit(row, col, bit)
    }

    fn replace(&mut self, row: usize, col: usize, value: u64) -> Result<()> {
        (**self).replace(row, col, value)
    }

    fn clear(&mut self, row: usize, col: usize) -> Result<()> {
        (**self).clear(row, col)
    }

    fn get(&self, row: usize, col: usize) -> Result<u64> {
        (**self).get(row, col)
    }

    fn get_row(&self, row: usize) -> Result<Vec<u64>> {
        (**self).get_row(row)
    }

    fn set_row(&mut self, row: usize, words: &[u64]) -> Result<()> {
        (**self).set_row(row, words)
    }

    fn swap(&mut self, row0: usize, col0: usize, row1: usize, col1: usize) -> Result<()> {
        (**self).swap(row0, col0, row1, col1)
    }

    fn reverse_row(&mut self, row: usize) -> Result<()> {
        (**self).reverse_row(row)
    }

    fn copy(&self) -> ArrayMatrix {
        (**self).copy()
    }

    fn transpose(&mut self) -> Self::Transposed<'_> {
        (**self).transpose()
    }
}
