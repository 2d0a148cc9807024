use tracing::trace;

use super::{ArrayMatrix, CellWidth, Matrix};
use crate::error::{MatrixError, Result};

/// Borrowed view of an [`ArrayMatrix`] with rows and columns swapped.
///
/// Every call `op(i, j, ..)` is forwarded as `op(j, i, ..)` to the
/// underlying matrix; the view owns no storage. Transposing the view hands
/// back the original matrix, so views never nest.
#[derive(Debug)]
pub struct TransposeView<'a> {
    matrix: &'a mut ArrayMatrix,
}

impl<'a> TransposeView<'a> {
    /// Wrap a matrix
    pub fn new(matrix: &'a mut ArrayMatrix) -> Self {
        Self { matrix }
    }

    /// Give back the borrowed matrix
    pub fn into_inner(self) -> &'a mut ArrayMatrix {
        self.matrix
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.matrix.size() {
            trace!(row, "transposed row out of bounds");
            return Err(MatrixError::OutOfBounds);
        }
        Ok(())
    }
}

impl<'m> Matrix for TransposeView<'m> {
    type Transposed<'a>
        = &'a mut ArrayMatrix
    where
        Self: 'a;

    fn size(&self) -> usize {
        self.matrix.size()
    }

    fn cell_width(&self) -> CellWidth {
        self.matrix.cell_width()
    }

    fn words_per_row(&self) -> usize {
        self.matrix.words_per_row()
    }

    fn set(&mut self, row: usize, col: usize) -> Result<()> {
        self.matrix.set(col, row)
    }

    fn unset(&mut self, row: usize, col: usize) -> Result<()> {
        self.matrix.unset(col, row)
    }

    fn set_bit(&mut self, row: usize, col: usize, bit: u32) -> Result<()> {
        self.matrix.set_bit(col, row, bit)
    }

    fn unset_bit(&mut self, row: usize, col: usize, bit: u32) -> Result<()> {
        self.matrix.unset_bit(col, row, bit)
    }

    fn replace(&mut self, row: usize, col: usize, value: u64) -> Result<()> {
        self.matrix.replace(col, row, value)
    }

    fn get(&self, row: usize, col: usize) -> Result<u64> {
        self.matrix.get(col, row)
    }

    /// Gather the logical row (a column of the underlying matrix) into the
    /// same packed layout a concrete row uses.
    fn get_row(&self, row: usize) -> Result<Vec<u64>> {
        self.check_row(row)?;
        let geometry = *self.matrix.geometry();
        let mut words = vec![0u64; geometry.words_per_row()];
        for col in 0..geometry.size() {
            let value = self.matrix.get(col, row)?;
            words[geometry.word_index(0, col)] |= value << geometry.bit_offset(col);
        }
        Ok(words)
    }

    /// Scatter packed words into the logical row. Padding bits are ignored.
    fn set_row(&mut self, row: usize, words: &[u64]) -> Result<()> {
        self.check_row(row)?;
        let geometry = *self.matrix.geometry();
        if words.len() != geometry.words_per_row() {
            trace!(len = words.len(), "transposed row buffer has the wrong length");
            return Err(MatrixError::OutOfBounds);
        }
        for col in 0..geometry.size() {
            let value =
                (words[geometry.word_index(0, col)] >> geometry.bit_offset(col)) & geometry.cell_mask();
            self.matrix.replace(col, row, value)?;
        }
        Ok(())
    }

    fn swap(&mut self, row0: usize, col0: usize, row1: usize, col1: usize) -> Result<()> {
        self.matrix.swap(col0, row0, col1, row1)
    }

    fn reverse_row(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        let size = self.matrix.size();
        for i in 0..size / 2 {
            self.matrix.swap(i, row, size - 1 - i, row)?;
        }
        Ok(())
    }

    /// Materialize the transpose: clone the raw words, then swap every
    /// cell pair across the diagonal.
    fn copy(&self) -> ArrayMatrix {
        let mut copy = self.matrix.clone();
        copy.transpose_in_place();
        copy
    }

    fn transpose(&mut self) -> &mut ArrayMatrix {
        &mut *self.matrix
    }
}
