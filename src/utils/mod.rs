//! Helpers for the packed word layout
//!
//! - Geometry (words per row, word index, bit offset, cell mask)
//! - Word-level bit tricks (cell-order reversal, carry shifts, cell counts)

pub mod bits;
pub mod geometry;
