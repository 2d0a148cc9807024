//! tinygraph - dense bit-packed square matrices
//!
//! A square matrix of fixed-width cells (1, 2, 4, 8, 16, 32 or 64 bits)
//! packed into a flat array of 64-bit words, meant as the adjacency store
//! of a small graph with per-edge labels. Each row starts on a fresh word.
//!
//! Both the owning [`ArrayMatrix`] and the zero-copy [`TransposeView`]
//! expose the same [`Matrix`] operations. Nothing here is internally
//! synchronized; callers serialize writers themselves.
//!
//! # Example
//! ```
//! use tinygraph::{ArrayMatrix, CellWidth, Matrix};
//!
//! let mut graph = ArrayMatrix::new(CellWidth::FourBit, 100);
//! graph.replace(3, 7, 0b1010).unwrap();
//! assert_eq!(graph.transpose().get(7, 3).unwrap(), 0b1010);
//!
//! let reversed = graph.transpose().copy();
//! assert_eq!(reversed.get(7, 3).unwrap(), 0b1010);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod config;
mod error;
/// Core data structures (ArrayMatrix, TransposeView, CellWidth)
pub mod models;
/// Packed layout helpers (geometry, bit tricks)
pub mod utils;

pub use error::{MatrixError, Result};
pub use models::{ArrayMatrix, CellWidth, Matrix, TransposeView};
