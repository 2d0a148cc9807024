pub mod cell;
pub mod matrix;
pub mod transpose;

pub use cell::CellWidth;
pub use matrix::{ArrayMatrix, Matrix};
pub use transpose::TransposeView;
