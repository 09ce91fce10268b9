//! Raster columns: labeled N-D arrays and band math over them.

mod array;
mod column;
pub mod ops;

pub use array::LabeledArray;
pub use column::RasterColumn;
pub use ops::{ndvi, normalized_difference};
