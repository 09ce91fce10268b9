//! Domain accessors over series and frames.

pub mod raster;
pub mod stac;

pub use raster::{ndvi_series, RasterAccessor};
pub use stac::StacAccessor;
