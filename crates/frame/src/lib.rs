//! Row-labeled series and frames over extension columns.
//!
//! This is the host side of the extension columns: named [`Series`] and
//! [`Frame`]s that align by row label, plus the domain accessors:
//! - [`RasterAccessor`]: NDVI over two raster columns of a frame
//! - [`StacAccessor`]: projections, asset lookup and raster materialization
//!   over a catalog-item series
//!
//! Materialization fetches data through an [`AssetResolver`] and is
//! controlled by a [`MaterializeConfig`].

pub mod accessor;
pub mod config;
pub mod frame;
pub mod index;
pub mod resolver;
pub mod series;

pub use accessor::{ndvi_series, RasterAccessor, StacAccessor};
pub use config::{FailurePolicy, MaterializeConfig};
pub use frame::Frame;
pub use index::{Alignment, Index, Label};
pub use resolver::{AssetResolver, InMemoryResolver};
pub use series::{Series, SeriesValues};

pub use frame_common::{FrameError, Result};
