//! Typed extension columns for dataframe hosts.
//!
//! Provides a shared column contract ([`TypedColumn`]) and three column
//! types built on it:
//! - [`RasterColumn`]: one labeled N-D array per row
//! - [`ItemColumn`]: one catalog item per row, with field projections
//! - [`AssetColumn`]: one asset descriptor per row
//!
//! [`AnyColumn`] erases the concrete type for hosts that mix columns.

pub mod any;
pub mod catalog;
pub mod column;
pub mod element;
pub mod mask;
pub mod raster;
pub mod selection;

pub use any::AnyColumn;
pub use catalog::{Asset, AssetColumn, AssetNamePolicy, CatalogItem, IngestOptions, ItemColumn};
pub use column::{ColumnType, TypedColumn, MISSING_DISPLAY};
pub use element::Element;
pub use mask::BooleanMask;
pub use raster::{ndvi, normalized_difference, LabeledArray, RasterColumn};
pub use selection::{Selection, SliceSpec};

pub use frame_common::{FrameError, Result};
