//! Catalog-item columns and the asset descriptors they reference.

mod asset;
mod column;
mod item;

pub use asset::AssetColumn;
pub use column::{AssetNamePolicy, IngestOptions, ItemColumn};
pub use item::{Asset, CatalogItem};
