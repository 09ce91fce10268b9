//! Turning asset descriptors into raster payloads.

use std::collections::HashMap;

use extension_array::{Asset, CatalogItem, LabeledArray};
use frame_common::{FrameError, Result};

/// Fetches and decodes the data behind one asset of one catalog item.
///
/// Implementations are called from worker threads when materialization runs
/// in parallel.
pub trait AssetResolver: Send + Sync {
    fn resolve(&self, item: &CatalogItem, asset_name: &str, asset: &Asset) -> Result<LabeledArray>;
}

impl<F> AssetResolver for F
where
    F: Fn(&CatalogItem, &str, &Asset) -> Result<LabeledArray> + Send + Sync,
{
    fn resolve(&self, item: &CatalogItem, asset_name: &str, asset: &Asset) -> Result<LabeledArray> {
        self(item, asset_name, asset)
    }
}

/// Resolver over arrays already in memory, keyed by asset href.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    arrays: HashMap<String, LabeledArray>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, href: impl Into<String>, array: LabeledArray) -> Option<LabeledArray> {
        self.arrays.insert(href.into(), array)
    }

    pub fn with_array(mut self, href: impl Into<String>, array: LabeledArray) -> Self {
        self.insert(href, array);
        self
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

impl AssetResolver for InMemoryResolver {
    fn resolve(&self, item: &CatalogItem, asset_name: &str, asset: &Asset) -> Result<LabeledArray> {
        self.arrays.get(&asset.href).cloned().ok_or_else(|| {
            FrameError::resolution(
                &item.id,
                asset_name,
                format!("no array registered for href {}", asset.href),
            )
        })
    }
}
