//! Catalog-item series: projections, asset lookup and raster materialization.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, warn};

use extension_array::{
    AssetColumn, BooleanMask, CatalogItem, Element, ItemColumn, LabeledArray, RasterColumn,
    TypedColumn,
};
use frame_common::{BoundingBox, FrameError, Result, TimeRange};

use crate::config::{FailurePolicy, MaterializeConfig};
use crate::frame::Frame;
use crate::resolver::AssetResolver;
use crate::series::Series;

type Cell = Result<Option<LabeledArray>>;

/// Catalog operations on a series of items.
#[derive(Debug, Clone, Copy)]
pub struct StacAccessor<'a> {
    series: &'a Series<ItemColumn>,
}

impl<'a> StacAccessor<'a> {
    pub fn new(series: &'a Series<ItemColumn>) -> Self {
        Self { series }
    }

    pub fn asset_names(&self, policy: extension_array::AssetNamePolicy) -> Vec<String> {
        self.series.values().asset_names(policy)
    }

    /// Acquisition times as a series named `"datetime"`.
    pub fn datetime(&self) -> Result<Series<Vec<Option<DateTime<Utc>>>>> {
        Series::with_index(
            "datetime",
            self.series.index().clone(),
            self.series.values().datetimes()?,
        )
    }

    /// Descriptors of asset `name` as a series named after the asset.
    pub fn assets(&self, name: &str) -> Result<Series<AssetColumn>> {
        Series::with_index(name, self.series.index().clone(), self.series.values().asset(name)?)
    }

    /// Items acquired within `range`.
    pub fn between(&self, range: &TimeRange) -> Result<Series<ItemColumn>> {
        let mask = self.series.values().datetime_mask(range)?;
        self.series.select(&mask.into())
    }

    /// Items whose footprint overlaps `bbox`.
    pub fn intersecting(&self, bbox: &BoundingBox) -> Result<Series<ItemColumn>> {
        let mask = self.series.values().bbox_mask(bbox);
        self.series.select(&mask.into())
    }

    /// Resolve assets into raster columns and join them to the item series.
    ///
    /// `assets` names what to materialize; when absent or empty the names come
    /// from `config.asset_names`. Each raster column is named after its asset
    /// and shares the series' row labels. Cells whose item is missing stay
    /// missing. A cell that fails to resolve is handled per
    /// `config.on_failure`. The source series is left untouched.
    pub fn with_rasters<R>(
        &self,
        assets: Option<&[&str]>,
        resolver: &R,
        config: &MaterializeConfig,
    ) -> Result<Frame>
    where
        R: AssetResolver + ?Sized,
    {
        config.validate()?;

        let names: Vec<String> = match assets {
            Some(names) if !names.is_empty() => names.iter().map(|name| name.to_string()).collect(),
            _ => self.asset_names(config.asset_names),
        };
        if names.is_empty() {
            return Err(FrameError::invalid_argument("no assets to materialize"));
        }

        let pool = match (config.parallel, config.threads) {
            (true, Some(threads)) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| FrameError::Config(e.to_string()))?,
            ),
            _ => None,
        };

        let mut frame = Frame::from_series(self.series.clone());
        let mut skipped = vec![false; self.series.len()];

        for name in &names {
            // Abort stops resolving at the first failure instead of finishing the column.
            let cells: Vec<Cell> = match config.on_failure {
                FailurePolicy::Abort => {
                    let arrays: Result<Vec<Option<LabeledArray>>> =
                        self.resolve_cells(name, resolver, config.parallel, pool.as_ref());
                    arrays?.into_iter().map(Ok).collect()
                }
                _ => self.resolve_cells(name, resolver, config.parallel, pool.as_ref()),
            };

            let mut arrays = Vec::with_capacity(cells.len());
            for (row, cell) in cells.into_iter().enumerate() {
                match (cell, config.on_failure) {
                    (Ok(array), _) => arrays.push(array),
                    (Err(err), FailurePolicy::Abort) => return Err(err),
                    (Err(err), FailurePolicy::NullCell) => {
                        warn!(
                            row,
                            asset = %name,
                            error = %err,
                            "Asset failed to resolve, leaving cell missing"
                        );
                        arrays.push(None);
                    }
                    (Err(err), FailurePolicy::SkipRow) => {
                        warn!(
                            row,
                            asset = %name,
                            error = %err,
                            "Asset failed to resolve, skipping row"
                        );
                        skipped[row] = true;
                        arrays.push(None);
                    }
                }
            }

            let column = RasterColumn::from_options(arrays);
            debug!(
                asset = %name,
                rows = column.len(),
                missing = column.is_missing().true_count(),
                bytes = column.byte_size(),
                "Materialized asset column"
            );
            frame.insert(name.clone(), column)?;
        }

        if skipped.iter().any(|&skip| skip) {
            let keep: BooleanMask = skipped.iter().map(|&skip| !skip).collect();
            frame = frame.filter(&keep)?;
        }
        Ok(frame)
    }

    /// Resolve one asset for every row, in row order.
    ///
    /// Collecting into a `Result` stops at the first failed cell.
    fn resolve_cells<C, R>(
        &self,
        name: &str,
        resolver: &R,
        parallel: bool,
        pool: Option<&ThreadPool>,
    ) -> C
    where
        C: FromIterator<Cell> + FromParallelIterator<Cell> + Send,
        R: AssetResolver + ?Sized,
    {
        let elements = self.series.values().elements();
        let resolve = |element: &Element<Arc<CatalogItem>>| -> Cell {
            let Some(item) = element.present() else {
                return Ok(None);
            };
            let asset = item.asset(name).ok_or_else(|| FrameError::MissingAsset {
                item_id: item.id.clone(),
                asset: name.to_string(),
            })?;
            resolver
                .resolve(&**item, name, asset)
                .map(|array| Some(array.squeeze()))
        };

        if !parallel {
            return elements.iter().map(resolve).collect();
        }
        let run = || elements.par_iter().map(resolve).collect::<C>();
        match pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

impl Series<ItemColumn> {
    pub fn stac(&self) -> StacAccessor<'_> {
        StacAccessor::new(self)
    }
}
