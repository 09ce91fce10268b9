//! Dynamically typed columns for hosts that store heterogeneous columns.

use std::fmt::{self, Display};

use frame_common::{FrameError, Result};

use crate::catalog::{AssetColumn, ItemColumn};
use crate::column::{ColumnType, TypedColumn};
use crate::mask::BooleanMask;
use crate::raster::RasterColumn;
use crate::selection::Selection;

/// One extension column of any registered type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyColumn {
    Raster(RasterColumn),
    Stac(ItemColumn),
    Asset(AssetColumn),
}

/// Run the same expression against whichever column variant is held.
macro_rules! dispatch {
    ($column:expr, $inner:ident => $body:expr) => {
        match $column {
            AnyColumn::Raster($inner) => $body,
            AnyColumn::Stac($inner) => $body,
            AnyColumn::Asset($inner) => $body,
        }
    };
}

/// Same as `dispatch!`, re-wrapping a column result in its variant.
macro_rules! dispatch_wrap {
    ($column:expr, $inner:ident => $body:expr) => {
        match $column {
            AnyColumn::Raster($inner) => $body.map(AnyColumn::Raster),
            AnyColumn::Stac($inner) => $body.map(AnyColumn::Stac),
            AnyColumn::Asset($inner) => $body.map(AnyColumn::Asset),
        }
    };
}

impl AnyColumn {
    pub fn column_type(&self) -> ColumnType {
        dispatch!(self, c => c.column_type())
    }

    pub fn len(&self) -> usize {
        dispatch!(self, c => c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self) -> BooleanMask {
        dispatch!(self, c => c.is_missing())
    }

    pub fn byte_size(&self) -> usize {
        dispatch!(self, c => c.byte_size())
    }

    pub fn formatted(&self) -> Vec<String> {
        dispatch!(self, c => c.formatted())
    }

    pub fn copy(&self) -> Self {
        match self {
            AnyColumn::Raster(c) => AnyColumn::Raster(c.copy()),
            AnyColumn::Stac(c) => AnyColumn::Stac(c.copy()),
            AnyColumn::Asset(c) => AnyColumn::Asset(c.copy()),
        }
    }

    pub fn select(&self, selection: &Selection) -> Result<Self> {
        dispatch_wrap!(self, c => c.select(selection))
    }

    /// Gather rows; with `allow_fill`, `-1` inserts a missing cell.
    pub fn take(&self, indices: &[i64], allow_fill: bool) -> Result<Self> {
        dispatch_wrap!(self, c => c.take(indices, allow_fill, None))
    }

    /// Concatenate columns that all share one type tag.
    pub fn concat(columns: &[AnyColumn]) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(FrameError::invalid_argument(
                "cannot concatenate an empty list of columns",
            ));
        };
        let expected = first.column_type();
        if let Some(other) = columns.iter().find(|c| c.column_type() != expected) {
            return Err(FrameError::type_mismatch(
                expected.name(),
                other.column_type().name(),
            ));
        }

        Ok(match first {
            AnyColumn::Raster(_) => AnyColumn::Raster(RasterColumn::concat(
                &columns.iter().filter_map(AnyColumn::as_raster).cloned().collect::<Vec<_>>(),
            )),
            AnyColumn::Stac(_) => AnyColumn::Stac(ItemColumn::concat(
                &columns.iter().filter_map(AnyColumn::as_items).cloned().collect::<Vec<_>>(),
            )),
            AnyColumn::Asset(_) => AnyColumn::Asset(AssetColumn::concat(
                &columns.iter().filter_map(AnyColumn::as_assets).cloned().collect::<Vec<_>>(),
            )),
        })
    }

    /// Positional equality for columns of the same type.
    ///
    /// Returns `None` when the types differ, leaving the decision to the
    /// caller's fallback comparison.
    pub fn column_eq(&self, other: &AnyColumn) -> Option<bool> {
        match (self, other) {
            (AnyColumn::Raster(a), AnyColumn::Raster(b)) => Some(a == b),
            (AnyColumn::Stac(a), AnyColumn::Stac(b)) => Some(a == b),
            (AnyColumn::Asset(a), AnyColumn::Asset(b)) => Some(a == b),
            _ => None,
        }
    }

    pub fn as_raster(&self) -> Option<&RasterColumn> {
        match self {
            AnyColumn::Raster(column) => Some(column),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&ItemColumn> {
        match self {
            AnyColumn::Stac(column) => Some(column),
            _ => None,
        }
    }

    pub fn as_assets(&self) -> Option<&AssetColumn> {
        match self {
            AnyColumn::Asset(column) => Some(column),
            _ => None,
        }
    }
}

impl From<RasterColumn> for AnyColumn {
    fn from(column: RasterColumn) -> Self {
        AnyColumn::Raster(column)
    }
}

impl From<ItemColumn> for AnyColumn {
    fn from(column: ItemColumn) -> Self {
        AnyColumn::Stac(column)
    }
}

impl From<AssetColumn> for AnyColumn {
    fn from(column: AssetColumn) -> Self {
        AnyColumn::Asset(column)
    }
}

impl Display for AnyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, c => Display::fmt(c, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;
    use crate::raster::LabeledArray;

    fn rasters(n: usize) -> AnyColumn {
        RasterColumn::new((0..n).map(|i| LabeledArray::filled(&["x"], &[2], i as f64).unwrap()))
            .into()
    }

    fn items(n: usize) -> AnyColumn {
        ItemColumn::new((0..n).map(|i| CatalogItem::new(format!("item-{}", i)))).into()
    }

    #[test]
    fn test_concat_same_type() {
        let joined = AnyColumn::concat(&[rasters(2), rasters(1)]).unwrap();
        assert_eq!(joined.column_type(), ColumnType::Raster);
        assert_eq!(joined.len(), 3);
    }

    #[test]
    fn test_concat_rejects_mixed_types() {
        let err = AnyColumn::concat(&[rasters(1), items(1)]).unwrap_err();
        assert!(matches!(err, FrameError::TypeMismatch { .. }));
        assert_eq!(err.kind(), "TypeError");
        assert!(AnyColumn::concat(&[]).is_err());
    }

    #[test]
    fn test_cross_type_equality_not_implemented() {
        assert_eq!(rasters(2).column_eq(&rasters(2)), Some(true));
        assert_eq!(rasters(2).column_eq(&rasters(1)), Some(false));
        assert_eq!(rasters(1).column_eq(&items(1)), None);
    }

    #[test]
    fn test_take_with_missing_fill() {
        let taken = items(3).take(&[2, -1], true).unwrap();
        assert_eq!(taken.is_missing().indices(), vec![1]);
        assert_eq!(taken.formatted(), vec!["<Item id=item-2>", "<NA>"]);
    }
}
