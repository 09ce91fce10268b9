//! A row-labeled table of named extension columns.

use std::fmt::{self, Display};

use extension_array::{AnyColumn, AssetColumn, BooleanMask, ItemColumn, RasterColumn, Selection};
use frame_common::{FrameError, Result};

use crate::index::Index;
use crate::series::{Series, SeriesValues};

/// Named columns sharing one row index. Column order is insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: Index,
    columns: Vec<(String, AnyColumn)>,
}

impl Frame {
    /// An empty frame over `index`.
    pub fn new(index: Index) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// A single-column frame taking the series' index.
    pub fn from_series<C: Into<AnyColumn>>(series: Series<C>) -> Self
    where
        C: SeriesValues,
    {
        let (name, index, values) = series.into_parts();
        Self {
            index,
            columns: vec![(name, values.into())],
        }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|(existing, _)| existing == name)
    }

    pub fn column(&self, name: &str) -> Result<&AnyColumn> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, column)| column)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// Add a column positioned on this frame's index.
    pub fn insert(&mut self, name: impl Into<String>, column: impl Into<AnyColumn>) -> Result<()> {
        let name = name.into();
        let column = column.into();
        if self.contains(&name) {
            return Err(FrameError::DuplicateColumn(name));
        }
        if column.len() != self.len() {
            return Err(FrameError::LengthMismatch {
                expected: self.len(),
                actual: column.len(),
            });
        }
        self.columns.push((name, column));
        Ok(())
    }

    /// A column as a series sharing this frame's index.
    pub fn series(&self, name: &str) -> Result<Series<AnyColumn>> {
        Series::with_index(name, self.index.clone(), self.column(name)?.clone())
    }

    pub fn raster_series(&self, name: &str) -> Result<Series<RasterColumn>> {
        let column = self.column(name)?;
        let rasters = column
            .as_raster()
            .ok_or_else(|| FrameError::type_mismatch("raster", column.column_type().name()))?;
        Series::with_index(name, self.index.clone(), rasters.clone())
    }

    pub fn item_series(&self, name: &str) -> Result<Series<ItemColumn>> {
        let column = self.column(name)?;
        let items = column
            .as_items()
            .ok_or_else(|| FrameError::type_mismatch("stac", column.column_type().name()))?;
        Series::with_index(name, self.index.clone(), items.clone())
    }

    pub fn asset_series(&self, name: &str) -> Result<Series<AssetColumn>> {
        let column = self.column(name)?;
        let assets = column
            .as_assets()
            .ok_or_else(|| FrameError::type_mismatch("asset", column.column_type().name()))?;
        Series::with_index(name, self.index.clone(), assets.clone())
    }

    /// Outer-join by row label. Rows missing on one side hold missing cells
    /// in that side's columns; column names must not collide.
    pub fn join(&self, other: &Frame) -> Result<Frame> {
        if let Some((name, _)) = other.columns.iter().find(|(name, _)| self.contains(name)) {
            return Err(FrameError::DuplicateColumn(name.clone()));
        }

        let alignment = self.index.align(&other.index)?;
        let mut columns = Vec::with_capacity(self.columns.len() + other.columns.len());
        for (name, column) in &self.columns {
            columns.push((name.clone(), column.take(&alignment.left, true)?));
        }
        for (name, column) in &other.columns {
            columns.push((name.clone(), column.take(&alignment.right, true)?));
        }

        tracing::debug!(
            rows = alignment.index.len(),
            columns = columns.len(),
            "Joined frames"
        );
        Ok(Frame {
            index: alignment.index,
            columns,
        })
    }

    /// Join a single series by row label.
    pub fn with_series<C>(&self, series: Series<C>) -> Result<Frame>
    where
        C: Into<AnyColumn> + SeriesValues,
    {
        self.join(&Frame::from_series(series))
    }

    /// Rows chosen positionally across every column.
    pub fn select_rows(&self, selection: &Selection) -> Result<Frame> {
        let positions = selection.positions(self.len())?;
        let indices: Vec<i64> = positions.iter().map(|&pos| pos as i64).collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| Ok((name.clone(), column.take(&indices, false)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Frame {
            index: self.index.take(&positions)?,
            columns,
        })
    }

    /// Rows where `mask` is true.
    pub fn filter(&self, mask: &BooleanMask) -> Result<Frame> {
        self.select_rows(&Selection::Mask(mask.clone()))
    }

    /// Sum of column footprints.
    pub fn byte_size(&self) -> usize {
        self.columns.iter().map(|(_, column)| column.byte_size()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnyColumn)> {
        self.columns
            .iter()
            .map(|(name, column)| (name.as_str(), column))
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|(_, column)| column.formatted())
            .collect();

        write!(f, "index")?;
        for (name, _) in &self.columns {
            write!(f, "\t{}", name)?;
        }
        writeln!(f)?;
        for (row, label) in self.index.labels().iter().enumerate() {
            write!(f, "{}", label)?;
            for cells in &formatted {
                write!(f, "\t{}", cells[row])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extension_array::{CatalogItem, LabeledArray};

    fn items(ids: &[&str]) -> ItemColumn {
        ids.iter().map(|id| CatalogItem::new(*id)).collect()
    }

    fn rasters(n: usize) -> RasterColumn {
        (0..n)
            .map(|i| LabeledArray::filled(&["x"], &[1], i as f64).unwrap())
            .collect()
    }

    #[test]
    fn test_insert_checks_name_and_length() {
        let mut frame = Frame::from_series(Series::new("items", items(&["a", "b"])));
        frame.insert("red", rasters(2)).unwrap();
        assert_eq!(frame.column_names(), vec!["items", "red"]);

        let err = frame.insert("red", rasters(2)).unwrap_err();
        assert!(matches!(err, FrameError::DuplicateColumn(_)));
        let err = frame.insert("nir", rasters(3)).unwrap_err();
        assert!(matches!(err, FrameError::LengthMismatch { .. }));
    }

    #[test]
    fn test_typed_series_lookup() {
        let frame = Frame::from_series(Series::new("items", items(&["a"])));
        assert_eq!(frame.item_series("items").unwrap().len(), 1);
        assert_eq!(frame.raster_series("items").unwrap_err().kind(), "TypeError");
        assert_eq!(frame.column("nope").unwrap_err().kind(), "KeyError");
    }

    #[test]
    fn test_join_by_label() {
        let left = Frame::from_series(
            Series::with_index("items", Index::new(["a", "b"]), items(&["a", "b"])).unwrap(),
        );
        let right = Series::with_index("red", Index::new(["b", "c"]), rasters(2)).unwrap();

        let joined = left.with_series(right).unwrap();
        assert_eq!(joined.index(), &Index::new(["a", "b", "c"]));
        assert_eq!(joined.column("items").unwrap().is_missing().indices(), vec![2]);
        assert_eq!(joined.column("red").unwrap().is_missing().indices(), vec![0]);

        let again = Frame::from_series(Series::new("red", rasters(3)));
        assert!(joined.join(&again).is_err());
    }

    #[test]
    fn test_filter_rows() {
        let mut frame = Frame::from_series(Series::new("items", items(&["a", "b", "c"])));
        frame.insert("red", rasters(3)).unwrap();

        let kept = frame
            .filter(&BooleanMask::from(vec![true, false, true]))
            .unwrap();
        assert_eq!(kept.index(), &Index::new([0i64, 2]));
        assert_eq!(
            kept.item_series("items").unwrap().values().ids(),
            vec![Some("a".to_string()), Some("c".to_string())]
        );
        let expected: usize = kept.iter().map(|(_, column)| column.byte_size()).sum();
        assert_eq!(kept.byte_size(), expected);
        assert!(kept.byte_size() < frame.byte_size());
    }

    #[test]
    fn test_display() {
        let frame = Frame::from_series(Series::new("items", items(&["a"])));
        assert_eq!(frame.to_string(), "index\titems\n0\t<Item id=a>\n");
    }
}
