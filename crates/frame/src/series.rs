//! Named, row-labeled columns.

use extension_array::{AnyColumn, AssetColumn, ItemColumn, RasterColumn, Selection, TypedColumn};
use frame_common::{FrameError, Result};

use crate::index::{Index, Label};

/// Values a [`Series`] can hold.
pub trait SeriesValues: Sized {
    fn len(&self) -> usize;

    /// Gather rows by position; `-1` yields a missing row.
    fn take_or_missing(&self, indices: &[i64]) -> Result<Self>;
}

macro_rules! impl_series_values {
    ($($column:ty),+) => {
        $(
            impl SeriesValues for $column {
                fn len(&self) -> usize {
                    TypedColumn::len(self)
                }

                fn take_or_missing(&self, indices: &[i64]) -> Result<Self> {
                    self.take(indices, true, None)
                }
            }
        )+
    };
}

impl_series_values!(RasterColumn, ItemColumn, AssetColumn);

impl SeriesValues for AnyColumn {
    fn len(&self) -> usize {
        AnyColumn::len(self)
    }

    fn take_or_missing(&self, indices: &[i64]) -> Result<Self> {
        self.take(indices, true)
    }
}

/// Plain projections, e.g. the parsed acquisition times of a catalog series.
impl<T: Clone> SeriesValues for Vec<Option<T>> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn take_or_missing(&self, indices: &[i64]) -> Result<Self> {
        indices
            .iter()
            .map(|&idx| match idx {
                -1 => Ok(None),
                idx if idx >= 0 && (idx as usize) < self.len() => Ok(self[idx as usize].clone()),
                idx => Err(FrameError::out_of_bounds(idx, self.len())),
            })
            .collect()
    }
}

/// A named column paired with its row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<C> {
    name: String,
    index: Index,
    values: C,
}

impl<C: SeriesValues> Series<C> {
    /// A series with the default `0..len` index.
    pub fn new(name: impl Into<String>, values: C) -> Self {
        Self {
            name: name.into(),
            index: Index::range(values.len()),
            values,
        }
    }

    pub fn with_index(name: impl Into<String>, index: Index, values: C) -> Result<Self> {
        if index.len() != values.len() {
            return Err(FrameError::LengthMismatch {
                expected: index.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            index,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn values(&self) -> &C {
        &self.values
    }

    pub fn into_values(self) -> C {
        self.values
    }

    pub fn into_parts(self) -> (String, Index, C) {
        (self.name, self.index, self.values)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Position of the row labeled `label`.
    pub fn position(&self, label: &Label) -> Option<usize> {
        self.index.position(label)
    }

    /// Rows chosen positionally; labels follow their rows.
    pub fn select(&self, selection: &Selection) -> Result<Self> {
        let positions = selection.positions(self.len())?;
        let indices: Vec<i64> = positions.iter().map(|&pos| pos as i64).collect();
        Ok(Self {
            name: self.name.clone(),
            index: self.index.take(&positions)?,
            values: self.values.take_or_missing(&indices)?,
        })
    }

    /// Outer-join two series by row label; rows one side lacks become missing.
    pub fn align<D: SeriesValues>(&self, other: &Series<D>) -> Result<(Series<C>, Series<D>)> {
        let alignment = self.index.align(&other.index)?;
        let left = Series {
            name: self.name.clone(),
            index: alignment.index.clone(),
            values: self.values.take_or_missing(&alignment.left)?,
        };
        let right = Series {
            name: other.name.clone(),
            index: alignment.index,
            values: other.values.take_or_missing(&alignment.right)?,
        };
        Ok((left, right))
    }
}

impl<C: TypedColumn + SeriesValues> Series<C> {
    pub fn is_missing(&self) -> extension_array::BooleanMask {
        self.values.is_missing()
    }
}

impl<C: Into<AnyColumn>> Series<C> {
    /// Erase the column type.
    pub fn into_any(self) -> Series<AnyColumn> {
        Series {
            name: self.name,
            index: self.index,
            values: self.values.into(),
        }
    }
}
