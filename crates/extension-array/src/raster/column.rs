//! A column of labeled arrays.

use std::fmt::{self, Display};
use std::sync::Arc;

use frame_common::{FrameError, Result};

use crate::column::{fmt_column, ColumnType, TypedColumn};
use crate::element::Element;

use super::array::LabeledArray;
use super::ops;

/// Column whose cells are labeled N-D arrays, registered as `"raster"`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterColumn {
    elements: Vec<Element<Arc<LabeledArray>>>,
}

impl RasterColumn {
    /// A column with every cell present.
    pub fn new(arrays: impl IntoIterator<Item = LabeledArray>) -> Self {
        Self {
            elements: arrays
                .into_iter()
                .map(|array| Element::Present(Arc::new(array)))
                .collect(),
        }
    }

    /// A column where `None` marks a missing cell.
    pub fn from_options(arrays: impl IntoIterator<Item = Option<LabeledArray>>) -> Self {
        Self {
            elements: arrays
                .into_iter()
                .map(|array| Element::from(array.map(Arc::new)))
                .collect(),
        }
    }

    /// The array at `index`, or `None` when the cell is missing.
    pub fn array(&self, index: usize) -> Result<Option<&LabeledArray>> {
        Ok(self.element_at(index)?.present().map(|array| &**array))
    }

    /// Map `f` over every present cell.
    ///
    /// The first error aborts the whole operation; no partial column is
    /// returned. Missing cells stay missing.
    pub fn apply<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(&LabeledArray) -> Result<LabeledArray>,
    {
        let elements = self
            .elements
            .iter()
            .map(|element| element.as_ref().try_map(|array| f(&**array).map(Arc::new)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { elements })
    }

    /// Combine two equally long columns row by row; a missing cell on either
    /// side yields a missing cell.
    pub fn zip_apply<F>(&self, other: &RasterColumn, f: F) -> Result<Self>
    where
        F: Fn(&LabeledArray, &LabeledArray) -> Result<LabeledArray>,
    {
        if self.len() != other.len() {
            return Err(FrameError::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }

        let elements = self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(left, right)| match (left, right) {
                (Element::Present(l), Element::Present(r)) => {
                    f(&**l, &**r).map(|array| Element::Present(Arc::new(array)))
                }
                _ => Ok(Element::Missing),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { elements })
    }

    /// Row-wise NDVI of positionally paired near-infrared and red columns.
    pub fn ndvi(nir: &RasterColumn, red: &RasterColumn) -> Result<Self> {
        nir.zip_apply(red, ops::ndvi)
    }
}

impl TypedColumn for RasterColumn {
    type Payload = LabeledArray;

    const COLUMN_TYPE: ColumnType = ColumnType::Raster;

    fn elements(&self) -> &[Element<Arc<LabeledArray>>] {
        &self.elements
    }

    fn from_elements(elements: Vec<Element<Arc<LabeledArray>>>) -> Self {
        Self { elements }
    }

    fn payload_nbytes(payload: &LabeledArray) -> usize {
        payload.nbytes()
    }

    fn format_payload(payload: &LabeledArray) -> String {
        payload.to_string()
    }
}

impl Display for RasterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_column(self, f)
    }
}

impl FromIterator<LabeledArray> for RasterColumn {
    fn from_iter<I: IntoIterator<Item = LabeledArray>>(iter: I) -> Self {
        Self::new(iter)
    }
}
