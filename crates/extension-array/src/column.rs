//! The contract shared by every extension column.
//!
//! A typed column is an ordered, fixed-length sequence of [`Element`]s whose
//! payloads are held behind `Arc`. Everything a host table needs from a
//! column (positional access, selection, take-with-fill, missing mask, byte
//! accounting, copy and concatenation) is provided here on top of three
//! per-type hooks: the element storage, a byte estimate and a display form.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use frame_common::{FrameError, Result};

use crate::element::Element;
use crate::mask::BooleanMask;
use crate::selection::{normalize_index, Selection};

/// Placeholder rendered for missing cells.
pub const MISSING_DISPLAY: &str = "<NA>";

/// Identifies what kind of element a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Labeled N-D arrays.
    Raster,
    /// Catalog items.
    Stac,
    /// Asset descriptors.
    Asset,
}

impl ColumnType {
    /// The name the column type is registered under with a host table.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Raster => "raster",
            ColumnType::Stac => "stac",
            ColumnType::Asset => "asset",
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "raster" => Ok(ColumnType::Raster),
            "stac" => Ok(ColumnType::Stac),
            "asset" => Ok(ColumnType::Asset),
            other => Err(FrameError::invalid_argument(format!(
                "unknown column type: {}",
                other
            ))),
        }
    }
}

/// A fixed-type column of heavyweight elements.
///
/// Implementors supply element storage and two per-payload hooks; every
/// other operation is derived. Selections and concatenation always build a
/// new element sequence, so no two columns share a sequence after any
/// operation returns.
pub trait TypedColumn: Clone + PartialEq + Debug + Sized {
    /// The payload held by present elements.
    type Payload: Clone + PartialEq + Debug;

    /// Type tag of this column.
    const COLUMN_TYPE: ColumnType;

    /// The element sequence.
    fn elements(&self) -> &[Element<Arc<Self::Payload>>];

    /// Wrap an element sequence without copying payloads.
    fn from_elements(elements: Vec<Element<Arc<Self::Payload>>>) -> Self;

    /// Estimated memory footprint of one payload, in bytes.
    fn payload_nbytes(payload: &Self::Payload) -> usize;

    /// Opaque display form of one payload.
    fn format_payload(payload: &Self::Payload) -> String;

    fn column_type(&self) -> ColumnType {
        Self::COLUMN_TYPE
    }

    fn len(&self) -> usize {
        self.elements().len()
    }

    fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    fn iter(&self) -> std::slice::Iter<'_, Element<Arc<Self::Payload>>> {
        self.elements().iter()
    }

    /// The element at `index`.
    fn element_at(&self, index: usize) -> Result<&Element<Arc<Self::Payload>>> {
        self.elements()
            .get(index)
            .ok_or_else(|| FrameError::out_of_bounds(index, self.len()))
    }

    /// Build a column from raw elements, deep-copying payloads when `copy` is set.
    fn from_sequence<I>(scalars: I, copy: bool) -> Self
    where
        I: IntoIterator<Item = Element<Arc<Self::Payload>>>,
    {
        let elements = scalars
            .into_iter()
            .map(|element| {
                if copy {
                    element.map(|payload| Arc::new((*payload).clone()))
                } else {
                    element
                }
            })
            .collect();
        Self::from_elements(elements)
    }

    /// Factorization is not available for extension columns.
    fn from_factorized(_codes: &[i64], _original: &Self) -> Result<Self> {
        Err(FrameError::not_supported(format!(
            "'{}' columns cannot be rebuilt from factorized values",
            Self::COLUMN_TYPE
        )))
    }

    /// A new column holding the selected rows.
    fn select(&self, selection: &Selection) -> Result<Self> {
        let elements = self.elements();
        let positions = selection.positions(elements.len())?;
        Ok(Self::from_elements(
            positions.into_iter().map(|pos| elements[pos].clone()).collect(),
        ))
    }

    /// Gather rows by position.
    ///
    /// With `allow_fill`, the position `-1` inserts `fill_value` (missing
    /// when `None`) and any other negative position is rejected. Without it,
    /// negative positions count from the end.
    fn take(
        &self,
        indices: &[i64],
        allow_fill: bool,
        fill_value: Option<Element<Arc<Self::Payload>>>,
    ) -> Result<Self> {
        let elements = self.elements();
        let len = elements.len();

        if let Some(&max) = indices.iter().max() {
            if max >= len as i64 {
                return Err(FrameError::out_of_bounds(max, len));
            }
        }
        if allow_fill {
            if let Some(&min) = indices.iter().min() {
                if min < -1 {
                    return Err(FrameError::invalid_argument(format!(
                        "invalid fill position {}; only -1 may be used as a fill marker",
                        min
                    )));
                }
            }
        }

        let fill = fill_value.unwrap_or_default();
        let taken = indices
            .iter()
            .map(|&idx| {
                if allow_fill && idx == -1 {
                    Ok(fill.clone())
                } else {
                    normalize_index(idx, len).map(|pos| elements[pos].clone())
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_elements(taken))
    }

    /// True where the element is missing.
    fn is_missing(&self) -> BooleanMask {
        self.elements().iter().map(Element::is_missing).collect()
    }

    /// Sum of element footprints; missing elements count as zero.
    fn byte_size(&self) -> usize {
        self.elements()
            .iter()
            .filter_map(Element::present)
            .map(|payload| Self::payload_nbytes(&**payload))
            .sum()
    }

    /// An independent element sequence sharing the immutable payloads.
    fn copy(&self) -> Self {
        Self::from_elements(self.elements().to_vec())
    }

    /// Concatenate columns in argument order.
    fn concat(columns: &[Self]) -> Self {
        let total = columns.iter().map(TypedColumn::len).sum();
        let mut elements = Vec::with_capacity(total);
        for column in columns {
            elements.extend(column.elements().iter().cloned());
        }
        Self::from_elements(elements)
    }

    /// Display strings, one per element.
    fn formatted(&self) -> Vec<String> {
        self.elements()
            .iter()
            .map(|element| match element {
                Element::Present(payload) => Self::format_payload(payload),
                Element::Missing => MISSING_DISPLAY.to_string(),
            })
            .collect()
    }
}

/// Write a column as `name[elem, elem, ...]`.
pub(crate) fn fmt_column<C: TypedColumn>(column: &C, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}[{}]", C::COLUMN_TYPE, column.formatted().join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_names() {
        assert_eq!(ColumnType::Raster.name(), "raster");
        assert_eq!(ColumnType::Stac.to_string(), "stac");
        assert_eq!("ASSET".parse::<ColumnType>().unwrap(), ColumnType::Asset);
        assert!("geometry".parse::<ColumnType>().is_err());
    }
}
