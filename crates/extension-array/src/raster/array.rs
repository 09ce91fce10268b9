//! Labeled N-D arrays: the payload of a raster column.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use frame_common::{BoundingBox, FrameError, Result};

/// A dense N-D array of `f64` with named dimensions and optional
/// per-dimension coordinate labels.
///
/// Values are stored in row-major order: the last dimension varies fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    name: Option<String>,
    dims: Vec<String>,
    shape: Vec<usize>,
    coords: BTreeMap<String, Vec<f64>>,
    data: Vec<f64>,
    attrs: BTreeMap<String, String>,
}

impl LabeledArray {
    /// Create an array from named dimensions, a shape and row-major values.
    pub fn new(dims: Vec<String>, shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        if dims.len() != shape.len() {
            return Err(FrameError::invalid_argument(format!(
                "{} dimension names given for a {}-d shape",
                dims.len(),
                shape.len()
            )));
        }
        for (idx, dim) in dims.iter().enumerate() {
            if dims[..idx].contains(dim) {
                return Err(FrameError::invalid_argument(format!(
                    "duplicate dimension name: {}",
                    dim
                )));
            }
        }
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            name: None,
            dims,
            shape,
            coords: BTreeMap::new(),
            data,
            attrs: BTreeMap::new(),
        })
    }

    /// An array of the given shape with every value set to `value`.
    pub fn filled(dims: &[&str], shape: &[usize], value: f64) -> Result<Self> {
        let len = shape.iter().product();
        Self::new(
            dims.iter().map(|d| d.to_string()).collect(),
            shape.to_vec(),
            vec![value; len],
        )
    }

    /// A 2-D `(y, x)` grid covering `bbox`, with coordinates at cell centers.
    ///
    /// Rows run top-to-bottom (north to south), matching the usual raster
    /// scan order.
    pub fn from_grid(data: Vec<f64>, width: usize, height: usize, bbox: &BoundingBox) -> Result<Self> {
        let res_x = bbox.width() / width.max(1) as f64;
        let res_y = bbox.height() / height.max(1) as f64;
        let xs = (0..width)
            .map(|col| bbox.min_x + (col as f64 + 0.5) * res_x)
            .collect();
        let ys = (0..height)
            .map(|row| bbox.max_y - (row as f64 + 0.5) * res_y)
            .collect();

        Self::new(vec!["y".to_string(), "x".to_string()], vec![height, width], data)?
            .with_coord("y", ys)?
            .with_coord("x", xs)
    }

    /// Attach coordinate labels to a dimension.
    pub fn with_coord(mut self, dim: &str, values: Vec<f64>) -> Result<Self> {
        let axis = self.axis(dim)?;
        if values.len() != self.shape[axis] {
            return Err(FrameError::LengthMismatch {
                expected: self.shape[axis],
                actual: values.len(),
            });
        }
        self.coords.insert(dim.to_string(), values);
        Ok(self)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    pub fn coord(&self, dim: &str) -> Option<&[f64]> {
        self.coords.get(dim).map(Vec::as_slice)
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes held by the values (coordinates and attributes excluded).
    pub fn nbytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f64>()
    }

    /// The value at a multi-dimensional position.
    pub fn get(&self, position: &[usize]) -> Option<f64> {
        if position.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (idx, size) in position.iter().zip(&self.shape) {
            if idx >= size {
                return None;
            }
            flat = flat * size + idx;
        }
        self.data.get(flat).copied()
    }

    /// Apply `f` to every value, keeping labels.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            data: self.data.iter().map(|v| f(*v)).collect(),
            ..self.clone()
        }
    }

    /// Combine two arrays value by value.
    ///
    /// Both arrays must have the same dimensions and shape, and any
    /// coordinate labels present on both must agree.
    pub fn zip_with<F>(&self, other: &LabeledArray, f: F) -> Result<Self>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.dims != other.dims || self.shape != other.shape {
            return Err(FrameError::invalid_argument(format!(
                "cannot combine arrays with dims {} and {}",
                self.describe_dims(),
                other.describe_dims()
            )));
        }
        for (dim, values) in &self.coords {
            if let Some(other_values) = other.coords.get(dim) {
                if values != other_values {
                    return Err(FrameError::invalid_argument(format!(
                        "coordinates of dimension '{}' are not aligned",
                        dim
                    )));
                }
            }
        }

        let mut coords = other.coords.clone();
        coords.extend(self.coords.clone());
        Ok(Self {
            name: None,
            dims: self.dims.clone(),
            shape: self.shape.clone(),
            coords,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| f(*a, *b))
                .collect(),
            attrs: BTreeMap::new(),
        })
    }

    /// Drop every dimension of size one, along with its coordinates.
    pub fn squeeze(mut self) -> Self {
        let (dims, shape): (Vec<_>, Vec<_>) = self
            .dims
            .into_iter()
            .zip(self.shape)
            .filter(|(_, size)| *size != 1)
            .unzip();
        self.coords.retain(|dim, _| dims.contains(dim));
        self.dims = dims;
        self.shape = shape;
        self
    }

    fn axis(&self, dim: &str) -> Result<usize> {
        self.dims
            .iter()
            .position(|d| d == dim)
            .ok_or_else(|| FrameError::invalid_argument(format!("unknown dimension: {}", dim)))
    }

    fn describe_dims(&self) -> String {
        self.dims
            .iter()
            .zip(&self.shape)
            .map(|(dim, size)| format!("{}: {}", dim, size))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for LabeledArray {
    /// Placeholder form listing dimension sizes; values are never printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Raster>({})", self.describe_dims())
    }
}
