//! Band math over raster series.

use extension_array::{LabeledArray, RasterColumn};
use frame_common::Result;

use crate::frame::Frame;
use crate::series::Series;

/// Raster operations on the columns of a frame.
#[derive(Debug, Clone, Copy)]
pub struct RasterAccessor<'a> {
    frame: &'a Frame,
}

impl<'a> RasterAccessor<'a> {
    pub fn new(frame: &'a Frame) -> Self {
        Self { frame }
    }

    /// NDVI of the raster columns named `nir` and `red`, as a series named
    /// `"ndvi"`.
    pub fn ndvi(&self, nir: &str, red: &str) -> Result<Series<RasterColumn>> {
        let nir = self.frame.raster_series(nir)?;
        let red = self.frame.raster_series(red)?;
        ndvi_series(&nir, &red)
    }
}

/// NDVI of two raster series aligned by row label.
///
/// Rows present in only one series produce missing cells.
pub fn ndvi_series(
    nir: &Series<RasterColumn>,
    red: &Series<RasterColumn>,
) -> Result<Series<RasterColumn>> {
    let (nir, red) = nir.align(red)?;
    let values = RasterColumn::ndvi(nir.values(), red.values())?;
    tracing::debug!(rows = nir.len(), "Computed NDVI");
    Series::with_index("ndvi", nir.index().clone(), values)
}

impl Frame {
    pub fn raster(&self) -> RasterAccessor<'_> {
        RasterAccessor::new(self)
    }
}

impl Series<RasterColumn> {
    /// Transform every raster, keeping the index. The result is named `name`.
    pub fn apply<F>(&self, name: impl Into<String>, f: F) -> Result<Series<RasterColumn>>
    where
        F: Fn(&LabeledArray) -> Result<LabeledArray>,
    {
        Series::with_index(name, self.index().clone(), self.values().apply(f)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Index;
    use extension_array::TypedColumn;

    fn filled(value: f64) -> LabeledArray {
        LabeledArray::filled(&["y", "x"], &[3, 3], value).unwrap()
    }

    #[test]
    fn test_ndvi_of_constant_bands() {
        let mut frame = Frame::from_series(Series::new("nir", RasterColumn::new([filled(0.8)])));
        frame.insert("red", RasterColumn::new([filled(0.2)])).unwrap();

        let ndvi = frame.raster().ndvi("nir", "red").unwrap();
        assert_eq!(ndvi.name(), "ndvi");
        let array = ndvi.values().array(0).unwrap().unwrap();
        assert_eq!(array.shape(), &[3, 3]);
        assert!(array.data().iter().all(|v| (v - 0.6).abs() < 1e-12));
    }

    #[test]
    fn test_ndvi_misaligned_rows_are_missing() {
        let nir = Series::with_index(
            "nir",
            Index::new(["a", "b"]),
            RasterColumn::new([filled(0.8), filled(0.8)]),
        )
        .unwrap();
        let red = Series::with_index("red", Index::new(["b"]), RasterColumn::new([filled(0.2)]))
            .unwrap();

        let ndvi = ndvi_series(&nir, &red).unwrap();
        assert_eq!(ndvi.index(), &Index::new(["a", "b"]));
        assert_eq!(ndvi.values().is_missing().indices(), vec![0]);
    }

    #[test]
    fn test_apply_names_result_and_keeps_index() {
        let series = Series::with_index(
            "red",
            Index::new(["x", "y"]),
            RasterColumn::from_options([Some(filled(2.0)), None]),
        )
        .unwrap();
        let doubled = series.apply("double", |a| Ok(a.map(|v| v * 2.0))).unwrap();
        assert_eq!(doubled.name(), "double");
        assert_eq!(doubled.index(), series.index());
        assert_eq!(doubled.values().array(0).unwrap().unwrap().data()[0], 4.0);
        assert!(doubled.values().array(1).unwrap().is_none());
    }

    #[test]
    fn test_ndvi_requires_raster_columns() {
        let frame = Frame::from_series(Series::new("nir", RasterColumn::new([filled(0.8)])));
        assert_eq!(frame.raster().ndvi("nir", "red").unwrap_err().kind(), "KeyError");
    }
}
