//! Band math over labeled arrays.

use frame_common::Result;

use super::array::LabeledArray;

/// `(a - b) / (a + b)` for every value; a zero denominator yields NaN.
pub fn normalized_difference(a: &LabeledArray, b: &LabeledArray) -> Result<LabeledArray> {
    a.zip_with(b, |a, b| {
        let denominator = a + b;
        if denominator == 0.0 {
            f64::NAN
        } else {
            (a - b) / denominator
        }
    })
}

/// Normalized difference vegetation index from near-infrared and red bands.
pub fn ndvi(nir: &LabeledArray, red: &LabeledArray) -> Result<LabeledArray> {
    Ok(normalized_difference(nir, red)?.with_name("ndvi"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndvi_constant_bands() {
        let nir = LabeledArray::filled(&["y", "x"], &[3, 3], 0.8).unwrap();
        let red = LabeledArray::filled(&["y", "x"], &[3, 3], 0.2).unwrap();
        let result = ndvi(&nir, &red).unwrap();

        assert_eq!(result.name(), Some("ndvi"));
        assert_eq!(result.shape(), &[3, 3]);
        assert!(result.data().iter().all(|v| (v - 0.6).abs() < 1e-12));
    }

    #[test]
    fn test_zero_denominator_is_nan() {
        let a = LabeledArray::filled(&["x"], &[2], 0.0).unwrap();
        let result = normalized_difference(&a, &a).unwrap();
        assert!(result.data().iter().all(|v| v.is_nan()));
    }
}
