//! Row selections: ranges with a step, explicit positions, and boolean masks.

use std::ops::Range;

use frame_common::{FrameError, Result};

use crate::mask::BooleanMask;

/// A half-open range with an optional step, following the usual
/// `start:stop:step` slicing rules.
///
/// Negative bounds count from the end and out-of-range bounds are clamped,
/// so resolving a slice never fails except for a zero step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceSpec {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// The slice covering every row.
    pub fn full() -> Self {
        Self::default()
    }

    pub fn range(start: i64, stop: i64) -> Self {
        Self::new(Some(start), Some(stop), None)
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// Normalize against a column length into concrete `(start, stop, step)`.
    pub fn indices(&self, len: usize) -> Result<(i64, i64, i64)> {
        let len = len as i64;
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(FrameError::invalid_argument("slice step cannot be zero"));
        }

        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: i64| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = self
            .start
            .map_or(if step < 0 { upper } else { lower }, clamp);
        let stop = self.stop.map_or(if step < 0 { lower } else { upper }, clamp);
        Ok((start, stop, step))
    }

    /// Row positions selected by this slice, in selection order.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>> {
        let (start, stop, step) = self.indices(len)?;
        let mut positions = Vec::new();
        let mut idx = start;
        while (step > 0 && idx < stop) || (step < 0 && idx > stop) {
            positions.push(idx as usize);
            // A step past the end of the index space ends the walk.
            match idx.checked_add(step) {
                Some(next) => idx = next,
                None => break,
            }
        }
        Ok(positions)
    }
}

/// Which rows to keep from a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A (possibly strided) range of rows.
    Range(SliceSpec),
    /// Explicit positions; negative positions count from the end.
    Indices(Vec<i64>),
    /// Keep rows where the mask is true; must match the column length.
    Mask(BooleanMask),
}

impl Selection {
    /// Resolve into concrete row positions for a column of `len` rows.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>> {
        match self {
            Selection::Range(spec) => spec.positions(len),
            Selection::Indices(indices) => indices
                .iter()
                .map(|idx| normalize_index(*idx, len))
                .collect(),
            Selection::Mask(mask) => {
                if mask.len() != len {
                    return Err(FrameError::invalid_argument(format!(
                        "boolean mask of length {} does not match column length {}",
                        mask.len(),
                        len
                    )));
                }
                Ok(mask.indices())
            }
        }
    }
}

impl From<SliceSpec> for Selection {
    fn from(spec: SliceSpec) -> Self {
        Selection::Range(spec)
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Selection::Range(SliceSpec::range(range.start as i64, range.end as i64))
    }
}

impl From<Vec<i64>> for Selection {
    fn from(indices: Vec<i64>) -> Self {
        Selection::Indices(indices)
    }
}

impl From<BooleanMask> for Selection {
    fn from(mask: BooleanMask) -> Self {
        Selection::Mask(mask)
    }
}

/// Resolve a possibly negative position against a length.
pub fn normalize_index(index: i64, len: usize) -> Result<usize> {
    let resolved = if index < 0 { index + len as i64 } else { index };
    if resolved < 0 || resolved >= len as i64 {
        return Err(FrameError::out_of_bounds(index, len));
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_indices_match_range_semantics() {
        assert_eq!(SliceSpec::full().positions(4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(SliceSpec::range(1, 3).positions(4).unwrap(), vec![1, 2]);
        assert_eq!(SliceSpec::range(-3, 100).positions(4).unwrap(), vec![1, 2, 3]);
        assert_eq!(
            SliceSpec::full().with_step(-1).positions(4).unwrap(),
            vec![3, 2, 1, 0]
        );
        assert_eq!(
            SliceSpec::new(Some(5), None, Some(-2)).positions(4).unwrap(),
            vec![3, 1]
        );
        assert!(SliceSpec::range(3, 1).positions(4).unwrap().is_empty());
        assert!(SliceSpec::full().positions(0).unwrap().is_empty());
    }

    #[test]
    fn test_huge_step_selects_single_row() {
        assert_eq!(
            SliceSpec::new(Some(2), None, Some(i64::MAX)).positions(4).unwrap(),
            vec![2]
        );
        assert_eq!(
            SliceSpec::new(Some(1), None, Some(i64::MIN)).positions(4).unwrap(),
            vec![1]
        );
        assert_eq!(
            SliceSpec::new(None, None, Some(i64::MIN)).positions(4).unwrap(),
            vec![3]
        );
    }

    #[test]
    fn test_zero_step_rejected() {
        let err = SliceSpec::full().with_step(0).positions(3).unwrap_err();
        assert!(matches!(err, FrameError::InvalidArgument(_)));
    }

    #[test]
    fn test_indices_selection() {
        let selection = Selection::from(vec![2, -1, 0]);
        assert_eq!(selection.positions(3).unwrap(), vec![2, 2, 0]);

        let err = Selection::from(vec![3]).positions(3).unwrap_err();
        assert!(matches!(err, FrameError::IndexOutOfBounds { index: 3, len: 3 }));
        assert!(Selection::from(vec![-4]).positions(3).is_err());
    }

    #[test]
    fn test_mask_length_checked() {
        let mask = BooleanMask::from(vec![true, false]);
        let err = Selection::from(mask).positions(3).unwrap_err();
        assert!(matches!(err, FrameError::InvalidArgument(_)));
    }
}
