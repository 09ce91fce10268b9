//! Boolean masks used for missing-value reporting and boolean selection.

use std::fmt::{Debug, Formatter};

/// A fixed-length sequence of booleans with a cached true count.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct BooleanMask {
    values: Vec<bool>,
    true_count: usize,
}

impl BooleanMask {
    /// Create a mask with every position set to `value`.
    pub fn new_filled(len: usize, value: bool) -> Self {
        Self {
            values: vec![value; len],
            true_count: if value { len } else { 0 },
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of positions set to true.
    pub fn true_count(&self) -> usize {
        self.true_count
    }

    /// Returns the boolean value at a given index.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn value(&self, index: usize) -> bool {
        self.values[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.values.iter().copied()
    }

    /// Positions that are set, in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(idx, set)| set.then_some(idx))
            .collect()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.values
    }
}

impl From<Vec<bool>> for BooleanMask {
    fn from(values: Vec<bool>) -> Self {
        let true_count = values.iter().filter(|v| **v).count();
        Self { values, true_count }
    }
}

impl FromIterator<bool> for BooleanMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Debug for BooleanMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}
