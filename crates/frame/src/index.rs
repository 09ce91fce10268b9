//! Row labels and label alignment.

use std::collections::HashMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use frame_common::{FrameError, Result};

/// A single row label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Str(String),
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Str(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Str(value)
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(value) => write!(f, "{}", value),
            Label::Str(value) => f.write_str(value),
        }
    }
}

/// Ordered row labels of a series or frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Index {
    labels: Vec<Label>,
}

/// Result of aligning two indexes: the joined labels and, for each side, the
/// source position of every joined row (`-1` where that side has no row).
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub index: Index,
    pub left: Vec<i64>,
    pub right: Vec<i64>,
}

impl Index {
    pub fn new(labels: impl IntoIterator<Item = impl Into<Label>>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The default `0..len` integer index.
    pub fn range(len: usize) -> Self {
        Self {
            labels: (0..len as i64).map(Label::Int).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn get(&self, position: usize) -> Option<&Label> {
        self.labels.get(position)
    }

    /// Position of the first row carrying `label`.
    pub fn position(&self, label: &Label) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn is_unique(&self) -> bool {
        let mut seen = HashMap::with_capacity(self.labels.len());
        self.labels.iter().all(|label| seen.insert(label, ()).is_none())
    }

    /// Labels at the given positions.
    pub fn take(&self, positions: &[usize]) -> Result<Self> {
        let labels = positions
            .iter()
            .map(|&pos| {
                self.labels
                    .get(pos)
                    .cloned()
                    .ok_or_else(|| FrameError::out_of_bounds(pos, self.len()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { labels })
    }

    /// Outer-join this index with `other`.
    ///
    /// Rows keep this index's order, followed by labels only `other` has, in
    /// `other`'s order. Identical indexes align trivially; otherwise both
    /// sides must be unique.
    pub fn align(&self, other: &Index) -> Result<Alignment> {
        if self == other {
            let identity: Vec<i64> = (0..self.len() as i64).collect();
            return Ok(Alignment {
                index: self.clone(),
                left: identity.clone(),
                right: identity,
            });
        }
        if !self.is_unique() || !other.is_unique() {
            return Err(FrameError::invalid_argument(
                "cannot align on an index with duplicate labels",
            ));
        }

        let other_positions: HashMap<&Label, usize> = other
            .labels
            .iter()
            .enumerate()
            .map(|(pos, label)| (label, pos))
            .collect();
        let own_labels: HashMap<&Label, usize> = self
            .labels
            .iter()
            .enumerate()
            .map(|(pos, label)| (label, pos))
            .collect();

        let mut labels = self.labels.clone();
        let mut left: Vec<i64> = (0..self.len() as i64).collect();
        let mut right: Vec<i64> = self
            .labels
            .iter()
            .map(|label| other_positions.get(label).map_or(-1, |&pos| pos as i64))
            .collect();

        for (pos, label) in other.labels.iter().enumerate() {
            if !own_labels.contains_key(label) {
                labels.push(label.clone());
                left.push(-1);
                right.push(pos as i64);
            }
        }

        Ok(Alignment {
            index: Self { labels },
            left,
            right,
        })
    }
}

impl<L: Into<Label>> FromIterator<L> for Index {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self::new(iter)
    }
}
