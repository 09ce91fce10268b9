//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// A spatial footprint in the coordinate system of its catalog record.
///
/// Catalog records carry their footprint as a flat array, either
/// `[min_x, min_y, max_x, max_y]` or the 3-D form
/// `[min_x, min_y, min_z, max_x, max_y, max_z]`; the vertical extent is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Smallest bounding box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The four corner values in catalog order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

impl TryFrom<Vec<f64>> for BoundingBox {
    type Error = FrameError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [min_x, min_y, max_x, max_y] => Ok(Self::new(*min_x, *min_y, *max_x, *max_y)),
            [min_x, min_y, _min_z, max_x, max_y, _max_z] => {
                Ok(Self::new(*min_x, *min_y, *max_x, *max_y))
            }
            other => Err(FrameError::InvalidRecord(format!(
                "bbox must have 4 or 6 values, got {}",
                other.len()
            ))),
        }
    }
}

impl From<BoundingBox> for Vec<f64> {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_and_union() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.union(&c), BoundingBox::new(0.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn test_deserialize_3d_bbox() {
        let bbox: BoundingBox =
            serde_json::from_str("[1.0, 2.0, -5.0, 3.0, 4.0, 100.0]").unwrap();
        assert_eq!(bbox, BoundingBox::new(1.0, 2.0, 3.0, 4.0));

        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");

        assert!(serde_json::from_str::<BoundingBox>("[1.0, 2.0]").is_err());
    }
}
