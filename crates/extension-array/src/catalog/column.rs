//! A column of catalog items.

use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use frame_common::{BoundingBox, FrameError, Result, TimeRange};

use crate::column::{fmt_column, ColumnType, TypedColumn};
use crate::element::Element;
use crate::mask::BooleanMask;

use super::asset::AssetColumn;
use super::item::CatalogItem;

/// How records handed to a column are taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Deep-copy every record into storage owned by the column, so the
    /// column never shares a payload with the caller.
    pub copy_on_ingest: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            copy_on_ingest: true,
        }
    }
}

/// Which asset names a column reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetNamePolicy {
    /// Names on the first present item; assumes a uniform asset schema.
    #[default]
    First,
    /// Names present on any item.
    Union,
    /// Names present on every item.
    Intersection,
}

impl AssetNamePolicy {
    /// Parse from string (case-insensitive), falling back to `First`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "union" => Self::Union,
            "intersection" | "intersect" => Self::Intersection,
            _ => Self::First,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Union => "union",
            Self::Intersection => "intersection",
        }
    }
}

impl Display for AssetNamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column whose cells are catalog items, registered as `"stac"`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemColumn {
    elements: Vec<Element<Arc<CatalogItem>>>,
}

impl ItemColumn {
    /// A column owning the given records.
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Self {
            elements: items
                .into_iter()
                .map(|item| Element::Present(Arc::new(item)))
                .collect(),
        }
    }

    /// A column over records the caller may also hold.
    ///
    /// With `copy_on_ingest` every record is cloned into a fresh allocation;
    /// otherwise the column shares the caller's `Arc`s.
    pub fn from_shared(
        items: impl IntoIterator<Item = Arc<CatalogItem>>,
        options: IngestOptions,
    ) -> Self {
        Self::from_sequence(items.into_iter().map(Element::Present), options.copy_on_ingest)
    }

    /// Load items from a JSON `FeatureCollection` or a bare JSON array of items.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let features = match value {
            Value::Array(features) => features,
            Value::Object(mut object) => match object.remove("features") {
                Some(Value::Array(features)) => features,
                _ => {
                    return Err(FrameError::InvalidRecord(
                        "expected a FeatureCollection with a 'features' array".to_string(),
                    ))
                }
            },
            _ => {
                return Err(FrameError::InvalidRecord(
                    "expected a JSON array or FeatureCollection".to_string(),
                ))
            }
        };

        let items = features
            .into_iter()
            .map(serde_json::from_value::<CatalogItem>)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::debug!(items = items.len(), "Loaded catalog items");
        Ok(Self::new(items))
    }

    /// The item at `index`, or `None` when the cell is missing.
    pub fn item(&self, index: usize) -> Result<Option<&CatalogItem>> {
        Ok(self.element_at(index)?.present().map(|item| &**item))
    }

    fn project<T, F>(&self, f: F) -> Vec<Option<T>>
    where
        F: Fn(&CatalogItem) -> Option<T>,
    {
        self.elements
            .iter()
            .map(|element| element.present().and_then(|item| f(&**item)))
            .collect()
    }

    pub fn ids(&self) -> Vec<Option<String>> {
        self.project(|item| Some(item.id.clone()))
    }

    pub fn bboxes(&self) -> Vec<Option<BoundingBox>> {
        self.project(|item| item.bbox)
    }

    pub fn collection_ids(&self) -> Vec<Option<String>> {
        self.project(|item| item.collection_id().map(str::to_string))
    }

    /// Acquisition times parsed to UTC; fails on the first malformed value.
    pub fn datetimes(&self) -> Result<Vec<Option<DateTime<Utc>>>> {
        self.elements
            .iter()
            .map(|element| match element.present() {
                Some(item) => item.datetime(),
                None => Ok(None),
            })
            .collect()
    }

    pub fn stac_extensions(&self) -> Vec<Option<Vec<String>>> {
        self.project(|item| Some(item.stac_extensions.clone()))
    }

    /// Bounding box covering every item footprint.
    pub fn total_bounds(&self) -> Option<BoundingBox> {
        self.bboxes()
            .into_iter()
            .flatten()
            .reduce(|acc, bbox| acc.union(&bbox))
    }

    /// Rows whose acquisition time falls inside `range`.
    pub fn datetime_mask(&self, range: &TimeRange) -> Result<BooleanMask> {
        Ok(self
            .datetimes()?
            .iter()
            .map(|dt| dt.as_ref().is_some_and(|dt| range.contains(dt)))
            .collect())
    }

    /// Rows whose footprint overlaps `bbox`; items without a footprint never match.
    pub fn bbox_mask(&self, bbox: &BoundingBox) -> BooleanMask {
        self.bboxes()
            .iter()
            .map(|footprint| footprint.is_some_and(|f| f.intersects(bbox)))
            .collect()
    }

    /// Asset names according to `policy`, in lexicographic order.
    pub fn asset_names(&self, policy: AssetNamePolicy) -> Vec<String> {
        let mut present = self.elements.iter().filter_map(Element::present);
        let names: BTreeSet<&str> = match policy {
            AssetNamePolicy::First => present
                .next()
                .map(|item| item.asset_names().collect())
                .unwrap_or_default(),
            AssetNamePolicy::Union => present.flat_map(|item| item.asset_names()).collect(),
            AssetNamePolicy::Intersection => {
                let Some(first) = present.next() else {
                    return Vec::new();
                };
                let mut names: BTreeSet<&str> = first.asset_names().collect();
                for item in present {
                    names.retain(|name| item.asset(name).is_some());
                }
                names
            }
        };
        names.into_iter().map(str::to_string).collect()
    }

    /// The descriptor of asset `name` on every row.
    ///
    /// Fails on the first present item that lacks the asset; missing rows
    /// stay missing.
    pub fn asset(&self, name: &str) -> Result<AssetColumn> {
        let elements = self
            .elements
            .iter()
            .map(|element| {
                element.as_ref().try_map(|item| {
                    item.asset(name)
                        .cloned()
                        .map(Arc::new)
                        .ok_or_else(|| FrameError::MissingAsset {
                            item_id: item.id.clone(),
                            asset: name.to_string(),
                        })
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(AssetColumn::from_elements(elements))
    }

    /// One asset column per requested name, in request order.
    pub fn assets<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<AssetColumn>> {
        names.iter().map(|name| self.asset(name.as_ref())).collect()
    }
}

impl TypedColumn for ItemColumn {
    type Payload = CatalogItem;

    const COLUMN_TYPE: ColumnType = ColumnType::Stac;

    fn elements(&self) -> &[Element<Arc<CatalogItem>>] {
        &self.elements
    }

    fn from_elements(elements: Vec<Element<Arc<CatalogItem>>>) -> Self {
        Self { elements }
    }

    fn payload_nbytes(payload: &CatalogItem) -> usize {
        payload.estimated_size()
    }

    fn format_payload(payload: &CatalogItem) -> String {
        format!("<Item id={}>", payload.id)
    }
}

impl Display for ItemColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_column(self, f)
    }
}

impl FromIterator<CatalogItem> for ItemColumn {
    fn from_iter<I: IntoIterator<Item = CatalogItem>>(iter: I) -> Self {
        Self::new(iter)
    }
}
