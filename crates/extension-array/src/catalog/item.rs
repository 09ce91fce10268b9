//! Catalog item and asset records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use frame_common::{parse_datetime, BoundingBox, Result};

/// One fetchable data layer referenced by a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Location of the data.
    pub href: String,
    /// Media type, e.g. `image/tiff; application=geotiff`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// Extension fields such as `eo:bands`.
    #[serde(flatten)]
    pub extra_fields: Map<String, Value>,
}

impl Asset {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            media_type: None,
            title: None,
            roles: Vec::new(),
            extra_fields: Map::new(),
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }
}

/// A spatio-temporal catalog record in STAC item form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default)]
    pub stac_extensions: Vec<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub assets: BTreeMap<String, Asset>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bbox: None,
            geometry: None,
            collection: None,
            stac_extensions: Vec::new(),
            properties: Map::new(),
            assets: BTreeMap::new(),
        }
    }

    /// Parse a single item from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn with_datetime(mut self, datetime: impl Into<String>) -> Self {
        self.properties
            .insert("datetime".to_string(), Value::String(datetime.into()));
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.stac_extensions.push(extension.into());
        self
    }

    pub fn with_asset(mut self, name: impl Into<String>, asset: Asset) -> Self {
        self.assets.insert(name.into(), asset);
        self
    }

    pub fn collection_id(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// The nominal acquisition time as delivered, falling back to
    /// `start_datetime` for items that only describe an interval.
    pub fn datetime_str(&self) -> Option<&str> {
        ["datetime", "start_datetime"]
            .iter()
            .find_map(|key| self.properties.get(*key).and_then(Value::as_str))
    }

    /// The nominal acquisition time, parsed to UTC.
    pub fn datetime(&self) -> Result<Option<DateTime<Utc>>> {
        self.datetime_str().map(parse_datetime).transpose()
    }

    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.get(name)
    }

    pub fn asset_names(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    /// Size of the record's JSON form, used for byte accounting.
    pub fn estimated_size(&self) -> usize {
        serde_json::to_vec(self).map_or(0, |bytes| bytes.len())
    }
}
