//! Common test fixtures: extents, timestamps and catalog items.

use serde_json::{json, Map, Value};

/// Common bounding boxes as `(min_x, min_y, max_x, max_y)`.
pub mod bbox {
    /// Roughly one Landsat scene over the Pacific Northwest
    pub const SCENE: (f64, f64, f64, f64) = (-124.0, 45.0, -121.0, 47.5);
}

/// Common time values.
pub mod time {
    /// A fixed reference time for tests (2024-01-15T12:00:00Z)
    pub const REFERENCE_TIME: &str = "2024-01-15T12:00:00Z";

    /// Acquisition times one revisit apart
    pub const ACQUISITIONS: [&str; 3] = [
        "2021-07-01T18:30:00Z",
        "2021-07-17T18:30:00Z",
        "2021-08-02T18:30:00Z",
    ];
}

/// Common asset names.
pub mod assets {
    pub const RED: &str = "red";
    pub const NIR: &str = "nir08";
    pub const THUMBNAIL: &str = "thumbnail";
}

pub const GEOTIFF: &str = "image/tiff; application=geotiff; profile=cloud-optimized";

/// A STAC item with one GeoTIFF asset per name, hrefs of the form `mem://{id}/{name}`.
pub fn item_json(id: &str, datetime: &str, asset_names: &[&str]) -> Value {
    let (min_x, min_y, max_x, max_y) = bbox::SCENE;
    let assets: Map<String, Value> = asset_names
        .iter()
        .map(|name| {
            (
                name.to_string(),
                json!({
                    "href": asset_href(id, name),
                    "type": GEOTIFF,
                    "roles": ["data"],
                }),
            )
        })
        .collect();

    json!({
        "type": "Feature",
        "stac_version": "1.0.0",
        "stac_extensions": [],
        "id": id,
        "collection": "landsat-c2-l2",
        "bbox": [min_x, min_y, max_x, max_y],
        "geometry": null,
        "properties": {"datetime": datetime},
        "assets": assets,
        "links": [],
    })
}

/// The href [`item_json`] assigns to an asset.
pub fn asset_href(id: &str, name: &str) -> String {
    format!("mem://{}/{}", id, name)
}

/// A FeatureCollection of `count` items carrying the same asset names.
pub fn feature_collection_json(count: usize, asset_names: &[&str]) -> String {
    let features: Vec<Value> = (0..count)
        .map(|i| {
            let datetime = time::ACQUISITIONS[i % time::ACQUISITIONS.len()];
            item_json(&format!("scene-{}", i), datetime, asset_names)
        })
        .collect();
    json!({"type": "FeatureCollection", "features": features}).to_string()
}
