//! Materializing catalog assets into raster columns.

use extension_array::{
    Asset, AssetNamePolicy, CatalogItem, ItemColumn, LabeledArray, TypedColumn,
};
use frame::{
    FailurePolicy, Frame, FrameError, InMemoryResolver, Index, MaterializeConfig, Series,
};
use frame_common::BoundingBox;
use test_utils::{
    asset_href, assets, create_test_grid, feature_collection_json, init_tracing,
};

const SCENES: usize = 3;

/// A single-band `(band, y, x)` raster as a reader would return it.
fn band_raster(seed: usize) -> LabeledArray {
    let data: Vec<f64> = create_test_grid(4, 4).iter().map(|v| v + seed as f64).collect();
    let bbox = BoundingBox::new(0.0, 0.0, 4.0, 4.0);
    let grid = LabeledArray::from_grid(data.clone(), 4, 4, &bbox).unwrap();
    LabeledArray::new(
        vec!["band".to_string(), "y".to_string(), "x".to_string()],
        vec![1, 4, 4],
        data,
    )
    .unwrap()
    .with_coord("y", grid.coord("y").unwrap().to_vec())
    .unwrap()
    .with_coord("x", grid.coord("x").unwrap().to_vec())
    .unwrap()
}

fn scene_series(asset_names: &[&str]) -> Series<ItemColumn> {
    let items = ItemColumn::from_json(&feature_collection_json(SCENES, asset_names)).unwrap();
    let ids: Vec<String> = items.ids().into_iter().flatten().collect();
    Series::with_index("items", Index::new(ids), items).unwrap()
}

fn resolver_for(asset_names: &[&str]) -> InMemoryResolver {
    let mut resolver = InMemoryResolver::new();
    for scene in 0..SCENES {
        for name in asset_names {
            resolver.insert(asset_href(&format!("scene-{}", scene), name), band_raster(scene));
        }
    }
    resolver
}

#[test]
fn test_materialize_red_for_three_scenes() {
    init_tracing();

    let series = scene_series(&[assets::RED]);
    let resolver = resolver_for(&[assets::RED]);

    let frame = series
        .stac()
        .with_rasters(Some(&[assets::RED]), &resolver, &MaterializeConfig::default())
        .unwrap();

    assert_eq!(frame.len(), SCENES);
    assert_eq!(frame.column_names(), vec!["items", "red"]);
    assert_eq!(frame.index(), series.index());

    let red = frame.raster_series("red").unwrap();
    for row in 0..SCENES {
        let array = red.values().array(row).unwrap().unwrap();
        assert_eq!(array.shape(), &[4, 4]);
        assert_eq!(array.dims(), &["y".to_string(), "x".to_string()]);
        assert_eq!(array.get(&[0, 1]), Some(1000.0 + row as f64));
    }
    assert_eq!(red.values().byte_size(), SCENES * 16 * 8);
}

#[test]
fn test_source_series_is_unchanged() {
    let series = scene_series(&[assets::RED]);
    let before = series.clone();
    let resolver = resolver_for(&[assets::RED]);

    let _ = series
        .stac()
        .with_rasters(None, &resolver, &MaterializeConfig::default())
        .unwrap();
    assert_eq!(series, before);
}

#[test]
fn test_default_names_from_first_item() {
    let series = scene_series(&[assets::RED, assets::NIR]);
    let resolver = resolver_for(&[assets::RED, assets::NIR]);

    let frame = series
        .stac()
        .with_rasters(None, &resolver, &MaterializeConfig::default())
        .unwrap();
    assert_eq!(frame.column_names(), vec!["items", "nir08", "red"]);
}

#[test]
fn test_parallel_matches_sequential() {
    let series = scene_series(&[assets::RED, assets::NIR]);
    let resolver = resolver_for(&[assets::RED, assets::NIR]);

    let sequential = series
        .stac()
        .with_rasters(None, &resolver, &MaterializeConfig::default())
        .unwrap();
    let parallel = series
        .stac()
        .with_rasters(
            None,
            &resolver,
            &MaterializeConfig::default().with_parallel(true).with_threads(2),
        )
        .unwrap();
    let global_pool = series
        .stac()
        .with_rasters(None, &resolver, &MaterializeConfig::default().with_parallel(true))
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(sequential, global_pool);
}

#[test]
fn test_missing_asset_under_each_policy() {
    // scene-1 lacks the thumbnail asset entirely
    let mut items: Vec<CatalogItem> = scene_series(&[assets::RED])
        .values()
        .iter()
        .filter_map(|element| element.present().map(|item| (**item).clone()))
        .collect();
    for (i, item) in items.iter_mut().enumerate() {
        if i != 1 {
            let id = item.id.clone();
            item.assets
                .insert(assets::THUMBNAIL.to_string(), Asset::new(asset_href(&id, assets::THUMBNAIL)));
        }
    }
    let series = Series::new("items", ItemColumn::new(items));
    let resolver = resolver_for(&[assets::THUMBNAIL]);
    let names = [assets::THUMBNAIL];

    let err = series
        .stac()
        .with_rasters(Some(&names), &resolver, &MaterializeConfig::default())
        .unwrap_err();
    assert!(matches!(err, FrameError::MissingAsset { ref item_id, .. } if item_id == "scene-1"));

    let null_cell = MaterializeConfig::default().with_failure_policy(FailurePolicy::NullCell);
    let frame = series.stac().with_rasters(Some(&names), &resolver, &null_cell).unwrap();
    assert_eq!(frame.column("thumbnail").unwrap().is_missing().indices(), vec![1]);

    let skip_row = MaterializeConfig::default().with_failure_policy(FailurePolicy::SkipRow);
    let frame = series.stac().with_rasters(Some(&names), &resolver, &skip_row).unwrap();
    assert_eq!(frame.index(), &Index::new([0i64, 2]));
    assert!(frame.column("thumbnail").unwrap().is_missing().indices().is_empty());
}

#[test]
fn test_union_policy_tolerates_ragged_assets() {
    let items = ItemColumn::new([
        CatalogItem::new("a").with_asset("red", Asset::new("mem://a/red")),
        CatalogItem::new("b").with_asset("blue", Asset::new("mem://b/blue")),
    ]);
    let series = Series::new("items", items);
    let resolver = InMemoryResolver::new()
        .with_array("mem://a/red", band_raster(0))
        .with_array("mem://b/blue", band_raster(1));

    let config = MaterializeConfig::default()
        .with_asset_names(AssetNamePolicy::Union)
        .with_failure_policy(FailurePolicy::NullCell);
    let frame = series.stac().with_rasters(None, &resolver, &config).unwrap();

    assert_eq!(frame.column_names(), vec!["items", "blue", "red"]);
    assert_eq!(frame.column("blue").unwrap().is_missing().indices(), vec![0]);
    assert_eq!(frame.column("red").unwrap().is_missing().indices(), vec![1]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let series = scene_series(&[assets::RED]);
    let resolver = resolver_for(&[assets::RED]);
    let config = MaterializeConfig::default().with_parallel(true).with_threads(0);

    let err = series.stac().with_rasters(None, &resolver, &config).unwrap_err();
    assert!(matches!(err, FrameError::Config(_)));
}

#[test]
fn test_join_materialized_with_other_frame() {
    let series = scene_series(&[assets::RED]);
    let resolver = resolver_for(&[assets::RED]);
    let frame = series
        .stac()
        .with_rasters(None, &resolver, &MaterializeConfig::default())
        .unwrap();

    let datetime = series.stac().datetime().unwrap();
    assert_eq!(datetime.len(), SCENES);
    assert!(datetime.values().iter().all(Option::is_some));

    let extra = Frame::from_series(
        Series::with_index(
            "blue",
            Index::new(["scene-0"]),
            extension_array::RasterColumn::new([band_raster(0).squeeze()]),
        )
        .unwrap(),
    );
    let joined = frame.join(&extra).unwrap();
    assert_eq!(joined.len(), SCENES);
    assert_eq!(joined.column("blue").unwrap().is_missing().indices(), vec![1, 2]);
}
