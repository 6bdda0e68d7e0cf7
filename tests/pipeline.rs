// End-to-end data path over the sample fixture:
//   records -> dataset -> statistics -> surfaces -> GeoJSON on disk.

mod common;

use common::*;
use geo::Coord;
use pretty_assertions::assert_eq;
use redline::{
    build_extrusion_surface, build_parcel_surface, cells_to_geojson, compute_field_statistics,
    compute_step_distribution, parcels_to_geojson, write_geojson, Dataset, FieldRange, GrowthAnimator,
    RenderConfig, StepToken, Story,
};
use serde_json::Value;

#[test]
fn city_filter_drops_other_cities() {
    let ds = sample_dataset();
    assert_eq!(ds.len(), 5);
    assert!(ds.records().iter().all(|r| r.source.city.eq_ignore_ascii_case("boston")));

    let all = Dataset::from_records(redline::read_records_str(SAMPLE).unwrap(), None);
    assert_eq!(all.len(), 6);
}

#[test]
fn statistics_ignore_other_cities_and_bad_values() {
    let stats = compute_field_statistics(sample_dataset().records());
    assert_eq!(stats.get("unemployment_pct"), Some(&FieldRange { min: 3.0, max: 12.5 }));
    assert_eq!(stats.get("Average_Income"), Some(&FieldRange { min: 45000.0, max: 120000.0 }));
    assert_eq!(stats.get("smoking_pct"), Some(&FieldRange { min: 8.5, max: 19.0 }));
}

#[test]
fn centroids_fall_back_to_scanned_coordinates() {
    let ds = sample_dataset();
    let broken = &ds.records()[3];
    assert!(!broken.has_shape());
    let c = broken.centroid.unwrap();
    assert!((c.x - -71.08).abs() < 1e-9 && (c.y - 42.36).abs() < 1e-9);

    let square = &ds.records()[0];
    let Coord { x, y } = square.centroid.unwrap();
    assert!((x - -71.09).abs() < 1e-9 && (y - 42.31).abs() < 1e-9);
}

#[test]
fn default_story_runs_over_the_sample() {
    let ds = sample_dataset();
    let stats = compute_field_statistics(ds.records());
    let story = Story::default();
    let config = RenderConfig::default();

    for step in story.steps() {
        let cells = build_extrusion_surface(ds.records(), &stats, step, &config);
        match step.field() {
            None => assert!(cells.is_empty()),
            Some(field) => {
                assert_eq!(cells.len(), ds.len(), "{field}");
                let known = compute_step_distribution(ds.records(), field).map_or(0, |d| d.total_count);
                assert_eq!(cells.iter().filter(|c| c.raw_value.is_some()).count(), known);
            }
        }
    }
}

#[test]
fn growth_over_real_cells_lands_on_target() {
    let ds = sample_dataset();
    let stats = compute_field_statistics(ds.records());
    let story = sample_story();
    let step = &story.steps()[1];
    let target = build_extrusion_surface(ds.records(), &stats, step, &RenderConfig::default());

    let mut anim = GrowthAnimator::new(30);
    let token = StepToken::default().next();
    anim.start(target.clone(), token);
    let last = std::iter::from_fn(|| anim.tick(token)).last().unwrap();
    assert_eq!(last.frame, 30);
    assert_eq!(last.cells, target);
}

#[test]
fn exports_both_collections() {
    let ds = sample_dataset();
    let stats = compute_field_statistics(ds.records());
    let dir = tempfile::tempdir().unwrap();

    let parcels = parcels_to_geojson(&build_parcel_surface(ds.records()));
    let cells = cells_to_geojson(&build_extrusion_surface(
        ds.records(), &stats, &sample_story().steps()[2], &RenderConfig::default(),
    ));
    write_geojson(&dir.path().join("parcels.geojson"), &parcels, false).unwrap();
    write_geojson(&dir.path().join("step-02.geojson"), &cells, false).unwrap();

    let read = |name: &str| -> Value {
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(name)).unwrap()).unwrap()
    };
    assert_eq!(read("parcels.geojson")["features"].as_array().unwrap().len(), 4);
    let step = read("step-02.geojson");
    assert_eq!(step["features"].as_array().unwrap().len(), 5);
    assert_eq!(step["features"][3]["properties"]["value"], Value::Null);
    assert_eq!(step["features"][2]["geometry"]["type"], "Polygon");
}
