#![allow(dead_code)]

use redline::{
    AreaId, CameraDirective, Dataset, FeatureId, RenderConfig, RenderSurface, RenderedFeature,
    Session, Story, StoryStep,
};
use serde_json::{Map, Value};

pub const SAMPLE: &str = include_str!("../fixtures/boston_sample.json");

pub fn sample_dataset() -> Dataset {
    let records = redline::read_records_str(SAMPLE).unwrap();
    Dataset::from_records(records, Some("boston"))
}

pub fn sample_story() -> Story {
    Story::new(vec![
        StoryStep::new("Overview", None),
        StoryStep::new("Unemployment", Some("unemployment_pct")),
        StoryStep::new("Income", Some("Average_Income")),
        StoryStep::new("Smoking", Some("smoking_pct")),
        StoryStep::new("Closing", None),
    ])
}

/// Stand-in for the map engine: records every write and hands out its own
/// feature ids once "idle".
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub parcels: Vec<Value>,
    pub extrusions: Vec<Value>,
    pub visibility: Vec<bool>,
    pub hovers: Vec<(FeatureId, bool)>,
    pub cameras: Vec<CameraDirective>,
    pub bearing: f64,
    pub idle: bool,
    /// First engine id handed out; engines number features arbitrarily.
    pub id_offset: u64,
}

impl RecordingSurface {
    pub fn new() -> Self { Self { id_offset: 1000, ..Self::default() } }

    pub fn feature_id_of(&self, area: &str) -> Option<FeatureId> {
        self.query_parcel_features().into_iter()
            .find(|f| f.properties.get("area_id").and_then(Value::as_str) == Some(area))
            .and_then(|f| f.id)
    }
}

impl RenderSurface for RecordingSurface {
    fn set_parcel_data(&mut self, collection: Value) { self.parcels.push(collection) }

    fn set_extrusion_data(&mut self, collection: Value) { self.extrusions.push(collection) }

    fn set_extrusion_visible(&mut self, visible: bool) { self.visibility.push(visible) }

    fn set_feature_hover(&mut self, id: FeatureId, hovered: bool) { self.hovers.push((id, hovered)) }

    fn query_parcel_features(&self) -> Vec<RenderedFeature> {
        if !self.idle { return Vec::new() }
        let Some(latest) = self.parcels.last() else { return Vec::new() };
        latest["features"].as_array().into_iter().flatten()
            .enumerate()
            .map(|(i, f)| RenderedFeature {
                id: Some(FeatureId(self.id_offset + i as u64)),
                properties: f["properties"].as_object().cloned().unwrap_or_else(Map::new),
            })
            .collect()
    }

    fn apply_camera(&mut self, directive: &CameraDirective) { self.cameras.push(*directive) }

    fn rotate_bearing(&mut self, degrees: f64) { self.bearing += degrees }
}

pub fn mounted_session() -> Session<RecordingSurface> {
    let mut session = Session::new(sample_dataset(), sample_story(), RenderConfig::default(), RecordingSurface::new());
    session.mount();
    session
}

/// `property` of every feature in an extrusion collection.
pub fn column(collection: &Value, property: &str) -> Vec<Value> {
    collection["features"].as_array().unwrap().iter()
        .map(|f| f["properties"][property].clone())
        .collect()
}

pub fn heights(collection: &Value) -> Vec<f64> {
    column(collection, "height").iter().map(|h| h.as_f64().unwrap()).collect()
}

pub fn area(id: &str) -> AreaId { AreaId::new(id) }
