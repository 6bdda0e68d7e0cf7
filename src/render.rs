use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::camera::CameraDirective;

/// Opaque feature id assigned by the map engine when it materializes a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A parcel feature as reported back by the engine after materialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedFeature {
    #[serde(default)]
    pub id: Option<FeatureId>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// The map engine, seen from the core. The core only hands it data; camera,
/// tiles, projection and paint styling stay on the engine side.
pub trait RenderSurface {
    /// Replace the parcel polygon source.
    fn set_parcel_data(&mut self, collection: Value);

    /// Replace the extrusion cell source.
    fn set_extrusion_data(&mut self, collection: Value);

    fn set_extrusion_visible(&mut self, visible: bool);

    /// Toggle the boolean hover flag of one parcel feature.
    fn set_feature_hover(&mut self, id: FeatureId, hovered: bool);

    /// Parcel features materialized so far. May be empty before the engine is idle.
    fn query_parcel_features(&self) -> Vec<RenderedFeature>;

    fn apply_camera(&mut self, _directive: &CameraDirective) {}

    fn rotate_bearing(&mut self, _degrees: f64) {}
}
