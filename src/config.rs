use serde::{Deserialize, Serialize};

/// Rendering and loading parameters. Every field has a default, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Extrusion height (meters) of a cell whose normalized value is 1.
    pub height_multiplier: f64,
    /// Half side of an extrusion square, in degrees (~200 m in Boston).
    pub box_half_size: f64,
    /// Frames spent growing extrusions from zero to target.
    pub growth_frames: u32,
    /// Case-insensitive city filter applied at load; `None` keeps every record.
    pub city: Option<String>,
    /// Camera pitch on the first (overview) step.
    pub overview_pitch: f64,
    /// Camera pitch on every later step.
    pub story_pitch: f64,
    pub zoom: f64,
    /// Orbit bearing increment per frame, in degrees.
    pub orbit_degrees_per_frame: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height_multiplier: 1200.0,
            box_half_size: 0.002,
            growth_frames: 30,
            city: Some("boston".to_string()),
            overview_pitch: 0.0,
            story_pitch: 55.0,
            zoom: 11.0,
            orbit_degrees_per_frame: 0.05,
        }
    }
}
