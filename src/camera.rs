use serde::Serialize;

use crate::config::RenderConfig;

/// How the camera should move when a step is activated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraDirective {
    pub pitch: f64,
    pub zoom: f64,
    /// `Some` to reset the bearing, `None` to keep the current one.
    pub bearing: Option<f64>,
    /// Eased transition duration; 0 jumps.
    pub duration_ms: u32,
    pub orbit: bool,
}

impl CameraDirective {
    /// The overview step looks straight down and stays still; later steps
    /// tilt and orbit slowly.
    pub fn for_step(index: usize, config: &RenderConfig) -> Self {
        if index == 0 {
            Self { pitch: config.overview_pitch, zoom: config.zoom, bearing: Some(0.0), duration_ms: 1000, orbit: false }
        } else {
            Self { pitch: config.story_pitch, zoom: config.zoom, bearing: None, duration_ms: 0, orbit: true }
        }
    }
}

/// Slow automatic rotation, paused while the user drags the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Orbit {
    active: bool,
    dragging: bool,
}

impl Orbit {
    #[inline] pub fn is_active(&self) -> bool { self.active }

    pub fn set_active(&mut self, active: bool) { self.active = active; }

    pub fn set_dragging(&mut self, dragging: bool) { self.dragging = dragging; }

    /// Bearing increment for this frame, if the orbit should move.
    pub fn advance(&self, degrees_per_frame: f64) -> Option<f64> {
        (self.active && !self.dragging).then_some(degrees_per_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_resets_and_story_orbits() {
        let config = RenderConfig::default();
        let overview = CameraDirective::for_step(0, &config);
        assert_eq!((overview.pitch, overview.bearing, overview.orbit), (0.0, Some(0.0), false));
        let later = CameraDirective::for_step(4, &config);
        assert_eq!((later.pitch, later.bearing, later.orbit), (55.0, None, true));
    }

    #[test]
    fn orbit_pauses_while_dragging() {
        let mut orbit = Orbit::default();
        assert_eq!(orbit.advance(0.05), None);
        orbit.set_active(true);
        assert_eq!(orbit.advance(0.05), Some(0.05));
        orbit.set_dragging(true);
        assert_eq!(orbit.advance(0.05), None);
    }
}
