use geo::{Coord, LineString, Polygon};

use crate::config::RenderConfig;
use crate::data::{AreaId, EnrichedRecord, Grade};
use crate::stats::{FieldRange, FieldStatistics};
use crate::story::StoryStep;

/// One extruded box of the metric layer.
///
/// Cells are emitted once per record, in input order, so `index` doubles as
/// the positional key that matches a cell across animation frames.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCell {
    pub index: usize,
    pub area_id: AreaId,
    pub zone: i64,
    pub grade: Grade,
    pub category: Option<String>,
    /// `None` when the record has no finite value for the field.
    pub raw_value: Option<f64>,
    pub normalized: f64,
    pub height: f64,
    /// Square around the record centroid; `None` when the record has no anchor.
    pub footprint: Option<Polygon<f64>>,
}

impl RenderCell {
    /// Copy of this cell with its height scaled by `progress`.
    #[inline]
    pub fn scaled(&self, progress: f64) -> Self {
        Self { height: self.height * progress, ..self.clone() }
    }
}

/// Build the metric cells for `step`, or nothing when the step has no field.
///
/// A missing value is kept as a zero-height cell so the cell count never
/// changes between steps.
pub fn build_extrusion_surface(
    records: &[EnrichedRecord],
    stats: &FieldStatistics,
    step: &StoryStep,
    config: &RenderConfig,
) -> Vec<RenderCell> {
    let Some(field) = step.field() else { return Vec::new() };

    // A field with no finite values has no range; every cell is then zero.
    let range = stats.get(field).copied().unwrap_or(FieldRange { min: 0.0, max: 1.0 });

    records.iter()
        .enumerate()
        .map(|(index, r)| {
            let raw_value = r.metric(field);
            let normalized = raw_value.map_or(0.0, |v| range.normalize(v));
            RenderCell {
                index,
                area_id: r.area_id().clone(),
                zone: r.source.zone_idx,
                grade: r.grade(),
                category: r.source.category.clone(),
                raw_value,
                normalized,
                height: normalized * config.height_multiplier,
                footprint: r.centroid.map(|c| square_footprint(c, config.box_half_size)),
            }
        })
        .collect()
}

/// Closed, counter-clockwise square of half side `half` centered on `center`.
/// Sized in degrees regardless of zoom or latitude.
pub fn square_footprint(center: Coord<f64>, half: f64) -> Polygon<f64> {
    let Coord { x, y } = center;
    Polygon::new(
        LineString::from(vec![
            (x - half, y - half),
            (x + half, y - half),
            (x + half, y + half),
            (x - half, y + half),
            (x - half, y - half),
        ]),
        Vec::new(),
    )
}
