#![doc = "Redline story map core: geometry parsing, statistics, render surfaces, growth animation and hover sync."]
mod anim;
mod camera;
mod common;
mod config;
mod data;
mod geom;
mod io;
mod render;
mod session;
mod stats;
mod story;
mod surface;
mod sync;

#[doc(inline)]
pub use anim::{GrowthAnimator, GrowthFrame, GrowthState, StepToken};

#[doc(inline)]
pub use camera::{CameraDirective, Orbit};

#[doc(inline)]
pub use config::RenderConfig;

#[doc(inline)]
pub use data::{AreaId, Dataset, EnrichedRecord, Grade, SourceRecord};

#[doc(inline)]
pub use geom::{compute_centroid, parse_geometry, scan_centroid, try_parse_geometry};

#[doc(inline)]
pub use io::{
    cells_to_geojson, feature_collection, multipolygon_to_geojson, parcels_to_geojson,
    polygon_to_geojson, read_config, read_records, read_records_str, read_story, write_geojson,
};

#[doc(inline)]
pub use render::{FeatureId, RenderSurface, RenderedFeature};

#[doc(inline)]
pub use session::{Session, StoryObserver};

#[doc(inline)]
pub use stats::{
    compute_field_statistics, compute_step_distribution, FieldRange, FieldStatistics,
    RankedEntry, StepDistribution, BIN_COUNT,
};

#[doc(inline)]
pub use story::{Story, StoryStep};

#[doc(inline)]
pub use surface::{build_extrusion_surface, build_parcel_surface, square_footprint, ParcelFeature, RenderCell};

#[doc(inline)]
pub use sync::{set_hover_state, HoverSync, IdentityMap};
