mod geojson;
mod json;

pub use geojson::{
    cells_to_geojson, feature_collection, multipolygon_to_geojson, parcels_to_geojson,
    polygon_to_geojson, write_geojson,
};
pub use json::{read_config, read_records, read_records_str, read_story};
