mod bbox;
mod wkt;

pub use bbox::{compute_centroid, scan_centroid};
pub use wkt::{parse_geometry, try_parse_geometry};
