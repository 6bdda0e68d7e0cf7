mod extrusion;
mod parcel;

pub use extrusion::{build_extrusion_surface, square_footprint, RenderCell};
pub use parcel::{build_parcel_surface, ParcelFeature};
