mod dataset;
mod record;

pub use dataset::Dataset;
pub use record::{AreaId, EnrichedRecord, Grade, SourceRecord};
