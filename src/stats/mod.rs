mod distribution;
mod field;

pub use distribution::{compute_step_distribution, RankedEntry, StepDistribution, BIN_COUNT};
pub use field::{compute_field_statistics, FieldRange, FieldStatistics};
