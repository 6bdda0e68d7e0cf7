mod growth;

pub use growth::{GrowthAnimator, GrowthFrame, GrowthState, StepToken};
