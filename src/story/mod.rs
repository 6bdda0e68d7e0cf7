mod step;

pub use step::{Story, StoryStep};
