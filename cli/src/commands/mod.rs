pub mod export;
pub mod stats;
pub mod story;

use anyhow::Result;
use redline::{Dataset, RenderConfig, Story};

use crate::cli::SourceArgs;

/// Optional story file, or the built-in one.
pub fn load_story(path: Option<&std::path::Path>) -> Result<Story> {
    path.map_or_else(|| Ok(Story::default()), redline::read_story)
}

/// Config, story and the city-filtered dataset named by `args`.
pub fn load_source(args: &SourceArgs) -> Result<(Dataset, Story, RenderConfig)> {
    let config = args.config.as_deref().map_or_else(|| Ok(RenderConfig::default()), redline::read_config)?;
    let story = load_story(args.story.as_deref())?;

    tracing::info!(path = %args.records.display(), "reading records");
    let records = redline::read_records(&args.records)?;
    let dataset = Dataset::from_records(records, config.city.as_deref());
    if dataset.is_empty() {
        tracing::warn!(city = config.city.as_deref().unwrap_or("*"), "no records left after city filter");
    }
    Ok((dataset, story, config))
}
