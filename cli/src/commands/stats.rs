use anyhow::{Context, Result};
use redline::{compute_field_statistics, compute_step_distribution};
use serde_json::json;

use super::load_source;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::StatsArgs) -> Result<()> {
    let (dataset, story, _config) = load_source(&args.source)?;
    let stats = compute_field_statistics(dataset.records());

    let step = args.step.map(|index| {
        let index = story.clamp(index);
        let step = story.step(index);
        let distribution = step.field().and_then(|field| compute_step_distribution(dataset.records(), field));
        json!({ "index": index, "title": step.title, "field": step.field(), "distribution": distribution })
    });

    let report = json!({
        "records": dataset.len(),
        "fields": stats,
        "step": step,
    });
    let text = serde_json::to_string_pretty(&report).context("[stats] Failed to serialize report")?;
    println!("{text}");
    Ok(())
}
