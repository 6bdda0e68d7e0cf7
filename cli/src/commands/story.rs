use anyhow::Result;

use super::load_story;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::StoryArgs) -> Result<()> {
    let story = load_story(args.story.as_deref())?;
    for (index, step) in story.steps().iter().enumerate() {
        println!("{index:>2}  {:<40} {}", step.title, step.field().unwrap_or("-"));
    }
    Ok(())
}
