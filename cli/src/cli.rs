use std::path::PathBuf;

/// Redlining story map CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "redline", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print field statistics and a step's distribution as JSON
    Stats(StatsArgs),

    /// Write parcel and per-step extrusion GeoJSON (forbids stdout)
    Export(ExportArgs),

    /// List story steps and their fields
    Story(StoryArgs),
}

/// Render config and story overrides shared by data commands.
#[derive(clap::Args, Debug)]
pub struct SourceArgs {
    /// Input records file (JSON array)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub records: PathBuf,

    /// Render config file (JSON); missing keys keep defaults
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Story file (JSON array of steps), defaults to the built-in Boston story
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub story: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Step whose distribution to print (clamped to the story)
    #[arg(short, long)]
    pub step: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct StoryArgs {
    /// Story file (JSON array of steps), defaults to the built-in Boston story
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub story: Option<PathBuf>,
}
