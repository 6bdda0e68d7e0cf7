use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::config::RenderConfig;
use crate::data::SourceRecord;
use crate::story::Story;

/// Deserialize a JSON file from `path`.
fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("[io::json] Failed to open {what} file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[io::json] Failed to parse {what} file {}", path.display()))
}

/// Read a JSON array of source records.
pub fn read_records(path: &Path) -> Result<Vec<SourceRecord>> {
    read_json(path, "records")
}

/// Parse a JSON array of source records from text.
pub fn read_records_str(text: &str) -> Result<Vec<SourceRecord>> {
    serde_json::from_str(text).context("[io::json::read_records_str] Failed to parse records")
}

/// Read a story definition: a JSON array of `{title, description?, field?}`.
pub fn read_story(path: &Path) -> Result<Story> {
    read_json(path, "story")
}

/// Read a render config; missing keys keep their defaults.
pub fn read_config(path: &Path) -> Result<RenderConfig> {
    read_json(path, "config")
}
