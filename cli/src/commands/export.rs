use std::path::PathBuf;

use anyhow::Result;
use redline::{
    build_extrusion_surface, build_parcel_surface, cells_to_geojson, compute_field_statistics,
    parcels_to_geojson, write_geojson,
};

use super::load_source;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ExportArgs) -> Result<()> {
    let (dataset, story, config) = load_source(&args.source)?;
    let out_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));

    let parcels = build_parcel_surface(dataset.records());
    let path = out_dir.join("parcels.geojson");
    tracing::info!(features = parcels.len(), path = %path.display(), "writing parcels");
    write_geojson(&path, &parcels_to_geojson(&parcels), args.force)?;

    let stats = compute_field_statistics(dataset.records());
    for (index, step) in story.steps().iter().enumerate() {
        let Some(field) = step.field() else { continue };
        let cells = build_extrusion_surface(dataset.records(), &stats, step, &config);
        let path = out_dir.join(format!("step-{index:02}.geojson"));
        tracing::info!(step = index, field, cells = cells.len(), path = %path.display(), "writing extrusions");
        write_geojson(&path, &cells_to_geojson(&cells), args.force)?;
    }
    Ok(())
}
