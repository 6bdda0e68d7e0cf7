use std::collections::BTreeSet;

use crate::data::{EnrichedRecord, SourceRecord};
use crate::geom::{compute_centroid, parse_geometry, scan_centroid};

/// The static set of enriched records rendered by a session, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<EnrichedRecord>,
}

impl Dataset {
    /// Enrich source records, keeping only those whose city matches `city`
    /// (case-insensitive) when a filter is given.
    pub fn from_records(records: Vec<SourceRecord>, city: Option<&str>) -> Self {
        let total = records.len();
        let records: Vec<EnrichedRecord> = records.into_iter()
            .filter(|r| city.is_none_or(|c| r.city.trim().eq_ignore_ascii_case(c.trim())))
            .map(enrich)
            .collect();

        let unparsed = records.iter().filter(|r| !r.has_shape()).count();
        let unanchored = records.iter().filter(|r| r.centroid.is_none()).count();
        tracing::info!(
            kept = records.len(),
            filtered = total - records.len(),
            unparsed,
            unanchored,
            city = city.unwrap_or("*"),
            "loaded dataset"
        );

        Self { records }
    }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    #[inline] pub fn records(&self) -> &[EnrichedRecord] { &self.records }

    /// Names of every field holding a finite number in at least one record.
    pub fn metric_fields(&self) -> BTreeSet<&str> {
        self.records.iter()
            .flat_map(|r| r.source.metrics().map(|(name, _)| name))
            .collect()
    }
}

/// Parse the record's geometry and anchor it, falling back to a coordinate
/// scan of the raw text when it does not parse.
fn enrich(source: SourceRecord) -> EnrichedRecord {
    let wkt = source.geometry.as_deref().unwrap_or("");
    let shape = parse_geometry(wkt);
    let centroid = compute_centroid(&shape).or_else(|| {
        let fallback = scan_centroid(wkt);
        tracing::debug!(
            area_id = %source.area_id,
            recovered = fallback.is_some(),
            "geometry excluded from parcel layer"
        );
        fallback
    });
    EnrichedRecord { source, shape, centroid }
}
