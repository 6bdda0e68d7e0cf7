use geo::MultiPolygon;

use crate::data::{AreaId, EnrichedRecord, Grade};

/// A redlining zone as drawn on the flat parcel layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelFeature {
    pub area_id: AreaId,
    pub grade: Grade,
    pub zone: i64,
    pub shape: MultiPolygon<f64>,
}

/// One feature per record with a usable shape, in input order. Records whose
/// geometry did not parse are left out of this layer only.
pub fn build_parcel_surface(records: &[EnrichedRecord]) -> Vec<ParcelFeature> {
    records.iter()
        .filter(|r| r.has_shape())
        .map(|r| ParcelFeature {
            area_id: r.area_id().clone(),
            grade: r.grade(),
            zone: r.source.zone_idx,
            shape: r.shape.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, SourceRecord};
    use serde_json::json;

    #[test]
    fn skips_records_without_shape() {
        let records = vec![
            json!({"area_id": "a", "zone_idx": 1, "grade": "B", "geometry": "POLYGON ((0 0, 1 0, 1 1, 0 0))"}),
            json!({"area_id": "b", "zone_idx": 2, "geometry": "not wkt"}),
            json!({"area_id": "c", "zone_idx": 3, "geometry": "POLYGON ((5 5, 6 5, 6 6, 5 5))"}),
        ].into_iter().map(|v| serde_json::from_value::<SourceRecord>(v).unwrap()).collect();
        let ds = Dataset::from_records(records, None);

        let parcels = build_parcel_surface(ds.records());
        assert_eq!(parcels.len(), 2);
        assert_eq!(parcels[0].grade, Grade::B);
        assert_eq!(parcels[1].grade, Grade::Ungraded);
        assert_eq!(parcels[1].zone, 3);
    }
}
