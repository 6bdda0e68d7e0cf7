use serde::Serialize;

use crate::data::{AreaId, EnrichedRecord, Grade};

/// Number of equal-width histogram bins.
pub const BIN_COUNT: usize = 10;

/// One row of the ranked list shown next to the map. Serialized with the
/// same `area_id` key the map layers carry, so the UI can hand it back on hover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub area_id: AreaId,
    pub value: f64,
    pub grade: Grade,
}

/// Distribution summary of one field for the active step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDistribution {
    pub field: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub bins: [usize; BIN_COUNT],
    pub total_count: usize,
    /// Ascending by value; ties keep input order.
    pub ranked_list: Vec<RankedEntry>,
}

/// Summarize the finite values of `field`, or `None` when there are none.
///
/// Quartiles use nearest-rank indexing (`sorted[floor(n * p)]`) without
/// interpolation. The histogram spans `[min, max]` in ten equal bins with
/// `max` itself counted in the last bin; when `min == max` every value lands
/// in the first bin.
pub fn compute_step_distribution(records: &[EnrichedRecord], field: &str) -> Option<StepDistribution> {
    let mut ranked: Vec<RankedEntry> = records.iter()
        .filter_map(|r| r.metric(field).map(|value| RankedEntry {
            area_id: r.area_id().clone(),
            value,
            grade: r.grade(),
        }))
        .collect();
    if ranked.is_empty() { return None }

    // stable, so equal values keep input order
    ranked.sort_by(|a, b| a.value.total_cmp(&b.value));

    let n = ranked.len();
    let rank = |p: f64| ranked[((n as f64 * p).floor() as usize).min(n - 1)].value;
    let (q1, median, q3) = (rank(0.25), rank(0.5), rank(0.75));
    let (min, max) = (ranked[0].value, ranked[n - 1].value);

    // halved so `max - min` cannot overflow near ±f64::MAX
    let mut bins = [0usize; BIN_COUNT];
    let half_width = (max / 2.0 - min / 2.0) / BIN_COUNT as f64;
    for entry in &ranked {
        let idx = if half_width > 0.0 {
            (((entry.value / 2.0 - min / 2.0) / half_width).floor() as usize).min(BIN_COUNT - 1)
        } else {
            0
        };
        bins[idx] += 1;
    }

    Some(StepDistribution {
        field: field.to_string(),
        min,
        q1,
        median,
        q3,
        max,
        bins,
        total_count: n,
        ranked_list: ranked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, SourceRecord};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn dataset(values: &[Value]) -> Dataset {
        let grades = ["A", "B", "C", "D"];
        let records = values.iter().enumerate()
            .map(|(i, v)| serde_json::from_value::<SourceRecord>(json!({
                "area_id": format!("z{i}"), "zone_idx": i, "grade": grades[i % 4], "pct": v,
            })).unwrap())
            .collect();
        Dataset::from_records(records, None)
    }

    #[test]
    fn nearest_rank_quartiles() {
        let values: Vec<Value> = (1..=10).rev().map(|v| json!(v)).collect();
        let d = compute_step_distribution(dataset(&values).records(), "pct").unwrap();
        assert_eq!((d.min, d.q1, d.median, d.q3, d.max), (1.0, 3.0, 6.0, 8.0, 10.0));
        assert_eq!(d.total_count, 10);
    }

    #[test]
    fn histogram_clamps_top_edge_into_last_bin() {
        let values: Vec<Value> = (0..=10).map(|v| json!(v)).collect();
        let d = compute_step_distribution(dataset(&values).records(), "pct").unwrap();
        assert_eq!(d.bins, [1, 1, 1, 1, 1, 1, 1, 1, 1, 2]);
        assert_eq!(d.bins.iter().sum::<usize>(), d.total_count);
    }

    #[test]
    fn ranked_list_is_ascending_and_skips_missing() {
        let ds = dataset(&[json!(3.5), json!(null), json!(1.0), json!("n/a"), json!(2.0)]);
        let d = compute_step_distribution(ds.records(), "pct").unwrap();
        let ranked: Vec<(&str, f64, Grade)> = d.ranked_list.iter()
            .map(|e| (e.area_id.as_str(), e.value, e.grade))
            .collect();
        assert_eq!(ranked, vec![("z2", 1.0, Grade::C), ("z4", 2.0, Grade::A), ("z0", 3.5, Grade::A)]);
        assert_eq!(d.total_count, 3);
    }

    #[test]
    fn ties_keep_input_order() {
        let d = compute_step_distribution(dataset(&[json!(1), json!(0), json!(1)]).records(), "pct").unwrap();
        let ids: Vec<_> = d.ranked_list.iter().map(|e| e.area_id.as_str()).collect();
        assert_eq!(ids, ["z1", "z0", "z2"]);
    }

    #[test]
    fn extreme_range_puts_max_in_last_bin() {
        let d = compute_step_distribution(dataset(&[json!(-1e308), json!(1e308)]).records(), "pct").unwrap();
        assert_eq!(d.bins, [1, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn constant_values_fill_first_bin() {
        let d = compute_step_distribution(dataset(&[json!(4), json!(4)]).records(), "pct").unwrap();
        assert_eq!(d.bins[0], 2);
        assert_eq!((d.min, d.median, d.max), (4.0, 4.0, 4.0));
    }

    #[test]
    fn single_value() {
        let d = compute_step_distribution(dataset(&[json!(9)]).records(), "pct").unwrap();
        assert_eq!((d.q1, d.median, d.q3), (9.0, 9.0, 9.0));
    }

    #[test]
    fn no_values_no_distribution() {
        assert_eq!(compute_step_distribution(dataset(&[json!(null)]).records(), "pct"), None);
        assert_eq!(compute_step_distribution(dataset(&[json!(1)]).records(), "other"), None);
    }

    #[test]
    fn serializes_for_the_list_view() {
        let d = compute_step_distribution(dataset(&[json!(2)]).records(), "pct").unwrap();
        let value = serde_json::to_value(&d).unwrap();
        assert_eq!(value["rankedList"][0], json!({ "area_id": "z0", "value": 2.0, "grade": "A" }));
        assert_eq!(value["totalCount"], json!(1));
    }
}
