use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::EnrichedRecord;

/// Observed range of one numeric field. Always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    fn new(value: f64) -> Self { Self { min: value, max: value } }

    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Denominator used for normalization; a degenerate range divides by 1.
    /// Saturates to infinity for ranges wider than `f64::MAX`.
    #[inline]
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 { 1.0 } else { span }
    }

    /// Half of [`FieldRange::span`], finite for any finite `min` and `max`.
    #[inline]
    pub(crate) fn half_span(&self) -> f64 {
        let half = self.max / 2.0 - self.min / 2.0;
        if half == 0.0 { 0.5 } else { half }
    }

    /// `(value - min) / span`, clamped to `[0, 1]`. Both sides are halved
    /// first so ranges near `±f64::MAX` do not overflow.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        ((value / 2.0 - self.min / 2.0) / self.half_span()).clamp(0.0, 1.0)
    }
}

/// Dataset-wide min/max per numeric field. Fields without a single finite
/// value are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldStatistics {
    ranges: BTreeMap<String, FieldRange>,
}

impl FieldStatistics {
    #[inline] pub fn get(&self, field: &str) -> Option<&FieldRange> { self.ranges.get(field) }

    #[inline] pub fn len(&self) -> usize { self.ranges.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.ranges.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRange)> {
        self.ranges.iter().map(|(name, range)| (name.as_str(), range))
    }
}

/// Single pass over every record, skipping non-numeric and non-finite values.
pub fn compute_field_statistics(records: &[EnrichedRecord]) -> FieldStatistics {
    let mut ranges: BTreeMap<String, FieldRange> = BTreeMap::new();
    for (name, value) in records.iter().flat_map(|r| r.source.metrics()) {
        match ranges.get_mut(name) {
            Some(range) => range.include(value),
            None => { ranges.insert(name.to_string(), FieldRange::new(value)); }
        }
    }
    FieldStatistics { ranges }
}
