use ahash::AHashMap;

use crate::data::AreaId;
use crate::render::{FeatureId, RenderedFeature};

/// Append-only `area_id <-> engine feature id` correspondence for one session.
/// No feature id is ever claimed by two different areas.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    by_area: AHashMap<AreaId, FeatureId>,
    by_feature: AHashMap<FeatureId, AreaId>,
}

impl IdentityMap {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn len(&self) -> usize { self.by_area.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.by_area.is_empty() }

    #[inline] pub fn resolve(&self, area: &AreaId) -> Option<FeatureId> { self.by_area.get(area).copied() }

    /// Reverse lookup, for hovers that start on the map.
    #[inline] pub fn area_of(&self, id: FeatureId) -> Option<&AreaId> { self.by_feature.get(&id) }

    /// Record one pair. Returns `false` (and keeps the existing entry) when
    /// either side is already mapped.
    pub fn insert(&mut self, area: AreaId, id: FeatureId) -> bool {
        if self.by_area.contains_key(&area) {
            return false;
        }
        if let Some(owner) = self.by_feature.get(&id) {
            tracing::warn!(area_id = %area, feature_id = %id, owner = %owner, "feature id already mapped");
            return false;
        }
        self.by_feature.insert(id, area.clone());
        self.by_area.insert(area, id);
        true
    }

    /// Record every `(area_id, id)` pair observed on materialized features.
    /// Features lacking either half are skipped. Returns how many pairs were new.
    pub fn populate<'a>(&mut self, features: impl IntoIterator<Item = &'a RenderedFeature>) -> usize {
        features.into_iter()
            .filter_map(|f| {
                let id = f.id?;
                let area = AreaId::from_json(f.properties.get("area_id")?)?;
                Some((area, id))
            })
            .filter(|(area, id)| self.insert(area.clone(), *id))
            .count()
    }

    /// Forget every pair; only done on a full remount.
    pub fn clear(&mut self) {
        self.by_area.clear();
        self.by_feature.clear();
    }
}
