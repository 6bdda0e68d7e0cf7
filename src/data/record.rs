use std::{collections::BTreeMap, fmt, sync::Arc};

use geo::{Coord, MultiPolygon};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stable identifier of a redlining zone, as carried by the source data.
/// Source files store it either as a JSON string or a JSON integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaId(Arc<str>);

impl AreaId {
    pub fn new(id: impl AsRef<str>) -> Self { Self(Arc::from(id.as_ref())) }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }

    /// Read an area id out of a JSON value (string or number), as found in
    /// feature properties handed back by the map engine.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::new(s)),
            Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => Some(Self::new(i.to_string())),
                (_, Some(u), _) => Some(Self::new(u.to_string())),
                (_, _, Some(f)) if f.is_finite() => Some(Self::new(f.to_string())),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl Serialize for AreaId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AreaId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        AreaId::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("area_id must be a string or number, got {value}")))
    }
}

/// Historic HOLC grade. Absent or unrecognised grades collapse to `Ungraded`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    A,
    B,
    C,
    D,
    #[default]
    Ungraded,
}

impl Grade {
    /// Sentinel label written for records without a usable grade.
    pub const SENTINEL: &'static str = "N/A";

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Grade::A,
            "B" => Grade::B,
            "C" => Grade::C,
            "D" => Grade::D,
            _ => Grade::Ungraded,
        }
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::Ungraded => Self::SENTINEL,
        }
    }
}

impl Serialize for Grade {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Grade::from_str(&s),
            _ => Grade::Ungraded,
        })
    }
}

/// One input row: a redlining zone with its raw WKT geometry and metric fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceRecord {
    pub area_id: AreaId,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub grade: Grade,
    pub zone_idx: i64,
    #[serde(default)]
    pub geometry: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Every other key in the row; metric fields live here.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl SourceRecord {
    /// Finite numeric value of `field`. Strings are never coerced.
    pub fn metric(&self, field: &str) -> Option<f64> {
        self.fields.get(field)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    /// Finite numeric fields of this record.
    pub fn metrics(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().filter_map(|(name, value)| {
            value.as_f64().filter(|v| v.is_finite()).map(|v| (name.as_str(), v))
        })
    }
}

/// A source record with its parsed shape and derived centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub source: SourceRecord,
    /// Empty when the geometry text could not be parsed.
    pub shape: MultiPolygon<f64>,
    /// (lng, lat) anchor for the extrusion cell.
    pub centroid: Option<Coord<f64>>,
}

impl EnrichedRecord {
    #[inline] pub fn area_id(&self) -> &AreaId { &self.source.area_id }

    #[inline] pub fn grade(&self) -> Grade { self.source.grade }

    #[inline] pub fn metric(&self, field: &str) -> Option<f64> { self.source.metric(field) }

    #[inline] pub fn has_shape(&self) -> bool { !self.shape.0.is_empty() }
}
