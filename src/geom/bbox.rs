use std::sync::OnceLock;

use geo::{BoundingRect, Coord, MultiPolygon, Rect};
use regex::Regex;

/// Midpoint of the axis-aligned bounding box of every ring.
/// This is not an area-weighted centroid; it only anchors a fixed-size marker.
pub fn compute_centroid(shape: &MultiPolygon<f64>) -> Option<Coord<f64>> {
    shape.bounding_rect().map(|rect| rect.center())
}

/// Bounding-box midpoint of every `x y` pair that can be scanned out of raw geometry text.
/// Used when the text is too damaged to parse but still carries coordinates.
pub fn scan_centroid(wkt: &str) -> Option<Coord<f64>> {
    static PAIR: OnceLock<Regex> = OnceLock::new();
    let pair = PAIR.get_or_init(|| {
        Regex::new(r"(-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)\s+(-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)")
            .expect("coordinate pair pattern is valid")
    });

    pair.captures_iter(wkt)
        .filter_map(|caps| {
            let x = caps[1].parse::<f64>().ok()?;
            let y = caps[2].parse::<f64>().ok()?;
            (x.is_finite() && y.is_finite()).then_some(Coord { x, y })
        })
        .fold(None, |acc: Option<Rect<f64>>, c| Some(match acc {
            None => Rect::new(c, c),
            Some(r) => Rect::new(
                Coord { x: r.min().x.min(c.x), y: r.min().y.min(c.y) },
                Coord { x: r.max().x.max(c.x), y: r.max().y.max(c.y) },
            ),
        }))
        .map(|rect| rect.center())
}
