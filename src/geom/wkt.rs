//! Reader for the POLYGON / MULTIPOLYGON subset of well-known text.

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};

/// Parenthesised WKT body: either a coordinate tuple or a list of nested groups.
#[derive(Debug)]
enum Nest {
    Tuple(Vec<f64>),
    Group(Vec<Nest>),
}

/// Parse POLYGON or MULTIPOLYGON text into a MultiPolygon.
/// Malformed or empty input yields an empty MultiPolygon; the reason is logged.
pub fn parse_geometry(wkt: &str) -> MultiPolygon<f64> {
    match try_parse_geometry(wkt) {
        Ok(shape) => shape,
        Err(e) => {
            tracing::debug!(error = %e, "discarding unparseable geometry");
            MultiPolygon(Vec::new())
        }
    }
}

/// Parse POLYGON or MULTIPOLYGON text, reporting why the input was rejected.
/// `POLYGON EMPTY` / `MULTIPOLYGON EMPTY` parse to an empty MultiPolygon.
pub fn try_parse_geometry(wkt: &str) -> Result<MultiPolygon<f64>> {
    let text = wkt.trim();
    if text.is_empty() { bail!("[geom::wkt] empty geometry text") }

    let split = text.find(|c: char| c == '(' || c.is_whitespace()).unwrap_or(text.len());
    let (tag, body) = text.split_at(split);
    let body = body.trim();

    if body.eq_ignore_ascii_case("EMPTY") {
        return match tag.to_ascii_uppercase().as_str() {
            "POLYGON" | "MULTIPOLYGON" => Ok(MultiPolygon(Vec::new())),
            other => Err(anyhow!("[geom::wkt] unsupported geometry type {other:?}")),
        };
    }

    let nest = Parser::new(body).parse_root()
        .with_context(|| format!("[geom::wkt] malformed {tag} body"))?;

    match tag.to_ascii_uppercase().as_str() {
        "POLYGON" => Ok(MultiPolygon(vec![polygon_from(nest)?])),
        "MULTIPOLYGON" => {
            let polygons = groups(nest, "multipolygon")?
                .into_iter()
                .map(polygon_from)
                .collect::<Result<Vec<_>>>()?;
            Ok(MultiPolygon(polygons))
        }
        other => Err(anyhow!("[geom::wkt] unsupported geometry type {other:?}")),
    }
}

/// Unwrap a Group, failing on a bare tuple where a list was required.
fn groups(nest: Nest, what: &str) -> Result<Vec<Nest>> {
    match nest {
        Nest::Group(items) if !items.is_empty() => Ok(items),
        Nest::Group(_) => bail!("[geom::wkt] empty {what}"),
        Nest::Tuple(_) => bail!("[geom::wkt] expected a parenthesised {what}, found a coordinate"),
    }
}

/// Build one polygon from `((x y, ...), (x y, ...))`: first ring exterior, rest holes.
fn polygon_from(nest: Nest) -> Result<Polygon<f64>> {
    let mut rings = groups(nest, "polygon")?
        .into_iter()
        .map(ring_from)
        .collect::<Result<Vec<_>>>()?;
    let exterior = rings.remove(0);
    // geo closes any open ring here
    Ok(Polygon::new(exterior, rings))
}

fn ring_from(nest: Nest) -> Result<LineString<f64>> {
    let coords = groups(nest, "ring")?
        .into_iter()
        .map(|point| match point {
            Nest::Tuple(values) if values.len() >= 2 => Ok(Coord { x: values[0], y: values[1] }),
            Nest::Tuple(values) => bail!("[geom::wkt] point has {} coordinate(s), expected 2", values.len()),
            Nest::Group(_) => bail!("[geom::wkt] ring nested too deeply"),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(LineString::from(coords))
}

/// Recursive-descent reader over the parenthesised body.
struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self { Self { src, pos: 0 } }

    fn rest(&self) -> &'a str { &self.src[self.pos..] }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.rest().chars().next()
    }

    fn expect(&mut self, want: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == want => { self.pos += c.len_utf8(); Ok(()) }
            Some(c) => bail!("expected '{want}' at byte {}, found '{c}'", self.pos),
            None => bail!("expected '{want}' at byte {}, found end of input", self.pos),
        }
    }

    fn parse_root(&mut self) -> Result<Nest> {
        let nest = self.parse_group()?;
        if let Some(c) = self.peek() {
            bail!("trailing '{c}' at byte {}", self.pos);
        }
        Ok(nest)
    }

    fn parse_group(&mut self) -> Result<Nest> {
        self.expect('(')?;
        let mut items = Vec::new();
        loop {
            let item = match self.peek() {
                Some('(') => self.parse_group()?,
                Some(_) => self.parse_tuple()?,
                None => bail!("unclosed '(' at end of input"),
            };
            items.push(item);
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') => { self.pos += 1; return Ok(Nest::Group(items)) }
                Some(c) => bail!("unexpected '{c}' at byte {}", self.pos),
                None => bail!("unclosed '(' at end of input"),
            }
        }
    }

    /// Whitespace-separated numbers up to the next ',' or ')'.
    fn parse_tuple(&mut self) -> Result<Nest> {
        let rest = self.rest();
        let end = rest.find([',', ')', '(']).unwrap_or(rest.len());
        let values = rest[..end]
            .split_whitespace()
            .map(|token| {
                let value: f64 = token.parse()
                    .map_err(|_| anyhow!("invalid coordinate {token:?} at byte {}", self.pos))?;
                if !value.is_finite() { bail!("non-finite coordinate {token:?}") }
                Ok(value)
            })
            .collect::<Result<Vec<_>>>()?;
        if values.is_empty() { bail!("empty coordinate at byte {}", self.pos) }
        self.pos += end;
        Ok(Nest::Tuple(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_square_polygon_keeps_five_points() {
        let shape = try_parse_geometry("POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))").unwrap();
        assert_eq!(shape.0.len(), 1);
        let ring = shape.0[0].exterior();
        assert_eq!(ring.0.len(), 5);
        assert_eq!(ring.0.first(), ring.0.last());
        assert!(shape.0[0].interiors().is_empty());
    }

    #[test]
    fn open_ring_is_closed() {
        let shape = try_parse_geometry("POLYGON((0 0,2 0,2 2,0 2))").unwrap();
        let ring = shape.0[0].exterior();
        assert_eq!(ring.0.len(), 5);
        assert_eq!(ring.0[0], ring.0[4]);
    }

    #[test]
    fn multipolygon_with_hole() {
        let wkt = "MULTIPOLYGON (((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 4 2, 4 4, 2 4, 2 2)), \
                   ((20 20, 21 20, 21 21, 20 21, 20 20)))";
        let shape = try_parse_geometry(wkt).unwrap();
        assert_eq!(shape.0.len(), 2);
        assert_eq!(shape.0[0].interiors().len(), 1);
        assert_eq!(shape.0[1].exterior().0[1], Coord { x: 21.0, y: 20.0 });
    }

    #[test]
    fn lowercase_tag_and_negative_coordinates() {
        let shape = try_parse_geometry("multipolygon(((-71.1 42.3,-71.0 42.3,-71.0 42.4,-71.1 42.3)))").unwrap();
        assert_eq!(shape.0[0].exterior().0[0], Coord { x: -71.1, y: 42.3 });
    }

    #[test]
    fn extra_ordinates_are_ignored() {
        let shape = try_parse_geometry("POLYGON ((0 0 5, 1 0 5, 1 1 5, 0 0 5))").unwrap();
        assert_eq!(shape.0[0].exterior().0[2], Coord { x: 1.0, y: 1.0 });
    }

    #[test]
    fn empty_keyword_parses_to_nothing() {
        assert!(try_parse_geometry("POLYGON EMPTY").unwrap().0.is_empty());
        assert!(try_parse_geometry("MULTIPOLYGON EMPTY").unwrap().0.is_empty());
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for wkt in [
            "",
            "POINT (1 2)",
            "POLYGON ((0 0, 1 0, 1 1, 0 0)",
            "POLYGON ((0 0, 1 x, 1 1, 0 0))",
            "POLYGON ((0, 1 0, 1 1, 0 0))",
            "POLYGON (0 0, 1 0, 1 1, 0 0)",
            "POLYGON (())",
            "POLYGON ((0 0, 1 0, 1 1, 0 0)) junk",
            "MULTIPOLYGON ((0 0, 1 0, 1 1, 0 0))",
        ] {
            assert!(try_parse_geometry(wkt).is_err(), "accepted {wkt:?}");
            assert!(parse_geometry(wkt).0.is_empty());
        }
    }
}
