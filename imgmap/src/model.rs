use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::MapError;
use crate::geometry::limits;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Outline kind of a region. Names the renderer does not know are kept as
/// `Unknown` so they can be skipped instead of rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Shape {
    Rect,
    Circle,
    Poly,
    Unknown(String),
}

impl From<String> for Shape {
    fn from(name: String) -> Self {
        match name.as_str() {
            "rect" => Shape::Rect,
            "circle" => Shape::Circle,
            "poly" | "polygon" => Shape::Poly,
            _ => Shape::Unknown(name),
        }
    }
}

impl From<&str> for Shape {
    fn from(name: &str) -> Self {
        Shape::from(name.to_string())
    }
}

impl From<Shape> for String {
    fn from(shape: Shape) -> String {
        shape.as_str().to_string()
    }
}

impl Shape {
    pub fn as_str(&self) -> &str {
        match self {
            Shape::Rect => "rect",
            Shape::Circle => "circle",
            Shape::Poly => "poly",
            Shape::Unknown(name) => name,
        }
    }

    /// Whether `len` coordinates describe a well-formed outline of this kind.
    pub fn accepts(&self, len: usize) -> bool {
        match self {
            Shape::Rect => len == 4,
            Shape::Circle => len == 3,
            Shape::Poly => len >= 6 && len % 2 == 0,
            Shape::Unknown(_) => true,
        }
    }
}

/// Persistent highlight of a region. On the wire this is the optional
/// `preFillColor` field; an empty color counts as no highlight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    Normal,
    Highlighted(String),
}

impl Highlight {
    pub fn is_normal(&self) -> bool {
        matches!(self, Highlight::Normal)
    }

    pub fn is_highlighted(&self) -> bool {
        !self.is_normal()
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Highlight::Normal => None,
            Highlight::Highlighted(color) => Some(color),
        }
    }
}

impl From<Option<String>> for Highlight {
    fn from(color: Option<String>) -> Self {
        match color {
            Some(c) if !c.is_empty() => Highlight::Highlighted(c),
            _ => Highlight::Normal,
        }
    }
}

mod pre_fill {
    use super::*;

    pub fn serialize<S: Serializer>(h: &Highlight, s: S) -> Result<S::Ok, S::Error> {
        h.color().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Highlight, D::Error> {
        Option::<String>::deserialize(d).map(Highlight::from)
    }
}

fn default_true() -> bool {
    true
}

/// One clickable hotspot. Author fields the model does not name (for
/// example `id`, or whatever field is configured as the key) are kept in
/// `attrs` and round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub shape: Shape,
    pub coords: Vec<f64>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, rename = "href", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(
        default,
        rename = "preFillColor",
        skip_serializing_if = "Highlight::is_normal",
        with = "pre_fill"
    )]
    pub highlight: Highlight,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl Region {
    pub fn new(shape: impl Into<Shape>, coords: Vec<f64>) -> Self {
        Region {
            shape: shape.into(),
            coords,
            active: true,
            disabled: false,
            link: None,
            fill_color: None,
            stroke_color: None,
            line_width: None,
            highlight: Highlight::Normal,
            attrs: Map::new(),
        }
    }

    pub fn with_id(self, id: impl Into<Value>) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn with_fill(mut self, color: &str) -> Self {
        self.fill_color = Some(color.to_string());
        self
    }

    pub fn with_highlight(mut self, color: &str) -> Self {
        self.highlight = Highlight::Highlighted(color.to_string());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Value of the configured key field, if the author supplied one.
    pub fn key(&self, field: &str) -> Option<&Value> {
        self.attrs.get(field).filter(|v| !v.is_null())
    }

    /// Same region with the persistent highlight dropped; used to compare
    /// maps independent of highlight state.
    pub fn without_highlight(&self) -> Region {
        Region {
            highlight: Highlight::Normal,
            ..self.clone()
        }
    }
}

/// Identity of a region inside a map: the configured key field when present,
/// otherwise its position.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegionKey {
    Named(Value),
    Position(usize),
}

impl std::fmt::Display for RegionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionKey::Named(Value::String(s)) => write!(f, "{s}"),
            RegionKey::Named(v) => write!(f, "{v}"),
            RegionKey::Position(i) => write!(f, "{i}"),
        }
    }
}

/// Named, ordered collection of regions. Order is paint and z order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionMap {
    pub name: String,
    #[serde(rename = "areas", alias = "regions", default)]
    pub regions: Vec<Region>,
}

impl RegionMap {
    pub fn new(name: impl Into<String>, regions: Vec<Region>) -> Self {
        RegionMap { name: name.into(), regions }
    }

    pub fn from_json_str(s: &str, key_field: &str) -> Result<RegionMap, MapError> {
        let map: RegionMap = serde_json::from_str(s)?;
        map.validate(key_field)?;
        Ok(map)
    }

    pub fn from_json_value(v: Value, key_field: &str) -> Result<RegionMap, MapError> {
        let map: RegionMap = serde_json::from_value(v)?;
        map.validate(key_field)?;
        Ok(map)
    }

    pub fn to_json_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn key_of(&self, index: usize, field: &str) -> RegionKey {
        match self.regions.get(index).and_then(|r| r.key(field)) {
            Some(v) => RegionKey::Named(v.clone()),
            None => RegionKey::Position(index),
        }
    }

    pub fn position_of(&self, key: &RegionKey, field: &str) -> Option<usize> {
        (0..self.regions.len()).find(|&i| self.key_of(i, field) == *key)
    }

    pub fn find(&self, key: &RegionKey, field: &str) -> Option<&Region> {
        self.position_of(key, field).map(|i| &self.regions[i])
    }

    pub fn highlighted(&self) -> impl Iterator<Item = (usize, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, r)| r.highlight.is_highlighted())
    }

    /// Equality ignoring every region's highlight.
    pub fn same_outline(&self, other: &RegionMap) -> bool {
        self.name == other.name
            && self.regions.len() == other.regions.len()
            && self
                .regions
                .iter()
                .zip(&other.regions)
                .all(|(a, b)| a.without_highlight() == b.without_highlight())
    }

    /// Strict ingest checks: size caps, finite in-bounds coordinates, shape
    /// arity and key uniqueness. Unknown shapes pass; the renderer skips them.
    pub fn validate(&self, key_field: &str) -> Result<(), MapError> {
        if self.regions.len() > limits::MAX_REGIONS {
            return Err(MapError::TooManyRegions {
                count: self.regions.len(),
                max: limits::MAX_REGIONS,
            });
        }
        let mut total = 0usize;
        let mut seen: Vec<(&Value, usize)> = Vec::new();
        for (index, region) in self.regions.iter().enumerate() {
            let count = region.coords.len();
            total += count;
            if count > limits::MAX_COORDS_PER_REGION || total > limits::MAX_COORDS_TOTAL {
                return Err(MapError::TooManyCoords { index, count });
            }
            if let Some(position) = region.coords.iter().position(|c| !limits::in_coord_bounds(*c)) {
                return Err(MapError::CoordOutOfBounds { index, position });
            }
            if !region.shape.accepts(count) {
                return Err(MapError::BadCoordCount {
                    index,
                    shape: region.shape.as_str().to_string(),
                    got: count,
                });
            }
            if let Some(width) = region.line_width {
                if !limits::in_width_bounds(width) {
                    return Err(MapError::LineWidth { index, width });
                }
            }
            if let Some(key) = region.key(key_field) {
                if let Some((_, first)) = seen.iter().find(|(k, _)| *k == key) {
                    return Err(MapError::DuplicateKey {
                        key: RegionKey::Named(key.clone()).to_string(),
                        index,
                        first: *first,
                    });
                }
                seen.push((key, index));
            }
        }
        Ok(())
    }
}

/// A region as shown right now: author data plus display-space geometry.
/// Rebuilt on demand, never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRegion {
    pub index: usize,
    pub key: RegionKey,
    #[serde(flatten)]
    pub region: Region,
    pub scaled_coords: Vec<f64>,
    pub center: [f64; 2],
}

impl DisplayRegion {
    /// Scaled coordinates in the comma separated form of an HTML `<area>`.
    pub fn html_coords(&self) -> String {
        self.scaled_coords
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
