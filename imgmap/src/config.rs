use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::highlight::HighlightPolicy;
use crate::model::RegionMap;
use crate::sizing::Dimension;

pub const DEFAULT_KEY_FIELD: &str = "id";
pub const DEFAULT_FILL: &str = "rgba(255, 255, 255, 0.5)";
pub const DEFAULT_STROKE: &str = "rgba(0, 0, 0, 0.5)";
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Mapper options. Field names follow the camelCase JSON the host passes in;
/// anything missing takes the default.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapperConfig {
    pub src: String,
    pub area_key_name: String,
    /// Map-level switch for hover highlighting.
    pub active: bool,
    /// Hide all areas.
    pub disabled: bool,
    pub fill_color: String,
    pub stroke_color: String,
    pub line_width: f64,
    /// Width the region coordinates were authored against.
    pub img_width: f64,
    pub width: Dimension,
    pub height: Dimension,
    pub natural: bool,
    pub stay_highlighted: bool,
    pub stay_multi_highlighted: bool,
    pub toggle_highlighted: bool,
    /// Extra keys whose change forces a resync.
    pub rerender_props: Vec<ConfigKey>,
    pub responsive: bool,
    pub parent_width: f64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig {
            src: String::new(),
            area_key_name: DEFAULT_KEY_FIELD.to_string(),
            active: true,
            disabled: false,
            fill_color: DEFAULT_FILL.to_string(),
            stroke_color: DEFAULT_STROKE.to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            img_width: 0.0,
            width: Dimension::Auto,
            height: Dimension::Auto,
            natural: false,
            stay_highlighted: false,
            stay_multi_highlighted: false,
            toggle_highlighted: false,
            rerender_props: Vec::new(),
            responsive: false,
            parent_width: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigKey {
    Src,
    AreaKeyName,
    Active,
    Disabled,
    FillColor,
    StrokeColor,
    LineWidth,
    ImgWidth,
    Width,
    Height,
    Natural,
    StayHighlighted,
    StayMultiHighlighted,
    ToggleHighlighted,
    RerenderProps,
    Responsive,
    ParentWidth,
}

impl ConfigKey {
    /// Keys that always force a resync when they change.
    pub const WATCHED: &'static [ConfigKey] = &[
        ConfigKey::Src,
        ConfigKey::Active,
        ConfigKey::Disabled,
        ConfigKey::Width,
        ConfigKey::Height,
        ConfigKey::ImgWidth,
        ConfigKey::FillColor,
        ConfigKey::StrokeColor,
        ConfigKey::LineWidth,
        ConfigKey::Natural,
        ConfigKey::AreaKeyName,
        ConfigKey::StayHighlighted,
        ConfigKey::StayMultiHighlighted,
        ConfigKey::ToggleHighlighted,
        ConfigKey::ParentWidth,
        ConfigKey::Responsive,
    ];
}

impl MapperConfig {
    pub fn from_json_str(s: &str) -> Result<MapperConfig, MapError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn policy(&self) -> HighlightPolicy {
        HighlightPolicy {
            stay: self.stay_highlighted,
            multi: self.stay_multi_highlighted,
            toggle: self.toggle_highlighted,
        }
    }

    pub fn differs(&self, other: &MapperConfig, key: ConfigKey) -> bool {
        match key {
            ConfigKey::Src => self.src != other.src,
            ConfigKey::AreaKeyName => self.area_key_name != other.area_key_name,
            ConfigKey::Active => self.active != other.active,
            ConfigKey::Disabled => self.disabled != other.disabled,
            ConfigKey::FillColor => self.fill_color != other.fill_color,
            ConfigKey::StrokeColor => self.stroke_color != other.stroke_color,
            ConfigKey::LineWidth => self.line_width != other.line_width,
            ConfigKey::ImgWidth => self.img_width != other.img_width,
            ConfigKey::Width => !self.width.same_as(&other.width),
            ConfigKey::Height => !self.height.same_as(&other.height),
            ConfigKey::Natural => self.natural != other.natural,
            ConfigKey::StayHighlighted => self.stay_highlighted != other.stay_highlighted,
            ConfigKey::StayMultiHighlighted => {
                self.stay_multi_highlighted != other.stay_multi_highlighted
            }
            ConfigKey::ToggleHighlighted => self.toggle_highlighted != other.toggle_highlighted,
            ConfigKey::RerenderProps => self.rerender_props != other.rerender_props,
            ConfigKey::Responsive => self.responsive != other.responsive,
            ConfigKey::ParentWidth => self.parent_width != other.parent_width,
        }
    }

    /// Watched keys that differ between `self` and `next`, judged by the
    /// watch list of `next`.
    pub fn changed_keys(&self, next: &MapperConfig) -> Vec<ConfigKey> {
        let mut keys: Vec<ConfigKey> = Vec::new();
        for key in ConfigKey::WATCHED.iter().chain(&next.rerender_props) {
            if !keys.contains(key) && self.differs(next, *key) {
                keys.push(*key);
            }
        }
        keys
    }
}

/// Memoization gate: recompute only when the map differs by value or a
/// watched configuration key changed.
pub fn needs_resync(
    prev: &MapperConfig,
    prev_map: &RegionMap,
    next: &MapperConfig,
    next_map: &RegionMap,
) -> bool {
    prev_map != next_map || !prev.changed_keys(next).is_empty()
}
