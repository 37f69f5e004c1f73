//! Overlay controller: ties sizing, scaling, highlight state and painting
//! together behind explicit event entry points.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithms::picking;
use crate::config::{needs_resync, MapperConfig};
use crate::draw::{self, Paint, Surface};
use crate::error::MapError;
use crate::highlight::{ClickOutcome, HighlightState};
use crate::model::{DisplayRegion, Point, Region, RegionMap, Size};
use crate::scale::{self, Scaler};
use crate::sizing::{self, ImageInfo, Sizing};

/// Pointer and touch events delivered for a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    MouseEnter,
    MouseLeave,
    MouseMove,
    MouseDown,
    MouseUp,
    Click,
    TouchStart,
    TouchEnd,
}

impl PointerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointerKind::MouseEnter => "mouseenter",
            PointerKind::MouseLeave => "mouseleave",
            PointerKind::MouseMove => "mousemove",
            PointerKind::MouseDown => "mousedown",
            PointerKind::MouseUp => "mouseup",
            PointerKind::Click => "click",
            PointerKind::TouchStart => "touchstart",
            PointerKind::TouchEnd => "touchend",
        }
    }
}

impl FromStr for PointerKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "mouseenter" => PointerKind::MouseEnter,
            "mouseleave" => PointerKind::MouseLeave,
            "mousemove" => PointerKind::MouseMove,
            "mousedown" => PointerKind::MouseDown,
            "mouseup" => PointerKind::MouseUp,
            "click" => PointerKind::Click,
            "touchstart" => PointerKind::TouchStart,
            "touchend" => PointerKind::TouchEnd,
            other => return Err(MapError::UnknownEvent(other.to_string())),
        })
    }
}

/// Host callbacks. Every method defaults to doing nothing.
pub trait MapperListener {
    /// Sizing was resolved for a loaded image.
    fn on_load(&mut self, _size: Size) {}
    fn on_image_click(&mut self, _at: Point) {}
    fn on_image_mouse_move(&mut self, _at: Point) {}
    /// A region event. Return true when the event was handled; for clicks
    /// this tells the host to suppress the default action (link follow).
    fn on_area(&mut self, _kind: PointerKind, _area: &DisplayRegion) -> bool {
        false
    }
}

impl MapperListener for () {}

pub struct ImageMapper<S, L = ()> {
    config: MapperConfig,
    state: HighlightState,
    scaler: Scaler,
    image: Option<ImageInfo>,
    sizing: Sizing,
    surface: Option<S>,
    listener: L,
}

fn paint_highlighted<S: Surface>(
    map: &RegionMap,
    scaler: &Scaler,
    config: &MapperConfig,
    surface: &mut Option<S>,
) {
    for (_, region) in map.highlighted() {
        let Some(fill) = region.highlight.color() else { continue };
        let paint = Paint {
            fill,
            stroke: region.stroke_color.as_deref().unwrap_or(&config.stroke_color),
            line_width: region.line_width.unwrap_or(config.line_width),
        };
        draw::paint(&region.shape, &scaler.scale(&region.coords), &paint, true, surface.as_mut());
    }
}

impl<S: Surface, L: MapperListener> ImageMapper<S, L> {
    pub fn new(config: MapperConfig, map: RegionMap, listener: L) -> Self {
        let scaler = Scaler::new(&config, None);
        ImageMapper {
            state: HighlightState::new(map, &config.area_key_name),
            config,
            scaler,
            image: None,
            sizing: Sizing::default(),
            surface: None,
            listener,
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn working(&self) -> &RegionMap {
        self.state.working()
    }

    pub fn stored(&self) -> &RegionMap {
        self.state.stored()
    }

    pub fn sizing(&self) -> Sizing {
        self.sizing
    }

    pub fn scaler(&self) -> Scaler {
        self.scaler
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Install the overlay surface. Once an image is loaded the surface is
    /// sized and repainted immediately.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        if self.is_loaded() {
            let size = self.sizing.canvas;
            if let Some(s) = self.surface.as_mut() {
                s.resize(size);
            }
            self.repaint();
        }
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// First successful image load: resolve sizing, reset highlight state
    /// from the input map, and paint the pre-filled regions.
    pub fn on_image_loaded(&mut self, image: ImageInfo) -> Sizing {
        log::debug!("image loaded: {image:?}");
        self.image = Some(image);
        self.state.reset();
        self.init_canvas()
    }

    /// New measurements of an already loaded image (layout change). Keeps
    /// highlight state.
    pub fn refresh_image(&mut self, image: ImageInfo) -> Sizing {
        if !self.is_loaded() {
            return self.sizing;
        }
        self.image = Some(image);
        self.init_canvas()
    }

    /// Apply new options and map. Returns false when nothing watched changed
    /// and the map is equal by value; otherwise state is rebuilt from `map`
    /// and, once loaded, sizing is resolved again and the overlay repainted.
    pub fn on_config_changed(&mut self, config: MapperConfig, map: RegionMap) -> bool {
        if !needs_resync(&self.config, self.state.stored(), &config, &map) {
            return false;
        }
        log::debug!(
            "resync: keys={:?} map_changed={}",
            self.config.changed_keys(&config),
            *self.state.stored() != map
        );
        self.state = HighlightState::new(map, &config.area_key_name);
        self.config = config;
        if self.is_loaded() {
            self.init_canvas();
        } else {
            self.scaler = Scaler::new(&self.config, None);
        }
        true
    }

    pub fn set_parent_width(&mut self, width: f64) -> bool {
        let config = MapperConfig {
            parent_width: width,
            ..self.config.clone()
        };
        let map = self.state.stored().clone();
        self.on_config_changed(config, map)
    }

    fn init_canvas(&mut self) -> Sizing {
        let Some(image) = self.image else {
            return self.sizing;
        };
        self.sizing = sizing::resolve(&self.config, &image);
        self.scaler = Scaler::new(&self.config, Some(&image));
        if let Some(s) = self.surface.as_mut() {
            s.resize(self.sizing.canvas);
        }
        self.listener.on_load(self.sizing.canvas);
        self.repaint();
        self.sizing
    }

    /// Clear and paint every highlighted region of the working map.
    pub fn repaint(&mut self) {
        if let Some(s) = self.surface.as_mut() {
            s.clear();
        }
        paint_highlighted(self.state.working(), &self.scaler, &self.config, &mut self.surface);
    }

    /// Clear and paint the pristine input highlights.
    fn update_canvas(&mut self) {
        if let Some(s) = self.surface.as_mut() {
            s.clear();
        }
        paint_highlighted(self.state.stored(), &self.scaler, &self.config, &mut self.surface);
    }

    /// External reset handle: drop all click-made highlights.
    pub fn clear_highlighted_area(&mut self) {
        log::debug!("clear highlighted areas");
        self.state.reset();
        self.update_canvas();
    }

    fn display(&self, index: usize, region: &Region) -> DisplayRegion {
        let scaled_coords = self.scaler.scale(&region.coords);
        DisplayRegion {
            index,
            key: self.state.working().key_of(index, &self.config.area_key_name),
            center: scale::center(&region.shape, &scaled_coords),
            region: region.clone(),
            scaled_coords,
        }
    }

    /// Region `index` of the working map in display space, if it is shown.
    pub fn area(&self, index: usize) -> Option<DisplayRegion> {
        if !self.is_loaded() || self.config.disabled {
            return None;
        }
        let region = self.state.working().regions.get(index)?;
        (!region.disabled).then(|| self.display(index, region))
    }

    /// Regions the host should render as hit areas, in map order.
    pub fn areas(&self) -> Vec<DisplayRegion> {
        if !self.is_loaded() || self.config.disabled {
            return Vec::new();
        }
        self.state
            .working()
            .regions
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.disabled)
            .map(|(i, r)| self.display(i, r))
            .collect()
    }

    pub fn area_at(&self, at: Point) -> Option<usize> {
        picking::pick(&self.areas(), at)
    }

    fn highlight_area(&mut self, area: &DisplayRegion) -> bool {
        let region = &area.region;
        let paint = Paint {
            fill: region.fill_color.as_deref().unwrap_or(&self.config.fill_color),
            stroke: region.stroke_color.as_deref().unwrap_or(&self.config.stroke_color),
            line_width: region.line_width.unwrap_or(self.config.line_width),
        };
        draw::paint(&region.shape, &area.scaled_coords, &paint, region.active, self.surface.as_mut())
    }

    /// Route a region event. Returns true when the host should prevent the
    /// default action.
    pub fn on_pointer(&mut self, kind: PointerKind, index: usize) -> bool {
        let Some(area) = self.area(index) else {
            return false;
        };
        match kind {
            PointerKind::MouseEnter if self.config.active => {
                self.highlight_area(&area);
            }
            PointerKind::MouseLeave if self.config.active => self.repaint(),
            PointerKind::Click => {
                let outcome = self.state.click(index, self.config.policy(), &self.config.fill_color);
                if let ClickOutcome::Committed { repaint: true, .. } = outcome {
                    self.update_canvas();
                    self.highlight_area(&area);
                }
            }
            _ => {}
        }
        let handled = self.listener.on_area(kind, &area);
        kind == PointerKind::Click && handled
    }

    /// Region event addressed by display-space position instead of index.
    pub fn on_pointer_at(&mut self, kind: PointerKind, at: Point) -> Option<bool> {
        let index = self.area_at(at)?;
        Some(self.on_pointer(kind, index))
    }

    pub fn image_click(&mut self, at: Point) {
        self.listener.on_image_click(at);
    }

    pub fn image_mouse_move(&mut self, at: Point) {
        self.listener.on_image_mouse_move(at);
    }
}
