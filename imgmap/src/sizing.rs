//! Resolves how large the overlay and the image element are drawn.
//!
//! Each axis is decided independently: responsive layouts follow the parent
//! width, `natural` pins the intrinsic size, a configured dimension wins next,
//! and otherwise the image's rendered (client) size is used.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::MapperConfig;
use crate::model::Size;

/// Measurements of the loaded image element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageInfo {
    pub natural_width: f64,
    pub natural_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl ImageInfo {
    pub fn new(natural: Size, client: Size) -> Self {
        ImageInfo {
            natural_width: natural.width,
            natural_height: natural.height,
            client_width: client.width,
            client_height: client.height,
        }
    }
}

pub type ComputeFn = Rc<dyn Fn(&ImageInfo) -> f64>;

/// Configured width or height. A literal `0` means unset.
#[derive(Clone, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Px(f64),
    Computed(ComputeFn),
}

impl Dimension {
    pub fn computed(f: impl Fn(&ImageInfo) -> f64 + 'static) -> Self {
        Dimension::Computed(Rc::new(f))
    }

    pub fn is_set(&self) -> bool {
        match self {
            Dimension::Auto => false,
            Dimension::Px(v) => *v != 0.0 && !v.is_nan(),
            Dimension::Computed(_) => true,
        }
    }

    /// Pixel value of this dimension. Computed values that are not finite
    /// and positive are rejected so callers fall back to measured sizes.
    pub fn resolve(&self, image: Option<&ImageInfo>) -> Option<f64> {
        match self {
            Dimension::Auto => None,
            Dimension::Px(v) => self.is_set().then_some(*v),
            Dimension::Computed(f) => {
                let v = f(image?);
                if v.is_finite() && v > 0.0 {
                    Some(v)
                } else {
                    log::warn!("computed dimension returned {v}; using measured size");
                    None
                }
            }
        }
    }

    /// Identity comparison: literals by value, functions by pointer.
    pub fn same_as(&self, other: &Dimension) -> bool {
        match (self, other) {
            (Dimension::Auto, Dimension::Auto) => true,
            (Dimension::Px(a), Dimension::Px(b)) => a == b,
            (Dimension::Computed(a), Dimension::Computed(b)) => Rc::ptr_eq(a, b),
            (a, b) => !a.is_set() && !b.is_set(),
        }
    }
}

impl fmt::Debug for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Auto => write!(f, "Auto"),
            Dimension::Px(v) => write!(f, "Px({v})"),
            Dimension::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

impl From<f64> for Dimension {
    fn from(v: f64) -> Self {
        Dimension::Px(v)
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Dimension::Px(v) if self.is_set() => s.serialize_f64(*v),
            _ => s.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(match Option::<f64>::deserialize(d)? {
            Some(v) if v != 0.0 => Dimension::Px(v),
            _ => Dimension::Auto,
        })
    }
}

/// Explicit size for the image element; `None` lets it size itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ImageSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Sizing {
    /// Overlay surface and container size.
    pub canvas: Size,
    pub image: ImageSize,
}

fn resolve_width(config: &MapperConfig, image: &ImageInfo, measure: Option<f64>) -> f64 {
    if config.responsive && config.parent_width > 0.0 {
        return config.parent_width;
    }
    if config.natural {
        return image.natural_width;
    }
    measure.unwrap_or(image.client_width)
}

fn resolve_height(config: &MapperConfig, image: &ImageInfo, measure: Option<f64>) -> f64 {
    if config.responsive {
        return image.client_height;
    }
    if config.natural {
        return image.natural_height;
    }
    measure.unwrap_or(image.client_height)
}

pub fn resolve(config: &MapperConfig, image: &ImageInfo) -> Sizing {
    let width = config.width.resolve(Some(image));
    let height = config.height.resolve(Some(image));
    let canvas = Size {
        width: resolve_width(config, image, width),
        height: resolve_height(config, image, height),
    };
    let image_size = ImageSize {
        width: (config.width.is_set() || config.responsive).then_some(canvas.width),
        height: (config.height.is_set() || config.responsive).then_some(canvas.height),
    };
    Sizing { canvas, image: image_size }
}
