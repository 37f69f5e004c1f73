use crate::config::MapperConfig;
use crate::geometry::tolerance::safe_div;
use crate::model::Shape;
use crate::sizing::ImageInfo;

/// Author space to display space conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scaler {
    /// Responsive layout: divide by `natural_width / parent_width`, read
    /// from the current values on every call.
    Fluid { natural_width: f64, parent_width: f64 },
    /// Multiply by `display_width / img_width`.
    Fixed { factor: f64 },
}

impl Default for Scaler {
    fn default() -> Self {
        Scaler::Fixed { factor: 1.0 }
    }
}

impl Scaler {
    pub fn new(config: &MapperConfig, image: Option<&ImageInfo>) -> Scaler {
        if config.responsive && config.parent_width > 0.0 {
            if let Some(image) = image.filter(|i| i.natural_width > 0.0) {
                return Scaler::Fluid {
                    natural_width: image.natural_width,
                    parent_width: config.parent_width,
                };
            }
        }
        match config.width.resolve(image) {
            Some(width) if config.img_width > 0.0 => Scaler::Fixed {
                factor: width / config.img_width,
            },
            _ => Scaler::default(),
        }
    }

    pub fn scale_one(&self, coord: f64) -> f64 {
        match *self {
            Scaler::Fluid { natural_width, parent_width } => coord / (natural_width / parent_width),
            Scaler::Fixed { factor } => coord * factor,
        }
    }

    pub fn scale(&self, coords: &[f64]) -> Vec<f64> {
        coords.iter().map(|c| self.scale_one(*c)).collect()
    }
}

/// Display-space anchor of a shape: the center of a circle, otherwise the
/// mean of its points.
pub fn center(shape: &Shape, scaled: &[f64]) -> [f64; 2] {
    match (shape, scaled) {
        (Shape::Circle, [cx, cy, ..]) => [*cx, *cy],
        _ => {
            let n = scaled.len() as f64 / 2.0;
            let (sx, sy) = scaled
                .iter()
                .enumerate()
                .fold((0.0, 0.0), |(x, y), (i, v)| if i % 2 == 0 { (x + v, y) } else { (x, y + v) });
            [safe_div(sx, n, 0.0), safe_div(sy, n, 0.0)]
        }
    }
}
