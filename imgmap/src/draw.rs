//! Shape painting against an abstract drawing surface.

use crate::model::{Point, Shape, Size};

/// Fill and stroke used for one shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint<'a> {
    pub fill: &'a str,
    pub stroke: &'a str,
    pub line_width: f64,
}

/// 2D drawing capability the overlay paints through. Every shape is
/// stroked, then filled.
pub trait Surface {
    fn size(&self) -> Size;
    fn resize(&mut self, size: Size);
    /// Erase the whole surface.
    fn clear(&mut self);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint<'_>);
    fn circle(&mut self, cx: f64, cy: f64, r: f64, paint: &Paint<'_>);
    fn polygon(&mut self, points: &[Point], paint: &Paint<'_>);
}

/// Paint `shape` at display-space `coords`. Returns whether anything was
/// drawn: inactive regions, a missing surface, unknown shapes and short
/// coordinate lists are silent no-ops.
pub fn paint<S: Surface + ?Sized>(
    shape: &Shape,
    coords: &[f64],
    paint: &Paint<'_>,
    is_active: bool,
    surface: Option<&mut S>,
) -> bool {
    let surface = match surface {
        Some(s) if is_active => s,
        _ => return false,
    };
    match shape {
        Shape::Rect => match coords {
            [left, top, right, bottom, ..] => {
                surface.rect(*left, *top, right - left, bottom - top, paint);
                true
            }
            _ => false,
        },
        Shape::Circle => match coords {
            [cx, cy, r, ..] => {
                surface.circle(*cx, *cy, *r, paint);
                true
            }
            _ => false,
        },
        Shape::Poly => {
            let points: Vec<Point> = coords
                .chunks_exact(2)
                .map(|p| Point::new(p[0], p[1]))
                .collect();
            if points.is_empty() {
                return false;
            }
            surface.polygon(&points, paint);
            true
        }
        Shape::Unknown(_) => false,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
    pub line_width: f64,
}

impl From<&Paint<'_>> for Style {
    fn from(p: &Paint<'_>) -> Self {
        Style {
            fill: p.fill.to_string(),
            stroke: p.stroke.to_string(),
            line_width: p.line_width,
        }
    }
}

/// What a [`Recorder`] saw, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect { x: f64, y: f64, w: f64, h: f64, style: Style },
    Circle { cx: f64, cy: f64, r: f64, style: Style },
    Polygon { points: Vec<Point>, style: Style },
}

impl DrawCommand {
    pub fn fill(&self) -> Option<&str> {
        match self {
            DrawCommand::Clear => None,
            DrawCommand::Rect { style, .. }
            | DrawCommand::Circle { style, .. }
            | DrawCommand::Polygon { style, .. } => Some(&style.fill),
        }
    }
}

/// Headless surface that records draw calls.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub size: Size,
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    /// Commands issued since the last clear, i.e. what is visible now.
    pub fn visible(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for Recorder {
    fn size(&self) -> Size {
        self.size
    }
    fn resize(&mut self, size: Size) {
        self.size = size;
    }
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint<'_>) {
        self.commands.push(DrawCommand::Rect { x, y, w, h, style: paint.into() });
    }
    fn circle(&mut self, cx: f64, cy: f64, r: f64, paint: &Paint<'_>) {
        self.commands.push(DrawCommand::Circle { cx, cy, r, style: paint.into() });
    }
    fn polygon(&mut self, points: &[Point], paint: &Paint<'_>) {
        self.commands.push(DrawCommand::Polygon { points: points.to_vec(), style: paint.into() });
    }
}
