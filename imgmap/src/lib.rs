pub mod config;
pub mod draw;
pub mod error;
pub mod highlight;
pub mod load;
pub mod mapper;
pub mod model;
pub mod scale;
pub mod sizing;
pub mod geometry {
    pub mod limits;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod picking;
    pub mod winding;
}

pub use config::{needs_resync, ConfigKey, MapperConfig};
pub use draw::{paint, DrawCommand, Paint, Recorder, Surface};
pub use error::MapError;
pub use highlight::{ClickOutcome, HighlightPolicy, HighlightState};
pub use load::{LoadStatus, LoadWatch};
pub use mapper::{ImageMapper, MapperListener, PointerKind};
pub use model::{DisplayRegion, Highlight, Point, Region, RegionKey, RegionMap, Shape, Size};
pub use scale::Scaler;
pub use sizing::{Dimension, ImageInfo, ImageSize, Sizing};
