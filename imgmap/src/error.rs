use thiserror::Error;

/// Errors raised while ingesting region maps or configuration. Runtime
/// operations (paint, click, hover) never fail; they no-op instead.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("too many regions: {count} (max {max})")]
    TooManyRegions { count: usize, max: usize },
    #[error("region {index}: too many coordinates ({count})")]
    TooManyCoords { index: usize, count: usize },
    #[error("region {index}: coordinate {position} is not finite or out of bounds")]
    CoordOutOfBounds { index: usize, position: usize },
    #[error("region {index}: `{shape}` cannot be built from {got} coordinates")]
    BadCoordCount {
        index: usize,
        shape: String,
        got: usize,
    },
    #[error("region {index}: line width {width} out of range")]
    LineWidth { index: usize, width: f64 },
    #[error("duplicate region key `{key}` at {index} (first at {first})")]
    DuplicateKey {
        key: String,
        index: usize,
        first: usize,
    },
    #[error("unknown event kind `{0}`")]
    UnknownEvent(String),
}

impl MapError {
    /// Stable machine-readable code, used by the JS bindings.
    pub fn code(&self) -> &'static str {
        match self {
            MapError::Json(_) => "invalid_json",
            MapError::TooManyRegions { .. } | MapError::TooManyCoords { .. } => "limit_exceeded",
            MapError::CoordOutOfBounds { .. } | MapError::LineWidth { .. } => "out_of_range",
            MapError::BadCoordCount { .. } => "invalid_coords",
            MapError::DuplicateKey { .. } => "duplicate_key",
            MapError::UnknownEvent(_) => "invalid_kind",
        }
    }
}
