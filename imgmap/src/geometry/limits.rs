// Centralized ingestion limits to harden against untrusted region data

// Map size caps
pub const MAX_REGIONS: usize = 20_000;

// Coordinates
pub const MAX_COORDS_PER_REGION: usize = 16_000;
pub const MAX_COORDS_TOTAL: usize = 2_000_000;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 =  10_000_000.0;
pub const WIDTH_MAX: f64 = 10_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x) }

#[inline]
pub fn in_width_bounds(w: f64) -> bool { w.is_finite() && w > 0.0 && w <= WIDTH_MAX }
