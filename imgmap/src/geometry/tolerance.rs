// Shared tolerances for display-space comparisons

pub const EPS_POS: f64 = 1e-6;            // point coincidence threshold (px)
pub const EPS_DENOM: f64 = 1e-12;         // denominator guard for ratios

#[inline]
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if den.abs() <= EPS_DENOM { fallback } else { num/den }
}
