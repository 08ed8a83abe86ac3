/// Exact at both ends: `t == 0` yields `a`, `t == 1` yields `b`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Position of `v` inside `[a, b]` clamped to `[0, 1]`.
///
/// Empty or inverted intervals act as a step at `a`.
pub(crate) fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if span <= 0.0 {
        return if v >= a { 1.0 } else { 0.0 };
    }
    clamp01((v - a) / span)
}

/// Round half away from zero to a fixed number of decimals.
pub(crate) fn round_to_decimals(v: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(12) as i32);
    (v * factor).round() / factor
}

pub(crate) fn ensure_finite(name: &str, v: f64) -> crate::ReelResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(crate::ReelError::validation(format!("{name} must be finite")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
