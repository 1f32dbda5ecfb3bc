//! Finite and sign checks on scalar settings and result vectors.

use crate::LuError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, LuError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LuError::NonFinite { what, value: v })
    }
}

/// Strictly positive and finite, used for time steps, densities and scale factors.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, LuError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(LuError::InvalidArg { what })
    }
}

/// First non-finite entry of `values`, if any.
///
/// The stepping core never calls this; it is meant for diagnostics layered
/// on top of a run.
pub fn first_non_finite(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
}

pub fn all_finite(values: &[f64]) -> bool {
    first_non_finite(values).is_none()
}
