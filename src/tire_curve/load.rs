// ==============================================================================
// load.rs — LOAD SENSITIVITY (POWER LAW)
// ------------------------------------------------------------------------------
// Peak grip scales with vertical load as
//
//     factor = (Fz / Fz0) ^ ls_exp
//
// Fz0 is the reference load the grip coefficient was measured at, so the
// factor is exactly 1.0 at Fz == Fz0.
//
// Inputs with no real result (Fz0 <= 0, or Fz <= 0 with a fractional exponent)
// are rejected with CurveError::Domain instead of leaking NaN/inf downstream.
// ==============================================================================

use crate::tire_curve::error::{CurveError, Result};

pub fn scale(load: f64, fz0: f64, ls_exp: f64) -> Result<f64> {
    let domain = || CurveError::Domain { load, fz0, exponent: ls_exp };

    if !(fz0.is_finite() && fz0 > 0.0) || !load.is_finite() || !ls_exp.is_finite() {
        return Err(domain());
    }
    if load <= 0.0 && ls_exp.fract() != 0.0 {
        return Err(domain());
    }

    let factor = (load / fz0).powf(ls_exp);
    if !factor.is_finite() {
        // 0 ^ negative
        return Err(domain());
    }
    Ok(factor)
}
