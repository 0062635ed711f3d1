// ==============================================================================
// chatter.rs — DETERMINISTIC CHATTER OVERLAY
// ------------------------------------------------------------------------------
// Layers judder-like oscillation on top of any base curve past start_angle.
//
//   progress = clamp((a - start) / (20 - start), 0, 1)   (0 when start > 20)
//
//   high  = sin(a * f * 8) * 0.6
//   med   = sin(a * f * 3) * 0.3
//   low   = sin(a * f)     * 0.1
//   noise = high + med * cos(0.7 a) + low * sin(1.3 a)
//
//   jitter = sin(13.7 a) * 0.1 + cos(7.3 a) * 0.05
//
//   F' = max(F * (1 + noise * intensity * progress + jitter * progress), 0.1 F)
//
// Everything is a pure function of the angle. There is no RNG: the same inputs
// always yield the same LUT, and tests compare bit-for-bit.
// ==============================================================================

use crate::tire_curve::error::Result;
use crate::tire_curve::piecewise;
use crate::tire_curve::types::{ChatterConfig, CurveParameters, ForceSeries, RAMP_END_DEG, SlipAngleSeries};

const HIGH_MULT: f64 = 8.0;
const MED_MULT: f64 = 3.0;

const HIGH_WEIGHT: f64 = 0.6;
const MED_WEIGHT: f64 = 0.3;
const LOW_WEIGHT: f64 = 0.1;

/// Never keep less than this fraction of the base force.
pub const FORCE_FLOOR: f64 = 0.1;

#[inline]
fn progress(angle: f64, start: f64) -> f64 {
    ((angle - start) / (RAMP_END_DEG - start)).clamp(0.0, 1.0)
}

#[inline]
fn noise(angle: f64, frequency: f64) -> f64 {
    let high = (angle * frequency * HIGH_MULT).sin() * HIGH_WEIGHT;
    let med = (angle * frequency * MED_MULT).sin() * MED_WEIGHT;
    let low = (angle * frequency).sin() * LOW_WEIGHT;

    high + med * (angle * 0.7).cos() + low * (angle * 1.3).sin()
}

#[inline]
fn jitter(angle: f64) -> f64 {
    (angle * 13.7).sin() * 0.1 + (angle * 7.3).cos() * 0.05
}

/// Multiplicative chatter applied to a single base sample.
pub fn chatter_sample(angle: f64, base: f64, cfg: &ChatterConfig) -> f64 {
    if angle < cfg.start_angle {
        return base;
    }

    let p = progress(angle, cfg.start_angle);
    let scaled = noise(angle, cfg.frequency) * cfg.intensity * p;

    (base * (1.0 + scaled + jitter(angle) * p)).max(base * FORCE_FLOOR)
}

pub fn apply(angles: &SlipAngleSeries, base: &ForceSeries, cfg: &ChatterConfig) -> Result<ForceSeries> {
    angles.check_parallel(base)?;
    cfg.validate()?;

    log::debug!(
        "chatter overlay: start={}°, intensity={}, frequency={}",
        cfg.start_angle,
        cfg.intensity,
        cfg.frequency
    );

    Ok(angles
        .iter()
        .zip(base.iter())
        .map(|(a, f)| chatter_sample(a, f, cfg))
        .collect::<Vec<_>>()
        .into())
}

/// Five-segment base curve with chatter layered on top. Returns (base, chattered).
pub fn chattered_curve(
    angles: &SlipAngleSeries,
    params: &CurveParameters,
    cfg: &ChatterConfig,
) -> Result<(ForceSeries, ForceSeries)> {
    let base = piecewise::build(angles, params)?;
    let chattered = apply(angles, &base, cfg)?;
    Ok((base, chattered))
}
