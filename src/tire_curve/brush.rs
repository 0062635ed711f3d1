// ==============================================================================
// brush.rs — TWO-SEGMENT BRUSH CURVE (LINEAR + EXPONENTIAL FALLOFF)
// ==============================================================================
// A simpler curve family kept for comparison against the five-segment model.
// ------------------------------------------------------------------------------
// Inputs:
// - BrushParameters (dy_ref, friction_limit_angle, falloff_level, falloff_speed)
//
// Model:
// 1) angle <= limit: pure linear region, no plateau
//        F = dy_ref * rad(angle)
// 2) angle >  limit: exponential decay toward falloff_level * peak
//        excess  = angle - limit
//        peak    = dy_ref * rad(limit)
//        falloff = exp(-falloff_speed * excess / limit)
//        F       = peak * (level + (1 - level) * falloff)
//
// BrushPeak::Reference rescales the linear region so F(limit) == dy_ref, the
// way the stock sim's curve is usually plotted next to a custom one.
//
// Load is ignored here; the model is independent of load::scale.
// ==============================================================================

use crate::tire_curve::error::Result;
use crate::tire_curve::types::{BrushParameters, BrushPeak, ForceSeries, SlipAngleSeries, radians};

#[inline]
fn linear_force(p: &BrushParameters, angle: f64) -> f64 {
    match p.peak {
        BrushPeak::SlipRadians => p.dy_ref * radians(angle),
        BrushPeak::Reference => p.dy_ref * radians(angle) / radians(p.friction_limit_angle),
    }
}

#[inline]
fn peak_force(p: &BrushParameters) -> f64 {
    match p.peak {
        BrushPeak::SlipRadians => p.dy_ref * radians(p.friction_limit_angle),
        BrushPeak::Reference => p.dy_ref,
    }
}

/// Force the curve decays toward as slip grows without bound.
pub fn asymptote(p: &BrushParameters) -> f64 {
    peak_force(p) * p.falloff_level
}

fn force_at(p: &BrushParameters, angle: f64) -> f64 {
    let limit = p.friction_limit_angle;

    if angle <= limit {
        return linear_force(p, angle);
    }

    let excess = angle - limit;
    let falloff = (-p.falloff_speed * excess / limit).exp();
    peak_force(p) * (p.falloff_level + (1.0 - p.falloff_level) * falloff)
}

pub fn build(angles: &SlipAngleSeries, params: &BrushParameters) -> Result<ForceSeries> {
    params.validate()?;

    log::debug!(
        "brush curve: {} samples, limit={}°, level={}, speed={}",
        angles.len(),
        params.friction_limit_angle,
        params.falloff_level,
        params.falloff_speed
    );

    Ok(angles
        .iter()
        .map(|a| force_at(params, a))
        .collect::<Vec<_>>()
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_mode_peaks_at_dy_ref() {
        let p = BrushParameters::new(1.26, 8.5, 0.6, 8.0).with_peak(BrushPeak::Reference);
        assert!((force_at(&p, 8.5) - 1.26).abs() < 1e-12);
        assert!((force_at(&p, 4.25) - 0.63).abs() < 1e-12);
    }

    #[test]
    fn faster_falloff_loses_more_grip() {
        let slow = BrushParameters::new(1.26, 8.5, 0.6, 2.0);
        let fast = BrushParameters::new(1.26, 8.5, 0.6, 16.0);
        assert!(force_at(&fast, 10.0) < force_at(&slow, 10.0));
    }

    #[test]
    fn rejects_out_of_range_level() {
        let angles = SlipAngleSeries::linspace(0.0, 15.0, 16).unwrap();
        let p = BrushParameters::new(1.26, 8.5, 1.2, 8.0);
        assert!(build(&angles, &p).is_err());
    }
}
