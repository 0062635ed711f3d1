// ==============================================================================
// piecewise.rs — FIVE-SEGMENT LATERAL FORCE CURVE (LOAD SENSITIVE)
// ==============================================================================
// Maps slip angle (deg) to lateral force using a fixed table of segments:
//
//   Linear           0.0 .. 2.0    elastic carcass, stiffness tuned to hit peak at 6°
//   Transition       2.0 .. 5.5    smoothstep 3t²-2t³ from linear force to peak
//   Plateau          5.5 .. 8.0    -2% of peak per degree
//   ModerateFalloff  8.0 .. 12.0   95% of peak down to 75% of that
//   SteepFalloff    12.0 ..        toward 60% of the 12° value, clamped at 20°
//
// Each upper bound is inclusive. The bounds are calibration constants and are
// not configurable; LUTs generated elsewhere depend on them.
//
// peak_grip = dy_ref * load::scale(Fz, Fz0, ls_exp)
// ==============================================================================

use crate::tire_curve::error::Result;
use crate::tire_curve::load;
use crate::tire_curve::types::{CurveParameters, ForceSeries, RAMP_END_DEG, SlipAngleSeries, radians};

const LINEAR_END: f64 = 2.0;
const TRANSITION_END: f64 = 5.5;
const PLATEAU_END: f64 = 8.0;
const MODERATE_END: f64 = 12.0;

/// Angle the linear stiffness would reach peak grip at.
const STIFFNESS_PEAK_DEG: f64 = 6.0;
const PLATEAU_SLOPE: f64 = 0.02;        // fraction of peak lost per degree
const PLATEAU_END_RETENTION: f64 = 0.95;
const MODERATE_RETENTION: f64 = 0.75;   // at 12°, relative to plateau end
const STEEP_FLOOR: f64 = 0.60;          // asymptote, relative to the 12° value

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Segment {
    Linear,
    Transition,
    Plateau,
    ModerateFalloff,
    SteepFalloff,
}

/// Ordered (inclusive upper bound, segment) table. First match wins.
pub const SEGMENTS: [(f64, Segment); 5] = [
    (LINEAR_END, Segment::Linear),
    (TRANSITION_END, Segment::Transition),
    (PLATEAU_END, Segment::Plateau),
    (MODERATE_END, Segment::ModerateFalloff),
    (f64::INFINITY, Segment::SteepFalloff),
];

impl Segment {
    pub fn for_angle(angle: f64) -> Segment {
        SEGMENTS
            .iter()
            .find(|(upper, _)| angle <= *upper)
            .map(|(_, seg)| *seg)
            .unwrap_or(Segment::SteepFalloff)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Linear => "linear",
            Segment::Transition => "transition",
            Segment::Plateau => "plateau",
            Segment::ModerateFalloff => "moderate_falloff",
            Segment::SteepFalloff => "steep_falloff",
        }
    }

    #[inline]
    pub fn eval(&self, angle: f64, peak_grip: f64) -> f64 {
        match self {
            Segment::Linear => linear(angle, peak_grip),
            Segment::Transition => transition(angle, peak_grip),
            Segment::Plateau => plateau(angle, peak_grip),
            Segment::ModerateFalloff => moderate_falloff(angle, peak_grip),
            Segment::SteepFalloff => steep_falloff(angle, peak_grip),
        }
    }
}

#[inline]
fn cornering_stiffness(peak_grip: f64) -> f64 {
    peak_grip / radians(STIFFNESS_PEAK_DEG)
}

fn linear(angle: f64, peak_grip: f64) -> f64 {
    cornering_stiffness(peak_grip) * radians(angle)
}

fn transition(angle: f64, peak_grip: f64) -> f64 {
    let linear_force = cornering_stiffness(peak_grip) * radians(LINEAR_END);
    let t = (angle - LINEAR_END) / (TRANSITION_END - LINEAR_END);
    let s = 3.0 * t.powf(2.0) - 2.0 * t.powf(3.0);
    linear_force + (peak_grip - linear_force) * s
}

fn plateau(angle: f64, peak_grip: f64) -> f64 {
    peak_grip * (1.0 - PLATEAU_SLOPE * (angle - TRANSITION_END))
}

#[inline]
fn plateau_end_force(peak_grip: f64) -> f64 {
    peak_grip * PLATEAU_END_RETENTION
}

fn moderate_falloff(angle: f64, peak_grip: f64) -> f64 {
    let progress = (angle - PLATEAU_END) / (MODERATE_END - PLATEAU_END);
    plateau_end_force(peak_grip) * (1.0 - progress * (1.0 - MODERATE_RETENTION))
}

fn steep_falloff(angle: f64, peak_grip: f64) -> f64 {
    let initial = plateau_end_force(peak_grip) * MODERATE_RETENTION;
    let progress = ((angle - MODERATE_END) / (RAMP_END_DEG - MODERATE_END)).min(1.0);
    initial * (STEEP_FLOOR + (1.0 - STEEP_FLOOR) * (1.0 - progress))
}

pub fn peak_grip(params: &CurveParameters) -> Result<f64> {
    params.validate()?;
    let factor = load::scale(params.vertical_load, params.fz0, params.ls_exp)?;
    Ok(params.dy_ref * factor)
}

pub fn build(angles: &SlipAngleSeries, params: &CurveParameters) -> Result<ForceSeries> {
    let peak = peak_grip(params)?;

    log::debug!(
        "piecewise curve: {} samples, Fz={} N, peak_grip={:.4}",
        angles.len(),
        params.vertical_load,
        peak
    );

    Ok(angles
        .iter()
        .map(|a| {
            let segment = Segment::for_angle(a);
            let force = segment.eval(a, peak);
            log::trace!("{a:.2}° {}: {force:.4}", segment.as_str());
            force
        })
        .collect::<Vec<_>>()
        .into())
}
