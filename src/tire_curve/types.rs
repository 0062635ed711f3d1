//! Core shared types for `tire_curve` (series + parameter sets).
// tire_curve/types.rs
use serde::{Deserialize, Serialize};

use crate::tire_curve::error::{CurveError, Result, ensure};

// ----- angle helpers -----
#[inline] pub fn radians(deg: f64) -> f64 { deg.to_radians() }

/// Highest slip angle the chatter ramp and the steep falloff clamp reach.
pub const RAMP_END_DEG: f64 = 20.0;

// ============================================
// Slip angle series
// ============================================

/// Finite, non-negative, strictly increasing slip angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct SlipAngleSeries {
    angles: Vec<f64>,
}

impl SlipAngleSeries {
    pub fn new(angles: Vec<f64>) -> Result<Self> {
        for (index, &value) in angles.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(CurveError::InvalidAngle { index, value });
            }
        }
        for (index, pair) in angles.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(CurveError::NonIncreasingAngles {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        Ok(Self { angles })
    }

    /// `samples` evenly spaced angles over `[start, stop]`, endpoints included.
    pub fn linspace(start: f64, stop: f64, samples: usize) -> Result<Self> {
        ensure(samples >= 2, "samples", samples as f64, ">= 2")?;
        ensure(stop > start, "stop", stop, "greater than start")?;

        let div = (samples - 1) as f64;
        let step = (stop - start) / div;
        let mut angles: Vec<f64> = (0..samples).map(|i| start + i as f64 * step).collect();
        // last sample lands exactly on `stop`
        angles[samples - 1] = stop;

        Self::new(angles)
    }

    #[inline] pub fn len(&self) -> usize { self.angles.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.angles.is_empty() }
    #[inline] pub fn as_slice(&self) -> &[f64] { &self.angles }
    #[inline] pub fn iter(&self) -> impl Iterator<Item = f64> + '_ { self.angles.iter().copied() }

    /// Index of the sample closest to `target` (first one on ties).
    pub fn nearest_index(&self, target: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, a) in self.iter().enumerate() {
            let d = (a - target).abs();
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Errors unless `forces` is index-parallel to this series.
    pub fn check_parallel(&self, forces: &ForceSeries) -> Result<()> {
        if self.len() != forces.len() {
            return Err(CurveError::LengthMismatch {
                angles: self.len(),
                forces: forces.len(),
            });
        }
        Ok(())
    }
}

// ============================================
// Force series
// ============================================

/// One force value per slip angle. Every transform returns a fresh series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceSeries {
    forces: Vec<f64>,
}

impl ForceSeries {
    pub fn new(forces: Vec<f64>) -> Self { Self { forces } }

    #[inline] pub fn len(&self) -> usize { self.forces.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.forces.is_empty() }
    #[inline] pub fn as_slice(&self) -> &[f64] { &self.forces }
    #[inline] pub fn iter(&self) -> impl Iterator<Item = f64> + '_ { self.forces.iter().copied() }

    /// Largest value, `-inf` for an empty series.
    pub fn max(&self) -> f64 {
        self.iter().fold(f64::NEG_INFINITY, f64::max)
    }

    /// (index, value) of the first maximum.
    pub fn argmax(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, f) in self.iter().enumerate() {
            match best {
                Some((_, bf)) if f <= bf => {}
                _ => best = Some((i, f)),
            }
        }
        best
    }
}

impl From<Vec<f64>> for ForceSeries {
    fn from(forces: Vec<f64>) -> Self { Self::new(forces) }
}

// ============================================
// ----- parameter sets -----------------------
// ============================================

/// Load-sensitive parameters for the five-segment curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    pub dy_ref: f64,        // lateral grip coefficient at fz0
    pub fz0: f64,           // N, reference load
    pub ls_exp: f64,        // load sensitivity exponent
    pub vertical_load: f64, // N
}

impl CurveParameters {
    /// Non-positive `fz0` or `vertical_load` is a load-scaling domain error,
    /// the same kind `load::scale` reports.
    pub fn validate(&self) -> Result<()> {
        ensure(self.dy_ref.is_finite() && self.dy_ref > 0.0, "dy_ref", self.dy_ref, "> 0")?;
        ensure(self.ls_exp.is_finite(), "ls_exp", self.ls_exp, "a finite exponent")?;

        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !(positive(self.fz0) && positive(self.vertical_load)) {
            return Err(CurveError::Domain { load: self.vertical_load, fz0: self.fz0, exponent: self.ls_exp });
        }
        Ok(())
    }

    /// Same tire, different vertical load.
    pub fn with_load(self, vertical_load: f64) -> Self {
        Self { vertical_load, ..self }
    }
}

/// Where the brush model's linear segment peaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushPeak {
    /// Linear in slip radians: peak is `dy_ref * radians(limit)`.
    #[default]
    SlipRadians,
    /// Linear segment rescaled so the force at the limit angle is `dy_ref`.
    Reference,
}

/// Two-segment brush model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushParameters {
    pub dy_ref: f64,
    pub friction_limit_angle: f64, // deg
    pub falloff_level: f64,        // 0..1 retained fraction as slip grows
    pub falloff_speed: f64,        // decay rate per limit-angle of excess slip
    #[serde(default)]
    pub peak: BrushPeak,
}

impl BrushParameters {
    pub fn new(dy_ref: f64, friction_limit_angle: f64, falloff_level: f64, falloff_speed: f64) -> Self {
        Self {
            dy_ref,
            friction_limit_angle,
            falloff_level,
            falloff_speed,
            peak: BrushPeak::SlipRadians,
        }
    }

    pub fn with_peak(self, peak: BrushPeak) -> Self {
        Self { peak, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        ensure(self.dy_ref.is_finite() && self.dy_ref > 0.0, "dy_ref", self.dy_ref, "> 0")?;
        ensure(
            self.friction_limit_angle.is_finite() && self.friction_limit_angle > 0.0,
            "friction_limit_angle",
            self.friction_limit_angle,
            "> 0",
        )?;
        ensure(
            (0.0..=1.0).contains(&self.falloff_level),
            "falloff_level",
            self.falloff_level,
            "within [0, 1]",
        )?;
        ensure(
            self.falloff_speed.is_finite() && self.falloff_speed > 0.0,
            "falloff_speed",
            self.falloff_speed,
            "> 0",
        )
    }
}

/// Chatter overlay settings. Independent of the base curve family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChatterConfig {
    pub start_angle: f64, // deg, first angle that receives noise
    pub intensity: f64,   // 0..1
    pub frequency: f64,   // oscillation scale
}

impl ChatterConfig {
    pub fn validate(&self) -> Result<()> {
        // at exactly 20 the ramp is 0/0 at the 20° sample
        ensure(
            self.start_angle.is_finite() && self.start_angle >= 0.0 && self.start_angle != RAMP_END_DEG,
            "start_angle",
            self.start_angle,
            ">= 0 and != 20",
        )?;
        ensure(
            (0.0..=1.0).contains(&self.intensity),
            "intensity",
            self.intensity,
            "within [0, 1]",
        )?;
        ensure(
            self.frequency.is_finite() && self.frequency > 0.0,
            "frequency",
            self.frequency,
            "> 0",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_matches_endpoints_and_step() {
        let s = SlipAngleSeries::linspace(0.0, 15.0, 151).unwrap();
        assert_eq!(s.len(), 151);
        assert_eq!(s.as_slice()[0], 0.0);
        assert_eq!(s.as_slice()[150], 15.0);
        assert!((s.as_slice()[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_increasing_and_bad_angles() {
        let err = SlipAngleSeries::new(vec![0.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, CurveError::NonIncreasingAngles { index: 2, .. }));
        assert!(err.is_malformed_input());

        let err = SlipAngleSeries::new(vec![0.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, CurveError::InvalidAngle { index: 1, .. }));

        assert!(SlipAngleSeries::new(vec![-1.0, 0.0]).is_err());
        assert!(SlipAngleSeries::linspace(0.0, 10.0, 1).is_err());
    }

    #[test]
    fn nearest_index_prefers_first_on_tie() {
        let s = SlipAngleSeries::new(vec![0.0, 1.0, 2.0]).unwrap();
        assert_eq!(s.nearest_index(0.5), Some(0));
        assert_eq!(s.nearest_index(1.7), Some(2));
    }

    #[test]
    fn argmax_returns_first_peak() {
        let f = ForceSeries::new(vec![0.1, 0.9, 0.9, 0.3]);
        assert_eq!(f.argmax(), Some((1, 0.9)));
        assert_eq!(ForceSeries::new(vec![]).argmax(), None);
    }

    #[test]
    fn chatter_start_bounds() {
        let cfg = ChatterConfig { start_angle: 20.0, intensity: 0.1, frequency: 2.0 };
        assert!(matches!(cfg.validate(), Err(CurveError::InvalidParameter { name: "start_angle", .. })));
        let cfg = ChatterConfig { start_angle: -1.0, intensity: 0.1, frequency: 2.0 };
        assert!(cfg.validate().is_err());
        let cfg = ChatterConfig { start_angle: 25.0, intensity: 0.1, frequency: 2.0 };
        cfg.validate().unwrap();
        let cfg = ChatterConfig { start_angle: 10.0, intensity: 1.5, frequency: 2.0 };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_positive_loads_are_domain_errors() {
        let ok = CurveParameters { dy_ref: 1.26, fz0: 2494.0, ls_exp: 0.8119, vertical_load: 2494.0 };
        ok.validate().unwrap();
        for bad in [
            CurveParameters { fz0: 0.0, ..ok },
            CurveParameters { fz0: -1.0, ..ok },
            ok.with_load(0.0),
            ok.with_load(-10.0),
        ] {
            assert!(matches!(bad.validate(), Err(CurveError::Domain { .. })), "{bad:?}");
        }
        let bad = CurveParameters { dy_ref: 0.0, ..ok };
        assert!(matches!(bad.validate(), Err(CurveError::InvalidParameter { name: "dy_ref", .. })));
    }
}
