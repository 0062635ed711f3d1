// ==============================================================================
// analysis.rs — CURVE STATISTICS FOR HUMAN INSPECTION
// ------------------------------------------------------------------------------
// Nothing here feeds back into LUT generation. Summaries are Serialize so the
// CLI can print them as JSON as well as log lines.
//
// All "at X°" lookups use the sample nearest to X, so results depend on the
// series resolution.
// ==============================================================================

use serde::Serialize;

use crate::tire_curve::error::{CurveError, Result};
use crate::tire_curve::{CurveParameters, ForceSeries, SlipAngleSeries, load, radians};

pub const PLATEAU_START: f64 = 5.5;
pub const PLATEAU_END: f64 = 8.0;
pub const RETENTION_ANGLES: [f64; 3] = [10.0, 12.0, 15.0];

#[derive(Debug, Clone, Serialize)]
pub struct Retention {
    pub angle: f64,   // deg
    pub percent: f64, // of peak
}

#[derive(Debug, Clone, Serialize)]
pub struct CurveSummary {
    pub peak_force: f64,
    pub peak_angle: f64,
    pub plateau_variation_pct: f64,
    pub retention: Vec<Retention>,
}

fn retention_at(angles: &SlipAngleSeries, forces: &ForceSeries, peak: f64) -> Vec<Retention> {
    RETENTION_ANGLES
        .iter()
        .filter_map(|&target| {
            let i = angles.nearest_index(target)?;
            Some(Retention { angle: target, percent: forces.as_slice()[i] / peak * 100.0 })
        })
        .collect()
}

/// Peak, plateau flatness and retention past the peak.
pub fn summarize(angles: &SlipAngleSeries, forces: &ForceSeries) -> Result<CurveSummary> {
    angles.check_parallel(forces)?;
    let Some((peak_idx, peak_force)) = forces.argmax().filter(|(_, p)| *p > 0.0) else {
        return Err(CurveError::DegenerateCurve { peak: forces.max() });
    };

    // half-open window [nearest(5.5), nearest(8.0))
    let plateau_variation_pct = match (angles.nearest_index(PLATEAU_START), angles.nearest_index(PLATEAU_END)) {
        (Some(s), Some(e)) if e > s => {
            let window = &forces.as_slice()[s..e];
            let hi = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let lo = window.iter().copied().fold(f64::INFINITY, f64::min);
            (hi - lo) / peak_force * 100.0
        }
        _ => 0.0,
    };

    Ok(CurveSummary {
        peak_force,
        peak_angle: angles.as_slice()[peak_idx],
        plateau_variation_pct,
        retention: retention_at(angles, forces, peak_force),
    })
}

/// Force at the last sample <= 2° over radians(2).
pub fn cornering_stiffness(angles: &SlipAngleSeries, forces: &ForceSeries) -> Result<Option<f64>> {
    angles.check_parallel(forces)?;
    Ok(angles
        .as_slice()
        .iter()
        .rposition(|&a| a <= 2.0)
        .map(|i| forces.as_slice()[i] / radians(2.0)))
}

#[derive(Debug, Clone, Serialize)]
pub struct BrushRetention {
    pub peak_force: f64,
    pub retention: Vec<Retention>,
    pub decay_pct_per_deg: f64, // between 10° and 15°
}

pub fn brush_retention(angles: &SlipAngleSeries, forces: &ForceSeries) -> Result<BrushRetention> {
    let summary = summarize(angles, forces)?;
    let pct = |deg: f64| {
        summary
            .retention
            .iter()
            .find(|r| r.angle == deg)
            .map(|r| r.percent)
            .unwrap_or(0.0)
    };
    let decay_pct_per_deg = (pct(10.0) - pct(15.0)) / (15.0 - 10.0);

    Ok(BrushRetention {
        peak_force: summary.peak_force,
        retention: summary.retention,
        decay_pct_per_deg,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatterExcursion {
    pub max_positive: f64,
    pub max_negative: f64,
    pub range: f64,
    pub rms: f64,
}

/// Deviation of `chattered` from `base` for samples with angle in `[lo, hi]`.
pub fn chatter_excursion(
    angles: &SlipAngleSeries,
    base: &ForceSeries,
    chattered: &ForceSeries,
    lo: f64,
    hi: f64,
) -> Result<ChatterExcursion> {
    angles.check_parallel(base)?;
    angles.check_parallel(chattered)?;

    let diffs: Vec<f64> = angles
        .iter()
        .zip(base.iter().zip(chattered.iter()))
        .filter(|(a, _)| (lo..=hi).contains(a))
        .map(|(_, (b, c))| c - b)
        .collect();

    if diffs.is_empty() {
        return Ok(ChatterExcursion { max_positive: 0.0, max_negative: 0.0, range: 0.0, rms: 0.0 });
    }

    let max_positive = diffs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_negative = diffs.iter().copied().fold(f64::INFINITY, f64::min);
    let rms = (diffs.iter().map(|d| d * d).sum::<f64>() / diffs.len() as f64).sqrt();

    Ok(ChatterExcursion {
        max_positive,
        max_negative,
        range: max_positive - max_negative,
        rms,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadScaling {
    pub load: f64,
    pub factor: f64,
    pub change_pct: f64,
}

pub fn load_scaling_table(params: &CurveParameters, loads: &[f64]) -> Result<Vec<LoadScaling>> {
    loads
        .iter()
        .map(|&l| {
            let factor = load::scale(l, params.fz0, params.ls_exp)?;
            Ok(LoadScaling { load: l, factor, change_pct: factor * 100.0 - 100.0 })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tire_curve::piecewise;

    fn reference() -> (SlipAngleSeries, ForceSeries) {
        let angles = SlipAngleSeries::linspace(0.0, 15.0, 151).unwrap();
        let params = CurveParameters { dy_ref: 1.26, fz0: 2494.0, ls_exp: 0.8119, vertical_load: 2494.0 };
        let forces = piecewise::build(&angles, &params).unwrap();
        (angles, forces)
    }

    #[test]
    fn reference_summary() {
        let (angles, forces) = reference();
        let s = summarize(&angles, &forces).unwrap();
        assert!((s.peak_force - 1.26).abs() < 1e-9);
        assert!((s.peak_angle - 5.5).abs() < 1e-9);
        // plateau loses 2%/deg over [5.5, 8.0)
        assert!(s.plateau_variation_pct > 4.0 && s.plateau_variation_pct < 5.0);
        assert_eq!(s.retention.len(), 3);
        // 12°: 0.95 * 0.75
        assert!((s.retention[1].percent - 71.25).abs() < 1e-6);
    }

    #[test]
    fn stiffness_uses_last_linear_sample() {
        let (angles, forces) = reference();
        let k = cornering_stiffness(&angles, &forces).unwrap().unwrap();
        assert!((k - 1.26 / radians(6.0)).abs() < 1e-9);
    }

    #[test]
    fn excursion_of_identical_curves_is_zero() {
        let (angles, forces) = reference();
        let e = chatter_excursion(&angles, &forces, &forces, 10.0, 16.0).unwrap();
        assert_eq!(e.range, 0.0);
        assert_eq!(e.rms, 0.0);
    }

    #[test]
    fn load_table_reports_percent_change() {
        let params = CurveParameters { dy_ref: 1.26, fz0: 2494.0, ls_exp: 0.8119, vertical_load: 2494.0 };
        let table = load_scaling_table(&params, &[2494.0, 4000.0]).unwrap();
        assert!(table[0].change_pct.abs() < 1e-9);
        assert!(table[1].change_pct > 0.0);
    }
}
