// ==============================================================================
// generate.rs — SCENARIO RUNNERS (BUILD -> OVERLAY -> NORMALIZE -> WRITE)
// ------------------------------------------------------------------------------
// Each runner takes a RunConfig, builds the curves it names, writes LUTs into
// config.output.dir and returns a report for the CLI to print.
//
// custom  : five-segment curve over the load sweep, LUT at the reference load
// chatter : each chatter preset layered on the reference curve, one LUT each
// brush   : brush presets + falloff-speed sweep, report only; the second preset
//           is weighed against the first for parameter recommendations
// ==============================================================================

use std::path::PathBuf;

use serde::Serialize;

use crate::analysis::{self, BrushRetention, ChatterExcursion, CurveSummary, LoadScaling};
use crate::config::RunConfig;
use crate::scenarios;
use crate::tire_curve::{BrushParameters, LutDocument, Result, brush, chatter, lut, piecewise};

const CHATTER_WINDOW: (f64, f64) = (10.0, 16.0);

fn custom_header() -> Vec<String> {
    vec![
        "Custom DY_CURVE for realistic slip angle behavior".into(),
        "Generated from research data: OptimumG, Paul Haney, MATLAB Pacejka".into(),
        "Includes plateau region (5.5-8°) and progressive falloff".into(),
        String::new(),
        "Format: slip_angle_degrees|normalized_lateral_force".into(),
        String::new(),
    ]
}

fn chatter_header(name: &str) -> Vec<String> {
    vec![
        format!("Experimental chatter tire curve: {name}"),
        "WARNING: This is experimental and may cause unrealistic behavior".into(),
        "Progressive chatter noise beyond 10° slip angle".into(),
        "Simulates tire juddering/chattering at extreme slip angles".into(),
        String::new(),
        "Format: slip_angle_degrees|normalized_lateral_force".into(),
        String::new(),
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadCurve {
    pub load: f64,
    pub peak_grip: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomReport {
    pub lut: Option<PathBuf>,
    pub summary: CurveSummary,
    pub cornering_stiffness: Option<f64>,
    pub stock_summary: CurveSummary,
    pub load_curves: Vec<LoadCurve>,
    pub load_scaling: Vec<LoadScaling>,
}

pub fn run_custom(cfg: &RunConfig, write: bool) -> Result<CustomReport> {
    let angles = cfg.resolution.custom.series()?;
    let reference = cfg.tire;

    let mut load_curves = Vec::with_capacity(cfg.loads.len());
    for &load in &cfg.loads {
        let params = reference.with_load(load);
        let forces = piecewise::build(&angles, &params)?;
        load_curves.push(LoadCurve { load, peak_grip: forces.max() });
    }

    let forces = piecewise::build(&angles, &reference)?;
    let stock = brush::build(&angles, &scenarios::stock_comparison())?;

    let lut = if write {
        let path = cfg.output.custom_path();
        let doc = LutDocument::from_curve(&angles, &forces, custom_header())?;
        lut::write_lut(&path, &doc)?;
        Some(path)
    } else {
        None
    };

    Ok(CustomReport {
        lut,
        summary: analysis::summarize(&angles, &forces)?,
        cornering_stiffness: analysis::cornering_stiffness(&angles, &forces)?,
        stock_summary: analysis::summarize(&angles, &stock)?,
        load_curves,
        load_scaling: analysis::load_scaling_table(&reference, &scenarios::LOAD_EXAMPLES)?,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatterReport {
    pub name: String,
    pub start_angle: f64,
    pub intensity: f64,
    pub frequency: f64,
    pub lut: Option<PathBuf>,
    pub excursion: ChatterExcursion,
}

pub fn run_chatter(cfg: &RunConfig, write: bool) -> Result<Vec<ChatterReport>> {
    let angles = cfg.resolution.chatter.series()?;
    let base = piecewise::build(&angles, &cfg.tire)?;

    let mut reports = Vec::with_capacity(cfg.chatter.len());
    for preset in &cfg.chatter {
        let forces = chatter::apply(&angles, &base, &preset.config)?;

        let lut = if write {
            let path = cfg.output.chatter_path(&preset.name);
            let doc = LutDocument::from_curve(&angles, &forces, chatter_header(&preset.name))?;
            lut::write_lut(&path, &doc)?;
            Some(path)
        } else {
            None
        };

        let (lo, hi) = CHATTER_WINDOW;
        reports.push(ChatterReport {
            name: preset.name.clone(),
            start_angle: preset.config.start_angle,
            intensity: preset.config.intensity,
            frequency: preset.config.frequency,
            lut,
            excursion: analysis::chatter_excursion(&angles, &base, &forces, lo, hi)?,
        });
    }
    Ok(reports)
}

#[derive(Debug, Clone, Serialize)]
pub struct FalloffSweepRow {
    pub falloff_speed: f64,
    pub retention: BrushRetention,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrushComparisonRow {
    pub name: String,
    pub friction_limit_angle: f64,
    pub falloff_level: f64,
    pub peak_force: f64,
    pub cornering_stiffness: Option<f64>,
}

/// A parameter change suggested by a candidate brush preset.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub parameter: &'static str,
    pub current: f64,
    pub suggested: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrushReport {
    pub falloff_sweep: Vec<FalloffSweepRow>,
    pub comparison: Vec<BrushComparisonRow>,
    pub recommendations: Vec<Recommendation>,
}

/// Compares a candidate setup against the current one, given each curve's peak force.
pub fn recommendations(
    current: &BrushParameters,
    current_peak: f64,
    candidate: &BrushParameters,
    candidate_peak: f64,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    if candidate_peak > current_peak {
        out.push(Recommendation {
            parameter: "DY_REF",
            current: current.dy_ref,
            suggested: candidate.dy_ref,
            reason: format!("+{:.1}% peak grip", (candidate_peak / current_peak - 1.0) * 100.0),
        });
    }
    if candidate.friction_limit_angle < current.friction_limit_angle {
        out.push(Recommendation {
            parameter: "FRICTION_LIMIT_ANGLE",
            current: current.friction_limit_angle,
            suggested: candidate.friction_limit_angle,
            reason: "more typical racing tire behavior".into(),
        });
    }
    if candidate.falloff_level > current.falloff_level {
        out.push(Recommendation {
            parameter: "FALLOFF_LEVEL",
            current: current.falloff_level,
            suggested: candidate.falloff_level,
            reason: "more progressive breakaway".into(),
        });
    }
    out
}

pub fn run_brush(cfg: &RunConfig) -> Result<BrushReport> {
    let angles = cfg.resolution.brush.series()?;

    // sweep varies falloff_speed on the first (current car) preset
    let mut falloff_sweep = Vec::with_capacity(cfg.falloff_speeds.len());
    if let Some(base) = cfg.brush.first() {
        for &speed in &cfg.falloff_speeds {
            let params = BrushParameters { falloff_speed: speed, ..base.params };
            let forces = brush::build(&angles, &params)?;
            falloff_sweep.push(FalloffSweepRow {
                falloff_speed: speed,
                retention: analysis::brush_retention(&angles, &forces)?,
            });
        }
    }

    let mut comparison = Vec::with_capacity(cfg.brush.len());
    for preset in &cfg.brush {
        let forces = brush::build(&angles, &preset.params)?;
        comparison.push(BrushComparisonRow {
            name: preset.name.clone(),
            friction_limit_angle: preset.params.friction_limit_angle,
            falloff_level: preset.params.falloff_level,
            peak_force: forces.max(),
            cornering_stiffness: analysis::cornering_stiffness(&angles, &forces)?,
        });
    }

    let recommendations = match (cfg.brush.as_slice(), comparison.as_slice()) {
        ([current, candidate, ..], [current_row, candidate_row, ..]) => recommendations(
            &current.params,
            current_row.peak_force,
            &candidate.params,
            candidate_row.peak_force,
        ),
        _ => Vec::new(),
    };

    Ok(BrushReport { falloff_sweep, comparison, recommendations })
}
