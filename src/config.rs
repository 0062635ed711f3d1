//! Run configuration: where LUTs go, sample resolution, base tire parameters.
//!
//! Loaded from an optional JSON file; every section falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scenarios::{self, BrushPreset, ChatterPreset};
use crate::tire_curve::lut::safe_name;
use crate::tire_curve::{CurveError, CurveParameters, Result, SlipAngleSeries};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub custom_file: String,
    pub chatter_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            custom_file: "dy_curve_custom.lut".into(),
            chatter_prefix: "dy_curve_chatter_".into(),
        }
    }
}

impl OutputConfig {
    pub fn custom_path(&self) -> PathBuf {
        self.dir.join(&self.custom_file)
    }

    /// `<dir>/<prefix><safe name>.lut`
    pub fn chatter_path(&self, preset_name: &str) -> PathBuf {
        self.dir.join(format!("{}{}.lut", self.chatter_prefix, safe_name(preset_name)))
    }
}

/// A uniform sweep `[start, stop]` with `samples` points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub start: f64,  // deg
    pub stop: f64,   // deg
    pub samples: usize,
}

impl Sweep {
    pub fn series(&self) -> Result<SlipAngleSeries> {
        SlipAngleSeries::linspace(self.start, self.stop, self.samples)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolution {
    pub custom: Sweep,
    pub chatter: Sweep,
    pub brush: Sweep,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            custom: Sweep { start: 0.0, stop: 15.0, samples: 151 },
            chatter: Sweep { start: 0.0, stop: 20.0, samples: 201 },
            brush: Sweep { start: 0.0, stop: 15.0, samples: 100 },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub output: OutputConfig,
    pub resolution: Resolution,
    pub tire: CurveParameters,
    pub loads: Vec<f64>,
    pub chatter: Vec<ChatterPreset>,
    pub brush: Vec<BrushPreset>,
    pub falloff_speeds: Vec<f64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            resolution: Resolution::default(),
            tire: scenarios::GT86_SSC,
            loads: scenarios::LOAD_SWEEP.to_vec(),
            chatter: scenarios::chatter_presets(),
            brush: scenarios::brush_presets(),
            falloff_speeds: scenarios::FALLOFF_SPEED_SWEEP.to_vec(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: RunConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks every parameter set up front so a bad config fails before any file is written.
    pub fn validate(&self) -> Result<()> {
        self.tire.validate()?;
        self.resolution.custom.series()?;
        self.resolution.chatter.series()?;
        self.resolution.brush.series()?;
        for p in &self.chatter {
            p.config.validate()?;
        }
        for p in &self.brush {
            p.params.validate()?;
        }
        for &l in &self.loads {
            if !(l.is_finite() && l > 0.0) {
                return Err(CurveError::InvalidParameter { name: "loads", value: l, expected: "> 0" });
            }
        }
        for &speed in &self.falloff_speeds {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(CurveError::InvalidParameter { name: "falloff_speeds", value: speed, expected: "> 0" });
            }
        }
        Ok(())
    }
}
