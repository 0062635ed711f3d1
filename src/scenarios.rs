// src/scenarios.rs
//
// Named parameter sets used by the generators. Values come from the GT86 SSC
// car setup plus a few comparison tires.

use serde::{Deserialize, Serialize};

use crate::tire_curve::{BrushParameters, BrushPeak, ChatterConfig, CurveParameters};

pub const GT86_REFERENCE_LOAD: f64 = 2494.0; // N

pub const GT86_SSC: CurveParameters = CurveParameters {
    dy_ref: 1.26,      // lateral grip at fz0
    fz0: 2494.0,       // N
    ls_exp: 0.8119,    // load sensitivity exponent
    vertical_load: GT86_REFERENCE_LOAD,
};

/// Light to very heavy loading, N.
pub const LOAD_SWEEP: [f64; 5] = [2000.0, GT86_REFERENCE_LOAD, 3000.0, 3500.0, 4000.0];

/// Loads reported in the load-scaling table.
pub const LOAD_EXAMPLES: [f64; 3] = [2000.0, 3000.0, 4000.0];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatterPreset {
    pub name: String,
    #[serde(flatten)]
    pub config: ChatterConfig,
}

impl ChatterPreset {
    fn new(name: &str, intensity: f64, frequency: f64, start_angle: f64) -> Self {
        Self {
            name: name.to_string(),
            config: ChatterConfig { start_angle, intensity, frequency },
        }
    }
}

pub fn chatter_presets() -> Vec<ChatterPreset> {
    vec![
        ChatterPreset::new("Subtle Chatter", 0.08, 1.5, 12.0),
        ChatterPreset::new("Moderate Chatter", 0.15, 2.0, 10.0),
        ChatterPreset::new("Aggressive Chatter", 0.25, 3.0, 9.0),
        ChatterPreset::new("High-Freq Buzz", 0.12, 4.0, 11.0),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushPreset {
    pub name: String,
    #[serde(flatten)]
    pub params: BrushParameters,
}

pub fn brush_presets() -> Vec<BrushPreset> {
    vec![
        BrushPreset {
            name: "GT86 SSC Current (RT660)".into(),
            params: BrushParameters::new(1.26, 8.5, 0.6, 8.0),
        },
        BrushPreset {
            // higher peak, earlier limit, gentler breakaway
            name: "Research Optimized".into(),
            params: BrushParameters::new(1.30, 6.0, 0.75, 4.0),
        },
        BrushPreset {
            name: "Street Tire Reference".into(),
            params: BrushParameters::new(1.10, 4.5, 0.8, 2.0),
        },
    ]
}

pub const FALLOFF_SPEED_SWEEP: [f64; 6] = [2.0, 4.0, 6.0, 8.0, 12.0, 16.0];

/// The stock sim curve the custom one is compared against.
pub fn stock_comparison() -> BrushParameters {
    BrushParameters::new(GT86_SSC.dy_ref, 8.5, 0.6, 8.0).with_peak(BrushPeak::Reference)
}
