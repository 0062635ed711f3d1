//! Lateral force curve synthesis for sim tire models, with LUT export.

pub mod tire_curve;
pub mod analysis;
pub mod config;
pub mod generate;
pub mod scenarios;

pub use tire_curve::{CurveError, Result};
