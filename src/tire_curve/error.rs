//! Error type shared by every curve builder and the LUT codec.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CurveError>;

#[derive(Debug, Error)]
pub enum CurveError {
    /// `(load / fz0) ^ ls_exp` has no finite real value for these inputs.
    #[error("load scaling undefined: load {load} N, fz0 {fz0} N, exponent {exponent}")]
    Domain { load: f64, fz0: f64, exponent: f64 },

    /// Normalization needs a strictly positive peak.
    #[error("cannot normalize a curve whose peak is {peak}")]
    DegenerateCurve { peak: f64 },

    #[error("slip angles must be strictly increasing: [{index}] = {current} after {previous}")]
    NonIncreasingAngles { index: usize, previous: f64, current: f64 },

    #[error("slip angle [{index}] = {value} is not a finite, non-negative degree value")]
    InvalidAngle { index: usize, value: f64 },

    #[error("length mismatch: {angles} slip angles vs {forces} forces")]
    LengthMismatch { angles: usize, forces: usize },

    #[error("invalid {name} = {value} (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("malformed LUT line {line}: {reason}")]
    MalformedLut { line: usize, reason: String },

    #[error("LUT write to {} failed: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CurveError {
    /// True for the boundary-rejection family (bad angles, mismatched arrays).
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            CurveError::NonIncreasingAngles { .. }
                | CurveError::InvalidAngle { .. }
                | CurveError::LengthMismatch { .. }
        )
    }
}

/// Rejects `value` unless `ok` holds. Keeps parameter validation one line each.
pub(crate) fn ensure(ok: bool, name: &'static str, value: f64, expected: &'static str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(CurveError::InvalidParameter { name, value, expected })
    }
}
