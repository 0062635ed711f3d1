//! tire_curve - slip angle -> lateral force curve synthesis (pure types + builders)

pub mod error;
pub mod types;
pub mod load;
pub mod piecewise;
pub mod brush;
pub mod chatter;
pub mod lut;

pub use error::{CurveError, Result};
pub use types::*;
pub use lut::{LutDocument, normalize};
