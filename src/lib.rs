#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod locate;

// Building blocks of the analysis, public for tools and tests.
pub mod filters;
pub mod projection;
pub mod region;
pub mod regression;
pub mod signal;

// --- High-level re-exports -------------------------------------------------

pub use crate::analyzer::{
    calculate_loss, GeometricParams, LossReport, LossRequest, WaveguideAnalyzer, LOSS_COEFF,
};
pub use crate::error::{AnalysisError, Result};
pub use crate::image::io::load_grayscale_image;
pub use crate::locate::{locate_waveguide, DetectedPosition};
pub use crate::regression::LinearFit;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use waveguide_loss::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> waveguide_loss::Result<()> {
/// let mut analyzer = WaveguideAnalyzer::new();
/// analyzer.load_image(Path::new("sample.png"))?;
/// let report = analyzer.calculate_loss(&LossRequest::new(GeometricParams {
///     x_left: 0.2,
///     x_right: 0.8,
///     waveguide_length: 1.5,
///     ..Default::default()
/// }))?;
/// println!("loss={:.2} dB/cm r2={:.3}", report.loss_db_per_cm, report.fit.r_squared);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayImageU8, ImageU8};
    pub use crate::{GeometricParams, LossReport, LossRequest, WaveguideAnalyzer};
}
