//! Propagation-loss estimation.
//!
//! Pipeline for one request:
//! 1. Resolve the waveguide position, either detected from the image
//!    (`autoselect`, or when any coordinate is missing) or taken verbatim
//!    from the caller.
//! 2. Cut the signal box around the centerline and blur it.
//! 3. Reduce every column to `ln(mean intensity)`.
//! 4. Fit the signal against a distance axis spanning
//!    `[x_left·L, x_right·L]` and scale the slope by [`LOSS_COEFF`].
//!
//! Either a full [`LossReport`] is produced or an error is returned; there
//! are no partial results.
use crate::diagnostics::{elapsed_ms, TimingBreakdown};
use crate::error::{AnalysisError, Result};
use crate::image::io::load_grayscale_image;
use crate::image::{GrayImageU8, ImageF32, ImageU8};
use crate::locate::{locate_waveguide, DetectedPosition};
use crate::regression::{linear_fit, LinearFit};
use crate::region::{overview_box, signal_box, CropBox, SelectionWindow};
use crate::signal::{blurred_crop, distance_axis, log_mean_signal};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Converts a natural-log decay slope (1/cm) into a loss in dB/cm
/// (`10 / ln 10`).
pub const LOSS_COEFF: f64 = 4.343;

/// Geometry and physical scale of one measurement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeometricParams {
    /// Left edge of the analysed window as a fraction of the sample span.
    pub x_left: f64,
    /// Right edge of the analysed window as a fraction of the sample span.
    pub x_right: f64,
    /// Physical length of the waveguide visible in the image (cm).
    pub waveguide_length: f64,
    /// Half-height in pixels of the signal crop.
    pub y_span: usize,
    /// Half-height in pixels of the overview crop.
    pub y_span_full: usize,
}

impl Default for GeometricParams {
    fn default() -> Self {
        Self {
            x_left: 0.0,
            x_right: 1.0,
            waveguide_length: 1.0,
            y_span: 10,
            y_span_full: 80,
        }
    }
}

impl GeometricParams {
    /// Check the scalar invariants and return the validated window.
    pub fn validate(&self) -> Result<SelectionWindow> {
        if !self.waveguide_length.is_finite() || self.waveguide_length <= 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "waveguide_length={} must be positive",
                self.waveguide_length
            )));
        }
        if self.y_span == 0 {
            return Err(AnalysisError::InvalidParameter(
                "y_span must be positive".to_string(),
            ));
        }
        SelectionWindow::new(self.x_left, self.x_right)
    }
}

/// Inputs of [`calculate_loss`].
///
/// Manual coordinates are only used when all three are present and
/// `autoselect` is off.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LossRequest {
    pub params: GeometricParams,
    pub x_start: Option<usize>,
    pub x_end: Option<usize>,
    pub y_center: Option<usize>,
    pub autoselect: bool,
}

impl LossRequest {
    /// Request with automatic waveguide detection.
    pub fn new(params: GeometricParams) -> Self {
        Self {
            params,
            autoselect: true,
            ..Default::default()
        }
    }

    /// Supply a manual position and turn autoselect off.
    pub fn with_position(mut self, position: DetectedPosition) -> Self {
        self.x_start = Some(position.x_start);
        self.x_end = Some(position.x_end);
        self.y_center = Some(position.y_center);
        self.autoselect = false;
        self
    }

    pub fn with_autoselect(mut self, autoselect: bool) -> Self {
        self.autoselect = autoselect;
        self
    }

    fn manual_position(&self) -> Option<DetectedPosition> {
        if self.autoselect {
            return None;
        }
        Some(DetectedPosition {
            x_start: self.x_start?,
            x_end: self.x_end?,
            y_center: self.y_center?,
        })
    }
}

/// Everything one analysis produces: the loss, the fit, and the artefacts a
/// plotting front-end draws.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LossReport {
    pub position: DetectedPosition,
    pub signal_box: CropBox,
    pub overview_box: CropBox,
    /// `ln(mean intensity)` per column of the signal box.
    pub signal: Vec<f64>,
    /// Distance (cm) of every signal sample.
    pub distance: Vec<f64>,
    pub fit: LinearFit,
    pub loss_db_per_cm: f64,
    pub timings: TimingBreakdown,
}

impl LossReport {
    /// Fitted line evaluated on the distance axis.
    pub fn fitted_line(&self) -> Vec<f64> {
        self.distance.iter().map(|&x| self.fit.predict(x)).collect()
    }
}

/// Estimate the propagation loss of the waveguide in `img`.
pub fn calculate_loss(img: &ImageU8<'_>, request: &LossRequest) -> Result<LossReport> {
    let t0 = Instant::now();
    let mut timings = TimingBreakdown::default();
    let params = request.params;
    let window = params.validate()?;

    let position = match request.manual_position() {
        Some(pos) => {
            if pos.x_start >= pos.x_end {
                return Err(AnalysisError::InvalidParameter(format!(
                    "x_start={} must be left of x_end={}",
                    pos.x_start, pos.x_end
                )));
            }
            pos
        }
        None => locate_waveguide(img, window.x_left, window.x_right)?,
    };
    let mark = timings.lap("locate", t0);

    let bbox = signal_box(&position, window, params.waveguide_length, params.y_span);
    let blurred = blurred_crop(img, &bbox)?;
    let signal = log_mean_signal(&blurred);
    let mark = timings.lap("crop_blur", mark);

    let length = params.waveguide_length;
    let distance = distance_axis(window.x_left * length, window.x_right * length, signal.len());
    let fit = linear_fit(&distance, &signal)?;
    let loss_db_per_cm = fit.slope * LOSS_COEFF;
    timings.lap("regression", mark);
    timings.total_ms = elapsed_ms(t0);

    debug!(
        "calculate_loss position={position:?} box={bbox:?} samples={} slope={:.6} loss={loss_db_per_cm:.4} dB/cm r2={:.4}",
        signal.len(),
        fit.slope,
        fit.r_squared
    );

    Ok(LossReport {
        position,
        signal_box: bbox,
        overview_box: overview_box(&position, img.w, img.h, params.y_span_full),
        signal,
        distance,
        fit,
        loss_db_per_cm,
        timings,
    })
}

/// Session holding the most recently loaded image.
#[derive(Clone, Debug, Default)]
pub struct WaveguideAnalyzer {
    image: Option<GrayImageU8>,
}

impl WaveguideAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path` and make it the current image. On failure the
    /// previous image is kept.
    pub fn load_image(&mut self, path: &Path) -> Result<&GrayImageU8> {
        let image = load_grayscale_image(path)?;
        Ok(&*self.image.insert(image))
    }

    pub fn set_image(&mut self, image: GrayImageU8) {
        self.image = Some(image);
    }

    pub fn image(&self) -> Result<&GrayImageU8> {
        self.image.as_ref().ok_or(AnalysisError::NoImage)
    }

    pub fn locate(&self, x_left: f64, x_right: f64) -> Result<DetectedPosition> {
        locate_waveguide(&self.image()?.as_view(), x_left, x_right)
    }

    pub fn calculate_loss(&self, request: &LossRequest) -> Result<LossReport> {
        calculate_loss(&self.image()?.as_view(), request)
    }

    /// Full-width band of `±y_span_full` rows around the centerline.
    pub fn overview(&self, position: &DetectedPosition, y_span_full: usize) -> Result<GrayImageU8> {
        let image = self.image()?;
        let bbox = overview_box(position, image.width(), image.height(), y_span_full);
        let view = image.as_view();
        let band = view.crop(&bbox).ok_or_else(|| {
            AnalysisError::EmptyRegion(format!("overview box {bbox:?} is empty"))
        })?;
        Ok(GrayImageU8::from_view(&band))
    }

    /// Blurred signal region of a previous report, as shown in close-ups.
    pub fn signal_crop(&self, report: &LossReport) -> Result<ImageF32> {
        blurred_crop(&self.image()?.as_view(), &report.signal_box)
    }
}
