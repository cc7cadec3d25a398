//! Ordinary least-squares line fit with the usual goodness-of-fit figures.
use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Result of fitting `y ≈ slope·x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient, in `[-1, 1]`.
    pub r_value: f64,
    pub r_squared: f64,
    /// Standard error of the slope.
    pub stderr: f64,
    /// Standard error of the intercept.
    pub intercept_stderr: f64,
    pub n_samples: usize,
}

impl LinearFit {
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `(x[i], y[i])`.
///
/// Requires at least two finite samples and a non-constant `x`. A constant
/// `y` fits with zero slope and a correlation of zero.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    if x.len() != y.len() {
        return Err(AnalysisError::InvalidParameter(format!(
            "x has {} samples but y has {}",
            x.len(),
            y.len()
        )));
    }
    let n = x.len();
    if n < 2 {
        return Err(AnalysisError::DegenerateFit(format!(
            "{n} sample(s), at least 2 required"
        )));
    }
    if let Some(i) = x
        .iter()
        .zip(y)
        .position(|(a, b)| !a.is_finite() || !b.is_finite())
    {
        return Err(AnalysisError::DegenerateFit(format!(
            "non-finite sample at index {i} (x={}, y={})",
            x[i], y[i]
        )));
    }

    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;
    let (mut ssxm, mut ssym, mut ssxym) = (0.0f64, 0.0f64, 0.0f64);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        ssxm += dx * dx;
        ssym += dy * dy;
        ssxym += dx * dy;
    }
    ssxm /= nf;
    ssym /= nf;
    ssxym /= nf;

    if ssxm == 0.0 {
        return Err(AnalysisError::DegenerateFit(
            "distance axis has no spread".to_string(),
        ));
    }

    let r_value = if ssym == 0.0 {
        0.0
    } else {
        (ssxym / (ssxm * ssym).sqrt()).clamp(-1.0, 1.0)
    };
    let slope = ssxym / ssxm;
    let intercept = y_mean - slope * x_mean;

    let (stderr, intercept_stderr) = if n == 2 {
        (0.0, 0.0)
    } else {
        let df = (n - 2) as f64;
        let s = ((1.0 - r_value * r_value) * ssym / ssxm / df).max(0.0).sqrt();
        (s, s * (ssxm + x_mean * x_mean).sqrt())
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_value,
        r_squared: r_value * r_value,
        stderr,
        intercept_stderr,
        n_samples: n,
    })
}
