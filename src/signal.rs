//! Signal extraction: blurred crop, per-column log-mean, distance axis.
use crate::error::{AnalysisError, Result};
use crate::filters::{apply as apply_filter, GAUSSIAN_BLUR};
use crate::image::{ImageF32, ImageU8};
use crate::region::CropBox;

/// Crop `bbox` out of `img` and denoise it with the fixed Gaussian blur.
///
/// The box must be non-empty and lie inside the image. The blurred values
/// stay in `f32` and are not requantized to 8 bit, so log-means can differ
/// from an 8-bit blur of the same crop by up to about `0.5 / mean` per
/// column.
pub fn blurred_crop(img: &ImageU8<'_>, bbox: &CropBox) -> Result<ImageF32> {
    let cropped = img.crop(bbox).ok_or_else(|| {
        AnalysisError::EmptyRegion(format!(
            "crop box {bbox:?} is empty or outside a {}x{} image",
            img.w, img.h
        ))
    })?;
    Ok(apply_filter(&GAUSSIAN_BLUR, &ImageF32::from_u8(&cropped)))
}

/// Natural log of the mean intensity of every column.
///
/// A column of mean zero produces `-inf`; callers decide how to treat it.
pub fn log_mean_signal(blurred: &ImageF32) -> Vec<f64> {
    blurred.column_means().into_iter().map(f64::ln).collect()
}

/// `n` evenly spaced samples from `start` to `end`, both inclusive.
pub fn distance_axis(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut axis: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            axis[n - 1] = end;
            axis
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::linear_fit;

    #[test]
    fn distance_axis_spans_both_ends() {
        let axis = distance_axis(0.2, 0.8, 4);
        assert_eq!(axis.len(), 4);
        assert_eq!(axis[0], 0.2);
        assert_eq!(axis[3], 0.8);
        assert!((axis[1] - 0.4).abs() < 1e-12);
        assert_eq!(distance_axis(1.0, 2.0, 1), vec![1.0]);
        assert!(distance_axis(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn uniform_region_gives_flat_log_signal() {
        let data = vec![100u8; 30 * 12];
        let img = ImageU8 {
            w: 30,
            h: 12,
            stride: 30,
            data: &data,
        };
        let blurred = blurred_crop(&img, &CropBox::new(5, 2, 25, 10)).unwrap();
        let signal = log_mean_signal(&blurred);
        assert_eq!(signal.len(), 20);
        for v in signal {
            assert!((v - 100f64.ln()).abs() < 1e-5, "v={v}");
        }
    }

    #[test]
    fn box_outside_image_is_rejected() {
        let data = vec![1u8; 10 * 10];
        let img = ImageU8 {
            w: 10,
            h: 10,
            stride: 10,
            data: &data,
        };
        let err = blurred_crop(&img, &CropBox::new(0, -3, 10, 3)).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyRegion(_)));
    }

    #[test]
    fn dark_column_yields_negative_infinity() {
        let blurred = ImageF32::new(3, 2);
        assert!(log_mean_signal(&blurred)
            .iter()
            .all(|v| *v == f64::NEG_INFINITY));
    }

    #[test]
    fn exponential_columns_recover_the_decay_rate() {
        let (start, end, rate) = (0.3, 1.2, 1.7);
        let n = 40;
        let axis = distance_axis(start, end, n);
        let mut img = ImageF32::new(n, 5);
        for y in 0..img.h {
            for (x, d) in axis.iter().enumerate() {
                img.set(x, y, (180.0 * (-rate * d).exp()) as f32);
            }
        }
        let fit = linear_fit(&axis, &log_mean_signal(&img)).unwrap();
        // f32 storage bounds the per-sample log error near 6e-8
        assert!((fit.slope + rate).abs() < 1e-6, "slope={}", fit.slope);
        assert!((fit.intercept - 180f64.ln()).abs() < 1e-6);
        assert!(fit.r_squared > 1.0 - 1e-12);
    }
}
