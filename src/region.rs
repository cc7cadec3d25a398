//! Crop geometry: selection windows and the rectangles cut from the frame.
//!
//! All boxes are half-open `[x0, x1) × [y0, y1)` in pixel coordinates and
//! may be built with negative or oversized extents; validity against a
//! concrete image is checked with [`CropBox::fits_within`].
use crate::error::{AnalysisError, Result};
use crate::locate::DetectedPosition;
use serde::{Deserialize, Serialize};

/// Pixel rectangle, half-open on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropBox {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl CropBox {
    pub const fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0).max(0) as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0).max(0) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True when the box lies entirely inside a `w × h` image.
    pub fn fits_within(&self, w: usize, h: usize) -> bool {
        self.x0 >= 0 && self.y0 >= 0 && self.x1 <= w as i64 && self.y1 <= h as i64
    }

    /// Intersect with the `w × h` image rectangle.
    pub fn clamp_to(&self, w: usize, h: usize) -> Self {
        let (w, h) = (w as i64, h as i64);
        let x0 = self.x0.clamp(0, w);
        let y0 = self.y0.clamp(0, h);
        Self {
            x0,
            y0,
            x1: self.x1.clamp(x0, w),
            y1: self.y1.clamp(y0, h),
        }
    }
}

/// Fractional window `[x_left, x_right]` of the detected sample span.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionWindow {
    pub x_left: f64,
    pub x_right: f64,
}

impl Default for SelectionWindow {
    fn default() -> Self {
        Self {
            x_left: 0.0,
            x_right: 1.0,
        }
    }
}

impl SelectionWindow {
    /// Validate both fractions lie in `[0, 1]` and enclose a non-empty window.
    pub fn new(x_left: f64, x_right: f64) -> Result<Self> {
        for (name, v) in [("x_left", x_left), ("x_right", x_right)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(AnalysisError::InvalidParameter(format!(
                    "{name}={v} must lie in [0, 1]"
                )));
            }
        }
        if x_left >= x_right {
            return Err(AnalysisError::EmptyRegion(format!(
                "selection window [{x_left}, {x_right}] has zero width"
            )));
        }
        Ok(Self { x_left, x_right })
    }
}

/// Round half to even, matching the rounding used for all pixel bounds.
#[inline]
pub(crate) fn round_px(v: f64) -> i64 {
    v.round_ties_even() as i64
}

/// Pixel count as a signed offset, saturating for counts past `i64::MAX`.
#[inline]
fn span_px(span: usize) -> i64 {
    i64::try_from(span).unwrap_or(i64::MAX)
}

/// Region the loss signal is extracted from.
///
/// Columns are `[round(x_start + L·x_left), round(x_end + L·x_right))` with
/// `L` the physical waveguide length. The horizontal offset adds a length to
/// a pixel edge; the formula is kept as is for output compatibility with
/// existing measurements even though the units do not agree.
pub fn signal_box(
    position: &DetectedPosition,
    window: SelectionWindow,
    waveguide_length: f64,
    y_span: usize,
) -> CropBox {
    let (yc, y_span) = (span_px(position.y_center), span_px(y_span));
    CropBox {
        x0: round_px(position.x_start as f64 + waveguide_length * window.x_left),
        y0: yc.saturating_sub(y_span),
        x1: round_px(position.x_end as f64 + waveguide_length * window.x_right),
        y1: yc.saturating_add(y_span),
    }
}

/// Full-width band of `±y_span_full` rows around the centerline, clipped
/// to the image. Used for the overview close-up of the whole waveguide.
pub fn overview_box(
    position: &DetectedPosition,
    width: usize,
    height: usize,
    y_span_full: usize,
) -> CropBox {
    let (yc, y_span_full) = (span_px(position.y_center), span_px(y_span_full));
    CropBox {
        x0: 0,
        y0: yc.saturating_sub(y_span_full),
        x1: span_px(width),
        y1: yc.saturating_add(y_span_full),
    }
    .clamp_to(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(x_start: usize, x_end: usize, y_center: usize) -> DetectedPosition {
        DetectedPosition {
            x_start,
            x_end,
            y_center,
        }
    }

    #[test]
    fn selection_window_validation() {
        assert!(SelectionWindow::new(0.2, 0.8).is_ok());
        assert!(matches!(
            SelectionWindow::new(0.5, 0.5),
            Err(AnalysisError::EmptyRegion(_))
        ));
        assert!(matches!(
            SelectionWindow::new(0.7, 0.3),
            Err(AnalysisError::EmptyRegion(_))
        ));
        assert!(matches!(
            SelectionWindow::new(-0.1, 0.5),
            Err(AnalysisError::InvalidParameter(_))
        ));
        assert!(matches!(
            SelectionWindow::new(0.0, f64::NAN),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_px(2.5), 2);
        assert_eq!(round_px(3.5), 4);
        assert_eq!(round_px(-0.5), 0);
        assert_eq!(round_px(10.6), 11);
    }

    #[test]
    fn signal_box_adds_length_offset_to_pixel_edges() {
        let window = SelectionWindow::new(0.25, 0.75).unwrap();
        let bbox = signal_box(&position(10, 90, 25), window, 2.0, 5);
        // 10 + 2·0.25 = 10.5 → 10, 90 + 2·0.75 = 91.5 → 92
        assert_eq!(bbox, CropBox::new(10, 20, 92, 30));
        assert_eq!((bbox.width(), bbox.height()), (82, 10));
    }

    #[test]
    fn overview_box_is_clipped_to_the_frame() {
        let bbox = overview_box(&position(10, 90, 5), 100, 50, 80);
        assert_eq!(bbox, CropBox::new(0, 0, 100, 50));
        let bbox = overview_box(&position(10, 90, 25), 100, 50, 10);
        assert_eq!(bbox, CropBox::new(0, 15, 100, 35));
    }

    #[test]
    fn huge_spans_saturate_instead_of_overflowing() {
        let window = SelectionWindow::default();
        let bbox = signal_box(&position(10, 90, 25), window, 1.0, 1 << 62);
        assert!(!bbox.fits_within(100, 50));
        assert_eq!(bbox.height(), i64::MAX as usize);
        let bbox = signal_box(&position(10, 90, 25), window, 1.0, usize::MAX);
        assert_eq!((bbox.y0, bbox.y1), (i64::MIN + 26, i64::MAX));

        let bbox = overview_box(&position(10, 90, 25), 100, 50, usize::MAX / 2);
        assert_eq!(bbox, CropBox::new(0, 0, 100, 50));
    }

    #[test]
    fn fits_within_checks_every_edge() {
        assert!(CropBox::new(0, 0, 10, 10).fits_within(10, 10));
        assert!(!CropBox::new(0, 0, 11, 10).fits_within(10, 10));
        assert!(!CropBox::new(-1, 0, 5, 10).fits_within(10, 10));
        assert!(CropBox::new(4, 4, 4, 8).is_empty());
    }
}
