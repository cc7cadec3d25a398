//! Waveguide localization from intensity projections.
//!
//! The sample edges show up as the brightest columns of the frame. The
//! column projection is split at `width / 2` and each half is searched
//! separately, so the two edges are expected to straddle the image center.
//! The centerline is the brightest row inside the selected column window.
use crate::error::{AnalysisError, Result};
use crate::image::ImageU8;
use crate::projection::{argmax, column_projection, row_projection};
use crate::region::{round_px, CropBox, SelectionWindow};
use log::debug;
use serde::{Deserialize, Serialize};

/// Sample edges and centerline of the waveguide, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedPosition {
    pub x_start: usize,
    pub x_end: usize,
    pub y_center: usize,
}

impl DetectedPosition {
    /// Pixel columns `[x_left_px, x_right_px)` covered by `window`.
    pub fn selection_columns(&self, window: SelectionWindow) -> (i64, i64) {
        let span = (self.x_end as f64) - (self.x_start as f64);
        let x0 = self.x_start as i64;
        (
            x0 + round_px(span * window.x_left),
            x0 + round_px(span * window.x_right),
        )
    }
}

/// Sample edges from the column projection: brightest column of each half.
pub fn find_edges(img: &ImageU8<'_>) -> Result<(usize, usize)> {
    let proj = column_projection(img);
    let mid = img.w / 2;
    let (left, right) = proj.split_at(mid);
    let (Some(x_start), Some(right_peak)) = (argmax(left), argmax(right)) else {
        return Err(AnalysisError::EmptyRegion(format!(
            "cannot search projection halves of a {}x{} image",
            img.w, img.h
        )));
    };
    if img.h == 0 {
        return Err(AnalysisError::EmptyRegion("image has no rows".to_string()));
    }
    Ok((x_start, mid + right_peak))
}

/// Locate the waveguide and its centerline inside the `[x_left, x_right]`
/// fraction of the detected sample span.
pub fn locate_waveguide(img: &ImageU8<'_>, x_left: f64, x_right: f64) -> Result<DetectedPosition> {
    let window = SelectionWindow::new(x_left, x_right)?;
    let (x_start, x_end) = find_edges(img)?;

    let partial = DetectedPosition {
        x_start,
        x_end,
        y_center: 0,
    };
    let (x_left_px, x_right_px) = partial.selection_columns(window);
    let area = CropBox::new(x_left_px, 0, x_right_px, img.h as i64);
    let cropped = img.crop(&area).ok_or_else(|| {
        AnalysisError::EmptyRegion(format!(
            "selection columns [{x_left_px}, {x_right_px}) are empty or outside a {}x{} image",
            img.w, img.h
        ))
    })?;
    let y_center = argmax(&row_projection(&cropped))
        .ok_or_else(|| AnalysisError::EmptyRegion("selection has no rows".to_string()))?;

    debug!(
        "locate_waveguide edges=({x_start}, {x_end}) selection=[{x_left_px}, {x_right_px}) y_center={y_center}"
    );
    Ok(DetectedPosition {
        x_start,
        x_end,
        y_center,
    })
}
