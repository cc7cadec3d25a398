//! Separable smoothing filters applied before signal extraction.
//!
//! A filter is a 1D kernel run horizontally then vertically. Border samples
//! clamp to the image extents (replicate border), so a constant image stays
//! constant after filtering.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        GAUSSIAN_BLUR
    }
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Sampled Gaussian with σ = 2 px, truncated at 3σ (13 taps), normalised.
pub const GAUSSIAN_BLUR: StaticSeparableFilter = StaticSeparableFilter::new(&[
    0.0022182, 0.00877313, 0.02702316, 0.06482519, 0.12110939, 0.17621312, 0.19967563,
    0.17621312, 0.12110939, 0.06482519, 0.02702316, 0.00877313, 0.0022182,
]);

/// Apply `filter` along x then y, returning a new image of the same size.
pub fn apply(filter: &dyn SeparableFilter, input: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    let (w, h) = (input.w, input.h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 || taps.is_empty() {
        return out;
    }
    let center = (taps.len() / 2) as isize;
    let clamp = |i: isize, n: usize| i.clamp(0, n as isize - 1) as usize;

    // horizontal
    let mut tmp = ImageF32::new(w, h);
    for y in 0..h {
        let src = input.row(y);
        let dst = tmp.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &t) in taps.iter().enumerate() {
                acc += t * src[clamp(x as isize + k as isize - center, w)];
            }
            *px = acc;
        }
    }

    // vertical
    for y in 0..h {
        let mut acc = vec![0.0f32; w];
        for (k, &t) in taps.iter().enumerate() {
            let src = tmp.row(clamp(y as isize + k as isize - center, h));
            for (a, &v) in acc.iter_mut().zip(src) {
                *a += t * v;
            }
        }
        out.row_mut(y).copy_from_slice(&acc);
    }
    out
}
