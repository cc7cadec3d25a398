use crate::region::CropBox;

/// Borrowed 8-bit grayscale view. `stride` may exceed `w` for sub-views.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Zero-copy sub-view over `bbox` (half-open on both axes).
    ///
    /// Returns `None` when the box is empty or not fully inside the image.
    pub fn crop(&self, bbox: &CropBox) -> Option<ImageU8<'a>> {
        if bbox.is_empty() || !bbox.fits_within(self.w, self.h) {
            return None;
        }
        let (x0, y0) = (bbox.x0 as usize, bbox.y0 as usize);
        let (w, h) = (bbox.width(), bbox.height());
        let start = y0 * self.stride + x0;
        let end = start + (h - 1) * self.stride + w;
        Some(ImageU8 {
            w,
            h,
            stride: self.stride,
            data: &self.data[start..end],
        })
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
