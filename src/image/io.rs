//! I/O helpers for grayscale images and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/TIFF/BMP into an owned 8-bit gray buffer.
//! - `save_grayscale_f32`: write an `ImageF32` (8-bit scale) to a grayscale PNG.
//! - `save_grayscale_u8`: write an owned 8-bit gray buffer to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageU8, ImageView};
use crate::error::{AnalysisError, Result};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with stride and borrowed view conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    ///
    /// Returns `None` if `data` does not hold exactly `width * height` samples.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            stride: width,
            data,
        })
    }

    /// Copy a (possibly strided) view into a tightly packed buffer.
    pub fn from_view(view: &ImageU8<'_>) -> Self {
        let mut data = Vec::with_capacity(view.w * view.h);
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self {
            width: view.w,
            height: view.h,
            stride: view.w,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
///
/// Colour inputs go through the `image` crate's luma conversion
/// (Rec. 601 weights). The file is closed once decoding returns.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8> {
    let img = image::open(path)
        .map_err(|source| AnalysisError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    debug!("loaded {} ({width}x{height})", path.display());
    let data = img.into_raw();
    Ok(GrayImageU8 {
        width,
        height,
        stride: width,
        data,
    })
}

/// Save a float image to a grayscale PNG, clamping values in [0, 255].
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        let row = image.row(y);
        for (x, &px) in row.iter().enumerate() {
            let v = px.round().clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path).map_err(|e| export_error(path, e))
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(buffer.width as u32, buffer.height as u32, buffer.data.clone())
            .ok_or_else(|| export_error(path, "buffer size does not match dimensions"))?;
    DynamicImage::ImageLuma8(image)
        .save(path)
        .map_err(|e| export_error(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| export_error(path, e))?;
    fs::write(path, json).map_err(|e| export_error(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| export_error(parent, e))?;
        }
    }
    Ok(())
}

fn export_error(path: &Path, err: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Export {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
