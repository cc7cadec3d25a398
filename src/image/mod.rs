//! Single-channel raster types and file I/O.
//!
//! - `ImageU8`: borrowed 8-bit view with an explicit stride, so crops are
//!   zero-copy sub-views of the parent buffer.
//! - `ImageF32`: owned float buffer used by the blur and signal stages.
//! - `io::GrayImageU8`: owned 8-bit buffer produced by the loader.
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::io::GrayImageU8;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
