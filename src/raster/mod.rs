//! Raster resizing and encoding.
//!
//! # Modules
//!
//! - [`resize`]: Aspect-preserving width-driven resampling
//! - [`encode`]: Per-format colour normalisation and optimised encoding

pub mod encode;
pub mod resize;

pub use encode::{DEFAULT_JPEG_QUALITY, EncodeOptions, OutputFormat, encode_to_file};
pub use resize::resize_to_width;
