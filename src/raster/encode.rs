//! Output encoding.
//!
//! | Format | Alpha | Settings                                  |
//! |--------|-------|-------------------------------------------|
//! | PNG    | yes   | best compression, adaptive filtering      |
//! | JPEG   | no    | fixed quality (default 85)                |
//! | WebP   | yes   | lossless                                  |
//!
//! Images are normalised to a colour type the target encoder accepts before
//! encoding, so an RGBA or grey+alpha source written as JPEG becomes plain
//! RGB instead of failing.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageError};

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Encoded output format, derived from the destination extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// Extensions this encoder stack can write.
    pub const EXTENSIONS: &'static [&'static str] = &["png", "jpg", "jpeg", "webp"];

    /// Detect format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detect format from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Encoder tuning shared by every variant of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Quality for lossy formats (1-100)
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Convert `img` into a colour type the target encoder accepts.
///
/// Borrows when no conversion is needed.
pub fn normalize_color(img: &DynamicImage, format: OutputFormat) -> Cow<'_, DynamicImage> {
    match format {
        OutputFormat::Jpeg => match img {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(img),
            _ => Cow::Owned(DynamicImage::ImageRgb8(img.to_rgb8())),
        },
        OutputFormat::WebP => match img {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => Cow::Borrowed(img),
            _ if img.color().has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(img.to_rgba8())),
            _ => Cow::Owned(DynamicImage::ImageRgb8(img.to_rgb8())),
        },
        OutputFormat::Png => match img {
            DynamicImage::ImageRgb32F(_) => Cow::Owned(DynamicImage::ImageRgb16(img.to_rgb16())),
            DynamicImage::ImageRgba32F(_) => {
                Cow::Owned(DynamicImage::ImageRgba16(img.to_rgba16()))
            }
            _ => Cow::Borrowed(img),
        },
    }
}

/// Encode `img` to `dest` in `format`, creating parent directories.
///
/// On failure the partially written file is removed, so a truncated output
/// can never look fresh to the incremental gate.
pub fn encode_to_file(
    img: &DynamicImage,
    dest: &Path,
    format: OutputFormat,
    options: EncodeOptions,
) -> Result<(), ImageError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let result = write_encoded(img, dest, format, options);
    if result.is_err() {
        let _ = fs::remove_file(dest);
    }
    result
}

fn write_encoded(
    img: &DynamicImage,
    dest: &Path,
    format: OutputFormat,
    options: EncodeOptions,
) -> Result<(), ImageError> {
    let img = normalize_color(img, format);
    let mut writer = BufWriter::new(File::create(dest)?);

    match format {
        OutputFormat::Png => img.write_with_encoder(PngEncoder::new_with_quality(
            &mut writer,
            CompressionType::Best,
            PngFilter::Adaptive,
        ))?,
        OutputFormat::Jpeg => img.write_with_encoder(JpegEncoder::new_with_quality(
            &mut writer,
            options.jpeg_quality,
        ))?,
        OutputFormat::WebP => img.write_with_encoder(WebPEncoder::new_lossless(&mut writer))?,
    }

    writer.flush()?;
    Ok(())
}
