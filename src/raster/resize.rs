//! Width-driven resizing.
//!
//! Every variant is computed from the original decoded image, never from a
//! previously resized one, so rounding error does not compound across scales.

use image::DynamicImage;
use image::imageops::FilterType;

/// Resampling filter for all variants.
///
/// Lanczos3 keeps downscaled icons free of aliasing when the source is much
/// larger than the base width.
const FILTER: FilterType = FilterType::Lanczos3;

/// Compute output dimensions for a target width.
///
/// Returns `None` for a non-positive target width or an empty original.
/// Height is `round(target_width * height / width)`, clamped to at least 1.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn target_dimensions(original: (u32, u32), target_width: i64) -> Option<(u32, u32)> {
    let (width, height) = original;
    if target_width <= 0 || width == 0 || height == 0 {
        return None;
    }
    let target_width = u32::try_from(target_width).ok()?;

    let target_height =
        (f64::from(target_width) * f64::from(height) / f64::from(width)).round() as u32;
    Some((target_width, target_height.max(1)))
}

/// Resize `img` to `target_width`, preserving its aspect ratio.
///
/// Returns `None` (nothing to write) when the target width is not positive.
pub fn resize_to_width(img: &DynamicImage, target_width: i64) -> Option<DynamicImage> {
    let (width, height) = target_dimensions((img.width(), img.height()), target_width)?;
    if (width, height) == (img.width(), img.height()) {
        return Some(img.clone());
    }
    Some(img.resize_exact(width, height, FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_target_dimensions_preserves_aspect() {
        assert_eq!(target_dimensions((600, 400), 300), Some((300, 200)));
        assert_eq!(target_dimensions((600, 400), 900), Some((900, 600)));
        // 333 * 400 / 600 = 222
        assert_eq!(target_dimensions((600, 400), 333), Some((333, 222)));
    }

    #[test]
    fn test_target_dimensions_rounds_height() {
        // 100 * 3 / 7 = 42.857 → 43
        assert_eq!(target_dimensions((7, 3), 100), Some((100, 43)));
        // 10 * 1 / 4 = 2.5 → 3
        assert_eq!(target_dimensions((4, 1), 10), Some((10, 3)));
    }

    #[test]
    fn test_target_dimensions_non_positive() {
        assert_eq!(target_dimensions((600, 400), 0), None);
        assert_eq!(target_dimensions((600, 400), -5), None);
    }

    #[test]
    fn test_target_dimensions_extreme_aspect_clamps_height() {
        assert_eq!(target_dimensions((10_000, 1), 10), Some((10, 1)));
    }

    #[test]
    fn test_resize_to_width() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 32, Rgba([10, 20, 30, 255])));

        let out = resize_to_width(&img, 16).unwrap();
        assert_eq!((out.width(), out.height()), (16, 8));

        let out = resize_to_width(&img, 128).unwrap();
        assert_eq!((out.width(), out.height()), (128, 64));

        assert!(resize_to_width(&img, 0).is_none());
    }

    #[test]
    fn test_repeated_scaling_uses_original() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(999, 333));
        // Each width is computed from the 999x333 original.
        for (w, h) in [(300, 100), (600, 200), (900, 300)] {
            let out = resize_to_width(&img, w).unwrap();
            assert_eq!((out.width(), out.height()), (w as u32, h));
        }
    }
}
