//! Image to classifier-input normalization.
//!
//! The pipeline is resize -> grayscale -> scale to `[0, 1]` -> invert ->
//! flatten. The resampling step is delegated to a [`Resizer`] so the
//! algorithm can be swapped without touching the rest.

use std::borrow::Cow;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, Luma};
use tracing::debug;
use crate::digit_pipeline::common::error::{InferenceError, Result};
use crate::digit_pipeline::normalize::area_resizer::AreaAverageResizer;
use crate::digit_pipeline::normalize::resizer::Resizer;
use crate::digit_pipeline::normalize::types::{
    InputConvention, NormalizedVector, INPUT_HEIGHT, INPUT_LEN, INPUT_WIDTH,
};

/// Decodes an in-memory image, guessing its format from the content.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    debug!("Decoding image, {} bytes", data.len());

    let image = image::load_from_memory(data)
        .map_err(|e| InferenceError::ImageDecodeError(e.to_string()))?;

    debug!("Decoded image: {}x{} {:?}", image.width(), image.height(), image.color());
    Ok(image)
}

/// Reads an image file into memory. The file handle is released before returning.
pub fn read_image_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path)
        .map_err(|e| InferenceError::ImageDecodeError(format!("{}: {}", path.display(), e)))
}

/// Flattens transparency onto a black background as 16-bit luminance, so the
/// resizer never averages the colour of fully transparent pixels into
/// opaque ones. Opaque layouts are passed through untouched.
fn composite_over_black(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    if !image.color().has_alpha() {
        return Cow::Borrowed(image);
    }

    let luma_alpha = image.to_luma_alpha16();
    let composited = ImageBuffer::from_fn(luma_alpha.width(), luma_alpha.height(), |x, y| {
        let [luma, alpha] = luma_alpha.get_pixel(x, y).0;
        let value = (luma as u32 * alpha as u32 + u16::MAX as u32 / 2) / u16::MAX as u32;
        Luma([value as u16])
    });

    Cow::Owned(DynamicImage::ImageLuma16(composited))
}

/// 8-bit luminance of every pixel, row-major. Any alpha left by the resizer
/// is composited over black.
fn to_luminance(image: &DynamicImage) -> Vec<u8> {
    if image.color().has_alpha() {
        image
            .to_luma_alpha8()
            .pixels()
            .map(|p| {
                let [luma, alpha] = p.0;
                ((luma as u16 * alpha as u16 + 127) / 255) as u8
            })
            .collect()
    } else {
        image.to_luma8().into_raw()
    }
}

pub struct ImageNormalizer<R: Resizer> {
    resizer: R,
    convention: InputConvention,
}

impl ImageNormalizer<AreaAverageResizer> {
    pub fn new() -> Self {
        Self::with_resizer(AreaAverageResizer)
    }
}

impl Default for ImageNormalizer<AreaAverageResizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resizer> ImageNormalizer<R> {
    pub fn with_resizer(resizer: R) -> Self {
        Self {
            resizer,
            convention: InputConvention::default(),
        }
    }

    pub fn with_convention(mut self, convention: InputConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Converts `image` into the classifier's 28x28 `[0, 1]` layout.
    ///
    /// Images that are already 28x28 still go through the resizer.
    ///
    /// # Errors
    ///
    /// * `ImageFormatError` - the image has no pixels or the resampled
    ///   buffer does not yield one luminance sample per input cell
    pub fn normalize(&self, image: &DynamicImage) -> Result<NormalizedVector> {
        if image.width() == 0 || image.height() == 0 {
            return Err(InferenceError::ImageFormatError(format!(
                "image has no pixels: {}x{}",
                image.width(),
                image.height()
            )));
        }

        let opaque = composite_over_black(image);
        let resized = self.resizer.resize(&opaque, INPUT_WIDTH, INPUT_HEIGHT)?;
        if resized.width() != INPUT_WIDTH || resized.height() != INPUT_HEIGHT {
            return Err(InferenceError::ImageFormatError(format!(
                "resizer produced {}x{}, expected {}x{}",
                resized.width(),
                resized.height(),
                INPUT_WIDTH,
                INPUT_HEIGHT
            )));
        }

        let luminance = to_luminance(&resized);
        if luminance.len() != INPUT_LEN {
            return Err(InferenceError::ImageFormatError(format!(
                "extracted {} luminance samples, expected {}",
                luminance.len(),
                INPUT_LEN
            )));
        }

        let values = luminance
            .into_iter()
            .map(|g| self.convention.scale(g))
            .collect();

        debug!("Normalized {}x{} image ({:?})", image.width(), image.height(), self.convention);
        NormalizedVector::new(values)
    }

    pub fn normalize_bytes(&self, data: &[u8]) -> Result<NormalizedVector> {
        let image = decode_image(data)?;
        self.normalize(&image)
    }

    pub fn normalize_file<P: AsRef<Path>>(&self, path: P) -> Result<NormalizedVector> {
        let data = read_image_file(path)?;
        self.normalize_bytes(&data)
    }

    pub fn convention(&self) -> InputConvention {
        self.convention
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digit_pipeline::normalize::filter_resizer::{FilterResizer, SmoothFilter};
    use image::{GrayImage, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    fn solid_gray(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    #[test]
    fn test_white_image_is_all_zero() {
        let vector = ImageNormalizer::new().normalize(&solid_gray(28, 28, 255)).unwrap();

        assert_eq!(vector.len(), INPUT_LEN);
        assert!(vector.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_black_image_is_all_one() {
        let vector = ImageNormalizer::new().normalize(&solid_gray(28, 28, 0)).unwrap();

        assert_eq!(vector.len(), INPUT_LEN);
        assert!(vector.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_light_ink_convention_skips_inversion() {
        let normalizer = ImageNormalizer::new().with_convention(InputConvention::LightInkOnDark);
        assert_eq!(normalizer.convention(), InputConvention::LightInkOnDark);
        let vector = normalizer.normalize(&solid_gray(28, 28, 255)).unwrap();

        assert!(vector.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_arbitrary_sizes_yield_784_values_in_range() {
        let normalizer = ImageNormalizer::new();
        for (w, h) in [(1, 1), (5, 97), (56, 56), (640, 480), (27, 29)] {
            let image = RgbImage::from_fn(w, h, |x, y| {
                Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
            });
            let vector = normalizer.normalize(&DynamicImage::ImageRgb8(image)).unwrap();

            assert_eq!(vector.len(), INPUT_LEN, "{w}x{h}");
            assert!(vector.as_slice().iter().all(|v| (0.0..=1.0).contains(v)), "{w}x{h}");
        }
    }

    #[test]
    fn test_sixteen_bit_input_is_accepted() {
        let image = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_pixel(40, 40, Luma([u16::MAX]));
        let vector = ImageNormalizer::new().normalize(&DynamicImage::ImageLuma16(image)).unwrap();

        assert!(vector.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_row_major_layout() {
        // Top half white, bottom half black.
        let image = GrayImage::from_fn(28, 28, |_, y| Luma([if y < 14 { 255 } else { 0 }]));
        let vector = ImageNormalizer::new().normalize(&DynamicImage::ImageLuma8(image)).unwrap();

        assert_eq!(vector.get(0, 27), Some(0.0));
        assert_eq!(vector.get(13, 0), Some(0.0));
        assert_eq!(vector.get(14, 0), Some(1.0));
        assert_eq!(vector.as_slice()[14 * 28 + 5], 1.0);
    }

    #[test]
    fn test_transparent_pixels_composite_over_black() {
        let image = RgbaImage::from_pixel(28, 28, Rgba([255, 255, 255, 0]));
        let vector = ImageNormalizer::new().normalize(&DynamicImage::ImageRgba8(image)).unwrap();

        assert!(vector.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_opaque_alpha_keeps_luminance() {
        let image = image::ImageBuffer::from_pixel(28, 28, LumaA([255u8, 255]));
        let vector = ImageNormalizer::new().normalize(&DynamicImage::ImageLumaA8(image)).unwrap();

        assert!(vector.as_slice().iter().all(|&v| v == 0.0));
    }

    /// Alternating columns of transparent white and opaque black.
    fn striped_transparency(width: u32, height: u32) -> DynamicImage {
        let image = RgbaImage::from_fn(width, height, |x, _| {
            if x % 2 == 0 {
                Rgba([255, 255, 255, 0])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        DynamicImage::ImageRgba8(image)
    }

    #[test]
    fn test_mixed_alpha_composites_before_resampling() {
        let vector = ImageNormalizer::new().normalize(&striped_transparency(56, 28)).unwrap();

        assert!(vector.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_mixed_alpha_with_filter_resizer() {
        let normalizer = ImageNormalizer::with_resizer(FilterResizer::new(SmoothFilter::Triangle));
        let vector = normalizer.normalize(&striped_transparency(56, 56)).unwrap();

        assert!(vector.as_slice().iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_half_transparent_white_is_mid_gray() {
        let image = RgbaImage::from_pixel(28, 28, Rgba([255, 255, 255, 128]));
        let vector = ImageNormalizer::new().normalize(&DynamicImage::ImageRgba8(image)).unwrap();

        // 128/255 of white over black, then inverted.
        assert!(vector.as_slice().iter().all(|&v| (v - 127.0 / 255.0).abs() < 1e-6));
    }

    #[test]
    fn test_resize_is_idempotent_at_target_size() {
        let image = GrayImage::from_fn(28, 28, |x, y| Luma([((x * 9 + y * 5) % 256) as u8]));
        let image = DynamicImage::ImageLuma8(image);
        let normalizer = ImageNormalizer::new();

        let first = normalizer.normalize(&image).unwrap();
        let resized = AreaAverageResizer.resize(&image, INPUT_WIDTH, INPUT_HEIGHT).unwrap();
        let second = normalizer.normalize(&resized).unwrap();

        for (a, b) in first.as_slice().iter().zip(second.as_slice()) {
            assert!((a - b).abs() <= 1.0 / 255.0);
        }
    }

    #[test]
    fn test_filter_resizer_keeps_solid_colours() {
        let normalizer = ImageNormalizer::with_resizer(FilterResizer::new(SmoothFilter::Triangle));
        let vector = normalizer.normalize(&solid_gray(100, 60, 0)).unwrap();

        assert!(vector.as_slice().iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_corrupt_bytes_are_a_decode_error() {
        let result = ImageNormalizer::new().normalize_bytes(b"definitely not an image");
        assert!(matches!(result, Err(InferenceError::ImageDecodeError(_))));
    }

    #[test]
    fn test_missing_file_is_a_decode_error() {
        let result = ImageNormalizer::new().normalize_file("/nonexistent/digit.png");
        assert!(matches!(result, Err(InferenceError::ImageDecodeError(_))));
    }

    #[test]
    fn test_zero_sized_image_is_a_format_error() {
        let result = ImageNormalizer::new().normalize(&DynamicImage::new_rgb8(0, 10));
        assert!(matches!(result, Err(InferenceError::ImageFormatError(_))));
    }
}
