use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;
use crate::digit_pipeline::common::error::{InferenceError, Result};
use crate::digit_pipeline::normalize::resizer::Resizer;

/// Smoothing filters offered by the `image` crate.
///
/// Nearest-neighbour is not offered, the classifier was trained on smoothly
/// resampled inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothFilter {
    /// Linear filter (default)
    #[default]
    Triangle,
    /// Cubic filter
    CatmullRom,
    /// Gaussian filter
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
}

impl From<SmoothFilter> for FilterType {
    fn from(filter: SmoothFilter) -> Self {
        match filter {
            SmoothFilter::Triangle => FilterType::Triangle,
            SmoothFilter::CatmullRom => FilterType::CatmullRom,
            SmoothFilter::Gaussian => FilterType::Gaussian,
            SmoothFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Resizer backed by `image::imageops` convolution filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterResizer {
    filter: SmoothFilter,
}

impl FilterResizer {
    pub fn new(filter: SmoothFilter) -> Self {
        Self { filter }
    }
}

impl Resizer for FilterResizer {
    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage> {
        if width == 0 || height == 0 {
            return Err(InferenceError::ImageFormatError(format!(
                "cannot resize to {}x{}",
                width, height
            )));
        }

        debug!(
            "Resizing {}x{} -> {}x{} with {:?}",
            image.width(),
            image.height(),
            width,
            height,
            self.filter
        );

        Ok(image.resize_exact(width, height, self.filter.into()))
    }
}
