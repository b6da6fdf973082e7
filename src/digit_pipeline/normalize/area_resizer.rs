//! Area-averaging resampler.
//!
//! Every destination pixel is the coverage-weighted mean of the source pixels
//! its footprint overlaps. Downscaling therefore averages whole blocks of
//! source pixels, and a 1:1 resize reproduces the source exactly. Colour is
//! averaged alpha-premultiplied, so transparent pixels contribute no colour.

use image::{DynamicImage, ImageBuffer, Rgba};
use tracing::debug;
use crate::digit_pipeline::common::error::{InferenceError, Result};
use crate::digit_pipeline::normalize::resizer::Resizer;

const CHANNELS: usize = 4;

/// Default resampler for the normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaAverageResizer;

/// For each destination index, the source indices it covers and their weights.
/// Weights of one destination index sum to 1.
fn axis_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = (d + 1) as f64 * scale;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len as usize);

            (first..last)
                .filter_map(|s| {
                    let overlap = end.min(s as f64 + 1.0) - start.max(s as f64);
                    (overlap > 0.0).then_some((s, (overlap / scale) as f32))
                })
                .collect()
        })
        .collect()
}

impl Resizer for AreaAverageResizer {
    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage> {
        let (src_w, src_h) = (image.width(), image.height());
        if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
            return Err(InferenceError::ImageFormatError(format!(
                "cannot resize {}x{} to {}x{}",
                src_w, src_h, width, height
            )));
        }

        debug!("Area-averaging {}x{} -> {}x{}", src_w, src_h, width, height);

        let mut src = image.to_rgba32f().into_raw();
        let expected = src_w as usize * src_h as usize * CHANNELS;
        if src.len() != expected {
            return Err(InferenceError::ImageFormatError(format!(
                "pixel buffer holds {} samples, expected {}",
                src.len(),
                expected
            )));
        }

        for pixel in src.chunks_exact_mut(CHANNELS) {
            let alpha = pixel[3];
            for value in &mut pixel[..3] {
                *value *= alpha;
            }
        }

        let x_weights = axis_weights(src_w, width);
        let y_weights = axis_weights(src_h, height);

        // Horizontal pass: src_h rows of `width` pixels.
        let row_stride = width as usize * CHANNELS;
        let mut horizontal = vec![0.0f32; src_h as usize * row_stride];
        for y in 0..src_h as usize {
            let src_row = &src[y * src_w as usize * CHANNELS..][..src_w as usize * CHANNELS];
            let dst_row = &mut horizontal[y * row_stride..][..row_stride];
            for (x, weights) in x_weights.iter().enumerate() {
                for &(sx, w) in weights {
                    for c in 0..CHANNELS {
                        dst_row[x * CHANNELS + c] += src_row[sx * CHANNELS + c] * w;
                    }
                }
            }
        }

        // Vertical pass.
        let mut output = vec![0.0f32; height as usize * row_stride];
        for (y, weights) in y_weights.iter().enumerate() {
            let dst_row = &mut output[y * row_stride..][..row_stride];
            for &(sy, w) in weights {
                let src_row = &horizontal[sy * row_stride..][..row_stride];
                for (dst, &value) in dst_row.iter_mut().zip(src_row) {
                    *dst += value * w;
                }
            }
        }

        for pixel in output.chunks_exact_mut(CHANNELS) {
            let alpha = pixel[3].clamp(0.0, 1.0);
            for value in &mut pixel[..3] {
                *value = if alpha > 0.0 { (*value / alpha).clamp(0.0, 1.0) } else { 0.0 };
            }
            pixel[3] = alpha;
        }

        let buffer = ImageBuffer::<Rgba<f32>, Vec<f32>>::from_raw(width, height, output)
            .ok_or_else(|| {
                InferenceError::ImageFormatError("resampled buffer has the wrong size".to_string())
            })?;

        Ok(DynamicImage::ImageRgba32F(buffer))
    }
}
