//! Normalized classifier input types

use crate::digit_pipeline::common::error::{InferenceError, Result};

/// Width of the classifier input grid in pixels
pub const INPUT_WIDTH: u32 = 28;
/// Height of the classifier input grid in pixels
pub const INPUT_HEIGHT: u32 = 28;
/// Number of values in a flattened input grid
pub const INPUT_LEN: usize = (INPUT_WIDTH * INPUT_HEIGHT) as usize;

/// Which intensity convention the source images follow.
///
/// The classifier expects ink to be high and background low. Images drawn
/// with dark ink on a light background have to be inverted to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputConvention {
    /// Dark strokes on a white background; inverted during normalization (default)
    #[default]
    DarkInkOnLight,
    /// Light strokes on a black background; already in the classifier's convention
    LightInkOnDark,
}

impl InputConvention {
    /// Maps an 8-bit luminance sample into `[0.0, 1.0]` with ink high.
    pub fn scale(self, luminance: u8) -> f32 {
        match self {
            InputConvention::DarkInkOnLight => (u8::MAX - luminance) as f32 / 255.0,
            InputConvention::LightInkOnDark => luminance as f32 / 255.0,
        }
    }
}

/// A flattened 28x28 grid of values in `[0.0, 1.0]`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVector {
    values: Vec<f32>,
}

impl NormalizedVector {
    pub fn new(values: Vec<f32>) -> Result<Self> {
        if values.len() != INPUT_LEN {
            return Err(InferenceError::ImageFormatError(format!(
                "expected {} values, got {}",
                INPUT_LEN,
                values.len()
            )));
        }

        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(InferenceError::ImageFormatError(format!(
                "value {} at index {} is outside [0, 1]",
                value, index
            )));
        }

        Ok(Self { values })
    }

    /// Value at `row`, `col` of the 28x28 grid, `None` outside it.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= INPUT_HEIGHT as usize || col >= INPUT_WIDTH as usize {
            return None;
        }
        self.values.get(row * INPUT_WIDTH as usize + col).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AsRef<[f32]> for NormalizedVector {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}
