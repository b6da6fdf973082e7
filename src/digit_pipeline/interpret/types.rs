//! Prediction types

use crate::digit_pipeline::common::error::Result;
use crate::digit_pipeline::interpret::interpreter::{confidence_of, distribution, predicted_class};

/// Outcome of one forward pass
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Index of the highest score
    pub class_index: usize,
    /// Raw score at `class_index`
    pub confidence: f32,
    /// Every `(class_index, score)` pair, in index order
    pub distribution: Vec<(usize, f32)>,
}

impl Prediction {
    pub fn from_output(output: &[f32]) -> Result<Self> {
        let class_index = predicted_class(output)?;
        let confidence = confidence_of(output, class_index)?;

        Ok(Self {
            class_index,
            confidence,
            distribution: distribution(output),
        })
    }
}
