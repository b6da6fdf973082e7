//! Pipeline configuration types

use crate::digit_pipeline::normalize::types::InputConvention;

/// Number of classes of a digit classifier
pub const NUM_DIGIT_CLASSES: usize = 10;

/// Configuration for a digit prediction run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Intensity convention of the input images
    pub convention: InputConvention,
    /// Number of scores the classifier must return.
    /// `None` accepts any non-empty output.
    pub expected_classes: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            convention: InputConvention::DarkInkOnLight,
            expected_classes: Some(NUM_DIGIT_CLASSES),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    convention: Option<InputConvention>,
    expected_classes: Option<Option<usize>>,
}

impl PipelineConfigBuilder {
    pub fn convention(mut self, convention: InputConvention) -> Self {
        self.convention = Some(convention);
        self
    }

    pub fn expected_classes(mut self, classes: Option<usize>) -> Self {
        self.expected_classes = Some(classes);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            convention: self.convention.unwrap_or(default.convention),
            expected_classes: self.expected_classes.unwrap_or(default.expected_classes),
        }
    }
}
