//! Digit inference pipeline module
//!
//! This module turns an arbitrary image into a classifier input, runs a
//! single forward pass and interprets the scores, with separate modules for
//! normalization, the classifier seam, interpretation and orchestration.

pub mod common;
pub mod normalize;
pub mod model;
pub mod interpret;
pub mod inference;

pub use common::{
    InferenceError,
    Result,
};

pub use normalize::{
    decode_image,
    read_image_file,
    AreaAverageResizer,
    FilterResizer,
    ImageNormalizer,
    InputConvention,
    NormalizedVector,
    Resizer,
    SmoothFilter,
    INPUT_HEIGHT,
    INPUT_LEN,
    INPUT_WIDTH,
};

pub use model::{
    Activation,
    Classifier,
    DenseLayerWeights,
    MlpClassifier,
    MlpWeights,
    OutputVector,
};

pub use interpret::{
    confidence_of,
    distribution,
    format_percentage,
    predicted_class,
    Prediction,
};

pub use inference::{
    DigitPipeline,
    PipelineConfig,
    PipelineConfigBuilder,
    PipelineTimings,
    StepTiming,
    Timer,
    NUM_DIGIT_CLASSES,
};
