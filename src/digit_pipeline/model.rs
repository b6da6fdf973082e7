//! Classifier module
//!
//! This module defines the forward-pass seam the pipeline talks to, and a
//! dense multi-layer perceptron that can be loaded from a weights file.

mod classifier;
mod mlp_classifier;
pub mod types;

pub use classifier::Classifier;
pub use mlp_classifier::MlpClassifier;
pub use types::{Activation, DenseLayerWeights, MlpWeights, OutputVector};
