//! Classifier data types

use serde::{Deserialize, Serialize};

/// Scores produced by one forward pass, one per class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputVector {
    scores: Vec<f32>,
}

impl OutputVector {
    pub fn new(scores: Vec<f32>) -> Self {
        Self { scores }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl From<Vec<f32>> for OutputVector {
    fn from(scores: Vec<f32>) -> Self {
        Self::new(scores)
    }
}

impl AsRef<[f32]> for OutputVector {
    fn as_ref(&self) -> &[f32] {
        &self.scores
    }
}

/// Element-wise function applied after a dense layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Identity,
    Relu,
    Sigmoid,
    Tanh,
    /// Normalizes the whole layer output into a probability distribution
    Softmax,
}

/// Serialized form of one dense layer, `y = activation(weights . x + bias)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayerWeights {
    /// Row-major `[outputs][inputs]` weight matrix
    pub weights: Vec<Vec<f32>>,
    /// One bias per output
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}

/// Serialized form of a multi-layer perceptron, input layer first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpWeights {
    pub layers: Vec<DenseLayerWeights>,
}
