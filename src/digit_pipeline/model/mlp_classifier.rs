//! Dense multi-layer perceptron classifier.
//!
//! Weights are stored as JSON (see [`MlpWeights`]) and validated once at load
//! time, so a loaded classifier only fails at inference on a wrong-sized input.

use std::path::Path;

use ndarray::{Array1, Array2};
use tracing::{debug, info};
use crate::digit_pipeline::common::error::{InferenceError, Result};
use crate::digit_pipeline::model::classifier::Classifier;
use crate::digit_pipeline::model::types::{Activation, DenseLayerWeights, MlpWeights, OutputVector};
use crate::digit_pipeline::normalize::types::{NormalizedVector, INPUT_LEN};

#[derive(Debug)]
struct DenseLayer {
    weights: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &Array1<f32>) -> Array1<f32> {
        let z = self.weights.dot(input) + &self.bias;
        match self.activation {
            Activation::Identity => z,
            Activation::Relu => z.mapv(|v| v.max(0.0)),
            Activation::Sigmoid => z.mapv(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Tanh => z.mapv(f32::tanh),
            Activation::Softmax => {
                let max = z.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
                let exp = z.mapv(|v| (v - max).exp());
                let sum = exp.sum();
                exp / sum
            }
        }
    }
}

#[derive(Debug)]
pub struct MlpClassifier {
    layers: Vec<DenseLayer>,
}

impl MlpClassifier {
    /// Loads and validates a JSON weights file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading classifier weights");

        let data = std::fs::read(path)
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;
        let classifier = Self::from_json(&data)?;

        info!(
            layers = classifier.layers.len(),
            outputs = classifier.output_len(),
            "Classifier loaded"
        );
        Ok(classifier)
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        let weights: MlpWeights = serde_json::from_slice(data)
            .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;
        Self::from_weights(weights)
    }

    pub fn from_weights(weights: MlpWeights) -> Result<Self> {
        if weights.layers.is_empty() {
            return Err(InferenceError::ModelLoadError("network has no layers".to_string()));
        }

        let mut layers = Vec::with_capacity(weights.layers.len());
        let mut expected_inputs = INPUT_LEN;

        for (index, layer) in weights.layers.into_iter().enumerate() {
            let dense = Self::build_layer(index, layer, expected_inputs)?;
            expected_inputs = dense.weights.nrows();
            layers.push(dense);
        }

        Ok(Self { layers })
    }

    fn build_layer(index: usize, layer: DenseLayerWeights, inputs: usize) -> Result<DenseLayer> {
        let rows = layer.weights.len();
        let cols = layer.weights.first().map_or(0, Vec::len);

        if rows == 0 || cols == 0 {
            return Err(InferenceError::ModelLoadError(format!(
                "layer {} has an empty weight matrix",
                index
            )));
        }

        if let Some(row) = layer.weights.iter().position(|r| r.len() != cols) {
            return Err(InferenceError::ModelLoadError(format!(
                "layer {} row {} has {} weights, expected {}",
                index,
                row,
                layer.weights[row].len(),
                cols
            )));
        }

        if cols != inputs {
            return Err(InferenceError::ModelLoadError(format!(
                "layer {} takes {} inputs, previous stage produces {}",
                index, cols, inputs
            )));
        }

        if layer.bias.len() != rows {
            return Err(InferenceError::ModelLoadError(format!(
                "layer {} has {} biases for {} outputs",
                index,
                layer.bias.len(),
                rows
            )));
        }

        let flat: Vec<f32> = layer.weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| InferenceError::ModelLoadError(format!("layer {}: {}", index, e)))?;

        debug!("Layer {}: {}x{} {:?}", index, rows, cols, layer.activation);

        Ok(DenseLayer {
            weights,
            bias: Array1::from(layer.bias),
            activation: layer.activation,
        })
    }

    pub fn input_len(&self) -> usize {
        self.layers.first().map_or(0, |l| l.weights.ncols())
    }

    pub fn output_len(&self) -> usize {
        self.layers.last().map_or(0, |l| l.weights.nrows())
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }
}

impl Classifier for MlpClassifier {
    fn forward(&self, input: &NormalizedVector) -> Result<OutputVector> {
        if input.len() != self.input_len() {
            return Err(InferenceError::ModelInvocationError(format!(
                "input has {} values, network expects {}",
                input.len(),
                self.input_len()
            )));
        }

        let output = self
            .layers
            .iter()
            .fold(Array1::from(input.as_slice().to_vec()), |x, layer| layer.forward(&x));

        if let Some(index) = output.iter().position(|v| !v.is_finite()) {
            return Err(InferenceError::ModelInvocationError(format!(
                "score {} is not finite",
                index
            )));
        }

        Ok(OutputVector::new(output.to_vec()))
    }
}
