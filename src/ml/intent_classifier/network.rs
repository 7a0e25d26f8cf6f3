//! Feed-forward network evaluation.

use crate::error::{Result, UnibotError};
use crate::ml::backend::ComputeBackend;
use crate::ml::model::ModelBundle;
use crate::util::simd::numeric;

/// One fully connected layer with row-major weights.
#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Vec<f32>,
    bias: Vec<f32>,
    input_size: usize,
}

impl DenseLayer {
    fn from_rows(rows: &[Vec<f32>], bias: &[f32], input_size: usize) -> Self {
        DenseLayer {
            weights: rows.iter().flatten().copied().collect(),
            bias: bias.to_vec(),
            input_size,
        }
    }

    fn forward(&self, input: &[f32], backend: ComputeBackend) -> Vec<f32> {
        backend.affine(&self.weights, &self.bias, input)
    }
}

/// Linear → ReLU → Linear → ReLU → Linear.
#[derive(Debug, Clone)]
pub struct FeedForwardNetwork {
    l1: DenseLayer,
    l2: DenseLayer,
    l3: DenseLayer,
}

impl FeedForwardNetwork {
    /// Flatten the weights of a validated bundle.
    pub fn from_bundle(bundle: &ModelBundle) -> Self {
        let state = &bundle.model_state;
        FeedForwardNetwork {
            l1: DenseLayer::from_rows(&state.l1_weight, &state.l1_bias, bundle.input_size),
            l2: DenseLayer::from_rows(&state.l2_weight, &state.l2_bias, bundle.hidden_size),
            l3: DenseLayer::from_rows(&state.l3_weight, &state.l3_bias, bundle.hidden_size),
        }
    }

    /// Expected feature vector length.
    pub fn input_size(&self) -> usize {
        self.l1.input_size
    }

    /// Compute the raw output logits.
    pub fn forward(&self, input: &[f32], backend: ComputeBackend) -> Result<Vec<f32>> {
        if input.len() != self.input_size() {
            return Err(UnibotError::model(format!(
                "feature vector has {} entries, model expects {}",
                input.len(),
                self.input_size()
            )));
        }

        let mut hidden = self.l1.forward(input, backend);
        numeric::relu_in_place(&mut hidden);
        let mut hidden = self.l2.forward(&hidden, backend);
        numeric::relu_in_place(&mut hidden);

        Ok(self.l3.forward(&hidden, backend))
    }
}
