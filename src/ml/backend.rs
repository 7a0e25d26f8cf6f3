//! Compute backends for dense layers.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UnibotError};
use crate::util::simd::simd_wide;

/// How matrix-vector products are evaluated.
///
/// All backends produce the same logits up to float rounding (within 1e-4).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ComputeBackend {
    /// Plain scalar loops.
    Scalar,
    /// `wide::f32x8` dot products.
    #[default]
    Simd,
    /// Rows split across the rayon pool, SIMD inside each row.
    Parallel,
}

impl ComputeBackend {
    /// All backends, in declaration order.
    pub const ALL: [ComputeBackend; 3] = [
        ComputeBackend::Scalar,
        ComputeBackend::Simd,
        ComputeBackend::Parallel,
    ];

    /// Compute `weights · input + bias` for a row-major `rows × input.len()` matrix.
    ///
    /// Shapes are checked when the model is loaded, so `weights.len()` is
    /// `bias.len() * input.len()` here.
    pub fn affine(self, weights: &[f32], bias: &[f32], input: &[f32]) -> Vec<f32> {
        let cols = input.len();
        if cols == 0 {
            return bias.to_vec();
        }

        match self {
            ComputeBackend::Scalar => weights
                .chunks_exact(cols)
                .zip(bias)
                .map(|(row, b)| b + row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>())
                .collect(),
            ComputeBackend::Simd => weights
                .chunks_exact(cols)
                .zip(bias)
                .map(|(row, b)| b + simd_wide::dot_product_simd(row, input))
                .collect(),
            ComputeBackend::Parallel => weights
                .par_chunks_exact(cols)
                .zip(bias.par_iter())
                .map(|(row, b)| b + simd_wide::dot_product_simd(row, input))
                .collect(),
        }
    }

    /// Get the name of this backend.
    pub fn name(self) -> &'static str {
        match self {
            ComputeBackend::Scalar => "scalar",
            ComputeBackend::Simd => "simd",
            ComputeBackend::Parallel => "parallel",
        }
    }
}

impl fmt::Display for ComputeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComputeBackend {
    type Err = UnibotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "scalar" => Ok(ComputeBackend::Scalar),
            "simd" => Ok(ComputeBackend::Simd),
            "parallel" => Ok(ComputeBackend::Parallel),
            other => Err(UnibotError::invalid_argument(format!(
                "Unknown compute backend: {other}"
            ))),
        }
    }
}
