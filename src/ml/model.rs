//! Pretrained model bundle: vocabulary, tags and network weights.
//!
//! A bundle is stored either as JSON (`.json`) or bincode (any other
//! extension). The JSON layout mirrors a framework state dict:
//!
//! ```json
//! {
//!   "input_size": 3, "hidden_size": 2, "output_size": 2,
//!   "all_words": ["cours", "holiday", "student"],
//!   "tags": ["courses", "holidays"],
//!   "model_state": {
//!     "l1.weight": [[...], [...]], "l1.bias": [...],
//!     "l2.weight": [[...], [...]], "l2.bias": [...],
//!     "l3.weight": [[...], [...]], "l3.bias": [...]
//!   }
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UnibotError};

/// Trained weights of the three linear layers.
///
/// Weight matrices are `[out][in]`, one inner vector per output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    #[serde(rename = "l1.weight")]
    pub l1_weight: Vec<Vec<f32>>,
    #[serde(rename = "l1.bias")]
    pub l1_bias: Vec<f32>,
    #[serde(rename = "l2.weight")]
    pub l2_weight: Vec<Vec<f32>>,
    #[serde(rename = "l2.bias")]
    pub l2_bias: Vec<f32>,
    #[serde(rename = "l3.weight")]
    pub l3_weight: Vec<Vec<f32>>,
    #[serde(rename = "l3.bias")]
    pub l3_bias: Vec<f32>,
}

impl ModelState {
    /// All-zero weights with the given layer sizes.
    pub fn zeros(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        ModelState {
            l1_weight: vec![vec![0.0; input_size]; hidden_size],
            l1_bias: vec![0.0; hidden_size],
            l2_weight: vec![vec![0.0; hidden_size]; hidden_size],
            l2_bias: vec![0.0; hidden_size],
            l3_weight: vec![vec![0.0; hidden_size]; output_size],
            l3_bias: vec![0.0; output_size],
        }
    }
}

/// Vocabulary, tag set and weights of the intent model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    /// Ordered stems; position `i` is feature `i`.
    pub all_words: Vec<String>,
    /// Ordered tags; position `i` is output unit `i`.
    pub tags: Vec<String>,
    pub model_state: ModelState,
}

impl ModelBundle {
    /// Build and validate a bundle from its parts.
    pub fn new(
        all_words: Vec<String>,
        tags: Vec<String>,
        hidden_size: usize,
        model_state: ModelState,
    ) -> Result<Self> {
        let bundle = ModelBundle {
            input_size: all_words.len(),
            hidden_size,
            output_size: tags.len(),
            all_words,
            tags,
            model_state,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Load a bundle, choosing JSON or bincode by file extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let bundle: ModelBundle = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            bincode::deserialize_from(reader)?
        };
        bundle.validate()?;

        info!(
            "Loaded model from {} ({} words, {} hidden, {} tags)",
            path.display(),
            bundle.input_size,
            bundle.hidden_size,
            bundle.output_size
        );

        Ok(bundle)
    }

    /// Save the bundle, choosing JSON or bincode by file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);

        if is_json(path) {
            serde_json::to_writer(writer, self)?;
        } else {
            bincode::serialize_into(writer, self)?;
        }

        Ok(())
    }

    /// Check every declared size against the vocabulary, tags and weights.
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.hidden_size == 0 || self.output_size == 0 {
            return Err(UnibotError::model(format!(
                "layer sizes must be non-zero (input {}, hidden {}, output {})",
                self.input_size, self.hidden_size, self.output_size
            )));
        }
        if self.all_words.len() != self.input_size {
            return Err(UnibotError::model(format!(
                "all_words has {} entries, input_size is {}",
                self.all_words.len(),
                self.input_size
            )));
        }
        if self.tags.len() != self.output_size {
            return Err(UnibotError::model(format!(
                "tags has {} entries, output_size is {}",
                self.tags.len(),
                self.output_size
            )));
        }

        let state = &self.model_state;
        let (input, hidden, output) = (self.input_size, self.hidden_size, self.output_size);
        check_matrix("l1.weight", &state.l1_weight, hidden, input)?;
        check_vector("l1.bias", &state.l1_bias, hidden)?;
        check_matrix("l2.weight", &state.l2_weight, hidden, hidden)?;
        check_vector("l2.bias", &state.l2_bias, hidden)?;
        check_matrix("l3.weight", &state.l3_weight, output, hidden)?;
        check_vector("l3.bias", &state.l3_bias, output)?;

        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn check_matrix(name: &str, matrix: &[Vec<f32>], rows: usize, cols: usize) -> Result<()> {
    if matrix.len() != rows {
        return Err(UnibotError::model(format!(
            "{name} has {} rows, expected {rows}",
            matrix.len()
        )));
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != cols {
            return Err(UnibotError::model(format!(
                "{name} row {i} has {} columns, expected {cols}",
                row.len()
            )));
        }
        check_finite(name, row)?;
    }
    Ok(())
}

fn check_vector(name: &str, vector: &[f32], len: usize) -> Result<()> {
    if vector.len() != len {
        return Err(UnibotError::model(format!(
            "{name} has {} entries, expected {len}",
            vector.len()
        )));
    }
    check_finite(name, vector)
}

fn check_finite(name: &str, values: &[f32]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(UnibotError::model(format!("{name} contains non-finite values")))
    }
}
