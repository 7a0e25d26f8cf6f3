//! SIMD optimization utilities for Unibot.
//!
//! [`ascii`] backs the lowercase filter, [`numeric`] holds the activation and
//! reduction helpers shared by every classifier backend, and [`simd_wide`] has
//! the `wide::f32x8` kernels used by the `simd` and `parallel` backends.

pub mod simd_wide;

/// Chunked ASCII text operations.
pub mod ascii {

    /// Convert ASCII characters to lowercase, eight bytes at a time.
    ///
    /// Callers must only pass ASCII input; [`to_lowercase`] makes that choice.
    pub fn to_lowercase_optimized(input: &str) -> String {
        let bytes = input.as_bytes();
        let mut result = Vec::with_capacity(bytes.len());

        let chunks = bytes.chunks_exact(8);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let mut processed = [0u8; 8];
            for (slot, &byte) in processed.iter_mut().zip(chunk) {
                *slot = byte.to_ascii_lowercase();
            }
            result.extend_from_slice(&processed);
        }

        result.extend(remainder.iter().map(u8::to_ascii_lowercase));

        String::from_utf8(result).unwrap_or_else(|_| input.to_lowercase())
    }

    /// Full Unicode lowercase conversion.
    pub fn to_lowercase_fallback(input: &str) -> String {
        input.to_lowercase()
    }

    /// Lowercase `input`, taking the chunked path for long ASCII strings.
    pub fn to_lowercase(input: &str) -> String {
        if input.is_ascii() && input.len() >= 16 {
            to_lowercase_optimized(input)
        } else {
            to_lowercase_fallback(input)
        }
    }
}

/// Numerical helpers for the feed-forward classifier.
pub mod numeric {

    /// Sum an f32 slice, eight values per step.
    pub fn fast_sum(values: &[f32]) -> f32 {
        let mut sum = 0.0f32;

        let chunks = values.chunks_exact(8);
        let remainder = chunks.remainder();

        for chunk in chunks {
            sum += chunk[0]
                + chunk[1]
                + chunk[2]
                + chunk[3]
                + chunk[4]
                + chunk[5]
                + chunk[6]
                + chunk[7];
        }

        for &value in remainder {
            sum += value;
        }

        sum
    }

    /// Find the maximum value and its index.
    ///
    /// Ties resolve to the lowest index. Returns `None` for an empty slice.
    pub fn find_max_with_index(values: &[f32]) -> Option<(usize, f32)> {
        let (&first, rest) = values.split_first()?;

        let mut max_val = first;
        let mut max_idx = 0;

        for (i, &val) in rest.iter().enumerate() {
            if val > max_val {
                max_val = val;
                max_idx = i + 1;
            }
        }

        Some((max_idx, max_val))
    }

    /// Rectified linear unit, in place.
    pub fn relu_in_place(values: &mut [f32]) {
        for value in values.iter_mut() {
            if *value < 0.0 {
                *value = 0.0;
            }
        }
    }

    /// Numerically stable softmax.
    ///
    /// The maximum is subtracted before exponentiation so large logits do not
    /// overflow. An empty slice yields an empty vector.
    pub fn softmax(logits: &[f32]) -> Vec<f32> {
        let Some((_, max)) = find_max_with_index(logits) else {
            return Vec::new();
        };

        let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
        let total = fast_sum(&exps);

        if total == 0.0 || !total.is_finite() {
            let uniform = 1.0 / logits.len() as f32;
            return vec![uniform; logits.len()];
        }

        exps.into_iter().map(|e| e / total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_lowercase() {
        assert_eq!(ascii::to_lowercase("HELLO"), "hello");
        assert_eq!(
            ascii::to_lowercase("STUDENT DETAILS OF COMPUTER SCIENCE"),
            "student details of computer science"
        );
        assert_eq!(ascii::to_lowercase("ÉCOLE"), "école");
        assert_eq!(ascii::to_lowercase(""), "");
    }

    #[test]
    fn test_fast_sum() {
        let values: Vec<f32> = (1..=10).map(|v| v as f32).collect();
        assert!((numeric::fast_sum(&values) - 55.0).abs() < 1e-6);
        assert_eq!(numeric::fast_sum(&[]), 0.0);
    }

    #[test]
    fn test_find_max_with_index_prefers_first() {
        assert_eq!(numeric::find_max_with_index(&[]), None);
        assert_eq!(
            numeric::find_max_with_index(&[1.0, 3.0, 3.0, 2.0]),
            Some((1, 3.0))
        );
        assert_eq!(numeric::find_max_with_index(&[-1.0]), Some((0, -1.0)));
    }

    #[test]
    fn test_relu_in_place() {
        let mut values = vec![-2.0, 0.0, 1.5, -0.1];
        numeric::relu_in_place(&mut values);
        assert_eq!(values, vec![0.0, 0.0, 1.5, 0.0]);
    }

    #[test]
    fn test_softmax() {
        let probs = numeric::softmax(&[1.0, 2.0, 3.0]);
        let total: f32 = probs.iter().sum();

        assert!((total - 1.0).abs() < 1e-6);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
        assert!((probs[2] - 0.665_240_9).abs() < 1e-5);

        let large = numeric::softmax(&[1000.0, 1000.0]);
        assert!((large[0] - 0.5).abs() < 1e-6);

        assert!(numeric::softmax(&[]).is_empty());
    }
}
