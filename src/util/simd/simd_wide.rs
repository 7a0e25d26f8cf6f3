//! `wide::f32x8` kernels for the dense layers of the intent classifier.

use wide::f32x8;

/// Load eight lanes from a slice of exactly eight values.
#[inline]
fn load(chunk: &[f32]) -> f32x8 {
    let mut lanes = [0.0f32; 8];
    lanes.copy_from_slice(chunk);
    f32x8::new(lanes)
}

/// SIMD-optimized dot product for vectors.
///
/// Only the common prefix of `a` and `b` contributes; callers validate lengths.
pub fn dot_product_simd(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let (a, b) = (&a[..len], &b[..len]);

    let mut sum = f32x8::splat(0.0);
    let a_chunks = a.chunks_exact(8);
    let b_chunks = b.chunks_exact(8);
    let a_rest = a_chunks.remainder();
    let b_rest = b_chunks.remainder();

    for (a_chunk, b_chunk) in a_chunks.zip(b_chunks) {
        sum += load(a_chunk) * load(b_chunk);
    }

    let mut result = sum.to_array().iter().sum::<f32>();
    for (x, y) in a_rest.iter().zip(b_rest) {
        result += x * y;
    }

    result
}

/// SIMD-optimized vector addition.
pub fn vector_add_simd(a: &[f32], b: &[f32]) -> Vec<f32> {
    let len = a.len().min(b.len());
    let (a, b) = (&a[..len], &b[..len]);

    let mut result = Vec::with_capacity(len);
    let a_chunks = a.chunks_exact(8);
    let b_chunks = b.chunks_exact(8);
    let a_rest = a_chunks.remainder();
    let b_rest = b_chunks.remainder();

    for (a_chunk, b_chunk) in a_chunks.zip(b_chunks) {
        result.extend_from_slice(&(load(a_chunk) + load(b_chunk)).to_array());
    }
    result.extend(a_rest.iter().zip(b_rest).map(|(x, y)| x + y));

    result
}

/// SIMD rectified linear unit.
pub fn relu_simd(values: &[f32]) -> Vec<f32> {
    let zero = f32x8::splat(0.0);
    let mut result = Vec::with_capacity(values.len());

    let chunks = values.chunks_exact(8);
    let rest = chunks.remainder();

    for chunk in chunks {
        result.extend_from_slice(&load(chunk).max(zero).to_array());
    }
    result.extend(rest.iter().map(|&v| v.max(0.0)));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product_simd() {
        let a: Vec<f32> = (0..19).map(|v| v as f32).collect();
        let b: Vec<f32> = (0..19).map(|v| (v % 3) as f32).collect();

        let expected: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        assert!((dot_product_simd(&a, &b) - expected).abs() < 1e-4);
        assert_eq!(dot_product_simd(&[], &[]), 0.0);
    }

    #[test]
    fn test_vector_add_simd() {
        let a = vec![1.0; 10];
        let b: Vec<f32> = (0..10).map(|v| v as f32).collect();

        let result = vector_add_simd(&a, &b);
        assert_eq!(result.len(), 10);
        assert_eq!(result[0], 1.0);
        assert_eq!(result[9], 10.0);
    }

    #[test]
    fn test_relu_simd() {
        let values: Vec<f32> = (-5..6).map(|v| v as f32).collect();
        let result = relu_simd(&values);

        assert_eq!(result.len(), values.len());
        assert!(result[..6].iter().all(|&v| v == 0.0));
        assert_eq!(result[10], 5.0);
    }
}
