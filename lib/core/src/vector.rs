use serde::{Deserialize, Serialize};

/// Every canonical record carries an embedding of exactly this many dimensions
pub const EMBEDDING_DIM: usize = 384;

/// A dense embedding vector
///
/// Serialized as a plain JSON array of numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Embedding {
    data: Vec<f64>,
}

impl Embedding {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// All-zero vector of the given dimension
    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }

    /// Euclidean norm
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// True when no component is NaN or infinite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Scale to unit length. A zero vector is left untouched.
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.magnitude();
        if norm == 0.0 {
            return;
        }
        for x in &mut self.data {
            *x /= norm;
        }
    }

    /// Get normalized copy
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Zero-pad or truncate to `dim` components
    #[must_use]
    pub fn resized(mut self, dim: usize) -> Self {
        self.data.resize(dim, 0.0);
        self
    }
}

impl From<Vec<f64>> for Embedding {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

/// Scale `v` to unit Euclidean length, returning it unchanged when its norm is zero
pub fn normalize_vector(v: &[f64]) -> Vec<f64> {
    Embedding::from_slice(v).normalized().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_length() {
        let v = Embedding::new(vec![3.0, 4.0]).normalized();
        assert!((v.magnitude() - 1.0).abs() < 1e-12);
        assert!((v.as_slice()[0] - 0.6).abs() < 1e-12);
        assert!((v.as_slice()[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_vector_unchanged() {
        let v = normalize_vector(&[0.0, 0.0, 0.0]);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize_one_two_two() {
        let v = normalize_vector(&[1.0, 2.0, 2.0]);
        assert!((v[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((v[1] - 2.0 / 3.0).abs() < 1e-12);
        assert!((v[2] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_resized() {
        let padded = Embedding::new(vec![1.0, 2.0]).resized(4);
        assert_eq!(padded.as_slice(), &[1.0, 2.0, 0.0, 0.0]);

        let truncated = Embedding::new(vec![1.0, 2.0, 3.0]).resized(2);
        assert_eq!(truncated.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let v = Embedding::new(vec![0.5, -0.25]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.5,-0.25]");
        let back: Embedding = serde_json::from_str("[0.5,-0.25]").unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_is_finite() {
        assert!(Embedding::new(vec![1.0, -2.0]).is_finite());
        assert!(!Embedding::new(vec![1.0, f64::NAN]).is_finite());
        assert!(!Embedding::new(vec![f64::INFINITY]).is_finite());
    }
}
