//! Feature Vector

use serde::{Deserialize, Serialize};

/// Single-row feature table aligned to the schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// One value per schema column, in schema order
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// All-zero vector of the given width
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.values.get(idx).copied()
    }

    /// Set a column; out-of-range indices are ignored
    pub fn set(&mut self, idx: usize, value: f64) {
        if let Some(slot) = self.values.get_mut(idx) {
            *slot = value;
        }
    }

    /// Copy with one column replaced
    pub fn with(&self, idx: usize, value: f64) -> Self {
        let mut copy = self.clone();
        copy.set(idx, value);
        copy
    }

    /// Indices where the two vectors differ
    pub fn differing_columns(&self, other: &FeatureVector) -> Vec<usize> {
        self.values
            .iter()
            .zip(&other.values)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Values narrowed to `f32` for model runtimes
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_leaves_original_untouched() {
        let base = FeatureVector::zeros(4);
        let modified = base.with(2, 1.0);

        assert_eq!(base.get(2), Some(0.0));
        assert_eq!(modified.get(2), Some(1.0));
        assert_eq!(base.differing_columns(&modified), vec![2]);
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut vector = FeatureVector::zeros(2);
        vector.set(5, 3.0);
        assert_eq!(vector, FeatureVector::zeros(2));
    }
}
