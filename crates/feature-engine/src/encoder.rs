//! One-Hot Feature Encoder

use artifact_store::{CategoricalField, FeatureSchema, NumericField};
use tracing::debug;

use crate::{FeatureVector, UserSelection};

/// Maps selections onto the fixed schema
pub struct FeatureEncoder<'a> {
    schema: &'a FeatureSchema,
}

impl<'a> FeatureEncoder<'a> {
    pub fn new(schema: &'a FeatureSchema) -> Self {
        Self { schema }
    }

    /// Encode a selection.
    ///
    /// Columns default to 0. Numeric fields land in their own column when the
    /// schema has one; each chosen categorical value sets its one-hot column to
    /// 1, and values without a column are dropped.
    pub fn encode(&self, selection: &UserSelection) -> FeatureVector {
        let mut vector = FeatureVector::zeros(self.schema.len());

        for field in NumericField::ALL {
            if let Some(idx) = self.schema.numeric_index(field) {
                vector.set(idx, selection.numeric_value(field));
            }
        }

        for field in CategoricalField::ALL {
            let Some(value) = selection.categorical_value(field) else {
                continue;
            };
            match self.schema.one_hot_index(field, &value) {
                Some(idx) => vector.set(idx, 1.0),
                None => debug!(
                    "No schema column for {}, skipping",
                    field.column_name(&value)
                ),
            }
        }

        vector
    }
}
