use serde::{Deserialize, Serialize};

use crate::error::{CicastError, Result};
use crate::types::FeatureVector;

/// Fitted transform from an enriched pipeline record to the numeric row the
/// model scores.
///
/// Implementations are fixed at training time and must be deterministic; the
/// pipeline's only contract with them is the shape of the input record and
/// that the output width matches what the model accepts.
pub trait Preprocessor: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>>;
}

/// The preprocessing transform exported by training.
///
/// One-hot encodes `environment` and `user` against the fitted vocabularies
/// (values outside the vocabulary encode as all zeros) and standardizes the
/// three frequency columns with the fitted means and scales, in the order
/// job, stage, branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    pub environment_categories: Vec<String>,
    pub user_categories: Vec<String>,
    pub frequency_means: [f64; 3],
    pub frequency_scales: [f64; 3],
}

impl FittedPreprocessor {
    /// Width of the numeric row this transform produces.
    pub fn output_width(&self) -> usize {
        self.environment_categories.len() + self.user_categories.len() + 3
    }
}

impl Preprocessor for FittedPreprocessor {
    fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let mut row = Vec::with_capacity(self.output_width());

        one_hot(&mut row, &self.environment_categories, &features.environment);
        one_hot(&mut row, &self.user_categories, &features.user);

        let frequencies = [features.job_freq, features.stage_freq, features.branch_freq];
        for (column, value) in frequencies.into_iter().enumerate() {
            let scale = self.frequency_scales[column];
            if scale == 0.0 {
                return Err(CicastError::Prediction(format!(
                    "fitted scale for frequency column {column} is zero"
                )));
            }
            row.push((value - self.frequency_means[column]) / scale);
        }

        Ok(row)
    }
}

fn one_hot(row: &mut Vec<f64>, categories: &[String], value: &str) {
    for category in categories {
        row.push(if category == value { 1.0 } else { 0.0 });
    }
}
