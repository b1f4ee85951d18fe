use serde::{Deserialize, Serialize};

use crate::error::{CicastError, Result};

/// Classifier scoring a preprocessed numeric row into a probability of the
/// Failure class.
///
/// The model's internals are opaque to the pipeline; the only contract is
/// "accepts the preprocessor's output width, returns a probability".
pub trait Model: Send + Sync {
    fn predict_proba(&self, features: &[f64]) -> Result<f64>;
}

/// Linear scorer exported from the trained classifier.
///
/// Training exports the fitted coefficients and intercept; scoring is a dot
/// product followed by a sigmoid, so the output is always in (0, 1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Model for LogisticModel {
    fn predict_proba(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(CicastError::Prediction(format!(
                "model expects {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let margin: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(coefficient, value)| coefficient * value)
            .sum::<f64>()
            + self.intercept;

        Ok(sigmoid(margin))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
