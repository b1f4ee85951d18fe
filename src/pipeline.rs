use std::sync::Arc;

use log::debug;

use crate::artifacts::ArtifactSet;
use crate::error::{CicastError, Result};
use crate::types::{Outcome, PipelineInput, Prediction};

/// Probability cutoff at or above which a pipeline is predicted to fail.
///
/// Tuned alongside the model at training time; not the neutral 0.5 default.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// The inference request pipeline: frequency encoding, preprocessing, model
/// scoring and the threshold decision for one request.
///
/// Holds only shared read-only artifacts plus the threshold, so one instance
/// serves arbitrarily many concurrent requests without coordination.
pub struct InferencePipeline {
    artifacts: Arc<ArtifactSet>,
    threshold: f64,
}

impl InferencePipeline {
    pub fn new(artifacts: Arc<ArtifactSet>) -> Self {
        Self::with_threshold(artifacts, DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(artifacts: Arc<ArtifactSet>, threshold: f64) -> Self {
        Self {
            artifacts,
            threshold,
        }
    }

    /// Scores one pipeline execution.
    ///
    /// Pure function of the input and the loaded artifacts: the same input
    /// against the same artifacts always yields the same prediction.
    ///
    /// # Errors
    ///
    /// Any failure during preprocessing or scoring surfaces as a single
    /// `CicastError::Prediction` carrying the cause's description; there is
    /// no partial result or fallback label.
    pub fn predict(&self, input: &PipelineInput) -> Result<Prediction> {
        let features = self.artifacts.encoder.encode(input);
        debug!(
            "Derived features for job '{}': job_freq={}, stage_freq={}, branch_freq={}",
            features.job_name, features.job_freq, features.stage_freq, features.branch_freq
        );

        let row = self
            .artifacts
            .preprocessor
            .transform(&features)
            .map_err(as_prediction_error)?;

        let probability = self
            .artifacts
            .model
            .predict_proba(&row)
            .map_err(as_prediction_error)?;

        if !(0.0..=1.0).contains(&probability) {
            return Err(CicastError::Prediction(format!(
                "model produced probability {probability} outside [0, 1]"
            )));
        }

        // The raw probability governs the label; rounding is presentation only.
        let prediction = if probability >= self.threshold {
            Outcome::Failure
        } else {
            Outcome::Success
        };

        Ok(Prediction {
            prediction,
            confidence: round3(probability),
        })
    }
}

fn as_prediction_error(err: CicastError) -> CicastError {
    match err {
        err @ CicastError::Prediction(_) => err,
        other => CicastError::Prediction(other.to_string()),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
