use serde::{Deserialize, Serialize};

/// One CI/CD pipeline execution submitted for scoring.
///
/// All five fields are required; empty strings are accepted as-is. Values are
/// matched byte-exact against the training-time vocabulary, so no case folding
/// or trimming happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInput {
    pub job_name: String,
    pub stage_name: String,
    pub branch: String,
    pub environment: String,
    pub user: String,
}

/// A pipeline execution enriched with its three training-time frequency features.
///
/// This is the exact record shape the fitted preprocessor was trained against.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub job_name: String,
    pub stage_name: String,
    pub branch: String,
    pub environment: String,
    pub user: String,
    pub job_freq: f64,
    pub stage_freq: f64,
    pub branch_freq: f64,
}

/// Predicted outcome of a pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
}

/// Result of scoring one pipeline execution.
///
/// `confidence` is the model's estimated probability of the Failure class,
/// rounded to three decimal places, independent of which label was chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: Outcome,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_as_plain_label() {
        assert_eq!(serde_json::to_string(&Outcome::Success).unwrap(), "\"Success\"");
        assert_eq!(serde_json::to_string(&Outcome::Failure).unwrap(), "\"Failure\"");
    }

    #[test]
    fn test_pipeline_input_requires_all_fields() {
        let result = serde_json::from_str::<PipelineInput>(
            r#"{"job_name":"build","stage_name":"test","branch":"main","environment":"prod"}"#,
        );

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("user"));
    }

    #[test]
    fn test_pipeline_input_accepts_empty_strings() {
        let input: PipelineInput = serde_json::from_str(
            r#"{"job_name":"","stage_name":"","branch":"","environment":"","user":""}"#,
        )
        .unwrap();

        assert_eq!(input.job_name, "");
        assert_eq!(input.user, "");
    }
}
