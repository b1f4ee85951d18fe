use indexmap::IndexMap;

use crate::types::{FeatureVector, PipelineInput};

/// Frequency observed per categorical value during training.
///
/// Kept as an `IndexMap` so the artifact's key order survives a load/save
/// round trip, which keeps `cicast check` output stable across runs.
pub type FrequencyMap = IndexMap<String, f64>;

/// Feature value used for categories never observed at training time.
///
/// 1.0 rather than 0.0: a zero frequency would read downstream as "this value
/// never occurred", which is a stronger claim than "we have not seen it". The
/// fallback is a training-time convention and must not be changed here.
pub const UNSEEN_FREQUENCY: f64 = 1.0;

/// Encodes the three unbounded categorical fields (job, stage, branch) into
/// bounded numeric features via training-time frequency lookup.
///
/// Matching is byte-exact against the training keys. Pure and read-only, so a
/// single encoder is shared across all concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct FrequencyEncoder {
    job: FrequencyMap,
    stage: FrequencyMap,
    branch: FrequencyMap,
}

impl FrequencyEncoder {
    pub fn new(job: FrequencyMap, stage: FrequencyMap, branch: FrequencyMap) -> Self {
        Self { job, stage, branch }
    }

    pub fn job_frequency(&self, name: &str) -> f64 {
        lookup(&self.job, name)
    }

    pub fn stage_frequency(&self, name: &str) -> f64 {
        lookup(&self.stage, name)
    }

    pub fn branch_frequency(&self, name: &str) -> f64 {
        lookup(&self.branch, name)
    }

    /// Number of distinct job names seen at training time.
    pub fn job_count(&self) -> usize {
        self.job.len()
    }

    /// Number of distinct stage names seen at training time.
    pub fn stage_count(&self) -> usize {
        self.stage.len()
    }

    /// Number of distinct branch names seen at training time.
    pub fn branch_count(&self) -> usize {
        self.branch.len()
    }

    /// Derives the full feature record for one pipeline execution.
    pub fn encode(&self, input: &PipelineInput) -> FeatureVector {
        FeatureVector {
            job_name: input.job_name.clone(),
            stage_name: input.stage_name.clone(),
            branch: input.branch.clone(),
            environment: input.environment.clone(),
            user: input.user.clone(),
            job_freq: self.job_frequency(&input.job_name),
            stage_freq: self.stage_frequency(&input.stage_name),
            branch_freq: self.branch_frequency(&input.branch),
        }
    }
}

fn lookup(map: &FrequencyMap, key: &str) -> f64 {
    map.get(key).copied().unwrap_or(UNSEEN_FREQUENCY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> FrequencyEncoder {
        FrequencyEncoder::new(
            FrequencyMap::from([("build".to_string(), 10.0), ("deploy".to_string(), 3.0)]),
            FrequencyMap::from([("test".to_string(), 5.0)]),
            FrequencyMap::from([("main".to_string(), 20.0), ("".to_string(), 2.0)]),
        )
    }

    #[test]
    fn test_known_values_return_stored_frequency() {
        let encoder = encoder();

        assert_eq!(encoder.job_frequency("build"), 10.0);
        assert_eq!(encoder.job_frequency("deploy"), 3.0);
        assert_eq!(encoder.stage_frequency("test"), 5.0);
        assert_eq!(encoder.branch_frequency("main"), 20.0);
    }

    #[test]
    fn test_unseen_values_fall_back_to_one() {
        let encoder = encoder();

        assert_eq!(encoder.job_frequency("unknown_job"), UNSEEN_FREQUENCY);
        assert_eq!(encoder.stage_frequency("lint"), UNSEEN_FREQUENCY);
        assert_eq!(encoder.branch_frequency("feature/x"), UNSEEN_FREQUENCY);
    }

    #[test]
    fn test_matching_is_byte_exact() {
        let encoder = encoder();

        // No case folding or trimming against training keys.
        assert_eq!(encoder.job_frequency("Build"), UNSEEN_FREQUENCY);
        assert_eq!(encoder.job_frequency("build "), UNSEEN_FREQUENCY);
    }

    #[test]
    fn test_empty_string_is_an_ordinary_key() {
        let encoder = encoder();

        assert_eq!(encoder.branch_frequency(""), 2.0);
        assert_eq!(encoder.job_frequency(""), UNSEEN_FREQUENCY);
    }

    #[test]
    fn test_encode_carries_raw_fields_and_derived_features() {
        let encoder = encoder();
        let input = PipelineInput {
            job_name: "build".to_string(),
            stage_name: "test".to_string(),
            branch: "main".to_string(),
            environment: "prod".to_string(),
            user: "alice".to_string(),
        };

        let features = encoder.encode(&input);

        assert_eq!(features.job_name, "build");
        assert_eq!(features.environment, "prod");
        assert_eq!(features.user, "alice");
        assert_eq!(features.job_freq, 10.0);
        assert_eq!(features.stage_freq, 5.0);
        assert_eq!(features.branch_freq, 20.0);
    }
}
