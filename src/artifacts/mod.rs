mod frequency;
mod model;
mod preprocess;

pub use frequency::{FrequencyEncoder, FrequencyMap, UNSEEN_FREQUENCY};
pub use model::{LogisticModel, Model};
pub use preprocess::{FittedPreprocessor, Preprocessor};

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::error::{CicastError, Result};

pub const PREPROCESSOR_FILE: &str = "preprocess.json";
pub const MODEL_FILE: &str = "model.json";
pub const JOB_FREQ_FILE: &str = "job_freq_map.json";
pub const STAGE_FREQ_FILE: &str = "stage_freq_map.json";
pub const BRANCH_FREQ_FILE: &str = "branch_freq_map.json";

/// The five training artifacts, loaded once at startup and read-only for the
/// process lifetime.
///
/// Loading is all-or-nothing: a missing or unparsable file fails the whole
/// set, and the process never serves predictions with partial artifacts.
pub struct ArtifactSet {
    pub encoder: FrequencyEncoder,
    pub preprocessor: Box<dyn Preprocessor>,
    pub model: Box<dyn Model>,
}

impl std::fmt::Debug for ArtifactSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactSet").finish_non_exhaustive()
    }
}

impl ArtifactSet {
    pub fn new(
        encoder: FrequencyEncoder,
        preprocessor: Box<dyn Preprocessor>,
        model: Box<dyn Model>,
    ) -> Self {
        Self {
            encoder,
            preprocessor,
            model,
        }
    }

    /// Loads all five artifacts from a directory.
    ///
    /// # Errors
    ///
    /// Returns `CicastError::Artifact` naming the offending file if any
    /// artifact is missing or fails to parse.
    pub fn load(dir: &Path) -> Result<Self> {
        let preprocessor: FittedPreprocessor = load_json(dir, PREPROCESSOR_FILE)?;
        let model: LogisticModel = load_json(dir, MODEL_FILE)?;
        let job: FrequencyMap = load_json(dir, JOB_FREQ_FILE)?;
        let stage: FrequencyMap = load_json(dir, STAGE_FREQ_FILE)?;
        let branch: FrequencyMap = load_json(dir, BRANCH_FREQ_FILE)?;

        info!(
            "Loaded artifacts from {} ({} jobs, {} stages, {} branches)",
            dir.display(),
            job.len(),
            stage.len(),
            branch.len()
        );

        Ok(Self::new(
            FrequencyEncoder::new(job, stage, branch),
            Box::new(preprocessor),
            Box::new(model),
        ))
    }
}

fn load_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    debug!("Loading artifact: {}", path.display());

    let contents = fs::read_to_string(&path)
        .map_err(|e| CicastError::Artifact(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| CicastError::Artifact(format!("{}: {}", path.display(), e)))
}
