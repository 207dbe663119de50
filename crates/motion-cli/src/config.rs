//! Application configuration.
//!
//! Resolved once at start-up and passed by reference afterwards.

use motion_feedback::{HeuristicThresholds, ScorerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `MOTIONCARE__LLM__LOCATION`
pub const ENV_PREFIX: &str = "MOTIONCARE";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Hosted model location
    pub llm: LlmConfig,

    /// Scorer generation settings
    pub scorer: ScorerConfig,

    /// Local heuristic scorer thresholds
    pub heuristic: HeuristicThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the form analysis API
    pub api_base_url: String,

    /// Cloud project hosting the model
    pub project_id: String,

    /// Cloud region of the model endpoint
    pub location: String,

    /// Service account key file
    pub credentials_path: PathBuf,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3001".to_string(),
            project_id: "motioncare-dev".to_string(),
            location: "us-central1".to_string(),
            credentials_path: PathBuf::from("./vertex-ai-key.json"),
        }
    }
}

impl AppConfig {
    /// Load from an optional file, overridden by `MOTIONCARE__*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
