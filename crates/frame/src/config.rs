//! Configuration for asset materialization.

use serde::{Deserialize, Serialize};

use extension_array::AssetNamePolicy;
use frame_common::{FrameError, Result};

/// What happens when one cell cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fail the whole operation.
    #[default]
    Abort,
    /// Leave the cell missing.
    NullCell,
    /// Drop the row from the output.
    SkipRow,
}

impl FailurePolicy {
    /// Parse from string (case-insensitive), falling back to `Abort`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "null" | "null_cell" | "nullcell" => Self::NullCell,
            "skip" | "skip_row" | "skiprow" => Self::SkipRow,
            _ => Self::Abort,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::NullCell => "null_cell",
            Self::SkipRow => "skip_row",
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for `with_rasters`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializeConfig {
    /// Which assets to materialize when none are named explicitly.
    pub asset_names: AssetNamePolicy,

    /// Handling of cells whose asset is absent or fails to resolve.
    pub on_failure: FailurePolicy,

    /// Resolve rows on the rayon pool.
    pub parallel: bool,

    /// Worker count for a dedicated pool; `None` uses the global pool.
    pub threads: Option<usize>,
}

impl Default for MaterializeConfig {
    fn default() -> Self {
        Self {
            asset_names: AssetNamePolicy::First,
            on_failure: FailurePolicy::Abort,
            parallel: false,
            threads: None,
        }
    }
}

impl MaterializeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RASTERFRAME_ASSET_NAMES") {
            config.asset_names = AssetNamePolicy::from_str(&val);
        }

        if let Ok(val) = std::env::var("RASTERFRAME_ON_FAILURE") {
            config.on_failure = FailurePolicy::from_str(&val);
        }

        if let Ok(val) = std::env::var("RASTERFRAME_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("RASTERFRAME_THREADS") {
            if let Ok(threads) = val.parse() {
                config.threads = Some(threads);
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(FrameError::Config("threads must be > 0".to_string()));
        }

        if self.threads.is_some() && !self.parallel {
            return Err(FrameError::Config(
                "threads is only used when parallel is enabled".to_string(),
            ));
        }

        Ok(())
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }

    pub fn with_asset_names(mut self, policy: AssetNamePolicy) -> Self {
        self.asset_names = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}
