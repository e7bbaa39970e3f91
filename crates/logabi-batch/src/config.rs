//! Batch engine configuration.

use logabi_core::decoder::ErrorMode;
use serde::{Deserialize, Serialize};

/// Defaults applied to every [`BatchRequest`](crate::BatchRequest) unless
/// the request overrides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Max logs per chunk (memory safety)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Number of Rayon workers; 0 = the global pool (all available CPUs)
    #[serde(default)]
    pub concurrency: usize,
    /// How to handle per-log decode errors
    #[serde(default)]
    pub error_mode: ErrorMode,
}

fn default_chunk_size() -> usize {
    10_000
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            concurrency: 0,
            error_mode: ErrorMode::default(),
        }
    }
}

impl BatchConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
