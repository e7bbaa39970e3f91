//! Batch decode request configuration.

use crate::config::BatchConfig;
use logabi_core::{
    decoder::{ErrorMode, ProgressCallback},
    log::RawLog,
};

/// Configuration for a batch decode job.
pub struct BatchRequest {
    /// The raw logs to decode
    pub logs: Vec<RawLog>,
    /// Number of parallel Rayon workers (0 = use all available CPUs)
    pub concurrency: usize,
    /// Max logs per chunk (memory safety)
    pub chunk_size: usize,
    /// How to handle decode errors
    pub error_mode: ErrorMode,
    /// Optional progress callback, invoked after every chunk
    pub on_progress: Option<Box<dyn ProgressCallback>>,
}

impl BatchRequest {
    pub fn new(logs: Vec<RawLog>) -> Self {
        Self::with_config(logs, &BatchConfig::default())
    }

    pub fn with_config(logs: Vec<RawLog>, config: &BatchConfig) -> Self {
        Self {
            logs,
            concurrency: config.concurrency,
            chunk_size: config.chunk_size,
            error_mode: config.error_mode,
            on_progress: None,
        }
    }

    pub fn chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = n;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    pub fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    pub fn on_progress<F: Fn(usize, usize) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for BatchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRequest")
            .field("logs", &self.logs.len())
            .field("concurrency", &self.concurrency)
            .field("chunk_size", &self.chunk_size)
            .field("error_mode", &self.error_mode)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_config() {
        let config = BatchConfig {
            chunk_size: 50,
            concurrency: 2,
            error_mode: ErrorMode::Collect,
        };
        let req = BatchRequest::with_config(vec![RawLog::default()], &config)
            .chunk_size(10)
            .error_mode(ErrorMode::Throw)
            .on_progress(|_, _| {});
        assert_eq!(req.chunk_size, 10);
        assert_eq!(req.concurrency, 2);
        assert_eq!(req.error_mode, ErrorMode::Throw);
        assert!(req.on_progress.is_some());
    }
}
