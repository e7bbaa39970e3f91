//! The `LogDecoder` trait and the error-handling mode of batch decoding.
//!
//! The EVM decoder implements `LogDecoder`. The trait is object-safe so a
//! decoder can be stored as `Arc<dyn LogDecoder>` in the batch engine.

use crate::error::DecodeError;
use crate::event::{EventDefinition, EventLookup};
use crate::log::{DecodedEvent, RawLog};
use serde::{Deserialize, Serialize};

/// Callback invoked by the batch engine during long-running decodes.
/// `decoded` is the number of logs successfully decoded so far;
/// `total` is the total count in the current batch.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, decoded: usize, total: usize);
}

/// Blanket impl so closures can be used as progress callbacks.
impl<F: Fn(usize, usize) + Send + Sync> ProgressCallback for F {
    fn on_progress(&self, decoded: usize, total: usize) {
        self(decoded, total)
    }
}

/// Controls how the batch engine reacts to individual decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Skip logs that fail to decode. Suitable for best-effort analytics.
    #[default]
    Skip,
    /// Collect decode errors alongside successes and return both at the end.
    Collect,
    /// Abort the entire batch on first error.
    Throw,
}

/// Decodes raw logs against an event catalog.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so they can be shared across
/// Rayon threads without additional locking.
pub trait LogDecoder: Send + Sync {
    /// Resolve the event that emitted `log` and decode it.
    fn decode_log(
        &self,
        lookup: &dyn EventLookup,
        log: &RawLog,
    ) -> Result<DecodedEvent, DecodeError>;

    /// Decode `log` as an instance of a known event, skipping resolution.
    fn decode_with(
        &self,
        event: &EventDefinition,
        log: &RawLog,
    ) -> Result<DecodedEvent, DecodeError>;

    /// Decode every log independently; one failure never affects the others.
    fn decode_logs(
        &self,
        lookup: &dyn EventLookup,
        logs: &[RawLog],
    ) -> Vec<Result<DecodedEvent, DecodeError>> {
        logs.iter().map(|log| self.decode_log(lookup, log)).collect()
    }
}
