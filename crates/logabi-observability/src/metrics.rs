//! logabi metrics definitions.
//!
//! All metrics use OpenTelemetry conventions and go through whatever meter
//! provider the application installed; with none installed they are no-ops.

use logabi_core::{error::DecodeError, log::DecodedEvent};
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Central metrics handle for the decode pipeline.
#[derive(Clone)]
pub struct DecodeMetrics {
    pub events_decoded: Counter<u64>,
    pub decode_errors: Counter<u64>,
    pub decode_latency_ms: Histogram<f64>,
    pub batch_size: Histogram<u64>,
}

impl DecodeMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            events_decoded: meter
                .u64_counter("logabi.events_decoded")
                .with_description("Total number of successfully decoded logs")
                .build(),
            decode_errors: meter
                .u64_counter("logabi.decode_errors")
                .with_description("Logs that failed to decode")
                .build(),
            decode_latency_ms: meter
                .f64_histogram("logabi.decode_latency_ms")
                .with_description("Time to decode one chunk of logs in milliseconds")
                .build(),
            batch_size: meter
                .u64_histogram("logabi.batch_size")
                .with_description("Number of logs in a batch decode request")
                .build(),
        }
    }

    /// Metrics registered on the global meter provider under `logabi`.
    pub fn global() -> Self {
        Self::new(&global::meter("logabi"))
    }

    pub fn record_decoded(&self, event: &DecodedEvent) {
        self.events_decoded
            .add(1, &[KeyValue::new("event", event.name.clone())]);
    }

    pub fn record_error(&self, error: &DecodeError) {
        self.decode_errors
            .add(1, &[KeyValue::new("error_type", error.kind())]);
    }

    pub fn record_latency(&self, ms: f64) {
        self.decode_latency_ms.record(ms, &[]);
    }

    pub fn record_batch_size(&self, size: usize) {
        self.batch_size.record(size as u64, &[]);
    }
}

impl std::fmt::Debug for DecodeMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeMetrics").finish_non_exhaustive()
    }
}
