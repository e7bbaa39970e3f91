//! # logabi-observability
//!
//! OpenTelemetry-based observability for logabi.
//!
//! ## Built-in metrics
//! - `logabi.events_decoded`: counter, tagged with event name
//! - `logabi.decode_errors`: counter, tagged with error kind
//! - `logabi.decode_latency_ms`: histogram, per batch chunk
//! - `logabi.batch_size`: histogram
//!
//! ## Structured logging
//! Plain or JSON-structured logs, levels configurable per component.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::DecodeMetrics;
pub use tracing_setup::{init_tracing, try_init_tracing, LogConfig};
