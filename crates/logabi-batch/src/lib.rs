//! # logabi-batch
//!
//! High-throughput batch decode engine for historical log processing.
//!
//! ## Features
//! - Memory-bounded chunking (default 10,000 logs per chunk)
//! - CPU-parallel decoding via Rayon, optionally on a dedicated pool
//! - Progress callbacks (for progress bars / ETAs)
//! - Three error modes: Skip, Collect, Throw
//!
//! ## Usage
//! ```ignore
//! use logabi_batch::{BatchEngine, BatchRequest};
//!
//! let engine = BatchEngine::new(Arc::new(catalog), Arc::new(EventDecoder::new()));
//! let result = engine.decode(BatchRequest::new(logs).chunk_size(5_000))?;
//! ```

pub mod config;
pub mod engine;
pub mod request;

pub use config::BatchConfig;
pub use engine::{BatchEngine, BatchResult};
pub use request::BatchRequest;
