//! `BatchEngine`: orchestrates chunked, parallel batch decoding.

use crate::request::BatchRequest;
use logabi_core::{
    decoder::{ErrorMode, LogDecoder},
    error::{BatchDecodeError, DecodeError},
    event::EventLookup,
    log::{DecodedEvent, RawLog},
};
use logabi_observability::DecodeMetrics;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of a batch decode job.
#[derive(Debug)]
pub struct BatchResult {
    /// Successfully decoded events, in input order
    pub events: Vec<DecodedEvent>,
    /// (original_index, error) pairs; only populated in Collect mode
    pub errors: Vec<(usize, DecodeError)>,
    /// Logs dropped in Skip mode
    pub skipped: usize,
    /// Total raw logs processed
    pub total_input: usize,
}

/// Batch decode engine.
///
/// Holds the catalog and decoder behind `Arc`s so one engine can serve many
/// requests; every chunk is decoded in parallel against the same catalog.
pub struct BatchEngine {
    lookup: Arc<dyn EventLookup>,
    decoder: Arc<dyn LogDecoder>,
    metrics: Option<DecodeMetrics>,
}

impl BatchEngine {
    pub fn new(lookup: Arc<dyn EventLookup>, decoder: Arc<dyn LogDecoder>) -> Self {
        Self {
            lookup,
            decoder,
            metrics: None,
        }
    }

    /// Record counters and latencies into `metrics` for every request.
    pub fn with_metrics(mut self, metrics: DecodeMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Execute a batch decode request.
    ///
    /// With `concurrency > 0` the work runs on a dedicated pool of that many
    /// threads; otherwise on Rayon's global pool.
    pub fn decode(&self, req: BatchRequest) -> Result<BatchResult, BatchDecodeError> {
        if req.concurrency == 0 {
            return self.run(&req);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(req.concurrency)
            .build()
            .map_err(|e| BatchDecodeError::ThreadPool(e.to_string()))?;
        pool.install(|| self.run(&req))
    }

    fn run(&self, req: &BatchRequest) -> Result<BatchResult, BatchDecodeError> {
        let total_input = req.logs.len();
        let chunk_size = req.chunk_size.max(1);
        info!(
            "BatchEngine: decoding {} logs (chunk_size={}, error_mode={:?})",
            total_input, chunk_size, req.error_mode
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_batch_size(total_input);
        }

        let mut all_events: Vec<DecodedEvent> = Vec::with_capacity(total_input);
        let mut all_errors: Vec<(usize, DecodeError)> = Vec::new();
        let mut skipped = 0usize;
        let mut global_offset = 0usize;

        for chunk in req.logs.chunks(chunk_size) {
            let started = Instant::now();
            let results = self.decode_chunk(chunk);
            if let Some(metrics) = &self.metrics {
                metrics.record_latency(started.elapsed().as_secs_f64() * 1_000.0);
            }

            for (local_idx, result) in results.into_iter().enumerate() {
                let index = global_offset + local_idx;
                match result {
                    Ok(event) => {
                        if let Some(metrics) = &self.metrics {
                            metrics.record_decoded(&event);
                        }
                        all_events.push(event);
                    }
                    Err(err) => {
                        if let Some(metrics) = &self.metrics {
                            metrics.record_error(&err);
                        }
                        match req.error_mode {
                            ErrorMode::Skip => {
                                debug!("BatchEngine: skipping log {}: {}", index, err);
                                skipped += 1;
                            }
                            ErrorMode::Collect => all_errors.push((index, err)),
                            ErrorMode::Throw => {
                                warn!("BatchEngine: aborting at log {}: {}", index, err);
                                return Err(BatchDecodeError::ItemFailed { index, source: err });
                            }
                        }
                    }
                }
            }

            global_offset += chunk.len();

            if let Some(cb) = &req.on_progress {
                cb.on_progress(all_events.len(), total_input);
            }
        }

        if skipped > 0 {
            warn!("BatchEngine: skipped {} logs that failed to decode", skipped);
        }
        info!(
            "BatchEngine: complete, {} decoded, {} errors",
            all_events.len(),
            all_errors.len()
        );

        Ok(BatchResult {
            events: all_events,
            errors: all_errors,
            skipped,
            total_input,
        })
    }

    fn decode_chunk(&self, chunk: &[RawLog]) -> Vec<Result<DecodedEvent, DecodeError>> {
        let lookup = self.lookup.as_ref();
        chunk
            .par_iter()
            .map(|log| self.decoder.decode_log(lookup, log))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logabi_catalog::AbiCatalog;
    use logabi_core::{event_selector, B256, U256};
    use logabi_evm::EventDecoder;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const ABI: &str = r#"[
        {"type": "event", "name": "Transfer", "inputs": [
            {"name": "from", "type": "address", "indexed": true},
            {"name": "to", "type": "address", "indexed": true},
            {"name": "value", "type": "uint256", "indexed": false}
        ]}
    ]"#;

    fn transfer(value: u64) -> RawLog {
        RawLog::new(
            vec![
                event_selector("Transfer(address,address,uint256)"),
                B256::with_last_byte(1),
                B256::with_last_byte(2),
            ],
            U256::from(value).to_be_bytes::<32>().to_vec(),
        )
    }

    fn broken() -> RawLog {
        RawLog::new(vec![B256::repeat_byte(0xee)], vec![])
    }

    fn engine() -> BatchEngine {
        let catalog = AbiCatalog::from_json(ABI).unwrap();
        BatchEngine::new(Arc::new(catalog), Arc::new(EventDecoder::new()))
    }

    fn logs() -> Vec<RawLog> {
        vec![transfer(1), broken(), transfer(2), transfer(3), broken()]
    }

    #[test]
    fn skip_mode_drops_failures() {
        let result = engine()
            .decode(BatchRequest::new(logs()).chunk_size(2))
            .unwrap();
        assert_eq!(result.total_input, 5);
        assert_eq!(result.events.len(), 3);
        assert_eq!(result.skipped, 2);
        assert!(result.errors.is_empty());
        let values: Vec<_> = result
            .events
            .iter()
            .map(|e| e.param("value").and_then(|v| v.as_uint()).unwrap())
            .collect();
        assert_eq!(values, [U256::from(1u64), U256::from(2u64), U256::from(3u64)]);
    }

    #[test]
    fn collect_mode_keeps_global_indices() {
        let result = engine()
            .decode(
                BatchRequest::new(logs())
                    .chunk_size(2)
                    .error_mode(ErrorMode::Collect),
            )
            .unwrap();
        let indices: Vec<_> = result.errors.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, [1, 4]);
        assert!(matches!(
            result.errors[0].1,
            DecodeError::NoMatchingEvent { .. }
        ));
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn throw_mode_aborts_on_first_error() {
        let err = engine()
            .decode(BatchRequest::new(logs()).error_mode(ErrorMode::Throw))
            .unwrap_err();
        match err {
            BatchDecodeError::ItemFailed { index, .. } => assert_eq!(index, 1),
            other => panic!("expected ItemFailed, got {other:?}"),
        }
    }

    #[test]
    fn progress_reported_per_chunk() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);
        engine()
            .decode(
                BatchRequest::new(logs())
                    .chunk_size(2)
                    .on_progress(move |done, total| seen.lock().unwrap().push((done, total))),
            )
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), [(1, 5), (3, 5), (3, 5)]);
    }

    #[test]
    fn dedicated_pool_gives_same_result() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&counter);
        let result = engine()
            .decode(
                BatchRequest::new((0..100).map(transfer).collect())
                    .concurrency(2)
                    .chunk_size(7)
                    .on_progress(move |_, _| {
                        c.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .unwrap();
        assert_eq!(result.events.len(), 100);
        assert_eq!(counter.load(Ordering::SeqCst), 15);
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let result = engine()
            .decode(BatchRequest::new(vec![transfer(1)]).chunk_size(0))
            .unwrap();
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn records_metrics() {
        let result = engine()
            .with_metrics(DecodeMetrics::global())
            .decode(BatchRequest::new(logs()))
            .unwrap();
        assert_eq!(result.events.len(), 3);
    }

    #[test]
    fn empty_batch() {
        let result = engine().decode(BatchRequest::new(vec![])).unwrap();
        assert_eq!(result.total_input, 0);
        assert!(result.events.is_empty());
    }
}
