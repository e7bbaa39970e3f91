//! Batch decode throughput benchmarks.
//!
//! Measures decode throughput at various batch sizes using Criterion.
//!
//! # Running
//! ```bash
//! cargo bench --package logabi-batch
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logabi_batch::{BatchEngine, BatchRequest};
use logabi_catalog::AbiCatalog;
use logabi_core::{
    decoder::LogDecoder, event_selector, log::RawLog, AbiType, DecodedValue, B256, U256,
};
use logabi_evm::EventDecoder;
use std::sync::Arc;

// ─── Catalog setup ────────────────────────────────────────────────────────────

const ABI: &str = r#"[
    {"type": "event", "name": "Transfer", "inputs": [
        {"name": "from", "type": "address", "indexed": true},
        {"name": "to", "type": "address", "indexed": true},
        {"name": "value", "type": "uint256", "indexed": false}
    ]},
    {"type": "event", "name": "Memo", "inputs": [
        {"name": "author", "type": "address", "indexed": true},
        {"name": "tags", "type": "string[]", "indexed": false},
        {"name": "body", "type": "bytes", "indexed": false}
    ]}
]"#;

fn make_catalog() -> AbiCatalog {
    AbiCatalog::from_json(ABI).expect("benchmark ABI")
}

// ─── Log factory ──────────────────────────────────────────────────────────────

fn make_transfer_log(i: u64) -> RawLog {
    // Vary the payload to avoid branch prediction cheating
    let sender = B256::with_last_byte((i & 0xff) as u8);
    let receiver = B256::with_last_byte(((i + 1) & 0xff) as u8);
    RawLog::new(
        vec![
            event_selector("Transfer(address,address,uint256)"),
            sender,
            receiver,
        ],
        U256::from(i).to_be_bytes::<32>().to_vec(),
    )
}

fn make_batch(n: usize) -> Vec<RawLog> {
    (0..n).map(|i| make_transfer_log(i as u64)).collect()
}

// ─── Benchmarks ───────────────────────────────────────────────────────────────

fn bench_sequential_decode(c: &mut Criterion) {
    let catalog = make_catalog();
    let decoder = EventDecoder::new();

    let mut group = c.benchmark_group("sequential_decode");
    for batch_size in [100, 1_000, 10_000] {
        let batch = make_batch(batch_size);
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch,
            |b, batch| {
                b.iter(|| decoder.decode_logs(&catalog, batch));
            },
        );
    }
    group.finish();
}

fn bench_parallel_decode(c: &mut Criterion) {
    let engine = BatchEngine::new(Arc::new(make_catalog()), Arc::new(EventDecoder::new()));

    let mut group = c.benchmark_group("parallel_decode_rayon");
    group.sample_size(20);
    for batch_size in [1_000, 10_000, 100_000] {
        let batch = make_batch(batch_size);
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch,
            |b, batch| {
                b.iter(|| engine.decode(BatchRequest::new(batch.clone())));
            },
        );
    }
    group.finish();
}

fn bench_dynamic_body(c: &mut Criterion) {
    let catalog = make_catalog();
    let decoder = EventDecoder::new();
    let ty = AbiType::parse("string[]").expect("type");
    let tags = DecodedValue::Array(
        (0..16)
            .map(|i| DecodedValue::String(format!("tag-{i}")))
            .collect(),
    );
    let body = DecodedValue::Bytes(vec![0xab; 256]);
    let data = logabi_evm::encode_params(
        &[&ty, &AbiType::bytes()],
        &[tags, body],
    )
    .expect("encode memo");
    let log = RawLog::new(
        vec![
            event_selector("Memo(address,string[],bytes)"),
            B256::with_last_byte(7),
        ],
        data,
    );

    c.bench_function("decode_dynamic_memo", |b| {
        b.iter(|| decoder.decode_log(&catalog, &log));
    });
}

fn bench_selector(c: &mut Criterion) {
    c.bench_function("event_selector", |b| {
        b.iter(|| event_selector("Swap(address,address,int256,int256,uint160,uint128,int24)"));
    });
}

criterion_group!(
    benches,
    bench_sequential_decode,
    bench_parallel_decode,
    bench_dynamic_body,
    bench_selector,
);
criterion_main!(benches);
