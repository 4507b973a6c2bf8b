//! Throughput of the decode → frame → parse pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use streamchat::sse::{parse_line, LineFramer, ParseOutcome, Utf8Decoder};

/// A stream of `tokens` content events followed by the terminator.
fn generate_stream(tokens: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 0..tokens {
        body.push_str(&format!(
            "data: {{\"type\":\"content\",\"content\":\"token {} – ünïcödé \"}}\n\n",
            i
        ));
    }
    body.push_str("data: [DONE]\n");
    body.into_bytes()
}

/// Push `body` through the pipeline in `chunk_size` pieces, counting events.
fn run_pipeline(body: &[u8], chunk_size: usize) -> usize {
    let mut decoder = Utf8Decoder::new();
    let mut framer = LineFramer::new();
    let mut events = 0;

    for chunk in body.chunks(chunk_size) {
        let text = decoder.decode(chunk, false).unwrap_or_default();
        for line in framer.feed(&text) {
            match parse_line(&line) {
                Some(ParseOutcome::Event(_)) => events += 1,
                Some(ParseOutcome::Terminator) => return events,
                _ => {}
            }
        }
    }
    events
}

fn bench_pipeline_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_chunk_size");
    let body = generate_stream(500);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [1, 7, 64, 1024, 16 * 1024].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            chunk_size,
            |b, &size| b.iter(|| run_pipeline(black_box(&body), size)),
        );
    }

    group.finish();
}

fn bench_pipeline_stream_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_stream_length");

    for tokens in [10, 100, 1000].iter() {
        let body = generate_stream(*tokens);
        group.throughput(Throughput::Elements(*tokens as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tokens), &body, |b, body| {
            b.iter(|| run_pipeline(black_box(body), 512))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline_chunk_sizes, bench_pipeline_stream_length);
criterion_main!(benches);
