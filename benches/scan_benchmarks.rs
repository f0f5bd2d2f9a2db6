//! Benchmarks for the event scan and frame extraction pipeline.
//!
//! Run with: cargo bench

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{BigEndian, WriteBytesExt};
use criterion::{Criterion, criterion_group, criterion_main};
use tempfile::TempDir;
use unlog::{EventLog, ExtractConfig, LogProbe, NamingMode, RECORD_TAG, SYNC_WORD};

const CHANNEL: &str = "CAMERA_LEFT";

/// Write a log alternating image frames and pose records, 10 ms apart.
fn write_bench_log(path: &Path, events: u32) {
    let mut writer = BufWriter::new(File::create(path).unwrap());
    let frame_bytes = vec![0xAB; 4096];

    for index in 0..events {
        let timestamp = i64::from(index) * 10_000;
        let (channel, payload) = if index % 2 == 0 {
            (CHANNEL, image_payload(timestamp, &frame_bytes))
        } else {
            ("POSE", vec![0u8; 48])
        };

        writer.write_u32::<BigEndian>(SYNC_WORD).unwrap();
        writer.write_i64::<BigEndian>(i64::from(index)).unwrap();
        writer.write_i64::<BigEndian>(timestamp).unwrap();
        writer.write_u32::<BigEndian>(channel.len() as u32).unwrap();
        writer.write_u32::<BigEndian>(payload.len() as u32).unwrap();
        writer.write_all(channel.as_bytes()).unwrap();
        writer.write_all(&payload).unwrap();
    }
    writer.flush().unwrap();
}

fn image_payload(capture_timestamp: i64, data: &[u8]) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u64::<BigEndian>(RECORD_TAG).unwrap();
    payload.write_i64::<BigEndian>(capture_timestamp).unwrap();
    payload.write_i32::<BigEndian>(64).unwrap();
    payload.write_i32::<BigEndian>(64).unwrap();
    payload.write_i32::<BigEndian>(192).unwrap();
    payload
        .write_i32::<BigEndian>(u32::from_be_bytes(*b"MJPG") as i32)
        .unwrap();
    payload.write_i32::<BigEndian>(data.len() as i32).unwrap();
    payload.extend_from_slice(data);
    payload
}

fn benchmark_event_scan(criterion: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("bench.evl");
    write_bench_log(&log_path, 2_000);

    criterion.bench_function("scan 2000 events", |bencher| {
        bencher.iter(|| {
            let mut log = EventLog::open(&log_path).unwrap();
            let count = log.events().count();
            assert_eq!(count, 2_000);
        });
    });

    criterion.bench_function("probe 2000 events", |bencher| {
        bencher.iter(|| {
            let summary = LogProbe::probe(&log_path).unwrap();
            assert_eq!(summary.event_count, 2_000);
        });
    });
}

fn benchmark_extraction(criterion: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("bench.evl");
    write_bench_log(&log_path, 1_000);

    criterion.bench_function("extract 500 frames (sequence naming)", |bencher| {
        bencher.iter(|| {
            let out = TempDir::new().unwrap();
            let config = ExtractConfig::new(CHANNEL)
                .with_naming(NamingMode::Sequence)
                .with_output_dir(out.path());

            let mut log = EventLog::open(&log_path).unwrap();
            let summary = log.frames().extract(&config).unwrap();
            assert_eq!(summary.frames_written, 500);
        });
    });
}

criterion_group!(benches, benchmark_event_scan, benchmark_extraction);
criterion_main!(benches);
