use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fix44_codec::decoder::Decoder;
use fix44_codec::encoder::{EncodeParams, Encoder, FrozenClock};
use fix44_codec::tag;

// ---------------------------------------------------------------------------
// Benchmark inputs — built through the Encoder so BodyLength/CheckSum are
// correct and every message survives default (checksum + dictionary) decode
// validation.
// ---------------------------------------------------------------------------

fn frozen_encoder() -> Encoder<FrozenClock> {
    Encoder::with_clock(FrozenClock("20240101-12:00:00.000".to_string()))
}

fn heartbeat() -> Vec<u8> {
    frozen_encoder()
        .build(&EncodeParams {
            sender: "SENDER",
            target: "TARGET",
            msg_type: "0",
            seq_num: 1,
            sending_time: None,
            body_fields: &[],
        })
        .unwrap()
}

fn order() -> Vec<u8> {
    frozen_encoder()
        .build(&EncodeParams {
            sender: "SENDER",
            target: "TARGET",
            msg_type: "D",
            seq_num: 1,
            sending_time: None,
            body_fields: &[
                (tag::CL_ORD_ID, b"ORD001"),
                (tag::HANDL_INST, b"1"),
                (tag::SYMBOL, b"AAPL"),
                (tag::SIDE, b"1"),
                (tag::TRANSACT_TIME, b"20240101-12:00:00"),
                (tag::ORDER_QTY, b"100"),
                (tag::PRICE, b"150.00"),
            ],
        })
        .unwrap()
}

fn exec_report() -> Vec<u8> {
    frozen_encoder()
        .build(&EncodeParams {
            sender: "TARGET",
            target: "SENDER",
            msg_type: "8",
            seq_num: 2,
            sending_time: None,
            body_fields: &[
                (tag::CL_ORD_ID, b"ORD001"),
                (tag::ORDER_ID, b"ORD001"),
                (tag::EXEC_ID, b"FILL001"),
                (tag::EXEC_TRANS_TYPE, b"0"),
                (tag::ORD_STATUS, b"2"),
                (tag::ORD_TYPE, b"2"),
                (tag::SYMBOL, b"AAPL"),
                (tag::SIDE, b"1"),
                (tag::ORDER_QTY, b"100"),
                (tag::LAST_SHARES, b"100"),
                (tag::LAST_PX, b"150.00"),
                (tag::CUM_QTY, b"100"),
                (tag::AVG_PX, b"150.00"),
                (tag::TRANSACT_TIME, b"20240101-12:00:01"),
            ],
        })
        .unwrap()
}

// ---------------------------------------------------------------------------
// Decode benchmarks
// ---------------------------------------------------------------------------

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for (name, msg) in [
        ("heartbeat", heartbeat()),
        ("order_7fields", order()),
        ("exec_report_14fields", exec_report()),
    ] {
        group.throughput(Throughput::Bytes(msg.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode_one", name), &msg, |b, msg| {
            let mut dec = Decoder::new();
            b.iter(|| {
                let mut cursor = 0;
                let decoded = dec.decode_one(black_box(msg), &mut cursor).unwrap();
                black_box(decoded.len())
            });
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Decode + field access benchmarks
// ---------------------------------------------------------------------------

fn bench_decode_and_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_and_find");

    let msg = order();
    group.throughput(Throughput::Bytes(msg.len() as u64));
    group.bench_function("order_find_symbol_side_qty_price", |b| {
        let mut dec = Decoder::new();
        b.iter(|| {
            let mut cursor = 0;
            let decoded = dec.decode_one(black_box(&msg), &mut cursor).unwrap();
            let symbol_len = decoded.find(tag::SYMBOL).map(|f| f.bytes().len());
            let side_len = decoded.find(tag::SIDE).map(|f| f.bytes().len());
            let qty_len = decoded.find(tag::ORDER_QTY).map(|f| f.bytes().len());
            let price_len = decoded.find(tag::PRICE).map(|f| f.bytes().len());
            black_box((symbol_len, side_len, qty_len, price_len))
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// decode_all over concatenated messages — measures the cursor-advancing
// multi-message path, not just single-shot decode_one.
// ---------------------------------------------------------------------------

fn bench_decode_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_all");

    let mut region = Vec::new();
    for _ in 0..16 {
        region.extend_from_slice(&heartbeat());
    }
    group.throughput(Throughput::Bytes(region.len() as u64));
    group.bench_function("sixteen_heartbeats", |b| {
        let mut dec = Decoder::new();
        b.iter(|| {
            let mut messages = dec.decode_all(black_box(&region));
            let mut count = 0usize;
            while let Some(result) = messages.next() {
                count += result.unwrap().len();
            }
            black_box(count)
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Encode benchmarks
// ---------------------------------------------------------------------------

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let cases: [(&str, &[(u32, &[u8])], &str); 3] = [
        ("heartbeat", &[], "0"),
        (
            "order_7fields",
            &[
                (tag::CL_ORD_ID, b"ORD001"),
                (tag::HANDL_INST, b"1"),
                (tag::SYMBOL, b"AAPL"),
                (tag::SIDE, b"1"),
                (tag::TRANSACT_TIME, b"20240101-12:00:00"),
                (tag::ORDER_QTY, b"100"),
                (tag::PRICE, b"150.00"),
            ],
            "D",
        ),
        (
            "exec_report_14fields",
            &[
                (tag::CL_ORD_ID, b"ORD001"),
                (tag::ORDER_ID, b"ORD001"),
                (tag::EXEC_ID, b"FILL001"),
                (tag::EXEC_TRANS_TYPE, b"0"),
                (tag::ORD_STATUS, b"2"),
                (tag::ORD_TYPE, b"2"),
                (tag::SYMBOL, b"AAPL"),
                (tag::SIDE, b"1"),
                (tag::ORDER_QTY, b"100"),
                (tag::LAST_SHARES, b"100"),
                (tag::LAST_PX, b"150.00"),
                (tag::CUM_QTY, b"100"),
                (tag::AVG_PX, b"150.00"),
                (tag::TRANSACT_TIME, b"20240101-12:00:01"),
            ],
            "8",
        ),
    ];

    for (name, body_fields, msg_type) in cases {
        let approx_len = heartbeat().len() + body_fields.iter().map(|(_, v)| v.len() + 8).sum::<usize>();
        group.throughput(Throughput::Bytes(approx_len as u64));
        group.bench_function(BenchmarkId::new("build", name), |b| {
            let mut enc = frozen_encoder();
            b.iter(|| {
                let params = EncodeParams {
                    sender: "SENDER",
                    target: "TARGET",
                    msg_type,
                    seq_num: 1,
                    sending_time: None,
                    body_fields,
                };
                let out = enc.build(black_box(&params)).unwrap();
                black_box(out.len())
            });
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Round-trip benchmarks (decode then re-encode field-for-field)
// ---------------------------------------------------------------------------

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    for (name, raw) in [("order_7fields", order()), ("exec_report_14fields", exec_report())] {
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode_then_encode", name), &raw, |b, raw| {
            let mut dec = Decoder::new();
            let mut enc = frozen_encoder();
            b.iter(|| {
                let mut cursor = 0;
                let decoded = dec.decode_one(black_box(raw), &mut cursor).unwrap();
                let msg_type = decoded.msg_type().unwrap().unwrap();
                let body_fields: Vec<(u32, &[u8])> = decoded
                    .iter_in_order()
                    .filter(|f| !tag::SHARED_REQUIRED.contains(&f.tag()))
                    .map(|f| (f.tag(), f.bytes()))
                    .collect();
                let params = EncodeParams {
                    sender: "SENDER",
                    target: "TARGET",
                    msg_type,
                    seq_num: 1,
                    sending_time: None,
                    body_fields: &body_fields,
                };
                let out = enc.build(&params).unwrap();
                black_box(out.len())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_decode_and_find,
    bench_decode_all,
    bench_encode,
    bench_roundtrip,
);
criterion_main!(benches);
