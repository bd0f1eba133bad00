// Payload encoding benchmarks.
//
// Covers the CRC16 routine on its own, full payload construction with and
// without an amount, and decoding with checksum verification. The encoder
// runs on every keystroke of the amount field, so it should stay well under
// a microsecond.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pix_protocol::amount::Amount;
use pix_protocol::emv::checksum16;
use pix_protocol::key::PixKeyType;
use pix_protocol::payload::{build_final_payload, decode_payload, PaymentTarget};

fn target() -> PaymentTarget {
    PaymentTarget::new(
        "123.456.789-01",
        PixKeyType::Cpf,
        "Fulano de Tal da Silva Sauro",
        "Sao Jose dos Campos",
    )
}

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc16/checksum16");
    for len in [32usize, 128, 512] {
        let input = "0".repeat(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, s| {
            b.iter(|| checksum16(s));
        });
    }
    group.finish();
}

fn bench_build_open_amount(c: &mut Criterion) {
    let t = target();
    c.bench_function("payload/build_open_amount", |b| {
        b.iter(|| build_final_payload(&t));
    });
}

fn bench_build_with_amount(c: &mut Criterion) {
    let t = target().with_amount(Some(Amount::from_centavos(123_456)));
    c.bench_function("payload/build_with_amount", |b| {
        b.iter(|| build_final_payload(&t));
    });
}

fn bench_decode(c: &mut Criterion) {
    let payload = build_final_payload(&target().with_amount(Some(Amount::from_centavos(999))))
        .expect("benchmark payload encodes");
    c.bench_function("payload/decode", |b| {
        b.iter(|| decode_payload(&payload));
    });
}

criterion_group!(
    benches,
    bench_checksum,
    bench_build_open_amount,
    bench_build_with_amount,
    bench_decode
);
criterion_main!(benches);
