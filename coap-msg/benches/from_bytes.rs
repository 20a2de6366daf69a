use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bench_input::TestInput;
use coap_msg::{Message, Registry, TryFromBytes};

fn message_from_bytes(c: &mut Criterion) {
  let mut group = c.benchmark_group("msg/from_bytes");
  group.measurement_time(std::time::Duration::from_secs(5));

  let registry = Registry::rfc7252();

  for inp in TestInput::all().iter() {
    let bytes = inp.get_bytes();

    group.bench_with_input(BenchmarkId::new("coap_msg/size", bytes.len()),
                           &bytes,
                           |b, bytes| b.iter(|| Message::try_from_bytes(black_box(bytes)).unwrap()));

    group.bench_with_input(BenchmarkId::new("coap_msg/own_registry/size", bytes.len()),
                           &bytes,
                           |b, bytes| {
                             b.iter(|| {
                                Message::try_from_bytes_with(black_box(bytes), &registry).unwrap()
                              })
                           });
  }
  group.finish();
}

criterion_group!(benches, message_from_bytes);
criterion_main!(benches);
