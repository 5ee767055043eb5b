use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use sawyer::{decode, encode};

fn mixed_data(len: usize) -> Vec<u8> {
	let mut rng = rand::rngs::StdRng::seed_from_u64(42);
	let mut data = Vec::with_capacity(len);
	while data.len() < len {
		let value: u8 = rng.gen();
		let run = if rng.gen_bool(0.5) { rng.gen_range(1..200) } else { 1 };
		data.extend(std::iter::repeat(value).take(run));
	}
	data.truncate(len);
	data
}

fn bench_codec(c: &mut Criterion) {
	let zeroes = vec![0u8; 2 * 1024 * 1024];
	let mixed = mixed_data(2 * 1024 * 1024);

	let mut group = c.benchmark_group("sawyer");
	for (name, data) in [("zeroes", &zeroes), ("mixed", &mixed)] {
		let encoded = encode(data).unwrap();
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_function(format!("encode_{}", name), |b| {
			b.iter(|| encode(data).unwrap());
		});
		group.bench_function(format!("decode_{}", name), |b| {
			b.iter(|| decode(&encoded).unwrap());
		});
	}
	group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
