use criterion::{
	black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, BenchmarkId, Criterion,
	SamplingMode,
};
use image::{DynamicImage, Rgb, RgbImage};
use std::time::Duration;
use wallhue::{composite, extract, Color, CompositeOptions, EdgeMask, EdgeOptions, PaletteOptions, Strategy};

/// A noisy "room": a gradient wall with a few darker rectangles and a value-noise texture
fn synthetic_room(width: u32, height: u32) -> DynamicImage {
	DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
		let noise = (x.wrapping_mul(7919) ^ y.wrapping_mul(104729)) % 16;
		let base = 150 + (y * 60 / height) + noise;
		let in_frame = (width / 4..width / 2).contains(&x) && (height / 4..height / 2).contains(&y);
		let in_door = (width * 2 / 3..width * 5 / 6).contains(&x) && y > height / 3;
		let shade = if in_frame { 90 } else if in_door { 60 } else { 0 };

		#[allow(clippy::cast_possible_truncation)]
		let channel = |offset: u32| (base + offset).saturating_sub(shade).min(255) as u8;
		Rgb([channel(20), channel(10), channel(0)])
	}))
}

fn sizes() -> Vec<(String, DynamicImage)> {
	[(480, 270), (1280, 720), (1920, 1080)]
		.into_iter()
		.map(|(width, height)| (format!("{width}x{height}"), synthetic_room(width, height)))
		.collect()
}

fn create_group<'a>(c: &'a mut Criterion, name: &'a str) -> BenchmarkGroup<'a, WallTime> {
	let mut group = c.benchmark_group(name);
	group
		.sample_size(30)
		.noise_threshold(0.05)
		.sampling_mode(SamplingMode::Flat)
		.warm_up_time(Duration::from_millis(500));
	group
}

fn palette(c: &mut Criterion) {
	let mut group = create_group(c, "palette");

	for (size, image) in sizes() {
		for num_colors in [5, 16] {
			let options = PaletteOptions {
				num_colors,
				..PaletteOptions::default()
			};
			group.bench_with_input(BenchmarkId::new(format!("k={num_colors}"), &size), &image, |b, image| {
				b.iter(|| extract::from_image(image, black_box(&options)).expect("non-empty image"));
			});
		}
	}
}

fn edge_mask(c: &mut Criterion) {
	let mut group = create_group(c, "edge_mask");
	group.measurement_time(Duration::from_secs(4));

	for (size, image) in sizes() {
		let image = image.into_rgb8();
		group.bench_with_input(BenchmarkId::from_parameter(&size), &image, |b, image| {
			b.iter(|| EdgeMask::new(image, black_box(&EdgeOptions::default())));
		});
	}
}

fn compositing(c: &mut Criterion) {
	let mut group = create_group(c, "composite");
	group.measurement_time(Duration::from_secs(4));

	let color = Color::new(0x4a, 0x6d, 0xa7);
	for (size, image) in sizes() {
		for strategy in [Strategy::EdgeAware, Strategy::Flat] {
			let options = CompositeOptions {
				strategy,
				..CompositeOptions::default()
			};
			group.bench_with_input(BenchmarkId::new(format!("{strategy:?}"), &size), &image, |b, image| {
				b.iter(|| composite::apply(image, black_box(color), black_box(&options)).expect("non-empty image"));
			});
		}
	}
}

criterion_group!(benches, palette, edge_mask, compositing);
criterion_main!(benches);
