use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use palette_shift::{palette_shift_rgb_in_place, BlockSize, Palette, Rgb};

fn gradient_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width) as u8);
            data.push((y * 255 / height) as u8);
            data.push(((x + y) * 127 / (width + height)) as u8);
        }
    }
    data
}

fn grey_ramp(colors: usize) -> Palette {
    Palette::new(
        (0..colors)
            .map(|i| {
                let v = (i * 255 / (colors - 1).max(1)) as u8;
                Rgb::new(v, v, v)
            })
            .collect(),
    )
    .unwrap()
}

fn benchmark_block_sizes(c: &mut Criterion) {
    let (width, height) = (1920, 1080);
    let image = gradient_image(width, height);
    let palette = grey_ramp(16);

    let mut group = c.benchmark_group("palette_shift_1080p");
    group.sample_size(20);

    for size in [1usize, 4, 16] {
        let block = BlockSize::square(size).unwrap();
        group.bench_with_input(BenchmarkId::new("block", size), &block, |b, &block| {
            b.iter(|| {
                let mut data = image.clone();
                palette_shift_rgb_in_place(&mut data, width, height, &palette, block).unwrap();
                black_box(data);
            })
        });
    }
    group.finish();
}

fn benchmark_palette_sizes(c: &mut Criterion) {
    let (width, height) = (1024, 1024);
    let image = gradient_image(width, height);
    let block = BlockSize::square(2).unwrap();

    let mut group = c.benchmark_group("palette_shift_colors");
    group.sample_size(20);

    for colors in [2usize, 16, 256] {
        let palette = grey_ramp(colors);
        group.bench_with_input(BenchmarkId::new("colors", colors), &palette, |b, palette| {
            b.iter(|| {
                let mut data = image.clone();
                palette_shift_rgb_in_place(&mut data, width, height, palette, block).unwrap();
                black_box(data);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_block_sizes, benchmark_palette_sizes);
criterion_main!(benches);
