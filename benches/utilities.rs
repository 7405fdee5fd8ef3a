use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{DynamicImage, ImageFormat as CodecFormat, Rgb, RgbImage};
use std::hint::black_box;
use std::io::Cursor;
use toolbelt::imaging::{self, ImageFormat, ResizeOptions};
use toolbelt::text::{decode, encode, hash_text, Encoding, HashAlgorithm};

fn sample_text(len: usize) -> String {
    "The quick brown fox jumps over the lazy dog. "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    });
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut out), CodecFormat::Png)
        .expect("encode bench image");
    out
}

/// Digest throughput per algorithm at a few payload sizes
fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");

    for size in [64, 4 * 1024, 256 * 1024] {
        let text = sample_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        for algorithm in HashAlgorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), size),
                &text,
                |b, text| b.iter(|| hash_text(black_box(text), algorithm)),
            );
        }
    }

    group.finish();
}

fn bench_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let text = sample_text(16 * 1024);
    group.throughput(Throughput::Bytes(text.len() as u64));

    for encoding in Encoding::ALL {
        let encoded = encode(&text, encoding);
        group.bench_function(format!("encode_{encoding}"), |b| {
            b.iter(|| encode(black_box(&text), encoding))
        });
        group.bench_function(format!("decode_{encoding}"), |b| {
            b.iter(|| decode(black_box(&encoded), encoding).unwrap())
        });
    }

    group.finish();
}

/// Full decode, resample and re-encode of a PNG
fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("image");
    group.sample_size(20);

    let source = sample_png(1024, 768);
    for (width, height) in [(640, 480), (128, 128)] {
        let options = ResizeOptions::fit(width, height);
        group.bench_function(format!("resize_fit_{width}x{height}"), |b| {
            b.iter(|| imaging::resize(black_box(&source), &options).unwrap())
        });
    }

    group.bench_function("convert_png_to_jpeg", |b| {
        b.iter(|| imaging::convert(black_box(&source), ImageFormat::Jpeg).unwrap())
    });
    group.bench_function("info", |b| b.iter(|| imaging::info(black_box(&source)).unwrap()));

    group.finish();
}

criterion_group!(benches, bench_hash, bench_codecs, bench_resize);
criterion_main!(benches);
