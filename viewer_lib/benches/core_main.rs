use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nalgebra::{vector, Vector3};
use viewer_lib::{
    color,
    transfer_function::ControlPoint,
    volumetric::{parse, GradientConfig, VolumeStore},
    TransferFunction,
};

const SIDE: i16 = 64;

fn synthetic_stream(side: i16) -> Vec<u8> {
    let dims: Vector3<i16> = vector![side, side, side];
    let mut bytes = Vec::with_capacity(6 + (side as usize).pow(3) * 2);
    for d in [dims.x, dims.y, dims.z] {
        bytes.extend_from_slice(&d.to_le_bytes());
    }
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                let sample = (x ^ y).wrapping_add(z.wrapping_mul(3));
                bytes.extend_from_slice(&sample.to_le_bytes());
            }
        }
    }
    bytes
}

fn ingest_with_gradients(c: &mut Criterion) {
    let stream = synthetic_stream(SIDE);

    c.bench_function("ingest 64^3 stream + gradient precompute", |b| {
        b.iter(|| {
            let metadata = parse::stream_header(&stream).unwrap();
            VolumeStore::load(metadata, &stream, GradientConfig::default()).unwrap()
        });
    });
}

fn bake_transfer_function(c: &mut Criterion) {
    let mut tf = TransferFunction::new(vec![
        ControlPoint::new(0.0, 0.0, color::black()),
        ControlPoint::new(0.2, 0.05, color::new(0.8, 0.5, 0.4)),
        ControlPoint::new(0.45, 0.3, color::new(0.9, 0.8, 0.7)),
        ControlPoint::new(0.7, 0.8, color::white()),
        ControlPoint::new(1.0, 1.0, color::white()),
    ]);

    c.bench_function("bake 256 entry lookup table", |b| {
        b.iter(|| {
            tf.set_alpha_power(1.3);
            black_box(tf.bake()[1023])
        });
    });
}

fn sample_trilinear(c: &mut Criterion) {
    let stream = synthetic_stream(SIDE);
    let metadata = parse::stream_header(&stream).unwrap();
    let volume = VolumeStore::load(metadata, &stream, GradientConfig::default()).unwrap();

    c.bench_function("trilinear sample sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            let mut t = 0.37f32;
            for _ in 0..4096 {
                t = (t * 1.619).fract();
                let p = nalgebra::point![t * 62.0, (1.0 - t) * 62.0, t * 31.0];
                acc += volume.sample_at(p);
            }
            acc
        });
    });
}

criterion_group! {
    name = ingestion;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = ingest_with_gradients
}

criterion_group! {
    name = tables;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = bake_transfer_function, sample_trilinear
}

criterion_main!(ingestion, tables);
